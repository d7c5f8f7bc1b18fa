//! Slash command definitions and option parsing.
//!
//! Defines the `/giveaway` and `/giveaway-roles` commands registered by the bot, and
//! parses the resolved options of an invocation into `GiveawayCommand` / `RolesCommand`.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, ResolvedOption, ResolvedValue,
};

use crate::server::model::giveaway::MAX_WINNERS;

pub const GIVEAWAY_COMMAND: &str = "giveaway";
pub const GIVEAWAY_ROLES_COMMAND: &str = "giveaway-roles";

/// A parsed `/giveaway` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiveawayCommand {
    Create {
        prize: String,
        duration: String,
        winners: u32,
        description: Option<String>,
    },
    List,
    End {
        id: String,
    },
    Reroll {
        id: String,
        /// Raw count as entered, validated by the service.
        count: Option<i64>,
    },
}

/// A parsed `/giveaway-roles` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolesCommand {
    Add { role_id: u64 },
    Remove { role_id: u64 },
    List,
}

/// Builds every command the bot registers.
pub fn commands() -> Vec<CreateCommand> {
    vec![giveaway_command(), giveaway_roles_command()]
}

fn giveaway_command() -> CreateCommand {
    let id_option = || {
        CreateCommandOption::new(CommandOptionType::String, "id", "ID of the giveaway")
            .required(true)
    };

    CreateCommand::new(GIVEAWAY_COMMAND)
        .description("Start and manage giveaways")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "create",
                "Start a giveaway in this channel",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "prize",
                    "What is being given away",
                )
                .max_length(100)
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "duration",
                    "How long the giveaway runs, e.g. 1d 12h, 30min, 1week",
                )
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "winners",
                    "Number of winners (default 1)",
                )
                .min_int_value(1)
                .max_int_value(MAX_WINNERS as u64),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "description",
                    "Additional details",
                )
                .max_length(500),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List running giveaways in this server",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "end",
                "End a giveaway now and draw its winners",
            )
            .add_sub_option(id_option()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "reroll",
                "Draw new winners for an ended giveaway",
            )
            .add_sub_option(id_option())
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "count",
                    "Number of winners to draw",
                )
                .min_int_value(1)
                .max_int_value(MAX_WINNERS as u64),
            ),
        )
}

fn giveaway_roles_command() -> CreateCommand {
    let role_option = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
    };

    CreateCommand::new(GIVEAWAY_ROLES_COMMAND)
        .description("Configure which roles may manage giveaways")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "add",
                "Allow a role to manage giveaways",
            )
            .add_sub_option(role_option("Role to allow")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Stop a role from managing giveaways",
            )
            .add_sub_option(role_option("Role to remove")),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List the roles allowed to manage giveaways",
        ))
}

/// Parses the options of a `/giveaway` invocation.
///
/// # Returns
/// - `Some(GiveawayCommand)` - Known subcommand with its required options present
/// - `None` - Unknown subcommand or missing required option
pub fn parse_giveaway_command(options: &[ResolvedOption<'_>]) -> Option<GiveawayCommand> {
    let (name, options) = subcommand(options)?;

    match name {
        "create" => Some(GiveawayCommand::Create {
            prize: string_option(options, "prize")?,
            duration: string_option(options, "duration")?,
            winners: integer_option(options, "winners")
                .map(|winners| u32::try_from(winners).unwrap_or(0))
                .unwrap_or(1),
            description: string_option(options, "description"),
        }),
        "list" => Some(GiveawayCommand::List),
        "end" => Some(GiveawayCommand::End {
            id: string_option(options, "id")?,
        }),
        "reroll" => Some(GiveawayCommand::Reroll {
            id: string_option(options, "id")?,
            count: integer_option(options, "count"),
        }),
        _ => None,
    }
}

/// Parses the options of a `/giveaway-roles` invocation.
pub fn parse_roles_command(options: &[ResolvedOption<'_>]) -> Option<RolesCommand> {
    let (name, options) = subcommand(options)?;

    match name {
        "add" => Some(RolesCommand::Add {
            role_id: role_option(options, "role")?,
        }),
        "remove" => Some(RolesCommand::Remove {
            role_id: role_option(options, "role")?,
        }),
        "list" => Some(RolesCommand::List),
        _ => None,
    }
}

fn subcommand<'a, 'b>(
    options: &'b [ResolvedOption<'a>],
) -> Option<(&'b str, &'b [ResolvedOption<'a>])> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::SubCommand(sub_options) => Some((option.name, sub_options.as_slice())),
        _ => None,
    })
}

fn string_option(options: &[ResolvedOption<'_>], name: &str) -> Option<String> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::String(value) if option.name == name => Some(value.to_string()),
        _ => None,
    })
}

fn integer_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Integer(value) if option.name == name => Some(value),
        _ => None,
    })
}

fn role_option(options: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Role(role) if option.name == name => Some(role.id.get()),
        _ => None,
    })
}
