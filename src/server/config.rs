use crate::server::error::{config::ConfigError, AppError};

/// How often the giveaway sweep runs, as a six field cron expression (with seconds).
pub const GIVEAWAY_SWEEP_SCHEDULE: &str = "*/30 * * * * *";

pub struct Config {
    pub database_url: String,

    pub discord_token: String,
    /// Bot owner is always allowed to manage giveaways.
    pub bot_owner_id: u64,
    /// Registers commands to a single guild instead of globally when set.
    pub guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            discord_token: require_env("DISCORD_TOKEN")?,
            bot_owner_id: parse_id("BOT_OWNER_ID", &require_env("BOT_OWNER_ID")?)?,
            guild_id: match std::env::var("GUILD_ID") {
                // "0" is accepted as unset
                Ok(value) if !value.is_empty() && value != "0" => {
                    Some(parse_id("GUILD_ID", &value)?)
                }
                _ => None,
            },
        })
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_id("BOT_OWNER_ID", " 123456789 ").unwrap(), 123456789);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let result = parse_id("GUILD_ID", "my-guild");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref name, ref value })
                if name == "GUILD_ID" && value == "my-guild"
        ));
    }
}
