//! Human duration parsing for giveaway lengths.
//!
//! Accepts free-form strings such as `1d 12h`, `30min`, `2hours` or `1week` and resolves
//! them to a number of seconds. A bare number is read as minutes. Seconds are not a
//! supported unit since giveaways cannot be shorter than a minute anyway.

use crate::server::error::giveaway::GiveawayError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
/// Months are approximated as 30 days.
const MONTH: i64 = 30 * DAY;
/// Years are approximated as 365 days.
const YEAR: i64 = 365 * DAY;

/// Unit spellings and their length in seconds.
///
/// Order matters for prefix matching: the first unit starting with the input wins.
const UNITS: &[(&str, i64)] = &[
    ("m", MINUTE),
    ("min", MINUTE),
    ("mins", MINUTE),
    ("minute", MINUTE),
    ("minutes", MINUTE),
    ("h", HOUR),
    ("hour", HOUR),
    ("hours", HOUR),
    ("hr", HOUR),
    ("hrs", HOUR),
    ("d", DAY),
    ("day", DAY),
    ("days", DAY),
    ("w", WEEK),
    ("week", WEEK),
    ("weeks", WEEK),
    ("month", MONTH),
    ("months", MONTH),
    ("y", YEAR),
    ("year", YEAR),
    ("years", YEAR),
];

/// Parses a duration string into a number of seconds.
///
/// The input is scanned as `<number><unit>` tokens. Tokens may be separated by
/// whitespace or commas, and whitespace is also allowed between a number and its unit
/// (`1 day 2 hours`). A number without a unit counts as minutes. Units are resolved by
/// exact match first and then by prefix (`mo` resolves to months).
///
/// # Arguments
/// - `input` - The user provided duration
///
/// # Returns
/// - `Ok(i64)` - Total duration in seconds, always strictly positive
/// - `Err(GiveawayError::InvalidDuration)` - Empty input, unknown unit, unit without a
///   number, unexpected character, overflow, or a total of zero
pub fn parse_duration(input: &str) -> Result<i64, GiveawayError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("Duration cannot be empty"));
    }

    // Plain number means minutes
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let total = parse_count(trimmed)?
            .checked_mul(MINUTE)
            .ok_or_else(|| invalid("Duration is too long"))?;
        return positive(total);
    }

    let lowered = trimmed.to_lowercase();
    let mut chars = lowered.chars().peekable();
    let mut total: i64 = 0;

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
            continue;
        }

        if !c.is_ascii_digit() {
            if c.is_alphabetic() {
                let unit: String = take_while(&mut chars, |c| c.is_alphabetic());
                return Err(invalid(&format!("Unit '{unit}' is missing a number")));
            }
            return Err(invalid(&format!("Unexpected character '{c}'")));
        }

        let number = take_while(&mut chars, |c| c.is_ascii_digit());
        let count = parse_count(&number)?;

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let unit = take_while(&mut chars, |c| c.is_alphabetic());
        let unit_seconds = if unit.is_empty() {
            MINUTE
        } else {
            resolve_unit(&unit)?
        };

        total = count
            .checked_mul(unit_seconds)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(|| invalid("Duration is too long"))?;
    }

    positive(total)
}

/// Looks up a unit by exact spelling, falling back to the first unit it is a prefix of.
fn resolve_unit(unit: &str) -> Result<i64, GiveawayError> {
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .or_else(|| UNITS.iter().find(|(name, _)| name.starts_with(unit)))
        .map(|(_, seconds)| *seconds)
        .ok_or_else(|| invalid(&format!("Unknown time unit: {unit}")))
}

fn take_while<I, F>(chars: &mut std::iter::Peekable<I>, predicate: F) -> String
where
    I: Iterator<Item = char>,
    F: Fn(char) -> bool,
{
    let mut taken = String::new();
    while let Some(&c) = chars.peek() {
        if !predicate(c) {
            break;
        }
        taken.push(c);
        chars.next();
    }
    taken
}

fn parse_count(digits: &str) -> Result<i64, GiveawayError> {
    digits
        .parse::<i64>()
        .map_err(|_| invalid("Duration is too long"))
}

fn positive(total: i64) -> Result<i64, GiveawayError> {
    if total <= 0 {
        return Err(invalid("Duration must be greater than zero"));
    }
    Ok(total)
}

fn invalid(reason: &str) -> GiveawayError {
    GiveawayError::InvalidDuration {
        reason: reason.to_string(),
    }
}
