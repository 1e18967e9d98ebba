use super::{Console, SessionError};
use crate::reddit::{Mode, Query};
use tracing::debug;

const NOT_AN_INTEGER: &str = "Input not recognized. Please enter an integer.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{0:?} is not a positive number of results")]
    Limit(String),
}

/// Split a comma-separated list of subreddits, dropping all whitespace and empty entries.
pub fn normalize_communities(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_alphabetic(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(char::is_alphabetic)
}

pub fn parse_limit(raw: &str) -> Result<u32, InputError> {
    match raw.trim().parse::<u32>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(InputError::Limit(raw.to_string())),
    }
}

fn answer<C: Console>(console: &mut C, message: &str) -> Result<String, SessionError> {
    console.prompt(message)?.ok_or(SessionError::Closed)
}

/// Ask for subreddits, a result limit and a ranking mode.
///
/// A bad limit or mode gets exactly one second chance. The second answer for the mode is
/// taken as a mode name as typed (`top`, `hot`), anything else lists new posts; a second
/// bad limit ends the session.
pub fn collect_query<C: Console>(console: &mut C) -> Result<Query, SessionError> {
    console.say("Enter a subreddit.")?;
    console.say("For multiple subreddits, separate with a comma.")?;
    console.say("Do not include \"r/\" when entering.")?;
    let communities = normalize_communities(&answer(console, "")?);

    let mut limit = answer(console, "Enter the number of results: ")?;
    if is_alphabetic(limit.trim()) {
        console.say(NOT_AN_INTEGER)?;
        limit = answer(console, "")?;
    }
    let limit = parse_limit(&limit)?;

    let menu = Mode::VALUES
        .iter()
        .map(|mode| format!("{}: {}", mode.selector(), mode))
        .collect::<Vec<_>>()
        .join("  ");
    console.say(&menu)?;
    let mode = match Mode::from_selector(&answer(console, "Choose a parameter: ")?) {
        Some(mode) => mode,
        None => {
            console.say(NOT_AN_INTEGER)?;
            let raw = answer(console, "")?;
            let mode = Mode::from_param(&raw);
            debug!("Parameter {raw:?} resolved to {mode}");
            mode
        }
    };

    Ok(Query {
        communities,
        limit,
        mode,
    })
}
