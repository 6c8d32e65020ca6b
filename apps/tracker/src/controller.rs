//! Maps typed command lines onto tracker intents.

use client_core::{Intent, ParseFilterError, SortOrder, StatusFilter};
use shared::domain::IssueId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Open(IssueId),
    Redraw,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help'")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not an issue id")]
    InvalidIssueId(String),
    #[error(transparent)]
    Filter(#[from] ParseFilterError),
}

pub const HELP: &str = "\
commands:
  search <text>   filter by course unit (no text clears the search)
  status <s>      all | pending | in-progress | resolved
  sort <order>    newest | oldest
  filters         show or hide the status filter panel
  clear           reset search, status and sort
  view <id>       open an issue's detail page
  list            redraw the list
  help            show this help
  quit            exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Intent(Intent::SetSearch(rest.to_string())),
        "status" => {
            let status = required(rest, "status")?.parse::<StatusFilter>()?;
            Command::Intent(Intent::SetStatus(status))
        }
        "sort" => {
            let order = required(rest, "sort order")?.parse::<SortOrder>()?;
            Command::Intent(Intent::SetSort(order))
        }
        "filters" | "filter" => Command::Intent(Intent::ToggleFilters),
        "clear" => Command::Intent(Intent::ClearAll),
        "view" | "open" => {
            let raw = required(rest, "issue id")?;
            let id = raw
                .trim_start_matches('#')
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidIssueId(raw.to_string()))?;
            Command::Open(IssueId(id))
        }
        "list" | "ls" => Command::Redraw,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn required<'a>(rest: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(what))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
