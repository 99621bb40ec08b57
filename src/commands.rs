//! Command parsing for the interactive loop
//!
//! One line of input maps to one command. Arguments follow the command
//! word separated by whitespace; search queries keep their internal
//! spaces.

use crate::language::Language;
use crate::{NewsrushError, Result};

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch articles for a free-text query
    Search(String),
    /// Switch the display language
    Language(Language),
    /// List the supported languages
    Languages,
    /// Toggle speech for the article at a 1-based position
    Speak(usize),
    /// Stop whatever is speaking
    Stop,
    /// Open an article's link in the browser
    Open(usize),
    /// Re-print the article list
    List,
    /// Show the category shortcuts
    Categories,
    /// Sign in under a display name
    Login(String),
    /// Sign out
    Logout,
    Help,
    Quit,
}

/// Parse one non-empty input line into a command
pub fn parse(line: &str) -> Result<Command> {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => {
            if rest.is_empty() {
                Err(NewsrushError::Other("usage: search <query>".to_string()))
            } else {
                Ok(Command::Search(rest.to_string()))
            }
        }
        "lang" | "language" => rest.parse::<Language>().map(Command::Language),
        "langs" | "languages" => Ok(Command::Languages),
        "speak" | "say" => parse_position(rest, "speak").map(Command::Speak),
        "stop" => Ok(Command::Stop),
        "open" | "o" => parse_position(rest, "open").map(Command::Open),
        "list" | "ls" => Ok(Command::List),
        "categories" | "cats" => Ok(Command::Categories),
        "login" => {
            if rest.is_empty() {
                Err(NewsrushError::Other("usage: login <name>".to_string()))
            } else {
                Ok(Command::Login(rest.to_string()))
            }
        }
        "logout" => Ok(Command::Logout),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(NewsrushError::Other(format!(
            "unknown command '{}' (try 'help')",
            other
        ))),
    }
}

fn parse_position(rest: &str, command: &str) -> Result<usize> {
    rest.parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| NewsrushError::Other(format!("usage: {} <number>", command)))
}
