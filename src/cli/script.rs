//! Line-oriented command scripts.
//!
//! One command per line, indices 1-based:
//!
//! ```text
//! # comment
//! new
//! add
//! name 1 Alice
//! name 2 ""
//! color 1 green
//! remove 3
//! start
//! score 1 3 12
//! finish
//! ```

use tally::PlayerColor;

/// A parsed script command. Indices are already 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    /// Home → player selection.
    NewGame,
    /// Home → history.
    History,
    /// Go back one screen.
    Back,
    /// Add a player.
    Add,
    /// Remove (or clear) a player.
    Remove(usize),
    /// Rename a player.
    Name(usize, String),
    /// Choose a player's colour.
    Color(usize, PlayerColor),
    /// Start the game.
    Start,
    /// Enter a score.
    Score {
        /// Sheet column.
        player: usize,
        /// Sheet row.
        category: usize,
        /// Raw input, parsed by the sheet.
        raw: String,
    },
    /// Save and finish the game.
    Finish,
}

/// Parse one script line. Blank lines and `#` comments give `None`.
pub(super) fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let command = match word {
        "new" => Command::NewGame,
        "history" => Command::History,
        "back" => Command::Back,
        "add" => Command::Add,
        "start" => Command::Start,
        "finish" => Command::Finish,
        "remove" => Command::Remove(parse_index(rest, "player")?),
        "name" => {
            let (index, name) = split_word(rest);
            Command::Name(parse_index(index, "player")?, unquote(name).to_string())
        }
        "color" => {
            let (index, color) = split_word(rest);
            let color = color.parse().map_err(|e| format!("{e}"))?;
            Command::Color(parse_index(index, "player")?, color)
        }
        "score" => {
            let (player, rest) = split_word(rest);
            let (category, raw) = split_word(rest);
            Command::Score {
                player: parse_index(player, "player")?,
                category: parse_index(category, "category")?,
                raw: raw.to_string(),
            }
        }
        other => return Err(format!("unknown command '{other}'")),
    };

    Ok(Some(command))
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim()),
        None => (s, ""),
    }
}

/// Parse a 1-based index into a 0-based one.
fn parse_index(s: &str, what: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a {what} number (1, 2, ...), got '{s}'")),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
