//! Run command implementation.

use super::output::{JsonRoster, JsonSheet, format_roster_text, format_sheet_text};
use super::script::{Command, parse_line};
use super::{CliError, OutputFormat, new_session};
use std::fs;
use std::io;
use std::path::PathBuf;
use tally::config::Config;
use tally::i18n::Catalog;
use tally::{ColorChoice, Removal, ScoreSheet, Screen, Session};
use tracing::{info, warn};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the script cannot be read or a line fails.
pub(crate) fn execute(
    config: &Config,
    language: &str,
    script: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let text = match &script {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?,
        None => io::read_to_string(io::stdin())?,
    };

    let strings = Catalog::bundled(language);
    let mut session = new_session(config, &strings);
    let finished = run_script(&mut session, &text)?;

    // A game still in progress wins over one finished earlier in the script.
    let sheet = session.sheet().or(finished.as_ref());

    match (format, sheet) {
        (OutputFormat::Text, Some(sheet)) => print!("{}", format_sheet_text(sheet, &strings)),
        (OutputFormat::Text, None) => print!("{}", format_roster_text(session.roster(), &strings)),
        (OutputFormat::Json, Some(sheet)) => {
            println!("{}", to_json(&JsonSheet::from_sheet(sheet, &strings))?);
        }
        (OutputFormat::Json, None) => {
            println!("{}", to_json(&JsonRoster::from_roster(session.roster()))?);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))
}

/// Apply every line of `text` to `session`.
///
/// Returns the sheet of the last game finished by the script.
fn run_script(session: &mut Session, text: &str) -> Result<Option<ScoreSheet>, CliError> {
    let mut finished = None;

    for (n, line) in text.lines().enumerate() {
        let line_no = n + 1;
        let command = parse_line(line).map_err(|e| CliError::new(format!("line {line_no}: {e}")))?;
        let Some(command) = command else {
            continue;
        };
        if let Some(sheet) = apply(session, command)
            .map_err(|e| CliError::new(format!("line {line_no}: {e}")))?
        {
            finished = Some(sheet);
        }
    }

    Ok(finished)
}

fn apply(session: &mut Session, command: Command) -> Result<Option<ScoreSheet>, CliError> {
    match command {
        Command::NewGame => transition(session.new_game(), session, "new")?,
        Command::History => transition(session.open_history(), session, "history")?,
        Command::Back => transition(session.back(), session, "back")?,
        Command::Start => {
            require_screen(session, Screen::SelectPlayers, "start")?;
            if !session.start_game() {
                return Err(CliError::new("start: no player has a name"));
            }
        }
        Command::Finish => {
            require_screen(session, Screen::Calculate, "finish")?;
            return Ok(session.finish());
        }
        Command::Add => {
            require_screen(session, Screen::SelectPlayers, "add")?;
            if session.roster_mut().add_player().is_none() {
                warn!("roster is full, add ignored");
            }
        }
        Command::Remove(index) => {
            require_screen(session, Screen::SelectPlayers, "remove")?;
            if session.roster_mut().remove_player(index)? == Removal::Cleared {
                info!(player = index + 1, "minimum roster size, name cleared instead");
            }
        }
        Command::Name(index, name) => {
            require_screen(session, Screen::SelectPlayers, "name")?;
            session.roster_mut().rename_player(index, name)?;
        }
        Command::Color(index, color) => {
            require_screen(session, Screen::SelectPlayers, "color")?;
            if let ColorChoice::Refused { holder } =
                session.roster_mut().choose_color(index, color)?
            {
                warn!(
                    player = index + 1,
                    holder = holder + 1,
                    %color,
                    "color is locked by another player, ignored"
                );
            }
        }
        Command::Score {
            player,
            category,
            raw,
        } => {
            require_screen(session, Screen::Calculate, "score")?;
            if let Some(sheet) = session.sheet_mut() {
                sheet.set_score(player, category, &raw)?;
            }
        }
    }
    Ok(None)
}

fn transition(moved: bool, session: &Session, what: &str) -> Result<(), CliError> {
    if moved {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{what}: not available on the {:?} screen",
            session.screen()
        )))
    }
}

fn require_screen(session: &Session, screen: Screen, what: &str) -> Result<(), CliError> {
    if session.screen() == screen {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{what}: only available on the {screen:?} screen, currently on {:?}",
            session.screen()
        )))
    }
}
