//! Output formatting utilities for CLI.

use serde::Serialize;
use tally::{Roster, ScoreSheet, Translate};

/// JSON-serializable score sheet.
#[derive(Debug, Serialize)]
pub(super) struct JsonSheet {
    /// Categories in sheet order.
    categories: Vec<JsonCategory>,
    /// Per-player scores and totals.
    players: Vec<JsonSheetPlayer>,
    /// Names of the players sharing the highest total.
    leaders: Vec<String>,
}

/// JSON-serializable category.
#[derive(Debug, Serialize)]
struct JsonCategory {
    /// Lookup key.
    key: String,
    /// Display label.
    label: String,
}

/// JSON-serializable sheet column.
#[derive(Debug, Serialize)]
struct JsonSheetPlayer {
    name: String,
    color: &'static str,
    hex: &'static str,
    scores: Vec<i32>,
    total: i64,
}

impl JsonSheet {
    /// Create from a score sheet.
    pub(super) fn from_sheet(sheet: &ScoreSheet, strings: &dyn Translate) -> Self {
        let totals = sheet.totals();
        let players = sheet
            .players()
            .iter()
            .enumerate()
            .map(|(p, player)| JsonSheetPlayer {
                name: player.name.clone(),
                color: player.color.key(),
                hex: player.color.hex(),
                scores: (0..sheet.categories().len())
                    .map(|c| sheet.score(p, c).unwrap_or_default())
                    .collect(),
                total: totals.get(p).copied().unwrap_or_default(),
            })
            .collect();

        Self {
            categories: sheet
                .categories()
                .iter()
                .map(|c| JsonCategory {
                    key: c.key().to_string(),
                    label: c.label(strings),
                })
                .collect(),
            players,
            leaders: sheet
                .leaders()
                .into_iter()
                .map(|i| sheet.players()[i].name.clone())
                .collect(),
        }
    }
}

/// JSON-serializable roster.
#[derive(Debug, Serialize)]
pub(super) struct JsonRoster {
    players: Vec<JsonRosterPlayer>,
    can_start: bool,
}

/// JSON-serializable roster entry.
#[derive(Debug, Serialize)]
struct JsonRosterPlayer {
    name: String,
    color: &'static str,
    locked: bool,
    active: bool,
}

impl JsonRoster {
    /// Create from a roster.
    pub(super) fn from_roster(roster: &Roster) -> Self {
        Self {
            players: roster
                .players()
                .iter()
                .enumerate()
                .map(|(i, p)| JsonRosterPlayer {
                    name: p.name.clone(),
                    color: p.color.key(),
                    locked: roster.is_locked(i),
                    active: p.is_active(),
                })
                .collect(),
            can_start: roster.can_start(),
        }
    }
}

/// Format a score sheet as a human-readable table.
pub(super) fn format_sheet_text(sheet: &ScoreSheet, strings: &dyn Translate) -> String {
    let mut output = String::new();

    let labels: Vec<String> = sheet.categories().iter().map(|c| c.label(strings)).collect();
    let category_header = strings.lookup("calculate.category", &[]);
    let total_label = strings.lookup("calculate.total", &[]);
    let label_width = labels
        .iter()
        .chain([&category_header, &total_label])
        .map(|l| l.chars().count())
        .max()
        .unwrap_or_default();
    let column_width = sheet
        .players()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or_default()
        .max(6);

    output.push_str(&format!("{}\n\n", strings.lookup("calculate.title", &[])));

    output.push_str(&format!("{category_header:<label_width$}"));
    for player in sheet.players() {
        output.push_str(&format!(" | {:>column_width$}", player.name));
    }
    output.push('\n');

    for (c, label) in labels.iter().enumerate() {
        output.push_str(&format!("{label:<label_width$}"));
        for p in 0..sheet.players().len() {
            let score = sheet.score(p, c).unwrap_or_default();
            output.push_str(&format!(" | {score:>column_width$}"));
        }
        output.push('\n');
    }

    output.push_str(&format!("{total_label:<label_width$}"));
    for total in sheet.totals() {
        output.push_str(&format!(" | {total:>column_width$}"));
    }
    output.push('\n');

    let leaders: Vec<&str> = sheet
        .leaders()
        .into_iter()
        .map(|i| sheet.players()[i].name.as_str())
        .collect();
    if !leaders.is_empty() {
        let names = leaders.join(", ");
        output.push_str(&format!(
            "\n{}\n",
            strings.lookup("calculate.leading", &[("names", &names)])
        ));
    }

    output
}

/// Format a roster as human-readable text.
pub(super) fn format_roster_text(roster: &Roster, strings: &dyn Translate) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", strings.lookup("players.title", &[])));

    for (i, player) in roster.players().iter().enumerate() {
        let check = if player.is_active() { "✓" } else { " " };
        let color = strings.lookup(&format!("colors.{}", player.color.key()), &[]);
        let lock = if roster.is_locked(i) {
            format!(" ({})", strings.lookup("players.lockedTag", &[]))
        } else {
            String::new()
        };
        output.push_str(&format!(
            "  [{check}] {}. {:<20} {color}{lock}\n",
            i + 1,
            player.name
        ));
    }

    if !roster.can_start() {
        output.push_str(&format!("\n{}\n", strings.lookup("players.noneActive", &[])));
    }

    output
}
