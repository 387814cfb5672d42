//! The score grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{IndexKind, OutOfBounds, TallyResult};
use crate::roster::Player;
use crate::score::Category;

/// Parse raw score input.
///
/// Surrounding whitespace is ignored. Anything that is not an `i32`
/// (empty input, words, overflow) scores 0.
#[must_use]
pub fn parse_score(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Error returned when a deserialized sheet is not rectangular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetError {
    /// Description of the mismatch.
    pub message: String,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid score sheet: {}", self.message)
    }
}

impl std::error::Error for SheetError {}

/// Scores of the players taking part in a game, one row per category.
///
/// The player columns are a snapshot of the roster's active players when the
/// game started; later roster edits do not reach the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SheetRecord", into = "SheetRecord")]
pub struct ScoreSheet {
    players: Vec<Player>,
    categories: Vec<Category>,
    /// Indexed by player, then category.
    scores: Vec<Vec<i32>>,
}

impl ScoreSheet {
    /// Create an all-zero sheet.
    #[must_use]
    pub fn new(players: Vec<Player>, categories: Vec<Category>) -> Self {
        let scores = vec![vec![0; categories.len()]; players.len()];
        debug!(
            players = players.len(),
            categories = categories.len(),
            "score sheet created"
        );
        Self {
            players,
            categories,
            scores,
        }
    }

    /// Players, one per column.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Categories, one per row.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Record raw input for one cell, returning the stored value.
    ///
    /// Unparsable input is stored as 0; see [`parse_score`].
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if either index is outside the sheet.
    pub fn set_score(&mut self, player: usize, category: usize, raw: &str) -> TallyResult<i32> {
        let value = parse_score(raw);
        self.set_value(player, category, value)?;
        Ok(value)
    }

    /// Store a value in one cell.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if either index is outside the sheet.
    pub fn set_value(&mut self, player: usize, category: usize, value: i32) -> TallyResult<()> {
        let (player, category) = self.check(player, category)?;
        debug!(player, category, value, "score set");
        self.scores[player][category] = value;
        Ok(())
    }

    /// Score in one cell.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if either index is outside the sheet.
    pub fn score(&self, player: usize, category: usize) -> TallyResult<i32> {
        let (player, category) = self.check(player, category)?;
        Ok(self.scores[player][category])
    }

    /// Sum of all category scores of one player.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `player` is not a column of the sheet.
    pub fn total(&self, player: usize) -> TallyResult<i64> {
        let player = OutOfBounds::check(IndexKind::SheetPlayer, player, self.players.len())?;
        Ok(self.scores[player].iter().copied().map(i64::from).sum())
    }

    /// Totals of every player, in column order.
    #[must_use]
    pub fn totals(&self) -> Vec<i64> {
        self.scores
            .iter()
            .map(|row| row.iter().copied().map(i64::from).sum())
            .collect()
    }

    /// Columns sharing the highest total. Empty for a sheet without players.
    #[must_use]
    pub fn leaders(&self) -> Vec<usize> {
        let totals = self.totals();
        let Some(&best) = totals.iter().max() else {
            return Vec::new();
        };
        totals
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == best)
            .map(|(i, _)| i)
            .collect()
    }

    fn check(&self, player: usize, category: usize) -> TallyResult<(usize, usize)> {
        let player = OutOfBounds::check(IndexKind::SheetPlayer, player, self.players.len())?;
        let category = OutOfBounds::check(IndexKind::Category, category, self.categories.len())?;
        Ok((player, category))
    }
}

#[derive(Serialize, Deserialize)]
struct SheetRecord {
    players: Vec<Player>,
    categories: Vec<Category>,
    scores: Vec<Vec<i32>>,
}

impl From<ScoreSheet> for SheetRecord {
    fn from(sheet: ScoreSheet) -> Self {
        Self {
            players: sheet.players,
            categories: sheet.categories,
            scores: sheet.scores,
        }
    }
}

impl TryFrom<SheetRecord> for ScoreSheet {
    type Error = SheetError;

    fn try_from(record: SheetRecord) -> Result<Self, Self::Error> {
        if record.scores.len() != record.players.len() {
            return Err(SheetError {
                message: format!(
                    "{} score rows for {} players",
                    record.scores.len(),
                    record.players.len()
                ),
            });
        }
        if let Some((i, row)) = record
            .scores
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != record.categories.len())
        {
            return Err(SheetError {
                message: format!(
                    "player {i} has {} scores for {} categories",
                    row.len(),
                    record.categories.len()
                ),
            });
        }
        Ok(Self {
            players: record.players,
            categories: record.categories,
            scores: record.scores,
        })
    }
}
