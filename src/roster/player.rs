//! Player records.

use serde::{Deserialize, Serialize};

use crate::roster::PlayerColor;

/// A candidate player: a free-form name and a colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Name as typed; never trimmed on write.
    pub name: String,
    /// Colour representing this player.
    pub color: PlayerColor,
}

impl Player {
    /// Create a new player.
    #[must_use]
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Whether this player takes part when the game starts.
    ///
    /// A name made only of whitespace counts as empty.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Clear the name, keeping the colour.
    pub fn clear_name(&mut self) {
        self.name.clear();
    }
}
