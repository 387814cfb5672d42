//! Player colours.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Colour a player is represented by.
///
/// The declaration order is the enumeration order used for every
/// "first free colour" decision in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PlayerColor {
    /// Red (#E53935).
    Red = 0,
    /// Blue (#1E88E5).
    Blue = 1,
    /// Green (#43A047).
    Green = 2,
    /// Yellow (#FDD835).
    Yellow = 3,
}

impl PlayerColor {
    /// All colours in enumeration order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
    ];

    /// Stable lowercase key, used for parsing and string lookup.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
        }
    }

    /// Display colour as an `#RRGGBB` string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            PlayerColor::Red => "#E53935",
            PlayerColor::Blue => "#1E88E5",
            PlayerColor::Green => "#43A047",
            PlayerColor::Yellow => "#FDD835",
        }
    }

    /// Display colour as RGB components.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Red => (0xE5, 0x39, 0x35),
            PlayerColor::Blue => (0x1E, 0x88, 0xE5),
            PlayerColor::Green => (0x43, 0xA0, 0x47),
            PlayerColor::Yellow => (0xFD, 0xD8, 0x35),
        }
    }

    /// First colour, in enumeration order, that is not in `taken`.
    ///
    /// Falls back to [`PlayerColor::Red`] when every colour is taken.
    #[must_use]
    pub fn first_free<I>(taken: I) -> PlayerColor
    where
        I: IntoIterator<Item = PlayerColor>,
    {
        let mut used = [false; 4];
        for color in taken {
            used[color as usize] = true;
        }
        Self::ALL
            .into_iter()
            .find(|c| !used[*c as usize])
            .unwrap_or(PlayerColor::Red)
    }

    /// The colour after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> PlayerColor {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Green,
            PlayerColor::Green => PlayerColor::Yellow,
            PlayerColor::Yellow => PlayerColor::Red,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string does not name a player colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    /// The input that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color '{}' (expected red, blue, green or yellow)",
            self.input
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for PlayerColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseColorError {
                input: s.to_string(),
            })
    }
}
