//! Player roster for a game in setup.
//!
//! Covers everything that happens on the player selection screen:
//! - Players with a name and a colour
//! - Growing and shrinking the roster within its 2..=4 bounds
//! - Colour locks and automatic reassignment of unlocked players
//! - Picking the active players handed over to score entry

mod invariants;
mod locks;
mod manager;
mod palette;
mod player;

pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use locks::ColorLocks;
pub use manager::{
    ColorChoice, DEFAULT_PLACEHOLDER, Displacement, MAX_PLAYERS, MIN_PLAYERS, Removal, Roster,
    RosterError,
};
pub use palette::{ParseColorError, PlayerColor};
pub use player::Player;
