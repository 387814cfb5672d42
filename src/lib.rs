// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Tally: player roster and score sheet for a board game night.
//!
//! This crate holds the logic behind a small score-keeping app:
//! - Picking 2-4 players and giving each a colour
//! - Handing the named players over to a score sheet
//! - Entering per-category scores and reading totals
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (TUI, scripts)       │
//! ├─────────────────────────────────────┤
//! │   Session (screen flow)             │
//! ├──────────────────┬──────────────────┤
//! │   Roster         │   ScoreSheet     │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! Display text is never embedded: it comes from a [`Translate`]
//! implementation such as the bundled [`i18n::Catalog`].

pub mod config;
pub mod error;
pub mod i18n;
pub mod roster;
pub mod score;
pub mod session;

pub use error::{IndexKind, OutOfBounds, TallyResult};
pub use i18n::Translate;

// Re-export key types at crate root for convenience
pub use roster::{ColorChoice, Player, PlayerColor, Removal, Roster};
pub use score::{Category, ScoreSheet};
pub use session::{Screen, Session};
