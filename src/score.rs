//! Score entry for a started game.
//!
//! - Fixed, ordered scoring categories
//! - A players × categories grid of integer scores
//! - Per-player totals, recomputed on every read

mod category;
mod sheet;

pub use category::{Category, DEFAULT_CATEGORY_KEYS, default_categories};
pub use sheet::{ScoreSheet, SheetError, parse_score};
