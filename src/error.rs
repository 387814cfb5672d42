//! Error types for roster and score sheet operations.
//!
//! Nothing in the core fails on input a user can produce: blank names,
//! colour collisions and unparsable scores all resolve to defined values.
//! What remains is the index contract: callers address players and
//! categories by position, and a position outside the current bounds is a
//! programming error in the caller.

use std::fmt;

/// What an out-of-range index was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// A position in the roster.
    Player,
    /// A column (player) of the score sheet.
    SheetPlayer,
    /// A row (category) of the score sheet.
    Category,
}

/// Index outside the bounds of the collection it addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    /// What the index was addressing.
    pub kind: IndexKind,
    /// The offending index.
    pub index: usize,
    /// Length of the collection at the time of the call.
    pub len: usize,
}

impl OutOfBounds {
    /// Create a new out-of-bounds error.
    #[must_use]
    pub const fn new(kind: IndexKind, index: usize, len: usize) -> Self {
        Self { kind, index, len }
    }

    /// Check `index` against `len`, returning the error when it is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`.
    pub const fn check(kind: IndexKind, index: usize, len: usize) -> TallyResult<usize> {
        if index < len {
            Ok(index)
        } else {
            Err(Self::new(kind, index, len))
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Player => write!(f, "player"),
            IndexKind::SheetPlayer => write!(f, "score sheet player"),
            IndexKind::Category => write!(f, "category"),
        }
    }
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} index {} out of bounds (len {})",
            self.kind, self.index, self.len
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// Result type for index-addressed operations.
pub type TallyResult<T> = Result<T, OutOfBounds>;
