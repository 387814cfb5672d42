//! Roster invariants - sanity checks that detect bugs.
//!
//! Every roster operation is written to preserve these, so they should
//! NEVER trigger on a roster built through its own API. They also guard
//! rosters assembled from raw parts, e.g. after deserialization.

use crate::roster::{MAX_PLAYERS, MIN_PLAYERS, Roster};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all roster invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(roster: &Roster) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let players = roster.players();

    // Size bounds
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        violations.push(InvariantViolation {
            message: format!(
                "Roster has {} players, expected {MIN_PLAYERS}..={MAX_PLAYERS}",
                players.len()
            ),
        });
    }

    // Locks must point at existing rows
    for index in roster.locks() {
        if index >= players.len() {
            violations.push(InvariantViolation {
                message: format!(
                    "Lock at index {index} but roster has {} players",
                    players.len()
                ),
            });
        }
    }

    // No two locked players share a colour
    let locked: Vec<usize> = roster
        .locks()
        .iter()
        .filter(|&i| i < players.len())
        .collect();
    for (n, &a) in locked.iter().enumerate() {
        for &b in &locked[n + 1..] {
            if players[a].color == players[b].color {
                violations.push(InvariantViolation {
                    message: format!(
                        "Players {a} and {b} are both locked to {}",
                        players[a].color
                    ),
                });
            }
        }
    }

    violations
}

/// Assert all roster invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(roster: &Roster) {
    let violations = check_invariants(roster);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Roster invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_roster: &Roster) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{ColorLocks, Player, PlayerColor};

    #[test]
    fn test_valid_roster_passes() {
        let mut roster = Roster::new();
        roster.add_player();
        roster.choose_color(0, PlayerColor::Yellow).unwrap();
        assert!(check_invariants(&roster).is_empty());
    }

    #[test]
    fn test_oversized_roster_detected() {
        let players = vec![Player::new("x", PlayerColor::Red); 5];
        let err = Roster::from_parts(players, ColorLocks::new()).unwrap_err();
        assert!(err.violations[0].message.contains("5 players"));
    }

    #[test]
    fn test_dangling_lock_detected() {
        let players = vec![
            Player::new("A", PlayerColor::Red),
            Player::new("B", PlayerColor::Blue),
        ];
        let locks: ColorLocks = [3].into_iter().collect();
        let err = Roster::from_parts(players, locks).unwrap_err();
        assert!(err.violations[0].message.contains("Lock at index 3"));
    }

    #[test]
    fn test_unlocked_players_may_share_color() {
        let players = vec![
            Player::new("A", PlayerColor::Red),
            Player::new("B", PlayerColor::Red),
        ];
        let locks: ColorLocks = [0].into_iter().collect();
        assert!(Roster::from_parts(players, locks).is_ok());
    }
}
