//! Roster state management.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{IndexKind, OutOfBounds, TallyResult};
use crate::i18n::{Translate, interpolate};
use crate::roster::{
    ColorLocks, InvariantViolation, Player, PlayerColor, assert_invariants, check_invariants,
};

/// Fewest players a roster can hold.
pub const MIN_PLAYERS: usize = 2;

/// Most players a roster can hold.
pub const MAX_PLAYERS: usize = 4;

/// Placeholder name template used when no string lookup is supplied.
///
/// `{{position}}` is replaced with the 1-based roster position.
pub const DEFAULT_PLACEHOLDER: &str = "Player {{position}}";

/// Outcome of [`Roster::remove_player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The player was taken out of the roster.
    Removed(Player),
    /// The roster was at its minimum size, so only the name was cleared.
    Cleared,
}

/// An unlocked player moved off a colour another player chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// Position of the reassigned player.
    pub index: usize,
    /// Colour the player was given instead.
    pub to: PlayerColor,
}

/// Outcome of [`Roster::choose_color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorChoice {
    /// The colour was assigned and locked.
    Applied {
        /// Unlocked players that had to give the colour up.
        displaced: Vec<Displacement>,
    },
    /// Another player has locked this colour; nothing changed.
    Refused {
        /// Position of the locked holder.
        holder: usize,
    },
}

impl ColorChoice {
    /// Whether the colour was assigned.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, ColorChoice::Applied { .. })
    }
}

/// Error returned when a roster built from raw parts breaks an invariant.
#[derive(Debug, Clone)]
pub struct RosterError {
    /// Every invariant the parts violate.
    pub violations: Vec<InvariantViolation>,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "invalid roster: {}", messages.join("; "))
    }
}

impl std::error::Error for RosterError {}

/// Candidate players for the next game and their colour locks.
///
/// Every mutation keeps the roster between [`MIN_PLAYERS`] and
/// [`MAX_PLAYERS`] long and never lets two locked players share a colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterRecord", into = "RosterRecord")]
pub struct Roster {
    players: Vec<Player>,
    locks: ColorLocks,
    placeholder: String,
}

impl Roster {
    /// Create the starting roster: two placeholder players, red and blue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }

    /// Create the starting roster with a custom placeholder name template.
    ///
    /// The template may contain `{{position}}`, replaced by the 1-based
    /// position of each new player.
    #[must_use]
    pub fn with_placeholder(template: impl Into<String>) -> Self {
        let mut roster = Self {
            players: Vec::with_capacity(MAX_PLAYERS),
            locks: ColorLocks::new(),
            placeholder: template.into(),
        };
        while roster.players.len() < MIN_PLAYERS {
            roster.push_placeholder();
        }
        roster
    }

    /// Create the starting roster with placeholder names from a string lookup.
    ///
    /// `players.placeholder` is looked up without parameters and kept as the
    /// template, so `strings` must leave `{{position}}` in place (see
    /// [`Translate`]).
    #[must_use]
    pub fn localized(strings: &dyn Translate) -> Self {
        Self::with_placeholder(strings.lookup("players.placeholder", &[]))
    }

    /// Build a roster from existing players and locks.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] listing every violated invariant.
    pub fn from_parts(players: Vec<Player>, locks: ColorLocks) -> Result<Self, RosterError> {
        let roster = Self {
            players,
            locks,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        };
        let violations = check_invariants(&roster);
        if violations.is_empty() {
            Ok(roster)
        } else {
            Err(RosterError { violations })
        }
    }

    /// All players in roster order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get the player at `index`.
    #[must_use]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Number of players in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false; a roster never drops below [`MIN_PLAYERS`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Colour locks, by roster position.
    #[must_use]
    pub const fn locks(&self) -> &ColorLocks {
        &self.locks
    }

    /// Check whether the player at `index` has explicitly chosen a colour.
    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.locks.is_locked(index)
    }

    /// Whether another player can still be added.
    #[must_use]
    pub fn can_add_player(&self) -> bool {
        self.players.len() < MAX_PLAYERS
    }

    /// Placeholder name for a 1-based roster position.
    #[must_use]
    pub fn placeholder_name(&self, position: usize) -> String {
        interpolate(&self.placeholder, &[("position", &position.to_string())])
    }

    /// Append a placeholder player with the first colour nobody uses.
    ///
    /// Returns the new player's index, or `None` if the roster is full.
    pub fn add_player(&mut self) -> Option<usize> {
        if !self.can_add_player() {
            debug!(len = self.players.len(), "roster full, not adding a player");
            return None;
        }
        let index = self.push_placeholder();
        assert_invariants(self);
        Some(index)
    }

    fn push_placeholder(&mut self) -> usize {
        let index = self.players.len();
        let color = PlayerColor::first_free(self.players.iter().map(|p| p.color));
        let name = self.placeholder_name(index + 1);
        debug!(index, %color, name = %name, "adding player");
        self.players.push(Player::new(name, color));
        index
    }

    /// Remove the player at `index`.
    ///
    /// At the minimum roster size the row stays and only its name is cleared;
    /// colour and lock are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index` is not a roster position.
    pub fn remove_player(&mut self, index: usize) -> TallyResult<Removal> {
        OutOfBounds::check(IndexKind::Player, index, self.players.len())?;

        let removal = if self.players.len() <= MIN_PLAYERS {
            debug!(index, "roster at minimum size, clearing name");
            self.players[index].clear_name();
            Removal::Cleared
        } else {
            debug!(index, "removing player");
            let player = self.players.remove(index);
            self.locks.remove_and_shift(index);
            Removal::Removed(player)
        };

        assert_invariants(self);
        Ok(removal)
    }

    /// Replace the name of the player at `index` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index` is not a roster position.
    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> TallyResult<()> {
        OutOfBounds::check(IndexKind::Player, index, self.players.len())?;
        self.players[index].name = name.into();
        Ok(())
    }

    /// Explicitly choose `color` for the player at `index` and lock it.
    ///
    /// Unlocked players holding `color` are moved to the first colour not
    /// held by anyone but themselves and the chooser, excluding `color`
    /// (red if none is left). A colour locked by another player is never
    /// taken: the call is refused and the roster is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index` is not a roster position.
    pub fn choose_color(&mut self, index: usize, color: PlayerColor) -> TallyResult<ColorChoice> {
        OutOfBounds::check(IndexKind::Player, index, self.players.len())?;

        if let Some(holder) = self.locked_holder(index, color) {
            debug!(index, holder, %color, "color locked by another player");
            return Ok(ColorChoice::Refused { holder });
        }

        let holders: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(j, p)| *j != index && p.color == color)
            .map(|(j, _)| j)
            .collect();

        let mut displaced = Vec::with_capacity(holders.len());
        for j in holders {
            let to = PlayerColor::first_free(
                self.players
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| *k != index && *k != j)
                    .map(|(_, p)| p.color)
                    .chain(std::iter::once(color)),
            );
            debug!(index = j, from = %color, %to, "reassigning unlocked player");
            self.players[j].color = to;
            displaced.push(Displacement { index: j, to });
        }

        self.players[index].color = color;
        self.locks.lock(index);
        debug!(index, %color, "color chosen");

        assert_invariants(self);
        Ok(ColorChoice::Applied { displaced })
    }

    /// Check whether `color` can be offered to the player at `index`.
    ///
    /// A colour is selectable unless another player has locked it.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index` is not a roster position.
    pub fn is_color_selectable(&self, index: usize, color: PlayerColor) -> TallyResult<bool> {
        OutOfBounds::check(IndexKind::Player, index, self.players.len())?;
        Ok(self.locked_holder(index, color).is_none())
    }

    /// Colours selectable for the player at `index`, in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index` is not a roster position.
    pub fn selectable_colors(&self, index: usize) -> TallyResult<Vec<PlayerColor>> {
        OutOfBounds::check(IndexKind::Player, index, self.players.len())?;
        Ok(PlayerColor::ALL
            .into_iter()
            .filter(|&c| self.locked_holder(index, c).is_none())
            .collect())
    }

    /// Players with a non-blank name, in roster order.
    #[must_use]
    pub fn active_players(&self) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect()
    }

    /// Whether at least one player is active.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.players.iter().any(Player::is_active)
    }

    fn locked_holder(&self, index: usize, color: PlayerColor) -> Option<usize> {
        self.players
            .iter()
            .enumerate()
            .find(|(j, p)| *j != index && p.color == color && self.locks.is_locked(*j))
            .map(|(j, _)| j)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a [`Roster`], validated on the way back in.
#[derive(Serialize, Deserialize)]
struct RosterRecord {
    players: Vec<Player>,
    #[serde(default)]
    locks: ColorLocks,
    #[serde(default = "default_placeholder")]
    placeholder: String,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl From<Roster> for RosterRecord {
    fn from(roster: Roster) -> Self {
        Self {
            players: roster.players,
            locks: roster.locks,
            placeholder: roster.placeholder,
        }
    }
}

impl TryFrom<RosterRecord> for Roster {
    type Error = RosterError;

    fn try_from(record: RosterRecord) -> Result<Self, Self::Error> {
        let mut roster = Roster::from_parts(record.players, record.locks)?;
        roster.placeholder = record.placeholder;
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[(&str, PlayerColor)]) -> Roster {
        let players = names.iter().map(|&(n, c)| Player::new(n, c)).collect();
        Roster::from_parts(players, ColorLocks::new()).unwrap()
    }

    #[test]
    fn test_default_roster() {
        let roster = Roster::new();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.players()[0], Player::new("Player 1", PlayerColor::Red));
        assert_eq!(roster.players()[1], Player::new("Player 2", PlayerColor::Blue));
        assert!(roster.locks().is_empty());
    }

    #[test]
    fn test_add_player_uses_first_free_color() {
        let mut roster = Roster::new();
        assert_eq!(roster.add_player(), Some(2));
        assert_eq!(roster.players()[2], Player::new("Player 3", PlayerColor::Green));
        assert_eq!(roster.add_player(), Some(3));
        assert_eq!(roster.players()[3].color, PlayerColor::Yellow);
    }

    #[test]
    fn test_add_player_full_is_noop() {
        let mut roster = Roster::new();
        roster.add_player();
        roster.add_player();
        let before = roster.clone();
        assert_eq!(roster.add_player(), None);
        assert_eq!(roster, before);
        assert!(!roster.can_add_player());
    }

    #[test]
    fn test_add_player_fills_gap_left_by_removal() {
        let mut roster = Roster::new();
        roster.add_player();
        roster.remove_player(1).unwrap();
        roster.add_player();
        // Red and green remain, so blue is the first free colour again.
        assert_eq!(roster.players()[2].color, PlayerColor::Blue);
        assert_eq!(roster.players()[2].name, "Player 3");
    }

    #[test]
    fn test_remove_at_minimum_clears_name() {
        let mut roster = Roster::new();
        roster.choose_color(0, PlayerColor::Green).unwrap();
        assert_eq!(roster.remove_player(0), Ok(Removal::Cleared));
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.players()[0].name, "");
        assert_eq!(roster.players()[0].color, PlayerColor::Green);
        assert!(roster.is_locked(0));
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut roster = Roster::new();
        let err = roster.remove_player(5).unwrap_err();
        assert_eq!(err, OutOfBounds::new(IndexKind::Player, 5, 2));
    }

    #[test]
    fn test_rename_is_verbatim() {
        let mut roster = Roster::new();
        roster.rename_player(1, "  Bob ").unwrap();
        assert_eq!(roster.players()[1].name, "  Bob ");
        assert_eq!(roster.players()[0].name, "Player 1");
    }

    #[test]
    fn test_choose_color_displaces_unlocked_holder() {
        let mut roster = Roster::new();
        let choice = roster.choose_color(0, PlayerColor::Blue).unwrap();
        assert_eq!(
            choice,
            ColorChoice::Applied {
                displaced: vec![Displacement {
                    index: 1,
                    to: PlayerColor::Red,
                }],
            }
        );
        assert_eq!(roster.players()[0].color, PlayerColor::Blue);
        assert_eq!(roster.players()[1].color, PlayerColor::Red);
        assert!(roster.is_locked(0));
        assert!(!roster.is_locked(1));
    }

    #[test]
    fn test_choose_color_replacement_skips_taken_color() {
        let mut roster = named(&[
            ("A", PlayerColor::Red),
            ("B", PlayerColor::Blue),
            ("C", PlayerColor::Red),
        ]);
        roster.choose_color(1, PlayerColor::Red).unwrap();
        // Players 0 and 2 both give red up; each gets the first colour not
        // held by the other one, with red excluded.
        assert_eq!(roster.players()[1].color, PlayerColor::Red);
        assert_ne!(roster.players()[0].color, PlayerColor::Red);
        assert_ne!(roster.players()[2].color, PlayerColor::Red);
        assert_eq!(roster.players()[0].color, PlayerColor::Blue);
        assert_eq!(roster.players()[2].color, PlayerColor::Green);
    }

    #[test]
    fn test_choose_color_refused_against_locked_holder() {
        let mut roster = Roster::new();
        roster.choose_color(0, PlayerColor::Red).unwrap();
        let before = roster.clone();

        let choice = roster.choose_color(1, PlayerColor::Red).unwrap();
        assert_eq!(choice, ColorChoice::Refused { holder: 0 });
        assert!(!choice.is_applied());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_choose_own_color_locks_without_displacing() {
        let mut roster = Roster::new();
        let choice = roster.choose_color(1, PlayerColor::Blue).unwrap();
        assert_eq!(choice, ColorChoice::Applied { displaced: vec![] });
        assert!(roster.is_locked(1));
    }

    #[test]
    fn test_selectable_colors_exclude_locked_peers() {
        let mut roster = Roster::new();
        roster.add_player();
        roster.choose_color(2, PlayerColor::Yellow).unwrap();
        assert_eq!(
            roster.selectable_colors(0).unwrap(),
            vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::Green]
        );
        assert!(roster.is_color_selectable(2, PlayerColor::Yellow).unwrap());
        assert!(!roster.is_color_selectable(1, PlayerColor::Yellow).unwrap());
    }

    #[test]
    fn test_active_players_and_can_start() {
        let mut roster = Roster::new();
        assert!(roster.can_start());
        roster.rename_player(0, "   ").unwrap();
        assert_eq!(roster.active_players(), vec![Player::new("Player 2", PlayerColor::Blue)]);
        roster.rename_player(1, "").unwrap();
        assert!(roster.active_players().is_empty());
        assert!(!roster.can_start());
    }

    #[test]
    fn test_localized_placeholder() {
        struct Polish;
        impl Translate for Polish {
            fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String {
                assert_eq!(key, "players.placeholder");
                interpolate("Gracz {{position}}", params)
            }
        }
        let mut roster = Roster::localized(&Polish);
        roster.add_player();
        assert_eq!(roster.players()[0].name, "Gracz 1");
        assert_eq!(roster.players()[2].name, "Gracz 3");
    }

    #[test]
    fn test_from_parts_rejects_shared_locked_color() {
        let players = vec![
            Player::new("A", PlayerColor::Red),
            Player::new("B", PlayerColor::Red),
        ];
        let locks: ColorLocks = [0, 1].into_iter().collect();
        let err = Roster::from_parts(players, locks).unwrap_err();
        assert!(err.to_string().contains("both locked"));
    }

    #[test]
    fn test_from_parts_rejects_single_player() {
        let players = vec![Player::new("A", PlayerColor::Red)];
        assert!(Roster::from_parts(players, ColorLocks::new()).is_err());
    }
}
