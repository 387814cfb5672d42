//! Screen flow of the app.
//!
//! ```text
//!          new_game             start_game
//!   Home ───────────▶ SelectPlayers ─────────▶ Calculate
//!    ▲ ◀──── back ──────┘        ▲ ─── back ───────┘ │
//!    └───────────────────── finish ──────────────────┘
//!
//!   Home ── open_history ──▶ History ── back ──▶ Home
//! ```
//!
//! The session owns the roster while players are being picked and hands
//! the active players to a new [`ScoreSheet`] when the game starts.

use tracing::{debug, info};

use crate::roster::Roster;
use crate::score::{Category, ScoreSheet, default_categories};

/// Screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Main menu.
    Home,
    /// Player roster editing.
    SelectPlayers,
    /// Score entry.
    Calculate,
    /// Past games.
    History,
}

/// One run of the app: the current screen and the game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    fresh_roster: Roster,
    categories: Vec<Category>,
    roster: Roster,
    sheet: Option<ScoreSheet>,
}

impl Session {
    /// Start on the home screen with the default roster and categories.
    #[must_use]
    pub fn new() -> Self {
        Self::with_setup(Roster::new(), default_categories())
    }

    /// Start on the home screen.
    ///
    /// Every new game starts from a copy of `fresh_roster`, and its score
    /// sheet uses `categories`.
    #[must_use]
    pub fn with_setup(fresh_roster: Roster, categories: Vec<Category>) -> Self {
        Self {
            screen: Screen::Home,
            roster: fresh_roster.clone(),
            fresh_roster,
            categories,
            sheet: None,
        }
    }

    /// Current screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Roster of the game being set up.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable roster of the game being set up.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Score sheet of the started game, if any.
    #[must_use]
    pub const fn sheet(&self) -> Option<&ScoreSheet> {
        self.sheet.as_ref()
    }

    /// Mutable score sheet of the started game, if any.
    pub fn sheet_mut(&mut self) -> Option<&mut ScoreSheet> {
        self.sheet.as_mut()
    }

    /// Categories used for new score sheets.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Home → SelectPlayers, discarding any previous game.
    pub fn new_game(&mut self) -> bool {
        if !self.go(Screen::Home, Screen::SelectPlayers) {
            return false;
        }
        self.roster = self.fresh_roster.clone();
        self.sheet = None;
        true
    }

    /// Home → History.
    pub fn open_history(&mut self) -> bool {
        self.go(Screen::Home, Screen::History)
    }

    /// SelectPlayers → Calculate, if at least one player is active.
    ///
    /// The score sheet is created from the active players the first time
    /// only; coming back to player selection and starting again keeps the
    /// scores already entered.
    pub fn start_game(&mut self) -> bool {
        if self.screen != Screen::SelectPlayers {
            debug!(screen = ?self.screen, "start_game ignored");
            return false;
        }
        if !self.roster.can_start() {
            debug!("no active players, not starting");
            return false;
        }
        if self.sheet.is_none() {
            let players = self.roster.active_players();
            info!(players = players.len(), "game started");
            self.sheet = Some(ScoreSheet::new(players, self.categories.clone()));
        }
        self.go(Screen::SelectPlayers, Screen::Calculate)
    }

    /// Go back one screen. Returns false on the home screen.
    pub fn back(&mut self) -> bool {
        match self.screen {
            Screen::Home => false,
            Screen::SelectPlayers | Screen::History => self.go(self.screen, Screen::Home),
            Screen::Calculate => self.go(Screen::Calculate, Screen::SelectPlayers),
        }
    }

    /// Calculate → Home, ending the game.
    ///
    /// Returns the finished sheet; `None` if not on the score screen.
    pub fn finish(&mut self) -> Option<ScoreSheet> {
        if !self.go(Screen::Calculate, Screen::Home) {
            return None;
        }
        self.roster = self.fresh_roster.clone();
        let sheet = self.sheet.take();
        if let Some(sheet) = &sheet {
            info!(totals = ?sheet.totals(), "game finished");
        }
        sheet
    }

    fn go(&mut self, from: Screen, to: Screen) -> bool {
        if self.screen != from {
            debug!(screen = ?self.screen, expected = ?from, target = ?to, "transition ignored");
            return false;
        }
        info!(from = ?from, to = ?to, "screen changed");
        self.screen = to;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_hands_over_active_players() {
        let mut session = Session::new();
        assert!(session.new_game());
        session.roster_mut().rename_player(0, " ").unwrap();
        assert!(session.start_game());
        assert_eq!(session.screen(), Screen::Calculate);

        let sheet = session.sheet().unwrap();
        assert_eq!(sheet.players().len(), 1);
        assert_eq!(sheet.players()[0].name, "Player 2");
        assert_eq!(sheet.categories().len(), 6);
    }

    #[test]
    fn test_cannot_start_without_active_players() {
        let mut session = Session::new();
        session.new_game();
        session.roster_mut().rename_player(0, "").unwrap();
        session.roster_mut().rename_player(1, "").unwrap();
        assert!(!session.start_game());
        assert_eq!(session.screen(), Screen::SelectPlayers);
        assert!(session.sheet().is_none());
    }

    #[test]
    fn test_reentry_keeps_sheet() {
        let mut session = Session::new();
        session.new_game();
        session.start_game();
        session.sheet_mut().unwrap().set_score(0, 0, "7").unwrap();

        assert!(session.back());
        assert_eq!(session.screen(), Screen::SelectPlayers);
        session.roster_mut().add_player();
        assert!(session.start_game());

        let sheet = session.sheet().unwrap();
        assert_eq!(sheet.players().len(), 2);
        assert_eq!(sheet.total(0), Ok(7));
    }

    #[test]
    fn test_finish_returns_sheet_and_resets() {
        let mut session = Session::new();
        session.new_game();
        session.roster_mut().add_player();
        session.start_game();

        let sheet = session.finish().unwrap();
        assert_eq!(sheet.players().len(), 3);
        assert_eq!(session.screen(), Screen::Home);
        assert!(session.sheet().is_none());
        assert_eq!(session.roster().len(), 2);
        assert!(session.finish().is_none());
    }

    #[test]
    fn test_new_game_discards_previous_setup() {
        let mut session = Session::new();
        session.new_game();
        session.roster_mut().add_player();
        session.back();
        session.new_game();
        assert_eq!(session.roster().len(), 2);
    }

    #[test]
    fn test_history_navigation() {
        let mut session = Session::new();
        assert!(session.open_history());
        assert_eq!(session.screen(), Screen::History);
        assert!(!session.new_game());
        assert!(session.back());
        assert_eq!(session.screen(), Screen::Home);
        assert!(!session.back());
    }

    #[test]
    fn test_transitions_from_wrong_screen_are_ignored() {
        let mut session = Session::new();
        assert!(!session.start_game());
        assert!(session.finish().is_none());
        assert_eq!(session.screen(), Screen::Home);
    }
}
