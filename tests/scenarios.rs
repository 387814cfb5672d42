//! End-to-end scenarios for roster setup and scoring.
//!
//! Run with: cargo test scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tally::i18n::Catalog;
use tally::roster::{ColorLocks, check_invariants};
use tally::score::default_categories;
use tally::{
    ColorChoice, IndexKind, OutOfBounds, Player, PlayerColor, Removal, Roster, ScoreSheet, Screen,
    Session,
};

fn roster_of(names: &[(&str, PlayerColor)], locks: &[usize]) -> Roster {
    let players = names.iter().map(|&(n, c)| Player::new(n, c)).collect();
    Roster::from_parts(players, locks.iter().copied().collect()).unwrap()
}

#[test]
fn test_initial_roster() {
    let roster = Roster::new();
    let colors: Vec<_> = roster.players().iter().map(|p| p.color).collect();
    assert_eq!(colors, vec![PlayerColor::Red, PlayerColor::Blue]);
    assert!(roster.locks().is_empty());
    assert!(roster.can_start());
}

#[test]
fn test_add_then_remove_restores_roster() {
    let mut roster = Roster::new();
    roster.add_player();
    assert_eq!(roster.players()[2].color, PlayerColor::Green);

    let removal = roster.remove_player(2).unwrap();
    assert!(matches!(removal, Removal::Removed(p) if p.color == PlayerColor::Green));
    assert_eq!(roster, Roster::new());
}

#[test]
fn test_remove_reindexes_locks() {
    use PlayerColor::{Blue, Green, Red};
    let mut roster = roster_of(&[("A", Red), ("B", Blue), ("C", Green)], &[1, 2]);

    roster.remove_player(0).unwrap();

    let names: Vec<_> = roster.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
    assert_eq!(roster.locks().iter().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_remove_at_minimum_clears_name() {
    let mut roster = Roster::new();
    roster.choose_color(1, PlayerColor::Yellow).unwrap();

    assert_eq!(roster.remove_player(1), Ok(Removal::Cleared));
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.players()[1].name, "");
    assert_eq!(roster.players()[1].color, PlayerColor::Yellow);
    assert!(roster.is_locked(1));
}

#[test]
fn test_choose_color_displaces_unlocked_holder() {
    let mut roster = Roster::new();

    let choice = roster.choose_color(0, PlayerColor::Blue).unwrap();

    assert!(choice.is_applied());
    assert_eq!(roster.players()[0].color, PlayerColor::Blue);
    assert_eq!(roster.players()[1].color, PlayerColor::Red);
    assert!(roster.is_locked(0));
    assert!(!roster.is_locked(1));
}

#[test]
fn test_color_locked_by_another_player_is_refused() {
    let mut roster = Roster::new();
    roster.choose_color(0, PlayerColor::Green).unwrap();
    let before = roster.clone();

    assert_eq!(
        roster.choose_color(1, PlayerColor::Green),
        Ok(ColorChoice::Refused { holder: 0 })
    );
    assert_eq!(roster, before);
    assert!(check_invariants(&roster).is_empty());
    assert!(!roster.is_color_selectable(1, PlayerColor::Green).unwrap());
    assert_eq!(
        roster.selectable_colors(1).unwrap(),
        vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::Yellow]
    );
}

#[test]
fn test_active_filter() {
    use PlayerColor::{Blue, Green, Red};
    let roster = roster_of(&[("Ann", Red), ("  ", Blue), ("Cy", Green)], &[]);

    let active: Vec<_> = roster.active_players().into_iter().map(|p| p.name).collect();
    assert_eq!(active, vec!["Ann", "Cy"]);

    let blank = roster_of(&[("", Red), (" ", Blue)], &[]);
    assert!(!blank.can_start());
    assert!(blank.active_players().is_empty());
}

#[test]
fn test_index_errors() {
    let mut roster = Roster::new();
    assert_eq!(
        roster.remove_player(5),
        Err(OutOfBounds::new(IndexKind::Player, 5, 2))
    );

    let mut sheet = ScoreSheet::new(roster.active_players(), default_categories());
    assert_eq!(
        sheet.set_score(0, 6, "1"),
        Err(OutOfBounds::new(IndexKind::Category, 6, 6))
    );
    assert!(sheet.total(2).is_err());
}

#[test]
fn test_score_entry() {
    use PlayerColor::{Blue, Red};
    let mut sheet = ScoreSheet::new(
        vec![Player::new("A", Red), Player::new("B", Blue)],
        default_categories(),
    );

    assert_eq!(sheet.set_score(0, 2, "5"), Ok(5));
    assert_eq!(sheet.set_score(0, 4, "abc"), Ok(0));
    assert_eq!(sheet.set_score(1, 0, ""), Ok(0));

    assert_eq!(sheet.total(0), Ok(5));
    assert_eq!(sheet.total(1), Ok(0));
    assert_eq!(sheet.totals(), vec![5, 0]);
    assert_eq!(sheet.leaders(), vec![0]);
}

#[test]
fn test_negative_scores_and_overwrite() {
    let players = vec![Player::new("A", PlayerColor::Red)];
    let mut sheet = ScoreSheet::new(players, default_categories());
    sheet.set_score(0, 0, "-3").unwrap();
    sheet.set_score(0, 1, "10").unwrap();
    sheet.set_score(0, 1, "4").unwrap();
    assert_eq!(sheet.total(0), Ok(1));
}

#[test]
fn test_session_game_flow() {
    let strings = Catalog::bundled("pl");
    let mut session = Session::with_setup(Roster::localized(&strings), default_categories());
    assert_eq!(session.screen(), Screen::Home);
    assert!(!session.start_game());

    assert!(session.new_game());
    assert_eq!(session.roster().players()[0].name, "Gracz 1");
    session.roster_mut().rename_player(1, "").unwrap();
    assert!(session.start_game());
    assert_eq!(session.sheet().unwrap().players().len(), 1);

    session.sheet_mut().unwrap().set_score(0, 0, "7").unwrap();
    assert!(session.back());
    assert!(session.start_game());
    assert_eq!(session.sheet().unwrap().total(0), Ok(7));

    let finished = session.finish().unwrap();
    assert_eq!(finished.totals(), vec![7]);
    assert_eq!(session.screen(), Screen::Home);
    assert!(session.sheet().is_none());
}

#[test]
fn test_roster_json_round_trip() {
    let mut roster = Roster::new();
    roster.add_player();
    roster.choose_color(2, PlayerColor::Yellow).unwrap();

    let json = serde_json::to_string(&roster).unwrap();
    let back: Roster = serde_json::from_str(&json).unwrap();
    assert_eq!(back, roster);
}

#[test]
fn test_roster_json_rejects_shared_locked_color() {
    let json = r#"{
        "players": [
            {"name": "A", "color": "red"},
            {"name": "B", "color": "red"}
        ],
        "locks": [0, 1]
    }"#;
    let err = serde_json::from_str::<Roster>(json).unwrap_err();
    assert!(err.to_string().contains("both locked"));
}

#[test]
fn test_roster_json_rejects_dangling_lock() {
    let json = r#"{
        "players": [
            {"name": "A", "color": "red"},
            {"name": "B", "color": "blue"}
        ],
        "locks": [3]
    }"#;
    assert!(serde_json::from_str::<Roster>(json).is_err());

    let locks: ColorLocks = [3].into_iter().collect();
    assert!(Roster::from_parts(Roster::new().players().to_vec(), locks).is_err());
}

#[test]
fn test_sheet_json_round_trip() {
    let mut sheet = ScoreSheet::new(Roster::new().active_players(), default_categories());
    sheet.set_score(1, 5, "42").unwrap();

    let json = serde_json::to_string(&sheet).unwrap();
    let back: ScoreSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sheet);
    assert_eq!(back.total(1), Ok(42));
}

#[test]
fn test_add_then_remove_first_renumbers_nothing() {
    let mut roster = Roster::new();
    assert_eq!(roster.add_player(), Some(2));
    assert_eq!(roster.players()[2].name, "Player 3");

    roster.remove_player(0).unwrap();

    assert_eq!(
        roster.players(),
        &[
            Player::new("Player 2", PlayerColor::Blue),
            Player::new("Player 3", PlayerColor::Green),
        ]
    );
}

#[test]
fn test_locked_color_cannot_be_stolen() {
    use PlayerColor::{Blue, Red};
    let mut roster = roster_of(&[("A", Red), ("B", Blue)], &[0]);

    let choice = roster.choose_color(1, Red).unwrap();

    assert_eq!(choice, ColorChoice::Refused { holder: 0 });
    assert_eq!(roster.players()[0].color, Red);
    assert_eq!(roster.players()[1].color, Blue);
    assert!(roster.is_locked(0));
    assert!(!roster.is_locked(1));
}
