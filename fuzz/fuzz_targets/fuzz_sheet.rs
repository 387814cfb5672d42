#![no_main]

//! Score sheet fuzzer.
//!
//! Feeds arbitrary raw input into every cell and checks that totals are
//! the plain sum of the stored values and never overflow.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tally::score::{default_categories, parse_score};
use tally::{Roster, ScoreSheet};

#[derive(Arbitrary, Debug)]
struct SheetInput {
    players: u8,
    cells: Vec<(u8, u8, String)>,
}

fuzz_target!(|input: SheetInput| {
    let mut roster = Roster::new();
    for _ in 0..(input.players % 3) {
        roster.add_player();
    }
    let mut sheet = ScoreSheet::new(roster.active_players(), default_categories());
    let width = sheet.players().len();
    let height = sheet.categories().len();

    for (player, category, raw) in input.cells.into_iter().take(128) {
        let (player, category) = (usize::from(player), usize::from(category));
        match sheet.set_score(player, category, &raw) {
            Ok(stored) => {
                assert!(player < width && category < height);
                assert_eq!(stored, parse_score(&raw));
                assert_eq!(sheet.score(player, category), Ok(stored));
            }
            Err(_) => assert!(player >= width || category >= height),
        }
    }

    for (p, total) in sheet.totals().into_iter().enumerate() {
        let sum: i64 = (0..height)
            .map(|c| i64::from(sheet.score(p, c).unwrap_or_default()))
            .sum();
        assert_eq!(total, sum);
    }
});
