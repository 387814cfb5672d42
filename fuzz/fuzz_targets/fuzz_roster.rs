#![no_main]

//! Roster operation fuzzer.
//!
//! Applies arbitrary add/remove/rename/colour sequences and checks that
//! the roster never breaks its size bounds or lets two locked players
//! share a colour. Also checks that JSON round-trips accept the result.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tally::roster::check_invariants;
use tally::{PlayerColor, Roster};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl From<FuzzColor> for PlayerColor {
    fn from(c: FuzzColor) -> Self {
        match c {
            FuzzColor::Red => PlayerColor::Red,
            FuzzColor::Blue => PlayerColor::Blue,
            FuzzColor::Green => PlayerColor::Green,
            FuzzColor::Yellow => PlayerColor::Yellow,
        }
    }
}

/// A fuzzer-generated roster edit.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzOp {
    Add,
    Remove { index: u8 },
    Rename { index: u8, name: String },
    Choose { index: u8, color: FuzzColor },
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let mut roster = Roster::new();

    for op in ops.into_iter().take(64) {
        let len = roster.len();
        let before = roster.clone();

        let rejected = match op {
            FuzzOp::Add => roster.add_player().is_none(),
            FuzzOp::Remove { index } => roster.remove_player(usize::from(index)).is_err(),
            FuzzOp::Rename { index, name } => {
                roster.rename_player(usize::from(index), name).is_err()
            }
            FuzzOp::Choose { index, color } => roster
                .choose_color(usize::from(index), color.into())
                .map_or(true, |choice| !choice.is_applied()),
        };

        if rejected {
            assert_eq!(roster, before, "rejected operation changed the roster");
        }

        let violations = check_invariants(&roster);
        assert!(
            violations.is_empty(),
            "invariants violated (len {len} -> {}): {violations:?}",
            roster.len()
        );
    }

    let json = serde_json::to_string(&roster).expect("roster serializes");
    let back: Roster = serde_json::from_str(&json).expect("valid roster deserializes");
    assert_eq!(back, roster);
});
