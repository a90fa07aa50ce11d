use quickcheck::{Arbitrary, Gen};

use crate::{CarColor, GameConfig, Mode, PALETTE};

impl Arbitrary for CarColor {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PALETTE).unwrap()
    }
}

impl Arbitrary for Mode {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Mode::Pvp, Mode::Pvc]).unwrap()
    }
}

// Blank names are common in practice, so they should be common here too
fn player_name(g: &mut Gen) -> String {
    if bool::arbitrary(g) {
        String::arbitrary(g)
    } else {
        String::from(*g.choose(&["", "  ", "Ada", "Computer"]).unwrap())
    }
}

impl Arbitrary for GameConfig {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            mode: Mode::arbitrary(g),
            p1_name: player_name(g),
            p2_name: player_name(g),
            p1_color: CarColor::arbitrary(g),
            p2_color: CarColor::arbitrary(g),
        }
    }
}
