use std::collections::VecDeque;

use crate::RandomSource;

/// Hands out a fixed sequence of draws, for tests that need exact dice.
///
/// Panics when a draw is out of the requested range or the script runs out.
pub struct ScriptedRng {
    draws: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.draws.is_empty()
    }
}

impl RandomSource for ScriptedRng {
    fn int_in(&mut self, min: usize, max: usize) -> usize {
        let draw = self.draws.pop_front().expect("scripted draws ran out");
        assert!(
            (min..=max).contains(&draw),
            "scripted draw {} is not in [{}, {}]",
            draw,
            min,
            max
        );
        draw
    }
}
