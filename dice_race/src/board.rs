use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{BoardError, GameError, RandomSource};

/// The number of tiles on the track.
pub const BOARD_SIZE: usize = 50;
/// The number of boost tiles on every board.
pub const BOOST_TILES: usize = 6;
/// The number of skip tiles on every board.
pub const SKIP_TILES: usize = 5;
/// Smallest bonus a boost tile can give.
pub const MIN_BOOST: usize = 2;
/// Largest bonus a boost tile can give.
pub const MAX_BOOST: usize = 6;

/// What a tile does to a player landing on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TileType {
    Normal,
    /// Advances the player further.
    ///
    /// The bonus is drawn once when the board is generated and serves as the
    /// tile's label. The bonus actually applied is drawn anew on every landing.
    Boost { bonus: usize },
    /// The player landing here misses their next turn.
    Skip,
}

/// The track of a single game.
///
/// Tile 0 (the start) and the last tile (the finish) are always normal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<TileType>,
}

impl Board {
    /// Randomly places [`BOOST_TILES`] boosts and then [`SKIP_TILES`] skips
    /// on distinct tiles between the start and the finish.
    pub fn generate(rng: &mut impl RandomSource) -> Self {
        let mut tiles = vec![TileType::Normal; BOARD_SIZE];
        let mut used = [false; BOARD_SIZE];
        used[0] = true;
        used[BOARD_SIZE - 1] = true;

        for _ in 0..BOOST_TILES {
            let idx = draw_free_tile(rng, &mut used);
            let bonus = rng.int_in(MIN_BOOST, MAX_BOOST);
            tiles[idx] = TileType::Boost { bonus };
        }
        for _ in 0..SKIP_TILES {
            let idx = draw_free_tile(rng, &mut used);
            tiles[idx] = TileType::Skip;
        }
        trace!(?tiles, "Generated board");

        Self { tiles }
    }

    /// Creates a board from an explicit layout.
    ///
    /// The number of boost and skip tiles is not checked, only the length and
    /// that the start and finish tiles are normal.
    pub fn from_tiles(tiles: Vec<TileType>) -> Result<Self, BoardError> {
        if tiles.len() != BOARD_SIZE {
            return Err(BoardError::WrongLength { len: tiles.len() });
        }
        if tiles[0] != TileType::Normal {
            return Err(BoardError::SpecialStartTile);
        }
        if tiles[BOARD_SIZE - 1] != TileType::Normal {
            return Err(BoardError::SpecialFinishTile);
        }
        Ok(Self { tiles })
    }

    pub fn tile_at(&self, index: usize) -> Result<TileType, GameError> {
        self.tiles
            .get(index)
            .copied()
            .ok_or(GameError::OutOfRange { index })
    }

    /// The index of the finish tile.
    pub fn last_index(&self) -> usize {
        self.tiles.len() - 1
    }

    pub fn is_finish(&self, index: usize) -> bool {
        index >= self.last_index()
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// The indices of all boost tiles, together with their labelled bonus.
    pub fn boosts(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, t)| match t {
            TileType::Boost { bonus } => Some((i, *bonus)),
            _ => None,
        })
    }

    pub fn skips(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, t)| (*t == TileType::Skip).then_some(i))
    }
}

// Rejection sampling over the tiles strictly between start and finish.
fn draw_free_tile(rng: &mut impl RandomSource, used: &mut [bool; BOARD_SIZE]) -> usize {
    loop {
        let idx = rng.int_in(1, BOARD_SIZE - 2);
        if !used[idx] {
            used[idx] = true;
            return idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::testing::ScriptedRng;
    use crate::GameRng;

    quickcheck! {
        fn generated_boards_hold_invariants(seed: u64) -> bool {
            let board = Board::generate(&mut GameRng::new(seed));
            let boosts: BTreeSet<usize> = board.boosts().map(|(i, _)| i).collect();
            let skips: BTreeSet<usize> = board.skips().collect();
            board.tiles().len() == BOARD_SIZE
                && boosts.len() == BOOST_TILES
                && skips.len() == SKIP_TILES
                && boosts.is_disjoint(&skips)
                && board.tile_at(0) == Ok(TileType::Normal)
                && board.tile_at(BOARD_SIZE - 1) == Ok(TileType::Normal)
                && board.boosts().all(|(_, bonus)| (MIN_BOOST..=MAX_BOOST).contains(&bonus))
        }

        fn same_seed_same_board(seed: u64) -> bool {
            Board::generate(&mut GameRng::new(seed)) == Board::generate(&mut GameRng::new(seed))
        }
    }

    #[test]
    fn generation_rejects_used_tiles() {
        // Each boost is an index followed by its bonus. The second boost draws
        // 5 again and is redrawn, the first skip collides with a boost.
        let mut rng = ScriptedRng::new([
            5, 2, 5, 6, 3, 7, 4, 8, 5, 9, 6, 10, 6, // boosts
            10, 11, 12, 13, 14, 15, // skips
        ]);
        let board = Board::generate(&mut rng);
        assert_eq!(
            board.boosts().collect::<Vec<_>>(),
            vec![(5, 2), (6, 3), (7, 4), (8, 5), (9, 6), (10, 6)]
        );
        assert_eq!(board.skips().collect::<Vec<_>>(), vec![11, 12, 13, 14, 15]);
    }

    #[test]
    fn tile_lookup_out_of_range() {
        let board = Board::generate(&mut GameRng::new(3));
        assert_eq!(
            board.tile_at(BOARD_SIZE),
            Err(GameError::OutOfRange { index: BOARD_SIZE })
        );
        assert!(board.is_finish(BOARD_SIZE - 1));
        assert!(!board.is_finish(BOARD_SIZE - 2));
    }

    #[test]
    fn explicit_layouts_are_validated() {
        assert_eq!(
            Board::from_tiles(vec![TileType::Normal; 10]),
            Err(BoardError::WrongLength { len: 10 })
        );
        let mut tiles = vec![TileType::Normal; BOARD_SIZE];
        tiles[0] = TileType::Skip;
        assert_eq!(
            Board::from_tiles(tiles.clone()),
            Err(BoardError::SpecialStartTile)
        );
        tiles[0] = TileType::Normal;
        tiles[BOARD_SIZE - 1] = TileType::Boost { bonus: 3 };
        assert_eq!(Board::from_tiles(tiles), Err(BoardError::SpecialFinishTile));
    }
}
