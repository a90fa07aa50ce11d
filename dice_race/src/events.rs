use serde::{Deserialize, Serialize};

use crate::TileType;

/// Index of a player in the game, `0` or `1`.
pub type PlayerIdx = usize;

/// Something that happened in the game, for a renderer to show.
///
/// Tile numbers in events are 1-based, like they are shown to players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game with a freshly generated board.
    GameStarted {
        tiles: Vec<TileType>,
        players: [String; 2],
    },
    /// The game was abandoned. No game is in progress afterwards.
    GameReset,
    /// A computer player is about to roll.
    ComputerRolling { player: PlayerIdx },
    DiceRolled { d1: u8, d2: u8 },
    /// The player has to answer "What is `d1` + `d2`?".
    ChallengePosed { d1: u8, d2: u8 },
    AnswerResult {
        player: PlayerIdx,
        correct: bool,
        value: f64,
        expected: usize,
    },
    PlayerMoved {
        player: PlayerIdx,
        spaces: usize,
        tile: usize,
    },
    Boosted {
        player: PlayerIdx,
        bonus: usize,
        tile: usize,
    },
    /// The player will miss their next turn.
    SkipIncurred { player: PlayerIdx },
    /// The player missed this turn.
    TurnSkipped { player: PlayerIdx },
    TurnChanged { player: PlayerIdx },
    GameOver { winner: PlayerIdx },
}

/// A pending "What is `a` + `b`?" question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub a: u8,
    pub b: u8,
    pub expected_sum: usize,
}

impl Challenge {
    pub fn new(a: u8, b: u8) -> Self {
        Self {
            a,
            b,
            expected_sum: a as usize + b as usize,
        }
    }
}

impl std::fmt::Display for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "What is {} + {}?", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let json = serde_json::to_string(&GameEvent::PlayerMoved {
            player: 1,
            spaces: 7,
            tile: 8,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"player_moved","player":1,"spaces":7,"tile":8}"#);

        let back: GameEvent = serde_json::from_str(r#"{"type":"game_reset"}"#).unwrap();
        assert_eq!(back, GameEvent::GameReset);
    }

    #[test]
    fn challenge_shows_faces_not_sum() {
        let challenge = Challenge::new(4, 5);
        assert_eq!(challenge.expected_sum, 9);
        assert_eq!(challenge.to_string(), "What is 4 + 5?");
    }
}
