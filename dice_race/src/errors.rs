use crate::Phase;

/// The error type for building a [`Board`](crate::Board) from an explicit layout.
#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { len: usize },
    SpecialStartTile,
    SpecialFinishTile,
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::WrongLength { len } => write!(
                f,
                "A board must have exactly {} tiles, but {} were given",
                crate::BOARD_SIZE,
                len
            ),
            BoardError::SpecialStartTile => write!(f, "The start tile must be a normal tile"),
            BoardError::SpecialFinishTile => write!(f, "The finish tile must be a normal tile"),
        }
    }
}

/// Why an engine operation was rejected.
///
/// A rejected operation never changes the game state.
#[derive(Debug, PartialEq)]
pub enum GameError {
    /// The operation is not legal right now.
    InvalidState(InvalidState),
    /// A board index outside of the track was looked up.
    OutOfRange { index: usize },
    /// An answer that is not a finite number was submitted.
    InvalidInput { input: String },
}

/// The reasons for [`GameError::InvalidState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidState {
    NoGameInProgress,
    GameIsOver,
    WrongPhase { expected: Phase, actual: Phase },
    ComputersTurn,
}

impl std::error::Error for GameError {}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidState(InvalidState::NoGameInProgress) => {
                write!(f, "No game has been started")
            }
            GameError::InvalidState(InvalidState::GameIsOver) => {
                write!(f, "The game is over, start a new one")
            }
            GameError::InvalidState(InvalidState::WrongPhase { expected, actual }) => write!(
                f,
                "This can only be done while {}, but the game is {}",
                expected, actual
            ),
            GameError::InvalidState(InvalidState::ComputersTurn) => {
                write!(f, "It is the computer's turn")
            }
            GameError::OutOfRange { index } => write!(
                f,
                "Tile index {} is outside of the board (0..{})",
                index,
                crate::BOARD_SIZE
            ),
            GameError::InvalidInput { input } => {
                write!(f, "'{}' is not a number", input)
            }
        }
    }
}
