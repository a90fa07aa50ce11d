use tracing::{debug, trace};

use crate::{
    Board, Challenge, GameConfig, GameError, GameEvent, GameRng, InvalidState, Player, PlayerIdx,
    RandomSource, TileType, MAX_BOOST, MIN_BOOST,
};

/// Where a game currently is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The active player has to roll the dice.
    AwaitingRoll,
    /// The active player has to answer the pending challenge.
    AwaitingAnswer,
    /// A move has been resolved, the turn passes on once the
    /// [`Continuation`] is resumed.
    Resolving,
    /// Somebody reached the finish. Only a new game leaves this phase.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::AwaitingRoll => "waiting for a roll",
            Phase::AwaitingAnswer => "waiting for an answer",
            Phase::Resolving => "resolving a move",
            Phase::GameOver => "over",
        };
        write!(f, "{}", s)
    }
}

/// Whose turn it is and what they have to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub active: PlayerIdx,
    pub phase: Phase,
    pub pending_challenge: Option<Challenge>,
    pub winner: Option<PlayerIdx>,
    /// How many times dice were rolled in this game.
    pub rolls: usize,
}

impl TurnState {
    fn new() -> Self {
        Self {
            active: 0,
            phase: Phase::AwaitingRoll,
            pending_challenge: None,
            winner: None,
            rolls: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// What the engine is waiting for before it carries on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContinuationKind {
    /// A move has been resolved, next is passing the turn on.
    Settle,
    /// A computer player has rolled, next is its answer.
    ComputerAnswer,
}

/// A deferred step of the game.
///
/// The engine never waits by itself. Whenever a pause belongs between two
/// steps, it schedules a continuation and returns. The host decides how long
/// to wait and then passes the continuation to [`TurnEngine::resume()`].
/// Continuations from a game that has since been reset or restarted are
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Continuation {
    generation: u64,
    pub kind: ContinuationKind,
}

impl Continuation {
    /// The game this continuation belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything that makes up one game.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    turn: TurnState,
    generation: u64,
    scheduled: Option<Continuation>,
}

impl GameSession {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.turn.active]
    }

    pub fn winner(&self) -> Option<&Player> {
        self.turn.winner.map(|idx| &self.players[idx])
    }

    // Guards the operations a human issues through the view.
    fn expect_human_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.turn.finished() {
            return Err(GameError::InvalidState(InvalidState::GameIsOver));
        }
        if self.turn.phase != expected {
            return Err(GameError::InvalidState(InvalidState::WrongPhase {
                expected,
                actual: self.turn.phase,
            }));
        }
        if self.active_player().is_computer() {
            return Err(GameError::InvalidState(InvalidState::ComputersTurn));
        }
        Ok(())
    }

    fn schedule(&mut self, kind: ContinuationKind) {
        self.scheduled = Some(Continuation {
            generation: self.generation,
            kind,
        });
    }

    fn roll(&mut self, rng: &mut impl RandomSource, events: &mut Vec<GameEvent>) -> Challenge {
        let (d1, d2) = (rng.roll_die(), rng.roll_die());
        let challenge = Challenge::new(d1, d2);
        trace!(player = self.turn.active, d1, d2, "Rolled");
        self.turn.pending_challenge = Some(challenge);
        self.turn.phase = Phase::AwaitingAnswer;
        self.turn.rolls += 1;
        events.push(GameEvent::DiceRolled { d1, d2 });
        events.push(GameEvent::ChallengePosed { d1, d2 });
        challenge
    }

    /// Checks the answer against the pending challenge and moves the active
    /// player if it is right.
    fn answer(
        &mut self,
        value: f64,
        rng: &mut impl RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, GameError> {
        let challenge = self
            .turn
            .pending_challenge
            .take()
            .ok_or(GameError::InvalidState(InvalidState::WrongPhase {
                expected: Phase::AwaitingAnswer,
                actual: self.turn.phase,
            }))?;
        let player = self.turn.active;
        let correct = value == challenge.expected_sum as f64;
        self.turn.phase = Phase::Resolving;
        events.push(GameEvent::AnswerResult {
            player,
            correct,
            value,
            expected: challenge.expected_sum,
        });
        if correct {
            self.move_player(player, challenge.expected_sum, rng, events)?;
        } else {
            debug!(player, value, expected = challenge.expected_sum, "Wrong answer");
        }
        if !self.turn.finished() {
            self.schedule(ContinuationKind::Settle);
        }
        Ok(correct)
    }

    /// Moves a player forward and resolves the effects of the tiles they land on.
    ///
    /// Boost tiles chain: every boost landed on draws a fresh bonus and moves
    /// the player again. A skip tile ends the chain. Reaching the finish ends
    /// the chain and the game.
    pub(crate) fn move_player(
        &mut self,
        idx: PlayerIdx,
        spaces: usize,
        rng: &mut impl RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let last = self.board.last_index();
        let player = &mut self.players[idx];
        player.position = (player.position + spaces).min(last);
        events.push(GameEvent::PlayerMoved {
            player: idx,
            spaces,
            tile: player.tile_number(),
        });

        while !self.board.is_finish(player.position) {
            match self.board.tile_at(player.position)? {
                TileType::Boost { .. } => {
                    let bonus = rng.int_in(MIN_BOOST, MAX_BOOST);
                    player.position = (player.position + bonus).min(last);
                    events.push(GameEvent::Boosted {
                        player: idx,
                        bonus,
                        tile: player.tile_number(),
                    });
                }
                TileType::Skip => {
                    player.pending_skip = true;
                    events.push(GameEvent::SkipIncurred { player: idx });
                    break;
                }
                TileType::Normal => break,
            }
        }
        debug!(player = idx, position = player.position, "Moved");

        if self.board.is_finish(self.players[idx].position) {
            self.declare_winner(idx, events);
        }
        Ok(())
    }

    fn declare_winner(&mut self, idx: PlayerIdx, events: &mut Vec<GameEvent>) {
        debug!(winner = self.players[idx].name, rolls = self.turn.rolls, "Game over");
        self.turn.phase = Phase::GameOver;
        self.turn.winner = Some(idx);
        self.turn.pending_challenge = None;
        self.scheduled = None;
        events.push(GameEvent::GameOver { winner: idx });
    }

    /// Passes the turn to the next player, consuming a pending skip on the way.
    fn rotate(&mut self, rng: &mut impl RandomSource, events: &mut Vec<GameEvent>) {
        let num_players = self.players.len();
        let mut next = (self.turn.active + 1) % num_players;
        if self.players[next].pending_skip {
            debug!(player = next, "Turn skipped");
            self.players[next].pending_skip = false;
            events.push(GameEvent::TurnSkipped { player: next });
            next = (next + 1) % num_players;
        }
        self.turn.active = next;
        self.turn.phase = Phase::AwaitingRoll;
        self.turn.pending_challenge = None;
        events.push(GameEvent::TurnChanged { player: next });
        if self.players[next].is_computer() {
            self.begin_computer_turn(rng, events);
        }
    }

    fn begin_computer_turn(&mut self, rng: &mut impl RandomSource, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::ComputerRolling {
            player: self.turn.active,
        });
        self.roll(rng, events);
        self.schedule(ContinuationKind::ComputerAnswer);
    }
}

/// Runs games: the only way to change a [`GameSession`].
///
/// All operations are synchronous. Everything that happens is recorded as a
/// [`GameEvent`], to be picked up with [`Self::drain_events()`].
pub struct TurnEngine<R = GameRng> {
    rng: R,
    session: Option<GameSession>,
    generation: u64,
    events: Vec<GameEvent>,
}

impl<R: RandomSource> TurnEngine<R> {
    /// Creates an engine with no game in progress.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            session: None,
            generation: 0,
            events: Vec::new(),
        }
    }

    /// Starts a new game on a freshly generated board, replacing any game in progress.
    pub fn start_game(&mut self, config: &GameConfig) {
        let board = Board::generate(&mut self.rng);
        self.start_game_with(board, config.seats());
    }

    /// Starts a new game with the given board and players.
    ///
    /// Positions and pending skips of the players are reset. Either seat
    /// may be computer-controlled; if the first one is, it plays right away.
    pub fn start_game_with(&mut self, board: Board, mut players: [Player; 2]) {
        for player in players.iter_mut() {
            player.position = 0;
            player.pending_skip = false;
        }
        self.generation += 1;
        debug!(generation = self.generation, "Starting game");

        self.events.push(GameEvent::GameStarted {
            tiles: board.tiles().to_vec(),
            players: [players[0].name.clone(), players[1].name.clone()],
        });
        self.events.push(GameEvent::TurnChanged { player: 0 });

        let mut session = GameSession {
            board,
            players,
            turn: TurnState::new(),
            generation: self.generation,
            scheduled: None,
        };
        if session.active_player().is_computer() {
            session.begin_computer_turn(&mut self.rng, &mut self.events);
        }
        self.session = Some(session);
    }

    /// Abandons the game in progress. Scheduled continuations become stale.
    pub fn reset_game(&mut self) {
        self.generation += 1;
        self.session = None;
        debug!(generation = self.generation, "Game reset");
        self.events.push(GameEvent::GameReset);
    }

    /// Rolls the dice for the active player and poses the challenge.
    pub fn request_roll(&mut self) -> Result<Challenge, GameError> {
        let (session, rng, events) = self.parts()?;
        session.expect_human_phase(Phase::AwaitingRoll)?;
        Ok(session.roll(rng, events))
    }

    /// Answers the pending challenge. Returns whether the answer was right.
    ///
    /// Non-finite values are rejected with [`GameError::InvalidInput`].
    pub fn submit_answer(&mut self, value: f64) -> Result<bool, GameError> {
        if !value.is_finite() {
            return Err(GameError::InvalidInput {
                input: value.to_string(),
            });
        }
        let (session, rng, events) = self.parts()?;
        session.expect_human_phase(Phase::AwaitingAnswer)?;
        session.answer(value, rng, events)
    }

    /// Like [`Self::submit_answer()`], for answers typed in by a player.
    ///
    /// An empty answer counts as `0`.
    pub fn submit_answer_text(&mut self, input: &str) -> Result<bool, GameError> {
        let input = input.trim();
        let value = if input.is_empty() {
            0.0
        } else {
            input.parse::<f64>().map_err(|_| GameError::InvalidInput {
                input: String::from(input),
            })?
        };
        self.submit_answer(value)
    }

    /// The step the engine is waiting to carry out, if any.
    pub fn scheduled(&self) -> Option<Continuation> {
        self.session.as_ref().and_then(|s| s.scheduled)
    }

    /// Carries out a scheduled step.
    ///
    /// Returns `false` without touching the game if the continuation is stale,
    /// i.e. it belongs to an earlier game or has already been resumed.
    pub fn resume(&mut self, continuation: Continuation) -> Result<bool, GameError> {
        let Some(session) = self.session.as_mut() else {
            debug!(?continuation, "Ignoring continuation, no game in progress");
            return Ok(false);
        };
        if session.scheduled != Some(continuation) {
            debug!(?continuation, generation = session.generation, "Ignoring stale continuation");
            return Ok(false);
        }
        session.scheduled = None;

        match continuation.kind {
            ContinuationKind::Settle => session.rotate(&mut self.rng, &mut self.events),
            ContinuationKind::ComputerAnswer => {
                // Computers always know the answer
                let expected = session
                    .turn
                    .pending_challenge
                    .map(|c| c.expected_sum)
                    .ok_or(GameError::InvalidState(InvalidState::WrongPhase {
                        expected: Phase::AwaitingAnswer,
                        actual: session.turn.phase,
                    }))?;
                session.answer(expected as f64, &mut self.rng, &mut self.events)?;
            }
        }
        Ok(true)
    }

    /// Resumes scheduled steps without pausing until the engine waits for
    /// a human or the game is over.
    pub fn run_scheduled(&mut self) -> Result<(), GameError> {
        while let Some(continuation) = self.scheduled() {
            self.resume(continuation)?;
        }
        Ok(())
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// The phase of the game in progress, `None` if there is none.
    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(|s| s.turn.phase)
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.session.as_ref().map(|s| s.active_player())
    }

    /// Takes all events recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn parts(&mut self) -> Result<(&mut GameSession, &mut R, &mut Vec<GameEvent>), GameError> {
        let session = self
            .session
            .as_mut()
            .ok_or(GameError::InvalidState(InvalidState::NoGameInProgress))?;
        Ok((session, &mut self.rng, &mut self.events))
    }
}
