use dice_race::{Board, CarColor, Controller, GameRng, Player, TurnEngine};
use tracing::debug;

/// The outcome of a series of computer-vs-computer races.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub wins: [usize; 2],
    pub total_rolls: usize,
}

impl MatchScore {
    pub fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1]
    }

    pub fn average_rolls(&self) -> f64 {
        if self.num_games() == 0 {
            0.0
        } else {
            self.total_rolls as f64 / self.num_games() as f64
        }
    }
}

/// Lets two computer players race each other `num_games` times, without pauses.
pub fn simulate(rng: GameRng, num_games: usize) -> anyhow::Result<MatchScore> {
    let players = [
        Player::new("Computer 1", Controller::Computer, CarColor::Blue),
        Player::new("Computer 2", Controller::Computer, CarColor::White),
    ];
    let mut engine = TurnEngine::new(rng);
    let mut score = MatchScore::default();

    for game_idx in 0..num_games {
        let board = Board::generate(engine.rng_mut());
        engine.start_game_with(board, players.clone());
        engine.run_scheduled()?;
        engine.drain_events().for_each(drop);

        let Some(session) = engine.session() else {
            anyhow::bail!("Game {} vanished before it finished", game_idx);
        };
        let Some(winner) = session.turn().winner else {
            anyhow::bail!("Game {} stopped without a winner", game_idx);
        };
        debug!(winner = session.players()[winner].name, game_idx, rolls = session.turn().rolls);
        score.wins[winner] += 1;
        score.total_rolls += session.turn().rolls;
    }
    Ok(score)
}
