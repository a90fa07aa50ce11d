use std::io::BufRead;
use std::str::FromStr;
use std::time::Duration;

use dice_race::{ContinuationKind, GameConfig, GameError, RandomSource, TurnEngine};
use tracing::{debug, info};

use crate::renderer::Renderer;

/// How long to wait before the engine carries on by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// After a move, before the next player's turn.
    pub settle: Duration,
    /// Before a computer player answers.
    pub think: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(550),
            think: Duration::from_millis(700),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            settle: Duration::ZERO,
            think: Duration::ZERO,
        }
    }

    fn delay(&self, kind: ContinuationKind) -> Duration {
        match kind {
            ContinuationKind::Settle => self.settle,
            ContinuationKind::ComputerAnswer => self.think,
        }
    }
}

/// A line typed in by a player.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Start,
    Reset,
    Roll,
    Board,
    Help,
    Quit,
    /// Anything else is taken as an answer to the pending challenge.
    Answer(String),
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let command = match s.to_ascii_lowercase().as_str() {
            "start" | "s" => Command::Start,
            "reset" => Command::Reset,
            "roll" | "r" => Command::Roll,
            "board" | "b" => Command::Board,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Answer(String::from(s)),
        };
        Ok(command)
    }
}

const HELP: &str = "Commands: roll (r), <number> to answer, board (b), start (s), reset, quit (q)";

/// Plays games on the terminal until the input ends or a player quits.
///
/// A game is started right away with the given config. `start` begins a new
/// one with the same config.
pub fn play_interactive<R: RandomSource>(
    engine: &mut TurnEngine<R>,
    config: &GameConfig,
    input: impl BufRead,
    renderer: &mut impl Renderer,
    pacing: Pacing,
) -> anyhow::Result<()> {
    engine.start_game(config);
    settle(engine, renderer, pacing)?;
    renderer.prompt(engine.session())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(never) => match never {},
        };
        debug!(?command, "Received command");

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                renderer.reject(HELP)?;
                Ok(())
            }
            Command::Board => {
                if let Some(session) = engine.session() {
                    renderer.show_board(session)?;
                }
                Ok(())
            }
            Command::Start => {
                engine.start_game(config);
                Ok(())
            }
            Command::Reset => {
                engine.reset_game();
                Ok(())
            }
            Command::Roll => engine.request_roll().map(|_| ()),
            Command::Answer(text) => engine.submit_answer_text(&text).map(|_| ()),
        };
        match outcome {
            Ok(()) => {}
            Err(GameError::InvalidInput { .. }) => {
                renderer.reject("Please answer with a number.")?;
            }
            Err(err @ GameError::InvalidState(_)) => {
                renderer.reject(&err.to_string())?;
            }
            Err(err) => return Err(err.into()),
        }

        settle(engine, renderer, pacing)?;
        renderer.prompt(engine.session())?;
    }

    if let Some(winner) = engine.session().and_then(|s| s.winner()) {
        info!(winner = winner.name, "Last race finished");
    }
    Ok(())
}

/// Renders what happened and runs scheduled steps until a player has to act.
fn settle<R: RandomSource>(
    engine: &mut TurnEngine<R>,
    renderer: &mut impl Renderer,
    pacing: Pacing,
) -> anyhow::Result<()> {
    loop {
        let events: Vec<_> = engine.drain_events().collect();
        for event in &events {
            renderer.render(event, engine.session())?;
        }
        let Some(continuation) = engine.scheduled() else {
            return Ok(());
        };
        let delay = pacing.delay(continuation.kind);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        engine.resume(continuation)?;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use dice_race::{GameRng, Mode, Phase};

    use super::*;
    use crate::renderer::TextRenderer;

    fn run(config: &GameConfig, input: &str) -> (TurnEngine<GameRng>, String) {
        let mut engine = TurnEngine::new(GameRng::new(11));
        let mut renderer = TextRenderer::new(Vec::new());
        play_interactive(
            &mut engine,
            config,
            Cursor::new(input.to_owned()),
            &mut renderer,
            Pacing::none(),
        )
        .unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        (engine, out)
    }

    #[test]
    fn parse_commands() {
        assert_eq!("R".parse(), Ok(Command::Roll));
        assert_eq!(" quit ".parse(), Ok(Command::Quit));
        assert_eq!("12".parse(), Ok(Command::Answer(String::from("12"))));
    }

    #[test]
    fn wrong_phase_is_reported() {
        let (engine, out) = run(&GameConfig::default(), "7\nroll\nroll\n");
        assert!(out.contains("! This can only be done while waiting for an answer"));
        assert!(out.contains("! This can only be done while waiting for a roll"));
        assert_eq!(engine.phase(), Some(Phase::AwaitingAnswer));
    }

    #[test]
    fn garbage_answer_is_rejected_and_game_goes_on() {
        let (engine, out) = run(&GameConfig::default(), "roll\nseven\n");
        assert!(out.contains("! Please answer with a number."));
        assert_eq!(engine.phase(), Some(Phase::AwaitingAnswer));
    }

    #[test]
    fn answering_passes_the_turn_to_the_computer_and_back() {
        let config = GameConfig {
            mode: Mode::Pvc,
            ..GameConfig::default()
        };
        // A wrong answer of 0 keeps the human on the start tile
        let (engine, out) = run(&config, "roll\n0\n");
        assert!(out.contains("Player 1 answered 0 (wrong). No movement."));
        assert!(out.contains("Computer is rolling..."));
        assert!(out.contains("Computer answers "));
        // One computer turn from the start can reach at most 12 + 6 * 6 = 48,
        // so the race is still on and the human rolls next
        let session = engine.session().unwrap();
        assert_eq!(session.players()[0].position, 0);
        assert!(session.players()[1].position > 0);
        assert!(!session.turn().finished());
        assert_eq!(session.turn().active, 0);
        assert_eq!(session.turn().phase, Phase::AwaitingRoll);
    }

    #[test]
    fn reset_and_quit() {
        let (engine, out) = run(&GameConfig::default(), "reset\nroll\nquit\nroll\n");
        assert!(out.contains("Game reset."));
        assert!(out.contains("! No game has been started"));
        assert!(engine.session().is_none());
    }
}
