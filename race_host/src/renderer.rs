use std::io::Write;

use dice_race::{GameEvent, GameSession, Phase, TileType};
use serde::Serialize;

/// Shows the game to the players.
pub trait Renderer {
    fn render(&mut self, event: &GameEvent, session: Option<&GameSession>) -> anyhow::Result<()>;

    /// Draws the whole track with both cars.
    fn show_board(&mut self, session: &GameSession) -> anyhow::Result<()>;

    /// Tells the player what they can do now.
    fn prompt(&mut self, _session: Option<&GameSession>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Reports a command that was not accepted.
    fn reject(&mut self, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Renders the game as a log of human-readable lines.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn name(session: Option<&GameSession>, player: usize) -> &str {
    session
        .map(|s| s.players()[player].name.as_str())
        .unwrap_or("?")
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, event: &GameEvent, session: Option<&GameSession>) -> anyhow::Result<()> {
        match event {
            GameEvent::GameStarted { players, .. } => {
                writeln!(self.out, "New race: {} vs {}", players[0], players[1])?
            }
            GameEvent::GameReset => writeln!(self.out, "Game reset. Type 'start' to race again.")?,
            GameEvent::ComputerRolling { player } => {
                writeln!(self.out, "{} is rolling...", name(session, *player))?
            }
            GameEvent::DiceRolled { d1, d2 } => writeln!(self.out, "Dice: [{}] [{}]", d1, d2)?,
            GameEvent::ChallengePosed { d1, d2 } => writeln!(self.out, "What is {} + {}?", d1, d2)?,
            GameEvent::AnswerResult {
                player,
                correct,
                value,
                expected,
            } => {
                let is_computer = session.is_some_and(|s| s.players()[*player].is_computer());
                if is_computer {
                    writeln!(self.out, "{} answers {}.", name(session, *player), expected)?
                } else if *correct {
                    writeln!(
                        self.out,
                        "{} answered correctly (+{}).",
                        name(session, *player),
                        expected
                    )?
                } else {
                    writeln!(
                        self.out,
                        "{} answered {} (wrong). No movement.",
                        name(session, *player),
                        value
                    )?
                }
            }
            GameEvent::PlayerMoved {
                player,
                spaces,
                tile,
            } => writeln!(
                self.out,
                "{} moves {} {} to {}",
                name(session, *player),
                spaces,
                if *spaces == 1 { "space" } else { "spaces" },
                tile
            )?,
            GameEvent::Boosted {
                player,
                bonus,
                tile,
            } => writeln!(
                self.out,
                "{} hit a Boost! +{} to {}",
                name(session, *player),
                bonus,
                tile
            )?,
            GameEvent::SkipIncurred { player } => writeln!(
                self.out,
                "{} hit a Skip tile and will miss next turn!",
                name(session, *player)
            )?,
            GameEvent::TurnSkipped { player } => {
                writeln!(self.out, "{}'s turn is skipped!", name(session, *player))?
            }
            GameEvent::TurnChanged { player } => {
                writeln!(self.out, "{}'s turn", name(session, *player))?
            }
            GameEvent::GameOver { winner } => {
                writeln!(self.out, "Game over: {} wins!", name(session, *winner))?
            }
        }
        Ok(())
    }

    fn show_board(&mut self, session: &GameSession) -> anyhow::Result<()> {
        writeln!(self.out, "{}", visualize_track(session))?;
        Ok(())
    }

    fn prompt(&mut self, session: Option<&GameSession>) -> anyhow::Result<()> {
        let hint = match session {
            None => String::from("Type 'start' to begin a race."),
            Some(s) => match s.turn().phase {
                Phase::AwaitingRoll => format!("{}, type 'roll'.", s.active_player().name),
                Phase::AwaitingAnswer => match s.turn().pending_challenge {
                    Some(challenge) => format!("{} {}", s.active_player().name, challenge),
                    None => return Ok(()),
                },
                Phase::Resolving => return Ok(()),
                Phase::GameOver => String::from("Type 'start' for a rematch or 'quit'."),
            },
        };
        writeln!(self.out, "> {}", hint)?;
        self.out.flush()?;
        Ok(())
    }

    fn reject(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.out, "! {}", message)?;
        Ok(())
    }
}

const TILES_PER_ROW: usize = 10;

/// Draws the track as rows of tiles in a box.
///
/// `.` is a normal tile, `+` a boost, `x` a skip. Cars are drawn as `1` and
/// `2`, or `*` when both are on the same tile.
pub fn visualize_track(session: &GameSession) -> String {
    let [p1, p2] = session.players();
    let tiles = session.board().tiles();

    let mut result = String::from("     ╭");
    for _ in 0..TILES_PER_ROW {
        result += "──";
    }
    result += "─╮";
    for (idx, tile) in tiles.iter().enumerate() {
        if idx % TILES_PER_ROW == 0 {
            result += &format!("\n{:>4} │ ", idx + 1);
        }
        let symbol = match (p1.position == idx, p2.position == idx, tile) {
            (true, true, _) => '*',
            (true, false, _) => '1',
            (false, true, _) => '2',
            (false, false, TileType::Normal) => '.',
            (false, false, TileType::Boost { .. }) => '+',
            (false, false, TileType::Skip) => 'x',
        };
        result.push(symbol);
        result.push(' ');
        if idx % TILES_PER_ROW == TILES_PER_ROW - 1 || idx == tiles.len() - 1 {
            for _ in (idx % TILES_PER_ROW)..(TILES_PER_ROW - 1) {
                result += "  ";
            }
            result += "│";
        }
    }
    result += "\n     ╰";
    for _ in 0..TILES_PER_ROW {
        result += "──";
    }
    result += "─╯";
    result
}

/// Renders every event as one line of JSON, for other programs to consume.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Serialize)]
struct BoardView<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    tiles: &'a [TileType],
    positions: [usize; 2],
}

#[derive(Serialize)]
struct Rejection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, event: &GameEvent, _session: Option<&GameSession>) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn show_board(&mut self, session: &GameSession) -> anyhow::Result<()> {
        let [p1, p2] = session.players();
        let view = BoardView {
            kind: "board",
            tiles: session.board().tiles(),
            positions: [p1.position, p2.position],
        };
        serde_json::to_writer(&mut self.out, &view)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn reject(&mut self, message: &str) -> anyhow::Result<()> {
        let rejection = Rejection {
            kind: "rejected",
            message,
        };
        serde_json::to_writer(&mut self.out, &rejection)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dice_race::{GameConfig, GameRng, TurnEngine};

    use super::*;

    #[test]
    fn track_has_five_rows_of_ten() {
        let mut engine = TurnEngine::new(GameRng::new(5));
        engine.start_game(&GameConfig::default());
        let drawing = visualize_track(engine.session().unwrap());
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("   1 │ * "));
        assert!(lines[5].starts_with("  41 │ "));
        assert_eq!(drawing.matches('+').count(), dice_race::BOOST_TILES);
        assert_eq!(drawing.matches('x').count(), dice_race::SKIP_TILES);
    }

    #[test]
    fn text_lines_follow_the_game() {
        let mut engine = TurnEngine::new(GameRng::new(5));
        engine.start_game(&GameConfig::default());
        engine.request_roll().unwrap();
        let mut renderer = TextRenderer::new(Vec::new());
        let events: Vec<GameEvent> = engine.drain_events().collect();
        for event in &events {
            renderer.render(event, engine.session()).unwrap();
        }
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("New race: Player 1 vs Player 2\nPlayer 1's turn\nDice: ["));
        assert!(out.contains("What is "));
    }

    #[test]
    fn json_lines_parse_back() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer
            .render(&GameEvent::TurnSkipped { player: 1 }, None)
            .unwrap();
        renderer.render(&GameEvent::GameReset, None).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let events: Vec<GameEvent> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            events,
            vec![GameEvent::TurnSkipped { player: 1 }, GameEvent::GameReset]
        );
    }
}
