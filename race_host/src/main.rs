use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dice_race::{CarColor, GameConfig, GameRng, Mode, TurnEngine};
use race_host::{load_config, play_interactive, simulate, JsonRenderer, Pacing, TextRenderer};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file with the game config. Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// "pvp" for two players, "pvc" to play against the computer
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Name of the first player
    #[arg(long)]
    p1_name: Option<String>,

    /// Name of the second player, ignored against the computer
    #[arg(long)]
    p2_name: Option<String>,

    /// Car of the first player: blue, white, green, orange or lightning
    #[arg(long)]
    p1_car: Option<CarColor>,

    /// Car of the second player
    #[arg(long)]
    p2_car: Option<CarColor>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds to pause after a move
    #[arg(long, default_value_t = 550)]
    settle_ms: u64,

    /// Milliseconds the computer thinks before answering
    #[arg(long, default_value_t = 700)]
    think_ms: u64,

    /// Print events as JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Instead of playing, let two computers race this many times
    #[arg(long)]
    simulate: Option<usize>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(name) = &self.p1_name {
            config.p1_name = name.clone();
        }
        if let Some(name) = &self.p2_name {
            config.p2_name = name.clone();
        }
        if let Some(color) = self.p1_car {
            config.p1_color = color;
        }
        if let Some(color) = self.p2_car {
            config.p2_color = color;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let rng = GameRng::new(args.seed.unwrap_or_else(rand::random));
    info!(seed = rng.seed(), "Seeded the dice");

    if let Some(num_games) = args.simulate {
        let score = simulate(rng, num_games)?;
        eprintln!(
            "End result:\n- {} wins by Computer 1\n- {} wins by Computer 2\n- {:.1} rolls per game",
            score.wins[0],
            score.wins[1],
            score.average_rolls()
        );
        return Ok(());
    }

    let config = args.game_config()?;
    let pacing = Pacing {
        settle: Duration::from_millis(args.settle_ms),
        think: Duration::from_millis(args.think_ms),
    };
    let mut engine = TurnEngine::new(rng);
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    if args.json {
        let mut renderer = JsonRenderer::new(stdout);
        play_interactive(&mut engine, &config, stdin, &mut renderer, pacing)
    } else {
        let mut renderer = TextRenderer::new(stdout);
        play_interactive(&mut engine, &config, stdin, &mut renderer, pacing)
    }
}

fn initialize_logging(level: LevelFilter) {
    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
