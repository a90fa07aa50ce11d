mod game;
mod renderer;
mod simulation;
pub use game::*;
pub use renderer::*;
pub use simulation::*;

use std::path::Path;

use dice_race::GameConfig;

/// Reads a game config from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    if !path.is_file() {
        anyhow::bail!("Config file '{}' does not exist", path.display());
    }
    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}
