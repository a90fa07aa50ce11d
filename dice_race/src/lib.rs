pub use board::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use events::*;
pub use player_state::*;
pub use rng::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod config;
mod engine;
mod errors;
mod events;
mod player_state;
mod rng;
#[cfg(test)]
mod testing;
