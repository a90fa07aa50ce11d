use serde::{Deserialize, Serialize};

use crate::CarColor;

/// Who makes the decisions for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    /// Rolls and answers on its own, and never answers wrong.
    Computer,
}

/// The state for a single player during one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Index of the tile the player's car is on.
    pub position: usize,
    /// The player landed on a skip tile and misses their next turn.
    pub pending_skip: bool,
    pub controller: Controller,
    pub color: CarColor,
}

impl Player {
    pub fn new(name: impl Into<String>, controller: Controller, color: CarColor) -> Self {
        Self {
            name: name.into(),
            position: 0,
            pending_skip: false,
            controller,
            color,
        }
    }

    /// The 1-based tile number shown to players.
    pub fn tile_number(&self) -> usize {
        self.position + 1
    }

    pub fn is_computer(&self) -> bool {
        self.controller == Controller::Computer
    }
}
