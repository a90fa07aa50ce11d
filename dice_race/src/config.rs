use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Controller, Player};

/// Who plays the second seat. The first seat is always a human.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two humans.
    #[default]
    Pvp,
    /// A human against the computer.
    Pvc,
}

/// The cars a player can pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarColor {
    Blue,
    White,
    Green,
    Orange,
    Lightning,
}

/// All cars, in the order used to pick a replacement for a duplicate.
pub const PALETTE: [CarColor; 5] = [
    CarColor::Blue,
    CarColor::White,
    CarColor::Green,
    CarColor::Orange,
    CarColor::Lightning,
];

impl CarColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarColor::Blue => "blue",
            CarColor::White => "white",
            CarColor::Green => "green",
            CarColor::Orange => "orange",
            CarColor::Lightning => "lightning",
        }
    }
}

impl std::fmt::Display for CarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error type for the [`FromStr`] instances of [`CarColor`] and [`Mode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownOption {
    pub given: String,
    pub expected: &'static [&'static str],
}

impl std::error::Error for UnknownOption {}

impl std::fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not one of {}",
            self.given,
            self.expected.join(", ")
        )
    }
}

impl FromStr for CarColor {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOption {
                given: String::from(s),
                expected: &["blue", "white", "green", "orange", "lightning"],
            })
    }
}

impl FromStr for Mode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(Mode::Pvp),
            "pvc" => Ok(Mode::Pvc),
            _ => Err(UnknownOption {
                given: String::from(s),
                expected: &["pvp", "pvc"],
            }),
        }
    }
}

/// Makes sure the two cars differ.
///
/// If both players picked the same car, the second player gets the first car
/// of the [`PALETTE`] that differs from the first player's.
pub fn distinct_colors(first: CarColor, second: CarColor) -> (CarColor, CarColor) {
    if first != second {
        return (first, second);
    }
    let replacement = PALETTE
        .into_iter()
        .find(|&c| c != first)
        .unwrap_or(CarColor::White);
    (first, replacement)
}

/// Settings chosen before a game starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: Mode,
    pub p1_name: String,
    pub p2_name: String,
    pub p1_color: CarColor,
    pub p2_color: CarColor,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Pvp,
            p1_name: String::from("Player 1"),
            p2_name: String::from("Player 2"),
            p1_color: CarColor::Blue,
            p2_color: CarColor::White,
        }
    }
}

impl GameConfig {
    /// Creates the two players for a new game.
    ///
    /// Blank names fall back to "Player 1" and "Player 2", and the computer
    /// is always called "Computer".
    pub fn seats(&self) -> [Player; 2] {
        let p1_name = non_blank(&self.p1_name).unwrap_or("Player 1");
        let (p2_name, p2_controller) = match self.mode {
            Mode::Pvp => (
                non_blank(&self.p2_name).unwrap_or("Player 2"),
                Controller::Human,
            ),
            Mode::Pvc => ("Computer", Controller::Computer),
        };
        let (p1_color, p2_color) = distinct_colors(self.p1_color, self.p2_color);
        [
            Player::new(p1_name, Controller::Human, p1_color),
            Player::new(p2_name, p2_controller, p2_color),
        ]
    }
}

fn non_blank(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn resolved_colors_differ(first: CarColor, second: CarColor) -> bool {
            let (a, b) = distinct_colors(first, second);
            a == first && a != b && (first == second || b == second)
        }

        fn seats_are_always_distinct(config: GameConfig) -> bool {
            let [p1, p2] = config.seats();
            p1.color != p2.color
                && !p1.name.trim().is_empty()
                && !p2.name.trim().is_empty()
                && !p1.is_computer()
                && p2.is_computer() == (config.mode == Mode::Pvc)
        }
    }

    #[test]
    fn duplicate_color_takes_first_other_palette_entry() {
        assert_eq!(
            distinct_colors(CarColor::Blue, CarColor::Blue),
            (CarColor::Blue, CarColor::White)
        );
        assert_eq!(
            distinct_colors(CarColor::Orange, CarColor::Orange),
            (CarColor::Orange, CarColor::Blue)
        );
    }

    #[test]
    fn computer_seat_is_named_computer() {
        let config = GameConfig {
            mode: Mode::Pvc,
            p1_name: String::from("  Ada "),
            p2_name: String::from("Grace"),
            ..GameConfig::default()
        };
        let [p1, p2] = config.seats();
        assert_eq!(p1.name, "Ada");
        assert_eq!(p2.name, "Computer");
        assert_eq!(p2.controller, Controller::Computer);
    }

    #[test]
    fn blank_names_fall_back() {
        let config = GameConfig {
            p1_name: String::from("   "),
            p2_name: String::new(),
            ..GameConfig::default()
        };
        let [p1, p2] = config.seats();
        assert_eq!(p1.name, "Player 1");
        assert_eq!(p2.name, "Player 2");
    }

    #[test]
    fn parse_options() {
        assert_eq!("Lightning".parse::<CarColor>(), Ok(CarColor::Lightning));
        assert_eq!(" pvc ".parse::<Mode>(), Ok(Mode::Pvc));
        assert!("purple".parse::<CarColor>().is_err());
        assert!("coop".parse::<Mode>().is_err());
    }

    #[test]
    fn config_from_partial_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{"mode": "pvc", "p1_color": "green"}"#).unwrap();
        assert_eq!(config.mode, Mode::Pvc);
        assert_eq!(config.p1_color, CarColor::Green);
        assert_eq!(config.p2_color, CarColor::White);
        assert_eq!(config.p1_name, "Player 1");
    }
}
