//! Shared domain types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Euro Truck Simulator 2
    #[serde(rename = "ETS2")]
    Ets2,
    /// American Truck Simulator
    #[serde(rename = "ATS")]
    Ats,
}

impl Game {
    /// Returns the short code used by the API.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ets2 => "ETS2",
            Self::Ats => "ATS",
        }
    }

    /// Returns the full title of the game.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Ets2 => "Euro Truck Simulator 2",
            Self::Ats => "American Truck Simulator",
        }
    }

    /// Returns all supported games.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Ets2, Self::Ats]
    }
}

/// Unknown game code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown game: {0}")]
pub struct UnknownGame(pub String);

impl FromStr for Game {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ets2" | "ets" => Ok(Self::Ets2),
            "ats" => Ok(Self::Ats),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
