//! Compass facade directions and their surface azimuths (0 = south, west positive).
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::N,
        Compass::NE,
        Compass::E,
        Compass::SE,
        Compass::S,
        Compass::SW,
        Compass::W,
        Compass::NW,
    ];

    /// Surface azimuth in degrees.
    pub fn azimuth(&self) -> f64 {
        match self {
            Compass::N => 180.0,
            Compass::NE => -135.0,
            Compass::E => -90.0,
            Compass::SE => -45.0,
            Compass::S => 0.0,
            Compass::SW => 45.0,
            Compass::W => 90.0,
            Compass::NW => 135.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Compass::N => "N",
            Compass::NE => "NE",
            Compass::E => "E",
            Compass::SE => "SE",
            Compass::S => "S",
            Compass::SW => "SW",
            Compass::W => "W",
            Compass::NW => "NW",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
