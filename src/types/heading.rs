use crate::conversion::normalize_yaw;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of one compass sector in degrees
pub const SECTOR_WIDTH_DEG: f64 = 45.0;

/// Eight-way compass sector a camera is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heading {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Heading {
    /// All sectors clockwise from north
    pub const ALL: [Heading; 8] = [
        Heading::N,
        Heading::NE,
        Heading::E,
        Heading::SE,
        Heading::S,
        Heading::SW,
        Heading::W,
        Heading::NW,
    ];

    /// Map a yaw angle to the sector whose 45° window is centred on it.
    ///
    /// DJI reports yaw in (-180, 180]; any finite value is accepted and
    /// wrapped first. North covers [337.5, 22.5).
    pub fn from_yaw(yaw: f64) -> Heading {
        let shifted = normalize_yaw(yaw + SECTOR_WIDTH_DEG / 2.0);
        let index = (shifted / SECTOR_WIDTH_DEG).floor() as usize % Self::ALL.len();
        Self::ALL[index]
    }

    /// Sector centre in degrees clockwise from north
    pub fn degrees(self) -> f64 {
        self.index() as f64 * SECTOR_WIDTH_DEG
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::N => "N",
            Heading::NE => "NE",
            Heading::E => "E",
            Heading::SE => "SE",
            Heading::S => "S",
            Heading::SW => "SW",
            Heading::W => "W",
            Heading::NW => "NW",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|h| *h == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
