use crate::core::data::colour::Colour;
use crate::core::errors::configuration::{ConfigurationError, normalise_name};
use std::fmt;
use std::str::FromStr;

/// A gradient anchor at `position` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourStop {
    pub position: f64,
    pub colour: Colour,
}

const fn stop(position: f64, r: u8, g: u8, b: u8) -> ColourStop {
    ColourStop {
        position,
        colour: Colour::new(r, g, b),
    }
}

const FOREST: &[ColourStop] = &[
    stop(0.0, 0, 0, 128),
    stop(0.3, 34, 139, 34),
    stop(0.6, 139, 69, 19),
    stop(1.0, 255, 255, 255),
];

const CITY: &[ColourStop] = &[
    stop(0.0, 50, 50, 50),
    stop(0.4, 100, 100, 100),
    stop(0.7, 200, 0, 0),
    stop(1.0, 255, 255, 255),
];

const DREAM: &[ColourStop] = &[
    stop(0.0, 255, 0, 0),
    stop(0.25, 255, 165, 0),
    stop(0.5, 255, 255, 0),
    stop(0.75, 0, 128, 0),
    stop(1.0, 0, 0, 255),
];

const OCEAN: &[ColourStop] = &[
    stop(0.0, 0, 0, 50),
    stop(0.3, 0, 100, 200),
    stop(0.6, 100, 200, 255),
    stop(1.0, 255, 255, 255),
];

const DESERT: &[ColourStop] = &[
    stop(0.0, 200, 100, 0),
    stop(0.3, 255, 200, 100),
    stop(0.6, 255, 150, 50),
    stop(1.0, 255, 255, 200),
];

const SPACE: &[ColourStop] = &[
    stop(0.0, 0, 0, 0),
    stop(0.3, 50, 0, 100),
    stop(0.6, 100, 0, 200),
    stop(1.0, 200, 100, 255),
];

const RAINBOW: &[ColourStop] = &[
    stop(0.0, 255, 0, 0),
    stop(0.16, 255, 165, 0),
    stop(0.33, 255, 255, 0),
    stop(0.5, 0, 128, 0),
    stop(0.66, 0, 0, 255),
    stop(0.83, 75, 0, 130),
    stop(1.0, 148, 0, 211),
];

const FIRE: &[ColourStop] = &[
    stop(0.0, 50, 0, 0),
    stop(0.4, 200, 0, 0),
    stop(0.8, 255, 140, 0),
    stop(1.0, 255, 255, 200),
];

const ICE: &[ColourStop] = &[
    stop(0.0, 0, 0, 100),
    stop(0.4, 0, 100, 200),
    stop(0.8, 150, 200, 255),
    stop(1.0, 255, 255, 255),
];

const INFERNO: &[ColourStop] = &[
    stop(0.0, 0, 0, 4),
    stop(0.25, 87, 15, 109),
    stop(0.5, 187, 55, 84),
    stop(0.75, 249, 142, 50),
    stop(1.0, 255, 255, 85),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Forest,
    City,
    #[default]
    Dream,
    Ocean,
    Desert,
    Space,
    Rainbow,
    Fire,
    Ice,
    Inferno,
}

impl Theme {
    pub const ALL: &'static [Self] = &[
        Self::Dream,
        Self::Forest,
        Self::City,
        Self::Ocean,
        Self::Desert,
        Self::Space,
        Self::Rainbow,
        Self::Fire,
        Self::Ice,
        Self::Inferno,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Forest => "Forest",
            Self::City => "City",
            Self::Dream => "Dream",
            Self::Ocean => "Ocean",
            Self::Desert => "Desert",
            Self::Space => "Space",
            Self::Rainbow => "Rainbow",
            Self::Fire => "Fire",
            Self::Ice => "Ice",
            Self::Inferno => "Inferno",
        }
    }

    /// Ordered stops, first at 0.0 and last at 1.0.
    #[must_use]
    pub const fn stops(self) -> &'static [ColourStop] {
        match self {
            Self::Forest => FOREST,
            Self::City => CITY,
            Self::Dream => DREAM,
            Self::Ocean => OCEAN,
            Self::Desert => DESERT,
            Self::Space => SPACE,
            Self::Rainbow => RAINBOW,
            Self::Fire => FIRE,
            Self::Ice => ICE,
            Self::Inferno => INFERNO,
        }
    }

    /// Colour for points that never escape.
    #[must_use]
    pub const fn interior(self) -> Colour {
        match self {
            Self::Inferno => Colour::new(0, 0, 4),
            _ => Colour::BLACK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for Theme {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_name(name);

        Self::ALL
            .iter()
            .copied()
            .find(|theme| normalise_name(theme.display_name()) == wanted)
            .ok_or_else(|| ConfigurationError::UnknownTheme(name.to_string()))
    }
}
