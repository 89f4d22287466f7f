use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tessera_engine::ConfigError;

/// Facing of an actor. Declared in LPC sheet row order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    West,
    #[default]
    South,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::West, Direction::South, Direction::East];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::West => "west",
            Direction::South => "south",
            Direction::East => "east",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownKey { kind: "direction", name: s.to_owned() })
    }
}

/// Animation category of an actor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Stand,
    Spellcast,
    Thrust,
    Walk,
    Slash,
    Shoot,
    Hurt,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Stand,
        Action::Spellcast,
        Action::Thrust,
        Action::Walk,
        Action::Slash,
        Action::Shoot,
        Action::Hurt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Stand => "stand",
            Action::Spellcast => "spellcast",
            Action::Thrust => "thrust",
            Action::Walk => "walk",
            Action::Slash => "slash",
            Action::Shoot => "shoot",
            Action::Hurt => "hurt",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownKey { kind: "action", name: s.to_owned() })
    }
}
