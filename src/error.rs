use std::fmt;

use crate::engine::Region;

/// Rejected [`GameConfig`](crate::config::GameConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveInterval { value: f32 },
    InvertedInterval { min: f32, max: f32 },
    ZeroFragsPerLevel,
    NoEnemyTemplates,
    BadSpawnWeights,
    NonPositiveHeight { region: Region, height: f32 },
    NonPositiveHp { region: Region, hp: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveInterval { value } => {
                write!(f, "spawn interval must be positive, got {value}")
            }
            Self::InvertedInterval { min, max } => {
                write!(f, "spawn interval range inverted: min={min}, max={max}")
            }
            Self::ZeroFragsPerLevel => write!(f, "frags per level must be at least 1"),
            Self::NoEnemyTemplates => write!(f, "no enemy templates configured"),
            Self::BadSpawnWeights => {
                write!(f, "spawn weights must be non-negative with a positive total")
            }
            Self::NonPositiveHeight { region, height } => {
                write!(f, "{region:?} height must be positive, got {height}")
            }
            Self::NonPositiveHp { region, hp } => {
                write!(f, "{region:?} hit points must be positive, got {hp}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
