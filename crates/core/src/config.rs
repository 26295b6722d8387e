//! Session configuration
//!
//! Everything a session needs is fixed at construction time. Invalid values
//! are rejected up front with a [`ConfigError`]; nothing in play can fail.

use thiserror::Error;

use crate::rng::GeneratorPolicy;
use crate::types::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_LINES_PER_LEVEL};

/// Rejected construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field width must be at least 1")]
    ZeroWidth,
    #[error("field height must be at least 1")]
    ZeroHeight,
    #[error("lines per level must be at least 1")]
    ZeroLinesPerLevel,
    #[error("field of {width}x{height} cells is too large")]
    FieldTooLarge { width: u16, height: u16 },
}

/// Largest number of cells a field may hold
pub const MAX_FIELD_CELLS: u64 = i32::MAX as u64;

/// Construction-time parameters for a [`GameState`](crate::GameState)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub generator: GeneratorPolicy,
    pub lines_per_level: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            generator: GeneratorPolicy::default(),
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorPolicy) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_lines_per_level(mut self, lines_per_level: u32) -> Self {
        self.lines_per_level = lines_per_level;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.width as u64 * self.height as u64 > MAX_FIELD_CELLS {
            return Err(ConfigError::FieldTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.lines_per_level, 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_values_are_rejected() {
        let base = GameConfig::default();
        assert_eq!(
            base.with_size(0, 20).validate(),
            Err(ConfigError::ZeroWidth)
        );
        assert_eq!(
            base.with_size(10, 0).validate(),
            Err(ConfigError::ZeroHeight)
        );
        assert_eq!(
            base.with_lines_per_level(0).validate(),
            Err(ConfigError::ZeroLinesPerLevel)
        );
    }

    #[test]
    fn oversized_field_is_rejected() {
        let base = GameConfig::default();
        assert_eq!(
            base.with_size(50_000, 50_000).validate(),
            Err(ConfigError::FieldTooLarge {
                width: 50_000,
                height: 50_000
            })
        );
        assert_eq!(
            base.with_size(u16::MAX, u16::MAX).validate(),
            Err(ConfigError::FieldTooLarge {
                width: u16::MAX,
                height: u16::MAX
            })
        );
        // 65535 x 32769 passes i32::MAX cells; one row less fits.
        assert!(base.with_size(u16::MAX, 32_769).validate().is_err());
        assert_eq!(base.with_size(u16::MAX, 32_768).validate(), Ok(()));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::ZeroLinesPerLevel.to_string(),
            "lines per level must be at least 1"
        );
    }
}
