//! Editor settings loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::punchcards::{Glyphs, HOLE_GLYPH, INVALID_GLYPH};
use crate::templates::VERTICAL_BAR;

/// What typing a character at column 0 does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnZeroRule {
    /// Insert the character as typed.
    #[default]
    Plain,
    /// Insert a space first, so the character lands in column 1.
    SeedSpace,
}

/// What Backspace does when the cursor is at column 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStartBackspace {
    /// Remove the whole line and move to the end of the previous one.
    #[default]
    DeleteLine,
    /// Append the line to the previous one.
    Join,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be a printable character, got {glyph:?}")]
    Unprintable { field: &'static str, glyph: char },
    #[error("{field} cannot be the card separator '│'")]
    Separator { field: &'static str },
    #[error("hole_glyph and invalid_glyph must differ")]
    SameGlyphs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub hole_glyph: char,
    pub invalid_glyph: char,
    pub column_zero: ColumnZeroRule,
    pub line_start_backspace: LineStartBackspace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hole_glyph: HOLE_GLYPH,
            invalid_glyph: INVALID_GLYPH,
            column_zero: ColumnZeroRule::default(),
            line_start_backspace: LineStartBackspace::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, glyph) in [
            ("hole_glyph", self.hole_glyph),
            ("invalid_glyph", self.invalid_glyph),
        ] {
            if glyph.is_control() || glyph.is_whitespace() {
                return Err(ConfigError::Unprintable { field, glyph });
            }
            if glyph == VERTICAL_BAR {
                return Err(ConfigError::Separator { field });
            }
        }
        if self.hole_glyph == self.invalid_glyph {
            return Err(ConfigError::SameGlyphs);
        }
        Ok(())
    }

    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            hole: self.hole_glyph,
            invalid: self.invalid_glyph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.glyphs(), Glyphs::default());
    }

    #[test]
    fn policies_use_kebab_case() {
        let config: Config = serde_json::from_str(
            r#"{"column_zero": "seed-space", "line_start_backspace": "join", "hole_glyph": "O"}"#,
        )
        .unwrap();
        assert_eq!(config.column_zero, ColumnZeroRule::SeedSpace);
        assert_eq!(config.line_start_backspace, LineStartBackspace::Join);
        assert_eq!(config.glyphs().hole, 'O');
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"hole": "O"}"#).is_err());
    }

    #[test]
    fn validation_rejects_unusable_glyphs() {
        let mut config = Config {
            hole_glyph: ' ',
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Unprintable {
                field: "hole_glyph",
                glyph: ' '
            })
        );
        config.hole_glyph = VERTICAL_BAR;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Separator {
                field: "hole_glyph"
            })
        );
        config.hole_glyph = INVALID_GLYPH;
        assert_eq!(config.validate(), Err(ConfigError::SameGlyphs));
    }

    #[test]
    fn load_reads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"invalid_glyph": "?", "log_file": "/tmp/keypunch.log"}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.invalid_glyph, '?');
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/keypunch.log")));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{"hole_glyph": "▒"}}"#).unwrap();
        let err = Config::load(bad.path()).unwrap_err();
        assert!(format!("{err:#}").contains("must differ"));
    }
}
