//! Entry configuration
//!
//! Calendar rules and keystroke limits. Every field has a default, so an
//! empty TOML document yields the stock behavior.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    DAY_KEYSTROKES, DEFAULT_CENTURY_BASE, DEFAULT_YEAR_FLOOR, Field, HOUR_KEYSTROKES,
    MINUTE_KEYSTROKES, MONTH_KEYSTROKES, YEAR_KEYSTROKES, prelude::*,
};

/// How many days February gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FebruaryRule {
    /// Always 29 days, whatever the year
    #[default]
    #[display(fmt = "fixed")]
    Fixed,
    /// 28 or 29 days following the Gregorian leap year rule
    #[display(fmt = "gregorian")]
    Gregorian,
}

/// Calendar rules applied by the date assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRules {
    pub february: FebruaryRule,
    /// Added to years below 100 when a composite date is assembled
    pub century_base: u32,
    /// Stepping the year down stops here
    pub year_floor: u32,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            february: FebruaryRule::default(),
            century_base: DEFAULT_CENTURY_BASE,
            year_floor: DEFAULT_YEAR_FLOOR,
        }
    }
}

/// Digits typed into a sub-field before focus moves on. Zero disables
/// auto-advance for that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystrokeLimits {
    pub month: u8,
    pub day: u8,
    pub year: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Default for KeystrokeLimits {
    fn default() -> Self {
        Self {
            month: MONTH_KEYSTROKES,
            day: DAY_KEYSTROKES,
            year: YEAR_KEYSTROKES,
            hour: HOUR_KEYSTROKES,
            minute: MINUTE_KEYSTROKES,
        }
    }
}

impl KeystrokeLimits {
    /// Limit for `field`, or `None` when digits never move focus from it.
    pub const fn for_field(&self, field: Field) -> Option<u8> {
        let limit = match field {
            Field::Month => self.month,
            Field::Day => self.day,
            Field::Year => self.year,
            Field::Hour => self.hour,
            Field::Minute => self.minute,
            Field::Meridiem => 0,
        };
        if limit == 0 { None } else { Some(limit) }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryConfig {
    #[serde(default)]
    pub date: DateRules,
    #[serde(default)]
    pub keystrokes: KeystrokeLimits,
}

/// Error type for loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EntryConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the text is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(
            february = %config.date.february,
            century_base = config.date.century_base,
            year_floor = config.date.year_floor,
            "loaded entry config"
        );
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents do not parse.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EntryConfig::default();
        assert_eq!(config.date.february, FebruaryRule::Fixed);
        assert_eq!(config.date.century_base, 2000);
        assert_eq!(config.date.year_floor, 0);
        assert_eq!(config.keystrokes.month, 2);
        assert_eq!(config.keystrokes.year, 4);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EntryConfig::from_toml_str("").unwrap();
        assert_eq!(config, EntryConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
            [date]
            february = "gregorian"
            year_floor = 1900

            [keystrokes]
            year = 2
        "#;
        let config = EntryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.date.february, FebruaryRule::Gregorian);
        assert_eq!(config.date.year_floor, 1900);
        assert_eq!(config.date.century_base, 2000);
        assert_eq!(config.keystrokes.year, 2);
        assert_eq!(config.keystrokes.day, 2);
    }

    #[test]
    fn test_bad_toml() {
        let result = EntryConfig::from_toml_str("[date]\nfebruary = \"lunar\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = EntryConfig::load_from_file(Path::new("/nonexistent/entry_fields.toml"));
        match result {
            Err(ConfigError::Read { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/entry_fields.toml"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_keystroke_limit_for_field() {
        let limits = KeystrokeLimits::default();
        assert_eq!(limits.for_field(Field::Month), Some(2));
        assert_eq!(limits.for_field(Field::Year), Some(4));
        assert_eq!(limits.for_field(Field::Meridiem), None);

        let disabled = KeystrokeLimits {
            day: 0,
            ..KeystrokeLimits::default()
        };
        assert_eq!(disabled.for_field(Field::Day), None);
    }

    #[test]
    fn test_config_serde_json() {
        let config = EntryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EntryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
