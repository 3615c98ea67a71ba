//! Error types for configuration loading and leaderboard storage.
//!
//! Gameplay itself never fails: precondition violations are absorbed as
//! no-ops inside the simulation. Only the edges that touch external resources
//! return these errors, and the [`Game`](crate::game::Game) façade logs and
//! swallows them so play continues.

use std::fmt;

/// A [`GameConfig`](crate::config::GameConfig) that cannot be used.
#[derive(Debug)]
pub enum ConfigError {
    /// A tuning value is outside the range the simulation can honour.
    InvalidValue {
        /// Field name (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
    /// The configuration document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => write!(f, "invalid config value {field} = {value} (expected {expected})"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Leaderboard storage failure.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem read/write failed.
    Io(std::io::Error),
    /// Stored data could not be encoded or decoded.
    Serde(serde_json::Error),
    /// The backing store does not exist in this environment
    /// (e.g. LocalStorage disabled in a private window).
    Unavailable(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "score store I/O error: {err}"),
            StoreError::Serde(err) => write!(f, "score store data error: {err}"),
            StoreError::Unavailable(what) => write!(f, "score store unavailable: {what}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serde(err) => Some(err),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display_names_field() {
        let err = ConfigError::InvalidValue {
            field: "max_spawn_rate",
            value: -1.0,
            expected: "> 0",
        };
        let msg = err.to_string();
        assert!(msg.contains("max_spawn_rate"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
