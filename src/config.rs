use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

/// Optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "head_count.json";

/// Environment override for the database path.
pub const DB_ENV_VAR: &str = "HEAD_COUNT_DB";

/// Startup configuration.  Every field is optional in the file; a missing
/// file means defaults.  `offer_delete` decides whether the Delete Entity
/// action is bound into the menu at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: String,
    pub offer_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: String::from("head_count.db"),
            offer_delete: true,
        }
    }
}

impl Config {
    /// Load `head_count.json` if present, then apply the environment
    /// override for the database path.  A present-but-unreadable or
    /// malformed file is an error; the caller treats it as fatal.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;

        if let Ok(path) = env::var(DB_ENV_VAR) {
            config.database = path;
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(ConfigError::Parse),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(ConfigError::Read(e)),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "could not read {}: {}", CONFIG_FILE, e),
            ConfigError::Parse(e) => write!(f, "could not parse {}: {}", CONFIG_FILE, e),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn absent_file_yields_defaults() {
        let config = Config::from_file("no_such_config.json").unwrap();
        assert_eq!(config.database, "head_count.db");
        assert!(config.offer_delete);
    }

    #[test]
    fn fields_are_individually_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"offer_delete\": false}}").unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.database, "head_count.db");
        assert!(!config.offer_delete);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got: {}", err);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"databse\": \"typo.db\"}}").unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }
}
