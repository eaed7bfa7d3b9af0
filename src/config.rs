use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

use crate::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".trip-booking";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "bookings.sqlite";

const DB_PATH_VAR: &str = "TRIP_BOOKING_DB";
const POOL_SIZE_VAR: &str = "TRIP_BOOKING_POOL_SIZE";
const BUSY_TIMEOUT_VAR: &str = "TRIP_BOOKING_BUSY_TIMEOUT_MS";

const DEFAULT_POOL_SIZE: usize = 2;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection target and pool tuning handed to [`crate::BookingStore::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file. Its parent directory is created on open.
    pub database_path: PathBuf,
    /// Maximum number of idle connections kept around between operations.
    pub pool_size: usize,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Config {
    /// Config rooted at an explicit database file, with default pool tuning.
    pub fn with_database_path(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration through `lookup`, falling back to defaults for
    /// every variable it does not know.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(DB_PATH_VAR).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let pool_size = match lookup(POOL_SIZE_VAR) {
            Some(raw) => parse_var::<usize>(POOL_SIZE_VAR, &raw)?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            return Err(invalid(POOL_SIZE_VAR, "must be greater than zero").into());
        }

        let busy_timeout_ms = match lookup(BUSY_TIMEOUT_VAR) {
            Some(raw) => parse_var::<u64>(BUSY_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Ok(Self {
            database_path,
            pool_size,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| invalid(key, &format!("`{raw}` is not a non-negative integer")).into())
}

fn invalid(key: &str, reason: &str) -> StoreError {
    StoreError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/trips.sqlite"),
            (POOL_SIZE_VAR, "4"),
            (BUSY_TIMEOUT_VAR, "250"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/trips.sqlite"));
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_defaults_for_tuning() {
        let config =
            Config::from_lookup(lookup_from(&[(DB_PATH_VAR, "bookings.sqlite")])).unwrap();
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(
            config.busy_timeout,
            Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS)
        );
    }

    #[test]
    fn test_rejects_zero_pool() {
        let err = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "bookings.sqlite"),
            (POOL_SIZE_VAR, "0"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidConfig { key, .. }) if key == POOL_SIZE_VAR
        ));
    }

    #[test]
    fn test_rejects_garbage_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "bookings.sqlite"),
            (BUSY_TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(BUSY_TIMEOUT_VAR));
    }
}
