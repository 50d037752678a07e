//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chat_core::{DirectoryError, Result};

use crate::delayed::LatencyProfile;
use crate::generator::GeneratorConfig;

/// Settings for building a mock directory.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Wrap the store in a [`DelayedDirectory`](crate::DelayedDirectory).
    pub simulate_latency: bool,
    /// Delays used when `simulate_latency` is set.
    pub latency: LatencyProfile,
    /// RNG seed for generated conversations.
    pub seed: Option<u64>,
    /// Recorded message database path.
    pub database_path: Option<PathBuf>,
}

impl ReaderConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `READER_SIMULATE_LATENCY` | Add artificial latency (`true`/`false`) | `false` |
    /// | `READER_LIST_LATENCY_MS` | List latency in milliseconds | `500` |
    /// | `READER_LOOKUP_LATENCY_MS` | Lookup latency in milliseconds | `300` |
    /// | `READER_SEND_LATENCY_MS` | Send latency in milliseconds | `200` |
    /// | `READER_SEED` | Seed for generated data | random |
    /// | `READER_DATABASE_PATH` | Message database path | unset |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LatencyProfile::default();

        let simulate_latency = match lookup("READER_SIMULATE_LATENCY") {
            Some(raw) => parse_bool("READER_SIMULATE_LATENCY", &raw)?,
            None => false,
        };

        let latency = LatencyProfile {
            list: parse_millis(&lookup, "READER_LIST_LATENCY_MS")?.unwrap_or(defaults.list),
            lookup: parse_millis(&lookup, "READER_LOOKUP_LATENCY_MS")?
                .unwrap_or(defaults.lookup),
            send: parse_millis(&lookup, "READER_SEND_LATENCY_MS")?.unwrap_or(defaults.send),
            set_active: defaults.set_active,
        };

        let seed = parse_value::<u64, _>(&lookup, "READER_SEED")?;

        let database_path = lookup("READER_DATABASE_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            simulate_latency,
            latency,
            seed,
            database_path,
        })
    }

    /// Generator settings derived from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed,
            ..GeneratorConfig::default()
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(DirectoryError::Configuration(format!(
            "{} must be a boolean, got {:?}",
            key, raw
        ))),
    }
}

fn parse_value<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                DirectoryError::Configuration(format!("{} has invalid value {:?}", key, raw))
            })
        })
        .transpose()
}

fn parse_millis<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_value::<u64, _>(lookup, key)?.map(Duration::from_millis))
}
