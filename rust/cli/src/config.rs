//! Table configuration as seen by the CLI.
//!
//! Values are resolved in three layers: built-in defaults, then the TOML file
//! named by `HOLDEM_CONFIG`, then the `HOLDEM_*` environment overrides.
//! Command-line flags are applied on top by the individual commands.

use std::fs;
use std::str::FromStr;

use holdem_engine::config::TableConfig;
use holdem_engine::errors::ConfigError;
use holdem_engine::rebuy::RebuyPolicy;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const BUYIN_ENV: &str = "HOLDEM_BUYIN";
pub const SEATS_ENV: &str = "HOLDEM_SEATS";
pub const REBUY_CAP_ENV: &str = "HOLDEM_REBUY_CAP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub buyin: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seats: ValueSource,
    pub rebuy_cap: ValueSource,
    pub seed: ValueSource,
    pub rebuy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            buyin: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seats: ValueSource::Default,
            rebuy_cap: ValueSource::Default,
            seed: ValueSource::Default,
            rebuy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub table: TableConfig,
    pub sources: ConfigSources,
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = TableConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.buyin {
            cfg.buyin = v;
            sources.buyin = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.rebuy_cap {
            cfg.rebuy_cap = v;
            sources.rebuy_cap = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.rebuy {
            cfg.rebuy = v;
            sources.rebuy = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(SEED_ENV)? {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    if let Some(buyin) = env_value(BUYIN_ENV)? {
        cfg.buyin = buyin;
        sources.buyin = ValueSource::Env;
    }
    if let Some(seats) = env_value(SEATS_ENV)? {
        cfg.seats = seats;
        sources.seats = ValueSource::Env;
    }
    if let Some(cap) = env_value(REBUY_CAP_ENV)? {
        cfg.rebuy_cap = cap;
        sources.rebuy_cap = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        table: cfg,
        sources,
    })
}

/// Reads an override, treating an empty variable as unset.
fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, v))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    buyin: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    rebuy_cap: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    rebuy: Option<RebuyPolicy>,
}
