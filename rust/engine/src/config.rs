use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::rebuy::RebuyPolicy;
use crate::Chips;

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

/// Stakes and seating for one table.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes:
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::from_toml_str("buyin = 500\nbig_blind = 10\nsmall_blind = 5\n").unwrap();
/// assert_eq!(cfg.buyin, 500);
/// assert_eq!(cfg.seats, 6);
/// assert_eq!(cfg.rebuy_cap_chips(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Chips every seat starts with.
    pub buyin: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub seats: usize,
    /// Rebuys may top a stack up to `rebuy_cap * buyin`.
    pub rebuy_cap: u32,
    /// Deck seed; a fixed seed is used when absent.
    pub seed: Option<u64>,
    pub rebuy: RebuyPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            buyin: 100,
            small_blind: 1,
            big_blind: 2,
            seats: 6,
            rebuy_cap: 1,
            seed: None,
            rebuy: RebuyPolicy::default(),
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buyin == 0 {
            return Err(ConfigError::Invalid("buyin must be >0".into()));
        }
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be >0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind ({}) must not exceed big_blind ({})",
                self.small_blind, self.big_blind
            )));
        }
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(ConfigError::Invalid(format!(
                "seats must be in {}..={}, got {}",
                MIN_SEATS, MAX_SEATS, self.seats
            )));
        }
        if self.rebuy_cap == 0 {
            return Err(ConfigError::Invalid("rebuy_cap must be >=1".into()));
        }
        // every seat topped up to the cap must still fit in one chip count
        let table_cap = Chips::try_from(self.seats)
            .ok()
            .and_then(|seats| self.buyin.checked_mul(self.rebuy_cap)?.checked_mul(seats));
        if table_cap.is_none() {
            return Err(ConfigError::Invalid(format!(
                "buyin * rebuy_cap * seats must not exceed {} chips",
                Chips::MAX
            )));
        }
        Ok(())
    }

    /// Highest balance a rebuy may reach.
    pub fn rebuy_cap_chips(&self) -> Chips {
        self.buyin.saturating_mul(self.rebuy_cap)
    }
}
