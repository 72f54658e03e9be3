//! Configuration for the links services
use crate::models::LinkAddress;
use crate::services::LinksError;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable selecting the match order (`store` or `lowest-id`)
pub const MATCH_ORDER_ENV: &str = "LINKS_MATCH_ORDER";

/// Environment variable overriding the first temporary id
pub const TEMP_ID_START_ENV: &str = "LINKS_TEMP_ID_START";

/// Which matching link update and delete act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchOrder {
    /// First match in the order the store returned links
    #[default]
    Store,
    /// Match with the smallest id
    LowestId,
}

impl std::str::FromStr for MatchOrder {
    type Err = LinksError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "store" => Ok(MatchOrder::Store),
            "lowest-id" => Ok(MatchOrder::LowestId),
            other => Err(LinksError::invalid_config(format!(
                "unknown match order '{}', expected 'store' or 'lowest-id'",
                other
            ))),
        }
    }
}

/// Configuration for `LinksService` and `RecursiveLinks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Selection policy when several links match an update/delete restriction
    pub match_order: MatchOrder,

    /// First value handed out by `TempIds`
    ///
    /// Starts high so temporary ids do not collide with user addresses.
    pub temp_id_start: LinkAddress,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            match_order: MatchOrder::Store,
            temp_id_start: 1_000_000,
        }
    }
}

impl LinksConfig {
    /// Build from `LINKS_MATCH_ORDER` and `LINKS_TEMP_ID_START`, defaulting
    /// anything unset.
    pub fn from_env() -> Result<Self, LinksError> {
        let mut config = Self::default();

        if let Ok(order) = env::var(MATCH_ORDER_ENV) {
            config.match_order = order.parse()?;
        }

        if let Ok(start) = env::var(TEMP_ID_START_ENV) {
            config.temp_id_start = start.trim().parse().map_err(|_| {
                LinksError::invalid_config(format!(
                    "{} must be a positive integer, got '{}'",
                    TEMP_ID_START_ENV, start
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), LinksError> {
        if self.temp_id_start <= 0 {
            return Err(LinksError::invalid_config(
                "temp_id_start must be greater than 0 (0 is the wildcard)",
            ));
        }

        Ok(())
    }
}
