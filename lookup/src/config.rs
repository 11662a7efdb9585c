use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::queue::Priority;

/// Settings for the lookup service. Read once at start-up and passed down
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupConfig {
    /// Fetch tasks allowed to run at the same time
    #[serde(default = "default_max_concurrent_tasks")]
    pub max_concurrent_tasks: usize,

    /// Priority for lookups that do not ask for one
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
}

pub fn default_max_concurrent_tasks() -> usize {
    10
}

pub fn default_priority() -> Priority {
    0
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            max_concurrent_tasks: default_max_concurrent_tasks(),
            default_priority: default_priority(),
        }
    }
}

impl LookupConfig {
    /// Environment variables:
    /// - `LOOKUP_MAX_CONCURRENT_TASKS` (default: 10)
    /// - `LOOKUP_DEFAULT_PRIORITY` (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("LOOKUP"))
            .build()?
            .try_deserialize()
    }
}
