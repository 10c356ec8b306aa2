/// Local MySQL server config
pub mod database;

/// External commands config
pub mod shell;

use database::DatabaseConfig;
use serde::{Deserialize, Serialize};
use shell::{ServiceConfig, SyncConfig};
use thiserror::Error;

/// Default TCP port the master listens on
const fn default_port() -> u16 {
    4336
}

/// Default amount of seconds to wait for the slave to catch up
const fn default_catch_up_timeout() -> u64 {
    300
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Local configuration
///
/// Host specific settings, never sent to the other side.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Protocol TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Amount of seconds to wait for the slave to catch up
    #[serde(default = "default_catch_up_timeout")]
    pub catch_up_timeout: u64,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            catch_up_timeout: default_catch_up_timeout(),
            database: DatabaseConfig::default(),
            service: ServiceConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}
