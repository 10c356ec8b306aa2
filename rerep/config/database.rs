use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_host() -> String {
    String::from("localhost")
}

const fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    String::from("root")
}

/// Connection settings for the local MySQL server
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Administrative user, its password is asked on the master
    #[serde(default = "default_user")]
    pub user: String,

    /// Unix socket path, preferred over TCP when set
    pub socket: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            socket: None,
        }
    }
}
