use serde::{Deserialize, Serialize};

fn default_service() -> String {
    String::from("mysql")
}

fn default_program() -> String {
    String::from("rsync")
}

fn default_remote_user() -> String {
    String::from("root")
}

/// MySQL service control
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ServiceConfig {
    /// Name passed to `service <name> start|stop`
    #[serde(default = "default_service")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            name: default_service(),
        }
    }
}

/// Data directory sync
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SyncConfig {
    /// rsync executable
    #[serde(default = "default_program")]
    pub program: String,

    /// SSH user on the slave host
    #[serde(default = "default_remote_user")]
    pub remote_user: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            program: default_program(),
            remote_user: default_remote_user(),
        }
    }
}
