/// CLI commands
mod commands;

use crate::config::{Config, ConfigError};
use commands::{flags::Flags, master::MasterCommand, slave::SlaveCommand};
use std::path::PathBuf;
use structopt::StructOpt;
use tokio::fs::read_to_string;

/// Protocol side to run
#[derive(StructOpt)]
pub enum Command {
    #[structopt(about = "Run on the host holding the data")]
    Master(MasterCommand),
    #[structopt(about = "Run on the host that becomes the replica")]
    Slave(SlaveCommand),
}

/// MySQL rereplicator
#[derive(StructOpt)]
#[structopt(name = "rerep")]
pub struct Server {
    /// Local configuration path
    #[structopt(default_value = "Rerep.toml", long)]
    config: PathBuf,

    #[structopt(flatten)]
    flags: Flags,

    /// Loaded local configuration
    #[structopt(skip)]
    loaded_config: Config,

    #[structopt(subcommand)]
    command: Command,
}

impl Server {
    /// Load configuration, keeping defaults if there is no file
    pub async fn load_config(mut self) -> Result<Self, ConfigError> {
        match read_to_string(self.config.as_path()).await {
            Ok(file) => self.loaded_config = toml::from_str(&file)?,
            Err(e) => info!("Unable to load configuration file, using defaults: {}", e),
        };

        Ok(self)
    }

    pub fn config(&self) -> &Config {
        &self.loaded_config
    }

    /// Protocol flags given before the subcommand
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}
