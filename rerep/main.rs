#[macro_use]
extern crate log;

/// CLI
mod cli;

/// Configuration
pub mod config;

/// Protocol node: transport, negotiation, execution and operations
mod node;

/// Utilities for easier development
pub mod utils;

use anyhow::Error;
use cli::{Command::*, Server};
use std::env::var;
use structopt::StructOpt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&var("LOG_LEVEL").unwrap_or_else(|_| String::from("info")))
        .init();

    let server = Server::from_args().load_config().await?;

    match server.command() {
        Master(command) => command.dispatch(&server).await?,
        Slave(command) => command.dispatch(&server).await?,
    };

    Ok(())
}
