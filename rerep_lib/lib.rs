#![allow(clippy::module_name_repetitions)]

extern crate thiserror;

/// Core components
pub mod core;

/// Line protocol version, sent by the slave before anything else
pub const PROTOCOL_VERSION: &str = "MySQL rereplicator v2.1";
