use crate::node::transport::error::TransportError;
use rerep_lib::core::options::OptionsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NegotiationError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(
        "Version mismatch. Expected {:?}, slave sent {0:?}",
        rerep_lib::PROTOCOL_VERSION
    )]
    VersionMismatch(String),
    #[error(
        "Strict version mismatch. Local build: {:?}, master build: {0:?}",
        super::FINGERPRINT
    )]
    StrictVersionMismatch(String),
    #[error("Unable to encode local options: {0}")]
    ConfigEncodeError(OptionsError),
    #[error("Unable to decode remote options: {0}")]
    ConfigDecodeError(OptionsError),
}

pub type NegotiationResult<T> = Result<T, NegotiationError>;
