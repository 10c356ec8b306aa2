//! # Handshake
//!
//! ```text
//! slave                               master
//!   |---- protocol version ------------->|
//!   |<--- build fingerprint -------------|
//!   |<--- master options ----------------|
//!   |---- slave options ---------------->|
//! ```
//!
//! The protocol version guards against talking to something that isn't rerep at all,
//! the fingerprint against two different builds of it. Both sides then merge the options
//! the same way, so they end up planning over the same value.

/// Negotiation error
pub mod error;

use super::transport::LineStream;
use error::{NegotiationError, NegotiationResult};
use rerep_lib::{
    core::{Options, Role},
    PROTOCOL_VERSION,
};
use tokio::io::{AsyncRead, AsyncWrite};

/// Build identifier both sides must agree on
pub const FINGERPRINT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION")
);

/// Run the handshake as `role` and return the merged options
pub async fn negotiate<T>(
    role: Role,
    stream: &mut LineStream<T>,
    local: &Options,
) -> NegotiationResult<Options>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let encoded = local.encode().map_err(NegotiationError::ConfigEncodeError)?;

    match role {
        Role::Master => {
            let version = stream.receive_line().await?;
            if version != PROTOCOL_VERSION {
                return Err(NegotiationError::VersionMismatch(version));
            }

            stream.send_line(FINGERPRINT).await?;
            stream.send_line(&encoded).await?;

            let remote = decode(&stream.receive_line().await?)?;
            Ok(Options::merge(local, &remote))
        }
        Role::Slave => {
            stream.send_line(PROTOCOL_VERSION).await?;

            let fingerprint = stream.receive_line().await?;
            if fingerprint != FINGERPRINT {
                return Err(NegotiationError::StrictVersionMismatch(fingerprint));
            }

            let remote = decode(&stream.receive_line().await?)?;
            stream.send_line(&encoded).await?;

            Ok(Options::merge(&remote, local))
        }
    }
}

fn decode(line: &str) -> NegotiationResult<Options> {
    let options = Options::decode(line).map_err(NegotiationError::ConfigDecodeError)?;
    debug!("Remote options: {:?}", options);
    Ok(options)
}
