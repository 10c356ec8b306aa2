use std::io::Error as IoError;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Unable to listen on port {port}: {source}")]
    Bind { port: u16, source: IoError },
    #[error("Unable to accept TCP connection: {0}")]
    Accept(IoError),
    #[error("Unable to connect to {host}: {source}")]
    Connect { host: String, source: IoError },
    #[error("Unable to get peer address: {0}")]
    PeerAddress(IoError),
    #[error("Socket codec error: {0}")]
    Codec(#[from] LinesCodecError),
    #[error("Connection closed by remote")]
    ConnectionClosed,
}

pub type TransportResult<T> = Result<T, TransportError>;
