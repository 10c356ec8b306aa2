/// Transport error
pub mod error;

use error::{TransportError, TransportResult};
use futures_util::{SinkExt, StreamExt};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{TcpListener, TcpStream},
};
use tokio_util::codec::{Decoder, Framed, LinesCodec};

/// Longest line either side is expected to send
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Newline-delimited text stream between master and slave
pub struct LineStream<T>(Framed<T, LinesCodec>);

impl<T> LineStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: T) -> Self {
        LineStream(LinesCodec::new_with_max_length(MAX_LINE_LENGTH).framed(io))
    }

    /// Write `line` followed by a newline and flush it
    pub async fn send_line(&mut self, line: &str) -> TransportResult<()> {
        self.0.send(line).await.map_err(TransportError::Codec)
    }

    /// Wait for the next full line, without its newline
    pub async fn receive_line(&mut self) -> TransportResult<String> {
        match self.0.next().await {
            Some(line) => line.map_err(TransportError::Codec),
            None => Err(TransportError::ConnectionClosed),
        }
    }

    pub async fn close(mut self) -> TransportResult<()> {
        SinkExt::<&str>::close(&mut self.0)
            .await
            .map_err(TransportError::Codec)
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &T {
        self.0.get_ref()
    }
}

/// Wait for exactly one slave to connect
pub async fn listen(port: u16) -> TransportResult<(LineStream<TcpStream>, SocketAddr)> {
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .map_err(|source| TransportError::Bind { port, source })?;

    info!("Waiting for rerep slave to connect...");

    let (stream, _) = listener.accept().await.map_err(TransportError::Accept)?;

    // No second slave may connect
    drop(listener);

    let peer = stream.peer_addr().map_err(TransportError::PeerAddress)?;

    Ok((LineStream::new(stream), peer))
}

/// Connect to the master
pub async fn connect(host: &str, port: u16) -> TransportResult<(LineStream<TcpStream>, SocketAddr)> {
    debug!("Connecting to {}:{}", host, port);

    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| TransportError::Connect {
            host: host.to_owned(),
            source,
        })?;

    let peer = stream.peer_addr().map_err(TransportError::PeerAddress)?;

    Ok((LineStream::new(stream), peer))
}
