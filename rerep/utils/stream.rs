use bytes::BytesMut;
use std::{
    io::{Cursor, Error, Read},
    pin::Pin,
    task::{Context, Poll},
};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// In-memory stream with scripted peer output
///
/// Everything written to the stream is kept in `input`, reads are served from `output`
/// until it runs out, which looks like a closed connection.
#[derive(Default)]
pub struct TestStream {
    input: BytesMut,
    output: Cursor<BytesMut>,
}

impl TestStream {
    /// Stream that yields `lines` and then closes
    pub fn with_lines(lines: &[&str]) -> Self {
        let mut buf = BytesMut::new();

        for line in lines {
            buf.extend_from_slice(line.as_bytes());
            buf.extend_from_slice(b"\n");
        }

        TestStream {
            input: BytesMut::new(),
            output: Cursor::new(buf),
        }
    }

    pub fn input(&self) -> &[u8] {
        &*self.input
    }

    /// Written data, split into lines
    pub fn input_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.input)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl AsyncWrite for TestStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, Error>> {
        self.get_mut().input.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Error>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncRead for TestStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let read = self.get_mut().output.read(buf.initialize_unfilled())?;
        buf.advance(read);
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::TestStream;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_input() {
        let mut stream = TestStream::default();
        stream.write_all(b"Hello, world").await.unwrap();
        assert_eq!(stream.input(), b"Hello, world");
    }

    #[tokio::test]
    async fn test_lines() {
        let mut stream = TestStream::with_lines(&["a", "", "b"]);
        let mut buf = String::new();
        stream.read_to_string(&mut buf).await.unwrap();
        assert_eq!(buf, "a\n\nb\n");

        stream.write_all(b"x\ny\n").await.unwrap();
        assert_eq!(stream.input_lines(), vec!["x", "y"]);
    }
}
