use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const CRLF: &[u8] = b"\r\n";
const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error)]
pub enum WriterError {
    /// Operation called out of wire order (e.g. body before headers).
    #[error("response writer in invalid state")]
    InvalidState,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which part of the response may be written next. Transitions are
/// forward-only and mirror the wire grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Nothing written yet; a status line must come first
    StatusLine,
    /// Status line written; header section must come next
    Headers,
    /// Header section terminated; body or chunked body may be written
    Body,
    /// Chunk stream terminated; only trailers remain
    Trailers,
}

/// Stateful HTTP/1.1 response writer.
///
/// Enforces status-line → headers → body → trailers ordering. Every
/// operation verifies the state before touching the sink, so an
/// out-of-sequence call fails with [`WriterError::InvalidState`] and leaves
/// the stream exactly as it was.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    sink: W,
    state: WriterState,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: WriterState::StatusLine,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Emits `HTTP/1.1 <code> <reason>\r\n` and advances to the header
    /// section.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriterError> {
        self.expect_state(WriterState::StatusLine)?;

        let line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.sink.write_all(line.as_bytes()).await?;

        self.state = WriterState::Headers;
        Ok(())
    }

    /// Emits each field as `<name>: <value>\r\n` in no particular order,
    /// then the blank line ending the header section.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriterError> {
        self.expect_state(WriterState::Headers)?;

        let mut section = Vec::new();
        for (name, value) in headers.iter() {
            section.extend_from_slice(name.as_bytes());
            section.extend_from_slice(b": ");
            section.extend_from_slice(value.as_bytes());
            section.extend_from_slice(CRLF);
        }
        section.extend_from_slice(CRLF);
        self.sink.write_all(&section).await?;

        self.state = WriterState::Body;
        Ok(())
    }

    /// Writes raw body bytes verbatim. Repeatable; the caller frames the
    /// body via content-length.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, WriterError> {
        self.expect_state(WriterState::Body)?;

        self.sink.write_all(body).await?;
        Ok(body.len())
    }

    /// Writes one chunk as `<hex-length>\r\n<bytes>\r\n`. One call per
    /// chunk; finish the stream with [`write_chunked_body_done`].
    ///
    /// [`write_chunked_body_done`]: ResponseWriter::write_chunked_body_done
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> Result<usize, WriterError> {
        self.expect_state(WriterState::Body)?;

        let mut framed = format!("{:x}\r\n", chunk.len()).into_bytes();
        framed.extend_from_slice(chunk);
        framed.extend_from_slice(CRLF);
        self.sink.write_all(&framed).await?;

        Ok(framed.len())
    }

    /// Terminates the chunk stream with the zero-length chunk `0\r\n` and
    /// advances to the trailer section.
    pub async fn write_chunked_body_done(&mut self) -> Result<usize, WriterError> {
        self.expect_state(WriterState::Body)?;

        let done = b"0\r\n";
        self.sink.write_all(done).await?;

        self.state = WriterState::Trailers;
        Ok(done.len())
    }

    /// Emits the trailer fields followed by the blank line ending the
    /// response. Only legal after [`write_chunked_body_done`].
    ///
    /// [`write_chunked_body_done`]: ResponseWriter::write_chunked_body_done
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), WriterError> {
        self.expect_state(WriterState::Trailers)?;

        let mut section = Vec::new();
        for (name, value) in trailers.iter() {
            section.extend_from_slice(name.as_bytes());
            section.extend_from_slice(b": ");
            section.extend_from_slice(value.as_bytes());
            section.extend_from_slice(CRLF);
        }
        section.extend_from_slice(CRLF);
        self.sink.write_all(&section).await?;

        Ok(())
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn expect_state(&self, expected: WriterState) -> Result<(), WriterError> {
        if self.state != expected {
            return Err(WriterError::InvalidState);
        }
        Ok(())
    }
}
