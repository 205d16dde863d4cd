use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::buffer::ReadBuffer;
use crate::http::headers::{HeaderError, Headers};
use crate::http::request::{Method, Request, RequestLine};

const CRLF: &[u8] = b"\r\n";
const VERSION_PREFIX: &str = "HTTP/";
const SUPPORTED_VERSIONS: &[&str] = &["1.1"];

#[derive(Debug, Error)]
pub enum RequestError {
    /// Request line is not three single-space-separated fields.
    #[error("request line malformed")]
    RequestLineMalformed,
    /// Method is outside the supported allow-list.
    #[error("http method not supported")]
    MethodNotSupported,
    /// Version is anything other than HTTP/1.1.
    #[error("http version not supported")]
    VersionNotSupported,
    /// The stream ended before a complete request was parsed.
    #[error("incomplete request, more data needed")]
    IncompleteRequest,
    /// `parse` was called again after the parser reached its terminal state.
    #[error("request already fully parsed")]
    AlreadyParsed,
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where the parser is in the request grammar. Transitions are forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for a complete request line
    RequestLine,
    /// Request line parsed; consuming header lines
    Headers,
    /// Terminal; the request is complete
    Done,
}

/// Incremental, resumable HTTP/1.1 request parser.
///
/// Feed it whatever bytes have arrived; it consumes as much as the grammar
/// allows and reports how many bytes it took, so the caller can shift them
/// out of its buffer and retry once more data shows up. Works regardless of
/// where the stream fragments fall.
#[derive(Debug)]
pub struct RequestParser {
    state: ParserState,
    request_line: Option<RequestLine>,
    headers: Headers,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::RequestLine,
            request_line: None,
            headers: Headers::new(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    /// Advances the parser as far as `data` allows.
    ///
    /// Returns the number of bytes consumed; the caller must discard exactly
    /// that prefix before the next call. Zero consumed means more data is
    /// needed. Calling this after [`is_done`] fails with
    /// [`RequestError::AlreadyParsed`].
    ///
    /// [`is_done`]: RequestParser::is_done
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, RequestError> {
        if self.state == ParserState::Done {
            return Err(RequestError::AlreadyParsed);
        }

        let mut total = 0;
        while self.state != ParserState::Done {
            let n = self.parse_single(&data[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }

        Ok(total)
    }

    fn parse_single(&mut self, data: &[u8]) -> Result<usize, RequestError> {
        match self.state {
            ParserState::RequestLine => {
                let Some((request_line, consumed)) = parse_request_line(data)? else {
                    return Ok(0);
                };
                self.request_line = Some(request_line);
                self.state = ParserState::Headers;
                Ok(consumed)
            }
            ParserState::Headers => {
                let (consumed, done) = self.headers.parse(data)?;
                if done {
                    self.state = ParserState::Done;
                }
                Ok(consumed)
            }
            ParserState::Done => Err(RequestError::AlreadyParsed),
        }
    }

    /// Finishes parsing, yielding the immutable [`Request`].
    pub fn into_request(self) -> Result<Request, RequestError> {
        if self.state != ParserState::Done {
            return Err(RequestError::IncompleteRequest);
        }

        // Done is unreachable without a parsed request line
        let request_line = self.request_line.ok_or(RequestError::IncompleteRequest)?;

        Ok(Request {
            request_line,
            headers: self.headers,
        })
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads one complete request from `reader`.
///
/// Drives a [`RequestParser`] against a growing [`ReadBuffer`]: read, advance
/// the parser over the unconsumed bytes, compact, repeat. End of stream
/// before the parser finishes fails with [`RequestError::IncompleteRequest`];
/// a truncated request is never handed back as a short success.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut parser = RequestParser::new();
    let mut buffer = ReadBuffer::new();

    while !parser.is_done() {
        buffer.grow_if_full();

        let n = reader.read_buf(buffer.bytes_mut()).await?;
        if n == 0 {
            return Err(RequestError::IncompleteRequest);
        }

        let consumed = parser.parse(buffer.unread())?;
        buffer.consume(consumed);
    }

    parser.into_request()
}

fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, RequestError> {
    let Some(crlf_idx) = data.windows(CRLF.len()).position(|w| w == CRLF) else {
        // Request line still incomplete
        return Ok(None);
    };

    let line =
        std::str::from_utf8(&data[..crlf_idx]).map_err(|_| RequestError::RequestLineMalformed)?;

    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(RequestError::RequestLineMalformed);
    }
    let (method, target, version) = (parts[0], parts[1], parts[2]);

    let method = Method::from_str(method).ok_or(RequestError::MethodNotSupported)?;

    let version = version.strip_prefix(VERSION_PREFIX).unwrap_or(version);
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(RequestError::VersionNotSupported);
    }

    let request_line = RequestLine {
        method,
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((request_line, crlf_idx + CRLF.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let mut parser = RequestParser::new();
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let consumed = parser.parse(req).unwrap();

        assert_eq!(consumed, req.len());
        assert!(parser.is_done());

        let request = parser.into_request().unwrap();
        assert_eq!(request.request_line.target, "/");
        assert_eq!(request.headers.get("host"), Some("example.com"));
    }
}
