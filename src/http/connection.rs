use std::future::Future;

use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::warn;

use crate::http::parser::{RequestError, read_request};
use crate::http::request::Request;
use crate::http::response::{StatusCode, default_headers};
use crate::http::writer::ResponseWriter;

/// Per-connection driver.
///
/// Owns both halves of an accepted stream: the read half feeds the request
/// parser, the write half is wrapped in a [`ResponseWriter`] handed to the
/// handler. One request per connection; the socket closes when `run`
/// returns.
pub struct Connection {
    reader: OwnedReadHalf,
    writer: ResponseWriter<OwnedWriteHalf>,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Self {
        let (reader, write_half) = stream.into_split();
        Self {
            reader,
            writer: ResponseWriter::new(write_half),
        }
    }

    /// Reads one request to completion, then invokes `handler` with the
    /// writer and the parsed request.
    ///
    /// A parse failure never reaches the handler; the connection answers
    /// with a best-effort 400 carrying the error text as its body.
    pub async fn run<H, Fut>(mut self, handler: &H) -> anyhow::Result<()>
    where
        H: Fn(ResponseWriter<OwnedWriteHalf>, Request) -> Fut,
        Fut: Future<Output = ()>,
    {
        match read_request(&mut self.reader).await {
            Ok(request) => {
                handler(self.writer, request).await;
                Ok(())
            }
            Err(err) => {
                warn!("Failed to parse request: {}", err);
                self.write_parse_failure(&err).await
            }
        }
    }

    async fn write_parse_failure(mut self, err: &RequestError) -> anyhow::Result<()> {
        let body = err.to_string();

        self.writer
            .write_status_line(StatusCode::BadRequest)
            .await?;
        self.writer
            .write_headers(&default_headers(body.len()))
            .await?;
        self.writer.write_body(body.as_bytes()).await?;

        Ok(())
    }
}
