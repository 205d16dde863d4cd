//! HTTP/1.1 protocol engine over raw byte streams.
//!
//! This module implements the wire-level pieces of an HTTP/1.1 endpoint:
//! an incremental request parser, a stateful response writer, and the
//! header collection both share.
//!
//! # Architecture
//!
//! - **`headers`**: Case-insensitive header collection with token validation
//!   and one-line-at-a-time parsing
//! - **`buffer`**: Growable read buffer with consumed-prefix compaction
//! - **`request`**: Request, request line, and method types
//! - **`parser`**: Resumable request parser state machine and read loop
//! - **`response`**: Status codes and default response headers
//! - **`writer`**: Ordered response writer with chunked encoding and trailers
//! - **`connection`**: Per-connection driver gluing parser and writer together
//!
//! # Parser State Machine
//!
//! The parser advances over whatever bytes have arrived, regardless of how
//! the stream fragments:
//!
//! ```text
//!        ┌──────────────┐
//!        │ RequestLine  │ ← Scan for the first CRLF
//!        └──────┬───────┘
//!               │ Method, target, version validated
//!               ▼
//!        ┌──────────────┐
//!        │   Headers    │ ← One header line per step
//!        └──────┬───────┘
//!               │ Blank line
//!               ▼
//!        ┌──────────────┐
//!        │     Done     │ ← Terminal; further parsing is an error
//!        └──────────────┘
//! ```
//!
//! # Writer State Machine
//!
//! The writer refuses any operation that would put wire syntax out of
//! order:
//!
//! ```text
//!   StatusLine ──► Headers ──► Body ──► Trailers
//!                              │  ▲
//!                              └──┘ write_body / write_chunked_body repeat
//! ```
//!
//! `write_chunked_body_done` is the only edge from `Body` to `Trailers`;
//! fixed-length responses simply stop in `Body`.

pub mod buffer;
pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
