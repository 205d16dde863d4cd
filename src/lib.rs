//! httpwire - HTTP/1.1 from raw TCP
//!
//! Core library for parsing HTTP requests and writing HTTP responses over
//! plain byte streams, without an off-the-shelf HTTP stack.

pub mod config;
pub mod http;
pub mod server;
