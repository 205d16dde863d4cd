use std::collections::HashMap;
use thiserror::Error;

/// Well-known field names, stored lower-case like every other key.
pub const CONTENT_LENGTH: &str = "content-length";
pub const CONTENT_TYPE: &str = "content-type";
pub const CONNECTION: &str = "connection";
pub const TRANSFER_ENCODING: &str = "transfer-encoding";
pub const TRAILER: &str = "trailer";

const CRLF: &[u8] = b"\r\n";

/// Errors produced while parsing a header line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Whitespace between the field name and the colon.
    #[error("invalid field name format")]
    InvalidFieldNameFormat,
    /// Field name contains characters outside the HTTP token grammar.
    #[error("invalid field name token")]
    InvalidFieldNameToken,
}

/// Case-insensitive HTTP header collection.
///
/// Field names are lower-cased on insertion. Repeated names are combined into
/// a single `", "`-joined value rather than kept as a list.
///
/// # Example
///
/// ```
/// # use httpwire::http::headers::Headers;
/// let mut headers = Headers::new();
/// headers.set("Accept", "text/html");
/// headers.set("ACCEPT", "text/plain");
/// assert_eq!(headers.get("accept"), Some("text/html, text/plain"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes at most one CRLF-terminated header line from the front of
    /// `data`.
    ///
    /// Returns `(consumed, done)`:
    /// - `(0, false)` when no complete line is available yet,
    /// - `(2, true)` for the empty line ending the header section,
    /// - `(line + CRLF length, false)` after storing one field via [`set`].
    ///
    /// [`set`]: Headers::set
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), HeaderError> {
        let Some(crlf_idx) = find_crlf(data) else {
            // No full line yet
            return Ok((0, false));
        };

        // Bare CRLF terminates the header section
        if crlf_idx == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &data[..crlf_idx];
        let Some(colon_idx) = line.iter().position(|&b| b == b':') else {
            return Ok((0, false));
        };

        let name = &line[..colon_idx];
        if name
            .last()
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            return Err(HeaderError::InvalidFieldNameFormat);
        }

        let name = name.trim_ascii();
        if name.is_empty() || !is_valid_token(name) {
            return Err(HeaderError::InvalidFieldNameToken);
        }

        // Token characters are ASCII, so this cannot fail
        let name = std::str::from_utf8(name).map_err(|_| HeaderError::InvalidFieldNameToken)?;
        let value = String::from_utf8_lossy(line[colon_idx + 1..].trim_ascii());

        self.set(name, &value);

        Ok((crlf_idx + CRLF.len(), false))
    }

    /// Inserts a field, combining with any existing value using `", "`.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.fields.get_mut(&name) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.fields.insert(name, value.to_string());
            }
        }
    }

    /// Replaces a field unconditionally, discarding any existing value.
    pub fn replace(&mut self, name: &str, value: &str) {
        self.fields
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Removes a field if present.
    pub fn remove(&mut self, name: &str) {
        self.fields.remove(&name.to_ascii_lowercase());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Iterates over fields in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|w| w == CRLF)
}

const TOKEN_SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";

fn is_valid_token(data: &[u8]) -> bool {
    data.iter()
        .all(|b| b.is_ascii_alphanumeric() || TOKEN_SYMBOLS.contains(b))
}
