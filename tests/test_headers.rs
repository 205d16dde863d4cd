use httpwire::http::headers::{HeaderError, Headers};

#[test]
fn test_parse_single_header_line() {
    let mut headers = Headers::new();
    let data = b"Host: localhost:42069\r\n\r\n";

    let (consumed, done) = headers.parse(data).unwrap();

    assert_eq!(consumed, b"Host: localhost:42069\r\n".len());
    assert!(!done);
    assert_eq!(headers.get("host"), Some("localhost:42069"));
}

#[test]
fn test_parse_lowercases_field_name() {
    let mut headers = Headers::new();
    headers.parse(b"Content-TYPE: text/html\r\n").unwrap();

    assert_eq!(headers.get("content-type"), Some("text/html"));
}

#[test]
fn test_parse_trims_value_whitespace() {
    let mut headers = Headers::new();
    headers.parse(b"Accept:   text/plain  \r\n").unwrap();

    assert_eq!(headers.get("accept"), Some("text/plain"));
}

#[test]
fn test_parse_terminator_line() {
    let mut headers = Headers::new();

    let (consumed, done) = headers.parse(b"\r\nleftover").unwrap();

    assert_eq!(consumed, 2);
    assert!(done);
    assert!(headers.is_empty());
}

#[test]
fn test_parse_needs_more_data_without_crlf() {
    let mut headers = Headers::new();

    let (consumed, done) = headers.parse(b"Host: local").unwrap();

    assert_eq!(consumed, 0);
    assert!(!done);
    assert!(headers.is_empty());
}

#[test]
fn test_parse_line_without_colon_waits_for_more_data() {
    let mut headers = Headers::new();

    let (consumed, done) = headers.parse(b"not-a-header\r\n").unwrap();

    assert_eq!(consumed, 0);
    assert!(!done);
}

#[test]
fn test_parse_whitespace_before_colon_rejected() {
    let mut headers = Headers::new();

    let result = headers.parse(b" Foo :bar\r\n");

    assert!(matches!(result, Err(HeaderError::InvalidFieldNameFormat)));
}

#[test]
fn test_parse_invalid_token_character_rejected() {
    let mut headers = Headers::new();

    let result = headers.parse(b"H@st: localhost\r\n");

    assert!(matches!(result, Err(HeaderError::InvalidFieldNameToken)));
}

#[test]
fn test_parse_empty_field_name_rejected() {
    let mut headers = Headers::new();

    let result = headers.parse(b": value\r\n");

    assert!(matches!(result, Err(HeaderError::InvalidFieldNameToken)));
}

#[test]
fn test_parse_token_symbols_accepted() {
    let mut headers = Headers::new();

    headers.parse(b"X-Custom.Header_1: yes\r\n").unwrap();

    assert_eq!(headers.get("x-custom.header_1"), Some("yes"));
}

#[test]
fn test_parse_repeated_header_combines_values() {
    let mut headers = Headers::new();

    headers.parse(b"Set-Person: lane\r\n").unwrap();
    headers.parse(b"Set-Person: prime\r\n").unwrap();

    assert_eq!(headers.get("set-person"), Some("lane, prime"));
}

#[test]
fn test_set_combines_with_comma_space() {
    let mut headers = Headers::new();

    headers.set("Accept", "text/html");
    headers.set("accept", "text/plain");

    assert_eq!(headers.get("ACCEPT"), Some("text/html, text/plain"));
}

#[test]
fn test_get_is_case_insensitive() {
    let mut headers = Headers::new();
    headers.set("Content-Length", "42");

    assert_eq!(headers.get("content-length"), Some("42"));
    assert_eq!(headers.get("CONTENT-LENGTH"), Some("42"));
    assert_eq!(headers.get("Content-Length"), Some("42"));
    assert_eq!(headers.get("missing"), None);
}

#[test]
fn test_replace_discards_existing_value() {
    let mut headers = Headers::new();

    headers.set("Transfer-Encoding", "identity");
    headers.replace("transfer-encoding", "chunked");

    assert_eq!(headers.get("transfer-encoding"), Some("chunked"));
}

#[test]
fn test_remove_is_quiet_when_absent() {
    let mut headers = Headers::new();
    headers.set("Content-Length", "10");

    headers.remove("CONTENT-length");
    headers.remove("never-there");

    assert_eq!(headers.get("content-length"), None);
    assert!(headers.is_empty());
}

#[test]
fn test_parse_full_header_section() {
    let mut headers = Headers::new();
    let mut data: &[u8] = b"Host: x\r\nUser-Agent: curl\r\nAccept: */*\r\n\r\n";

    loop {
        let (consumed, done) = headers.parse(data).unwrap();
        data = &data[consumed..];
        if done {
            break;
        }
    }

    assert!(data.is_empty());
    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("host"), Some("x"));
    assert_eq!(headers.get("user-agent"), Some("curl"));
    assert_eq!(headers.get("accept"), Some("*/*"));
}
