use crate::http::request::{Method, Request};
use std::collections::HashMap;

const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// More bytes are needed before the request is complete.
    #[error("request is incomplete")]
    Incomplete,
    /// The request did not fit in the configured buffer limit.
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Parses a complete request out of `buf`.
///
/// Returns the request together with the number of bytes it occupied, or
/// `ParseError::Incomplete` when the blank line has not arrived yet or the
/// body is shorter than its declared Content-Length. A request that cannot
/// fit in `limit` bytes is `ParseError::TooLarge`, reported as soon as the
/// headers reveal it.
pub fn parse_http_request(buf: &[u8], limit: usize) -> Result<(Request, usize), ParseError> {
    let Some(headers_end) = find_headers_end(buf) else {
        if buf.len() >= limit {
            return Err(ParseError::TooLarge { limit });
        }
        return Err(ParseError::Incomplete);
    };
    let body_start = headers_end + HEADERS_END.len();

    let headers = parse_headers(&buf[..headers_end]);
    let content_length = declared_length(&headers);
    let consumed = body_start.saturating_add(content_length);

    if consumed > limit {
        return Err(ParseError::TooLarge { limit });
    }

    if buf.len() < consumed {
        return Err(ParseError::Incomplete);
    }

    Ok((parse_request(&buf[..consumed]), consumed))
}

/// Parses whatever is in `buf` without ever failing.
///
/// A request line that does not start with `GET ` or `POST `, or that has no
/// space after the path, yields an empty path. The body is whatever follows
/// the blank line, capped at the declared Content-Length.
pub fn parse_request(buf: &[u8]) -> Request {
    let (head, body_bytes) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + HEADERS_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    let line_end = find_line_end(head).unwrap_or(head.len());
    let (method, path) = parse_request_line(&head[..line_end]);

    let headers = parse_headers(head);
    let content_length = declared_length(&headers);
    let body = body_bytes[..content_length.min(body_bytes.len())].to_vec();

    Request {
        method,
        path,
        headers,
        body,
    }
}

fn parse_request_line(line: &[u8]) -> (Method, String) {
    let Some((method, prefix_len)) = Method::from_prefix(line) else {
        return (Method::Unrecognized, String::new());
    };

    let rest = &line[prefix_len..];
    let path = match rest.iter().position(|&b| b == b' ') {
        Some(end) if rest.starts_with(b"/") => {
            String::from_utf8_lossy(&rest[..end]).into_owned()
        }
        _ => String::new(),
    };

    (method, path)
}

/// Collects `Name: Value` lines after the request line. Names are
/// lower-cased, values trimmed, later duplicates win.
fn parse_headers(head: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(head);
    let mut headers = HashMap::new();

    for line in text.split("\r\n").skip(1) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().to_string(),
        );
    }

    headers
}

fn declared_length(headers: &HashMap<String, String>) -> usize {
    headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
