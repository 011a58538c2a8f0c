use std::collections::HashMap;
use wicket::http::request::{Method, Request, RequestBuilder};

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("host".to_string(), "example.com".to_string());
    headers.insert("content-type".to_string(), "application/json".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        headers,
        body: vec![],
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .header("Content-Length", "42")
        .build();

    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_request_content_length_missing() {
    let req = RequestBuilder::new().build();

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_content_length_invalid() {
    let req = RequestBuilder::new()
        .header("Content-Length", "not-a-number")
        .build();

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_content_length_negative() {
    let req = RequestBuilder::new()
        .header("Content-Length", "-3")
        .build();

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_builder_body_sets_content_length() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/x")
        .body("hello")
        .build();

    assert_eq!(req.body, b"hello".to_vec());
    assert_eq!(req.content_length(), 5);
}

#[test]
fn test_method_from_prefix() {
    assert_eq!(Method::from_prefix(b"GET /"), Some((Method::GET, 4)));
    assert_eq!(Method::from_prefix(b"POST /"), Some((Method::POST, 5)));
    assert_eq!(Method::from_prefix(b"GETX /"), None);
    assert_eq!(Method::from_prefix(b"PATCH /"), None);
}
