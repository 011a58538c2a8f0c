use std::collections::HashMap;

/// HTTP request methods.
///
/// The server only acts on GET and POST. Everything else is carried as
/// `Unrecognized` and ends up at the not-found handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other method, or a request line that could not be read
    Unrecognized,
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are stored lower-cased; values keep their original casing.
/// `path` is empty when the request line did not match `GET <path> ` or
/// `POST <path> `.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request path (e.g. "/echo/abc"), or empty if the line was malformed
    pub path: String,
    /// Request headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Request body, limited to the declared Content-Length
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Matches the method prefix at the start of a request line.
    ///
    /// Returns the method and the length of the prefix including the
    /// trailing space, or `None` if the line starts with anything else.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::request::Method;
    /// assert_eq!(Method::from_prefix(b"GET / HTTP/1.1"), Some((Method::GET, 4)));
    /// assert_eq!(Method::from_prefix(b"get / HTTP/1.1"), None);
    /// ```
    pub fn from_prefix(line: &[u8]) -> Option<(Self, usize)> {
        if line.starts_with(b"GET ") {
            Some((Method::GET, 4))
        } else if line.starts_with(b"POST ") {
            Some((Method::POST, 5))
        } else {
            None
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the body and a matching Content-Length header.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self.headers
            .insert("content-length".to_string(), self.body.len().to_string());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::request::RequestBuilder;
    /// let req = RequestBuilder::new().header("User-Agent", "curl/8.0").build();
    /// assert_eq!(req.header("user-agent"), Some("curl/8.0"));
    /// assert_eq!(req.header("USER-AGENT"), Some("curl/8.0"));
    /// ```
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
