//! Response body content negotiation.
//!
//! The decision is made once per request from `Accept-Encoding` and covers
//! the whole body.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Encoding applied to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    #[default]
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Picks gzip if the literal `gzip` appears anywhere in the header value.
    ///
    /// This is a substring match, not a token match, so `x-gzip` also
    /// selects gzip.
    ///
    /// # Example
    ///
    /// ```
    /// # use wicket::http::encoding::ContentEncoding;
    /// assert_eq!(ContentEncoding::negotiate(Some("deflate, gzip")), ContentEncoding::Gzip);
    /// assert_eq!(ContentEncoding::negotiate(Some("br")), ContentEncoding::Identity);
    /// assert_eq!(ContentEncoding::negotiate(None), ContentEncoding::Identity);
    /// ```
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        match accept_encoding {
            Some(value) if value.contains("gzip") => ContentEncoding::Gzip,
            _ => ContentEncoding::Identity,
        }
    }

    /// Value for the `Content-Encoding` response header, if any.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some("gzip"),
        }
    }

    /// Encodes a complete body.
    pub fn encode(&self, body: Vec<u8>) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Identity => Ok(body),
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(
                    Vec::with_capacity(body.len() / 2 + 32),
                    Compression::default(),
                );
                encoder.write_all(&body)?;
                encoder.finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn gzip_output_decodes_to_input() {
        let encoded = ContentEncoding::Gzip.encode(b"abc".to_vec()).unwrap();
        assert_eq!(&encoded[..2], &[0x1f, 0x8b]);

        let mut decoded = Vec::new();
        GzDecoder::new(&encoded[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"abc");
    }

    #[test]
    fn identity_passes_body_through() {
        let body = ContentEncoding::Identity.encode(b"abc".to_vec()).unwrap();
        assert_eq!(body, b"abc");
    }

    #[test]
    fn substring_match_is_preserved() {
        assert_eq!(
            ContentEncoding::negotiate(Some("x-gzip-but-not-quite")),
            ContentEncoding::Gzip
        );
    }
}
