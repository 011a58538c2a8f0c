use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::{ParseError, parse_http_request, parse_request};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::routes::FileStore;
use crate::routes::handlers;

const READ_CHUNK: usize = 1024;

/// Handles exactly one request on one stream, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    files: Option<FileStore>,
    max_request_bytes: usize,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What came out of the read phase.
pub enum ReadOutcome {
    Complete(Request),
    TooLarge,
    /// The peer closed without sending anything.
    Eof,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: Option<FileStore>, max_request_bytes: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK.min(max_request_bytes)),
            state: ConnectionState::Reading,
            files,
            max_request_bytes,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Complete(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    ReadOutcome::TooLarge => {
                        tracing::warn!(limit = self.max_request_bytes, "Request too large");
                        let response = Response::empty(StatusCode::PayloadTooLarge);
                        self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                    }
                    ReadOutcome::Eof => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = handlers::handle(req, self.files.as_ref()).await;

                    tracing::info!(
                        method = ?req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        bytes = response.body.len(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // One request per connection.
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a full request is buffered, the limit is hit, or the peer
    /// stops sending.
    ///
    /// A peer that half-closes mid-request still gets an answer: whatever
    /// arrived is parsed leniently.
    pub async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            match parse_http_request(&self.buffer, self.max_request_bytes) {
                Ok((request, _consumed)) => return Ok(ReadOutcome::Complete(request)),
                Err(ParseError::Incomplete) => {}
                Err(ParseError::TooLarge { .. }) => return Ok(ReadOutcome::TooLarge),
            }

            // The parser reports TooLarge once the buffer reaches the limit,
            // so there is always room here.
            let room = self.max_request_bytes - self.buffer.len();
            let mut temp = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut temp[..room.min(READ_CHUNK)]).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Eof);
                }
                tracing::debug!(
                    buffered = self.buffer.len(),
                    "Peer stopped sending before request was complete"
                );
                return Ok(ReadOutcome::Complete(parse_request(&self.buffer)));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
