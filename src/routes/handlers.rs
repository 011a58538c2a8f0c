//! Route handlers.
//!
//! Every handler ends in a `Response`; failures are translated to a status
//! here and never leave the connection that caused them.

use crate::http::encoding::ContentEncoding;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routes::files::{FileError, FileStore};
use crate::routes::router::Route;

const TEXT_PLAIN: &str = "text/plain";
const OCTET_STREAM: &str = "application/octet-stream";

/// Routes `request` and runs the matching handler.
pub async fn handle(request: &Request, files: Option<&FileStore>) -> Response {
    let route = Route::resolve(request, files.is_some());
    let encoding = ContentEncoding::negotiate(request.header("accept-encoding"));

    tracing::debug!(
        route = route.name(),
        method = ?request.method,
        path = %request.path,
        encoding = ?encoding,
        "Dispatching request"
    );

    match (route, files) {
        (Route::Root, _) => Response::empty(StatusCode::Ok),
        (Route::Echo(value), _) => echo(value, encoding),
        (Route::UserAgent, _) => user_agent(request, encoding),
        (Route::FileGet(name), Some(files)) => file_get(files, name, encoding).await,
        (Route::FilePost { name, body }, Some(files)) => {
            file_post(files, name, body, request.content_length()).await
        }
        _ => Response::not_found(),
    }
}

pub fn echo(value: &str, encoding: ContentEncoding) -> Response {
    with_body(StatusCode::Ok, TEXT_PLAIN, value.as_bytes().to_vec(), encoding)
}

/// Reflects the `User-Agent` header, or an empty body if it was not sent.
pub fn user_agent(request: &Request, encoding: ContentEncoding) -> Response {
    let agent = request.header("user-agent").unwrap_or_default();
    with_body(StatusCode::Ok, TEXT_PLAIN, agent.as_bytes().to_vec(), encoding)
}

pub async fn file_get(files: &FileStore, name: &str, encoding: ContentEncoding) -> Response {
    match files.read(name).await {
        Ok(contents) => with_body(StatusCode::Ok, OCTET_STREAM, contents, encoding),
        Err(FileError::NotFound) => Response::not_found(),
        Err(e) => {
            tracing::debug!(file = name, error = %e, "File not readable");
            Response::not_found()
        }
    }
}

/// Stores an uploaded body. A request that declared no body is refused
/// before anything touches the disk.
pub async fn file_post(
    files: &FileStore,
    name: &str,
    body: &[u8],
    declared_length: usize,
) -> Response {
    if declared_length == 0 {
        return Response::empty(StatusCode::BadRequest);
    }

    match files.write(name, body).await {
        Ok(()) => {
            tracing::info!(file = name, bytes = body.len(), "File written");
            Response::empty(StatusCode::Created)
        }
        Err(FileError::InvalidName(_)) => Response::empty(StatusCode::BadRequest),
        Err(e) => {
            tracing::warn!(file = name, error = %e, "Failed to write file");
            Response::internal_error()
        }
    }
}

fn with_body(
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
    encoding: ContentEncoding,
) -> Response {
    ResponseBuilder::new(status)
        .content_type(content_type)
        .encoding(encoding)
        .body(body)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode response body");
            Response::internal_error()
        })
}
