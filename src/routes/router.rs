//! Maps a parsed request onto one of the fixed routes.
//!
//! Matching is a literal prefix comparison on the raw path, first match wins:
//!
//! ```text
//! "/"              → Root
//! "/echo/{value}"  → Echo
//! "/user-agent"    → UserAgent
//! "/files/{name}"  → FileGet / FilePost (only with a files root)
//! anything else    → NotFound
//! ```

use crate::http::request::{Method, Request};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// The behavior selected for a request. Borrows from the request it was
/// resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    /// Remainder after `/echo/`, verbatim
    Echo(&'a str),
    UserAgent,
    FileGet(&'a str),
    FilePost { name: &'a str, body: &'a [u8] },
    NotFound,
}

impl<'a> Route<'a> {
    /// Resolves the route for `request`.
    ///
    /// `files_enabled` is false when no files root is configured, in which
    /// case `/files/` is not recognized at all.
    pub fn resolve(request: &'a Request, files_enabled: bool) -> Self {
        let path = request.path.as_str();

        if path == "/" {
            return Route::Root;
        }

        if let Some(value) = path.strip_prefix(ECHO_PREFIX) {
            return Route::Echo(value);
        }

        if path == "/user-agent" {
            return Route::UserAgent;
        }

        if files_enabled {
            if let Some(name) = path.strip_prefix(FILES_PREFIX) {
                return match request.method {
                    Method::GET => Route::FileGet(name),
                    Method::POST => Route::FilePost {
                        name,
                        body: &request.body,
                    },
                    Method::Unrecognized => Route::NotFound,
                };
            }
        }

        Route::NotFound
    }

    /// Short label for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Echo(_) => "echo",
            Route::UserAgent => "user-agent",
            Route::FileGet(_) => "file-get",
            Route::FilePost { .. } => "file-post",
            Route::NotFound => "not-found",
        }
    }
}
