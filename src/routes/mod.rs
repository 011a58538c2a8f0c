//! Request routing and the route handlers.
//!
//! - **`router`**: picks a [`Route`] from the method and path
//! - **`handlers`**: turns a route into a [`Response`](crate::http::response::Response)
//! - **`files`**: the files-root capability used by the `/files/` routes

pub mod files;
pub mod handlers;
pub mod router;

pub use files::{FileError, FileStore};
pub use router::Route;
