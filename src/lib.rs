//! Wicket - a minimal HTTP/1.1 server
//!
//! Serves a root greeting, string echo, `User-Agent` reflection, and file
//! read/write under a configured directory, with optional gzip bodies.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
