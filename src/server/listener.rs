use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::FileStore;

const BACKLOG: u32 = 128;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.listen_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        directory = ?cfg.directory,
        "Listening"
    );

    serve(listener, cfg.file_store(), cfg.max_request_bytes).await
}

/// Binds with `SO_REUSEADDR` so a quick restart does not fail on a socket
/// still in TIME_WAIT.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("resolving listen address {addr}"))?
        .next()
        .with_context(|| format!("no address found for {addr}"))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("binding {addr}"))?;

    Ok(socket.listen(BACKLOG)?)
}

/// Accepts forever, one task per connection.
///
/// Tasks are detached; the runtime frees each one when it finishes, and a
/// failing or panicking connection never reaches this loop.
pub async fn serve(
    listener: TcpListener,
    files: Option<FileStore>,
    max_request_bytes: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                continue;
            }
        };
        tracing::debug!(peer = %peer, "Accepted connection");

        let files = files.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, files, max_request_bytes);
            if let Err(e) = conn.run().await {
                tracing::error!(peer = %peer, error = %e, "Connection error");
            }
        });
    }
}
