use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionLimits};
use crate::http::resource::DocumentRoot;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let addr = tokio::net::lookup_host(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("invalid listen address {}", cfg.server.listen_addr))?
        .next()
        .with_context(|| format!("listen address {} did not resolve", cfg.server.listen_addr))?;

    let listener = bind(addr, cfg.server.backlog)?;
    serve(listener, cfg).await
}

/// Binds a listening socket with an explicit backlog.
pub fn bind(addr: SocketAddr, backlog: u32) -> anyhow::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };

    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("bind to {} failed", addr))?;

    socket
        .listen(backlog)
        .with_context(|| format!("listen on {} failed", addr))
}

/// Accepts connections forever, one task per connection.
///
/// At most `server.max_connections` tasks run at once; accepting waits for a
/// free slot.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let root = Arc::new(DocumentRoot::new(cfg.static_files.root.clone()));
    let limits = ConnectionLimits::from(&cfg.server);
    let permits = Arc::new(Semaphore::new(cfg.server.max_connections));

    info!(
        "Listening on {} (root {}, max {} connections)",
        listener.local_addr()?,
        root.root().display(),
        cfg.server.max_connections
    );

    loop {
        let permit = permits.clone().acquire_owned().await?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let root = root.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, root, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
            drop(permit);
        });
    }
}
