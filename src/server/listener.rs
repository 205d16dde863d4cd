use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::net::TcpListener;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Notify;
use tracing::{error, info};

use crate::http::connection::Connection;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Handle to a running server.
///
/// The accept loop runs on its own task for the server's lifetime, spawning
/// one task per accepted connection. The only state shared across
/// connections is the atomic closed flag backing [`close`].
///
/// [`close`]: Server::close
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Binds `addr` and starts accepting connections.
    ///
    /// `handler` receives the connection's [`ResponseWriter`] and the parsed
    /// [`Request`] once parsing succeeds; see [`Connection::run`] for the
    /// failure path.
    pub async fn serve<H, Fut>(addr: &str, handler: H) -> anyhow::Result<Self>
    where
        H: Fn(ResponseWriter<OwnedWriteHalf>, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let closed = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(Notify::new());

        tokio::spawn(accept_loop(
            listener,
            Arc::new(handler),
            closed.clone(),
            shutdown.clone(),
        ));
        info!("Listening on {}", local_addr);

        Ok(Self {
            local_addr,
            closed,
            shutdown,
        })
    }

    /// The address the listener actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting and releases the listening socket.
    ///
    /// Idempotent; only the first call does anything. In-flight connection
    /// tasks run to completion on their own.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
    }
}

async fn accept_loop<H, Fut>(
    listener: TcpListener,
    handler: Arc<H>,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) where
    H: Fn(ResponseWriter<OwnedWriteHalf>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    info!("Accepted connection from {}", peer);

                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let conn = Connection::new(socket);
                        if let Err(e) = conn.run(handler.as_ref()).await {
                            error!("Connection error from {}: {}", peer, e);
                        }
                    });
                }
                Err(e) => {
                    // Suppressed when the error is our own close()
                    if closed.load(Ordering::SeqCst) {
                        break;
                    }
                    error!("Failed to accept connection: {}", e);
                }
            },
            _ = shutdown.notified() => break,
        }
    }
    // Dropping the listener here releases the socket
}
