//! Serving a `tower::Service` over HTTP/1.1

use crate::{LogRequests, ResponseBody, ServeDir};
use http::{Request, Response};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use std::convert::Infallible;
use std::io;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower::Service;

/// Ask the OS for a free TCP port on `localhost`.
///
/// The listener is dropped before returning, so the port is free but not
/// reserved.
///
/// # Errors
///
/// Returns the I/O error if binding or reading the local address fails.
pub fn free_port() -> io::Result<u16> {
    let listener = std::net::TcpListener::bind("localhost:0")?;
    Ok(listener.local_addr()?.port())
}

/// Bind a listener on `localhost` at a port from [`free_port`].
///
/// # Errors
///
/// Returns the I/O error from picking the port or binding it.
pub async fn bind_free_port() -> io::Result<TcpListener> {
    let port = free_port()?;
    TcpListener::bind(("localhost", port)).await
}

/// Accept connections on `listener` forever, serving each with a clone of
/// `service`.
///
/// Connection errors are logged at debug level and do not stop the loop.
///
/// # Errors
///
/// Returns the I/O error if reading the local address or accepting fails.
pub async fn serve<S>(listener: TcpListener, service: S) -> io::Result<()>
where
    S: Service<Request<Incoming>, Response = Response<ResponseBody>, Error = Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    tracing::info!("server started at {}", listener.local_addr()?);

    loop {
        let (stream, peer) = listener.accept().await?;
        let service = TowerToHyperService::new(service.clone());

        tokio::spawn(async move {
            let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
            if let Err(err) = conn.await {
                tracing::debug!(%peer, error = %err, "connection closed with error");
            }
        });
    }
}

/// Serve the files below `root` on a free `localhost` port, logging every
/// request.
///
/// # Errors
///
/// Returns the I/O error from binding or accepting.
pub async fn serve_dir(root: impl Into<PathBuf>) -> io::Result<()> {
    let listener = bind_free_port().await?;
    serve(listener, LogRequests::new(ServeDir::new(root))).await
}
