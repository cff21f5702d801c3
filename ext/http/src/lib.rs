//! dsn-http: HTTP helpers
//!
//! Small pieces for serving files while working with dsn tooling, built on
//! `tower` and `hyper`:
//!
//! - [`LogRequests`] / [`LogRequestsLayer`]: a `tower` middleware that logs
//!   `"{method} {uri}"` for every request and otherwise stays out of the way
//! - [`ServeDir`]: a `tower::Service` serving files from a directory
//! - [`free_port`], [`bind_free_port`], [`serve`], [`serve_dir`]: run a
//!   service over HTTP/1.1 on a port picked by the OS
//!
//! # Architecture
//!
//! ```text
//! TcpListener (localhost, free port)
//!         ↓ accept()
//! hyper http1 connection
//!         ↓ TowerToHyperService
//! LogRequests<S>          (info! "GET /path")
//!         ↓
//! S: tower::Service       (e.g. ServeDir)
//! ```
//!
//! # Example
//!
//! ```
//! use dsn_http::prelude::*;
//! use http::{Request, Response};
//! use std::convert::Infallible;
//! use tower::{service_fn, ServiceExt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let svc = LogRequests::new(service_fn(|req: Request<()>| async move {
//!     Ok::<_, Infallible>(Response::new(req.uri().path().to_owned()))
//! }));
//!
//! let req = Request::get("/orders?id=7").body(()).unwrap();
//! let res = svc.oneshot(req).await.unwrap();
//! assert_eq!(res.into_body(), "/orders");
//! # }
//! ```

mod log;
mod serve_dir;
mod server;

pub use log::{LogRequests, LogRequestsLayer};
pub use serve_dir::{ResponseBody, ServeDir};
pub use server::{bind_free_port, free_port, serve, serve_dir};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        bind_free_port, free_port, serve, serve_dir, LogRequests, LogRequestsLayer, ServeDir,
    };
}
