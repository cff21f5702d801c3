//! Static file service

use bytes::Bytes;
use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use std::convert::Infallible;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// Body type of every [`ServeDir`] response.
pub type ResponseBody = Full<Bytes>;

type ResponseFuture =
    Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, Infallible>> + Send>>;

/// Serves files below a root directory.
///
/// - `GET`/`HEAD` of a file returns its bytes with a content type guessed
///   from the extension
/// - a directory serves its `index.html`, or else an HTML listing
/// - paths with `..` are refused with `403`, missing files get `404`, other
///   methods get `405`
///
/// Never fails: every problem becomes a status code.
#[derive(Debug, Clone)]
pub struct ServeDir {
    root: Arc<PathBuf>,
}

impl ServeDir {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// The directory being served.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl<B> Service<Request<B>> for ServeDir {
    type Response = Response<ResponseBody>;
    type Error = Infallible;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let root = Arc::clone(&self.root);
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        Box::pin(async move { Ok(respond(&root, &method, &path).await) })
    }
}

async fn respond(root: &Path, method: &Method, uri_path: &str) -> Response<ResponseBody> {
    if method != Method::GET && method != Method::HEAD {
        let mut res = plain(StatusCode::METHOD_NOT_ALLOWED);
        res.headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
        return res;
    }

    let Some(target) = resolve(root, uri_path) else {
        return plain(StatusCode::FORBIDDEN);
    };

    match tokio::fs::metadata(&target).await {
        Ok(meta) if meta.is_dir() => {
            let index = target.join("index.html");
            if tokio::fs::metadata(&index).await.is_ok_and(|m| m.is_file()) {
                file(&index).await
            } else {
                listing(&target, uri_path).await
            }
        }
        Ok(_) => file(&target).await,
        Err(_) => plain(StatusCode::NOT_FOUND),
    }
}

/// Map a URI path onto `root`, refusing anything that could climb out.
fn resolve(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for part in uri_path.split('/').filter(|p| !p.is_empty()) {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !part.contains('\\') => path.push(name),
            _ => return None,
        }
    }
    Some(path)
}

async fn file(path: &Path) -> Response<ResponseBody> {
    match tokio::fs::read(path).await {
        Ok(bytes) => response(StatusCode::OK, content_type(path), bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => plain(StatusCode::NOT_FOUND),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "read failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn listing(dir: &Path, uri_path: &str) -> Response<ResponseBody> {
    match list_entries(dir).await {
        Ok(names) => {
            let base = uri_path.trim_end_matches('/');
            let mut html = String::from("<pre>\n");
            for name in names {
                let name = escape(&name);
                html.push_str(&format!("<a href=\"{base}/{name}\">{name}</a>\n"));
            }
            html.push_str("</pre>\n");
            response(StatusCode::OK, "text/html; charset=utf-8", html)
        }
        Err(err) => {
            tracing::warn!(path = %dir.display(), error = %err, "listing failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Entry names, sorted, with a trailing `/` on directories.
async fn list_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("yaml" | "yml") => "application/yaml",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn plain(status: StatusCode) -> Response<ResponseBody> {
    let reason = status.canonical_reason().unwrap_or("");
    response(status, "text/plain; charset=utf-8", format!("{reason}\n"))
}

fn response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<ResponseBody> {
    let mut res = Response::new(Full::new(body.into()));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    res
}
