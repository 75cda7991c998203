//! Test utilities for running a mock Jolt GraphQL server.
//!
//! The server records every request (headers and parsed JSON body) and
//! answers with whatever the installed handler returns.

#![allow(dead_code, reason = "each test binary uses a subset of helpers")]

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::HeaderMap;
use hyper::server::conn::http1;
use hyper::{Request, Response, StatusCode, body::Incoming, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::{
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler type invoked for each incoming request, with its body collected.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send>>>;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Requests recorded by [`respond_with`].
pub type Captures = Arc<Mutex<Vec<Captured>>>;

/// Handle returned by [`start_mitm`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Start an HTTP/1 server forwarding requests to a shared handler.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
pub async fn start_mitm() -> Result<(SocketAddr, Handler, ShutdownHandle), std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(404)
            .body(Full::from("No handler"))
            .expect("failed to create default response")
    })));
    let handler_clone = handler.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body.collect().await.unwrap_or_default().to_bytes();
                                let req = Request::from_parts(parts, bytes);
                                let resp = {
                                    let mut f = h.lock().expect("lock handler in service");
                                    (*f)(&req)
                                };
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok((addr, handler, ShutdownHandle { join, stop: tx }))
}

/// Answer every request with `status` and `body`, recording what was sent.
///
/// # Panics
///
/// Panics if the response cannot be built.
pub fn respond_with(handler: &Handler, status: u16, body: impl Into<String>) -> Captures {
    let body = body.into();
    let captures: Captures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captures);
    *handler.lock().expect("lock handler") = Box::new(move |req: &Request<Bytes>| {
        let json = serde_json::from_slice(req.body()).unwrap_or(serde_json::Value::Null);
        sink.lock().expect("lock captures").push(Captured {
            headers: req.headers().clone(),
            body: json,
        });
        Response::builder()
            .status(StatusCode::from_u16(status).expect("valid status"))
            .header("Content-Type", "application/json")
            .body(Full::from(body.clone()))
            .expect("build response")
    });
    captures
}

/// An address nothing listens on, for connection-refused tests.
///
/// # Panics
///
/// Panics if a local port cannot be bound.
pub fn refused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    listener.local_addr().expect("probe addr")
}

const JOLT_KEYS: &[&str] = &[
    "JOLT_CONFIG_PATH",
    "JOLT_ENDPOINT",
    "JOLT_AUTH_TOKEN",
    "JOLT_COMPANY_ID",
    "JOLT_MODE_ID",
    "JOLT_MODE_KIND",
    "JOLT_COMPANY_WIDE",
    "JOLT_HTTP_TIMEOUT",
    "JOLT_TRANSCRIPT",
];

/// Create a `jolt` command pointed at `addr` with test credentials.
///
/// The command runs in a fresh directory with an empty XDG config home so no
/// user configuration leaks in. Keep the returned [`TempDir`] alive until the
/// command has finished.
///
/// # Panics
///
/// Panics if the binary or the temporary directory cannot be found.
pub fn jolt_cmd(addr: SocketAddr) -> (Command, TempDir) {
    let dir = TempDir::new().expect("create work dir");
    let mut cmd = Command::cargo_bin("jolt").expect("binary");
    for key in JOLT_KEYS {
        cmd.env_remove(key);
    }
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("JOLT_ENDPOINT", format!("http://{addr}/graphql"))
        .env("JOLT_AUTH_TOKEN", "__test-token")
        .env("JOLT_COMPANY_ID", "test-company")
        .env("JOLT_MODE_ID", "Q29udGVudEdyb3VwOnRlc3Q=")
        .env("RUST_LOG", "warn");
    (cmd, dir)
}
