//! Shared utilities for integration testing: a raw-TCP stub upstream and a
//! helper that runs the proxy on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use truckersmp_proxy::{HttpServer, ProxyConfig, Shutdown};

/// Canned response returned by the stub.
#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
    /// `Content-Length` to announce instead of the real body length.
    pub declared_length: Option<usize>,
}

impl StubResponse {
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", content_type.to_string())],
            body: body.into(),
            declared_length: None,
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, "application/json", body)
    }

    /// Announce `length` bytes but send only the body, then close.
    pub fn truncated(mut self, length: usize) -> Self {
        self.declared_length = Some(length);
        self
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

/// A running stub upstream.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    heads: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    /// Base URL shaped like the real one (`.../v2`).
    pub fn base_url(&self) -> String {
        format!("http://{}/v2", self.addr)
    }

    /// Number of connections that delivered a request head.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far, in arrival order.
    pub fn heads(&self) -> Vec<String> {
        self.heads.lock().unwrap().clone()
    }

    /// First line of the most recent request, e.g. `GET /v2/servers HTTP/1.1`.
    pub fn last_request_line(&self) -> Option<String> {
        self.heads()
            .last()
            .and_then(|head| head.lines().next().map(str::to_string))
    }
}

async fn read_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            return Some(String::from_utf8_lossy(&buf[..end]).into_owned());
        }
    }
}

/// Start a stub that answers every request with `f()`.
pub async fn start_stub<F>(f: F) -> StubUpstream
where
    F: Fn() -> StubResponse + Send + Sync + 'static,
{
    start(Some(Arc::new(f))).await
}

/// Start a stub that reads requests and never answers.
pub async fn start_silent_stub() -> StubUpstream {
    start::<fn() -> StubResponse>(None).await
}

async fn start<F>(f: Option<Arc<F>>) -> StubUpstream
where
    F: Fn() -> StubResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let heads = Arc::new(Mutex::new(Vec::new()));

    let (calls_task, heads_task) = (calls.clone(), heads.clone());
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            let calls = calls_task.clone();
            let heads = heads_task.clone();
            tokio::spawn(async move {
                let Some(head) = read_head(&mut socket).await else {
                    return;
                };
                calls.fetch_add(1, Ordering::SeqCst);
                heads.lock().unwrap().push(head);

                let Some(f) = f else {
                    tokio::time::sleep(Duration::from_secs(120)).await;
                    return;
                };
                let response = f();
                let mut raw = format!("HTTP/1.1 {} Stub\r\n", response.status);
                for (name, value) in &response.headers {
                    raw.push_str(&format!("{}: {}\r\n", name, value));
                }
                raw.push_str(&format!(
                    "Content-Length: {}\r\nConnection: close\r\n\r\n",
                    response.declared_length.unwrap_or(response.body.len())
                ));
                let mut bytes = raw.into_bytes();
                bytes.extend_from_slice(&response.body);
                let _ = socket.write_all(&bytes).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubUpstream { addr, calls, heads }
}

/// Proxy config pointed at `base_url` with a short upstream timeout.
pub fn proxy_config(base_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = base_url.to_string();
    config.upstream.timeout_secs = 5;
    config
}

/// A proxy serving on an ephemeral loopback port.
pub struct RunningProxy {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_proxy(config: ProxyConfig) -> RunningProxy {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningProxy { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
