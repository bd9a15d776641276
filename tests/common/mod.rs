//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use import_redirector::config::{ModuleConfig, RedirectorConfig};
use import_redirector::lifecycle::startup::build_router;
use import_redirector::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A redirector running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

/// Start a redirector serving `pairs` with `config`.
pub async fn start_server(config: RedirectorConfig, pairs: &[(&str, &str)]) -> TestServer {
    let modules: Vec<ModuleConfig> = pairs
        .iter()
        .map(|(import, repo)| ModuleConfig {
            import_path: import.to_string(),
            repo_path: repo.to_string(),
        })
        .collect();
    let router = build_router(&modules, &config.redirect.vcs).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, router);

    // Subscribe before spawning so an early trigger is not missed.
    let task = tokio::spawn(server.run(listener, shutdown.wait()));

    TestServer {
        addr,
        shutdown,
        task,
    }
}

/// A parsed HTTP/1.1 response.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Send `method path` with `Host: host` and read the whole response.
pub async fn send(addr: SocketAddr, method: &str, host: &str, path: &str) -> RawResponse {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        method, path, host
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut raw))
        .await
        .expect("response timed out")
        .unwrap();
    parse_response(&String::from_utf8(raw).unwrap())
}

/// Send a GET request.
pub async fn get(addr: SocketAddr, host: &str, path: &str) -> RawResponse {
    send(addr, "GET", host, path).await
}

fn parse_response(raw: &str) -> RawResponse {
    let (head, body) = raw.split_once("\r\n\r\n").expect("malformed response");
    let mut lines = head.split("\r\n");
    let status = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .expect("missing status line");
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    RawResponse {
        status,
        headers,
        body: body.to_string(),
    }
}
