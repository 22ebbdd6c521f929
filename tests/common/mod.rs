//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use proto_check::config::DemoConfig;
use proto_check::lifecycle::{RunState, RunTracker};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Config for a run on an ephemeral port.
pub fn ephemeral_config() -> DemoConfig {
    let mut config = DemoConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.client.timeout_secs = 5;
    config
}

/// Tracker positioned where the consumer half of a run starts.
#[allow(dead_code)]
pub fn started_tracker() -> RunTracker {
    let mut tracker = RunTracker::new();
    tracker.advance(RunState::ServerStarted);
    tracker
}

/// Start a stand-in producer that answers every request with a fixed raw
/// status line and body. Returns its base URL.
#[allow(dead_code)]
pub async fn start_raw_producer(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{addr}")
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
