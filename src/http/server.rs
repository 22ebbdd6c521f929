//! Producer: serves the styles document.
//!
//! # Responsibilities
//! - Create Axum Router with the `GET /` handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind the listener and serve until shutdown is signalled
//! - Hand out a scoped `ServerHandle` that always releases the listener

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::styles::ResponseEnvelope;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub payload: Arc<ResponseEnvelope>,
    pub served: Arc<AtomicUsize>,
}

/// HTTP server answering `GET /` with a fixed `ResponseEnvelope`.
pub struct StyleServer {
    router: Router,
    served: Arc<AtomicUsize>,
}

impl StyleServer {
    pub fn new(config: &ServerConfig) -> Self {
        let served = Arc::new(AtomicUsize::new(0));
        let state = AppState {
            payload: Arc::new(ResponseEnvelope::new(config.styles.clone())),
            served: served.clone(),
        };

        Self {
            router: Self::build_router(config, state),
            served,
        }
    }

    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(styles_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The router, for driving the handler without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address.
    pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
        let bind_error = |source: std::io::Error| Error::Bind {
            address: config.bind_address.clone(),
            source,
        };

        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            bind_error(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;
        let listener = TcpListener::bind(addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        tracing::info!(address = %local_addr, "Listener bound");
        Ok(listener)
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::result::Result<(), std::io::Error> {
        let Self { router, served } = self;
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Style server starting");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(
            address = %addr,
            requests_served = served.load(Ordering::Relaxed),
            "Style server stopped"
        );
        Ok(())
    }

    /// Run on a background task. The listener lives as long as the handle.
    pub fn spawn(self, listener: TcpListener) -> Result<ServerHandle> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| Error::Server(e.to_string()))?;
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let task = tokio::spawn(self.run(listener, rx));

        Ok(ServerHandle {
            local_addr,
            shutdown,
            task: Some(task),
        })
    }
}

async fn styles_handler(State(state): State<AppState>, headers: HeaderMap) -> Json<ResponseEnvelope> {
    let count = state.served.fetch_add(1, Ordering::Relaxed) + 1;
    metrics::record_served();

    tracing::info!(
        request_id = %request_id(&headers),
        requests_served = count,
        "Got request, responding with data"
    );

    Json(state.payload.as_ref().clone())
}

/// Owns the running producer. `stop` shuts it down gracefully; dropping an
/// unstopped handle signals shutdown and aborts the task.
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: Option<JoinHandle<std::result::Result<(), std::io::Error>>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL a client on this host should use. Unspecified IPs map to loopback.
    pub fn base_url(&self) -> String {
        let ip = match self.local_addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        format!("http://{}", SocketAddr::new(ip, self.local_addr.port()))
    }

    /// Stop accepting, drain, and wait for the task to finish.
    pub async fn stop(mut self) -> Result<()> {
        self.shutdown.trigger();
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        match task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::Server(e.to_string())),
            Err(e) => Err(Error::Server(e.to_string())),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.shutdown.trigger();
            task.abort();
            tracing::debug!(address = %self.local_addr, "Style server released without stop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::styles::{StyleKey, StyleRecord};

    async fn get_root(router: Router) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_default_payload() {
        let server = StyleServer::new(&ServerConfig::default());
        let response = get_root(server.router()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"styles":{"stroke":"white"}}"#);
        assert_eq!(server.served.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_serves_configured_payload() {
        let config = ServerConfig {
            styles: StyleRecord::new().with(StyleKey::Proto, "purple"),
            ..ServerConfig::default()
        };
        let response = get_root(StyleServer::new(&config).router()).await;

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"styles":{"__proto__":"purple"}}"#);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let router = StyleServer::new(&ServerConfig::default()).router();
        let response = router
            .oneshot(Request::builder().uri("/other").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bind_rejects_bad_address() {
        let config = ServerConfig {
            bind_address: "nowhere".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(StyleServer::bind(&config).await, Err(Error::Bind { .. })));
    }

    #[tokio::test]
    async fn test_stop_releases_listener() {
        let config = ServerConfig {
            bind_address: "127.0.0.1:0".into(),
            ..ServerConfig::default()
        };
        let listener = StyleServer::bind(&config).await.unwrap();
        let handle = StyleServer::new(&config).spawn(listener).unwrap();
        let addr = handle.local_addr();

        handle.stop().await.unwrap();
        assert!(TcpListener::bind(addr).await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_releases_listener() {
        let config = ServerConfig {
            bind_address: "127.0.0.1:0".into(),
            ..ServerConfig::default()
        };
        let listener = StyleServer::bind(&config).await.unwrap();
        let handle = StyleServer::new(&config).spawn(listener).unwrap();
        let addr = handle.local_addr();
        drop(handle);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(TcpListener::bind(addr).await.is_ok());
    }

    #[test]
    fn test_base_url_maps_unspecified_to_loopback() {
        let handle = ServerHandle {
            local_addr: "0.0.0.0:9000".parse().unwrap(),
            shutdown: Shutdown::new(),
            task: None,
        };
        assert_eq!(handle.base_url(), "http://127.0.0.1:9000");
    }
}
