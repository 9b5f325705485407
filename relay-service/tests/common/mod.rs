use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
};
use relay_service::config::{GeminiSettings, RelayConfig};
use relay_service::startup::Application;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    /// Path segment of the call, e.g. `gemini-2.5-flash:generateContent`.
    pub model_call: String,
    /// Value of the `key` query parameter, if present.
    pub key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Stand-in for the Gemini API: answers every generateContent call with a
/// fixed status and body, recording what the relay sent.
pub struct MockUpstream {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn start(status: StatusCode, body: Value) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [`MockUpstream::start`], but holds every response back for
    /// `delay` before answering, for exercising the relay's deadline.
    pub async fn start_with_delay(status: StatusCode, body: Value, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/models/:model_call", post(record))
            .with_state(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind mock upstream");
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        MockUpstream { url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<MockState>,
    Path(model_call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        model_call,
        key: query.get("key").cloned(),
        body,
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.body.clone()))
}

/// Upstream that sends response headers immediately but never finishes the
/// body, so the relay's deadline fires during the body read.
#[allow(dead_code)]
pub async fn start_stalled_upstream() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind stalled upstream");
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\n\
                          content-type: application/json\r\n\
                          content-length: 1024\r\n\r\n{\"partial\":",
                    )
                    .await;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    url
}

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the relay on an ephemeral port with injected configuration,
    /// pointed at the given upstream base URL.
    pub async fn spawn(api_key: Option<&str>, upstream_url: &str) -> Self {
        Self::spawn_with_timeout(api_key, upstream_url, Duration::from_secs(5)).await
    }

    pub async fn spawn_with_timeout(
        api_key: Option<&str>,
        upstream_url: &str,
        timeout: Duration,
    ) -> Self {
        let config = RelayConfig {
            common: relay_core::config::Config { port: 0 },
            gemini: GeminiSettings {
                api_key: api_key.map(str::to_string),
                model: "gemini-2.5-flash".to_string(),
                api_base: upstream_url.to_string(),
                timeout,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address }
    }
}
