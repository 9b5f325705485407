use crate::config::RelayConfig;
use crate::handlers;
use crate::services::{GeminiClient, GeminiConfig};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use relay_core::error::AppError;
use relay_core::middleware::cors_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    /// `None` when no credential was configured; the handler reports that
    /// per request instead of the service refusing to boot.
    pub gemini: Option<GeminiClient>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let gemini = config.gemini.api_key.as_ref().map(|key| {
            GeminiClient::new(GeminiConfig {
                api_key: key.clone(),
                model: config.gemini.model.clone(),
                api_base: config.gemini.api_base.clone(),
                timeout: config.gemini.timeout,
            })
        });

        if gemini.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; prompts will be rejected");
        }

        let state = AppState {
            config: config.clone(),
            gemini,
        };

        // Methods other than POST/OPTIONS on /api fall through to the
        // method router's 405 with an empty body.
        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/api",
                post(handlers::relay).options(handlers::preflight),
            )
            .layer(from_fn(cors_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
