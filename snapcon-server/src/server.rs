use crate::api::{create_router, AppState};
use crate::config::ConsoleConfig;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub struct ConsoleServer {
    config: ConsoleConfig,
    state: AppState,
}

impl ConsoleServer {
    pub fn new(config: ConsoleConfig) -> Self {
        let state = AppState {
            snapper: Arc::new(config.snapper()),
            assets: config.assets(),
        };
        Self { config, state }
    }

    pub fn addr(&self) -> SocketAddr {
        self.config.bind
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr = self.addr();

        info!("Server listening on {}", addr);
        info!("snapper program: {}", self.state.snapper.program());
        match &self.config.assets_dir {
            Some(dir) => info!("Serving UI from {:?}", dir),
            None => info!("Serving built-in UI"),
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_server_creation() {
        let server = ConsoleServer::new(ConsoleConfig::default());
        assert_eq!(server.addr().port(), 8888);
    }

    #[tokio::test]
    async fn test_serves_assets_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>custom</html>").unwrap();

        let config = ConsoleConfig {
            assets_dir: Some(dir.path().to_path_buf()),
            ..ConsoleConfig::default()
        };
        let server = ConsoleServer::new(config);

        let response = server
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>custom</html>");
    }

    #[tokio::test]
    async fn test_missing_program_is_500() {
        let dir = TempDir::new().unwrap();
        let config = ConsoleConfig {
            program: "snapcon-no-such-snapper".to_string(),
            configs_dir: dir.path().join("absent"),
            ..ConsoleConfig::default()
        };
        let server = ConsoleServer::new(config);

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/snapshots?config=root")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
