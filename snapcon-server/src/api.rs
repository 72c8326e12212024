use crate::assets::AssetProvider;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use snapcon_core::snapper::default_rollback_description;
use snapcon_core::validate::parse_snapshot_id;
use snapcon_core::{Change, ConfigName, Error, Settings, Snapper, Snapshot, SnapshotRange};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub snapper: Arc<Snapper>,
    pub assets: Arc<dyn AssetProvider>,
}

type ApiError = (StatusCode, String);

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/configs", get(list_configs))
        .route("/api/get-config", get(get_config))
        .route("/api/snapshots", get(list_snapshots))
        .route("/api/status", get(get_status))
        .route("/api/undochange", post(undo_change))
        .route("/api/rollback", post(rollback))
        .route("/api/create", post(create_snapshot))
        .route("/api/delete", post(delete_snapshot))
        .fallback(serve_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(e: Error) -> ApiError {
    let status = if e.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else if matches!(e, Error::TimedOut { .. }) {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, e.to_string())
}

/// Runs a snapper call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> snapcon_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("snapper task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map_err(api_error)
}

fn config_name(raw: &str) -> Result<ConfigName, ApiError> {
    ConfigName::parse(raw).map_err(api_error)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn list_configs(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let snapper = state.snapper.clone();
    blocking(move || snapper.list_configs()).await.map(Json)
}

#[derive(Deserialize)]
struct ConfigQuery {
    config: String,
}

async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<Settings>, ApiError> {
    let config = config_name(&query.config)?;
    let snapper = state.snapper.clone();
    blocking(move || snapper.get_config(&config)).await.map(Json)
}

async fn list_snapshots(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    let config = config_name(&query.config)?;
    let snapper = state.snapper.clone();
    blocking(move || snapper.list_snapshots(&config)).await.map(Json)
}

#[derive(Deserialize)]
struct StatusQuery {
    config: String,
    range: String,
}

async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Change>>, ApiError> {
    let config = config_name(&query.config)?;
    let range = SnapshotRange::parse(&query.range).map_err(api_error)?;
    let snapper = state.snapper.clone();
    blocking(move || snapper.status(&config, range)).await.map(Json)
}

#[derive(Deserialize)]
struct UndoChangeRequest {
    config: String,
    range: String,
    paths: Vec<String>,
}

async fn undo_change(
    State(state): State<AppState>,
    Json(req): Json<UndoChangeRequest>,
) -> Result<StatusCode, ApiError> {
    let config = config_name(&req.config)?;
    let range = SnapshotRange::parse(&req.range).map_err(api_error)?;
    let snapper = state.snapper.clone();
    blocking(move || snapper.undo_change(&config, range, &req.paths)).await?;
    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
struct RollbackQuery {
    config: String,
    id: String,
    description: Option<String>,
}

async fn rollback(
    State(state): State<AppState>,
    Query(query): Query<RollbackQuery>,
) -> Result<StatusCode, ApiError> {
    let config = config_name(&query.config)?;
    let id = parse_snapshot_id(&query.id).map_err(api_error)?;
    let description = query
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_rollback_description(id));
    let snapper = state.snapper.clone();
    blocking(move || snapper.rollback(&config, id, &description)).await?;
    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
struct CreateQuery {
    config: String,
    #[serde(default)]
    description: String,
    userdata: Option<String>,
}

async fn create_snapshot(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> Result<StatusCode, ApiError> {
    let config = config_name(&query.config)?;
    let userdata = query.userdata.filter(|u| !u.is_empty());
    let snapper = state.snapper.clone();
    blocking(move || snapper.create(&config, &query.description, userdata.as_deref())).await?;
    Ok(StatusCode::CREATED)
}

#[derive(Deserialize)]
struct DeleteQuery {
    config: String,
    id: String,
}

async fn delete_snapshot(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    let config = config_name(&query.config)?;
    let id = parse_snapshot_id(&query.id).map_err(api_error)?;
    let snapper = state.snapper.clone();
    blocking(move || snapper.delete(&config, id)).await?;
    Ok(StatusCode::OK)
}

async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Response {
    match state.assets.get(uri.path()) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
