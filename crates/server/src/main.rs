use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use shared::{
    domain::{Catalog, SequenceActivationRequest},
    error::{ApiError, ErrorCode},
    protocol::{CatalogOrigin, CommandResponse, GroupView, CATALOG_ORIGIN_HEADER},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let device = settings.device_config()?;
    let api = ApiContext::new(&device, reqwest::Client::new());
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        controller = %device.base_url(),
        zone = device.zone_id(),
        timeout_ms = settings.request_timeout_ms,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/sequences", get(http_get_catalog))
        .route("/api/groups", get(http_get_groups))
        .route("/api/submit", post(http_activate))
        .route("/api/turn-off", delete(http_deactivate))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_get_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<(HeaderMap, Json<Catalog>), HttpError> {
    let reply = api::get_catalog(&state.api).await.map_err(into_http)?;
    Ok((origin_headers(reply.origin), Json(reply.catalog)))
}

async fn http_get_groups(
    State(state): State<Arc<AppState>>,
) -> Result<(HeaderMap, Json<Vec<GroupView>>), HttpError> {
    let (views, origin) = api::get_group_index(&state.api)
        .await
        .map_err(into_http)?;
    Ok((origin_headers(origin), Json(views)))
}

async fn http_activate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SequenceActivationRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, HttpError> {
    let Json(request) = body.map_err(|rejection| {
        into_http(ApiError::new(ErrorCode::Validation, rejection.body_text()))
    })?;
    api::activate(&state.api, &request)
        .await
        .map(Json)
        .map_err(into_http)
}

async fn http_deactivate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!("turning off light display");
    api::deactivate(&state.api)
        .await
        .map(Json)
        .map_err(into_http)
}

fn origin_headers(origin: CatalogOrigin) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CATALOG_ORIGIN_HEADER,
        HeaderValue::from_static(origin.as_str()),
    );
    headers
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::DeviceRejected | ErrorCode::TransportFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::SourceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn into_http(err: ApiError) -> HttpError {
    (status_for(err.code), Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
