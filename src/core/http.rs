//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::error::AnalystError;
use crate::metrics::Metrics;
use crate::models::{FieldEdit, TechnicalData, PRESET_TICKERS};
use crate::report::{clipboard_text, mailto_link, share_text};
use crate::services::AnalysisProvider;
use crate::session::{AnalysisFinish, AnalystSession, Outcome};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub session: Arc<RwLock<AnalystSession>>,
    pub provider: Option<Arc<dyn AnalysisProvider>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

fn status_for(err: &AnalystError) -> StatusCode {
    match err {
        AnalystError::NotFound(_) => StatusCode::NOT_FOUND,
        AnalystError::Busy | AnalystError::NoPendingAction | AnalystError::RecoveryClosed => {
            StatusCode::CONFLICT
        },
        AnalystError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
        AnalystError::Http(_) | AnalystError::Collaborator { .. } => StatusCode::BAD_GATEWAY,
        AnalystError::Storage(_) | AnalystError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn reject(err: AnalystError) -> StatusCode {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }
    status
}

fn outcome_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::NeedsConfirmation(action) => json!({
            "outcome": outcome,
            "prompt": action.prompt(),
        }),
        _ => json!({ "outcome": outcome }),
    }
}

fn session_json(session: &AnalystSession) -> Value {
    json!({
        "ticker": session.ticker(),
        "form": session.form(),
        "dirty": session.is_dirty(),
        "presets": session.presets(),
        "recovery": {
            "state": session.recovery_state(),
            "bannerVisible": session.recovery_banner_visible(),
        },
        "pendingAction": session.pending_action().map(|action| json!({
            "action": action,
            "prompt": action.prompt(),
        })),
        "busy": session.is_busy(),
        "error": session.error(),
        "analysis": session.analysis(),
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "crypto-analyst"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct TickerRequest {
    ticker: String,
}

#[derive(Debug, Deserialize)]
struct NameRequest {
    name: String,
}

async fn list_tickers() -> Json<Value> {
    Json(json!(PRESET_TICKERS))
}

async fn get_state(State(state): State<AppState>) -> Json<Value> {
    let session = state.session.read().await;
    Json(session_json(&session))
}

async fn get_form(State(state): State<AppState>) -> Json<Value> {
    let session = state.session.read().await;
    Json(json!({ "form": session.form(), "dirty": session.is_dirty() }))
}

/// Replace the whole form
async fn put_form(
    State(state): State<AppState>,
    Json(data): Json<TechnicalData>,
) -> Json<Value> {
    let mut session = state.session.write().await;
    session.update_form(data);
    Json(json!({ "form": session.form(), "dirty": session.is_dirty() }))
}

/// Edit one field of the form
async fn patch_form(State(state): State<AppState>, Json(edit): Json<FieldEdit>) -> Json<Value> {
    let mut session = state.session.write().await;
    session.edit_field(edit);
    Json(json!({ "form": session.form(), "dirty": session.is_dirty() }))
}

async fn select_ticker(
    State(state): State<AppState>,
    Json(request): Json<TickerRequest>,
) -> Json<Value> {
    let mut session = state.session.write().await;
    let outcome = session.request_ticker(&request.ticker);
    let mut body = outcome_json(&outcome);
    body["ticker"] = json!(session.ticker());
    Json(body)
}

async fn list_presets(State(state): State<AppState>) -> Json<Value> {
    let session = state.session.read().await;
    Json(json!(session.presets()))
}

async fn save_preset(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut session = state.session.write().await;
    match session.save_preset(&request.name).map_err(reject)? {
        Some(preset) => {
            state.metrics.presets_saved_total.inc();
            Ok((StatusCode::CREATED, Json(json!(preset))))
        }
        None => Err(StatusCode::UNPROCESSABLE_ENTITY),
    }
}

async fn load_preset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut session = state.session.write().await;
    let outcome = session.request_load_preset(&id).map_err(reject)?;
    Ok(Json(outcome_json(&outcome)))
}

async fn delete_preset(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let mut session = state.session.write().await;
    let outcome = session.request_delete_preset(&id);
    Json(outcome_json(&outcome))
}

async fn promote_recovery(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut session = state.session.write().await;
    match session.promote_recovery(&request.name).map_err(reject)? {
        Some(preset) => {
            state.metrics.presets_saved_total.inc();
            Ok((StatusCode::CREATED, Json(json!(preset))))
        }
        None => Err(StatusCode::UNPROCESSABLE_ENTITY),
    }
}

async fn clear_recovery(State(state): State<AppState>) -> Json<Value> {
    let mut session = state.session.write().await;
    let outcome = session.request_clear_auto_save();
    Json(outcome_json(&outcome))
}

async fn dismiss_recovery(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session.write().await;
    session.dismiss_recovery();
    StatusCode::NO_CONTENT
}

async fn confirm_action(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let mut session = state.session.write().await;
    session.confirm().map_err(reject)?;
    Ok(Json(session_json(&session)))
}

async fn cancel_action(State(state): State<AppState>) -> Json<Value> {
    let mut session = state.session.write().await;
    let cancelled = session.cancel();
    Json(json!({ "cancelled": cancelled }))
}

/// Run one analysis round trip; the session lock is released while waiting.
///
/// The collaborator call and its bookkeeping run on their own task so the
/// session is settled even when the client goes away mid-request.
async fn analyze(State(state): State<AppState>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let provider = state.provider.clone().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "analysis service is not configured" })),
        )
    })?;

    let ticket = {
        let mut session = state.session.write().await;
        session
            .begin_analysis()
            .map_err(|e| (reject(e), Json(json!({ "error": "analysis already in progress" }))))?
    };

    state.metrics.analysis_requests_total.inc();
    let session = state.session.clone();
    let metrics = state.metrics.clone();
    let round_trip = tokio::spawn(async move {
        let result = provider.analyze(&ticket.ticker, &ticket.data).await;
        let mut session = session.write().await;
        let finish = session.finish_analysis(ticket, result);
        if finish == AnalysisFinish::Failed {
            metrics.analysis_failures_total.inc();
        }
        (finish, session.analysis().cloned(), session.error().map(str::to_string))
    });

    let (finish, analysis, error) = round_trip.await.map_err(|e| {
        error!(error = %e, "Analysis task aborted");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "analysis task aborted" })),
        )
    })?;

    match finish {
        AnalysisFinish::Completed => Ok(Json(json!({ "analysis": analysis }))),
        AnalysisFinish::Discarded => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "ticker changed while the analysis was running" })),
        )),
        AnalysisFinish::Failed => Err((StatusCode::BAD_GATEWAY, Json(json!({ "error": error })))),
    }
}

async fn share_analysis(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let session = state.session.read().await;
    let view = session.analysis().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({
        "clipboard": clipboard_text(view),
        "share": share_text(view),
        "mailto": mailto_link(view),
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/tickers", get(list_tickers))
        .route("/api/state", get(get_state))
        .route("/api/form", get(get_form).put(put_form).patch(patch_form))
        .route("/api/ticker", post(select_ticker))
        .route("/api/presets", get(list_presets).post(save_preset))
        .route("/api/presets/{id}/load", post(load_preset))
        .route("/api/presets/{id}", delete(delete_preset))
        .route("/api/recovery/promote", post(promote_recovery))
        .route("/api/recovery/clear", post(clear_recovery))
        .route("/api/recovery/dismiss", post(dismiss_recovery))
        .route("/api/confirm", post(confirm_action))
        .route("/api/cancel", post(cancel_action))
        .route("/api/analyze", post(analyze))
        .route("/api/analysis/share", get(share_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    state: AppState,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
