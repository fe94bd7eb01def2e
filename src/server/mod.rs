//! HTTP dashboard.
//!
//! Every request runs the whole pipeline from scratch inside
//! `spawn_blocking`; the only value shared between requests is the
//! immutable [`AnalysisConfig`] behind an `Arc`.
//!
//! | Route | |
//! |-------|---|
//! | `GET /` | dashboard with the idle prompt |
//! | `POST /` | multipart form (`pdf`, `text`) → dashboard with results |
//! | `POST /api/analyze[?charts=true]` | same form → JSON [`AnalysisReport`] |
//! | `GET /healthz` | `ok` |

pub mod page;

use crate::config::AnalysisConfig;
use crate::error::TextLensError;
use crate::output::AnalysisReport;
use crate::pipeline::input::{self, RawTextSource};
use crate::run;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Room for multipart headers, boundaries and the pasted-text field on top of
/// the PDF part itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared state for the server.
#[derive(Clone)]
struct AppState {
    config: Arc<AnalysisConfig>,
}

/// Query string for `POST /api/analyze`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiParams {
    /// Include the rendered charts in the response.
    #[serde(default)]
    pub charts: bool,
}

/// The two form fields, as submitted.
#[derive(Debug, Default)]
struct FormInput {
    pdf: Option<Vec<u8>>,
    text: Option<String>,
}

/// An error response: status code plus a plain-text body.
#[derive(Debug)]
struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError(err.status(), err.body_text())
    }
}

/// Build the application router.
pub fn router(config: Arc<AnalysisConfig>) -> Router {
    // The PDF part is capped exactly in `read_form`; the body limit only
    // stops requests that could never fit.
    let body_limit = config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);
    let state = AppState { config };

    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/analyze", axum::routing::post(api_analyze))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the dashboard until the process is stopped.
pub async fn serve(addr: SocketAddr, config: AnalysisConfig) -> Result<(), TextLensError> {
    let app = router(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TextLensError::Server {
            addr: addr.to_string(),
            source: e,
        })?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| TextLensError::Server {
            addr: addr.to_string(),
            source: e,
        })
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render("", None, state.config.top_n))
}

async fn submit(State(state): State<AppState>, multipart: Multipart) -> Result<Html<String>, AppError> {
    let form = read_form(multipart, state.config.max_upload_bytes).await?;
    let pasted = form.text.clone().unwrap_or_default();
    let source = input::select_source(form.pdf, form.text);

    let config = Arc::clone(&state.config);
    let report = run_blocking(source, config).await?;
    Ok(Html(page::render(&pasted, Some(&report), state.config.top_n)))
}

async fn api_analyze(
    State(state): State<AppState>,
    Query(params): Query<ApiParams>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let form = read_form(multipart, state.config.max_upload_bytes).await?;
    let source = input::select_source(form.pdf, form.text);

    let mut config = (*state.config).clone();
    config.render_charts = params.charts;
    let report = run_blocking(source, Arc::new(config)).await?;
    Ok(Json(report))
}

async fn healthz() -> &'static str {
    "ok"
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn read_form(mut multipart: Multipart, max_bytes: usize) -> Result<FormInput, AppError> {
    let mut form = FormInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pdf" => {
                let bytes = field.bytes().await?;
                if bytes.len() > max_bytes {
                    return Err(AppError(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("upload exceeds {max_bytes} bytes"),
                    ));
                }
                debug!("Received pdf part ({} bytes)", bytes.len());
                form.pdf = Some(bytes.to_vec());
            }
            "text" => {
                form.text = Some(field.text().await?);
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    Ok(form)
}

async fn run_blocking(
    source: Option<RawTextSource>,
    config: Arc<AnalysisConfig>,
) -> Result<AnalysisReport, AppError> {
    tokio::task::spawn_blocking(move || run::run(source, &config))
        .await
        .map_err(|e| {
            AppError(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("analysis task failed: {e}"),
            )
        })
}
