//! Web variant: a small axum app around the same generation core.
//!
//! ## Routes
//!
//! - `GET /` — HTML form (data, size, border, error-correction level)
//! - `POST /` — form submission; re-renders the page with the QR embedded
//!   as a base64 data URL, or with the error message and a 4xx status
//! - `GET /qr` — raw image endpoint; query params `data` plus optional
//!   `size`, `border`, `level`, `format`; responds with the image bytes and
//!   the matching content type
//! - `GET /health` — liveness probe
//!
//! Handlers are stateless: each request builds its own
//! [`GenerationRequest`], calls [`generate`], and streams the result. The
//! shared state is only the backend, which holds no mutable data. Generation
//! is cheap enough that handlers call the synchronous core inline.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/) — type-safe
//! templates, auto-escaped interpolation, no template files to ship.

use crate::encoding::{BackendError, RustBackend};
use crate::generate::{generate, GenerateError};
use crate::request::{ErrorCorrection, GenerationRequest, OutputFormat};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use maud::{html, Markup, DOCTYPE};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    backend: Arc<RustBackend>,
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/qr", get(qr_image))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, create_router(AppState::default())).await
}

/// Request parameters, shared by the query and form surfaces.
///
/// Number fields accept the empty string as "use the default" so a cleared
/// form input behaves like an untouched one.
#[derive(Debug, Deserialize)]
struct QrParams {
    #[serde(default)]
    data: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    size: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    border: Option<u32>,
    #[serde(default)]
    level: Option<ErrorCorrection>,
    #[serde(default)]
    format: Option<OutputFormat>,
}

impl QrParams {
    fn into_request(self) -> GenerationRequest {
        let defaults = GenerationRequest::new(self.data);
        GenerationRequest {
            size: self.size.unwrap_or(defaults.size),
            border: self.border.unwrap_or(defaults.border),
            level: self.level.unwrap_or(defaults.level),
            format: self.format.unwrap_or(defaults.format),
            ..defaults
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn error_status(err: &GenerateError) -> StatusCode {
    if err.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else if matches!(
        err,
        GenerateError::Encoding(BackendError::CapacityExceeded)
    ) {
        // Well-formed request, payload cannot be encoded at this level
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Raw image endpoint: the generated QR as the response body.
#[instrument(skip_all)]
async fn qr_image(State(state): State<AppState>, Query(params): Query<QrParams>) -> Response {
    let request = params.into_request();
    match generate(state.backend.as_ref(), &request) {
        Ok(result) => {
            info!(bytes = result.bytes.len(), format = ?result.format, "generated");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, result.content_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"qr.{}\"", result.format.extension()),
                    ),
                ],
                result.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(%err, "generation failed");
            (error_status(&err), err.to_string()).into_response()
        }
    }
}

/// Form page, no result yet.
async fn index() -> Markup {
    page(&FormView::default())
}

/// Form submission: same page, with either the embedded image or the error.
#[instrument(skip_all)]
async fn submit(State(state): State<AppState>, Form(params): Form<QrParams>) -> Response {
    let request = QrParams {
        // The embedded preview is always PNG, whatever the raw endpoint allows
        format: Some(OutputFormat::Png),
        ..params
    }
    .into_request();

    let view = FormView {
        data: request.payload.clone(),
        size: request.size,
        border: request.border,
        level: request.level,
        ..FormView::default()
    };

    match generate(state.backend.as_ref(), &request) {
        Ok(result) => {
            let data_url = format!("data:image/png;base64,{}", BASE64.encode(&result.bytes));
            page(&FormView {
                qr_data_url: Some(data_url),
                ..view
            })
            .into_response()
        }
        Err(err) => {
            warn!(%err, "form generation failed");
            (
                error_status(&err),
                page(&FormView {
                    error: Some(err.to_string()),
                    ..view
                }),
            )
                .into_response()
        }
    }
}

/// Everything the form page needs to re-render after a submission.
struct FormView {
    data: String,
    size: u32,
    border: u32,
    level: ErrorCorrection,
    qr_data_url: Option<String>,
    error: Option<String>,
}

impl Default for FormView {
    fn default() -> Self {
        let defaults = GenerationRequest::new("");
        Self {
            data: String::new(),
            size: defaults.size,
            border: defaults.border,
            level: defaults.level,
            qr_data_url: None,
            error: None,
        }
    }
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:34rem;margin:3rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem}\
input,select{width:100%;padding:.4rem;box-sizing:border-box}\
button{margin-top:1rem;padding:.5rem 1.5rem}\
.error{color:#b00020}\
img{display:block;margin:1.5rem auto;image-rendering:pixelated}";

fn page(view: &FormView) -> Markup {
    let levels = [
        (ErrorCorrection::Low, "Low (~7%)"),
        (ErrorCorrection::Medium, "Medium (~15%)"),
        (ErrorCorrection::Quartile, "Quartile (~25%)"),
        (ErrorCorrection::High, "High (~30%)"),
    ];
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "QR code generator" }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                h1 { "QR code generator" }
                form method="post" action="/" {
                    label for="data" { "Text or URL" }
                    input type="text" id="data" name="data" value=(view.data);
                    label for="size" { "Module size (px)" }
                    input type="number" id="size" name="size" min="1" value=(view.size);
                    label for="border" { "Border (modules)" }
                    input type="number" id="border" name="border" min="0" value=(view.border);
                    label for="level" { "Error correction" }
                    select id="level" name="level" {
                        @for (level, label) in levels {
                            option value=(level_value(level)) selected[view.level == level] {
                                (label)
                            }
                        }
                    }
                    button type="submit" { "Generate" }
                }
                @if let Some(error) = &view.error {
                    p.error { (error) }
                }
                @if let Some(url) = &view.qr_data_url {
                    img src=(url) alt="Generated QR code";
                }
            }
        }
    }
}

fn level_value(level: ErrorCorrection) -> &'static str {
    match level {
        ErrorCorrection::Low => "low",
        ErrorCorrection::Medium => "medium",
        ErrorCorrection::Quartile => "quartile",
        ErrorCorrection::High => "high",
    }
}
