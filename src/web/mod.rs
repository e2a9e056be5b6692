// Web server: Axum backend plus the embedded studio page.
//
// The static frontend under assets/ is embedded at compile time via
// include_dir!. All /api/* routes serve JSON; every other path serves a
// file from the embedded directory, falling back to index.html.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::posts::parser::PostParser;

pub mod controller;
pub mod handlers;

use controller::CarouselController;

// Embed the studio page at compile time. Plain HTML/CSS/JS, no build step.
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// None while GEMINI_API_KEY is unset; generation requests then fail
    /// with a configuration error instead of the server refusing to boot.
    pub gemini: Option<Arc<GeminiClient>>,
    pub parser: Arc<PostParser>,
    pub controller: Arc<CarouselController>,
    /// Held for the duration of one generate cycle; try_lock failure
    /// means another generation is in flight.
    pub generation_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let gemini = if config.gemini_api_key.is_empty() {
            warn!("GEMINI_API_KEY not set; generation requests will fail until it is");
            None
        } else {
            Some(Arc::new(GeminiClient::new(
                &config.gemini_api_url,
                &config.gemini_model,
                &config.gemini_api_key,
            )?))
        };

        let controller = CarouselController::new(Duration::from_secs(config.autoplay_secs));

        Ok(Self {
            config: Arc::new(config),
            gemini,
            parser: Arc::new(PostParser::new()),
            controller: Arc::new(controller),
            generation_lock: Arc::new(Mutex::new(())),
        })
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let state = AppState::new(config)?;
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Post studio listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/gemini",
            post(handlers::proxy::forward).fallback(handlers::proxy::method_not_allowed),
        )
        .route("/api/generate", post(handlers::generate::generate))
        .route("/api/posts", get(handlers::carousel::get_posts))
        .route("/api/carousel/next", post(handlers::carousel::next))
        .route("/api/carousel/previous", post(handlers::carousel::previous))
        .route("/api/carousel/goto", post(handlers::carousel::go_to))
        .route("/api/carousel/clipboard", get(handlers::carousel::clipboard))
        .route("/api/carousel/events", get(handlers::carousel::events))
        .fallback(serve_assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deploy health check. Always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve the embedded frontend for all non-API paths. Unknown paths fall
/// back to index.html.
async fn serve_assets(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(file) = ASSETS.get_file(path) {
        return asset_response(file.contents(), path);
    }

    match ASSETS.get_file("index.html") {
        Some(index) => asset_response(index.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Web assets not found."),
        )
            .into_response(),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
