// POST /api/generate: the full generation cycle for a theme.
//
// Runs prompt → Gemini → parse and loads the result into the carousel,
// all within one request. On any failure the carousel is fully reset
// (posts dropped, timer stopped) before the error goes out, so the page
// can never keep cycling stale slides under an error banner.
//
// Only one generation runs at a time; a concurrent request gets 409.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::GenerateError;
use crate::posts::prompt::build_prompt;
use crate::posts::Post;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub theme: String,
    #[serde(default)]
    pub extra_instructions: String,
}

/// Generate three posts for a theme and put them on the carousel.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Corpo da requisição inválido. Envie JSON.",
        );
    };

    let theme = request.theme.trim();
    if theme.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Por favor, digite um tema válido");
    }

    let Ok(_running) = state.generation_lock.try_lock() else {
        return api_error(StatusCode::CONFLICT, "Uma geração já está em andamento");
    };

    info!(theme, "generating posts");
    match run_cycle(&state, theme, &request.extra_instructions).await {
        Ok(posts) => {
            let count = posts.len();
            state.controller.show(posts.clone()).await;
            info!(posts = count, "posts ready");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "posts": posts, "currentIndex": 0 })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "generation failed");
            state.controller.reset().await;
            api_error(e.status_code(), &e.to_string())
        }
    }
}

async fn run_cycle(
    state: &AppState,
    theme: &str,
    extra_instructions: &str,
) -> Result<Vec<Post>, GenerateError> {
    let client = state.gemini.as_ref().ok_or(GenerateError::MissingApiKey)?;
    let prompt = build_prompt(theme, extra_instructions);
    let text = client.generate_text(&prompt).await?;
    state.parser.parse(&text)
}
