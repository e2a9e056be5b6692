// POST /api/gemini: a thin authenticated proxy to generateContent.
//
// Lets the page talk to Gemini without ever seeing the API key. Only the
// `contents` and `generationConfig` fields of the request body are
// forwarded; anything else a client sends is dropped. Success bodies
// pass through verbatim, upstream errors keep their status and message.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::error;

use crate::error::GenerateError;
use crate::web::{api_error, AppState};

/// Forward a generateContent body upstream.
pub async fn forward(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = payload else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Corpo da requisição inválido. Envie JSON.",
        );
    };

    let Some(client) = state.gemini.as_ref() else {
        return api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &GenerateError::MissingApiKey.to_string(),
        );
    };

    let mut forward_body = serde_json::Map::new();
    for key in ["contents", "generationConfig"] {
        if let Some(value) = body.get(key) {
            forward_body.insert(key.to_string(), value.clone());
        }
    }

    match client.generate_content(&Value::Object(forward_body)).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            error!(error = %e, "proxied Gemini call failed");
            api_error(e.status_code(), &e.to_string())
        }
    }
}

/// Fallback for non-POST methods on the proxy route.
pub async fn method_not_allowed() -> Response {
    api_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "Método não permitido. Use POST.",
    )
}
