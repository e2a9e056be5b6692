// Carousel endpoints: posts on screen, navigation, copy text and the
// SSE slide feed.
//
// Navigation is server-authoritative: every click lands here, the
// controller moves the slide and re-arms the autoplay timer, and the
// new frame fans out to every subscribed page through /api/carousel/events.

use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::Stream;
use serde::Deserialize;

use crate::web::{api_error, AppState};

/// GET /api/posts: posts currently on the carousel plus the frame
/// describing the active slide.
pub async fn get_posts(State(state): State<AppState>) -> impl IntoResponse {
    let (posts, frame) = state.controller.snapshot().await;
    Json(serde_json::json!({
        "posts": posts,
        "frame": frame,
        "autoplaySecs": state.config.autoplay_secs,
    }))
}

/// POST /api/carousel/next: advance one slide.
pub async fn next(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.controller.next().await;
    Json(serde_json::json!({ "index": index }))
}

/// POST /api/carousel/previous: step back one slide.
pub async fn previous(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.controller.previous().await;
    Json(serde_json::json!({ "index": index }))
}

#[derive(Debug, Deserialize)]
pub struct GoToRequest {
    pub index: usize,
}

/// POST /api/carousel/goto: jump straight to a slide.
pub async fn go_to(
    State(state): State<AppState>,
    payload: Result<Json<GoToRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return api_error(StatusCode::BAD_REQUEST, "Índice de slide inválido");
    };
    match state.controller.go_to(request.index).await {
        Some(index) => Json(serde_json::json!({ "index": index })).into_response(),
        None => api_error(StatusCode::BAD_REQUEST, "Índice de slide inválido"),
    }
}

/// GET /api/carousel/clipboard: share text for the active slide.
pub async fn clipboard(State(state): State<AppState>) -> Response {
    match state.controller.clipboard_text().await {
        Some(text) => Json(serde_json::json!({ "text": text })).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Nenhum post para copiar"),
    }
}

/// GET /api/carousel/events: SSE stream of slide frames.
///
/// The current frame goes out immediately on connect, then one event per
/// change, so a page that reconnects is in sync before the next tick.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.controller.subscribe();
    let stream = futures::stream::unfold((rx, true), |(mut rx, first)| async move {
        // The connect frame is sent without waiting; afterwards each
        // iteration blocks until the frame actually changes, so every
        // delivered event carries the post-change state.
        if !first {
            rx.changed().await.ok()?;
        }
        let frame = rx.borrow_and_update().clone();
        let event = Event::default().event("slide").json_data(&frame).ok()?;
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
