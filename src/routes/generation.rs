//! Generation API handlers.
//!
//! DESIGN
//! ======
//! Generation is streamed: the handler validates, spawns the facade onto its
//! own task, and adapts the event channel into an SSE body framed as
//! `data: {json}\n\n` lines with a `data: [DONE]\n\n` sentinel at the end.
//! Dropping the response drops the receiver, which cancels the producer.
//! Everything else here is a plain JSON round trip.

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::event::{AgentEvent, ErrorCode, EventSink};
use crate::pipeline::assemble::{self, ThemeSummary};
use crate::plan::GenerateRequest;
use crate::services::generate::generate;
use crate::services::knowledge::{self, TopicInfo};
use crate::services::suggest::{self, SuggestRequest};
use crate::state::AppState;

/// Events buffered per request. Small keeps production pull-paced behind
/// slow SSE consumers.
const EVENT_CHANNEL_CAPACITY: usize = 16;

const DONE_FRAME: &str = "data: [DONE]\n\n";

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/agent`: stream one presentation generation as SSE.
pub async fn generate_presentation(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    if req.knowledge_topic().is_none_or(str::is_empty) || req.deck_type.is_none() {
        return bad_request("topic/knowledgeSource and deckType are required");
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        topic = req.knowledge_topic().unwrap_or_default(),
        output_format = ?req.output_format,
        "api: generation requested"
    );

    let (sink, rx) = EventSink::channel(EVENT_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        if let Err(e) = generate(&state, &req, &sink).await {
            error!(%request_id, code = e.error_code(), error = %e, "api: generation failed");
            let _ = sink.send(AgentEvent::error(e.to_string())).await;
        }
    });

    sse_response(rx)
}

/// `POST /api/agent/suggest-topics`: three topic-set suggestions for a
/// titled presentation.
pub async fn suggest_topics(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Response {
    let source = req.knowledge_source.as_deref().unwrap_or("");
    let title = req.title.as_deref().map_or("", str::trim);
    if source.is_empty() || title.is_empty() {
        return bad_request("knowledgeSource and title are required");
    }

    let sets = suggest::suggest(&state, source, title).await;
    Json(serde_json::json!({ "suggestions": sets })).into_response()
}

/// `GET /api/themes`: HTML theme catalog.
pub async fn list_themes(State(state): State<AppState>) -> Json<Vec<ThemeSummary>> {
    Json(assemble::list_themes(&state.templates_dir))
}

/// `GET /api/topics`: knowledge packs available on disk.
pub async fn list_topics(State(state): State<AppState>) -> Json<Vec<TopicInfo>> {
    Json(knowledge::available_topics(&state.knowledge_dir))
}

// =============================================================================
// RESPONSE PLUMBING
// =============================================================================

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Frame one event as an SSE data line.
fn frame_event(event: &AgentEvent) -> String {
    match serde_json::to_string(event) {
        Ok(json) => format!("data: {json}\n\n"),
        Err(e) => {
            error!(error = %e, "sse: event serialization failed");
            "data: {\"type\":\"error\",\"data\":{\"message\":\"event serialization failed\"}}\n\n"
                .into()
        }
    }
}

/// Adapt the event channel into a `text/event-stream` response, appending
/// the `[DONE]` sentinel once the producer finishes.
fn sse_response(rx: mpsc::Receiver<AgentEvent>) -> Response {
    let stream = futures::stream::unfold(Some(rx), |slot| async move {
        let mut rx = slot?;
        match rx.recv().await {
            Some(event) => Some((frame_event(&event), Some(rx))),
            None => Some((DONE_FRAME.to_string(), None)),
        }
    })
    .map(Ok::<_, std::convert::Infallible>);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;
