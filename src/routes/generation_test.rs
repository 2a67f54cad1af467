use std::fs;

use tempfile::TempDir;

use super::*;
use crate::plan::DeckType;
use crate::state::test_helpers::test_app_state;

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

fn valid_request() -> GenerateRequest {
    GenerateRequest {
        knowledge_source: Some("copilot".into()),
        deck_type: Some(DeckType::Overview),
        slide_count: 3,
        ..GenerateRequest::default()
    }
}

// =============================================================================
// GENERATION
// =============================================================================

#[tokio::test]
async fn generate_rejects_missing_topic() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = GenerateRequest { deck_type: Some(DeckType::Overview), ..GenerateRequest::default() };

    let response = generate_presentation(State(state), Json(req)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "topic/knowledgeSource and deckType are required");
}

#[tokio::test]
async fn generate_rejects_missing_deck_type() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = GenerateRequest { knowledge_source: Some("copilot".into()), ..GenerateRequest::default() };

    let response = generate_presentation(State(state), Json(req)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn generate_streams_frames_until_done() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());

    let response = generate_presentation(State(state), Json(valid_request())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-cache")
    );

    let text = body_text(response).await;
    let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();

    assert_eq!(*frames.last().expect("frames"), "data: [DONE]");
    assert!(frames.iter().all(|f| f.starts_with("data: ")));

    let events: Vec<serde_json::Value> = frames[..frames.len() - 1]
        .iter()
        .map(|f| serde_json::from_str(&f["data: ".len()..]).expect("frame json"))
        .collect();
    assert_eq!(events[0]["type"], "status");
    assert!(events.iter().any(|e| e["type"] == "complete"));
    assert!(events.iter().all(|e| e["type"] != "error"));
}

// =============================================================================
// SUGGESTIONS
// =============================================================================

#[tokio::test]
async fn suggest_rejects_blank_title() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = SuggestRequest { knowledge_source: Some("copilot".into()), title: Some("   ".into()) };

    let response = suggest_topics(State(state), Json(req)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "knowledgeSource and title are required");
}

#[tokio::test]
async fn suggest_returns_three_sets() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = SuggestRequest {
        knowledge_source: Some("copilot".into()),
        title: Some("Ship It".into()),
    };

    let response = suggest_topics(State(state), Json(req)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let sets = body["suggestions"].as_array().expect("array");
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0]["label"], "Broad Overview");
    assert_eq!(sets[0]["topics"][0], "Introduction to Ship It");
}

// =============================================================================
// LISTINGS
// =============================================================================

#[tokio::test]
async fn listings_read_from_data_directories() {
    let templates = TempDir::new().expect("tempdir");
    let packs = TempDir::new().expect("tempdir");
    fs::create_dir(templates.path().join("themes")).expect("mkdir themes");
    fs::write(
        templates.path().join("themes").join("cyan-violet.json"),
        serde_json::json!({
            "name": "Cyan Violet", "id": "cyan-violet", "description": "d",
            "colors": {
                "primary": "#fff", "secondary": "#fff", "tertiary": "#fff",
                "background": "#000", "surface": "#111", "surfaceHover": "#222",
                "border": "#333", "borderHover": "#444", "text": "#fff",
                "textMuted": "#aaa", "textSubtle": "#888"
            },
            "gradients": {"title": "g", "progressBar": "g", "accent": "g", "orb1": "g", "orb2": "g"},
            "css": ":root {}"
        })
        .to_string(),
    )
    .expect("write theme");
    fs::create_dir(packs.path().join("copilot")).expect("mkdir pack");
    fs::write(packs.path().join("copilot").join("overview.md"), "x").expect("write section");
    let state = test_app_state(packs.path(), templates.path());

    let Json(themes) = list_themes(State(state.clone())).await;
    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0].id, "cyan-violet");
    assert_eq!(themes[0].name, "Cyan Violet");

    let Json(topics) = list_topics(State(state)).await;
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].topic, "copilot");
    assert_eq!(topics[0].sections, vec!["overview"]);
}

// =============================================================================
// SSE FRAMING
// =============================================================================

#[test]
fn frame_event_shapes_sse_line() {
    let frame = frame_event(&AgentEvent::status("Planning presentation structure...", 2));
    assert_eq!(
        frame,
        "data: {\"type\":\"status\",\"data\":{\"message\":\"Planning presentation structure...\",\"step\":2}}\n\n"
    );
}
