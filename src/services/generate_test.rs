use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;
use crate::event::AgentEvent;
use crate::llm::LlmChat;
use crate::llm::types::{ChatResponse, Message, Tool};
use crate::state::test_helpers::test_app_state;

/// Always fails, counting how often the agent consulted it.
struct FailingLlm {
    calls: Mutex<usize>,
}

impl FailingLlm {
    fn new() -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(0) })
    }
}

#[async_trait]
impl LlmChat for FailingLlm {
    async fn chat(
        &self,
        _max_tokens: u32,
        _system: &str,
        _messages: &[Message],
        _tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        *self.calls.lock().expect("lock") += 1;
        Err(LlmError::ApiRequest("connection refused".into()))
    }
}

async fn drain(mut rx: tokio::sync::mpsc::Receiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

fn statuses(events: &[AgentEvent]) -> Vec<(String, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            AgentEvent::Status { message, step } => Some((message.clone(), *step)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// FALLBACK GUARANTEE
// =============================================================================

#[tokio::test(start_paused = true)]
async fn agent_failure_falls_back_to_demo_mode() {
    let dir = TempDir::new().expect("tempdir");
    let mut state = test_app_state(dir.path(), dir.path());
    let failing = FailingLlm::new();
    state.llm = Some(failing.clone());
    let req = GenerateRequest {
        knowledge_source: Some("copilot".into()),
        slide_count: 4,
        ..GenerateRequest::default()
    };
    let (sink, rx) = EventSink::channel(64);

    generate(&state, &req, &sink).await.expect("generate");
    drop(sink);
    let events = drain(rx).await;

    assert_eq!(*failing.calls.lock().expect("lock"), 1);

    // One step-0 narration, then a full demo run; never an error event.
    let narration = statuses(&events);
    let fallback: Vec<&(String, u32)> = narration
        .iter()
        .filter(|(message, _)| message.contains("Falling back to demo mode"))
        .collect();
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].1, 0);
    assert!(fallback[0].0.starts_with("Agent backend unavailable ("));

    assert!(!events.iter().any(|e| matches!(e, AgentEvent::Error { .. })));
    match events.last() {
        Some(AgentEvent::Complete { plan }) => assert_eq!(plan.slides.len(), 4),
        other => panic!("expected complete event, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn force_mock_skips_the_agent_entirely() {
    let dir = TempDir::new().expect("tempdir");
    let mut state = test_app_state(dir.path(), dir.path());
    let failing = FailingLlm::new();
    state.llm = Some(failing.clone());
    state.force_mock = true;
    let req = GenerateRequest {
        knowledge_source: Some("copilot".into()),
        slide_count: 3,
        ..GenerateRequest::default()
    };
    let (sink, rx) = EventSink::channel(64);

    generate(&state, &req, &sink).await.expect("generate");
    drop(sink);
    let events = drain(rx).await;

    assert_eq!(*failing.calls.lock().expect("lock"), 0);

    let narration = statuses(&events);
    assert_eq!(narration[0], ("Loading knowledge pack...".into(), 1));
    assert!(!narration.iter().any(|(message, _)| message.contains("Falling back")));
}

#[tokio::test(start_paused = true)]
async fn missing_llm_narrates_and_runs_demo() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = GenerateRequest {
        knowledge_source: Some("copilot-cli".into()),
        slide_count: 3,
        ..GenerateRequest::default()
    };
    let (sink, rx) = EventSink::channel(64);

    generate(&state, &req, &sink).await.expect("generate");
    drop(sink);
    let events = drain(rx).await;

    let narration = statuses(&events);
    assert_eq!(narration[0], ("LLM not configured. Falling back to demo mode.".into(), 0));
    assert!(matches!(events.last(), Some(AgentEvent::Complete { .. })));
}

// =============================================================================
// CANCELLATION
// =============================================================================

#[tokio::test]
async fn cancelled_stream_is_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_app_state(dir.path(), dir.path());
    let req = GenerateRequest { knowledge_source: Some("copilot".into()), ..GenerateRequest::default() };
    let (sink, rx) = EventSink::channel(1);
    drop(rx);

    generate(&state, &req, &sink).await.expect("cancellation is quiet");
}

#[tokio::test]
async fn cancellation_during_agent_does_not_fall_back() {
    let dir = TempDir::new().expect("tempdir");
    let mut state = test_app_state(dir.path(), dir.path());
    let failing = FailingLlm::new();
    state.llm = Some(failing.clone());
    let req = GenerateRequest { knowledge_source: Some("copilot".into()), ..GenerateRequest::default() };
    let (sink, rx) = EventSink::channel(1);
    drop(rx);

    generate(&state, &req, &sink).await.expect("cancellation is quiet");
    // The first status send fails, so the backend is never consulted and no
    // demo run is attempted.
    assert_eq!(*failing.calls.lock().expect("lock"), 0);
}

// =============================================================================
// ERROR CODES
// =============================================================================

#[test]
fn error_codes_and_retryability() {
    let cancelled = GenerateError::Cancelled(SinkClosed);
    assert_eq!(cancelled.error_code(), "E_STREAM_CANCELLED");
    assert!(!cancelled.retryable());

    let timeout = GenerateError::SessionTimeout(30);
    assert_eq!(timeout.error_code(), "E_SESSION_TIMEOUT");
    assert!(timeout.retryable());
    assert_eq!(timeout.to_string(), "authoring session timed out after 30s");

    let llm = GenerateError::Llm(LlmError::ApiRequest("connection refused".into()));
    assert_eq!(llm.error_code(), "E_LLM_ERROR");
    assert!(llm.retryable());

    let assemble = GenerateError::Assemble(AssembleError::ThemeRead(
        "themes/missing.json".into(),
        std::io::Error::new(std::io::ErrorKind::NotFound, "nf"),
    ));
    assert_eq!(assemble.error_code(), "E_ASSEMBLE");
    assert!(!assemble.retryable());
}
