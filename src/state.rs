//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client plus the generator's runtime knobs:
//! data directories, the demo-mode override, and the authoring session
//! budget. Everything is immutable after startup, so handlers clone freely.

use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::LlmChat;

pub const DEFAULT_KNOWLEDGE_DIR: &str = "data/knowledge";
pub const DEFAULT_TEMPLATES_DIR: &str = "data/templates";
pub const DEFAULT_AGENT_WAIT_TIMEOUT_SECS: u64 = 180;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Root directory of the markdown knowledge library.
    pub knowledge_dir: PathBuf,
    /// Directory holding `shell.html` and `themes/`.
    pub templates_dir: PathBuf,
    /// Force the demo-mode generator even when an LLM is configured.
    pub force_mock: bool,
    /// Tavily Search API key for the `web_search` tool. `None` disables it.
    pub tavily_api_key: Option<String>,
    /// Wall-clock budget for one authoring session, in seconds.
    pub agent_wait_secs: u64,
}

impl AppState {
    /// Build state from environment variables.
    ///
    /// - `KNOWLEDGE_DIR`: default `data/knowledge`
    /// - `TEMPLATES_DIR`: default `data/templates`
    /// - `USE_MOCK_AGENT`: "true" forces the demo-mode generator
    /// - `TAVILY_API_KEY`: enables the `web_search` tool
    /// - `AGENT_WAIT_TIMEOUT_SECS`: default 180
    #[must_use]
    pub fn from_env(llm: Option<Arc<dyn LlmChat>>) -> Self {
        let knowledge_dir =
            PathBuf::from(std::env::var("KNOWLEDGE_DIR").unwrap_or_else(|_| DEFAULT_KNOWLEDGE_DIR.into()));
        let templates_dir =
            PathBuf::from(std::env::var("TEMPLATES_DIR").unwrap_or_else(|_| DEFAULT_TEMPLATES_DIR.into()));
        let force_mock = std::env::var("USE_MOCK_AGENT").is_ok_and(|v| v == "true");
        let tavily_api_key = std::env::var("TAVILY_API_KEY").ok().filter(|k| !k.is_empty());
        let agent_wait_secs = env_parse("AGENT_WAIT_TIMEOUT_SECS", DEFAULT_AGENT_WAIT_TIMEOUT_SECS);

        Self { llm, knowledge_dir, templates_dir, force_mock, tavily_api_key, agent_wait_secs }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
