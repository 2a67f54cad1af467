//! Topic suggestion service: three angles on one presentation title.
//!
//! DESIGN
//! ======
//! One-shot LLM call with a single forced tool, `suggest_topic_sets`. The
//! response must contain exactly three sets; anything else (no tool call,
//! malformed sets, transport error, timeout) falls back to canned
//! suggestions derived from the title, so the route always answers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::tools::suggest_topic_sets_tool;
use crate::llm::types::{Content, ContentBlock, Message};
use crate::state::AppState;

use super::knowledge;

const SUGGEST_WAIT_TIMEOUT_SECS: u64 = 60;
const SUGGEST_MAX_TOKENS: u32 = 4096;
const KNOWLEDGE_SUMMARY_MAX_CHARS: usize = 3000;

const SUGGEST_SYSTEM_PROMPT: &str =
    "You are a presentation planning expert. Given a presentation title and knowledge source content, generate 3 different sets of slide topics for the presentation.\n\
     \n\
     Each set should take a different angle:\n\
     - Set 1: A broad overview (covering wide ground)\n\
     - Set 2: A technical deep dive (more detail-oriented)\n\
     - Set 3: A practical/hands-on approach (use cases, demos, how-tos)\n\
     \n\
     Each set should have 6-10 topic titles. Topics should be concise (3-8 words each) and flow logically from intro to conclusion.\n\
     \n\
     Call suggest_topic_sets with all 3 sets.";

// =============================================================================
// TYPES
// =============================================================================

/// Request body for the suggest-topics route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestRequest {
    pub knowledge_source: Option<String>,
    pub title: Option<String>,
}

/// One suggested slide-topic list with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSet {
    pub label: String,
    pub topics: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum SuggestError {
    #[error(transparent)]
    Llm(#[from] crate::llm::types::LlmError),
    #[error("model did not call suggest_topic_sets")]
    NoToolCall,
    #[error("malformed suggestion sets: {0}")]
    BadSets(#[source] serde_json::Error),
    #[error("expected 3 suggestion sets, got {0}")]
    WrongCount(usize),
}

// =============================================================================
// SERVICE
// =============================================================================

/// Produce three topic sets for a titled presentation over one knowledge
/// pack. Never fails: every LLM problem degrades to canned suggestions.
pub async fn suggest(state: &AppState, knowledge_source: &str, title: &str) -> Vec<TopicSet> {
    if state.force_mock {
        info!("suggest: USE_MOCK_AGENT enabled, using canned suggestions");
        return mock_suggestions(title);
    }
    let Some(llm) = state.llm.clone() else {
        info!("suggest: no LLM configured, using canned suggestions");
        return mock_suggestions(title);
    };

    let budget = Duration::from_secs(SUGGEST_WAIT_TIMEOUT_SECS);
    match tokio::time::timeout(budget, llm_suggestions(&llm, state, knowledge_source, title)).await {
        Ok(Ok(sets)) => sets,
        Ok(Err(e)) => {
            warn!(error = %e, "suggest: LLM suggestion failed, using canned suggestions");
            mock_suggestions(title)
        }
        Err(_) => {
            warn!(budget_secs = SUGGEST_WAIT_TIMEOUT_SECS, "suggest: timed out, using canned suggestions");
            mock_suggestions(title)
        }
    }
}

async fn llm_suggestions(
    llm: &Arc<dyn LlmChat>,
    state: &AppState,
    knowledge_source: &str,
    title: &str,
) -> Result<Vec<TopicSet>, SuggestError> {
    let summary = knowledge_summary(&state.knowledge_dir, knowledge_source);
    let user_prompt = format!(
        "Generate 3 sets of slide topics for a presentation titled \"{title}\" about the knowledge source content below.\n\
         \n\
         ### Knowledge Source Content (summary):\n\
         {summary}\n\
         \n\
         Call suggest_topic_sets with your 3 sets."
    );

    let tools = [suggest_topic_sets_tool()];
    let messages = [Message { role: "user".into(), content: Content::Text(user_prompt) }];
    let response = llm
        .chat(SUGGEST_MAX_TOKENS, SUGGEST_SYSTEM_PROMPT, &messages, Some(&tools))
        .await?;

    let sets_value = response
        .content
        .iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } if name == "suggest_topic_sets" => {
                Some(input.get("sets").cloned().unwrap_or(serde_json::Value::Null))
            }
            _ => None,
        })
        .ok_or(SuggestError::NoToolCall)?;

    let sets: Vec<TopicSet> = serde_json::from_value(sets_value).map_err(SuggestError::BadSets)?;
    if sets.len() != 3 {
        return Err(SuggestError::WrongCount(sets.len()));
    }

    info!(title, "suggest: LLM produced 3 topic sets");
    Ok(sets)
}

/// Knowledge pack text capped for prompting, with the same directory alias
/// fallback the authoring tools use.
fn knowledge_summary(root: &Path, topic: &str) -> String {
    let mut content = knowledge::load(root, topic, None);
    let resolved = knowledge::resolve_topic_dir(topic);
    if content.contains("not found") && resolved != topic {
        content = knowledge::load(root, resolved, None);
    }
    content.chars().take(KNOWLEDGE_SUMMARY_MAX_CHARS).collect()
}

// =============================================================================
// CANNED SUGGESTIONS
// =============================================================================

#[must_use]
pub fn mock_suggestions(title: &str) -> Vec<TopicSet> {
    vec![
        TopicSet {
            label: "Broad Overview".into(),
            topics: vec![
                format!("Introduction to {title}"),
                "Key Concepts and Terminology".into(),
                "Core Features and Capabilities".into(),
                "Architecture Overview".into(),
                "Integration Points".into(),
                "Getting Started".into(),
                "Best Practices".into(),
                "Summary and Next Steps".into(),
            ],
        },
        TopicSet {
            label: "Technical Deep Dive".into(),
            topics: vec![
                format!("{title} — Technical Foundation"),
                "System Architecture and Design".into(),
                "Core APIs and Interfaces".into(),
                "Data Flow and Processing Pipeline".into(),
                "Security and Authentication".into(),
                "Performance and Scalability".into(),
                "Advanced Configuration".into(),
                "Troubleshooting and Debugging".into(),
                "Summary and Resources".into(),
            ],
        },
        TopicSet {
            label: "Practical Guide".into(),
            topics: vec![
                format!("Why {title} Matters"),
                "Setting Up Your Environment".into(),
                "Your First Project — Step by Step".into(),
                "Real-World Use Cases".into(),
                "Live Demo Walkthrough".into(),
                "Common Patterns and Recipes".into(),
                "Team Adoption Strategy".into(),
                "Summary and Action Items".into(),
            ],
        },
    ]
}

#[cfg(test)]
#[path = "suggest_test.rs"]
mod tests;
