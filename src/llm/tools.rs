//! Slidesmith tool definitions for the AI authoring session.
//!
//! Tool names match what the orchestrator dispatches on in
//! `services::agent`, so renaming one here means renaming it there.

use super::types::Tool;

/// Build the set of tools available during slide authoring.
///
/// The model researches with `search_knowledge` and `web_search`, then emits
/// one `generate_slide` call per slide. Precanned layouts (demo, youtube)
/// are injected by the merge step and are deliberately absent from the
/// layout enum.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn authoring_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "search_knowledge".into(),
            description: "Search the local knowledge library for information about a topic. Returns curated markdown content.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "topic": { "type": "string", "description": "The topic to search for (e.g. 'microsoft-foundry', 'copilot-sdk', 'copilot', 'copilot-cli')" },
                    "section": { "type": "string", "description": "Optional specific section within the topic" }
                },
                "required": ["topic"]
            }),
        },
        Tool {
            name: "web_search".into(),
            description: "Search the web for current information about a topic. Use this to find the latest data, statistics, news, and developments. Returns search results with titles, URLs, and descriptions.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "The search query to find relevant web information" },
                    "count": { "type": "number", "description": "Number of results to return (max 20)" }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "generate_slide".into(),
            description: "Generate a single presentation slide. Call this tool once for each slide you want to create. Use varied layouts for a visually engaging deck.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "layout": {
                        "type": "string",
                        "enum": ["title", "content", "split", "code", "stat", "comparison", "timeline", "quote", "bento", "chart"],
                        "description": "Visual layout for the slide"
                    },
                    "title": { "type": "string", "description": "Slide title" },
                    "keyPoints": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Key points shown on the slide, one line each"
                    },
                    "speakerNotes": { "type": "string", "description": "Optional speaker notes for the presenter" },
                    "codeExample": {
                        "type": "object",
                        "properties": {
                            "language": { "type": "string", "description": "Language for syntax context, e.g. 'typescript'" },
                            "code": { "type": "string", "description": "The code to display" },
                            "caption": { "type": "string", "description": "Optional caption shown under the code" }
                        },
                        "required": ["language", "code"],
                        "description": "Code example for 'code' layout slides"
                    },
                    "chartData": {
                        "type": "object",
                        "properties": {
                            "type": { "type": "string", "enum": ["bar", "line", "pie", "donut"], "description": "Chart kind" },
                            "data": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "label": { "type": "string" },
                                        "value": { "type": "number" }
                                    },
                                    "required": ["label", "value"]
                                },
                                "description": "Labeled data points"
                            }
                        },
                        "required": ["type", "data"],
                        "description": "Chart data for 'chart' layout slides"
                    }
                },
                "required": ["layout", "title", "keyPoints"]
            }),
        },
    ]
}

/// Build the single tool used by topic suggestion.
#[must_use]
pub fn suggest_topic_sets_tool() -> Tool {
    Tool {
        name: "suggest_topic_sets".into(),
        description: "Submit 3 different sets of presentation topics for the user to choose from.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "sets": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 3,
                    "items": {
                        "type": "object",
                        "properties": {
                            "label": { "type": "string", "description": "Short label for this set, e.g. 'Technical Deep Dive'" },
                            "topics": {
                                "type": "array",
                                "items": { "type": "string" },
                                "minItems": 5,
                                "maxItems": 10,
                                "description": "List of slide topic titles"
                            }
                        },
                        "required": ["label", "topics"]
                    }
                }
            },
            "required": ["sets"]
        }),
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
