//! Live authoring orchestrator: LLM prompt, research tools, slide plans.
//!
//! DESIGN
//! ======
//! One generation request is one LLM tool-call conversation. The model
//! researches with `search_knowledge` and `web_search`, then emits one
//! `generate_slide` call per slide; the dispatcher collects the parsed
//! plans into an explicit accumulator. After the conversation the deck is
//! merged with precanned items, wrapped in a `PresentationPlan`, and
//! streamed out per the requested output format.
//!
//! Web search degrades to explanatory strings instead of failing: a deck
//! built from local knowledge alone beats no deck.

use std::fmt::Write;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::event::{AgentEvent, EventSink};
use crate::llm::LlmChat;
use crate::llm::tools::authoring_tools;
use crate::llm::types::{Content, ContentBlock, Message};
use crate::pipeline::{HtmlSlide, assemble, compile};
use crate::plan::{
    ChartData, CodeExample, DeckType, GenerateRequest, OutputFormat, PresentationPlan, SlideLayout, SlidePlan,
};
use crate::state::AppState;

use super::generate::GenerateError;
use super::{knowledge, precanned};

const DEFAULT_AI_MAX_TOOL_ITERATIONS: usize = 10;
const DEFAULT_AI_MAX_TOKENS: u32 = 8192;
const TAVILY_URL: &str = "https://api.tavily.com/search";
const WEB_SEARCH_TIMEOUT_SECS: u64 = 30;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn ai_max_tool_iterations() -> usize {
    static VALUE: OnceLock<usize> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("AI_MAX_TOOL_ITERATIONS", DEFAULT_AI_MAX_TOOL_ITERATIONS))
}

fn ai_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("AI_MAX_TOKENS", DEFAULT_AI_MAX_TOKENS))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one authoring session and stream the deck into `sink`.
///
/// # Errors
///
/// Fails on LLM transport errors, a session exceeding the wall-clock
/// budget, unloadable theme or shell resources, or a dropped receiver.
pub async fn run(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    req: &GenerateRequest,
    sink: &EventSink,
) -> Result<(), GenerateError> {
    let topic = req.knowledge_topic().unwrap_or_default().to_string();
    let deck_type = req.deck_type.unwrap_or_default();
    let ai_slide_count = req.effective_slide_count();

    info!(
        %topic,
        deck_type = deck_type.as_str(),
        theme = %req.theme,
        ai_slide_count,
        "agent: starting generation"
    );
    if let Some(model) = req.model.as_deref() {
        // The model is fixed at client construction; the field is accepted
        // for wire compatibility and logged only.
        debug!(%model, "agent: ignoring per-request model override");
    }

    sink.status("Starting AI authoring session...", 1).await?;

    let system = build_system_prompt(ai_slide_count, req.include_code, req.include_speaker_notes);
    let topics = req.topic_texts();
    let user_prompt = build_user_prompt(
        &topic,
        deck_type,
        &req.theme,
        ai_slide_count,
        &req.prompt,
        topics.as_deref(),
        req.presentation_title.as_deref(),
    );

    sink.status("Searching knowledge library...", 2).await?;

    let budget = Duration::from_secs(state.agent_wait_secs);
    let slides = match tokio::time::timeout(budget, run_tool_loop(state, llm, &system, user_prompt)).await {
        Ok(slides) => slides?,
        Err(_) => return Err(GenerateError::SessionTimeout(state.agent_wait_secs)),
    };

    info!(slides = slides.len(), "agent: authoring complete");

    let final_slides = precanned::merge_deck(req.topic_items.as_deref().unwrap_or_default(), slides);

    let plan = PresentationPlan {
        title: final_slides
            .first()
            .map(|s| s.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled Presentation".into()),
        topic,
        deck_type,
        theme: req.theme.clone(),
        slides: final_slides,
    };

    match req.output_format {
        OutputFormat::Html => emit_html(state, req, plan, sink).await,
        OutputFormat::Slides => emit_slides(plan, sink).await,
    }
}

// =============================================================================
// EMISSION
// =============================================================================

async fn emit_html(
    state: &AppState,
    req: &GenerateRequest,
    plan: PresentationPlan,
    sink: &EventSink,
) -> Result<(), GenerateError> {
    let theme_id = compile::map_to_html_theme(&req.theme);
    let total = plan.slides.len();

    sink.status(format!("Converting {total} slides to HTML..."), 3).await?;

    let mut html_slides: Vec<HtmlSlide> = Vec::with_capacity(total);
    for (i, slide) in plan.slides.iter().enumerate() {
        let html_slide = compile::compile(slide, i);
        sink.send(AgentEvent::HtmlSlide { slide_index: i, total_slides: total, slide: html_slide.clone() })
            .await?;
        sink.status(format!("Converted slide {} of {total} to HTML", i + 1), 3).await?;
        html_slides.push(html_slide);
    }

    sink.status("Assembling HTML presentation...", 4).await?;
    let assembled = assemble::assemble(&state.templates_dir, &plan.title, &html_slides, theme_id)?;

    sink.send(AgentEvent::HtmlComplete { plan, html_content: assembled.html }).await?;
    Ok(())
}

async fn emit_slides(plan: PresentationPlan, sink: &EventSink) -> Result<(), GenerateError> {
    let total = plan.slides.len();

    sink.status(format!("Generating {total} slides..."), 3).await?;
    for (i, slide) in plan.slides.iter().enumerate() {
        sink.send(AgentEvent::Slide { slide_index: i, total_slides: total, slide: slide.clone() })
            .await?;
        sink.status(format!("Generated slide {} of {total}", i + 1), 3).await?;
    }

    sink.status("Finalizing presentation...", 4).await?;
    sink.send(AgentEvent::Complete { plan }).await?;
    Ok(())
}

// =============================================================================
// TOOL LOOP
// =============================================================================

async fn run_tool_loop(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    system: &str,
    user_prompt: String,
) -> Result<Vec<SlidePlan>, GenerateError> {
    let tools = authoring_tools();
    let max_tokens = ai_max_tokens();

    let mut messages = vec![Message { role: "user".into(), content: Content::Text(user_prompt) }];
    let mut slides: Vec<SlidePlan> = Vec::new();

    for iteration in 0..ai_max_tool_iterations() {
        let response = llm.chat(max_tokens, system, &messages, Some(&tools)).await?;

        info!(
            iteration,
            stop_reason = %response.stop_reason,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "agent: LLM response"
        );
        for block in &response.content {
            if let ContentBlock::Text { text } = block {
                debug!(iteration, "agent: {text}");
            }
        }

        // Collect tool_use blocks.
        let tool_calls: Vec<(String, String, serde_json::Value)> = response
            .content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => Some((id.clone(), name.clone(), input.clone())),
                _ => None,
            })
            .collect();

        // No tool calls means the model is done narrating.
        if tool_calls.is_empty() {
            break;
        }

        // Push assistant message with the full content blocks.
        messages.push(Message { role: "assistant".into(), content: Content::Blocks(response.content) });

        // Execute each tool call and collect results.
        let mut tool_results = Vec::new();
        for (tool_id, tool_name, input) in &tool_calls {
            info!(iteration, tool = %tool_name, "agent: executing tool");
            let (content, is_error) = match execute_tool(state, tool_name, input, &mut slides).await {
                Ok(msg) => (msg, None),
                Err(msg) => {
                    warn!(iteration, tool = %tool_name, error = %msg, "agent: tool error");
                    (msg, Some(true))
                }
            };
            tool_results.push(ContentBlock::ToolResult { tool_use_id: tool_id.clone(), content, is_error });
        }

        // Push tool results as a user message.
        messages.push(Message { role: "user".into(), content: Content::Blocks(tool_results) });

        if response.stop_reason != "tool_use" {
            break;
        }
    }

    Ok(slides)
}

// =============================================================================
// TOOL EXECUTION
// =============================================================================

/// Execute one tool call against the slide accumulator.
///
/// `Err` carries a message for the model (`is_error` tool result), never a
/// process failure.
pub(crate) async fn execute_tool(
    state: &AppState,
    tool_name: &str,
    input: &serde_json::Value,
    slides: &mut Vec<SlidePlan>,
) -> Result<String, String> {
    match tool_name {
        "search_knowledge" => {
            let topic = input.get("topic").and_then(|v| v.as_str()).unwrap_or("");
            let section = input.get("section").and_then(|v| v.as_str());
            let content = knowledge::load(&state.knowledge_dir, topic, section);
            let resolved = knowledge::resolve_topic_dir(topic);
            if content.contains("not found") && resolved != topic {
                return Ok(knowledge::load(&state.knowledge_dir, resolved, section));
            }
            Ok(content)
        }
        "web_search" => {
            let query = input.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let count = input
                .get("count")
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(5);
            Ok(tavily_web_search(state.tavily_api_key.as_deref(), query, count).await)
        }
        "generate_slide" => {
            let slide = parse_slide_input(input, slides.len())?;
            let title = slide.title.clone();
            let layout = slide.layout;
            slides.push(slide);
            info!(count = slides.len(), %title, layout = layout.as_str(), "agent: slide created");
            Ok(format!("Slide {} created: \"{title}\" ({} layout)", slides.len(), layout.as_str()))
        }
        _ => Ok(format!("unknown tool: {tool_name}")),
    }
}

fn parse_slide_input(input: &serde_json::Value, index: usize) -> Result<SlidePlan, String> {
    let Some(title) = input.get("title").and_then(|v| v.as_str()) else {
        return Err("generate_slide requires a 'title' string".into());
    };
    let layout = input
        .get("layout")
        .and_then(|v| v.as_str())
        .map_or(SlideLayout::Content, SlideLayout::parse);
    let key_points: Vec<String> = input
        .get("keyPoints")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut slide = SlidePlan::new(index, layout, title, key_points);
    if let Some(notes) = input.get("speakerNotes").and_then(|v| v.as_str()) {
        slide = slide.with_speaker_notes(notes);
    }
    if let Some(value) = input.get("codeExample") {
        match serde_json::from_value::<CodeExample>(value.clone()) {
            Ok(example) => slide = slide.with_code_example(example),
            Err(e) => warn!(error = %e, "agent: discarding malformed codeExample"),
        }
    }
    if let Some(value) = input.get("chartData") {
        match serde_json::from_value::<ChartData>(value.clone()) {
            Ok(chart) => slide = slide.with_chart_data(chart),
            Err(e) => warn!(error = %e, "agent: discarding malformed chartData"),
        }
    }
    Ok(slide)
}

// =============================================================================
// WEB SEARCH
// =============================================================================

#[derive(serde::Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(serde::Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Search the web via the Tavily Search API.
///
/// Every failure mode returns explanatory text for the model rather than an
/// error; a research miss must not abort the authoring session.
async fn tavily_web_search(api_key: Option<&str>, query: &str, count: u64) -> String {
    let Some(api_key) = api_key else {
        return "Web search unavailable: TAVILY_API_KEY not configured. Using local knowledge only.".into();
    };

    let http = match reqwest::Client::builder()
        .timeout(Duration::from_secs(WEB_SEARCH_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "web_search: HTTP client build failed");
            return "Web search unavailable: HTTP client build failed. Using local knowledge only.".into();
        }
    };

    let body = serde_json::json!({
        "api_key": api_key,
        "query": query,
        "max_results": count.min(20),
        "search_depth": "advanced",
        "include_answer": true,
    });

    let response = match http.post(TAVILY_URL).json(&body).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "web_search: request failed");
            return "Web search failed (network error). Using local knowledge only.".into();
        }
    };

    let status = response.status();
    if !status.is_success() {
        return format!("Web search failed (HTTP {}). Using local knowledge only.", status.as_u16());
    }

    let data: TavilyResponse = match response.json().await {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "web_search: unreadable response");
            return "Web search failed (unreadable response). Using local knowledge only.".into();
        }
    };

    let mut output = String::new();
    if let Some(answer) = data.answer.as_deref().filter(|a| !a.is_empty()) {
        let _ = write!(output, "**Summary:** {answer}\n\n");
    }
    if data.results.is_empty() {
        if output.is_empty() {
            return format!("No web results found for \"{query}\".");
        }
        return output;
    }

    let formatted: Vec<String> = data
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. **{}**\n   {}\n   {}", i + 1, r.title, r.url, r.content))
        .collect();
    output.push_str(&formatted.join("\n\n"));
    output
}

// =============================================================================
// PROMPTS
// =============================================================================

pub(crate) fn build_system_prompt(ai_slide_count: usize, include_code: bool, include_speaker_notes: bool) -> String {
    let mut prompt = format!(
        "You are a presentation generator AI. Your job is to create professional, visually rich presentation slides.\n\
         \n\
         WORKFLOW:\n\
         1. First, use the search_knowledge tool to load curated content about the requested topic.\n\
         2. Then, use the web_search tool to find the latest data, news, and developments about the topic. Search for recent statistics, announcements, and trends.\n\
         3. Combine the local knowledge and web search results to create well-informed, up-to-date slides.\n\
         4. Call generate_slide exactly {ai_slide_count} times to create the slides.\n\
         \n\
         RULES:\n\
         - Start with a \"title\" layout slide\n\
         - Use varied layouts across the deck (content, split, code, stat, comparison, timeline, quote, bento, chart)\n\
         - Each slide should have 3-6 key points\n\
         - Key points should be concise but informative (one line each)\n"
    );
    if include_code {
        prompt.push_str("- Include at least one \"code\" layout slide with a real code example\n");
    }
    if include_speaker_notes {
        prompt.push_str("- Include speaker notes for each slide\n");
    }
    prompt.push_str(
        "- End with a \"content\" layout slide for Next Steps\n\
         - Make content specific and technically accurate based on the knowledge library and web research\n\
         - Prefer real data from web search for statistics and recent developments\n\
         - If web search is unavailable, rely on the local knowledge library",
    );
    prompt
}

pub(crate) fn build_user_prompt(
    topic: &str,
    deck_type: DeckType,
    theme: &str,
    slide_count: usize,
    prompt: &str,
    topics: Option<&[String]>,
    title: Option<&str>,
) -> String {
    let mut p = format!(
        "Create a {} presentation about \"{topic}\" with {slide_count} slides using the \"{theme}\" theme.",
        deck_type.as_str()
    );
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let _ = write!(p, " The presentation title should be \"{title}\".");
    }
    if let Some(topics) = topics.filter(|t| !t.is_empty()) {
        p.push_str("\n\nThe presentation should cover these specific topics (one slide per topic):\n");
        for (i, t) in topics.iter().enumerate() {
            let _ = writeln!(p, "{}. {t}", i + 1);
        }
    }
    if !prompt.is_empty() {
        let _ = write!(p, "\nAdditional instructions: {prompt}");
    }
    p
}

#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;
