//! Demo-mode generator: deterministic decks with staged progress.
//!
//! DESIGN
//! ======
//! Runs when no LLM is configured, when the live agent fails, or when
//! `USE_MOCK_AGENT` forces it. Slides come from fixed banks for the known
//! knowledge topics, or from a layout rotation when the user supplied an
//! explicit topic list. Short sleeps stage the progress narration so
//! streaming UIs behave the same as on the live path. The merge pass and
//! both output formats are identical to the agent's.

use std::time::Duration;

use tracing::{debug, info};

use crate::event::{AgentEvent, EventSink};
use crate::pipeline::{HtmlSlide, assemble, compile};
use crate::plan::{
    CodeExample, DeckType, GenerateRequest, OutputFormat, PresentationPlan, SlideLayout, SlidePlan,
};
use crate::state::AppState;

use super::generate::GenerateError;
use super::{knowledge, precanned};

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one demo generation and stream the deck into `sink`.
///
/// # Errors
///
/// Fails on unloadable theme or shell resources (HTML format only) or a
/// dropped receiver.
pub async fn run(state: &AppState, req: &GenerateRequest, sink: &EventSink) -> Result<(), GenerateError> {
    let topic = req.knowledge_topic().unwrap_or_default().to_string();
    let deck_type = req.deck_type.unwrap_or_default();

    info!(%topic, deck_type = deck_type.as_str(), "mock: starting demo generation");

    sink.status("Loading knowledge pack...", 1).await?;
    sleep_ms(500).await;

    // Loaded for realism; demo content comes from the banks below.
    let pack = knowledge::load(&state.knowledge_dir, &topic, None);
    debug!(bytes = pack.len(), "mock: knowledge pack loaded");

    sink.status("Planning presentation structure...", 2).await?;
    sleep_ms(800).await;

    let topics = req.topic_texts();
    let slides = build_mock_slides(
        &topic,
        deck_type,
        req.effective_slide_count(),
        req.include_code,
        topics.as_deref(),
        req.presentation_title.as_deref(),
    );

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

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
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

    sink.status(format!("Generating {total} HTML slides..."), 3).await?;

    let mut html_slides: Vec<HtmlSlide> = Vec::with_capacity(total);
    for (i, slide) in plan.slides.iter().enumerate() {
        sleep_ms(300).await;
        let html_slide = compile::compile(slide, i);
        sink.send(AgentEvent::HtmlSlide { slide_index: i, total_slides: total, slide: html_slide.clone() })
            .await?;
        sink.status(format!("Generated slide {} of {total}", i + 1), 3).await?;
        html_slides.push(html_slide);
    }

    sleep_ms(300).await;
    sink.status("Assembling HTML presentation...", 4).await?;
    let assembled = assemble::assemble(&state.templates_dir, &plan.title, &html_slides, theme_id)?;

    sink.send(AgentEvent::HtmlComplete { plan, html_content: assembled.html }).await?;
    Ok(())
}

async fn emit_slides(plan: PresentationPlan, sink: &EventSink) -> Result<(), GenerateError> {
    let total = plan.slides.len();

    sink.status(format!("Generating {total} slides..."), 3).await?;
    for (i, slide) in plan.slides.iter().enumerate() {
        sleep_ms(300).await;
        sink.send(AgentEvent::Slide { slide_index: i, total_slides: total, slide: slide.clone() })
            .await?;
        sink.status(format!("Generated slide {} of {total}", i + 1), 3).await?;
    }

    sleep_ms(300).await;
    sink.status("Finalizing presentation...", 4).await?;
    sleep_ms(400).await;

    sink.send(AgentEvent::Complete { plan }).await?;
    Ok(())
}

// =============================================================================
// DECK CONSTRUCTION
// =============================================================================

/// Display title for a knowledge topic: known slugs map to product names,
/// anything else is title-cased.
fn resolve_topic_title(topic: &str) -> String {
    match topic {
        "microsoft-foundry" | "foundry" => "Azure AI Foundry".into(),
        "copilot" => "GitHub Copilot".into(),
        "copilot-cli" => "GitHub Copilot CLI".into(),
        "copilot-sdk" => "GitHub Copilot SDK".into(),
        other => title_case_slug(other),
    }
}

fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_mock_slides(
    topic: &str,
    deck_type: DeckType,
    slide_count: usize,
    include_code: bool,
    topics: Option<&[String]>,
    presentation_title: Option<&str>,
) -> Vec<SlidePlan> {
    let topic_title = resolve_topic_title(topic);
    let deck_phrase = deck_type.as_str().replace('-', " ");
    let title = presentation_title
        .filter(|t| !t.is_empty())
        .map_or_else(|| format!("{topic_title} — {}", deck_type.label()), str::to_string);

    let mut slides = vec![SlidePlan::new(
        0,
        SlideLayout::Title,
        title,
        [format!("A comprehensive {deck_phrase} presentation"), "Powered by Slidesmith".to_string()],
    )];

    match topics.filter(|t| !t.is_empty()) {
        Some(topics) => {
            // One slide per user topic, cycling through varied layouts.
            const ROTATION: [SlideLayout; 7] = [
                SlideLayout::Content,
                SlideLayout::Split,
                SlideLayout::Comparison,
                SlideLayout::Stat,
                SlideLayout::Timeline,
                SlideLayout::Bento,
                SlideLayout::Content,
            ];
            for (i, text) in topics.iter().take(slide_count.saturating_sub(2)).enumerate() {
                slides.push(SlidePlan::new(
                    i + 1,
                    ROTATION[i % ROTATION.len()],
                    text.clone(),
                    [
                        format!("Key insight about {text}"),
                        "Core concepts and fundamentals".to_string(),
                        "Real-world applications and benefits".to_string(),
                        "Best practices and recommendations".to_string(),
                    ],
                ));
            }
        }
        None => {
            for (i, slide) in topic_slide_bank(topic, include_code)
                .into_iter()
                .take(slide_count.saturating_sub(2))
                .enumerate()
            {
                slides.push(SlidePlan { index: i + 1, ..slide });
            }
        }
    }

    let closing_index = slides.len();
    slides.push(SlidePlan::new(
        closing_index,
        SlideLayout::Content,
        "Next Steps",
        [
            "Review the resources shared in this presentation",
            "Set up a proof of concept with your team",
            "Join the community for support and updates",
            "Reach out for enterprise consultation",
        ],
    ));

    slides
}

// =============================================================================
// SLIDE BANKS
// =============================================================================

/// Curated slides for the bundled knowledge topics. Unknown topics get an
/// empty bank, leaving just the title and closing slides.
#[allow(clippy::too_many_lines)]
fn topic_slide_bank(topic: &str, include_code: bool) -> Vec<SlidePlan> {
    match topic {
        "copilot-sdk" => {
            let mut slides = vec![
                SlidePlan::new(0, SlideLayout::Content, "What is the Copilot SDK?", [
                    "Multi-platform toolkit for embedding Copilot's agentic workflows into applications",
                    "Same engine behind GitHub Copilot CLI — production-tested agent runtime",
                    "Available in TypeScript, Python, Go, and .NET",
                    "Handles planning, tool invocation, and file editing automatically",
                    "No custom orchestration required — define behavior, SDK manages execution",
                ]),
                SlidePlan::new(0, SlideLayout::Split, "Architecture", [
                    "Your Application → SDK Client (JSON-RPC) → Copilot CLI → Model Provider",
                    "SDK manages CLI process lifecycle automatically",
                    "Custom tools extend agent capabilities via defineTool",
                    "Streaming events for real-time UI updates",
                    "Session management with infinite context support",
                ]),
                SlidePlan::new(0, SlideLayout::Comparison, "Authentication Options", [
                    "GitHub Credentials: Use signed-in user credentials from Copilot CLI",
                    "OAuth GitHub App: OAuth app tokens for web applications (gho_ / ghu_)",
                    "Environment Variables: COPILOT_GITHUB_TOKEN, GH_TOKEN, GITHUB_TOKEN",
                    "BYOK: Bring Your Own Key for OpenAI, Azure AI Foundry, or Anthropic",
                ]),
                SlidePlan::new(0, SlideLayout::Stat, "SDK at a Glance", [
                    "7,200+ — GitHub stars",
                    "4 — Supported languages",
                    "38 — Contributors",
                    "156 — Commits to date",
                ]),
                SlidePlan::new(0, SlideLayout::Content, "Custom Tools with defineTool", [
                    "Define tools using Zod schemas (TypeScript) or Pydantic (Python)",
                    "Type-safe parameter validation at runtime",
                    "Agent automatically decides when to invoke each tool",
                    "Tool results feed back into the agent's reasoning loop",
                    "Support for async handlers and streaming results",
                ]),
                SlidePlan::new(0, SlideLayout::Timeline, "Getting Started Roadmap", [
                    "Day 1: Install SDK and Copilot CLI, run hello-world agent",
                    "Week 1: Build custom tools, integrate with your application",
                    "Week 2: Add streaming UI, session management, error handling",
                    "Week 3: Production deployment with auth, monitoring, and CI/CD",
                ]),
            ];
            if include_code {
                slides.push(
                    SlidePlan::new(0, SlideLayout::Code, "Quick Start: Your First Agent", [
                        "Create a CopilotClient, start a session, and send a prompt",
                    ])
                    .with_code_example(CodeExample {
                        language: "typescript".into(),
                        code: r#"import { CopilotClient } from "@github/copilot-sdk";

const client = new CopilotClient();
await client.start();

const session = await client.createSession({
  model: "gpt-5",
  streaming: true,
});

const reply = await session.sendAndWait({
  prompt: "Explain microservices architecture"
});

console.log(reply?.data.content);"#
                            .into(),
                        caption: Some("Basic Copilot SDK agent setup in TypeScript".into()),
                    }),
                );
            }
            slides
        }
        "copilot" => vec![
            SlidePlan::new(0, SlideLayout::Content, "What is GitHub Copilot?", [
                "AI pair programmer that helps you write code faster",
                "Code completions, Copilot Chat, workspace agents, PR summaries",
                "Supported in VS Code, JetBrains, Neovim, Visual Studio",
                "Individual ($10/mo), Business ($19/mo), Enterprise ($39/mo)",
                "Used by millions of developers worldwide",
            ]),
            SlidePlan::new(0, SlideLayout::Stat, "Developer Impact", [
                "55% — Faster task completion",
                "74% — More focused developers",
                "46% — More code completed",
                "88% — Developer satisfaction",
            ]),
            SlidePlan::new(0, SlideLayout::Content, "Enterprise Features", [
                "Organization-wide policy management and controls",
                "Usage analytics and adoption metrics dashboard",
                "Knowledge bases for custom documentation grounding",
                "Content exclusions for sensitive repositories",
                "Audit logs and compliance reporting",
                "IP indemnity and security assurance",
            ]),
            SlidePlan::new(0, SlideLayout::Comparison, "Copilot Plans", [
                "Individual ($10/mo): IDE completions, chat, CLI access",
                "Business ($19/mo): Org management, policies, audit logs",
                "Enterprise ($39/mo): Knowledge bases, fine-grained controls, SAML SSO",
            ]),
            SlidePlan::new(0, SlideLayout::Timeline, "Enterprise Rollout Strategy", [
                "Phase 1: Pilot with 50 champion developers (2 weeks)",
                "Phase 2: Expand to 500 across key teams (4 weeks)",
                "Phase 3: Organization-wide rollout with training (2 weeks)",
                "Phase 4: Measure ROI and optimize usage (ongoing)",
            ]),
            SlidePlan::new(0, SlideLayout::Content, "Best Practices", [
                "Write clear comments to guide Copilot suggestions",
                "Use Copilot Chat for complex tasks and explanations",
                "Review all suggestions — AI is a copilot, not autopilot",
                "Set up knowledge bases for org-specific context",
                "Track adoption metrics to measure impact",
            ]),
        ],
        "microsoft-foundry" => vec![
            SlidePlan::new(0, SlideLayout::Content, "What is Azure AI Foundry?", [
                "Unified platform for building, deploying, and managing AI applications",
                "Model catalog with 1,600+ models (Azure OpenAI, Meta, Mistral, Cohere)",
                "Built-in prompt flow for AI workflow orchestration",
                "Responsible AI tools, evaluations, and content safety",
                "Enterprise-grade security and compliance (SOC 2, ISO 27001)",
            ]),
            SlidePlan::new(0, SlideLayout::Split, "Platform Architecture", [
                "AI Foundry Hub: Central governance, shared compute, connections",
                "AI Foundry Project: Team workspace for development",
                "Model Catalog: Browse, evaluate, and deploy models",
                "Prompt Flow: Visual workflow builder for AI applications",
            ]),
            SlidePlan::new(0, SlideLayout::Bento, "Key Capabilities", [
                "Model Fine-tuning: Customize models with supervised learning and LoRA",
                "Prompt Flow: Build and test AI workflows visually",
                "Evaluations: Automated quality and safety testing with custom metrics",
                "Deployments: Managed endpoints with autoscaling and monitoring",
            ]),
            SlidePlan::new(0, SlideLayout::Content, "Integration Points", [
                "Azure AI Search for RAG (Retrieval-Augmented Generation)",
                "Azure Blob Storage for data assets and documents",
                "Azure Key Vault for secrets management",
                "GitHub Actions for CI/CD of AI workflows",
                "Azure Monitor for observability and tracing",
            ]),
            SlidePlan::new(0, SlideLayout::Stat, "Enterprise Scale", [
                "1,600+ — Models available",
                "99.9% — SLA guarantee",
                "60+ — Azure regions worldwide",
                "SOC 2 — Compliance certified",
            ]),
        ],
        "copilot-cli" => vec![
            SlidePlan::new(0, SlideLayout::Content, "What is Copilot CLI?", [
                "AI-powered command line assistant integrated with GitHub CLI",
                "Natural language to shell command translation",
                "Explain any command in plain English",
                "Works with bash, zsh, PowerShell, and fish",
                "Part of the GitHub Copilot ecosystem",
            ]),
            SlidePlan::new(0, SlideLayout::Split, "How It Works", [
                "User types natural language prompt",
                "GitHub API processes the request with AI model",
                "Returns suggested command with explanation",
                "User can execute, revise, or explain further",
                "Context-aware: reads current directory and environment",
            ]),
            SlidePlan::new(0, SlideLayout::Comparison, "Key Commands", [
                "gh copilot suggest: Translate natural language to shell commands",
                "gh copilot explain: Get plain-English explanation of any command",
            ]),
            SlidePlan::new(0, SlideLayout::Content, "Use Cases", [
                "DevOps: Find processes, manage Docker containers, Kubernetes operations",
                "Git: Complex git commands from natural language descriptions",
                "System Admin: File management, network diagnostics, service management",
                "CI/CD: Debug pipeline failures, parse build logs",
                "Onboarding: Help new developers learn unfamiliar CLI tools",
            ]),
            SlidePlan::new(0, SlideLayout::Stat, "Productivity Impact", [
                "10x — Faster command discovery",
                "Zero — Manual pages to read",
                "Any — Shell supported",
                "Instant — Command explanations",
            ]),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;
