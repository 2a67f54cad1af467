use std::fs;

use tempfile::TempDir;

use super::*;
use crate::plan::TopicItem;
use crate::state::test_helpers::test_app_state;

const SHELL: &str = "<!doctype html>\n<title>{{TITLE}}</title>\n<style>{{THEME_CSS}}</style>\n<body data-total=\"{{TOTAL_SLIDES}}\">\n{{SLIDES}}\n<script>const NOTES = {{SPEAKER_NOTES_JSON}};</script>\n</body>";

fn theme_json(id: &str) -> String {
    serde_json::json!({
        "name": "Test Theme",
        "id": id,
        "description": "for tests",
        "colors": {
            "primary": "#fff", "secondary": "#fff", "tertiary": "#fff",
            "background": "#000", "surface": "#111", "surfaceHover": "#222",
            "border": "#333", "borderHover": "#444", "text": "#fff",
            "textMuted": "#aaa", "textSubtle": "#888"
        },
        "gradients": {
            "title": "g1", "progressBar": "g2", "accent": "g3", "orb1": "g4", "orb2": "g5"
        },
        "css": format!(":root {{ --theme-id: {id}; }}")
    })
    .to_string()
}

fn data_fixture() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("shell.html"), SHELL).expect("write shell");
    fs::create_dir(dir.path().join("themes")).expect("mkdir themes");
    fs::write(dir.path().join("themes").join("cyan-violet.json"), theme_json("cyan-violet"))
        .expect("write theme");
    dir
}

fn topic_item(text: &str) -> TopicItem {
    TopicItem::Topic { id: String::new(), text: text.into() }
}

async fn run_and_drain(req: &GenerateRequest, templates_dir: &TempDir) -> Vec<AgentEvent> {
    let state = test_app_state(templates_dir.path(), templates_dir.path());
    let (sink, mut rx) = EventSink::channel(64);

    run(&state, req, &sink).await.expect("mock run");
    drop(sink);

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
// STREAMING
// =============================================================================

#[tokio::test(start_paused = true)]
async fn demo_stream_merges_topic_items_and_completes() {
    let dir = data_fixture();
    let req = GenerateRequest {
        knowledge_source: Some("copilot".into()),
        topic_items: Some(vec![topic_item("Intro"), TopicItem::Demo { id: String::new(), title: None }, topic_item("Wrap-up")]),
        ..GenerateRequest::default()
    };

    let events = run_and_drain(&req, &dir).await;

    let slide_events: Vec<&SlidePlan> = events
        .iter()
        .filter_map(|e| match e {
            AgentEvent::Slide { slide, .. } => Some(slide),
            _ => None,
        })
        .collect();
    let titles: Vec<&str> = slide_events.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["GitHub Copilot — Custom", "Intro", "LIVE DEMO", "Wrap-up", "Next Steps"]);
    assert_eq!(slide_events[2].layout, SlideLayout::Demo);
    for (i, slide) in slide_events.iter().enumerate() {
        assert_eq!(slide.index, i);
    }

    let narration = statuses(&events);
    assert_eq!(narration[0], ("Loading knowledge pack...".into(), 1));
    assert_eq!(narration[1], ("Planning presentation structure...".into(), 2));
    assert!(narration.contains(&("Generating 5 slides...".into(), 3)));
    assert!(narration.contains(&("Generated slide 5 of 5".into(), 3)));
    assert!(narration.contains(&("Finalizing presentation...".into(), 4)));

    match events.last() {
        Some(AgentEvent::Complete { plan }) => {
            assert_eq!(plan.slides.len(), 5);
            assert_eq!(plan.title, "GitHub Copilot — Custom");
        }
        other => panic!("expected complete event, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn demo_stream_html_emits_fragments_then_document() {
    let dir = data_fixture();
    let req = GenerateRequest {
        knowledge_source: Some("copilot-cli".into()),
        slide_count: 3,
        output_format: OutputFormat::Html,
        ..GenerateRequest::default()
    };

    let events = run_and_drain(&req, &dir).await;

    let fragment_count = events
        .iter()
        .filter(|e| matches!(e, AgentEvent::HtmlSlide { .. }))
        .count();
    assert_eq!(fragment_count, 3);

    let narration = statuses(&events);
    assert!(narration.contains(&("Generating 3 HTML slides...".into(), 3)));
    assert!(narration.contains(&("Assembling HTML presentation...".into(), 4)));

    match events.last() {
        Some(AgentEvent::HtmlComplete { plan, html_content }) => {
            assert_eq!(plan.slides.len(), 3);
            // Default app theme maps to the cyan-violet HTML theme.
            assert!(html_content.contains(":root { --theme-id: cyan-violet; }"));
            assert!(html_content.contains("data-total=\"3\""));
        }
        other => panic!("expected htmlComplete event, got {other:?}"),
    }
}

// =============================================================================
// DECK CONSTRUCTION
// =============================================================================

#[test]
fn deck_starts_with_title_and_ends_with_next_steps() {
    let slides = build_mock_slides("copilot", DeckType::Overview, 8, true, None, None);

    assert_eq!(slides.first().map(|s| s.layout), Some(SlideLayout::Title));
    assert_eq!(slides.first().map(|s| s.title.as_str()), Some("GitHub Copilot — Overview"));
    assert_eq!(
        slides.first().map(|s| s.key_points.clone()),
        Some(vec!["A comprehensive overview presentation".to_string(), "Powered by Slidesmith".to_string()])
    );
    assert_eq!(slides.last().map(|s| s.title.as_str()), Some("Next Steps"));
    assert_eq!(slides.len(), 8);
}

#[test]
fn explicit_title_wins_over_generated() {
    let slides =
        build_mock_slides("copilot", DeckType::Overview, 4, false, None, Some("Shipping Faster"));
    assert_eq!(slides[0].title, "Shipping Faster");
}

#[test]
fn blank_explicit_title_falls_back_to_generated() {
    let slides = build_mock_slides("copilot", DeckType::Workshop, 4, false, None, Some(""));
    assert_eq!(slides[0].title, "GitHub Copilot — Workshop");
}

#[test]
fn explicit_topics_rotate_layouts() {
    let topics: Vec<String> = ["Planning", "Execution", "Review"].map(String::from).into();
    let slides = build_mock_slides("copilot", DeckType::Custom, 5, false, Some(&topics), None);

    assert_eq!(slides.len(), 5);
    assert_eq!(slides[1].layout, SlideLayout::Content);
    assert_eq!(slides[2].layout, SlideLayout::Split);
    assert_eq!(slides[3].layout, SlideLayout::Comparison);
    assert_eq!(slides[1].title, "Planning");
    assert_eq!(slides[1].key_points[0], "Key insight about Planning");
}

#[test]
fn slide_budget_caps_topic_slides() {
    let topics: Vec<String> = (0..10).map(|i| format!("Topic {i}")).collect();
    let slides = build_mock_slides("copilot", DeckType::Custom, 6, false, Some(&topics), None);
    // Title + 4 topics + closing.
    assert_eq!(slides.len(), 6);
    assert_eq!(slides[4].title, "Topic 3");
}

#[test]
fn slide_budget_caps_bank_slides() {
    let slides = build_mock_slides("microsoft-foundry", DeckType::Overview, 4, true, None, None);
    assert_eq!(slides.len(), 4);
    assert_eq!(slides[1].title, "What is Azure AI Foundry?");
    assert_eq!(slides[3].title, "Next Steps");
}

#[test]
fn code_slide_only_when_requested() {
    let with_code = build_mock_slides("copilot-sdk", DeckType::Overview, 12, true, None, None);
    let code_slide = with_code
        .iter()
        .find(|s| s.layout == SlideLayout::Code)
        .expect("code slide present");
    assert!(code_slide.code_example.as_ref().is_some_and(|c| c.language == "typescript"));

    let without_code = build_mock_slides("copilot-sdk", DeckType::Overview, 12, false, None, None);
    assert!(without_code.iter().all(|s| s.layout != SlideLayout::Code));
}

#[test]
fn unknown_topic_deck_is_title_and_closing_only() {
    let slides = build_mock_slides("data-mesh", DeckType::Custom, 8, true, None, None);
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].title, "Data Mesh — Custom");
}

#[test]
fn known_topics_map_to_product_titles() {
    assert_eq!(resolve_topic_title("microsoft-foundry"), "Azure AI Foundry");
    assert_eq!(resolve_topic_title("foundry"), "Azure AI Foundry");
    assert_eq!(resolve_topic_title("copilot"), "GitHub Copilot");
    assert_eq!(resolve_topic_title("copilot-cli"), "GitHub Copilot CLI");
    assert_eq!(resolve_topic_title("copilot-sdk"), "GitHub Copilot SDK");
    assert_eq!(resolve_topic_title("edge-routing"), "Edge Routing");
}
