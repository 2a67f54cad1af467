use super::*;

fn topic(text: &str) -> TopicItem {
    TopicItem::Topic {
        id: text.to_lowercase(),
        text: text.into(),
    }
}

fn demo() -> TopicItem {
    TopicItem::Demo {
        id: "demo-1".into(),
        title: None,
    }
}

fn youtube(url: &str) -> TopicItem {
    TopicItem::Youtube {
        id: "yt-1".into(),
        url: url.into(),
        title: None,
    }
}

fn authored(titles: &[&str]) -> Vec<SlidePlan> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| SlidePlan::new(i, SlideLayout::Content, *title, ["point"]))
        .collect()
}

// =============================================================================
// PRECANNED BUILDERS
// =============================================================================

#[test]
fn demo_slide_defaults() {
    let slide = build_demo_slide(7, None);
    assert_eq!(slide.layout, SlideLayout::Demo);
    assert_eq!(slide.title, "LIVE DEMO");
    assert_eq!(slide.key_points.len(), 4);
    assert!(slide.speaker_notes.is_some());
    assert_eq!(slide.index, 7);
}

#[test]
fn demo_slide_custom_title() {
    let slide = build_demo_slide(0, Some("Agent in Action"));
    assert_eq!(slide.title, "Agent in Action");

    // Empty titles fall back like absent ones.
    let blank = build_demo_slide(0, Some(""));
    assert_eq!(blank.title, "LIVE DEMO");
}

#[test]
fn youtube_slide_carries_url() {
    let slide = build_youtube_slide(0, "https://youtu.be/dQw4w9WgXcQ", None);
    assert_eq!(slide.layout, SlideLayout::Youtube);
    assert_eq!(slide.title, "Video");
    assert_eq!(slide.key_points, vec!["https://youtu.be/dQw4w9WgXcQ"]);
    assert_eq!(slide.youtube_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
}

// =============================================================================
// MERGE
// =============================================================================

#[test]
fn merge_pairs_topics_with_authored_slides_in_order() {
    let items = vec![topic("Intro"), demo(), topic("Deep Dive"), youtube("u"), topic("Wrap")];
    let merged = merge(&items, authored(&["A", "B", "C"]));

    assert_eq!(merged.len(), 5);
    assert_eq!(merged[0].title, "A");
    assert_eq!(merged[1].layout, SlideLayout::Demo);
    assert_eq!(merged[2].title, "B");
    assert_eq!(merged[3].layout, SlideLayout::Youtube);
    assert_eq!(merged[4].title, "C");
}

#[test]
fn merge_under_supply_skips_unmatched_topics() {
    let items = vec![topic("One"), topic("Two"), topic("Three"), demo()];
    let merged = merge(&items, authored(&["A"]));

    // First topic item gets the lone authored slide, the other two vanish.
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].title, "A");
    assert_eq!(merged[1].layout, SlideLayout::Demo);
}

#[test]
fn merge_over_supply_appends_remainder() {
    let items = vec![topic("One"), demo()];
    let merged = merge(&items, authored(&["A", "B", "C"]));

    assert_eq!(merged.len(), 4);
    assert_eq!(merged[0].title, "A");
    assert_eq!(merged[1].layout, SlideLayout::Demo);
    assert_eq!(merged[2].title, "B");
    assert_eq!(merged[3].title, "C");
}

#[test]
fn merge_reindexes_from_zero() {
    let items = vec![youtube("u"), topic("One"), demo(), topic("Two")];
    let mut slides = authored(&["A", "B"]);
    slides[0].index = 42;
    slides[1].index = 9;

    let merged = merge(&items, slides);
    for (i, slide) in merged.iter().enumerate() {
        assert_eq!(slide.index, i);
    }
}

#[test]
fn merge_without_topic_items_keeps_authored_order() {
    let merged = merge(&[], authored(&["A", "B"]));
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].title, "A");
    assert_eq!(merged[1].title, "B");
}

#[test]
fn merge_empty_inputs_yield_empty() {
    assert!(merge(&[], Vec::new()).is_empty());
}

#[test]
fn merge_precanned_only() {
    let items = vec![demo(), youtube("https://youtu.be/dQw4w9WgXcQ")];
    let merged = merge(&items, Vec::new());

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].layout, SlideLayout::Demo);
    assert_eq!(merged[1].layout, SlideLayout::Youtube);
    assert_eq!(merged[0].index, 0);
    assert_eq!(merged[1].index, 1);
}

// =============================================================================
// MERGE DECK
// =============================================================================

#[test]
fn merge_deck_pins_title_and_closing() {
    let items = vec![topic("Intro"), demo(), topic("Wrap-up")];
    let deck = merge_deck(&items, authored(&["Title", "A", "B", "Next Steps"]));

    assert_eq!(deck.len(), 5);
    assert_eq!(deck[0].title, "Title");
    assert_eq!(deck[1].title, "A");
    assert_eq!(deck[2].layout, SlideLayout::Demo);
    assert_eq!(deck[3].title, "B");
    assert_eq!(deck[4].title, "Next Steps");
    for (i, slide) in deck.iter().enumerate() {
        assert_eq!(slide.index, i);
    }
}

#[test]
fn merge_deck_without_items_is_identity() {
    let deck = merge_deck(&[], authored(&["Title", "A", "Next Steps"]));
    assert_eq!(deck.len(), 3);
    assert_eq!(deck[0].title, "Title");
    assert_eq!(deck[2].title, "Next Steps");
}

#[test]
fn merge_deck_with_single_slide_merges_whole() {
    let items = vec![demo(), topic("Only")];
    let deck = merge_deck(&items, authored(&["Lone"]));

    assert_eq!(deck.len(), 2);
    assert_eq!(deck[0].layout, SlideLayout::Demo);
    assert_eq!(deck[1].title, "Lone");
}

#[test]
fn merge_deck_with_no_slides_yields_precanned() {
    let items = vec![demo()];
    let deck = merge_deck(&items, Vec::new());

    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].layout, SlideLayout::Demo);
    assert_eq!(deck[0].index, 0);
}
