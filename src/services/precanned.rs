//! Precanned slides and the topic/slide merge pass.
//!
//! DESIGN
//! ======
//! The user's ordered topic-item list is the authoritative order intent.
//! Authoring produces content slides for "topic" items only; demo and
//! youtube items are satisfied from fixed templates here. `merge` is a
//! single left-to-right pass with a cursor into the authored list:
//! - "topic" consumes the next authored slide, or is skipped once the
//!   authored list runs dry. Nothing is fabricated for a missing slide.
//! - "demo"/"youtube" inject a fresh precanned slide, never touching the
//!   cursor.
//! - Authored slides left over after the pass are appended in order.
//! Positions bind the two lists: item i pairs with authored slide i among
//! topic-type items. Titles are never reconciled. The pass cannot fail.

use crate::plan::{SlideLayout, SlidePlan, TopicItem};

/// Fixed live-demo interstitial. The index is provisional; `merge`
/// re-assigns it.
#[must_use]
pub fn build_demo_slide(index: usize, title: Option<&str>) -> SlidePlan {
    let title = title.filter(|t| !t.is_empty()).unwrap_or("LIVE DEMO");
    SlidePlan::new(
        index,
        SlideLayout::Demo,
        title,
        [
            "Time for a live demonstration",
            "Watch the feature in action",
            "Follow along or take notes",
            "Questions welcome after the demo",
        ],
    )
    .with_speaker_notes("This is a demo slide — switch to your live demo environment.")
}

/// Fixed video-embed slide. The url is taken as-is; validity is the HTML
/// compiler's problem.
#[must_use]
pub fn build_youtube_slide(index: usize, url: &str, title: Option<&str>) -> SlidePlan {
    let title = title.filter(|t| !t.is_empty()).unwrap_or("Video");
    SlidePlan::new(index, SlideLayout::Youtube, title, [url])
        .with_speaker_notes("This slide embeds a YouTube video.")
        .with_youtube_url(url)
}

/// Interleave authored slides with precanned ones per the topic-item order,
/// then re-index the result sequentially from 0.
#[must_use]
pub fn merge(topic_items: &[TopicItem], ai_slides: Vec<SlidePlan>) -> Vec<SlidePlan> {
    tracing::debug!(
        topic_items = topic_items.len(),
        ai_slides = ai_slides.len(),
        "merging authored and precanned slides"
    );

    let mut authored = ai_slides.into_iter();
    let mut merged = Vec::new();

    for item in topic_items {
        match item {
            TopicItem::Topic { text, .. } => {
                if let Some(slide) = authored.next() {
                    merged.push(slide);
                } else {
                    tracing::warn!(topic = %text, "no authored slide left for topic item");
                }
            }
            TopicItem::Demo { title, .. } => {
                merged.push(build_demo_slide(0, title.as_deref()));
            }
            TopicItem::Youtube { url, title, .. } => {
                merged.push(build_youtube_slide(0, url, title.as_deref()));
            }
        }
    }

    merged.extend(authored);

    for (i, slide) in merged.iter_mut().enumerate() {
        slide.index = i;
    }
    merged
}

/// Merge precanned items into the middle of a full deck.
///
/// The first and last authored slides stay pinned as title and closing;
/// `merge` runs over the slides between them. Decks shorter than two slides
/// merge whole. Indexes are rebuilt either way.
#[must_use]
pub fn merge_deck(topic_items: &[TopicItem], mut slides: Vec<SlidePlan>) -> Vec<SlidePlan> {
    if topic_items.is_empty() {
        return slides;
    }

    let (head, middles, tail) = if slides.len() >= 2 {
        let tail = slides.pop();
        let head = Some(slides.remove(0));
        (head, slides, tail)
    } else {
        (None, slides, None)
    };

    let mut deck: Vec<SlidePlan> = head
        .into_iter()
        .chain(merge(topic_items, middles))
        .chain(tail)
        .collect();
    for (i, slide) in deck.iter_mut().enumerate() {
        slide.index = i;
    }
    deck
}

#[cfg(test)]
#[path = "precanned_test.rs"]
mod tests;
