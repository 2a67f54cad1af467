//! Slide plans, topic items, and the generation request.
//!
//! DESIGN
//! ======
//! - `SlidePlan` is the unit of generated content. Orchestrators build plans,
//!   the merge pass re-indexes them, and they are read-only afterwards.
//! - Wire format is camelCase JSON to match the web client; optional fields
//!   are omitted when absent.
//! - `SlideLayout` is a closed enum. Adding a layout kind is a compile-time
//!   exhaustiveness error in the HTML compiler, not a silent runtime fallback.
//!   Free-form layout strings from the authoring session are normalized once
//!   at the parse boundary via [`SlideLayout::parse`].

use serde::{Deserialize, Serialize};

// =============================================================================
// LAYOUTS
// =============================================================================

/// Visual layout kind for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideLayout {
    Title,
    Content,
    Split,
    Code,
    Stat,
    Comparison,
    Timeline,
    Quote,
    Bento,
    Chart,
    Demo,
    Youtube,
}

impl SlideLayout {
    /// Normalize a free-form layout string. Unknown strings render fine as
    /// generic content, so they map to `Content` rather than failing.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "title" => SlideLayout::Title,
            "split" => SlideLayout::Split,
            "code" => SlideLayout::Code,
            "stat" => SlideLayout::Stat,
            "comparison" => SlideLayout::Comparison,
            "timeline" => SlideLayout::Timeline,
            "quote" => SlideLayout::Quote,
            "bento" => SlideLayout::Bento,
            "chart" => SlideLayout::Chart,
            "demo" => SlideLayout::Demo,
            "youtube" => SlideLayout::Youtube,
            _ => SlideLayout::Content,
        }
    }

    /// Wire name of the layout, as used in JSON and progress messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SlideLayout::Title => "title",
            SlideLayout::Content => "content",
            SlideLayout::Split => "split",
            SlideLayout::Code => "code",
            SlideLayout::Stat => "stat",
            SlideLayout::Comparison => "comparison",
            SlideLayout::Timeline => "timeline",
            SlideLayout::Quote => "quote",
            SlideLayout::Bento => "bento",
            SlideLayout::Chart => "chart",
            SlideLayout::Demo => "demo",
            SlideLayout::Youtube => "youtube",
        }
    }
}

// =============================================================================
// SLIDE CONTENT
// =============================================================================

/// A runnable code sample attached to a `code`-layout slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeExample {
    pub language: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Donut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Data series attached to a `chart`-layout slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Vec<ChartPoint>,
}

/// The structured representation of one slide, prior to any rendering.
///
/// `index` is provisional until the merge pass re-indexes the final
/// sequence; nothing should rely on it before then.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePlan {
    pub index: usize,
    pub layout: SlideLayout,
    pub title: String,
    pub key_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<CodeExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl SlidePlan {
    /// Create a slide with the required fields; optionals start empty.
    pub fn new<I, S>(index: usize, layout: SlideLayout, title: impl Into<String>, key_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index,
            layout,
            title: title.into(),
            key_points: key_points.into_iter().map(Into::into).collect(),
            speaker_notes: None,
            code_example: None,
            chart_data: None,
            youtube_url: None,
        }
    }

    #[must_use]
    pub fn with_speaker_notes(mut self, notes: impl Into<String>) -> Self {
        self.speaker_notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_code_example(mut self, example: CodeExample) -> Self {
        self.code_example = Some(example);
        self
    }

    #[must_use]
    pub fn with_chart_data(mut self, chart: ChartData) -> Self {
        self.chart_data = Some(chart);
        self
    }

    #[must_use]
    pub fn with_youtube_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_url = Some(url.into());
        self
    }
}

/// The terminal aggregate of one generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationPlan {
    pub title: String,
    pub topic: String,
    pub deck_type: DeckType,
    pub theme: String,
    pub slides: Vec<SlidePlan>,
}

// =============================================================================
// REQUEST INPUT
// =============================================================================

/// One entry in the user's ordered "what should slide N be" list.
///
/// Order is the authoritative presentation order intent. `Topic` items are
/// authored by the AI; `Demo` and `Youtube` items become precanned slides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TopicItem {
    Topic {
        #[serde(default)]
        id: String,
        text: String,
    },
    Demo {
        #[serde(default)]
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Youtube {
        #[serde(default)]
        id: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckType {
    Overview,
    GettingStarted,
    Architecture,
    Enablement,
    Workshop,
    #[default]
    Custom,
}

impl DeckType {
    /// Wire name, e.g. `"getting-started"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeckType::Overview => "overview",
            DeckType::GettingStarted => "getting-started",
            DeckType::Architecture => "architecture",
            DeckType::Enablement => "enablement",
            DeckType::Workshop => "workshop",
            DeckType::Custom => "custom",
        }
    }

    /// Human-readable label, e.g. `"Getting Started"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DeckType::Overview => "Overview",
            DeckType::GettingStarted => "Getting Started",
            DeckType::Architecture => "Architecture",
            DeckType::Enablement => "Enablement",
            DeckType::Workshop => "Workshop",
            DeckType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Slides,
    Html,
}

/// One generation request as posted by the client. Every field is optional
/// on the wire; absent fields take the defaults below. The HTTP boundary
/// rejects requests missing a knowledge topic or deck type before this
/// reaches an orchestrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    /// Legacy field name for the knowledge pack id.
    pub topic: Option<String>,
    /// Current field name for the knowledge pack id. Wins over `topic`.
    pub knowledge_source: Option<String>,
    pub deck_type: Option<DeckType>,
    pub prompt: String,
    pub theme: String,
    pub slide_count: usize,
    pub include_code: bool,
    pub include_speaker_notes: bool,
    pub model: Option<String>,
    pub output_format: OutputFormat,
    pub presentation_topics: Option<Vec<String>>,
    pub presentation_title: Option<String>,
    pub topic_items: Option<Vec<TopicItem>>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            topic: None,
            knowledge_source: None,
            deck_type: None,
            prompt: String::new(),
            theme: "tech-gradient".into(),
            slide_count: 8,
            include_code: true,
            include_speaker_notes: true,
            model: None,
            output_format: OutputFormat::Slides,
            presentation_topics: None,
            presentation_title: None,
            topic_items: None,
        }
    }
}

impl GenerateRequest {
    /// Knowledge pack id, accepting either `knowledgeSource` or the legacy
    /// `topic` field.
    #[must_use]
    pub fn knowledge_topic(&self) -> Option<&str> {
        self.knowledge_source.as_deref().or(self.topic.as_deref())
    }

    /// How many slides the authoring backend should produce.
    ///
    /// An explicit topic-item list overrides the requested count: one slide
    /// per "topic" item plus title and closing. Demo and youtube items are
    /// precanned and never consume authoring budget.
    #[must_use]
    pub fn effective_slide_count(&self) -> usize {
        match &self.topic_items {
            Some(items) if !items.is_empty() => {
                items
                    .iter()
                    .filter(|item| matches!(item, TopicItem::Topic { .. }))
                    .count()
                    + 2
            }
            _ => self.slide_count,
        }
    }

    /// Texts of the "topic" items in order, if an explicit list was given.
    /// Falls back to the legacy `presentationTopics` list.
    #[must_use]
    pub fn topic_texts(&self) -> Option<Vec<String>> {
        match &self.topic_items {
            Some(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        TopicItem::Topic { text, .. } => Some(text.clone()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => self.presentation_topics.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
