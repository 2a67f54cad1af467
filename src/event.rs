//! AgentEvent, the streaming protocol for one generation request.
//!
//! ARCHITECTURE
//! ============
//! Orchestrators push events into an [`EventSink`]; the HTTP boundary drains
//! the paired receiver and frames each event for SSE. Every request produces
//! a single-pass sequence ending in exactly one terminal event (`complete`,
//! `htmlComplete`, or `error`).
//!
//! DESIGN
//! ======
//! - Wire shape is `{"type": tag, "data": payload}` with camelCase keys.
//! - The channel is bounded, so production is pull-paced: when the consumer
//!   stops pulling, `send` suspends and eventually fails with [`SinkClosed`]
//!   once the receiver is dropped. Orchestrators treat that as cancellation.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::pipeline::HtmlSlide;
use crate::plan::{PresentationPlan, SlidePlan};

// =============================================================================
// EVENTS
// =============================================================================

/// One emission in a generation stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum AgentEvent {
    /// Human-readable progress narration.
    Status { message: String, step: u32 },
    /// One structured slide is ready (direct-streaming output).
    Slide {
        slide_index: usize,
        total_slides: usize,
        slide: SlidePlan,
    },
    /// One compiled HTML fragment is ready (HTML output).
    HtmlSlide {
        slide_index: usize,
        total_slides: usize,
        slide: HtmlSlide,
    },
    /// Terminal: the assembled HTML document plus its plan.
    HtmlComplete {
        plan: PresentationPlan,
        html_content: String,
    },
    /// Terminal: the full structured plan.
    Complete { plan: PresentationPlan },
    /// Terminal: unrecoverable failure.
    Error { message: String },
}

impl AgentEvent {
    pub fn status(message: impl Into<String>, step: u32) -> Self {
        AgentEvent::Status {
            message: message.into(),
            step,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        AgentEvent::Error {
            message: message.into(),
        }
    }

    /// Terminal events end the stream; nothing may be emitted after one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AgentEvent::HtmlComplete { .. } | AgentEvent::Complete { .. } | AgentEvent::Error { .. }
        )
    }
}

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error logging.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// SINK
// =============================================================================

/// The consumer went away; production should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event receiver dropped")]
pub struct SinkClosed;

/// Producer half of a generation stream.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<AgentEvent>,
}

impl EventSink {
    /// Create a bounded sink/receiver pair for one request.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AgentEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Emit one event. Suspends while the channel is full; fails only when
    /// the receiver has been dropped.
    pub async fn send(&self, event: AgentEvent) -> Result<(), SinkClosed> {
        self.tx.send(event).await.map_err(|_| SinkClosed)
    }

    /// Shorthand for progress narration.
    pub async fn status(&self, message: impl Into<String>, step: u32) -> Result<(), SinkClosed> {
        self.send(AgentEvent::status(message, step)).await
    }
}

// =============================================================================
// TESTS
// =============================================================================
