//! Generation facade: picks the live agent or the demo generator.
//!
//! DESIGN
//! ======
//! The demo-mode guarantee lives here. A request only ever fails outright
//! when both generators fail; an agent failure is narrated with a step-0
//! status and answered by a full demo run instead. Cancellation (the SSE
//! client dropping its receiver) is not a failure and never triggers a
//! fallback run.

use tracing::{info, warn};

use crate::event::{ErrorCode, EventSink, SinkClosed};
use crate::llm::types::LlmError;
use crate::pipeline::assemble::AssembleError;
use crate::plan::GenerateRequest;
use crate::state::AppState;

use super::{agent, mock};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The event receiver was dropped mid-stream.
    #[error("stream cancelled: {0}")]
    Cancelled(#[from] SinkClosed),

    /// The LLM conversation failed.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The authoring session exceeded its wall-clock budget.
    #[error("authoring session timed out after {0}s")]
    SessionTimeout(u64),

    /// Theme or shell resources could not be loaded or substituted.
    #[error("assembly error: {0}")]
    Assemble(#[from] AssembleError),
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled(_) => "E_STREAM_CANCELLED",
            Self::Llm(_) => "E_LLM_ERROR",
            Self::SessionTimeout(_) => "E_SESSION_TIMEOUT",
            Self::Assemble(_) => "E_ASSEMBLE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            Self::SessionTimeout(_) => true,
            _ => false,
        }
    }
}

// =============================================================================
// FACADE
// =============================================================================

/// Generate one presentation, streaming events into `sink`.
///
/// Returns `Ok` when a terminal event was delivered or the client went
/// away; cancellation is absorbed here so callers only see real failures.
///
/// # Errors
///
/// Fails when the selected generator fails terminally, including the demo
/// generator running after an agent fallback.
pub async fn generate(state: &AppState, req: &GenerateRequest, sink: &EventSink) -> Result<(), GenerateError> {
    match run_with_fallback(state, req, sink).await {
        Err(GenerateError::Cancelled(_)) => {
            info!("generate: client disconnected, stopping");
            Ok(())
        }
        other => other,
    }
}

async fn run_with_fallback(state: &AppState, req: &GenerateRequest, sink: &EventSink) -> Result<(), GenerateError> {
    if state.force_mock {
        info!("generate: USE_MOCK_AGENT enabled, using demo generator");
        return mock::run(state, req, sink).await;
    }

    let Some(llm) = state.llm.clone() else {
        warn!("generate: no LLM configured, using demo generator");
        sink.status("LLM not configured. Falling back to demo mode.", 0).await?;
        return mock::run(state, req, sink).await;
    };

    match agent::run(state, &llm, req, sink).await {
        Ok(()) => Ok(()),
        Err(e @ GenerateError::Cancelled(_)) => Err(e),
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "generate: agent failed, falling back to demo mode");
            sink.status(format!("Agent backend unavailable ({e}). Falling back to demo mode."), 0)
                .await?;
            mock::run(state, req, sink).await
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
