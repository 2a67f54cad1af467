//! Generation orchestrators and their supporting pieces.
//!
//! ARCHITECTURE
//! ============
//! `generate` is the facade the routes call; it dispatches to the live
//! `agent` or the `mock` demo generator and owns the fallback guarantee.
//! `suggest` is the one-shot topic suggester. `knowledge` and `precanned`
//! are the shared leaves: curated reference text and the slide-merge pass
//! both generators use.

pub mod agent;
pub mod generate;
pub mod knowledge;
pub mod mock;
pub mod precanned;
pub mod suggest;
