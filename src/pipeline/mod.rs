//! Rendering pipeline: slide plans → HTML fragments → one shareable document.

pub mod assemble;
pub mod compile;
pub mod types;

pub use types::{AssembledPresentation, HtmlSlide, HtmlTheme};
