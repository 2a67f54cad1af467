//! HTML assembler: compiled fragments + theme CSS + page shell in, one
//! self-contained presentation document out.
//!
//! Themes and the shell are static resources on disk, looked up under the
//! configured templates directory. An unknown theme id is a configuration
//! error surfaced to the caller, never a silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::event::ErrorCode;
use crate::pipeline::types::{AssembledPresentation, HtmlSlide, HtmlTheme};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("theme resource not found: {0}")]
    ThemeRead(String, #[source] std::io::Error),
    #[error("theme resource invalid: {0}")]
    ThemeParse(String, #[source] serde_json::Error),
    #[error("shell template not found: {0}")]
    ShellRead(String, #[source] std::io::Error),
    #[error("speaker notes serialization failed")]
    Notes(#[source] serde_json::Error),
}

impl ErrorCode for AssembleError {
    fn error_code(&self) -> &'static str {
        match self {
            AssembleError::ThemeRead(..) => "E_THEME_NOT_FOUND",
            AssembleError::ThemeParse(..) => "E_THEME_INVALID",
            AssembleError::ShellRead(..) => "E_SHELL_NOT_FOUND",
            AssembleError::Notes(..) => "E_NOTES_SERIALIZE",
        }
    }
}

// =============================================================================
// RESOURCE LOADING
// =============================================================================

fn theme_path(templates_dir: &Path, theme_id: &str) -> PathBuf {
    templates_dir.join("themes").join(format!("{theme_id}.json"))
}

/// Load one theme by id.
pub fn load_theme(templates_dir: &Path, theme_id: &str) -> Result<HtmlTheme, AssembleError> {
    let path = theme_path(templates_dir, theme_id);
    let text = fs::read_to_string(&path)
        .map_err(|e| AssembleError::ThemeRead(path.display().to_string(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| AssembleError::ThemeParse(path.display().to_string(), e))
}

/// Load the page shell template.
pub fn load_shell_template(templates_dir: &Path) -> Result<String, AssembleError> {
    let path = templates_dir.join("shell.html");
    fs::read_to_string(&path).map_err(|e| AssembleError::ShellRead(path.display().to_string(), e))
}

/// Theme listing entry for the themes route.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Every parseable theme under the templates directory, sorted by id.
/// Unreadable or invalid files are skipped with a warning.
pub fn list_themes(templates_dir: &Path) -> Vec<ThemeSummary> {
    let themes_dir = templates_dir.join("themes");
    let Ok(entries) = fs::read_dir(&themes_dir) else {
        tracing::warn!(dir = %themes_dir.display(), "themes directory unreadable");
        return Vec::new();
    };

    let mut themes: Vec<ThemeSummary> = entries
        .flatten()
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|entry| {
            let path = entry.path();
            let Ok(text) = fs::read_to_string(&path) else {
                tracing::warn!(path = %path.display(), "skipping unreadable theme file");
                return None;
            };
            match serde_json::from_str::<HtmlTheme>(&text) {
                Ok(theme) => Some(ThemeSummary {
                    id: theme.id,
                    name: theme.name,
                    description: theme.description,
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping invalid theme file");
                    None
                }
            }
        })
        .collect();

    themes.sort_by(|a, b| a.id.cmp(&b.id));
    themes
}

// =============================================================================
// ASSEMBLY
// =============================================================================

#[derive(Serialize)]
struct SpeakerNote<'a> {
    title: &'a str,
    notes: &'a str,
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Substitute fragments, theme CSS, and the speaker-notes JSON side-channel
/// into the shell. The title is escaped; fragment HTML is already safe and
/// is not re-escaped.
pub fn assemble(
    templates_dir: &Path,
    title: &str,
    slides: &[HtmlSlide],
    theme_id: &str,
) -> Result<AssembledPresentation, AssembleError> {
    let theme = load_theme(templates_dir, theme_id)?;
    let shell = load_shell_template(templates_dir)?;

    let slides_html: Vec<String> = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let active = if i == 0 { " active" } else { "" };
            format!(
                "<div class=\"slide{active}\" id=\"slide-{n}\">\n{html}\n</div>",
                n = i + 1,
                html = slide.html,
            )
        })
        .collect();

    let notes: Vec<SpeakerNote> = slides
        .iter()
        .map(|slide| SpeakerNote {
            title: &slide.title,
            notes: slide.speaker_notes.as_deref().unwrap_or_default(),
        })
        .collect();
    let notes_json = serde_json::to_string(&notes).map_err(AssembleError::Notes)?;

    let html = shell
        .replacen("{{TITLE}}", &escape_html(title), 1)
        .replacen("{{THEME_CSS}}", &theme.css, 1)
        .replacen("{{SLIDES}}", &slides_html.join("\n\n"), 1)
        .replacen("{{SPEAKER_NOTES_JSON}}", &notes_json, 1)
        .replace("{{TOTAL_SLIDES}}", &slides.len().to_string());

    Ok(AssembledPresentation {
        html,
        title: title.to_string(),
        slide_count: slides.len(),
        theme_id: theme_id.to_string(),
    })
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
