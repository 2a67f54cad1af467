//! Rendered-output types shared by the compiler and assembler.

use serde::{Deserialize, Serialize};

use crate::plan::SlideLayout;

/// One compiled slide: a self-contained `<style>…</style><div>…</div>`
/// fragment plus the metadata the shell's presenter script needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlSlide {
    pub index: usize,
    pub title: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<SlideLayout>,
}

/// Palette metadata for a theme, mirrored in its `css` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub background: String,
    pub surface: String,
    pub surface_hover: String,
    pub border: String,
    pub border_hover: String,
    pub text: String,
    pub text_muted: String,
    pub text_subtle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeGradients {
    pub title: String,
    pub progress_bar: String,
    pub accent: String,
    pub orb1: String,
    pub orb2: String,
}

/// A visual theme as stored on disk. `css` is a precomputed `:root { … }`
/// block defining the custom properties every compiled fragment relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlTheme {
    pub name: String,
    pub id: String,
    pub description: String,
    pub colors: ThemeColors,
    pub gradients: ThemeGradients,
    pub css: String,
}

/// Final assembled document plus summary metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledPresentation {
    pub html: String,
    pub title: String,
    pub slide_count: usize,
    pub theme_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_from_json() {
        let theme: HtmlTheme = serde_json::from_str(
            r##"{
                "name": "Cyan Violet",
                "id": "cyan-violet",
                "description": "Electric cyan and violet on deep slate",
                "colors": {
                    "primary": "#22d3ee",
                    "secondary": "#8b5cf6",
                    "tertiary": "#f472b6",
                    "background": "#0b1120",
                    "surface": "rgba(148, 163, 184, 0.06)",
                    "surfaceHover": "rgba(148, 163, 184, 0.12)",
                    "border": "rgba(148, 163, 184, 0.18)",
                    "borderHover": "rgba(148, 163, 184, 0.32)",
                    "text": "#e2e8f0",
                    "textMuted": "#94a3b8",
                    "textSubtle": "#64748b"
                },
                "gradients": {
                    "title": "linear-gradient(135deg, #22d3ee, #8b5cf6)",
                    "progressBar": "linear-gradient(90deg, #22d3ee, #8b5cf6)",
                    "accent": "linear-gradient(135deg, #22d3ee, #f472b6)",
                    "orb1": "radial-gradient(circle, rgba(34, 211, 238, 0.25), transparent 70%)",
                    "orb2": "radial-gradient(circle, rgba(139, 92, 246, 0.25), transparent 70%)"
                },
                "css": ":root { --primary: #22d3ee; }"
            }"##,
        )
        .expect("parse");

        assert_eq!(theme.id, "cyan-violet");
        assert_eq!(theme.colors.text_muted, "#94a3b8");
        assert!(theme.gradients.progress_bar.starts_with("linear-gradient"));
    }

    #[test]
    fn html_slide_omits_absent_optionals() {
        let slide = HtmlSlide {
            index: 0,
            title: "Intro".into(),
            html: "<div></div>".into(),
            speaker_notes: None,
            layout: Some(SlideLayout::Title),
        };

        let json = serde_json::to_value(&slide).expect("serialize");
        assert_eq!(json["layout"], "title");
        assert!(json.get("speakerNotes").is_none());
    }
}
