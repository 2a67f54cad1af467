//! Slide→HTML compiler: one pure fragment builder per layout kind.
//!
//! DESIGN
//! ======
//! - Dispatch is an exhaustive match over `SlideLayout`. A slide carrying a
//!   non-empty `youtubeUrl` compiles as a video embed regardless of its
//!   declared layout.
//! - Every fragment is a self-contained `<style>…</style><div>…</div>` block
//!   that leans on the theme's CSS custom properties (`--primary`,
//!   `--gradient-title`, `--surface`, ...), so visual theming stays entirely
//!   in the assembler's CSS injection.
//! - All slide text passes through `esc` before interpolation. Titles, key
//!   points, code, and captions originate from AI output or user input and
//!   are never trusted as raw HTML.

use crate::pipeline::types::HtmlSlide;
use crate::plan::{ChartPoint, SlideLayout, SlidePlan};

// =============================================================================
// THEME MAPPING
// =============================================================================

/// Map a component-era theme name to an HTML theme id. HTML theme ids pass
/// through unchanged; anything unknown lands on the default.
#[must_use]
pub fn map_to_html_theme(theme: &str) -> &'static str {
    match theme {
        "clean-corporate" | "slate-blue" => "slate-blue",
        "bold-statement" | "amber-rose" => "amber-rose",
        "warm-minimal" | "emerald-cyan" => "emerald-cyan",
        // "dark-luxe", "tech-gradient", "cyan-violet", and unknowns.
        _ => "cyan-violet",
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Compile one slide plan into a rendered fragment plus presenter metadata.
#[must_use]
pub fn compile(slide: &SlidePlan, index: usize) -> HtmlSlide {
    let has_video_url = slide.youtube_url.as_deref().is_some_and(|u| !u.is_empty());

    let html = if slide.layout == SlideLayout::Youtube || has_video_url {
        build_youtube_fragment(slide)
    } else {
        match slide.layout {
            SlideLayout::Title => build_title_fragment(slide),
            SlideLayout::Content => build_content_fragment(slide),
            SlideLayout::Split => build_split_fragment(slide),
            SlideLayout::Code => build_code_fragment(slide),
            SlideLayout::Stat => build_stat_fragment(slide),
            SlideLayout::Comparison => build_comparison_fragment(slide),
            SlideLayout::Timeline => build_timeline_fragment(slide),
            SlideLayout::Quote => build_quote_fragment(slide),
            SlideLayout::Bento => build_bento_fragment(slide),
            SlideLayout::Chart => build_chart_fragment(slide),
            SlideLayout::Demo => build_demo_fragment(slide),
            SlideLayout::Youtube => build_youtube_fragment(slide),
        }
    };

    HtmlSlide {
        index,
        title: slide.title.clone(),
        html,
        speaker_notes: slide.speaker_notes.clone(),
        layout: Some(slide.layout),
    }
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

fn esc(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const EMOJIS: [&str; 10] = ["🚀", "💡", "⚡", "🔧", "📊", "🌐", "🔒", "🎯", "✨", "💻"];

fn pick_emoji(i: usize) -> &'static str {
    EMOJIS[i % EMOJIS.len()]
}

/// Split a stat key point into value and label at the first dash or colon,
/// e.g. `"55% — Faster task completion"`. Without a separator the whole
/// point is the value.
fn split_stat(kp: &str) -> (&str, &str) {
    let Some(pos) = kp.find(['—', '–', '-', ':']) else {
        return (kp, "");
    };
    let value = kp[..pos].trim_end();
    let sep_len = kp[pos..].chars().next().map_or(1, char::len_utf8);
    let label = kp[pos + sep_len..].trim_start();
    if value.is_empty() { (kp, label) } else { (value, label) }
}

/// Split a timeline key point into label and description at the first colon,
/// e.g. `"Phase 1: Setup"`. Without a colon the whole point serves as both.
fn split_timeline(kp: &str) -> (&str, &str) {
    let Some((label, rest)) = kp.split_once(':') else {
        return (kp, kp);
    };
    let desc = rest.trim_start();
    if desc.is_empty() { (label, kp) } else { (label, desc) }
}

/// Split a bento key point into heading and description at the first colon.
/// Without a colon the description is simply empty.
fn split_heading(kp: &str) -> (&str, &str) {
    match kp.split_once(':') {
        Some((heading, rest)) => (heading, rest.trim_start()),
        None => (kp, ""),
    }
}

/// Extract the 11-character video id from a youtube URL (watch, shortlink,
/// embed, or shorts form) or a bare id.
#[must_use]
pub fn extract_youtube_id(url: &str) -> Option<String> {
    const ID_LEN: usize = 11;
    const PREFIXES: [&str; 4] = [
        "youtube.com/watch?v=",
        "youtu.be/",
        "youtube.com/embed/",
        "youtube.com/shorts/",
    ];

    fn is_id_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }

    for prefix in PREFIXES {
        if let Some(pos) = url.find(prefix) {
            let id: String = url[pos + prefix.len()..].chars().take(ID_LEN).collect();
            if id.len() == ID_LEN && id.chars().all(is_id_char) {
                return Some(id);
            }
        }
    }

    if url.len() == ID_LEN && url.chars().all(is_id_char) {
        return Some(url.to_string());
    }
    None
}

// =============================================================================
// FRAGMENT BUILDERS
// =============================================================================

fn build_title_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.title-s{display:flex;flex-direction:column;align-items:center;justify-content:center;height:100%;padding:80px;text-align:center;position:relative;overflow:hidden}
.title-s .orb{position:absolute;border-radius:50%;filter:blur(80px);pointer-events:none}
.title-s .orb1{width:400px;height:400px;top:-100px;right:-100px;background:var(--orb1)}
.title-s .orb2{width:300px;height:300px;bottom:-50px;left:-50px;background:var(--orb2)}
.title-s h1{font-size:3.5rem;font-weight:800;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:24px;animation:tsFadeUp .8s ease both}
.title-s .sub{font-size:1.3rem;color:var(--text-muted);margin-bottom:12px;animation:tsFadeUp .8s ease .15s both}
.title-s .extra{font-size:0.95rem;color:var(--text-subtle);animation:tsFadeUp .8s ease .3s both}
@keyframes tsFadeUp{from{opacity:0;transform:translateY(30px)}to{opacity:1;transform:translateY(0)}}
</style>";

    let subtitle = slide.key_points.first().map(String::as_str).unwrap_or_default();
    let extra = slide.key_points.get(1).map(String::as_str).unwrap_or_default();
    format!(
        r#"{CSS}
<div class="title-s">
  <div class="orb orb1"></div>
  <div class="orb orb2"></div>
  <h1>{title}</h1>
  <div class="sub">{subtitle}</div>
  <div class="extra">{extra}</div>
</div>"#,
        title = esc(&slide.title),
        subtitle = esc(subtitle),
        extra = esc(extra),
    )
}

fn build_content_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.content-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.content-s .orb{position:absolute;border-radius:50%;filter:blur(60px);pointer-events:none}
.content-s .orb1{width:300px;height:300px;top:-80px;right:-80px;background:var(--orb1)}
.content-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:40px}
.cs-item{display:flex;align-items:flex-start;gap:16px;padding:14px 20px;background:var(--surface);border:1px solid var(--border);border-radius:12px;margin-bottom:12px;animation:csFade .5s ease both}
.cs-icon{width:36px;height:36px;border-radius:8px;background:rgba(var(--primary-rgb),0.15);display:flex;align-items:center;justify-content:center;font-size:1.1rem;flex-shrink:0}
.cs-text{font-size:1.05rem;line-height:1.6;color:var(--text)}
@keyframes csFade{from{opacity:0;transform:translateX(-20px)}to{opacity:1;transform:translateX(0)}}
</style>";

    let items: Vec<String> = slide
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            format!(
                r#"<div class="cs-item" style="animation-delay:{delay}ms">
    <div class="cs-icon">{icon}</div>
    <div class="cs-text">{text}</div>
  </div>"#,
                delay = i * 100,
                icon = pick_emoji(i),
                text = esc(kp),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="content-s">
  <div class="orb orb1"></div>
  <h2>{title}</h2>
  {items}
</div>"#,
        title = esc(&slide.title),
        items = items.join("\n  "),
    )
}

fn build_split_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.split-s{display:grid;grid-template-columns:55% 45%;height:100%;position:relative;overflow:hidden}
.split-l{padding:80px 48px 80px 80px;display:flex;flex-direction:column;justify-content:center}
.split-bar{width:40px;height:4px;border-radius:2px;background:var(--gradient-title);margin-bottom:24px}
.split-l h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:32px}
.sp-item{display:flex;align-items:flex-start;gap:14px;margin-bottom:16px;animation:spFade .5s ease both}
.sp-num{width:24px;height:24px;border-radius:6px;background:rgba(var(--primary-rgb),0.2);color:var(--primary);font-size:0.75rem;font-weight:700;display:flex;align-items:center;justify-content:center;flex-shrink:0;margin-top:2px}
.sp-text{font-size:1rem;line-height:1.6;color:var(--text)}
.split-r{position:relative;background:rgba(var(--primary-rgb),0.08);border-left:1px solid var(--border);display:flex;align-items:center;justify-content:center;padding:48px}
.sp-stack{width:100%;max-width:320px;display:flex;flex-direction:column;align-items:center;gap:16px}
.sp-card{width:100%;background:var(--surface);border:1px solid var(--border);border-radius:12px;padding:16px;text-align:center;font-size:0.9rem;font-weight:600;color:var(--primary)}
.sp-link{width:2px;height:24px;background:var(--border)}
.sp-grid{display:grid;grid-template-columns:1fr 1fr;gap:12px;width:100%}
.sp-cell{background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:12px;text-align:center;font-size:0.8rem;color:var(--text-muted)}
@keyframes spFade{from{opacity:0;transform:translateX(-20px)}to{opacity:1;transform:translateX(0)}}
</style>";

    let items: Vec<String> = slide
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            format!(
                r#"<div class="sp-item" style="animation-delay:{delay}ms">
      <div class="sp-num">{num}</div>
      <div class="sp-text">{text}</div>
    </div>"#,
                delay = i * 100,
                num = i + 1,
                text = esc(kp),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="split-s">
  <div class="split-l">
    <div class="split-bar"></div>
    <h2>{title}</h2>
    {items}
  </div>
  <div class="split-r">
    <div class="sp-stack">
      <div class="sp-card">Your Application</div>
      <div class="sp-link"></div>
      <div class="sp-card">SDK / Agent Layer</div>
      <div class="sp-link"></div>
      <div class="sp-grid">
        <div class="sp-cell">Tools</div>
        <div class="sp-cell">Models</div>
      </div>
    </div>
  </div>
</div>"#,
        title = esc(&slide.title),
        items = items.join("\n    "),
    )
}

fn build_stat_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.stat-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.stat-s .orb{position:absolute;border-radius:50%;filter:blur(60px);pointer-events:none}
.stat-s .orb1{width:350px;height:350px;bottom:-100px;left:-80px;background:var(--orb2)}
.stat-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:48px;text-align:center}
.stat-grid{display:grid;grid-template-columns:1fr 1fr;gap:24px;max-width:700px;margin:0 auto}
.stat-card{background:var(--surface);border:1px solid var(--border);border-radius:16px;padding:32px;text-align:center;animation:stPop .5s ease both}
.stat-val{font-size:2.4rem;font-weight:800;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:8px}
.stat-lbl{font-size:0.95rem;color:var(--text-muted)}
@keyframes stPop{from{opacity:0;transform:scale(0.85)}to{opacity:1;transform:scale(1)}}
</style>";

    let stats: Vec<String> = slide
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            let (value, label) = split_stat(kp);
            format!(
                r#"<div class="stat-card" style="animation-delay:{delay}ms">
      <div class="stat-val">{value}</div>
      <div class="stat-lbl">{label}</div>
    </div>"#,
                delay = i * 120,
                value = esc(value),
                label = esc(label),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="stat-s">
  <div class="orb orb1"></div>
  <h2>{title}</h2>
  <div class="stat-grid">{stats}</div>
</div>"#,
        title = esc(&slide.title),
        stats = stats.join("\n    "),
    )
}

fn build_code_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.code-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.code-s h2{font-size:2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:24px}
.code-s .caption{font-size:0.85rem;color:var(--text-subtle);margin-bottom:16px}
.code-block{background:rgba(0,0,0,0.4);border:1px solid var(--border);border-radius:12px;padding:24px;font-family:'Fira Code',monospace,Consolas,'Courier New';font-size:0.85rem;line-height:1.7;color:#a6e3a1;overflow-x:auto;white-space:pre;flex:1;max-height:60vh}
.code-lang{font-size:0.7rem;text-transform:uppercase;letter-spacing:2px;color:var(--primary);margin-bottom:8px}
</style>";

    let example = slide.code_example.as_ref();
    let code = example.map_or("// No code provided", |e| e.code.as_str());
    let lang = example.map_or("typescript", |e| e.language.as_str());
    let caption = example
        .and_then(|e| e.caption.as_deref())
        .filter(|c| !c.is_empty())
        .map(|c| format!(r#"<div class="caption">{}</div>"#, esc(c)))
        .unwrap_or_default();

    format!(
        r#"{CSS}
<div class="code-s">
  <h2>{title}</h2>
  {caption}
  <div class="code-lang">{lang}</div>
  <pre class="code-block">{code}</pre>
</div>"#,
        title = esc(&slide.title),
        caption = caption,
        lang = esc(lang),
        code = esc(code),
    )
}

fn build_comparison_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.cmp-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.cmp-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:40px;text-align:center}
.cmp-grid{display:grid;grid-template-columns:1fr 1px 1fr;gap:32px;flex:1}
.cmp-col{display:flex;flex-direction:column;gap:12px}
.cmp-div{background:var(--border);align-self:stretch}
.cmp-item{display:flex;align-items:flex-start;gap:10px;font-size:1rem;color:var(--text);padding:10px 0;animation:cmpFade .5s ease both}
.cmp-dot{width:8px;height:8px;border-radius:50%;background:var(--primary);margin-top:7px;flex-shrink:0}
@keyframes cmpFade{from{opacity:0;transform:translateY(15px)}to{opacity:1;transform:translateY(0)}}
</style>";

    fn render_col(points: &[String]) -> String {
        points
            .iter()
            .enumerate()
            .map(|(i, kp)| {
                format!(
                    r#"<div class="cmp-item" style="animation-delay:{delay}ms"><span class="cmp-dot"></span>{text}</div>"#,
                    delay = i * 100,
                    text = esc(kp),
                )
            })
            .collect::<Vec<_>>()
            .join("\n    ")
    }

    let mid = slide.key_points.len().div_ceil(2);
    let (left, right) = slide.key_points.split_at(mid);

    format!(
        r#"{CSS}
<div class="cmp-s">
  <h2>{title}</h2>
  <div class="cmp-grid">
    <div class="cmp-col">{left}</div>
    <div class="cmp-div"></div>
    <div class="cmp-col">{right}</div>
  </div>
</div>"#,
        title = esc(&slide.title),
        left = render_col(left),
        right = render_col(right),
    )
}

fn build_timeline_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.tl-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.tl-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:40px;text-align:center}
.tl-track{position:relative;padding-left:32px;flex:1;display:flex;flex-direction:column;gap:20px}
.tl-track::before{content:'';position:absolute;left:11px;top:0;bottom:0;width:2px;background:var(--border)}
.tl-item{display:flex;align-items:flex-start;gap:20px;animation:tlSlide .5s ease both}
.tl-node{width:24px;height:24px;border-radius:50%;background:var(--primary);flex-shrink:0;position:relative;z-index:1;border:3px solid var(--background)}
.tl-card{background:var(--surface);border:1px solid var(--border);border-radius:12px;padding:16px 20px;flex:1}
.tl-label{font-size:0.8rem;font-weight:600;color:var(--primary);text-transform:uppercase;letter-spacing:1px;margin-bottom:6px}
.tl-desc{font-size:0.95rem;color:var(--text);line-height:1.5}
@keyframes tlSlide{from{opacity:0;transform:translateX(-20px)}to{opacity:1;transform:translateX(0)}}
</style>";

    let items: Vec<String> = slide
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            let (label, desc) = split_timeline(kp);
            format!(
                r#"<div class="tl-item" style="animation-delay:{delay}ms">
      <div class="tl-node"></div>
      <div class="tl-card">
        <div class="tl-label">{label}</div>
        <div class="tl-desc">{desc}</div>
      </div>
    </div>"#,
                delay = i * 150,
                label = esc(label),
                desc = esc(desc),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="tl-s">
  <h2>{title}</h2>
  <div class="tl-track">{items}</div>
</div>"#,
        title = esc(&slide.title),
        items = items.join("\n    "),
    )
}

fn build_quote_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.quote-s{padding:80px;height:100%;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;position:relative;overflow:hidden}
.quote-s .orb{position:absolute;border-radius:50%;filter:blur(80px);pointer-events:none}
.quote-s .orb1{width:400px;height:400px;top:-120px;left:50%;transform:translateX(-50%);background:var(--orb1)}
.quote-mark{font-size:8rem;line-height:1;color:var(--primary);opacity:0.2;margin-bottom:-20px}
.quote-text{font-size:1.8rem;font-weight:300;font-style:italic;color:var(--text);max-width:700px;line-height:1.6;margin-bottom:24px}
.quote-author{font-size:1rem;color:var(--text-muted)}
</style>";

    let quote = slide.key_points.first().map(String::as_str).unwrap_or_default();
    let author = slide.key_points.get(1).map(String::as_str).unwrap_or_default();

    format!(
        r#"{CSS}
<div class="quote-s">
  <div class="orb orb1"></div>
  <div class="quote-mark">“</div>
  <div class="quote-text">{quote}</div>
  <div class="quote-author">{author}</div>
</div>"#,
        quote = esc(quote),
        author = esc(author),
    )
}

fn build_bento_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.bento-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.bento-head{display:flex;align-items:flex-start;gap:16px;margin-bottom:32px}
.bento-bar{width:6px;height:40px;border-radius:3px;background:var(--gradient-title);flex-shrink:0;margin-top:4px}
.bento-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text}
.bn-grid{flex:1;display:grid;gap:16px}
.bn-card{position:relative;overflow:hidden;background:var(--surface);border:1px solid var(--border);border-radius:14px;padding:20px;display:flex;flex-direction:column;animation:bnFade .5s ease both}
.bn-top{display:flex;align-items:center;gap:8px;margin-bottom:12px}
.bn-icon{font-size:0.85rem;color:var(--primary)}
.bn-card h3{font-size:1rem;font-weight:600;color:var(--primary)}
.bn-desc{font-size:0.85rem;color:var(--text-muted);line-height:1.6}
.bn-accent{position:absolute;left:0;right:0;bottom:0;height:4px;background:var(--gradient-title);opacity:0.2}
@keyframes bnFade{from{opacity:0;transform:translateY(15px)}to{opacity:1;transform:translateY(0)}}
</style>";

    const CARD_ICONS: [&str; 6] = ["◆", "◇", "▲", "●", "■", "★"];

    let count = slide.key_points.len();
    let columns = if count == 4 { 2 } else { 3 };

    let cards: Vec<String> = slide
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            let (heading, description) = split_heading(kp);
            // The lead card stretches across two columns on dense grids.
            let span = if i == 0 && count > 4 { ";grid-column:span 2" } else { "" };
            format!(
                r#"<div class="bn-card" style="animation-delay:{delay}ms{span}">
      <div class="bn-top"><span class="bn-icon">{icon}</span><h3>{heading}</h3></div>
      <p class="bn-desc">{description}</p>
      <div class="bn-accent"></div>
    </div>"#,
                delay = i * 100,
                span = span,
                icon = CARD_ICONS[i % CARD_ICONS.len()],
                heading = esc(heading),
                description = esc(description),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="bento-s">
  <div class="bento-head">
    <div class="bento-bar"></div>
    <h2>{title}</h2>
  </div>
  <div class="bn-grid" style="grid-template-columns:repeat({columns},1fr)">
    {cards}
  </div>
</div>"#,
        title = esc(&slide.title),
        columns = columns,
        cards = cards.join("\n    "),
    )
}

fn build_chart_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.chart-s{padding:80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.chart-s h2{font-size:2.2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:40px}
.chart-area{flex:1;display:flex;align-items:flex-end;gap:32px;padding:0 16px 16px}
.chart-col{flex:1;display:flex;flex-direction:column;align-items:center;animation:chRise .6s ease both}
.chart-val{font-size:1.1rem;font-weight:700;color:var(--primary);margin-bottom:12px}
.chart-bar-wrap{width:100%;height:280px;position:relative}
.chart-bar{position:absolute;bottom:0;left:4px;right:4px;background:var(--gradient-title);border-radius:8px 8px 0 0;min-height:8px;box-shadow:0 8px 24px rgba(var(--primary-rgb),0.25)}
.chart-lbl{font-size:0.8rem;color:var(--text-muted);margin-top:14px;text-align:center;max-width:100px;line-height:1.3}
.chart-axis{height:1px;background:rgba(255,255,255,0.1);margin:0 16px}
@keyframes chRise{from{opacity:0;transform:translateY(20px)}to{opacity:1;transform:translateY(0)}}
</style>";

    let data: &[ChartPoint] = slide
        .chart_data
        .as_ref()
        .map_or(&[], |chart| chart.data.as_slice());
    let max = data.iter().fold(1.0_f64, |acc, point| acc.max(point.value));

    let bars: Vec<String> = data
        .iter()
        .enumerate()
        .map(|(i, point)| {
            format!(
                r#"<div class="chart-col" style="animation-delay:{delay}ms">
      <div class="chart-val">{value}</div>
      <div class="chart-bar-wrap"><div class="chart-bar" style="height:{height}%"></div></div>
      <div class="chart-lbl">{label}</div>
    </div>"#,
                delay = i * 120,
                value = point.value,
                height = (point.value / max) * 100.0,
                label = esc(&point.label),
            )
        })
        .collect();

    format!(
        r#"{CSS}
<div class="chart-s">
  <h2>{title}</h2>
  <div class="chart-area">
    {bars}
  </div>
  <div class="chart-axis"></div>
</div>"#,
        title = esc(&slide.title),
        bars = bars.join("\n    "),
    )
}

fn build_demo_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.demo-s{padding:0;height:100%;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;position:relative;overflow:hidden;background:radial-gradient(ellipse at 50% 50%,rgba(var(--primary-rgb),0.15),transparent 70%)}
.demo-s .orb{position:absolute;border-radius:50%;filter:blur(100px);pointer-events:none;animation:demoPulse 3s ease-in-out infinite alternate}
.demo-s .orb1{width:500px;height:500px;top:-150px;right:-150px;background:var(--orb1);opacity:0.6}
.demo-s .orb2{width:400px;height:400px;bottom:-120px;left:-120px;background:var(--orb2);opacity:0.5}
.demo-s .orb3{width:250px;height:250px;top:50%;left:50%;transform:translate(-50%,-50%);background:var(--primary);opacity:0.08}
.demo-badge{display:inline-flex;align-items:center;gap:10px;padding:10px 28px;border-radius:50px;background:rgba(var(--primary-rgb),0.15);border:1px solid rgba(var(--primary-rgb),0.3);margin-bottom:32px;animation:demoFadeIn .6s ease both}
.demo-badge-dot{width:10px;height:10px;border-radius:50%;background:#ef4444;animation:demoBlink 1.5s ease-in-out infinite}
.demo-badge-text{font-size:0.85rem;font-weight:600;text-transform:uppercase;letter-spacing:3px;color:var(--primary)}
.demo-s h1{font-size:4.5rem;font-weight:900;text-transform:uppercase;letter-spacing:6px;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:24px;animation:demoFadeIn .8s ease .2s both}
.demo-s .demo-sub{font-size:1.2rem;color:var(--text-muted);max-width:500px;line-height:1.6;animation:demoFadeIn .8s ease .4s both}
.demo-line{width:80px;height:4px;border-radius:2px;background:var(--gradient-title);margin:28px auto 0;animation:demoFadeIn .8s ease .6s both}
@keyframes demoPulse{0%{transform:scale(1);opacity:0.5}100%{transform:scale(1.15);opacity:0.7}}
@keyframes demoBlink{0%,100%{opacity:1}50%{opacity:0.3}}
@keyframes demoFadeIn{from{opacity:0;transform:translateY(20px)}to{opacity:1;transform:translateY(0)}}
</style>";

    let sub = slide
        .key_points
        .first()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Watch the feature in action");

    format!(
        r#"{CSS}
<div class="demo-s">
  <div class="orb orb1"></div>
  <div class="orb orb2"></div>
  <div class="orb orb3"></div>
  <div class="demo-badge">
    <div class="demo-badge-dot"></div>
    <div class="demo-badge-text">Live Demo</div>
  </div>
  <h1>{title}</h1>
  <div class="demo-sub">{sub}</div>
  <div class="demo-line"></div>
</div>"#,
        title = esc(&slide.title),
        sub = esc(sub),
    )
}

fn build_youtube_fragment(slide: &SlidePlan) -> String {
    const CSS: &str = r"<style>
.yt-s{padding:60px 80px;height:100%;display:flex;flex-direction:column;position:relative;overflow:hidden}
.yt-s h2{font-size:2rem;font-weight:700;background:var(--gradient-title);-webkit-background-clip:text;-webkit-text-fill-color:transparent;background-clip:text;margin-bottom:24px;text-align:center}
.yt-wrap{flex:1;display:flex;align-items:center;justify-content:center}
.yt-wrap iframe{width:100%;max-width:800px;aspect-ratio:16/9;border:none;border-radius:12px;box-shadow:0 8px 32px rgba(0,0,0,0.3)}
</style>";

    let url = slide
        .youtube_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .or_else(|| slide.key_points.first().map(String::as_str))
        .unwrap_or_default();

    let Some(video_id) = extract_youtube_id(url) else {
        let mut fallback = slide.clone();
        fallback.key_points = vec![format!("Invalid YouTube URL: {url}")];
        return build_content_fragment(&fallback);
    };

    format!(
        r#"{CSS}
<div class="yt-s">
  <h2>{title}</h2>
  <div class="yt-wrap">
    <iframe src="https://www.youtube.com/embed/{video_id}" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>
  </div>
</div>"#,
        title = esc(&slide.title),
        video_id = video_id,
    )
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
