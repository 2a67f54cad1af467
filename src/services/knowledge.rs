//! Knowledge accessor: curated reference text for the authoring session.
//!
//! Packs live on disk as one directory per topic containing markdown
//! sections. Reads only; the refresh pipeline that writes these files is a
//! separate concern. Absent topics and sections produce sentinel text
//! instead of errors, so the authoring session can keep going on a miss.

use std::fs;
use std::path::Path;

use serde::Serialize;

/// One knowledge pack and its section names, as listed by the topics route.
#[derive(Debug, Clone, Serialize)]
pub struct TopicInfo {
    pub topic: String,
    pub sections: Vec<String>,
}

/// Directory aliases: the library uses "foundry" on disk but clients send
/// "microsoft-foundry" as the topic key.
pub fn resolve_topic_dir(topic: &str) -> &str {
    match topic {
        "microsoft-foundry" => "foundry",
        other => other,
    }
}

/// Load reference text for `topic`: one named section, or every section of
/// the pack joined under uppercase headers.
pub fn load(root: &Path, topic: &str, section: Option<&str>) -> String {
    let topic_dir = root.join(topic);
    if !topic_dir.is_dir() {
        return format!("Knowledge pack for {topic} not found.");
    }

    if let Some(section) = section {
        let file = topic_dir.join(format!("{section}.md"));
        return match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(_) => format!("Section {section} not found for topic {topic}."),
        };
    }

    let mut parts = Vec::new();
    for name in section_names(&topic_dir) {
        let path = topic_dir.join(format!("{name}.md"));
        let Ok(text) = fs::read_to_string(&path) else {
            tracing::warn!(path = %path.display(), "skipping unreadable knowledge file");
            continue;
        };
        let header = name.replace('-', " ").to_uppercase();
        parts.push(format!("## {header}\n\n{text}"));
    }
    parts.join("\n\n---\n\n")
}

/// Every knowledge pack under `root` with its section names. A missing root
/// directory reads as no packs.
pub fn available_topics(root: &Path) -> Vec<TopicInfo> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut topics: Vec<TopicInfo> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| {
            let topic = entry.file_name().to_string_lossy().into_owned();
            let sections = section_names(&entry.path());
            TopicInfo { topic, sections }
        })
        .collect();

    topics.sort_by(|a, b| a.topic.cmp(&b.topic));
    topics
}

/// Markdown section names in a pack directory, sorted for stable output.
fn section_names(topic_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(topic_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.strip_suffix(".md").map(ToOwned::to_owned)
        })
        .collect();

    names.sort();
    names
}

#[cfg(test)]
#[path = "knowledge_test.rs"]
mod tests;
