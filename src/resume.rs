//! Pulls a skill vocabulary out of resume text.
//!
//! The skills section of a resume is a run of lines shaped like
//! "Category: item1, item2, ..." between two section headings. This module
//! slices that window out of the full text and splits the category lines
//! into individual skill strings. No file format knowledge lives here; the
//! caller hands in plain text (PDF extraction is upstream).

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Heading that opens the skills section in most resume layouts.
pub const DEFAULT_START_MARKER: &str = "Technical Proficiencies";
/// Heading of the section that follows it.
pub const DEFAULT_END_MARKER: &str = "Professional Experience";

/// Extract distinct skill strings from resume text, sorted.
///
/// The window between `start_marker` and `end_marker` is matched
/// case-insensitively and non-greedily. If the markers don't bound a
/// window, the whole text is scanned instead; a resume with unusual
/// headings degrades to a noisier vocabulary rather than an error.
pub fn extract_skills(text: &str, start_marker: &str, end_marker: &str) -> Result<Vec<String>> {
    let window_re = Regex::new(&format!(
        "(?is){}(.*?){}",
        regex::escape(start_marker),
        regex::escape(end_marker)
    ))
    .context("Invalid skill section markers")?;

    let window = match window_re.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(text),
        None => text,
    };

    // "Languages: Python, Java; Shell Scripting" -> the part after the
    // colon, split on commas and semicolons.
    let line_re = Regex::new(r"([\w\s&/()\-]+):\s*([^\n]+)").context("Invalid skill line pattern")?;

    let mut skills = BTreeSet::new();
    for caps in line_re.captures_iter(window) {
        let items = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        for item in items.split([',', ';']) {
            let skill = item.trim();
            if !skill.is_empty() {
                skills.insert(skill.to_string());
            }
        }
    }

    Ok(skills.into_iter().collect())
}

/// Same extraction with the default section headings.
pub fn extract_skills_default(text: &str) -> Result<Vec<String>> {
    extract_skills(text, DEFAULT_START_MARKER, DEFAULT_END_MARKER)
}
