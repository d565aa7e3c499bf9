use std::path::Path;

use anyhow::{Context, Result};

use crate::heuristics::AttributionConfig;
use crate::models::{AnnotatedDocument, Article};

/// Parse an annotated document JSON file
pub fn parse_document_file(path: &Path) -> Result<AnnotatedDocument> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_document_json(&content)
}

/// Parse and validate an annotated document JSON string
pub fn parse_document_json(json: &str) -> Result<AnnotatedDocument> {
    let doc: AnnotatedDocument =
        serde_json::from_str(json).context("Failed to parse annotated document JSON")?;
    doc.validate().context("Invalid annotated document")?;
    Ok(doc)
}

/// Parse an articles JSON file
pub fn parse_articles_file(path: &Path) -> Result<Vec<Article>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_articles_json(&content)
}

/// Parse an array of articles
///
/// Annotations are not validated here so that one broken article does not reject the batch.
pub fn parse_articles_json(json: &str) -> Result<Vec<Article>> {
    serde_json::from_str(json).context("Failed to parse articles JSON")
}

/// Load an [`AttributionConfig`] from JSON; missing fields keep their defaults
pub fn load_config(path: &Path) -> Result<AttributionConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse config: {:?}", path))
}

/// Load a reporting-verb list, one lemma per line
pub fn load_vocabulary(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary: {:?}", path))?;
    Ok(parse_vocabulary(&content))
}

/// Lemmas of a vocabulary file; blank lines and `#` comments are skipped
pub fn parse_vocabulary(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
