use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::models::TransformedArticle;

/// File name used when output goes to a directory
pub fn output_file_name(at: NaiveDateTime) -> String {
    format!("TransformedArticles_{}.json", at.format("%Y-%m-%d-%H%M%S-%6f"))
}

/// Write transformed articles as pretty JSON
///
/// When `path` is an existing directory, a timestamped file is created inside it.
/// Returns the path actually written.
pub fn write_transformed(articles: &[TransformedArticle], path: &Path) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(output_file_name(Local::now().naive_local()))
    } else {
        path.to_path_buf()
    };

    let file = std::fs::File::create(&target)
        .with_context(|| format!("Failed to create file: {:?}", target))?;
    serde_json::to_writer_pretty(file, articles).context("Failed to write JSON")?;
    info!("Wrote {} articles to {:?}", articles.len(), target);
    Ok(target)
}

/// Human-readable statement listing
pub struct HumanReport<'a> {
    articles: &'a [TransformedArticle],
}

impl<'a> HumanReport<'a> {
    pub fn new(articles: &'a [TransformedArticle]) -> Self {
        Self { articles }
    }

    /// Format every article with its statements
    pub fn format(&self) -> String {
        let mut output = String::new();

        for article in self.articles {
            output.push_str(&format!("{}\n", article.article_title));
            output.push_str(&format!(
                "{} | {}",
                article.publish_location,
                article.article_timestamp.as_deref().unwrap_or("unknown date")
            ));
            if let Some(url) = &article.article_url {
                output.push_str(&format!(" | {}", url));
            }
            output.push_str("\n\n");

            if article.statements.is_empty() {
                output.push_str("  (no attributed statements)\n\n");
                continue;
            }
            for statement in &article.statements {
                output.push_str(&format!("{}:\n", statement.attributed));
                for line in wrap_text(&statement.text, 76).lines() {
                    output.push_str("  ");
                    output.push_str(line);
                    output.push('\n');
                }
                output.push('\n');
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}
