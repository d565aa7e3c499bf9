use serde::{Deserialize, Serialize};

use super::{AnnotatedDocument, Statement};

/// An extracted article with its annotation attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    /// Publication time as found on the page
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Dateline location when the extractor found one
    #[serde(default)]
    pub publish_location: Option<String>,
    /// Article body run through the annotation provider
    pub annotation: AnnotatedDocument,
}

/// Output record for one article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedArticle {
    pub article_title: String,
    pub article_timestamp: Option<String>,
    pub article_url: Option<String>,
    pub publish_location: String,
    pub article_text: String,
    pub statements: Vec<Statement>,
}
