pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use error::{AnnotationError, ConfigError};
pub use heuristics::{AttributionConfig, EnclosedQuotePolicy, Lexicon};
pub use io::{
    parse_articles_file, parse_document_file, write_transformed, HumanReport,
};
pub use models::{AnnotatedDocument, Article, Statement, StatementGroup, TransformedArticle};
pub use pipeline::{extract_statements, transform_article};
pub use stages::{analyze_sentences, group_statements, reconstruct, SentenceAnalysis};
