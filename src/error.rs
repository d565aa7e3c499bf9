//! Error types for annotation input and engine configuration.

use thiserror::Error;

/// Structural problems in an annotated document.
///
/// The engine itself never fails on odd-looking sentences; these errors are raised when a
/// document is loaded and its offsets cannot be trusted at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// A token points outside the document text or splits a UTF-8 character.
    #[error("token {index} spans {start}..{end}, outside the document text ({len} bytes)")]
    TokenOutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A token's text does not match the document text at its offset.
    #[error("token {index} text {text:?} does not match the document at offset {start}")]
    TokenTextMismatch {
        index: usize,
        start: usize,
        text: String,
    },

    /// Tokens overlap or are not sorted by offset.
    #[error("token {index} starts before the end of the previous token")]
    TokensOutOfOrder { index: usize },

    /// A sentence refers to tokens that do not exist.
    #[error("sentence {index} covers tokens {start}..{end}, but the document has {tokens} tokens")]
    SentenceOutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        tokens: usize,
    },

    /// Sentences overlap or are not in document order.
    #[error("sentence {index} starts before the end of the previous sentence")]
    SentencesOutOfOrder { index: usize },

    /// An entity mention points outside the document text.
    #[error("entity {index} spans {start}..{end}, outside the document text ({len} bytes)")]
    EntityOutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Invalid attribution configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("at least one quotation character must be configured")]
    NoQuoteChars,

    #[error("the reporting-verb vocabulary is empty")]
    EmptyVocabulary,

    #[error("failed to build quote pattern: {0}")]
    Pattern(#[from] regex::Error),
}
