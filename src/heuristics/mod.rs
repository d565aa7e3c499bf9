pub mod attribution;
pub mod entities;
pub mod location;
pub mod quotes;

pub use attribution::*;
pub use entities::*;
pub use location::*;
pub use quotes::*;

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Sentence, SentenceMarkers};

/// What to do with a sentence that carries both an opening and a closing quotation mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EnclosedQuotePolicy {
    /// Treat it like any other quoted sentence; only a bare closing quote ends a group
    #[default]
    Continue,
    /// Close the group right after the sentence
    CloseImmediately,
    /// Close the group only when the sentence is attributed itself
    CloseWhenAttributed,
}

/// Tunables of the attribution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// Lemmas of reporting verbs, matched case-insensitively
    pub reporting_verbs: Vec<String>,
    /// Characters treated as quotation marks
    pub quote_chars: Vec<char>,
    /// `"quote," said Smith`: max tokens between the mid-quote and the cue
    pub tag_first_max_gap: usize,
    /// `"quote," Smith said`: max tokens between the mid-quote and the person
    pub person_first_max_gap: usize,
    /// `"quote," Smith said`: max tokens between the cue and the final token
    pub person_first_cue_tail_gap: usize,
    /// `Smith said, "quote"`: max tokens between the cue and the mid-quote
    pub start_attributed_max_gap: usize,
    pub enclosed_quote_policy: EnclosedQuotePolicy,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            reporting_verbs: [
                "acknowledge", "add", "affirm", "announce", "articulate", "ask", "assert",
                "clarify", "comment", "communicate", "convey", "declare", "elaborate",
                "enunciate", "explain", "expound", "express", "greet", "highlight", "imply",
                "indicate", "inquire", "insist", "invite", "mention", "observe",
                "outline", "predict", "propose", "query", "quiz", "quote", "read", "reaffirm",
                "recite", "relate", "remark", "repeat", "reply", "report", "request",
                "respond", "say", "share", "speculate", "state", "suggest", "voice",
            ]
            .iter()
            .map(|v| v.to_string())
            .collect(),
            quote_chars: vec!['"', '\u{201c}', '\u{201d}'],
            tag_first_max_gap: 1,
            person_first_max_gap: 1,
            person_first_cue_tail_gap: 2,
            start_attributed_max_gap: 1,
            enclosed_quote_policy: EnclosedQuotePolicy::Continue,
        }
    }
}

/// Lookup tables compiled once from an [`AttributionConfig`] and shared by every detector
#[derive(Debug, Clone)]
pub struct Lexicon {
    config: AttributionConfig,
    verbs: HashSet<String>,
    mid_quote: Regex,
}

impl Lexicon {
    pub fn new(config: AttributionConfig) -> Result<Self, ConfigError> {
        if config.quote_chars.is_empty() {
            return Err(ConfigError::NoQuoteChars);
        }

        let verbs: HashSet<String> = config
            .reporting_verbs
            .iter()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        if verbs.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        // Optional comma, colon or whitespace in front of one or more quotation marks
        let quote_class: String = config
            .quote_chars
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        let mid_quote = Regex::new(&format!(r"[,:\s]*[{quote_class}]+"))?;

        Ok(Self {
            config,
            verbs,
            mid_quote,
        })
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    pub fn is_reporting_verb(&self, lemma: &str) -> bool {
        self.verbs.contains(&lemma.to_lowercase())
    }

    pub fn is_quote_char(&self, c: char) -> bool {
        self.config.quote_chars.contains(&c)
    }

    pub fn mid_quote_pattern(&self) -> &Regex {
        &self.mid_quote
    }
}

/// Run every detector over one sentence
pub fn detect_markers(sentence: &Sentence<'_>, lexicon: &Lexicon) -> SentenceMarkers {
    SentenceMarkers {
        quotes: detect_quotes(sentence, lexicon),
        cues: attribution_cues(sentence, lexicon).collect(),
        persons: persons(sentence),
    }
}
