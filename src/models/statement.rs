use serde::{Deserialize, Serialize};

use super::RedactionSpan;

/// Resolver verdict for a single sentence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributionDecision {
    #[default]
    NotAttributed,
    /// The sentence names exactly one speaker
    Attributed {
        /// Surface name of the speaker
        speaker: String,
        /// Attribution clauses to strip from the sentence
        redactions: Vec<RedactionSpan>,
    },
}

impl AttributionDecision {
    pub fn speaker(&self) -> Option<&str> {
        match self {
            Self::Attributed { speaker, .. } => Some(speaker),
            Self::NotAttributed => None,
        }
    }

    pub fn redactions(&self) -> &[RedactionSpan] {
        match self {
            Self::Attributed { redactions, .. } => redactions,
            Self::NotAttributed => &[],
        }
    }

    pub fn is_attributed(&self) -> bool {
        matches!(self, Self::Attributed { .. })
    }
}

/// One sentence of a statement group and what to cut out of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    /// Sentence index in the document
    pub sentence: usize,
    /// Sorted, de-duplicated redactions local to the sentence
    pub redactions: Vec<RedactionSpan>,
}

/// A finalized run of contiguous sentences spoken by one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementGroup {
    /// Surface name of the speaker, fixed for the whole group
    pub speaker: String,
    /// Member sentences in document order, never empty
    pub members: Vec<GroupMember>,
}

impl StatementGroup {
    /// Sentence indices covered by the group
    pub fn sentence_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|m| m.sentence)
    }
}

/// Extracted statement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Speaker surface text
    pub attributed: String,
    /// Reconstructed statement text
    pub text: String,
}
