use serde::{Deserialize, Serialize};

use super::EntityMention;
use crate::error::AnnotationError;

/// A single annotated token, as produced by the annotation provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text, identical to the document text at `idx`
    pub text: String,
    /// Byte offset of the token in the document text
    pub idx: usize,
    /// Lemma (base form) of the token
    #[serde(default)]
    pub lemma: String,
    /// Part-of-speech tag, either a universal tag (`VERB`) or a Penn tag (`VBD`)
    #[serde(default)]
    pub pos: String,
}

impl Token {
    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.idx + self.text.len()
    }

    /// Whether the POS tag marks this token as a verb
    pub fn is_verb(&self) -> bool {
        self.pos.eq_ignore_ascii_case("VERB") || self.pos.starts_with("VB")
    }

    /// Whether the token carries a line break
    pub fn is_line_break(&self) -> bool {
        self.text.contains('\n')
    }
}

/// Token range of one sentence, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceBounds {
    pub start: usize,
    pub end: usize,
}

/// A document run through the annotation provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Plain-text body the offsets refer to
    pub text: String,
    /// All tokens in document order
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Sentence segmentation over `tokens`
    #[serde(default)]
    pub sentences: Vec<SentenceBounds>,
    /// Named-entity mentions over `text`
    #[serde(default)]
    pub entities: Vec<EntityMention>,
}

impl AnnotatedDocument {
    /// Check that every offset in the document can be trusted
    pub fn validate(&self) -> Result<(), AnnotationError> {
        let len = self.text.len();

        for (index, token) in self.tokens.iter().enumerate() {
            let (start, end) = (token.idx, token.end());
            match self.text.get(start..end) {
                None => {
                    return Err(AnnotationError::TokenOutOfBounds {
                        index,
                        start,
                        end,
                        len,
                    });
                }
                Some(slice) if slice != token.text => {
                    return Err(AnnotationError::TokenTextMismatch {
                        index,
                        start,
                        text: token.text.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        for (index, pair) in self.tokens.windows(2).enumerate() {
            if pair[1].idx < pair[0].end() {
                return Err(AnnotationError::TokensOutOfOrder { index: index + 1 });
            }
        }

        let mut previous_end = 0;
        for (index, bounds) in self.sentences.iter().enumerate() {
            if bounds.start > bounds.end || bounds.end > self.tokens.len() {
                return Err(AnnotationError::SentenceOutOfBounds {
                    index,
                    start: bounds.start,
                    end: bounds.end,
                    tokens: self.tokens.len(),
                });
            }
            if bounds.start < previous_end {
                return Err(AnnotationError::SentencesOutOfOrder { index });
            }
            previous_end = bounds.end;
        }

        for (index, entity) in self.entities.iter().enumerate() {
            if entity.start_char > entity.end_char
                || self.text.get(entity.start_char..entity.end_char).is_none()
            {
                return Err(AnnotationError::EntityOutOfBounds {
                    index,
                    start: entity.start_char,
                    end: entity.end_char,
                    len,
                });
            }
        }

        Ok(())
    }

    /// Iterate over the sentences in document order
    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> + '_ {
        (0..self.sentences.len()).filter_map(move |i| self.sentence(i))
    }

    /// Get a sentence by its index
    pub fn sentence(&self, index: usize) -> Option<Sentence<'_>> {
        self.sentences.get(index).map(|bounds| Sentence {
            doc: self,
            index,
            start: bounds.start,
            end: bounds.end.min(self.tokens.len()),
        })
    }

    /// Number of sentences
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Token range `[first, last)` overlapping the byte range `[start_char, end_char)`
    pub fn token_span(&self, start_char: usize, end_char: usize) -> Option<(usize, usize)> {
        let first = self.tokens.partition_point(|t| t.end() <= start_char);
        let last = self.tokens.partition_point(|t| t.idx < end_char);
        (first < last).then_some((first, last))
    }

    /// Document text between two byte offsets, empty when the range is invalid
    pub fn slice(&self, start_char: usize, end_char: usize) -> &str {
        self.text.get(start_char..end_char).unwrap_or("")
    }
}

/// Borrowed view of one sentence of an [`AnnotatedDocument`]
#[derive(Debug, Clone, Copy)]
pub struct Sentence<'a> {
    doc: &'a AnnotatedDocument,
    /// Position of the sentence in the document
    pub index: usize,
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
}

impl<'a> Sentence<'a> {
    pub fn doc(&self) -> &'a AnnotatedDocument {
        self.doc
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.doc.tokens.get(self.start..self.end).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of the first token
    pub fn start_char(&self) -> usize {
        self.tokens().first().map(|t| t.idx).unwrap_or(0)
    }

    /// Byte offset one past the last token
    pub fn end_char(&self) -> usize {
        self.tokens()
            .last()
            .map(|t| t.end())
            .unwrap_or_else(|| self.start_char())
    }

    /// Sentence text as it appears in the document
    pub fn text(&self) -> &'a str {
        self.doc.slice(self.start_char(), self.end_char())
    }

    /// Document text covered by the sentence-relative token range `[from, to)`
    pub fn text_of(&self, from: usize, to: usize) -> &'a str {
        let tokens = self.tokens();
        let to = to.min(tokens.len());
        if from >= to {
            return "";
        }
        self.doc.slice(tokens[from].idx, tokens[to - 1].end())
    }

    /// Entity mentions lying entirely inside the sentence
    pub fn entities(&self) -> impl Iterator<Item = &'a EntityMention> + 'a {
        let (start, end) = (self.start_char(), self.end_char());
        let empty = self.is_empty();
        self.doc
            .entities
            .iter()
            .filter(move |e| !empty && e.start_char >= start && e.end_char <= end)
    }
}
