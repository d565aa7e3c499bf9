use std::cmp::Ordering;

use serde::Serialize;

/// What a [`Marker`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// PERSON entity mention
    Person,
    /// LOCATION entity mention
    Location,
    /// Reporting-verb token
    Cue,
    /// Quotation mark within the first two tokens
    StartQuote,
    /// Quotation mark strictly inside the sentence
    MidQuote,
    /// Quotation mark within the last two tokens
    EndQuote,
}

/// A position-comparable span inside a sentence
///
/// Markers from different detectors share one representation so they can be merged
/// into a single timeline ordered by token position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// First document token index
    pub start: usize,
    /// One past the last document token index
    pub end: usize,
    /// Byte offset of the first character
    pub start_char: usize,
    /// Byte offset one past the last character
    pub end_char: usize,
    /// Surface text
    pub text: String,
}

impl Marker {
    /// Number of tokens strictly between two markers, `None` when they overlap
    pub fn token_gap(&self, other: &Marker) -> Option<usize> {
        if self.start >= other.end {
            Some(self.start - other.end)
        } else if other.start >= self.end {
            Some(other.start - self.end)
        } else {
            None
        }
    }

    /// Whether the gap to `other` is at most `max` tokens
    pub fn within(&self, other: &Marker, max: usize) -> bool {
        self.token_gap(other).is_some_and(|gap| gap <= max)
    }
}

impl Ord for Marker {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end, self.start_char, self.end_char, self.kind).cmp(&(
            other.start,
            other.end,
            other.start_char,
            other.end_char,
            other.kind,
        ))
    }
}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Quotation marks of one sentence, by position class
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuoteMarkers {
    pub start: Vec<Marker>,
    pub mid: Vec<Marker>,
    pub end: Vec<Marker>,
}

/// Everything the detectors found in one sentence
#[derive(Debug, Clone, Default, Serialize)]
pub struct SentenceMarkers {
    pub quotes: QuoteMarkers,
    pub cues: Vec<Marker>,
    pub persons: Vec<Marker>,
}

impl SentenceMarkers {
    pub fn has_start_quote(&self) -> bool {
        !self.quotes.start.is_empty()
    }

    pub fn has_end_quote(&self) -> bool {
        !self.quotes.end.is_empty()
    }

    /// Persons, cues and mid-quotes merged into one ordered timeline
    pub fn timeline(&self) -> Vec<&Marker> {
        let mut timeline: Vec<&Marker> = self
            .persons
            .iter()
            .chain(&self.cues)
            .chain(&self.quotes.mid)
            .collect();
        timeline.sort();
        timeline
    }
}

/// Byte range inside a sentence that is removed during reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RedactionSpan {
    /// Offset from the sentence start
    pub start: usize,
    /// Offset from the sentence start, exclusive
    pub end: usize,
}

impl RedactionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Sort spans by start offset and drop exact duplicates
    pub fn normalize(spans: &mut Vec<RedactionSpan>) {
        spans.sort();
        spans.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(kind: MarkerKind, start: usize, end: usize) -> Marker {
        Marker {
            kind,
            start,
            end,
            start_char: start * 4,
            end_char: end * 4,
            text: String::new(),
        }
    }

    #[test]
    fn test_token_gap() {
        let quote = marker(MarkerKind::MidQuote, 2, 4);
        let cue = marker(MarkerKind::Cue, 4, 5);
        let person = marker(MarkerKind::Person, 7, 9);

        assert_eq!(quote.token_gap(&cue), Some(0));
        assert_eq!(cue.token_gap(&quote), Some(0));
        assert_eq!(person.token_gap(&quote), Some(3));
        assert!(quote.within(&cue, 1));
        assert!(!person.within(&quote, 2));

        let overlapping = marker(MarkerKind::Person, 3, 5);
        assert_eq!(overlapping.token_gap(&quote), None);
        assert!(!overlapping.within(&quote, 10));
    }

    #[test]
    fn test_timeline_is_sorted_by_position() {
        let markers = SentenceMarkers {
            quotes: QuoteMarkers {
                start: vec![],
                mid: vec![marker(MarkerKind::MidQuote, 2, 4)],
                end: vec![],
            },
            cues: vec![marker(MarkerKind::Cue, 1, 2)],
            persons: vec![marker(MarkerKind::Person, 0, 1), marker(MarkerKind::Person, 8, 9)],
        };

        let kinds: Vec<MarkerKind> = markers.timeline().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Person,
                MarkerKind::Cue,
                MarkerKind::MidQuote,
                MarkerKind::Person
            ]
        );
    }

    #[test]
    fn test_normalize_collapses_duplicates() {
        let mut spans = vec![
            RedactionSpan::new(20, 21),
            RedactionSpan::new(0, 1),
            RedactionSpan::new(20, 21),
        ];
        RedactionSpan::normalize(&mut spans);

        assert_eq!(spans, vec![RedactionSpan::new(0, 1), RedactionSpan::new(20, 21)]);
    }
}
