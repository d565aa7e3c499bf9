use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::models::{
    AttributionDecision, Marker, MarkerKind, RedactionSpan, Sentence, SentenceMarkers,
};

use super::Lexicon;

/// Surface patterns of an attribution clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionOrder {
    /// `"...," said Smith.`
    EndTagFirst,
    /// `"...," Smith said.`
    EndPersonFirst,
    /// `Smith said, "..."`
    StartAttributed,
}

/// One person / cue / mid-quote triple that fits an attribution pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionMatch<'m> {
    pub order: AttributionOrder,
    pub person: &'m Marker,
    pub cue: &'m Marker,
    pub quote: &'m Marker,
}

/// Scan consecutive timeline triples for attribution patterns
pub fn find_attributions<'m>(
    sentence: &Sentence<'_>,
    markers: &'m SentenceMarkers,
    lexicon: &Lexicon,
) -> Vec<AttributionMatch<'m>> {
    if markers.quotes.mid.is_empty() || markers.persons.is_empty() || markers.cues.is_empty() {
        return Vec::new();
    }

    let config = lexicon.config();
    let timeline = markers.timeline();
    let mut found = Vec::new();

    for window in timeline.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let matched = match (a.kind, b.kind, c.kind) {
            (MarkerKind::MidQuote, MarkerKind::Cue, MarkerKind::Person)
                if b.within(a, config.tag_first_max_gap) =>
            {
                Some(AttributionMatch {
                    order: AttributionOrder::EndTagFirst,
                    person: c,
                    cue: b,
                    quote: a,
                })
            }
            (MarkerKind::MidQuote, MarkerKind::Person, MarkerKind::Cue)
                if b.within(a, config.person_first_max_gap)
                    || tokens_after(sentence, c) <= config.person_first_cue_tail_gap =>
            {
                Some(AttributionMatch {
                    order: AttributionOrder::EndPersonFirst,
                    person: b,
                    cue: c,
                    quote: a,
                })
            }
            (MarkerKind::Person, MarkerKind::Cue, MarkerKind::MidQuote)
                if b.within(c, config.start_attributed_max_gap) =>
            {
                Some(AttributionMatch {
                    order: AttributionOrder::StartAttributed,
                    person: a,
                    cue: b,
                    quote: c,
                })
            }
            _ => None,
        };
        found.extend(matched);
    }

    found
}

/// Tokens strictly between a marker and the final token of the sentence
fn tokens_after(sentence: &Sentence<'_>, marker: &Marker) -> usize {
    sentence.end.saturating_sub(marker.end + 1)
}

/// The part of the sentence an attribution match makes redundant
///
/// Start-attributed clauses are cut from the sentence start through the mid-quote.
/// End-attributed clauses are cut from the mid-quote to the sentence end, keeping a
/// final period so the statement stays punctuated.
pub fn redaction_for(sentence: &Sentence<'_>, found: &AttributionMatch<'_>) -> Option<RedactionSpan> {
    let origin = sentence.start_char();
    match found.order {
        AttributionOrder::StartAttributed => {
            let end = found.quote.end_char.saturating_sub(origin);
            (end > 0).then(|| RedactionSpan::new(0, end))
        }
        AttributionOrder::EndTagFirst | AttributionOrder::EndPersonFirst => {
            let body = sentence.text().trim_end();
            let end = body.strip_suffix('.').unwrap_or(body).len();
            let start = found.quote.start_char.saturating_sub(origin);
            (start < end).then(|| RedactionSpan::new(start, end))
        }
    }
}

/// Decide whether a sentence is attributed to exactly one person
pub fn resolve(
    sentence: &Sentence<'_>,
    markers: &SentenceMarkers,
    lexicon: &Lexicon,
) -> AttributionDecision {
    let found = find_attributions(sentence, markers, lexicon);
    let mut speakers: BTreeSet<&str> = found.iter().map(|m| m.person.text.as_str()).collect();

    if speakers.len() > 1 {
        debug!(
            "Sentence {}: ambiguous attribution to {:?}, skipping",
            sentence.index, speakers
        );
        return AttributionDecision::NotAttributed;
    }

    let Some(speaker) = speakers.pop_first() else {
        return AttributionDecision::NotAttributed;
    };

    let mut redactions: Vec<RedactionSpan> = found
        .iter()
        .filter_map(|m| redaction_for(sentence, m))
        .collect();
    RedactionSpan::normalize(&mut redactions);

    AttributionDecision::Attributed {
        speaker: speaker.to_string(),
        redactions,
    }
}
