use tracing::debug;

use crate::heuristics::Lexicon;
use crate::models::{AnnotatedDocument, RedactionSpan, Statement, StatementGroup};

/// Sort spans and fuse the ones that overlap or touch
pub fn merge_spans(spans: &[RedactionSpan]) -> Vec<RedactionSpan> {
    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut merged: Vec<RedactionSpan> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Cut redactions out of a sentence
///
/// Whitespace in front of every cut is dropped so no double spaces are left behind.
/// Spans are clamped to the text; a span that does not fall on character boundaries is ignored.
pub fn strip_spans(text: &str, spans: &[RedactionSpan]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in merge_spans(spans) {
        let start = span.start.clamp(cursor, text.len());
        let end = span.end.min(text.len());
        if start >= end {
            continue;
        }
        let (Some(piece), true) = (text.get(cursor..start), text.is_char_boundary(end)) else {
            debug!("Ignoring redaction {:?} off a character boundary", span);
            continue;
        };
        out.push_str(piece.trim_end());
        cursor = end;
    }

    out.push_str(text.get(cursor..).unwrap_or_default());
    out.trim().to_string()
}

/// Execute Stage 3: rebuild the clean statement text of a group
pub fn reconstruct(doc: &AnnotatedDocument, group: &StatementGroup, lexicon: &Lexicon) -> Statement {
    let pieces: Vec<String> = group
        .members
        .iter()
        .filter_map(|member| {
            let sentence = doc.sentence(member.sentence)?;
            let cleaned = strip_spans(sentence.text(), &member.redactions);
            (!cleaned.is_empty()).then_some(cleaned)
        })
        .collect();

    let joined = pieces.join(" ");
    let text = joined
        .trim()
        .trim_matches(|c| lexicon.is_quote_char(c))
        .trim()
        .to_string();

    Statement {
        attributed: group.speaker.clone(),
        text,
    }
}
