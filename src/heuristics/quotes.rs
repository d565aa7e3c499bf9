use crate::models::{Marker, MarkerKind, QuoteMarkers, Sentence};

use super::Lexicon;

/// Tokens at each edge of a sentence that count as its start or end
const EDGE_TOKENS: usize = 2;

/// Locate start, mid and end quotation marks in a sentence
pub fn detect_quotes(sentence: &Sentence<'_>, lexicon: &Lexicon) -> QuoteMarkers {
    QuoteMarkers {
        start: start_quotes(sentence, lexicon).collect(),
        mid: mid_quotes(sentence, lexicon).collect(),
        end: end_quotes(sentence, lexicon).collect(),
    }
}

/// Quotation marks inside the first two tokens
pub fn start_quotes<'a>(
    sentence: &Sentence<'a>,
    lexicon: &'a Lexicon,
) -> impl Iterator<Item = Marker> + 'a {
    let count = sentence.len().min(EDGE_TOKENS);
    edge_quotes(*sentence, 0..count, MarkerKind::StartQuote, lexicon)
}

/// Quotation marks inside the last two tokens
pub fn end_quotes<'a>(
    sentence: &Sentence<'a>,
    lexicon: &'a Lexicon,
) -> impl Iterator<Item = Marker> + 'a {
    let len = sentence.len();
    edge_quotes(
        *sentence,
        len.saturating_sub(EDGE_TOKENS)..len,
        MarkerKind::EndQuote,
        lexicon,
    )
}

/// Every maximal run of quotation characters inside the given sentence-relative tokens
fn edge_quotes<'a>(
    sentence: Sentence<'a>,
    range: std::ops::Range<usize>,
    kind: MarkerKind,
    lexicon: &'a Lexicon,
) -> impl Iterator<Item = Marker> + 'a {
    let tokens = sentence.tokens();
    let offset = sentence.start;

    range.flat_map(move |i| {
        let token = &tokens[i];
        quote_runs(&token.text, lexicon)
            .into_iter()
            .map(move |(from, to)| Marker {
                kind,
                start: offset + i,
                end: offset + i + 1,
                start_char: token.idx + from,
                end_char: token.idx + to,
                text: token.text[from..to].to_string(),
            })
    })
}

/// Byte ranges of consecutive quotation characters in `text`
fn quote_runs(text: &str, lexicon: &Lexicon) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for (i, c) in text.char_indices() {
        if !lexicon.is_quote_char(c) {
            continue;
        }
        let end = i + c.len_utf8();
        match runs.last_mut() {
            Some(run) if run.1 == i => run.1 = end,
            _ => runs.push((i, end)),
        }
    }
    runs
}

/// Quotation marks strictly between the first two and the last two tokens
///
/// A mark may be preceded by a comma, a colon or whitespace; the marker covers that
/// punctuation too so the attribution clause can be cut together with it.
pub fn mid_quotes<'a>(
    sentence: &Sentence<'a>,
    lexicon: &'a Lexicon,
) -> impl Iterator<Item = Marker> + 'a {
    let len = sentence.len();
    let (first, last) = (EDGE_TOKENS, len.saturating_sub(EDGE_TOKENS));
    let doc = sentence.doc();
    let tokens = sentence.tokens();
    let offset = sentence.start;

    let (base, haystack) = if first < last {
        (tokens[first].idx, sentence.text_of(first, last))
    } else {
        (0, "")
    };

    lexicon
        .mid_quote_pattern()
        .find_iter(haystack)
        .filter_map(move |m| {
            let matched = m.as_str().trim_start();
            let start_char = base + m.end() - matched.len();
            let end_char = base + m.end();
            let (start, end) = doc.token_span(start_char, end_char)?;
            // Never let a marker leak into the edge tokens
            let start = start.max(offset + first);
            let end = end.min(offset + last);
            (start < end).then(|| Marker {
                kind: MarkerKind::MidQuote,
                start,
                end,
                start_char,
                end_char,
                text: matched.to_string(),
            })
        })
}

/// Reporting-verb tokens: lemma in the vocabulary and tagged as a verb
pub fn attribution_cues<'a>(
    sentence: &Sentence<'a>,
    lexicon: &'a Lexicon,
) -> impl Iterator<Item = Marker> + 'a {
    let offset = sentence.start;
    sentence
        .tokens()
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_verb() && lexicon.is_reporting_verb(&token.lemma))
        .map(move |(i, token)| Marker {
            kind: MarkerKind::Cue,
            start: offset + i,
            end: offset + i + 1,
            start_char: token.idx,
            end_char: token.end(),
            text: token.text.clone(),
        })
}
