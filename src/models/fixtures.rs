//! Test-only annotator standing in for the real annotation provider.
//!
//! Splits words and single punctuation characters, keeps runs of line breaks as one token,
//! lemmatizes a handful of verb forms and ends sentences after `.`, `!` or `?` (plus any
//! closing quote glued to them and any following line break).

use super::{AnnotatedDocument, EntityLabel, EntityMention, SentenceBounds, Token};

const VERB_FORMS: &[(&str, &str)] = &[
    ("say", "say"),
    ("says", "say"),
    ("said", "say"),
    ("add", "add"),
    ("added", "add"),
    ("explained", "explain"),
    ("stated", "state"),
    ("announced", "announce"),
    ("told", "tell"),
    ("noted", "note"),
    ("asked", "ask"),
    ("replied", "reply"),
    ("requested", "request"),
    ("insisted", "insist"),
    ("agreed", "agree"),
    ("filed", "file"),
    ("called", "call"),
];

const QUOTES: &[&str] = &["\"", "\u{201c}", "\u{201d}"];

/// Annotate `text`, tagging every occurrence of the given names
pub(crate) fn annotate(text: &str, persons: &[&str], locations: &[&str]) -> AnnotatedDocument {
    let tokens = tokenize(text);
    let sentences = split_sentences(&tokens);

    let mut entities: Vec<EntityMention> = mentions(text, persons, EntityLabel::Person)
        .chain(mentions(text, locations, EntityLabel::Location))
        .collect();
    entities.sort_by_key(|e| (e.start_char, e.end_char));

    AnnotatedDocument {
        text: text.to_string(),
        tokens,
        sentences,
        entities,
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            let mut end = i + 1;
            while let Some(&(j, '\n')) = chars.peek() {
                end = j + 1;
                chars.next();
            }
            tokens.push(make_token(text, i, end));
        } else if c.is_whitespace() {
            continue;
        } else if c.is_alphanumeric() {
            let mut end = i + c.len_utf8();
            while let Some(&(j, d)) = chars.peek() {
                let apostrophe_in_word = d == '\''
                    && text[j + 1..].chars().next().is_some_and(char::is_alphanumeric);
                if d.is_alphanumeric() || apostrophe_in_word {
                    end = j + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(make_token(text, i, end));
        } else {
            tokens.push(make_token(text, i, i + c.len_utf8()));
        }
    }

    tokens
}

fn make_token(text: &str, start: usize, end: usize) -> Token {
    let surface = &text[start..end];
    let lower = surface.to_lowercase();

    let (lemma, pos) = match VERB_FORMS.iter().find(|(form, _)| *form == lower) {
        Some((_, lemma)) => (lemma.to_string(), "VERB"),
        None if surface.contains('\n') => (lower, "SPACE"),
        None if !surface.chars().any(char::is_alphanumeric) => (lower, "PUNCT"),
        None if surface.starts_with(char::is_uppercase) => (lower, "PROPN"),
        None => (lower, "NOUN"),
    };

    Token {
        text: surface.to_string(),
        idx: start,
        lemma,
        pos: pos.to_string(),
    }
}

fn split_sentences(tokens: &[Token]) -> Vec<SentenceBounds> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        let mut end = i + 1;
        let boundary = if tokens[i].is_line_break() {
            true
        } else if matches!(tokens[i].text.as_str(), "." | "!" | "?") {
            while end < tokens.len()
                && QUOTES.contains(&tokens[end].text.as_str())
                && tokens[end].idx == tokens[end - 1].end()
            {
                end += 1;
            }
            true
        } else {
            false
        };

        if boundary {
            while end < tokens.len() && tokens[end].is_line_break() {
                end += 1;
            }
            sentences.push(SentenceBounds { start, end });
            start = end;
        }
        i = end;
    }

    if start < tokens.len() {
        sentences.push(SentenceBounds {
            start,
            end: tokens.len(),
        });
    }

    sentences
}

fn mentions<'a>(
    text: &'a str,
    names: &'a [&'a str],
    label: EntityLabel,
) -> impl Iterator<Item = EntityMention> + 'a {
    names.iter().flat_map(move |name| {
        text.match_indices(*name).map(move |(start, found)| EntityMention {
            label,
            start_char: start,
            end_char: start + found.len(),
            text: found.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_quote_and_line_break_stay_with_sentence() {
        let doc = annotate("He said, \"Go.\"\n\"Now.\"", &[], &[]);

        let texts: Vec<&str> = doc.sentences().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["He said, \"Go.\"\n", "\"Now.\""]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_lemmas_and_tags() {
        let doc = annotate("Smith said.", &["Smith"], &[]);

        assert_eq!(doc.tokens[1].lemma, "say");
        assert_eq!(doc.tokens[1].pos, "VERB");
        assert_eq!(doc.tokens[0].pos, "PROPN");
        assert_eq!(doc.entities.len(), 1);
    }
}
