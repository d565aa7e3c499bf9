//! End-to-end runs of the engine over documents and articles.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::{debug, info};

use crate::heuristics::{Lexicon, UNKNOWN_LOCATION, publish_location};
use crate::models::{AnnotatedDocument, Article, Statement, TransformedArticle};
use crate::stages::{analyze_sentences, group_statements, reconstruct};

/// Output layout of normalized timestamps
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output layout of timestamps that carry a UTC offset
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Extract every attributed statement of a document, in document order
pub fn extract_statements(doc: &AnnotatedDocument, lexicon: &Lexicon) -> Vec<Statement> {
    let analyses = analyze_sentences(doc, lexicon);
    let groups = group_statements(doc, &analyses, lexicon.config().enclosed_quote_policy);
    debug!(
        "{} sentences, {} statement groups",
        analyses.len(),
        groups.len()
    );

    groups
        .iter()
        .map(|group| reconstruct(doc, group, lexicon))
        .collect()
}

/// Build the output record of one article
///
/// The publish location comes from the article itself, then from a dateline in the body,
/// and falls back to [`UNKNOWN_LOCATION`].
pub fn transform_article(article: &Article, lexicon: &Lexicon) -> TransformedArticle {
    let doc = &article.annotation;
    let statements = extract_statements(doc, lexicon);

    let location = article
        .publish_location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(|| publish_location(doc))
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    info!(
        "Article {:?}: {} statements, location {:?}",
        article.title,
        statements.len(),
        location
    );

    TransformedArticle {
        article_title: article.title.clone(),
        article_timestamp: article.publish_time.as_deref().map(normalize_timestamp),
        article_url: article.source_url.clone(),
        publish_location: location,
        article_text: doc.text.clone(),
        statements,
    }
}

fn numeric_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?P<m>\d{2})[/.\-](?P<d>\d{2})[/.\-](?P<y>\d{4}|\d{2})\b")
            .expect("numeric date pattern is valid")
    })
}

fn named_month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?P<month>[A-Za-z]{3,})\.?\s+(?P<d>\d{1,2})(?:,\s*|\s+)(?P<y>\d{4})")
            .expect("named month pattern is valid")
    })
}

/// Normalize a publication time to `YYYY-MM-DD HH:MM:SS`
///
/// RFC 3339 input keeps its offset (`YYYY-MM-DD HH:MM:SS+HH:MM`). Plain ISO timestamps are
/// accepted too, then a `mm/dd/yyyy`, `mm/dd/yy` or `Month dd, yyyy` date is looked for
/// anywhere in the text. Anything else is returned unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    let text = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.format(OFFSET_TIMESTAMP_FORMAT).to_string();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return parsed.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return midnight(date);
    }

    let numeric = numeric_date_pattern().captures_iter(text).find_map(|c| {
        let month = c["m"].parse().ok()?;
        let day = c["d"].parse().ok()?;
        let year: i32 = c["y"].parse().ok()?;
        // Two-digit years pivot at 69, like strptime's %y
        let year = match (c["y"].len(), year) {
            (2, 69..) => 1900 + year,
            (2, _) => 2000 + year,
            _ => year,
        };
        NaiveDate::from_ymd_opt(year, month, day)
    });
    if let Some(date) = numeric {
        return midnight(date);
    }

    let named = named_month_pattern().captures_iter(text).find_map(|c| {
        let candidate = format!("{} {} {}", &c["month"], &c["d"], &c["y"]);
        NaiveDate::parse_from_str(&candidate, "%B %d %Y").ok()
    });
    if let Some(date) = named {
        return midnight(date);
    }

    debug!("Unrecognized timestamp {:?}, keeping it as is", raw);
    raw.to_string()
}

fn midnight(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{AttributionConfig, detect_markers};
    use crate::models::fixtures::annotate;

    fn lexicon() -> Lexicon {
        Lexicon::new(AttributionConfig::default()).unwrap()
    }

    fn statements(text: &str, persons: &[&str]) -> Vec<Statement> {
        extract_statements(&annotate(text, persons, &[]), &lexicon())
    }

    fn statement(speaker: &str, text: &str) -> Statement {
        Statement {
            attributed: speaker.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_start_attributed_sentence() {
        assert_eq!(
            statements("Smith said, \"This plan will work.\"", &["Smith"]),
            vec![statement("Smith", "This plan will work.")]
        );
    }

    #[test]
    fn test_end_attributed_sentence() {
        assert_eq!(
            statements("\"This plan will work,\" Smith said.", &["Smith"]),
            vec![statement("Smith", "This plan will work.")]
        );
    }

    #[test]
    fn test_quote_spanning_two_sentences() {
        assert_eq!(
            statements(
                "Smith said, \"This plan will work. It will help everyone.\"",
                &["Smith"]
            ),
            vec![statement("Smith", "This plan will work. It will help everyone.")]
        );
    }

    #[test]
    fn test_two_speakers_in_one_sentence_yield_nothing() {
        assert!(statements("Smith said, \"We agree,\" Jones added.", &["Smith", "Jones"]).is_empty());
    }

    #[test]
    fn test_split_quote_keeps_an_empty_record() {
        // Both attribution patterns match and their cuts cover the whole sentence
        assert_eq!(
            statements(
                "\"We will win,\" Smith said, \"and we will win soon.\"",
                &["Smith"]
            ),
            vec![statement("Smith", "")]
        );
    }

    #[test]
    fn test_line_break_ends_the_statement() {
        assert_eq!(
            statements(
                "Smith said, \"This plan will work.\"\n\"It will help everyone.\"",
                &["Smith"]
            ),
            vec![statement("Smith", "This plan will work.")]
        );
    }

    #[test]
    fn test_several_speakers_in_order() {
        let text = "WASHINGTON - The council met on Monday. \"We will rebuild the bridge,\" \
                    said Smith. \"It will take a year.\"\nJones explained: \"Funding is ready.\"";
        assert_eq!(
            statements(text, &["Smith", "Jones"]),
            vec![
                statement("Smith", "We will rebuild the bridge. It will take a year."),
                statement("Jones", "Funding is ready."),
            ]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = annotate(
            "\"We will rebuild the bridge. It will take a year,\" Smith said.\nThe vote is Friday.",
            &["Smith"],
            &[],
        );
        let lexicon = lexicon();

        let first = extract_statements(&doc, &lexicon);
        let second = extract_statements(&doc, &lexicon);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![statement("Smith", "We will rebuild the bridge. It will take a year.")]
        );
    }

    #[test]
    fn test_attribution_clause_never_survives() {
        let lexicon = lexicon();
        let texts = [
            "Smith said, \"This plan will work.\"",
            "\"This plan will work,\" Smith said.",
            "\"This plan will work,\" said Smith.",
            "Smith explained: \"This plan will work.\"",
        ];

        for text in texts {
            let doc = annotate(text, &["Smith"], &[]);
            let sentence = doc.sentence(0).unwrap();
            let markers = detect_markers(&sentence, &lexicon);
            let found = extract_statements(&doc, &lexicon);

            assert_eq!(found.len(), 1, "{text}");
            for cue in &markers.cues {
                assert!(!found[0].text.contains(&cue.text), "{text}");
            }
            assert!(!found[0].text.contains("Smith"), "{text}");
        }
    }

    #[test]
    fn test_transform_article() {
        let text = "WASHINGTON - Senator Smith announced the bill. Smith said, \"It will pass.\"";
        let article = Article {
            title: "Bill announced".to_string(),
            publish_time: Some("03/14/2024".to_string()),
            source_url: Some("https://example.gov/news/1".to_string()),
            publish_location: None,
            annotation: annotate(text, &["Smith"], &["WASHINGTON"]),
        };

        let transformed = transform_article(&article, &lexicon());
        assert_eq!(transformed.article_title, "Bill announced");
        assert_eq!(
            transformed.article_timestamp.as_deref(),
            Some("2024-03-14 00:00:00")
        );
        assert_eq!(transformed.publish_location, "WASHINGTON");
        assert_eq!(transformed.article_text, text);
        assert_eq!(transformed.statements, vec![statement("Smith", "It will pass.")]);

        let article = Article {
            publish_location: Some("Boston, MA".to_string()),
            ..article
        };
        assert_eq!(transform_article(&article, &lexicon()).publish_location, "Boston, MA");

        let article = Article {
            publish_location: None,
            annotation: annotate("Smith said, \"It will pass.\"", &["Smith"], &[]),
            ..article
        };
        assert_eq!(
            transform_article(&article, &lexicon()).publish_location,
            UNKNOWN_LOCATION
        );
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("2024-03-14T09:30:00Z"),
            "2024-03-14 09:30:00+00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-03-14T09:30:00-05:00"),
            "2024-03-14 09:30:00-05:00"
        );
        assert_eq!(normalize_timestamp("2024-03-14T09:30:00"), "2024-03-14 09:30:00");
        assert_eq!(normalize_timestamp("2024-03-14"), "2024-03-14 00:00:00");
        assert_eq!(normalize_timestamp("Posted 03.14.2024"), "2024-03-14 00:00:00");
        assert_eq!(normalize_timestamp("03-14-24"), "2024-03-14 00:00:00");
        assert_eq!(normalize_timestamp("March 14, 2024"), "2024-03-14 00:00:00");
        assert_eq!(normalize_timestamp("Mar 4 2024"), "2024-03-04 00:00:00");
        assert_eq!(normalize_timestamp("last Tuesday"), "last Tuesday");
    }
}
