use std::sync::OnceLock;

use regex::Regex;

use crate::models::AnnotatedDocument;

use super::locations;

/// Fallback when no dateline is found
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// `WASHINGTON -`, `Boston, MA --`, `WASHINGTON, D.C. –`, `WASHINGTON—`
fn dateline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<location>[A-Za-z]{2,},?\s?[A-Za-z.]+)\s?[-\u{2013}\u{2014}]+")
            .expect("dateline pattern is valid")
    })
}

/// Find the dateline location of a press release
///
/// A dateline is a LOCATION mention opening a sentence, followed by one or more dashes.
pub fn publish_location(doc: &AnnotatedDocument) -> Option<String> {
    doc.sentences().find_map(|sentence| {
        let opens_with_location = locations(&sentence)
            .iter()
            .any(|l| l.start == sentence.start);
        if !opens_with_location {
            return None;
        }
        dateline_pattern()
            .captures(sentence.text())
            .and_then(|c| c.name("location"))
            .map(|m| m.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::annotate;

    #[test]
    fn test_dateline_location() {
        let doc = annotate(
            "WASHINGTON - Senator Smith announced the bill. It passed.",
            &["Smith"],
            &["WASHINGTON"],
        );

        assert_eq!(publish_location(&doc).as_deref(), Some("WASHINGTON"));
    }

    #[test]
    fn test_dateline_with_typographic_dashes() {
        for text in [
            "WASHINGTON \u{2013} Smith spoke.",
            "WASHINGTON \u{2014} Smith spoke.",
            "WASHINGTON\u{2014}Smith spoke.",
        ] {
            let doc = annotate(text, &["Smith"], &["WASHINGTON"]);
            assert_eq!(publish_location(&doc).as_deref(), Some("WASHINGTON"), "{text}");
        }
    }

    #[test]
    fn test_location_must_open_the_sentence() {
        let doc = annotate(
            "Senator Smith flew to Boston - again. It was late.",
            &["Smith"],
            &["Boston"],
        );

        assert_eq!(publish_location(&doc), None);
    }

    #[test]
    fn test_location_needs_a_dash() {
        let doc = annotate("Boston is cold today.", &[], &["Boston"]);

        assert_eq!(publish_location(&doc), None);
    }
}
