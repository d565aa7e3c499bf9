use crate::models::{EntityLabel, Marker, MarkerKind, Sentence};

/// PERSON mentions of a sentence, ordered by position
pub fn persons(sentence: &Sentence<'_>) -> Vec<Marker> {
    project(sentence, EntityLabel::Person, MarkerKind::Person)
}

/// LOCATION mentions of a sentence, ordered by position
pub fn locations(sentence: &Sentence<'_>) -> Vec<Marker> {
    project(sentence, EntityLabel::Location, MarkerKind::Location)
}

fn project(sentence: &Sentence<'_>, label: EntityLabel, kind: MarkerKind) -> Vec<Marker> {
    let doc = sentence.doc();
    let mut markers: Vec<Marker> = sentence
        .entities()
        .filter(|e| e.label == label)
        .filter_map(|e| {
            let (start, end) = doc.token_span(e.start_char, e.end_char)?;
            Some(Marker {
                kind,
                start,
                end,
                start_char: e.start_char,
                end_char: e.end_char,
                text: e.text.clone(),
            })
        })
        .collect();
    markers.sort();
    markers
}
