use tracing::debug;

use crate::heuristics::{Lexicon, detect_markers, resolve};
use crate::models::{AnnotatedDocument, AttributionDecision, RedactionSpan, SentenceMarkers};

/// Detector output and verdict for one sentence
#[derive(Debug, Clone)]
pub struct SentenceAnalysis {
    /// Sentence index in the document
    pub index: usize,
    pub markers: SentenceMarkers,
    pub decision: AttributionDecision,
}

impl SentenceAnalysis {
    pub fn speaker(&self) -> Option<&str> {
        self.decision.speaker()
    }

    pub fn has_start_quote(&self) -> bool {
        self.markers.has_start_quote()
    }

    pub fn has_end_quote(&self) -> bool {
        self.markers.has_end_quote()
    }

    /// Everything to cut from the sentence: its attribution clause and its edge quotation marks
    pub fn redactions(&self, doc: &AnnotatedDocument) -> Vec<RedactionSpan> {
        let origin = doc
            .sentence(self.index)
            .map(|s| s.start_char())
            .unwrap_or(0);

        let mut spans: Vec<RedactionSpan> = self.decision.redactions().to_vec();
        spans.extend(
            self.markers
                .quotes
                .start
                .iter()
                .chain(&self.markers.quotes.end)
                .map(|m| {
                    RedactionSpan::new(
                        m.start_char.saturating_sub(origin),
                        m.end_char.saturating_sub(origin),
                    )
                }),
        );
        RedactionSpan::normalize(&mut spans);
        spans
    }
}

/// Execute Stage 1: per-sentence detection and attribution
///
/// Every sentence is analyzed independently, so this pass has no ordering constraints.
pub fn analyze_sentences(doc: &AnnotatedDocument, lexicon: &Lexicon) -> Vec<SentenceAnalysis> {
    doc.sentences()
        .map(|sentence| {
            let markers = detect_markers(&sentence, lexicon);
            let decision = resolve(&sentence, &markers, lexicon);
            if let Some(speaker) = decision.speaker() {
                debug!(
                    "Sentence {} attributed to {:?}: {:?}",
                    sentence.index,
                    speaker,
                    sentence.text()
                );
            }
            SentenceAnalysis {
                index: sentence.index,
                markers,
                decision,
            }
        })
        .collect()
}
