use tracing::debug;

use crate::heuristics::EnclosedQuotePolicy;
use crate::models::{AnnotatedDocument, GroupMember, Sentence, StatementGroup};

use super::SentenceAnalysis;

/// Whether `current` continues `previous` without a gap or a paragraph break
///
/// The sentences must be token-adjacent, and neither the last two tokens of `previous`,
/// the first two tokens of `current`, nor the whitespace between them may hold a line break.
pub fn is_adjacent(previous: &Sentence<'_>, current: &Sentence<'_>) -> bool {
    if previous.is_empty() || current.is_empty() || current.start != previous.end {
        return false;
    }

    let tail = previous.text_of(previous.len().saturating_sub(2), previous.len());
    let head = current.text_of(0, 2);
    let gap = previous
        .doc()
        .slice(previous.end_char(), current.start_char());

    !tail.contains('\n') && !head.contains('\n') && !gap.contains('\n')
}

/// A group still being accumulated
#[derive(Debug)]
struct PendingGroup {
    members: Vec<usize>,
    speaker: Option<String>,
}

/// What the current sentence does to the pending group
enum Transition {
    /// The sentence was appended
    Continue,
    /// Close the pending group and open a new one with this sentence
    Restart,
    /// The sentence was appended and closes the group
    Close,
    /// Drop back to idle
    Reset,
}

/// Sequential scan over sentence analyses building statement groups
struct Grouper<'a> {
    doc: &'a AnnotatedDocument,
    analyses: &'a [SentenceAnalysis],
    policy: EnclosedQuotePolicy,
    pending: Option<PendingGroup>,
    groups: Vec<StatementGroup>,
}

impl<'a> Grouper<'a> {
    fn new(
        doc: &'a AnnotatedDocument,
        analyses: &'a [SentenceAnalysis],
        policy: EnclosedQuotePolicy,
    ) -> Self {
        Self {
            doc,
            analyses,
            policy,
            pending: None,
            groups: Vec::new(),
        }
    }

    fn adjacent_to_pending(&self, index: usize) -> bool {
        let Some(last) = self.pending.as_ref().and_then(|p| p.members.last()) else {
            return false;
        };
        match (self.doc.sentence(*last), self.doc.sentence(index)) {
            (Some(previous), Some(current)) => is_adjacent(&previous, &current),
            _ => false,
        }
    }

    fn step(&mut self, analysis: &SentenceAnalysis) {
        let index = analysis.index;
        let adjacent = self.adjacent_to_pending(index);

        let transition = match self.pending.as_mut() {
            Some(pending) if adjacent => {
                if let Some(speaker) = analysis.speaker() {
                    if pending.speaker.as_deref().is_some_and(|s| s != speaker) {
                        Transition::Restart
                    } else {
                        pending.speaker = Some(speaker.to_string());
                        pending.members.push(index);
                        Transition::Continue
                    }
                } else if analysis.has_start_quote() {
                    if pending.speaker.is_none() {
                        Transition::Restart
                    } else {
                        pending.members.push(index);
                        Transition::Continue
                    }
                } else if analysis.has_end_quote() {
                    pending.members.push(index);
                    Transition::Close
                } else if pending.speaker.is_some() {
                    pending.members.push(index);
                    Transition::Continue
                } else {
                    Transition::Reset
                }
            }
            _ if analysis.speaker().is_some() || analysis.has_start_quote() => Transition::Restart,
            _ => Transition::Reset,
        };

        match transition {
            Transition::Continue => {}
            Transition::Restart => {
                self.finalize();
                self.pending = Some(PendingGroup {
                    members: vec![index],
                    speaker: analysis.speaker().map(str::to_string),
                });
            }
            Transition::Close | Transition::Reset => {
                self.finalize();
                return;
            }
        }

        if self.closes_group(analysis) {
            self.finalize();
        }
    }

    /// Whether an enclosed (opened and closed) quote ends the group under the current policy
    fn closes_group(&self, analysis: &SentenceAnalysis) -> bool {
        if !(analysis.has_start_quote() && analysis.has_end_quote()) {
            return false;
        }
        match self.policy {
            EnclosedQuotePolicy::Continue => false,
            EnclosedQuotePolicy::CloseImmediately => true,
            EnclosedQuotePolicy::CloseWhenAttributed => analysis.decision.is_attributed(),
        }
    }

    /// Emit the pending group if it found a speaker
    fn finalize(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let Some(speaker) = pending.speaker else {
            debug!(
                "Discarding {} sentence(s) without a speaker starting at sentence {}",
                pending.members.len(),
                pending.members.first().copied().unwrap_or_default()
            );
            return;
        };

        let members: Vec<GroupMember> = pending
            .members
            .iter()
            .map(|&sentence| GroupMember {
                sentence,
                redactions: self
                    .analyses
                    .get(sentence)
                    .map(|a| a.redactions(self.doc))
                    .unwrap_or_default(),
            })
            .collect();

        debug!(
            "Statement group for {:?}: sentences {:?}",
            speaker, pending.members
        );
        self.groups.push(StatementGroup { speaker, members });
    }

    fn finish(mut self) -> Vec<StatementGroup> {
        self.finalize();
        self.groups
    }
}

/// Execute Stage 2: group contiguous sentences into per-speaker statements
///
/// One attribution clause licenses the surrounding sentences of an unbroken paragraph run,
/// until a closing quote, a paragraph break or a different speaker ends the run.
/// `analyses` holds one entry per sentence, in sentence order.
pub fn group_statements(
    doc: &AnnotatedDocument,
    analyses: &[SentenceAnalysis],
    policy: EnclosedQuotePolicy,
) -> Vec<StatementGroup> {
    let mut grouper = Grouper::new(doc, analyses, policy);
    for analysis in analyses {
        grouper.step(analysis);
    }
    grouper.finish()
}
