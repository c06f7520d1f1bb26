use super::types::{ClassifierVote, Confidence, ConsensusLabel, ConsensusResult, LanguageTag};

/// Folds one segment's votes into a single label and discrete confidence.
#[derive(Debug, Clone)]
pub struct ConsensusResolver {
    priority: Vec<String>,
}

impl ConsensusResolver {
    /// `priority` lists classifier ids, most trusted first. Classifiers not
    /// listed rank after every listed one, in vote order.
    pub fn new(priority: Vec<String>) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    pub fn resolve(&self, segment_index: usize, votes: &[ClassifierVote]) -> ConsensusResult {
        let opinions: Vec<(usize, &ClassifierVote, LanguageTag)> = votes
            .iter()
            .enumerate()
            .filter_map(|(position, v)| v.vote.label().map(|tag| (position, v, tag)))
            .collect();

        let (label, confidence) = match opinions.as_slice() {
            [] => (ConsensusLabel::Unknown, Confidence::None),
            [(_, _, tag)] => (ConsensusLabel::Language(*tag), Confidence::Single),
            _ => self.resolve_many(&opinions),
        };

        ConsensusResult {
            segment_index,
            label,
            confidence,
        }
    }

    fn resolve_many(
        &self,
        opinions: &[(usize, &ClassifierVote, LanguageTag)],
    ) -> (ConsensusLabel, Confidence) {
        // Tally in first-appearance order.
        let mut tally: Vec<(LanguageTag, usize)> = Vec::new();
        for (_, _, tag) in opinions {
            match tally.iter_mut().find(|(t, _)| t == tag) {
                Some((_, count)) => *count += 1,
                None => tally.push((*tag, 1)),
            }
        }

        let top = tally.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let leaders: Vec<LanguageTag> = tally
            .iter()
            .filter(|(_, count)| *count == top)
            .map(|(tag, _)| *tag)
            .collect();

        if let [winner] = leaders.as_slice() {
            if top > 1 {
                let confidence = if top == opinions.len() {
                    Confidence::Unanimous
                } else {
                    Confidence::Plurality
                };
                return (ConsensusLabel::Language(*winner), confidence);
            }
        }

        let tie_break = opinions
            .iter()
            .filter(|(_, _, tag)| leaders.contains(tag))
            .min_by_key(|(position, vote, _)| self.rank(&vote.classifier_id, *position))
            .map(|(_, _, tag)| *tag);

        match tie_break {
            Some(tag) => (ConsensusLabel::Language(tag), Confidence::Plurality),
            None => (ConsensusLabel::Unknown, Confidence::None),
        }
    }

    fn rank(&self, classifier_id: &str, position: usize) -> usize {
        self.priority
            .iter()
            .position(|id| id == classifier_id)
            .unwrap_or(self.priority.len() + position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::Vote;
    use LanguageTag::*;

    fn resolver() -> ConsensusResolver {
        ConsensusResolver::new(vec![
            "trigram".to_string(),
            "keyword".to_string(),
            "script".to_string(),
        ])
    }

    fn votes(entries: &[(&str, Vote)]) -> Vec<ClassifierVote> {
        entries
            .iter()
            .map(|(id, vote)| ClassifierVote {
                segment_index: 0,
                classifier_id: id.to_string(),
                vote: *vote,
            })
            .collect()
    }

    #[test]
    fn unanimous_pair_is_full_confidence() {
        let result = resolver().resolve(
            0,
            &votes(&[("trigram", Vote::Label(Latin)), ("keyword", Vote::Label(Latin))]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(Latin));
        assert_eq!(result.confidence.value(), 1.0);
    }

    #[test]
    fn two_way_split_goes_to_priority_classifier() {
        let result = resolver().resolve(
            3,
            &votes(&[("keyword", Vote::Label(French)), ("trigram", Vote::Label(Latin))]),
        );
        assert_eq!(result.segment_index, 3);
        assert_eq!(result.label, ConsensusLabel::Language(Latin));
        assert_eq!(result.confidence.value(), 0.7);
    }

    #[test]
    fn single_opinion_is_point_six() {
        let result = resolver().resolve(
            0,
            &votes(&[("trigram", Vote::Label(Latin)), ("keyword", Vote::NoOpinion)]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(Latin));
        assert_eq!(result.confidence.value(), 0.6);
    }

    #[test]
    fn no_opinions_is_unknown() {
        let result = resolver().resolve(
            0,
            &votes(&[("trigram", Vote::NoOpinion), ("keyword", Vote::NoOpinion)]),
        );
        assert_eq!(result.label, ConsensusLabel::Unknown);
        assert_eq!(result.confidence.value(), 0.0);

        assert_eq!(resolver().resolve(0, &[]).label, ConsensusLabel::Unknown);
    }

    #[test]
    fn majority_of_three_is_plurality() {
        let result = resolver().resolve(
            0,
            &votes(&[
                ("trigram", Vote::Label(German)),
                ("keyword", Vote::Label(Dutch)),
                ("script", Vote::Label(Dutch)),
            ]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(Dutch));
        assert_eq!(result.confidence, Confidence::Plurality);
    }

    #[test]
    fn all_distinct_uses_priority() {
        let result = resolver().resolve(
            0,
            &votes(&[
                ("script", Vote::Label(Greek)),
                ("keyword", Vote::Label(Italian)),
                ("trigram", Vote::Label(English)),
            ]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(English));
        assert_eq!(result.confidence, Confidence::Plurality);
    }

    #[test]
    fn unlisted_classifiers_rank_last_in_vote_order() {
        let result = resolver().resolve(
            0,
            &votes(&[
                ("custom-a", Vote::Label(Dutch)),
                ("custom-b", Vote::Label(Italian)),
                ("script", Vote::Label(French)),
            ]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(French));

        let result = resolver().resolve(
            0,
            &votes(&[("custom-a", Vote::Label(Dutch)), ("custom-b", Vote::Label(Italian))]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(Dutch));
    }

    #[test]
    fn tie_break_only_considers_tied_labels() {
        // LATIN and GREEK tie at two; trigram voted ENGLISH, which is not tied.
        let result = resolver().resolve(
            0,
            &votes(&[
                ("trigram", Vote::Label(English)),
                ("keyword", Vote::Label(Greek)),
                ("script", Vote::Label(Latin)),
                ("extra-1", Vote::Label(Latin)),
                ("extra-2", Vote::Label(Greek)),
            ]),
        );
        assert_eq!(result.label, ConsensusLabel::Language(Greek));
        assert_eq!(result.confidence, Confidence::Plurality);
    }
}
