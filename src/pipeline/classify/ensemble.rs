use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::{timeout_at, Instant};

use super::types::{ClassifierVote, LanguageClassifier, Vote};
use crate::pipeline::segmentation::Segment;

/// Runs every classifier against a segment concurrently.
///
/// One classifier failing, panicking or overrunning the per-segment
/// deadline only costs its own vote, which becomes `NoOpinion`.
#[derive(Clone)]
pub struct ClassifierEnsemble {
    classifiers: Vec<Arc<dyn LanguageClassifier>>,
    timeout: Duration,
}

impl ClassifierEnsemble {
    pub fn new(classifiers: Vec<Arc<dyn LanguageClassifier>>, timeout: Duration) -> Self {
        Self {
            classifiers,
            timeout,
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.classifiers.iter().map(|c| c.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Collect one vote per classifier, in ensemble order.
    pub async fn vote(&self, segment: &Segment) -> Vec<ClassifierVote> {
        let text: Arc<str> = Arc::from(segment.text.as_str());
        let deadline = Instant::now() + self.timeout;

        let pending = self.classifiers.iter().map(|classifier| {
            let classifier = Arc::clone(classifier);
            let text = Arc::clone(&text);
            let segment_index = segment.index;

            async move {
                let classifier_id = classifier.id().to_string();
                let task = tokio::task::spawn_blocking(move || classifier.classify(&text));

                let vote = match timeout_at(deadline, task).await {
                    Ok(Ok(Ok(vote))) => vote,
                    Ok(Ok(Err(e))) => {
                        tracing::warn!(segment_index, classifier = %classifier_id, "Classifier failed: {e}");
                        Vote::NoOpinion
                    }
                    Ok(Err(join_error)) => {
                        tracing::warn!(segment_index, classifier = %classifier_id, "Classifier task aborted: {join_error}");
                        Vote::NoOpinion
                    }
                    Err(_) => {
                        // The blocking task keeps running detached; its result is discarded.
                        tracing::warn!(segment_index, classifier = %classifier_id, "Classifier timed out");
                        Vote::NoOpinion
                    }
                };

                ClassifierVote {
                    segment_index,
                    classifier_id,
                    vote,
                }
            }
        });

        join_all(pending).await
    }
}

impl std::fmt::Debug for ClassifierEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierEnsemble")
            .field("classifiers", &self.ids())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::{ClassifierError, LanguageTag};
    use crate::pipeline::segmentation::SegmentationStrategy;

    struct Fixed(&'static str, Vote);

    impl LanguageClassifier for Fixed {
        fn id(&self) -> &str {
            self.0
        }
        fn classify(&self, _text: &str) -> Result<Vote, ClassifierError> {
            Ok(self.1)
        }
    }

    struct Failing;

    impl LanguageClassifier for Failing {
        fn id(&self) -> &str {
            "failing"
        }
        fn classify(&self, _text: &str) -> Result<Vote, ClassifierError> {
            Err(ClassifierError::ClassifierUnavailable("model missing".into()))
        }
    }

    struct Panicking;

    impl LanguageClassifier for Panicking {
        fn id(&self) -> &str {
            "panicking"
        }
        fn classify(&self, _text: &str) -> Result<Vote, ClassifierError> {
            panic!("classifier bug")
        }
    }

    struct Slow;

    impl LanguageClassifier for Slow {
        fn id(&self) -> &str {
            "slow"
        }
        fn classify(&self, _text: &str) -> Result<Vote, ClassifierError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Vote::Label(LanguageTag::Dutch))
        }
    }

    fn segment(text: &str) -> Segment {
        Segment {
            index: 7,
            text: text.to_string(),
            strategy: SegmentationStrategy::Lines,
            group_size: 2,
        }
    }

    #[tokio::test]
    async fn votes_come_back_in_ensemble_order() {
        let ensemble = ClassifierEnsemble::new(
            vec![
                Arc::new(Fixed("b", Vote::Label(LanguageTag::Latin))),
                Arc::new(Fixed("a", Vote::NoOpinion)),
            ],
            Duration::from_secs(1),
        );

        let votes = ensemble.vote(&segment("Hic liber est")).await;
        let ids: Vec<_> = votes.iter().map(|v| v.classifier_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(votes.iter().all(|v| v.segment_index == 7));
        assert_eq!(votes[0].vote, Vote::Label(LanguageTag::Latin));
    }

    #[tokio::test]
    async fn error_and_panic_become_no_opinion() {
        let ensemble = ClassifierEnsemble::new(
            vec![
                Arc::new(Failing),
                Arc::new(Panicking),
                Arc::new(Fixed("ok", Vote::Label(LanguageTag::Greek))),
            ],
            Duration::from_secs(1),
        );

        let votes = ensemble.vote(&segment("λόγος")).await;
        assert_eq!(votes[0].vote, Vote::NoOpinion);
        assert_eq!(votes[1].vote, Vote::NoOpinion);
        assert_eq!(votes[2].vote, Vote::Label(LanguageTag::Greek));
    }

    #[tokio::test]
    async fn timeout_becomes_no_opinion() {
        let ensemble = ClassifierEnsemble::new(
            vec![
                Arc::new(Slow),
                Arc::new(Fixed("fast", Vote::Label(LanguageTag::English))),
            ],
            Duration::from_millis(50),
        );

        let votes = ensemble.vote(&segment("the light")).await;
        assert_eq!(votes[0].classifier_id, "slow");
        assert_eq!(votes[0].vote, Vote::NoOpinion);
        assert_eq!(votes[1].vote, Vote::Label(LanguageTag::English));
    }

    #[tokio::test]
    async fn empty_ensemble_has_no_votes() {
        let ensemble = ClassifierEnsemble::new(Vec::new(), Duration::from_secs(1));
        assert!(ensemble.is_empty());
        assert!(ensemble.vote(&segment("x")).await.is_empty());
    }
}
