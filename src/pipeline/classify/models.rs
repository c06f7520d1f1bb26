use std::sync::Arc;
use std::time::{Duration, Instant};

use super::consensus::ConsensusResolver;
use super::ensemble::ClassifierEnsemble;
use super::keyword::{KeywordClassifier, KEYWORD_CLASSIFIER_ID};
use super::script::{ScriptClassifier, SCRIPT_CLASSIFIER_ID};
use super::trigram::{TrigramClassifier, TRIGRAM_CLASSIFIER_ID};
use super::types::LanguageClassifier;

/// Tie-break order for the built-in classifiers, most trusted first.
pub const DEFAULT_PRIORITY: [&str; 3] = [
    TRIGRAM_CLASSIFIER_ID,
    KEYWORD_CLASSIFIER_ID,
    SCRIPT_CLASSIFIER_ID,
];

/// The built-in classifiers, initialised once at startup and shared by
/// every analysis run.
pub struct ClassifierModels {
    classifiers: Vec<Arc<dyn LanguageClassifier>>,
}

impl ClassifierModels {
    /// Build every classifier. Trigram profiles are trained here, so this is
    /// the only expensive step and must not run per request.
    pub fn load() -> Arc<Self> {
        let start = Instant::now();
        let trigram = TrigramClassifier::with_builtin_profiles();
        let profiles = trigram.profile_count();

        let classifiers: Vec<Arc<dyn LanguageClassifier>> = vec![
            Arc::new(trigram),
            Arc::new(KeywordClassifier),
            Arc::new(ScriptClassifier),
        ];

        tracing::info!(
            classifiers = classifiers.len(),
            trigram_profiles = profiles,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classifier models loaded"
        );

        Arc::new(Self { classifiers })
    }

    /// Models with a caller-supplied classifier set, in ensemble order.
    pub fn from_classifiers(classifiers: Vec<Arc<dyn LanguageClassifier>>) -> Arc<Self> {
        Arc::new(Self { classifiers })
    }

    pub fn classifier_ids(&self) -> Vec<String> {
        self.classifiers.iter().map(|c| c.id().to_string()).collect()
    }

    pub fn ensemble(&self, timeout: Duration) -> ClassifierEnsemble {
        ClassifierEnsemble::new(self.classifiers.clone(), timeout)
    }

    /// Resolver using the built-in priority order.
    pub fn resolver(&self) -> ConsensusResolver {
        ConsensusResolver::new(DEFAULT_PRIORITY.iter().map(|id| id.to_string()).collect())
    }
}
