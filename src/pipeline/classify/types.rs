use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::pipeline::segmentation::Segment;

/// Segments longer than this are refused by the built-in classifiers.
pub const MAX_CLASSIFIER_INPUT_BYTES: usize = 64 * 1024;

/// Closed set of languages the classifiers can vote for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageTag {
    Latin,
    English,
    German,
    French,
    Dutch,
    Italian,
    Greek,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 7] = [
        Self::Latin,
        Self::English,
        Self::German,
        Self::French,
        Self::Dutch,
        Self::Italian,
        Self::Greek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latin => "LATIN",
            Self::English => "ENGLISH",
            Self::German => "GERMAN",
            Self::French => "FRENCH",
            Self::Dutch => "DUTCH",
            Self::Italian => "ITALIAN",
            Self::Greek => "GREEK",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classifier's answer for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "language", rename_all = "snake_case")]
pub enum Vote {
    Label(LanguageTag),
    NoOpinion,
}

impl Vote {
    pub fn label(&self) -> Option<LanguageTag> {
        match self {
            Self::Label(tag) => Some(*tag),
            Self::NoOpinion => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierVote {
    pub segment_index: usize,
    pub classifier_id: String,
    pub vote: Vote,
}

/// Non-fatal: the ensemble turns these into `Vote::NoOpinion`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Malformed classifier input: {0}")]
    MalformedInput(String),
}

/// A pluggable language classifier. Implementations are synchronous and are
/// run on the blocking pool by the ensemble.
pub trait LanguageClassifier: Send + Sync {
    fn id(&self) -> &str;
    fn classify(&self, text: &str) -> Result<Vote, ClassifierError>;
}

/// Shared input check for the built-in classifiers.
pub(crate) fn check_input(text: &str) -> Result<(), ClassifierError> {
    if text.len() > MAX_CLASSIFIER_INPUT_BYTES {
        return Err(ClassifierError::MalformedInput(format!(
            "segment of {} bytes exceeds {} byte limit",
            text.len(),
            MAX_CLASSIFIER_INPUT_BYTES
        )));
    }
    Ok(())
}

pub(crate) fn has_alphabetic(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// Final label for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsensusLabel {
    Language(LanguageTag),
    Unknown,
}

impl ConsensusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language(tag) => tag.as_str(),
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConsensusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConsensusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Discrete confidence ladder. Values are never interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    /// No classifier expressed an opinion.
    None,
    /// Exactly one opinion.
    Single,
    /// Majority or tie-broken plurality.
    Plurality,
    /// Every opinion agrees (at least two).
    Unanimous,
}

impl Confidence {
    pub fn value(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Single => 0.6,
            Self::Plurality => 0.7,
            Self::Unanimous => 1.0,
        }
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsensusResult {
    pub segment_index: usize,
    pub label: ConsensusLabel,
    pub confidence: Confidence,
}

/// A segment together with its votes and consensus.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSegment {
    pub segment: Segment,
    pub votes: Vec<ClassifierVote>,
    pub consensus: ConsensusResult,
}
