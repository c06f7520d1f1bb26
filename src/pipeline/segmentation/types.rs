use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SegmentationError;

pub const MIN_GROUP_SIZE: usize = 1;
pub const MAX_GROUP_SIZE: usize = 10;

/// How extracted text is partitioned into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationStrategy {
    /// Groups of `n` consecutive lines.
    Lines,
    /// Groups of `n` consecutive word tokens.
    Ngram,
}

impl SegmentationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Ngram => "ngram",
        }
    }

    pub fn default_group_size(&self) -> usize {
        match self {
            Self::Lines => 2,
            Self::Ngram => 3,
        }
    }
}

impl fmt::Display for SegmentationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentationStrategy {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "ngram" | "ngrams" | "n-gram" => Ok(Self::Ngram),
            other => Err(SegmentationError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Validated strategy + group size. Construction is the only place `n` is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentationConfig {
    strategy: SegmentationStrategy,
    group_size: usize,
}

impl SegmentationConfig {
    pub fn new(strategy: SegmentationStrategy, group_size: usize) -> Result<Self, SegmentationError> {
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&group_size) {
            return Err(SegmentationError::InvalidGroupSize {
                n: group_size,
                min: MIN_GROUP_SIZE,
                max: MAX_GROUP_SIZE,
            });
        }
        Ok(Self {
            strategy,
            group_size,
        })
    }

    pub fn with_default_size(strategy: SegmentationStrategy) -> Self {
        Self {
            strategy,
            group_size: strategy.default_group_size(),
        }
    }

    pub fn strategy(&self) -> SegmentationStrategy {
        self.strategy
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self::with_default_size(SegmentationStrategy::Lines)
    }
}

/// One unit of classification. Text is never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Dense, zero-based, document order.
    pub index: usize,
    pub text: String,
    pub strategy: SegmentationStrategy,
    pub group_size: usize,
}
