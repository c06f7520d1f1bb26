//! Partition extracted text into ordered, non-empty segments.
//!
//! Segmentation is lazy: [`Segmenter::segments`] returns an iterator that
//! reports its own progress, so the processor can check cancellation and
//! budgets between segments instead of materialising the whole document.

pub mod lines;
pub mod ngram;
pub mod types;

pub use types::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("Group size {n} outside allowed range {min}..={max}")]
    InvalidGroupSize { n: usize, min: usize, max: usize },

    #[error("Unknown segmentation strategy: {0}")]
    UnknownStrategy(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SegmentationConfig {
        self.config
    }

    pub fn segments<'a>(&self, text: &'a str) -> Segments<'a> {
        let units = match self.config.strategy() {
            SegmentationStrategy::Lines => lines::line_units(text),
            SegmentationStrategy::Ngram => ngram::word_tokens(text),
        };
        let n = self.config.group_size();
        let total_groups = units.len().div_ceil(n);

        Segments {
            units,
            strategy: self.config.strategy(),
            group_size: n,
            groups_consumed: 0,
            total_groups,
            next_index: 0,
        }
    }
}

/// Lazy segment iterator over borrowed text.
#[derive(Debug)]
pub struct Segments<'a> {
    units: Vec<&'a str>,
    strategy: SegmentationStrategy,
    group_size: usize,
    groups_consumed: usize,
    total_groups: usize,
    next_index: usize,
}

impl Segments<'_> {
    /// Fraction of groups consumed, in [0, 1]. Exactly 1.0 once the final
    /// group has been consumed, or immediately for empty input.
    pub fn progress(&self) -> f64 {
        if self.groups_consumed >= self.total_groups {
            1.0
        } else {
            self.groups_consumed as f64 / self.total_groups as f64
        }
    }

    /// Upper bound on the number of segments still to come.
    pub fn remaining_groups(&self) -> usize {
        self.total_groups - self.groups_consumed
    }

    fn join_group(&self, group: &[&str]) -> String {
        match self.strategy {
            SegmentationStrategy::Lines => lines::join_lines(group),
            SegmentationStrategy::Ngram => ngram::join_tokens(group),
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while self.groups_consumed < self.total_groups {
            let start = self.groups_consumed * self.group_size;
            let end = (start + self.group_size).min(self.units.len());
            self.groups_consumed += 1;

            let text = self.join_group(&self.units[start..end]);
            if text.trim().is_empty() {
                continue;
            }

            let segment = Segment {
                index: self.next_index,
                text,
                strategy: self.strategy,
                group_size: self.group_size,
            };
            self.next_index += 1;
            return Some(segment);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_groups()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(strategy: SegmentationStrategy, n: usize) -> Segmenter {
        Segmenter::new(SegmentationConfig::new(strategy, n).unwrap())
    }

    #[test]
    fn short_sentence_is_one_trigram_segment() {
        let segments: Vec<_> = segmenter(SegmentationStrategy::Ngram, 3)
            .segments("Hic liber est.")
            .collect();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Hic liber est");
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[0].strategy, SegmentationStrategy::Ngram);
        assert_eq!(segments[0].group_size, 3);
    }

    #[test]
    fn ngram_keeps_partial_final_group() {
        let texts: Vec<_> = segmenter(SegmentationStrategy::Ngram, 2)
            .segments("una duo tres quattuor quinque")
            .map(|s| s.text)
            .collect();
        assert_eq!(texts, vec!["una duo", "tres quattuor", "quinque"]);
    }

    #[test]
    fn lines_grouped_in_pairs() {
        let texts: Vec<_> = segmenter(SegmentationStrategy::Lines, 2)
            .segments("Gallia est omnis divisa\nin partes tres\nquarum unam incolunt Belgae")
            .map(|s| s.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "Gallia est omnis divisa\nin partes tres",
                "quarum unam incolunt Belgae"
            ]
        );
    }

    #[test]
    fn blank_line_groups_are_skipped_and_indices_stay_dense() {
        let segments: Vec<_> = segmenter(SegmentationStrategy::Lines, 1)
            .segments("alpha\n\n   \nbeta\n")
            .collect();

        let indexed: Vec<_> = segments.iter().map(|s| (s.index, s.text.as_str())).collect();
        assert_eq!(indexed, vec![(0, "alpha"), (1, "beta")]);
    }

    #[test]
    fn ngram_reconstructs_token_sequence() {
        let text = "Arma virumque cano, Troiae qui primus ab oris\nItaliam, fato profugus.";
        let rejoined: Vec<String> = segmenter(SegmentationStrategy::Ngram, 4)
            .segments(text)
            .flat_map(|s| s.text.split(' ').map(str::to_string).collect::<Vec<_>>())
            .collect();

        assert_eq!(rejoined, ngram::word_tokens(text));
    }

    #[test]
    fn lines_reconstruct_non_blank_lines() {
        let text = "one\ntwo\nthree\nfour\nfive";
        let joined = segmenter(SegmentationStrategy::Lines, 3)
            .segments(text)
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(joined, text);
    }

    #[test]
    fn progress_is_monotone_and_ends_at_one() {
        let mut segments = segmenter(SegmentationStrategy::Ngram, 2).segments("a b c d e");
        let mut last = segments.progress();
        assert_eq!(last, 0.0);

        while segments.next().is_some() {
            let p = segments.progress();
            assert!(p >= last && p <= 1.0, "progress went from {last} to {p}");
            last = p;
        }
        assert_eq!(segments.progress(), 1.0);
    }

    #[test]
    fn progress_reaches_one_on_final_partial_group() {
        let mut segments = segmenter(SegmentationStrategy::Ngram, 2).segments("a b c");
        segments.next();
        assert_eq!(segments.progress(), 0.5);
        segments.next();
        assert_eq!(segments.progress(), 1.0);
        assert!(segments.next().is_none());
    }

    #[test]
    fn empty_input_yields_nothing_with_full_progress() {
        for strategy in [SegmentationStrategy::Lines, SegmentationStrategy::Ngram] {
            let mut segments = segmenter(strategy, 2).segments("   \n  ");
            assert_eq!(segments.progress(), 1.0);
            assert!(segments.next().is_none());
        }
    }
}
