//! Aggregate per-segment consensus into the final language report.

use std::fmt::Write as _;

use serde::Serialize;

use crate::pipeline::classify::{Confidence, ConsensusLabel, ResolvedSegment};

/// Number of segments shown in detail.
pub const PREVIEW_LIMIT: usize = 10;
/// Characters of segment text shown in the preview.
pub const PREVIEW_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: ConsensusLabel,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewEntry {
    /// 1-based position in the document.
    pub number: usize,
    pub text: String,
    pub truncated: bool,
    pub label: ConsensusLabel,
    pub confidence: Confidence,
}

/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_segments: usize,
    /// First-appearance order.
    pub distribution: Vec<DistributionEntry>,
    pub preview: Vec<PreviewEntry>,
    /// Segments beyond the preview.
    pub overflow: usize,
}

/// Single-pass accumulator; lets the processor fold results as they arrive.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    total: usize,
    counts: Vec<(ConsensusLabel, usize)>,
    preview: Vec<PreviewEntry>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resolved: &ResolvedSegment) {
        self.total += 1;
        let label = resolved.consensus.label;

        match self.counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label, 1)),
        }

        if self.preview.len() < PREVIEW_LIMIT {
            let (text, truncated) = truncate_chars(&resolved.segment.text, PREVIEW_TEXT_CHARS);
            self.preview.push(PreviewEntry {
                number: self.total,
                text,
                truncated,
                label,
                confidence: resolved.consensus.confidence,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn finish(self) -> Report {
        let total = self.total;
        let distribution = self
            .counts
            .into_iter()
            .map(|(label, count)| DistributionEntry {
                label,
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();

        Report {
            total_segments: total,
            distribution,
            preview: self.preview,
            overflow: total.saturating_sub(PREVIEW_LIMIT),
        }
    }
}

impl Report {
    pub fn build(segments: &[ResolvedSegment]) -> Self {
        let mut builder = ReportBuilder::new();
        for resolved in segments {
            builder.push(resolved);
        }
        builder.finish()
    }

    /// Fixed plain-text layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Language Analysis Report\n");
        out.push_str("========================\n\n");

        out.push_str("Language Distribution:\n");
        for entry in &self.distribution {
            let _ = writeln!(
                out,
                "  {}: {} segments ({:.2}%)",
                entry.label, entry.count, entry.percentage
            );
        }
        out.push('\n');

        out.push_str("Segment Details:\n");
        for entry in &self.preview {
            let ellipsis = if entry.truncated { "..." } else { "" };
            let _ = writeln!(out, "Segment {}:", entry.number);
            let _ = writeln!(out, "  Text: {}{}", entry.text, ellipsis);
            let _ = writeln!(out, "  Detected Language: {}", entry.label);
            let _ = writeln!(out, "  Confidence: {:.2}%", entry.confidence.value() * 100.0);
            out.push('\n');
        }

        if self.overflow > 0 {
            let _ = writeln!(out, "... and {} more segments", self.overflow);
        }
        out
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => (text[..byte_offset].to_string(), true),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::{ConsensusResult, LanguageTag};
    use crate::pipeline::segmentation::{Segment, SegmentationStrategy};

    fn resolved(index: usize, text: &str, label: ConsensusLabel, confidence: Confidence) -> ResolvedSegment {
        ResolvedSegment {
            segment: Segment {
                index,
                text: text.to_string(),
                strategy: SegmentationStrategy::Lines,
                group_size: 2,
            },
            votes: Vec::new(),
            consensus: ConsensusResult {
                segment_index: index,
                label,
                confidence,
            },
        }
    }

    const LATIN: ConsensusLabel = ConsensusLabel::Language(LanguageTag::Latin);
    const ENGLISH: ConsensusLabel = ConsensusLabel::Language(LanguageTag::English);

    #[test]
    fn renders_exact_layout() {
        let report = Report::build(&[
            resolved(0, "Gallia est omnis divisa", LATIN, Confidence::Unanimous),
            resolved(1, "1 2 3", ConsensusLabel::Unknown, Confidence::None),
            resolved(2, "In partes tres", LATIN, Confidence::Single),
        ]);

        let expected = "\
Language Analysis Report
========================

Language Distribution:
  LATIN: 2 segments (66.67%)
  Unknown: 1 segments (33.33%)

Segment Details:
Segment 1:
  Text: Gallia est omnis divisa
  Detected Language: LATIN
  Confidence: 100.00%

Segment 2:
  Text: 1 2 3
  Detected Language: Unknown
  Confidence: 0.00%

Segment 3:
  Text: In partes tres
  Detected Language: LATIN
  Confidence: 60.00%

";
        assert_eq!(report.render(), expected);
    }

    #[test]
    fn distribution_keeps_first_appearance_order() {
        let report = Report::build(&[
            resolved(0, "a", ENGLISH, Confidence::Single),
            resolved(1, "b", LATIN, Confidence::Single),
            resolved(2, "c", LATIN, Confidence::Single),
        ]);
        let labels: Vec<_> = report.distribution.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec![ENGLISH, LATIN]);
        assert_eq!(report.distribution[1].count, 2);
    }

    #[test]
    fn preview_capped_with_overflow_line() {
        let segments: Vec<_> = (0..25)
            .map(|i| resolved(i, &format!("segment {i}"), LATIN, Confidence::Plurality))
            .collect();
        let report = Report::build(&segments);

        assert_eq!(report.total_segments, 25);
        assert_eq!(report.preview.len(), PREVIEW_LIMIT);
        assert_eq!(report.overflow, 15);
        assert_eq!(report.preview.last().unwrap().number, 10);

        let text = report.render();
        assert!(text.ends_with("... and 15 more segments\n"));
        assert!(text.contains("  LATIN: 25 segments (100.00%)\n"));
        assert!(text.contains("  Confidence: 70.00%\n"));
        assert!(!text.contains("Segment 11:"));
    }

    #[test]
    fn exactly_ten_segments_has_no_overflow() {
        let segments: Vec<_> = (0..10)
            .map(|i| resolved(i, "x", LATIN, Confidence::Single))
            .collect();
        let report = Report::build(&segments);
        assert_eq!(report.overflow, 0);
        assert!(!report.render().contains("more segments"));
    }

    #[test]
    fn long_text_truncated_on_char_boundary() {
        let text = "ἐν ἀρχῇ ἦν ὁ λόγος καὶ ὁ λόγος ἦν πρὸς τὸν θεόν καὶ θεὸς ἦν ὁ λόγος";
        let report = Report::build(&[resolved(0, text, ConsensusLabel::Language(LanguageTag::Greek), Confidence::Unanimous)]);

        let entry = &report.preview[0];
        assert!(entry.truncated);
        assert_eq!(entry.text.chars().count(), PREVIEW_TEXT_CHARS);
        assert!(report.render().contains(&format!("  Text: {}...\n", entry.text)));
    }

    #[test]
    fn fifty_char_text_is_not_truncated() {
        let text = "a".repeat(PREVIEW_TEXT_CHARS);
        let report = Report::build(&[resolved(0, &text, LATIN, Confidence::Single)]);
        assert!(!report.preview[0].truncated);
        assert!(!report.render().contains("..."));
    }

    #[test]
    fn serializes_labels_and_confidence() {
        let report = Report::build(&[resolved(0, "x", LATIN, Confidence::Plurality)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["distribution"][0]["label"], "LATIN");
        assert_eq!(json["preview"][0]["confidence"], 0.7);
        assert_eq!(json["overflow"], 0);
    }
}
