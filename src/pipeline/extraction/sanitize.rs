/// Sanitize extracted text before segmentation.
/// Normalizes line endings, turns form feeds into line breaks and strips the
/// remaining control characters. Blank lines are kept: they count as lines
/// for the `lines` segmentation strategy.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .chars()
        .filter_map(|c| match c {
            '\n' | '\t' => Some(c),
            '\r' | '\u{000C}' => Some('\n'),
            c if c.is_control() => None,
            // BOM and zero-width characters some producers sprinkle in
            '\u{FEFF}' | '\u{200B}' => None,
            c => Some(c),
        })
        .collect()
}
