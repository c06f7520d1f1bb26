use std::path::Path;

/// MIME type reported for anything we cannot name.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Identify content from its magic bytes (NOT the declared filename).
/// Only PDF is accepted downstream; the other signatures exist so a
/// rejection can say what the upload actually was.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [b'%', b'P', b'D', b'F', b'-', ..] => "application/pdf",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => "image/tiff",
        [b'P', b'K', 0x03, 0x04, ..] => "application/zip",
        [b'M', b'Z', ..] => "application/x-msdownload",
        _ if is_likely_text(bytes) => "text/plain",
        _ => UNKNOWN_MIME,
    }
}

/// True when the content is a PDF container.
pub fn is_pdf(bytes: &[u8]) -> bool {
    sniff_mime(bytes) == "application/pdf"
}

/// Valid UTF-8 in the first 4 KiB and at least 80% printable.
fn is_likely_text(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(4096)];
    if head.is_empty() {
        return false;
    }
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    printable as f64 / text.chars().count().max(1) as f64 > 0.80
}

/// Sanitize a declared filename: strip path components, limit length.
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
        .take(255)
        .collect();

    if clean.is_empty() {
        "document.pdf".to_string()
    } else {
        clean
    }
}
