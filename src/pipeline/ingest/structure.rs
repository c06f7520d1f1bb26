//! Linear structural pre-check, run on the raw bytes before any recursive
//! PDF parser sees them.
//!
//! lopdf and pdf-extract parse nested arrays and dictionaries recursively
//! with no depth limit, so a few kilobytes of `[[[[` can exhaust a thread
//! stack. This pass tokenises the file iteratively and rejects nesting past
//! [`MAX_SYNTAX_DEPTH`]. Flate-compressed object streams and content streams
//! are inflated (bounded) and checked the same way, since both are parsed
//! later. Image, font, XRef and metadata streams are binary and skipped, as
//! are streams under any filter other than `FlateDecode`.

use std::io::Read;

use flate2::read::ZlibDecoder;

use super::IngestError;

/// Deepest array/dictionary/string-parenthesis nesting accepted.
pub const MAX_SYNTAX_DEPTH: usize = 256;

/// Inflated size ceiling for one checked stream.
const MAX_INFLATED_STREAM_BYTES: u64 = 64 * 1024 * 1024;

/// Stream dictionaries carrying any of these hold binary data.
const BINARY_STREAM_MARKERS: [&[u8]; 9] = [
    b"/Image",
    b"/XRef",
    b"/Length1",
    b"/Length2",
    b"/Type1C",
    b"/CIDFontType0C",
    b"/OpenType",
    b"/Metadata",
    b"/EmbeddedFile",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// File-level object syntax; `stream` bodies are inspected.
    File,
    /// Object stream payload: object syntax, no nested streams.
    Objects,
    /// Content stream operators; inline image data is skipped.
    Content,
}

/// Reject documents whose syntax nests deeper than [`MAX_SYNTAX_DEPTH`].
pub fn check_structure(bytes: &[u8]) -> Result<(), IngestError> {
    check_region(bytes, Mode::File)
}

fn check_region(bytes: &[u8], mode: Mode) -> Result<(), IngestError> {
    let mut depth = 0usize;
    let mut last_top_dict: Option<(usize, usize)> = None;
    let mut dict_starts: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => i = skip_line(bytes, i),
            b'(' => i = skip_literal_string(bytes, i)?,
            b'<' if bytes.get(i + 1) == Some(&b'<') => {
                depth += 1;
                dict_starts.push(i);
                i += 2;
            }
            b'<' => i = skip_past(bytes, i + 1, b'>'),
            b'>' if bytes.get(i + 1) == Some(&b'>') => {
                depth = depth.saturating_sub(1);
                if let Some(start) = dict_starts.pop() {
                    if depth == 0 {
                        last_top_dict = Some((start, i + 2));
                    }
                }
                i += 2;
            }
            b'[' => {
                depth += 1;
                i += 1;
            }
            b']' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'/' => i = skip_token(bytes, i + 1),
            c if is_regular(c) => {
                let end = skip_token(bytes, i);
                let token = &bytes[i..end];
                i = match (mode, token) {
                    (Mode::File, b"stream") => {
                        let dict = last_top_dict.take().map(|(s, e)| &bytes[s..e]);
                        check_stream(bytes, end, dict)?
                    }
                    (Mode::Content, b"ID") => skip_inline_image(bytes, end),
                    _ => end,
                };
            }
            _ => i += 1,
        }

        if depth > MAX_SYNTAX_DEPTH {
            return Err(too_deep());
        }
    }
    Ok(())
}

/// Check one stream body starting right after the `stream` keyword.
/// Returns the offset scanning resumes from.
fn check_stream(bytes: &[u8], keyword_end: usize, dict: Option<&[u8]>) -> Result<usize, IngestError> {
    let start = skip_stream_eol(bytes, keyword_end);
    let end = stream_end(bytes, start, dict);
    let body = &bytes[start..end];

    let Some(dict) = dict else {
        return Ok(end);
    };
    let dict = decode_name_escapes(dict);

    let inner_mode = if contains(&dict, b"/ObjStm") {
        Mode::Objects
    } else if BINARY_STREAM_MARKERS.iter().any(|m| contains(&dict, m)) {
        return Ok(end);
    } else {
        Mode::Content
    };

    if !contains(&dict, b"/Filter") {
        check_region(body, inner_mode)?;
    } else if is_flate_only(&dict) {
        check_region(&inflate(body)?, inner_mode)?;
    }
    Ok(end)
}

/// Body end: a direct `/Length` when it lands on `endstream`, else the
/// next `endstream`, else end of file.
fn stream_end(bytes: &[u8], start: usize, dict: Option<&[u8]>) -> usize {
    if let Some(length) = dict.and_then(direct_length) {
        if let Some(end) = start.checked_add(length).filter(|e| *e <= bytes.len()) {
            let after = &bytes[end..];
            let trimmed = after
                .iter()
                .position(|b| !is_whitespace(*b))
                .map(|p| &after[p..])
                .unwrap_or(&[]);
            if trimmed.starts_with(b"endstream") {
                return end;
            }
        }
    }
    find(bytes, start, b"endstream").unwrap_or(bytes.len())
}

/// `/Length <n>` when given directly (not as `<n> <g> R`).
fn direct_length(dict: &[u8]) -> Option<usize> {
    let mut at = 0;
    while let Some(pos) = find(dict, at, b"/Length") {
        let after = pos + b"/Length".len();
        at = after;
        if dict.get(after).is_some_and(|c| is_regular(*c)) {
            continue; // /Length1, /Length2 ...
        }
        let mut tokens = dict[after..]
            .split(|c| is_whitespace(*c) || *c == b'/' || *c == b'>')
            .filter(|t| !t.is_empty());
        let value = std::str::from_utf8(tokens.next()?).ok()?.parse().ok()?;
        let is_reference = matches!(
            (tokens.next(), tokens.next()),
            (Some(g), Some(b"R")) if g.iter().all(u8::is_ascii_digit)
        );
        return if is_reference { None } else { Some(value) };
    }
    None
}

fn is_flate_only(dict: &[u8]) -> bool {
    const OTHER_FILTERS: [&[u8]; 9] = [
        b"/ASCIIHexDecode",
        b"/ASCII85Decode",
        b"/LZWDecode",
        b"/RunLengthDecode",
        b"/DCTDecode",
        b"/JPXDecode",
        b"/CCITTFaxDecode",
        b"/JBIG2Decode",
        b"/Crypt",
    ];
    contains(dict, b"/FlateDecode") && !OTHER_FILTERS.iter().any(|f| contains(dict, f))
}

/// Inflate up to the size ceiling. Corrupt data yields whatever decoded
/// before the error; the later parser fails on it the same way.
fn inflate(body: &[u8]) -> Result<Vec<u8>, IngestError> {
    let mut out = Vec::new();
    let mut decoder = ZlibDecoder::new(body).take(MAX_INFLATED_STREAM_BYTES + 1);
    let _ = decoder.read_to_end(&mut out);
    if out.len() as u64 > MAX_INFLATED_STREAM_BYTES {
        return Err(IngestError::CorruptDocument(
            "compressed stream expands past the size limit".into(),
        ));
    }
    Ok(out)
}

fn skip_literal_string(bytes: &[u8], open: usize) -> Result<usize, IngestError> {
    let mut parens = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' => {
                parens += 1;
                if parens > MAX_SYNTAX_DEPTH {
                    return Err(too_deep());
                }
            }
            b')' => {
                parens -= 1;
                if parens == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(bytes.len())
}

/// Inline image data runs from `ID` to a whitespace-delimited `EI`.
fn skip_inline_image(bytes: &[u8], from: usize) -> usize {
    let mut at = from;
    while let Some(pos) = find(bytes, at, b"EI") {
        let before_ok = pos > 0 && is_whitespace(bytes[pos - 1]);
        let after_ok = bytes.get(pos + 2).map_or(true, |c| !is_regular(*c));
        if before_ok && after_ok {
            return pos + 2;
        }
        at = pos + 2;
    }
    bytes.len()
}

fn skip_stream_eol(bytes: &[u8], from: usize) -> usize {
    match (bytes.get(from), bytes.get(from + 1)) {
        (Some(b'\r'), Some(b'\n')) => from + 2,
        (Some(b'\r' | b'\n'), _) => from + 1,
        _ => from,
    }
}

fn skip_line(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|c| *c == b'\n' || *c == b'\r')
        .map_or(bytes.len(), |p| from + p + 1)
}

fn skip_past(bytes: &[u8], from: usize, stop: u8) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|c| *c == stop)
        .map_or(bytes.len(), |p| from + p + 1)
}

fn skip_token(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|c| !is_regular(*c))
        .map_or(bytes.len(), |p| from + p)
}

/// Resolve `#xx` escapes so `/Obj#53tm` compares equal to `/ObjStm`.
fn decode_name_escapes(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' {
            let hex = raw
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(byte) = hex {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(raw[i]);
        i += 1;
    }
    out
}

fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, 0, needle).is_some()
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b'\0' | b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_delimiter(c: u8) -> bool {
    matches!(c, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

fn is_regular(c: u8) -> bool {
    !is_whitespace(c) && !is_delimiter(c)
}

fn too_deep() -> IngestError {
    IngestError::CorruptDocument("nesting too deep".into())
}
