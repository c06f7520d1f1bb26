//! Active-content scan over the PDF object graph.
//!
//! The raw bytes pass [`check_structure`] before lopdf parses them. Every
//! indirect object plus the trailer is walked, including inline
//! dictionaries and arrays. References are not followed: each referenced
//! object is visited on its own as part of `Document::objects`.

use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use super::structure::check_structure;
use super::IngestError;

/// Inline nesting deeper than this is not inspected further.
const MAX_NESTING: usize = 64;

/// Kinds of active or embedded content that reject an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveContent {
    JavaScript,
    LaunchAction,
    EmbeddedFiles,
}

impl ActiveContent {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::JavaScript => "PDF contains JavaScript, which could be malicious.",
            Self::LaunchAction => "PDF contains a launch action, which could be malicious.",
            Self::EmbeddedFiles => "PDF contains embedded files, which could be malicious.",
        }
    }
}

/// Parse the staged PDF and reject it if it carries active content.
pub fn scan_staged_pdf(path: &Path) -> Result<(), IngestError> {
    let bytes = std::fs::read(path)?;
    check_structure(&bytes)?;

    let document =
        Document::load_mem(&bytes).map_err(|e| IngestError::CorruptDocument(e.to_string()))?;

    if document.get_pages().is_empty() {
        return Err(IngestError::CorruptDocument("document has no pages".into()));
    }

    match find_active_content(&document) {
        Some(found) => {
            tracing::warn!(kind = ?found, "Active content found in upload");
            Err(IngestError::MaliciousContentDetected(found.reason().to_string()))
        }
        None => Ok(()),
    }
}

/// First active-content marker anywhere in the document, if any.
pub fn find_active_content(document: &Document) -> Option<ActiveContent> {
    inspect_dictionary(&document.trailer, 0).or_else(|| {
        document
            .objects
            .values()
            .find_map(|object| inspect_object(object, 0))
    })
}

fn inspect_object(object: &Object, depth: usize) -> Option<ActiveContent> {
    match object {
        Object::Dictionary(dict) => inspect_dictionary(dict, depth),
        Object::Stream(stream) => inspect_dictionary(&stream.dict, depth),
        Object::Array(items) if depth < MAX_NESTING => {
            items.iter().find_map(|item| inspect_object(item, depth + 1))
        }
        _ => None,
    }
}

fn inspect_dictionary(dict: &Dictionary, depth: usize) -> Option<ActiveContent> {
    if depth >= MAX_NESTING {
        return None;
    }

    for (key, value) in dict.iter() {
        let found = match (key.as_slice(), value) {
            (b"JavaScript" | b"JS", _) => Some(ActiveContent::JavaScript),
            (b"EmbeddedFiles", _) => Some(ActiveContent::EmbeddedFiles),
            (b"S", Object::Name(action)) => match action.as_slice() {
                b"JavaScript" => Some(ActiveContent::JavaScript),
                b"Launch" => Some(ActiveContent::LaunchAction),
                _ => None,
            },
            (b"Type", Object::Name(kind)) if kind.as_slice() == b"EmbeddedFile" => {
                Some(ActiveContent::EmbeddedFiles)
            }
            _ => inspect_object(value, depth + 1),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{
        pdf_with_embedded_file, pdf_with_javascript, pdf_with_launch_action, text_pdf,
    };

    fn stage(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, bytes).unwrap();
        file
    }

    #[test]
    fn clean_pdf_passes() {
        let file = stage(&text_pdf(&["Gallia est omnis divisa in partes tres"]));
        assert!(scan_staged_pdf(file.path()).is_ok());
    }

    #[test]
    fn javascript_open_action_rejected() {
        let file = stage(&pdf_with_javascript());
        match scan_staged_pdf(file.path()) {
            Err(IngestError::MaliciousContentDetected(reason)) => {
                assert!(reason.contains("JavaScript"))
            }
            other => panic!("expected malicious content, got {other:?}"),
        }
    }

    #[test]
    fn embedded_files_rejected() {
        let file = stage(&pdf_with_embedded_file());
        match scan_staged_pdf(file.path()) {
            Err(IngestError::MaliciousContentDetected(reason)) => {
                assert!(reason.contains("embedded files"))
            }
            other => panic!("expected malicious content, got {other:?}"),
        }
    }

    #[test]
    fn launch_action_rejected() {
        let file = stage(&pdf_with_launch_action());
        assert!(matches!(
            scan_staged_pdf(file.path()),
            Err(IngestError::MaliciousContentDetected(_))
        ));
    }

    #[test]
    fn truncated_pdf_is_corrupt() {
        let file = stage(b"%PDF-1.4\n1 0 obj << /Type /Catalog");
        assert!(matches!(
            scan_staged_pdf(file.path()),
            Err(IngestError::CorruptDocument(_))
        ));
    }

    #[test]
    fn deeply_nested_page_is_corrupt_not_fatal() {
        let depth = 30_000;
        let mut bytes = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec();
        bytes.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");
        bytes.extend_from_slice(b"3 0 obj\n<< /Type /Page /Parent 2 0 R /X ");
        bytes.extend_from_slice("[".repeat(depth).as_bytes());
        bytes.extend_from_slice("]".repeat(depth).as_bytes());
        bytes.extend_from_slice(b" >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n");
        let file = stage(&bytes);

        // Same stack size as a tokio blocking thread.
        let result = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || scan_staged_pdf(file.path()))
            .unwrap()
            .join()
            .unwrap();

        match result {
            Err(IngestError::CorruptDocument(reason)) => assert!(reason.contains("nesting")),
            other => panic!("expected corrupt document, got {other:?}"),
        }
    }

    #[test]
    fn nested_inline_javascript_found() {
        let mut inner = Dictionary::new();
        inner.set("JS", Object::string_literal("app.alert(1)"));
        let mut outer = Dictionary::new();
        outer.set("AA", Object::Array(vec![Object::Dictionary(inner)]));

        assert_eq!(inspect_dictionary(&outer, 0), Some(ActiveContent::JavaScript));
    }
}
