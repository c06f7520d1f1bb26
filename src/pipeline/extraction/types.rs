use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::pipeline::ingest::AcceptedDocument;

/// Extracted text of one page. Never mutated after extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub text: String,
}

/// How the text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
    /// No text layer and no usable OCR output.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub method: ExtractionMethod,
    pub pages: Vec<Page>,
    pub full_text: String,
    pub has_text_layer: bool,
    /// Pages in the source document, independent of how the text was obtained.
    pub page_count: usize,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Text-layer extraction abstraction (allows mocking for tests)
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, ExtractionError>;
}

/// OCR collaborator: bytes in, text out. Its internals are not our concern.
pub trait OcrEngine {
    fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Main extraction trait. Only a gate-approved document can be passed in.
pub trait TextExtractor {
    fn extract(&self, document: &AcceptedDocument) -> Result<ExtractionResult, ExtractionError>;
}
