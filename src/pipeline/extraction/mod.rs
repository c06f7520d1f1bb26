pub mod orchestrator;
pub mod pdf;
pub mod sanitize;
pub mod types;

pub use orchestrator::*;
pub use pdf::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("OCR processing failed: {0}")]
    Ocr(String),
}
