use super::sanitize::sanitize_extracted_text;
use super::types::{
    ExtractionMethod, ExtractionResult, OcrEngine, Page, PdfExtractor, TextExtractor,
};
use super::ExtractionError;
use crate::pipeline::ingest::AcceptedDocument;

/// Concrete implementation of the text extractor.
/// Uses trait objects for the text layer and the OCR collaborator,
/// enabling dependency injection.
pub struct DocumentExtractor {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    ocr_engine: Option<Box<dyn OcrEngine + Send + Sync>>,
}

impl DocumentExtractor {
    pub fn new(pdf_extractor: Box<dyn PdfExtractor + Send + Sync>) -> Self {
        Self {
            pdf_extractor,
            ocr_engine: None,
        }
    }

    /// Add an OCR collaborator for documents without a text layer.
    pub fn with_ocr_engine(mut self, ocr_engine: Box<dyn OcrEngine + Send + Sync>) -> Self {
        self.ocr_engine = Some(ocr_engine);
        self
    }

    fn ocr_fallback(&self, document: &AcceptedDocument) -> Option<String> {
        let Some(ocr) = &self.ocr_engine else {
            tracing::warn!(
                content_hash = %document.content_hash(),
                "No text layer and no OCR engine configured"
            );
            return None;
        };

        match ocr.recognize(document.bytes()) {
            Ok(text) => Some(sanitize_extracted_text(&text)),
            Err(e) => {
                tracing::warn!(content_hash = %document.content_hash(), "OCR failed: {e}");
                None
            }
        }
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, document: &AcceptedDocument) -> Result<ExtractionResult, ExtractionError> {
        tracing::info!(content_hash = %document.content_hash(), "Starting text extraction");

        let mut pages = self.pdf_extractor.extract_pages(document.bytes())?;
        for page in &mut pages {
            page.text = sanitize_extracted_text(&page.text);
        }

        let has_text_layer = pages.iter().any(|p| !p.text.trim().is_empty());
        let page_count = pages.len();

        let (method, pages, full_text) = if has_text_layer {
            let full_text = pages
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            (ExtractionMethod::TextLayer, pages, full_text)
        } else {
            // Image-only: every page is blank, OCR output replaces them.
            match self.ocr_fallback(document) {
                Some(text) if !text.trim().is_empty() => {
                    let ocr_page = Page {
                        number: 1,
                        text: text.clone(),
                    };
                    tracing::debug!(page_count, "OCR text accepted for image-only document");
                    (ExtractionMethod::Ocr, vec![ocr_page], text)
                }
                _ => (ExtractionMethod::None, pages, String::new()),
            }
        };

        tracing::info!(
            content_hash = %document.content_hash(),
            method = ?method,
            page_count,
            text_length = full_text.len(),
            "Text extraction complete"
        );

        Ok(ExtractionResult {
            method,
            pages,
            full_text,
            has_text_layer,
            page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::PdfTextExtractor;
    use crate::pipeline::ingest::{IngestionGate, Upload, UploadRateLimiter};
    use crate::pipeline::test_support::{image_only_pdf, pdf_with_pages};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedOcr(Result<&'static str, &'static str>);

    impl OcrEngine for FixedOcr {
        fn recognize(&self, _pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
            self.0
                .map(str::to_string)
                .map_err(|e| ExtractionError::Ocr(e.to_string()))
        }
    }

    fn accept(bytes: Vec<u8>) -> AcceptedDocument {
        IngestionGate::new(
            Arc::new(UploadRateLimiter::new(100, Duration::from_secs(60))),
            10 * 1024 * 1024,
        )
        .admit(Upload::new("doc.pdf", bytes))
        .unwrap()
    }

    #[test]
    fn text_layer_used_when_present() {
        let doc = accept(pdf_with_pages(&[&["Gallia est omnis"], &["divisa in partes"]]));
        let extractor = DocumentExtractor::new(Box::new(PdfTextExtractor))
            .with_ocr_engine(Box::new(FixedOcr(Ok("should not be used"))));

        let result = extractor.extract(&doc).unwrap();
        assert_eq!(result.method, ExtractionMethod::TextLayer);
        assert!(result.has_text_layer);
        assert_eq!(result.page_count(), 2);
        assert!(result.full_text.contains("Gallia"));
        assert!(result.full_text.contains("partes"));
        assert!(!result.full_text.contains("should not be used"));
    }

    #[test]
    fn image_only_delegates_to_ocr() {
        let doc = accept(image_only_pdf());
        let extractor = DocumentExtractor::new(Box::new(PdfTextExtractor))
            .with_ocr_engine(Box::new(FixedOcr(Ok("Hic liber est."))));

        let result = extractor.extract(&doc).unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert!(!result.has_text_layer);
        assert_eq!(result.full_text, "Hic liber est.");
    }

    #[test]
    fn ocr_result_keeps_source_page_count() {
        let doc = accept(pdf_with_pages(&[&[], &[], &[]]));
        let extractor = DocumentExtractor::new(Box::new(PdfTextExtractor))
            .with_ocr_engine(Box::new(FixedOcr(Ok("Tres paginae scriptae."))));

        let result = extractor.extract(&doc).unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.page_count(), 3);
    }

    #[test]
    fn image_only_without_ocr_is_empty() {
        let doc = accept(image_only_pdf());
        let result = DocumentExtractor::new(Box::new(PdfTextExtractor))
            .extract(&doc)
            .unwrap();

        assert_eq!(result.method, ExtractionMethod::None);
        assert!(result.is_empty());
    }

    #[test]
    fn ocr_failure_degrades_to_empty() {
        let doc = accept(image_only_pdf());
        let result = DocumentExtractor::new(Box::new(PdfTextExtractor))
            .with_ocr_engine(Box::new(FixedOcr(Err("engine offline"))))
            .extract(&doc)
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.method, ExtractionMethod::None);
    }
}
