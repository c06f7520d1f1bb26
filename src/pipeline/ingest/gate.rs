use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::format::{is_pdf, sanitize_filename, sniff_mime};
use super::hash::compute_content_hash;
use super::rate::UploadRateLimiter;
use super::scan::scan_staged_pdf;
use super::staging::StagedFile;
use super::IngestError;

/// One upload as received from the outer surface.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub declared_size: u64,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            filename: filename.into(),
            declared_size,
            bytes,
        }
    }
}

/// Position of a document in the gate state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Received,
    RateChecked,
    TypeValidated,
    HashComputed,
    SizeChecked,
    ContentScanned,
    Accepted,
    Rejected,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::RateChecked => "rate_checked",
            Self::TypeValidated => "type_validated",
            Self::HashComputed => "hash_computed",
            Self::SizeChecked => "size_checked",
            Self::ContentScanned => "content_scanned",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// An upload under inspection. Only the gate mutates it; the staged temp
/// copy is released when the document is dropped.
#[derive(Debug)]
struct Document {
    bytes: Vec<u8>,
    filename: String,
    declared_size: u64,
    content_hash: Option<String>,
    mime_validated: bool,
    state: GateState,
    staged: StagedFile,
}

impl Document {
    fn receive(upload: Upload, staging_dir: Option<&Path>) -> Result<Self, IngestError> {
        let staged = match staging_dir {
            Some(dir) => StagedFile::stage_in(dir, &upload.bytes)?,
            None => StagedFile::stage(&upload.bytes)?,
        };
        Ok(Self {
            filename: sanitize_filename(&upload.filename),
            declared_size: upload.declared_size,
            bytes: upload.bytes,
            content_hash: None,
            mime_validated: false,
            state: GateState::Received,
            staged,
        })
    }

    fn advance(&mut self, next: GateState) {
        tracing::debug!(filename = %self.filename, from = %self.state, to = %next, "Gate transition");
        self.state = next;
    }
}

/// A document that reached `Accepted`. Only the gate can construct one, so
/// nothing downstream can parse an upload that skipped a check.
#[derive(Debug)]
pub struct AcceptedDocument {
    document: Document,
    content_hash: String,
}

impl AcceptedDocument {
    pub fn bytes(&self) -> &[u8] {
        &self.document.bytes
    }

    pub fn filename(&self) -> &str {
        &self.document.filename
    }

    pub fn size(&self) -> u64 {
        self.document.bytes.len() as u64
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn staged_path(&self) -> PathBuf {
        self.document.staged.path().to_path_buf()
    }
}

/// The ingestion gate. Holds the injected shared rate limiter and the
/// upload ceiling; otherwise stateless across requests.
#[derive(Debug, Clone)]
pub struct IngestionGate {
    rate_limiter: Arc<UploadRateLimiter>,
    max_upload_bytes: u64,
    staging_dir: Option<PathBuf>,
}

impl IngestionGate {
    pub fn new(rate_limiter: Arc<UploadRateLimiter>, max_upload_bytes: u64) -> Self {
        Self {
            rate_limiter,
            max_upload_bytes,
            staging_dir: None,
        }
    }

    /// Stage uploads under `dir` instead of the system temp directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn rate_limiter(&self) -> &Arc<UploadRateLimiter> {
        &self.rate_limiter
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Run every check in order. On rejection the document (and its staged
    /// copy) is dropped before the error is returned.
    pub fn admit(&self, upload: Upload) -> Result<AcceptedDocument, IngestError> {
        let mut document = Document::receive(upload, self.staging_dir.as_deref())?;

        match self.run_checks(&mut document) {
            Ok(content_hash) => {
                document.advance(GateState::Accepted);
                tracing::info!(
                    filename = %document.filename,
                    content_hash = %content_hash,
                    size = document.bytes.len(),
                    "Upload accepted"
                );
                Ok(AcceptedDocument {
                    document,
                    content_hash,
                })
            }
            Err(e) => {
                let failed_after = document.state;
                document.advance(GateState::Rejected);
                tracing::warn!(
                    filename = %document.filename,
                    failed_after = %failed_after,
                    mime_validated = document.mime_validated,
                    content_hash = document.content_hash.as_deref().unwrap_or("-"),
                    error = %e,
                    "Upload rejected"
                );
                Err(e)
            }
        }
    }

    fn run_checks(&self, document: &mut Document) -> Result<String, IngestError> {
        self.rate_limiter.check()?;
        document.advance(GateState::RateChecked);

        if !is_pdf(&document.bytes) {
            return Err(IngestError::InvalidFormat {
                detected: sniff_mime(&document.bytes),
            });
        }
        document.mime_validated = true;
        document.advance(GateState::TypeValidated);

        let content_hash = compute_content_hash(&document.bytes);
        tracing::info!(filename = %document.filename, content_hash = %content_hash, "Upload hashed");
        document.content_hash = Some(content_hash.clone());
        document.advance(GateState::HashComputed);

        let size = document.declared_size.max(document.bytes.len() as u64);
        if size > self.max_upload_bytes {
            return Err(IngestError::OversizeError {
                size,
                max: self.max_upload_bytes,
            });
        }
        document.advance(GateState::SizeChecked);

        scan_staged_pdf(document.staged.path())?;
        document.advance(GateState::ContentScanned);

        Ok(content_hash)
    }
}
