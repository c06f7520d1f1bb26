//! Ingestion gate: the ordered validation state machine every upload must
//! pass before any parser touches it.
//!
//! `Received → RateChecked → TypeValidated → HashComputed → SizeChecked →
//! ContentScanned → Accepted`, any failure is terminal for the request.

pub mod format;
pub mod gate;
pub mod hash;
pub mod rate;
pub mod scan;
pub mod staging;
pub mod structure;

pub use format::*;
pub use gate::*;
pub use hash::*;
pub use rate::*;
pub use scan::*;
pub use staging::*;
pub use structure::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Not a PDF document (content looks like {detected})")]
    InvalidFormat { detected: &'static str },

    #[error("File too large: {size} bytes exceeds {max} byte limit")]
    OversizeError { size: u64, max: u64 },

    #[error("Potentially malicious content: {0}")]
    MaliciousContentDetected(String),

    #[error("Invalid or corrupted PDF: {0}")]
    CorruptDocument(String),

    #[error("Could not stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("Rate limiter lock poisoned")]
    LockPoisoned,
}
