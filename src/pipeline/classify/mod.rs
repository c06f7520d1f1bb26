//! Per-segment language classification by committee.
//!
//! Independent classifiers vote concurrently ([`ensemble`]); the
//! [`consensus`] resolver turns the votes into one label with a discrete
//! confidence.

pub mod consensus;
pub mod ensemble;
pub mod keyword;
pub mod models;
pub mod samples;
pub mod script;
pub mod trigram;
pub mod types;

pub use consensus::*;
pub use ensemble::*;
pub use keyword::KeywordClassifier;
pub use models::*;
pub use script::ScriptClassifier;
pub use trigram::TrigramClassifier;
pub use types::*;
