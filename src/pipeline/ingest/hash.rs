use base64::Engine;
use sha2::{Digest, Sha256};

/// SHA-256 content hash, base64-encoded. A pure function of the bytes, used
/// for dedup and audit logging only.
pub fn compute_content_hash(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    base64::engine::general_purpose::STANDARD.encode(hash)
}
