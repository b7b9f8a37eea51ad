//! SHA-256 hashing for document content and sensitive applicant fields.

use scholarpass_types::ContentDigest;
use sha2::{Digest, Sha256};

/// Compute a SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Fingerprint uploaded file content for identity and duplicate detection.
pub fn digest_file(data: &[u8]) -> ContentDigest {
    ContentDigest::new(sha256(data))
}

/// Hash a sensitive applicant field (phone, student id) for storage.
/// The raw value is never compared; only hex digests are.
pub fn hash_sensitive(value: &str) -> String {
    hex::encode(sha256(value.trim().as_bytes()))
}
