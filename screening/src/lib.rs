//! Content fingerprinting and upload screening.
//!
//! Everything here is a pure, bounded-time function over the uploaded
//! bytes: digest computation, structural validation against the declared
//! mime type, malicious-content screening, filename sanitization, and
//! deterministic storage-path layout. Nothing in this crate persists or
//! performs I/O.

pub mod error;
pub mod filename;
pub mod hash;
pub mod malicious;
pub mod storage_path;
pub mod validate;

pub use error::{FileErrorCode, ScreeningError};
pub use filename::sanitize_file_name;
pub use hash::{digest_file, hash_sensitive, sha256, sha256_multi};
pub use malicious::check_for_malicious_content;
pub use storage_path::{extension_for_mime, generate_storage_path};
pub use validate::validate_file;
