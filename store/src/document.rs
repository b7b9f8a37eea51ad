//! Document metadata storage trait.

use crate::StoreError;
use scholarpass_types::{
    ContentDigest, DocumentId, DocumentType, Timestamp, UserId, VerificationId,
};
use serde::{Deserialize, Serialize};

/// Metadata for one accepted supporting document. Immutable once created
/// except for `is_verified`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: DocumentId,
    pub verification_id: VerificationId,
    pub owner_user_id: UserId,
    pub document_type: DocumentType,
    /// Object-storage key; a signed access URL is minted by the external
    /// storage collaborator, never stored here.
    pub storage_path: String,
    /// Sanitized client filename, for display only.
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub sha256_digest: ContentDigest,
    /// Set by later human/automated review.
    pub is_verified: bool,
    pub created_at: Timestamp,
}

/// Trait for document metadata storage.
pub trait DocumentStore {
    /// Insert a document row. Fails with `Duplicate` if the id exists.
    fn insert_document(&self, document: &DocumentRecord) -> Result<(), StoreError>;

    /// Load a document by id.
    fn get_document(&self, id: &DocumentId) -> Result<DocumentRecord, StoreError>;

    /// All documents under a verification record, oldest first.
    fn documents_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<DocumentRecord>, StoreError>;

    /// Whether any sibling document under the record shares this digest.
    fn digest_exists(
        &self,
        verification_id: &VerificationId,
        digest: &ContentDigest,
    ) -> Result<bool, StoreError>;

    /// Flip the one mutable document field.
    fn set_document_verified(&self, id: &DocumentId, verified: bool) -> Result<(), StoreError>;
}
