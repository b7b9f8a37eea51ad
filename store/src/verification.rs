//! Verification record storage trait.

use crate::StoreError;
use scholarpass_types::{
    ApplicantProfile, Timestamp, UserId, VerificationId, VerificationStatus,
};
use serde::{Deserialize, Serialize};

/// A student's verification submission and its adjudication state.
///
/// Records are never physically deleted; terminal records are retained for
/// audit and cooldown enforcement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub verification_id: VerificationId,
    pub user_id: UserId,
    pub status: VerificationStatus,
    pub profile: ApplicantProfile,
    /// SHA-256 hex of the phone number, stored alongside the raw value.
    /// Never included in external projections.
    pub phone_hash: String,
    /// SHA-256 hex of the student id. Same handling as `phone_hash`.
    pub student_id_hash: String,
    /// Reviewer this record is assigned to, if any.
    pub assigned_to: Option<UserId>,
    /// Optimistic-concurrency token. Starts at 0; every successful write
    /// bumps it by exactly one.
    pub version: u64,
    /// Set only when rejected: the instant re-application becomes legal.
    pub reapply_eligible_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for verification record storage.
pub trait VerificationStore {
    /// Insert a fresh record. Fails with `Duplicate` if the id exists.
    fn insert_record(&self, record: &VerificationRecord) -> Result<(), StoreError>;

    /// Load a record by id.
    fn get_record(&self, id: &VerificationId) -> Result<VerificationRecord, StoreError>;

    /// Persist `record` only if the stored version still equals
    /// `expected_version`; the caller bumps `record.version` before the
    /// write. The comparison and the write are atomic — a lost race
    /// returns `VersionConflict`, never a silent merge.
    fn update_record(
        &self,
        record: &VerificationRecord,
        expected_version: u64,
    ) -> Result<(), StoreError>;

    /// The user's most recently created record, if any.
    fn latest_for_user(&self, user_id: &UserId) -> Result<Option<VerificationRecord>, StoreError>;

    /// Every record the user has ever created, oldest first.
    fn records_for_user(&self, user_id: &UserId) -> Result<Vec<VerificationRecord>, StoreError>;
}
