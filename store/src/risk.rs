//! Advisory risk flag storage trait.

use crate::StoreError;
use scholarpass_types::{Timestamp, UserId, VerificationId};
use serde::{Deserialize, Serialize};

/// Why a flag was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlagType {
    /// A sibling document with identical content already exists.
    DuplicateDocument,
    /// Raised by a human reviewer.
    Manual,
}

/// A non-blocking advisory marker attached to a verification record for
/// human review. Additive only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskFlag {
    pub verification_id: VerificationId,
    pub flag_type: RiskFlagType,
    pub raised_by: UserId,
    pub raised_at: Timestamp,
}

/// Trait for risk flag storage.
pub trait RiskFlagStore {
    fn add_flag(&self, flag: &RiskFlag) -> Result<(), StoreError>;

    fn flags_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<RiskFlag>, StoreError>;
}
