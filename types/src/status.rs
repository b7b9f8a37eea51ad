//! The verification record status enum and its lifecycle predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The adjudication status of a verification record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Created by the student; still being filled in.
    Draft,
    /// Submitted by the student; awaiting admin review.
    Pending,
    /// Adjudicated as a verified student.
    Approved,
    /// Adjudicated as rejected; re-application gated by cooldown.
    Rejected,
    /// Admin requested additional documents; editable by the student again.
    NeedsMoreInfo,
    /// Approval temporarily withdrawn pending further review.
    Suspended,
    /// Escalated for manual investigation.
    UnderInvestigation,
    /// Approval permanently withdrawn after the fact.
    Revoked,
    /// Banned from the platform; no re-application.
    PermanentlyBanned,
    /// Stale draft auto-closed at the next creation attempt.
    Abandoned,
}

impl VerificationStatus {
    /// Whether this status closes the record for good. A user may create a
    /// new record only when their latest record is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Revoked | Self::PermanentlyBanned | Self::Abandoned
        )
    }

    /// Whether the owning student may still edit fields and upload documents.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::NeedsMoreInfo)
    }

    /// Whether the record is sitting in an admin queue.
    pub fn is_under_review(&self) -> bool {
        matches!(self, Self::Pending | Self::UnderInvestigation)
    }

    /// Stable wire name, also used as the audit-log status string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::NeedsMoreInfo => "NEEDS_MORE_INFO",
            Self::Suspended => "SUSPENDED",
            Self::UnderInvestigation => "UNDER_INVESTIGATION",
            Self::Revoked => "REVOKED",
            Self::PermanentlyBanned => "PERMANENTLY_BANNED",
            Self::Abandoned => "ABANDONED",
        }
    }

    /// Every status, in lifecycle order. Handy for exhaustive tests.
    pub fn all() -> [Self; 10] {
        [
            Self::Draft,
            Self::Pending,
            Self::Approved,
            Self::Rejected,
            Self::NeedsMoreInfo,
            Self::Suspended,
            Self::UnderInvestigation,
            Self::Revoked,
            Self::PermanentlyBanned,
            Self::Abandoned,
        ]
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
