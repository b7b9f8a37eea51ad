//! The closed set of administrative actions.
//!
//! Each variant carries its own required payload, so "missing required
//! field for this action" is mostly unrepresentable; what remains (empty
//! strings, empty lists) is checked by `validate_payload`.

use crate::error::VerificationError;
use scholarpass_types::{DocumentType, Timestamp, VerificationStatus};
use serde::{Deserialize, Serialize};

/// An adjudication request against a verification record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    /// Accept the application.
    Approve,
    /// Reject with a mandatory human-readable reason.
    Reject {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason_code: Option<String>,
    },
    /// Send the record back to the student with a document wishlist.
    #[serde(rename = "NEEDS_MORE_INFO")]
    RequestMoreInfo {
        requested_documents: Vec<DocumentType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Temporarily withdraw an approval (or park a pending record).
    Suspend {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suspend_until: Option<Timestamp>,
    },
    /// Escalate for manual investigation.
    Investigate,
    /// Permanently withdraw an approval.
    Revoke { reason: String },
    /// Ban the user from the platform.
    Ban { reason: String },
    /// Return a suspended record to approved.
    LiftSuspension,
}

impl AdminAction {
    /// Stable action name, used in audit log entries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Reject { .. } => "REJECT",
            Self::RequestMoreInfo { .. } => "NEEDS_MORE_INFO",
            Self::Suspend { .. } => "SUSPEND",
            Self::Investigate => "INVESTIGATE",
            Self::Revoke { .. } => "REVOKE",
            Self::Ban { .. } => "BAN",
            Self::LiftSuspension => "LIFT_SUSPENSION",
        }
    }

    /// The status this action drives the record into.
    pub fn target_status(&self) -> VerificationStatus {
        match self {
            Self::Approve | Self::LiftSuspension => VerificationStatus::Approved,
            Self::Reject { .. } => VerificationStatus::Rejected,
            Self::RequestMoreInfo { .. } => VerificationStatus::NeedsMoreInfo,
            Self::Suspend { .. } => VerificationStatus::Suspended,
            Self::Investigate => VerificationStatus::UnderInvestigation,
            Self::Revoke { .. } => VerificationStatus::Revoked,
            Self::Ban { .. } => VerificationStatus::PermanentlyBanned,
        }
    }

    /// Check action-specific required payload fields.
    pub fn validate_payload(&self) -> Result<(), VerificationError> {
        match self {
            Self::Reject { reason, .. }
            | Self::Suspend { reason, .. }
            | Self::Revoke { reason }
            | Self::Ban { reason } => {
                if reason.trim().is_empty() {
                    return Err(VerificationError::Validation(format!(
                        "{} requires a non-empty reason",
                        self.name()
                    )));
                }
            }
            Self::RequestMoreInfo {
                requested_documents,
                ..
            } => {
                if requested_documents.is_empty() {
                    return Err(VerificationError::Validation(
                        "NEEDS_MORE_INFO requires a non-empty requested-documents list".into(),
                    ));
                }
            }
            Self::Approve | Self::Investigate | Self::LiftSuspension => {}
        }
        Ok(())
    }

    /// The action payload as JSON for the audit trail.
    pub fn details(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
