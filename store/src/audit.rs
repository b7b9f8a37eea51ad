//! Append-only audit log storage trait.

use crate::StoreError;
use scholarpass_types::{ActorRole, Timestamp, UserId, VerificationStatus};
use serde::{Deserialize, Serialize};

/// One administrative action attempt, success or failure. Entries are
/// written exactly once and never updated or deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub actor_id: UserId,
    pub actor_email: String,
    pub actor_role: ActorRole,
    pub actor_ip: String,
    pub actor_user_agent: String,
    /// What kind of entity was acted on (e.g. "verification", "document").
    pub target_type: String,
    pub target_id: String,
    /// The owner of the target, when the target was resolved.
    pub target_user_id: Option<UserId>,
    /// Stable action name (e.g. "APPROVE", "ASSIGN").
    pub action: String,
    pub previous_status: Option<VerificationStatus>,
    /// `None` when the attempt failed before producing a new status.
    pub new_status: Option<VerificationStatus>,
    /// Free-form action payload: reason, requested documents, assignee.
    pub action_details: serde_json::Value,
    pub session_id: String,
    pub request_id: String,
    pub duration_ms: u64,
    pub timestamp: Timestamp,
}

/// Trait for audit log storage. Append-only by construction: there is no
/// update or delete operation.
pub trait AuditStore {
    fn append_audit(&self, entry: &AuditLogEntry) -> Result<(), StoreError>;

    /// Entries for a target, in append order.
    fn audit_for_target(&self, target_id: &str) -> Result<Vec<AuditLogEntry>, StoreError>;
}
