//! Audit recording and reviewer notes.
//!
//! The audit trail is best-effort by construction: a failed append is
//! logged and swallowed so that bookkeeping trouble can never block or
//! roll back the operation being recorded.

use std::sync::Arc;

use crate::error::VerificationError;
use scholarpass_store::audit::{AuditLogEntry, AuditStore};
use scholarpass_store::note::{NoteStore, NoteType, NoteVisibility, ReviewNote};
use scholarpass_types::{ActorRole, Clock, UserId, VerificationId};

/// Who is performing an operation, as captured at the request boundary.
#[derive(Clone, Debug)]
pub struct ActorContext {
    pub actor_id: UserId,
    pub actor_email: Option<String>,
    pub actor_role: ActorRole,
    pub actor_ip: Option<String>,
    pub actor_user_agent: Option<String>,
    pub session_id: Option<String>,
    pub request_id: Option<String>,
}

impl ActorContext {
    /// A bare system actor, for scheduled and internal operations.
    pub fn system() -> Self {
        Self {
            actor_id: UserId::new("system"),
            actor_email: None,
            actor_role: ActorRole::System,
            actor_ip: None,
            actor_user_agent: None,
            session_id: None,
            request_id: None,
        }
    }
}

/// Appends audit entries, swallowing storage failures.
pub struct AuditRecorder<S> {
    store: Arc<S>,
}

impl<S: AuditStore> AuditRecorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Append an entry. Failures are logged, never surfaced.
    pub fn record(&self, entry: AuditLogEntry) {
        if let Err(e) = self.store.append_audit(&entry) {
            tracing::warn!(
                action = %entry.action,
                target_id = %entry.target_id,
                error = %e,
                "failed to append audit log entry"
            );
        }
    }
}

/// Reviewer-facing notes attached to a verification record.
pub struct NoteService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> NoteService<S, C>
where
    S: NoteStore,
    C: Clock,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn create_note(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
        note_type: NoteType,
        visibility: NoteVisibility,
        body: &str,
    ) -> Result<ReviewNote, VerificationError> {
        if !ctx.actor_role.can_adjudicate() {
            return Err(VerificationError::NotAuthorized);
        }
        let body = body.trim();
        if body.is_empty() {
            return Err(VerificationError::Validation("note body is empty".into()));
        }
        let note = ReviewNote {
            verification_id: verification_id.clone(),
            author_id: ctx.actor_id.clone(),
            author_email: ctx.actor_email.clone().unwrap_or_default(),
            note_type,
            visibility,
            body: body.to_owned(),
            created_at: self.clock.now(),
        };
        self.store.add_note(&note)?;
        Ok(note)
    }

    pub fn notes_for_verification(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
    ) -> Result<Vec<ReviewNote>, VerificationError> {
        if !ctx.actor_role.can_adjudicate() {
            return Err(VerificationError::NotAuthorized);
        }
        Ok(self.store.notes_for_verification(verification_id)?)
    }
}
