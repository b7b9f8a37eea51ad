//! Administrative adjudication of verification records.
//!
//! Every attempt — legal or not, authorized or not — leaves an audit
//! entry. The status write itself is version-gated, so two reviewers
//! racing on the same record produce one success and one conflict.

use std::sync::Arc;
use std::time::Instant;

use crate::action::AdminAction;
use crate::audit::{ActorContext, AuditRecorder};
use crate::error::VerificationError;
use crate::notify::TransitionNotifier;
use crate::transition::apply_transition;
use scholarpass_store::audit::{AuditLogEntry, AuditStore};
use scholarpass_store::risk::{RiskFlag, RiskFlagStore, RiskFlagType};
use scholarpass_store::verification::{VerificationRecord, VerificationStore};
use scholarpass_types::{
    Clock, Timestamp, UserId, VerificationId, VerificationParams, VerificationStatus,
};

pub struct AdminService<S, C, N> {
    store: Arc<S>,
    audit: AuditRecorder<S>,
    params: VerificationParams,
    clock: Arc<C>,
    notifier: N,
}

impl<S, C, N> AdminService<S, C, N>
where
    S: VerificationStore + AuditStore + RiskFlagStore,
    C: Clock,
    N: TransitionNotifier,
{
    pub fn new(store: Arc<S>, params: VerificationParams, clock: Arc<C>, notifier: N) -> Self {
        Self {
            audit: AuditRecorder::new(store.clone()),
            store,
            params,
            clock,
            notifier,
        }
    }

    /// Apply an adjudication action to a record at a known version.
    ///
    /// The audit entry is written whether or not the action succeeds;
    /// notification happens only after a committed status change.
    pub fn handle_action(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
        expected_version: u64,
        action: &AdminAction,
    ) -> Result<VerificationRecord, VerificationError> {
        let started = Instant::now();
        let now = self.clock.now();

        let mut previous_status = None;
        let mut target_user = None;
        let result = self.try_apply(
            ctx,
            verification_id,
            expected_version,
            action,
            now,
            &mut previous_status,
            &mut target_user,
        );

        self.audit.record(self.entry(
            ctx,
            verification_id,
            action.name(),
            action.details(),
            previous_status,
            result.as_ref().ok().map(|r| r.status),
            target_user,
            started,
            now,
        ));

        if let Ok(record) = &result {
            tracing::info!(
                verification_id = %verification_id,
                action = action.name(),
                new_status = %record.status,
                "verification adjudicated"
            );
            if let Some(previous) = previous_status {
                if let Err(e) = self.notifier.status_changed(
                    &record.user_id,
                    verification_id,
                    previous,
                    record.status,
                ) {
                    tracing::warn!(
                        verification_id = %verification_id,
                        error = %e,
                        "status-change notification failed"
                    );
                }
            }
        }
        result
    }

    /// Assign a record to a reviewer. Does not change status, but bumps
    /// the version so assignment races surface as conflicts too.
    pub fn assign_verification(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
        expected_version: u64,
        assignee: &UserId,
    ) -> Result<VerificationRecord, VerificationError> {
        let started = Instant::now();
        let now = self.clock.now();

        let mut status = None;
        let mut target_user = None;
        let result = (|| {
            if !ctx.actor_role.can_adjudicate() {
                return Err(VerificationError::NotAuthorized);
            }
            let mut record = self.store.get_record(verification_id)?;
            status = Some(record.status);
            target_user = Some(record.user_id.clone());

            record.assigned_to = Some(assignee.clone());
            record.updated_at = now;
            record.version = expected_version + 1;
            self.store.update_record(&record, expected_version)?;
            Ok(record)
        })();

        self.audit.record(self.entry(
            ctx,
            verification_id,
            "ASSIGN",
            serde_json::json!({ "assignee": assignee }),
            status,
            result.as_ref().ok().map(|r| r.status),
            target_user,
            started,
            now,
        ));
        result
    }

    /// Raise a manual advisory flag on a record. Flags never block or fail
    /// anything: the record must exist and the actor must be a reviewer,
    /// but a failed flag write is logged and swallowed.
    pub fn flag_verification(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
    ) -> Result<(), VerificationError> {
        if !ctx.actor_role.can_adjudicate() {
            return Err(VerificationError::NotAuthorized);
        }
        self.store.get_record(verification_id)?;

        let flag = RiskFlag {
            verification_id: verification_id.clone(),
            flag_type: RiskFlagType::Manual,
            raised_by: ctx.actor_id.clone(),
            raised_at: self.clock.now(),
        };
        if let Err(e) = self.store.add_flag(&flag) {
            tracing::warn!(
                verification_id = %verification_id,
                error = %e,
                "failed to record manual risk flag"
            );
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn try_apply(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
        expected_version: u64,
        action: &AdminAction,
        now: Timestamp,
        previous_status: &mut Option<VerificationStatus>,
        target_user: &mut Option<UserId>,
    ) -> Result<VerificationRecord, VerificationError> {
        if !ctx.actor_role.can_adjudicate() {
            return Err(VerificationError::NotAuthorized);
        }
        let mut record = self.store.get_record(verification_id)?;
        *previous_status = Some(record.status);
        *target_user = Some(record.user_id.clone());

        let outcome = apply_transition(record.status, action, now, &self.params)?;
        record.status = outcome.new_status;
        if outcome.reapply_eligible_at.is_some() {
            record.reapply_eligible_at = outcome.reapply_eligible_at;
        }
        record.updated_at = now;
        record.version = expected_version + 1;
        self.store.update_record(&record, expected_version)?;
        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    fn entry(
        &self,
        ctx: &ActorContext,
        verification_id: &VerificationId,
        action: &str,
        details: serde_json::Value,
        previous_status: Option<VerificationStatus>,
        new_status: Option<VerificationStatus>,
        target_user_id: Option<UserId>,
        started: Instant,
        now: Timestamp,
    ) -> AuditLogEntry {
        AuditLogEntry {
            actor_id: ctx.actor_id.clone(),
            actor_email: ctx.actor_email.clone().unwrap_or_default(),
            actor_role: ctx.actor_role,
            actor_ip: ctx.actor_ip.clone().unwrap_or_default(),
            actor_user_agent: ctx.actor_user_agent.clone().unwrap_or_default(),
            target_type: "verification".into(),
            target_id: verification_id.to_string(),
            target_user_id,
            action: action.to_owned(),
            previous_status,
            new_status,
            action_details: details,
            session_id: ctx.session_id.clone().unwrap_or_default(),
            request_id: ctx.request_id.clone().unwrap_or_default(),
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: now,
        }
    }
}
