//! The status transition engine.
//!
//! A pure legality check plus the Reject cooldown side effect. The engine
//! does not load, persist, or log anything — the admin service owns those
//! steps, which keeps this module trivially testable.

use crate::action::AdminAction;
use crate::error::VerificationError;
use scholarpass_types::{Timestamp, VerificationParams, VerificationStatus};

/// What a legal transition produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub new_status: VerificationStatus,
    /// Set only for Reject: when re-application becomes legal again.
    pub reapply_eligible_at: Option<Timestamp>,
}

/// Check that `action` is legal from `current` and return the target
/// status. A request whose target equals the current status is rejected —
/// a no-op transition appearing to succeed would let a duplicate-processing
/// race look like two successes.
pub fn check_transition(
    current: VerificationStatus,
    action: &AdminAction,
) -> Result<VerificationStatus, VerificationError> {
    use AdminAction as A;
    use VerificationStatus as S;

    let target = action.target_status();
    if target == current {
        return Err(VerificationError::NoOpTransition(current));
    }

    let legal = match current {
        S::Pending => matches!(
            action,
            A::Approve | A::Reject { .. } | A::RequestMoreInfo { .. } | A::Suspend { .. } | A::Investigate
        ),
        S::NeedsMoreInfo => matches!(
            action,
            A::Approve | A::Reject { .. } | A::Suspend { .. } | A::Investigate
        ),
        S::UnderInvestigation => matches!(
            action,
            A::Approve | A::Reject { .. } | A::Suspend { .. } | A::Ban { .. }
        ),
        S::Approved => matches!(action, A::Suspend { .. } | A::Revoke { .. } | A::Ban { .. }),
        S::Suspended => matches!(action, A::LiftSuspension | A::Ban { .. }),
        // Drafts are adjudicated only after the student submits; terminal
        // states accept nothing.
        S::Draft | S::Rejected | S::Revoked | S::PermanentlyBanned | S::Abandoned => false,
    };

    if legal {
        Ok(target)
    } else {
        Err(VerificationError::IllegalTransition {
            action: action.name(),
            from: current,
        })
    }
}

/// Validate the action payload, check legality, and compute side effects.
pub fn apply_transition(
    current: VerificationStatus,
    action: &AdminAction,
    now: Timestamp,
    params: &VerificationParams,
) -> Result<TransitionOutcome, VerificationError> {
    action.validate_payload()?;
    let new_status = check_transition(current, action)?;

    let reapply_eligible_at = matches!(action, AdminAction::Reject { .. })
        .then(|| now.add_secs(params.reapply_cooldown_secs));

    Ok(TransitionOutcome {
        new_status,
        reapply_eligible_at,
    })
}
