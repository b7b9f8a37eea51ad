//! Outbound status-change notification seam.
//!
//! The core never talks to mail or push providers directly; adjudication
//! hands the transition to a `TransitionNotifier` and treats delivery
//! failure as non-fatal.

use scholarpass_types::{UserId, VerificationId, VerificationStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Receives committed status transitions.
pub trait TransitionNotifier {
    fn status_changed(
        &self,
        user_id: &UserId,
        verification_id: &VerificationId,
        previous: VerificationStatus,
        new: VerificationStatus,
    ) -> Result<(), NotifyError>;
}

/// Discards every notification. The default wiring for tests and for
/// deployments without an outbound channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl TransitionNotifier for NullNotifier {
    fn status_changed(
        &self,
        _user_id: &UserId,
        _verification_id: &VerificationId,
        _previous: VerificationStatus,
        _new: VerificationStatus,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
