use scholarpass_screening::ScreeningError;
use scholarpass_store::StoreError;
use scholarpass_types::VerificationStatus;
use thiserror::Error;

/// Coarse error classes a web layer maps to response classes
/// (4xx validation/conflict/not-found/rate-limit, 5xx internal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Conflict,
    NotFound,
    RateLimited,
    SecurityRejected,
    Authorization,
    Internal,
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("applicant age {age} is outside the allowed range {min}-{max}")]
    AgeOutOfRange { age: i32, min: i32, max: i32 },

    #[error("file rejected: {0}")]
    FileRejected(ScreeningError),

    /// The reason is the screen's generic phrasing; the matched signature
    /// is never included.
    #[error("file rejected by security screening: {reason}")]
    SecurityRejected { reason: String },

    #[error("an active verification record already exists for this user")]
    ActiveRecordExists,

    #[error("re-application cooldown active: {days_remaining} day(s) remaining")]
    CooldownActive { days_remaining: u64 },

    #[error("record was modified concurrently: expected version {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("action {action} is not allowed from status {from}")]
    IllegalTransition {
        action: &'static str,
        from: VerificationStatus,
    },

    #[error("record is already in status {0}")]
    NoOpTransition(VerificationStatus),

    #[error("record is not editable in status {0}")]
    NotEditable(VerificationStatus),

    #[error("verification record not found")]
    NotFound,

    #[error("not authorized to perform this action")]
    NotAuthorized,

    #[error("storage error: {0}")]
    Storage(String),
}

impl VerificationError {
    /// Every rejected mutation states why in a stable, enumerable class.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) | Self::AgeOutOfRange { .. } | Self::FileRejected(_) => {
                ErrorClass::Validation
            }
            Self::ActiveRecordExists
            | Self::VersionConflict { .. }
            | Self::IllegalTransition { .. }
            | Self::NoOpTransition(_)
            | Self::NotEditable(_) => ErrorClass::Conflict,
            Self::CooldownActive { .. } => ErrorClass::RateLimited,
            Self::SecurityRejected { .. } => ErrorClass::SecurityRejected,
            Self::NotFound => ErrorClass::NotFound,
            Self::NotAuthorized => ErrorClass::Authorization,
            Self::Storage(_) => ErrorClass::Internal,
        }
    }
}

impl From<StoreError> for VerificationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::VersionConflict { expected, actual } => {
                Self::VersionConflict { expected, actual }
            }
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<ScreeningError> for VerificationError {
    fn from(e: ScreeningError) -> Self {
        match e {
            ScreeningError::Malicious { reason } => Self::SecurityRejected { reason },
            other => Self::FileRejected(other),
        }
    }
}
