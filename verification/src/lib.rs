//! Student-identity verification lifecycle.
//!
//! The core state machine from draft submission to an admin-adjudicated
//! terminal state, plus the document-integrity pipeline and the
//! append-only audit trail:
//!
//! 1. **Records**: a student creates a verification record (one active
//!    record per user, age-gated, cooldown-gated) and edits it under an
//!    optimistic version token.
//! 2. **Documents**: uploads run a sequential screen (validate → malicious
//!    scan → fingerprint → duplicate check) before anything persists;
//!    duplicates raise an advisory risk flag, never a rejection.
//! 3. **Transitions**: admin actions are a closed enum; legality is checked
//!    against the current status by a pure engine that neither persists
//!    nor logs.
//! 4. **Audit**: every administrative attempt — success or failure — is
//!    appended to the audit trail by the admin service.

pub mod action;
pub mod admin;
pub mod audit;
pub mod documents;
pub mod error;
pub mod notify;
pub mod records;
pub mod transition;

pub use action::AdminAction;
pub use admin::AdminService;
pub use audit::{ActorContext, AuditRecorder, NoteService};
pub use documents::{DocumentService, UploadOutcome};
pub use error::{ErrorClass, VerificationError};
pub use notify::{NotifyError, NullNotifier, TransitionNotifier};
pub use records::{RecordService, VerificationView};
pub use transition::{apply_transition, check_transition, TransitionOutcome};
