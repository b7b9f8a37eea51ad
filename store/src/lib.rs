//! Abstract storage traits for the ScholarPass verification core.
//!
//! Every storage backend (SQL, in-memory for testing) implements these
//! traits. The rest of the workspace depends only on the traits, so tests
//! substitute the in-memory backend and services never touch a concrete
//! database handle.

pub mod audit;
pub mod document;
pub mod error;
pub mod note;
pub mod risk;
pub mod verification;

pub use audit::{AuditLogEntry, AuditStore};
pub use document::{DocumentRecord, DocumentStore};
pub use error::StoreError;
pub use note::{NoteStore, NoteType, NoteVisibility, ReviewNote};
pub use risk::{RiskFlag, RiskFlagStore, RiskFlagType};
pub use verification::{VerificationRecord, VerificationStore};
