//! Fundamental types for the ScholarPass verification core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: opaque ids, the verification status enum, applicant field
//! structs, document types, content digests, actor roles, timestamps, and
//! tunable parameters.

pub mod actor;
pub mod applicant;
pub mod digest;
pub mod document;
pub mod ids;
pub mod params;
pub mod status;
pub mod time;

pub use actor::ActorRole;
pub use applicant::{
    ApplicantPatch, ApplicantProfile, DegreeLevel, EnrollmentInfo, IdentityInfo, InstitutionInfo,
    InstitutionType,
};
pub use digest::{ContentDigest, ParseDigestError};
pub use document::DocumentType;
pub use ids::{DocumentId, UserId, VerificationId};
pub use params::{ParamsError, VerificationParams};
pub use status::VerificationStatus;
pub use time::{Clock, SystemClock, Timestamp};
