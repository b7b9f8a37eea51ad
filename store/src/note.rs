//! Reviewer note storage trait.

use crate::StoreError;
use scholarpass_types::{Timestamp, UserId, VerificationId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    General,
    Investigation,
    Decision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteVisibility {
    /// Visible to reviewers only.
    Internal,
    /// Also shown to the student.
    SharedWithStudent,
}

/// Free-text reviewer annotation, separate from the structured audit log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewNote {
    pub verification_id: VerificationId,
    pub author_id: UserId,
    pub author_email: String,
    pub body: String,
    pub note_type: NoteType,
    pub visibility: NoteVisibility,
    pub created_at: Timestamp,
}

/// Trait for reviewer note storage.
pub trait NoteStore {
    fn add_note(&self, note: &ReviewNote) -> Result<(), StoreError>;

    fn notes_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<ReviewNote>, StoreError>;
}
