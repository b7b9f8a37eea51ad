//! The closed set of supporting-document types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a supporting document claims to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Photo or scan of the institution-issued student id card.
    StudentIdCard,
    /// Official enrollment confirmation letter.
    EnrollmentLetter,
    /// Academic transcript.
    Transcript,
    /// Tuition invoice or fee statement.
    TuitionInvoice,
    /// Government-issued identity document.
    NationalId,
    /// Selfie for face matching against the id documents.
    SelfiePhoto,
}

impl DocumentType {
    /// Stable wire name, also used in requested-documents payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudentIdCard => "student_id_card",
            Self::EnrollmentLetter => "enrollment_letter",
            Self::Transcript => "transcript",
            Self::TuitionInvoice => "tuition_invoice",
            Self::NationalId => "national_id",
            Self::SelfiePhoto => "selfie_photo",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
