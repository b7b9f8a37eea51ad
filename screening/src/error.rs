use scholarpass_types::DocumentType;
use serde::Serialize;
use thiserror::Error;

/// Machine-readable rejection codes, stable across releases so clients can
/// branch on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileErrorCode {
    EmptyFile,
    FileTooLarge,
    MimeNotAllowed,
    ContentTypeMismatch,
    MaliciousContent,
}

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("file is empty")]
    EmptyFile,

    #[error("file exceeds the {limit_bytes} byte limit for {document_type}")]
    TooLarge {
        limit_bytes: u64,
        document_type: DocumentType,
    },

    #[error("mime type {mime} is not allowed for {document_type}")]
    MimeNotAllowed {
        mime: String,
        document_type: DocumentType,
    },

    #[error("file content does not match the declared type {mime}")]
    ContentMismatch { mime: String },

    /// The reason is deliberately generic; the matched signature is never
    /// surfaced to the uploader.
    #[error("file rejected by security screening: {reason}")]
    Malicious { reason: String },
}

impl ScreeningError {
    pub fn code(&self) -> FileErrorCode {
        match self {
            Self::EmptyFile => FileErrorCode::EmptyFile,
            Self::TooLarge { .. } => FileErrorCode::FileTooLarge,
            Self::MimeNotAllowed { .. } => FileErrorCode::MimeNotAllowed,
            Self::ContentMismatch { .. } => FileErrorCode::ContentTypeMismatch,
            Self::Malicious { .. } => FileErrorCode::MaliciousContent,
        }
    }
}
