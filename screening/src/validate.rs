//! Structural validation of uploaded files.
//!
//! Three gates, in order: the declared mime type must be on the allow-list
//! for the document type, the byte size must be under the ceiling for that
//! mime class, and the leading bytes must actually look like the declared
//! type (defends against mislabeled and polyglot files).

use crate::error::ScreeningError;
use scholarpass_types::{DocumentType, VerificationParams};

pub const JPEG_MIME: &str = "image/jpeg";
pub const PNG_MIME: &str = "image/png";
pub const WEBP_MIME: &str = "image/webp";
pub const PDF_MIME: &str = "application/pdf";

const IMAGE_MIMES: &[&str] = &[JPEG_MIME, PNG_MIME, WEBP_MIME];
const IMAGE_AND_PDF_MIMES: &[&str] = &[JPEG_MIME, PNG_MIME, WEBP_MIME, PDF_MIME];

/// The mime types acceptable for a given document type.
pub fn allowed_mimes(document_type: DocumentType) -> &'static [&'static str] {
    match document_type {
        // A selfie must be a photo; everything else may also be a scan/PDF.
        DocumentType::SelfiePhoto => IMAGE_MIMES,
        DocumentType::StudentIdCard
        | DocumentType::EnrollmentLetter
        | DocumentType::Transcript
        | DocumentType::TuitionInvoice
        | DocumentType::NationalId => IMAGE_AND_PDF_MIMES,
    }
}

fn size_limit(mime: &str, params: &VerificationParams) -> u64 {
    if mime == PDF_MIME {
        params.max_pdf_bytes
    } else {
        params.max_image_bytes
    }
}

/// Whether the buffer's magic bytes are consistent with the declared mime.
pub fn content_matches_mime(data: &[u8], mime: &str) -> bool {
    match mime {
        JPEG_MIME => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        PNG_MIME => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        WEBP_MIME => data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        PDF_MIME => data.starts_with(b"%PDF-"),
        _ => false,
    }
}

/// Validate an uploaded buffer against its declared mime type and the
/// allow-list for its document type.
pub fn validate_file(
    data: &[u8],
    declared_mime: &str,
    document_type: DocumentType,
    params: &VerificationParams,
) -> Result<(), ScreeningError> {
    if data.is_empty() {
        return Err(ScreeningError::EmptyFile);
    }

    let mime = declared_mime.trim().to_ascii_lowercase();
    if !allowed_mimes(document_type).contains(&mime.as_str()) {
        return Err(ScreeningError::MimeNotAllowed {
            mime,
            document_type,
        });
    }

    let limit = size_limit(&mime, params);
    if data.len() as u64 > limit {
        return Err(ScreeningError::TooLarge {
            limit_bytes: limit,
            document_type,
        });
    }

    if !content_matches_mime(data, &mime) {
        return Err(ScreeningError::ContentMismatch { mime });
    }

    Ok(())
}
