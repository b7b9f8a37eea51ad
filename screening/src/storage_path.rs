//! Deterministic storage-path layout for accepted documents.
//!
//! Paths are keyed purely by owner and document identity; the client
//! filename never participates in addressing.

use scholarpass_types::{DocumentId, UserId, VerificationId};

use crate::validate::{JPEG_MIME, PDF_MIME, PNG_MIME, WEBP_MIME};

/// The storage extension for a mime type. Unknown types fall back to `bin`.
pub fn extension_for_mime(mime: &str) -> &'static str {
    let mime = mime.trim();
    if mime.eq_ignore_ascii_case(JPEG_MIME) {
        "jpg"
    } else if mime.eq_ignore_ascii_case(PNG_MIME) {
        "png"
    } else if mime.eq_ignore_ascii_case(WEBP_MIME) {
        "webp"
    } else if mime.eq_ignore_ascii_case(PDF_MIME) {
        "pdf"
    } else {
        "bin"
    }
}

/// Build the collision-free object-storage key for a document.
pub fn generate_storage_path(
    user_id: &UserId,
    verification_id: &VerificationId,
    document_id: &DocumentId,
    mime: &str,
) -> String {
    format!(
        "verifications/{}/{}/{}.{}",
        user_id,
        verification_id,
        document_id,
        extension_for_mime(mime)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_layout() {
        let path = generate_storage_path(
            &UserId::new("user-1"),
            &VerificationId::new("ver_abc"),
            &DocumentId::new("doc_def"),
            "image/jpeg",
        );
        assert_eq!(path, "verifications/user-1/ver_abc/doc_def.jpg");
    }

    #[test]
    fn extension_follows_mime_not_name() {
        assert_eq!(extension_for_mime("application/pdf"), "pdf");
        assert_eq!(extension_for_mime("IMAGE/PNG"), "png");
        assert_eq!(extension_for_mime("application/x-msdownload"), "bin");
    }

    #[test]
    fn distinct_documents_distinct_paths() {
        let user = UserId::new("u");
        let ver = VerificationId::new("ver_x");
        let a = generate_storage_path(&user, &ver, &DocumentId::new("doc_a"), "image/png");
        let b = generate_storage_path(&user, &ver, &DocumentId::new("doc_b"), "image/png");
        assert_ne!(a, b);
    }
}
