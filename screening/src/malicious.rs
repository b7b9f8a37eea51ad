//! Malicious-content screening.
//!
//! Runs after structural validation and before any persistence. Looks for
//! executable payloads hiding behind benign mime types and for active
//! content inside documents. Rejections carry a generic reason only — the
//! matched signature is never surfaced, so a rejected uploader learns
//! nothing about how to evade the screen.

use crate::error::ScreeningError;
use crate::validate::PDF_MIME;

/// Executable container signatures that must never appear at the start of
/// an uploaded document.
const EXECUTABLE_PREFIXES: &[&[u8]] = &[
    b"MZ",               // Windows PE
    b"\x7fELF",          // ELF
    b"\xfe\xed\xfa\xce", // Mach-O 32-bit
    b"\xfe\xed\xfa\xcf", // Mach-O 64-bit
    b"\xca\xfe\xba\xbe", // Mach-O fat / Java class
    b"#!",               // script with interpreter line
];

/// Byte patterns indicating an executable embedded deeper in the file.
const EMBEDDED_EXECUTABLE_MARKERS: &[&[u8]] = &[b"\x7fELF", b"This program cannot be run in DOS mode"];

/// Script payloads inside otherwise-benign containers.
const SCRIPT_MARKERS: &[&[u8]] = &[b"<script", b"<?php", b"javascript:"];

/// Active-content features a verification document has no business using.
const PDF_ACTIVE_MARKERS: &[&[u8]] = &[
    b"/JavaScript",
    b"/JS",
    b"/Launch",
    b"/OpenAction",
    b"/AA",
    b"/EmbeddedFile",
    b"/RichMedia",
];

fn contains_ci(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}

fn reject(reason: &str) -> Result<(), ScreeningError> {
    Err(ScreeningError::Malicious {
        reason: reason.to_string(),
    })
}

/// Screen a validated buffer for malicious content.
pub fn check_for_malicious_content(data: &[u8], mime: &str) -> Result<(), ScreeningError> {
    for prefix in EXECUTABLE_PREFIXES {
        if data.starts_with(prefix) {
            return reject("executable content detected");
        }
    }

    for marker in EMBEDDED_EXECUTABLE_MARKERS {
        if contains_ci(data, marker) {
            return reject("embedded executable content detected");
        }
    }

    for marker in SCRIPT_MARKERS {
        if contains_ci(data, marker) {
            return reject("active script content detected");
        }
    }

    if mime.eq_ignore_ascii_case(PDF_MIME) {
        for marker in PDF_ACTIVE_MARKERS {
            if contains_ci(data, marker) {
                return reject("document contains disallowed active content");
            }
        }
    }

    Ok(())
}
