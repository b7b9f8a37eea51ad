use proptest::prelude::*;

use scholarpass_screening::{digest_file, sanitize_file_name, sha256, sha256_multi};

proptest! {
    /// The sanitized name never contains path separators or control chars.
    #[test]
    fn sanitized_name_is_safe(name in ".*") {
        let clean = sanitize_file_name(&name);
        prop_assert!(!clean.contains('/'));
        prop_assert!(!clean.contains('\\'));
        prop_assert!(!clean.chars().any(|c| c.is_control()));
        prop_assert!(!clean.starts_with('.'));
        prop_assert!(!clean.is_empty());
        prop_assert!(clean.len() <= 120);
    }

    /// Sanitization is idempotent.
    #[test]
    fn sanitize_idempotent(name in ".*") {
        let once = sanitize_file_name(&name);
        prop_assert_eq!(sanitize_file_name(&once), once);
    }

    /// Digest is a pure function of content.
    #[test]
    fn digest_deterministic(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        prop_assert_eq!(digest_file(&data), digest_file(&data));
    }

    /// Hashing parts in sequence equals hashing the concatenation.
    #[test]
    fn multi_part_hashing_matches_concat(
        a in prop::collection::vec(any::<u8>(), 0..512),
        b in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut concat = a.clone();
        concat.extend_from_slice(&b);
        prop_assert_eq!(sha256_multi(&[&a, &b]), sha256(&concat));
    }
}
