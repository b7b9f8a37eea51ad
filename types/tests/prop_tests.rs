use proptest::prelude::*;

use chrono::NaiveDate;
use scholarpass_types::time::age_on;
use scholarpass_types::{ContentDigest, Timestamp, VerificationStatus};

proptest! {
    /// ContentDigest roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn content_digest_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let digest = ContentDigest::new(bytes);
        prop_assert_eq!(digest.as_bytes(), &bytes);
    }

    /// ContentDigest::is_zero is true only for all-zero bytes.
    #[test]
    fn content_digest_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let digest = ContentDigest::new(bytes);
        prop_assert_eq!(digest.is_zero(), bytes == [0u8; 32]);
    }

    /// Digest display is always 64 lowercase hex characters.
    #[test]
    fn content_digest_display_is_hex(bytes in prop::array::uniform32(0u8..)) {
        let s = ContentDigest::new(bytes).to_string();
        prop_assert_eq!(s.len(), 64);
        prop_assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Timestamp ordering matches the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// has_expired is monotone in `now`.
    #[test]
    fn expiry_monotone(start in 0u64..1u64 << 40, dur in 0u64..1u64 << 20, now in 0u64..1u64 << 41) {
        let t = Timestamp::new(start);
        if t.has_expired(dur, Timestamp::new(now)) {
            prop_assert!(t.has_expired(dur, Timestamp::new(now + 1)));
        }
    }

    /// Age never decreases as the evaluation date advances.
    #[test]
    fn age_monotone_in_today(days_a in 0u32..20_000, days_b in 0u32..20_000) {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let base = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap();
        let (lo, hi) = if days_a <= days_b { (days_a, days_b) } else { (days_b, days_a) };
        let early = base + chrono::Days::new(lo as u64);
        let late = base + chrono::Days::new(hi as u64);
        prop_assert!(age_on(birth, early) <= age_on(birth, late));
    }
}

#[test]
fn status_wire_names_are_stable() {
    let names: Vec<&str> = VerificationStatus::all().iter().map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "DRAFT",
            "PENDING",
            "APPROVED",
            "REJECTED",
            "NEEDS_MORE_INFO",
            "SUSPENDED",
            "UNDER_INVESTIGATION",
            "REVOKED",
            "PERMANENTLY_BANNED",
            "ABANDONED",
        ]
    );
}

#[test]
fn status_serde_roundtrip() {
    for status in VerificationStatus::all() {
        let json = serde_json::to_string(&status).unwrap();
        let back: VerificationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
