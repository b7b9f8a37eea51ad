//! Thread-safe in-memory implementation of every storage trait.

use std::collections::HashMap;
use std::sync::Mutex;

use scholarpass_store::audit::{AuditLogEntry, AuditStore};
use scholarpass_store::document::{DocumentRecord, DocumentStore};
use scholarpass_store::note::{NoteStore, ReviewNote};
use scholarpass_store::risk::{RiskFlag, RiskFlagStore};
use scholarpass_store::verification::{VerificationRecord, VerificationStore};
use scholarpass_store::StoreError;
use scholarpass_types::{ContentDigest, DocumentId, UserId, VerificationId};

/// An in-memory backend implementing all ScholarPass storage traits.
/// Thread-safe; locks are per-table.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
    /// user id -> verification ids, in creation order.
    records_by_user: Mutex<HashMap<String, Vec<VerificationId>>>,
    documents: Mutex<HashMap<String, DocumentRecord>>,
    /// verification id -> document ids, in creation order.
    documents_by_verification: Mutex<HashMap<String, Vec<DocumentId>>>,
    audit: Mutex<Vec<AuditLogEntry>>,
    flags: Mutex<Vec<RiskFlag>>,
    notes: Mutex<Vec<ReviewNote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerificationStore for MemoryStore {
    fn insert_record(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let key = record.verification_id.to_string();
        if records.contains_key(&key) {
            return Err(StoreError::Duplicate(key));
        }
        records.insert(key, record.clone());
        self.records_by_user
            .lock()
            .unwrap()
            .entry(record.user_id.to_string())
            .or_default()
            .push(record.verification_id.clone());
        Ok(())
    }

    fn get_record(&self, id: &VerificationId) -> Result<VerificationRecord, StoreError> {
        self.records
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update_record(
        &self,
        record: &VerificationRecord,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let key = record.verification_id.to_string();
        let stored = records
            .get(&key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: stored.version,
            });
        }
        records.insert(key, record.clone());
        Ok(())
    }

    fn latest_for_user(&self, user_id: &UserId) -> Result<Option<VerificationRecord>, StoreError> {
        let by_user = self.records_by_user.lock().unwrap();
        let Some(ids) = by_user.get(user_id.as_str()) else {
            return Ok(None);
        };
        let Some(last) = ids.last() else {
            return Ok(None);
        };
        let records = self.records.lock().unwrap();
        Ok(records.get(last.as_str()).cloned())
    }

    fn records_for_user(&self, user_id: &UserId) -> Result<Vec<VerificationRecord>, StoreError> {
        let by_user = self.records_by_user.lock().unwrap();
        let records = self.records.lock().unwrap();
        Ok(by_user
            .get(user_id.as_str())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| records.get(id.as_str()).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl DocumentStore for MemoryStore {
    fn insert_document(&self, document: &DocumentRecord) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().unwrap();
        let key = document.document_id.to_string();
        if documents.contains_key(&key) {
            return Err(StoreError::Duplicate(key));
        }
        documents.insert(key, document.clone());
        self.documents_by_verification
            .lock()
            .unwrap()
            .entry(document.verification_id.to_string())
            .or_default()
            .push(document.document_id.clone());
        Ok(())
    }

    fn get_document(&self, id: &DocumentId) -> Result<DocumentRecord, StoreError> {
        self.documents
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn documents_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<DocumentRecord>, StoreError> {
        let by_verification = self.documents_by_verification.lock().unwrap();
        let documents = self.documents.lock().unwrap();
        Ok(by_verification
            .get(verification_id.as_str())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| documents.get(id.as_str()).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn digest_exists(
        &self,
        verification_id: &VerificationId,
        digest: &ContentDigest,
    ) -> Result<bool, StoreError> {
        Ok(self
            .documents_for_verification(verification_id)?
            .iter()
            .any(|d| &d.sha256_digest == digest))
    }

    fn set_document_verified(&self, id: &DocumentId, verified: bool) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.is_verified = verified;
        Ok(())
    }
}

impl AuditStore for MemoryStore {
    fn append_audit(&self, entry: &AuditLogEntry) -> Result<(), StoreError> {
        self.audit.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn audit_for_target(&self, target_id: &str) -> Result<Vec<AuditLogEntry>, StoreError> {
        Ok(self
            .audit
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.target_id == target_id)
            .cloned()
            .collect())
    }
}

impl RiskFlagStore for MemoryStore {
    fn add_flag(&self, flag: &RiskFlag) -> Result<(), StoreError> {
        self.flags.lock().unwrap().push(flag.clone());
        Ok(())
    }

    fn flags_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<RiskFlag>, StoreError> {
        Ok(self
            .flags
            .lock()
            .unwrap()
            .iter()
            .filter(|f| &f.verification_id == verification_id)
            .cloned()
            .collect())
    }
}

impl NoteStore for MemoryStore {
    fn add_note(&self, note: &ReviewNote) -> Result<(), StoreError> {
        self.notes.lock().unwrap().push(note.clone());
        Ok(())
    }

    fn notes_for_verification(
        &self,
        verification_id: &VerificationId,
    ) -> Result<Vec<ReviewNote>, StoreError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| &n.verification_id == verification_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarpass_types::{
        ApplicantProfile, DegreeLevel, DocumentType, EnrollmentInfo, IdentityInfo, InstitutionInfo,
        InstitutionType, Timestamp, VerificationStatus,
    };

    fn record(id: &str, user: &str, version: u64) -> VerificationRecord {
        VerificationRecord {
            verification_id: VerificationId::new(id),
            user_id: UserId::new(user),
            status: VerificationStatus::Draft,
            profile: ApplicantProfile {
                identity: IdentityInfo {
                    full_name: "Test Student".into(),
                    date_of_birth: chrono_date(2004, 2, 2),
                    phone: "+100".into(),
                    country: "DE".into(),
                },
                institution: InstitutionInfo {
                    name: "TU".into(),
                    country: "DE".into(),
                    institution_type: InstitutionType::University,
                },
                enrollment: EnrollmentInfo {
                    student_id: "s-1".into(),
                    enrollment_year: 2024,
                    expected_graduation_year: 2027,
                    degree_program: "CS".into(),
                    degree_level: DegreeLevel::Bachelor,
                    full_time: true,
                },
            },
            phone_hash: String::new(),
            student_id_hash: String::new(),
            assigned_to: None,
            version,
            reapply_eligible_at: None,
            created_at: Timestamp::new(0),
            updated_at: Timestamp::new(0),
        }
    }

    fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn document(id: &str, ver: &str, digest: [u8; 32]) -> DocumentRecord {
        DocumentRecord {
            document_id: DocumentId::new(id),
            verification_id: VerificationId::new(ver),
            owner_user_id: UserId::new("u1"),
            document_type: DocumentType::Transcript,
            storage_path: format!("verifications/u1/{ver}/{id}.pdf"),
            file_name: "transcript.pdf".into(),
            mime_type: "application/pdf".into(),
            size_bytes: 10,
            sha256_digest: ContentDigest::new(digest),
            is_verified: false,
            created_at: Timestamp::new(0),
        }
    }

    #[test]
    fn duplicate_insert_rejected() {
        let store = MemoryStore::new();
        store.insert_record(&record("ver_a", "u1", 0)).unwrap();
        assert!(matches!(
            store.insert_record(&record("ver_a", "u1", 0)),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn update_is_version_gated() {
        let store = MemoryStore::new();
        store.insert_record(&record("ver_a", "u1", 0)).unwrap();

        let mut updated = record("ver_a", "u1", 1);
        updated.status = VerificationStatus::Pending;
        store.update_record(&updated, 0).unwrap();

        // A second writer still holding version 0 loses the race.
        let stale = record("ver_a", "u1", 1);
        let err = store.update_record(&stale, 0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionConflict {
                expected: 0,
                actual: 1
            }
        ));
        assert_eq!(
            store
                .get_record(&VerificationId::new("ver_a"))
                .unwrap()
                .status,
            VerificationStatus::Pending
        );
    }

    #[test]
    fn latest_for_user_is_most_recent() {
        let store = MemoryStore::new();
        store.insert_record(&record("ver_a", "u1", 0)).unwrap();
        store.insert_record(&record("ver_b", "u1", 0)).unwrap();
        let latest = store.latest_for_user(&UserId::new("u1")).unwrap().unwrap();
        assert_eq!(latest.verification_id, VerificationId::new("ver_b"));
        assert!(store
            .latest_for_user(&UserId::new("nobody"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn digest_lookup_is_sibling_scoped() {
        let store = MemoryStore::new();
        store.insert_document(&document("doc_a", "ver_1", [7; 32])).unwrap();

        let ver1 = VerificationId::new("ver_1");
        let ver2 = VerificationId::new("ver_2");
        assert!(store.digest_exists(&ver1, &ContentDigest::new([7; 32])).unwrap());
        assert!(!store.digest_exists(&ver1, &ContentDigest::new([8; 32])).unwrap());
        assert!(!store.digest_exists(&ver2, &ContentDigest::new([7; 32])).unwrap());
    }

    #[test]
    fn set_verified_flips_only_that_field() {
        let store = MemoryStore::new();
        store.insert_document(&document("doc_a", "ver_1", [1; 32])).unwrap();
        store
            .set_document_verified(&DocumentId::new("doc_a"), true)
            .unwrap();
        let doc = store.get_document(&DocumentId::new("doc_a")).unwrap();
        assert!(doc.is_verified);
        assert_eq!(doc.file_name, "transcript.pdf");
    }

    #[test]
    fn audit_preserves_append_order() {
        let store = MemoryStore::new();
        for i in 0..3 {
            let entry = AuditLogEntry {
                actor_id: UserId::new("admin"),
                actor_email: "a@scholarpass.org".into(),
                actor_role: scholarpass_types::ActorRole::Admin,
                actor_ip: "10.0.0.1".into(),
                actor_user_agent: "test".into(),
                target_type: "verification".into(),
                target_id: "ver_a".into(),
                target_user_id: None,
                action: format!("ACTION_{i}"),
                previous_status: None,
                new_status: None,
                action_details: serde_json::Value::Null,
                session_id: "s".into(),
                request_id: "r".into(),
                duration_ms: 1,
                timestamp: Timestamp::new(i),
            };
            store.append_audit(&entry).unwrap();
        }
        let entries = store.audit_for_target("ver_a").unwrap();
        let actions: Vec<_> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["ACTION_0", "ACTION_1", "ACTION_2"]);
    }
}
