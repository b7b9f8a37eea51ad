//! The document registry and upload pipeline.
//!
//! An upload is a sequential pipeline of fallible steps, each
//! short-circuiting on first failure: load record → ownership + state
//! check → validate → malicious screen → fingerprint → duplicate check →
//! persist. Nothing is written until every screen has passed, so an
//! aborted or rejected upload leaves no partial state.

use std::sync::Arc;

use crate::error::VerificationError;
use scholarpass_screening::{
    check_for_malicious_content, digest_file, generate_storage_path, sanitize_file_name,
    validate_file,
};
use scholarpass_store::document::{DocumentRecord, DocumentStore};
use scholarpass_store::risk::{RiskFlag, RiskFlagStore, RiskFlagType};
use scholarpass_store::verification::VerificationStore;
use scholarpass_types::{
    Clock, DocumentId, DocumentType, UserId, VerificationId, VerificationParams,
};

/// The result of an accepted upload.
#[derive(Clone, Debug)]
pub struct UploadOutcome {
    pub document: DocumentRecord,
    /// A sibling document with identical content already existed. The
    /// upload still succeeded; a risk flag was raised for human review.
    pub duplicate_of_existing: bool,
}

/// Document intake and listing, scoped to the owning verification record.
pub struct DocumentService<S, C> {
    store: Arc<S>,
    params: VerificationParams,
    clock: Arc<C>,
}

impl<S, C> DocumentService<S, C>
where
    S: VerificationStore + DocumentStore + RiskFlagStore,
    C: Clock,
{
    pub fn new(store: Arc<S>, params: VerificationParams, clock: Arc<C>) -> Self {
        Self {
            store,
            params,
            clock,
        }
    }

    /// Screen and register an uploaded file against a verification record.
    pub fn upload_document(
        &self,
        verification_id: &VerificationId,
        user_id: &UserId,
        document_type: DocumentType,
        file_name: &str,
        declared_mime: &str,
        data: &[u8],
    ) -> Result<UploadOutcome, VerificationError> {
        let record = self.store.get_record(verification_id)?;
        if &record.user_id != user_id {
            return Err(VerificationError::NotFound);
        }
        if !record.status.is_editable() {
            return Err(VerificationError::NotEditable(record.status));
        }

        let existing = self.store.documents_for_verification(verification_id)?;
        if existing.len() >= self.params.max_documents_per_verification {
            return Err(VerificationError::Validation(format!(
                "at most {} documents per verification",
                self.params.max_documents_per_verification
            )));
        }

        validate_file(data, declared_mime, document_type, &self.params)
            .map_err(VerificationError::from)?;
        check_for_malicious_content(data, declared_mime).map_err(VerificationError::from)?;

        let digest = digest_file(data);
        let duplicate = self.store.digest_exists(verification_id, &digest)?;

        let document_id = DocumentId::generate();
        let mime_type = declared_mime.trim().to_ascii_lowercase();
        let document = DocumentRecord {
            storage_path: generate_storage_path(user_id, verification_id, &document_id, &mime_type),
            document_id,
            verification_id: verification_id.clone(),
            owner_user_id: user_id.clone(),
            document_type,
            file_name: sanitize_file_name(file_name),
            mime_type,
            size_bytes: data.len() as u64,
            sha256_digest: digest,
            is_verified: false,
            created_at: self.clock.now(),
        };
        self.store.insert_document(&document)?;

        // Raised only once the row exists, so a failed insert leaves no
        // orphaned flag. Advisory only: flag for human review, never block
        // the upload, and never fail it if the flag write fails.
        if duplicate {
            let flag = RiskFlag {
                verification_id: verification_id.clone(),
                flag_type: RiskFlagType::DuplicateDocument,
                raised_by: user_id.clone(),
                raised_at: self.clock.now(),
            };
            if let Err(e) = self.store.add_flag(&flag) {
                tracing::warn!(
                    verification_id = %verification_id,
                    error = %e,
                    "failed to record duplicate-document risk flag"
                );
            }
        }
        tracing::debug!(
            document_id = %document.document_id,
            verification_id = %verification_id,
            duplicate,
            "document registered"
        );

        Ok(UploadOutcome {
            document,
            duplicate_of_existing: duplicate,
        })
    }

    /// Ownership-checked listing. Signed access URLs are minted downstream
    /// by the object-storage collaborator, not here.
    pub fn list_documents(
        &self,
        verification_id: &VerificationId,
        user_id: &UserId,
    ) -> Result<Vec<DocumentRecord>, VerificationError> {
        let record = self.store.get_record(verification_id)?;
        if &record.user_id != user_id {
            return Err(VerificationError::NotFound);
        }
        Ok(self.store.documents_for_verification(verification_id)?)
    }

    /// Flip a document's review flag. Reviewer/automation only.
    pub fn set_document_verified(
        &self,
        actor_role: scholarpass_types::ActorRole,
        document_id: &DocumentId,
        verified: bool,
    ) -> Result<(), VerificationError> {
        if !actor_role.can_adjudicate() {
            return Err(VerificationError::NotAuthorized);
        }
        Ok(self.store.set_document_verified(document_id, verified)?)
    }

    /// Whether any sibling under the record already carries this digest.
    pub fn check_document_duplicate(
        &self,
        digest: &scholarpass_types::ContentDigest,
        verification_id: &VerificationId,
    ) -> Result<bool, VerificationError> {
        Ok(self.store.digest_exists(verification_id, digest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::records::RecordService;
    use chrono::NaiveDate;
    use scholarpass_store_memory::{MemoryStore, NullClock};
    use scholarpass_types::{
        ApplicantProfile, DegreeLevel, EnrollmentInfo, IdentityInfo, InstitutionInfo,
        InstitutionType,
    };

    const NOW_SECS: u64 = 1_767_225_600;

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            identity: IdentityInfo {
                full_name: "Linus Student".into(),
                date_of_birth: NaiveDate::from_ymd_opt(2003, 3, 3).unwrap(),
                phone: "+358401234567".into(),
                country: "FI".into(),
            },
            institution: InstitutionInfo {
                name: "University of Helsinki".into(),
                country: "FI".into(),
                institution_type: InstitutionType::University,
            },
            enrollment: EnrollmentInfo {
                student_id: "HY-2025-001".into(),
                enrollment_year: 2025,
                expected_graduation_year: 2029,
                degree_program: "Computer Science".into(),
                degree_level: DegreeLevel::Bachelor,
                full_time: true,
            },
        }
    }

    fn setup() -> (
        Arc<MemoryStore>,
        VerificationId,
        UserId,
        DocumentService<MemoryStore, NullClock>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(NullClock::new(NOW_SECS));
        let records = RecordService::new(
            store.clone(),
            VerificationParams::default(),
            clock.clone(),
        );
        let user = UserId::new("student-1");
        let record = records.create_verification(&user, profile()).unwrap();
        let documents =
            DocumentService::new(store.clone(), VerificationParams::default(), clock);
        (store, record.verification_id, user, documents)
    }

    fn jpeg_bytes(filler: u8) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(128, filler);
        data
    }

    #[test]
    fn accepted_upload_registers_metadata() {
        let (_, ver, user, documents) = setup();
        let outcome = documents
            .upload_document(
                &ver,
                &user,
                DocumentType::StudentIdCard,
                "../sneaky/../card photo.jpg",
                "image/jpeg",
                &jpeg_bytes(0x10),
            )
            .unwrap();
        assert!(!outcome.duplicate_of_existing);
        let doc = outcome.document;
        assert_eq!(doc.file_name, "card_photo.jpg");
        assert_eq!(doc.mime_type, "image/jpeg");
        assert_eq!(doc.size_bytes, 128);
        assert!(doc.storage_path.starts_with(&format!("verifications/{user}/{ver}/")));
        assert!(doc.storage_path.ends_with(".jpg"));
        assert!(!doc.is_verified);
    }

    #[test]
    fn duplicate_upload_flags_once_and_keeps_both_rows() {
        let (store, ver, user, documents) = setup();
        let data = jpeg_bytes(0x22);
        documents
            .upload_document(&ver, &user, DocumentType::StudentIdCard, "a.jpg", "image/jpeg", &data)
            .unwrap();
        let second = documents
            .upload_document(&ver, &user, DocumentType::StudentIdCard, "b.jpg", "image/jpeg", &data)
            .unwrap();
        assert!(second.duplicate_of_existing);

        let docs = documents.list_documents(&ver, &user).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].sha256_digest, docs[1].sha256_digest);

        let flags = store.flags_for_verification(&ver).unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].flag_type, RiskFlagType::DuplicateDocument);
    }

    #[test]
    fn malicious_content_rejected_before_any_row() {
        let (_, ver, user, documents) = setup();
        // A benign-looking JPEG wrapping a PE header further in.
        let mut data = jpeg_bytes(0x00);
        data.extend_from_slice(b"This program cannot be run in DOS mode");
        let err = documents
            .upload_document(&ver, &user, DocumentType::StudentIdCard, "x.jpg", "image/jpeg", &data)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::SecurityRejected);
        assert!(documents.list_documents(&ver, &user).unwrap().is_empty());
    }

    #[test]
    fn validation_failure_rejected_before_any_row() {
        let (_, ver, user, documents) = setup();
        let err = documents
            .upload_document(
                &ver,
                &user,
                DocumentType::StudentIdCard,
                "x.gif",
                "image/gif",
                b"GIF89a......",
            )
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Validation);
        assert!(documents.list_documents(&ver, &user).unwrap().is_empty());
    }

    #[test]
    fn upload_requires_editable_record() {
        let (store, ver, user, documents) = setup();
        let mut record = store.get_record(&ver).unwrap();
        record.status = scholarpass_types::VerificationStatus::Pending;
        record.version = 1;
        store.update_record(&record, 0).unwrap();

        let err = documents
            .upload_document(
                &ver,
                &user,
                DocumentType::StudentIdCard,
                "x.jpg",
                "image/jpeg",
                &jpeg_bytes(1),
            )
            .unwrap_err();
        assert!(matches!(err, VerificationError::NotEditable(_)));
    }

    #[test]
    fn listing_is_ownership_checked() {
        let (_, ver, user, documents) = setup();
        documents
            .upload_document(&ver, &user, DocumentType::SelfiePhoto, "s.jpg", "image/jpeg", &jpeg_bytes(3))
            .unwrap();
        let err = documents
            .list_documents(&ver, &UserId::new("someone-else"))
            .unwrap_err();
        assert!(matches!(err, VerificationError::NotFound));
    }

    #[test]
    fn document_count_ceiling() {
        let (store, ver, user, _) = setup();
        let clock = Arc::new(NullClock::new(NOW_SECS));
        let mut params = VerificationParams::default();
        params.max_documents_per_verification = 1;
        let documents = DocumentService::new(store, params, clock);

        documents
            .upload_document(&ver, &user, DocumentType::StudentIdCard, "a.jpg", "image/jpeg", &jpeg_bytes(1))
            .unwrap();
        let err = documents
            .upload_document(&ver, &user, DocumentType::Transcript, "b.jpg", "image/jpeg", &jpeg_bytes(2))
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Validation);
    }

    /// Delegates to `MemoryStore` but refuses document inserts once a
    /// budget is spent.
    struct FlakyInsertStore {
        inner: MemoryStore,
        inserts_allowed: AtomicUsize,
    }

    use scholarpass_store::verification::VerificationRecord;
    use scholarpass_store::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    impl VerificationStore for FlakyInsertStore {
        fn insert_record(&self, record: &VerificationRecord) -> Result<(), StoreError> {
            self.inner.insert_record(record)
        }

        fn get_record(&self, id: &VerificationId) -> Result<VerificationRecord, StoreError> {
            self.inner.get_record(id)
        }

        fn update_record(
            &self,
            record: &VerificationRecord,
            expected_version: u64,
        ) -> Result<(), StoreError> {
            self.inner.update_record(record, expected_version)
        }

        fn latest_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Option<VerificationRecord>, StoreError> {
            self.inner.latest_for_user(user_id)
        }

        fn records_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<VerificationRecord>, StoreError> {
            self.inner.records_for_user(user_id)
        }
    }

    impl DocumentStore for FlakyInsertStore {
        fn insert_document(&self, document: &DocumentRecord) -> Result<(), StoreError> {
            if self.inserts_allowed.load(Ordering::SeqCst) == 0 {
                return Err(StoreError::Backend("document table unavailable".into()));
            }
            self.inserts_allowed.fetch_sub(1, Ordering::SeqCst);
            self.inner.insert_document(document)
        }

        fn get_document(
            &self,
            id: &scholarpass_types::DocumentId,
        ) -> Result<DocumentRecord, StoreError> {
            self.inner.get_document(id)
        }

        fn documents_for_verification(
            &self,
            verification_id: &VerificationId,
        ) -> Result<Vec<DocumentRecord>, StoreError> {
            self.inner.documents_for_verification(verification_id)
        }

        fn digest_exists(
            &self,
            verification_id: &VerificationId,
            digest: &scholarpass_types::ContentDigest,
        ) -> Result<bool, StoreError> {
            self.inner.digest_exists(verification_id, digest)
        }

        fn set_document_verified(
            &self,
            id: &scholarpass_types::DocumentId,
            verified: bool,
        ) -> Result<(), StoreError> {
            self.inner.set_document_verified(id, verified)
        }
    }

    impl RiskFlagStore for FlakyInsertStore {
        fn add_flag(&self, flag: &RiskFlag) -> Result<(), StoreError> {
            self.inner.add_flag(flag)
        }

        fn flags_for_verification(
            &self,
            verification_id: &VerificationId,
        ) -> Result<Vec<RiskFlag>, StoreError> {
            self.inner.flags_for_verification(verification_id)
        }
    }

    #[test]
    fn failed_insert_leaves_no_duplicate_flag() {
        let store = Arc::new(FlakyInsertStore {
            inner: MemoryStore::new(),
            inserts_allowed: AtomicUsize::new(1),
        });
        let clock = Arc::new(NullClock::new(NOW_SECS));
        let records = RecordService::new(
            store.clone(),
            VerificationParams::default(),
            clock.clone(),
        );
        let user = UserId::new("student-1");
        let record = records.create_verification(&user, profile()).unwrap();
        let documents =
            DocumentService::new(store.clone(), VerificationParams::default(), clock);

        let data = jpeg_bytes(0x55);
        documents
            .upload_document(
                &record.verification_id,
                &user,
                DocumentType::StudentIdCard,
                "a.jpg",
                "image/jpeg",
                &data,
            )
            .unwrap();

        // The re-upload matches the sibling digest, but the insert fails:
        // neither a document row nor a risk flag may survive.
        let err = documents
            .upload_document(
                &record.verification_id,
                &user,
                DocumentType::Transcript,
                "b.jpg",
                "image/jpeg",
                &data,
            )
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Internal);
        assert!(store
            .flags_for_verification(&record.verification_id)
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .documents_for_verification(&record.verification_id)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn review_flag_requires_adjudicating_role() {
        let (_, ver, user, documents) = setup();
        let outcome = documents
            .upload_document(&ver, &user, DocumentType::Transcript, "t.jpg", "image/jpeg", &jpeg_bytes(9))
            .unwrap();

        let err = documents
            .set_document_verified(
                scholarpass_types::ActorRole::Student,
                &outcome.document.document_id,
                true,
            )
            .unwrap_err();
        assert!(matches!(err, VerificationError::NotAuthorized));

        documents
            .set_document_verified(
                scholarpass_types::ActorRole::Reviewer,
                &outcome.document.document_id,
                true,
            )
            .unwrap();
    }
}
