//! The verification record service: creation, student edits, submission,
//! and the redacted projection returned to clients.

use std::sync::Arc;

use crate::error::VerificationError;
use scholarpass_screening::hash_sensitive;
use scholarpass_store::verification::{VerificationRecord, VerificationStore};
use scholarpass_types::time::age_on;
use scholarpass_types::{
    ApplicantPatch, ApplicantProfile, Clock, Timestamp, UserId, VerificationId,
    VerificationParams, VerificationStatus,
};
use scholarpass_utils::{days_until, format_duration};

/// Externally returned projection of a record. Raw phone and student id
/// are masked; the sensitive hashes are omitted entirely.
#[derive(Clone, Debug, serde::Serialize)]
pub struct VerificationView {
    pub verification_id: VerificationId,
    pub user_id: UserId,
    pub status: VerificationStatus,
    pub full_name: String,
    pub phone_masked: String,
    pub country: String,
    pub institution_name: String,
    pub institution_country: String,
    pub student_id_masked: String,
    pub degree_program: String,
    pub enrollment_year: u16,
    pub expected_graduation_year: u16,
    pub assigned_to: Option<UserId>,
    /// The concurrency token the client must echo back on update.
    pub version: u64,
    pub reapply_eligible_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 2 {
        "***".to_string()
    } else {
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("***{tail}")
    }
}

impl VerificationView {
    pub fn from_record(record: &VerificationRecord) -> Self {
        Self {
            verification_id: record.verification_id.clone(),
            user_id: record.user_id.clone(),
            status: record.status,
            full_name: record.profile.identity.full_name.clone(),
            phone_masked: mask(&record.profile.identity.phone),
            country: record.profile.identity.country.clone(),
            institution_name: record.profile.institution.name.clone(),
            institution_country: record.profile.institution.country.clone(),
            student_id_masked: mask(&record.profile.enrollment.student_id),
            degree_program: record.profile.enrollment.degree_program.clone(),
            enrollment_year: record.profile.enrollment.enrollment_year,
            expected_graduation_year: record.profile.enrollment.expected_graduation_year,
            assigned_to: record.assigned_to.clone(),
            version: record.version,
            reapply_eligible_at: record.reapply_eligible_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Owns creation and student-side mutation of verification records.
pub struct RecordService<S, C> {
    store: Arc<S>,
    params: VerificationParams,
    clock: Arc<C>,
}

impl<S, C> RecordService<S, C>
where
    S: VerificationStore,
    C: Clock,
{
    pub fn new(store: Arc<S>, params: VerificationParams, clock: Arc<C>) -> Self {
        Self {
            store,
            params,
            clock,
        }
    }

    /// Create a fresh DRAFT record for a user.
    ///
    /// Enforced here, at creation time: the single-active-record rule, the
    /// rejection cooldown, lazy closure of stale drafts, and the age gate.
    pub fn create_verification(
        &self,
        user_id: &UserId,
        profile: ApplicantProfile,
    ) -> Result<VerificationRecord, VerificationError> {
        let now = self.clock.now();

        if let Some(latest) = self.store.latest_for_user(user_id)? {
            self.close_if_stale_draft(&latest, now)?;

            if latest.status == VerificationStatus::Rejected {
                if let Some(eligible_at) = latest.reapply_eligible_at {
                    if now < eligible_at {
                        tracing::debug!(
                            user_id = %user_id,
                            remaining = %format_duration(now.seconds_until(eligible_at)),
                            "re-application refused during cooldown"
                        );
                        return Err(VerificationError::CooldownActive {
                            days_remaining: days_until(eligible_at, now),
                        });
                    }
                }
            } else if !latest.status.is_terminal() && !self.is_stale_draft(&latest, now) {
                return Err(VerificationError::ActiveRecordExists);
            }
        }

        validate_profile(&profile)?;
        self.check_age(&profile, now)?;

        let record = VerificationRecord {
            verification_id: VerificationId::generate(),
            user_id: user_id.clone(),
            status: VerificationStatus::Draft,
            phone_hash: hash_sensitive(&profile.identity.phone),
            student_id_hash: hash_sensitive(&profile.enrollment.student_id),
            profile,
            assigned_to: None,
            version: 0,
            reapply_eligible_at: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_record(&record)?;
        tracing::info!(
            verification_id = %record.verification_id,
            user_id = %user_id,
            "verification record created"
        );
        Ok(record)
    }

    /// Apply a student edit under the optimistic version token.
    ///
    /// Ownership mismatches are reported as NotFound so a probing caller
    /// cannot distinguish "someone else's record" from "no record".
    pub fn update_verification(
        &self,
        verification_id: &VerificationId,
        user_id: &UserId,
        patch: &ApplicantPatch,
        expected_version: u64,
    ) -> Result<VerificationRecord, VerificationError> {
        if patch.is_empty() {
            return Err(VerificationError::Validation("empty update".into()));
        }

        let mut record = self.load_owned(verification_id, user_id)?;
        if !record.status.is_editable() {
            return Err(VerificationError::NotEditable(record.status));
        }

        let now = self.clock.now();
        patch.apply_to(&mut record.profile);
        if patch.identity.is_some() {
            self.check_age(&record.profile, now)?;
            record.phone_hash = hash_sensitive(&record.profile.identity.phone);
        }
        if patch.enrollment.is_some() {
            record.student_id_hash = hash_sensitive(&record.profile.enrollment.student_id);
        }
        validate_profile(&record.profile)?;

        record.version = expected_version + 1;
        record.updated_at = now;
        self.store.update_record(&record, expected_version)?;
        Ok(record)
    }

    /// Student submission: DRAFT (or a reworked NEEDS_MORE_INFO record)
    /// moves to PENDING for adjudication.
    pub fn submit_verification(
        &self,
        verification_id: &VerificationId,
        user_id: &UserId,
        expected_version: u64,
    ) -> Result<VerificationRecord, VerificationError> {
        let mut record = self.load_owned(verification_id, user_id)?;
        if !record.status.is_editable() {
            return Err(VerificationError::NotEditable(record.status));
        }

        record.status = VerificationStatus::Pending;
        record.version = expected_version + 1;
        record.updated_at = self.clock.now();
        self.store.update_record(&record, expected_version)?;
        tracing::info!(
            verification_id = %record.verification_id,
            "verification submitted for review"
        );
        Ok(record)
    }

    /// The user's current record as a redacted view, or None ("can create").
    pub fn get_current_verification(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationView>, VerificationError> {
        Ok(self
            .store
            .latest_for_user(user_id)?
            .map(|record| VerificationView::from_record(&record)))
    }

    fn load_owned(
        &self,
        verification_id: &VerificationId,
        user_id: &UserId,
    ) -> Result<VerificationRecord, VerificationError> {
        let record = self.store.get_record(verification_id)?;
        if &record.user_id != user_id {
            return Err(VerificationError::NotFound);
        }
        Ok(record)
    }

    fn is_stale_draft(&self, record: &VerificationRecord, now: Timestamp) -> bool {
        record.status == VerificationStatus::Draft
            && record.updated_at.has_expired(self.params.draft_abandon_secs, now)
    }

    /// Lazily close a stale draft as ABANDONED so the user can start over.
    /// No background sweep exists; this is the only place the state is set.
    fn close_if_stale_draft(
        &self,
        record: &VerificationRecord,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        if !self.is_stale_draft(record, now) {
            return Ok(());
        }
        let mut closed = record.clone();
        closed.status = VerificationStatus::Abandoned;
        closed.version = record.version + 1;
        closed.updated_at = now;
        self.store.update_record(&closed, record.version)?;
        tracing::info!(
            verification_id = %record.verification_id,
            "stale draft closed as abandoned"
        );
        Ok(())
    }

    fn check_age(
        &self,
        profile: &ApplicantProfile,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        let age = age_on(profile.identity.date_of_birth, now.to_utc_date());
        if age < self.params.min_applicant_age || age > self.params.max_applicant_age {
            return Err(VerificationError::AgeOutOfRange {
                age,
                min: self.params.min_applicant_age,
                max: self.params.max_applicant_age,
            });
        }
        Ok(())
    }
}

fn validate_profile(profile: &ApplicantProfile) -> Result<(), VerificationError> {
    if profile.identity.full_name.trim().is_empty() {
        return Err(VerificationError::Validation("full name is required".into()));
    }
    if profile.identity.phone.trim().is_empty() {
        return Err(VerificationError::Validation("phone is required".into()));
    }
    if profile.institution.name.trim().is_empty() {
        return Err(VerificationError::Validation(
            "institution name is required".into(),
        ));
    }
    if profile.enrollment.student_id.trim().is_empty() {
        return Err(VerificationError::Validation("student id is required".into()));
    }
    Ok(())
}
