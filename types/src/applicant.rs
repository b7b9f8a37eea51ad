//! Applicant field data carried by a verification record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who the applicant is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    /// Raw phone number; a hash is stored alongside and the raw value is
    /// masked in any external projection.
    pub phone: String,
    /// ISO 3166-1 alpha-2 country of residence.
    pub country: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstitutionType {
    University,
    College,
    VocationalSchool,
    HighSchool,
    Other,
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::University => "university",
            Self::College => "college",
            Self::VocationalSchool => "vocational_school",
            Self::HighSchool => "high_school",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Where the applicant studies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionInfo {
    pub name: String,
    /// ISO 3166-1 alpha-2 country of the institution.
    pub country: String,
    pub institution_type: InstitutionType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegreeLevel {
    Certificate,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

/// The applicant's enrollment details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentInfo {
    /// Raw institution-issued student id; hashed alongside like the phone.
    pub student_id: String,
    pub enrollment_year: u16,
    pub expected_graduation_year: u16,
    pub degree_program: String,
    pub degree_level: DegreeLevel,
    pub full_time: bool,
}

/// The full applicant submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub identity: IdentityInfo,
    pub institution: InstitutionInfo,
    pub enrollment: EnrollmentInfo,
}

/// A partial update to an applicant profile, section by section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantPatch {
    pub identity: Option<IdentityInfo>,
    pub institution: Option<InstitutionInfo>,
    pub enrollment: Option<EnrollmentInfo>,
}

impl ApplicantPatch {
    pub fn is_empty(&self) -> bool {
        self.identity.is_none() && self.institution.is_none() && self.enrollment.is_none()
    }

    /// Apply this patch to a profile, replacing whole sections.
    pub fn apply_to(&self, profile: &mut ApplicantProfile) {
        if let Some(identity) = &self.identity {
            profile.identity = identity.clone();
        }
        if let Some(institution) = &self.institution {
            profile.institution = institution.clone();
        }
        if let Some(enrollment) = &self.enrollment {
            profile.enrollment = enrollment.clone();
        }
    }
}
