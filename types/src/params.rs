//! Tunable parameters for the verification core.
//!
//! Operators override individual values via a TOML file; anything omitted
//! falls back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All tunable knobs of the verification core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Minimum applicant age (inclusive) at creation time.
    #[serde(default = "default_min_age")]
    pub min_applicant_age: i32,

    /// Maximum applicant age (inclusive) at creation time.
    #[serde(default = "default_max_age")]
    pub max_applicant_age: i32,

    /// Cooldown after a rejection before re-application is permitted.
    /// Default: 30 days.
    #[serde(default = "default_reapply_cooldown")]
    pub reapply_cooldown_secs: u64,

    /// How long an untouched draft survives before it is lazily closed as
    /// abandoned at the next creation attempt. Default: 90 days.
    #[serde(default = "default_draft_abandon")]
    pub draft_abandon_secs: u64,

    /// Byte ceiling for image uploads. Default: 5 MiB.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Byte ceiling for PDF uploads. Default: 10 MiB.
    #[serde(default = "default_max_pdf_bytes")]
    pub max_pdf_bytes: u64,

    /// Maximum documents attachable to one verification record.
    #[serde(default = "default_max_documents")]
    pub max_documents_per_verification: usize,
}

fn default_min_age() -> i32 {
    16
}
fn default_max_age() -> i32 {
    35
}
fn default_reapply_cooldown() -> u64 {
    30 * 86_400
}
fn default_draft_abandon() -> u64 {
    90 * 86_400
}
fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}
fn default_max_pdf_bytes() -> u64 {
    10 * 1024 * 1024
}
fn default_max_documents() -> usize {
    20
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            min_applicant_age: default_min_age(),
            max_applicant_age: default_max_age(),
            reapply_cooldown_secs: default_reapply_cooldown(),
            draft_abandon_secs: default_draft_abandon(),
            max_image_bytes: default_max_image_bytes(),
            max_pdf_bytes: default_max_pdf_bytes(),
            max_documents_per_verification: default_max_documents(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to parse params: {0}")]
    Parse(String),

    #[error("invalid params: {0}")]
    Invalid(String),
}

impl VerificationParams {
    /// Parse params from TOML, filling omitted fields with defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ParamsError> {
        let params: Self =
            toml::from_str(contents).map_err(|e| ParamsError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.min_applicant_age > self.max_applicant_age {
            return Err(ParamsError::Invalid(format!(
                "min_applicant_age {} exceeds max_applicant_age {}",
                self.min_applicant_age, self.max_applicant_age
            )));
        }
        if self.max_documents_per_verification == 0 {
            return Err(ParamsError::Invalid(
                "max_documents_per_verification must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
