//! Actor roles resolved by the external authorization provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is performing an operation against the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    /// The student who owns the verification record.
    Student,
    /// A human reviewer with adjudication rights.
    Reviewer,
    /// A platform administrator with adjudication rights.
    Admin,
    /// Automated platform processes (e.g. document review pipelines).
    System,
}

impl ActorRole {
    /// Whether this role may issue status transitions and review documents.
    pub fn can_adjudicate(&self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin | Self::System)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
