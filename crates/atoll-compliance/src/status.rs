//! # Asset Compliance Records
//!
//! Structured status/notes/timestamp entries, one per tracked asset.

use serde::{Deserialize, Serialize};

use atoll_core::Timestamp;

/// Regulator-assigned compliance status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Reviewed and cleared.
    Compliant,
    /// Review in progress.
    Pending,
    /// Found non-compliant; transfers blocked.
    NonCompliant,
    /// Suspended by the regulator; transfers blocked.
    Suspended,
}

impl ComplianceStatus {
    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Pending => "pending",
            Self::NonCompliant => "non_compliant",
            Self::Suspended => "suspended",
        }
    }

    /// Whether this status blocks transfers of the asset.
    pub fn blocks_transfer(&self) -> bool {
        matches!(self, Self::NonCompliant | Self::Suspended)
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compliance entry for one asset: the status, the regulator's notes,
/// and when it was last set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// The assigned status.
    pub status: ComplianceStatus,
    /// Free-form regulator notes.
    pub notes: String,
    /// Ledger time the status was assigned.
    pub updated_at: Timestamp,
}
