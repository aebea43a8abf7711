//! # KYC Registry Types
//!
//! Stored status is three-valued (what the provider asserted); the
//! decision read back at verification time adds the two derived outcomes,
//! `NotRegistered` and `Expired`.

use serde::{Deserialize, Serialize};

use atoll_core::Timestamp;

/// KYC status as asserted by the provider or regulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Identity verified and approved.
    Approved,
    /// Verification in progress.
    Pending,
    /// Verification failed.
    Rejected,
}

impl KycStatus {
    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored KYC entry: the asserted status and its optional expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycEntry {
    /// The asserted status.
    pub status: KycStatus,
    /// When the assertion lapses; `None` means it does not expire.
    pub expires_at: Option<Timestamp>,
}

impl KycEntry {
    /// Evaluate this entry at ledger time `now`.
    ///
    /// Expiry wins over the stored status: an approved entry past its
    /// expiry reads as `Expired`.
    pub fn decide(&self, now: Timestamp) -> KycDecision {
        match self.expires_at {
            Some(expires) if now > expires => KycDecision::Expired,
            _ => match self.status {
                KycStatus::Approved => KycDecision::Approved,
                KycStatus::Pending => KycDecision::Pending,
                KycStatus::Rejected => KycDecision::Rejected,
            },
        }
    }
}

/// The outcome of a KYC lookup at a specific ledger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycDecision {
    /// The account has never been registered with the KYC provider.
    NotRegistered,
    /// The stored assertion has lapsed.
    Expired,
    /// Verified and current.
    Approved,
    /// Verification in progress.
    Pending,
    /// Verification failed.
    Rejected,
}

impl KycDecision {
    /// Returns the snake_case string identifier for this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRegistered => "not_registered",
            Self::Expired => "expired",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }

    /// Whether this decision clears the account for transfers.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for KycDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
