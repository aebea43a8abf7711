//! # Asset Vocabulary — Types and Lifecycle Statuses
//!
//! Defines the `AssetType` enum covering all six tokenized asset classes,
//! and the `AssetStatus` vocabulary their lifecycle machines move through.
//! These are the ONE definition used across the entire stack: every `match`
//! must be exhaustive, so adding an asset class or status forces each
//! consumer to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::OperationError;

/// All tokenized asset classes on the platform.
///
/// The string forms are the canonical identifiers carried in compliance
/// rule keys and record exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    /// Real estate with legal-document integration.
    LandProperty,
    /// Marine resources, fishing rights, and coastal concessions.
    BlueEconomy,
    /// Verified carbon offset units.
    CarbonCredit,
    /// Renewable energy infrastructure and its output.
    RenewableEnergy,
    /// Climate-event-triggered financing instruments.
    DisasterBond,
    /// Heritage sites and artifacts under cultural stewardship.
    HeritageAsset,
}

/// Total number of asset classes. Used for exhaustiveness assertions.
pub const ASSET_TYPE_COUNT: usize = 6;

impl AssetType {
    /// Returns all asset classes in canonical order.
    pub fn all() -> &'static [AssetType] {
        &[
            Self::LandProperty,
            Self::BlueEconomy,
            Self::CarbonCredit,
            Self::RenewableEnergy,
            Self::DisasterBond,
            Self::HeritageAsset,
        ]
    }

    /// Returns the kebab-case string identifier for this asset class.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LandProperty => "land-property",
            Self::BlueEconomy => "blue-economy",
            Self::CarbonCredit => "carbon-credit",
            Self::RenewableEnergy => "renewable-energy",
            Self::DisasterBond => "disaster-bond",
            Self::HeritageAsset => "heritage-asset",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "land-property" => Ok(Self::LandProperty),
            "blue-economy" => Ok(Self::BlueEconomy),
            "carbon-credit" => Ok(Self::CarbonCredit),
            "renewable-energy" => Ok(Self::RenewableEnergy),
            "disaster-bond" => Ok(Self::DisasterBond),
            "heritage-asset" => Ok(Self::HeritageAsset),
            other => Err(OperationError::validation(format!(
                "unknown asset type: {other:?}"
            ))),
        }
    }
}

/// The lifecycle status vocabulary shared by all asset records.
///
/// Each domain module moves its record through a subset of these states;
/// the transition rules are domain-specific and enforced by the module
/// owning the record. The disaster bond uses the richest subset
/// (`Active → Triggered → Paid → Completed` or `Active → Matured`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Registered on the ledger, no further qualification (land property).
    Created,
    /// Cleared for transfer by its issuing authority (marine, energy).
    Authorized,
    /// Independently verified (carbon credits).
    Verified,
    /// Recorded with stewardship attached (heritage assets).
    Registered,
    /// Live and accepting investment (disaster bonds).
    Active,
    /// Payout condition met, awaiting disbursement (disaster bonds).
    Triggered,
    /// Reached maturity without triggering; claims open (disaster bonds).
    Matured,
    /// Coverage disbursed to the beneficiary (disaster bonds).
    Paid,
    /// Fully wound down (disaster bonds after a paid trigger matures).
    Completed,
    /// Transfers frozen by a regulator.
    Suspended,
}

impl AssetStatus {
    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Authorized => "authorized",
            Self::Verified => "verified",
            Self::Registered => "registered",
            Self::Active => "active",
            Self::Triggered => "triggered",
            Self::Matured => "matured",
            Self::Paid => "paid",
            Self::Completed => "completed",
            Self::Suspended => "suspended",
        }
    }

    /// Whether this status is terminal for the owning lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Completed)
    }

    /// Whether the status blocks ownership-changing operations.
    pub fn blocks_transfer(&self) -> bool {
        matches!(self, Self::Suspended)
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_count() {
        assert_eq!(AssetType::all().len(), ASSET_TYPE_COUNT);
    }

    #[test]
    fn test_all_types_unique() {
        let mut seen = std::collections::HashSet::new();
        for ty in AssetType::all() {
            assert!(seen.insert(ty), "duplicate asset type: {ty}");
        }
    }

    #[test]
    fn test_as_str_round_trip() {
        for ty in AssetType::all() {
            assert_eq!(ty.as_str().parse::<AssetType>().unwrap(), *ty);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("coral-futures".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&AssetType::DisasterBond).unwrap();
        assert_eq!(json, "\"disaster-bond\"");
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(AssetStatus::Authorized.to_string(), "authorized");
        assert_eq!(AssetStatus::Matured.to_string(), "matured");
    }

    #[test]
    fn test_status_terminality() {
        assert!(AssetStatus::Paid.is_terminal());
        assert!(AssetStatus::Completed.is_terminal());
        assert!(!AssetStatus::Triggered.is_terminal());
    }

    #[test]
    fn test_suspended_blocks_transfer() {
        assert!(AssetStatus::Suspended.blocks_transfer());
        assert!(!AssetStatus::Verified.blocks_transfer());
    }
}
