//! # The Asset Record
//!
//! One record per tokenized asset instance. The id and creator are fixed
//! at creation; everything else mutates only through the operations of the
//! owning domain module, each of which stamps `last_updated`.

use serde::{Deserialize, Serialize};

use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, JurisdictionCode, MetadataLog, OperationError,
    Timestamp,
};

/// Canonical per-instance state of one tokenized asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Ledger-assigned identifier; immutable once set.
    pub asset_id: AssetId,
    /// Identity that created the asset; immutable.
    pub creator: AccountId,
    /// The asset class.
    pub asset_type: AssetType,
    /// Free-form location string (coordinates, zone boundary).
    pub geolocation: String,
    /// Jurisdiction used for compliance lookups.
    pub jurisdiction: JurisdictionCode,
    /// Append-only log of document references and event annotations.
    pub metadata: MetadataLog,
    /// Current lifecycle status label; transition rules are owned by the
    /// domain module.
    pub status: AssetStatus,
    /// Operational account holding escrowed funds and token management
    /// authorities for this asset.
    pub treasury: AccountId,
    /// When the asset was created.
    pub created_at: Timestamp,
    /// Ledger time of the last mutation.
    pub last_updated: Timestamp,
}

impl AssetRecord {
    /// Create a record at `now` with the given initial status.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asset_id: AssetId,
        creator: AccountId,
        asset_type: AssetType,
        geolocation: impl Into<String>,
        jurisdiction: JurisdictionCode,
        metadata_seed: impl Into<String>,
        status: AssetStatus,
        treasury: AccountId,
        now: Timestamp,
    ) -> Self {
        Self {
            asset_id,
            creator,
            asset_type,
            geolocation: geolocation.into(),
            jurisdiction,
            metadata: MetadataLog::seeded(metadata_seed),
            status,
            treasury,
            created_at: now,
            last_updated: now,
        }
    }

    /// Verify a caller-supplied id against the stored id.
    ///
    /// Several modules share one record slot per instance; every mutating
    /// operation runs this check first so a stale or cross-module id can
    /// never address the wrong record.
    pub fn require_id(&self, asset_id: AssetId) -> Result<(), OperationError> {
        if self.asset_id == asset_id {
            Ok(())
        } else {
            Err(OperationError::not_found(format!(
                "asset id mismatch: supplied {asset_id}, record holds {}",
                self.asset_id
            )))
        }
    }

    /// Stamp the record as mutated at `now`.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_updated = now;
    }

    /// Append a metadata fragment and stamp the record.
    pub fn annotate(&mut self, fragment: impl Into<String>, now: Timestamp) {
        self.metadata.append(fragment);
        self.touch(now);
    }
}

/// Implemented by every domain instance that embeds an [`AssetRecord`].
///
/// Gives the registry and the transfer mediator uniform access to the
/// shared record without knowing the asset class.
pub trait Tokenized {
    /// The embedded canonical record.
    fn record(&self) -> &AssetRecord;

    /// Mutable access to the embedded record.
    fn record_mut(&mut self) -> &mut AssetRecord;

    /// The asset's canonical id.
    fn asset_id(&self) -> AssetId {
        self.record().asset_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_core::TokenId;

    fn record() -> AssetRecord {
        let now = Timestamp::from_epoch_secs(1_000).unwrap();
        AssetRecord::new(
            AssetId::from_token(TokenId(7)),
            AccountId::new("issuer"),
            AssetType::BlueEconomy,
            "16.7S,179.9E",
            JurisdictionCode::new("FJ").unwrap(),
            "QmDocs",
            AssetStatus::Authorized,
            AccountId::new("treasury"),
            now,
        )
    }

    #[test]
    fn test_new_record_reflects_inputs() {
        let rec = record();
        assert_eq!(rec.asset_id, AssetId::from_token(TokenId(7)));
        assert_eq!(rec.creator, AccountId::new("issuer"));
        assert_eq!(rec.asset_type, AssetType::BlueEconomy);
        assert_eq!(rec.status, AssetStatus::Authorized);
        assert_eq!(rec.metadata.render(), "QmDocs");
        assert_eq!(rec.created_at, rec.last_updated);
    }

    #[test]
    fn test_require_id_match() {
        let rec = record();
        assert!(rec.require_id(AssetId::from_token(TokenId(7))).is_ok());
    }

    #[test]
    fn test_require_id_mismatch_is_not_found() {
        let rec = record();
        let err = rec.require_id(AssetId::from_token(TokenId(8))).unwrap_err();
        assert!(matches!(err, OperationError::NotFound { .. }));
    }

    #[test]
    fn test_annotate_appends_and_stamps() {
        let mut rec = record();
        let later = Timestamp::from_epoch_secs(2_000).unwrap();
        rec.annotate("assessment:QmA", later);
        assert_eq!(rec.metadata.render(), "QmDocs|assessment:QmA");
        assert_eq!(rec.last_updated, later);
    }
}
