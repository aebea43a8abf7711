//! # The Registry Store
//!
//! Id-addressed storage for domain instances. Create and update only —
//! there is deliberately no delete operation: a tokenized registry keeps
//! permanent records, and winding an asset down is a status transition,
//! not a removal.

use std::collections::BTreeMap;

use atoll_core::{AssetId, OperationError, Timestamp};

use crate::record::Tokenized;

/// Store of domain instances keyed by asset id.
///
/// The key is always the stored instance's own id; [`Registry::insert`]
/// enforces this, so lookups can trust the map invariant.
#[derive(Debug, Default)]
pub struct Registry<T: Tokenized> {
    assets: BTreeMap<AssetId, T>,
}

impl<T: Tokenized> Registry<T> {
    /// An empty registry.
    pub fn new() -> Self {
        Self { assets: BTreeMap::new() }
    }

    /// Register a newly created instance under its own id.
    ///
    /// Fails with `StateConflict` if the id is already registered — asset
    /// ids are ledger-allocated and must be unique.
    pub fn insert(&mut self, instance: T) -> Result<AssetId, OperationError> {
        let id = instance.asset_id();
        if self.assets.contains_key(&id) {
            return Err(OperationError::state_conflict(format!(
                "asset {id} is already registered"
            )));
        }
        self.assets.insert(id, instance);
        Ok(id)
    }

    /// Resolve an instance by id.
    pub fn get(&self, asset_id: AssetId) -> Result<&T, OperationError> {
        self.assets
            .get(&asset_id)
            .ok_or_else(|| OperationError::not_found(format!("asset {asset_id}")))
    }

    /// Resolve an instance by id for mutation.
    pub fn get_mut(&mut self, asset_id: AssetId) -> Result<&mut T, OperationError> {
        self.assets
            .get_mut(&asset_id)
            .ok_or_else(|| OperationError::not_found(format!("asset {asset_id}")))
    }

    /// Append a metadata fragment to an asset's record and stamp it.
    ///
    /// Fragment content is not validated; callers are trusted.
    pub fn append_metadata(
        &mut self,
        asset_id: AssetId,
        fragment: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), OperationError> {
        let instance = self.get_mut(asset_id)?;
        instance.record_mut().annotate(fragment, now);
        Ok(())
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate instances in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.assets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AssetRecord;
    use atoll_core::{
        AccountId, AssetStatus, AssetType, JurisdictionCode, TokenId,
    };

    // A minimal Tokenized wrapper standing in for a domain module.
    #[derive(Debug)]
    struct Plot {
        record: AssetRecord,
    }

    impl Tokenized for Plot {
        fn record(&self) -> &AssetRecord {
            &self.record
        }
        fn record_mut(&mut self) -> &mut AssetRecord {
            &mut self.record
        }
    }

    fn plot(id: u64) -> Plot {
        let now = Timestamp::from_epoch_secs(1_000).unwrap();
        Plot {
            record: AssetRecord::new(
                AssetId::from_token(TokenId(id)),
                AccountId::new("issuer"),
                AssetType::LandProperty,
                "plot",
                JurisdictionCode::new("FJ").unwrap(),
                "QmDeed",
                AssetStatus::Created,
                AccountId::new("treasury"),
                now,
            ),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        let id = registry.insert(plot(1)).unwrap();
        assert_eq!(registry.get(id).unwrap().asset_id(), id);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.insert(plot(1)).unwrap();
        let err = registry.insert(plot(1)).unwrap_err();
        assert!(matches!(err, OperationError::StateConflict { .. }));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry: Registry<Plot> = Registry::new();
        let err = registry.get(AssetId::from_token(TokenId(9))).unwrap_err();
        assert!(matches!(err, OperationError::NotFound { .. }));
    }

    #[test]
    fn test_append_metadata_stamps_record() {
        let mut registry = Registry::new();
        let id = registry.insert(plot(1)).unwrap();
        let later = Timestamp::from_epoch_secs(5_000).unwrap();
        registry.append_metadata(id, "survey:QmS", later).unwrap();
        let rec = registry.get(id).unwrap().record();
        assert_eq!(rec.metadata.render(), "QmDeed|survey:QmS");
        assert_eq!(rec.last_updated, later);
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut registry = Registry::new();
        registry.insert(plot(3)).unwrap();
        registry.insert(plot(1)).unwrap();
        registry.insert(plot(2)).unwrap();
        let ids: Vec<u64> = registry
            .iter()
            .map(|p| p.asset_id().as_token().value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
