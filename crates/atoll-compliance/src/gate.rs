//! # The Compliance Gate
//!
//! One gate instance serves every asset module. It owns four stores: KYC
//! entries, jurisdiction regulators, jurisdiction rule sets, and asset
//! compliance records. Privileged writes are restricted to the main
//! regulator (and the KYC provider for KYC writes, a jurisdiction's own
//! regulator for its rules); reads are open.
//!
//! Caller identity and ledger time are passed in explicitly — the gate
//! never reads a clock and never guesses who is asking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atoll_core::{
    AccountId, AssetId, AssetType, JurisdictionCode, OperationError, Timestamp,
};

use crate::kyc::{KycDecision, KycEntry, KycStatus};
use crate::status::{ComplianceRecord, ComplianceStatus};

/// Centralized KYC/jurisdiction/asset-status authorization checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceGate {
    /// The platform's main regulator.
    regulator: AccountId,
    /// The designated KYC provider.
    kyc_provider: AccountId,
    kyc: BTreeMap<AccountId, KycEntry>,
    jurisdiction_regulators: BTreeMap<JurisdictionCode, AccountId>,
    // Keyed jurisdiction first, then asset type; the wildcard jurisdiction
    // lives in the same map under `JurisdictionCode::wildcard()`.
    jurisdiction_rules: BTreeMap<JurisdictionCode, BTreeMap<AssetType, String>>,
    asset_status: BTreeMap<AssetId, ComplianceRecord>,
}

impl ComplianceGate {
    /// Initialize the gate with its main regulator and KYC provider.
    pub fn new(regulator: AccountId, kyc_provider: AccountId) -> Self {
        Self {
            regulator,
            kyc_provider,
            kyc: BTreeMap::new(),
            jurisdiction_regulators: BTreeMap::new(),
            jurisdiction_rules: BTreeMap::new(),
            asset_status: BTreeMap::new(),
        }
    }

    /// The main regulator account.
    pub fn regulator(&self) -> &AccountId {
        &self.regulator
    }

    // ── KYC ──────────────────────────────────────────────────────────

    /// Record a KYC assertion for `account`.
    ///
    /// Restricted to the main regulator or the KYC provider.
    pub fn set_kyc_status(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        status: KycStatus,
        expires_at: Option<Timestamp>,
    ) -> Result<(), OperationError> {
        if caller != &self.regulator && caller != &self.kyc_provider {
            return Err(OperationError::unauthorized(
                "only the main regulator or the KYC provider may set KYC status",
            ));
        }
        self.kyc.insert(account, KycEntry { status, expires_at });
        Ok(())
    }

    /// Evaluate `account`'s KYC standing at ledger time `now`.
    ///
    /// `NotRegistered` for accounts never seen; `Expired` once `now` is
    /// past a set expiry, regardless of the stored status. Expiry is
    /// evaluated lazily at lookup — nothing sweeps the store.
    pub fn kyc_decision(&self, account: &AccountId, now: Timestamp) -> KycDecision {
        match self.kyc.get(account) {
            None => KycDecision::NotRegistered,
            Some(entry) => entry.decide(now),
        }
    }

    // ── Jurisdiction regulators and rules ────────────────────────────

    /// Register the regulator for a jurisdiction. One regulator per code;
    /// the last write wins.
    ///
    /// Restricted to the main regulator.
    pub fn register_jurisdiction_regulator(
        &mut self,
        caller: &AccountId,
        code: JurisdictionCode,
        regulator: AccountId,
    ) -> Result<(), OperationError> {
        if caller != &self.regulator {
            return Err(OperationError::unauthorized(
                "only the main regulator may register jurisdiction regulators",
            ));
        }
        self.jurisdiction_regulators.insert(code, regulator);
        Ok(())
    }

    /// The registered regulator for `code`, if any.
    pub fn jurisdiction_regulator(&self, code: &JurisdictionCode) -> Option<&AccountId> {
        self.jurisdiction_regulators.get(code)
    }

    /// Set the rule blob for a jurisdiction and asset type.
    ///
    /// Restricted to the main regulator or the jurisdiction's own
    /// registered regulator.
    pub fn set_jurisdiction_rules(
        &mut self,
        caller: &AccountId,
        code: JurisdictionCode,
        asset_type: AssetType,
        rules: impl Into<String>,
    ) -> Result<(), OperationError> {
        let is_main = caller == &self.regulator;
        let is_local = self
            .jurisdiction_regulators
            .get(&code)
            .is_some_and(|reg| reg == caller);
        if !is_main && !is_local {
            return Err(OperationError::unauthorized(
                "only the main regulator or the jurisdiction's regulator may set rules",
            ));
        }
        self.jurisdiction_rules
            .entry(code)
            .or_default()
            .insert(asset_type, rules.into());
        Ok(())
    }

    /// Look up the rules for a jurisdiction and asset type.
    ///
    /// Exact match first, then the `ALL` wildcard for the same asset
    /// type. `None` means no rules are defined.
    pub fn jurisdiction_rules(
        &self,
        code: &JurisdictionCode,
        asset_type: AssetType,
    ) -> Option<&str> {
        if let Some(rules) = self
            .jurisdiction_rules
            .get(code)
            .and_then(|by_type| by_type.get(&asset_type))
        {
            return Some(rules.as_str());
        }
        self.jurisdiction_rules
            .get(&JurisdictionCode::wildcard())
            .and_then(|by_type| by_type.get(&asset_type))
            .map(String::as_str)
    }

    // ── Asset compliance status ──────────────────────────────────────

    /// Assign a compliance status to an asset.
    ///
    /// Restricted to the main regulator.
    pub fn set_asset_compliance_status(
        &mut self,
        caller: &AccountId,
        asset_id: AssetId,
        status: ComplianceStatus,
        notes: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), OperationError> {
        if caller != &self.regulator {
            return Err(OperationError::unauthorized(
                "only the main regulator may set asset compliance status",
            ));
        }
        self.asset_status.insert(
            asset_id,
            ComplianceRecord { status, notes: notes.into(), updated_at: now },
        );
        Ok(())
    }

    /// The compliance record for an asset; `None` for untracked assets.
    pub fn asset_compliance_status(&self, asset_id: AssetId) -> Option<&ComplianceRecord> {
        self.asset_status.get(&asset_id)
    }

    // ── The verification predicate ───────────────────────────────────

    /// Whether `account` may transact with `asset_id` at ledger time
    /// `now`.
    ///
    /// True only if the KYC decision is `Approved` and the asset's
    /// compliance status does not block transfers. An asset with no
    /// compliance record passes — the permissive default for assets
    /// predating compliance tracking.
    pub fn verify_transaction_compliance(
        &self,
        account: &AccountId,
        asset_id: AssetId,
        now: Timestamp,
    ) -> bool {
        if !self.kyc_decision(account, now).is_approved() {
            return false;
        }
        match self.asset_status.get(&asset_id) {
            Some(record) => !record.status.blocks_transfer(),
            None => true,
        }
    }
}
