//! # Land & Property
//!
//! Real-estate deed tokens with legal-document integration. A property is
//! a single-unit token; shared ownership is introduced by a one-way
//! fractionalization that mints a divisible fraction pool. Once
//! fractionalized, the deed itself stops moving — the fractions carry
//! ownership instead.

use serde::{Deserialize, Serialize};

use atoll_compliance::ComplianceGate;
use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp, TokenId,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

use crate::transfer::{mediated_transfer, TransferRequest};

/// Parameters for tokenizing a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAssetSpec {
    /// Display name of the deed token.
    pub name: String,
    /// Token ticker.
    pub unit_name: String,
    /// Property class (residential, commercial, agricultural, ...).
    pub property_type: String,
    /// Legal parcel or title identifier.
    pub legal_identifier: String,
    /// Jurisdiction of record.
    pub jurisdiction: JurisdictionCode,
    /// Property location.
    pub geolocation: String,
    /// Appraised value at creation.
    pub valuation_amount: u64,
    /// Primary legal document bundle.
    pub legal_document: DocumentHash,
}

/// A tokenized property layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAsset {
    record: AssetRecord,
    authorities: AuthoritySet,
    property_type: String,
    legal_identifier: String,
    valuation_amount: u64,
    valuation_date: Timestamp,
    /// The fraction pool, once fractionalized. One-way: never cleared.
    fraction_token: Option<TokenId>,
}

impl Tokenized for PropertyAsset {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

impl PropertyAsset {
    /// Tokenize a property as a single-unit deed token.
    ///
    /// Restricted to the creator role.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        authorities: AuthoritySet,
        treasury: AccountId,
        spec: PropertyAssetSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;

        let note = format!(
            "Property: {} | Legal ID: {} | Jurisdiction: {}",
            spec.property_type, spec.legal_identifier, spec.jurisdiction
        );
        let token = ledger.create_token(TokenConfig::single_unit(
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            spec.unit_name.clone(),
            spec.name.clone(),
            &spec.legal_document,
            note,
        ))?;

        let now = ledger.now();
        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::LandProperty,
            spec.geolocation,
            spec.jurisdiction,
            spec.legal_document.as_str(),
            AssetStatus::Created,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            property_type: spec.property_type,
            legal_identifier: spec.legal_identifier,
            valuation_amount: spec.valuation_amount,
            valuation_date: now,
            fraction_token: None,
        })
    }

    /// Whether the property has been fractionalized.
    pub fn is_fractionalized(&self) -> bool {
        self.fraction_token.is_some()
    }

    /// The fraction pool token, if fractionalized.
    pub fn fraction_token(&self) -> Option<TokenId> {
        self.fraction_token
    }

    /// Current appraised value and its date.
    pub fn valuation(&self) -> (u64, Timestamp) {
        (self.valuation_amount, self.valuation_date)
    }

    /// Fractionalize the property into a divisible ownership pool.
    ///
    /// Restricted to the creator role. One-way: a property can only be
    /// fractionalized once.
    pub fn fractionalize<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        fraction_name: impl Into<String>,
        fraction_unit: impl Into<String>,
        fraction_count: u64,
        fraction_decimals: u32,
    ) -> Result<TokenId, OperationError> {
        self.record.require_id(asset_id)?;
        let caller = ledger.caller();
        self.authorities.require(Role::Creator, &caller)?;
        if self.fraction_token.is_some() {
            return Err(OperationError::state_conflict(
                "property is already fractionalized",
            ));
        }
        if fraction_count == 0 {
            return Err(OperationError::validation("fraction count must be positive"));
        }

        let note = format!(
            "Fractionalized property: {} | Deed: {} | Legal ID: {}",
            self.property_type, self.record.asset_id, self.legal_identifier
        );
        let document = DocumentHash::new(self.record.metadata.render());
        let token = ledger.create_token(TokenConfig::fungible(
            fraction_count,
            fraction_decimals,
            TokenAuthorities::managed_by(self.record.treasury.clone(), caller),
            fraction_unit,
            fraction_name,
            &document,
            note,
        ))?;

        self.fraction_token = Some(token);
        self.record.touch(ledger.now());
        Ok(token)
    }

    /// Record a fresh appraisal.
    ///
    /// Restricted to the creator role; the appraisal document is appended
    /// to the metadata log and the valuation date stamped.
    pub fn update_valuation<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        new_valuation: u64,
        appraisal: &DocumentHash,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;

        let now = ledger.now();
        self.valuation_amount = new_valuation;
        self.valuation_date = now;
        self.record.annotate(format!("appraisal:{appraisal}"), now);
        Ok(())
    }

    /// Append a legal document to the record.
    ///
    /// Restricted to the creator role. When the property is
    /// fractionalized, the fraction pool's authorities are refreshed so
    /// the management chain stays consistent with the deed.
    pub fn update_legal_documentation<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        document: &DocumentHash,
        document_type: &str,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        let caller = ledger.caller();
        self.authorities.require(Role::Creator, &caller)?;

        self.record
            .annotate(format!("{document_type}:{document}"), ledger.now());

        if let Some(fraction) = self.fraction_token {
            ledger.reconfigure_token(
                fraction,
                TokenAuthorities::managed_by(self.record.treasury.clone(), caller),
            )?;
        }
        Ok(())
    }

    /// Transfer the whole deed through the mediator.
    ///
    /// Blocked for fractionalized properties — ownership moves through the
    /// fraction tokens instead. The deed is a single unit, so the amount
    /// is always 1.
    pub fn transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        gate: &ComplianceGate,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
    ) -> Result<(), OperationError> {
        let fractionalized = self.is_fractionalized();
        let request = TransferRequest {
            asset_id,
            token: self.record.asset_id.as_token(),
            from,
            to,
            amount: 1,
        };
        mediated_transfer(ledger, gate, &mut self.record, &request, move |_now| {
            if fractionalized {
                Err(OperationError::state_conflict(
                    "property is fractionalized; transfer fraction tokens instead",
                ))
            } else {
                Ok(())
            }
        })
    }

    /// Human-readable summary of the property.
    pub fn details(&self) -> String {
        let mut details = format!(
            "Property {} | Type: {} | Legal ID: {} | Jurisdiction: {} | Valuation: {} | Fractionalized: {}",
            self.record.asset_id,
            self.property_type,
            self.legal_identifier,
            self.record.jurisdiction,
            self.valuation_amount,
            if self.is_fractionalized() { "yes" } else { "no" },
        );
        if let Some(fraction) = self.fraction_token {
            details.push_str(&format!(" | Fraction pool: {fraction}"));
        }
        details
    }
}
