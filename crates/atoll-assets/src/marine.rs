//! # Marine Rights — Blue Economy Assets
//!
//! Tokenized marine resources: fishing rights, aquaculture leases, and
//! coastal tourism concessions. Most rights are fractionalized for shared
//! access, so the primary token is a divisible pool.
//!
//! ## Validity
//!
//! Validity is derived, never stored: a right is valid when it has no
//! expiration, or when the ledger's current time is still before it.
//! There is no expiry sweep — an expired right simply stops passing the
//! validity check the next time anything asks.

use serde::{Deserialize, Serialize};

use atoll_compliance::ComplianceGate;
use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

use crate::transfer::{mediated_transfer, TransferRequest};

/// Default fractionalization of a marine right: one million base units
/// with three decimal places of divisibility.
const MARINE_TOKEN_SUPPLY: u64 = 1_000_000;
const MARINE_TOKEN_DECIMALS: u32 = 3;

/// Parameters for creating a marine right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarineAssetSpec {
    /// Resource name, used to derive the token name (`BLUE-<name>`).
    pub resource_name: String,
    /// Resource class (fishing right, aquaculture lease, concession).
    pub resource_type: String,
    /// Named marine zone the right applies to.
    pub marine_zone: String,
    /// Sustainability rating, 1–100.
    pub sustainability_rating: u8,
    /// Validity period in seconds from creation; zero means perpetual.
    pub validity_period_secs: u64,
    /// Primary documentation bundle.
    pub documents: DocumentHash,
    /// Geographic boundary of the right.
    pub geo_boundary: String,
    /// Jurisdiction issuing the right.
    pub jurisdiction: JurisdictionCode,
}

/// A tokenized marine right layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarineAsset {
    record: AssetRecord,
    authorities: AuthoritySet,
    resource_type: String,
    marine_zone: String,
    sustainability_rating: u8,
    /// `None` means the right is perpetual.
    expiration_date: Option<Timestamp>,
}

impl Tokenized for MarineAsset {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

fn validate_rating(rating: u8) -> Result<(), OperationError> {
    if !(1..=100).contains(&rating) {
        return Err(OperationError::validation(format!(
            "sustainability rating must be between 1 and 100, got {rating}"
        )));
    }
    Ok(())
}

impl MarineAsset {
    /// Create a tokenized marine right.
    ///
    /// Restricted to the creator role. The right's expiration is fixed at
    /// `now + validity_period_secs`; a zero period makes it perpetual.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        authorities: AuthoritySet,
        treasury: AccountId,
        spec: MarineAssetSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;
        validate_rating(spec.sustainability_rating)?;

        let now = ledger.now();
        let expiration_date = if spec.validity_period_secs > 0 {
            Some(now.plus_secs(spec.validity_period_secs))
        } else {
            None
        };

        let note = format!(
            "Blue economy asset: {} | Marine zone: {} | Sustainability: {}/100",
            spec.resource_type, spec.marine_zone, spec.sustainability_rating
        );
        let token = ledger.create_token(TokenConfig::fungible(
            MARINE_TOKEN_SUPPLY,
            MARINE_TOKEN_DECIMALS,
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            "BLUE",
            format!("BLUE-{}", spec.resource_name),
            &spec.documents,
            note,
        ))?;

        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::BlueEconomy,
            spec.geo_boundary,
            spec.jurisdiction,
            spec.documents.as_str(),
            AssetStatus::Authorized,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            resource_type: spec.resource_type,
            marine_zone: spec.marine_zone,
            sustainability_rating: spec.sustainability_rating,
            expiration_date,
        })
    }

    /// Whether the right is valid at ledger time `now`.
    ///
    /// Perpetual rights are always valid; expiring rights are valid
    /// strictly before their expiration.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        match self.expiration_date {
            None => true,
            Some(expiration) => now < expiration,
        }
    }

    /// The right's expiration, if any.
    pub fn expiration_date(&self) -> Option<Timestamp> {
        self.expiration_date
    }

    /// Current sustainability rating.
    pub fn sustainability_rating(&self) -> u8 {
        self.sustainability_rating
    }

    /// Update the sustainability rating after an environmental assessment.
    ///
    /// Restricted to the creator role; the assessment document is appended
    /// to the metadata log.
    pub fn update_sustainability_rating<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        new_rating: u8,
        assessment: &DocumentHash,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;
        validate_rating(new_rating)?;

        self.sustainability_rating = new_rating;
        self.record
            .annotate(format!("assessment:{assessment}"), ledger.now());
        Ok(())
    }

    /// Extend the validity period of an expiring right.
    ///
    /// Restricted to the creator role. Perpetual rights remain perpetual —
    /// the extension is a no-op for them.
    pub fn extend_validity<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        extension_secs: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;

        if let Some(expiration) = self.expiration_date {
            self.expiration_date = Some(expiration.plus_secs(extension_secs));
            self.record.touch(ledger.now());
        }
        Ok(())
    }

    /// Transfer units of the right through the mediator.
    ///
    /// Expired rights cannot move.
    pub fn transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        gate: &ComplianceGate,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), OperationError> {
        let expiration = self.expiration_date;
        let request = TransferRequest {
            asset_id,
            token: self.record.asset_id.as_token(),
            from,
            to,
            amount,
        };
        mediated_transfer(ledger, gate, &mut self.record, &request, move |now| {
            match expiration {
                Some(expiry) if now >= expiry => Err(OperationError::state_conflict(
                    "marine right has expired and cannot be transferred",
                )),
                _ => Ok(()),
            }
        })
    }

    /// Human-readable summary of the right at ledger time `now`.
    pub fn details(&self, now: Timestamp) -> String {
        let mut details = format!(
            "Marine asset {} | Type: {} | Marine zone: {} | Jurisdiction: {} | Sustainability: {}/100",
            self.record.asset_id,
            self.resource_type,
            self.marine_zone,
            self.record.jurisdiction,
            self.sustainability_rating,
        );
        match self.expiration_date {
            None => details.push_str(" | Validity: perpetual"),
            Some(expiration) => {
                let status = if self.is_valid(now) { "valid" } else { "expired" };
                details.push_str(&format!(" | Expires: {expiration} | Status: {status}"));
            }
        }
        details
    }
}
