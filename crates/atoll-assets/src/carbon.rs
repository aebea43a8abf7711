//! # Carbon Credits
//!
//! Verified carbon units: one token per tonne of CO2 offset within a
//! vintage window. Issuance draws down a monotonically non-increasing
//! remaining-offset cap; retirement operates on already-issued tokens (a
//! separate pool from the issuance cap) by parking them at the treasury
//! retirement sink and annotating the record.

use serde::{Deserialize, Serialize};

use atoll_compliance::ComplianceGate;
use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

use crate::transfer::{mediated_transfer, TransferRequest};

/// Parameters for creating a carbon credit project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonProjectSpec {
    /// Display name of the credit batch.
    pub name: String,
    /// Token ticker.
    pub unit_name: String,
    /// Credit class (reforestation, blue carbon, cookstoves, ...).
    pub credit_type: String,
    /// External registry holding the project (Verra, Gold Standard, ...).
    pub carbon_registry: String,
    /// Project identifier within that registry.
    pub registry_project_id: String,
    /// Jurisdiction of the underlying project.
    pub jurisdiction: JurisdictionCode,
    /// Project location.
    pub geolocation: String,
    /// Start of the vintage window.
    pub vintage_start: Timestamp,
    /// End of the vintage window; must be after the start.
    pub vintage_end: Timestamp,
    /// Total verified offset in tonnes CO2 (token supply).
    pub total_offset: u64,
    /// Verification methodology reference.
    pub methodology: String,
    /// Monitoring report backing the verification.
    pub monitoring_report: DocumentHash,
    /// Name of the verifying body.
    pub verifier: String,
}

/// A verified carbon credit batch layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonProject {
    record: AssetRecord,
    authorities: AuthoritySet,
    credit_type: String,
    carbon_registry: String,
    registry_project_id: String,
    vintage_start: Timestamp,
    vintage_end: Timestamp,
    total_offset: u64,
    remaining_offset: u64,
    methodology: String,
    verifier: String,
}

impl Tokenized for CarbonProject {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

impl CarbonProject {
    /// Create a carbon credit project and mint its full supply to the
    /// creator's reserve.
    ///
    /// Restricted to the creator role. The vintage window must be
    /// non-empty and the offset positive.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        authorities: AuthoritySet,
        treasury: AccountId,
        spec: CarbonProjectSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;

        if spec.vintage_start >= spec.vintage_end {
            return Err(OperationError::validation(format!(
                "vintage start {} must precede vintage end {}",
                spec.vintage_start, spec.vintage_end
            )));
        }
        if spec.total_offset == 0 {
            return Err(OperationError::validation("total offset must be positive"));
        }

        let note = format!(
            "Carbon credit: {} | Registry: {} | Project: {} | Verified by: {}",
            spec.credit_type, spec.carbon_registry, spec.registry_project_id, spec.verifier
        );
        // One non-divisible token per tonne of CO2.
        let token = ledger.create_token(TokenConfig::fungible(
            spec.total_offset,
            0,
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            spec.unit_name.clone(),
            spec.name.clone(),
            &spec.monitoring_report,
            note,
        ))?;

        let now = ledger.now();
        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::CarbonCredit,
            spec.geolocation,
            spec.jurisdiction,
            spec.monitoring_report.as_str(),
            AssetStatus::Verified,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            credit_type: spec.credit_type,
            carbon_registry: spec.carbon_registry,
            registry_project_id: spec.registry_project_id,
            vintage_start: spec.vintage_start,
            vintage_end: spec.vintage_end,
            total_offset: spec.total_offset,
            remaining_offset: spec.total_offset,
            methodology: spec.methodology,
            verifier: spec.verifier,
        })
    }

    /// Tonnes still issuable against the verification cap.
    pub fn remaining_offset(&self) -> u64 {
        self.remaining_offset
    }

    /// Total verified tonnes.
    pub fn total_offset(&self) -> u64 {
        self.total_offset
    }

    /// Whether the batch currently carries verified status.
    pub fn is_verified(&self) -> bool {
        self.record.status == AssetStatus::Verified
    }

    /// Issue credits from the reserve to a recipient.
    ///
    /// Restricted to the creator role. The remaining offset can never go
    /// negative: issuing more than remains is a state conflict and leaves
    /// the cap untouched.
    pub fn issue_credits<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;
        if amount == 0 {
            return Err(OperationError::validation("issuance amount must be positive"));
        }
        if amount > self.remaining_offset {
            return Err(OperationError::state_conflict(format!(
                "insufficient credits remaining: {} requested, {} available",
                amount, self.remaining_offset
            )));
        }

        let reserve = self.record.creator.clone();
        ledger.transfer_token(self.record.asset_id.as_token(), amount, &reserve, recipient)?;
        self.remaining_offset -= amount;
        self.record.touch(ledger.now());
        Ok(())
    }

    /// Retire issued credits by parking them at the treasury retirement
    /// sink.
    ///
    /// Any holder may retire their own credits. Retirement operates on
    /// already-issued tokens and does not touch the issuance cap. The
    /// retirement is annotated on the record for the audit trail.
    pub fn retire_credits<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        amount: u64,
        beneficiary: &str,
        reason: &str,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        if amount == 0 {
            return Err(OperationError::validation("retirement amount must be positive"));
        }

        let holder = ledger.caller();
        let sink = self.record.treasury.clone();
        ledger.transfer_token(self.record.asset_id.as_token(), amount, &holder, &sink)?;

        let now = ledger.now();
        self.record.annotate(
            format!(
                "retirement:{beneficiary}:{amount}:{} ({reason})",
                now.epoch_secs()
            ),
            now,
        );
        Ok(())
    }

    /// Attach a fresh verification document and update the verifier name.
    ///
    /// Restricted to the creator role.
    pub fn add_verification_document<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        verifier: impl Into<String>,
        verification_date: Timestamp,
        document: &DocumentHash,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;

        self.verifier = verifier.into();
        self.record.annotate(
            format!("verification:{document}:{}", verification_date.epoch_secs()),
            ledger.now(),
        );
        Ok(())
    }

    /// Transfer issued credits between holders through the mediator.
    ///
    /// Only verified batches move.
    pub fn transfer_credits<L: Ledger>(
        &mut self,
        ledger: &mut L,
        gate: &ComplianceGate,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), OperationError> {
        let verified = self.is_verified();
        let request = TransferRequest {
            asset_id,
            token: self.record.asset_id.as_token(),
            from,
            to,
            amount,
        };
        mediated_transfer(ledger, gate, &mut self.record, &request, move |_now| {
            if verified {
                Ok(())
            } else {
                Err(OperationError::state_conflict(
                    "credits are not verified and cannot be transferred",
                ))
            }
        })
    }

    /// Human-readable summary of the credit batch.
    pub fn details(&self) -> String {
        format!(
            "Carbon credit {} | Type: {} | Registry: {} | Project: {} | Vintage: {}-{} | Total offset: {}t | Remaining: {}t | Verified by: {} | Jurisdiction: {}",
            self.record.asset_id,
            self.credit_type,
            self.carbon_registry,
            self.registry_project_id,
            self.vintage_start,
            self.vintage_end,
            self.total_offset,
            self.remaining_offset,
            self.verifier,
            self.record.jurisdiction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_compliance::KycStatus;
    use atoll_ledger::InMemoryLedger;

    fn issuer() -> AccountId {
        AccountId::new("issuer")
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    fn spec(total: u64) -> CarbonProjectSpec {
        CarbonProjectSpec {
            name: "Mangrove Restoration 2025".to_string(),
            unit_name: "VCU".to_string(),
            credit_type: "blue-carbon".to_string(),
            carbon_registry: "Verra".to_string(),
            registry_project_id: "VCS-4821".to_string(),
            jurisdiction: JurisdictionCode::new("MV").unwrap(),
            geolocation: "4.2N,73.5E".to_string(),
            vintage_start: at(0),
            vintage_end: at(31_536_000),
            total_offset: total,
            methodology: "VM0033".to_string(),
            monitoring_report: DocumentHash::new("QmMonitor"),
            verifier: "SCS Global".to_string(),
        }
    }

    fn create(ledger: &mut InMemoryLedger, total: u64) -> CarbonProject {
        CarbonProject::create(
            ledger,
            AuthoritySet::with_creator(issuer()),
            AccountId::new("treasury"),
            spec(total),
        )
        .unwrap()
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(at(1_000_000), issuer())
    }

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn test_create_initializes_remaining_to_total() {
        let mut ledger = ledger();
        let project = create(&mut ledger, 100);
        assert_eq!(project.total_offset(), 100);
        assert_eq!(project.remaining_offset(), 100);
        assert!(project.is_verified());
        // Full supply sits in the creator's reserve.
        assert_eq!(
            ledger.token_balance(project.asset_id().as_token(), &issuer()),
            100
        );
    }

    #[test]
    fn test_create_rejects_empty_vintage() {
        let mut ledger = ledger();
        let mut bad = spec(100);
        bad.vintage_end = bad.vintage_start;
        assert!(matches!(
            CarbonProject::create(
                &mut ledger,
                AuthoritySet::with_creator(issuer()),
                AccountId::new("treasury"),
                bad,
            )
            .unwrap_err(),
            OperationError::Validation { .. }
        ));
    }

    #[test]
    fn test_create_rejects_zero_offset() {
        let mut ledger = ledger();
        assert!(CarbonProject::create(
            &mut ledger,
            AuthoritySet::with_creator(issuer()),
            AccountId::new("treasury"),
            spec(0),
        )
        .is_err());
    }

    // ── Issuance ─────────────────────────────────────────────────────

    #[test]
    fn test_issue_decrements_remaining() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        let buyer = AccountId::new("buyer");
        project.issue_credits(&mut ledger, id, &buyer, 60).unwrap();
        assert_eq!(project.remaining_offset(), 40);
        assert_eq!(ledger.token_balance(id.as_token(), &buyer), 60);
    }

    #[test]
    fn test_issue_beyond_remaining_fails_and_preserves_cap() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        let buyer = AccountId::new("buyer");
        project.issue_credits(&mut ledger, id, &buyer, 60).unwrap();
        let err = project.issue_credits(&mut ledger, id, &buyer, 50).unwrap_err();
        assert!(matches!(err, OperationError::StateConflict { .. }));
        assert_eq!(project.remaining_offset(), 40);
        assert_eq!(ledger.token_balance(id.as_token(), &buyer), 60);
    }

    #[test]
    fn test_issue_exact_remaining_then_one_more() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        let buyer = AccountId::new("buyer");
        project.issue_credits(&mut ledger, id, &buyer, 100).unwrap();
        assert_eq!(project.remaining_offset(), 0);
        assert!(project.issue_credits(&mut ledger, id, &buyer, 1).is_err());
    }

    #[test]
    fn test_issue_requires_creator() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        ledger.set_caller(AccountId::new("mallory"));
        assert!(matches!(
            project
                .issue_credits(&mut ledger, id, &AccountId::new("mallory"), 10)
                .unwrap_err(),
            OperationError::Unauthorized { .. }
        ));
    }

    #[test]
    fn test_issue_zero_rejected() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        assert!(matches!(
            project
                .issue_credits(&mut ledger, id, &AccountId::new("buyer"), 0)
                .unwrap_err(),
            OperationError::Validation { .. }
        ));
    }

    // ── Retirement ───────────────────────────────────────────────────

    #[test]
    fn test_retire_moves_to_sink_without_touching_cap() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        let holder = AccountId::new("holder");
        project.issue_credits(&mut ledger, id, &holder, 30).unwrap();

        ledger.set_caller(holder.clone());
        project
            .retire_credits(&mut ledger, id, 10, "Island Air Ltd", "FY25 offsetting")
            .unwrap();

        assert_eq!(ledger.token_balance(id.as_token(), &holder), 20);
        assert_eq!(
            ledger.token_balance(id.as_token(), &AccountId::new("treasury")),
            10
        );
        // Issuance cap is a separate pool; retirement leaves it alone.
        assert_eq!(project.remaining_offset(), 70);
        assert!(project.record().metadata.render().contains("retirement:Island Air Ltd:10"));
    }

    #[test]
    fn test_retire_more_than_held_fails() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        ledger.set_caller(AccountId::new("holder"));
        let err = project
            .retire_credits(&mut ledger, id, 5, "nobody", "no balance")
            .unwrap_err();
        assert!(matches!(err, OperationError::Ledger(_)));
    }

    // ── Verification documents ───────────────────────────────────────

    #[test]
    fn test_add_verification_document_updates_verifier() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        project
            .add_verification_document(
                &mut ledger,
                id,
                "DNV",
                at(1_100_000),
                &DocumentHash::new("QmVerif"),
            )
            .unwrap();
        assert!(project.details().contains("Verified by: DNV"));
        assert!(project
            .record()
            .metadata
            .render()
            .contains("verification:QmVerif:1100000"));
    }

    // ── Transfers ────────────────────────────────────────────────────

    #[test]
    fn test_transfer_issued_credits() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, 100);
        let id = project.asset_id();
        let holder = AccountId::new("holder");
        project.issue_credits(&mut ledger, id, &holder, 30).unwrap();

        let mut gate = ComplianceGate::new(AccountId::new("regulator"), AccountId::new("kyc"));
        gate.set_kyc_status(&AccountId::new("kyc"), holder.clone(), KycStatus::Approved, None)
            .unwrap();

        ledger.set_caller(holder.clone());
        project
            .transfer_credits(&mut ledger, &gate, id, holder, AccountId::new("buyer"), 15)
            .unwrap();
        assert_eq!(
            ledger.token_balance(id.as_token(), &AccountId::new("buyer")),
            15
        );
    }
}
