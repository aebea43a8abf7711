//! # Disaster Recovery Bonds
//!
//! Climate-event-triggered financing for vulnerable regions. Investors
//! buy bond tokens; if a measured oracle value reaches the trigger
//! threshold before maturity, the coverage amount is paid to a
//! beneficiary and investors absorb the loss. If the bond matures without
//! triggering, bondholders claim principal plus simple interest.
//!
//! ## States
//!
//! ```text
//! active ──trigger──▶ triggered ──payout──▶ paid ──maturity──▶ completed
//!   │
//!   └──maturity (untriggered)──▶ matured ──claims──▶ (entries drained)
//! ```
//!
//! Both branches are terminal: `paid`/`completed` closes the disaster
//! path, and `matured` only drains — each bondholder entry is deleted on
//! claim, so a second claim finds nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp, SECONDS_PER_YEAR,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

/// Bond token pool: one million units with six decimal places, allocated
/// pro-rata to investment size.
const BOND_TOKEN_SUPPLY: u64 = 1_000_000;
const BOND_TOKEN_DECIMALS: u32 = 6;

/// Basis points denominator (10000 = 100%).
const BPS_DENOMINATOR: u64 = 10_000;

/// Parameters for creating a disaster recovery bond.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondSpec {
    /// Display name of the bond.
    pub name: String,
    /// Token ticker.
    pub unit_name: String,
    /// Bond class (catastrophe, resilience, parametric, ...).
    pub bond_type: String,
    /// The measured quantity driving the trigger (wind speed, rainfall,
    /// quake magnitude).
    pub trigger_type: String,
    /// Oracle value at or above which the payout condition activates.
    pub trigger_threshold: u64,
    /// Amount paid to the beneficiary on trigger.
    pub coverage_amount: u64,
    /// When the bond matures.
    pub maturity_date: Timestamp,
    /// Simple annual interest for the no-trigger path, in basis points.
    pub interest_rate_bps: u64,
    /// Jurisdiction of issue.
    pub jurisdiction: JurisdictionCode,
    /// Covered region.
    pub geolocation: String,
    /// Bond prospectus and terms.
    pub bond_document: DocumentHash,
    /// Total value of the bond issue; must cover the coverage amount.
    pub total_bond_value: u64,
}

/// A disaster recovery bond layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterBond {
    record: AssetRecord,
    authorities: AuthoritySet,
    bond_name: String,
    bond_type: String,
    trigger_type: String,
    trigger_threshold: u64,
    coverage_amount: u64,
    maturity_date: Timestamp,
    interest_rate_bps: u64,
    issue_date: Timestamp,
    /// One-way flag: flips false→true at most once.
    triggered: bool,
    total_bond_value: u64,
    /// Cumulative investment per bondholder; entries are removed on claim.
    bondholders: BTreeMap<AccountId, u64>,
}

impl Tokenized for DisasterBond {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

impl DisasterBond {
    /// Issue a disaster recovery bond.
    ///
    /// Restricted to the creator role. Maturity must lie in the future
    /// and the issue value must cover the promised payout.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        authorities: AuthoritySet,
        treasury: AccountId,
        spec: BondSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;

        let now = ledger.now();
        if spec.maturity_date <= now {
            return Err(OperationError::validation(format!(
                "maturity date {} must be in the future (now {now})",
                spec.maturity_date
            )));
        }
        if spec.total_bond_value < spec.coverage_amount {
            return Err(OperationError::validation(format!(
                "total bond value {} must cover the coverage amount {}",
                spec.total_bond_value, spec.coverage_amount
            )));
        }

        let note = format!(
            "Disaster recovery bond: {} | Trigger: {}",
            spec.bond_type, spec.trigger_type
        );
        let token = ledger.create_token(TokenConfig::fungible(
            BOND_TOKEN_SUPPLY,
            BOND_TOKEN_DECIMALS,
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            spec.unit_name.clone(),
            spec.name.clone(),
            &spec.bond_document,
            note,
        ))?;

        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::DisasterBond,
            spec.geolocation,
            spec.jurisdiction,
            spec.bond_document.as_str(),
            AssetStatus::Active,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            bond_name: spec.name,
            bond_type: spec.bond_type,
            trigger_type: spec.trigger_type,
            trigger_threshold: spec.trigger_threshold,
            coverage_amount: spec.coverage_amount,
            maturity_date: spec.maturity_date,
            interest_rate_bps: spec.interest_rate_bps,
            issue_date: now,
            triggered: false,
            total_bond_value: spec.total_bond_value,
            bondholders: BTreeMap::new(),
        })
    }

    /// Whether the payout condition has been met.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Number of distinct bondholders with open entries.
    pub fn bondholder_count(&self) -> usize {
        self.bondholders.len()
    }

    /// Cumulative investment recorded for `account`, if any entry is open.
    pub fn investment_of(&self, account: &AccountId) -> Option<u64> {
        self.bondholders.get(account).copied()
    }

    /// The bond's maturity date.
    pub fn maturity_date(&self) -> Timestamp {
        self.maturity_date
    }

    fn require_status(&self, expected: AssetStatus, operation: &str) -> Result<(), OperationError> {
        if self.record.status != expected {
            return Err(OperationError::state_conflict(format!(
                "{operation} requires status {expected}, bond is {}",
                self.record.status
            )));
        }
        Ok(())
    }

    /// Invest in the bond. The payment moves into the bond treasury and
    /// bond tokens are allocated pro-rata from the creator's reserve.
    ///
    /// Only while the bond is active, untriggered, and before maturity.
    /// Returns the allocated token amount.
    pub fn invest<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        investment_amount: u64,
    ) -> Result<u64, OperationError> {
        self.record.require_id(asset_id)?;
        self.require_status(AssetStatus::Active, "investment")?;
        if self.triggered {
            return Err(OperationError::state_conflict("bond has been triggered"));
        }
        let now = ledger.now();
        if now >= self.maturity_date {
            return Err(OperationError::state_conflict("bond has matured"));
        }
        if investment_amount == 0 {
            return Err(OperationError::validation("investment must be positive"));
        }

        let investor = ledger.caller();
        ledger.send_payment(investment_amount, &investor, &self.record.treasury)?;

        // Allocation proportional to the share of the total issue.
        let allocation = (u128::from(investment_amount) * u128::from(BOND_TOKEN_SUPPLY)
            / u128::from(self.total_bond_value)) as u64;
        let reserve = self.record.creator.clone();
        ledger.transfer_token(self.record.asset_id.as_token(), allocation, &reserve, &investor)?;

        *self.bondholders.entry(investor).or_insert(0) += investment_amount;
        self.record.touch(now);
        Ok(allocation)
    }

    /// Evaluate an oracle reading against the trigger threshold.
    ///
    /// Restricted to the creator or oracle role. Below the threshold the
    /// call returns `Ok(false)` and changes nothing — that is a
    /// measurement, not an error. At or above it, the bond flips one-way
    /// to `triggered`; a second attempt is a state conflict.
    pub fn process_trigger_event<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        oracle_data: &DocumentHash,
        oracle_value: u64,
        oracle_timestamp: Timestamp,
    ) -> Result<bool, OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::Oracle], &ledger.caller())?;
        if self.triggered {
            return Err(OperationError::state_conflict("bond already triggered"));
        }
        self.require_status(AssetStatus::Active, "trigger processing")?;

        if oracle_value < self.trigger_threshold {
            return Ok(false);
        }

        let now = ledger.now();
        self.triggered = true;
        self.record.status = AssetStatus::Triggered;
        self.record.metadata.append(format!("trigger:{oracle_data}"));
        self.record.metadata.append(format!("value:{oracle_value}"));
        self.record
            .annotate(format!("time:{}", oracle_timestamp.epoch_secs()), now);
        Ok(true)
    }

    /// Pay the coverage amount to the beneficiary of a triggered bond.
    ///
    /// Restricted to the creator role. Terminal for the disaster path:
    /// the bond moves to `paid` and a second payout is a state conflict.
    pub fn process_payout<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        beneficiary: &AccountId,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;
        self.require_status(AssetStatus::Triggered, "payout")?;

        let treasury = self.record.treasury.clone();
        ledger.send_payment(self.coverage_amount, &treasury, beneficiary)?;
        self.record.status = AssetStatus::Paid;
        self.record.touch(ledger.now());
        Ok(())
    }

    /// Settle the bond at maturity.
    ///
    /// Restricted to the creator role and only at or after the maturity
    /// date. A triggered-and-paid bond closes as `completed`; an
    /// untriggered bond opens the claim path as `matured`.
    pub fn process_maturity<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;
        let now = ledger.now();
        if now < self.maturity_date {
            return Err(OperationError::state_conflict(format!(
                "bond matures at {}, now {now}",
                self.maturity_date
            )));
        }
        if matches!(
            self.record.status,
            AssetStatus::Matured | AssetStatus::Completed
        ) {
            return Err(OperationError::state_conflict("maturity already processed"));
        }

        self.record.status = if self.triggered {
            AssetStatus::Completed
        } else {
            AssetStatus::Matured
        };
        self.record.touch(now);
        Ok(())
    }

    /// Claim principal plus simple interest from a matured, untriggered
    /// bond.
    ///
    /// The caller must hold an open bondholder entry; the entry is
    /// deleted on claim, so a repeat claim fails with `NotFound`.
    /// Returns the amount paid.
    pub fn claim<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
    ) -> Result<u64, OperationError> {
        self.record.require_id(asset_id)?;
        self.require_status(AssetStatus::Matured, "claim")?;

        let investor = ledger.caller();
        let principal = self
            .bondholders
            .get(&investor)
            .copied()
            .ok_or_else(|| {
                OperationError::not_found(format!("no bondholder entry for {investor}"))
            })?;

        // Simple interest: principal * rate * holding period, in basis
        // points over whole years of seconds.
        let holding_secs = self.maturity_date.secs_since(self.issue_date);
        let interest = (u128::from(principal)
            * u128::from(self.interest_rate_bps)
            * u128::from(holding_secs)
            / (u128::from(BPS_DENOMINATOR) * u128::from(SECONDS_PER_YEAR)))
            as u64;
        let payout = principal + interest;

        let treasury = self.record.treasury.clone();
        ledger.send_payment(payout, &treasury, &investor)?;

        self.bondholders.remove(&investor);
        self.record.touch(ledger.now());
        Ok(payout)
    }

    /// Human-readable status line for the bond.
    pub fn status_line(&self) -> String {
        format!(
            "Bond {} | Name: {} | Type: {} | Status: {} | Triggered: {} | Maturity: {} | Investors: {} | Total value: {} | Coverage: {}",
            self.record.asset_id,
            self.bond_name,
            self.bond_type,
            self.record.status,
            if self.triggered { "yes" } else { "no" },
            self.maturity_date,
            self.bondholder_count(),
            self.total_bond_value,
            self.coverage_amount,
        )
    }
}
