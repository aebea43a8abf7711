//! # Scenario Harness
//!
//! Shared setup for the demo scenarios: a fresh in-memory ledger, a
//! compliance gate with its regulator and KYC provider, and a cast of
//! named accounts with approved KYC and funded balances.

use atoll_compliance::{ComplianceGate, KycStatus};
use atoll_core::{AccountId, OperationError, Timestamp};
use atoll_ledger::InMemoryLedger;

/// The standing cast every scenario draws from.
pub struct Harness {
    pub ledger: InMemoryLedger,
    pub gate: ComplianceGate,
    pub issuer: AccountId,
    pub treasury: AccountId,
    pub regulator: AccountId,
    pub kyc_provider: AccountId,
}

impl Harness {
    /// A fresh harness at the current wall-clock time, with the issuer as
    /// the initial caller.
    pub fn new() -> Result<Self, OperationError> {
        let issuer = AccountId::new("atoll-issuer");
        let treasury = AccountId::new("atoll-treasury");
        let regulator = AccountId::new("atoll-regulator");
        let kyc_provider = AccountId::new("atoll-kyc");

        let ledger = InMemoryLedger::new(Timestamp::now(), issuer.clone());
        let mut gate = ComplianceGate::new(regulator.clone(), kyc_provider.clone());
        gate.set_kyc_status(&kyc_provider, issuer.clone(), KycStatus::Approved, None)?;

        Ok(Self { ledger, gate, issuer, treasury, regulator, kyc_provider })
    }

    /// Register a funded, KYC-approved participant.
    pub fn participant(&mut self, name: &str, funds: u64) -> Result<AccountId, OperationError> {
        let account = AccountId::new(name);
        self.ledger.credit(&account, funds);
        self.gate
            .set_kyc_status(&self.kyc_provider, account.clone(), KycStatus::Approved, None)?;
        Ok(account)
    }

    /// Run one operation as `who`, restoring the issuer as caller after.
    pub fn as_caller<T>(
        &mut self,
        who: &AccountId,
        op: impl FnOnce(&mut Self) -> Result<T, OperationError>,
    ) -> Result<T, OperationError> {
        self.ledger.set_caller(who.clone());
        let result = op(self);
        self.ledger.set_caller(self.issuer.clone());
        result
    }
}
