//! # In-Memory Ledger
//!
//! A deterministic [`Ledger`] implementation for tests, demos, and
//! single-process embeddings. Token ids are allocated sequentially, time
//! only moves when the harness says so, and the caller identity is
//! whatever the harness last installed — the same controls the external
//! ledger exercises implicitly on-chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atoll_core::{AccountId, LedgerError, Timestamp, TokenId};

use crate::adapter::Ledger;
use crate::config::{TokenAuthorities, TokenConfig};

/// A native-currency payment recorded by the in-memory ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Debited account.
    pub from: AccountId,
    /// Credited account.
    pub to: AccountId,
    /// Amount moved.
    pub amount: u64,
    /// Ledger time at which the payment settled.
    pub at: Timestamp,
}

#[derive(Debug, Clone)]
struct TokenState {
    config: TokenConfig,
    balances: BTreeMap<AccountId, u64>,
}

/// In-memory ledger with explicit clock and caller controls.
#[derive(Debug)]
pub struct InMemoryLedger {
    tokens: BTreeMap<TokenId, TokenState>,
    native: BTreeMap<AccountId, u64>,
    payments: Vec<PaymentRecord>,
    next_token: u64,
    now: Timestamp,
    caller: AccountId,
}

impl InMemoryLedger {
    /// A fresh ledger at `genesis` time with `caller` as the initial
    /// operation sender.
    pub fn new(genesis: Timestamp, caller: AccountId) -> Self {
        Self {
            tokens: BTreeMap::new(),
            native: BTreeMap::new(),
            payments: Vec::new(),
            next_token: 1,
            now: genesis,
            caller,
        }
    }

    // ── Harness controls ─────────────────────────────────────────────

    /// Install the sender of subsequent operations.
    pub fn set_caller(&mut self, caller: AccountId) {
        self.caller = caller;
    }

    /// Jump the clock to an absolute time.
    pub fn set_now(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance_time(&mut self, secs: u64) {
        self.now = self.now.plus_secs(secs);
    }

    /// Credit `amount` of native currency to `account`.
    pub fn credit(&mut self, account: &AccountId, amount: u64) {
        *self.native.entry(account.clone()).or_insert(0) += amount;
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Token balance of `account`, zero if it never held the token.
    pub fn token_balance(&self, token: TokenId, account: &AccountId) -> u64 {
        self.tokens
            .get(&token)
            .and_then(|state| state.balances.get(account))
            .copied()
            .unwrap_or(0)
    }

    /// Native currency balance of `account`.
    pub fn native_balance(&self, account: &AccountId) -> u64 {
        self.native.get(account).copied().unwrap_or(0)
    }

    /// The configuration a token was created with (current authorities).
    pub fn token_config(&self, token: TokenId) -> Option<&TokenConfig> {
        self.tokens.get(&token).map(|state| &state.config)
    }

    /// All settled payments in order.
    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }
}

impl Ledger for InMemoryLedger {
    fn create_token(&mut self, config: TokenConfig) -> Result<TokenId, LedgerError> {
        if config.total_supply == 0 {
            return Err(LedgerError::InvalidConfig {
                reason: "total supply must be positive".to_string(),
            });
        }
        let id = TokenId(self.next_token);
        self.next_token += 1;

        let mut balances = BTreeMap::new();
        balances.insert(config.authorities.reserve.clone(), config.total_supply);
        self.tokens.insert(id, TokenState { config, balances });
        Ok(id)
    }

    fn transfer_token(
        &mut self,
        token: TokenId,
        amount: u64,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), LedgerError> {
        let state = self
            .tokens
            .get_mut(&token)
            .ok_or(LedgerError::UnknownToken { token: token.value() })?;

        let held = state.balances.get(from).copied().unwrap_or(0);
        if held < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.to_string(),
                held,
                needed: amount,
            });
        }
        *state.balances.entry(from.clone()).or_insert(0) -= amount;
        *state.balances.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }

    fn send_payment(
        &mut self,
        amount: u64,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), LedgerError> {
        let held = self.native.get(from).copied().unwrap_or(0);
        if held < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.to_string(),
                held,
                needed: amount,
            });
        }
        *self.native.entry(from.clone()).or_insert(0) -= amount;
        *self.native.entry(to.clone()).or_insert(0) += amount;
        self.payments.push(PaymentRecord {
            from: from.clone(),
            to: to.clone(),
            amount,
            at: self.now,
        });
        Ok(())
    }

    fn reconfigure_token(
        &mut self,
        token: TokenId,
        authorities: TokenAuthorities,
    ) -> Result<(), LedgerError> {
        let state = self
            .tokens
            .get_mut(&token)
            .ok_or(LedgerError::UnknownToken { token: token.value() })?;
        state.config.authorities = authorities;
        Ok(())
    }

    fn now(&self) -> Timestamp {
        self.now
    }

    fn caller(&self) -> AccountId {
        self.caller.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_core::DocumentHash;

    fn genesis() -> Timestamp {
        Timestamp::from_epoch_secs(1_750_000_000).unwrap()
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(genesis(), AccountId::new("issuer"))
    }

    fn fungible(supply: u64, reserve: &AccountId) -> TokenConfig {
        TokenConfig::fungible(
            supply,
            0,
            TokenAuthorities::managed_by(AccountId::new("treasury"), reserve.clone()),
            "TST",
            "Test Token",
            &DocumentHash::new("QmDoc"),
            "test",
        )
    }

    // ── Token lifecycle ──────────────────────────────────────────────

    #[test]
    fn test_create_token_allocates_sequential_ids() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        let a = ledger.create_token(fungible(10, &reserve)).unwrap();
        let b = ledger.create_token(fungible(10, &reserve)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_token_funds_reserve() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        let token = ledger.create_token(fungible(500, &reserve)).unwrap();
        assert_eq!(ledger.token_balance(token, &reserve), 500);
    }

    #[test]
    fn test_create_token_rejects_zero_supply() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        assert!(ledger.create_token(fungible(0, &reserve)).is_err());
    }

    // ── Transfers ────────────────────────────────────────────────────

    #[test]
    fn test_transfer_moves_balance() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        let buyer = AccountId::new("buyer");
        let token = ledger.create_token(fungible(100, &reserve)).unwrap();
        ledger.transfer_token(token, 30, &reserve, &buyer).unwrap();
        assert_eq!(ledger.token_balance(token, &reserve), 70);
        assert_eq!(ledger.token_balance(token, &buyer), 30);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        let buyer = AccountId::new("buyer");
        let token = ledger.create_token(fungible(10, &reserve)).unwrap();
        let err = ledger.transfer_token(token, 11, &reserve, &buyer).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        // No partial effect.
        assert_eq!(ledger.token_balance(token, &reserve), 10);
        assert_eq!(ledger.token_balance(token, &buyer), 0);
    }

    #[test]
    fn test_transfer_unknown_token() {
        let mut ledger = ledger();
        let err = ledger
            .transfer_token(TokenId(99), 1, &AccountId::new("a"), &AccountId::new("b"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnknownToken { token: 99 }));
    }

    // ── Payments ─────────────────────────────────────────────────────

    #[test]
    fn test_payment_records_and_moves_native() {
        let mut ledger = ledger();
        let payer = AccountId::new("payer");
        let payee = AccountId::new("payee");
        ledger.credit(&payer, 1_000);
        ledger.send_payment(400, &payer, &payee).unwrap();
        assert_eq!(ledger.native_balance(&payer), 600);
        assert_eq!(ledger.native_balance(&payee), 400);
        assert_eq!(ledger.payments().len(), 1);
        assert_eq!(ledger.payments()[0].amount, 400);
    }

    #[test]
    fn test_payment_insufficient_funds() {
        let mut ledger = ledger();
        let payer = AccountId::new("payer");
        ledger.credit(&payer, 10);
        let err = ledger
            .send_payment(11, &payer, &AccountId::new("payee"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert!(ledger.payments().is_empty());
    }

    // ── Reconfiguration ──────────────────────────────────────────────

    #[test]
    fn test_reconfigure_replaces_authorities() {
        let mut ledger = ledger();
        let reserve = AccountId::new("issuer");
        let token = ledger.create_token(fungible(10, &reserve)).unwrap();
        let new_manager = AccountId::new("new-treasury");
        ledger
            .reconfigure_token(
                token,
                TokenAuthorities::managed_by(new_manager.clone(), reserve),
            )
            .unwrap();
        assert_eq!(ledger.token_config(token).unwrap().authorities.manager, new_manager);
    }

    // ── Clock and caller ─────────────────────────────────────────────

    #[test]
    fn test_clock_only_moves_on_demand() {
        let mut ledger = ledger();
        let t0 = ledger.now();
        assert_eq!(ledger.now(), t0);
        ledger.advance_time(3_600);
        assert_eq!(ledger.now(), t0.plus_secs(3_600));
    }

    #[test]
    fn test_caller_is_installed_identity() {
        let mut ledger = ledger();
        assert_eq!(ledger.caller(), AccountId::new("issuer"));
        ledger.set_caller(AccountId::new("investor"));
        assert_eq!(ledger.caller(), AccountId::new("investor"));
    }
}
