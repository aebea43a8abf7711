//! # The Ledger Trait
//!
//! The single seam between asset modules and the external ledger service.
//! Implementations must make every call atomic: a returned error means no
//! state changed.

use atoll_core::{AccountId, LedgerError, Timestamp, TokenId};

use crate::config::{TokenAuthorities, TokenConfig};

/// The external ledger contract consumed by all asset modules.
///
/// One logical operation sees a single consistent `now()` and `caller()`:
/// both are fixed for the duration of the call that the ledger is
/// currently executing.
pub trait Ledger {
    /// Create a new token and return its ledger-allocated identifier.
    /// The configured reserve account receives the full supply.
    fn create_token(&mut self, config: TokenConfig) -> Result<TokenId, LedgerError>;

    /// Atomically move `amount` base units of `token` from `from` to `to`.
    /// Fails if the sender's balance is insufficient.
    fn transfer_token(
        &mut self,
        token: TokenId,
        amount: u64,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), LedgerError>;

    /// Transfer `amount` of the native currency from `from` to `to`.
    fn send_payment(
        &mut self,
        amount: u64,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), LedgerError>;

    /// Replace the management authorities of `token` without changing its
    /// supply or metadata URL.
    fn reconfigure_token(
        &mut self,
        token: TokenId,
        authorities: TokenAuthorities,
    ) -> Result<(), LedgerError>;

    /// The ledger's current time, shared by all modules within one
    /// logical operation.
    fn now(&self) -> Timestamp;

    /// The authenticated sender of the current operation.
    fn caller(&self) -> AccountId;
}
