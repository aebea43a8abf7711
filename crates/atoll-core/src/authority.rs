//! # Role-Based Authority Sets
//!
//! Privileged operations are gated by an explicit per-asset capability set
//! rather than a single hardcoded creator identity. Each asset instance
//! carries an `AuthoritySet` mapping roles to the accounts allowed to act
//! in them, and every privileged operation runs the same
//! [`AuthoritySet::require`] predicate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::OperationError;
use crate::identity::AccountId;

/// The capability roles recognized across all asset modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May create assets and perform issuer-side maintenance.
    Creator,
    /// May set compliance statuses and jurisdiction rules.
    Regulator,
    /// May attest milestone or phase completion.
    Verifier,
    /// May submit measured trigger data.
    Oracle,
    /// May set KYC statuses.
    KycProvider,
    /// Holds community stewardship rights over a heritage asset.
    CommunitySteward,
}

impl Role {
    /// Returns the snake_case string identifier for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Regulator => "regulator",
            Self::Verifier => "verifier",
            Self::Oracle => "oracle",
            Self::KycProvider => "kyc_provider",
            Self::CommunitySteward => "community_steward",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-asset mapping from roles to the accounts authorized to act in them.
///
/// An absent role authorizes nobody. Grants are additive; revocation
/// removes a single account from a single role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthoritySet {
    grants: BTreeMap<Role, BTreeSet<AccountId>>,
}

impl AuthoritySet {
    /// An empty authority set (nobody is authorized for anything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor: a set with one creator grant.
    pub fn with_creator(creator: AccountId) -> Self {
        let mut set = Self::new();
        set.grant(Role::Creator, creator);
        set
    }

    /// Authorize `account` to act in `role`.
    pub fn grant(&mut self, role: Role, account: AccountId) {
        self.grants.entry(role).or_default().insert(account);
    }

    /// Remove `account` from `role`. Returns whether a grant was removed.
    pub fn revoke(&mut self, role: Role, account: &AccountId) -> bool {
        self.grants.get_mut(&role).is_some_and(|set| set.remove(account))
    }

    /// Whether `account` holds `role`.
    pub fn holds(&self, role: Role, account: &AccountId) -> bool {
        self.grants.get(&role).is_some_and(|set| set.contains(account))
    }

    /// Whether `account` holds any of the listed roles.
    pub fn holds_any(&self, roles: &[Role], account: &AccountId) -> bool {
        roles.iter().any(|role| self.holds(*role, account))
    }

    /// The uniform authorization predicate: `Unauthorized` unless
    /// `account` holds `role`.
    pub fn require(&self, role: Role, account: &AccountId) -> Result<(), OperationError> {
        if self.holds(role, account) {
            Ok(())
        } else {
            Err(OperationError::unauthorized(format!(
                "{account} does not hold the {role} role"
            )))
        }
    }

    /// `Unauthorized` unless `account` holds at least one of `roles`.
    pub fn require_any(&self, roles: &[Role], account: &AccountId) -> Result<(), OperationError> {
        if self.holds_any(roles, account) {
            Ok(())
        } else {
            let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
            Err(OperationError::unauthorized(format!(
                "{account} holds none of the required roles: {}",
                names.join(", ")
            )))
        }
    }

    /// Accounts currently granted `role`, in deterministic order.
    pub fn accounts_in(&self, role: Role) -> impl Iterator<Item = &AccountId> {
        self.grants.get(&role).into_iter().flatten()
    }
}
