//! # Token Configuration
//!
//! The parameters a module hands the ledger when it mints a token: supply,
//! divisibility, management authorities, naming, and the attached note.

use serde::{Deserialize, Serialize};

use atoll_core::{AccountId, DocumentHash};

/// The four management authorities a ledger token carries.
///
/// For platform assets these all point at the asset's treasury account,
/// except the reserve, which holds the undistributed supply (usually the
/// creator for primary assets, the treasury for escrowed pools).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuthorities {
    /// May reconfigure the token.
    pub manager: AccountId,
    /// Holds the undistributed supply.
    pub reserve: AccountId,
    /// May freeze holdings.
    pub freeze: AccountId,
    /// May claw back holdings.
    pub clawback: AccountId,
}

impl TokenAuthorities {
    /// Authorities for a platform-managed token: `treasury` everywhere,
    /// with `reserve` holding the supply.
    pub fn managed_by(treasury: AccountId, reserve: AccountId) -> Self {
        Self {
            manager: treasury.clone(),
            reserve,
            freeze: treasury.clone(),
            clawback: treasury,
        }
    }
}

/// Full configuration for a token creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Total supply in base units.
    pub total_supply: u64,
    /// Decimal places for display purposes.
    pub decimals: u32,
    /// Whether holdings start frozen.
    pub default_frozen: bool,
    /// Management authorities.
    pub authorities: TokenAuthorities,
    /// Short unit ticker (e.g., `BLUE`, `REC`).
    pub unit_name: String,
    /// Display name.
    pub asset_name: String,
    /// External URL pointing at the primary documentation.
    pub url: String,
    /// Free-form note attached to the creation transaction.
    pub note: String,
}

impl TokenConfig {
    /// A single-unit, non-divisible token representing one indivisible
    /// asset (a property deed, a heritage site).
    pub fn single_unit(
        authorities: TokenAuthorities,
        unit_name: impl Into<String>,
        asset_name: impl Into<String>,
        document: &DocumentHash,
        note: impl Into<String>,
    ) -> Self {
        Self {
            total_supply: 1,
            decimals: 0,
            default_frozen: false,
            authorities,
            unit_name: unit_name.into(),
            asset_name: asset_name.into(),
            url: document.to_url(),
            note: note.into(),
        }
    }

    /// A fungible token pool with the given supply and divisibility.
    pub fn fungible(
        total_supply: u64,
        decimals: u32,
        authorities: TokenAuthorities,
        unit_name: impl Into<String>,
        asset_name: impl Into<String>,
        document: &DocumentHash,
        note: impl Into<String>,
    ) -> Self {
        Self {
            total_supply,
            decimals,
            default_frozen: false,
            authorities,
            unit_name: unit_name.into(),
            asset_name: asset_name.into(),
            url: document.to_url(),
            note: note.into(),
        }
    }
}
