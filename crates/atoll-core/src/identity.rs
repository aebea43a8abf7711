//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the Atoll Stack. These prevent
//! accidental identifier confusion — you cannot pass a `TokenId` where an
//! `AssetId` is expected, even though every asset id wraps the ledger token
//! that anchors it.
//!
//! ## Invariant
//!
//! Type-level distinction between identifier namespaces defends against
//! cross-contract id confusion: several modules share one record slot per
//! instance, and a fraction or certificate token must never be mistaken for
//! the canonical asset key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::OperationError;

/// A ledger account (investor, regulator, community steward, treasury).
///
/// Accounts are opaque addresses allocated by the external ledger; the
/// stack only ever compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    /// Wrap an existing ledger address.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Generate a fresh random account identifier (tests and demos).
    pub fn random() -> Self {
        Self(format!("acct-{}", Uuid::new_v4()))
    }

    /// Access the inner address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token allocated by the ledger (primary asset token, fraction token,
/// production certificate, ownership token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    /// The raw ledger-assigned token number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

/// The canonical identifier of one tokenized asset instance.
///
/// An asset's id is the ledger token created for it at registration,
/// wrapped so secondary tokens (fractions, certificates, ownership pools)
/// cannot be substituted for the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(TokenId);

impl AssetId {
    /// Adopt the primary token allocated at asset creation as the asset id.
    pub fn from_token(token: TokenId) -> Self {
        Self(token)
    }

    /// The primary token backing this asset (used for transfers of the
    /// asset itself).
    pub fn as_token(&self) -> TokenId {
        self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "asset:{}", self.0.value())
    }
}

/// A jurisdiction code used for compliance lookups (e.g., `FJ`, `MV`).
///
/// Codes are stored uppercase. The reserved code [`JurisdictionCode::ALL`]
/// is the wildcard used for rules that apply in every jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    /// The wildcard jurisdiction matched as a fallback during rule lookup.
    pub const ALL: &'static str = "ALL";

    /// Validate and normalize a jurisdiction code.
    ///
    /// Codes must be 2–8 ASCII alphanumeric characters; they are stored
    /// uppercase so `fj` and `FJ` address the same rule set.
    pub fn new(code: impl AsRef<str>) -> Result<Self, OperationError> {
        let code = code.as_ref();
        if code.len() < 2 || code.len() > 8 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(OperationError::validation(format!(
                "jurisdiction code must be 2-8 alphanumeric characters, got {code:?}"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The wildcard jurisdiction.
    pub fn wildcard() -> Self {
        Self(Self::ALL.to_string())
    }

    /// Whether this is the wildcard code.
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Access the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A content-addressed document reference (deed scans, monitoring reports,
/// oracle payloads) carried in metadata fragments and token URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHash(pub String);

impl DocumentHash {
    /// Wrap a document hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Render as a gateway URL for token metadata.
    pub fn to_url(&self) -> String {
        format!("ipfs://{}", self.0)
    }

    /// Access the raw hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
