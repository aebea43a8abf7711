//! # Error Types — Shared Failure Taxonomy
//!
//! One error vocabulary for every operation in the stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is local and synchronous: the single operation aborts
//!   with a specific kind plus a human-readable reason, and no partial
//!   mutation is observable. Retries are the caller's responsibility.
//! - `Unauthorized` is about caller identity alone; `ComplianceDenied`
//!   depends on mutable cross-module state (KYC, asset suspension) and is
//!   kept distinct so callers can route the two differently.
//! - Ledger failures propagate transparently — the ledger enforces balance
//!   sufficiency and atomicity, and modules do not re-validate it.

use thiserror::Error;

/// Failure reported by the external ledger service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Referenced token has never been created.
    #[error("unknown token {token}")]
    UnknownToken {
        /// The token that could not be resolved.
        token: u64,
    },

    /// Sender balance is insufficient for a transfer or payment.
    #[error("insufficient balance: {account} holds {held}, needs {needed}")]
    InsufficientBalance {
        /// The debited account.
        account: String,
        /// Units currently held.
        held: u64,
        /// Units the operation required.
        needed: u64,
    },

    /// Token configuration was rejected at creation.
    #[error("invalid token configuration: {reason}")]
    InvalidConfig {
        /// Why the ledger rejected the configuration.
        reason: String,
    },
}

/// The failure taxonomy shared by every operation in the stack.
#[derive(Error, Debug)]
pub enum OperationError {
    /// Caller lacks the required role for this operation.
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Which role check failed.
        reason: String,
    },

    /// Malformed input, rejected before any ledger call.
    #[error("validation failed: {reason}")]
    Validation {
        /// Which input constraint was violated.
        reason: String,
    },

    /// Operation is not valid for the asset's current state.
    #[error("state conflict: {reason}")]
    StateConflict {
        /// Why the current state rejects the operation.
        reason: String,
    },

    /// Referenced asset, phase, or participant entry does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// What could not be resolved.
        what: String,
    },

    /// The compliance gate rejected the transaction.
    #[error("compliance denied: {reason}")]
    ComplianceDenied {
        /// Which compliance check failed.
        reason: String,
    },

    /// The external ledger rejected an inner call.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl OperationError {
    /// Construct an `Unauthorized` error.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized { reason: reason.into() }
    }

    /// Construct a `Validation` error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    /// Construct a `StateConflict` error.
    pub fn state_conflict(reason: impl Into<String>) -> Self {
        Self::StateConflict { reason: reason.into() }
    }

    /// Construct a `NotFound` error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Construct a `ComplianceDenied` error.
    pub fn compliance_denied(reason: impl Into<String>) -> Self {
        Self::ComplianceDenied { reason: reason.into() }
    }
}
