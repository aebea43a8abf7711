//! # atoll-compliance — The Compliance Gate
//!
//! Centralized KYC, jurisdiction, and asset-status authorization, shared
//! by every asset class. The gate is deliberately independent of asset
//! internals: it knows accounts, asset ids, asset types, and jurisdiction
//! codes, nothing else.
//!
//! ## Design
//!
//! - **Lazy expiry.** A KYC approval with a past expiry reads as
//!   `Expired` the moment it is consulted; nothing sweeps the store. The
//!   same pull-not-push rule applies everywhere time appears in the stack.
//! - **Permissive default for untracked assets.** An asset with no
//!   compliance record passes [`ComplianceGate::verify_transaction_compliance`]
//!   so assets predating compliance tracking keep trading; regulators
//!   opt assets *into* suspension, not out of it.
//! - **Structured records.** Asset compliance entries are typed
//!   status/notes/timestamp records, and rule lookups return `Option` —
//!   absence is the "no rules defined" sentinel.

pub mod gate;
pub mod kyc;
pub mod status;

pub use gate::ComplianceGate;
pub use kyc::{KycDecision, KycEntry, KycStatus};
pub use status::{ComplianceRecord, ComplianceStatus};
