//! # atoll-core — Foundational Types for the Atoll Stack
//!
//! This crate is the bedrock of the Atoll Stack. It defines the type-system
//! primitives shared by every other crate in the workspace: identifier
//! newtypes, the UTC timestamp type, the asset-type and lifecycle-status
//! vocabularies, the role-based authority model, the append-only metadata
//! log, and the error taxonomy. Every other crate depends on `atoll-core`;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `AccountId`, `TokenId`,
//!    `AssetId`, `JurisdictionCode`, `DocumentHash` — no bare strings or
//!    integers for identifiers. You cannot pass a fraction token where the
//!    registry key is expected.
//!
//! 2. **Single `AssetType` enum.** One definition, six variants, exhaustive
//!    `match` everywhere. Adding an asset class forces every consumer to
//!    handle it.
//!
//! 3. **UTC-only, seconds-precision timestamps.** Domain code never reads
//!    the wall clock; time always flows in from the ledger boundary.
//!
//! 4. **One error taxonomy.** Every operation across the workspace fails
//!    with an `OperationError` kind plus a human-readable reason.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `atoll-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public state types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod asset;
pub mod authority;
pub mod error;
pub mod identity;
pub mod metadata;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use asset::{AssetStatus, AssetType, ASSET_TYPE_COUNT};
pub use authority::{AuthoritySet, Role};
pub use error::{LedgerError, OperationError};
pub use identity::{AccountId, AssetId, DocumentHash, JurisdictionCode, TokenId};
pub use metadata::MetadataLog;
pub use temporal::{Timestamp, SECONDS_PER_YEAR};
