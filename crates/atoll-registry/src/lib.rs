//! # atoll-registry — Canonical Asset Records
//!
//! Holds the attributes every tokenized asset shares, independent of its
//! class: identity, creator, location, jurisdiction, the append-only
//! metadata log, the lifecycle status label, and the update stamp. Domain
//! modules embed one [`AssetRecord`] by composition and layer their own
//! state machines on top — there is no status machine at this layer.
//!
//! The [`Registry`] is the id-addressed store: records are created and
//! updated but never deleted, matching the permanent-record semantics of
//! a tokenized registry.

pub mod record;
pub mod store;

pub use record::{AssetRecord, Tokenized};
pub use store::Registry;
