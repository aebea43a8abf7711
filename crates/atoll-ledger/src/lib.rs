//! # atoll-ledger — The Ledger Adapter Boundary
//!
//! Every asset module talks to the outside world through exactly one seam:
//! the [`Ledger`] trait. The production ledger is an external service that
//! issues tokens, moves balances, sends payments, serializes all
//! state-changing calls, and supplies the current time and the
//! authenticated caller of the operation in flight. This crate defines
//! that contract and an in-memory implementation faithful enough for
//! tests, demos, and single-process embeddings.
//!
//! ## Design
//!
//! - Time and identity are *pulled* from the ledger, never captured by
//!   domain code. This keeps every time-dependent transition lazy and
//!   makes tests deterministic: `InMemoryLedger::set_now` is the whole
//!   clock.
//! - Balance sufficiency is the ledger's job. Modules do not re-validate
//!   it; they surface [`LedgerError`] transparently.

pub mod adapter;
pub mod config;
pub mod memory;

pub use adapter::Ledger;
pub use config::{TokenAuthorities, TokenConfig};
pub use memory::{InMemoryLedger, PaymentRecord};

// The ledger error type lives in atoll-core's shared taxonomy.
pub use atoll_core::LedgerError;
