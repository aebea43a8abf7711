//! # atoll-assets — Domain Asset Modules
//!
//! One module per tokenized asset class, each a state machine layered on
//! one embedded [`atoll_registry::AssetRecord`]:
//!
//! - **Marine rights** (`marine.rs`): fishing rights and coastal
//!   concessions with derived validity — perpetual or expiring, never
//!   stored as a state.
//! - **Carbon credits** (`carbon.rs`): issuance against a monotonically
//!   non-increasing remaining-offset cap, plus retirement to a sink.
//! - **Land property** (`property.rs`): deed tokens with one-way
//!   fractionalization and valuation history.
//! - **Renewable energy** (`energy.rs`): infrastructure tokens and
//!   per-MWh production certificates.
//! - **Disaster bond** (`bond.rs`): `active → triggered → paid`
//!   (disaster path) or `active → matured` (claim path), both terminal.
//! - **Heritage restoration** (`heritage.rs`): phased milestone funding
//!   with strictly sequential phase activation and pro-rata ownership
//!   distribution.
//!
//! Every ownership-changing operation funnels through the mediator in
//! `transfer.rs`: sender authorization, domain-rule checks, and the
//! compliance gate run before the ledger is touched, so a failed
//! precondition leaves no partial effect.
//!
//! ## Time
//!
//! No module reads a clock. Expiry, maturity, and deadlines are evaluated
//! lazily against `Ledger::now()` at call time; there are no background
//! sweeps, so an expired right stays visibly "expired-on-read" rather than
//! flipping between queries.

pub mod bond;
pub mod carbon;
pub mod energy;
pub mod heritage;
pub mod marine;
pub mod property;
pub mod transfer;

pub use bond::{BondSpec, DisasterBond};
pub use carbon::{CarbonProject, CarbonProjectSpec};
pub use energy::{EnergyProject, EnergyProjectSpec};
pub use heritage::{
    DistributionProgress, HeritageAsset, HeritageAssetSpec, PhaseStatus, ProjectPhase,
    RestorationProject,
};
pub use marine::{MarineAsset, MarineAssetSpec};
pub use property::{PropertyAsset, PropertyAssetSpec};
pub use transfer::{mediated_transfer, TransferRequest};
