//! # Cross-Crate Lifecycle Tests
//!
//! Full asset lifecycles driven through the public surface of the stack:
//! the in-memory ledger, the compliance gate, the registry store, and the
//! domain modules together. Unit tests in each module cover the
//! individual transitions; these tests cover the seams — compliance
//! decisions changing mid-life, money and tokens arriving where the
//! lifecycle says they must, and the registry holding whatever the
//! modules produce.

use atoll_assets::{
    BondSpec, DisasterBond, HeritageAsset, HeritageAssetSpec, MarineAsset, MarineAssetSpec,
};
use atoll_compliance::{ComplianceGate, ComplianceStatus, KycStatus};
use atoll_core::{
    AccountId, AssetStatus, AuthoritySet, DocumentHash, JurisdictionCode, OperationError, Role,
    Timestamp, SECONDS_PER_YEAR,
};
use atoll_ledger::{InMemoryLedger, Ledger};
use atoll_registry::{Registry, Tokenized};

fn at(secs: i64) -> Timestamp {
    Timestamp::from_epoch_secs(secs).unwrap()
}

const GENESIS: i64 = 1_750_000_000;

fn issuer() -> AccountId {
    AccountId::new("issuer")
}

fn treasury() -> AccountId {
    AccountId::new("treasury")
}

/// Ledger at genesis with the issuer calling, and a gate that has
/// KYC-approved the named accounts.
fn setup(approved: &[&str]) -> (InMemoryLedger, ComplianceGate) {
    let ledger = InMemoryLedger::new(at(GENESIS), issuer());
    let mut gate = ComplianceGate::new(AccountId::new("regulator"), AccountId::new("kyc"));
    for account in approved {
        gate.set_kyc_status(
            &AccountId::new("kyc"),
            AccountId::new(*account),
            KycStatus::Approved,
            None,
        )
        .unwrap();
    }
    (ledger, gate)
}

fn marine_spec() -> MarineAssetSpec {
    MarineAssetSpec {
        resource_name: "Namena Reef".to_string(),
        resource_type: "fishing-right".to_string(),
        marine_zone: "Namena".to_string(),
        sustainability_rating: 80,
        validity_period_secs: 2 * SECONDS_PER_YEAR,
        documents: DocumentHash::new("QmReef"),
        geo_boundary: "17.1S,179.1E".to_string(),
        jurisdiction: JurisdictionCode::new("FJ").unwrap(),
    }
}

fn bond_spec(maturity: Timestamp) -> BondSpec {
    BondSpec {
        name: "Cyclone Bond 2026".to_string(),
        unit_name: "CYC".to_string(),
        bond_type: "parametric".to_string(),
        trigger_type: "wind-speed-kmh".to_string(),
        trigger_threshold: 185,
        coverage_amount: 500_000,
        maturity_date: maturity,
        interest_rate_bps: 500,
        jurisdiction: JurisdictionCode::new("VU").unwrap(),
        geolocation: "17.7S,168.3E".to_string(),
        bond_document: DocumentHash::new("QmProspectus"),
        total_bond_value: 1_000_000,
    }
}

fn heritage_spec(steward: AccountId) -> HeritageAssetSpec {
    HeritageAssetSpec {
        name: "Nan Madol Seawall".to_string(),
        unit_name: "HERI".to_string(),
        heritage_type: "archaeological".to_string(),
        cultural_significance: "ceremonial center".to_string(),
        legal_status: "unesco".to_string(),
        jurisdiction: JurisdictionCode::new("FM").unwrap(),
        geolocation: "6.8N,158.3E".to_string(),
        steward,
        stewardship_model: "community".to_string(),
        documentation: DocumentHash::new("QmSite"),
    }
}

// ---------------------------------------------------------------------------
// Creation reflects inputs
// ---------------------------------------------------------------------------

#[test]
fn test_created_record_reflects_supplied_attributes() {
    let (mut ledger, _gate) = setup(&[]);
    ledger.advance_time(3_600);
    let asset = MarineAsset::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        marine_spec(),
    )
    .unwrap();

    let record = asset.record();
    assert_eq!(record.creator, issuer());
    assert_eq!(record.geolocation, "17.1S,179.1E");
    assert_eq!(record.jurisdiction, JurisdictionCode::new("FJ").unwrap());
    assert_eq!(record.metadata.render(), "QmReef");
    // A freshly stamped last_updated equals the creation time.
    assert_eq!(record.created_at, at(GENESIS + 3_600));
    assert_eq!(record.last_updated, record.created_at);
}

// ---------------------------------------------------------------------------
// Compliance decisions change mid-life
// ---------------------------------------------------------------------------

#[test]
fn test_regulator_suspension_freezes_and_reinstatement_unfreezes() {
    let (mut ledger, mut gate) = setup(&["issuer"]);
    let mut asset = MarineAsset::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        marine_spec(),
    )
    .unwrap();
    let id = asset.asset_id();
    let buyer = AccountId::new("buyer");

    // The regulator suspends the asset; the transfer dies at the gate.
    gate.set_asset_compliance_status(
        &AccountId::new("regulator"),
        id,
        ComplianceStatus::Suspended,
        "quota dispute",
        ledger.now(),
    )
    .unwrap();
    let err = asset
        .transfer(&mut ledger, &gate, id, issuer(), buyer.clone(), 1_000)
        .unwrap_err();
    assert!(matches!(err, OperationError::ComplianceDenied { .. }));
    assert_eq!(ledger.token_balance(id.as_token(), &buyer), 0);

    // Reinstatement opens the same transfer.
    gate.set_asset_compliance_status(
        &AccountId::new("regulator"),
        id,
        ComplianceStatus::Compliant,
        "dispute resolved",
        ledger.now(),
    )
    .unwrap();
    asset
        .transfer(&mut ledger, &gate, id, issuer(), buyer.clone(), 1_000)
        .unwrap();
    assert_eq!(ledger.token_balance(id.as_token(), &buyer), 1_000);
}

#[test]
fn test_kyc_expiry_closes_the_gate_lazily() {
    let (mut ledger, mut gate) = setup(&[]);
    // Approval that lapses in an hour.
    gate.set_kyc_status(
        &AccountId::new("kyc"),
        issuer(),
        KycStatus::Approved,
        Some(ledger.now().plus_secs(3_600)),
    )
    .unwrap();
    let mut asset = MarineAsset::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        marine_spec(),
    )
    .unwrap();
    let id = asset.asset_id();

    asset
        .transfer(&mut ledger, &gate, id, issuer(), AccountId::new("buyer"), 100)
        .unwrap();

    // Nothing sweeps the KYC store; the next call simply reads expired.
    ledger.advance_time(3_601);
    let err = asset
        .transfer(&mut ledger, &gate, id, issuer(), AccountId::new("buyer"), 100)
        .unwrap_err();
    assert!(matches!(err, OperationError::ComplianceDenied { .. }));
}

// ---------------------------------------------------------------------------
// Disaster bond: both terminal branches, money end to end
// ---------------------------------------------------------------------------

#[test]
fn test_bond_disaster_path_end_to_end() {
    let (mut ledger, _gate) = setup(&[]);
    let maturity = ledger.now().plus_secs(SECONDS_PER_YEAR);
    let mut authorities = AuthoritySet::with_creator(issuer());
    authorities.grant(Role::Oracle, AccountId::new("oracle"));
    let mut bond =
        DisasterBond::create(&mut ledger, authorities, treasury(), bond_spec(maturity)).unwrap();
    let id = bond.asset_id();

    // Two investors fund the bond.
    for (who, amount) in [("pension-fund", 400_000u64), ("impact-fund", 200_000u64)] {
        let investor = AccountId::new(who);
        ledger.credit(&investor, amount);
        ledger.set_caller(investor);
        bond.invest(&mut ledger, id, amount).unwrap();
    }
    ledger.set_caller(issuer());
    assert_eq!(ledger.native_balance(&treasury()), 600_000);
    // Token allocation is proportional to the share of the issue.
    assert_eq!(
        ledger.token_balance(id.as_token(), &AccountId::new("pension-fund")),
        400_000
    );

    // A calm reading changes nothing; the cyclone flips the bond.
    ledger.set_caller(AccountId::new("oracle"));
    let reading = ledger.now();
    assert!(!bond
        .process_trigger_event(&mut ledger, id, &DocumentHash::new("QmCalm"), 140, reading)
        .unwrap());
    assert!(bond
        .process_trigger_event(&mut ledger, id, &DocumentHash::new("QmCyclone"), 210, reading)
        .unwrap());
    ledger.set_caller(issuer());

    // Coverage reaches the relief agency; maturity closes the bond.
    let relief = AccountId::new("relief-agency");
    bond.process_payout(&mut ledger, id, &relief).unwrap();
    assert_eq!(ledger.native_balance(&relief), 500_000);

    ledger.set_now(maturity);
    bond.process_maturity(&mut ledger, id).unwrap();
    assert_eq!(bond.record().status, AssetStatus::Completed);

    // No claim path exists on the disaster branch.
    ledger.set_caller(AccountId::new("pension-fund"));
    assert!(matches!(
        bond.claim(&mut ledger, id).unwrap_err(),
        OperationError::StateConflict { .. }
    ));
}

#[test]
fn test_bond_maturity_path_pays_principal_plus_interest() {
    let (mut ledger, _gate) = setup(&[]);
    let maturity = ledger.now().plus_secs(SECONDS_PER_YEAR);
    let mut bond = DisasterBond::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        bond_spec(maturity),
    )
    .unwrap();
    let id = bond.asset_id();

    let investor = AccountId::new("pension-fund");
    ledger.credit(&investor, 200_000);
    ledger.set_caller(investor.clone());
    bond.invest(&mut ledger, id, 200_000).unwrap();
    ledger.set_caller(issuer());

    // The treasury carries the interest budget beyond the principal.
    ledger.credit(&treasury(), 10_000);
    ledger.set_now(maturity);
    bond.process_maturity(&mut ledger, id).unwrap();
    assert_eq!(bond.record().status, AssetStatus::Matured);

    // 200k at 500 bps over exactly one year: 10k interest.
    ledger.set_caller(investor.clone());
    let paid = bond.claim(&mut ledger, id).unwrap();
    assert_eq!(paid, 210_000);
    assert_eq!(ledger.native_balance(&investor), 210_000);

    // The entry is gone; the second claim has nothing to find.
    assert!(matches!(
        bond.claim(&mut ledger, id).unwrap_err(),
        OperationError::NotFound { .. }
    ));
}

// ---------------------------------------------------------------------------
// Heritage: funding through distribution, money and tokens end to end
// ---------------------------------------------------------------------------

#[test]
fn test_heritage_restoration_end_to_end() {
    let (mut ledger, _gate) = setup(&[]);
    let steward = AccountId::new("village-council");
    let verifier = AccountId::new("conservator");
    let mut asset = HeritageAsset::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        heritage_spec(steward.clone()),
    )
    .unwrap();
    let id = asset.asset_id();

    let deadline = ledger.now().plus_secs(SECONDS_PER_YEAR);
    asset
        .create_restoration_project(
            &mut ledger,
            id,
            100_000,
            deadline,
            2,
            verifier.clone(),
            &DocumentHash::new("QmPlan"),
        )
        .unwrap();
    asset
        .define_phase(&mut ledger, id, 1, "stabilize walls", "survey signed off", 60_000)
        .unwrap();
    asset
        .define_phase(&mut ledger, id, 2, "rebuild causeway", "load test passed", 40_000)
        .unwrap();

    for (who, amount) in [("diaspora-fund", 25_000u64), ("unesco-grant", 75_000u64)] {
        let donor = AccountId::new(who);
        ledger.credit(&donor, amount);
        ledger.set_caller(donor);
        asset.contribute(&mut ledger, id, amount).unwrap();
    }
    ledger.set_caller(issuer());
    assert_eq!(ledger.native_balance(&treasury()), 100_000);

    // Phase 1 completes and pays its contractor; phase 2 closes the project.
    ledger.set_caller(verifier.clone());
    asset
        .verify_phase_completion(&mut ledger, id, 1, &DocumentHash::new("QmV1"))
        .unwrap();
    ledger.set_caller(issuer());
    let contractor = AccountId::new("masons-guild");
    asset
        .release_phase_funding(&mut ledger, id, 1, &contractor)
        .unwrap();
    assert_eq!(ledger.native_balance(&contractor), 60_000);

    ledger.set_caller(verifier);
    asset
        .verify_phase_completion(&mut ledger, id, 2, &DocumentHash::new("QmV2"))
        .unwrap();
    ledger.set_caller(issuer());
    assert!(!asset.restoration_required());
    assert_eq!(asset.conservation_status(), "restored");

    // Ownership pool: 60% community reserve, 40% pro-rata to the donors.
    let token = asset
        .issue_ownership_tokens(&mut ledger, id, "Seawall Shares", "SEA")
        .unwrap();
    let progress = asset.distribute_ownership_tokens(&mut ledger, id, 10).unwrap();
    assert!(progress.complete);
    assert_eq!(ledger.token_balance(token, &steward), 600_000);
    assert_eq!(
        ledger.token_balance(token, &AccountId::new("diaspora-fund")),
        100_000
    );
    assert_eq!(
        ledger.token_balance(token, &AccountId::new("unesco-grant")),
        300_000
    );
}

// ---------------------------------------------------------------------------
// Registry: the same store holds whatever the modules produce
// ---------------------------------------------------------------------------

#[test]
fn test_registry_holds_assets_and_appends_metadata_in_call_order() {
    let (mut ledger, _gate) = setup(&[]);
    let mut registry: Registry<MarineAsset> = Registry::new();

    let asset = MarineAsset::create(
        &mut ledger,
        AuthoritySet::with_creator(issuer()),
        treasury(),
        marine_spec(),
    )
    .unwrap();
    let id = registry.insert(asset).unwrap();

    // Fragments appended through the registry land in call order, whoever
    // appends them.
    registry
        .append_metadata(id, "assessment:QmA", ledger.now())
        .unwrap();
    registry
        .append_metadata(id, "amendment:QmB", ledger.now())
        .unwrap();
    registry
        .append_metadata(id, "trigger:QmC", ledger.now())
        .unwrap();
    assert_eq!(
        registry.get(id).unwrap().record().metadata.render(),
        "QmReef|assessment:QmA|amendment:QmB|trigger:QmC"
    );

    // A second instance under the same id is rejected.
    let duplicate = registry.get(id).unwrap().clone();
    assert!(matches!(
        registry.insert(duplicate).unwrap_err(),
        OperationError::StateConflict { .. }
    ));
}
