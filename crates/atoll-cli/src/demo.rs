//! # Demo Subcommand
//!
//! Scripted lifecycle scenarios, one per asset class. Each scenario
//! narrates its steps through tracing events and returns the final asset
//! state as a JSON value.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;
use tracing::info;

use atoll_assets::{
    BondSpec, CarbonProject, CarbonProjectSpec, DisasterBond, EnergyProject, EnergyProjectSpec,
    HeritageAsset, HeritageAssetSpec, MarineAsset, MarineAssetSpec, PropertyAsset,
    PropertyAssetSpec,
};
use atoll_core::{AuthoritySet, DocumentHash, JurisdictionCode, Role, SECONDS_PER_YEAR};
use atoll_ledger::Ledger;
use atoll_registry::Tokenized;

use crate::harness::Harness;

/// Arguments for the demo subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Scenario to run.
    #[arg(value_enum)]
    pub scenario: Scenario,

    /// Emit the state dump as compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// The available lifecycle scenarios.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Scenario {
    /// Marine right: create, assess, transfer, extend, expire.
    Marine,
    /// Carbon credits: issue against the cap, retire, transfer.
    Carbon,
    /// Property: appraise, fractionalize, amend documentation.
    Property,
    /// Energy project: certify production, report performance.
    Energy,
    /// Disaster bond: invest, trigger, payout, maturity.
    Bond,
    /// Heritage restoration: phased funding through ownership distribution.
    Heritage,
}

/// Run the selected scenario and print its final state dump.
pub fn run(args: DemoArgs) -> Result<()> {
    let state = match args.scenario {
        Scenario::Marine => marine_scenario()?,
        Scenario::Carbon => carbon_scenario()?,
        Scenario::Property => property_scenario()?,
        Scenario::Energy => energy_scenario()?,
        Scenario::Bond => bond_scenario()?,
        Scenario::Heritage => heritage_scenario()?,
    };
    let dump = if args.compact {
        serde_json::to_string(&state)?
    } else {
        serde_json::to_string_pretty(&state)?
    };
    println!("{dump}");
    Ok(())
}

/// Marine right lifecycle: two-year fishing right that is reassessed,
/// partially transferred, and extended.
pub fn marine_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;
    let coop = h.participant("reef-coop", 0)?;

    let mut asset = MarineAsset::create(
        &mut h.ledger,
        AuthoritySet::with_creator(h.issuer.clone()),
        h.treasury.clone(),
        MarineAssetSpec {
            resource_name: "Namena Reef".to_string(),
            resource_type: "fishing-right".to_string(),
            marine_zone: "Namena".to_string(),
            sustainability_rating: 80,
            validity_period_secs: 2 * SECONDS_PER_YEAR,
            documents: DocumentHash::new("QmReefDossier"),
            geo_boundary: "17.1S,179.1E".to_string(),
            jurisdiction: JurisdictionCode::new("FJ")?,
        },
    )?;
    let id = asset.asset_id();
    info!(asset = %id, "marine right created");

    asset.update_sustainability_rating(&mut h.ledger, id, 88, &DocumentHash::new("QmAssessment"))?;
    info!(rating = 88, "sustainability reassessed");

    asset.transfer(&mut h.ledger, &h.gate, id, h.issuer.clone(), coop.clone(), 250_000)?;
    info!(to = %coop, amount = 250_000, "right units transferred");

    asset.extend_validity(&mut h.ledger, id, SECONDS_PER_YEAR)?;
    info!(expires = ?asset.expiration_date(), "validity extended");

    let now = h.ledger.now();
    Ok(json!({
        "asset": asset,
        "details": asset.details(now),
        "valid": asset.is_valid(now),
    }))
}

/// Carbon credit lifecycle: issuance against the verification cap,
/// voluntary retirement, and a secondary-market transfer.
pub fn carbon_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;
    let airline = h.participant("island-air", 0)?;
    let broker = h.participant("carbon-broker", 0)?;

    let vintage_start = h.ledger.now();
    let vintage_end = vintage_start.plus_secs(SECONDS_PER_YEAR);
    let mut project = CarbonProject::create(
        &mut h.ledger,
        AuthoritySet::with_creator(h.issuer.clone()),
        h.treasury.clone(),
        CarbonProjectSpec {
            name: "Mangrove Restoration 2025".to_string(),
            unit_name: "VCU".to_string(),
            credit_type: "blue-carbon".to_string(),
            carbon_registry: "Verra".to_string(),
            registry_project_id: "VCS-4821".to_string(),
            jurisdiction: JurisdictionCode::new("MV")?,
            geolocation: "4.2N,73.5E".to_string(),
            vintage_start,
            vintage_end,
            total_offset: 50_000,
            methodology: "VM0033".to_string(),
            monitoring_report: DocumentHash::new("QmMonitoring"),
            verifier: "SCS Global".to_string(),
        },
    )?;
    let id = project.asset_id();
    info!(asset = %id, total_offset = 50_000, "carbon project created");

    project.issue_credits(&mut h.ledger, id, &airline, 20_000)?;
    info!(to = %airline, amount = 20_000, remaining = project.remaining_offset(), "credits issued");

    h.as_caller(&airline.clone(), |h| {
        project.retire_credits(&mut h.ledger, id, 5_000, "Island Air Ltd", "FY25 offsetting")
    })?;
    info!(amount = 5_000, "credits retired");

    let from = airline.clone();
    h.as_caller(&airline, |h| {
        project.transfer_credits(&mut h.ledger, &h.gate, id, from, broker.clone(), 2_500)
    })?;
    info!(to = %broker, amount = 2_500, "credits transferred");

    Ok(json!({
        "asset": project,
        "details": project.details(),
    }))
}

/// Property lifecycle: appraisal, fractionalization, and a title
/// amendment that refreshes the fraction pool's authorities.
pub fn property_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;

    let mut property = PropertyAsset::create(
        &mut h.ledger,
        AuthoritySet::with_creator(h.issuer.clone()),
        h.treasury.clone(),
        PropertyAssetSpec {
            name: "Harbor Plot 12".to_string(),
            unit_name: "DEED".to_string(),
            property_type: "commercial".to_string(),
            legal_identifier: "CT-4402/12".to_string(),
            jurisdiction: JurisdictionCode::new("FJ")?,
            geolocation: "18.1S,178.4E".to_string(),
            valuation_amount: 2_500_000,
            legal_document: DocumentHash::new("QmDeed"),
        },
    )?;
    let id = property.asset_id();
    info!(asset = %id, "property tokenized");

    property.update_valuation(&mut h.ledger, id, 2_800_000, &DocumentHash::new("QmAppraisal"))?;
    info!(valuation = 2_800_000, "valuation updated");

    let fraction = property.fractionalize(&mut h.ledger, id, "Harbor Plot Shares", "HPS", 10_000, 2)?;
    info!(fraction = %fraction, "property fractionalized");

    property.update_legal_documentation(&mut h.ledger, id, &DocumentHash::new("QmTitleAmend"), "title")?;
    info!("title amendment recorded");

    Ok(json!({
        "asset": property,
        "details": property.details(),
    }))
}

/// Energy project lifecycle: fractional solar plant with certified
/// production and a performance report.
pub fn energy_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;
    let coop = h.participant("island-coop", 0)?;

    let mut project = EnergyProject::create(
        &mut h.ledger,
        AuthoritySet::with_creator(h.issuer.clone()),
        h.treasury.clone(),
        EnergyProjectSpec {
            project_name: "Lagoon Solar".to_string(),
            energy_type: "solar".to_string(),
            installed_capacity_watts: 5_000_000,
            estimated_annual_output_kwh: 8_000_000,
            project_lifespan_secs: 25 * SECONDS_PER_YEAR,
            location: "8.5S,179.2E".to_string(),
            fractions: Some(100_000),
            technical_specs: DocumentHash::new("QmTechSpecs"),
            jurisdiction: JurisdictionCode::new("TV")?,
        },
    )?;
    let id = project.asset_id();
    info!(asset = %id, "energy project tokenized");

    let period_start = h.ledger.now();
    h.ledger.advance_time(90 * 86_400);
    let period_end = h.ledger.now();
    let cert = project.issue_production_certificates(
        &mut h.ledger,
        id,
        period_start,
        period_end,
        1_950_000,
        &DocumentHash::new("QmMeterQ1"),
    )?;
    info!(certificate = %cert, "production certified");

    project.update_performance(&mut h.ledger, id, 1_950_000, 92, "nominal")?;
    info!(rating = 92, "performance recorded");

    project.transfer(&mut h.ledger, &h.gate, id, h.issuer.clone(), coop, 25_000)?;
    info!(amount = 25_000, "project fractions transferred");

    Ok(json!({
        "asset": project,
        "details": project.details(),
    }))
}

/// Disaster bond lifecycle: investment, a sub-threshold reading, the
/// trigger, the payout, and closure at maturity.
pub fn bond_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;
    let investor_a = h.participant("pension-fund", 400_000)?;
    let investor_b = h.participant("impact-fund", 200_000)?;
    let relief = h.participant("relief-agency", 0)?;

    let oracle = h.participant("weather-oracle", 0)?;
    let mut authorities = AuthoritySet::with_creator(h.issuer.clone());
    authorities.grant(Role::Oracle, oracle.clone());

    let maturity = h.ledger.now().plus_secs(SECONDS_PER_YEAR);
    let mut bond = DisasterBond::create(
        &mut h.ledger,
        authorities,
        h.treasury.clone(),
        BondSpec {
            name: "Cyclone Bond 2026".to_string(),
            unit_name: "CYC".to_string(),
            bond_type: "parametric".to_string(),
            trigger_type: "wind-speed-kmh".to_string(),
            trigger_threshold: 185,
            coverage_amount: 500_000,
            maturity_date: maturity,
            interest_rate_bps: 500,
            jurisdiction: JurisdictionCode::new("VU")?,
            geolocation: "17.7S,168.3E".to_string(),
            bond_document: DocumentHash::new("QmProspectus"),
            total_bond_value: 1_000_000,
        },
    )?;
    let id = bond.asset_id();
    info!(asset = %id, threshold = 185, "bond issued");

    h.as_caller(&investor_a.clone(), |h| bond.invest(&mut h.ledger, id, 400_000))?;
    h.as_caller(&investor_b.clone(), |h| bond.invest(&mut h.ledger, id, 200_000))?;
    info!(bondholders = bond.bondholder_count(), "investments recorded");

    let reading_time = h.ledger.now();
    let calm = h.as_caller(&oracle.clone(), |h| {
        bond.process_trigger_event(&mut h.ledger, id, &DocumentHash::new("QmCalm"), 140, reading_time)
    })?;
    info!(oracle_value = 140, fired = calm, "reading below threshold");

    h.ledger.advance_time(120 * 86_400);
    let reading_time = h.ledger.now();
    let fired = h.as_caller(&oracle, |h| {
        bond.process_trigger_event(&mut h.ledger, id, &DocumentHash::new("QmCyclone"), 210, reading_time)
    })?;
    info!(oracle_value = 210, fired, "trigger threshold reached");

    bond.process_payout(&mut h.ledger, id, &relief)?;
    info!(beneficiary = %relief, coverage = 500_000, "coverage paid");

    h.ledger.set_now(maturity);
    bond.process_maturity(&mut h.ledger, id)?;
    info!(status = %bond.record().status, "bond closed at maturity");

    Ok(json!({
        "asset": bond,
        "status_line": bond.status_line(),
    }))
}

/// Heritage restoration lifecycle: phased funding, verification,
/// ownership distribution, and a season of revenue.
pub fn heritage_scenario() -> Result<serde_json::Value> {
    let mut h = Harness::new()?;
    let steward = h.participant("village-council", 0)?;
    let verifier = h.participant("conservator", 0)?;
    let donor_a = h.participant("diaspora-fund", 40_000)?;
    let donor_b = h.participant("unesco-grant", 60_000)?;
    let contractor = h.participant("masons-guild", 0)?;

    let mut asset = HeritageAsset::create(
        &mut h.ledger,
        AuthoritySet::with_creator(h.issuer.clone()),
        h.treasury.clone(),
        HeritageAssetSpec {
            name: "Nan Madol Seawall".to_string(),
            unit_name: "HERI".to_string(),
            heritage_type: "archaeological".to_string(),
            cultural_significance: "ceremonial center".to_string(),
            legal_status: "unesco".to_string(),
            jurisdiction: JurisdictionCode::new("FM")?,
            geolocation: "6.8N,158.3E".to_string(),
            steward: steward.clone(),
            stewardship_model: "community".to_string(),
            documentation: DocumentHash::new("QmSiteDossier"),
        },
    )?;
    let id = asset.asset_id();
    info!(asset = %id, "heritage asset registered");

    let deadline = h.ledger.now().plus_secs(SECONDS_PER_YEAR);
    asset.create_restoration_project(
        &mut h.ledger,
        id,
        100_000,
        deadline,
        3,
        verifier.clone(),
        &DocumentHash::new("QmRestorationPlan"),
    )?;
    asset.define_phase(&mut h.ledger, id, 1, "stabilize walls", "survey signed off", 40_000)?;
    asset.define_phase(&mut h.ledger, id, 2, "rebuild causeway", "load test passed", 30_000)?;
    asset.define_phase(&mut h.ledger, id, 3, "site landscaping", "final inspection", 30_000)?;
    info!(phases = 3, target = 100_000, "restoration project opened");

    h.as_caller(&donor_a.clone(), |h| asset.contribute(&mut h.ledger, id, 40_000))?;
    h.as_caller(&donor_b.clone(), |h| asset.contribute(&mut h.ledger, id, 60_000))?;
    info!(pool = asset.project().map(|p| p.funding_pool), "funding target reached");

    for phase in 1..=3u32 {
        h.as_caller(&verifier.clone(), |h| {
            asset.verify_phase_completion(&mut h.ledger, id, phase, &DocumentHash::new("QmPhaseReport"))
        })?;
        info!(phase, "phase verified");
    }
    asset.release_phase_funding(&mut h.ledger, id, 1, &contractor)?;
    info!(phase = 1, amount = 40_000, "phase funding released");

    let token = asset.issue_ownership_tokens(&mut h.ledger, id, "Seawall Shares", "SEA")?;
    info!(token = %token, "ownership pool minted");
    loop {
        let progress = asset.distribute_ownership_tokens(&mut h.ledger, id, 8)?;
        info!(transferred = progress.transferred, remaining = progress.remaining, "distribution batch");
        if progress.complete {
            break;
        }
    }

    h.ledger.credit(&h.treasury, 10_000);
    asset.register_revenue(&mut h.ledger, id, 10_000, "entry-fees")?;
    asset.distribute_revenue(&mut h.ledger, id, 10_000)?;
    info!(revenue = 10_000, "seasonal revenue distributed");

    Ok(json!({
        "asset": asset,
        "details": asset.details(),
    }))
}
