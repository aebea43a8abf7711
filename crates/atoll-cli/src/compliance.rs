//! # Compliance Subcommand
//!
//! Exercises the compliance gate in isolation: KYC registration with lazy
//! expiry, jurisdiction regulators and rules (including the wildcard
//! fallback), asset compliance statuses, and the transaction verification
//! predicate.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use atoll_compliance::{ComplianceGate, ComplianceStatus, KycStatus};
use atoll_core::{AccountId, AssetId, AssetType, JurisdictionCode, Timestamp, TokenId};

/// Arguments for the compliance subcommand.
#[derive(Args, Debug)]
pub struct ComplianceArgs {
    /// Jurisdiction code to exercise.
    #[arg(long, default_value = "FJ")]
    pub jurisdiction: String,

    /// Emit the state dump as compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Run the compliance walkthrough and print its state dump.
pub fn run(args: ComplianceArgs) -> Result<()> {
    let state = walkthrough(&args.jurisdiction)?;
    let dump = if args.compact {
        serde_json::to_string(&state)?
    } else {
        serde_json::to_string_pretty(&state)?
    };
    println!("{dump}");
    Ok(())
}

/// Drive the gate through its full surface and collect the outcomes.
pub fn walkthrough(jurisdiction: &str) -> Result<serde_json::Value> {
    let code = JurisdictionCode::new(jurisdiction)?;
    let regulator = AccountId::new("atoll-regulator");
    let kyc_provider = AccountId::new("atoll-kyc");
    let mut gate = ComplianceGate::new(regulator.clone(), kyc_provider.clone());
    let now = Timestamp::now();

    // KYC: one current approval, one that lapsed a year ago, one pending.
    let investor = AccountId::new("investor");
    let lapsed = AccountId::new("lapsed-investor");
    let applicant = AccountId::new("applicant");
    gate.set_kyc_status(
        &kyc_provider,
        investor.clone(),
        KycStatus::Approved,
        Some(now.plus_secs(31_536_000)),
    )?;
    gate.set_kyc_status(&kyc_provider, lapsed.clone(), KycStatus::Approved, Some(now))?;
    gate.set_kyc_status(&kyc_provider, applicant.clone(), KycStatus::Pending, None)?;
    info!(count = 3, "KYC entries recorded");

    // Jurisdiction: a local regulator, a local rule, and a global fallback.
    let local_regulator = AccountId::new("local-authority");
    gate.register_jurisdiction_regulator(&regulator, code.clone(), local_regulator.clone())?;
    gate.set_jurisdiction_rules(
        &local_regulator,
        code.clone(),
        AssetType::BlueEconomy,
        "quota reporting required",
    )?;
    gate.set_jurisdiction_rules(
        &regulator,
        JurisdictionCode::wildcard(),
        AssetType::CarbonCredit,
        "registry attestation required",
    )?;
    info!(jurisdiction = %code, "regulator and rules registered");

    // Asset statuses: one suspended, one compliant, one never tracked.
    let suspended = AssetId::from_token(TokenId(1));
    let compliant = AssetId::from_token(TokenId(2));
    let untracked = AssetId::from_token(TokenId(3));
    gate.set_asset_compliance_status(
        &regulator,
        suspended,
        ComplianceStatus::Suspended,
        "pending court order",
        now,
    )?;
    gate.set_asset_compliance_status(&regulator, compliant, ComplianceStatus::Compliant, "", now)?;

    let later = now.plus_secs(86_400);
    Ok(json!({
        "kyc": {
            "investor": gate.kyc_decision(&investor, later),
            "lapsed_investor": gate.kyc_decision(&lapsed, later),
            "applicant": gate.kyc_decision(&applicant, later),
            "stranger": gate.kyc_decision(&AccountId::new("stranger"), later),
        },
        "rules": {
            "local_blue_economy": gate.jurisdiction_rules(&code, AssetType::BlueEconomy),
            "fallback_carbon": gate.jurisdiction_rules(&code, AssetType::CarbonCredit),
            "undefined_property": gate.jurisdiction_rules(&code, AssetType::LandProperty),
        },
        "verification": {
            "approved_with_compliant_asset": gate.verify_transaction_compliance(&investor, compliant, later),
            "approved_with_suspended_asset": gate.verify_transaction_compliance(&investor, suspended, later),
            "approved_with_untracked_asset": gate.verify_transaction_compliance(&investor, untracked, later),
            "lapsed_with_compliant_asset": gate.verify_transaction_compliance(&lapsed, compliant, later),
        },
    }))
}
