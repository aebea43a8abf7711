//! # Renewable Energy Infrastructure
//!
//! Tokenized energy projects and their measured output. The project token
//! is either a single deed or a fractional pool, chosen at creation.
//! Production is certified after the fact: one non-divisible certificate
//! per megawatt-hour, minted as a fresh token against a meter reading.

use serde::{Deserialize, Serialize};

use atoll_compliance::ComplianceGate;
use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp, TokenId,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

use crate::transfer::{mediated_transfer, TransferRequest};

/// Kilowatt-hours represented by one production certificate.
const KWH_PER_CERTIFICATE: u64 = 1_000;

/// Parameters for creating an energy project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyProjectSpec {
    /// Project name, used to derive the token name (`ENERGY-<name>`).
    pub project_name: String,
    /// Generation technology (solar, wind, tidal, ...).
    pub energy_type: String,
    /// Installed capacity in watts.
    pub installed_capacity_watts: u64,
    /// Estimated annual output in kilowatt-hours.
    pub estimated_annual_output_kwh: u64,
    /// Expected project lifespan in seconds.
    pub project_lifespan_secs: u64,
    /// Project location.
    pub location: String,
    /// Number of ownership fractions; `None` keeps the project a single
    /// indivisible token.
    pub fractions: Option<u64>,
    /// Technical specification bundle.
    pub technical_specs: DocumentHash,
    /// Jurisdiction of the installation.
    pub jurisdiction: JurisdictionCode,
}

/// A tokenized renewable energy project layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyProject {
    record: AssetRecord,
    authorities: AuthoritySet,
    energy_type: String,
    installed_capacity_watts: u64,
    estimated_annual_output_kwh: u64,
    project_lifespan_secs: u64,
    installation_date: Timestamp,
    /// Certificates minted so far, newest last.
    certificates: Vec<TokenId>,
}

impl Tokenized for EnergyProject {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

impl EnergyProject {
    /// Tokenize a renewable energy project.
    ///
    /// Restricted to the creator role. Fractionalized projects get a
    /// divisible pool; otherwise the project is a single-unit token.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        authorities: AuthoritySet,
        treasury: AccountId,
        spec: EnergyProjectSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;
        if let Some(fractions) = spec.fractions {
            if fractions == 0 {
                return Err(OperationError::validation("fraction count must be positive"));
            }
        }

        let (supply, decimals) = match spec.fractions {
            Some(fractions) => (fractions, 6),
            None => (1, 0),
        };
        let note = format!(
            "Renewable energy project: {} | Capacity: {}W | Est. output: {}kWh",
            spec.energy_type, spec.installed_capacity_watts, spec.estimated_annual_output_kwh
        );
        let token = ledger.create_token(TokenConfig::fungible(
            supply,
            decimals,
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            "ENRG",
            format!("ENERGY-{}", spec.project_name),
            &spec.technical_specs,
            note,
        ))?;

        let now = ledger.now();
        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::RenewableEnergy,
            spec.location,
            spec.jurisdiction,
            spec.technical_specs.as_str(),
            AssetStatus::Authorized,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            energy_type: spec.energy_type,
            installed_capacity_watts: spec.installed_capacity_watts,
            estimated_annual_output_kwh: spec.estimated_annual_output_kwh,
            project_lifespan_secs: spec.project_lifespan_secs,
            installation_date: now,
            certificates: Vec::new(),
        })
    }

    /// Certificates minted so far.
    pub fn certificates(&self) -> &[TokenId] {
        &self.certificates
    }

    /// Certify a metered production period, minting one certificate per
    /// megawatt-hour to the creator's reserve.
    ///
    /// Restricted to the creator role. The period must be non-empty and
    /// cover at least one full certificate.
    pub fn issue_production_certificates<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        period_start: Timestamp,
        period_end: Timestamp,
        energy_produced_kwh: u64,
        meter_reading: &DocumentHash,
    ) -> Result<TokenId, OperationError> {
        self.record.require_id(asset_id)?;
        let caller = ledger.caller();
        self.authorities.require(Role::Creator, &caller)?;

        if period_start >= period_end {
            return Err(OperationError::validation(format!(
                "production period start {period_start} must precede end {period_end}"
            )));
        }
        let certificates = energy_produced_kwh / KWH_PER_CERTIFICATE;
        if certificates == 0 {
            return Err(OperationError::validation(format!(
                "production of {energy_produced_kwh}kWh is below one {KWH_PER_CERTIFICATE}kWh certificate"
            )));
        }

        let note = format!(
            "Renewable energy certificate | Project: {} | Period: {}-{} | Energy: {}kWh",
            self.record.asset_id, period_start, period_end, energy_produced_kwh
        );
        let token = ledger.create_token(TokenConfig::fungible(
            certificates,
            0,
            TokenAuthorities::managed_by(self.record.treasury.clone(), caller),
            "REC",
            format!(
                "REC-{}-{}",
                self.energy_type,
                period_end.epoch_secs()
            ),
            meter_reading,
            note,
        ))?;

        self.certificates.push(token);
        self.record.touch(ledger.now());
        Ok(token)
    }

    /// Record measured performance for a reporting period.
    ///
    /// Restricted to the creator role; the rating must be 1–100.
    pub fn update_performance<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        actual_output_kwh: u64,
        performance_rating: u8,
        maintenance_status: &str,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Creator, &ledger.caller())?;
        if !(1..=100).contains(&performance_rating) {
            return Err(OperationError::validation(format!(
                "performance rating must be between 1 and 100, got {performance_rating}"
            )));
        }

        let now = ledger.now();
        self.record.metadata.append(format!("performance:{performance_rating}"));
        self.record.metadata.append(format!("maintenance:{maintenance_status}"));
        self.record.annotate(format!("output:{actual_output_kwh}"), now);
        Ok(())
    }

    /// Transfer project ownership units through the mediator.
    pub fn transfer<L: Ledger>(
        &mut self,
        ledger: &mut L,
        gate: &ComplianceGate,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), OperationError> {
        let request = TransferRequest {
            asset_id,
            token: self.record.asset_id.as_token(),
            from,
            to,
            amount,
        };
        mediated_transfer(ledger, gate, &mut self.record, &request, |_now| Ok(()))
    }

    /// Human-readable summary of the project.
    pub fn details(&self) -> String {
        format!(
            "Energy project {} | Type: {} | Capacity: {}W | Est. annual output: {}kWh | Installed: {} | Lifespan: {}s | Jurisdiction: {} | Location: {}",
            self.record.asset_id,
            self.energy_type,
            self.installed_capacity_watts,
            self.estimated_annual_output_kwh,
            self.installation_date,
            self.project_lifespan_secs,
            self.record.jurisdiction,
            self.record.geolocation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_compliance::KycStatus;
    use atoll_ledger::InMemoryLedger;

    fn issuer() -> AccountId {
        AccountId::new("issuer")
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(at(1_000), issuer())
    }

    fn spec(fractions: Option<u64>) -> EnergyProjectSpec {
        EnergyProjectSpec {
            project_name: "Lagoon Solar".to_string(),
            energy_type: "solar".to_string(),
            installed_capacity_watts: 5_000_000,
            estimated_annual_output_kwh: 8_000_000,
            project_lifespan_secs: 25 * 31_536_000,
            location: "8.5S,179.2E".to_string(),
            fractions,
            technical_specs: DocumentHash::new("QmSpecs"),
            jurisdiction: JurisdictionCode::new("TV").unwrap(),
        }
    }

    fn create(ledger: &mut InMemoryLedger, fractions: Option<u64>) -> EnergyProject {
        EnergyProject::create(
            ledger,
            AuthoritySet::with_creator(issuer()),
            AccountId::new("treasury"),
            spec(fractions),
        )
        .unwrap()
    }

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn test_create_single_unit_when_not_fractionalized() {
        let mut ledger = ledger();
        let project = create(&mut ledger, None);
        assert_eq!(
            ledger.token_balance(project.asset_id().as_token(), &issuer()),
            1
        );
        assert_eq!(project.record().status, AssetStatus::Authorized);
    }

    #[test]
    fn test_create_fractional_pool() {
        let mut ledger = ledger();
        let project = create(&mut ledger, Some(100_000));
        assert_eq!(
            ledger.token_balance(project.asset_id().as_token(), &issuer()),
            100_000
        );
    }

    #[test]
    fn test_create_rejects_zero_fractions() {
        let mut ledger = ledger();
        assert!(EnergyProject::create(
            &mut ledger,
            AuthoritySet::with_creator(issuer()),
            AccountId::new("treasury"),
            spec(Some(0)),
        )
        .is_err());
    }

    // ── Production certificates ──────────────────────────────────────

    #[test]
    fn test_certificates_one_per_mwh() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, None);
        let id = project.asset_id();
        let cert = project
            .issue_production_certificates(
                &mut ledger,
                id,
                at(1_000),
                at(10_000),
                5_500, // 5.5 MWh -> 5 certificates
                &DocumentHash::new("QmMeter"),
            )
            .unwrap();
        assert_eq!(ledger.token_balance(cert, &issuer()), 5);
        assert_eq!(project.certificates(), &[cert]);
    }

    #[test]
    fn test_certificates_reject_empty_period() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, None);
        let id = project.asset_id();
        assert!(matches!(
            project
                .issue_production_certificates(
                    &mut ledger,
                    id,
                    at(10_000),
                    at(10_000),
                    5_000,
                    &DocumentHash::new("QmMeter"),
                )
                .unwrap_err(),
            OperationError::Validation { .. }
        ));
    }

    #[test]
    fn test_certificates_reject_sub_certificate_production() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, None);
        let id = project.asset_id();
        assert!(project
            .issue_production_certificates(
                &mut ledger,
                id,
                at(1_000),
                at(10_000),
                999,
                &DocumentHash::new("QmMeter"),
            )
            .is_err());
    }

    // ── Performance updates ──────────────────────────────────────────

    #[test]
    fn test_update_performance_appends_fragments() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, None);
        let id = project.asset_id();
        project
            .update_performance(&mut ledger, id, 7_200_000, 88, "nominal")
            .unwrap();
        assert_eq!(
            project.record().metadata.render(),
            "QmSpecs|performance:88|maintenance:nominal|output:7200000"
        );
    }

    #[test]
    fn test_update_performance_rejects_bad_rating() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, None);
        let id = project.asset_id();
        assert!(project
            .update_performance(&mut ledger, id, 1_000, 0, "nominal")
            .is_err());
        assert!(project
            .update_performance(&mut ledger, id, 1_000, 101, "nominal")
            .is_err());
    }

    // ── Transfers ────────────────────────────────────────────────────

    #[test]
    fn test_transfer_fractions() {
        let mut ledger = ledger();
        let mut project = create(&mut ledger, Some(1_000));
        let id = project.asset_id();
        let mut gate = ComplianceGate::new(AccountId::new("regulator"), AccountId::new("kyc"));
        gate.set_kyc_status(&AccountId::new("kyc"), issuer(), KycStatus::Approved, None)
            .unwrap();
        project
            .transfer(&mut ledger, &gate, id, issuer(), AccountId::new("coop"), 250)
            .unwrap();
        assert_eq!(
            ledger.token_balance(id.as_token(), &AccountId::new("coop")),
            250
        );
    }
}
