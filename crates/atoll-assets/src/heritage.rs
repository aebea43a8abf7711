//! # Heritage Assets — Restoration Funding & Stewardship
//!
//! Heritage sites and artifacts tokenized under community stewardship.
//! Restoration is funded in phases: contributions accumulate in the asset
//! treasury, phases complete strictly in order under a designated
//! verifier, and each completed phase releases its allocated funding.
//! Once the funding target is met, a fixed ownership pool is minted and
//! distributed — a community reserve first, then pro-rata cuts for
//! contributors.
//!
//! ## Phase machine
//!
//! ```text
//! pending ──▶ active ──▶ completed ──▶ paid
//! ```
//!
//! Exactly one phase is active at a time; completing phase N activates
//! phase N+1, and completing the last phase marks the asset restored.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use atoll_core::{
    AccountId, AssetId, AssetStatus, AssetType, AuthoritySet, DocumentHash, JurisdictionCode,
    OperationError, Role, Timestamp, TokenId,
};
use atoll_ledger::{Ledger, TokenAuthorities, TokenConfig};
use atoll_registry::{AssetRecord, Tokenized};

/// Fixed ownership pool minted once the funding target is reached.
const OWNERSHIP_TOKEN_SUPPLY: u64 = 1_000_000;

/// Basis points denominator (10000 = 100%).
const BPS_DENOMINATOR: u64 = 10_000;

/// Lifecycle of one restoration phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Waiting for earlier phases to complete.
    Pending,
    /// The phase currently being executed.
    Active,
    /// Verified complete; funding not yet released.
    Completed,
    /// Funding released (terminal).
    Paid,
}

impl PhaseStatus {
    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One restoration phase: definition plus lifecycle status.
///
/// The definition fields stay empty until `define_phase` fills them in;
/// the status machine runs regardless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPhase {
    /// What the phase covers.
    pub description: Option<String>,
    /// Criteria the verifier attests against.
    pub milestone: Option<String>,
    /// Funding released when the phase completes.
    pub allocation: Option<u64>,
    /// Current lifecycle status.
    pub status: PhaseStatus,
}

impl Default for PhaseStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A phased restoration project attached to a heritage asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestorationProject {
    /// Contribution goal; phase allocations may not exceed it in sum.
    pub funding_target: u64,
    /// Contributions close at this time.
    pub deadline: Timestamp,
    /// Number of phases, numbered 1..=N.
    pub phase_count: u32,
    /// The phase currently active.
    pub current_phase: u32,
    /// Total contributed so far; grows monotonically, no cap.
    pub funding_pool: u64,
    phases: BTreeMap<u32, ProjectPhase>,
    contributors: BTreeMap<AccountId, u64>,
}

impl RestorationProject {
    /// The phase entry for `number`, if in range.
    pub fn phase(&self, number: u32) -> Option<&ProjectPhase> {
        self.phases.get(&number)
    }

    /// Cumulative contribution from `account`.
    pub fn contribution_of(&self, account: &AccountId) -> Option<u64> {
        self.contributors.get(account).copied()
    }

    /// Number of distinct contributors.
    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    fn phase_mut(&mut self, number: u32) -> Result<&mut ProjectPhase, OperationError> {
        if number == 0 || number > self.phase_count {
            return Err(OperationError::validation(format!(
                "phase number {number} out of range 1..={}",
                self.phase_count
            )));
        }
        self.phases
            .get_mut(&number)
            .ok_or_else(|| OperationError::not_found(format!("phase {number}")))
    }
}

/// Ownership token pool state: minted once, then drained by the
/// cursor-driven distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OwnershipDistribution {
    token: TokenId,
    /// Funding pool at issuance; the pro-rata basis for every cut.
    pool_snapshot: u64,
    community_allocated: bool,
    /// Last contributor paid; distribution resumes strictly after it.
    cursor: Option<AccountId>,
    complete: bool,
}

/// Progress report from one distribution batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionProgress {
    /// Transfers executed in this batch (including the community reserve).
    pub transferred: usize,
    /// Contributors still waiting after this batch.
    pub remaining: usize,
    /// Whether the distribution is finished.
    pub complete: bool,
}

/// Parameters for creating a heritage asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageAssetSpec {
    /// Display name of the asset token.
    pub name: String,
    /// Token ticker.
    pub unit_name: String,
    /// Heritage class (archaeological, architectural, cultural,
    /// indigenous).
    pub heritage_type: String,
    /// Why the asset matters.
    pub cultural_significance: String,
    /// Protection status (protected, endangered, unesco, ...).
    pub legal_status: String,
    /// Jurisdiction of record.
    pub jurisdiction: JurisdictionCode,
    /// Site location.
    pub geolocation: String,
    /// Community or indigenous group holding stewardship.
    pub steward: AccountId,
    /// Stewardship model (community, split, custodial, ...).
    pub stewardship_model: String,
    /// Primary documentation bundle.
    pub documentation: DocumentHash,
}

/// A tokenized heritage asset layered on one asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageAsset {
    record: AssetRecord,
    authorities: AuthoritySet,
    heritage_type: String,
    cultural_significance: String,
    legal_status: String,
    stewardship_model: String,
    steward: AccountId,
    restoration_required: bool,
    conservation_status: String,
    project: Option<RestorationProject>,
    ownership: Option<OwnershipDistribution>,
    community_share_bps: u64,
    investor_share_bps: u64,
    conservation_share_bps: u64,
}

impl Tokenized for HeritageAsset {
    fn record(&self) -> &AssetRecord {
        &self.record
    }
    fn record_mut(&mut self) -> &mut AssetRecord {
        &mut self.record
    }
}

impl HeritageAsset {
    /// Tokenize a heritage asset as a single-unit token under community
    /// stewardship.
    ///
    /// Restricted to the creator role. The steward is granted the
    /// community-steward role on the asset. Revenue shares default to
    /// 60% community / 30% investors / 10% conservation.
    pub fn create<L: Ledger>(
        ledger: &mut L,
        mut authorities: AuthoritySet,
        treasury: AccountId,
        spec: HeritageAssetSpec,
    ) -> Result<Self, OperationError> {
        let caller = ledger.caller();
        authorities.require(Role::Creator, &caller)?;
        authorities.grant(Role::CommunitySteward, spec.steward.clone());

        let note = format!(
            "Heritage asset: {} | Significance: {} | Status: {}",
            spec.heritage_type, spec.cultural_significance, spec.legal_status
        );
        let token = ledger.create_token(TokenConfig::single_unit(
            TokenAuthorities::managed_by(treasury.clone(), caller.clone()),
            spec.unit_name.clone(),
            spec.name.clone(),
            &spec.documentation,
            note,
        ))?;

        let now = ledger.now();
        let record = AssetRecord::new(
            AssetId::from_token(token),
            caller,
            AssetType::HeritageAsset,
            spec.geolocation,
            spec.jurisdiction,
            spec.documentation.as_str(),
            AssetStatus::Registered,
            treasury,
            now,
        );

        Ok(Self {
            record,
            authorities,
            heritage_type: spec.heritage_type,
            cultural_significance: spec.cultural_significance,
            legal_status: spec.legal_status,
            stewardship_model: spec.stewardship_model,
            steward: spec.steward,
            restoration_required: false,
            conservation_status: "documented".to_string(),
            project: None,
            ownership: None,
            community_share_bps: 6_000,
            investor_share_bps: 3_000,
            conservation_share_bps: 1_000,
        })
    }

    /// The community steward account.
    pub fn steward(&self) -> &AccountId {
        &self.steward
    }

    /// Current conservation status label.
    pub fn conservation_status(&self) -> &str {
        &self.conservation_status
    }

    /// Whether a restoration project is currently open.
    pub fn restoration_required(&self) -> bool {
        self.restoration_required
    }

    /// The restoration project, if one was ever created.
    pub fn project(&self) -> Option<&RestorationProject> {
        self.project.as_ref()
    }

    /// The ownership token, once issued.
    pub fn ownership_token(&self) -> Option<TokenId> {
        self.ownership.as_ref().map(|o| o.token)
    }

    /// Current revenue shares as (community, investor, conservation)
    /// basis points.
    pub fn revenue_shares(&self) -> (u64, u64, u64) {
        (
            self.community_share_bps,
            self.investor_share_bps,
            self.conservation_share_bps,
        )
    }

    /// Append documentation and optionally update the conservation
    /// status.
    ///
    /// Restricted to the creator or community steward.
    pub fn update_documentation<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        document: &DocumentHash,
        document_type: &str,
        new_conservation_status: Option<&str>,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;

        if let Some(status) = new_conservation_status {
            self.conservation_status = status.to_string();
        }
        self.record
            .annotate(format!("{document_type}:{document}"), ledger.now());
        Ok(())
    }

    // ── Restoration project ──────────────────────────────────────────

    /// Open a phased restoration project.
    ///
    /// Restricted to the creator or community steward. Phase 1 starts
    /// active, the rest pending. Only one project per asset.
    pub fn create_restoration_project<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        funding_target: u64,
        deadline: Timestamp,
        phase_count: u32,
        verifier: AccountId,
        project_details: &DocumentHash,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;
        if self.project.is_some() {
            return Err(OperationError::state_conflict(
                "a restoration project already exists for this asset",
            ));
        }

        let now = ledger.now();
        if phase_count == 0 {
            return Err(OperationError::validation("project must have at least one phase"));
        }
        if deadline <= now {
            return Err(OperationError::validation(format!(
                "project deadline {deadline} must be in the future (now {now})"
            )));
        }
        if funding_target == 0 {
            return Err(OperationError::validation("funding target must be positive"));
        }

        let mut phases = BTreeMap::new();
        for number in 1..=phase_count {
            phases.insert(
                number,
                ProjectPhase {
                    status: if number == 1 { PhaseStatus::Active } else { PhaseStatus::Pending },
                    ..ProjectPhase::default()
                },
            );
        }
        self.project = Some(RestorationProject {
            funding_target,
            deadline,
            phase_count,
            current_phase: 1,
            funding_pool: 0,
            phases,
            contributors: BTreeMap::new(),
        });
        self.authorities.grant(Role::Verifier, verifier);
        self.restoration_required = true;
        self.conservation_status = "restoration-planned".to_string();
        self.record.annotate(format!("project:{project_details}"), now);
        Ok(())
    }

    /// Define a phase's description, milestone criteria, and funding
    /// allocation.
    ///
    /// Restricted to the creator, steward, or verifier. The sum of all
    /// allocations — including the one being set — may never exceed the
    /// funding target.
    pub fn define_phase<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        phase_number: u32,
        description: impl Into<String>,
        milestone: impl Into<String>,
        allocation: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require_any(
            &[Role::Creator, Role::CommunitySteward, Role::Verifier],
            &ledger.caller(),
        )?;
        let project = self
            .project
            .as_mut()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;
        if allocation == 0 {
            return Err(OperationError::validation("phase funding must be positive"));
        }

        let other_allocations: u64 = project
            .phases
            .iter()
            .filter(|(number, _)| **number != phase_number)
            .filter_map(|(_, phase)| phase.allocation)
            .sum();
        if other_allocations + allocation > project.funding_target {
            return Err(OperationError::validation(format!(
                "total phase allocations {} would exceed the funding target {}",
                other_allocations + allocation,
                project.funding_target
            )));
        }

        let phase = project.phase_mut(phase_number)?;
        phase.description = Some(description.into());
        phase.milestone = Some(milestone.into());
        phase.allocation = Some(allocation);
        self.record.touch(ledger.now());
        Ok(())
    }

    /// Contribute funds to the open restoration project.
    ///
    /// Open to anyone while the project is active and before its
    /// deadline. The payment escrows into the asset treasury; there is no
    /// cap — over-funding the target is allowed.
    pub fn contribute<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        amount: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        if !self.restoration_required {
            return Err(OperationError::state_conflict("no active restoration project"));
        }
        let project = self
            .project
            .as_mut()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;
        let now = ledger.now();
        if now >= project.deadline {
            return Err(OperationError::state_conflict("project deadline has passed"));
        }
        if amount == 0 {
            return Err(OperationError::validation("contribution must be positive"));
        }

        let contributor = ledger.caller();
        ledger.send_payment(amount, &contributor, &self.record.treasury)?;
        project.funding_pool += amount;
        *project.contributors.entry(contributor).or_insert(0) += amount;
        self.record.touch(now);
        Ok(())
    }

    /// Attest completion of the active phase.
    ///
    /// Restricted to the verifier role; the phase must be active. The
    /// next phase activates, or — on the final phase — the project closes
    /// and the asset is marked restored.
    pub fn verify_phase_completion<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        phase_number: u32,
        verification: &DocumentHash,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require(Role::Verifier, &ledger.caller())?;
        let project = self
            .project
            .as_mut()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;

        let phase = project.phase_mut(phase_number)?;
        if phase.status != PhaseStatus::Active {
            return Err(OperationError::state_conflict(format!(
                "phase {phase_number} is {}, not active",
                phase.status
            )));
        }
        phase.status = PhaseStatus::Completed;

        if phase_number < project.phase_count {
            let next = phase_number + 1;
            project.phase_mut(next)?.status = PhaseStatus::Active;
            project.current_phase = next;
        } else {
            self.restoration_required = false;
            self.conservation_status = "restored".to_string();
        }
        self.record
            .annotate(format!("phase{phase_number}:{verification}"), ledger.now());
        Ok(())
    }

    /// Release a completed phase's allocated funding to a recipient.
    ///
    /// Restricted to the creator, steward, or verifier. Terminal per
    /// phase: the phase moves to `paid`.
    pub fn release_phase_funding<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        phase_number: u32,
        recipient: &AccountId,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities.require_any(
            &[Role::Creator, Role::CommunitySteward, Role::Verifier],
            &ledger.caller(),
        )?;
        let project = self
            .project
            .as_mut()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;

        let phase = project.phase_mut(phase_number)?;
        if phase.status != PhaseStatus::Completed {
            return Err(OperationError::state_conflict(format!(
                "phase {phase_number} is {}, not completed",
                phase.status
            )));
        }
        let allocation = phase.allocation.ok_or_else(|| {
            OperationError::not_found(format!("funding allocation for phase {phase_number}"))
        })?;

        let treasury = self.record.treasury.clone();
        ledger.send_payment(allocation, &treasury, recipient)?;
        project.phase_mut(phase_number)?.status = PhaseStatus::Paid;
        self.record.touch(ledger.now());
        Ok(())
    }

    // ── Ownership tokens ─────────────────────────────────────────────

    /// Mint the fixed ownership pool once the funding target is reached.
    ///
    /// Restricted to the creator or steward. One-shot: a second issuance
    /// is a state conflict. The funding pool is snapshotted here as the
    /// pro-rata basis for distribution.
    pub fn issue_ownership_tokens<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        token_name: impl Into<String>,
        token_unit: impl Into<String>,
    ) -> Result<TokenId, OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;
        if self.ownership.is_some() {
            return Err(OperationError::state_conflict("ownership tokens already issued"));
        }
        let project = self
            .project
            .as_ref()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;
        if project.funding_pool < project.funding_target {
            return Err(OperationError::state_conflict(format!(
                "funding target not reached: {} of {}",
                project.funding_pool, project.funding_target
            )));
        }

        let treasury = self.record.treasury.clone();
        let document = DocumentHash::new(self.record.metadata.render());
        let token = ledger.create_token(TokenConfig::fungible(
            OWNERSHIP_TOKEN_SUPPLY,
            0,
            TokenAuthorities::managed_by(treasury.clone(), treasury),
            token_unit,
            token_name,
            &document,
            format!("Heritage ownership pool for asset {}", self.record.asset_id),
        ))?;

        self.ownership = Some(OwnershipDistribution {
            token,
            pool_snapshot: project.funding_pool,
            community_allocated: false,
            cursor: None,
            complete: false,
        });
        self.record.touch(ledger.now());
        Ok(token)
    }

    /// Distribute the ownership pool: community reserve first, then
    /// pro-rata cuts for contributors.
    ///
    /// Restricted to the creator or steward. Batched and resumable: at
    /// most `max_transfers` ledger transfers run per call, and the cursor
    /// resumes strictly after the last contributor paid, so no batch size
    /// can double-pay anyone. Contributor cuts are
    /// `contribution x investor_pool / funding-pool-snapshot`, rounded
    /// down; rounding dust stays with the treasury.
    pub fn distribute_ownership_tokens<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        max_transfers: usize,
    ) -> Result<DistributionProgress, OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;
        if max_transfers == 0 {
            return Err(OperationError::validation("batch size must be positive"));
        }
        let project = self
            .project
            .as_ref()
            .ok_or_else(|| OperationError::state_conflict("no restoration project"))?;
        let ownership = self
            .ownership
            .as_mut()
            .ok_or_else(|| OperationError::state_conflict("ownership tokens not yet issued"))?;
        if ownership.complete {
            return Err(OperationError::state_conflict("distribution already complete"));
        }

        let treasury = self.record.treasury.clone();
        let community_tokens = OWNERSHIP_TOKEN_SUPPLY * self.community_share_bps / BPS_DENOMINATOR;
        let investor_pool = OWNERSHIP_TOKEN_SUPPLY - community_tokens;

        let mut transferred = 0usize;
        let mut budget = max_transfers;

        if !ownership.community_allocated && budget > 0 {
            ledger.transfer_token(ownership.token, community_tokens, &treasury, &self.steward)?;
            ownership.community_allocated = true;
            transferred += 1;
            budget -= 1;
        }

        let start = match &ownership.cursor {
            Some(last) => Bound::Excluded(last.clone()),
            None => Bound::Unbounded,
        };
        let batch: Vec<(AccountId, u64)> = project
            .contributors
            .range((start, Bound::Unbounded))
            .take(budget)
            .map(|(account, contribution)| (account.clone(), *contribution))
            .collect();
        for (account, contribution) in batch {
            let cut = (u128::from(contribution) * u128::from(investor_pool)
                / u128::from(ownership.pool_snapshot)) as u64;
            if cut > 0 {
                ledger.transfer_token(ownership.token, cut, &treasury, &account)?;
            }
            ownership.cursor = Some(account);
            transferred += 1;
        }

        let remaining = match &ownership.cursor {
            Some(last) => project
                .contributors
                .range((Bound::Excluded(last.clone()), Bound::Unbounded))
                .count(),
            None => project.contributor_count(),
        };
        if remaining == 0 && ownership.community_allocated {
            ownership.complete = true;
        }
        let complete = ownership.complete;
        self.record.touch(ledger.now());
        Ok(DistributionProgress { transferred, remaining, complete })
    }

    // ── Revenue ──────────────────────────────────────────────────────

    /// Record revenue generated by the asset (entry fees, licensing).
    ///
    /// Restricted to the creator or steward; annotation only, the funds
    /// themselves arrive at the treasury out of band.
    pub fn register_revenue<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        amount: u64,
        source: &str,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;

        let now = ledger.now();
        self.record.annotate(
            format!("revenue:{amount}:{source}:{}", now.epoch_secs()),
            now,
        );
        Ok(())
    }

    /// Replace the revenue split.
    ///
    /// Restricted to the creator or steward. The three shares must sum to
    /// exactly 10000 basis points.
    pub fn update_revenue_shares<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        community_bps: u64,
        investor_bps: u64,
        conservation_bps: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;
        if community_bps + investor_bps + conservation_bps != BPS_DENOMINATOR {
            return Err(OperationError::validation(format!(
                "shares must total {BPS_DENOMINATOR} basis points, got {}",
                community_bps + investor_bps + conservation_bps
            )));
        }

        self.community_share_bps = community_bps;
        self.investor_share_bps = investor_bps;
        self.conservation_share_bps = conservation_bps;
        self.record.touch(ledger.now());
        Ok(())
    }

    /// Distribute revenue held in the treasury according to the shares:
    /// the community share goes to the steward, the conservation share
    /// stays in the treasury, and the investor remainder is paid pro-rata
    /// to contributors in one deterministic pass.
    ///
    /// Restricted to the creator or steward. The treasury must already
    /// hold the revenue being distributed.
    pub fn distribute_revenue<L: Ledger>(
        &mut self,
        ledger: &mut L,
        asset_id: AssetId,
        total_revenue: u64,
    ) -> Result<(), OperationError> {
        self.record.require_id(asset_id)?;
        self.authorities
            .require_any(&[Role::Creator, Role::CommunitySteward], &ledger.caller())?;
        if total_revenue == 0 {
            return Err(OperationError::validation("revenue must be positive"));
        }

        let community_amount = total_revenue * self.community_share_bps / BPS_DENOMINATOR;
        let conservation_amount = total_revenue * self.conservation_share_bps / BPS_DENOMINATOR;
        let investor_amount = total_revenue - community_amount - conservation_amount;

        let treasury = self.record.treasury.clone();
        if community_amount > 0 {
            ledger.send_payment(community_amount, &treasury, &self.steward)?;
        }
        // The conservation share stays in the treasury by doing nothing.

        if investor_amount > 0 {
            if let Some(project) = &self.project {
                if project.funding_pool > 0 {
                    let cuts: Vec<(AccountId, u64)> = project
                        .contributors
                        .iter()
                        .map(|(account, contribution)| {
                            let cut = (u128::from(*contribution) * u128::from(investor_amount)
                                / u128::from(project.funding_pool))
                                as u64;
                            (account.clone(), cut)
                        })
                        .collect();
                    for (account, cut) in cuts {
                        if cut > 0 {
                            ledger.send_payment(cut, &treasury, &account)?;
                        }
                    }
                }
            }
        }

        self.record.touch(ledger.now());
        Ok(())
    }

    /// Human-readable summary of the asset.
    pub fn details(&self) -> String {
        let mut details = format!(
            "Heritage asset {} | Type: {} | Significance: {} | Legal status: {} | Conservation: {} | Jurisdiction: {} | Stewardship: {}",
            self.record.asset_id,
            self.heritage_type,
            self.cultural_significance,
            self.legal_status,
            self.conservation_status,
            self.record.jurisdiction,
            self.stewardship_model,
        );
        if let Some(project) = &self.project {
            if self.restoration_required {
                details.push_str(&format!(
                    " | Restoration: active (phase {} of {})",
                    project.current_phase, project.phase_count
                ));
            }
            details.push_str(&format!(
                " | Funding: {} / {}",
                project.funding_pool, project.funding_target
            ));
        }
        if let Some(ownership) = &self.ownership {
            details.push_str(&format!(" | Ownership token: {}", ownership.token));
        }
        details
    }
}
