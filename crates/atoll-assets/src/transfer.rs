//! # Transfer/Authorization Mediator
//!
//! Every transfer across every asset class follows the same contract:
//! verify the caller is the declared `from` party, verify the asset's own
//! rules allow it to move, consult the compliance gate, then — and only
//! then — invoke the ledger and stamp the record. Failure of any
//! precondition aborts before the ledger call, so no partial effect is
//! ever observable.

use atoll_compliance::ComplianceGate;
use atoll_core::{AccountId, AssetId, OperationError, Timestamp, TokenId};
use atoll_ledger::Ledger;
use atoll_registry::AssetRecord;

/// One ownership-changing request, as declared by the caller.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// The asset whose record authorizes the move.
    pub asset_id: AssetId,
    /// The token actually moving (the primary token, a fraction token,
    /// or a certificate).
    pub token: TokenId,
    /// Declared sender; must match the authenticated caller.
    pub from: AccountId,
    /// Recipient.
    pub to: AccountId,
    /// Base units to move.
    pub amount: u64,
}

/// Run a transfer through the shared precondition pipeline.
///
/// `domain_check` carries the asset class's own rules (expiry,
/// verification, fractionalization); it runs after sender authorization
/// and before the compliance gate.
pub fn mediated_transfer<L: Ledger>(
    ledger: &mut L,
    gate: &ComplianceGate,
    record: &mut AssetRecord,
    request: &TransferRequest,
    domain_check: impl FnOnce(Timestamp) -> Result<(), OperationError>,
) -> Result<(), OperationError> {
    record.require_id(request.asset_id)?;

    let caller = ledger.caller();
    if caller != request.from {
        return Err(OperationError::unauthorized(format!(
            "caller {caller} is not the declared sender {}",
            request.from
        )));
    }

    let now = ledger.now();
    if record.status.blocks_transfer() {
        return Err(OperationError::compliance_denied(format!(
            "asset {} is {}",
            record.asset_id, record.status
        )));
    }

    domain_check(now)?;

    if !gate.verify_transaction_compliance(&request.from, record.asset_id, now) {
        return Err(OperationError::compliance_denied(format!(
            "compliance gate rejected {} for asset {}",
            request.from, record.asset_id
        )));
    }

    ledger.transfer_token(request.token, request.amount, &request.from, &request.to)?;
    record.touch(now);
    Ok(())
}
