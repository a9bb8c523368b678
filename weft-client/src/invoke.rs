//! The top-level invocation workflow.

use std::time::Duration;

use tracing::{debug, info};
use weft_common::{
    dedup_peers, normalize_args, EndorsementPayload, InvokeError, InvokeRequest, Peer,
};

use crate::commit::orchestrate_commit;
use crate::endorsement::{broadcast_proposal, evaluate};
use crate::network::{ChannelHandle, CredentialProvider, EventHub, LedgerClient};

/// Budget between ordering submission and commit-event receipt when
/// the caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Caller-side description of one invocation.
#[derive(Debug, Clone)]
pub struct InvokeParams {
    pub contract: String,
    pub function: String,
    /// Positional arguments; trailing absent entries are stripped
    /// before the proposal is built.
    pub args: Vec<Option<String>>,
    pub channel_name: String,
    /// Candidate endorsers, possibly with duplicates.
    pub peers: Vec<Peer>,
    /// Identity the proposal is signed with.
    pub identity: String,
    pub timeout: Option<Duration>,
}

/// Runs one invocation end to end: registry → proposal broadcast →
/// endorsement evaluation → commit orchestration → reconciliation.
///
/// Stateless per call; every stage short-circuits to failure, and only
/// a good endorsement reaches commit orchestration. Resolves with the
/// endorsement's decoded application payload.
pub async fn invoke_transaction(
    client: &dyn LedgerClient,
    channel: &dyn ChannelHandle,
    credentials: &dyn CredentialProvider,
    hub: Box<dyn EventHub>,
    params: InvokeParams,
) -> Result<EndorsementPayload, InvokeError> {
    let peers = dedup_peers(params.peers)?;

    client
        .set_identity(&params.identity)
        .await
        .map_err(|e| InvokeError::Network(e.to_string()))?;

    let tx_id = client.new_transaction_id();
    info!(
        %tx_id,
        contract = %params.contract,
        function = %params.function,
        channel = %params.channel_name,
        "invoking transaction"
    );

    let request = InvokeRequest::new(
        params.contract,
        params.function,
        normalize_args(params.args),
        params.channel_name,
        tx_id,
    );

    let bundle = broadcast_proposal(channel, &request, &peers).await?;
    let payload = evaluate(&bundle)?;

    let budget = params.timeout.unwrap_or(DEFAULT_TIMEOUT);
    debug!(tx_id = %request.tx_id, budget_ms = budget.as_millis() as u64, "proposal good, committing");

    let verdict = orchestrate_commit(
        client,
        channel,
        credentials,
        hub,
        &peers,
        &bundle,
        &request.tx_id,
        budget,
    )
    .await?;

    crate::outcome::reconcile(verdict, payload)
}
