//! # Ledger Peer
//!
//! Hosts chaincode invocations on behalf of one organization: opens a
//! transaction, runs the call, and submits the read/write set for commit.

use crate::adapters::LedgerContext;
use crate::errors::MessagingError;
use crate::ports::TransactionContext;
use cm_ledger::{CommitReceipt, LedgerApi};
use shared_types::{MspId, TransientMap, TxId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Peer of one organization attached to a shared ledger.
#[derive(Debug)]
pub struct LedgerPeer<L: LedgerApi> {
    org: MspId,
    ledger: Arc<L>,
}

impl<L: LedgerApi> Clone for LedgerPeer<L> {
    fn clone(&self) -> Self {
        Self {
            org: self.org.clone(),
            ledger: Arc::clone(&self.ledger),
        }
    }
}

impl<L: LedgerApi> LedgerPeer<L> {
    pub fn new(org: MspId, ledger: Arc<L>) -> Self {
        Self { org, ledger }
    }

    /// Organization this peer belongs to.
    pub fn msp_id(&self) -> &MspId {
        &self.org
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Opens a transaction for `client` over the current committed snapshot.
    pub fn begin(&self, client: MspId, transient: TransientMap) -> LedgerContext {
        LedgerContext::new(
            self.ledger.simulate(TxId::random(), client, self.org.clone()),
            transient,
        )
    }

    /// Submits a finished transaction for validation and commit.
    pub fn submit(&self, ctx: LedgerContext) -> Result<CommitReceipt, MessagingError> {
        let tx_id = ctx.tx_id().clone();
        match self.ledger.commit(ctx.into_rwset()) {
            Ok(receipt) => {
                debug!(%tx_id, block = receipt.version.block_num, "Transaction committed");
                Ok(receipt)
            }
            Err(err) => {
                warn!(%tx_id, error = %err, "Transaction rejected at commit");
                Err(err.into())
            }
        }
    }

    /// Runs `call` in a fresh transaction and commits it if the call succeeds.
    /// Nothing is committed when the call fails.
    pub fn invoke<T>(
        &self,
        client: &MspId,
        transient: TransientMap,
        call: impl FnOnce(&mut dyn TransactionContext) -> Result<T, MessagingError>,
    ) -> Result<T, MessagingError> {
        let mut ctx = self.begin(client.clone(), transient);
        let output = call(&mut ctx)?;
        self.submit(ctx)?;
        Ok(output)
    }

    /// Runs `call` against the current snapshot without committing.
    pub fn query<T>(
        &self,
        client: &MspId,
        call: impl FnOnce(&mut dyn TransactionContext) -> Result<T, MessagingError>,
    ) -> Result<T, MessagingError> {
        let mut ctx = self.begin(client.clone(), TransientMap::new());
        call(&mut ctx)
    }
}
