//! # Test Network
//!
//! A channel of organizations sharing one in-memory ledger. Every
//! organization owns a mailbox collection that every other organization
//! hosts, and runs one peer.

use cm_ledger::{CollectionConfig, InMemoryLedger};
use cm_messaging::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Installs a subscriber for test output once per process. Honors
/// `CM_LOG_LEVEL` / `RUST_LOG`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = cm_telemetry::init_tracing(&cm_telemetry::TelemetryConfig::for_service(
            "cm-tests",
        ));
    });
}

/// MSP ID of an organization under the default suffix.
pub fn msp(org: &str) -> MspId {
    MspId::new(format!("{org}MSP"))
}

/// Organizations sharing a ledger, one peer each.
pub struct Network {
    pub ledger: Arc<InMemoryLedger>,
    pub service: MessagingService,
    peers: BTreeMap<String, LedgerPeer<InMemoryLedger>>,
}

impl Network {
    pub fn new(orgs: &[&str]) -> Self {
        init_test_tracing();

        let ledger = Arc::new(InMemoryLedger::with_collections(orgs.iter().map(|owner| {
            CollectionConfig::sender_owned(
                format!("{owner}MSPCollection"),
                msp(owner),
                orgs.iter().filter(|org| *org != owner).map(|org| msp(org)),
            )
        })));
        let peers = orgs
            .iter()
            .map(|org| {
                (
                    org.to_string(),
                    LedgerPeer::new(msp(org), Arc::clone(&ledger)),
                )
            })
            .collect();

        Self {
            ledger,
            service: MessagingService::default(),
            peers,
        }
    }

    /// Peer of `org`. Panics for unknown organizations.
    pub fn peer(&self, org: &str) -> &LedgerPeer<InMemoryLedger> {
        &self.peers[org]
    }

    /// `org` sends through its own peer, delivering the payload via the
    /// transient map.
    pub fn send(
        &self,
        org: &str,
        receivers: &[&str],
        message: &str,
        note: &str,
    ) -> Result<(), MessagingError> {
        let request = SendRequest::new(org, receivers.iter().copied(), message, note);
        self.send_request(org, &request)
    }

    /// `caller` submits `request` through its own peer.
    pub fn send_request(&self, caller: &str, request: &SendRequest) -> Result<(), MessagingError> {
        let mut transient = TransientMap::new();
        transient.insert(
            self.service.config().transient_message_key.clone(),
            request.to_transient_bytes()?,
        );
        self.peer(caller).invoke(&msp(caller), transient, |ctx| {
            self.service.send_from_transient(ctx)
        })
    }

    /// `org` reads and drains its own notices.
    pub fn read_notices(&self, org: &str) -> Result<Vec<String>, MessagingError> {
        self.read_notices_as(org, org)
    }

    /// `caller` asks for the notices of `receiver`.
    pub fn read_notices_as(
        &self,
        caller: &str,
        receiver: &str,
    ) -> Result<Vec<String>, MessagingError> {
        self.peer(caller)
            .invoke(&msp(caller), TransientMap::new(), |ctx| {
                self.service.read_notices(ctx, receiver)
            })
    }

    /// `receiver` reads what `sender` sent it.
    pub fn read_messages(
        &self,
        sender: &str,
        receiver: &str,
    ) -> Result<ReadMessagesResponse, MessagingError> {
        self.read_messages_as(receiver, sender, receiver)
    }

    /// `caller` asks for the (sender, receiver) mailbox through its own peer.
    pub fn read_messages_as(
        &self,
        caller: &str,
        sender: &str,
        receiver: &str,
    ) -> Result<ReadMessagesResponse, MessagingError> {
        self.peer(caller).query(&msp(caller), |ctx| {
            self.service.read_messages(ctx, sender, receiver)
        })
    }

    /// Notice state without draining it.
    pub fn notice_state(
        &self,
        receiver: &str,
        sender: &str,
    ) -> Result<Option<NoticeState>, MessagingError> {
        let object_type = &self.service.config().notice_object_type;
        self.peer(receiver).query(&msp(receiver), |ctx| {
            NoticeIndex::new(object_type).notice_state(ctx.stub(), receiver, sender)
        })
    }
}

/// Resubmits `op` while it fails with a retryable conflict, up to
/// `max_attempts` times. Returns the attempts used alongside the result.
pub fn resubmit<T>(
    max_attempts: usize,
    mut op: impl FnMut() -> Result<T, MessagingError>,
) -> (usize, Result<T, MessagingError>) {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match op() {
            Err(err) if err.is_retryable() && attempts < max_attempts => continue,
            result => return (attempts, result),
        }
    }
}
