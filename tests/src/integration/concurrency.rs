//! # Concurrency and Conflict Tests
//!
//! Transactions simulated against the same snapshot and committed in some
//! order. The ledger, not the messaging core, decides which one loses:
//!
//! ```text
//! snapshot h ──simulate──→ tx A ─┐
//!            └─simulate──→ tx B ─┴─→ commit A ✓ ─→ commit B ✗ (stale read)
//!                                                     │
//!                                                  resubmit B on h+1 ✓
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{msp, resubmit, Network};
    use cm_ledger::{detect_conflicts, LedgerApi, LedgerError, ValidationCode};
    use cm_messaging::prelude::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const ORGS: [&str; 4] = ["org1", "org2", "org3", "org4"];

    /// Simulates a send without committing it.
    fn simulate_send(net: &Network, sender: &str, receiver: &str, message: &str) -> LedgerContext {
        let mut ctx = net.peer(sender).begin(msp(sender), TransientMap::new());
        let request = SendRequest::new(sender, [receiver], message, "n");
        net.service.send(&mut ctx, &request).unwrap();
        ctx
    }

    /// Simulates a notice drain without committing it.
    fn simulate_drain(net: &Network, receiver: &str) -> (LedgerContext, Vec<String>) {
        let mut ctx = net.peer(receiver).begin(msp(receiver), TransientMap::new());
        let senders = net.service.read_notices(&mut ctx, receiver).unwrap();
        (ctx, senders)
    }

    // =========================================================================
    // SAME SENDER, SAME RECEIVER
    // =========================================================================

    #[test]
    fn test_concurrent_same_pair_sends_conflict() {
        let net = Network::new(&ORGS);
        let first = simulate_send(&net, "org1", "org2", "first");
        let second = simulate_send(&net, "org1", "org2", "second");

        net.peer("org1").submit(first).unwrap();
        let err = net.peer("org1").submit(second).unwrap_err();
        assert!(matches!(
            err,
            MessagingError::Storage(LedgerError::MvccConflict { .. })
        ));
        assert!(err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Storage);

        // The rejected send wrote nothing; resubmitting delivers it after the first.
        assert_eq!(net.read_messages("org1", "org2").unwrap().messages, vec!["first"]);
        net.send("org1", &["org2"], "second", "n").unwrap();
        assert_eq!(
            net.read_messages("org1", "org2").unwrap().messages,
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_same_pair_sends_in_one_block() {
        let net = Network::new(&ORGS);
        let first = simulate_send(&net, "org1", "org2", "first").into_rwset();
        let second = simulate_send(&net, "org1", "org2", "second").into_rwset();

        assert!(!detect_conflicts(&[first.clone(), second.clone()]).is_empty());

        let codes = net.ledger.commit_block(vec![first, second]);
        assert_eq!(codes[0], ValidationCode::Valid);
        assert!(matches!(codes[1], ValidationCode::MvccReadConflict { .. }));
        assert_eq!(net.read_messages("org1", "org2").unwrap().len(), 1);
    }

    // =========================================================================
    // DIFFERENT SENDERS
    // =========================================================================

    #[test]
    fn test_different_senders_never_conflict() {
        let net = Network::new(&ORGS);
        let rwsets: Vec<_> = ["org1", "org3", "org4"]
            .iter()
            .map(|sender| simulate_send(&net, sender, "org2", sender).into_rwset())
            .collect();

        assert!(detect_conflicts(&rwsets).is_empty());
        let codes = net.ledger.commit_block(rwsets);
        assert!(codes.iter().all(ValidationCode::is_valid));
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1", "org3", "org4"]);
    }

    // =========================================================================
    // DRAIN RACING SEND
    // =========================================================================

    #[test]
    fn test_refresh_committed_first_invalidates_drain() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "one", "a").unwrap();
        net.read_notices("org2").unwrap();

        // Notice is read. A send flips it back while a drain scans it.
        let send = simulate_send(&net, "org1", "org2", "two");
        let (drain, _) = simulate_drain(&net, "org2");

        net.peer("org1").submit(send).unwrap();
        let err = net.peer("org2").submit(drain).unwrap_err();
        assert!(matches!(
            err,
            MessagingError::Storage(LedgerError::PhantomRead { .. })
        ));

        // The unread flag survived.
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
    }

    #[test]
    fn test_drain_committed_first_invalidates_send() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "one", "a").unwrap();

        // Notice is unread. The send reads it and skips the write; the drain
        // flips it to read.
        let send = simulate_send(&net, "org1", "org2", "two");
        let (drain, senders) = simulate_drain(&net, "org2");
        assert_eq!(senders, vec!["org1"]);

        net.peer("org2").submit(drain).unwrap();
        let err = net.peer("org1").submit(send).unwrap_err();
        assert!(err.is_retryable());

        net.send("org1", &["org2"], "two", "b").unwrap();
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
        assert_eq!(net.read_messages("org1", "org2").unwrap().len(), 2);
    }

    // =========================================================================
    // RESUBMISSION UNDER LOAD
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resubmission_loses_nothing() {
        const SENDS_PER_TASK: usize = 10;
        const TASKS: usize = 4;

        let net = Arc::new(Network::new(&ORGS));
        let attempts = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..TASKS)
            .map(|task| {
                let net = Arc::clone(&net);
                let attempts = Arc::clone(&attempts);
                tokio::task::spawn_blocking(move || {
                    for i in 0..SENDS_PER_TASK {
                        let message = format!("t{task}-{i}");
                        let (used, result) =
                            resubmit(1_000, || net.send("org1", &["org2"], &message, "n"));
                        result.unwrap();
                        attempts.lock().push(used);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let messages = net.read_messages("org1", "org2").unwrap().messages;
        assert_eq!(messages.len(), TASKS * SENDS_PER_TASK);

        // Every task's messages appear exactly once and in its own order.
        for task in 0..TASKS {
            let prefix = format!("t{task}-");
            let own: Vec<_> = messages.iter().filter(|m| m.starts_with(&prefix)).collect();
            let expected: Vec<_> = (0..SENDS_PER_TASK).map(|i| format!("t{task}-{i}")).collect();
            assert_eq!(own, expected.iter().collect::<Vec<_>>());
        }
        assert_eq!(attempts.lock().len(), TASKS * SENDS_PER_TASK);
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_senders_to_one_receiver() {
        let net = Arc::new(Network::new(&ORGS));
        let senders = ["org1", "org3", "org4"];

        let handles: Vec<_> = senders
            .iter()
            .map(|sender| {
                let net = Arc::clone(&net);
                let sender = sender.to_string();
                tokio::task::spawn_blocking(move || {
                    for i in 0..5 {
                        let message = format!("{sender}-{i}");
                        let (_, result) =
                            resubmit(1_000, || net.send(&sender, &["org2"], &message, "n"));
                        result.unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        for sender in senders {
            assert_eq!(net.read_messages(sender, "org2").unwrap().len(), 5);
        }
        assert_eq!(net.read_notices("org2").unwrap(), senders.to_vec());
    }
}
