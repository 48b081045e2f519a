//! # Messaging Flows
//!
//! End-to-end sends and reads across organizations sharing one ledger:
//!
//! ```text
//! org1 peer ──send──→ org1MSPCollection[org2] + notice(org2, org1)
//!                                  │
//! org2 peer ──read_notices──→ ["org1"] ──read_messages──→ (messages, notes)
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{msp, Network};
    use cm_ledger::{LedgerApi, Namespace};
    use cm_messaging::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const ORGS: [&str; 3] = ["org1", "org2", "org3"];

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_send_to_two_receivers() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2", "org3"], "hello", "greeting").unwrap();

        for receiver in ["org2", "org3"] {
            let response = net.read_messages("org1", receiver).unwrap();
            assert_eq!(response.messages, vec!["hello"]);
            assert_eq!(response.notes, vec!["greeting"]);
        }
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
        assert_eq!(net.read_notices("org3").unwrap(), vec!["org1"]);
        assert!(net.read_notices("org1").unwrap().is_empty());
    }

    #[test]
    fn test_sender_can_reread_own_mailbox_only_as_receiver() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "hello", "greeting").unwrap();

        let err = net.read_messages_as("org1", "org1", "org2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    // =========================================================================
    // NOTICE INDEX PROPERTIES
    // =========================================================================

    #[test]
    fn test_idempotent_notice() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "one", "a").unwrap();
        net.send("org1", &["org2"], "two", "b").unwrap();

        assert_eq!(
            net.ledger.snapshot().len(&Namespace::Public),
            1,
            "exactly one notice row for (org2, org1)"
        );
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
    }

    #[test]
    fn test_drain_semantics() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "one", "a").unwrap();

        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Read));

        // Already-read senders are still listed.
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Read));

        net.send("org1", &["org2"], "two", "b").unwrap();
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1"]);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Read));
    }

    #[test]
    fn test_notices_ordered_by_sender_not_arrival() {
        let net = Network::new(&["org1", "org2", "org3", "org4"]);
        net.send("org4", &["org2"], "x", "n").unwrap();
        net.send("org1", &["org2"], "y", "n").unwrap();
        net.send("org3", &["org2"], "z", "n").unwrap();

        assert_eq!(net.read_notices("org2").unwrap(), vec!["org1", "org3", "org4"]);
    }

    #[test]
    fn test_notice_exists_is_public_and_non_draining() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "one", "a").unwrap();

        let exists = net
            .peer("org3")
            .query(&msp("org3"), |ctx| net.service.notice_exists(ctx, "org2", "org1"))
            .unwrap();
        assert!(exists);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
    }

    // =========================================================================
    // MAILBOX PROPERTIES
    // =========================================================================

    #[test]
    fn test_monotonic_mailbox() {
        let net = Network::new(&ORGS);
        let mut rng = StdRng::seed_from_u64(7);

        let mut expected = Vec::new();
        for i in 0..25 {
            let message = format!("msg-{i}-{}", rng.gen::<u32>());
            let note = format!("note-{i}");
            net.send("org1", &["org2"], &message, &note).unwrap();
            expected.push((message, note));

            let response = net.read_messages("org1", "org2").unwrap();
            assert_eq!(response.len(), expected.len());
            for (j, (message, note)) in expected.iter().enumerate() {
                assert_eq!(&response.messages[j], message);
                assert_eq!(&response.notes[j], note);
            }
        }
    }

    #[test]
    fn test_cross_sender_isolation() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "from org1", "a").unwrap();
        net.send("org3", &["org2"], "from org3", "b").unwrap();

        assert_eq!(net.read_messages("org1", "org2").unwrap().messages, vec!["from org1"]);
        assert_eq!(net.read_messages("org3", "org2").unwrap().messages, vec!["from org3"]);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Unread));
        assert_eq!(net.notice_state("org2", "org3").unwrap(), Some(NoticeState::Unread));

        let snapshot = net.ledger.snapshot();
        assert_eq!(snapshot.len(&Namespace::Private("org1MSPCollection".into())), 1);
        assert_eq!(snapshot.len(&Namespace::Private("org3MSPCollection".into())), 1);
    }

    #[test]
    fn test_read_inbox_collects_every_conversation() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "a1", "n1").unwrap();
        net.send("org1", &["org2"], "a2", "n2").unwrap();
        net.send("org3", &["org2"], "b1", "n3").unwrap();

        let inbox = net
            .peer("org2")
            .invoke(&msp("org2"), TransientMap::new(), |ctx| {
                net.service.read_inbox(ctx, "org2")
            })
            .unwrap();

        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].sender, "org1");
        assert_eq!(inbox[0].messages, vec!["a1", "a2"]);
        assert_eq!(inbox[1].sender, "org3");
        assert_eq!(inbox[1].notes, vec!["n3"]);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), Some(NoticeState::Read));
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[test]
    fn test_authorization_rejection_leaves_no_trace() {
        let net = Network::new(&ORGS);
        let forged = SendRequest::new("org1", ["org2"], "forged", "n");

        let err = net.send_request("org3", &forged).unwrap_err();
        assert!(matches!(
            err,
            MessagingError::Authorization(AuthorizationError::SenderMismatch { .. })
        ));
        assert_eq!(net.ledger.height(), 0);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), None);
        assert_eq!(
            net.read_messages("org1", "org2").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_reader_must_be_receiver() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "hello", "greeting").unwrap();

        assert_eq!(
            net.read_messages_as("org3", "org1", "org2").unwrap_err().kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            net.read_notices_as("org3", "org2").unwrap_err().kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn test_malformed_receiver_rejects_whole_send() {
        let net = Network::new(&ORGS);
        let request = SendRequest::new("org1", ["org2", "bad\u{0}org"], "hello", "n");

        let err = net.send_request("org1", &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(net.notice_state("org2", "org1").unwrap(), None);
        assert_eq!(net.ledger.height(), 0);
    }

    #[test]
    fn test_failure_on_later_receiver_discards_earlier_writes() {
        let net = Network::new(&ORGS);
        net.peer("org1")
            .invoke(&msp("org1"), TransientMap::new(), |ctx| {
                Ok(ctx
                    .stub()
                    .put_private_data("org1MSPCollection", "org3", b"garbage".to_vec())?)
            })
            .unwrap();

        let err = net.send("org1", &["org2", "org3"], "hello", "n").unwrap_err();
        assert!(matches!(err, MessagingError::CorruptRecord { .. }));
        assert_eq!(net.notice_state("org2", "org1").unwrap(), None);
        assert_eq!(
            net.read_messages("org1", "org2").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_read_on_non_member_peer_is_storage_error() {
        let net = Network::new(&ORGS);
        net.send("org1", &["org2"], "hello", "n").unwrap();

        // org9 is not a member of org1's collection.

        let peer = LedgerPeer::new(msp("org9"), net.ledger.clone());
        let err = peer
            .query(&msp("org9"), |ctx| net.service.read_messages(ctx, "org1", "org9"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(!err.is_retryable());
    }
}
