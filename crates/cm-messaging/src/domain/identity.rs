//! Identity guards.
//!
//! Pure checks composed at the start of each public operation. None of them
//! touch state.

use crate::errors::AuthorizationError;
use shared_types::{MspId, OrgId};

/// Fails unless `sender` authenticates as `caller`.
pub fn verify_sender_matches_caller(
    sender: &OrgId,
    caller: &MspId,
    msp_suffix: &str,
) -> Result<(), AuthorizationError> {
    if &sender.msp_id(msp_suffix) == caller {
        Ok(())
    } else {
        Err(AuthorizationError::SenderMismatch {
            sender: sender.to_string(),
            caller: caller.to_string(),
        })
    }
}

/// Fails unless `receiver` authenticates as `caller`.
pub fn verify_receiver_matches_caller(
    receiver: &OrgId,
    caller: &MspId,
    msp_suffix: &str,
) -> Result<(), AuthorizationError> {
    if &receiver.msp_id(msp_suffix) == caller {
        Ok(())
    } else {
        Err(AuthorizationError::ReceiverMismatch {
            receiver: receiver.to_string(),
            caller: caller.to_string(),
        })
    }
}

/// Fails unless the executing peer belongs to the caller's organization.
pub fn verify_caller_hosted_locally(caller: &MspId, peer: &MspId) -> Result<(), AuthorizationError> {
    if caller == peer {
        Ok(())
    } else {
        Err(AuthorizationError::NotHostedLocally {
            caller: caller.to_string(),
            peer: peer.to_string(),
        })
    }
}
