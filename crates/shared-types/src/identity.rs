//! # Organization Identity
//!
//! An organization is named by a short string (`org1`). The ledger
//! authenticates clients and peers by the organization's MSP ID, which is the
//! name followed by a fixed suffix (`org1MSP`). Each organization's private
//! collection is named the same way with a collection suffix
//! (`org1MSPCollection`).
//!
//! Suffixes are passed in rather than hard-coded so deployments with a
//! different naming convention can configure them.

use crate::errors::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default suffix appended to an organization name to form its MSP ID.
pub const DEFAULT_MSP_SUFFIX: &str = "MSP";

/// Default suffix appended to an organization name to form its collection name.
pub const DEFAULT_COLLECTION_SUFFIX: &str = "MSPCollection";

/// Characters the composite-key encoding reserves as delimiters.
const RESERVED_CHARS: [char; 2] = ['\u{0}', '\u{10FFFF}'];

/// Plain organization name as it appears in request payloads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Builds an organization id, rejecting empty names and names containing
    /// composite-key delimiters.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IdentityError::Empty);
        }
        if name.chars().any(|c| RESERVED_CHARS.contains(&c)) {
            return Err(IdentityError::ReservedCharacter(name));
        }
        Ok(Self(name))
    }

    /// Borrows the organization name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MSP ID this organization authenticates as.
    pub fn msp_id(&self, suffix: &str) -> MspId {
        MspId(format!("{}{}", self.0, suffix))
    }

    /// Name of this organization's private collection.
    pub fn collection_name(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membership-service identifier reported for an authenticated client or peer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MspId(String);

impl MspId {
    /// Wraps a raw MSP ID string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the MSP ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the organization name if this id carries the given suffix.
    pub fn org_id(&self, suffix: &str) -> Option<OrgId> {
        self.0
            .strip_suffix(suffix)
            .and_then(|name| OrgId::new(name).ok())
    }
}

impl fmt::Display for MspId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
