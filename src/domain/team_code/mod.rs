//! Team access code lookup results
//!
//! Codes are issued and revoked out-of-band; the client only ever submits one
//! for validation or embeds it in a signup request. By convention they look
//! like `THREE11-<ROLE>-<YEAR>`, but the client treats them as opaque.

use serde::{Deserialize, Serialize};

use crate::domain::tier::AccessTier;

/// Outcome of a team code lookup
///
/// Informational only; validating a code never changes any session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCodeStatus {
    pub valid: bool,
    /// Tier the code grants when redeemed at signup; absent for invalid codes
    pub access_level: Option<AccessTier>,
}

impl TeamCodeStatus {
    /// A currently valid code granting `access_level`.
    pub fn valid(access_level: AccessTier) -> Self {
        Self {
            valid: true,
            access_level: Some(access_level),
        }
    }

    /// An invalid code. Expired, revoked, and never-issued are
    /// indistinguishable to the client.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            access_level: None,
        }
    }
}
