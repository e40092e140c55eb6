/*!
Session certificates for the secure session subsystem.

A certificate is created when a session is admitted by an external
authorization process and defines the session's validity window. It is
never mutated after creation: a session is either within or past its
`max_time_of_use`.
*/

use serde::{Deserialize, Serialize};

use crate::core::clock;

/// Validity record for an admitted session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCertificate {
    /// When the session was admitted (Unix seconds)
    pub session_started: u64,
    /// Unique id of the negotiated session key
    pub session_key_id: String,
    /// Capability/grant reference from the authorization process
    pub authorization_code: u64,
    /// Latest moment the session may be used (Unix seconds)
    pub max_time_of_use: u64,
    /// Peer ids participating in the session, if known
    pub participants: Option<Vec<String>>,
}

impl SessionCertificate {
    /// Check whether the validity window has passed
    pub fn is_expired(&self) -> bool {
        clock::now_secs() >= self.max_time_of_use
    }

    /// Seconds remaining in the validity window
    pub fn remaining_secs(&self) -> u64 {
        self.max_time_of_use.saturating_sub(clock::now_secs())
    }
}
