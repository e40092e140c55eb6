/*!
Encrypted token envelope for the secure session subsystem.

A token carries one application payload between peers: the encrypted
payload, the IV it was encrypted under, a creation timestamp, and the
cipher tag. Tokens are per-message and are not retried or cached; losing
one is a transport-layer concern.
*/

use serde::{Deserialize, Serialize};

/// Timestamped encrypted envelope for one payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Creation time (Unix seconds)
    pub timestamp: u64,
    /// Initialization vector used for this message's encryption
    pub iv: Vec<u8>,
    /// Encrypted payload
    pub ciphertext: Vec<u8>,
    /// Cipher algorithm tag
    pub cipher_name: String,
}
