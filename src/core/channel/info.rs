/*!
Peer metadata for a session channel.

A `PeerChannelInfo` is handed to the channel at construction and owned by
it for the channel's lifetime; it is never copied into persistent storage.
*/

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Construction-time description of the remote peer
#[derive(Debug, Clone)]
pub struct PeerChannelInfo {
    /// Numeric id of this channel
    pub channel_id: u64,
    /// When the channel was opened (Unix seconds)
    pub started_at: u64,
    /// Network address of the peer
    pub peer_address: String,
    /// Path/resource identifier tokens are delivered to
    pub peer_endpoint: String,
    /// The peer's KEM public key
    pub peer_public_key: Vec<u8>,
    /// Externally-owned flag requesting abrupt termination
    pub cancellation_signal: Option<Arc<AtomicBool>>,
    /// Peer-supplied end time for the session, if any (Unix seconds)
    pub ended_at: Option<u64>,
}
