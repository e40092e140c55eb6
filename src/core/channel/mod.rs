/*!
Asynchronous channel components for the secure session subsystem.

This module provides the peer metadata record and the cooperative
single-consumer channel that exchanges encrypted tokens with a peer.
*/

// Peer metadata
pub mod info;

// Channel state machine and drive loop
pub mod channel;

// Re-export main channel types
pub use self::info::PeerChannelInfo;
pub use self::channel::{ChannelState, ChannelHandle, SessionChannel};
