/*!
Asynchronous session channel for the secure session subsystem.

The channel carries encrypted tokens between two peers over a pair of
unbounded queues. Exactly one task drives it, one discrete iteration at a
time, until one of four termination conditions fires: an external
cancellation signal, the session deadline, a graceful cut notice from the
peer, or the peer side going away without one.
*/

use std::fmt;
use std::sync::atomic::Ordering;

use serde_json::Value;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::core::{
    clock,
    config::SessionConfig,
    constants::CUTTING_CONNECTION,
    channel::info::PeerChannelInfo,
    crypto::{cipher::SessionCipher, identity::KemIdentity},
    error::Result,
    session::{issuer::SessionTokenIssuer, token::Token},
    transport::TokenTransport,
};

/// Lifecycle state of a session channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Channel is open and exchanging tokens
    Active,
    /// Peer sent the in-band cut notice
    EndedGracefulPeer,
    /// Session deadline passed
    EndedGracefulTimeout,
    /// Externally-owned cancellation signal was set
    EndedAbruptSignal,
    /// Peer side went away without a cut notice
    EndedAbruptPeerSignal,
}

impl ChannelState {
    /// Whether this is a terminal state
    pub fn is_terminal(self) -> bool {
        self != ChannelState::Active
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelState::Active => write!(f, "Active"),
            ChannelState::EndedGracefulPeer => write!(f, "EndedGracefulPeer"),
            ChannelState::EndedGracefulTimeout => write!(f, "EndedGracefulTimeout"),
            ChannelState::EndedAbruptSignal => write!(f, "EndedAbruptSignal"),
            ChannelState::EndedAbruptPeerSignal => write!(f, "EndedAbruptPeerSignal"),
        }
    }
}

/// Producer half of a session channel
///
/// Handed to whoever enqueues outgoing payloads and feeds received tokens
/// in; the channel itself keeps the sole consumer ends.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    /// Sender for payloads to deliver to the peer
    pub outgoing: UnboundedSender<Value>,
    /// Sender for tokens received from the peer
    pub incoming: UnboundedSender<Token>,
}

/// Cooperative single-consumer token channel between two peers
pub struct SessionChannel<T: TokenTransport> {
    /// Peer metadata handed over at construction
    info: PeerChannelInfo,
    /// Negotiated cipher; the channel never outlives it
    cipher: SessionCipher,
    /// Token issuance for this endpoint
    issuer: SessionTokenIssuer,
    /// Outbound delivery collaborator
    transport: T,
    /// Payloads waiting to be encrypted and delivered
    outgoing: UnboundedReceiver<Value>,
    /// Tokens received but not yet handed to the caller
    incoming: UnboundedReceiver<Token>,
    /// Effective deadline, fixed at construction (Unix seconds)
    deadline: u64,
    /// Current lifecycle state
    state: ChannelState,
}

impl<T: TokenTransport> SessionChannel<T> {
    /// Open a channel for an identity, a negotiated cipher, and a peer
    ///
    /// Returns the channel and the producer handle for its queues. The
    /// effective deadline is the earlier of the peer-supplied end time and
    /// `started_at + session_timeout`; it is not recomputed, so extending
    /// a session means constructing a new channel.
    pub fn new(
        identity: &KemIdentity,
        cipher: SessionCipher,
        info: PeerChannelInfo,
        transport: T,
        config: &SessionConfig,
    ) -> Result<(Self, ChannelHandle)> {
        config.validate()?;

        let issuer = SessionTokenIssuer::new(identity.identity(), identity.id_generator())?;

        let timeout_end = info.started_at + config.session_timeout.as_secs();
        let deadline = match info.ended_at {
            Some(peer_end) => peer_end.min(timeout_end),
            None => timeout_end,
        };

        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();

        let channel = Self {
            info,
            cipher,
            issuer,
            transport,
            outgoing: outgoing_rx,
            incoming: incoming_rx,
            deadline,
            state: ChannelState::Active,
        };

        let handle = ChannelHandle {
            outgoing: outgoing_tx,
            incoming: incoming_tx,
        };

        Ok((channel, handle))
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Whether the channel is still producing iterations
    pub fn is_active(&self) -> bool {
        self.state == ChannelState::Active
    }

    /// Get the effective deadline (Unix seconds)
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    /// Get the channel id
    pub fn channel_id(&self) -> u64 {
        self.info.channel_id
    }

    /// Get the peer metadata
    pub fn info(&self) -> &PeerChannelInfo {
        &self.info
    }

    /// Run one iteration of the produce/consume cycle
    ///
    /// Drains all currently-queued incoming tokens into a batch, then
    /// flushes all currently-queued outgoing payloads to the peer. A
    /// terminated channel returns empty batches; callers observe the
    /// terminal state via `state()` rather than an error.
    pub async fn next_batch(&mut self) -> Result<Vec<Value>> {
        if self.state.is_terminal() {
            return Ok(Vec::new());
        }

        // Cancellation is cooperative: the flag is polled here and never
        // interrupts an in-flight drain
        if self.cancellation_requested() {
            self.send_cut_notice().await;
            self.transition(ChannelState::EndedAbruptSignal);
            return Ok(Vec::new());
        }

        if clock::now_secs() >= self.deadline {
            self.send_cut_notice().await;
            self.transition(ChannelState::EndedGracefulTimeout);
            return Ok(Vec::new());
        }

        // Incoming drains fully before any outgoing send; the cut-notice
        // check depends on this order
        let mut batch = Vec::new();
        loop {
            match self.incoming.try_recv() {
                Ok(token) => {
                    let (_timestamp, payload) = self.issuer.decrypt_token(&token, &self.cipher)?;

                    if payload.as_str() == Some(CUTTING_CONNECTION) {
                        self.transition(ChannelState::EndedGracefulPeer);
                        return Ok(batch);
                    }

                    batch.push(payload);
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.transition(ChannelState::EndedAbruptPeerSignal);
                    return Ok(batch);
                },
            }
        }

        while let Ok(payload) = self.outgoing.try_recv() {
            let token = self.issuer.create_token(&payload, &self.cipher)?;
            self.transport
                .post(&self.info.peer_address, &self.info.peer_endpoint, &token, true)
                .await?;
        }

        Ok(batch)
    }

    fn cancellation_requested(&self) -> bool {
        self.info
            .cancellation_signal
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Best-effort final cut notice; never waits for acknowledgment
    async fn send_cut_notice(&self) {
        let payload = Value::String(CUTTING_CONNECTION.to_string());

        match self.issuer.create_token(&payload, &self.cipher) {
            Ok(token) => {
                let delivery = self
                    .transport
                    .post(&self.info.peer_address, &self.info.peer_endpoint, &token, false)
                    .await;

                if let Err(e) = delivery {
                    log::warn!(
                        "channel {}: cut notice delivery failed: {}",
                        self.info.channel_id,
                        e
                    );
                }
            },
            Err(e) => {
                log::warn!(
                    "channel {}: could not build cut notice: {}",
                    self.info.channel_id,
                    e
                );
            },
        }
    }

    fn transition(&mut self, state: ChannelState) {
        log::info!("channel {}: {} -> {}", self.info.channel_id, self.state, state);
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::{
        config::SecurityLevel,
        constants::sizes,
        crypto::identity::SharedSecret,
        id::UuidGenerator,
    };

    struct NoopTransport;

    impl TokenTransport for NoopTransport {
        async fn post(
            &self,
            _address: &str,
            _endpoint: &str,
            _token: &Token,
            _wait_for_reply: bool,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn test_config() -> SessionConfig {
        let mut config = SessionConfig::default();
        config.security_level = SecurityLevel::Level512;
        config
    }

    fn test_cipher() -> SessionCipher {
        let secret = SharedSecret::new(vec![0x42; sizes::kyber::SHARED_SECRET_BYTES]);
        SessionCipher::from_shared_secret(&secret).expect("cipher")
    }

    fn peer_info(started_at: u64, ended_at: Option<u64>) -> PeerChannelInfo {
        PeerChannelInfo {
            channel_id: 1,
            started_at,
            peer_address: "127.0.0.1:8080".to_string(),
            peer_endpoint: "/tokens".to_string(),
            peer_public_key: Vec::new(),
            cancellation_signal: None,
            ended_at,
        }
    }

    #[test]
    fn test_deadline_prefers_earlier_peer_end() -> Result<()> {
        let config = test_config();
        let identity = KemIdentity::generate(&config, Arc::new(UuidGenerator))?;
        let start = clock::now_secs();

        // Peer-supplied end time earlier than start + timeout wins
        let peer_end = start + 10;
        let (channel, _handle) = SessionChannel::new(
            &identity,
            test_cipher(),
            peer_info(start, Some(peer_end)),
            NoopTransport,
            &config,
        )?;
        assert_eq!(channel.deadline(), peer_end);

        // Absent peer end time falls back to start + timeout
        let (channel, _handle) = SessionChannel::new(
            &identity,
            test_cipher(),
            peer_info(start, None),
            NoopTransport,
            &config,
        )?;
        assert_eq!(channel.deadline(), start + config.session_timeout.as_secs());

        Ok(())
    }

    #[test]
    fn test_state_display() {
        assert_eq!(format!("{}", ChannelState::Active), "Active");
        assert_eq!(format!("{}", ChannelState::EndedGracefulPeer), "EndedGracefulPeer");
        assert!(!ChannelState::Active.is_terminal());
        assert!(ChannelState::EndedAbruptSignal.is_terminal());
    }
}
