/*!
KEM identity for the secure session subsystem.

A `KemIdentity` owns a Kyber key pair and performs the two halves of the
handshake: the initiator encapsulates against the responder's public key,
the responder decapsulates the resulting ciphertext, and both ends recover
the same shared secret.
*/

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::core::{
    config::SessionConfig,
    constants::sizes,
    crypto::kem::{Kem, KyberKem},
    error::Result,
    id::IdGenerator,
};

/// A KEM key pair scoped to a single identity
///
/// The secret key never leaves the owning `KemIdentity`; there is no key
/// rotation, so the pair is immutable after generation.
pub struct KemKeyPair {
    /// Secret key material (private)
    secret_key: Vec<u8>,
    /// Public key material, shared with peers
    public_key: Vec<u8>,
    /// Session-scoped unique id of this key pair
    identity: String,
    /// Optional attestation record
    validity: Option<String>,
    /// Security-level tag ("512", "768", "1024")
    algorithm: &'static str,
}

impl KemKeyPair {
    /// Get the public key bytes
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Get the identity of this key pair
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Get the attestation record, if any
    pub fn validity(&self) -> Option<&str> {
        self.validity.as_deref()
    }

    /// Get the security-level tag
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }
}

impl fmt::Debug for KemKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KemKeyPair")
            .field("identity", &self.identity)
            .field("algorithm", &self.algorithm)
            .field("public_key_len", &self.public_key.len())
            .finish_non_exhaustive()
    }
}

/// Shared secret established by the handshake
///
/// Transient key material: consumed immediately to derive a session cipher
/// and not persisted.
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Wrap raw encapsulated secret bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the secret in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret({} bytes)", self.0.len())
    }
}

/// A handshake endpoint owning one KEM key pair
pub struct KemIdentity {
    /// The key pair generated at construction
    keypair: KemKeyPair,
    /// KEM primitive at the configured security level
    kem: KyberKem,
    /// Injected identifier generator
    ids: Arc<dyn IdGenerator>,
}

impl KemIdentity {
    /// Generate a fresh identity with its own key pair
    pub fn generate(config: &SessionConfig, ids: Arc<dyn IdGenerator>) -> Result<Self> {
        config.validate()?;

        let kem = KyberKem::new(config.security_level);
        let (public_key, secret_key) = kem.keygen()?;
        let identity = ids.new_id();

        log::debug!(
            "generated KEM identity {} (level {})",
            identity,
            config.security_level.tag()
        );

        Ok(Self {
            keypair: KemKeyPair {
                secret_key,
                public_key,
                identity,
                validity: None,
                algorithm: config.security_level.tag(),
            },
            kem,
            ids,
        })
    }

    /// Get the public key to hand to a peer
    pub fn public_key(&self) -> &[u8] {
        self.keypair.public_key()
    }

    /// Get this identity's unique id
    pub fn identity(&self) -> &str {
        self.keypair.identity()
    }

    /// Get the security-level tag of the key pair
    pub fn algorithm(&self) -> &'static str {
        self.keypair.algorithm()
    }

    /// Get the key pair record (secret key stays private to it)
    pub fn keypair(&self) -> &KemKeyPair {
        &self.keypair
    }

    /// Get a handle to the injected identifier generator
    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.ids)
    }

    /// Sample a fresh random seed
    ///
    /// Always draws new bytes from the CSPRNG; a seed must never be reused
    /// across calls.
    pub fn generate_seed(&self) -> [u8; sizes::kyber::SEED_BYTES] {
        let mut seed = [0u8; sizes::kyber::SEED_BYTES];
        rand::rng().fill_bytes(&mut seed);
        seed
    }

    /// Generate a fresh capability/grant reference
    pub fn generate_capability(&self) -> u64 {
        rand::random::<u64>()
    }

    /// Produce a fresh session-scoped identifier from the injected generator
    pub fn new_session_id(&self) -> String {
        self.ids.new_id()
    }

    /// Encapsulate against a peer's public key (initiator side)
    ///
    /// Returns the shared secret and the ciphertext to send to the peer.
    pub fn encapsulate(&self, peer_public_key: &[u8]) -> Result<(SharedSecret, Vec<u8>)> {
        let (secret, ciphertext) = self.kem.encapsulate(peer_public_key)?;
        Ok((SharedSecret::new(secret), ciphertext))
    }

    /// Recover the shared secret from a peer's ciphertext (responder side)
    ///
    /// Produces bytes identical to the secret the peer derived via
    /// `encapsulate`; that equality is what makes the handshake succeed.
    pub fn decapsulate(&self, ciphertext: &[u8]) -> Result<SharedSecret> {
        let secret = self.kem.decapsulate(&self.keypair.secret_key, ciphertext)?;
        Ok(SharedSecret::new(secret))
    }
}
