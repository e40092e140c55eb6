/*!
# PQC Session

A point-to-point secure-session subsystem built on NIST's post-quantum
cryptography algorithms.

## Overview

This library provides the secure-session core of a larger messaging stack:

- CRYSTALS-Kyber key encapsulation for the two-peer handshake
- A derived AES-256-CBC session cipher with an explicit pad-alphabet
  padding discipline
- Timestamped encrypted tokens wrapping arbitrary structured payloads
- An asynchronous, cooperatively-driven channel that carries tokens
  between two peers and can be torn down in four distinct ways

## Security notes

The session cipher runs CBC without a message authentication code: it
provides confidentiality but no integrity or authenticity. That scope is
inherited from the peers this subsystem interoperates with; an
authenticated-encryption layer is a separate concern. In practice, a key
mismatch or corrupted ciphertext surfaces as a token decode failure.

Pad characters are stripped from every position of decrypted plaintext,
not just the trailing padding run, so payloads containing a pad character
are corrupted in transit. Keep pad-alphabet characters out of payload
text, or configure an alphabet that cannot collide with it.
*/

// Core subsystem components
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::error::{Error, Result, KeyError, CryptoError};
pub use crate::core::config::{SessionConfig, SecurityLevel};
pub use crate::core::constants::{CUTTING_CONNECTION, PAD_ALPHABET, sizes};
pub use crate::core::crypto::{Kem, KyberKem, KemIdentity, KemKeyPair, SharedSecret, SessionCipher};
pub use crate::core::session::{
    SessionCertificate, SessionTokenIssuer, Token, SessionAuthorizer, NullAuthorizer,
};
pub use crate::core::channel::{ChannelState, ChannelHandle, PeerChannelInfo, SessionChannel};
pub use crate::core::transport::TokenTransport;
pub use crate::core::id::{IdGenerator, UuidGenerator};
