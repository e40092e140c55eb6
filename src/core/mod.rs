/*!
Core components for the secure session subsystem.

This module contains the fundamental building blocks of the subsystem:
cryptographic primitives, session and token issuance, the async channel,
and error handling.
*/

// Export cryptographic functionality
pub mod crypto;

// Export session and token issuance
pub mod session;

// Export the async token channel
pub mod channel;

// Token delivery boundary
pub mod transport;

// Identifier generation capability
pub mod id;

// Wall-clock helpers
pub mod clock;

// Configuration
pub mod config;

// Subsystem constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Error, Result, KeyError, CryptoError};
pub use self::config::{SessionConfig, SecurityLevel};
pub use self::crypto::{KemIdentity, KemKeyPair, SharedSecret, SessionCipher};
pub use self::session::{SessionCertificate, SessionTokenIssuer, Token};
pub use self::channel::{ChannelState, SessionChannel};
