/*!
Cryptographic components for the secure session subsystem.

This module provides the KEM primitive boundary, the handshake identity,
and the derived symmetric session cipher.
*/

// KEM primitive boundary
pub mod kem;

// Handshake identity and key pair
pub mod identity;

// Symmetric session cipher
pub mod cipher;

// Re-export frequently used types
pub use self::kem::{Kem, KyberKem};
pub use self::identity::{KemIdentity, KemKeyPair, SharedSecret};
pub use self::cipher::SessionCipher;
