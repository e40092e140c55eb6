/*!
Error handling for the secure session subsystem.

Cryptographic and structural errors are surfaced to the caller and never
retried; channel timeout and peer-initiated termination are modeled as
state transitions in the channel module, not as errors here.
*/

use thiserror::Error;

/// Result type for the secure session subsystem
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the secure session subsystem
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed key bytes (limited details for security)
    #[error("Invalid key")]
    InvalidKey(#[source] KeyError),

    /// Key material of unexpected shape handed to the cipher
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Underlying KEM or cipher failure (fatal, not retried)
    #[error("Cryptographic primitive failed")]
    CryptoPrimitive(#[source] CryptoError),

    /// Decrypted bytes were not parseable in the canonical encoding
    #[error("Token decode failed: {0}")]
    TokenDecode(String),

    /// Attempted to start a session without a traceable identity
    #[error("Session has no traceable identity")]
    SessionMissingIdentity,

    /// Token delivery to the peer endpoint failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Key format errors with limited details to prevent leaking information
#[derive(Error, Debug)]
pub enum KeyError {
    /// Public key has the wrong length or format
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key has the wrong length or format
    #[error("Invalid secret key")]
    InvalidSecretKey,

    /// Ciphertext has the wrong length or format
    #[error("Invalid ciphertext")]
    InvalidCiphertext,
}

/// Cryptographic errors with limited details to prevent leaking information
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key generation failed
    #[error("Key generation failed")]
    KeyGenerationFailed,

    /// Key encapsulation failed
    #[error("Key encapsulation failed")]
    EncapsulationFailed,

    /// Key decapsulation failed
    #[error("Key decapsulation failed")]
    DecapsulationFailed,

    /// Key derivation failed
    #[error("Key derivation failed")]
    KeyDerivationFailed,

    /// Generic encryption error
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Generic decryption error
    #[error("Decryption failed")]
    DecryptionFailed,
}
