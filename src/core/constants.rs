/*!
Constants for the secure session subsystem.

This module contains all subsystem constants including key sizes,
cipher parameters, and default session values.
*/

/// Size constants for the subsystem
pub mod sizes {
    /// CRYSTALS-Kyber constants
    pub mod kyber {
        /// Size of Kyber512 public key in bytes
        pub const PUBLIC_KEY_BYTES_512: usize = 800;

        /// Size of Kyber512 secret key in bytes
        pub const SECRET_KEY_BYTES_512: usize = 1632;

        /// Size of Kyber512 ciphertext in bytes
        pub const CIPHERTEXT_BYTES_512: usize = 768;

        /// Size of Kyber768 public key in bytes
        pub const PUBLIC_KEY_BYTES_768: usize = 1184;

        /// Size of Kyber768 secret key in bytes
        pub const SECRET_KEY_BYTES_768: usize = 2400;

        /// Size of Kyber768 ciphertext in bytes
        pub const CIPHERTEXT_BYTES_768: usize = 1088;

        /// Size of Kyber1024 public key in bytes
        pub const PUBLIC_KEY_BYTES_1024: usize = 1568;

        /// Size of Kyber1024 secret key in bytes
        pub const SECRET_KEY_BYTES_1024: usize = 3168;

        /// Size of Kyber1024 ciphertext in bytes
        pub const CIPHERTEXT_BYTES_1024: usize = 1568;

        /// Size of Kyber shared secret in bytes (all levels)
        pub const SHARED_SECRET_BYTES: usize = 32;

        /// Size of the random seed sampled per encapsulation
        pub const SEED_BYTES: usize = 32;
    }

    /// AES-256-CBC constants
    pub mod aes {
        /// Size of the AES-256 key in bytes
        pub const KEY_SIZE: usize = 32;

        /// Size of the AES block in bytes
        pub const BLOCK_SIZE: usize = 16;

        /// Size of the CBC initialization vector in bytes
        pub const IV_SIZE: usize = 16;
    }
}

/// Default salt for HKDF key derivation
pub const HKDF_SALT: &[u8] = b"PQC-Session-v1-Key-Derivation";

/// Info string for HKDF key derivation for AES-256-CBC
pub const HKDF_INFO_AES: &[u8] = b"AES256CBC";

/// Cipher algorithm tag carried on every token
pub const CIPHER_NAME: &str = "aes-256-cbc";

/// Default pad-character alphabet, cycled through when block-aligning plaintext
pub const PAD_ALPHABET: &str = "|~";

/// In-band payload signalling graceful channel termination
pub const CUTTING_CONNECTION: &str = "cutting connection";

/// Configuration defaults
pub mod defaults {
    /// Default session channel timeout in seconds
    pub const SESSION_TIMEOUT_SECS: u64 = 3600; // 1 hour

    /// Default certificate time-of-use window in seconds
    pub const TIME_OF_USE_SECS: u64 = 86400; // 24 hours
}
