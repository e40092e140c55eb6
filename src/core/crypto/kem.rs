/*!
KEM primitive boundary for the secure session subsystem.

This module wraps the Kyber key encapsulation primitives behind a small
trait so the rest of the subsystem treats them as a correct black box,
with support for different parameter sets.
*/

use crate::core::{
    config::SecurityLevel,
    constants::sizes,
    error::{Result, Error, KeyError, CryptoError},
};

use pqcrypto_kyber::{kyber512, kyber768, kyber1024};
use pqcrypto_traits::kem::{PublicKey, SecretKey, Ciphertext, SharedSecret};

/// Key encapsulation mechanism primitive interface
pub trait Kem {
    /// Generate a fresh (public, secret) key pair
    fn keygen(&self) -> Result<(Vec<u8>, Vec<u8>)>;

    /// Encapsulate against a peer public key, producing (shared secret, ciphertext)
    fn encapsulate(&self, public_key: &[u8]) -> Result<(Vec<u8>, Vec<u8>)>;

    /// Recover the shared secret from a ciphertext with the local secret key
    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Public key size for the configured parameter set
    fn public_key_size(&self) -> usize;

    /// Ciphertext size for the configured parameter set
    fn ciphertext_size(&self) -> usize;
}

/// Kyber-backed KEM with a runtime-selected security level
#[derive(Debug, Clone, Copy)]
pub struct KyberKem {
    level: SecurityLevel,
}

impl KyberKem {
    /// Create a new KyberKem at the given security level
    pub fn new(level: SecurityLevel) -> Self {
        Self { level }
    }

    /// Get the configured security level
    pub fn level(&self) -> SecurityLevel {
        self.level
    }
}

impl Kem for KyberKem {
    fn keygen(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let (pk, sk) = match self.level {
            SecurityLevel::Level512 => {
                let (pk, sk) = kyber512::keypair();
                (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
            },
            SecurityLevel::Level768 => {
                let (pk, sk) = kyber768::keypair();
                (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
            },
            SecurityLevel::Level1024 => {
                let (pk, sk) = kyber1024::keypair();
                (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
            },
        };

        if pk.is_empty() || sk.is_empty() {
            return Err(Error::CryptoPrimitive(CryptoError::KeyGenerationFailed));
        }

        Ok((pk, sk))
    }

    fn encapsulate(&self, public_key: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        match self.level {
            SecurityLevel::Level512 => {
                let pk = kyber512::PublicKey::from_bytes(public_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidPublicKey))?;
                let (ss, ct) = kyber512::encapsulate(&pk);
                Ok((ss.as_bytes().to_vec(), ct.as_bytes().to_vec()))
            },
            SecurityLevel::Level768 => {
                let pk = kyber768::PublicKey::from_bytes(public_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidPublicKey))?;
                let (ss, ct) = kyber768::encapsulate(&pk);
                Ok((ss.as_bytes().to_vec(), ct.as_bytes().to_vec()))
            },
            SecurityLevel::Level1024 => {
                let pk = kyber1024::PublicKey::from_bytes(public_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidPublicKey))?;
                let (ss, ct) = kyber1024::encapsulate(&pk);
                Ok((ss.as_bytes().to_vec(), ct.as_bytes().to_vec()))
            },
        }
    }

    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self.level {
            SecurityLevel::Level512 => {
                let sk = kyber512::SecretKey::from_bytes(secret_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidSecretKey))?;
                let ct = kyber512::Ciphertext::from_bytes(ciphertext)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidCiphertext))?;
                let ss = kyber512::decapsulate(&ct, &sk);
                Ok(ss.as_bytes().to_vec())
            },
            SecurityLevel::Level768 => {
                let sk = kyber768::SecretKey::from_bytes(secret_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidSecretKey))?;
                let ct = kyber768::Ciphertext::from_bytes(ciphertext)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidCiphertext))?;
                let ss = kyber768::decapsulate(&ct, &sk);
                Ok(ss.as_bytes().to_vec())
            },
            SecurityLevel::Level1024 => {
                let sk = kyber1024::SecretKey::from_bytes(secret_key)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidSecretKey))?;
                let ct = kyber1024::Ciphertext::from_bytes(ciphertext)
                    .map_err(|_| Error::InvalidKey(KeyError::InvalidCiphertext))?;
                let ss = kyber1024::decapsulate(&ct, &sk);
                Ok(ss.as_bytes().to_vec())
            },
        }
    }

    fn public_key_size(&self) -> usize {
        match self.level {
            SecurityLevel::Level512 => sizes::kyber::PUBLIC_KEY_BYTES_512,
            SecurityLevel::Level768 => sizes::kyber::PUBLIC_KEY_BYTES_768,
            SecurityLevel::Level1024 => sizes::kyber::PUBLIC_KEY_BYTES_1024,
        }
    }

    fn ciphertext_size(&self) -> usize {
        match self.level {
            SecurityLevel::Level512 => sizes::kyber::CIPHERTEXT_BYTES_512,
            SecurityLevel::Level768 => sizes::kyber::CIPHERTEXT_BYTES_768,
            SecurityLevel::Level1024 => sizes::kyber::CIPHERTEXT_BYTES_1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kyber1024_round_trip() -> Result<()> {
        let kem = KyberKem::new(SecurityLevel::Level1024);

        // Generate key pair
        let (public_key, secret_key) = kem.keygen()?;
        assert_eq!(public_key.len(), kem.public_key_size());

        // Encapsulate to get shared secret and ciphertext
        let (encap_secret, ciphertext) = kem.encapsulate(&public_key)?;
        assert_eq!(ciphertext.len(), kem.ciphertext_size());

        // Decapsulate to get the same shared secret
        let decap_secret = kem.decapsulate(&secret_key, &ciphertext)?;

        // Check that the shared secrets match
        assert_eq!(encap_secret, decap_secret);
        assert_eq!(encap_secret.len(), sizes::kyber::SHARED_SECRET_BYTES);

        Ok(())
    }

    #[test]
    fn test_all_levels_round_trip() -> Result<()> {
        for level in [SecurityLevel::Level512, SecurityLevel::Level768, SecurityLevel::Level1024] {
            let kem = KyberKem::new(level);

            let (public_key, secret_key) = kem.keygen()?;
            let (encap_secret, ciphertext) = kem.encapsulate(&public_key)?;
            let decap_secret = kem.decapsulate(&secret_key, &ciphertext)?;

            assert_eq!(encap_secret, decap_secret, "level {}", level.tag());
        }

        Ok(())
    }

    #[test]
    fn test_malformed_public_key() {
        let kem = KyberKem::new(SecurityLevel::Level1024);

        let result = kem.encapsulate(&[0u8; 16]);
        assert!(matches!(result, Err(Error::InvalidKey(KeyError::InvalidPublicKey))));
    }

    #[test]
    fn test_malformed_ciphertext() -> Result<()> {
        let kem = KyberKem::new(SecurityLevel::Level1024);
        let (_, secret_key) = kem.keygen()?;

        let result = kem.decapsulate(&secret_key, &[0u8; 16]);
        assert!(matches!(result, Err(Error::InvalidKey(KeyError::InvalidCiphertext))));

        Ok(())
    }
}
