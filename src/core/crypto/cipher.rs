/*!
Symmetric session cipher for the secure session subsystem.

This module derives the fixed-size session key from a handshake shared
secret and performs AES-256-CBC encryption with an explicit pad-alphabet
padding scheme. CBC without a MAC provides confidentiality only; message
authentication is out of scope for this subsystem.
*/

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;

use crate::core::{
    constants::{sizes, CIPHER_NAME, HKDF_INFO_AES, HKDF_SALT, PAD_ALPHABET},
    crypto::identity::SharedSecret,
    error::{Result, Error, CryptoError},
};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Symmetric cipher state negotiated for one session
///
/// Both peers derive this from the same shared secret; the derivation is
/// deterministic, so the resulting keys are bit-identical on both sides.
#[derive(Clone)]
pub struct SessionCipher {
    /// Derived AES-256 key
    key: [u8; sizes::aes::KEY_SIZE],
    /// Ordered filler bytes cycled through when block-aligning plaintext
    pad_alphabet: Vec<u8>,
}

impl SessionCipher {
    /// Derive a session cipher from a handshake shared secret
    pub fn from_shared_secret(secret: &SharedSecret) -> Result<Self> {
        Self::with_pad_alphabet(secret, PAD_ALPHABET)
    }

    /// Derive a session cipher with a specific pad alphabet
    pub fn with_pad_alphabet(secret: &SharedSecret, pad_alphabet: &str) -> Result<Self> {
        if pad_alphabet.is_empty() || !pad_alphabet.is_ascii() {
            return Err(Error::Internal("Pad alphabet must be non-empty ASCII".into()));
        }

        Ok(Self {
            key: Self::derive_key(secret)?,
            pad_alphabet: pad_alphabet.as_bytes().to_vec(),
        })
    }

    /// Derive the fixed-length symmetric key from the shared secret
    fn derive_key(secret: &SharedSecret) -> Result<[u8; sizes::aes::KEY_SIZE]> {
        if secret.len() != sizes::kyber::SHARED_SECRET_BYTES {
            return Err(Error::InvalidKeyMaterial(format!(
                "expected {} secret bytes, got {}",
                sizes::kyber::SHARED_SECRET_BYTES,
                secret.len()
            )));
        }

        let mut okm = [0u8; sizes::aes::KEY_SIZE];
        let hkdf = Hkdf::<Sha256>::new(Some(HKDF_SALT), secret.as_bytes());

        hkdf.expand(HKDF_INFO_AES, &mut okm)
            .map_err(|_e| Error::CryptoPrimitive(CryptoError::KeyDerivationFailed))?;

        Ok(okm)
    }

    /// Get the cipher algorithm tag
    pub fn cipher_name(&self) -> &'static str {
        CIPHER_NAME
    }

    /// Get the configured pad alphabet
    pub fn pad_alphabet(&self) -> &[u8] {
        &self.pad_alphabet
    }

    /// Encrypt a plaintext, returning the fresh IV and the ciphertext
    ///
    /// The plaintext is UTF-8 encoded and block-aligned by appending pad
    /// characters one at a time, cycling through the pad alphabet. The IV
    /// is not secret and must accompany the ciphertext to the receiver.
    pub fn encrypt(&self, plaintext: &str) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut buf = plaintext.as_bytes().to_vec();

        let mut cursor = 0usize;
        while buf.len() % sizes::aes::BLOCK_SIZE != 0 {
            buf.push(self.pad_alphabet[cursor % self.pad_alphabet.len()]);
            cursor += 1;
        }

        let mut iv = [0u8; sizes::aes::IV_SIZE];
        rand::rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<NoPadding>(&buf);

        Ok((iv.to_vec(), ciphertext))
    }

    /// Decrypt a ciphertext with the IV it was produced under
    ///
    /// Every occurrence of every pad-alphabet character is stripped from
    /// the decrypted text, not just the trailing padding run. A plaintext
    /// that legitimately contains a pad character is therefore corrupted;
    /// this lossy behavior is kept for interoperability with existing
    /// peers.
    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<String> {
        if iv.len() != sizes::aes::IV_SIZE {
            return Err(Error::CryptoPrimitive(CryptoError::DecryptionFailed));
        }

        let mut iv_buf = [0u8; sizes::aes::IV_SIZE];
        iv_buf.copy_from_slice(iv);

        let mut decrypted = Aes256CbcDec::new(&self.key.into(), &iv_buf.into())
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
            .map_err(|_e| Error::CryptoPrimitive(CryptoError::DecryptionFailed))?;

        decrypted.retain(|b| !self.pad_alphabet.contains(b));

        // Without a MAC, garbled output from a mismatched key mostly
        // surfaces here or at the structured-decode layer above
        String::from_utf8(decrypted)
            .map_err(|_e| Error::CryptoPrimitive(CryptoError::DecryptionFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(byte: u8) -> SharedSecret {
        SharedSecret::new(vec![byte; sizes::kyber::SHARED_SECRET_BYTES])
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let cipher = SessionCipher::from_shared_secret(&secret(0x42))?;

        let (iv, ciphertext) = cipher.encrypt("a perfectly ordinary message")?;
        assert_eq!(iv.len(), sizes::aes::IV_SIZE);
        assert_eq!(ciphertext.len() % sizes::aes::BLOCK_SIZE, 0);

        let decrypted = cipher.decrypt(&iv, &ciphertext)?;
        assert_eq!(decrypted, "a perfectly ordinary message");

        Ok(())
    }

    #[test]
    fn test_round_trip_block_aligned_and_empty() -> Result<()> {
        let cipher = SessionCipher::from_shared_secret(&secret(0x42))?;

        // Already aligned: no padding appended
        let aligned = "0123456789abcdef";
        let (iv, ciphertext) = cipher.encrypt(aligned)?;
        assert_eq!(ciphertext.len(), sizes::aes::BLOCK_SIZE);
        assert_eq!(cipher.decrypt(&iv, &ciphertext)?, aligned);

        let (iv, ciphertext) = cipher.encrypt("")?;
        assert!(ciphertext.is_empty());
        assert_eq!(cipher.decrypt(&iv, &ciphertext)?, "");

        Ok(())
    }

    #[test]
    fn test_pad_character_in_plaintext_is_lost() -> Result<()> {
        let cipher = SessionCipher::from_shared_secret(&secret(0x42))?;

        // Documented limitation: pad characters inside the plaintext are
        // stripped on decrypt along with the padding itself
        let (iv, ciphertext) = cipher.encrypt("a|b~c")?;
        let decrypted = cipher.decrypt(&iv, &ciphertext)?;

        assert_ne!(decrypted, "a|b~c");
        assert_eq!(decrypted, "abc");

        Ok(())
    }

    #[test]
    fn test_both_sides_derive_identical_keys() -> Result<()> {
        let a = SessionCipher::from_shared_secret(&secret(0x17))?;
        let b = SessionCipher::from_shared_secret(&secret(0x17))?;

        let (iv, ciphertext) = a.encrypt("interop check")?;
        assert_eq!(b.decrypt(&iv, &ciphertext)?, "interop check");

        Ok(())
    }

    #[test]
    fn test_wrong_length_secret_rejected() {
        let short = SharedSecret::new(vec![0u8; 16]);

        let result = SessionCipher::from_shared_secret(&short);
        assert!(matches!(result, Err(Error::InvalidKeyMaterial(_))));
    }

    #[test]
    fn test_mismatched_key_is_not_authenticated() -> Result<()> {
        let sender = SessionCipher::from_shared_secret(&secret(0x01))?;
        let wrong = SessionCipher::from_shared_secret(&secret(0x02))?;

        let (iv, ciphertext) = sender.encrypt("plausible deniability")?;

        // CBC carries no integrity check: a mismatched key yields either
        // garbage text or a decode failure, never a reliable error
        match wrong.decrypt(&iv, &ciphertext) {
            Ok(text) => assert_ne!(text, "plausible deniability"),
            Err(Error::CryptoPrimitive(CryptoError::DecryptionFailed)) => {},
            Err(other) => panic!("unexpected error: {other}"),
        }

        Ok(())
    }

    #[test]
    fn test_custom_pad_alphabet() -> Result<()> {
        let cipher = SessionCipher::with_pad_alphabet(&secret(0x42), "#")?;

        let (iv, ciphertext) = cipher.encrypt("short")?;
        assert_eq!(cipher.decrypt(&iv, &ciphertext)?, "short");

        assert!(SessionCipher::with_pad_alphabet(&secret(0x42), "").is_err());

        Ok(())
    }
}
