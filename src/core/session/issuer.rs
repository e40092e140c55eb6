/*!
Session and token issuance for the secure session subsystem.

The issuer wraps structured payloads into timestamped encrypted tokens and
reverses the operation, and keeps the registry of active sessions keyed by
session-key identity. Key negotiation itself is delegated to an external
`SessionAuthorizer`.
*/

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::core::{
    clock,
    crypto::cipher::SessionCipher,
    error::{Result, Error},
    id::IdGenerator,
    session::{
        authorizer::SessionAuthorizer,
        certificate::SessionCertificate,
        token::Token,
    },
};

/// Issues and consumes encrypted session tokens
pub struct SessionTokenIssuer {
    /// Traceable identity of the issuing endpoint
    identity: String,
    /// Injected identifier generator
    ids: Arc<dyn IdGenerator>,
    /// Active sessions keyed by session-key identity
    sessions: HashMap<String, SessionCipher>,
}

impl SessionTokenIssuer {
    /// Create an issuer for the given endpoint identity
    ///
    /// An issuer without a traceable identity cannot exist; this fails
    /// eagerly rather than at first use.
    pub fn new(identity: &str, ids: Arc<dyn IdGenerator>) -> Result<Self> {
        if identity.is_empty() {
            return Err(Error::SessionMissingIdentity);
        }

        Ok(Self {
            identity: identity.to_string(),
            ids,
            sessions: HashMap::new(),
        })
    }

    /// Get the issuing endpoint's identity
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Stamp a base certificate for a session being admitted now
    pub fn generate_base_certificate(
        &self,
        authorization_code: u64,
        time_of_use_seconds: u64,
    ) -> SessionCertificate {
        let now = clock::now_secs();

        SessionCertificate {
            session_started: now,
            session_key_id: self.ids.new_id(),
            authorization_code,
            max_time_of_use: now + time_of_use_seconds,
            participants: None,
        }
    }

    /// Wrap a structured payload into a timestamped encrypted token
    pub fn create_token<T: Serialize>(&self, payload: &T, cipher: &SessionCipher) -> Result<Token> {
        let encoded = serde_json::to_string(payload)
            .map_err(|e| Error::Internal(format!("payload serialization failed: {}", e)))?;

        let (iv, ciphertext) = cipher.encrypt(&encoded)?;

        Ok(Token {
            timestamp: clock::now_secs(),
            iv,
            ciphertext,
            cipher_name: cipher.cipher_name().to_string(),
        })
    }

    /// Unwrap a token back into its timestamp and structured payload
    ///
    /// With no MAC on the cipher, an unparseable payload is the practical
    /// signal of a key mismatch or corrupted ciphertext.
    pub fn decrypt_token(&self, token: &Token, cipher: &SessionCipher) -> Result<(u64, Value)> {
        let decoded = cipher.decrypt(&token.iv, &token.ciphertext)?;

        let payload: Value = serde_json::from_str(&decoded)
            .map_err(|e| Error::TokenDecode(e.to_string()))?;

        Ok((token.timestamp, payload))
    }

    /// Ask the authorization backend for a session key and register it
    ///
    /// Returns the registered cipher, or `None` when the backend declines
    /// the negotiation.
    pub fn start_session(
        &mut self,
        authorizer: &dyn SessionAuthorizer,
        peer: &str,
        certificate: &SessionCertificate,
    ) -> Option<&SessionCipher> {
        let cipher = authorizer.negotiate(peer, certificate)?;

        log::info!(
            "session {} negotiated with peer {}",
            certificate.session_key_id,
            peer
        );

        self.register_session(&certificate.session_key_id, cipher);
        self.sessions.get(&certificate.session_key_id)
    }

    /// Register a negotiated cipher under a session-key identity
    pub fn register_session(&mut self, session_key_id: &str, cipher: SessionCipher) {
        self.sessions.insert(session_key_id.to_string(), cipher);
    }

    /// Look up the cipher for an active session
    pub fn session(&self, session_key_id: &str) -> Option<&SessionCipher> {
        self.sessions.get(session_key_id)
    }

    /// Drop an active session, returning whether it existed
    pub fn end_session(&mut self, session_key_id: &str) -> bool {
        self.sessions.remove(session_key_id).is_some()
    }

    /// Number of currently registered sessions
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::core::{
        constants::sizes,
        crypto::identity::SharedSecret,
        id::UuidGenerator,
        session::authorizer::NullAuthorizer,
    };

    fn issuer() -> SessionTokenIssuer {
        SessionTokenIssuer::new("issuer-a", Arc::new(UuidGenerator)).expect("issuer")
    }

    fn cipher(byte: u8) -> SessionCipher {
        let secret = SharedSecret::new(vec![byte; sizes::kyber::SHARED_SECRET_BYTES]);
        SessionCipher::from_shared_secret(&secret).expect("cipher")
    }

    struct GrantingAuthorizer(u8);

    impl SessionAuthorizer for GrantingAuthorizer {
        fn negotiate(&self, _peer: &str, _certificate: &SessionCertificate) -> Option<SessionCipher> {
            Some(cipher(self.0))
        }
    }

    #[test]
    fn test_missing_identity_rejected_eagerly() {
        let result = SessionTokenIssuer::new("", Arc::new(UuidGenerator));
        assert!(matches!(result, Err(Error::SessionMissingIdentity)));
    }

    #[test]
    fn test_token_round_trip() -> Result<()> {
        let issuer = issuer();
        let cipher = cipher(0x42);

        let payload = json!({"resource_id": 1, "action": "read"});
        let token = issuer.create_token(&payload, &cipher)?;

        assert_eq!(token.cipher_name, "aes-256-cbc");
        assert!(token.timestamp > 0);

        let (timestamp, decoded) = issuer.decrypt_token(&token, &cipher)?;
        assert_eq!(timestamp, token.timestamp);
        assert_eq!(decoded, payload);

        Ok(())
    }

    #[test]
    fn test_tampered_token_fails_to_decode() -> Result<()> {
        let issuer = issuer();
        let cipher = cipher(0x42);

        let mut token = issuer.create_token(&json!({"resource_id": 1}), &cipher)?;

        // Flip a ciphertext byte; without a MAC this surfaces as a decode
        // or decryption failure rather than an authentication error
        token.ciphertext[0] ^= 0xFF;

        assert!(issuer.decrypt_token(&token, &cipher).is_err());

        Ok(())
    }

    #[test]
    fn test_base_certificate_window() {
        let issuer = issuer();

        let cert = issuer.generate_base_certificate(99, 600);

        assert_eq!(cert.authorization_code, 99);
        assert_eq!(cert.max_time_of_use - cert.session_started, 600);
        assert!(!cert.session_key_id.is_empty());
        assert!(!cert.is_expired());
    }

    #[test]
    fn test_session_registry_lifecycle() {
        let mut issuer = issuer();

        issuer.register_session("key-1", cipher(0x01));
        assert!(issuer.session("key-1").is_some());
        assert_eq!(issuer.active_sessions(), 1);

        assert!(issuer.end_session("key-1"));
        assert!(!issuer.end_session("key-1"));
        assert!(issuer.session("key-1").is_none());
    }

    #[test]
    fn test_start_session_declined() {
        let mut issuer = issuer();
        let cert = issuer.generate_base_certificate(1, 600);

        assert!(issuer.start_session(&NullAuthorizer, "peer-b", &cert).is_none());
        assert_eq!(issuer.active_sessions(), 0);
    }

    #[test]
    fn test_start_session_granted() {
        let mut issuer = issuer();
        let cert = issuer.generate_base_certificate(1, 600);
        let key_id = cert.session_key_id.clone();

        assert!(issuer.start_session(&GrantingAuthorizer(0x07), "peer-b", &cert).is_some());
        assert!(issuer.session(&key_id).is_some());
    }
}
