/*!
Configuration for the secure session subsystem.

This module provides configuration options for selecting the KEM security
level and tuning session parameters at runtime.
*/

use std::time::Duration;

use crate::core::{
    constants::{defaults, PAD_ALPHABET},
    error::{Result, Error},
};

/// Supported Kyber security levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    /// CRYSTALS-Kyber KEM (Kyber512) - for resource-constrained environments
    Level512,
    /// CRYSTALS-Kyber KEM (Kyber768)
    Level768,
    /// CRYSTALS-Kyber KEM (Kyber1024) - highest security level
    Level1024,
}

impl SecurityLevel {
    /// Get the algorithm tag carried on generated key pairs
    pub fn tag(self) -> &'static str {
        match self {
            SecurityLevel::Level512 => "512",
            SecurityLevel::Level768 => "768",
            SecurityLevel::Level1024 => "1024",
        }
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        SecurityLevel::Level1024
    }
}

/// Configuration for a secure session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// KEM security level
    pub security_level: SecurityLevel,
    /// Ordered filler characters used to block-align plaintext
    pub pad_alphabet: String,
    /// Maximum lifetime of a session channel
    pub session_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            security_level: SecurityLevel::default(),
            pad_alphabet: PAD_ALPHABET.to_string(),
            session_timeout: Duration::from_secs(defaults::SESSION_TIMEOUT_SECS),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration optimized for resource-constrained environments
    pub fn lightweight() -> Self {
        Self {
            security_level: SecurityLevel::Level512,
            ..Self::default()
        }
    }

    /// Create a configuration with a specific channel timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            session_timeout: timeout,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.pad_alphabet.is_empty() {
            return Err(Error::Internal("Pad alphabet must not be empty".into()));
        }

        // Multi-byte pad characters could never block-align the plaintext
        if !self.pad_alphabet.is_ascii() {
            return Err(Error::Internal("Pad alphabet must be ASCII".into()));
        }

        if self.session_timeout.is_zero() {
            return Err(Error::Internal("Session timeout must be non-zero".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();

        assert_eq!(config.security_level, SecurityLevel::Level1024);
        assert_eq!(config.security_level.tag(), "1024");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lightweight_config() {
        let config = SessionConfig::lightweight();

        assert_eq!(config.security_level, SecurityLevel::Level512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_pad_alphabet() {
        let mut config = SessionConfig::default();
        config.pad_alphabet = String::new();
        assert!(config.validate().is_err());

        config.pad_alphabet = "é".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = SessionConfig::with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
