/*!
Session and token issuance for the secure session subsystem.

This module provides session certificates, the encrypted token envelope,
the token issuer with its session registry, and the authorization seam.
*/

// Session validity records
pub mod certificate;

// Encrypted token envelope
pub mod token;

// External authorization seam
pub mod authorizer;

// Token issuance and session registry
pub mod issuer;

// Re-export main session types
pub use self::certificate::SessionCertificate;
pub use self::token::Token;
pub use self::authorizer::{SessionAuthorizer, NullAuthorizer};
pub use self::issuer::SessionTokenIssuer;
