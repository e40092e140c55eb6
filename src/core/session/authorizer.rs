/*!
Session authorization seam for the secure session subsystem.

Key negotiation for admitted sessions is delegated to an external
authorization service; this trait is the extension point it plugs into.
The subsystem itself only supplies the handshake and cipher building
blocks.
*/

use crate::core::{
    crypto::cipher::SessionCipher,
    session::certificate::SessionCertificate,
};

/// External authorization backend that can negotiate a session key
pub trait SessionAuthorizer {
    /// Negotiate a cipher for the given peer under the given certificate
    ///
    /// Returns `None` when the backend declines (or does not implement)
    /// the negotiation.
    fn negotiate(&self, peer: &str, certificate: &SessionCertificate) -> Option<SessionCipher>;
}

/// Authorizer that declines every negotiation
///
/// Stands in for an authorization backend in tests and in deployments
/// where sessions are registered directly from a completed handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuthorizer;

impl SessionAuthorizer for NullAuthorizer {
    fn negotiate(&self, _peer: &str, _certificate: &SessionCertificate) -> Option<SessionCipher> {
        None
    }
}
