/*!
Token delivery boundary for the secure session subsystem.

Outbound delivery is an external collaborator: this subsystem defines the
interface a transport must provide and leaves the wire encoding of the
request body to the implementor.
*/

use crate::core::{error::Result, session::token::Token};

/// Capability for delivering a token to a peer endpoint
#[allow(async_fn_in_trait)]
pub trait TokenTransport {
    /// Deliver a token to `endpoint` at `address`
    ///
    /// When `wait_for_reply` is false the delivery is fire-and-forget and
    /// must not block on the peer acknowledging it.
    async fn post(
        &self,
        address: &str,
        endpoint: &str,
        token: &Token,
        wait_for_reply: bool,
    ) -> Result<()>;
}
