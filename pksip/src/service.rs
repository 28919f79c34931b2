use crate::error::Result;
use crate::transport::{IncomingRequest, IncomingResponse};

/// A trait which provides a way to extend the proxy's behavior at the points
/// where the core defers to a subclass.
#[async_trait::async_trait]
#[allow(unused_variables)]
pub trait SipService: Sync + Send + 'static {
    /// Returns the service name.
    fn name(&self) -> &str;

    /// Called when an inbound SIP request is received, before proxy
    /// processing. Returning `Ok(true)` short-circuits further handling.
    async fn on_incoming_request(&self, request: &mut IncomingRequest) -> Result<bool> {
        Ok(false)
    }

    /// Called when an inbound SIP response is received outside of any
    /// transaction the proxy core is tracking (late-arriving retransmissions).
    async fn on_incoming_response(&self, response: &mut IncomingResponse) -> Result<bool> {
        Ok(false)
    }
}
