//! The extension seam role-specific proxies hook into (§6 "Interface exposed
//! to subclasses").
//!
//! The source this core is modeled on is specialized by C++ subclassing:
//! an edge proxy, an interrogating proxy, and a call router each derive
//! from the same `BasicProxy`/`UASTsx` pair and override a handful of
//! virtual methods. Rust has no subclassing, so the same seam is expressed
//! as a trait object the deployment hands to [`super::Proxy`] at
//! construction time; [`UasTransaction`](super::UasTransaction) calls
//! through it at exactly the points the source overrides.

use async_trait::async_trait;

use super::core::ProxyCore;
use crate::message::{Request, Response, StatusCode};
use crate::resolver::Target;

/// Hooks a deployment overrides to specialize the generic forking-proxy
/// engine into a role-specific proxy (edge/access proxy, interrogating
/// proxy, call router, ...). Every method has a default that reproduces
/// the base engine's behavior, so a deployment only overrides what it
/// needs to change.
#[async_trait]
#[allow(unused_variables)]
pub trait ProxyDelegate: Send + Sync + 'static {
    /// Extension point for request verification (§4.1.1): loop detection,
    /// `Proxy-Require`, `Proxy-Authorization`. Returning `Some(status)`
    /// rejects the request with that status before the base checks run;
    /// returning `None` falls through to the base verification.
    async fn verify_request(&self, request: &Request) -> Option<StatusCode> {
        None
    }

    /// Computes the forwarding targets for a request that route
    /// preprocessing didn't already resolve (§4.2.3). The default forks to
    /// the request-URI as-is for a foreign domain, and rejects a
    /// local-domain request with `404` (by returning no targets).
    async fn calculate_targets(&self, request: &Request, core: &ProxyCore) -> Vec<Target> {
        if core.is_local_or_home(&request.uri) {
            return Vec::new();
        }
        vec![Target::with_uri(request.uri.clone())]
    }

    /// Called once, when a UAS transaction starts processing its request.
    async fn on_tsx_start(&self, request: &Request) {}

    /// Called when a UAS transaction's underlying protocol transaction
    /// completes.
    async fn on_tsx_complete(&self) {}

    /// Called just before a response is sent upstream on the UAS
    /// transaction, with the chance to rewrite it.
    async fn on_tx_response(&self, response: &mut Response) {}

    /// Called just before a request is sent on a downstream fork, with the
    /// chance to rewrite it.
    async fn on_tx_client_request(&self, request: &mut Request, fork_index: usize) {}

    /// Called with the elected best response, right before it is forwarded
    /// upstream.
    async fn on_final_response(&self, response: &Response) {}
}

/// The base engine's own policy: no extension checks, single-target
/// forwarding, no-op hooks. Used when a deployment doesn't need to
/// specialize the core at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDelegate;

#[async_trait]
impl ProxyDelegate for DefaultDelegate {}
