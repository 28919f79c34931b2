use std::sync::Arc;
use std::time::Duration;

use super::delegate::{DefaultDelegate, ProxyDelegate};
use crate::message::{HostPort, Uri};
use crate::resolver::Resolver;
use crate::transport::TransportLayer;

/// SIP Timer T1: estimated round-trip time.
pub const T1: Duration = Duration::from_millis(500);
/// SIP Timer T2: the maximum retransmission interval for non-INVITE
/// requests and INVITE responses.
pub const T2: Duration = Duration::from_millis(4000);
/// SIP Timer T4: the maximum duration a message can remain in the network.
pub const T4: Duration = Duration::from_millis(5000);

/// Shared, read-only context handed to every UAS and UAC transaction: the
/// transport/transaction library implementation, the resolver, this node's
/// identity for route-preprocessing comparisons, and the delegate a
/// deployment specializes the engine with.
pub struct ProxyCore {
    /// The protocol/transaction library implementation in use.
    pub transport: Arc<dyn TransportLayer>,
    /// The next-hop resolver in use.
    pub resolver: Arc<dyn Resolver>,
    /// This node's own host/port, for "does this URI refer to me" checks
    /// (`PJUtils::is_uri_local` in the source this engine is modeled on).
    pub local: HostPort,
    /// The SIP domain(s) this deployment is responsible for, distinct from
    /// `local` (`PJUtils::is_home_domain`). `None` if the deployment has no
    /// separate home-domain concept beyond its own address.
    pub home_domain: Option<HostPort>,
    /// If `true`, suppress the immediate `100 Trying` on INVITE and rely on
    /// the trying timer instead.
    pub delay_trying: bool,
    /// The extension seam a role-specific proxy hooks into (§6).
    pub delegate: Arc<dyn ProxyDelegate>,
}

impl ProxyCore {
    /// Returns `true` if `uri` refers to this node itself or to this
    /// deployment's home domain.
    pub fn is_local_or_home(&self, uri: &Uri) -> bool {
        uri.refers_to(&self.local) || self.home_domain.as_ref().is_some_and(|home| uri.refers_to(home))
    }
}

/// A default, unspecialized delegate for deployments that don't need to
/// override any of the engine's extension points.
pub fn default_delegate() -> Arc<dyn ProxyDelegate> {
    Arc::new(DefaultDelegate)
}
