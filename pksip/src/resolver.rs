//! Next-hop target computation and resolution.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;

use crate::error::Result;
use crate::message::Uri;
use crate::transport::TransportType;

/// An intended next hop, produced by target computation and consumed exactly
/// once by forking.
#[derive(Debug, Clone)]
pub struct Target {
    /// Request-URI to substitute on the outgoing request, if any.
    pub uri_override: Option<Uri>,
    /// Route-set URIs to prepend as `Route` headers, nearest hop last.
    pub route_set: Vec<Uri>,
    /// A pre-selected transport/destination, bypassing the resolver.
    pub pre_selected: Option<ResolvedServer>,
}

impl Target {
    /// Creates a target that only overrides the request-URI.
    pub fn with_uri(uri: Uri) -> Self {
        Target {
            uri_override: Some(uri),
            route_set: Vec::new(),
            pre_selected: None,
        }
    }

    /// Appends a route-set entry, nearest hop last, matching Route header order.
    pub fn push_route(&mut self, uri: Uri) {
        self.route_set.push(uri);
    }
}

/// A concrete address/port/transport tuple produced by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedServer {
    /// The server's address.
    pub addr: IpAddr,
    /// The server's port.
    pub port: u16,
    /// The transport to reach it on.
    pub transport: TransportType,
}

impl ResolvedServer {
    /// The socket address for this server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

/// The DNS/SRV-style resolver a UAC transaction walks when no transport was
/// pre-selected on its [`Target`].
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Resolves a request-URI to an ordered list of candidate servers.
    async fn resolve_next_hop(&self, uri: &Uri) -> Result<Vec<ResolvedServer>>;

    /// Temporarily excludes a server from future resolutions, after a
    /// transport-level failure against it.
    fn blacklist(&self, server: ResolvedServer);
}
