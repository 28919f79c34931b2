//! The stateful forking-proxy engine: a [`Proxy`] owns a table of in-flight
//! [`UasTransaction`]s keyed by the inbound request's branch, forking each
//! one into per-destination [`UacTransaction`]s and electing the best
//! downstream response to relay upstream.

pub mod core;
pub mod delegate;
pub mod key;
#[cfg(test)]
mod mock;
pub mod response;
pub mod uac;
pub mod uas;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

pub use core::ProxyCore;
pub use delegate::{DefaultDelegate, ProxyDelegate};
pub use key::TransactionKey;
pub use uac::UacTransaction;
pub use uas::UasTransaction;

use crate::error::Result;
use crate::message::{HostPort, Request, SipMessage, StatusCode};
use crate::resolver::Resolver;
use crate::service::SipService;
use crate::transport::{IncomingRequest, IncomingResponse, TransportLayer, TransportType, TsxStateChange};

/// The entry point a deployment wires its [`TransportLayer`] and
/// [`Resolver`] implementations into.
///
/// Mirrors the bind/unbind pattern a C-style transaction library exposes:
/// the protocol library hands the proxy a [`TsxHandle`](crate::transport::TsxHandle)
/// at creation time, and the proxy keeps its own table from branch to
/// [`UasTransaction`] so later state-change notifications and `CANCEL`s can
/// find the transaction they belong to.
pub struct Proxy {
    core: Arc<ProxyCore>,
    transactions: Mutex<HashMap<TransactionKey, UasTransaction>>,
    by_handle: Mutex<HashMap<crate::transport::TsxHandle, TransactionKey>>,
    services: Vec<Arc<dyn SipService>>,
}

impl Proxy {
    /// Creates a proxy over the given transport/transaction library and
    /// resolver, identifying itself with `local` for route-preprocessing
    /// "does this refer to me" checks, and with the base engine's
    /// unspecialized delegate (see [`Self::with_delegate`] to override it).
    pub fn new(transport: Arc<dyn TransportLayer>, resolver: Arc<dyn Resolver>, local: HostPort, delay_trying: bool) -> Self {
        Self::with_delegate(transport, resolver, local, None, delay_trying, core::default_delegate())
    }

    /// Creates a proxy specialized with `delegate` (§6) and, optionally, a
    /// home domain distinct from `local` for route-preprocessing checks.
    pub fn with_delegate(
        transport: Arc<dyn TransportLayer>,
        resolver: Arc<dyn Resolver>,
        local: HostPort,
        home_domain: Option<HostPort>,
        delay_trying: bool,
        delegate: Arc<dyn ProxyDelegate>,
    ) -> Self {
        Proxy {
            core: Arc::new(ProxyCore {
                transport,
                resolver,
                local,
                home_domain,
                delay_trying,
                delegate,
            }),
            transactions: Mutex::new(HashMap::new()),
            by_handle: Mutex::new(HashMap::new()),
            services: Vec::new(),
        }
    }

    /// Registers a [`SipService`], consulted in order on every inbound
    /// request and out-of-transaction response before proxy processing.
    pub fn add_service(&mut self, service: Arc<dyn SipService>) {
        self.services.push(service);
    }

    /// The first entry point (§4.1): handles a freshly received request.
    pub async fn on_rx_request(&self, mut incoming: IncomingRequest) -> Result<()> {
        for service in &self.services {
            if service.on_incoming_request(&mut incoming).await? {
                return Ok(());
            }
        }

        let request = incoming.request;

        if request.method.is_cancel() {
            self.on_rx_cancel(&request).await;
            return Ok(());
        }

        let rejection = match self.core.delegate.verify_request(&request).await {
            Some(status) => Some(status),
            None => self.verify_request(&request, incoming.transport),
        };
        if let Some(status) = rejection {
            if !request.method.is_ack() {
                let _ = self.core.transport.respond_stateless(&request, status).await;
            }
            return Ok(());
        }

        let key = match TransactionKey::for_request(&request) {
            Some(key) => key,
            None => {
                warn!("request has no top Via, dropping");
                return Ok(());
            }
        };

        if request.method.is_ack() {
            // ACKs to non-2xx final responses are absorbed by the
            // protocol-library server transaction itself; ACKs to 2xx are
            // forwarded statelessly since the UAS transaction is long gone
            // by the time they arrive.
            let target = request.uri.clone();
            if let Ok(servers) = self.core.resolver.resolve_next_hop(&target).await {
                if let Some(server) = servers.first() {
                    let _ = self
                        .core
                        .transport
                        .send_stateless(SipMessage::Request(request), server.socket_addr(), server.transport)
                        .await;
                }
            }
            return Ok(());
        }

        let trail = generate_trail();
        let uas = UasTransaction::init(self.core.clone(), request, trail).await?;
        self.by_handle.lock().await.insert(uas.tsx_handle(), key.clone());
        self.transactions.lock().await.insert(key, uas.clone());
        uas.process_request().await;
        Ok(())
    }

    /// Handles an inbound `CANCEL` (§4.2.5): if it matches an in-flight
    /// `INVITE` transaction, the `CANCEL` gets a server transaction of its
    /// own (distinct from the matched `INVITE`'s) so its `200 OK` can be
    /// sent statefully without touching the `INVITE` transaction's own
    /// state machine; the matched UAS then fans the cancellation out to
    /// its pending forks.
    async fn on_rx_cancel(&self, cancel: &Request) {
        let Some(key) = TransactionKey::for_request(cancel) else {
            return;
        };
        let uas = self.transactions.lock().await.get(&key).cloned();
        let Some(uas) = uas else {
            let _ = self.core.transport.respond_stateless(cancel, StatusCode::CallOrTransactionDoesNotExist).await;
            return;
        };

        match self.core.transport.create_uas_transaction(cancel).await {
            Ok(tsx) => {
                let _ = self.core.transport.feed(tsx, cancel.clone().into()).await;
                let _ = self.core.transport.respond_stateful(tsx, cancel, StatusCode::Ok).await;
            }
            Err(err) => warn!(%err, "failed to create transaction for CANCEL"),
        }

        uas.process_cancel_request().await;
    }

    /// The second entry point (§4.1): a response the protocol library
    /// couldn't match to any transaction it's tracking — most commonly a
    /// late-arriving retransmission of a 2xx after the UAC transaction
    /// already terminated. Forwarded upstream statelessly, unmodified
    /// except for popping this node's own top `Via`.
    pub async fn on_rx_response(&self, mut incoming: IncomingResponse) -> Result<()> {
        for service in &self.services {
            if service.on_incoming_response(&mut incoming).await? {
                return Ok(());
            }
        }

        let mut response = incoming.response;
        if response.headers.via.is_empty() {
            warn!("stray response has no Via, dropping");
            return Ok(());
        }
        response.headers.via.remove(0);
        let Some(via) = response.headers.via.first() else {
            return Ok(());
        };
        let dest = crate::resolver::ResolvedServer {
            addr: match via.sent_by.host {
                crate::message::Host::IpAddr(ip) => ip,
                crate::message::Host::Domain(_) => return Ok(()),
            },
            port: via.sent_by.port.unwrap_or(via.transport.default_port()),
            transport: via.transport,
        };
        self.core
            .transport
            .send_stateless(SipMessage::Response(response), dest.socket_addr(), dest.transport)
            .await
    }

    /// Dispatches a protocol-library state-change notification to whichever
    /// UAC transaction it belongs to.
    pub async fn on_uac_tsx_state(&self, fork: &UacTransaction, change: TsxStateChange) {
        fork.on_tsx_state_change(change).await;
    }

    /// Dispatches a protocol-library state-change notification for a UAS's
    /// own server transaction. A [`TransportLayer`] implementation calls
    /// this with the handle it was given by [`TransportLayer::create_uas_transaction`];
    /// on [`crate::transport::TsxState::Destroyed`] the matching entry is
    /// reaped from the branch table, which is what bounds its size (§5).
    pub async fn on_uas_tsx_state(&self, change: TsxStateChange) {
        if !matches!(change.state, crate::transport::TsxState::Destroyed) {
            return;
        }
        let key = self.by_handle.lock().await.remove(&change.handle);
        if let Some(key) = key {
            let uas = self.transactions.lock().await.remove(&key);
            if let Some(uas) = uas {
                uas.mark_pending_destroy();
            }
        }
    }

    /// RFC 3261 §16.3/§4.1.1 request validation, run before any UAS
    /// transaction is allocated. Returns the rejection status, if any.
    fn verify_request(&self, request: &Request, transport: TransportType) -> Option<StatusCode> {
        if matches!(request.uri.scheme, crate::message::Scheme::Tel) {
            return None;
        }
        if request.headers.max_forwards.is_some_and(|mf| mf <= 1) {
            return Some(StatusCode::TooManyHops);
        }
        if !request.method.is_ack() && self.core.transport.is_shutdown(transport) {
            return Some(StatusCode::ServiceUnavailable);
        }
        None
    }

    /// Removes a completed transaction from the lookup table. Called once
    /// the UAS has forwarded its best response and no further CANCELs or
    /// retransmissions are expected for it.
    pub async fn forget(&self, key: &TransactionKey) {
        self.transactions.lock().await.remove(key);
    }

    /// Gives access to the shared transport/resolver/delegate context, e.g.
    /// for a [`SipService`] that needs to reach the resolver directly.
    pub fn core(&self) -> &Arc<ProxyCore> {
        &self.core
    }
}

fn generate_trail() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_generator_is_monotonic() {
        let a = generate_trail();
        let b = generate_trail();
        assert!(b > a);
    }
}
