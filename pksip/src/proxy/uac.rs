use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex as StdMutex, Weak};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::core::ProxyCore;
use super::key::generate_branch;
use super::uas::UasInner;
use crate::message::{Request, Response, SipMessage, StatusCode};
use crate::resolver::{ResolvedServer, Target};
use crate::transport::{TsxEvent, TsxHandle, TsxState, TsxStateChange};

/// One downstream fork attempt: the UAC side of a proxied request.
///
/// Cheaply cloneable handle around the shared state; the last clone to drop
/// frees the transaction, which is how "destruction safety" (invariant #7)
/// falls out of ordinary Rust ownership instead of a hand-rolled reference
/// count.
#[derive(Clone)]
pub struct UacTransaction(pub(super) Arc<UacInner>);

pub(super) struct UacInner {
    pub(super) index: usize,
    pub(super) uas: Weak<UasInner>,
    pub(super) core: Arc<ProxyCore>,
    pub(super) trail: u64,
    request_template: Mutex<Request>,
    tsx: Mutex<TsxHandle>,
    servers: Mutex<Vec<ResolvedServer>>,
    cursor: AtomicUsize,
    pre_selected: Option<ResolvedServer>,
    pub(super) pending_destroy: AtomicBool,
    dissociated: AtomicBool,
    last_state: StdMutex<TsxState>,
}

impl Drop for UacInner {
    /// Forces the underlying protocol-library transaction to terminate if
    /// this fork is freed while it's still outstanding (§4.3.5), e.g. a
    /// dissociated loser of a CANCEL fan-out whose library transaction
    /// hadn't yet reached a final state.
    fn drop(&mut self) {
        let last_state = *self.last_state.lock().unwrap();
        if matches!(last_state, TsxState::Terminated | TsxState::Destroyed) {
            return;
        }
        if let Ok(tsx) = self.tsx.try_lock() {
            self.core.transport.terminate(*tsx, StatusCode::RequestTerminated);
        }
    }
}

impl UacTransaction {
    /// Initializes a new fork: stores the outgoing request, resolves
    /// candidate servers unless a transport was pre-selected, and creates
    /// the underlying protocol-library transaction.
    pub(super) async fn init(
        index: usize,
        uas: Weak<UasInner>,
        core: Arc<ProxyCore>,
        trail: u64,
        request: Request,
        target: &Target,
    ) -> crate::error::Result<Self> {
        let servers = if target.pre_selected.is_none() {
            core.resolver.resolve_next_hop(&request.uri).await?
        } else {
            Vec::new()
        };

        let tsx = core.transport.create_uac_transaction(&request).await?;

        let inner = UacInner {
            index,
            uas,
            core,
            trail,
            request_template: Mutex::new(request),
            tsx: Mutex::new(tsx),
            servers: Mutex::new(servers),
            cursor: AtomicUsize::new(0),
            pre_selected: target.pre_selected,
            pending_destroy: AtomicBool::new(false),
            dissociated: AtomicBool::new(false),
            last_state: StdMutex::new(TsxState::Null),
        };

        Ok(UacTransaction(Arc::new(inner)))
    }

    /// Severs this fork's back-pointer to its UAS (§4.4). Idempotent.
    /// Called by the UAS, under its lock, before freeing the fork's slot in
    /// its fork table; after this, [`Self::on_tsx_state_change`] and
    /// [`Self::forward_response`] silently drop further events instead of
    /// re-entering the (no longer associated) UAS.
    pub(super) fn dissociate(&self) {
        self.0.dissociated.store(true, AtomicOrdering::SeqCst);
    }

    fn upgrade_uas(&self) -> Option<super::uas::UasTransaction> {
        if self.0.dissociated.load(AtomicOrdering::SeqCst) {
            return None;
        }
        self.0.uas.upgrade().map(super::uas::UasTransaction)
    }

    /// Selects a destination and dispatches the current request.
    ///
    /// On failure to select or send, synthesizes a `408 Request Timeout`
    /// upstream via the owning UAS.
    pub(super) async fn send(&self) -> crate::error::Result<()> {
        let inner = &self.0;
        let request = inner.request_template.lock().await.clone();
        let tsx = *inner.tsx.lock().await;

        let dest = match self.select_destination().await {
            Some(d) => d,
            None => {
                warn!(fork = inner.index, "uac has no destination");
                self.send_timeout_response().await;
                return Ok(());
            }
        };

        let msg = SipMessage::Request(request);
        if let Err(err) = inner.core.transport.send(tsx, msg, dest.socket_addr(), dest.transport).await {
            warn!(fork = inner.index, %err, "uac send failed");
            self.send_timeout_response().await;
        }
        Ok(())
    }

    async fn select_destination(&self) -> Option<ResolvedServer> {
        let inner = &self.0;
        if let Some(server) = inner.pre_selected {
            return Some(server);
        }
        let cursor = inner.cursor.load(AtomicOrdering::SeqCst);
        inner.servers.lock().await.get(cursor).copied()
    }

    /// Emits a CANCEL for this fork's outstanding request, unless it has
    /// already reached a final response.
    pub(super) async fn cancel_pending_tsx(&self, status: Option<StatusCode>) {
        let inner = &self.0;
        let request = inner.request_template.lock().await.clone();

        let mut cancel = request;
        cancel.method = crate::message::SipMethod::Cancel;
        if let Some(status) = status {
            cancel
                .headers
                .push_extra("Reason", format!("SIP ;cause={} ;text=\"{}\"", status.into_i32(), status.reason()));
        }

        let dest = self.select_destination().await;
        if let Some(dest) = dest {
            let _ = inner
                .core
                .transport
                .send_stateless(SipMessage::Request(cancel), dest.socket_addr(), dest.transport)
                .await;
        }
    }

    /// Routes a state-change notification from the protocol library.
    pub(super) async fn on_tsx_state_change(&self, change: TsxStateChange) {
        let inner = &self.0;
        *inner.last_state.lock().unwrap() = change.state;

        let Some(uas) = self.upgrade_uas() else {
            return;
        };

        match change.state {
            TsxState::Terminated if change.event == TsxEvent::TransportError => {
                self.blacklist_current().await;
                if !self.retry().await {
                    self.send_timeout_response().await;
                }
            }
            TsxState::Terminated if change.event == TsxEvent::Timer => {
                self.blacklist_current().await;
                if !self.retry().await {
                    self.send_timeout_response().await;
                }
            }
            TsxState::Completed if change.event == TsxEvent::RxMsg => {
                // Real completion status is carried on the response the
                // library handed to the transport layer; the transport layer
                // surfaces it back to us via `forward_response`, invoked
                // directly by the `TransportLayer` implementation rather
                // than reconstructed here.
            }
            TsxState::Destroyed => {
                inner.pending_destroy.store(true, AtomicOrdering::SeqCst);
            }
            _ => {}
        }

        let _ = uas;
    }

    /// Called by the transport layer with a response the library has
    /// matched to this fork's transaction.
    pub async fn forward_response(&self, response: Response) {
        let inner = &self.0;
        let code = response.status.into_i32();

        if (500..600).contains(&code) {
            if self.retry().await {
                return;
            }
        }

        if let Some(uas) = self.upgrade_uas() {
            uas.on_new_client_response(inner.index, response).await;
        }
    }

    async fn blacklist_current(&self) {
        let inner = &self.0;
        let cursor = inner.cursor.load(AtomicOrdering::SeqCst);
        if let Some(server) = inner.servers.lock().await.get(cursor).copied() {
            inner.core.resolver.blacklist(server);
        }
    }

    /// Advances the server cursor and retries against the next candidate.
    /// Returns `false` if no alternates remain.
    async fn retry(&self) -> bool {
        let inner = &self.0;
        if inner.pre_selected.is_some() {
            return false;
        }

        let next = inner.cursor.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        let have_next = next < inner.servers.lock().await.len();
        if !have_next {
            return false;
        }

        let mut request = inner.request_template.lock().await;
        if let Some(via) = request.headers.via.first_mut() {
            via.branch = generate_branch();
        }

        let new_tsx = match inner.core.transport.create_uac_transaction(&request).await {
            Ok(tsx) => tsx,
            Err(err) => {
                warn!(fork = inner.index, %err, "retry failed to create transaction");
                return false;
            }
        };

        let dest = match inner.servers.lock().await.get(next).copied() {
            Some(d) => d,
            None => return false,
        };

        let msg = SipMessage::Request(request.clone());
        drop(request);

        if let Err(err) = inner.core.transport.send(new_tsx, msg, dest.socket_addr(), dest.transport).await {
            warn!(fork = inner.index, %err, "retry send failed");
            return false;
        }

        *inner.tsx.lock().await = new_tsx;
        debug!(fork = inner.index, server = next, "retried to next server");
        true
    }

    async fn send_timeout_response(&self) {
        let inner = &self.0;
        if let Some(uas) = self.upgrade_uas() {
            let request = inner.request_template.lock().await.clone();
            let response = Response::new(StatusCode::RequestTimeout, request.headers.clone());
            uas.on_new_client_response(inner.index, response).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Weak;

    use super::*;
    use crate::proxy::mock::{test_request, MockResolver, MockTransport};

    async fn fork(transport: Arc<MockTransport>, resolver: Arc<MockResolver>) -> UacTransaction {
        let core = Arc::new(ProxyCore {
            transport,
            resolver,
            local: crate::message::HostPort::new(crate::message::Host::from("proxy.example.com")),
            home_domain: None,
            delay_trying: false,
            delegate: super::super::core::default_delegate(),
        });
        let request = test_request(crate::message::SipMethod::Invite, "sip:bob@foreign.example.com");
        let target = Target::with_uri(request.uri.clone());
        UacTransaction::init(0, Weak::new(), core, 1, request, &target).await.unwrap()
    }

    /// RFC 3326's `Reason: SIP ;cause=<n> ;text="<phrase>"` format, appended
    /// only when a non-zero cancellation status is given.
    #[tokio::test]
    async fn cancel_with_reason_follows_rfc_3326_format() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let uac = fork(transport.clone(), resolver).await;

        uac.cancel_pending_tsx(Some(StatusCode::RequestTimeout)).await;

        let calls = transport.calls();
        let cancel = calls
            .iter()
            .find_map(|c| match c {
                super::super::mock::Call::SendStateless(SipMessage::Request(r)) if r.method.is_cancel() => Some(r),
                _ => None,
            })
            .expect("a CANCEL should have been sent");
        assert_eq!(cancel.headers.get("Reason"), Some("SIP ;cause=408 ;text=\"Request Timeout\""));
    }

    #[tokio::test]
    async fn cancel_with_no_reason_omits_the_header() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let uac = fork(transport.clone(), resolver).await;

        uac.cancel_pending_tsx(None).await;

        let calls = transport.calls();
        let cancel = calls
            .iter()
            .find_map(|c| match c {
                super::super::mock::Call::SendStateless(SipMessage::Request(r)) if r.method.is_cancel() => Some(r),
                _ => None,
            })
            .expect("a CANCEL should have been sent");
        assert_eq!(cancel.headers.get("Reason"), None);
    }
}
