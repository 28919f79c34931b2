use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::core::{ProxyCore, T1, T2};
use super::response::is_better;
use super::uac::UacTransaction;
use crate::message::{Request, Response, StatusCode};
use crate::resolver::Target;
use crate::transport::TsxHandle;

struct UasState {
    /// One slot per fork; `None` once a UAC has been dissociated.
    forks: Vec<Option<UacTransaction>>,
    pending_sends: usize,
    pending_responses: usize,
    best: Response,
    final_sent: bool,
}

/// The upstream ("user agent server") side of one proxied request: owns the
/// fork table and elects the best downstream response to forward.
///
/// [`UacTransaction`] holds a [`Weak`](std::sync::Weak) pointer back into
/// this type, so the group lock ([`tokio::sync::Mutex`] below) can be
/// entered either directly by the UAS or, through the weak upgrade, by any
/// of its forks — mirroring the single shared lock a hand-rolled C-style
/// forking proxy would pass around by pointer.
pub(super) struct UasInner {
    pub(super) core: Arc<ProxyCore>,
    pub(super) request: Request,
    pub(super) tsx: TsxHandle,
    pub(super) trail: u64,
    state: Mutex<UasState>,
    trying_timer: Mutex<Option<JoinHandle<()>>>,
    pending_destroy: AtomicBool,
    cancelled: AtomicBool,
    context_count: AtomicU64,
}

/// A cheaply cloneable handle to a UAS transaction.
#[derive(Clone)]
pub struct UasTransaction(pub(super) Arc<UasInner>);

impl UasTransaction {
    /// Initializes a UAS transaction for a freshly received, non-`ACK`
    /// request: creates the protocol-library server transaction, feeds it
    /// the triggering message, and either emits `100 Trying` immediately or
    /// arms the trying timer.
    pub(super) async fn init(core: Arc<ProxyCore>, request: Request, trail: u64) -> crate::error::Result<Self> {
        core.delegate.on_tsx_start(&request).await;

        let tsx = core.transport.create_uas_transaction(&request).await?;
        core.transport.feed(tsx, request.clone().into()).await?;

        let best = Response::new(StatusCode::RequestTimeout, request.headers.clone());

        let inner = Arc::new(UasInner {
            core: core.clone(),
            request: request.clone(),
            tsx,
            trail,
            state: Mutex::new(UasState {
                forks: Vec::new(),
                pending_sends: 0,
                pending_responses: 0,
                best,
                final_sent: false,
            }),
            trying_timer: Mutex::new(None),
            pending_destroy: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            context_count: AtomicU64::new(0),
        });

        let uas = UasTransaction(inner);

        if request.method.is_invite() {
            if core.delay_trying {
                uas.arm_trying_timer();
            } else {
                let _ = core.transport.respond_stateful(tsx, &request, StatusCode::Trying).await;
            }
        }

        Ok(uas)
    }

    fn arm_trying_timer(&self) {
        let weak = Arc::downgrade(&self.0);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(T2.saturating_sub(T1)).await;
            if let Some(inner) = weak.upgrade() {
                let uas = UasTransaction(inner);
                uas.fire_trying_timer().await;
            }
        });
        if let Ok(mut guard) = self.0.trying_timer.try_lock() {
            *guard = Some(handle);
        }
    }

    async fn fire_trying_timer(&self) {
        if self.0.pending_destroy.load(AtomicOrdering::SeqCst) {
            return;
        }
        let state = self.0.state.lock().await;
        if state.final_sent {
            return;
        }
        drop(state);
        let _ = self
            .0
            .core
            .transport
            .respond_stateful(self.0.tsx, &self.0.request, StatusCode::Trying)
            .await;
    }

    /// Enters the group-locked region that spans route preprocessing,
    /// target computation, and forking, so a CANCEL racing in from
    /// [`process_cancel_request`] can't observe a half-built fork table.
    ///
    /// Route preprocessing (§4.2.2) may itself produce a target (a
    /// loose-routed top `Route` pointing past this node); only when it
    /// doesn't does this fall through to [`ProxyDelegate::calculate_targets`](super::delegate::ProxyDelegate::calculate_targets),
    /// which a deployment overrides for registrar lookups, sequential/
    /// parallel fork plans, or presence-based routing.
    pub(super) async fn process_request(&self) {
        self.0.context_count.fetch_add(1, AtomicOrdering::SeqCst);

        let (request, mut targets) = self.preprocess_route().await;

        if targets.is_empty() {
            targets = self.0.core.delegate.calculate_targets(&request, &self.0.core).await;
        }

        if targets.is_empty() {
            self.send_final_response(StatusCode::NotFound).await;
            self.release_context().await;
            return;
        }

        {
            let mut state = self.0.state.lock().await;
            state.forks = (0..targets.len()).map(|_| None).collect();
            state.pending_sends = targets.len();
            state.pending_responses = targets.len();
        }

        for (index, target) in targets.iter().enumerate() {
            if self.0.cancelled.load(AtomicOrdering::SeqCst) {
                break;
            }

            let forked = request.clone_for_fork();
            let mut forked = apply_target(forked, target);
            self.0.core.delegate.on_tx_client_request(&mut forked, index).await;

            let uac = match UacTransaction::init(
                index,
                Arc::downgrade(&self.0),
                self.0.core.clone(),
                self.0.trail,
                forked,
                target,
            )
            .await
            {
                Ok(uac) => uac,
                Err(err) => {
                    warn!(fork = index, %err, "failed to allocate fork");
                    {
                        let mut state = self.0.state.lock().await;
                        state.pending_sends -= 1;
                    }
                    self.on_new_client_response(index, Response::new(StatusCode::ServerInternalError, request.headers.clone()))
                        .await;
                    continue;
                }
            };

            {
                let mut state = self.0.state.lock().await;
                state.forks[index] = Some(uac.clone());
                state.pending_sends -= 1;
            }

            if let Err(err) = uac.send().await {
                warn!(fork = index, %err, "failed to send fork");
            }
        }

        self.release_context().await;
    }

    /// RFC 3261 §16.4 route preprocessing: rewrite a strict route, then
    /// inspect the (possibly now different) top `Route` header. If it
    /// refers to this node or its home domain, pop it; otherwise synthesize
    /// a single Target that forwards the request to the next Route hop
    /// as-is, so forking skips [`ProxyDelegate::calculate_targets`](super::delegate::ProxyDelegate::calculate_targets)
    /// entirely.
    ///
    /// `maddr` source routing is not supported.
    async fn preprocess_route(&self) -> (Request, Vec<Target>) {
        let mut request = self.0.request.clone();
        let core = &self.0.core;

        if core.is_local_or_home(&request.uri) {
            if let Some(last) = request.headers.route.last() {
                if !last.lr_param {
                    let last = request.headers.pop_last_route().expect("checked Some above");
                    request.uri = last;
                }
            }
        }

        let mut targets = Vec::new();
        if let Some(top) = request.headers.route.first().cloned() {
            if core.is_local_or_home(&top) {
                request.headers.pop_route();
            } else {
                targets.push(Target::with_uri(request.uri.clone()));
            }
        }

        (request, targets)
    }

    /// Applies §4.2.6 best-response election to a fork's response and, once
    /// every fork has reported a final response (or all that remain have
    /// been cancelled), forwards the elected best response upstream.
    pub(super) async fn on_new_client_response(&self, index: usize, response: Response) {
        let is_final = response.status.is_final();

        let mut state = self.0.state.lock().await;
        if state.final_sent {
            return;
        }

        if (200..300).contains(&response.status.into_i32()) {
            state.final_sent = true;
            let best = response.clone();
            drop(state);
            self.dissociate(index).await;
            self.forward_upstream(best).await;
            // Internal-origin cancellation: dissociate the remaining forks
            // immediately so their eventual final responses are swallowed
            // rather than re-entering the aggregator.
            self.cancel_other_forks(index, None, true).await;
            self.release_context().await;
            return;
        }

        if !is_final {
            drop(state);
            let _ = self.0.core.transport.respond_stateful(self.0.tsx, &self.0.request, response.status).await;
            return;
        }

        if is_better(response.status, state.best.status) {
            state.best = response;
        }
        state.pending_responses = state.pending_responses.saturating_sub(1);
        let all_done = state.pending_responses == 0 && state.pending_sends == 0;
        drop(state);

        self.dissociate(index).await;

        if all_done {
            let mut state = self.0.state.lock().await;
            state.final_sent = true;
            let best = state.best.clone();
            drop(state);
            self.forward_upstream(best).await;
            self.release_context().await;
        }
    }

    async fn forward_upstream(&self, mut response: Response) {
        self.cancel_trying_timer().await;
        self.0.core.delegate.on_tx_response(&mut response).await;
        self.0.core.delegate.on_final_response(&response).await;
        let _ = self.0.core.transport.respond_stateful(self.0.tsx, &self.0.request, response.status).await;
        if response.status.into_i32() == 200 && self.0.request.method.is_invite() {
            // Terminate the UAS transaction manually to suppress the
            // library's ACK wait; this also cancels remaining pending UACs
            // via the library's own transaction-destruction notification.
            self.0.core.transport.terminate(self.0.tsx, StatusCode::Ok);
        }
        info!(call_id = %self.0.request.headers.call_id, status = response.status.into_i32(), "forwarded best response upstream");
        self.0.core.delegate.on_tsx_complete().await;
    }

    async fn send_final_response(&self, status: StatusCode) {
        let mut state = self.0.state.lock().await;
        if state.final_sent {
            return;
        }
        state.final_sent = true;
        drop(state);
        self.cancel_trying_timer().await;
        let _ = self.0.core.transport.respond_stateful(self.0.tsx, &self.0.request, status).await;
        self.0.core.delegate.on_tsx_complete().await;
    }

    async fn cancel_trying_timer(&self) {
        if let Some(handle) = self.0.trying_timer.lock().await.take() {
            handle.abort();
        }
    }

    /// Handles a `CANCEL` whose branch matches this UAS's `INVITE`
    /// (§4.2.5). The `200 OK` to the `CANCEL` itself is sent by the caller
    /// on its own transaction, statefully but independent of this one;
    /// this only fans the CANCEL out to pending forks, leaving them
    /// associated so their eventual `487` flows through to the upstream
    /// client.
    pub(super) async fn process_cancel_request(&self) {
        self.0.cancelled.store(true, AtomicOrdering::SeqCst);
        self.cancel_other_forks(usize::MAX, Some(StatusCode::RequestTerminated), false).await;
    }

    async fn cancel_other_forks(&self, except: usize, reason: Option<StatusCode>, dissociate: bool) {
        let forks: Vec<(usize, UacTransaction)> = {
            let state = self.0.state.lock().await;
            state
                .forks
                .iter()
                .enumerate()
                .filter(|(i, f)| *i != except && f.is_some())
                .filter_map(|(i, f)| f.clone().map(|f| (i, f)))
                .collect()
        };
        for (index, fork) in forks {
            fork.cancel_pending_tsx(reason).await;
            if dissociate {
                fork.dissociate();
                self.dissociate(index).await;
            }
        }
    }

    /// Severs this UAS's side of the link to fork `index`: the slot is
    /// nulled so later iteration (e.g. a second CANCEL fan-out) skips it.
    /// Must be paired with [`UacTransaction::dissociate`] on the fork's
    /// side before either is destroyed (§4.4).
    async fn dissociate(&self, index: usize) {
        let mut state = self.0.state.lock().await;
        if let Some(slot) = state.forks.get_mut(index) {
            if let Some(fork) = slot.take() {
                fork.dissociate();
            }
        }
    }

    async fn release_context(&self) {
        let remaining = self.0.context_count.fetch_sub(1, AtomicOrdering::SeqCst) - 1;
        if remaining == 0 && self.0.pending_destroy.load(AtomicOrdering::SeqCst) {
            debug!(call_id = %self.0.request.headers.call_id, "uas destroyed");
        }
    }

    /// Marks this transaction for destruction once its last in-flight
    /// context (an in-progress `process_request`/`on_new_client_response`
    /// call) exits. Safe to call any number of times.
    pub(super) fn mark_pending_destroy(&self) {
        self.0.pending_destroy.store(true, AtomicOrdering::SeqCst);
    }

    /// The handle of this transaction's own server transaction, for a
    /// [`super::Proxy`] to key its handle-to-branch lookup on.
    pub(super) fn tsx_handle(&self) -> TsxHandle {
        self.0.tsx
    }
}

fn apply_target(mut request: Request, target: &Target) -> Request {
    if let Some(uri) = &target.uri_override {
        request.uri = uri.clone();
    }
    for route in target.route_set.iter().rev() {
        request.headers.route.insert(0, route.clone());
    }
    request
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::message::{Host, HostPort, SipMethod, Uri};
    use crate::proxy::mock::{test_request, Call, FixedTargetsDelegate, MockResolver, MockTransport};

    fn local() -> HostPort {
        HostPort::new(Host::from("proxy.example.com"))
    }

    fn core_with_delegate(delegate: Arc<dyn super::super::delegate::ProxyDelegate>, transport: Arc<MockTransport>, resolver: Arc<MockResolver>) -> Arc<ProxyCore> {
        Arc::new(ProxyCore {
            transport,
            resolver,
            local: local(),
            home_domain: None,
            delay_trying: false,
            delegate,
        })
    }

    /// S1: a single foreign-domain fork, with `100 Trying` emitted up front.
    #[tokio::test]
    async fn simple_forward_forks_once_and_sends_trying() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let core = core_with_delegate(super::core::default_delegate(), transport.clone(), resolver);

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        uas.process_request().await;

        assert_eq!(transport.uac_created(), 1);
        assert_matches!(transport.stateful_responses().as_slice(), [StatusCode::Trying]);
    }

    /// S2: one fork answers `486`, the other `200` — the `200` wins, the
    /// loser is dissociated, and the UAS's own transaction is terminated.
    #[tokio::test]
    async fn two_hundred_short_circuits_remaining_forks() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let targets = vec![
            crate::proxy::mock::target("sip:a@one.example.com"),
            crate::proxy::mock::target("sip:b@two.example.com"),
        ];
        let delegate = Arc::new(FixedTargetsDelegate(targets));
        let core = core_with_delegate(delegate, transport.clone(), resolver);

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        uas.process_request().await;
        assert_eq!(transport.uac_created(), 2);

        let headers = uas.0.request.headers.clone();
        uas.on_new_client_response(0, Response::new(StatusCode::BusyHere, headers.clone())).await;
        uas.on_new_client_response(1, Response::new(StatusCode::Ok, headers)).await;

        assert_eq!(transport.stateful_responses().last(), Some(&StatusCode::Ok));
        assert!(transport.calls().iter().any(|c| matches!(c, Call::Terminate(StatusCode::Ok))));

        let state = uas.0.state.lock().await;
        assert!(state.forks.iter().all(|f| f.is_none()));
        assert!(state.final_sent);
    }

    /// S3: three non-2xx responses; `486` outranks `404` and `408`.
    #[tokio::test]
    async fn all_fail_election_picks_busy_here() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let targets = vec![
            crate::proxy::mock::target("sip:a@one.example.com"),
            crate::proxy::mock::target("sip:b@two.example.com"),
            crate::proxy::mock::target("sip:c@three.example.com"),
        ];
        let delegate = Arc::new(FixedTargetsDelegate(targets));
        let core = core_with_delegate(delegate, transport.clone(), resolver);

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        uas.process_request().await;

        let headers = uas.0.request.headers.clone();
        uas.on_new_client_response(0, Response::new(StatusCode::NotFound, headers.clone())).await;
        uas.on_new_client_response(1, Response::new(StatusCode::BusyHere, headers.clone())).await;
        uas.on_new_client_response(2, Response::new(StatusCode::RequestTimeout, headers)).await;

        assert_eq!(transport.stateful_responses().last(), Some(&StatusCode::BusyHere));
    }

    /// S4: CANCEL fans out to every pending fork; once both answer `487`,
    /// that is what reaches the upstream client.
    #[tokio::test]
    async fn cancel_cascades_to_pending_forks() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let targets = vec![
            crate::proxy::mock::target("sip:a@one.example.com"),
            crate::proxy::mock::target("sip:b@two.example.com"),
        ];
        let delegate = Arc::new(FixedTargetsDelegate(targets));
        let core = core_with_delegate(delegate, transport.clone(), resolver);

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        uas.process_request().await;

        uas.process_cancel_request().await;
        assert_eq!(transport.sent_cancels(), 2);

        let headers = uas.0.request.headers.clone();
        uas.on_new_client_response(0, Response::new(StatusCode::RequestTerminated, headers.clone())).await;
        uas.on_new_client_response(1, Response::new(StatusCode::RequestTerminated, headers)).await;

        assert_eq!(transport.stateful_responses().last(), Some(&StatusCode::RequestTerminated));
    }

    /// S7: a strict-routed request-URI is rewritten from the last Route
    /// header, which is then popped; a loose-routed top Route referring to
    /// this node is popped without synthesizing a Target.
    #[tokio::test]
    async fn strict_route_rewrite_then_pops_loose_top_route() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let core = core_with_delegate(super::core::default_delegate(), transport, resolver);

        let mut request = test_request(SipMethod::Invite, "sip:proxy.example.com");
        let route_a: Uri = "sip:proxy.example.com;lr".parse().unwrap();
        let route_b: Uri = "sip:b.example.com".parse().unwrap();
        request.headers.route = vec![route_a.clone(), route_b.clone()];

        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        let (rewritten, targets) = uas.preprocess_route().await;

        assert_eq!(rewritten.uri, route_b);
        assert!(targets.is_empty());
        assert!(rewritten.headers.route.is_empty());
    }

    /// S5: a single Target resolves to two servers; a `TRANSPORT_ERROR`
    /// against the first blacklists it and retries against the second,
    /// with a fresh branch id and a brand-new protocol-library transaction.
    #[tokio::test]
    async fn transport_error_blacklists_and_retries_next_server() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(2));
        let core = core_with_delegate(super::core::default_delegate(), transport.clone(), resolver.clone());

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        uas.process_request().await;
        assert_eq!(transport.uac_created(), 1);

        let fork = {
            let state = uas.0.state.lock().await;
            state.forks[0].clone().expect("fork still associated")
        };

        fork.on_tsx_state_change(crate::transport::TsxStateChange {
            handle: crate::transport::TsxHandle(0),
            event: crate::transport::TsxEvent::TransportError,
            state: crate::transport::TsxState::Terminated,
        })
        .await;

        assert_eq!(resolver.blacklisted().len(), 1, "first server should be blacklisted");
        assert_eq!(transport.uac_created(), 2, "retry should create a fresh protocol-library transaction");

        // No fork has reported a final response to the UAS yet: the retry
        // succeeded, so no 408 should have been synthesized upstream.
        assert!(transport.stateful_responses().iter().all(|s| *s != StatusCode::RequestTimeout));
    }

    /// S6: with `delay_trying` on, the trying timer fires `100 Trying`
    /// after `T2 - T1` if no final response has gone out yet.
    #[tokio::test(start_paused = true)]
    async fn trying_timer_fires_when_delayed() {
        let transport = Arc::new(MockTransport::new());
        let resolver = Arc::new(MockResolver::new(1));
        let core = Arc::new(ProxyCore {
            transport: transport.clone(),
            resolver,
            local: local(),
            home_domain: None,
            delay_trying: true,
            delegate: super::core::default_delegate(),
        });

        let request = test_request(SipMethod::Invite, "sip:bob@foreign.example.com");
        let uas = UasTransaction::init(core, request, 1).await.unwrap();
        assert!(transport.stateful_responses().is_empty());

        tokio::time::advance(T2.saturating_sub(T1) + std::time::Duration::from_millis(50)).await;
        tokio::task::yield_now().await;

        assert_matches!(transport.stateful_responses().as_slice(), [StatusCode::Trying]);
        drop(uas);
    }
}
