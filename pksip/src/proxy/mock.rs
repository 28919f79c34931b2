//! A recording [`TransportLayer`]/[`Resolver`] pair for exercising the
//! UAS/UAC machinery without a real SIP stack underneath. Shared by the
//! `#[cfg(test)]` modules in sibling files; not part of the public API.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::message::{Request, SipMessage, StatusCode, Uri};
use crate::resolver::{ResolvedServer, Resolver, Target};
use crate::transport::{TransportLayer, TransportType, TsxHandle};

/// One recorded call into [`MockTransport`].
#[derive(Debug, Clone)]
pub(super) enum Call {
    Send(SipMessage),
    SendStateless(SipMessage),
    RespondStateless(StatusCode),
    RespondStateful(StatusCode),
    Terminate(StatusCode),
}

#[derive(Default)]
pub(super) struct MockTransport {
    next_handle: AtomicU64,
    calls: Mutex<Vec<Call>>,
    uac_created: AtomicU64,
}

impl MockTransport {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(super) fn uac_created(&self) -> u64 {
        self.uac_created.load(Ordering::SeqCst)
    }

    pub(super) fn sent_cancels(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::SendStateless(SipMessage::Request(r)) if r.method.is_cancel()))
            .count()
    }

    pub(super) fn stateful_responses(&self) -> Vec<StatusCode> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::RespondStateful(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl TransportLayer for MockTransport {
    async fn create_uas_transaction(&self, _rx: &Request) -> Result<TsxHandle> {
        Ok(TsxHandle(self.next_handle.fetch_add(1, Ordering::SeqCst)))
    }

    async fn create_uac_transaction(&self, _tx: &Request) -> Result<TsxHandle> {
        self.uac_created.fetch_add(1, Ordering::SeqCst);
        Ok(TsxHandle(self.next_handle.fetch_add(1, Ordering::SeqCst)))
    }

    async fn feed(&self, _handle: TsxHandle, _msg: SipMessage) -> Result<()> {
        Ok(())
    }

    async fn send(&self, _handle: TsxHandle, msg: SipMessage, _dest: std::net::SocketAddr, _transport: TransportType) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Send(msg));
        Ok(())
    }

    fn terminate(&self, _handle: TsxHandle, status: StatusCode) {
        self.calls.lock().unwrap().push(Call::Terminate(status));
    }

    async fn send_stateless(&self, msg: SipMessage, _dest: std::net::SocketAddr, _transport: TransportType) -> Result<()> {
        self.calls.lock().unwrap().push(Call::SendStateless(msg));
        Ok(())
    }

    async fn respond_stateless(&self, _rx: &Request, status: StatusCode) -> Result<()> {
        self.calls.lock().unwrap().push(Call::RespondStateless(status));
        Ok(())
    }

    async fn respond_stateful(&self, _handle: TsxHandle, _rx: &Request, status: StatusCode) -> Result<()> {
        self.calls.lock().unwrap().push(Call::RespondStateful(status));
        Ok(())
    }
}

/// A resolver returning a fixed, ordered server list for every query.
pub(super) struct MockResolver {
    servers: Vec<ResolvedServer>,
    blacklisted: Mutex<Vec<ResolvedServer>>,
}

impl MockResolver {
    pub(super) fn new(count: usize) -> Self {
        let servers = (0..count)
            .map(|i| ResolvedServer {
                addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, (i + 1) as u8)),
                port: 5060,
                transport: TransportType::Udp,
            })
            .collect();
        MockResolver {
            servers,
            blacklisted: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn blacklisted(&self) -> Vec<ResolvedServer> {
        self.blacklisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolver for MockResolver {
    async fn resolve_next_hop(&self, _uri: &Uri) -> Result<Vec<ResolvedServer>> {
        Ok(self.servers.clone())
    }

    fn blacklist(&self, server: ResolvedServer) {
        self.blacklisted.lock().unwrap().push(server);
    }
}

/// Builds a bare request for tests: one `Via`, a foreign-domain request-URI,
/// minimal mandatory headers.
pub(super) fn test_request(method: crate::message::SipMethod, uri: &str) -> Request {
    use crate::message::{CSeq, Headers, HostPort, NameAddr};

    let uri: Uri = uri.parse().expect("valid test URI");
    let headers = Headers {
        via: vec![crate::message::Via::new(TransportType::Udp, HostPort::new("caller.example.com".into()), "z9hG4bK-test")],
        max_forwards: Some(70),
        route: Vec::new(),
        record_route: Vec::new(),
        from: NameAddr::new("sip:alice@example.com".parse().unwrap()),
        to: NameAddr::new("sip:bob@example.com".parse().unwrap()),
        call_id: "test-call-id".to_owned(),
        cseq: CSeq { seq: 1, method },
        contact: Vec::new(),
        extra: Vec::new(),
    };
    Request::new(method, uri, headers)
}

pub(super) fn target(uri: &str) -> Target {
    Target::with_uri(uri.parse().expect("valid test URI"))
}

/// A delegate whose `calculate_targets` ignores the request and always
/// returns a fixed, pre-built list — for tests that want to fork to a known
/// number of destinations without relying on the default foreign-domain rule.
pub(super) struct FixedTargetsDelegate(pub(super) Vec<Target>);

#[async_trait]
impl super::delegate::ProxyDelegate for FixedTargetsDelegate {
    async fn calculate_targets(&self, _request: &Request, _core: &super::core::ProxyCore) -> Vec<Target> {
        self.0.clone()
    }
}
