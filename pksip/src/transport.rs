//! The abstract interface the proxy core consumes from its transport and
//! transaction library.
//!
//! A real deployment backs this with a SIP stack that owns parsing,
//! transport sockets, and the RFC 3261 transaction/retransmission timers
//! (Timer A through K). None of that lives in this crate: [`TransportLayer`]
//! is the seam, implemented once per deployment and handed to
//! [`crate::proxy::Proxy`].

use std::fmt;
use std::net::SocketAddr;

use async_trait::async_trait;

use crate::error::Result;
use crate::message::{Request, Response, SipMessage, StatusCode};

const TP_UDP: &str = "UDP";
const TP_TCP: &str = "TCP";
const TP_TLS: &str = "TLS";
const TP_SCTP: &str = "SCTP";
const TP_WS: &str = "WS";
const TP_UNKNOWN: &str = "TP_UNKNOWN";

/// A SIP transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportType {
    /// `UDP` transport.
    #[default]
    Udp,
    /// `TCP` transport.
    Tcp,
    /// `WebSocket` transport.
    Ws,
    /// `TLS` transport.
    Tls,
    /// `SCTP` transport.
    Sctp,
    /// Unrecognized transport.
    Unknown,
}

impl TransportType {
    /// Returns the default port number associated with the transport protocol.
    #[inline]
    pub const fn default_port(&self) -> u16 {
        match self {
            TransportType::Udp | TransportType::Tcp | TransportType::Sctp => 5060,
            TransportType::Tls => 5061,
            TransportType::Ws => 80,
            TransportType::Unknown => 0,
        }
    }

    /// Returns the transport string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Udp => TP_UDP,
            TransportType::Tcp => TP_TCP,
            TransportType::Ws => TP_WS,
            TransportType::Tls => TP_TLS,
            TransportType::Sctp => TP_SCTP,
            TransportType::Unknown => TP_UNKNOWN,
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TransportType {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "UDP" => TransportType::Udp,
            "TCP" => TransportType::Tcp,
            "WS" => TransportType::Ws,
            "TLS" => TransportType::Tls,
            "SCTP" => TransportType::Sctp,
            _ => TransportType::Unknown,
        }
    }
}

/// An opaque handle to a protocol-library transaction, shared between the
/// core and the transport layer via [`TransportLayer::bind`]/`unbind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TsxHandle(pub u64);

/// A reason a protocol-library transaction reports a state change for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsxEvent {
    /// An inbound message arrived for this transaction.
    RxMsg,
    /// A protocol timer (retransmission or timeout) fired.
    Timer,
    /// The transport reported a send failure for this transaction.
    TransportError,
}

/// The lifecycle states a protocol-library transaction passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsxState {
    /// Created but not yet fed a message.
    Null,
    /// Waiting for a final response (or, for a server transaction, still
    /// processing the initial request).
    Trying,
    /// A final response has been sent/received but retransmission timers
    /// (ACK absorption, etc.) are still active.
    Completed,
    /// The transaction has run its course.
    Terminated,
    /// The transaction object is about to be reclaimed by the library.
    Destroyed,
}

/// A state-change notification the library delivers to whichever of
/// UAS/UAC the core has [`TransportLayer::bind`]-ed to a transaction.
#[derive(Debug, Clone, Copy)]
pub struct TsxStateChange {
    /// Which transaction changed.
    pub handle: TsxHandle,
    /// Why it changed.
    pub event: TsxEvent,
    /// The state it's now in.
    pub state: TsxState,
}

/// The abstract protocol/transport library interface the proxy core is
/// written against (§6 of the design). Implementations own message framing,
/// retransmission timers, and the network sockets; the core only calls
/// these entry points and receives [`TsxStateChange`] notifications.
#[async_trait]
pub trait TransportLayer: Send + Sync + 'static {
    /// Creates a server transaction for an inbound request, sharing `lock`
    /// with every UAC transaction this UAS later spawns.
    async fn create_uas_transaction(&self, rx: &Request) -> Result<TsxHandle>;

    /// Creates a client transaction for an outbound request.
    async fn create_uac_transaction(&self, tx: &Request) -> Result<TsxHandle>;

    /// Drives a freshly created transaction with its triggering message.
    async fn feed(&self, handle: TsxHandle, msg: SipMessage) -> Result<()>;

    /// Dispatches an outbound message on an existing transaction, to the
    /// given destination.
    async fn send(&self, handle: TsxHandle, msg: SipMessage, dest: SocketAddr, transport: TransportType) -> Result<()>;

    /// Force-terminates a transaction, e.g. to suppress the library's normal
    /// ACK wait after a proxy-internal final response.
    fn terminate(&self, handle: TsxHandle, status: StatusCode);

    /// Reports whether `transport` has been flagged for shutdown (e.g. a
    /// listener being drained before a graceful restart). `verify_request`
    /// rejects new non-ACK requests arriving on a shut-down transport with
    /// `503 Service Unavailable`. Defaults to `false` for implementations
    /// that never shut a transport down mid-process.
    fn is_shutdown(&self, transport: TransportType) -> bool {
        let _ = transport;
        false
    }

    /// Sends a message with no associated transaction.
    async fn send_stateless(&self, msg: SipMessage, dest: SocketAddr, transport: TransportType) -> Result<()>;

    /// Replies to a request with no transaction, e.g. a `verify_request` rejection.
    async fn respond_stateless(&self, rx: &Request, status: StatusCode) -> Result<()>;

    /// Replies to a request on an existing transaction.
    async fn respond_stateful(&self, handle: TsxHandle, rx: &Request, status: StatusCode) -> Result<()>;
}

/// A request delivered to [`crate::service::SipService::on_incoming_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    /// The request itself.
    pub request: Request,
    /// Address it arrived from.
    pub source: SocketAddr,
    /// Transport it arrived on.
    pub transport: TransportType,
}

/// A response delivered to [`crate::service::SipService::on_incoming_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingResponse {
    /// The response itself.
    pub response: Response,
    /// Address it arrived from.
    pub source: SocketAddr,
    /// Transport it arrived on.
    pub transport: TransportType,
}
