use std::fmt;

use super::{HostPort, Params, SipMethod, Uri};
use crate::transport::TransportType;

/// A single `Via` header value: one hop a request has traversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Via {
    /// Transport this hop used.
    pub transport: TransportType,
    /// The `sent-by` host/port of the hop.
    pub sent_by: HostPort,
    /// The branch parameter, used for transaction matching.
    pub branch: String,
    /// Any other parameters (`received`, `rport`, ...).
    pub params: Params,
}

impl Via {
    /// Creates a new `Via` for this node, with a freshly generated branch.
    pub fn new(transport: TransportType, sent_by: HostPort, branch: impl Into<String>) -> Self {
        Via {
            transport,
            sent_by,
            branch: branch.into(),
            params: Params::new(),
        }
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/2.0/{} {};branch={}{}", self.transport.as_str(), self.sent_by, self.branch, self.params)
    }
}

/// A display-name + URI pair, as used by `From`/`To`/`Contact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAddr {
    /// Optional display name.
    pub display_name: Option<String>,
    /// The address-of-record URI.
    pub uri: Uri,
    /// Parameters, notably the dialog `tag`.
    pub params: Params,
}

impl NameAddr {
    /// Creates a `NameAddr` with no display name or parameters.
    pub fn new(uri: Uri) -> Self {
        NameAddr {
            display_name: None,
            uri,
            params: Params::new(),
        }
    }

    /// The `tag` parameter, if present.
    pub fn tag(&self) -> Option<&str> {
        self.params.get("tag").flatten()
    }
}

impl fmt::Display for NameAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "\"{name}\" <{}>{}", self.uri, self.params),
            None => write!(f, "<{}>{}", self.uri, self.params),
        }
    }
}

/// The `CSeq` header: a sequence number paired with the request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CSeq {
    /// The sequence number.
    pub seq: u32,
    /// The method this sequence number was issued for.
    pub method: SipMethod,
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}

/// The headers of a SIP request or response relevant to proxy processing.
///
/// This is a deliberately narrow model: only the headers the forking-proxy
/// core inspects or rewrites are typed fields. Anything else round-trips
/// through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    /// The `Via` stack, top-most (most recently added) hop first.
    pub via: Vec<Via>,
    /// Remaining `Max-Forwards` count.
    pub max_forwards: Option<u8>,
    /// The `Route` header set, in header order (next hop first).
    pub route: Vec<Uri>,
    /// The `Record-Route` header set, forwarded but not interpreted by the core.
    pub record_route: Vec<Uri>,
    /// The `From` header.
    pub from: NameAddr,
    /// The `To` header.
    pub to: NameAddr,
    /// The `Call-ID` header.
    pub call_id: String,
    /// The `CSeq` header.
    pub cseq: CSeq,
    /// The `Contact` header set.
    pub contact: Vec<Uri>,
    /// Any other header, preserved verbatim.
    pub extra: Vec<(String, String)>,
}

impl Headers {
    /// Looks up the first value of an arbitrary header by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.extra.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Appends an untyped header.
    pub fn push_extra(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extra.push((name.into(), value.into()));
    }

    /// Removes and returns the top `Route` header, if any.
    pub fn pop_route(&mut self) -> Option<Uri> {
        if self.route.is_empty() {
            None
        } else {
            Some(self.route.remove(0))
        }
    }

    /// Removes and returns the last `Route` header, if any.
    pub fn pop_last_route(&mut self) -> Option<Uri> {
        self.route.pop()
    }

    /// Inserts a `Via` at the top of the stack, as this node forwards a request.
    pub fn push_via(&mut self, via: Via) {
        self.via.insert(0, via);
    }

    /// The top-most `Via`, i.e. the most recent hop.
    pub fn top_via(&self) -> Option<&Via> {
        self.via.first()
    }
}
