//! SIP message types.
//!
//! These are the data shapes the forking-proxy core reads and rewrites.
//! Turning wire bytes into these types, and back, is the job of the
//! transport/parser library this crate sits on top of; the core only ever
//! sees already-parsed messages.

mod code;
mod headers;
mod method;
mod params;
mod uri;

pub use code::*;
pub use headers::*;
pub use method::*;
pub use params::*;
pub use uri::*;

use enum_as_inner::EnumAsInner;

/// A parsed SIP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request method.
    pub method: SipMethod,
    /// The Request-URI, indicating the target of the request.
    pub uri: Uri,
    /// The request's headers.
    pub headers: Headers,
    /// The message body, if present.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Creates a new request with the given method, URI and headers.
    pub fn new(method: SipMethod, uri: Uri, headers: Headers) -> Self {
        Request {
            method,
            uri,
            headers,
            body: None,
        }
    }

    /// Clones this request as the template for an outgoing fork, bumping
    /// nothing: callers apply the [`crate::resolver::Target`] afterwards.
    pub fn clone_for_fork(&self) -> Self {
        self.clone()
    }
}

/// A parsed SIP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The numeric/symbolic status code.
    pub status: StatusCode,
    /// The reason phrase; defaults to the status code's standard reason.
    pub reason: String,
    /// The response's headers.
    pub headers: Headers,
    /// The message body, if present.
    pub body: Option<Vec<u8>>,
}

impl Response {
    /// Creates a new response, copying headers from the request it answers
    /// except for the method-specific bits the caller is expected to set.
    pub fn new(status: StatusCode, headers: Headers) -> Self {
        Response {
            reason: status.reason().to_owned(),
            status,
            headers,
            body: None,
        }
    }
}

/// Either a [`Request`] or a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
pub enum SipMessage {
    /// A SIP request.
    Request(Request),
    /// A SIP response.
    Response(Response),
}

impl SipMessage {
    /// Returns a reference to the message's headers, regardless of variant.
    pub fn headers(&self) -> &Headers {
        match self {
            SipMessage::Request(r) => &r.headers,
            SipMessage::Response(r) => &r.headers,
        }
    }

    /// Returns a mutable reference to the message's headers, regardless of variant.
    pub fn headers_mut(&mut self) -> &mut Headers {
        match self {
            SipMessage::Request(r) => &mut r.headers,
            SipMessage::Response(r) => &mut r.headers,
        }
    }
}

impl From<Request> for SipMessage {
    fn from(value: Request) -> Self {
        SipMessage::Request(value)
    }
}

impl From<Response> for SipMessage {
    fn from(value: Response) -> Self {
        SipMessage::Response(value)
    }
}
