//! # pksip
//!
//! A stateful, forking SIP (RFC 3261) proxy core.
//!
//! This crate owns the proxy decision logic — route preprocessing, target
//! computation, forking, `CANCEL` propagation, and best-response election —
//! and is deliberately agnostic to message parsing, transport sockets, and
//! transaction retransmission timers. Those live behind the [`transport`]
//! module's [`transport::TransportLayer`] trait, which a deployment
//! implements once over whatever concrete SIP stack it runs.

pub mod error;
pub mod message;
pub mod proxy;
pub mod resolver;
pub mod service;
pub mod transport;

pub use error::{Error, Result};
pub use proxy::{Proxy, UacTransaction, UasTransaction};
pub use service::SipService;
