/// The crate's result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the message model, transport abstraction, and proxy core.
///
/// Most failures the proxy core can encounter during normal operation (a
/// forking error, a resolver returning nothing, a downstream timeout) are
/// absorbed locally and surfaced as SIP status codes instead of this type;
/// `Error` covers the cases that have no sensible on-the-wire representation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A SIP URI could not be parsed.
    #[error("malformed SIP URI: {0}")]
    MalformedUri(String),

    /// A URI scheme other than `sip`, `sips` or `tel` was encountered.
    #[error("unsupported URI scheme: {0}")]
    UnsupportedUriScheme(String),

    /// A UAC transaction had no destination to send to: no pre-selected
    /// transport, and the server cursor ran past the resolver's list.
    #[error("no destination available")]
    NoDestination,

    /// The resolver returned an empty server list for a next hop.
    #[error("resolver returned no servers")]
    ResolutionFailed,

    /// The transport layer rejected or failed to deliver an outbound message.
    #[error("transport send failed: {0}")]
    Transport(String),

    /// An internal channel used to deliver transaction events was closed.
    #[error("channel closed")]
    ChannelClosed,

    /// An I/O error bubbled up from the transport layer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
