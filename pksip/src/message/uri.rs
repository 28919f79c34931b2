use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use util::Scanner;

use super::Params;
use crate::error::{Error, Result};
use crate::transport::TransportType;

/// The scheme of a SIP URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `sip:`
    #[default]
    Sip,
    /// `sips:`
    Sips,
    /// `tel:`
    Tel,
}

impl Scheme {
    fn as_str(&self) -> &'static str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
            Scheme::Tel => "tel",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sip" => Ok(Scheme::Sip),
            "sips" => Ok(Scheme::Sips),
            "tel" => Ok(Scheme::Tel),
            other => Err(Error::UnsupportedUriScheme(other.to_owned())),
        }
    }
}

/// The host part of a [`HostPort`], either a domain name or a literal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// A DNS domain name.
    Domain(String),
    /// A literal IP address.
    IpAddr(IpAddr),
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Domain(d) => f.write_str(d),
            Host::IpAddr(ip) => write!(f, "{ip}"),
        }
    }
}

impl From<&str> for Host {
    fn from(s: &str) -> Self {
        match s.parse::<IpAddr>() {
            Ok(ip) => Host::IpAddr(ip),
            Err(_) => Host::Domain(s.to_owned()),
        }
    }
}

/// A `host[:port]` pair, as carried by a [`Uri`] or a `Via`/`Route` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    /// The host.
    pub host: Host,
    /// The optional port. `None` means the scheme's default port applies.
    pub port: Option<u16>,
}

impl HostPort {
    /// Creates a `HostPort` with no explicit port.
    pub fn new(host: Host) -> Self {
        Self { host, port: None }
    }

    /// Returns `true` if `host` and (when both set) `port` match exactly.
    pub fn matches(&self, other: &HostPort) -> bool {
        self.host == other.host && (self.port.is_none() || other.port.is_none() || self.port == other.port)
    }
}

impl Default for HostPort {
    fn default() -> Self {
        Self {
            host: Host::Domain(String::new()),
            port: None,
        }
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => write!(f, "{}", self.host),
        }
    }
}

/// An SIP URI, e.g. `sip:alice@atlanta.example.com;transport=tcp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    /// The uri scheme.
    pub scheme: Scheme,
    /// Optional user part of the uri.
    pub user: Option<String>,
    /// The uri host and port.
    pub host_port: HostPort,
    /// The `transport` parameter.
    pub transport_param: Option<TransportType>,
    /// The `lr` parameter, marking a loose-routing Route/Record-Route entry.
    pub lr_param: bool,
    /// The `maddr` parameter.
    pub maddr_param: Option<Host>,
    /// Any other parameters, including `ttl`, `user`, `method`.
    pub params: Params,
}

impl Uri {
    /// Creates a bare `Uri` with no parameters.
    pub fn new(scheme: Scheme, user: Option<String>, host_port: HostPort) -> Self {
        Uri {
            scheme,
            user,
            host_port,
            transport_param: None,
            lr_param: false,
            maddr_param: None,
            params: Params::new(),
        }
    }

    /// Returns `true` if this URI's host/port matches the given local address,
    /// i.e. the URI refers to this proxy.
    pub fn refers_to(&self, local: &HostPort) -> bool {
        self.host_port.matches(local)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        write!(f, "{}", self.host_port)?;
        if let Some(transport) = self.transport_param {
            write!(f, ";transport={}", transport.as_str().to_ascii_lowercase())?;
        }
        if self.lr_param {
            write!(f, ";lr")?;
        }
        if let Some(maddr) = &self.maddr_param {
            write!(f, ";maddr={maddr}")?;
        }
        write!(f, "{}", self.params)
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut scanner = Scanner::new(s.as_bytes());
        let scheme_bytes = scanner.read_while(|b| b != b':');
        let scheme = std::str::from_utf8(scheme_bytes).unwrap_or_default().parse()?;
        scanner.must_read(b':').map_err(|_| Error::MalformedUri(s.to_owned()))?;

        let rest = scanner.remaing();
        let rest = std::str::from_utf8(rest).map_err(|_| Error::MalformedUri(s.to_owned()))?;

        let (userinfo, hostport_and_params) = match rest.split_once('@') {
            Some((user, rem)) => (Some(user.to_owned()), rem),
            None => (None, rest),
        };

        let mut parts = hostport_and_params.split(';');
        let host_port_str = parts.next().unwrap_or_default();
        let (host_str, port_str) = match host_port_str.rsplit_once(':') {
            Some((h, p)) if p.chars().all(|c| c.is_ascii_digit()) && !p.is_empty() => (h, Some(p)),
            _ => (host_port_str, None),
        };
        let port = port_str.map(|p| p.parse::<u16>()).transpose().map_err(|_| Error::MalformedUri(s.to_owned()))?;
        let host_port = HostPort {
            host: Host::from(host_str),
            port,
        };

        let mut uri = Uri::new(scheme, userinfo, host_port);
        for param in parts {
            if param.is_empty() {
                continue;
            }
            match param.split_once('=') {
                Some(("transport", v)) => uri.transport_param = Some(TransportType::from(v)),
                Some(("maddr", v)) => uri.maddr_param = Some(Host::from(v)),
                Some((name, value)) => uri.params.set(name, Some(value)),
                None if param.eq_ignore_ascii_case("lr") => uri.lr_param = true,
                None => uri.params.set(param, None),
            }
        }
        Ok(uri)
    }
}
