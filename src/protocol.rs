use openssl::ssl::SslVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol versions the scanner knows how to offer.
///
/// Ordering follows the wire codes, which is what the probes rely on when
/// capping a requested version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[serde(rename = "SSLv2")]
    Ssl2,
    #[serde(rename = "SSLv3")]
    Ssl3,
    #[serde(rename = "TLSv1.0")]
    Tls10,
    #[serde(rename = "TLSv1.1")]
    Tls11,
    #[serde(rename = "TLSv1.2")]
    Tls12,
    #[serde(rename = "TLSv1.3")]
    Tls13,
}

/// Versions probed through a TLS client. SSLv2 is handled by raw bytes only.
pub const TRIAL_VERSIONS: [ProtocolVersion; 5] = [
    ProtocolVersion::Ssl3,
    ProtocolVersion::Tls10,
    ProtocolVersion::Tls11,
    ProtocolVersion::Tls12,
    ProtocolVersion::Tls13,
];

pub const ALL_VERSIONS: [ProtocolVersion; 6] = [
    ProtocolVersion::Ssl2,
    ProtocolVersion::Ssl3,
    ProtocolVersion::Tls10,
    ProtocolVersion::Tls11,
    ProtocolVersion::Tls12,
    ProtocolVersion::Tls13,
];

impl ProtocolVersion {
    pub fn wire_code(self) -> u16 {
        match self {
            ProtocolVersion::Ssl2 => 0x0002,
            ProtocolVersion::Ssl3 => 0x0300,
            ProtocolVersion::Tls10 => 0x0301,
            ProtocolVersion::Tls11 => 0x0302,
            ProtocolVersion::Tls12 => 0x0303,
            ProtocolVersion::Tls13 => 0x0304,
        }
    }

    pub fn from_wire_code(code: u16) -> Option<Self> {
        ALL_VERSIONS.into_iter().find(|v| v.wire_code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            ProtocolVersion::Ssl2 => "SSLv2",
            ProtocolVersion::Ssl3 => "SSLv3",
            ProtocolVersion::Tls10 => "TLSv1.0",
            ProtocolVersion::Tls11 => "TLSv1.1",
            ProtocolVersion::Tls12 => "TLSv1.2",
            ProtocolVersion::Tls13 => "TLSv1.3",
        }
    }

    /// Flag understood by `openssl s_client` to pin this version.
    pub fn tool_flag(self) -> &'static str {
        match self {
            ProtocolVersion::Ssl2 => "-ssl2",
            ProtocolVersion::Ssl3 => "-ssl3",
            ProtocolVersion::Tls10 => "-tls1",
            ProtocolVersion::Tls11 => "-tls1_1",
            ProtocolVersion::Tls12 => "-tls1_2",
            ProtocolVersion::Tls13 => "-tls1_3",
        }
    }

    /// OpenSSL has no SSLv2 client, so that variant maps to `None`.
    pub fn ssl_version(self) -> Option<SslVersion> {
        match self {
            ProtocolVersion::Ssl2 => None,
            ProtocolVersion::Ssl3 => Some(SslVersion::SSL3),
            ProtocolVersion::Tls10 => Some(SslVersion::TLS1),
            ProtocolVersion::Tls11 => Some(SslVersion::TLS1_1),
            ProtocolVersion::Tls12 => Some(SslVersion::TLS1_2),
            ProtocolVersion::Tls13 => Some(SslVersion::TLS1_3),
        }
    }

    pub fn from_ssl_version(version: SslVersion) -> Option<Self> {
        TRIAL_VERSIONS
            .into_iter()
            .find(|v| v.ssl_version() == Some(version))
    }

    /// Record-layer probes only speak up to TLS1.2.
    pub fn capped_for_records(self) -> Self {
        self.min(ProtocolVersion::Tls12)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
