use crate::cert::CertData;
use crate::protocol::ProtocolVersion;
use crate::scanner::CapabilityMatrix;
use crate::vuln::{Verdict, WeakKeyVerdict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 443;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub original: TargetSpec,
    pub resolved: SocketAddr,
}

impl Target {
    pub fn view(&self) -> TargetView {
        TargetView {
            host: self.original.host.clone(),
            addr: self.resolved.ip().to_string(),
            port: self.resolved.port(),
        }
    }

    pub fn service(&self) -> ServiceKind {
        ServiceKind::from_port(self.original.port)
    }

    /// Name sent as SNI and matched against the certificate.
    pub fn server_name(&self) -> String {
        if self.original.host.is_empty() {
            self.resolved.ip().to_string()
        } else {
            self.original.host.clone()
        }
    }
}

/// Service the port conventionally carries; decides STARTTLS and header retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "ftp")]
    Ftp,
    #[serde(rename = "smtp")]
    Smtp,
    #[serde(rename = "smtpSSL")]
    SmtpSsl,
    #[serde(rename = "pop3")]
    Pop3,
    #[serde(rename = "pop3SSL")]
    Pop3Ssl,
    #[serde(rename = "imap")]
    Imap,
    #[serde(rename = "imapSSL")]
    ImapSsl,
    #[serde(rename = "rdp")]
    Rdp,
    #[serde(rename = "https")]
    Https,
}

impl ServiceKind {
    pub fn from_port(port: u16) -> Self {
        match port {
            21 => ServiceKind::Ftp,
            25 | 587 => ServiceKind::Smtp,
            465 => ServiceKind::SmtpSsl,
            110 => ServiceKind::Pop3,
            995 => ServiceKind::Pop3Ssl,
            143 => ServiceKind::Imap,
            993 => ServiceKind::ImapSsl,
            3389 => ServiceKind::Rdp,
            _ => ServiceKind::Https,
        }
    }

    pub fn starttls(self) -> Option<StartTlsKind> {
        match self {
            ServiceKind::Ftp => Some(StartTlsKind::Ftp),
            ServiceKind::Smtp => Some(StartTlsKind::Smtp),
            ServiceKind::Pop3 => Some(StartTlsKind::Pop3),
            ServiceKind::Imap => Some(StartTlsKind::Imap),
            _ => None,
        }
    }

    /// Services that speak TLS from the first byte get an HTTP `Server` probe.
    pub fn wants_http_header(self) -> bool {
        matches!(
            self,
            ServiceKind::Https | ServiceKind::SmtpSsl | ServiceKind::Pop3Ssl | ServiceKind::ImapSsl
        )
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceKind::Ftp => "ftp",
            ServiceKind::Smtp => "smtp",
            ServiceKind::SmtpSsl => "smtpSSL",
            ServiceKind::Pop3 => "pop3",
            ServiceKind::Pop3Ssl => "pop3SSL",
            ServiceKind::Imap => "imap",
            ServiceKind::ImapSsl => "imapSSL",
            ServiceKind::Rdp => "rdp",
            ServiceKind::Https => "https",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartTlsKind {
    Ftp,
    Smtp,
    Pop3,
    Imap,
}

impl fmt::Display for StartTlsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StartTlsKind::Ftp => "ftp",
            StartTlsKind::Smtp => "smtp",
            StartTlsKind::Pop3 => "pop3",
            StartTlsKind::Imap => "imap",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: Option<TargetSpec>,
    pub input: Option<String>,
    pub scan: ScanKind,
    pub concurrency: usize,
    pub trial_concurrency: usize,
    /// New connections per second; zero leaves dialing unpaced.
    pub rate: u32,
    pub connect_timeout: Duration,
    pub sslv2_connect_timeout: Duration,
    pub read_timeout: Duration,
    pub poll_interval: Duration,
    pub overall_timeout: Duration,
    pub external: ExternalToolConfig,
    pub weak_key_dir: PathBuf,
    pub revocation: bool,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: None,
            input: None,
            scan: ScanKind::Full,
            concurrency: 4,
            trial_concurrency: 16,
            rate: 0,
            connect_timeout: Duration::from_secs(3),
            sslv2_connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(2),
            poll_interval: Duration::from_secs(1),
            overall_timeout: Duration::from_secs(600),
            external: ExternalToolConfig::default(),
            weak_key_dir: PathBuf::from("resources/weakkeys"),
            revocation: true,
            output: OutputConfig {
                format: OutputFormat::Jsonl,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExternalToolConfig {
    pub enabled: bool,
    pub program: String,
    pub timeout: Duration,
}

impl Default for ExternalToolConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "openssl".into(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Certificate,
    Configuration,
    Full,
}

impl ScanKind {
    pub fn certificate(self) -> bool {
        matches!(self, ScanKind::Certificate | ScanKind::Full)
    }

    pub fn configuration(self) -> bool {
        matches!(self, ScanKind::Configuration | ScanKind::Full)
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanKind::Certificate => write!(f, "certificate"),
            ScanKind::Configuration => write!(f, "configuration"),
            ScanKind::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Jsonl,
    Pretty,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: TargetView,
    pub timestamp: String,
    pub scan: ScanKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<CertData>,
    pub connection: ConnectionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vulnerabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl ScanReport {
    /// Report for a target nothing could be checked against.
    pub fn empty(target: TargetView, scan: ScanKind, diagnostics: Diagnostics) -> Self {
        Self {
            connection: ConnectionData {
                host_name: target.host.clone(),
                ..ConnectionData::default()
            },
            target,
            timestamp: crate::util::now_iso8601(),
            scan,
            certificates: Vec::new(),
            vulnerabilities: None,
            diagnostics: Some(diagnostics),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub host: String,
    pub addr: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionData {
    pub host_name: String,
    pub host_name_matches: bool,
    pub chain_trusted: bool,
    pub ocsp_stapling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_version: Option<ProtocolVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_cipher: Option<String>,
    pub supported_config: CapabilityMatrix,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vulnerabilities {
    pub heartbleed: Verdict,
    pub ccs_injection: Verdict,
    /// Only checked for RSA leaf keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debian_weak_key: Option<WeakKeyVerdict>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Diagnostics {
    pub stage: String,
    pub message: String,
}

impl Diagnostics {
    pub fn new(stage: &str, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ReadStopReason {
    #[default]
    NotStarted,
    ConnectionClosed,
    Delimiter,
    SizeLimit,
    Timeout,
}
