use crate::cert::{CertData, CsrData};
use crate::input::parse_target;
use crate::model::{Config, ExternalToolConfig, OutputConfig, OutputFormat, ScanKind};
use clap::{ArgAction, Parser};
use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(author, version, about = "TLS configuration and vulnerability scanner", long_about = None)]
pub struct Cli {
    /// Single target, HOST or HOST:PORT (port defaults to 443)
    #[arg(short = 'H', long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Port override for --host
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// File containing targets (one per line)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<String>,

    /// What to check
    #[arg(long = "scan", value_enum, default_value_t = ScanKind::Full)]
    pub scan: ScanKind,

    /// Targets scanned at once
    #[arg(long = "concurrency", default_value_t = 4)]
    pub concurrency: usize,

    /// Cipher trials in flight per target
    #[arg(long = "trial-concurrency", default_value_t = 16)]
    pub trial_concurrency: usize,

    /// New connections per second (token bucket fill rate, 0 disables pacing)
    #[arg(long = "rate", default_value_t = 0)]
    pub rate: u32,

    /// Connect timeout in milliseconds
    #[arg(long = "connect-timeout", default_value_t = 3000)]
    pub connect_timeout_ms: u64,

    /// Connect timeout for the SSLv2 check in milliseconds
    #[arg(long = "sslv2-connect-timeout", default_value_t = 10000)]
    pub sslv2_connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    #[arg(long = "read-timeout", default_value_t = 2000)]
    pub read_timeout_ms: u64,

    /// Poll interval while waiting for probe responses in milliseconds
    #[arg(long = "poll-interval", default_value_t = 1000)]
    pub poll_interval_ms: u64,

    /// Overall timeout per target in milliseconds
    #[arg(long = "overall-timeout", default_value_t = 600000)]
    pub overall_timeout_ms: u64,

    /// Route legacy protocol/cipher trials through `openssl s_client`
    #[arg(long = "openssl-fallback", action = ArgAction::SetTrue)]
    pub openssl_fallback: bool,

    /// openssl binary used by --openssl-fallback
    #[arg(long = "openssl-path", default_value = "openssl")]
    pub openssl_path: String,

    /// Timeout for one external trial in milliseconds
    #[arg(long = "external-timeout", default_value_t = 120000)]
    pub external_timeout_ms: u64,

    /// Directory holding blacklist.RSA-<bits> files
    #[arg(long = "weak-key-dir", default_value = "resources/weakkeys")]
    pub weak_key_dir: PathBuf,

    /// Skip OCSP and CRL downloads (stapled responses are still read)
    #[arg(long = "no-revocation", action = ArgAction::SetTrue)]
    pub no_revocation: bool,

    /// Output format
    #[arg(long = "output", value_enum, default_value_t = OutputFormat::Jsonl)]
    pub output: OutputFormat,

    /// Human readable output instead of JSONL
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,

    /// Print the fields of a PEM certificate and exit
    #[arg(long = "parse-cert", value_name = "FILE", conflicts_with_all = ["host", "input", "parse_csr"])]
    pub parse_cert: Option<PathBuf>,

    /// Print the fields of a PEM certificate signing request and exit
    #[arg(long = "parse-csr", value_name = "FILE", conflicts_with_all = ["host", "input"])]
    pub parse_csr: Option<PathBuf>,
}

/// Offline decoding of a PEM file instead of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMode {
    Certificate(PathBuf),
    Csr(PathBuf),
}

impl ParseMode {
    /// Reads the file and renders the decoded fields as pretty JSON.
    pub async fn run(&self) -> anyhow::Result<String> {
        let path = match self {
            ParseMode::Certificate(path) | ParseMode::Csr(path) => path,
        };
        let pem = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let json = match self {
            ParseMode::Certificate(_) => serde_json::to_string_pretty(&CertData::from_pem(&pem)?)?,
            ParseMode::Csr(_) => serde_json::to_string_pretty(&CsrData::from_pem(&pem)?)?,
        };
        Ok(json)
    }
}

impl Cli {
    pub fn parse_mode(&self) -> Option<ParseMode> {
        self.parse_cert
            .clone()
            .map(ParseMode::Certificate)
            .or_else(|| self.parse_csr.clone().map(ParseMode::Csr))
    }

    pub fn into_config(self) -> anyhow::Result<Config> {
        if self.host.is_none() && self.input.is_none() {
            anyhow::bail!("either --host or --input is required");
        }

        if self.host.is_some() && self.input.is_some() {
            anyhow::bail!("--host and --input are mutually exclusive");
        }

        if self.port.is_some() && self.host.is_none() {
            anyhow::bail!("--port requires --host");
        }

        if self.concurrency == 0 || self.trial_concurrency == 0 {
            anyhow::bail!("concurrency must be greater than zero");
        }

        let target = self
            .host
            .as_deref()
            .map(|host| parse_target(host, self.port))
            .transpose()?;

        Ok(Config {
            target,
            input: self.input,
            scan: self.scan,
            concurrency: self.concurrency,
            trial_concurrency: self.trial_concurrency,
            rate: self.rate,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            sslv2_connect_timeout: Duration::from_millis(self.sslv2_connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            overall_timeout: Duration::from_millis(self.overall_timeout_ms),
            external: ExternalToolConfig {
                enabled: self.openssl_fallback,
                program: self.openssl_path,
                timeout: Duration::from_millis(self.external_timeout_ms),
            },
            weak_key_dir: self.weak_key_dir,
            revocation: !self.no_revocation,
            output: OutputConfig {
                format: if self.pretty {
                    OutputFormat::Pretty
                } else {
                    self.output
                },
            },
        })
    }
}
