use crate::model::{Config, Target, TargetSpec, TargetView, DEFAULT_PORT};
use anyhow::{bail, Context};
use regex::Regex;
use std::net::IpAddr;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{lookup_host, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;

/// Plain TCP reachability bound applied before any TLS work.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_HOST_LEN: usize = 255;

/// A target ready to scan, or one rejected before scanning.
#[derive(Debug)]
pub enum TargetInput {
    Ready(Target),
    Rejected { target: TargetView, reason: String },
}

pub fn stream_targets(cfg: &Config) -> anyhow::Result<ReceiverStream<TargetInput>> {
    let (tx, rx) = mpsc::channel(256);

    if let Some(spec) = cfg.target.clone() {
        let tx = tx.clone();
        tokio::spawn(async move {
            resolve_and_send(spec, &tx).await;
        });
    }

    if let Some(path) = cfg.input.clone() {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(err) = read_file(path, tx).await {
                tracing::error!(error = %err, "failed to read input file");
            }
        });
    }

    drop(tx);
    Ok(ReceiverStream::new(rx))
}

async fn read_file(path: String, tx: mpsc::Sender<TargetInput>) -> anyhow::Result<()> {
    let file = tokio::fs::File::open(&path)
        .await
        .with_context(|| format!("cannot open input {}", path))?;
    let mut reader = BufReader::new(file).lines();
    while let Some(line) = reader.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_target(trimmed, None) {
            Ok(spec) => resolve_and_send(spec, &tx).await,
            Err(err) => {
                tracing::warn!(line = %trimmed, error = %err, "skipping invalid target");
                let rejected = TargetInput::Rejected {
                    target: TargetView {
                        host: trimmed.to_string(),
                        addr: String::new(),
                        port: 0,
                    },
                    reason: err.to_string(),
                };
                tx.send(rejected).await.ok();
            }
        }
    }
    Ok(())
}

/// `host`, `host:port`, `[v6]:port` or a bare IPv6 literal. `port`
/// overrides whatever the line carries; the default is 443.
pub fn parse_target(line: &str, port: Option<u16>) -> anyhow::Result<TargetSpec> {
    let line = line.trim();
    let (host, port_part) = if let Some(rest) = line.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').context("unterminated IPv6 literal")?;
        (host, tail.strip_prefix(':'))
    } else if line.matches(':').count() == 1 {
        let (host, port) = line.split_once(':').unwrap_or((line, ""));
        (host, Some(port))
    } else {
        (line, None)
    };

    let port = match (port, port_part) {
        (Some(port), _) => port as u32,
        (None, Some(text)) => text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid port {text:?}"))?,
        (None, None) => DEFAULT_PORT as u32,
    };
    if !valid_port(port) {
        bail!("invalid host or port: port {port} out of range");
    }
    if !valid_host(host) {
        bail!("invalid host or port: {host:?}");
    }
    Ok(TargetSpec {
        host: host.to_string(),
        port: port as u16,
    })
}

/// DNS name syntax (labels of word characters and dashes) or an IP literal.
pub fn valid_host(host: &str) -> bool {
    static HOST: OnceLock<Regex> = OnceLock::new();

    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    if host.is_empty() || host.replace('.', "").len() > MAX_HOST_LEN {
        return false;
    }
    HOST.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9_]{1}[a-zA-Z0-9_-]{0,62}){1}(\.[a-zA-Z0-9_]{1}[a-zA-Z0-9_-]{0,62})*[\._]?$")
            .expect("host pattern compiles")
    })
    .is_match(host)
}

pub fn valid_port(port: u32) -> bool {
    (1..=65535).contains(&port)
}

/// Whether a plain TCP connection to `target` opens within `limit`.
pub async fn can_connect(target: &Target, limit: Duration) -> bool {
    matches!(timeout(limit, TcpStream::connect(target.resolved)).await, Ok(Ok(_)))
}

async fn resolve_and_send(spec: TargetSpec, tx: &mpsc::Sender<TargetInput>) {
    let rejected = |reason: String| TargetInput::Rejected {
        target: TargetView {
            host: spec.host.clone(),
            addr: String::new(),
            port: spec.port,
        },
        reason,
    };

    let resolved = match lookup_host((spec.host.as_str(), spec.port)).await {
        Ok(mut addrs) => addrs.next(),
        Err(err) => {
            tracing::warn!(host = %spec.host, error = %err, "resolution failed");
            None
        }
    };
    let Some(addr) = resolved else {
        tx.send(rejected("host could not be resolved".into())).await.ok();
        return;
    };

    let target = Target {
        original: spec.clone(),
        resolved: addr,
    };
    if !can_connect(&target, REACHABILITY_TIMEOUT).await {
        tracing::warn!(target = %addr, "host unreachable");
        tx.send(rejected("host unreachable".into())).await.ok();
        return;
    }
    tx.send(TargetInput::Ready(target)).await.ok();
}
