use crate::model::{Diagnostics, OutputConfig, OutputFormat, ScanKind, ScanReport, TargetView};
use serde::Serialize;
use std::io::{BufWriter, Write};
use tokio::sync::mpsc;

/// Serializes reports on a blocking writer task fed by a channel.
#[derive(Clone)]
pub struct OutputSink {
    inner: std::sync::Arc<OutputInner>,
}

struct OutputInner {
    tx: tokio::sync::Mutex<Option<mpsc::Sender<OutputCommand>>>,
    handle: tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

enum OutputCommand {
    Emit(Box<ScanReport>),
}

impl OutputSink {
    pub fn new(cfg: OutputConfig) -> anyhow::Result<Self> {
        Self::with_writer(cfg, std::io::stdout())
    }

    /// Same as [`OutputSink::new`] but writing somewhere other than stdout.
    pub fn with_writer<W: Write + Send + 'static>(cfg: OutputConfig, writer: W) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel(1024);
        let handle = tokio::task::spawn_blocking(move || run_writer(cfg, writer, rx));

        Ok(Self {
            inner: std::sync::Arc::new(OutputInner {
                tx: tokio::sync::Mutex::new(Some(tx)),
                handle: tokio::sync::Mutex::new(Some(handle)),
            }),
        })
    }

    pub async fn emit(&self, report: ScanReport) -> anyhow::Result<()> {
        let guard = self.inner.tx.lock().await;
        if let Some(tx) = guard.as_ref() {
            tx.send(OutputCommand::Emit(Box::new(report)))
                .await
                .map_err(|err| anyhow::anyhow!("output worker not available: {err}"))?
        } else {
            anyhow::bail!("output worker not available; dropping scan report");
        }
        Ok(())
    }

    pub async fn emit_error(
        &self,
        target: TargetView,
        scan: ScanKind,
        stage: &str,
        error: String,
    ) -> anyhow::Result<()> {
        self.emit(ScanReport::empty(target, scan, Diagnostics::new(stage, error)))
            .await
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.inner.tx.lock().await.take();

        if let Some(handle) = self.inner.handle.lock().await.take() {
            handle
                .await
                .map_err(|err| anyhow::anyhow!("failed to join output worker: {err}"))?;
        }

        Ok(())
    }
}

fn run_writer<W: Write>(cfg: OutputConfig, writer: W, mut rx: mpsc::Receiver<OutputCommand>) {
    let mut writer = BufWriter::new(writer);

    while let Some(cmd) = rx.blocking_recv() {
        if let Err(err) = match cmd {
            OutputCommand::Emit(report) => write_report(&cfg, &mut writer, &report),
        } {
            eprintln!("failed to write scan report: {err}");
        }
    }

    let _ = writer.flush();
}

fn write_report<W: Write>(cfg: &OutputConfig, writer: &mut W, report: &ScanReport) -> anyhow::Result<()> {
    match cfg.format {
        OutputFormat::Jsonl => {
            let line = serde_json::to_string(report)?;
            writeln!(writer, "{line}")?;
        }
        OutputFormat::Pretty => write_pretty(writer, report)?,
    }

    writer.flush()?;
    Ok(())
}

fn write_pretty<W: Write>(writer: &mut W, report: &ScanReport) -> anyhow::Result<()> {
    let conn = &report.connection;
    let state = if report.diagnostics.is_some() { "error" } else { "ok" };
    writeln!(
        writer,
        "{} {} ({}) -> {} [{}]",
        report.target.host, report.target.port, report.target.addr, state, report.scan
    )?;

    if let Some(version) = conn.negotiated_version {
        writeln!(
            writer,
            "  negotiated: {} {}",
            version,
            conn.negotiated_cipher.as_deref().unwrap_or("-")
        )?;
    }
    if report.diagnostics.is_none() {
        writeln!(
            writer,
            "  trusted: {}  hostname match: {}  ocsp stapling: {}",
            yes_no(conn.chain_trusted),
            yes_no(conn.host_name_matches),
            yes_no(conn.ocsp_stapling)
        )?;
    }
    if let Some(server) = &conn.server_header {
        writeln!(writer, "  server: {server}")?;
    }

    for (i, cert) in report.certificates.iter().enumerate() {
        writeln!(
            writer,
            "  cert[{i}]: {} key {} serial {} valid to {} ocsp {} crl {}",
            cert.subject.common_name.as_deref().unwrap_or("-"),
            cert.key_type,
            cert.serial_number,
            cert.valid_to,
            cert.status.ocsp.map(|s| s.as_str()).unwrap_or("-"),
            cert.status.crl.map(|s| s.as_str()).unwrap_or("-"),
        )?;
    }

    for protocol in conn.supported_config.protocols() {
        let ciphers = conn.supported_config.get(protocol).unwrap_or_default();
        writeln!(writer, "  {protocol}: {}", ciphers.join(", "))?;
    }

    if let Some(vulns) = &report.vulnerabilities {
        writeln!(
            writer,
            "  heartbleed: {}  ccs injection: {}  debian weak key: {}",
            label(&vulns.heartbleed),
            label(&vulns.ccs_injection),
            vulns.debian_weak_key.as_ref().map(label).unwrap_or_else(|| "-".into())
        )?;
    }

    if let Some(diag) = &report.diagnostics {
        writeln!(writer, "  diagnostics: [{}] {}", diag.stage, diag.message)?;
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// The serialized name of a unit enum value.
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => "-".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vulnerabilities;
    use crate::protocol::ProtocolVersion;
    use crate::vuln::{Verdict, WeakKeyVerdict};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn view() -> TargetView {
        TargetView {
            host: "example.test".into(),
            addr: "127.0.0.1".into(),
            port: 443,
        }
    }

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::empty(view(), ScanKind::Full, Diagnostics::default());
        report.diagnostics = None;
        report.connection.negotiated_version = Some(ProtocolVersion::Tls13);
        report.connection.negotiated_cipher = Some("TLS_AES_128_GCM_SHA256".into());
        report
            .connection
            .supported_config
            .insert(ProtocolVersion::Tls12, vec!["TLS_RSA_WITH_AES_128_CBC_SHA".into()]);
        report.vulnerabilities = Some(Vulnerabilities {
            heartbleed: Verdict::NotApplicable,
            ccs_injection: Verdict::NotVulnerable,
            debian_weak_key: Some(WeakKeyVerdict::UncommonKeySize),
        });
        report
    }

    #[tokio::test]
    async fn writes_one_json_line_per_report() {
        let buf = SharedBuf::default();
        let sink = OutputSink::with_writer(
            OutputConfig {
                format: OutputFormat::Jsonl,
            },
            buf.clone(),
        )
        .unwrap();
        sink.emit(sample_report()).await.unwrap();
        sink.emit_error(view(), ScanKind::Full, "input", "host unreachable".into())
            .await
            .unwrap();
        sink.shutdown().await.unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["connection"]["supported_config"]["TLSv1.2"][0], "TLS_RSA_WITH_AES_128_CBC_SHA");
        assert_eq!(lines[0]["vulnerabilities"]["heartbleed"], "not_applicable");
        assert_eq!(lines[0]["vulnerabilities"]["debian_weak_key"], "uncommon_key_size");
        assert_eq!(lines[1]["diagnostics"]["stage"], "input");
    }

    #[test]
    fn pretty_lists_protocols_and_verdicts() {
        let mut out = Vec::new();
        write_pretty(&mut out, &sample_report()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("example.test 443 (127.0.0.1) -> ok [full]"), "{text}");
        assert!(text.contains("  negotiated: TLSv1.3 TLS_AES_128_GCM_SHA256"));
        assert!(text.contains("  TLSv1.2: TLS_RSA_WITH_AES_128_CBC_SHA"));
        assert!(text.contains("heartbleed: not_applicable"));
    }
}
