use crate::cert::{self, CertData, PublicKeyInfo, RevocationChecker};
use crate::engine::rate::DialPacer;
use crate::model::{Config, ConnectionData, Diagnostics, ScanKind, ScanReport, Target, Vulnerabilities};
use crate::probe::{self, Dialer, ExternalToolProber, FallbackPolicy, NativeProber};
use crate::protocol::ProtocolVersion;
use crate::scanner::{CapabilityMatrix, MatrixScanner, Sslv2Detector};
use crate::vuln::{CcsInjection, Heartbleed, ProbeHarness, WeakKeyChecker};
use futures::future::join_all;
use openssl::x509::X509;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Bound for each OCSP/CRL/issuer download.
const REVOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs every check against one target and assembles the report.
pub struct Scanner {
    kind: ScanKind,
    read_timeout: Duration,
    dialer: Dialer,
    native: NativeProber,
    matrix: MatrixScanner,
    harness: ProbeHarness,
    weak_keys: WeakKeyChecker,
    revocation: RevocationChecker,
}

impl Scanner {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let dialer = Dialer::new(cfg, DialPacer::new(cfg.rate));
        let native = NativeProber::new(dialer.clone());
        let sslv2 = Sslv2Detector::new(
            dialer.with_connect_timeout(cfg.sslv2_connect_timeout),
            cfg.read_timeout,
        );

        let mut matrix = MatrixScanner::new(Arc::new(native.clone()), sslv2, cfg.trial_concurrency);
        if cfg.external.enabled {
            matrix = matrix.with_external(
                Arc::new(ExternalToolProber::new(&cfg.external)),
                FallbackPolicy::LegacyOnly,
            );
        }

        Ok(Self {
            kind: cfg.scan,
            read_timeout: cfg.read_timeout,
            harness: ProbeHarness::new(dialer.clone(), cfg.read_timeout, cfg.poll_interval),
            weak_keys: WeakKeyChecker::new(cfg.weak_key_dir.clone()),
            revocation: RevocationChecker::new(cfg.revocation, REVOCATION_TIMEOUT)?,
            native,
            matrix,
            dialer,
        })
    }

    #[instrument(skip(self, target), fields(target = %target.resolved, scan = %self.kind))]
    pub async fn scan(&self, target: &Target) -> ScanReport {
        let state = match self.native.capture(target).await {
            Ok(state) if !state.chain.is_empty() => state,
            Ok(_) => {
                warn!("server presented no certificates");
                return ScanReport::empty(
                    target.view(),
                    self.kind,
                    Diagnostics::new("capture", "server presented no certificates"),
                );
            }
            Err(err) => {
                warn!(error = %err, "capture handshake failed");
                return ScanReport::empty(target.view(), self.kind, Diagnostics::new("capture", err.to_string()));
            }
        };

        let leaf = &state.chain[0];
        let key = PublicKeyInfo::from_cert(leaf);
        let host = target.server_name();
        let version = state.version.unwrap_or(ProtocolVersion::Tls12);
        let configuration = self.kind.configuration();

        let certificates = async {
            if !self.kind.certificate() {
                return Vec::new();
            }
            self.certificates(&state.chain, state.ocsp_staple.as_deref()).await
        };
        let matrix = async {
            if configuration {
                self.matrix.scan(target, key.key_type()).await
            } else {
                CapabilityMatrix::default()
            }
        };
        let heartbleed = async {
            if configuration {
                Some(self.harness.run(target, version, &Heartbleed).await)
            } else {
                None
            }
        };
        let ccs = async {
            if configuration {
                Some(self.harness.run(target, version, &CcsInjection).await)
            } else {
                None
            }
        };
        let weak_key = async {
            match &key {
                PublicKeyInfo::Rsa { bits, modulus_hex } if configuration => {
                    Some(self.weak_keys.check(*bits, modulus_hex).await)
                }
                _ => None,
            }
        };
        let server_header = async {
            if configuration {
                probe::server_header(&self.dialer, target, self.read_timeout).await
            } else {
                None
            }
        };

        let (certificates, matrix, heartbleed, ccs, weak_key, server_header) =
            tokio::join!(certificates, matrix, heartbleed, ccs, weak_key, server_header);

        let chain_trusted = cert::chain_trusted(&state.chain, &host).unwrap_or_else(|err| {
            warn!(error = %err, "trust evaluation failed");
            false
        });
        let vulnerabilities = match (heartbleed, ccs) {
            (Some(heartbleed), Some(ccs_injection)) => Some(Vulnerabilities {
                heartbleed,
                ccs_injection,
                debian_weak_key: weak_key,
            }),
            _ => None,
        };
        info!(
            protocols = matrix.len(),
            certificates = certificates.len(),
            trusted = chain_trusted,
            "scan complete"
        );

        ScanReport {
            target: target.view(),
            timestamp: crate::util::now_iso8601(),
            scan: self.kind,
            certificates,
            connection: ConnectionData {
                host_name_matches: cert::hostname_matches(leaf, &host),
                host_name: host,
                chain_trusted,
                ocsp_stapling: state.ocsp_staple.is_some(),
                server_header,
                negotiated_version: state.version,
                negotiated_cipher: state.cipher.clone(),
                supported_config: matrix,
            },
            vulnerabilities,
            diagnostics: None,
        }
    }

    /// Parsed chain with revocation status; the staple only covers the leaf.
    async fn certificates(&self, chain: &[X509], staple: Option<&[u8]>) -> Vec<CertData> {
        let checks = chain.iter().enumerate().map(|(i, cert)| async move {
            let mut data = match CertData::parse(cert) {
                Ok(data) => data,
                Err(err) => {
                    warn!(position = i, error = %err, "certificate not parsed");
                    return None;
                }
            };
            let staple = if i == 0 { staple } else { None };
            data.status = self.revocation.check(cert, chain.get(i + 1), staple).await;
            debug!(position = i, status = ?data.status, "certificate checked");
            Some(data)
        });
        join_all(checks).await.into_iter().flatten().collect()
    }
}
