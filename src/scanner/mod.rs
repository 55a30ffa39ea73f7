pub mod sslv2;

pub use sslv2::Sslv2Detector;

use crate::ciphers::{self, CipherSuite, KeyType};
use crate::model::Target;
use crate::probe::{FallbackPolicy, TrialProber};
use crate::protocol::{ProtocolVersion, TRIAL_VERSIONS};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, instrument, warn};

/// Protocol version → names of the suites the server accepted with it.
/// Protocols without any accepted suite are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilityMatrix(BTreeMap<ProtocolVersion, Vec<String>>);

impl CapabilityMatrix {
    pub fn insert(&mut self, protocol: ProtocolVersion, ciphers: Vec<String>) {
        if !ciphers.is_empty() {
            self.0.insert(protocol, ciphers);
        }
    }

    pub fn get(&self, protocol: ProtocolVersion) -> Option<&[String]> {
        self.0.get(&protocol).map(Vec::as_slice)
    }

    pub fn protocols(&self) -> impl Iterator<Item = ProtocolVersion> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fans trial handshakes out over protocol × eligible cipher.
#[derive(Clone)]
pub struct MatrixScanner {
    native: Arc<dyn TrialProber>,
    external: Option<Arc<dyn TrialProber>>,
    policy: FallbackPolicy,
    /// Cipher trials in flight for one scanned target.
    trial_concurrency: usize,
    sslv2: Sslv2Detector,
}

impl MatrixScanner {
    pub fn new(native: Arc<dyn TrialProber>, sslv2: Sslv2Detector, trial_concurrency: usize) -> Self {
        Self {
            native,
            external: None,
            policy: FallbackPolicy::Never,
            trial_concurrency: trial_concurrency.max(1),
            sslv2,
        }
    }

    pub fn with_external(mut self, prober: Arc<dyn TrialProber>, policy: FallbackPolicy) -> Self {
        self.external = Some(prober);
        self.policy = policy;
        self
    }

    fn prober_for(&self, protocol: ProtocolVersion, cipher: Option<&CipherSuite>) -> &Arc<dyn TrialProber> {
        match &self.external {
            Some(external) if self.policy.applies(protocol, cipher) => external,
            _ => &self.native,
        }
    }

    #[instrument(skip(self, target), fields(target = %target.resolved))]
    pub async fn scan(&self, target: &Target, key: KeyType) -> CapabilityMatrix {
        let matrix = Arc::new(Mutex::new(CapabilityMatrix::default()));
        let slots = Arc::new(Semaphore::new(self.trial_concurrency));

        let sslv2 = {
            let detector = self.sslv2.clone();
            let target = target.clone();
            tokio::spawn(async move { detector.detect(&target).await })
        };

        let mut protocols = FuturesUnordered::new();
        for protocol in TRIAL_VERSIONS {
            let this = self.clone();
            let target = target.clone();
            let matrix = matrix.clone();
            let slots = slots.clone();
            protocols.push(tokio::spawn(async move {
                this.scan_protocol(&target, protocol, key, &slots, &matrix).await;
            }));
        }
        while let Some(joined) = protocols.next().await {
            if let Err(err) = joined {
                warn!(error = %err, "protocol scan task failed");
            }
        }

        match sslv2.await {
            Ok(ciphers) => matrix.lock().await.insert(ProtocolVersion::Ssl2, ciphers),
            Err(err) => warn!(error = %err, "sslv2 detection task failed"),
        }

        let result = matrix.lock().await.clone();
        debug!(protocols = result.len(), "capability matrix complete");
        result
    }

    async fn scan_protocol(
        &self,
        target: &Target,
        protocol: ProtocolVersion,
        key: KeyType,
        slots: &Arc<Semaphore>,
        matrix: &Mutex<CapabilityMatrix>,
    ) {
        if !self.prober_for(protocol, None).trial(target, protocol, None).await {
            debug!(protocol = %protocol, "protocol not supported");
            return;
        }

        let mut trials = FuturesUnordered::new();
        for cipher in ciphers::eligible(protocol, key) {
            let Ok(permit) = slots.clone().acquire_owned().await else {
                break;
            };
            let prober = self.prober_for(protocol, Some(cipher)).clone();
            let target = target.clone();
            trials.push(tokio::spawn(async move {
                let _permit = permit;
                prober
                    .trial(&target, protocol, Some(cipher))
                    .await
                    .then_some(cipher)
            }));
        }

        let mut accepted: Vec<&'static CipherSuite> = Vec::new();
        while let Some(joined) = trials.next().await {
            match joined {
                Ok(Some(cipher)) => accepted.push(cipher),
                Ok(None) => {}
                Err(err) => warn!(protocol = %protocol, error = %err, "cipher trial task failed"),
            }
        }
        accepted.sort_by_key(|c| c.code);
        debug!(protocol = %protocol, accepted = accepted.len(), "protocol scan complete");

        matrix
            .lock()
            .await
            .insert(protocol, accepted.iter().map(|c| c.name.to_string()).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Config, TargetSpec};
    use crate::probe::Dialer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts TLS1.2 with two fixed suites and protocol-level TLS1.3.
    struct FakeServer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TrialProber for FakeServer {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn trial(
            &self,
            _target: &Target,
            protocol: ProtocolVersion,
            cipher: Option<&'static CipherSuite>,
        ) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match (protocol, cipher) {
                (ProtocolVersion::Tls12, None) | (ProtocolVersion::Tls13, None) => true,
                (ProtocolVersion::Tls12, Some(c)) => matches!(c.code, 0xc02f | 0xc013),
                (ProtocolVersion::Tls13, Some(c)) => c.code == 0x1301,
                _ => false,
            }
        }
    }

    struct AlwaysYes;

    #[async_trait]
    impl TrialProber for AlwaysYes {
        fn name(&self) -> &'static str {
            "always"
        }

        async fn trial(&self, _: &Target, _: ProtocolVersion, _: Option<&'static CipherSuite>) -> bool {
            true
        }
    }

    async fn closed_target() -> Target {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Target {
            original: TargetSpec {
                host: "127.0.0.1".into(),
                port: addr.port(),
            },
            resolved: addr,
        }
    }

    fn detector() -> Sslv2Detector {
        let cfg = Config::default();
        Sslv2Detector::new(Dialer::new(&cfg, None), cfg.read_timeout)
    }

    #[tokio::test]
    async fn collects_accepted_suites_per_protocol() {
        let fake = Arc::new(FakeServer {
            calls: AtomicUsize::new(0),
        });
        let scanner = MatrixScanner::new(fake.clone(), detector(), 4);
        let matrix = scanner.scan(&closed_target().await, KeyType::Rsa).await;

        assert_eq!(
            matrix.protocols().collect::<Vec<_>>(),
            vec![ProtocolVersion::Tls12, ProtocolVersion::Tls13]
        );
        assert_eq!(
            matrix.get(ProtocolVersion::Tls12).unwrap(),
            &[
                "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA".to_string(),
                "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256".to_string(),
            ]
        );
        assert_eq!(
            matrix.get(ProtocolVersion::Tls13).unwrap(),
            &["TLS_AES_128_GCM_SHA256".to_string()]
        );

        let expected_calls = TRIAL_VERSIONS.len()
            + ciphers::eligible(ProtocolVersion::Tls12, KeyType::Rsa).count()
            + ciphers::eligible(ProtocolVersion::Tls13, KeyType::Rsa).count();
        assert_eq!(fake.calls.load(Ordering::SeqCst), expected_calls);
    }

    #[tokio::test]
    async fn repeated_scans_agree() {
        let fake = Arc::new(FakeServer {
            calls: AtomicUsize::new(0),
        });
        let scanner = MatrixScanner::new(fake, detector(), 8);
        let target = closed_target().await;
        let first = scanner.scan(&target, KeyType::Rsa).await;
        let second = scanner.scan(&target, KeyType::Rsa).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fallback_policy_routes_sslv3_to_external() {
        let native = Arc::new(FakeServer {
            calls: AtomicUsize::new(0),
        });
        let scanner = MatrixScanner::new(native, detector(), 4)
            .with_external(Arc::new(AlwaysYes), FallbackPolicy::LegacyOnly);
        let matrix = scanner.scan(&closed_target().await, KeyType::Ecdsa).await;

        let sslv3 = matrix.get(ProtocolVersion::Ssl3).unwrap();
        assert_eq!(sslv3.len(), ciphers::eligible(ProtocolVersion::Ssl3, KeyType::Ecdsa).count());
        assert!(matrix.get(ProtocolVersion::Tls10).is_none());
    }

    /// Sleeps inside every trial and records the peak number running at once.
    #[derive(Default)]
    struct CountingServer {
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl TrialProber for CountingServer {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn trial(&self, _: &Target, protocol: ProtocolVersion, cipher: Option<&'static CipherSuite>) -> bool {
            if cipher.is_none() {
                return protocol == ProtocolVersion::Tls12;
            }
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);
            true
        }
    }

    #[tokio::test(start_paused = true)]
    async fn trial_bound_applies_per_target() {
        let server = Arc::new(CountingServer::default());
        let scanner = MatrixScanner::new(server.clone(), detector(), 2);
        let (first, second) = (closed_target().await, closed_target().await);

        let (a, b) = tokio::join!(
            scanner.scan(&first, KeyType::Rsa),
            scanner.scan(&second, KeyType::Rsa)
        );

        assert_eq!(a, b);
        assert_eq!(server.peak.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn empty_cipher_lists_are_not_stored() {
        let mut matrix = CapabilityMatrix::default();
        matrix.insert(ProtocolVersion::Tls11, Vec::new());
        assert!(matrix.is_empty());
        matrix.insert(ProtocolVersion::Tls12, vec!["X".into()]);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, r#"{"TLSv1.2":["X"]}"#);
    }
}
