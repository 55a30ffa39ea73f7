use super::{Dialer, TrialProber};
use crate::ciphers::{self, CipherSuite};
use crate::error::ProbeError;
use crate::model::Target;
use crate::protocol::ProtocolVersion;
use async_trait::async_trait;
use openssl::error::ErrorStack;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode, StatusType};
use openssl::x509::X509;
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_openssl::SslStream;
use tracing::debug;

/// Cipher string for unrestricted handshakes; level 0 keeps legacy servers reachable.
const WIDE_CIPHER_LIST: &str = "ALL:@SECLEVEL=0";

/// What one unrestricted handshake learned about the server.
#[derive(Clone, Default)]
pub struct ConnectionState {
    pub version: Option<ProtocolVersion>,
    pub cipher: Option<String>,
    /// Leaf first.
    pub chain: Vec<X509>,
    pub ocsp_staple: Option<Vec<u8>>,
}

/// Trial and capture handshakes through OpenSSL.
#[derive(Clone)]
pub struct NativeProber {
    dialer: Dialer,
    handshake_timeout: Duration,
}

impl NativeProber {
    pub fn new(dialer: Dialer) -> Self {
        Self {
            handshake_timeout: dialer.connect_timeout(),
            dialer,
        }
    }

    /// Full handshake with no version or cipher restriction and no
    /// certificate verification.
    pub async fn capture(&self, target: &Target) -> Result<ConnectionState, ProbeError> {
        let connector = capture_connector()?;
        let stream = self.handshake(target, connector, true).await?;
        let ssl = stream.ssl();

        let mut chain: Vec<X509> = ssl
            .peer_cert_chain()
            .map(|stack| stack.iter().map(|cert| cert.to_owned()).collect())
            .unwrap_or_default();
        if chain.is_empty() {
            chain.extend(ssl.peer_certificate());
        }

        let state = ConnectionState {
            version: ssl.version2().and_then(ProtocolVersion::from_ssl_version),
            cipher: ssl.current_cipher().map(|c| {
                ciphers::by_name(c.name())
                    .map(|suite| suite.name.to_string())
                    .unwrap_or_else(|| c.name().to_string())
            }),
            chain,
            ocsp_staple: ssl.ocsp_status().map(|bytes| bytes.to_vec()),
        };
        debug!(
            target = %target.resolved,
            version = ?state.version,
            certificates = state.chain.len(),
            stapled = state.ocsp_staple.is_some(),
            "captured connection state"
        );
        Ok(state)
    }

    pub(super) async fn handshake(
        &self,
        target: &Target,
        connector: &SslConnector,
        request_ocsp: bool,
    ) -> Result<SslStream<TcpStream>, ProbeError> {
        let tcp = self.dialer.connect(target).await?;
        let mut ssl = connector
            .configure()?
            .verify_hostname(false)
            .into_ssl(&target.server_name())?;
        if request_ocsp {
            ssl.set_status_type(StatusType::OCSP)?;
        }
        let mut stream = SslStream::new(ssl, tcp)?;
        match timeout(self.handshake_timeout, Pin::new(&mut stream).connect()).await {
            Ok(Ok(())) => Ok(stream),
            Ok(Err(err)) => Err(ProbeError::Handshake(err)),
            Err(_) => Err(ProbeError::HandshakeTimeout(self.handshake_timeout)),
        }
    }
}

#[async_trait]
impl TrialProber for NativeProber {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn trial(
        &self,
        target: &Target,
        protocol: ProtocolVersion,
        cipher: Option<&'static CipherSuite>,
    ) -> bool {
        if protocol.ssl_version().is_none() {
            return false;
        }
        let connector = match trial_connector(protocol, cipher) {
            Ok(connector) => connector,
            Err(err) => {
                debug!(
                    protocol = %protocol,
                    cipher = cipher.map(|c| c.name),
                    error = %err,
                    "combination not offered by local openssl"
                );
                return false;
            }
        };

        match self.handshake(target, &connector, false).await {
            Ok(_) => true,
            Err(err) => {
                debug!(
                    target = %target.resolved,
                    protocol = %protocol,
                    cipher = cipher.map(|c| c.name),
                    error = %err,
                    "trial rejected"
                );
                false
            }
        }
    }
}

/// Connector pinned to exactly `protocol` and, when given, one cipher.
pub(super) fn trial_connector(
    protocol: ProtocolVersion,
    cipher: Option<&CipherSuite>,
) -> Result<SslConnector, ErrorStack> {
    let mut builder = SslConnector::builder(SslMethod::tls_client())?;
    builder.set_verify(SslVerifyMode::NONE);
    let version = protocol.ssl_version();
    builder.set_min_proto_version(version)?;
    builder.set_max_proto_version(version)?;
    match cipher {
        Some(suite) if suite.is_tls13() => builder.set_ciphersuites(suite.openssl_name)?,
        Some(suite) => builder.set_cipher_list(&format!("{}:@SECLEVEL=0", suite.openssl_name))?,
        None => builder.set_cipher_list(WIDE_CIPHER_LIST)?,
    }
    Ok(builder.build())
}

fn capture_connector() -> Result<&'static SslConnector, ErrorStack> {
    static CONNECTOR: OnceLock<Result<SslConnector, ErrorStack>> = OnceLock::new();

    CONNECTOR
        .get_or_init(|| {
            let mut builder = SslConnector::builder(SslMethod::tls_client())?;
            // Trust is evaluated later from the captured chain.
            builder.set_verify(SslVerifyMode::NONE);
            builder.set_cipher_list(WIDE_CIPHER_LIST)?;
            Ok(builder.build())
        })
        .as_ref()
        .map_err(|err| err.clone())
}
