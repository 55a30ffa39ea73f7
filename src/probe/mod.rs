mod external;
mod https;
mod native;

pub use external::{ExternalToolProber, FallbackPolicy};
pub use https::server_header;
pub use native::{ConnectionState, NativeProber};

use crate::ciphers::CipherSuite;
use crate::engine::rate::DialPacer;
use crate::error::ProbeError;
use crate::model::{Config, Target};
use crate::protocol::ProtocolVersion;
use crate::starttls::Upgrader;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// One isolated handshake attempt restricted to a protocol and optionally a
/// single cipher. Any failure reads as "not supported".
#[async_trait]
pub trait TrialProber: Send + Sync {
    fn name(&self) -> &'static str;

    async fn trial(
        &self,
        target: &Target,
        protocol: ProtocolVersion,
        cipher: Option<&'static CipherSuite>,
    ) -> bool;
}

/// TCP dial with timeout, optional pacing, then STARTTLS when the service
/// needs it. Every caller gets a fresh connection.
#[derive(Clone)]
pub struct Dialer {
    connect_timeout: Duration,
    upgrader: Upgrader,
    pacer: Option<DialPacer>,
}

impl Dialer {
    pub fn new(cfg: &Config, pacer: Option<DialPacer>) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout,
            upgrader: Upgrader::new(cfg.read_timeout),
            pacer,
        }
    }

    pub fn with_connect_timeout(&self, connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            ..self.clone()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub async fn connect(&self, target: &Target) -> Result<TcpStream, ProbeError> {
        let mut stream = self.connect_plain(target).await?;
        if let Some(kind) = target.service().starttls() {
            self.upgrader.upgrade(&mut stream, kind).await?;
        }
        Ok(stream)
    }

    /// Dial without the STARTTLS preamble.
    pub async fn connect_plain(&self, target: &Target) -> Result<TcpStream, ProbeError> {
        if let Some(pacer) = &self.pacer {
            pacer.wait().await;
        }
        match timeout(self.connect_timeout, TcpStream::connect(target.resolved)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(err)) => Err(ProbeError::Connect(err)),
            Err(_) => Err(ProbeError::ConnectTimeout(self.connect_timeout)),
        }
    }
}
