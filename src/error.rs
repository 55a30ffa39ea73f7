use crate::model::StartTlsKind;
use std::time::Duration;

/// Failures of the plaintext preamble before a TLS handshake can begin.
#[derive(Debug, thiserror::Error)]
pub enum StartTlsError {
    #[error("{protocol}: no greeting before the connection closed")]
    NoGreeting { protocol: StartTlsKind },
    #[error("starttls_not_supported: {protocol} answered {reply:?}")]
    NotSupported { protocol: StartTlsKind, reply: String },
    #[error("{protocol}: connection closed while waiting for {stage}")]
    Closed {
        protocol: StartTlsKind,
        stage: &'static str,
    },
    #[error("{protocol}: timed out waiting for {stage}")]
    Timeout {
        protocol: StartTlsKind,
        stage: &'static str,
    },
    #[error("starttls i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl StartTlsError {
    pub fn is_not_supported(&self) -> bool {
        matches!(self, StartTlsError::NotSupported { .. })
    }
}

/// Failures of a single dial + handshake attempt.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(Duration),
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),
    #[error(transparent)]
    StartTls(#[from] StartTlsError),
    #[error("tls setup failed: {0}")]
    Setup(#[from] openssl::error::ErrorStack),
    #[error("tls handshake failed: {0}")]
    Handshake(#[from] openssl::ssl::Error),
    #[error("tls handshake timed out after {0:?}")]
    HandshakeTimeout(Duration),
}
