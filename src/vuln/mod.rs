pub mod ccs;
pub mod heartbleed;
pub mod weakkey;

pub use ccs::CcsInjection;
pub use heartbleed::Heartbleed;
pub use weakkey::{WeakKeyChecker, WeakKeyVerdict};

use crate::engine::reader::{read_chunk, Chunk};
use crate::model::Target;
use crate::probe::Dialer;
use crate::protocol::ProtocolVersion;
use crate::records;
use crate::util::contains_subslice;
use serde::Serialize;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

/// Empty polls tolerated while waiting for a probe response.
pub const MAX_IDLE_ITERATIONS: u32 = 3;
/// A response this large can only be leaked memory or a broken state machine.
pub const RESPONSE_THRESHOLD: usize = 1600;
/// Give up on handshakes that never reach ServerHelloDone.
pub const MAX_HANDSHAKE_BYTES: usize = 256 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotVulnerable,
    Vulnerable,
    /// The precondition for the attack is missing.
    NotApplicable,
    Error,
}

/// The records a probe sends once the server has finished its hello flight.
pub trait Injection: Send + Sync {
    fn name(&self) -> &'static str;

    /// Only run when the server echoed the heartbeat extension.
    fn requires_heartbeat(&self) -> bool {
        false
    }

    fn payload(&self, version: ProtocolVersion) -> Vec<u8>;
}

/// How the server's hello flight ended.
#[derive(Debug, PartialEq, Eq)]
pub enum HandshakeScan {
    Complete { heartbeat: bool },
    /// EOF or reset before ServerHelloDone.
    Closed,
    Failed(String),
}

/// Reads the plaintext hello flight until ServerHelloDone, noting whether
/// the heartbeat extension came back.
pub async fn scan_handshake<S: AsyncRead + Unpin>(stream: &mut S, read_timeout: Duration) -> HandshakeScan {
    let mut seen = Vec::new();
    let mut buf = vec![0u8; 4096];
    loop {
        match read_chunk(stream, &mut buf, read_timeout).await {
            Chunk::Data(n) => {
                seen.extend_from_slice(&buf[..n]);
                if contains_subslice(&seen, &records::SERVER_HELLO_DONE) {
                    return HandshakeScan::Complete {
                        heartbeat: contains_subslice(&seen, &records::HEARTBEAT_EXTENSION),
                    };
                }
                if seen.len() > MAX_HANDSHAKE_BYTES {
                    return HandshakeScan::Failed(format!(
                        "no ServerHelloDone within {MAX_HANDSHAKE_BYTES} bytes"
                    ));
                }
            }
            Chunk::Closed => return HandshakeScan::Closed,
            Chunk::Failed(err) if is_peer_close(err.kind()) => return HandshakeScan::Closed,
            Chunk::Failed(err) => return HandshakeScan::Failed(err.to_string()),
            Chunk::Idle => return HandshakeScan::Failed("timed out waiting for ServerHelloDone".into()),
        }
    }
}

fn is_peer_close(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof
    )
}

/// Drains the response to an injection, polling every `poll` until
/// [`MAX_IDLE_ITERATIONS`] consecutive empty polls, EOF, an error, or
/// [`RESPONSE_THRESHOLD`] bytes. Returns the byte count.
pub async fn accumulate<S: AsyncRead + Unpin>(stream: &mut S, poll: Duration) -> usize {
    let mut total = 0usize;
    let mut idle = 0u32;
    let mut buf = vec![0u8; 4096];
    while idle < MAX_IDLE_ITERATIONS && total < RESPONSE_THRESHOLD {
        match read_chunk(stream, &mut buf, poll).await {
            Chunk::Data(n) => {
                total += n;
                idle = 0;
            }
            Chunk::Idle => idle += 1,
            Chunk::Closed | Chunk::Failed(_) => break,
        }
    }
    total
}

/// Shared dial → hello → inject → measure sequence behind the Heartbleed
/// and CCS probes.
#[derive(Clone)]
pub struct ProbeHarness {
    dialer: Dialer,
    read_timeout: Duration,
    poll_interval: Duration,
}

impl ProbeHarness {
    pub fn new(dialer: Dialer, read_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            dialer,
            read_timeout,
            poll_interval,
        }
    }

    #[instrument(skip_all, fields(target = %target.resolved, probe = injection.name()))]
    pub async fn run(&self, target: &Target, version: ProtocolVersion, injection: &dyn Injection) -> Verdict {
        let mut stream = match self.dialer.connect(target).await {
            Ok(stream) => stream,
            Err(err) => {
                debug!(error = %err, "probe dial failed");
                return Verdict::Error;
            }
        };
        let verdict = self.probe(&mut stream, version, injection).await;
        debug!(verdict = ?verdict, "probe finished");
        verdict
    }

    /// Everything after the dial, over any byte stream.
    pub async fn probe<S: AsyncRead + AsyncWrite + Unpin>(
        &self,
        stream: &mut S,
        version: ProtocolVersion,
        injection: &dyn Injection,
    ) -> Verdict {
        let version = version.capped_for_records();
        let hello = records::client_hello(version, &records::random_nonce());
        if let Err(err) = stream.write_all(&hello).await {
            debug!(error = %err, "client hello not sent");
            return Verdict::Error;
        }

        match scan_handshake(stream, self.read_timeout).await {
            HandshakeScan::Complete { heartbeat } => {
                if injection.requires_heartbeat() && !heartbeat {
                    return Verdict::NotApplicable;
                }
            }
            HandshakeScan::Closed => return Verdict::NotVulnerable,
            HandshakeScan::Failed(reason) => {
                debug!(reason = %reason, "handshake scan failed");
                return Verdict::Error;
            }
        }

        if let Err(err) = stream.write_all(&injection.payload(version)).await {
            if is_peer_close(err.kind()) {
                return Verdict::NotVulnerable;
            }
            debug!(error = %err, "injection not sent");
            return Verdict::Error;
        }

        let received = accumulate(stream, self.poll_interval).await;
        debug!(received, "injection response");
        if received >= RESPONSE_THRESHOLD {
            Verdict::Vulnerable
        } else {
            Verdict::NotVulnerable
        }
    }
}
