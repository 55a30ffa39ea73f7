use crate::ciphers::ssl2_name;
use crate::engine::reader::BoundedReader;
use crate::model::Target;
use crate::probe::Dialer;
use crate::records;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Replies shorter than this cannot carry a certificate, so the server
/// did not really speak SSLv2.
pub const MIN_SERVER_HELLO: usize = 200;

const MAX_REPLY: usize = 16 * 1024;

/// Raw-socket SSLv2 check; modern TLS stacks cannot speak it.
#[derive(Clone)]
pub struct Sslv2Detector {
    dialer: Dialer,
    read_timeout: Duration,
}

impl Sslv2Detector {
    /// `dialer` should already carry the (longer) SSLv2 connect timeout.
    pub fn new(dialer: Dialer, read_timeout: Duration) -> Self {
        Self {
            dialer,
            read_timeout,
        }
    }

    /// Cipher kind names the server offered, in wire order. Empty when
    /// SSLv2 is unsupported or anything goes wrong.
    pub async fn detect(&self, target: &Target) -> Vec<String> {
        let mut stream = match self.dialer.connect(target).await {
            Ok(stream) => stream,
            Err(err) => {
                debug!(target = %target.resolved, error = %err, "sslv2 dial failed");
                return Vec::new();
            }
        };
        if let Err(err) = stream.write_all(&records::sslv2_client_hello()).await {
            debug!(target = %target.resolved, error = %err, "sslv2 hello not sent");
            return Vec::new();
        }

        let mut reader = BoundedReader::new(MAX_REPLY, self.read_timeout);
        let reply = match reader.read(&mut stream, None).await {
            Ok(result) => result.bytes,
            Err(err) => {
                debug!(target = %target.resolved, error = %err, "sslv2 reply unreadable");
                return Vec::new();
            }
        };
        if reply.len() < MIN_SERVER_HELLO {
            debug!(target = %target.resolved, bytes = reply.len(), "sslv2 not supported");
            return Vec::new();
        }
        decode_cipher_specs(&reply)
    }
}

/// Pulls the 3-byte cipher kinds out of a SERVER-HELLO. The cipher spec
/// list sits right before the 16-byte connection id; its length is at
/// offset 9. Unknown codes are skipped.
pub fn decode_cipher_specs(reply: &[u8]) -> Vec<String> {
    if reply.len() < 11 {
        return Vec::new();
    }
    let spec_len = u16::from_be_bytes([reply[9], reply[10]]) as usize;
    let Some(end) = reply.len().checked_sub(16) else {
        return Vec::new();
    };
    let Some(start) = end.checked_sub(spec_len) else {
        return Vec::new();
    };
    if start < 11 {
        return Vec::new();
    }

    reply[start..end]
        .chunks_exact(3)
        .filter_map(|code| ssl2_name([code[0], code[1], code[2]]))
        .map(String::from)
        .collect()
}
