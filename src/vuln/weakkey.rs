use crate::util::hex;
use openssl::sha::sha1;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key sizes the Debian blacklists cover.
pub const BLACKLISTED_SIZES: [u32; 4] = [512, 1024, 2048, 4096];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeakKeyVerdict {
    NotVulnerable,
    Vulnerable,
    UncommonKeySize,
    Error,
}

/// Looks RSA moduli up in the Debian OpenSSL (CVE-2008-0166) blacklists,
/// stored as `blacklist.RSA-<bits>` files.
#[derive(Debug, Clone)]
pub struct WeakKeyChecker {
    dir: PathBuf,
}

impl WeakKeyChecker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn check(&self, bits: u32, modulus_hex: &str) -> WeakKeyVerdict {
        if !BLACKLISTED_SIZES.contains(&bits) {
            return WeakKeyVerdict::UncommonKeySize;
        }
        let path = self.dir.join(format!("blacklist.RSA-{bits}"));
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "weak key blacklist unavailable");
                return WeakKeyVerdict::Error;
            }
        };

        let needle = blacklist_entry(modulus_hex);
        let listed = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .any(|line| line == needle);
        debug!(bits, listed, "weak key lookup");
        if listed {
            WeakKeyVerdict::Vulnerable
        } else {
            WeakKeyVerdict::NotVulnerable
        }
    }
}

/// Last 20 hex digits of SHA-1 over `Modulus=<HEX>\n`, the blacklist line format.
pub fn blacklist_entry(modulus_hex: &str) -> String {
    let line = format!("Modulus={}\n", modulus_hex.to_uppercase());
    let digest = hex::encode(&sha1(line.as_bytes()));
    digest[20..].to_string()
}
