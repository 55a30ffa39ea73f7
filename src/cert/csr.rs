use super::{NameFields, PublicKeyInfo};
use anyhow::Context;
use openssl::x509::{X509Req, X509ReqRef};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrExtensions {
    pub subject_alternative_names: Vec<String>,
}

/// Flat record of a certificate signing request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrData {
    pub extensions: CsrExtensions,
    pub key_type: String,
    pub signature_algorithm: String,
    pub subject: NameFields,
    pub version: i32,
}

impl CsrData {
    pub fn parse(req: &X509ReqRef) -> anyhow::Result<Self> {
        let key = req.public_key().context("unreadable public key")?;
        let text = req.to_text().context("unable to render csr")?;
        let text = String::from_utf8_lossy(&text);
        Ok(Self {
            extensions: CsrExtensions {
                subject_alternative_names: requested_dns_names(&text),
            },
            key_type: PublicKeyInfo::from_pkey(&key).label(),
            signature_algorithm: signature_algorithm(&text).unwrap_or_default(),
            subject: NameFields::from_name(req.subject_name()),
            version: req.version(),
        })
    }

    /// Parses the first PEM signing request in `pem`.
    pub fn from_pem(pem: &[u8]) -> anyhow::Result<Self> {
        if pem.iter().all(u8::is_ascii_whitespace) {
            anyhow::bail!("no data received");
        }
        let req = X509Req::from_pem(pem).context("unable to parse csr")?;
        Self::parse(&req)
    }
}

// OpenSSL exposes neither the request signature algorithm nor decoded
// requested extensions, so both are read from the printed form.
fn signature_algorithm(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.trim().strip_prefix("Signature Algorithm:"))
        .map(|algorithm| algorithm.trim().to_string())
}

/// DNS entries of the requested subjectAltName extension.
fn requested_dns_names(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    if !lines.any(|line| line.contains("X509v3 Subject Alternative Name")) {
        return Vec::new();
    }
    lines
        .next()
        .map(|entries| {
            entries
                .split(',')
                .filter_map(|entry| entry.trim().strip_prefix("DNS:"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
