pub mod csr;
pub mod status;

pub use csr::CsrData;
pub use status::{CertStatus, RevocationChecker, RevocationStatus};

use crate::ciphers::KeyType;
use crate::util::hex;
use anyhow::Context;
use chrono::NaiveDateTime;
use openssl::asn1::Asn1TimeRef;
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{Id, PKeyRef, Public};
use openssl::stack::Stack;
use openssl::x509::store::{X509Store, X509StoreBuilder};
use openssl::x509::{X509NameRef, X509Ref, X509StoreContext, X509};
use serde::Serialize;
use std::net::IpAddr;
use std::sync::OnceLock;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

impl NameFields {
    fn from_name(name: &X509NameRef) -> Self {
        let field = |nid: Nid| {
            name.entries_by_nid(nid)
                .next()
                .and_then(|entry| entry.data().to_string().ok())
        };
        Self {
            common_name: field(Nid::COMMONNAME),
            country_name: field(Nid::COUNTRYNAME),
            locality_name: field(Nid::LOCALITYNAME),
            organization_name: field(Nid::ORGANIZATIONNAME),
            organizational_unit_name: field(Nid::ORGANIZATIONALUNITNAME),
            state_or_province_name: field(Nid::STATEORPROVINCENAME),
            serial_number: field(Nid::SERIALNUMBER),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityInfo {
    pub ca_issuers: Vec<String>,
    pub ocsp: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fingerprints {
    pub sha1: String,
    pub sha256: String,
}

/// Flat record of one certificate in the served chain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertData {
    pub subject: NameFields,
    pub issuer: NameFields,
    /// e.g. "RSA-2048", "ECDSA-256".
    pub key_type: String,
    pub serial_number: String,
    pub signature_algorithm: String,
    pub fingerprints: Fingerprints,
    pub subject_alternative_names: Vec<String>,
    pub authority_information_access: AuthorityInfo,
    pub crl_distribution_points: Vec<String>,
    pub valid_from: String,
    pub valid_to: String,
    pub is_ca: bool,
    pub status: CertStatus,
}

impl CertData {
    pub fn parse(cert: &X509Ref) -> anyhow::Result<Self> {
        let key = PublicKeyInfo::from_cert(cert);
        Ok(Self {
            subject: NameFields::from_name(cert.subject_name()),
            issuer: NameFields::from_name(cert.issuer_name()),
            key_type: key.label(),
            serial_number: serial_hex(cert).context("unreadable serial number")?,
            signature_algorithm: cert.signature_algorithm().object().to_string(),
            fingerprints: Fingerprints {
                sha1: hex::fingerprint(&cert.digest(MessageDigest::sha1())?),
                sha256: hex::fingerprint(&cert.digest(MessageDigest::sha256())?),
            },
            subject_alternative_names: subject_alt_names(cert),
            authority_information_access: authority_info(cert),
            crl_distribution_points: crl_distribution_points(cert),
            valid_from: render_time(cert.not_before()),
            valid_to: render_time(cert.not_after()),
            is_ca: is_ca(cert),
            status: CertStatus::default(),
        })
    }

    /// Parses the first PEM certificate in `pem`.
    pub fn from_pem(pem: &[u8]) -> anyhow::Result<Self> {
        if pem.iter().all(u8::is_ascii_whitespace) {
            anyhow::bail!("no data received");
        }
        let cert = X509::from_pem(pem).context("unable to parse certificate")?;
        Self::parse(&cert)
    }
}

/// Public key of a certificate, as far as the scanner cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyInfo {
    Rsa { bits: u32, modulus_hex: String },
    Ecdsa { bits: u32 },
    Dsa { bits: u32 },
    Other,
}

impl PublicKeyInfo {
    pub fn from_cert(cert: &X509Ref) -> Self {
        match cert.public_key() {
            Ok(key) => Self::from_pkey(&key),
            Err(_) => PublicKeyInfo::Other,
        }
    }

    pub fn from_pkey(key: &PKeyRef<Public>) -> Self {
        match key.id() {
            Id::RSA => match key.rsa() {
                Ok(rsa) => PublicKeyInfo::Rsa {
                    bits: rsa.size() * 8,
                    modulus_hex: rsa
                        .n()
                        .to_hex_str()
                        .map(|hex| hex.to_string())
                        .unwrap_or_default(),
                },
                Err(_) => PublicKeyInfo::Other,
            },
            Id::EC => PublicKeyInfo::Ecdsa { bits: key.bits() },
            Id::DSA => PublicKeyInfo::Dsa { bits: key.bits() },
            _ => PublicKeyInfo::Other,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKeyInfo::Rsa { .. } => KeyType::Rsa,
            PublicKeyInfo::Ecdsa { .. } => KeyType::Ecdsa,
            PublicKeyInfo::Dsa { .. } => KeyType::Dsa,
            PublicKeyInfo::Other => KeyType::Other,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PublicKeyInfo::Rsa { bits, .. } => format!("RSA-{bits}"),
            PublicKeyInfo::Ecdsa { bits } => format!("ECDSA-{bits}"),
            PublicKeyInfo::Dsa { bits } => format!("DSA-{bits}"),
            PublicKeyInfo::Other => "unknown".to_string(),
        }
    }
}

/// Uppercase hex, left-padded to an even number of digits.
pub fn serial_hex(cert: &X509Ref) -> Result<String, ErrorStack> {
    let hex = cert.serial_number().to_bn()?.to_hex_str()?.to_string();
    Ok(if hex.len() % 2 == 1 { format!("0{hex}") } else { hex })
}

fn subject_alt_names(cert: &X509Ref) -> Vec<String> {
    let Some(names) = cert.subject_alt_names() else {
        return Vec::new();
    };
    names
        .iter()
        .filter_map(|name| {
            name.dnsname()
                .map(str::to_string)
                .or_else(|| name.ipaddress().and_then(ip_from_bytes).map(|ip| ip.to_string()))
        })
        .collect()
}

fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => <[u8; 4]>::try_from(bytes).ok().map(IpAddr::from),
        16 => <[u8; 16]>::try_from(bytes).ok().map(IpAddr::from),
        _ => None,
    }
}

fn authority_info(cert: &X509Ref) -> AuthorityInfo {
    let mut info = AuthorityInfo::default();
    let Some(access) = cert.authority_info() else {
        return info;
    };
    for desc in access.iter() {
        let Some(uri) = desc.location().uri() else {
            continue;
        };
        match desc.method().nid() {
            Nid::AD_OCSP => info.ocsp.push(uri.to_string()),
            Nid::AD_CA_ISSUERS => info.ca_issuers.push(uri.to_string()),
            _ => {}
        }
    }
    info
}

fn crl_distribution_points(cert: &X509Ref) -> Vec<String> {
    let Some(points) = cert.crl_distribution_points() else {
        return Vec::new();
    };
    points
        .iter()
        .filter_map(|point| point.distpoint()?.fullname())
        .flat_map(|names| names.iter().filter_map(|name| name.uri().map(str::to_string)))
        .collect()
}

fn is_ca(cert: &X509Ref) -> bool {
    cert.to_text()
        .map(|text| String::from_utf8_lossy(&text).contains("CA:TRUE"))
        .unwrap_or(false)
}

/// RFC 3339 when OpenSSL's rendering parses, the raw rendering otherwise.
fn render_time(time: &Asn1TimeRef) -> String {
    let raw = time.to_string();
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, "%b %d %H:%M:%S %Y GMT")
        .map(|parsed| parsed.and_utc().to_rfc3339())
        .unwrap_or(raw)
}

/// SAN DNS/IP entries, or the subject CN when there are none. A wildcard
/// covers exactly one left-most label.
pub fn hostname_matches(cert: &X509Ref, host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let host_ip = host.parse::<IpAddr>().ok();

    if let Some(names) = cert.subject_alt_names() {
        if !names.is_empty() {
            return names.iter().any(|name| {
                if let Some(dns) = name.dnsname() {
                    host_ip.is_none() && dns_matches(dns, &host)
                } else if let Some(ip) = name.ipaddress().and_then(ip_from_bytes) {
                    host_ip == Some(ip)
                } else {
                    false
                }
            });
        }
    }

    NameFields::from_name(cert.subject_name())
        .common_name
        .is_some_and(|cn| dns_matches(&cn, &host))
}

fn dns_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.trim_end_matches('.').to_ascii_lowercase();
    match pattern.strip_prefix("*.") {
        Some(suffix) => host
            .split_once('.')
            .is_some_and(|(label, rest)| !label.is_empty() && rest == suffix),
        None => pattern == host,
    }
}

/// Chain verifies against the system trust store (intermediates from the
/// served chain) and the leaf covers `host`.
pub fn chain_trusted(chain: &[X509], host: &str) -> anyhow::Result<bool> {
    let Some((leaf, intermediates)) = chain.split_first() else {
        return Ok(false);
    };
    let store = trust_store()?;
    let mut untrusted: Stack<X509> = Stack::new()?;
    for cert in intermediates {
        untrusted.push(cert.clone())?;
    }

    let mut ctx = X509StoreContext::new()?;
    let verified = ctx.init(store, leaf, &untrusted, |c| {
        let ok = c.verify_cert()?;
        if !ok {
            debug!(error = %c.error(), "chain verification failed");
        }
        Ok(ok)
    })?;
    Ok(verified && hostname_matches(leaf, host))
}

fn trust_store() -> anyhow::Result<&'static X509Store> {
    static STORE: OnceLock<Result<X509Store, ErrorStack>> = OnceLock::new();

    STORE
        .get_or_init(|| {
            let mut builder = X509StoreBuilder::new()?;
            builder.set_default_paths()?;
            Ok(builder.build())
        })
        .as_ref()
        .map_err(|err| anyhow::anyhow!("failed to load trust store: {err}"))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn parses_subject_key_and_serial() {
        let key = rsa_key(2048);
        let cert = self_signed(&key, "scan.example.test", &["scan.example.test", "10.0.0.1"]);
        let data = CertData::parse(&cert).unwrap();

        assert_eq!(data.subject.common_name.as_deref(), Some("scan.example.test"));
        assert_eq!(data.subject.country_name.as_deref(), Some("DE"));
        assert_eq!(data.issuer.organization_name.as_deref(), Some("Scanner Tests"));
        assert_eq!(data.key_type, "RSA-2048");
        assert_eq!(data.serial_number, "0ABC");
        assert_eq!(data.subject_alternative_names, vec!["scan.example.test", "10.0.0.1"]);
        assert_eq!(data.fingerprints.sha1.len(), 20 * 3 - 1);
        assert_eq!(data.fingerprints.sha256.len(), 32 * 3 - 1);
        assert!(data.valid_to.ends_with("+00:00"), "{}", data.valid_to);
        assert!(data.signature_algorithm.contains("sha256"), "{}", data.signature_algorithm);
    }

    #[test]
    fn name_fields_keep_interior_nul() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "evil.example\0.attacker.test", &[]);
        let data = CertData::parse(&cert).unwrap();
        assert_eq!(data.subject.common_name.as_deref(), Some("evil.example\0.attacker.test"));
    }

    #[test]
    fn pem_certificates_parse_or_explain() {
        let key = rsa_key(1024);
        let pem = self_signed(&key, "pem.example.test", &["pem.example.test"]).to_pem().unwrap();
        let data = CertData::from_pem(&pem).unwrap();
        assert_eq!(data.subject.common_name.as_deref(), Some("pem.example.test"));
        assert_eq!(data.subject_alternative_names, vec!["pem.example.test"]);

        assert_eq!(CertData::from_pem(b"").unwrap_err().to_string(), "no data received");
        assert_eq!(
            CertData::from_pem(b"not a certificate").unwrap_err().to_string(),
            "unable to parse certificate"
        );
    }

    #[test]
    fn rsa_keys_expose_modulus() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "a", &[]);
        match PublicKeyInfo::from_cert(&cert) {
            PublicKeyInfo::Rsa { bits, modulus_hex } => {
                assert_eq!(bits, 1024);
                assert_eq!(modulus_hex.len(), 256);
                assert_eq!(modulus_hex, modulus_hex.to_uppercase());
            }
            other => panic!("unexpected key {other:?}"),
        }
        assert_eq!(PublicKeyInfo::from_cert(&cert).key_type(), KeyType::Rsa);
    }

    #[test]
    fn wildcards_cover_one_label() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "ignored.example", &["*.example.com", "192.0.2.7"]);
        assert!(hostname_matches(&cert, "www.example.com"));
        assert!(hostname_matches(&cert, "WWW.Example.com."));
        assert!(!hostname_matches(&cert, "example.com"));
        assert!(!hostname_matches(&cert, "a.b.example.com"));
        assert!(hostname_matches(&cert, "192.0.2.7"));
        assert!(!hostname_matches(&cert, "ignored.example"));
    }

    #[test]
    fn common_name_used_without_sans() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "legacy.example", &[]);
        assert!(hostname_matches(&cert, "legacy.example"));
        assert!(!hostname_matches(&cert, "other.example"));
    }

    #[test]
    fn self_signed_chain_is_untrusted() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "localhost", &["localhost"]);
        assert!(!chain_trusted(&[cert], "localhost").unwrap());
        assert!(!chain_trusted(&[], "localhost").unwrap());
    }
}
