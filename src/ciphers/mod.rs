mod table;

pub use table::{CIPHER_SUITES, SSL2_CIPHERS};

use crate::protocol::ProtocolVersion;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyExchange {
    Rsa,
    Dh,
    Dhe,
    Ecdh,
    Ecdhe,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Authentication {
    Rsa,
    Ecdsa,
    Dss,
    None,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulkCipher {
    Aes,
    AesGcm,
    ChaCha20Poly1305,
    Camellia,
    Seed,
    Idea,
    Rc4,
    Rc2,
    TripleDes,
    Des,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mac {
    Aead,
    Md5,
    Sha1,
    Sha256,
    Sha384,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Encryption {
    pub cipher: BulkCipher,
    pub bits: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CipherSuite {
    pub code: u16,
    pub name: &'static str,
    pub openssl_name: &'static str,
    pub min_version: ProtocolVersion,
    pub kx: KeyExchange,
    pub auth: Authentication,
    pub enc: Encryption,
    pub mac: Mac,
}

impl CipherSuite {
    pub fn is_aead(&self) -> bool {
        self.mac == Mac::Aead
    }

    pub fn is_tls13(&self) -> bool {
        self.min_version == ProtocolVersion::Tls13
    }

    pub fn is_export(&self) -> bool {
        self.name.contains("EXPORT")
    }
}

/// Key family of the certificate the server presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyType {
    Rsa,
    Ecdsa,
    Dsa,
    Other,
}

impl KeyType {
    fn accepts(self, auth: Authentication) -> bool {
        matches!(
            (self, auth),
            (_, Authentication::None)
                | (_, Authentication::Any)
                | (KeyType::Rsa, Authentication::Rsa)
                | (KeyType::Ecdsa, Authentication::Ecdsa)
                | (KeyType::Dsa, Authentication::Dss)
        )
    }
}

/// Whether a suite is worth a trial handshake at `protocol` against a
/// server presenting a `key` certificate.
pub fn is_eligible(protocol: ProtocolVersion, cipher: &CipherSuite, key: KeyType) -> bool {
    if !key.accepts(cipher.auth) {
        return false;
    }
    if protocol < cipher.min_version {
        return false;
    }
    if cipher.is_aead() && protocol < ProtocolVersion::Tls12 {
        return false;
    }
    // TLS1.3 suites and legacy suites never mix.
    cipher.is_tls13() == (protocol == ProtocolVersion::Tls13)
}

pub fn eligible(protocol: ProtocolVersion, key: KeyType) -> impl Iterator<Item = &'static CipherSuite> {
    CIPHER_SUITES
        .iter()
        .filter(move |c| is_eligible(protocol, c, key))
}

pub fn by_name(name: &str) -> Option<&'static CipherSuite> {
    CIPHER_SUITES
        .iter()
        .find(|c| c.name == name || c.openssl_name == name)
}

/// SSLv2 cipher kinds, keyed by their 3-byte wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ssl2Cipher {
    pub code: [u8; 3],
    pub name: &'static str,
}

pub fn ssl2_name(code: [u8; 3]) -> Option<&'static str> {
    SSL2_CIPHERS.iter().find(|c| c.code == code).map(|c| c.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProtocolVersion::*;

    fn suite(name: &str) -> &'static CipherSuite {
        by_name(name).unwrap()
    }

    #[test]
    fn table_has_unique_codes() {
        let mut codes: Vec<u16> = CIPHER_SUITES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CIPHER_SUITES.len());
        assert!(CIPHER_SUITES.len() > 100);
    }

    #[test]
    fn eligibility_truth_table() {
        let gcm_rsa = suite("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256");
        let gcm_ecdsa = suite("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256");
        let cbc_rsa = suite("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA");
        let cbc_ecdsa = suite("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA");
        let tls13 = suite("TLS_AES_128_GCM_SHA256");
        let export_rsa = suite("TLS_RSA_EXPORT_WITH_RC4_40_MD5");

        // (key, protocol, cipher, expected)
        let cases = [
            (KeyType::Rsa, Tls10, gcm_rsa, false),
            (KeyType::Rsa, Tls11, gcm_rsa, false),
            (KeyType::Rsa, Tls12, gcm_rsa, true),
            (KeyType::Rsa, Tls13, gcm_rsa, false),
            (KeyType::Rsa, Tls10, cbc_rsa, true),
            (KeyType::Rsa, Tls11, cbc_rsa, true),
            (KeyType::Rsa, Tls12, cbc_rsa, true),
            (KeyType::Rsa, Tls13, cbc_rsa, false),
            (KeyType::Rsa, Tls10, tls13, false),
            (KeyType::Rsa, Tls11, tls13, false),
            (KeyType::Rsa, Tls12, tls13, false),
            (KeyType::Rsa, Tls13, tls13, true),
            (KeyType::Rsa, Tls10, export_rsa, true),
            (KeyType::Rsa, Tls11, export_rsa, true),
            (KeyType::Rsa, Tls12, export_rsa, true),
            (KeyType::Rsa, Tls13, export_rsa, false),
            (KeyType::Rsa, Tls12, gcm_ecdsa, false),
            (KeyType::Rsa, Tls10, cbc_ecdsa, false),
            (KeyType::Ecdsa, Tls10, gcm_ecdsa, false),
            (KeyType::Ecdsa, Tls11, gcm_ecdsa, false),
            (KeyType::Ecdsa, Tls12, gcm_ecdsa, true),
            (KeyType::Ecdsa, Tls13, gcm_ecdsa, false),
            (KeyType::Ecdsa, Tls10, cbc_ecdsa, true),
            (KeyType::Ecdsa, Tls11, cbc_ecdsa, true),
            (KeyType::Ecdsa, Tls12, cbc_ecdsa, true),
            (KeyType::Ecdsa, Tls13, cbc_ecdsa, false),
            (KeyType::Ecdsa, Tls10, tls13, false),
            (KeyType::Ecdsa, Tls11, tls13, false),
            (KeyType::Ecdsa, Tls12, tls13, false),
            (KeyType::Ecdsa, Tls13, tls13, true),
            (KeyType::Ecdsa, Tls10, export_rsa, false),
            (KeyType::Ecdsa, Tls12, export_rsa, false),
            (KeyType::Ecdsa, Tls12, gcm_rsa, false),
            (KeyType::Ecdsa, Tls11, cbc_rsa, false),
        ];

        for (key, protocol, cipher, expected) in cases {
            assert_eq!(
                is_eligible(protocol, cipher, key),
                expected,
                "{key:?} {protocol} {}",
                cipher.name
            );
        }
    }

    #[test]
    fn anonymous_suites_pass_any_key() {
        let anon = suite("TLS_DH_anon_WITH_AES_128_CBC_SHA");
        assert!(is_eligible(Tls12, anon, KeyType::Rsa));
        assert!(is_eligible(Tls12, anon, KeyType::Ecdsa));
        assert!(is_eligible(Tls10, anon, KeyType::Other));
    }

    #[test]
    fn minimum_version_is_respected() {
        let sha256 = suite("TLS_RSA_WITH_AES_128_CBC_SHA256");
        assert!(!is_eligible(Tls11, sha256, KeyType::Rsa));
        assert!(is_eligible(Tls12, sha256, KeyType::Rsa));
    }

    #[test]
    fn tls13_round_only_offers_tls13_suites() {
        let names: Vec<_> = eligible(Tls13, KeyType::Rsa).map(|c| c.name).collect();
        assert!(!names.is_empty());
        assert!(names.iter().all(|n| n.starts_with("TLS_AES") || n.starts_with("TLS_CHACHA20")));
    }

    #[test]
    fn dss_suites_follow_dsa_keys() {
        let dss = suite("TLS_DHE_DSS_WITH_AES_128_CBC_SHA");
        assert!(is_eligible(Tls10, dss, KeyType::Dsa));
        assert!(!is_eligible(Tls10, dss, KeyType::Rsa));
    }

    #[test]
    fn resolves_ssl2_codes() {
        assert_eq!(ssl2_name([0x03, 0x00, 0x80]), Some("SSL2_RC2_128_CBC_WITH_MD5"));
        assert_eq!(ssl2_name([0x09, 0x00, 0x80]), None);
    }
}
