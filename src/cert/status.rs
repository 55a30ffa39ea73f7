use anyhow::{bail, Context};
use openssl::asn1::Asn1Time;
use openssl::hash::MessageDigest;
use openssl::ocsp::{OcspCertId, OcspCertStatus, OcspRequest, OcspResponse, OcspResponseStatus};
use openssl::x509::{CrlStatus, X509Crl, X509Ref, X509};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Clock skew tolerated when judging OCSP freshness.
const OCSP_SKEW_SECS: u32 = 300;
/// Largest OCSP response, CRL or issuer certificate accepted.
const MAX_HTTP_RESPONSE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevocationStatus {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "revoked")]
    Revoked,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "crl_expired")]
    CrlExpired,
    #[serde(rename = "ocsp_expired")]
    OcspExpired,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "malformedRequest")]
    MalformedRequest,
    #[serde(rename = "internalError")]
    InternalError,
    #[serde(rename = "tryLater")]
    TryLater,
    #[serde(rename = "sigRequired")]
    SigRequired,
    #[serde(rename = "unauthorized")]
    Unauthorized,
}

impl RevocationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RevocationStatus::Good => "good",
            RevocationStatus::Revoked => "revoked",
            RevocationStatus::Unknown => "unknown",
            RevocationStatus::CrlExpired => "crl_expired",
            RevocationStatus::OcspExpired => "ocsp_expired",
            RevocationStatus::Error => "error",
            RevocationStatus::MalformedRequest => "malformedRequest",
            RevocationStatus::InternalError => "internalError",
            RevocationStatus::TryLater => "tryLater",
            RevocationStatus::SigRequired => "sigRequired",
            RevocationStatus::Unauthorized => "unauthorized",
        }
    }

    fn from_responder(status: OcspResponseStatus) -> Self {
        [
            (OcspResponseStatus::MALFORMED_REQUEST, RevocationStatus::MalformedRequest),
            (OcspResponseStatus::INTERNAL_ERROR, RevocationStatus::InternalError),
            (OcspResponseStatus::TRY_LATER, RevocationStatus::TryLater),
            (OcspResponseStatus::SIG_REQUIRED, RevocationStatus::SigRequired),
            (OcspResponseStatus::UNAUTHORIZED, RevocationStatus::Unauthorized),
        ]
        .into_iter()
        .find_map(|(code, mapped)| (code == status).then_some(mapped))
        .unwrap_or(RevocationStatus::Error)
    }
}

impl fmt::Display for RevocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocsp: Option<RevocationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl: Option<RevocationStatus>,
}

/// Interprets a DER OCSP response for `cert`.
pub fn ocsp_status(response_der: &[u8], cert: &X509Ref, issuer: &X509Ref) -> RevocationStatus {
    let response = match OcspResponse::from_der(response_der) {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "unparseable ocsp response");
            return RevocationStatus::Error;
        }
    };
    if response.status() != OcspResponseStatus::SUCCESSFUL {
        return RevocationStatus::from_responder(response.status());
    }

    let Ok(basic) = response.basic() else {
        return RevocationStatus::Error;
    };
    let Ok(id) = OcspCertId::from_cert(MessageDigest::sha1(), cert, issuer) else {
        return RevocationStatus::Error;
    };
    let Some(single) = basic.find_status(&id) else {
        return RevocationStatus::Unknown;
    };
    if single.check_validity(OCSP_SKEW_SECS, None).is_err() {
        return RevocationStatus::OcspExpired;
    }
    if single.status == OcspCertStatus::GOOD {
        RevocationStatus::Good
    } else if single.status == OcspCertStatus::REVOKED {
        RevocationStatus::Revoked
    } else {
        RevocationStatus::Unknown
    }
}

/// Looks `cert` up in a DER or PEM CRL.
pub fn crl_status(crl_bytes: &[u8], cert: &X509Ref) -> RevocationStatus {
    let crl = match X509Crl::from_der(crl_bytes).or_else(|_| X509Crl::from_pem(crl_bytes)) {
        Ok(crl) => crl,
        Err(err) => {
            debug!(error = %err, "unparseable crl");
            return RevocationStatus::Error;
        }
    };

    if let Some(next_update) = crl.next_update() {
        let expired = Asn1Time::days_from_now(0)
            .and_then(|now| next_update.compare(&now))
            .map(|ord| ord == Ordering::Less);
        match expired {
            Ok(true) => return RevocationStatus::CrlExpired,
            Ok(false) => {}
            Err(_) => return RevocationStatus::Error,
        }
    }

    match crl.get_by_serial(cert.serial_number()) {
        CrlStatus::Revoked(_) => RevocationStatus::Revoked,
        CrlStatus::NotRevoked | CrlStatus::RemoveFromCrl(_) => RevocationStatus::Good,
    }
}

/// Across several distribution points the first non-good answer sticks.
fn merge_crl(current: Option<RevocationStatus>, next: RevocationStatus) -> Option<RevocationStatus> {
    match current {
        None | Some(RevocationStatus::Good) => Some(next),
        kept => kept,
    }
}

/// OCSP (stapled or queried) and CRL checks for one chain certificate.
#[derive(Debug, Clone)]
pub struct RevocationChecker {
    network: bool,
    client: reqwest::Client,
}

impl RevocationChecker {
    /// With `network` off only stapled responses are evaluated. `timeout`
    /// bounds each OCSP, CRL or issuer download.
    pub fn new(network: bool, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .user_agent(concat!("tls-scanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build revocation http client")?;
        Ok(Self { network, client })
    }

    pub async fn check(&self, cert: &X509, issuer: Option<&X509>, staple: Option<&[u8]>) -> CertStatus {
        let ocsp = match staple {
            Some(staple) => Some(ocsp_status(staple, cert, issuer.unwrap_or(cert))),
            None if self.network => self.query_ocsp(cert, issuer).await,
            None => None,
        };
        let crl = if self.network { self.check_crls(cert).await } else { None };
        CertStatus { ocsp, crl }
    }

    async fn query_ocsp(&self, cert: &X509, issuer: Option<&X509>) -> Option<RevocationStatus> {
        let aia = super::authority_info(cert);
        let responder = aia.ocsp.first()?;

        let issuer = match issuer {
            Some(issuer) => issuer.clone(),
            None => match self.fetch_issuer(&aia.ca_issuers).await {
                Ok(issuer) => issuer,
                Err(err) => {
                    debug!(error = %err, "issuer unavailable for ocsp request");
                    return Some(RevocationStatus::Error);
                }
            },
        };

        let request = match ocsp_request(cert, &issuer) {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "ocsp request not built");
                return Some(RevocationStatus::Error);
            }
        };
        match self.fetch(responder, Some(("application/ocsp-request", request))).await {
            Ok(body) => Some(ocsp_status(&body, cert, &issuer)),
            Err(err) => {
                debug!(responder = %responder, error = %err, "ocsp query failed");
                Some(RevocationStatus::Error)
            }
        }
    }

    async fn fetch_issuer(&self, urls: &[String]) -> anyhow::Result<X509> {
        let url = urls.first().context("no CA issuers url")?;
        let body = self.fetch(url, None).await?;
        X509::from_der(&body)
            .or_else(|_| X509::from_pem(&body))
            .with_context(|| format!("unparseable issuer certificate from {url}"))
    }

    async fn check_crls(&self, cert: &X509) -> Option<RevocationStatus> {
        let mut status = None;
        for url in super::crl_distribution_points(cert) {
            if !is_http_url(&url) {
                debug!(url = %url, "skipping non-http crl distribution point");
                continue;
            }
            let next = match self.fetch(&url, None).await {
                Ok(body) => crl_status(&body, cert),
                Err(err) => {
                    debug!(url = %url, error = %err, "crl download failed");
                    RevocationStatus::Error
                }
            };
            status = merge_crl(status, next);
        }
        status
    }
}

fn ocsp_request(cert: &X509Ref, issuer: &X509Ref) -> anyhow::Result<Vec<u8>> {
    let id = OcspCertId::from_cert(MessageDigest::sha1(), cert, issuer)?;
    let mut request = OcspRequest::new()?;
    request.add_id(id)?;
    Ok(request.to_der()?)
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

impl RevocationChecker {
    /// GET, or POST when `post` carries (content type, body). Returns the
    /// body of a successful response.
    async fn fetch(&self, url: &str, post: Option<(&str, Vec<u8>)>) -> anyhow::Result<Vec<u8>> {
        let parsed = Url::parse(url).with_context(|| format!("invalid url {url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("unsupported scheme {}", parsed.scheme());
        }

        let request = match post {
            Some((content_type, body)) => self
                .client
                .post(parsed)
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(body),
            None => self.client.get(parsed),
        };
        let response = request
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        if !response.status().is_success() {
            bail!("{url} answered {}", response.status());
        }
        if response
            .content_length()
            .is_some_and(|len| len > MAX_HTTP_RESPONSE as u64)
        {
            bail!("{url} response exceeds {MAX_HTTP_RESPONSE} bytes");
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read body from {url}"))?;
        if body.len() > MAX_HTTP_RESPONSE {
            bail!("{url} response exceeds {MAX_HTTP_RESPONSE} bytes");
        }
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::testing::{rsa_key, self_signed, with_crl_point};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// OCSPResponse carrying only responseStatus = tryLater.
    const TRY_LATER: &[u8] = &[0x30, 0x03, 0x0a, 0x01, 0x03];

    fn checker() -> RevocationChecker {
        RevocationChecker::new(true, Duration::from_secs(2)).unwrap()
    }

    fn request_complete(seen: &[u8]) -> bool {
        let text = String::from_utf8_lossy(seen).to_ascii_lowercase();
        match text.split_once("\r\n\r\n") {
            Some((head, body)) => match head.split("content-length: ").nth(1) {
                Some(rest) => {
                    let len: usize = rest.lines().next().unwrap_or("0").trim().parse().unwrap_or(0);
                    body.len() >= len
                }
                None => true,
            },
            None => false,
        }
    }

    async fn http_server(reply: &'static [u8]) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut seen = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&seen) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&seen).to_string()
        });
        (format!("http://{addr}/ca/crl.der?x=1"), handle)
    }

    #[test]
    fn responder_errors_surface_by_name() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "ocsp.example", &[]);
        assert_eq!(ocsp_status(TRY_LATER, &cert, &cert), RevocationStatus::TryLater);
        assert_eq!(ocsp_status(b"junk", &cert, &cert), RevocationStatus::Error);
        assert_eq!(serde_json::to_string(&RevocationStatus::TryLater).unwrap(), "\"tryLater\"");
    }

    #[test]
    fn garbage_crl_is_error() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "crl.example", &[]);
        assert_eq!(crl_status(b"not a crl", &cert), RevocationStatus::Error);
    }

    #[test]
    fn first_non_good_crl_answer_sticks() {
        let mut status = None;
        for next in [RevocationStatus::Good, RevocationStatus::Revoked, RevocationStatus::Good] {
            status = merge_crl(status, next);
        }
        assert_eq!(status, Some(RevocationStatus::Revoked));
        assert_eq!(merge_crl(Some(RevocationStatus::Error), RevocationStatus::Good), Some(RevocationStatus::Error));
    }

    #[tokio::test]
    async fn offline_checker_only_reads_staples() {
        let key = rsa_key(1024);
        let cert = self_signed(&key, "staple.example", &[]);
        let checker = RevocationChecker::new(false, Duration::from_secs(1)).unwrap();
        assert_eq!(checker.check(&cert, None, None).await, CertStatus::default());
        let stapled = checker.check(&cert, None, Some(TRY_LATER)).await;
        assert_eq!(stapled.ocsp, Some(RevocationStatus::TryLater));
        assert_eq!(stapled.crl, None);
    }

    #[tokio::test]
    async fn fetch_returns_body_of_ok_response() {
        let (url, server) = http_server(b"HTTP/1.0 200 OK\r\nContent-Length: 3\r\n\r\nabc").await;
        let body = checker()
            .fetch(&url, Some(("application/ocsp-request", b"req".to_vec())))
            .await
            .unwrap();
        assert_eq!(body, b"abc");

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("post /ca/crl.der?x=1 http/1.1\r\n"), "{request}");
        assert!(request.contains("content-type: application/ocsp-request\r\n"));
        assert!(request.ends_with("\r\n\r\nreq"));
    }

    #[tokio::test]
    async fn fetch_rejects_errors_and_other_schemes() {
        let (url, _server) = http_server(b"HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n").await;
        let err = checker().fetch(&url, None).await.unwrap_err();
        assert!(err.to_string().contains("404"), "{err}");
        assert!(checker().fetch("ldap://directory/cn=crl", None).await.is_err());
    }

    #[tokio::test]
    async fn https_crl_points_are_fetched() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let key = rsa_key(1024);
        let https = with_crl_point(&key, &format!("https://127.0.0.1:{port}/ca.crl"));
        assert_eq!(checker().check(&https, None, None).await.crl, Some(RevocationStatus::Error));

        let ldap = with_crl_point(&key, "ldap://directory.example/cn=ca");
        assert_eq!(checker().check(&ldap, None, None).await.crl, None);
    }
}
