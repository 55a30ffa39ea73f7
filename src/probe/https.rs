use super::Dialer;
use crate::engine::reader::BoundedReader;
use crate::model::Target;
use crate::util::sanitize_text;
use anyhow::{anyhow, Context};
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_openssl::SslStream;
use tracing::debug;

const MAX_HEADER_BYTES: usize = 16 * 1024;

/// `Server` header for TLS-first services, the first banner line otherwise.
pub async fn server_header(dialer: &Dialer, target: &Target, read_timeout: Duration) -> Option<String> {
    let result = if target.service().wants_http_header() {
        http_server_header(dialer, target, read_timeout).await
    } else {
        plaintext_banner(dialer, target, read_timeout).await
    };
    match result {
        Ok(header) => header.filter(|h| !h.is_empty()),
        Err(err) => {
            debug!(target = %target.resolved, error = %err, "server header unavailable");
            None
        }
    }
}

async fn http_server_header(
    dialer: &Dialer,
    target: &Target,
    read_timeout: Duration,
) -> anyhow::Result<Option<String>> {
    let connector = header_connector()?;
    let host = target.server_name();
    let tcp = dialer.connect(target).await?;

    let ssl = connector
        .configure()
        .context("failed to configure TLS connector")?
        .verify_hostname(false)
        .into_ssl(&host)
        .context("failed to configure TLS SNI")?;
    let mut tls_stream = SslStream::new(ssl, tcp).context("failed to initialize TLS stream")?;
    tokio::time::timeout(read_timeout, Pin::new(&mut tls_stream).connect())
        .await
        .map_err(|_| anyhow!("TLS handshake timed out"))?
        .with_context(|| format!("TLS handshake failed for host {host}"))?;

    let request = format!("GET / HTTP/1.0\r\nHost: {host}\r\nUser-Agent: tls-scanner\r\n\r\n");
    tls_stream
        .write_all(request.as_bytes())
        .await
        .context("failed to write HTTPS request")?;

    let mut reader = BoundedReader::new(MAX_HEADER_BYTES, read_timeout);
    let result = reader.read(&mut tls_stream, Some(b"\r\n\r\n")).await?;
    Ok(header_value(&result.bytes, "server"))
}

async fn plaintext_banner(
    dialer: &Dialer,
    target: &Target,
    read_timeout: Duration,
) -> anyhow::Result<Option<String>> {
    let mut stream = dialer.connect_plain(target).await?;
    let mut reader = BoundedReader::new(1024, read_timeout);
    let result = reader.read(&mut stream, Some(b"\n")).await?;
    Ok(Some(sanitize_text(&result.bytes).trim().to_string()))
}

/// Value of the first header named `name` (case-insensitive).
fn header_value(bytes: &[u8], name: &str) -> Option<String> {
    let end = find_header_end(bytes).unwrap_or(bytes.len());
    bytes[..end]
        .split(|b| *b == b'\n')
        .skip(1)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .take_while(|line| !line.is_empty())
        .find_map(|line| {
            let colon = line.iter().position(|b| *b == b':')?;
            let (key, value) = line.split_at(colon);
            key.eq_ignore_ascii_case(name.as_bytes())
                .then(|| sanitize_text(&value[1..]).trim().to_string())
        })
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn header_connector() -> anyhow::Result<&'static SslConnector> {
    static CONNECTOR: OnceLock<anyhow::Result<SslConnector>> = OnceLock::new();

    CONNECTOR
        .get_or_init(|| {
            let mut builder = SslConnector::builder(SslMethod::tls()).map_err(|e| anyhow!(e))?;
            // Only the response headers matter here, so accept any certificate.
            builder.set_verify(SslVerifyMode::NONE);
            builder
                .set_cipher_list("ALL:@SECLEVEL=0")
                .map_err(|e| anyhow!(e))?;
            Ok(builder.build())
        })
        .as_ref()
        .map_err(|err| anyhow!("failed to create TLS connector: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_server_header() {
        let resp = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nserver: nginx/1.25.3\r\n\r\nServer: body";
        assert_eq!(header_value(resp, "Server").as_deref(), Some("nginx/1.25.3"));
    }

    #[test]
    fn missing_header_is_none() {
        let resp = b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n";
        assert_eq!(header_value(resp, "server"), None);
    }

    #[test]
    fn finds_header_end_with_body() {
        let resp = b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\nBody";
        assert_eq!(find_header_end(resp), Some(38));
    }
}
