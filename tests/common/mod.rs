#![allow(dead_code)]

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::ssl::{Ssl, SslAcceptor, SslContext, SslMethod, SslOptions, SslVersion};
use openssl::x509::extension::SubjectAlternativeName;
use openssl::x509::{X509NameBuilder, X509};
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;
use tls_scanner::model::{Target, TargetSpec};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_openssl::SslStream;

pub const SERVER_HEADER: &str = "test-tls";

/// Self-signed RSA certificate for `localhost`.
pub fn identity() -> (PKey<Private>, X509) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "localhost").unwrap();
    name.append_entry_by_text("O", "Scanner Tests").unwrap();
    let name = name.build();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(0x1234).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    builder.set_not_after(&Asn1Time::days_from_now(30).unwrap()).unwrap();
    let san = SubjectAlternativeName::new()
        .dns("localhost")
        .build(&builder.x509v3_context(None, None))
        .unwrap();
    builder.append_extension(san).unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();
    (key, builder.build())
}

fn context(min: SslVersion, max: SslVersion) -> SslContext {
    let (key, cert) = identity();
    let mut acceptor = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls_server()).unwrap();
    acceptor.set_private_key(&key).unwrap();
    acceptor.set_certificate(&cert).unwrap();
    acceptor.clear_options(SslOptions::NO_TLSV1 | SslOptions::NO_TLSV1_1);
    acceptor.set_cipher_list("ALL:@SECLEVEL=0").unwrap();
    acceptor.set_min_proto_version(Some(min)).unwrap();
    acceptor.set_max_proto_version(Some(max)).unwrap();
    acceptor.build().into_context()
}

/// TLS server on loopback accepting `min..=max`. Completed handshakes get a
/// minimal HTTP response carrying [`SERVER_HEADER`].
pub async fn spawn_tls_server(min: SslVersion, max: SslVersion) -> SocketAddr {
    let ctx = context(min, max);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((tcp, _)) = listener.accept().await else {
                return;
            };
            let Ok(ssl) = Ssl::new(&ctx) else {
                continue;
            };
            tokio::spawn(async move {
                let Ok(mut stream) = SslStream::new(ssl, tcp) else {
                    return;
                };
                let accepted = tokio::time::timeout(Duration::from_secs(5), Pin::new(&mut stream).accept()).await;
                if !matches!(accepted, Ok(Ok(()))) {
                    return;
                }
                let mut buf = [0u8; 1024];
                if let Ok(Ok(n)) = tokio::time::timeout(Duration::from_secs(2), stream.read(&mut buf)).await {
                    if n > 0 {
                        let response = format!("HTTP/1.0 200 OK\r\nServer: {SERVER_HEADER}\r\nContent-Length: 0\r\n\r\n");
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                }
            });
        }
    });

    addr
}

pub fn target(addr: SocketAddr) -> Target {
    Target {
        original: TargetSpec {
            host: "localhost".into(),
            port: addr.port(),
        },
        resolved: addr,
    }
}

/// A loopback port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
