//! Plaintext preambles that lead up to an in-band TLS upgrade.

use crate::error::StartTlsError;
use crate::model::StartTlsKind;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;
use tracing::debug;

pub const EHLO_NAME: &str = "tls-scanner";

struct Dialogue {
    greeting: Regex,
    request: &'static str,
    ack: Regex,
}

fn dialogue(kind: StartTlsKind) -> &'static Dialogue {
    static DIALOGUES: OnceLock<[Dialogue; 4]> = OnceLock::new();

    let table = DIALOGUES.get_or_init(|| {
        let d = |greeting: &str, request: &'static str, ack: &str| Dialogue {
            greeting: Regex::new(greeting).expect("static greeting pattern"),
            request,
            ack: Regex::new(ack).expect("static ack pattern"),
        };
        [
            d(r"^220 ", "AUTH TLS", r"^234 "),
            d(r"^220 ", "STARTTLS", r"^220 "),
            d(r"^\+OK ", "STLS", r"^\+OK "),
            d(r"^\* ", "a001 STARTTLS", r"^a001 OK "),
        ]
    });

    match kind {
        StartTlsKind::Ftp => &table[0],
        StartTlsKind::Smtp => &table[1],
        StartTlsKind::Pop3 => &table[2],
        StartTlsKind::Imap => &table[3],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitGreeting,
    AwaitEhloAck,
    AwaitUpgradeAck,
    Done,
}

/// Drives one service's STARTTLS exchange; every line read is bounded by
/// `read_timeout`.
#[derive(Debug, Clone)]
pub struct Upgrader {
    read_timeout: Duration,
}

impl Upgrader {
    pub fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }

    /// Returns once the server has acknowledged the upgrade and expects a
    /// ClientHello on `stream`.
    pub async fn upgrade<S>(&self, stream: &mut S, kind: StartTlsKind) -> Result<(), StartTlsError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let dialogue = dialogue(kind);
        let mut reader = BufReader::new(stream);
        let mut state = State::AwaitGreeting;

        while state != State::Done {
            state = match state {
                State::AwaitGreeting => {
                    let line = match self.next_line(&mut reader, kind, "greeting").await {
                        Err(StartTlsError::Closed { .. }) => {
                            return Err(StartTlsError::NoGreeting { protocol: kind })
                        }
                        other => other?,
                    };
                    if !dialogue.greeting.is_match(&line) {
                        continue;
                    }
                    if kind == StartTlsKind::Smtp {
                        send(&mut reader, &format!("EHLO {EHLO_NAME}")).await?;
                        State::AwaitEhloAck
                    } else {
                        send(&mut reader, dialogue.request).await?;
                        State::AwaitUpgradeAck
                    }
                }
                State::AwaitEhloAck => {
                    let line = self.next_line(&mut reader, kind, "EHLO reply").await?;
                    if line.starts_with("250-") {
                        continue;
                    }
                    if !line.starts_with("250") {
                        debug!(protocol = %kind, reply = %line.trim_end(), "unexpected EHLO reply");
                    }
                    send(&mut reader, dialogue.request).await?;
                    State::AwaitUpgradeAck
                }
                State::AwaitUpgradeAck => {
                    let line = self.next_line(&mut reader, kind, "upgrade ack").await?;
                    if !dialogue.ack.is_match(&line) {
                        return Err(StartTlsError::NotSupported {
                            protocol: kind,
                            reply: line.trim_end().to_string(),
                        });
                    }
                    State::Done
                }
                State::Done => State::Done,
            };
        }

        debug!(protocol = %kind, "starttls upgrade acknowledged");
        Ok(())
    }

    async fn next_line<S>(
        &self,
        reader: &mut BufReader<&mut S>,
        kind: StartTlsKind,
        stage: &'static str,
    ) -> Result<String, StartTlsError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut line = String::new();
        match timeout(self.read_timeout, reader.read_line(&mut line)).await {
            Ok(Ok(0)) => Err(StartTlsError::Closed {
                protocol: kind,
                stage,
            }),
            Ok(Ok(_)) => Ok(line),
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(StartTlsError::Timeout {
                protocol: kind,
                stage,
            }),
        }
    }
}

async fn send<S>(reader: &mut BufReader<&mut S>, command: &str) -> Result<(), StartTlsError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let stream = reader.get_mut();
    stream.write_all(format!("{command}\r\n").as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{duplex, AsyncReadExt, DuplexStream};

    /// Plays a scripted server: writes each reply after reading one client line.
    async fn serve(mut server: DuplexStream, greeting: &'static str, replies: Vec<&'static str>) -> Vec<String> {
        let mut seen = Vec::new();
        server.write_all(greeting.as_bytes()).await.unwrap();
        for reply in replies {
            let mut buf = vec![0u8; 256];
            let n = server.read(&mut buf).await.unwrap();
            seen.push(String::from_utf8_lossy(&buf[..n]).to_string());
            server.write_all(reply.as_bytes()).await.unwrap();
        }
        seen
    }

    fn upgrader() -> Upgrader {
        Upgrader::new(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn ftp_auth_tls() {
        let (mut client, server) = duplex(1024);
        let script = tokio::spawn(serve(server, "220 ftp ready\r\n", vec!["234 AUTH TLS ok\r\n"]));
        upgrader().upgrade(&mut client, StartTlsKind::Ftp).await.unwrap();
        assert_eq!(script.await.unwrap(), vec!["AUTH TLS\r\n"]);
    }

    #[tokio::test]
    async fn smtp_drains_ehlo_before_starttls() {
        let (mut client, server) = duplex(1024);
        let script = tokio::spawn(serve(
            server,
            "220 mail.example ESMTP\r\n",
            vec![
                "250-mail.example\r\n250-PIPELINING\r\n250-STARTTLS\r\n250 8BITMIME\r\n",
                "220 2.0.0 Ready to start TLS\r\n",
            ],
        ));
        upgrader().upgrade(&mut client, StartTlsKind::Smtp).await.unwrap();
        let seen = script.await.unwrap();
        assert_eq!(seen, vec![format!("EHLO {EHLO_NAME}\r\n"), "STARTTLS\r\n".to_string()]);
    }

    #[tokio::test]
    async fn pop3_stls() {
        let (mut client, server) = duplex(1024);
        let script = tokio::spawn(serve(server, "+OK POP3 ready\r\n", vec!["+OK Begin TLS\r\n"]));
        upgrader().upgrade(&mut client, StartTlsKind::Pop3).await.unwrap();
        assert_eq!(script.await.unwrap(), vec!["STLS\r\n"]);
    }

    #[tokio::test]
    async fn imap_skips_untagged_noise_before_greeting() {
        let (mut client, server) = duplex(1024);
        let script = tokio::spawn(serve(
            server,
            "noise\r\n* OK IMAP4rev1 ready\r\n",
            vec!["a001 OK Begin TLS negotiation now\r\n"],
        ));
        upgrader().upgrade(&mut client, StartTlsKind::Imap).await.unwrap();
        assert_eq!(script.await.unwrap(), vec!["a001 STARTTLS\r\n"]);
    }

    #[tokio::test]
    async fn refused_upgrade_is_distinguishable() {
        let (mut client, server) = duplex(1024);
        tokio::spawn(serve(server, "+OK ready\r\n", vec!["-ERR not available\r\n"]));
        let err = upgrader()
            .upgrade(&mut client, StartTlsKind::Pop3)
            .await
            .unwrap_err();
        assert!(err.is_not_supported(), "{err}");
        assert!(err.to_string().starts_with("starttls_not_supported"));
    }

    #[tokio::test]
    async fn closed_before_greeting_is_hard_failure() {
        let (mut client, server) = duplex(1024);
        drop(server);
        let err = upgrader()
            .upgrade(&mut client, StartTlsKind::Ftp)
            .await
            .unwrap_err();
        assert!(matches!(err, StartTlsError::NoGreeting { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_server_times_out() {
        let (mut client, _server) = duplex(1024);
        let err = upgrader()
            .upgrade(&mut client, StartTlsKind::Smtp)
            .await
            .unwrap_err();
        assert!(matches!(err, StartTlsError::Timeout { stage: "greeting", .. }));
    }
}
