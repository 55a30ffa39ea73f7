use super::TrialProber;
use crate::ciphers::{BulkCipher, CipherSuite, KeyExchange, Mac};
use crate::model::{ExternalToolConfig, Target};
use crate::protocol::ProtocolVersion;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Decides which (protocol, cipher) trials go to the external tool instead
/// of the in-process TLS stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    Never,
    /// Combinations current OpenSSL builds refuse to offer.
    LegacyOnly,
}

impl FallbackPolicy {
    pub fn applies(self, protocol: ProtocolVersion, cipher: Option<&CipherSuite>) -> bool {
        match self {
            FallbackPolicy::Never => false,
            FallbackPolicy::LegacyOnly => {
                protocol == ProtocolVersion::Ssl3 || cipher.is_some_and(is_legacy_suite)
            }
        }
    }
}

fn is_legacy_suite(cipher: &CipherSuite) -> bool {
    let fixed_dh = matches!(cipher.kx, KeyExchange::Dh | KeyExchange::Ecdh)
        && cipher.auth != crate::ciphers::Authentication::None;
    cipher.is_export()
        || fixed_dh
        || cipher.mac == Mac::Md5
        || matches!(
            cipher.enc.cipher,
            BulkCipher::Rc4 | BulkCipher::Rc2 | BulkCipher::Idea | BulkCipher::Seed | BulkCipher::Des
        )
}

/// Runs `openssl s_client` pinned to one protocol/cipher; exit status 0
/// means the handshake completed.
pub struct ExternalToolProber {
    program: String,
    timeout: Duration,
}

impl ExternalToolProber {
    pub fn new(cfg: &ExternalToolConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            timeout: cfg.timeout,
        }
    }

    fn args(
        &self,
        target: &Target,
        protocol: ProtocolVersion,
        cipher: Option<&CipherSuite>,
    ) -> Vec<String> {
        let mut args = vec![
            "s_client".to_string(),
            "-connect".to_string(),
            target.resolved.to_string(),
        ];
        let host = &target.original.host;
        if host.parse::<std::net::IpAddr>().is_err() && !host.is_empty() {
            args.push("-servername".into());
            args.push(host.clone());
        }
        args.push(protocol.tool_flag().into());
        if let Some(suite) = cipher {
            let flag = if suite.is_tls13() { "-ciphersuites" } else { "-cipher" };
            args.push(flag.into());
            args.push(suite.openssl_name.into());
        }
        if let Some(kind) = target.service().starttls() {
            args.push("-starttls".into());
            args.push(kind.to_string());
        }
        args
    }
}

#[async_trait]
impl TrialProber for ExternalToolProber {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn trial(
        &self,
        target: &Target,
        protocol: ProtocolVersion,
        cipher: Option<&'static CipherSuite>,
    ) -> bool {
        let args = self.args(target, protocol, cipher);
        let mut child = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                warn!(program = %self.program, error = %err, "external prober unavailable");
                return false;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            // "Q" makes s_client quit right after the handshake.
            let _ = stdin.write_all(b"Q\n").await;
        }

        match timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(
                    protocol = %protocol,
                    cipher = cipher.map(|c| c.name),
                    code = ?status.code(),
                    "external trial finished"
                );
                status.success()
            }
            Ok(Err(err)) => {
                debug!(error = %err, "external trial failed");
                false
            }
            Err(_) => {
                warn!(
                    target = %target.resolved,
                    protocol = %protocol,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "external trial timed out"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphers::by_name;
    use crate::model::TargetSpec;

    fn target(host: &str, port: u16) -> Target {
        Target {
            original: TargetSpec {
                host: host.into(),
                port,
            },
            resolved: format!("127.0.0.1:{port}").parse().unwrap(),
        }
    }

    #[test]
    fn legacy_policy_predicate() {
        let policy = FallbackPolicy::LegacyOnly;
        let modern = by_name("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256").unwrap();
        let export = by_name("TLS_RSA_EXPORT_WITH_RC4_40_MD5").unwrap();
        let fixed_dh = by_name("TLS_DH_RSA_WITH_AES_128_CBC_SHA").unwrap();
        let anon = by_name("TLS_DH_anon_WITH_AES_128_CBC_SHA").unwrap();

        assert!(policy.applies(ProtocolVersion::Ssl3, None));
        assert!(policy.applies(ProtocolVersion::Ssl3, Some(modern)));
        assert!(!policy.applies(ProtocolVersion::Tls12, Some(modern)));
        assert!(!policy.applies(ProtocolVersion::Tls12, None));
        assert!(policy.applies(ProtocolVersion::Tls10, Some(export)));
        assert!(policy.applies(ProtocolVersion::Tls12, Some(fixed_dh)));
        assert!(!policy.applies(ProtocolVersion::Tls12, Some(anon)));
        assert!(!FallbackPolicy::Never.applies(ProtocolVersion::Ssl3, Some(export)));
    }

    #[test]
    fn builds_s_client_arguments() {
        let prober = ExternalToolProber::new(&ExternalToolConfig::default());
        let suite = by_name("TLS_RSA_WITH_RC4_128_MD5").unwrap();
        let args = prober.args(&target("mail.example.com", 25), ProtocolVersion::Ssl3, Some(suite));
        assert_eq!(
            args,
            vec![
                "s_client",
                "-connect",
                "127.0.0.1:25",
                "-servername",
                "mail.example.com",
                "-ssl3",
                "-cipher",
                "RC4-MD5",
                "-starttls",
                "smtp",
            ]
        );
    }

    #[test]
    fn ip_targets_skip_sni_and_tls13_uses_ciphersuites() {
        let prober = ExternalToolProber::new(&ExternalToolConfig::default());
        let suite = by_name("TLS_AES_256_GCM_SHA384").unwrap();
        let args = prober.args(&target("127.0.0.1", 443), ProtocolVersion::Tls13, Some(suite));
        assert!(!args.contains(&"-servername".to_string()));
        assert!(args.ends_with(&["-ciphersuites".to_string(), "TLS_AES_256_GCM_SHA384".to_string()]));
    }

    #[tokio::test]
    async fn missing_binary_reads_as_unsupported() {
        let prober = ExternalToolProber::new(&ExternalToolConfig {
            enabled: true,
            program: "/nonexistent/openssl-binary".into(),
            timeout: Duration::from_secs(1),
        });
        assert!(!prober.trial(&target("localhost", 443), ProtocolVersion::Ssl3, None).await);
    }
}
