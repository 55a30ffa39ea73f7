use super::Injection;
use crate::protocol::ProtocolVersion;
use crate::records;

/// CVE-2014-0224: ChangeCipherSpec before any key exchange. A patched
/// server aborts; a vulnerable one keeps talking.
pub struct CcsInjection;

impl Injection for CcsInjection {
    fn name(&self) -> &'static str {
        "ccs_injection"
    }

    fn payload(&self, version: ProtocolVersion) -> Vec<u8> {
        let record = records::change_cipher_spec(version);
        [record.as_slice(), record.as_slice()].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sends_two_early_ccs_records() {
        let payload = CcsInjection.payload(ProtocolVersion::Tls12);
        assert_eq!(
            payload,
            vec![0x14, 0x03, 0x03, 0x00, 0x01, 0x01, 0x14, 0x03, 0x03, 0x00, 0x01, 0x01]
        );
        assert!(!CcsInjection.requires_heartbeat());
    }
}
