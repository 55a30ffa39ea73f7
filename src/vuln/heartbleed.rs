use super::Injection;
use crate::protocol::ProtocolVersion;
use crate::records;

/// CVE-2014-0160: a heartbeat request claiming far more payload than it
/// carries. Servers that never echoed the heartbeat extension are skipped.
pub struct Heartbleed;

impl Injection for Heartbleed {
    fn name(&self) -> &'static str {
        "heartbleed"
    }

    fn requires_heartbeat(&self) -> bool {
        true
    }

    fn payload(&self, version: ProtocolVersion) -> Vec<u8> {
        records::heartbeat_request(version)
    }
}
