//! Hand-built TLS and SSLv2 records used by the probes that need to stay
//! below the TLS library's handshake API.

use crate::ciphers::SSL2_CIPHERS;
use crate::protocol::ProtocolVersion;
use rand::RngCore;

pub const CONTENT_CHANGE_CIPHER_SPEC: u8 = 0x14;
pub const CONTENT_HANDSHAKE: u8 = 0x16;
pub const CONTENT_HEARTBEAT: u8 = 0x18;

/// Requested heartbeat payload length; nothing is actually sent.
pub const HEARTBEAT_CLAIMED_LEN: u16 = 0x4000;

/// Byte pattern of an echoed heartbeat extension (type 0x000f, mode 1).
pub const HEARTBEAT_EXTENSION: [u8; 5] = [0x00, 0x0f, 0x00, 0x01, 0x01];

/// ServerHelloDone handshake header.
pub const SERVER_HELLO_DONE: [u8; 4] = [0x0e, 0x00, 0x00, 0x00];

const SSL2_CHALLENGE: [u8; 16] = [
    0x29, 0x22, 0xbe, 0xb3, 0x5a, 0x01, 0x8b, 0x04, 0xfe, 0x5f, 0x80, 0x03, 0xa0, 0x13, 0xeb, 0xc4,
];

// Session id, cipher suites, compression and extensions that follow the
// random in every probe ClientHello.
const HELLO_BODY: &[u8] = &[
    0x00, // session id length
    0x00, 0x66, // cipher suites length
    0xc0, 0x14, 0xc0, 0x0a, 0xc0, 0x22, 0xc0, 0x21, 0x00, 0x39, 0x00, 0x38, 0x00, 0x88, 0x00, 0x87,
    0xc0, 0x0f, 0xc0, 0x05, 0x00, 0x35, 0x00, 0x84, 0xc0, 0x12, 0xc0, 0x08, 0xc0, 0x1c, 0xc0, 0x1b,
    0x00, 0x16, 0x00, 0x13, 0xc0, 0x0d, 0xc0, 0x03, 0x00, 0x0a, 0xc0, 0x13, 0xc0, 0x09, 0xc0, 0x1f,
    0xc0, 0x1e, 0x00, 0x33, 0x00, 0x32, 0x00, 0x9a, 0x00, 0x99, 0x00, 0x45, 0x00, 0x44, 0xc0, 0x0e,
    0xc0, 0x04, 0x00, 0x2f, 0x00, 0x96, 0x00, 0x41, 0xc0, 0x11, 0xc0, 0x07, 0xc0, 0x0c, 0xc0, 0x02,
    0x00, 0x05, 0x00, 0x04, 0x00, 0x15, 0x00, 0x12, 0x00, 0x09, 0x00, 0x14, 0x00, 0x11, 0x00, 0x08,
    0x00, 0x06, 0x00, 0x03, 0x00, 0xff,
    0x01, 0x00, // compression: null
    0x00, 0x49, // extensions length
    0x00, 0x0b, 0x00, 0x04, 0x03, 0x00, 0x01, 0x02, // ec_point_formats
    0x00, 0x0a, 0x00, 0x34, 0x00, 0x32, // elliptic_curves
    0x00, 0x0e, 0x00, 0x0d, 0x00, 0x19, 0x00, 0x0b, 0x00, 0x0c, 0x00, 0x18, 0x00, 0x09, 0x00, 0x0a,
    0x00, 0x16, 0x00, 0x17, 0x00, 0x08, 0x00, 0x06, 0x00, 0x07, 0x00, 0x14, 0x00, 0x15, 0x00, 0x04,
    0x00, 0x05, 0x00, 0x12, 0x00, 0x13, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x0f, 0x00, 0x10,
    0x00, 0x11,
    0x00, 0x23, 0x00, 0x00, // session ticket
    0x00, 0x0f, 0x00, 0x01, 0x01, // heartbeat, peer allowed to send
];

pub fn random_nonce() -> [u8; 32] {
    let mut nonce = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// ClientHello advertising the heartbeat extension with `version` in both
/// the record header and the handshake header.
pub fn client_hello(version: ProtocolVersion, random: &[u8; 32]) -> Vec<u8> {
    let wire = version.wire_code().to_be_bytes();
    let handshake_len = 2 + random.len() + HELLO_BODY.len();
    let record_len = 4 + handshake_len;

    let mut out = Vec::with_capacity(5 + record_len);
    out.push(CONTENT_HANDSHAKE);
    out.extend_from_slice(&wire);
    out.extend_from_slice(&(record_len as u16).to_be_bytes());
    out.push(0x01); // client_hello
    out.extend_from_slice(&(handshake_len as u32).to_be_bytes()[1..]);
    out.extend_from_slice(&wire);
    out.extend_from_slice(random);
    out.extend_from_slice(HELLO_BODY);
    out
}

pub fn change_cipher_spec(version: ProtocolVersion) -> Vec<u8> {
    let wire = version.wire_code().to_be_bytes();
    vec![CONTENT_CHANGE_CIPHER_SPEC, wire[0], wire[1], 0x00, 0x01, 0x01]
}

/// Heartbeat request claiming a 16 KiB payload while carrying none.
pub fn heartbeat_request(version: ProtocolVersion) -> Vec<u8> {
    let wire = version.wire_code().to_be_bytes();
    let claimed = HEARTBEAT_CLAIMED_LEN.to_be_bytes();
    vec![
        CONTENT_HEARTBEAT,
        wire[0],
        wire[1],
        0x00,
        0x03,
        0x01, // heartbeat_request
        claimed[0],
        claimed[1],
    ]
}

/// SSLv2 CLIENT-HELLO offering every SSLv2 cipher kind we can name.
pub fn sslv2_client_hello() -> Vec<u8> {
    let specs_len = (SSL2_CIPHERS.len() * 3) as u16;
    let body_len = 9 + specs_len as usize + SSL2_CHALLENGE.len();

    let mut out = Vec::with_capacity(2 + body_len);
    out.extend_from_slice(&(0x8000u16 | body_len as u16).to_be_bytes());
    out.push(0x01); // client-hello
    out.extend_from_slice(&[0x00, 0x02]); // version
    out.extend_from_slice(&specs_len.to_be_bytes());
    out.extend_from_slice(&[0x00, 0x00]); // session id length
    out.extend_from_slice(&(SSL2_CHALLENGE.len() as u16).to_be_bytes());
    for cipher in SSL2_CIPHERS {
        out.extend_from_slice(&cipher.code);
    }
    out.extend_from_slice(&SSL2_CHALLENGE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ALL_VERSIONS;
    use crate::util::hex;

    const SEED: [u8; 32] = [0x5a; 32];

    #[test]
    fn client_hello_is_deterministic() {
        let a = client_hello(ProtocolVersion::Tls12, &SEED);
        let b = client_hello(ProtocolVersion::Tls12, &SEED);
        assert_eq!(a, b);
        assert_ne!(a, client_hello(ProtocolVersion::Tls12, &[0x00; 32]));
    }

    #[test]
    fn client_hello_lengths_match_header() {
        let hello = client_hello(ProtocolVersion::Tls10, &SEED);
        assert_eq!(&hello[..5], &[0x16, 0x03, 0x01, 0x00, 0xdc]);
        assert_eq!(&hello[5..9], &[0x01, 0x00, 0x00, 0xd8]);
        assert_eq!(hello.len(), 5 + 0xdc);
        assert_eq!(&hello[11..43], &SEED);
        assert!(hello.ends_with(&HEARTBEAT_EXTENSION));
    }

    #[test]
    fn version_bytes_follow_the_trial_version() {
        for version in ALL_VERSIONS {
            let hello = client_hello(version, &SEED);
            let wire = version.wire_code().to_be_bytes();
            assert_eq!(&hello[1..3], &wire, "record version for {version}");
            assert_eq!(&hello[9..11], &wire, "handshake version for {version}");
        }
    }

    #[test]
    fn hello_body_matches_reference_bytes() {
        let expected = "000066c014c00ac022c0210039003800880087c00fc00500350084c012c008c01cc01b00160013c00dc003000ac013c009c01fc01e00330032009a009900450044c00ec004002f00960041c011c007c00cc002000500040015001200090014001100080006000300ff01000049000b000403000102000a00340032000e000d0019000b000c00180009000a00160017000800060007001400150004000500120013000100020003000f0010001100230000000f000101";
        assert_eq!(hex::encode(HELLO_BODY), expected);
    }

    #[test]
    fn change_cipher_spec_record() {
        assert_eq!(
            change_cipher_spec(ProtocolVersion::Tls11),
            vec![0x14, 0x03, 0x02, 0x00, 0x01, 0x01]
        );
    }

    #[test]
    fn heartbeat_claims_more_than_it_sends() {
        let record = heartbeat_request(ProtocolVersion::Tls12);
        assert_eq!(record, vec![0x18, 0x03, 0x03, 0x00, 0x03, 0x01, 0x40, 0x00]);
        let declared = u16::from_be_bytes([record[3], record[4]]) as usize;
        assert_eq!(record.len() - 5, declared);
    }

    #[test]
    fn sslv2_hello_layout() {
        let hello = sslv2_client_hello();
        assert_eq!(hello.len(), 54);
        assert_eq!(hex::encode(&hello[..11]), "8034010002001b00000010");
        assert!(hex::encode(&hello).ends_with("2922beb35a018b04fe5f8003a013ebc4"));
    }
}
