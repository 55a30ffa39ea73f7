use super::{
    Authentication as A, BulkCipher as B, CipherSuite, Encryption, KeyExchange as K, Mac as M,
    Ssl2Cipher,
};
use crate::protocol::ProtocolVersion;

const S3: ProtocolVersion = ProtocolVersion::Ssl3;
const T12: ProtocolVersion = ProtocolVersion::Tls12;
const T13: ProtocolVersion = ProtocolVersion::Tls13;

#[allow(clippy::too_many_arguments)]
const fn cs(
    code: u16,
    name: &'static str,
    openssl_name: &'static str,
    min_version: ProtocolVersion,
    kx: K,
    auth: A,
    cipher: B,
    bits: u16,
    mac: M,
) -> CipherSuite {
    CipherSuite {
        code,
        name,
        openssl_name,
        min_version,
        kx,
        auth,
        enc: Encryption { cipher, bits },
        mac,
    }
}

/// Every suite the matrix scanner knows how to try, strongest first.
pub static CIPHER_SUITES: &[CipherSuite] = &[
    // TLS1.3
    cs(0x1302, "TLS_AES_256_GCM_SHA384", "TLS_AES_256_GCM_SHA384", T13, K::Any, A::Any, B::AesGcm, 256, M::Aead),
    cs(0x1303, "TLS_CHACHA20_POLY1305_SHA256", "TLS_CHACHA20_POLY1305_SHA256", T13, K::Any, A::Any, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0x1301, "TLS_AES_128_GCM_SHA256", "TLS_AES_128_GCM_SHA256", T13, K::Any, A::Any, B::AesGcm, 128, M::Aead),
    // ChaCha20-Poly1305
    cs(0xcca9, "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-ECDSA-CHACHA20-POLY1305", T12, K::Ecdhe, A::Ecdsa, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0xcca8, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-RSA-CHACHA20-POLY1305", T12, K::Ecdhe, A::Rsa, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0xccaa, "TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256", "DHE-RSA-CHACHA20-POLY1305", T12, K::Dhe, A::Rsa, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0xcc14, "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256_OLD", "ECDHE-ECDSA-CHACHA20-POLY1305-OLD", T12, K::Ecdhe, A::Ecdsa, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0xcc13, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256_OLD", "ECDHE-RSA-CHACHA20-POLY1305-OLD", T12, K::Ecdhe, A::Rsa, B::ChaCha20Poly1305, 256, M::Aead),
    cs(0xcc15, "TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256_OLD", "DHE-RSA-CHACHA20-POLY1305-OLD", T12, K::Dhe, A::Rsa, B::ChaCha20Poly1305, 256, M::Aead),
    // 256-bit
    cs(0xc030, "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", "ECDHE-RSA-AES256-GCM-SHA384", T12, K::Ecdhe, A::Rsa, B::AesGcm, 256, M::Aead),
    cs(0xc02c, "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", "ECDHE-ECDSA-AES256-GCM-SHA384", T12, K::Ecdhe, A::Ecdsa, B::AesGcm, 256, M::Aead),
    cs(0xc028, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384", "ECDHE-RSA-AES256-SHA384", T12, K::Ecdhe, A::Rsa, B::Aes, 256, M::Sha384),
    cs(0xc024, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384", "ECDHE-ECDSA-AES256-SHA384", T12, K::Ecdhe, A::Ecdsa, B::Aes, 256, M::Sha384),
    cs(0xc014, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA", "ECDHE-RSA-AES256-SHA", S3, K::Ecdhe, A::Rsa, B::Aes, 256, M::Sha1),
    cs(0xc00a, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA", "ECDHE-ECDSA-AES256-SHA", S3, K::Ecdhe, A::Ecdsa, B::Aes, 256, M::Sha1),
    cs(0x00a5, "TLS_DH_DSS_WITH_AES_256_GCM_SHA384", "DH-DSS-AES256-GCM-SHA384", T12, K::Dh, A::Dss, B::AesGcm, 256, M::Aead),
    cs(0x00a3, "TLS_DHE_DSS_WITH_AES_256_GCM_SHA384", "DHE-DSS-AES256-GCM-SHA384", T12, K::Dhe, A::Dss, B::AesGcm, 256, M::Aead),
    cs(0x00a1, "TLS_DH_RSA_WITH_AES_256_GCM_SHA384", "DH-RSA-AES256-GCM-SHA384", T12, K::Dh, A::Rsa, B::AesGcm, 256, M::Aead),
    cs(0x009f, "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384", "DHE-RSA-AES256-GCM-SHA384", T12, K::Dhe, A::Rsa, B::AesGcm, 256, M::Aead),
    cs(0x006b, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA256", "DHE-RSA-AES256-SHA256", T12, K::Dhe, A::Rsa, B::Aes, 256, M::Sha256),
    cs(0x006a, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA256", "DHE-DSS-AES256-SHA256", T12, K::Dhe, A::Dss, B::Aes, 256, M::Sha256),
    cs(0x0069, "TLS_DH_RSA_WITH_AES_256_CBC_SHA256", "DH-RSA-AES256-SHA256", T12, K::Dh, A::Rsa, B::Aes, 256, M::Sha256),
    cs(0x0068, "TLS_DH_DSS_WITH_AES_256_CBC_SHA256", "DH-DSS-AES256-SHA256", T12, K::Dh, A::Dss, B::Aes, 256, M::Sha256),
    cs(0x0039, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA", "DHE-RSA-AES256-SHA", S3, K::Dhe, A::Rsa, B::Aes, 256, M::Sha1),
    cs(0x0038, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA", "DHE-DSS-AES256-SHA", S3, K::Dhe, A::Dss, B::Aes, 256, M::Sha1),
    cs(0x0037, "TLS_DH_RSA_WITH_AES_256_CBC_SHA", "DH-RSA-AES256-SHA", S3, K::Dh, A::Rsa, B::Aes, 256, M::Sha1),
    cs(0x0036, "TLS_DH_DSS_WITH_AES_256_CBC_SHA", "DH-DSS-AES256-SHA", S3, K::Dh, A::Dss, B::Aes, 256, M::Sha1),
    cs(0xc077, "TLS_ECDHE_RSA_WITH_CAMELLIA_256_CBC_SHA384", "ECDHE-RSA-CAMELLIA256-SHA384", T12, K::Ecdhe, A::Rsa, B::Camellia, 256, M::Sha384),
    cs(0xc073, "TLS_ECDHE_ECDSA_WITH_CAMELLIA_256_CBC_SHA384", "ECDHE-ECDSA-CAMELLIA256-SHA384", T12, K::Ecdhe, A::Ecdsa, B::Camellia, 256, M::Sha384),
    cs(0x00c4, "TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA256", "DHE-RSA-CAMELLIA256-SHA256", T12, K::Dhe, A::Rsa, B::Camellia, 256, M::Sha256),
    cs(0x00c3, "TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA256", "DHE-DSS-CAMELLIA256-SHA256", T12, K::Dhe, A::Dss, B::Camellia, 256, M::Sha256),
    cs(0x00c2, "TLS_DH_RSA_WITH_CAMELLIA_256_CBC_SHA256", "DH-RSA-CAMELLIA256-SHA256", T12, K::Dh, A::Rsa, B::Camellia, 256, M::Sha256),
    cs(0x00c1, "TLS_DH_DSS_WITH_CAMELLIA_256_CBC_SHA256", "DH-DSS-CAMELLIA256-SHA256", T12, K::Dh, A::Dss, B::Camellia, 256, M::Sha256),
    cs(0x0088, "TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA", "DHE-RSA-CAMELLIA256-SHA", S3, K::Dhe, A::Rsa, B::Camellia, 256, M::Sha1),
    cs(0x0087, "TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA", "DHE-DSS-CAMELLIA256-SHA", S3, K::Dhe, A::Dss, B::Camellia, 256, M::Sha1),
    cs(0x0086, "TLS_DH_RSA_WITH_CAMELLIA_256_CBC_SHA", "DH-RSA-CAMELLIA256-SHA", S3, K::Dh, A::Rsa, B::Camellia, 256, M::Sha1),
    cs(0x0085, "TLS_DH_DSS_WITH_CAMELLIA_256_CBC_SHA", "DH-DSS-CAMELLIA256-SHA", S3, K::Dh, A::Dss, B::Camellia, 256, M::Sha1),
    cs(0xc019, "TLS_ECDH_anon_WITH_AES_256_CBC_SHA", "AECDH-AES256-SHA", S3, K::Ecdh, A::None, B::Aes, 256, M::Sha1),
    cs(0x00a7, "TLS_DH_anon_WITH_AES_256_GCM_SHA384", "ADH-AES256-GCM-SHA384", T12, K::Dh, A::None, B::AesGcm, 256, M::Aead),
    cs(0x006d, "TLS_DH_anon_WITH_AES_256_CBC_SHA256", "ADH-AES256-SHA256", T12, K::Dh, A::None, B::Aes, 256, M::Sha256),
    cs(0x003a, "TLS_DH_anon_WITH_AES_256_CBC_SHA", "ADH-AES256-SHA", S3, K::Dh, A::None, B::Aes, 256, M::Sha1),
    cs(0x00c5, "TLS_DH_anon_WITH_CAMELLIA_256_CBC_SHA256", "ADH-CAMELLIA256-SHA256", T12, K::Dh, A::None, B::Camellia, 256, M::Sha256),
    cs(0x0089, "TLS_DH_anon_WITH_CAMELLIA_256_CBC_SHA", "ADH-CAMELLIA256-SHA", S3, K::Dh, A::None, B::Camellia, 256, M::Sha1),
    cs(0xc032, "TLS_ECDH_RSA_WITH_AES_256_GCM_SHA384", "ECDH-RSA-AES256-GCM-SHA384", T12, K::Ecdh, A::Rsa, B::AesGcm, 256, M::Aead),
    cs(0xc02e, "TLS_ECDH_ECDSA_WITH_AES_256_GCM_SHA384", "ECDH-ECDSA-AES256-GCM-SHA384", T12, K::Ecdh, A::Ecdsa, B::AesGcm, 256, M::Aead),
    cs(0xc02a, "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA384", "ECDH-RSA-AES256-SHA384", T12, K::Ecdh, A::Rsa, B::Aes, 256, M::Sha384),
    cs(0xc026, "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA384", "ECDH-ECDSA-AES256-SHA384", T12, K::Ecdh, A::Ecdsa, B::Aes, 256, M::Sha384),
    cs(0xc00f, "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA", "ECDH-RSA-AES256-SHA", S3, K::Ecdh, A::Rsa, B::Aes, 256, M::Sha1),
    cs(0xc005, "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA", "ECDH-ECDSA-AES256-SHA", S3, K::Ecdh, A::Ecdsa, B::Aes, 256, M::Sha1),
    cs(0xc079, "TLS_ECDH_RSA_WITH_CAMELLIA_256_CBC_SHA384", "ECDH-RSA-CAMELLIA256-SHA384", T12, K::Ecdh, A::Rsa, B::Camellia, 256, M::Sha384),
    cs(0xc075, "TLS_ECDH_ECDSA_WITH_CAMELLIA_256_CBC_SHA384", "ECDH-ECDSA-CAMELLIA256-SHA384", T12, K::Ecdh, A::Ecdsa, B::Camellia, 256, M::Sha384),
    cs(0x009d, "TLS_RSA_WITH_AES_256_GCM_SHA384", "AES256-GCM-SHA384", T12, K::Rsa, A::Rsa, B::AesGcm, 256, M::Aead),
    cs(0x003d, "TLS_RSA_WITH_AES_256_CBC_SHA256", "AES256-SHA256", T12, K::Rsa, A::Rsa, B::Aes, 256, M::Sha256),
    cs(0x0035, "TLS_RSA_WITH_AES_256_CBC_SHA", "AES256-SHA", S3, K::Rsa, A::Rsa, B::Aes, 256, M::Sha1),
    cs(0x00c0, "TLS_RSA_WITH_CAMELLIA_256_CBC_SHA256", "CAMELLIA256-SHA256", T12, K::Rsa, A::Rsa, B::Camellia, 256, M::Sha256),
    cs(0x0084, "TLS_RSA_WITH_CAMELLIA_256_CBC_SHA", "CAMELLIA256-SHA", S3, K::Rsa, A::Rsa, B::Camellia, 256, M::Sha1),
    // 128-bit
    cs(0xc02f, "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", "ECDHE-RSA-AES128-GCM-SHA256", T12, K::Ecdhe, A::Rsa, B::AesGcm, 128, M::Aead),
    cs(0xc02b, "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", "ECDHE-ECDSA-AES128-GCM-SHA256", T12, K::Ecdhe, A::Ecdsa, B::AesGcm, 128, M::Aead),
    cs(0xc027, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256", "ECDHE-RSA-AES128-SHA256", T12, K::Ecdhe, A::Rsa, B::Aes, 128, M::Sha256),
    cs(0xc023, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256", "ECDHE-ECDSA-AES128-SHA256", T12, K::Ecdhe, A::Ecdsa, B::Aes, 128, M::Sha256),
    cs(0xc013, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA", "ECDHE-RSA-AES128-SHA", S3, K::Ecdhe, A::Rsa, B::Aes, 128, M::Sha1),
    cs(0xc009, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA", "ECDHE-ECDSA-AES128-SHA", S3, K::Ecdhe, A::Ecdsa, B::Aes, 128, M::Sha1),
    cs(0x00a4, "TLS_DH_DSS_WITH_AES_128_GCM_SHA256", "DH-DSS-AES128-GCM-SHA256", T12, K::Dh, A::Dss, B::AesGcm, 128, M::Aead),
    cs(0x00a2, "TLS_DHE_DSS_WITH_AES_128_GCM_SHA256", "DHE-DSS-AES128-GCM-SHA256", T12, K::Dhe, A::Dss, B::AesGcm, 128, M::Aead),
    cs(0x00a0, "TLS_DH_RSA_WITH_AES_128_GCM_SHA256", "DH-RSA-AES128-GCM-SHA256", T12, K::Dh, A::Rsa, B::AesGcm, 128, M::Aead),
    cs(0x009e, "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256", "DHE-RSA-AES128-GCM-SHA256", T12, K::Dhe, A::Rsa, B::AesGcm, 128, M::Aead),
    cs(0x0067, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA256", "DHE-RSA-AES128-SHA256", T12, K::Dhe, A::Rsa, B::Aes, 128, M::Sha256),
    cs(0x0040, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA256", "DHE-DSS-AES128-SHA256", T12, K::Dhe, A::Dss, B::Aes, 128, M::Sha256),
    cs(0x003f, "TLS_DH_RSA_WITH_AES_128_CBC_SHA256", "DH-RSA-AES128-SHA256", T12, K::Dh, A::Rsa, B::Aes, 128, M::Sha256),
    cs(0x003e, "TLS_DH_DSS_WITH_AES_128_CBC_SHA256", "DH-DSS-AES128-SHA256", T12, K::Dh, A::Dss, B::Aes, 128, M::Sha256),
    cs(0x0033, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA", "DHE-RSA-AES128-SHA", S3, K::Dhe, A::Rsa, B::Aes, 128, M::Sha1),
    cs(0x0032, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA", "DHE-DSS-AES128-SHA", S3, K::Dhe, A::Dss, B::Aes, 128, M::Sha1),
    cs(0x0031, "TLS_DH_RSA_WITH_AES_128_CBC_SHA", "DH-RSA-AES128-SHA", S3, K::Dh, A::Rsa, B::Aes, 128, M::Sha1),
    cs(0x0030, "TLS_DH_DSS_WITH_AES_128_CBC_SHA", "DH-DSS-AES128-SHA", S3, K::Dh, A::Dss, B::Aes, 128, M::Sha1),
    cs(0xc076, "TLS_ECDHE_RSA_WITH_CAMELLIA_128_CBC_SHA256", "ECDHE-RSA-CAMELLIA128-SHA256", T12, K::Ecdhe, A::Rsa, B::Camellia, 128, M::Sha256),
    cs(0xc072, "TLS_ECDHE_ECDSA_WITH_CAMELLIA_128_CBC_SHA256", "ECDHE-ECDSA-CAMELLIA128-SHA256", T12, K::Ecdhe, A::Ecdsa, B::Camellia, 128, M::Sha256),
    cs(0x00be, "TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA256", "DHE-RSA-CAMELLIA128-SHA256", T12, K::Dhe, A::Rsa, B::Camellia, 128, M::Sha256),
    cs(0x00bd, "TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA256", "DHE-DSS-CAMELLIA128-SHA256", T12, K::Dhe, A::Dss, B::Camellia, 128, M::Sha256),
    cs(0x00bc, "TLS_DH_RSA_WITH_CAMELLIA_128_CBC_SHA256", "DH-RSA-CAMELLIA128-SHA256", T12, K::Dh, A::Rsa, B::Camellia, 128, M::Sha256),
    cs(0x00bb, "TLS_DH_DSS_WITH_CAMELLIA_128_CBC_SHA256", "DH-DSS-CAMELLIA128-SHA256", T12, K::Dh, A::Dss, B::Camellia, 128, M::Sha256),
    cs(0x009a, "TLS_DHE_RSA_WITH_SEED_CBC_SHA", "DHE-RSA-SEED-SHA", S3, K::Dhe, A::Rsa, B::Seed, 128, M::Sha1),
    cs(0x0099, "TLS_DHE_DSS_WITH_SEED_CBC_SHA", "DHE-DSS-SEED-SHA", S3, K::Dhe, A::Dss, B::Seed, 128, M::Sha1),
    cs(0x0098, "TLS_DH_RSA_WITH_SEED_CBC_SHA", "DH-RSA-SEED-SHA", S3, K::Dh, A::Rsa, B::Seed, 128, M::Sha1),
    cs(0x0097, "TLS_DH_DSS_WITH_SEED_CBC_SHA", "DH-DSS-SEED-SHA", S3, K::Dh, A::Dss, B::Seed, 128, M::Sha1),
    cs(0x0045, "TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA", "DHE-RSA-CAMELLIA128-SHA", S3, K::Dhe, A::Rsa, B::Camellia, 128, M::Sha1),
    cs(0x0044, "TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA", "DHE-DSS-CAMELLIA128-SHA", S3, K::Dhe, A::Dss, B::Camellia, 128, M::Sha1),
    cs(0x0043, "TLS_DH_RSA_WITH_CAMELLIA_128_CBC_SHA", "DH-RSA-CAMELLIA128-SHA", S3, K::Dh, A::Rsa, B::Camellia, 128, M::Sha1),
    cs(0x0042, "TLS_DH_DSS_WITH_CAMELLIA_128_CBC_SHA", "DH-DSS-CAMELLIA128-SHA", S3, K::Dh, A::Dss, B::Camellia, 128, M::Sha1),
    cs(0xc018, "TLS_ECDH_anon_WITH_AES_128_CBC_SHA", "AECDH-AES128-SHA", S3, K::Ecdh, A::None, B::Aes, 128, M::Sha1),
    cs(0x00a6, "TLS_DH_anon_WITH_AES_128_GCM_SHA256", "ADH-AES128-GCM-SHA256", T12, K::Dh, A::None, B::AesGcm, 128, M::Aead),
    cs(0x006c, "TLS_DH_anon_WITH_AES_128_CBC_SHA256", "ADH-AES128-SHA256", T12, K::Dh, A::None, B::Aes, 128, M::Sha256),
    cs(0x0034, "TLS_DH_anon_WITH_AES_128_CBC_SHA", "ADH-AES128-SHA", S3, K::Dh, A::None, B::Aes, 128, M::Sha1),
    cs(0x00bf, "TLS_DH_anon_WITH_CAMELLIA_128_CBC_SHA256", "ADH-CAMELLIA128-SHA256", T12, K::Dh, A::None, B::Camellia, 128, M::Sha256),
    cs(0x009b, "TLS_DH_anon_WITH_SEED_CBC_SHA", "ADH-SEED-SHA", S3, K::Dh, A::None, B::Seed, 128, M::Sha1),
    cs(0x0046, "TLS_DH_anon_WITH_CAMELLIA_128_CBC_SHA", "ADH-CAMELLIA128-SHA", S3, K::Dh, A::None, B::Camellia, 128, M::Sha1),
    cs(0xc031, "TLS_ECDH_RSA_WITH_AES_128_GCM_SHA256", "ECDH-RSA-AES128-GCM-SHA256", T12, K::Ecdh, A::Rsa, B::AesGcm, 128, M::Aead),
    cs(0xc02d, "TLS_ECDH_ECDSA_WITH_AES_128_GCM_SHA256", "ECDH-ECDSA-AES128-GCM-SHA256", T12, K::Ecdh, A::Ecdsa, B::AesGcm, 128, M::Aead),
    cs(0xc029, "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA256", "ECDH-RSA-AES128-SHA256", T12, K::Ecdh, A::Rsa, B::Aes, 128, M::Sha256),
    cs(0xc025, "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA256", "ECDH-ECDSA-AES128-SHA256", T12, K::Ecdh, A::Ecdsa, B::Aes, 128, M::Sha256),
    cs(0xc00e, "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA", "ECDH-RSA-AES128-SHA", S3, K::Ecdh, A::Rsa, B::Aes, 128, M::Sha1),
    cs(0xc004, "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA", "ECDH-ECDSA-AES128-SHA", S3, K::Ecdh, A::Ecdsa, B::Aes, 128, M::Sha1),
    cs(0xc078, "TLS_ECDH_RSA_WITH_CAMELLIA_128_CBC_SHA256", "ECDH-RSA-CAMELLIA128-SHA256", T12, K::Ecdh, A::Rsa, B::Camellia, 128, M::Sha256),
    cs(0xc074, "TLS_ECDH_ECDSA_WITH_CAMELLIA_128_CBC_SHA256", "ECDH-ECDSA-CAMELLIA128-SHA256", T12, K::Ecdh, A::Ecdsa, B::Camellia, 128, M::Sha256),
    cs(0x009c, "TLS_RSA_WITH_AES_128_GCM_SHA256", "AES128-GCM-SHA256", T12, K::Rsa, A::Rsa, B::AesGcm, 128, M::Aead),
    cs(0x003c, "TLS_RSA_WITH_AES_128_CBC_SHA256", "AES128-SHA256", T12, K::Rsa, A::Rsa, B::Aes, 128, M::Sha256),
    cs(0x002f, "TLS_RSA_WITH_AES_128_CBC_SHA", "AES128-SHA", S3, K::Rsa, A::Rsa, B::Aes, 128, M::Sha1),
    cs(0x00ba, "TLS_RSA_WITH_CAMELLIA_128_CBC_SHA256", "CAMELLIA128-SHA256", T12, K::Rsa, A::Rsa, B::Camellia, 128, M::Sha256),
    cs(0x0096, "TLS_RSA_WITH_SEED_CBC_SHA", "SEED-SHA", S3, K::Rsa, A::Rsa, B::Seed, 128, M::Sha1),
    cs(0x0041, "TLS_RSA_WITH_CAMELLIA_128_CBC_SHA", "CAMELLIA128-SHA", S3, K::Rsa, A::Rsa, B::Camellia, 128, M::Sha1),
    cs(0x0007, "TLS_RSA_WITH_IDEA_CBC_SHA", "IDEA-CBC-SHA", S3, K::Rsa, A::Rsa, B::Idea, 128, M::Sha1),
    // RC4
    cs(0xc011, "TLS_ECDHE_RSA_WITH_RC4_128_SHA", "ECDHE-RSA-RC4-SHA", S3, K::Ecdhe, A::Rsa, B::Rc4, 128, M::Sha1),
    cs(0xc007, "TLS_ECDHE_ECDSA_WITH_RC4_128_SHA", "ECDHE-ECDSA-RC4-SHA", S3, K::Ecdhe, A::Ecdsa, B::Rc4, 128, M::Sha1),
    cs(0x0066, "TLS_DHE_DSS_WITH_RC4_128_SHA", "DHE-DSS-RC4-SHA", S3, K::Dhe, A::Dss, B::Rc4, 128, M::Sha1),
    cs(0xc016, "TLS_ECDH_anon_WITH_RC4_128_SHA", "AECDH-RC4-SHA", S3, K::Ecdh, A::None, B::Rc4, 128, M::Sha1),
    cs(0x0018, "TLS_DH_anon_WITH_RC4_128_MD5", "ADH-RC4-MD5", S3, K::Dh, A::None, B::Rc4, 128, M::Md5),
    cs(0xc00c, "TLS_ECDH_RSA_WITH_RC4_128_SHA", "ECDH-RSA-RC4-SHA", S3, K::Ecdh, A::Rsa, B::Rc4, 128, M::Sha1),
    cs(0xc002, "TLS_ECDH_ECDSA_WITH_RC4_128_SHA", "ECDH-ECDSA-RC4-SHA", S3, K::Ecdh, A::Ecdsa, B::Rc4, 128, M::Sha1),
    cs(0x0005, "TLS_RSA_WITH_RC4_128_SHA", "RC4-SHA", S3, K::Rsa, A::Rsa, B::Rc4, 128, M::Sha1),
    cs(0x0004, "TLS_RSA_WITH_RC4_128_MD5", "RC4-MD5", S3, K::Rsa, A::Rsa, B::Rc4, 128, M::Md5),
    // 3DES
    cs(0xc012, "TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA", "ECDHE-RSA-DES-CBC3-SHA", S3, K::Ecdhe, A::Rsa, B::TripleDes, 168, M::Sha1),
    cs(0xc008, "TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA", "ECDHE-ECDSA-DES-CBC3-SHA", S3, K::Ecdhe, A::Ecdsa, B::TripleDes, 168, M::Sha1),
    cs(0x0016, "TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA", "EDH-RSA-DES-CBC3-SHA", S3, K::Dhe, A::Rsa, B::TripleDes, 168, M::Sha1),
    cs(0x0013, "TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA", "EDH-DSS-DES-CBC3-SHA", S3, K::Dhe, A::Dss, B::TripleDes, 168, M::Sha1),
    cs(0x0010, "TLS_DH_RSA_WITH_3DES_EDE_CBC_SHA", "DH-RSA-DES-CBC3-SHA", S3, K::Dh, A::Rsa, B::TripleDes, 168, M::Sha1),
    cs(0x000d, "TLS_DH_DSS_WITH_3DES_EDE_CBC_SHA", "DH-DSS-DES-CBC3-SHA", S3, K::Dh, A::Dss, B::TripleDes, 168, M::Sha1),
    cs(0xc017, "TLS_ECDH_anon_WITH_3DES_EDE_CBC_SHA", "AECDH-DES-CBC3-SHA", S3, K::Ecdh, A::None, B::TripleDes, 168, M::Sha1),
    cs(0x001b, "TLS_DH_anon_WITH_3DES_EDE_CBC_SHA", "ADH-DES-CBC3-SHA", S3, K::Dh, A::None, B::TripleDes, 168, M::Sha1),
    cs(0xc00d, "TLS_ECDH_RSA_WITH_3DES_EDE_CBC_SHA", "ECDH-RSA-DES-CBC3-SHA", S3, K::Ecdh, A::Rsa, B::TripleDes, 168, M::Sha1),
    cs(0xc003, "TLS_ECDH_ECDSA_WITH_3DES_EDE_CBC_SHA", "ECDH-ECDSA-DES-CBC3-SHA", S3, K::Ecdh, A::Ecdsa, B::TripleDes, 168, M::Sha1),
    cs(0x000a, "TLS_RSA_WITH_3DES_EDE_CBC_SHA", "DES-CBC3-SHA", S3, K::Rsa, A::Rsa, B::TripleDes, 168, M::Sha1),
    // DES and export grade
    cs(0x0063, "TLS_DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA", "EXP1024-DHE-DSS-DES-CBC-SHA", S3, K::Dhe, A::Dss, B::Des, 56, M::Sha1),
    cs(0x0015, "TLS_DHE_RSA_WITH_DES_CBC_SHA", "EDH-RSA-DES-CBC-SHA", S3, K::Dhe, A::Rsa, B::Des, 56, M::Sha1),
    cs(0x0012, "TLS_DHE_DSS_WITH_DES_CBC_SHA", "EDH-DSS-DES-CBC-SHA", S3, K::Dhe, A::Dss, B::Des, 56, M::Sha1),
    cs(0x000f, "TLS_DH_RSA_WITH_DES_CBC_SHA", "DH-RSA-DES-CBC-SHA", S3, K::Dh, A::Rsa, B::Des, 56, M::Sha1),
    cs(0x000c, "TLS_DH_DSS_WITH_DES_CBC_SHA", "DH-DSS-DES-CBC-SHA", S3, K::Dh, A::Dss, B::Des, 56, M::Sha1),
    cs(0x001a, "TLS_DH_anon_WITH_DES_CBC_SHA", "ADH-DES-CBC-SHA", S3, K::Dh, A::None, B::Des, 56, M::Sha1),
    cs(0x0009, "TLS_RSA_WITH_DES_CBC_SHA", "DES-CBC-SHA", S3, K::Rsa, A::Rsa, B::Des, 56, M::Sha1),
    cs(0x0062, "TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA", "EXP1024-DES-CBC-SHA", S3, K::Rsa, A::Rsa, B::Des, 56, M::Sha1),
    cs(0x0061, "TLS_RSA_EXPORT1024_WITH_RC2_CBC_56_MD5", "EXP1024-RC2-CBC-MD5", S3, K::Rsa, A::Rsa, B::Rc2, 56, M::Md5),
    cs(0x0065, "TLS_DHE_DSS_EXPORT1024_WITH_RC4_56_SHA", "EXP1024-DHE-DSS-RC4-SHA", S3, K::Dhe, A::Dss, B::Rc4, 56, M::Sha1),
    cs(0x0064, "TLS_RSA_EXPORT1024_WITH_RC4_56_SHA", "EXP1024-RC4-SHA", S3, K::Rsa, A::Rsa, B::Rc4, 56, M::Sha1),
    cs(0x0060, "TLS_RSA_EXPORT1024_WITH_RC4_56_MD5", "EXP1024-RC4-MD5", S3, K::Rsa, A::Rsa, B::Rc4, 56, M::Md5),
    cs(0x0014, "TLS_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA", "EXP-EDH-RSA-DES-CBC-SHA", S3, K::Dhe, A::Rsa, B::Des, 40, M::Sha1),
    cs(0x0011, "TLS_DHE_DSS_EXPORT_WITH_DES40_CBC_SHA", "EXP-EDH-DSS-DES-CBC-SHA", S3, K::Dhe, A::Dss, B::Des, 40, M::Sha1),
    cs(0x000e, "TLS_DH_RSA_EXPORT_WITH_DES40_CBC_SHA", "EXP-DH-RSA-DES-CBC-SHA", S3, K::Dh, A::Rsa, B::Des, 40, M::Sha1),
    cs(0x000b, "TLS_DH_DSS_EXPORT_WITH_DES40_CBC_SHA", "EXP-DH-DSS-DES-CBC-SHA", S3, K::Dh, A::Dss, B::Des, 40, M::Sha1),
    cs(0x0019, "TLS_DH_anon_EXPORT_WITH_DES40_CBC_SHA", "EXP-ADH-DES-CBC-SHA", S3, K::Dh, A::None, B::Des, 40, M::Sha1),
    cs(0x0008, "TLS_RSA_EXPORT_WITH_DES40_CBC_SHA", "EXP-DES-CBC-SHA", S3, K::Rsa, A::Rsa, B::Des, 40, M::Sha1),
    cs(0x0006, "TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5", "EXP-RC2-CBC-MD5", S3, K::Rsa, A::Rsa, B::Rc2, 40, M::Md5),
    cs(0x0017, "TLS_DH_anon_EXPORT_WITH_RC4_40_MD5", "EXP-ADH-RC4-MD5", S3, K::Dh, A::None, B::Rc4, 40, M::Md5),
    cs(0x0003, "TLS_RSA_EXPORT_WITH_RC4_40_MD5", "EXP-RC4-MD5", S3, K::Rsa, A::Rsa, B::Rc4, 40, M::Md5),
    // NULL encryption
    cs(0xc010, "TLS_ECDHE_RSA_WITH_NULL_SHA", "ECDHE-RSA-NULL-SHA", S3, K::Ecdhe, A::Rsa, B::Null, 0, M::Sha1),
    cs(0xc006, "TLS_ECDHE_ECDSA_WITH_NULL_SHA", "ECDHE-ECDSA-NULL-SHA", S3, K::Ecdhe, A::Ecdsa, B::Null, 0, M::Sha1),
    cs(0xc015, "TLS_ECDH_anon_WITH_NULL_SHA", "AECDH-NULL-SHA", S3, K::Ecdh, A::None, B::Null, 0, M::Sha1),
    cs(0xc00b, "TLS_ECDH_RSA_WITH_NULL_SHA", "ECDH-RSA-NULL-SHA", S3, K::Ecdh, A::Rsa, B::Null, 0, M::Sha1),
    cs(0xc001, "TLS_ECDH_ECDSA_WITH_NULL_SHA", "ECDH-ECDSA-NULL-SHA", S3, K::Ecdh, A::Ecdsa, B::Null, 0, M::Sha1),
    cs(0x003b, "TLS_RSA_WITH_NULL_SHA256", "NULL-SHA256", T12, K::Rsa, A::Rsa, B::Null, 0, M::Sha256),
    cs(0x0002, "TLS_RSA_WITH_NULL_SHA", "NULL-SHA", S3, K::Rsa, A::Rsa, B::Null, 0, M::Sha1),
    cs(0x0001, "TLS_RSA_WITH_NULL_MD5", "NULL-MD5", S3, K::Rsa, A::Rsa, B::Null, 0, M::Md5),
];

/// SSLv2 cipher kinds in the order they are offered.
pub static SSL2_CIPHERS: &[Ssl2Cipher] = &[
    Ssl2Cipher { code: [0x05, 0x00, 0x80], name: "SSL2_IDEA_128_CBC_WITH_MD5" },
    Ssl2Cipher { code: [0x03, 0x00, 0x80], name: "SSL2_RC2_128_CBC_WITH_MD5" },
    Ssl2Cipher { code: [0x01, 0x00, 0x80], name: "SSL2_RC4_128_WITH_MD5" },
    Ssl2Cipher { code: [0x07, 0x00, 0xc0], name: "SSL2_DES_192_EDE3_CBC_WITH_MD5" },
    Ssl2Cipher { code: [0x08, 0x00, 0x80], name: "SSL2_RC4_64_WITH_MD5" },
    Ssl2Cipher { code: [0x06, 0x00, 0x40], name: "SSL2_DES_64_CBC_WITH_MD5" },
    Ssl2Cipher { code: [0x04, 0x00, 0x80], name: "SSL2_RC2_128_CBC_EXPORT40_WITH_MD5" },
    Ssl2Cipher { code: [0x02, 0x00, 0x80], name: "SSL2_RC4_128_EXPORT40_WITH_MD5" },
    Ssl2Cipher { code: [0x00, 0x00, 0x00], name: "TLS_NULL_WITH_NULL_NULL" },
];
