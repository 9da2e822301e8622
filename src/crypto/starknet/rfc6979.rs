//! Deterministic Nonce Generation (RFC 6979)
//!
//! HMAC-SHA256 기반 HMAC-DRBG 로 개인키와 메시지 해시에서 서명 nonce k 를 결정적으로 생성합니다.
//! 후보값은 256비트 출력을 4비트 오른쪽 시프트하여 곡선 위수(252비트)에 맞춥니다.
//!
//! # 참조
//!
//! - [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979#section-3.2)

use super::constants::EC_ORDER;
use super::field::FieldElement;
use super::scalar::Scalar;
use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn hmac_sha256(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// RFC 6979 3.2 절의 K, V 상태
struct HmacDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl HmacDrbg {
    fn new(private_key: &[u8], message_hash: &[u8], extra: &[u8]) -> Self {
        let mut k = [0u8; 32];
        let mut v = [1u8; 32];
        for separator in [0x00u8, 0x01] {
            let input = [&v[..], &[separator][..], private_key, message_hash, extra];
            k = hmac_sha256(&k, &input);
            v = hmac_sha256(&k, &[&v[..]]);
        }
        Self { k, v }
    }

    fn next_block(&mut self) -> [u8; 32] {
        self.v = hmac_sha256(&self.k, &[&self.v[..]]);
        let block = self.v;
        self.k = hmac_sha256(&self.k, &[&self.v[..], &[0x00][..]]);
        self.v = hmac_sha256(&self.k, &[&self.v[..]]);
        block
    }
}

/// 결정적 nonce k 생성
///
/// # Arguments
///
/// * `message_hash` - 서명할 메시지 해시 (환원하지 않은 32바이트)
/// * `private_key` - 개인키
/// * `seed` - 추가 엔트로피. 첫 시도는 `None`, 재시도마다 1, 2, ... (최소 길이 빅엔디안)
///
/// # Returns
///
/// [1, n) 범위의 k
pub fn generate_k(
    message_hash: &FieldElement,
    private_key: &Scalar,
    seed: Option<&FieldElement>,
) -> Scalar {
    let seed_bytes = seed.map(FieldElement::to_bytes_be).unwrap_or([0u8; 32]);
    let first_nonzero = seed_bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(seed_bytes.len());

    let mut drbg = HmacDrbg::new(
        &private_key.to_bytes_be(),
        &message_hash.to_bytes_be(),
        &seed_bytes[first_nonzero..],
    );

    loop {
        let candidate = BigUint::from_bytes_be(&drbg.next_block()) >> 4usize;
        if !candidate.is_zero() && candidate < *EC_ORDER {
            return Scalar::from_biguint_unchecked(candidate);
        }
    }
}
