//! StarkNet Keccak
//!
//! Keccak256 해시를 250비트로 잘라 필드 원소로 만드는 `starknet_keccak` 과
//! 함수 이름으로부터 엔트리 포인트 선택자를 계산하는 기능을 제공합니다.

use super::field::FieldElement;
use num_bigint::BigUint;
use sha3::{Digest, Keccak256};

/// 데이터의 Keccak256 해시를 계산합니다.
///
/// # Arguments
///
/// * `data` - 해시할 데이터
///
/// # Returns
///
/// 32바이트 해시 값
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak256 해시의 하위 250비트
///
/// 2^250 < p 이므로 결과는 항상 유효한 필드 원소입니다.
///
/// # Example
///
/// ```rust
/// use stark_typed_sign::crypto::starknet::starknet_keccak;
///
/// let hash = starknet_keccak(b"transfer");
/// assert!(hash.bits() <= 250);
/// ```
pub fn starknet_keccak(data: &[u8]) -> FieldElement {
    let mut hash = keccak256(data);
    hash[0] &= 0x03;
    FieldElement::from_biguint_unchecked(BigUint::from_bytes_be(&hash))
}

/// 함수 이름의 엔트리 포인트 선택자
pub fn selector_from_name(name: &str) -> FieldElement {
    starknet_keccak(name.as_bytes())
}
