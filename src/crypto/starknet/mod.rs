//! StarkNet Cryptography Module
//!
//! STARK 곡선 위의 암호화 기본 요소를 제공합니다.
//!
//! # 주요 기능
//!
//! - 유한체 및 곡선 점 연산
//! - Pedersen 해싱 (체인 해시 포함)
//! - StarkNet ECDSA 서명 및 검증 (RFC 6979 결정적 nonce)
//! - 키 쌍 생성 및 공개키 파생
//! - 타입 데이터 메시지 해시 (레거시 revision 0)

pub mod constants;
mod curve;
mod ecdsa;
mod field;
mod keccak;
mod keys;
mod pedersen;
mod rfc6979;
mod scalar;
mod short_string;
mod typed_data;

pub use curve::{is_on_curve, CurvePoint};
pub use ecdsa::{sign_hash, sign_with_nonce, verify, verify_with_x, Signature};
pub use field::FieldElement;
pub use keccak::{keccak256, selector_from_name, starknet_keccak};
pub use keys::{derive_public_key, get_public_key, KeyPair};
pub use pedersen::{chain_hash, pedersen_hash, HashChain};
pub use rfc6979::generate_k;
pub use scalar::Scalar;
pub use short_string::{decode_short_string, encode_short_string, SHORT_STRING_MAX_LEN};
pub use typed_data::{
    encode_typed_data_hash, StarkNetDomain, TypeSchema, TypedData, TypedDataField,
    DOMAIN_TYPE_NAME, MESSAGE_PREFIX,
};
