//! Cryptographic Utilities
//!
//! STARK 곡선 기반 서명과 해싱 기능을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `starknet`: STARK 곡선, Pedersen 해시, ECDSA, 타입 데이터
//! - `traits`: 서명자 및 타입 데이터 해셔 공통 트레이트
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use stark_typed_sign::crypto::starknet::{KeyPair, TypedData};
//!
//! // 개인키에서 키 쌍 생성
//! let pair = KeyPair::from_hex("0x1234567890987654321")?;
//!
//! // 타입 데이터 서명
//! let typed_data: TypedData = serde_json::from_str(json)?;
//! let signature = pair.sign_typed_data(&typed_data, pair.public_key())?;
//! assert!(pair.verify(&typed_data.message_hash(pair.public_key())?, &signature));
//! ```

pub mod starknet;
pub mod traits;

pub use starknet::{
    chain_hash, encode_typed_data_hash, get_public_key, pedersen_hash, sign_hash, verify,
    verify_with_x, CurvePoint, FieldElement, KeyPair, Scalar, Signature, StarkNetDomain,
    TypeSchema, TypedData, TypedDataField,
};
pub use traits::{Signer, TypedDataHasher};
