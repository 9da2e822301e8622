//! stark-typed-sign: STARK curve signing for StarkNet typed data
//!
//! StarkNet STARK 곡선 위의 ECDSA 서명, Pedersen 해시, 타입 데이터 메시지 해시 라이브러리
//!
//! # 예시
//!
//! ```rust
//! use stark_typed_sign::{FieldElement, KeyPair};
//!
//! let pair = KeyPair::from_hex("0x1234567890987654321").unwrap();
//! let hash = FieldElement::from_hex("0x1234").unwrap();
//!
//! let signature = pair.sign(&hash).unwrap();
//! assert!(pair.verify(&hash, &signature));
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod crypto;
pub mod errors;

// Re-exports
pub use config::{NonceStrategy, SignerConfig};
pub use crypto::starknet::{
    chain_hash, encode_typed_data_hash, pedersen_hash, CurvePoint, FieldElement, KeyPair, Scalar,
    Signature, StarkNetDomain, TypeSchema, TypedData, TypedDataField,
};
pub use crypto::{Signer, TypedDataHasher};
pub use errors::{StarkError, StarkResult};
