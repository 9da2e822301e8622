//! STARK Key Pairs
//!
//! 개인키 d 와 공개키 Q = d·G 를 관리합니다.
//!
//! StarkNet 의 "공개키" 는 Q 의 x 좌표 하나입니다. 전체 점이 필요한 경우
//! [`KeyPair::public_point`] 또는 [`KeyPair::uncompressed_public_key`] 를 사용합니다.
//!
//! # 참조
//!
//! - [StarkNet Accounts](https://docs.starknet.io/documentation/architecture_and_concepts/Accounts/)

use super::constants::{EC_ORDER, GENERATOR};
use super::curve::CurvePoint;
use super::ecdsa::{self, Signature};
use super::field::FieldElement;
use super::scalar::Scalar;
use super::typed_data::TypedData;
use crate::config::SignerConfig;
use crate::crypto::traits::Signer;
use crate::errors::{StarkError, StarkResult};
use rand::rngs::OsRng;
use std::fmt;

/// STARK 키 쌍
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: Scalar,
    public_point: CurvePoint,
    public_key: FieldElement,
    public_key_y: FieldElement,
}

impl KeyPair {
    /// 개인키로 키 쌍 생성
    ///
    /// # Arguments
    ///
    /// * `private_key` - [1, n) 범위의 개인키
    ///
    /// # Returns
    ///
    /// 0 이거나 n 이상이면 `InvalidPrivateKey`
    pub fn from_private_key(private_key: &FieldElement) -> StarkResult<Self> {
        let scalar = private_key_scalar(private_key)?;
        Self::from_scalar(scalar)
    }

    /// 16진수 개인키로 키 쌍 생성
    pub fn from_hex(private_key_hex: &str) -> StarkResult<Self> {
        let private_key = FieldElement::from_hex(private_key_hex).map_err(|e| {
            StarkError::InvalidPrivateKey {
                message: e.to_string(),
            }
        })?;
        Self::from_private_key(&private_key)
    }

    /// OS 난수로 새 키 쌍 생성
    pub fn generate() -> StarkResult<Self> {
        Self::from_scalar(Scalar::random(&mut OsRng))
    }

    fn from_scalar(private_key: Scalar) -> StarkResult<Self> {
        let public_point = derive_point(&private_key)?;
        let (x, y) = public_point
            .coordinates()
            .map(|(x, y)| (x.clone(), y.clone()))
            .ok_or_else(|| StarkError::PointNotOnCurve {
                message: "public key is the point at infinity".into(),
            })?;

        tracing::debug!(public_key = %x, "derived STARK key pair");

        Ok(Self {
            private_key,
            public_point,
            public_key: x,
            public_key_y: y,
        })
    }

    /// 개인키 스칼라
    pub fn secret_scalar(&self) -> &Scalar {
        &self.private_key
    }

    /// 공개키 점 Q
    pub fn public_point(&self) -> &CurvePoint {
        &self.public_point
    }

    /// StarkNet 공개키 (Q 의 x 좌표)
    pub fn public_key(&self) -> &FieldElement {
        &self.public_key
    }

    /// Q 의 y 좌표
    pub fn public_key_y(&self) -> &FieldElement {
        &self.public_key_y
    }

    /// 비압축 공개키 0x04 || x (32바이트) || y (32바이트)
    pub fn uncompressed_public_key(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0] = 0x04;
        bytes[1..33].copy_from_slice(&self.public_key.to_bytes_be());
        bytes[33..].copy_from_slice(&self.public_key_y.to_bytes_be());
        bytes
    }

    /// 비압축 공개키 16진수 문자열 ("0x" + 130자리)
    pub fn uncompressed_public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.uncompressed_public_key()))
    }

    /// 기본 설정 (RFC 6979) 으로 메시지 해시에 서명
    pub fn sign(&self, message_hash: &FieldElement) -> StarkResult<Signature> {
        self.sign_with(message_hash, &SignerConfig::default())
    }

    /// 지정한 설정으로 메시지 해시에 서명
    pub fn sign_with(
        &self,
        message_hash: &FieldElement,
        config: &SignerConfig,
    ) -> StarkResult<Signature> {
        ecdsa::sign_hash(&self.private_key, message_hash, config)
    }

    /// 타입 데이터를 해시한 뒤 서명
    ///
    /// # Arguments
    ///
    /// * `typed_data` - 서명할 타입 데이터
    /// * `account` - 서명자 계정 주소
    pub fn sign_typed_data(
        &self,
        typed_data: &TypedData,
        account: &FieldElement,
    ) -> StarkResult<Signature> {
        let hash = typed_data.message_hash(account)?;
        self.sign(&hash)
    }

    /// 이 키 쌍의 공개키로 서명 검증
    pub fn verify(&self, message_hash: &FieldElement, signature: &Signature) -> bool {
        ecdsa::verify(message_hash, signature, &self.public_point)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Signer for KeyPair {
    fn public_key(&self) -> FieldElement {
        self.public_key.clone()
    }

    fn sign_hash(&self, message_hash: &FieldElement) -> StarkResult<Signature> {
        self.sign(message_hash)
    }
}

fn private_key_scalar(private_key: &FieldElement) -> StarkResult<Scalar> {
    if private_key.is_zero() || private_key.as_biguint() >= &*EC_ORDER {
        return Err(StarkError::InvalidPrivateKey {
            message: "private key must be in [1, n)".into(),
        });
    }
    Ok(Scalar::from_biguint_unchecked(private_key.to_biguint()))
}

fn derive_point(private_key: &Scalar) -> StarkResult<CurvePoint> {
    let point = GENERATOR.multiply(private_key);
    if point.is_identity() || !point.is_on_curve() {
        return Err(StarkError::PointNotOnCurve {
            message: "derived public key is not a valid curve point".into(),
        });
    }
    Ok(point)
}

/// 개인키에서 공개키 점 파생
pub fn derive_public_key(private_key: &FieldElement) -> StarkResult<CurvePoint> {
    derive_point(&private_key_scalar(private_key)?)
}

/// 개인키에서 StarkNet 공개키 (x 좌표) 파생
///
/// # Arguments
///
/// * `private_key` - StarkNet 개인키
///
/// # Returns
///
/// StarkNet 공개키
pub fn get_public_key(private_key: &FieldElement) -> StarkResult<FieldElement> {
    let point = derive_public_key(private_key)?;
    point
        .x()
        .cloned()
        .ok_or_else(|| StarkError::PointNotOnCurve {
            message: "public key is the point at infinity".into(),
        })
}
