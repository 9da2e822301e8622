//! STARK Curve ECDSA
//!
//! StarkNet의 STARK 곡선 (ECDSA) 서명 및 검증을 제공합니다.
//!
//! 표준 ECDSA 와 달리 메시지 해시, r, w = s^-1 이 모두 2^251 미만이어야 하며,
//! 조건을 만족하지 않는 nonce 는 버리고 다음 nonce 로 다시 시도합니다.
//!
//! # 참조
//!
//! - [StarkNet Signatures](https://docs.starknet.io/documentation/architecture_and_concepts/Accounts/signature_verification/)
//! - [STARK curve ECDSA](https://docs.starkware.co/starkex/crypto/stark-curve.html)

use super::constants::{EC_ORDER, ELEMENT_UPPER_BOUND, GENERATOR};
use super::curve::CurvePoint;
use super::field::FieldElement;
use super::rfc6979::generate_k;
use super::scalar::Scalar;
use crate::config::{NonceStrategy, SignerConfig};
use crate::errors::{StarkError, StarkResult};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// STARK 서명 (r, s)
///
/// r 과 s 는 모두 0 이 아닙니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SignatureParts")]
pub struct Signature {
    r: FieldElement,
    s: FieldElement,
}

#[derive(Deserialize)]
struct SignatureParts {
    r: FieldElement,
    s: FieldElement,
}

impl TryFrom<SignatureParts> for Signature {
    type Error = StarkError;

    fn try_from(parts: SignatureParts) -> StarkResult<Self> {
        Self::new(parts.r, parts.s)
    }
}

impl Signature {
    /// 새 서명 생성
    ///
    /// # Returns
    ///
    /// r 또는 s 가 0 이면 `InvalidSignature`
    pub fn new(r: FieldElement, s: FieldElement) -> StarkResult<Self> {
        if r.is_zero() || s.is_zero() {
            return Err(StarkError::InvalidSignature {
                message: "r and s must be non-zero".into(),
            });
        }
        Ok(Self { r, s })
    }

    pub fn r(&self) -> &FieldElement {
        &self.r
    }

    pub fn s(&self) -> &FieldElement {
        &self.s
    }

    /// [r, s]
    pub fn to_felts(&self) -> [FieldElement; 2] {
        [self.r.clone(), self.s.clone()]
    }

    /// [r, s] 에서 생성
    pub fn from_felts(felts: [FieldElement; 2]) -> StarkResult<Self> {
        let [r, s] = felts;
        Self::new(r, s)
    }

    /// 16진수 문자열로 변환 (각각 "0x" + 64자리)
    pub fn to_hex(&self) -> (String, String) {
        (self.r.to_fixed_hex_string(), self.s.to_fixed_hex_string())
    }

    /// 16진수 문자열에서 생성
    pub fn from_hex(r_hex: &str, s_hex: &str) -> StarkResult<Self> {
        let r = parse_component(r_hex)?;
        let s = parse_component(s_hex)?;
        Self::new(r, s)
    }

    /// 계정 컨트랙트 `is_valid_signature` 호출 인자 [hash, 2, r, s]
    pub fn to_calldata(&self, message_hash: &FieldElement) -> Vec<FieldElement> {
        vec![
            message_hash.clone(),
            FieldElement::from(2u64),
            self.r.clone(),
            self.s.clone(),
        ]
    }
}

fn parse_component(hex_str: &str) -> StarkResult<FieldElement> {
    FieldElement::from_hex(hex_str).map_err(|e| StarkError::InvalidSignature {
        message: format!("Invalid hex: {e}"),
    })
}

fn below_upper_bound(value: &BigUint) -> bool {
    !value.is_zero() && *value < *ELEMENT_UPPER_BOUND
}

fn ensure_signable(message_hash: &FieldElement) -> StarkResult<()> {
    if message_hash.as_biguint() >= &*ELEMENT_UPPER_BOUND {
        return Err(StarkError::InvalidMessageHash {
            message: format!("{message_hash} is not below 2^251"),
        });
    }
    Ok(())
}

fn ensure_private_key(private_key: &Scalar) -> StarkResult<()> {
    if private_key.is_zero() {
        return Err(StarkError::InvalidPrivateKey {
            message: "private key must be non-zero".into(),
        });
    }
    Ok(())
}

/// nonce k 로 한 번 서명 시도 (조건 불만족 시 `None`)
fn try_sign(private_key: &Scalar, z: &Scalar, k: &Scalar) -> Option<Signature> {
    if k.is_zero() {
        return None;
    }

    let r = GENERATOR.multiply(k).x()?.clone();
    if !below_upper_bound(r.as_biguint()) {
        return None;
    }

    // r < 2^251 < n
    let r_scalar = Scalar::from_biguint_unchecked(r.to_biguint());
    let sum = z + &(&r_scalar * private_key);
    let w = k * &sum.inverse().ok()?;
    if !below_upper_bound(w.as_biguint()) {
        return None;
    }

    let s = w.inverse().ok()?;
    Some(Signature { r, s: s.to_field() })
}

/// 지정한 nonce 로 메시지 해시에 서명
///
/// 외부에서 nonce 를 관리하는 경우에 사용합니다. nonce 가 조건을 만족하지 않으면
/// 재시도 없이 `SigningFailed` 를 반환합니다.
///
/// # Arguments
///
/// * `private_key` - 개인키
/// * `message_hash` - 서명할 메시지 해시 (2^251 미만)
/// * `k` - nonce
pub fn sign_with_nonce(
    private_key: &Scalar,
    message_hash: &FieldElement,
    k: &Scalar,
) -> StarkResult<Signature> {
    ensure_signable(message_hash)?;
    ensure_private_key(private_key)?;

    try_sign(private_key, &Scalar::from_field(message_hash), k)
        .ok_or(StarkError::SigningFailed { attempts: 1 })
}

/// 메시지 해시에 서명
///
/// # Arguments
///
/// * `private_key` - 개인키
/// * `message_hash` - 서명할 메시지 해시 (2^251 미만)
/// * `config` - nonce 생성 방식과 재시도 횟수
///
/// # Returns
///
/// 서명 (r, s)
pub fn sign_hash(
    private_key: &Scalar,
    message_hash: &FieldElement,
    config: &SignerConfig,
) -> StarkResult<Signature> {
    ensure_signable(message_hash)?;
    ensure_private_key(private_key)?;

    let z = Scalar::from_field(message_hash);
    let mut seed: Option<FieldElement> = None;

    for attempt in 1..=config.max_attempts() {
        let k = match config.nonce_strategy() {
            NonceStrategy::Deterministic => generate_k(message_hash, private_key, seed.as_ref()),
            NonceStrategy::Random => Scalar::random(&mut OsRng),
        };

        if let Some(signature) = try_sign(private_key, &z, &k) {
            return Ok(signature);
        }

        tracing::debug!(attempt, "signing nonce rejected, retrying");
        seed = Some(match seed {
            Some(previous) => previous + FieldElement::one(),
            None => FieldElement::one(),
        });
    }

    Err(StarkError::SigningFailed {
        attempts: config.max_attempts(),
    })
}

/// 곡선 연산 전 범위 검사, 통과 시 w = s^-1 반환
fn precheck(message_hash: &FieldElement, signature: &Signature) -> Option<Scalar> {
    let s = signature.s.as_biguint();
    if s.is_zero() || *s >= *EC_ORDER {
        return None;
    }
    if !below_upper_bound(signature.r.as_biguint()) {
        return None;
    }
    if message_hash.as_biguint() >= &*ELEMENT_UPPER_BOUND {
        return None;
    }

    let w = Scalar::from_biguint_unchecked(s.clone()).inverse().ok()?;
    below_upper_bound(w.as_biguint()).then_some(w)
}

/// w·sum 의 x 좌표가 r 과 같은지 확인
fn matches_r(sum: &CurvePoint, w: &Scalar, r: &FieldElement) -> bool {
    sum.multiply(w).x() == Some(r)
}

/// 서명 검증
///
/// # Arguments
///
/// * `message_hash` - 서명된 메시지 해시
/// * `signature` - 검증할 서명
/// * `public_key` - 공개키 점 Q
///
/// # Returns
///
/// 검증 성공 여부 (잘못된 입력은 모두 `false`)
pub fn verify(message_hash: &FieldElement, signature: &Signature, public_key: &CurvePoint) -> bool {
    let Some(w) = precheck(message_hash, signature) else {
        return false;
    };
    if public_key.is_identity() || !public_key.is_on_curve() {
        return false;
    }

    let z_g = GENERATOR.multiply(&Scalar::from_field(message_hash));
    let r_q = public_key.multiply(&Scalar::from_field(&signature.r));
    matches_r(&z_g.add(&r_q), &w, &signature.r)
}

/// x 좌표만으로 서명 검증
///
/// y 를 복원하여 ±y 두 점 모두 시도합니다.
pub fn verify_with_x(
    message_hash: &FieldElement,
    signature: &Signature,
    public_key_x: &FieldElement,
) -> bool {
    let Some(w) = precheck(message_hash, signature) else {
        return false;
    };
    let Ok(public_key) = CurvePoint::from_x(public_key_x) else {
        return false;
    };

    let z_g = GENERATOR.multiply(&Scalar::from_field(message_hash));
    let r_q = public_key.multiply(&Scalar::from_field(&signature.r));
    matches_r(&z_g.add(&r_q), &w, &signature.r) || matches_r(&z_g.sub(&r_q), &w, &signature.r)
}
