//! STARK Field Element
//!
//! 소수 p = 2^251 + 17·2^192 + 1 위의 유한체 원소입니다.
//! 모든 값은 [0, p) 범위의 정규형으로만 존재하며, 산술 결과도 항상 정규형으로 환원됩니다.
//!
//! # 참조
//!
//! - [Felt](https://docs.starknet.io/architecture-and-concepts/cryptography/)

use super::constants::FIELD_PRIME;
use crate::errors::{StarkError, StarkResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 유한체 원소 (항상 p 미만)
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

impl_modular_ops!(FieldElement);

/// Tonelli-Shanks 제곱근 계산용 상수
struct SqrtParams {
    /// p - 1 = 2^two_adicity · odd_part
    odd_part: BigUint,
    two_adicity: u64,
    /// (odd_part + 1) / 2
    half_odd_part_plus_one: BigUint,
    /// (p - 1) / 2 (Euler 판정 지수)
    euler_exponent: BigUint,
    /// 비이차잉여 z 에 대해 z^odd_part
    root_of_unity: BigUint,
}

static SQRT_PARAMS: Lazy<SqrtParams> = Lazy::new(|| {
    let p = &*FIELD_PRIME;
    let p_minus_one = p - 1u32;

    let mut odd_part = p_minus_one.clone();
    let mut two_adicity = 0u64;
    while !odd_part.bit(0) {
        odd_part >>= 1usize;
        two_adicity += 1;
    }

    let euler_exponent = &p_minus_one >> 1usize;

    // 2부터 올라가며 최초의 비이차잉여 탐색
    let mut non_residue = BigUint::from(2u32);
    while non_residue.modpow(&euler_exponent, p) != p_minus_one {
        non_residue += 1u32;
    }

    SqrtParams {
        root_of_unity: non_residue.modpow(&odd_part, p),
        half_odd_part_plus_one: (&odd_part + 1u32) >> 1usize,
        odd_part,
        two_adicity,
        euler_exponent,
    }
});

impl FieldElement {
    /// 0
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// 1
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// 정수로부터 생성 (p 이상이면 오류)
    ///
    /// # Arguments
    ///
    /// * `value` - [0, p) 범위의 정수
    ///
    /// # Returns
    ///
    /// p 이상이면 `ValueOutOfRange`
    pub fn from_biguint(value: BigUint) -> StarkResult<Self> {
        if value >= *FIELD_PRIME {
            return Err(StarkError::ValueOutOfRange {
                message: format!("0x{} is not below the field prime", value.to_str_radix(16)),
            });
        }
        Ok(Self(value))
    }

    /// 임의의 정수를 p로 환원하여 생성
    pub fn from_biguint_reduced(value: &BigUint) -> Self {
        Self(value % &*FIELD_PRIME)
    }

    pub(crate) fn from_biguint_unchecked(value: BigUint) -> Self {
        debug_assert!(value < *FIELD_PRIME);
        Self(value)
    }

    /// 빅엔디안 바이트열로부터 생성 (최대 32바이트)
    pub fn from_bytes_be(bytes: &[u8]) -> StarkResult<Self> {
        if bytes.len() > 32 {
            return Err(StarkError::ValueOutOfRange {
                message: format!("{} bytes do not fit in a field element", bytes.len()),
            });
        }
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    /// 16진수 문자열로부터 생성 ("0x" 접두사 선택)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let one = FieldElement::from_hex("0x1")?;
    /// ```
    pub fn from_hex(hex_str: &str) -> StarkResult<Self> {
        Self::from_biguint(parse_hex_biguint(hex_str)?)
    }

    /// 10진수 문자열로부터 생성
    pub fn from_dec_str(dec_str: &str) -> StarkResult<Self> {
        Self::from_biguint(parse_dec_biguint(dec_str)?)
    }

    /// 32바이트 빅엔디안 표현
    pub fn to_bytes_be(&self) -> [u8; 32] {
        biguint_to_bytes32(&self.0)
    }

    /// "0x" 접두사가 붙은 최소 길이 16진수 문자열
    pub fn to_hex_string(&self) -> String {
        format!("{self:#x}")
    }

    /// "0x" + 64자리 고정 길이 16진수 문자열
    pub fn to_fixed_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes_be()))
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn to_biguint(&self) -> BigUint {
        self.0.clone()
    }

    /// 유효 비트 수
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub(crate) fn add_elem(a: &Self, b: &Self) -> Self {
        let sum = &a.0 + &b.0;
        if sum >= *FIELD_PRIME {
            Self(sum - &*FIELD_PRIME)
        } else {
            Self(sum)
        }
    }

    pub(crate) fn sub_elem(a: &Self, b: &Self) -> Self {
        if a.0 >= b.0 {
            Self(&a.0 - &b.0)
        } else {
            Self(&a.0 + &*FIELD_PRIME - &b.0)
        }
    }

    pub(crate) fn mul_elem(a: &Self, b: &Self) -> Self {
        Self((&a.0 * &b.0) % &*FIELD_PRIME)
    }

    pub(crate) fn neg_elem(a: &Self) -> Self {
        if a.is_zero() {
            Self::zero()
        } else {
            Self(&*FIELD_PRIME - &a.0)
        }
    }

    pub fn square(&self) -> Self {
        Self::mul_elem(self, self)
    }

    pub fn double(&self) -> Self {
        Self::add_elem(self, self)
    }

    /// 거듭제곱 self^exponent mod p
    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self(self.0.modpow(exponent, &FIELD_PRIME))
    }

    /// 곱셈 역원 (페르마 소정리, x^(p-2))
    ///
    /// # Returns
    ///
    /// 0 이면 `DivisionByZero`
    pub fn inverse(&self) -> StarkResult<Self> {
        if self.is_zero() {
            return Err(StarkError::DivisionByZero);
        }
        Ok(self.pow(&(&*FIELD_PRIME - 2u32)))
    }

    /// self / rhs
    pub fn checked_div(&self, rhs: &Self) -> StarkResult<Self> {
        Ok(self * &rhs.inverse()?)
    }

    /// 이차잉여 여부 (0 포함)
    pub fn is_square(&self) -> bool {
        let euler = self.0.modpow(&SQRT_PARAMS.euler_exponent, &FIELD_PRIME);
        self.is_zero() || euler.is_one()
    }

    /// 제곱근 (Tonelli-Shanks)
    ///
    /// 두 근 중 어느 쪽이 반환될지는 보장하지 않습니다. 다른 근은 `-root` 입니다.
    ///
    /// # Returns
    ///
    /// 이차잉여가 아니면 `None`
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        if !self.is_square() {
            return None;
        }

        let p = &*FIELD_PRIME;
        let params = &*SQRT_PARAMS;

        let mut m = params.two_adicity;
        let mut c = params.root_of_unity.clone();
        let mut t = self.0.modpow(&params.odd_part, p);
        let mut root = self.0.modpow(&params.half_odd_part_plus_one, p);

        while !t.is_one() {
            // t^(2^i) = 1 을 만족하는 최소 i
            let mut i = 0u64;
            let mut probe = t.clone();
            while !probe.is_one() {
                probe = (&probe * &probe) % p;
                i += 1;
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = (&b * &b) % p;
            }

            m = i;
            c = (&b * &b) % p;
            t = (&t * &c) % p;
            root = (&root * &b) % p;
        }

        Some(Self(root))
    }
}

/// 32바이트 빅엔디안 고정 길이 인코딩 (값은 2^256 미만이어야 함)
pub(crate) fn biguint_to_bytes32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    let start = 32usize.saturating_sub(bytes.len());
    out[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    out
}

/// 16진수 문자열 파싱 ("0x"/"0X" 접두사 선택)
pub(crate) fn parse_hex_biguint(hex_str: &str) -> StarkResult<BigUint> {
    let digits = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(StarkError::parse(
            "hex",
            format!("invalid hex string: {hex_str:?}"),
        ));
    }

    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        StarkError::parse("hex", format!("invalid hex string: {hex_str:?}"))
    })
}

/// 10진수 문자열 파싱
pub(crate) fn parse_dec_biguint(dec_str: &str) -> StarkResult<BigUint> {
    if dec_str.is_empty() || !dec_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StarkError::parse(
            "decimal",
            format!("invalid decimal string: {dec_str:?}"),
        ));
    }

    BigUint::parse_bytes(dec_str.as_bytes(), 10).ok_or_else(|| {
        StarkError::parse("decimal", format!("invalid decimal string: {dec_str:?}"))
    })
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for FieldElement {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<bool> for FieldElement {
    fn from(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl TryFrom<BigUint> for FieldElement {
    type Error = StarkError;

    fn try_from(value: BigUint) -> StarkResult<Self> {
        Self::from_biguint(value)
    }
}

impl From<FieldElement> for BigUint {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

/// "0x" 접두사면 16진수, 아니면 10진수
impl FromStr for FieldElement {
    type Err = StarkError;

    fn from_str(s: &str) -> StarkResult<Self> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.0.to_str_radix(16))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self:#x})")
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Number(number) => Ok(Self::from(number)),
        }
    }
}

#[cfg(feature = "felt")]
impl From<starknet_types_core::felt::Felt> for FieldElement {
    fn from(felt: starknet_types_core::felt::Felt) -> Self {
        // Felt 는 항상 p 미만
        Self(BigUint::from_bytes_be(&felt.to_bytes_be()))
    }
}

#[cfg(feature = "felt")]
impl From<&FieldElement> for starknet_types_core::felt::Felt {
    fn from(value: &FieldElement) -> Self {
        starknet_types_core::felt::Felt::from_bytes_be(&value.to_bytes_be())
    }
}

#[cfg(feature = "felt")]
impl From<FieldElement> for starknet_types_core::felt::Felt {
    fn from(value: FieldElement) -> Self {
        Self::from(&value)
    }
}
