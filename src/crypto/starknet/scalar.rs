//! Curve Order Scalars
//!
//! 곡선 위수 n 을 법으로 하는 정수입니다. 개인키, nonce k, 서명 중간값 w 에 사용됩니다.

use super::constants::EC_ORDER;
use super::field::{biguint_to_bytes32, parse_hex_biguint, FieldElement};
use crate::errors::{StarkError, StarkResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use std::fmt;

/// n 미만의 정수
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scalar(BigUint);

impl_modular_ops!(Scalar);

impl Scalar {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// 정수로부터 생성 (n 이상이면 `ValueOutOfRange`)
    pub fn from_biguint(value: BigUint) -> StarkResult<Self> {
        if value >= *EC_ORDER {
            return Err(StarkError::ValueOutOfRange {
                message: format!("0x{} is not below the curve order", value.to_str_radix(16)),
            });
        }
        Ok(Self(value))
    }

    /// 임의의 정수를 n 으로 환원하여 생성
    pub fn from_biguint_reduced(value: &BigUint) -> Self {
        Self(value % &*EC_ORDER)
    }

    pub(crate) fn from_biguint_unchecked(value: BigUint) -> Self {
        debug_assert!(value < *EC_ORDER);
        Self(value)
    }

    /// 필드 원소를 n 으로 환원
    pub fn from_field(value: &FieldElement) -> Self {
        Self::from_biguint_reduced(value.as_biguint())
    }

    /// 16진수 문자열로부터 생성
    pub fn from_hex(hex_str: &str) -> StarkResult<Self> {
        Self::from_biguint(parse_hex_biguint(hex_str)?)
    }

    /// 암호학적 난수 생성기로 [1, n) 범위의 값 생성
    ///
    /// 252비트 후보를 뽑아 범위를 벗어나면 다시 뽑습니다.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            bytes[0] &= 0x0f;

            let candidate = BigUint::from_bytes_be(&bytes);
            if !candidate.is_zero() && candidate < *EC_ORDER {
                return Self(candidate);
            }
        }
    }

    /// n < p 이므로 항상 유효한 필드 원소
    pub fn to_field(&self) -> FieldElement {
        FieldElement::from_biguint_unchecked(self.0.clone())
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        biguint_to_bytes32(&self.0)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub(crate) fn add_elem(a: &Self, b: &Self) -> Self {
        let sum = &a.0 + &b.0;
        if sum >= *EC_ORDER {
            Self(sum - &*EC_ORDER)
        } else {
            Self(sum)
        }
    }

    pub(crate) fn sub_elem(a: &Self, b: &Self) -> Self {
        if a.0 >= b.0 {
            Self(&a.0 - &b.0)
        } else {
            Self(&a.0 + &*EC_ORDER - &b.0)
        }
    }

    pub(crate) fn mul_elem(a: &Self, b: &Self) -> Self {
        Self((&a.0 * &b.0) % &*EC_ORDER)
    }

    pub(crate) fn neg_elem(a: &Self) -> Self {
        if a.is_zero() {
            Self::zero()
        } else {
            Self(&*EC_ORDER - &a.0)
        }
    }

    /// n 을 법으로 하는 역원
    pub fn inverse(&self) -> StarkResult<Self> {
        if self.is_zero() {
            return Err(StarkError::DivisionByZero);
        }
        Ok(Self(self.0.modpow(&(&*EC_ORDER - 2u32), &EC_ORDER)))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.0.to_str_radix(16))
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{})", self.0.to_str_radix(16))
    }
}
