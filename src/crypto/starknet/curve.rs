//! STARK Curve Points
//!
//! 짧은 바이어슈트라스 곡선 y^2 = x^3 + alpha·x + beta (mod p) 위의 점 연산입니다.
//!
//! - [`CurvePoint`]: 공개 API용 아핀 좌표 (무한원점 포함)
//! - `ProjectivePoint`: 내부 연산용 야코비안 좌표 (역원 계산 없이 덧셈/배가)
//!
//! # 참조
//!
//! - [STARK curve](https://docs.starkware.co/starkex/crypto/stark-curve.html)
//! - [Jacobian coordinates](https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian.html)

use super::constants::{ALPHA, BETA, GENERATOR};
use super::field::FieldElement;
use super::scalar::Scalar;
use crate::errors::{StarkError, StarkResult};
use num_bigint::BigUint;

/// 곡선 위의 점 (아핀 좌표)
///
/// `new` 로 생성된 점은 항상 곡선 방정식을 만족합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    /// `None` 은 무한원점 (항등원)
    coords: Option<(FieldElement, FieldElement)>,
}

impl CurvePoint {
    /// 무한원점
    pub fn identity() -> Self {
        Self { coords: None }
    }

    /// 좌표로부터 점 생성
    ///
    /// # Returns
    ///
    /// 곡선 방정식을 만족하지 않으면 `PointNotOnCurve`
    pub fn new(x: FieldElement, y: FieldElement) -> StarkResult<Self> {
        if !is_on_curve(&x, &y) {
            return Err(StarkError::PointNotOnCurve {
                message: format!("({x}, {y})"),
            });
        }
        Ok(Self::new_unchecked(x, y))
    }

    pub(crate) fn new_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Self {
            coords: Some((x, y)),
        }
    }

    /// x 좌표로부터 점 복원 (y 는 두 근 중 하나)
    ///
    /// # Returns
    ///
    /// x^3 + alpha·x + beta 가 이차잉여가 아니면 `PointNotOnCurve`
    pub fn from_x(x: &FieldElement) -> StarkResult<Self> {
        let y = curve_rhs(x).sqrt().ok_or_else(|| StarkError::PointNotOnCurve {
            message: format!("no point with x = {x}"),
        })?;
        Ok(Self::new_unchecked(x.clone(), y))
    }

    /// 생성원 G
    pub fn generator() -> Self {
        GENERATOR.clone()
    }

    pub fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        self.coords.as_ref().map(|(x, y)| (x, y))
    }

    /// 곡선 방정식 검사 (무한원점은 곡선 위로 간주)
    pub fn is_on_curve(&self) -> bool {
        match &self.coords {
            None => true,
            Some((x, y)) => is_on_curve(x, y),
        }
    }

    /// -P = (x, -y)
    pub fn negate(&self) -> Self {
        match &self.coords {
            None => Self::identity(),
            Some((x, y)) => Self::new_unchecked(x.clone(), -y),
        }
    }

    /// P + Q
    pub fn add(&self, other: &Self) -> Self {
        ProjectivePoint::from_affine(self)
            .add(&ProjectivePoint::from_affine(other))
            .to_affine()
    }

    /// P - Q
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// 2P
    pub fn double(&self) -> Self {
        ProjectivePoint::from_affine(self).double().to_affine()
    }

    /// k·P
    pub fn multiply(&self, scalar: &Scalar) -> Self {
        self.mul_biguint(scalar.as_biguint())
    }

    pub(crate) fn mul_biguint(&self, k: &BigUint) -> Self {
        ProjectivePoint::from_affine(self).mul(k).to_affine()
    }
}

/// x^3 + alpha·x + beta
fn curve_rhs(x: &FieldElement) -> FieldElement {
    &x.square() * x + &*ALPHA * x + &*BETA
}

/// (x, y) 가 곡선 방정식을 만족하는지 검사
pub fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
    y.square() == curve_rhs(x)
}

/// 야코비안 좌표 (X, Y, Z) ~ (X/Z^2, Y/Z^3)
#[derive(Debug, Clone)]
pub(crate) struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl ProjectivePoint {
    pub(crate) fn identity() -> Self {
        Self {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    pub(crate) fn from_affine(point: &CurvePoint) -> Self {
        match &point.coords {
            None => Self::identity(),
            Some((x, y)) => Self {
                x: x.clone(),
                y: y.clone(),
                z: FieldElement::one(),
            },
        }
    }

    pub(crate) fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub(crate) fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        let yy = self.y.square();
        // S = 4·X·Y^2
        let s = (&self.x * &yy).double().double();
        // M = 3·X^2 + a·Z^4
        let m = self.x.square() * FieldElement::from(3u64) + &*ALPHA * self.z.square().square();

        let x3 = m.square() - s.double();
        // Y3 = M·(S - X3) - 8·Y^4
        let y3 = &m * (&s - &x3) - yy.square().double().double().double();
        let z3 = (&self.y * &self.z).double();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = &self.x * &z2z2;
        let u2 = &other.x * &z1z1;
        let s1 = &self.y * &other.z * &z2z2;
        let s2 = &other.y * &self.z * &z1z1;

        if u1 == u2 {
            // 같은 x: P + P 또는 P + (-P)
            return if s1 == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = &u2 - &u1;
        let r = &s2 - &s1;
        let hh = h.square();
        let hhh = &h * &hh;
        let u1hh = &u1 * &hh;

        let x3 = r.square() - &hhh - u1hh.double();
        let y3 = &r * (&u1hh - &x3) - &s1 * &hhh;
        let z3 = &h * &self.z * &other.z;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub(crate) fn add_affine(&self, other: &CurvePoint) -> Self {
        self.add(&Self::from_affine(other))
    }

    /// 최상위 비트부터 double-and-add
    pub(crate) fn mul(&self, k: &BigUint) -> Self {
        let mut acc = Self::identity();
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    pub(crate) fn to_affine(&self) -> CurvePoint {
        // 무한원점일 때만 Z 의 역원이 없음
        match self.z.inverse() {
            Ok(z_inv) => self.normalize_with(&z_inv),
            Err(_) => CurvePoint::identity(),
        }
    }

    fn normalize_with(&self, z_inv: &FieldElement) -> CurvePoint {
        let z_inv2 = z_inv.square();
        let x = &self.x * &z_inv2;
        let y = &self.y * &z_inv2 * z_inv;
        CurvePoint::new_unchecked(x, y)
    }

    /// 여러 점을 한 번의 역원 계산으로 아핀 좌표로 변환 (Montgomery 동시 역원)
    pub(crate) fn batch_to_affine(points: &[Self]) -> Vec<CurvePoint> {
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = FieldElement::one();
        for point in points {
            if !point.is_identity() {
                acc = &acc * &point.z;
            }
            prefix.push(acc.clone());
        }

        let Ok(mut inv) = acc.inverse() else {
            return points.iter().map(Self::to_affine).collect();
        };

        let mut result = vec![CurvePoint::identity(); points.len()];
        for i in (0..points.len()).rev() {
            let point = &points[i];
            if point.is_identity() {
                continue;
            }

            let z_inv = if i == 0 {
                inv.clone()
            } else {
                &inv * &prefix[i - 1]
            };
            inv = &inv * &point.z;
            result[i] = point.normalize_with(&z_inv);
        }
        result
    }
}
