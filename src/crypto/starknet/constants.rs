//! STARK Curve Parameters
//!
//! STARK 곡선과 Pedersen 해시에 사용되는 고정 상수들입니다.
//! 모든 상수는 최초 사용 시 한 번 초기화되며 이후 변경되지 않습니다.
//!
//! # 참조
//!
//! - [STARK curve](https://docs.starkware.co/starkex/crypto/stark-curve.html)
//! - [Pedersen hash](https://docs.starkware.co/starkex/crypto/pedersen-hash-function.html)

use super::curve::CurvePoint;
use super::field::FieldElement;
use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;

/// 필드 소수 p = 2^251 + 17·2^192 + 1
pub static FIELD_PRIME: Lazy<BigUint> = Lazy::new(|| {
    hex_constant("0800000000000011000000000000000000000000000000000000000000000001")
});

/// 곡선 위수 n (생성원 G의 위수)
pub static EC_ORDER: Lazy<BigUint> = Lazy::new(|| {
    hex_constant("0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f")
});

/// 서명 가능한 값의 상한 2^251 (메시지 해시, r, w)
pub static ELEMENT_UPPER_BOUND: Lazy<BigUint> = Lazy::new(|| BigUint::one() << 251usize);

/// 곡선 방정식 y^2 = x^3 + alpha·x + beta 의 alpha
pub static ALPHA: Lazy<FieldElement> = Lazy::new(FieldElement::one);

/// 곡선 방정식 y^2 = x^3 + alpha·x + beta 의 beta
pub static BETA: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89")
});

/// 생성원 G
pub static GENERATOR: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca",
        "005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f",
    )
});

/// Pedersen 해시 누산 시작점
pub static SHIFT_POINT: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "049ee3eba8c1600700ee1b87eb599f16716b0b1022947733551fde4050ca6804",
        "03ca0cfe4b3bc6ddf346d49d06ea0ed34e621062c0e056c1d0405d266e10268a",
    )
});

/// 첫 번째 입력의 하위 248비트용 상수점
pub static PEDERSEN_P0: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "0234287dcbaffe7f969c748655fca9e58fa8120b6d56eb0c1080d17957ebe47b",
        "03b056f100f96fb21e889527d41f4e39940135dd7a6c94cc6ed0268ee89e5615",
    )
});

/// 첫 번째 입력의 상위 4비트용 상수점
pub static PEDERSEN_P1: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "04fa56f376c83db33f9dab2656558f3399099ec1de5e3018b7a6932dba8aa378",
        "03fa0984c931c9e38113e0c0e47e4401562761f92a7a23b45168f4e80ff5b54d",
    )
});

/// 두 번째 입력의 하위 248비트용 상수점
pub static PEDERSEN_P2: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "04ba4cc166be8dec764910f75b45f74b40c690c74709e90f3aa372f0bd2d6997",
        "0040301cf5c1751f4b971e46c4ede85fcac5c59a5ce5ae7c48151f27b24b219c",
    )
});

/// 두 번째 입력의 상위 4비트용 상수점
pub static PEDERSEN_P3: Lazy<CurvePoint> = Lazy::new(|| {
    point_constant(
        "054302dcb0e6cc1c6e44cca8f61a63bb2ca65048d53fb325d36ff12c49a58202",
        "01b77b3e37d13504b348046268d8ae25ce98ad783c25561a879dcc77e99c2426",
    )
});

fn hex_constant(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).expect("hard-coded hex constant")
}

fn field_constant(hex_str: &str) -> FieldElement {
    FieldElement::from_biguint_unchecked(hex_constant(hex_str))
}

fn point_constant(x: &str, y: &str) -> CurvePoint {
    CurvePoint::new_unchecked(field_constant(x), field_constant(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starknet::scalar::Scalar;

    #[test]
    fn test_constant_points_on_curve() {
        for point in [
            &*GENERATOR,
            &*SHIFT_POINT,
            &*PEDERSEN_P0,
            &*PEDERSEN_P1,
            &*PEDERSEN_P2,
            &*PEDERSEN_P3,
        ] {
            assert!(point.is_on_curve());
            assert!(!point.is_identity());
        }
    }

    #[test]
    fn test_prime_shape() {
        // p = 2^251 + 17 * 2^192 + 1
        let expected =
            (BigUint::one() << 251usize) + (BigUint::from(17u32) << 192usize) + BigUint::one();
        assert_eq!(*FIELD_PRIME, expected);
        assert_eq!(FIELD_PRIME.bits(), 252);
    }

    #[test]
    fn test_order_bounds() {
        assert!(*ELEMENT_UPPER_BOUND < *EC_ORDER);
        assert!(*EC_ORDER < *FIELD_PRIME);
    }

    #[test]
    fn test_generator_order() {
        // (n - 1)·G = -G
        let n_minus_one = Scalar::from_biguint(&*EC_ORDER - 1u32).unwrap();
        let point = GENERATOR.multiply(&n_minus_one);
        assert_eq!(point, GENERATOR.negate());

        // n·G = O
        let point = point.add(&GENERATOR);
        assert!(point.is_identity());
    }
}
