//! Pedersen Hash
//!
//! STARK 곡선 기반 2-입력 Pedersen 해시와 이를 이용한 체인 해시입니다.
//!
//! H(a, b) = [SHIFT + a_low·P0 + a_high·P1 + b_low·P2 + b_high·P3].x
//!
//! - a_low, b_low: 하위 248비트
//! - a_high, b_high: 상위 4비트
//!
//! 각 상수점마다 4비트 윈도우 테이블(윈도우당 15개 점)을 최초 사용 시 한 번 생성하여
//! 해시 한 번에 점 덧셈 최대 126회로 계산합니다.
//!
//! # 참조
//!
//! - [Pedersen hash](https://docs.starkware.co/starkex/crypto/pedersen-hash-function.html)

use super::constants::{PEDERSEN_P0, PEDERSEN_P1, PEDERSEN_P2, PEDERSEN_P3, SHIFT_POINT};
use super::curve::{CurvePoint, ProjectivePoint};
use super::field::FieldElement;
use once_cell::sync::Lazy;

const WINDOW_BITS: usize = 4;
const WINDOW_SIZE: usize = (1 << WINDOW_BITS) - 1;
/// 하위 248비트 = 62 윈도우
const LOW_WINDOWS: usize = 248 / WINDOW_BITS;
/// 상위 4비트 = 1 윈도우
const HIGH_WINDOWS: usize = 1;

/// windows[w][v - 1] = v·16^w·P
struct WindowTable {
    windows: Vec<Vec<CurvePoint>>,
}

impl WindowTable {
    fn new(base: &CurvePoint, window_count: usize) -> Self {
        let mut projective = Vec::with_capacity(window_count * WINDOW_SIZE);
        let mut window_base = ProjectivePoint::from_affine(base);

        for _ in 0..window_count {
            let mut entry = window_base.clone();
            for _ in 0..WINDOW_SIZE {
                projective.push(entry.clone());
                entry = entry.add(&window_base);
            }
            // entry = 16·window_base
            window_base = entry;
        }

        let windows = ProjectivePoint::batch_to_affine(&projective)
            .chunks(WINDOW_SIZE)
            .map(<[CurvePoint]>::to_vec)
            .collect();

        Self { windows }
    }

    fn accumulate(&self, acc: &mut ProjectivePoint, nibbles: &[u8]) {
        for (window, &nibble) in self.windows.iter().zip(nibbles) {
            if nibble != 0 {
                *acc = acc.add_affine(&window[nibble as usize - 1]);
            }
        }
    }
}

struct PedersenTables {
    a_low: WindowTable,
    a_high: WindowTable,
    b_low: WindowTable,
    b_high: WindowTable,
}

static TABLES: Lazy<PedersenTables> = Lazy::new(|| {
    tracing::debug!("building Pedersen window tables");
    PedersenTables {
        a_low: WindowTable::new(&PEDERSEN_P0, LOW_WINDOWS),
        a_high: WindowTable::new(&PEDERSEN_P1, HIGH_WINDOWS),
        b_low: WindowTable::new(&PEDERSEN_P2, LOW_WINDOWS),
        b_high: WindowTable::new(&PEDERSEN_P3, HIGH_WINDOWS),
    }
});

/// 하위 니블부터 나열한 4비트 조각 (64개)
fn nibbles(value: &FieldElement) -> [u8; 64] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 64];
    for (i, byte) in bytes.iter().rev().enumerate() {
        out[2 * i] = byte & 0x0f;
        out[2 * i + 1] = byte >> 4;
    }
    out
}

/// 두 필드 원소의 Pedersen 해시
///
/// # Arguments
///
/// * `a` - 첫 번째 입력
/// * `b` - 두 번째 입력
///
/// # Returns
///
/// 결과 점의 x 좌표
pub fn pedersen_hash(a: &FieldElement, b: &FieldElement) -> FieldElement {
    let tables = &*TABLES;
    let a_nibbles = nibbles(a);
    let b_nibbles = nibbles(b);

    let high = LOW_WINDOWS..LOW_WINDOWS + HIGH_WINDOWS;

    let mut acc = ProjectivePoint::from_affine(&SHIFT_POINT);
    tables.a_low.accumulate(&mut acc, &a_nibbles[..LOW_WINDOWS]);
    tables.a_high.accumulate(&mut acc, &a_nibbles[high.clone()]);
    tables.b_low.accumulate(&mut acc, &b_nibbles[..LOW_WINDOWS]);
    tables.b_high.accumulate(&mut acc, &b_nibbles[high]);

    acc.to_affine()
        .x()
        .cloned()
        .expect("Pedersen sum never reaches the identity")
}

/// 체인 해시 H(...H(H(0, e1), e2)..., en), len)
///
/// 빈 목록은 H(0, 0) 입니다.
pub fn chain_hash(elements: &[FieldElement]) -> FieldElement {
    let mut chain = HashChain::new();
    for element in elements {
        chain.update(element);
    }
    chain.finalize()
}

/// 스트리밍 체인 해시
///
/// # Example
///
/// ```ignore
/// let mut chain = HashChain::new();
/// chain.update(&type_hash);
/// chain.update(&value);
/// let hash = chain.finalize();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HashChain {
    hash: FieldElement,
    count: u64,
}

impl HashChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: &FieldElement) {
        self.hash = pedersen_hash(&self.hash, value);
        self.count += 1;
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 원소 개수를 마지막으로 해시하여 종료
    pub fn finalize(self) -> FieldElement {
        pedersen_hash(&self.hash, &FieldElement::from(self.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starknet::constants::FIELD_PRIME;
    use num_bigint::BigUint;

    fn felt(hex: &str) -> FieldElement {
        FieldElement::from_hex(hex).unwrap()
    }

    /// 테이블 없이 스칼라 곱으로 직접 계산
    fn reference_hash(a: &FieldElement, b: &FieldElement) -> FieldElement {
        let mask = (BigUint::from(1u32) << 248usize) - 1u32;
        let split = |v: &FieldElement| (v.as_biguint() & &mask, v.as_biguint() >> 248usize);
        let (a_low, a_high) = split(a);
        let (b_low, b_high) = split(b);

        SHIFT_POINT
            .add(&PEDERSEN_P0.mul_biguint(&a_low))
            .add(&PEDERSEN_P1.mul_biguint(&a_high))
            .add(&PEDERSEN_P2.mul_biguint(&b_low))
            .add(&PEDERSEN_P3.mul_biguint(&b_high))
            .x()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_known_vector() {
        let a = felt("0x03d937c035c878245caf64531a5756109c53068da139362728feb561405371cb");
        let b = felt("0x0208a0a10250e382e1e4bbe2880906c2791bf6275695e02fbbc6aeff9cd8b31a");
        assert_eq!(
            pedersen_hash(&a, &b),
            felt("0x030e480bed5fe53fa909cc0f8c4d99b8f9f2c016be4c41e13a4848797979c662")
        );
    }

    #[test]
    fn test_zero_inputs_give_shift_point() {
        let hash = pedersen_hash(&FieldElement::zero(), &FieldElement::zero());
        assert_eq!(&hash, SHIFT_POINT.x().unwrap());
    }

    #[test]
    fn test_matches_reference() {
        let max = FieldElement::from_biguint(&*FIELD_PRIME - 1u32).unwrap();
        let cases = [
            (FieldElement::one(), FieldElement::zero()),
            (FieldElement::zero(), FieldElement::from(0xdeadbeefu64)),
            (felt("0x1234567890abcdef1234567890abcdef"), max.clone()),
            (max.clone(), max),
        ];
        for (a, b) in cases {
            assert_eq!(pedersen_hash(&a, &b), reference_hash(&a, &b));
        }
    }

    #[test]
    fn test_not_symmetric() {
        let a = FieldElement::from(1u64);
        let b = FieldElement::from(2u64);
        assert_ne!(pedersen_hash(&a, &b), pedersen_hash(&b, &a));
    }

    #[test]
    fn test_chain_hash_fold() {
        let elements = [
            FieldElement::from(1u64),
            FieldElement::from(2u64),
            FieldElement::from(3u64),
        ];
        let mut expected = FieldElement::zero();
        for element in &elements {
            expected = pedersen_hash(&expected, element);
        }
        expected = pedersen_hash(&expected, &FieldElement::from(3u64));

        assert_eq!(chain_hash(&elements), expected);
    }

    #[test]
    fn test_chain_hash_empty() {
        assert_eq!(
            chain_hash(&[]),
            pedersen_hash(&FieldElement::zero(), &FieldElement::zero())
        );
    }

    #[test]
    fn test_chain_hash_is_order_sensitive() {
        let a = FieldElement::from(10u64);
        let b = FieldElement::from(20u64);
        assert_ne!(
            chain_hash(&[a.clone(), b.clone()]),
            chain_hash(&[b, a])
        );
    }

    #[test]
    fn test_chain_hash_is_not_flattenable() {
        // [a, b, c] 의 해시는 [chain_hash([a, b]), c] 의 해시와 다름
        let a = FieldElement::from(1u64);
        let b = FieldElement::from(2u64);
        let c = FieldElement::from(3u64);
        let nested = chain_hash(&[chain_hash(&[a.clone(), b.clone()]), c.clone()]);
        assert_ne!(chain_hash(&[a, b, c]), nested);
    }

    #[test]
    fn test_hash_chain_streaming() {
        let elements: Vec<FieldElement> = (1u64..=5).map(FieldElement::from).collect();
        let mut chain = HashChain::new();
        assert!(chain.is_empty());
        for element in &elements {
            chain.update(element);
        }
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.finalize(), chain_hash(&elements));
    }
}
