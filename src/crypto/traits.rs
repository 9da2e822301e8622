//! Common signing traits
//!
//! 서명자와 타입 데이터 해셔의 공통 인터페이스를 정의합니다.

use crate::crypto::starknet::{FieldElement, Signature};
use crate::errors::StarkResult;

/// 서명자 트레이트
pub trait Signer {
    /// StarkNet 공개키 (x 좌표)
    fn public_key(&self) -> FieldElement;

    /// 해시된 데이터 직접 서명
    fn sign_hash(&self, message_hash: &FieldElement) -> StarkResult<Signature>;

    /// 타입 데이터 메시지 서명
    ///
    /// 계정 주소로 메시지 해시를 계산한 뒤 `sign_hash` 로 서명합니다.
    fn sign_message(
        &self,
        message: &dyn TypedDataHasher,
        account: &FieldElement,
    ) -> StarkResult<Signature> {
        let hash = message.message_hash(account)?;
        self.sign_hash(&hash)
    }
}

/// 타입 데이터 해싱 트레이트
pub trait TypedDataHasher {
    /// 주 타입 메시지의 구조체 해시
    fn hash_struct(&self) -> StarkResult<FieldElement>;

    /// 전체 서명 해시 (도메인 분리자와 계정 포함)
    fn message_hash(&self, account: &FieldElement) -> StarkResult<FieldElement>;
}
