//! Cairo Short Strings
//!
//! 31바이트 이하의 문자열을 빅엔디안 정수로 묶어 하나의 필드 원소로 표현합니다.

use super::field::FieldElement;
use crate::errors::{StarkError, StarkResult};
use num_bigint::BigUint;

/// 한 필드 원소에 담을 수 있는 최대 바이트 수
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// 문자열을 short string 필드 원소로 인코딩
///
/// # Arguments
///
/// * `text` - UTF-8 바이트 길이가 31 이하인 문자열
///
/// # Returns
///
/// 31바이트를 넘으면 `FieldEncodingError`
///
/// # Example
///
/// ```rust
/// use stark_typed_sign::crypto::starknet::encode_short_string;
///
/// let felt = encode_short_string("hello").unwrap();
/// assert_eq!(felt.to_string(), "0x68656c6c6f");
/// ```
pub fn encode_short_string(text: &str) -> StarkResult<FieldElement> {
    let bytes = text.as_bytes();
    if bytes.len() > SHORT_STRING_MAX_LEN {
        return Err(StarkError::encoding(
            "shortstring",
            format!(
                "{text:?} is {} bytes long, at most {SHORT_STRING_MAX_LEN} fit in a field element",
                bytes.len()
            ),
        ));
    }
    // 2^248 미만
    Ok(FieldElement::from_biguint_unchecked(BigUint::from_bytes_be(
        bytes,
    )))
}

/// short string 필드 원소를 문자열로 디코딩
pub fn decode_short_string(value: &FieldElement) -> StarkResult<String> {
    let bytes = value.to_bytes_be();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let content = &bytes[start..];

    if content.len() > SHORT_STRING_MAX_LEN {
        return Err(StarkError::parse(
            "shortstring",
            format!("{value} is longer than {SHORT_STRING_MAX_LEN} bytes"),
        ));
    }

    String::from_utf8(content.to_vec())
        .map_err(|e| StarkError::parse("shortstring", format!("{value} is not UTF-8: {e}")))
}
