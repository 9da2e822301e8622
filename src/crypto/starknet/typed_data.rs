//! StarkNet Typed Data Hashing
//!
//! StarkNet 의 구조화된 데이터 서명 해시를 계산합니다 (레거시 revision 0 방식).
//! EIP-712와 유사하지만 Keccak 타입 해시와 Pedersen 체인 해시를 사용합니다.
//!
//! ```text
//! message_hash = chain_hash([
//!     short_string("StarkNet Message"),
//!     struct_hash("StarkNetDomain", domain),
//!     account,
//!     struct_hash(primary_type, message),
//! ])
//! ```
//!
//! `felt` 값으로 숫자만으로 이루어진 문자열을 쓰면 10진수로 해석됩니다.
//! 예를 들어 "123" 은 short string "123" 이 아니라 정수 123 으로 인코딩됩니다.
//!
//! # 참조
//!
//! - [SNIP-12: Off-chain signing](https://github.com/starknet-io/SNIPs/blob/main/SNIPS/snip-12.md)

use super::field::FieldElement;
use super::keccak::{selector_from_name, starknet_keccak};
use super::pedersen::{chain_hash, HashChain};
use super::short_string::encode_short_string;
use crate::crypto::traits::TypedDataHasher;
use crate::errors::{StarkError, StarkResult};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// 도메인 타입 이름
pub const DOMAIN_TYPE_NAME: &str = "StarkNetDomain";

/// 메시지 해시 접두사
pub const MESSAGE_PREFIX: &str = "StarkNet Message";

const PRIMITIVE_TYPES: &[&str] = &["felt", "bool", "string", "shortstring", "selector"];

/// StarkNet 타입 데이터 필드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    /// 필드 이름
    pub name: String,
    /// 필드 타입
    #[serde(rename = "type")]
    pub field_type: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct TypeDefinition {
    fields: Vec<TypedDataField>,
    type_hash: OnceCell<FieldElement>,
}

type RawTypes = BTreeMap<String, Vec<TypedDataField>>;

/// 검증된 타입 스키마
///
/// 모든 필드 타입이 기본 타입이거나 스키마에 정의된 타입임이 보장됩니다.
/// 타입 해시는 타입별로 한 번만 계산하여 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTypes", into = "RawTypes")]
pub struct TypeSchema {
    types: BTreeMap<String, TypeDefinition>,
}

impl TypeSchema {
    /// 타입 정의로부터 스키마 생성
    ///
    /// # Returns
    ///
    /// 정의되지 않은 타입을 참조하면 `UnknownType`
    pub fn new<I, S>(types: I) -> StarkResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<TypedDataField>)>,
        S: Into<String>,
    {
        let types: BTreeMap<String, TypeDefinition> = types
            .into_iter()
            .map(|(name, fields)| {
                (
                    name.into(),
                    TypeDefinition {
                        fields,
                        type_hash: OnceCell::new(),
                    },
                )
            })
            .collect();

        for definition in types.values() {
            for field in &definition.fields {
                let base = base_type(&field.field_type);
                if !is_primitive(base) && !types.contains_key(base) {
                    return Err(StarkError::UnknownType {
                        type_name: base.to_string(),
                    });
                }
            }
        }

        Ok(Self { types })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// 정의된 타입 이름 (알파벳순)
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// 타입의 필드 목록 (선언 순서)
    pub fn fields(&self, type_name: &str) -> StarkResult<&[TypedDataField]> {
        Ok(&self.definition(type_name)?.fields)
    }

    fn definition(&self, type_name: &str) -> StarkResult<&TypeDefinition> {
        self.types
            .get(type_name)
            .ok_or_else(|| StarkError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// 타입 인코딩 문자열 생성
    ///
    /// `Name(f1:t1,f2:t2)` 뒤에 참조하는 모든 타입을 알파벳순으로 이어 붙입니다.
    pub fn encode_type(&self, type_name: &str) -> StarkResult<String> {
        let mut dependencies = BTreeSet::new();
        self.collect_dependencies(type_name, &mut dependencies)?;
        dependencies.remove(type_name);

        let mut encoded = self.format_type(type_name)?;
        for dependency in &dependencies {
            encoded.push_str(&self.format_type(dependency)?);
        }
        Ok(encoded)
    }

    fn collect_dependencies(
        &self,
        type_name: &str,
        found: &mut BTreeSet<String>,
    ) -> StarkResult<()> {
        for field in &self.definition(type_name)?.fields {
            let base = base_type(&field.field_type);
            if self.types.contains_key(base) && found.insert(base.to_string()) {
                self.collect_dependencies(base, found)?;
            }
        }
        Ok(())
    }

    fn format_type(&self, type_name: &str) -> StarkResult<String> {
        let fields: Vec<String> = self
            .definition(type_name)?
            .fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.field_type))
            .collect();

        Ok(format!("{}({})", type_name, fields.join(",")))
    }

    /// 타입 해시 = starknet_keccak(encode_type(type_name))
    pub fn type_hash(&self, type_name: &str) -> StarkResult<FieldElement> {
        let definition = self.definition(type_name)?;
        definition
            .type_hash
            .get_or_try_init(|| {
                let encoded = self.encode_type(type_name)?;
                Ok(starknet_keccak(encoded.as_bytes()))
            })
            .cloned()
    }

    /// 구조체 해시 = chain_hash([type_hash, 필드 값들...])
    ///
    /// # Arguments
    ///
    /// * `type_name` - 스키마에 정의된 타입 이름
    /// * `data` - JSON 객체 (필드 이름 → 값)
    pub fn struct_hash(&self, type_name: &str, data: &Value) -> StarkResult<FieldElement> {
        let definition = self.definition(type_name)?;
        let object = data.as_object().ok_or_else(|| {
            StarkError::encoding(type_name, format!("expected an object, got {data}"))
        })?;

        let mut chain = HashChain::new();
        chain.update(&self.type_hash(type_name)?);

        for field in &definition.fields {
            let value = object.get(&field.name).ok_or_else(|| {
                StarkError::encoding(&field.name, format!("missing from {type_name}"))
            })?;
            chain.update(&self.encode_value(&field.name, &field.field_type, value)?);
        }

        let hash = chain.finalize();
        tracing::trace!(type_name, hash = %hash, "hashed struct");
        Ok(hash)
    }

    /// 값 인코딩
    fn encode_value(
        &self,
        field_name: &str,
        field_type: &str,
        value: &Value,
    ) -> StarkResult<FieldElement> {
        // 커스텀 구조체 타입
        if self.types.contains_key(field_type) {
            return self.struct_hash(field_type, value);
        }

        if let Some(element_type) = field_type.strip_suffix('*') {
            let items = value.as_array().ok_or_else(|| {
                StarkError::encoding(field_name, format!("expected an array, got {value}"))
            })?;
            let encoded = items
                .iter()
                .map(|item| self.encode_value(field_name, element_type, item))
                .collect::<StarkResult<Vec<_>>>()?;
            return Ok(chain_hash(&encoded));
        }

        match field_type {
            "felt" | "string" | "shortstring" => encode_felt(field_name, value),
            "bool" => encode_bool(field_name, value),
            "selector" => encode_selector(field_name, value),
            other => Err(StarkError::UnknownType {
                type_name: other.to_string(),
            }),
        }
    }
}

impl TryFrom<RawTypes> for TypeSchema {
    type Error = StarkError;

    fn try_from(raw: RawTypes) -> StarkResult<Self> {
        Self::new(raw)
    }
}

impl From<TypeSchema> for RawTypes {
    fn from(schema: TypeSchema) -> Self {
        schema
            .types
            .into_iter()
            .map(|(name, definition)| (name, definition.fields))
            .collect()
    }
}

fn base_type(field_type: &str) -> &str {
    field_type.strip_suffix('*').unwrap_or(field_type)
}

fn is_primitive(type_name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_name)
}

fn is_hex_literal(text: &str) -> bool {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .map_or(false, |digits| {
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
        })
}

fn is_decimal_literal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// 숫자 문자열이면 정수로, 아니면 `None`
fn parse_numeric(field_name: &str, text: &str) -> StarkResult<Option<FieldElement>> {
    let parsed = if is_hex_literal(text) {
        FieldElement::from_hex(text)
    } else if is_decimal_literal(text) {
        FieldElement::from_dec_str(text)
    } else {
        return Ok(None);
    };

    parsed
        .map(Some)
        .map_err(|e| StarkError::encoding(field_name, e.to_string()))
}

fn encode_number(field_name: &str, number: &serde_json::Number) -> StarkResult<FieldElement> {
    number
        .as_u64()
        .map(FieldElement::from)
        .ok_or_else(|| {
            StarkError::encoding(field_name, format!("{number} is not a non-negative integer"))
        })
}

fn encode_felt(field_name: &str, value: &Value) -> StarkResult<FieldElement> {
    match value {
        Value::Number(number) => encode_number(field_name, number),
        Value::Bool(flag) => Ok(FieldElement::from(*flag)),
        Value::String(text) if text.is_empty() => Ok(FieldElement::zero()),
        Value::String(text) => match parse_numeric(field_name, text)? {
            Some(felt) => Ok(felt),
            None => encode_short_string(text).map_err(|_| {
                StarkError::encoding(field_name, format!("{text:?} exceeds 31 bytes"))
            }),
        },
        other => Err(StarkError::encoding(
            field_name,
            format!("cannot encode {other} as felt"),
        )),
    }
}

fn encode_bool(field_name: &str, value: &Value) -> StarkResult<FieldElement> {
    let flag = match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        _ => None,
    };

    flag.map(FieldElement::from)
        .ok_or_else(|| StarkError::encoding(field_name, format!("expected bool, got {value}")))
}

/// 16진수는 그대로, 그 외 문자열은 함수 이름으로 보고 선택자로 변환
///
/// "123" 처럼 10진수로 보이는 문자열도 이름으로 취급합니다.
fn encode_selector(field_name: &str, value: &Value) -> StarkResult<FieldElement> {
    match value {
        Value::Number(number) => encode_number(field_name, number),
        Value::String(text) if is_hex_literal(text) => FieldElement::from_hex(text)
            .map_err(|e| StarkError::encoding(field_name, e.to_string())),
        Value::String(text) => Ok(selector_from_name(text)),
        other => Err(StarkError::encoding(
            field_name,
            format!("expected selector name, got {other}"),
        )),
    }
}

/// StarkNet 타입 데이터 도메인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarkNetDomain {
    /// 도메인 이름
    pub name: String,
    /// 도메인 버전
    pub version: String,
    /// 체인 ID (예: "SN_MAIN")
    #[serde(deserialize_with = "string_or_number")]
    pub chain_id: String,
}

impl StarkNetDomain {
    /// 새 도메인 생성
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: chain_id.into(),
        }
    }

    fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "version": self.version,
            "chainId": self.chain_id,
        })
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(text) => text,
        Repr::Number(number) => number.to_string(),
    })
}

/// StarkNet 타입 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// 타입 정의
    pub types: TypeSchema,
    /// 주 타입 이름
    pub primary_type: String,
    /// 도메인
    pub domain: StarkNetDomain,
    /// 메시지 데이터
    pub message: Value,
}

impl TypedData {
    /// 새 타입 데이터 생성
    pub fn new(
        types: TypeSchema,
        primary_type: impl Into<String>,
        domain: StarkNetDomain,
        message: Value,
    ) -> Self {
        Self {
            types,
            primary_type: primary_type.into(),
            domain,
            message,
        }
    }

    /// 도메인 구조체 해시
    pub fn domain_hash(&self) -> StarkResult<FieldElement> {
        self.types
            .struct_hash(DOMAIN_TYPE_NAME, &self.domain.to_value())
    }

    /// 주 타입 메시지의 구조체 해시
    pub fn struct_hash(&self) -> StarkResult<FieldElement> {
        self.types.struct_hash(&self.primary_type, &self.message)
    }

    /// 전체 서명 해시 계산
    ///
    /// hash = chain_hash("StarkNet Message", domain_hash, account_address, message_hash)
    pub fn message_hash(&self, account_address: &FieldElement) -> StarkResult<FieldElement> {
        let prefix = encode_short_string(MESSAGE_PREFIX)?;
        let hash = chain_hash(&[
            prefix,
            self.domain_hash()?,
            account_address.clone(),
            self.struct_hash()?,
        ]);

        tracing::debug!(
            primary_type = %self.primary_type,
            hash = %hash,
            "computed typed data hash"
        );
        Ok(hash)
    }
}

impl TypedDataHasher for TypedData {
    fn hash_struct(&self) -> StarkResult<FieldElement> {
        self.struct_hash()
    }

    fn message_hash(&self, account: &FieldElement) -> StarkResult<FieldElement> {
        TypedData::message_hash(self, account)
    }
}

/// 타입 데이터 해시 인코딩 (단축 함수)
pub fn encode_typed_data_hash(
    typed_data: &TypedData,
    account_address: &FieldElement,
) -> StarkResult<FieldElement> {
    typed_data.message_hash(account_address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn felt(hex: &str) -> FieldElement {
        FieldElement::from_hex(hex).unwrap()
    }

    fn domain_fields() -> Vec<TypedDataField> {
        vec![
            TypedDataField::new("name", "felt"),
            TypedDataField::new("chainId", "felt"),
            TypedDataField::new("version", "felt"),
        ]
    }

    fn mail_schema() -> TypeSchema {
        TypeSchema::new([
            ("StarkNetDomain", domain_fields()),
            (
                "Person",
                vec![
                    TypedDataField::new("name", "felt"),
                    TypedDataField::new("wallet", "felt"),
                ],
            ),
            (
                "Mail",
                vec![
                    TypedDataField::new("from", "Person"),
                    TypedDataField::new("to", "Person"),
                    TypedDataField::new("contents", "felt"),
                ],
            ),
        ])
        .unwrap()
    }

    fn felt_schema(field_type: &str) -> TypeSchema {
        TypeSchema::new([("Value", vec![TypedDataField::new("value", field_type)])]).unwrap()
    }

    fn encode(field_type: &str, value: Value) -> StarkResult<FieldElement> {
        felt_schema(field_type).encode_value("value", field_type, &value)
    }

    #[test]
    fn test_domain_type_hash() {
        let schema = TypeSchema::new([("StarkNetDomain", domain_fields())]).unwrap();
        assert_eq!(
            schema.encode_type("StarkNetDomain").unwrap(),
            "StarkNetDomain(name:felt,chainId:felt,version:felt)"
        );
        assert_eq!(
            schema.type_hash("StarkNetDomain").unwrap(),
            felt("0x98d1932052fc5137543de5ed85b7a88555a4cd1ff5d5bfedb62ed9b9a1f0db")
        );
    }

    #[test]
    fn test_domain_type_hash_depends_on_field_order() {
        let schema = TypeSchema::new([(
            "StarkNetDomain",
            vec![
                TypedDataField::new("name", "felt"),
                TypedDataField::new("version", "felt"),
                TypedDataField::new("chainId", "felt"),
            ],
        )])
        .unwrap();
        assert_eq!(
            schema.encode_type("StarkNetDomain").unwrap(),
            "StarkNetDomain(name:felt,version:felt,chainId:felt)"
        );
        assert_eq!(
            schema.type_hash("StarkNetDomain").unwrap(),
            felt("0x1bfc207425a47a5dfa1a50a4f5241203f50624ca5fdf5e18755765416b8e288")
        );
    }

    #[test]
    fn test_encode_type_with_dependencies() {
        let schema = mail_schema();
        assert_eq!(
            schema.encode_type("Mail").unwrap(),
            "Mail(from:Person,to:Person,contents:felt)Person(name:felt,wallet:felt)"
        );
    }

    #[test]
    fn test_dependencies_sorted_and_deduplicated() {
        let schema = TypeSchema::new([
            (
                "Root",
                vec![
                    TypedDataField::new("z", "Zeta"),
                    TypedDataField::new("a", "Alpha*"),
                    TypedDataField::new("z2", "Zeta"),
                ],
            ),
            ("Zeta", vec![TypedDataField::new("inner", "Alpha")]),
            ("Alpha", vec![TypedDataField::new("v", "felt")]),
        ])
        .unwrap();

        assert_eq!(
            schema.encode_type("Root").unwrap(),
            "Root(z:Zeta,a:Alpha*,z2:Zeta)Alpha(v:felt)Zeta(inner:Alpha)"
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let schema = TypeSchema::new([(
            "Node",
            vec![
                TypedDataField::new("value", "felt"),
                TypedDataField::new("children", "Node*"),
            ],
        )])
        .unwrap();
        assert_eq!(
            schema.encode_type("Node").unwrap(),
            "Node(value:felt,children:Node*)"
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = TypeSchema::new([("Mail", vec![TypedDataField::new("from", "Person")])])
            .unwrap_err();
        assert_eq!(
            err,
            StarkError::UnknownType {
                type_name: "Person".into()
            }
        );

        let err = mail_schema().type_hash("Missing").unwrap_err();
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_type_hash_memoized() {
        let schema = mail_schema();
        let first = schema.type_hash("Mail").unwrap();
        assert_eq!(schema.type_hash("Mail").unwrap(), first);
        assert_eq!(
            first,
            starknet_keccak(schema.encode_type("Mail").unwrap().as_bytes())
        );
    }

    #[test]
    fn test_felt_encoding_rules() {
        assert_eq!(
            encode("felt", json!(42)).unwrap(),
            FieldElement::from(42u64),
        );
        assert_eq!(
            encode("felt", json!("42")).unwrap(),
            FieldElement::from(42u64),
        );
        assert_eq!(
            encode("felt", json!("0x2a")).unwrap(),
            FieldElement::from(42u64),
        );
        assert_eq!(encode("felt", json!("")).unwrap(), FieldElement::zero());
        assert_eq!(encode("felt", json!(true)).unwrap(), FieldElement::one());
        assert_eq!(
            encode("felt", json!("hello")).unwrap(),
            encode_short_string("hello").unwrap()
        );
        // "0x" 만 있으면 short string
        assert_eq!(
            encode("felt", json!("0x")).unwrap(),
            encode_short_string("0x").unwrap()
        );
    }

    #[test]
    fn test_felt_encoding_errors() {
        let too_long = "a".repeat(32);
        let err = encode("felt", json!(too_long)).unwrap_err();
        assert_eq!(err.code(), "FIELD_ENCODING_ERROR");

        let p = "0x800000000000011000000000000000000000000000000000000000000000001";
        assert!(encode("felt", json!(p)).is_err());
        assert!(encode("felt", json!(-1)).is_err());
        assert!(encode("felt", json!(1.5)).is_err());
        assert!(encode("felt", json!({"a": 1})).is_err());
    }

    #[test]
    fn test_string_types_share_felt_rules() {
        for ty in ["string", "shortstring"] {
            assert_eq!(
                encode(ty, json!("abc")).unwrap(),
                encode("felt", json!("abc")).unwrap()
            );
        }
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(encode("bool", json!(false)).unwrap(), FieldElement::zero());
        assert_eq!(encode("bool", json!(1)).unwrap(), FieldElement::one());
        assert_eq!(encode("bool", json!("1")).unwrap(), FieldElement::one());
        assert_eq!(encode("bool", json!("0")).unwrap(), FieldElement::zero());
        assert!(encode("bool", json!(2)).is_err());
        assert!(encode("bool", json!("yes")).is_err());
    }

    #[test]
    fn test_bool_rejects_text_literals() {
        for text in ["true", "false"] {
            let err = encode("bool", json!(text)).unwrap_err();
            assert_eq!(err.code(), "FIELD_ENCODING_ERROR");
        }
        // felt 로는 short string 이 됨
        assert_eq!(
            encode("felt", json!("true")).unwrap(),
            FieldElement::from(0x74727565u64)
        );
    }

    #[test]
    fn test_selector_encoding() {
        assert_eq!(
            encode("selector", json!("transfer")).unwrap(),
            selector_from_name("transfer")
        );
        assert_eq!(
            encode("selector", json!("0x1234")).unwrap(),
            FieldElement::from(0x1234u64)
        );
        assert_eq!(
            encode("selector", json!(0x1234)).unwrap(),
            FieldElement::from(0x1234u64)
        );
    }

    #[test]
    fn test_decimal_selector_is_a_name() {
        assert_eq!(
            encode("selector", json!("123")).unwrap(),
            selector_from_name("123")
        );
        assert_ne!(
            encode("selector", json!("123")).unwrap(),
            FieldElement::from(123u64)
        );
    }

    #[test]
    fn test_array_encoding() {
        let value = encode("felt*", json!([1, "0x2", "three"])).unwrap();
        let expected = chain_hash(&[
            FieldElement::from(1u64),
            FieldElement::from(2u64),
            encode_short_string("three").unwrap(),
        ]);
        assert_eq!(value, expected);

        assert_eq!(encode("felt*", json!([])).unwrap(), chain_hash(&[]));
        assert!(encode("felt*", json!("not an array")).is_err());
    }

    #[test]
    fn test_struct_hash_missing_field() {
        let schema = mail_schema();
        let err = schema
            .struct_hash("Person", &json!({"name": "Bob"}))
            .unwrap_err();
        assert_eq!(
            err,
            StarkError::encoding("wallet", "missing from Person")
        );
    }

    #[test]
    fn test_struct_hash_nested() {
        let schema = mail_schema();
        let bob = json!({"name": "Bob", "wallet": "0x1"});
        let alice = json!({"name": "Alice", "wallet": "0x2"});
        let mail = json!({"from": bob, "to": alice, "contents": "Hello"});

        let expected = chain_hash(&[
            schema.type_hash("Mail").unwrap(),
            schema.struct_hash("Person", &bob).unwrap(),
            schema.struct_hash("Person", &alice).unwrap(),
            encode_short_string("Hello").unwrap(),
        ]);
        assert_eq!(schema.struct_hash("Mail", &mail).unwrap(), expected);
    }

    #[test]
    fn test_domain_chain_id_number() {
        let domain: StarkNetDomain =
            serde_json::from_value(json!({"name": "App", "version": "1", "chainId": 1}))
                .unwrap();
        assert_eq!(domain.chain_id, "1");
    }

    #[test]
    fn test_schema_serde() {
        let schema = mail_schema();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["Person"][1]["type"], "felt");

        let parsed: TypeSchema = serde_json::from_value(value).unwrap();
        assert_eq!(
            parsed.type_hash("Mail").unwrap(),
            schema.type_hash("Mail").unwrap(),
        );

        let invalid = json!({"Mail": [{"name": "from", "type": "Person"}]});
        assert!(serde_json::from_value::<TypeSchema>(invalid).is_err());
    }

    #[test]
    fn test_message_hash_structure() {
        let typed_data = TypedData::new(
            mail_schema(),
            "Person",
            StarkNetDomain::new("App", "1", "SN_MAIN"),
            json!({"name": "Bob", "wallet": "0x1"}),
        );
        let account = FieldElement::from(12345u64);

        let expected = chain_hash(&[
            encode_short_string(MESSAGE_PREFIX).unwrap(),
            typed_data.domain_hash().unwrap(),
            account.clone(),
            typed_data.struct_hash().unwrap(),
        ]);
        assert_eq!(typed_data.message_hash(&account).unwrap(), expected);
        assert_eq!(
            encode_typed_data_hash(&typed_data, &account).unwrap(),
            expected,
        );
    }

    #[test]
    fn test_missing_domain_type() {
        let schema = TypeSchema::new([("Msg", vec![TypedDataField::new("v", "felt")])]).unwrap();
        let typed_data = TypedData::new(
            schema,
            "Msg",
            StarkNetDomain::new("App", "1", "SN_MAIN"),
            json!({"v": 1}),
        );
        let err = typed_data.message_hash(&FieldElement::one()).unwrap_err();
        assert_eq!(
            err,
            StarkError::UnknownType {
                type_name: DOMAIN_TYPE_NAME.into()
            }
        );
    }
}
