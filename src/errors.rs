//! Error Hierarchy
//!
//! Errors surfaced by the field, curve, signature and typed-data layers.

use thiserror::Error;

/// Errors produced by the STARK curve toolkit
///
/// - Key errors
///   - InvalidPrivateKey
///   - PointNotOnCurve
/// - Arithmetic errors
///   - DivisionByZero
///   - ValueOutOfRange
/// - Signature errors
///   - InvalidMessageHash
///   - InvalidSignature
///   - SigningFailed
/// - Typed data errors
///   - UnknownType
///   - FieldEncodingError
/// - Parsing errors
///   - ParseError
///   - JsonError
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StarkError {
    // === Key errors ===
    /// Private key is zero or not below the curve order
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// A derived or supplied point does not satisfy the curve equation
    #[error("Point not on curve: {message}")]
    PointNotOnCurve { message: String },

    // === Arithmetic errors ===
    /// Inverse of the zero element was requested
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer does not fit below the field prime or the curve order
    #[error("Value out of range: {message}")]
    ValueOutOfRange { message: String },

    // === Signature errors ===
    /// Message hash is not below 2^251 and cannot be signed
    #[error("Invalid message hash: {message}")]
    InvalidMessageHash { message: String },

    /// Signature components are structurally impossible (e.g. zero)
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    /// Every nonce within the retry budget was rejected
    #[error("Signing failed after {attempts} attempts")]
    SigningFailed { attempts: u32 },

    // === Typed data errors ===
    /// A type name is referenced but not declared in the schema
    #[error("Unknown type: {type_name}")]
    UnknownType { type_name: String },

    /// A value cannot be reduced to a field element under its declared type
    #[error("Field encoding error: {field} - {message}")]
    FieldEncodingError { field: String, message: String },

    // === Parsing errors ===
    /// Malformed numeric text (hex or decimal)
    #[error("Parse error: {data_type} - {message}")]
    ParseError { data_type: String, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl StarkError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            StarkError::InvalidPrivateKey { .. } => "INVALID_PRIVATE_KEY",
            StarkError::PointNotOnCurve { .. } => "POINT_NOT_ON_CURVE",
            StarkError::DivisionByZero => "DIVISION_BY_ZERO",
            StarkError::ValueOutOfRange { .. } => "VALUE_OUT_OF_RANGE",
            StarkError::InvalidMessageHash { .. } => "INVALID_MESSAGE_HASH",
            StarkError::InvalidSignature { .. } => "INVALID_SIGNATURE",
            StarkError::SigningFailed { .. } => "SIGNING_FAILED",
            StarkError::UnknownType { .. } => "UNKNOWN_TYPE",
            StarkError::FieldEncodingError { .. } => "FIELD_ENCODING_ERROR",
            StarkError::ParseError { .. } => "PARSE_ERROR",
            StarkError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Returns true if the error comes from a schema/instance mismatch
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            StarkError::UnknownType { .. } | StarkError::FieldEncodingError { .. }
        )
    }

    /// Returns true if the error concerns key material
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            StarkError::InvalidPrivateKey { .. } | StarkError::PointNotOnCurve { .. }
        )
    }

    /// Shorthand for a [`StarkError::FieldEncodingError`]
    pub fn encoding(field: impl Into<String>, message: impl Into<String>) -> Self {
        StarkError::FieldEncodingError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`StarkError::ParseError`]
    pub fn parse(data_type: impl Into<String>, message: impl Into<String>) -> Self {
        StarkError::ParseError {
            data_type: data_type.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StarkError {
    fn from(err: serde_json::Error) -> Self {
        StarkError::JsonError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for this crate
pub type StarkResult<T> = Result<T, StarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StarkError::DivisionByZero.code(), "DIVISION_BY_ZERO");
        assert_eq!(
            StarkError::SigningFailed { attempts: 3 }.code(),
            "SIGNING_FAILED"
        );
        assert_eq!(
            StarkError::UnknownType {
                type_name: "Foo".into()
            }
            .code(),
            "UNKNOWN_TYPE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = StarkError::encoding("message", "string longer than 31 bytes");
        assert_eq!(
            err.to_string(),
            "Field encoding error: message - string longer than 31 bytes"
        );

        let err = StarkError::SigningFailed { attempts: 32 };
        assert_eq!(err.to_string(), "Signing failed after 32 attempts");
    }

    #[test]
    fn test_classification() {
        assert!(StarkError::encoding("a", "b").is_encoding_error());
        assert!(StarkError::UnknownType {
            type_name: "X".into()
        }
        .is_encoding_error());
        assert!(!StarkError::DivisionByZero.is_encoding_error());

        assert!(StarkError::InvalidPrivateKey {
            message: "zero".into()
        }
        .is_key_error());
        assert!(!StarkError::DivisionByZero.is_key_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: StarkError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
