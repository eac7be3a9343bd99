//! Error types for element queries and value conversion.

use std::error::Error as StdError;

use thiserror::Error;

/// Numeric target of a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NumericKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 64-bit float.
    Double,
}

/// Main error type for the xmlview library.
#[derive(Debug, Error)]
pub enum XmlViewError {
    /// The requested attribute is not present on the element.
    #[error("Attribute {0} does not exist")]
    AttributeNotFound(String),

    /// A string could not be parsed as the requested numeric type.
    #[error("Invalid {target} value: '{value}'")]
    NumericFormat {
        value: String,
        target: NumericKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl XmlViewError {
    pub(crate) fn numeric(
        value: &str,
        target: NumericKind,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::NumericFormat {
            value: value.to_string(),
            target,
            source: Box::new(source),
        }
    }
}

/// Result type alias for xmlview operations.
pub type Result<T> = std::result::Result<T, XmlViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_attribute_not_found_display() {
        let err = XmlViewError::AttributeNotFound("id".to_string());
        assert_eq!(err.to_string(), "Attribute id does not exist");
    }

    #[test]
    fn test_numeric_format_display() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = XmlViewError::numeric("abc", NumericKind::Int, source);
        assert_eq!(err.to_string(), "Invalid int value: 'abc'");
    }

    #[test]
    fn test_numeric_format_keeps_source() {
        let source = "1.2.3".parse::<f64>().unwrap_err();
        let err = XmlViewError::numeric("1.2.3", NumericKind::Double, source);
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            XmlViewError::NumericFormat {
                target: NumericKind::Double,
                ..
            }
        ));
    }
}
