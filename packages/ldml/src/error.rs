//! Error types for the LDML transformation.
//!
//! A single `LdmlError` covers every failure the library can raise. Callers
//! that need to tell content problems from repair problems use
//! [`LdmlError::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a failure, used for logging and skip decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Mandatory content is missing from the documentation unit.
    Validation,
    /// An HTML fragment could not be turned into well-formed XML.
    Mapping,
    /// Reading input or writing output failed.
    Input,
}

impl FailureKind {
    /// Get the string value for log output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Mapping => "mapping",
            Self::Input => "input",
        }
    }
}

/// Main error type for the transformation library.
#[derive(Debug, Error)]
pub enum LdmlError {
    /// A mandatory field is absent or blank.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// None of the judgment body regions has content.
    #[error("Judgment body is empty: introduction, background, motivation and decision have no content")]
    EmptyBody,

    /// HTML fragment could not be parsed, even after repair.
    #[error("Failed to parse HTML fragment{}: {source}", .field.as_ref().map(|f| format!(" in {f}")).unwrap_or_default())]
    Mapping {
        field: Option<&'static str>,
        #[source]
        source: roxmltree::Error,
    },

    /// HTML fragment uses a namespace the output vocabulary cannot carry.
    #[error("Unsupported namespace '{namespace}' in HTML fragment{}", .field.as_ref().map(|f| format!(" in {f}")).unwrap_or_default())]
    UnsupportedNamespace {
        namespace: String,
        field: Option<&'static str>,
    },

    /// Writing the XML tree failed.
    #[error("XML serialization failed: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be decoded.
    #[error("Failed to read documentation unit from JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML input could not be decoded.
    #[error("Failed to read documentation unit from YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Document number cannot be used as an output file name.
    #[error("Invalid document number format: '{0}'. Expected e.g. XXRE000000001")]
    InvalidDocumentNumber(String),

    /// Input file has an extension the loader does not know.
    #[error("Unsupported input file '{}'. Expected .json, .yaml or .yml", .0.display())]
    UnsupportedInput(PathBuf),

    /// Input file exceeds the configured size limit.
    #[error("Input file '{}' is {size} bytes, limit is {limit} bytes", .path.display())]
    InputTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },
}

impl LdmlError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingField { .. } | Self::EmptyBody => FailureKind::Validation,
            Self::Mapping { .. } | Self::UnsupportedNamespace { .. } => FailureKind::Mapping,
            Self::Serialization(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::InvalidDocumentNumber(_)
            | Self::UnsupportedInput(_)
            | Self::InputTooLarge { .. } => FailureKind::Input,
        }
    }

    /// Attach the name of the source field to a mapping failure.
    ///
    /// Other errors pass through unchanged.
    #[must_use]
    pub fn in_field(self, name: &'static str) -> Self {
        match self {
            Self::Mapping { source, .. } => Self::Mapping {
                field: Some(name),
                source,
            },
            Self::UnsupportedNamespace { namespace, .. } => Self::UnsupportedNamespace {
                namespace,
                field: Some(name),
            },
            other => other,
        }
    }
}

/// Result type alias for transformation operations.
pub type Result<T> = std::result::Result<T, LdmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> roxmltree::Error {
        roxmltree::Document::parse("<a><b></a>").err().unwrap()
    }

    #[test]
    fn test_missing_field_display() {
        let err = LdmlError::MissingField { field: "court" };
        assert_eq!(err.to_string(), "Missing required field: court");
        assert_eq!(err.kind(), FailureKind::Validation);
    }

    #[test]
    fn test_empty_body_is_validation() {
        assert_eq!(LdmlError::EmptyBody.kind(), FailureKind::Validation);
    }

    #[test]
    fn test_mapping_with_field() {
        let err = LdmlError::Mapping {
            field: None,
            source: parse_error(),
        }
        .in_field("tenor");
        assert!(err.to_string().starts_with("Failed to parse HTML fragment in tenor: "));
        assert_eq!(err.kind(), FailureKind::Mapping);
    }

    #[test]
    fn test_mapping_without_field() {
        let err = LdmlError::Mapping {
            field: None,
            source: parse_error(),
        };
        assert!(err.to_string().starts_with("Failed to parse HTML fragment: "));
    }

    #[test]
    fn test_in_field_leaves_validation_untouched() {
        let err = LdmlError::EmptyBody.in_field("tenor");
        assert!(matches!(err, LdmlError::EmptyBody));
    }

    #[test]
    fn test_unsupported_input_display() {
        let err = LdmlError::UnsupportedInput(PathBuf::from("unit.txt"));
        assert!(err.to_string().contains("unit.txt"));
        assert_eq!(err.kind(), FailureKind::Input);
    }
}
