//! Error types and handling for packsmith
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Source-control failures form their own family in [`source_control`] and are
//! embedded transparently in [`PacksmithError`].

pub mod source_control;

pub use source_control::SourceControlError;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for packsmith operations
#[derive(Error, Diagnostic, Debug)]
pub enum PacksmithError {
    // Source-control errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    SourceControl(#[from] SourceControlError),

    // Caller contract violations
    #[error("Malformed project metadata: {field}: {reason}")]
    #[diagnostic(
        code(packsmith::project::malformed),
        help("This is a bug in the calling build driver or project definition")
    )]
    MalformedMetadata { field: String, reason: String },

    // Platform errors
    #[error("Platform not supported: {platform}")]
    #[diagnostic(
        code(packsmith::platform::not_supported),
        help("Run 'packsmith platforms' to list known platform identifiers")
    )]
    PlatformNotSupported { platform: String },

    #[error("Invalid platform definition '{platform}': {reason}")]
    #[diagnostic(code(packsmith::platform::invalid))]
    PlatformInvalid { platform: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(packsmith::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(packsmith::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(packsmith::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Packaging artifact errors
    #[error("Failed to render template '{template}': {reason}")]
    #[diagnostic(code(packsmith::template::render_failed))]
    TemplateFailed { template: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(packsmith::fs::io_error))]
    IoError { message: String },
}

impl PacksmithError {
    /// The source-control failure behind this error, if it is one
    pub fn source_control(&self) -> Option<&SourceControlError> {
        match self {
            Self::SourceControl(err) => Some(err),
            _ => None,
        }
    }
}

/// Shorthand for a malformed-metadata error
pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> PacksmithError {
    PacksmithError::MalformedMetadata {
        field: field.into(),
        reason: reason.into(),
    }
}

impl From<std::io::Error> for PacksmithError {
    fn from(err: std::io::Error) -> Self {
        PacksmithError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PacksmithError {
    fn from(err: serde_yaml::Error) -> Self {
        PacksmithError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PacksmithError {
    fn from(err: serde_json::Error) -> Self {
        PacksmithError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PacksmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_source_control_is_transparent() {
        let err: PacksmithError = SourceControlError::InvalidRepo {
            url: "example.com/acme/tool".to_string(),
        }
        .into();
        assert_eq!(
            err.source_control().and_then(SourceControlError::repo),
            Some("example.com/acme/tool")
        );
        assert_eq!(
            err.to_string(),
            "\"example.com/acme/tool\" is not a valid Git repo"
        );
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("packsmith::git::invalid_repo".to_string())
        );
    }

    #[test]
    fn test_malformed_is_not_source_control() {
        let err = malformed("name", "must not be empty");
        assert!(err.source_control().is_none());
        assert!(matches!(err, PacksmithError::MalformedMetadata { .. }));
    }

    test_error_contains!(
        test_malformed_message,
        malformed("version", "must not contain whitespace"),
        "version",
        "whitespace"
    );

    test_error_contains!(
        test_platform_not_supported_message,
        PacksmithError::PlatformNotSupported {
            platform: "osx-99-x86_64".to_string()
        },
        "Platform not supported",
        "osx-99-x86_64"
    );

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PacksmithError = io_err.into();
        assert!(matches!(err, PacksmithError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: PacksmithError = parse_result.unwrap_err().into();
        assert!(matches!(err, PacksmithError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json content");
        let err: PacksmithError = parse_result.unwrap_err().into();
        assert!(matches!(err, PacksmithError::ConfigParseFailed { .. }));
    }
}
