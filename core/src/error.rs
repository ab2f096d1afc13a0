//! Error and diagnostic types for the API client.
//!
//! # Design
//! Validation problems are collected into a `ValidationLog` rather than
//! failing on the first issue, so the caller sees every problem with a call
//! at once. Errors block the call; warnings record coercions and let the
//! call proceed. `ApiError::InvalidCall` carries the whole log and its
//! `Display` is the full aggregated text.
//!
//! Transport failures keep the underlying `ureq::Error` so nothing is
//! masked between the wire and the caller.

use std::fmt;

use crate::schema::ParameterKind;

/// A single blocking problem found while validating a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No module was given.
    MissingModule,

    /// No method was given.
    MissingMethod,

    /// The (module, method) pair is not in the schema table. Kept as its
    /// own variant so callers can tell it apart from parameter problems.
    UnknownCall { module: String, method: String },

    /// A required parameter was absent from the supplied map.
    MissingParameter {
        name: String,
        kind: ParameterKind,
    },

    /// A parameter value could not be coerced to its declared kind.
    Uncoercible {
        name: String,
        kind: ParameterKind,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingModule => {
                write!(f, "missing the module you're trying to call")
            }
            ValidationError::MissingMethod => {
                write!(f, "missing the method you're trying to call")
            }
            ValidationError::UnknownCall { module, method } => {
                write!(f, "unknown API call '{module}/{method}'")
            }
            ValidationError::MissingParameter { name, kind } => {
                write!(f, "missing required parameter '{name}' (expects {kind})")
            }
            ValidationError::Uncoercible { name, kind } => match kind {
                ParameterKind::Composite => {
                    write!(f, "you need to supply an array or object for '{name}'")
                }
                _ => write!(f, "cannot convert '{name}' to {kind}"),
            },
        }
    }
}

/// A non-fatal note that a parameter value was converted to its declared
/// kind. The call still proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    pub name: String,
    pub expected: ParameterKind,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected '{}' to be a {}", self.name, self.expected)
    }
}

/// All diagnostics collected while validating one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationLog {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<CoercionWarning>,
}

impl ValidationLog {
    /// A call is valid iff nothing landed in `errors`. Warnings never
    /// block.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every diagnostic joined into one string, errors first.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        parts.extend(self.warnings.iter().map(|w| w.to_string()));
        parts.join("; ")
    }
}

/// Errors returned by `SdClient`.
#[derive(Debug)]
pub enum ApiError {
    /// The call failed validation. No network I/O was attempted.
    InvalidCall(ValidationLog),

    /// The configured base URL (or a URL derived from it) is not usable.
    InvalidBaseUrl(String),

    /// The HTTP round-trip failed (connect, TLS, timeout, ...).
    Transport(ureq::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidCall(log) => {
                write!(f, "invalid API call: {}", log.summary())
            }
            ApiError::InvalidBaseUrl(url) => {
                write!(f, "invalid base URL: {url}")
            }
            ApiError::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        ApiError::Transport(e)
    }
}

/// Errors from loading `SdConfig` out of the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The named environment variable is unset or empty.
    MissingVar(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "missing environment variable {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_joins_errors_and_warnings() {
        let log = ValidationLog {
            errors: vec![ValidationError::MissingParameter {
                name: "alertId".to_string(),
                kind: ParameterKind::String,
            }],
            warnings: vec![CoercionWarning {
                name: "admin".to_string(),
                expected: ParameterKind::Integer,
            }],
        };
        let summary = log.summary();
        assert!(summary.contains("alertId"));
        assert!(summary.contains("expects string"));
        assert!(summary.contains("expected 'admin' to be a integer"));
    }

    #[test]
    fn empty_log_is_valid() {
        assert!(ValidationLog::default().is_valid());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let log = ValidationLog {
            errors: Vec::new(),
            warnings: vec![CoercionWarning {
                name: "apiEnabled".to_string(),
                expected: ParameterKind::Integer,
            }],
        };
        assert!(log.is_valid());
    }

    #[test]
    fn invalid_call_display_carries_full_log() {
        let log = ValidationLog {
            errors: vec![
                ValidationError::UnknownCall {
                    module: "unknown".to_string(),
                    method: "thing".to_string(),
                },
                ValidationError::MissingModule,
            ],
            warnings: Vec::new(),
        };
        let text = ApiError::InvalidCall(log).to_string();
        assert!(text.contains("unknown API call 'unknown/thing'"));
        assert!(text.contains("missing the module"));
    }

    #[test]
    fn uncoercible_composite_names_the_parameter() {
        let e = ValidationError::Uncoercible {
            name: "payload".to_string(),
            kind: ParameterKind::Composite,
        };
        assert_eq!(
            e.to_string(),
            "you need to supply an array or object for 'payload'"
        );
    }
}
