//! Call verification and parameter coercion against the schema table.
//!
//! # Design
//! `verify` checks a (module, method, params) triple and rewrites the
//! parameter map in place: declared parameters are coerced to their schema
//! kind, undeclared parameters pass through untouched (forward-compatible
//! passthrough). Every problem is collected before returning, so the caller
//! gets the complete picture in one `ValidationLog`.
//!
//! Coercion is an explicit match over the closed `ParameterKind` set; each
//! kind has a coercion function returning `Result`, never a silent cast.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CoercionWarning, ValidationError, ValidationLog};
use crate::http::HttpMethod;
use crate::schema::{self, ParameterKind};

/// Outcome of coercing one value to its declared kind.
enum Coerced {
    /// The value already had the declared kind.
    Unchanged(Value),
    /// The value was converted; the caller records a warning.
    Converted(Value),
}

/// Verify a call against the schema and coerce its parameters in place.
///
/// `module` and `method` must already be lowercased. On success returns the
/// schema's verb for the call plus any coercion warnings; on failure the
/// full log of errors (and any warnings gathered before the call was
/// rejected).
pub(crate) fn verify(
    module: &str,
    method: &str,
    params: &mut BTreeMap<String, Value>,
) -> Result<(HttpMethod, Vec<CoercionWarning>), ValidationLog> {
    let mut log = ValidationLog::default();

    if module.is_empty() {
        log.errors.push(ValidationError::MissingModule);
    }
    if method.is_empty() {
        log.errors.push(ValidationError::MissingMethod);
    }

    let spec = match schema::lookup(module, method) {
        Some(spec) => spec,
        None => {
            if !module.is_empty() && !method.is_empty() {
                log.errors.push(ValidationError::UnknownCall {
                    module: module.to_string(),
                    method: method.to_string(),
                });
            }
            return Err(log);
        }
    };

    let mut warnings = Vec::new();

    for (name, pspec) in &spec.params {
        let value = match params.remove(*name) {
            Some(value) => value,
            None => {
                if pspec.required {
                    log.errors.push(ValidationError::MissingParameter {
                        name: (*name).to_string(),
                        kind: pspec.kind,
                    });
                }
                continue;
            }
        };

        match coerce(value, pspec.kind) {
            Ok(Coerced::Unchanged(value)) => {
                params.insert((*name).to_string(), value);
            }
            Ok(Coerced::Converted(value)) => {
                params.insert((*name).to_string(), value);
                warnings.push(CoercionWarning {
                    name: (*name).to_string(),
                    expected: pspec.kind,
                });
            }
            Err(original) => {
                log.errors.push(ValidationError::Uncoercible {
                    name: (*name).to_string(),
                    kind: pspec.kind,
                });
                params.insert((*name).to_string(), original);
            }
        }
    }

    if log.errors.is_empty() {
        Ok((spec.verb, warnings))
    } else {
        log.warnings = warnings;
        Err(log)
    }
}

/// Coerce `value` to `kind`. `Err` hands the original value back untouched.
fn coerce(value: Value, kind: ParameterKind) -> Result<Coerced, Value> {
    match kind {
        ParameterKind::String => coerce_string(value),
        ParameterKind::Integer => coerce_integer(value),
        ParameterKind::Composite => coerce_composite(value),
    }
}

fn coerce_string(value: Value) -> Result<Coerced, Value> {
    match value {
        Value::String(_) => Ok(Coerced::Unchanged(value)),
        Value::Number(n) => Ok(Coerced::Converted(Value::String(n.to_string()))),
        Value::Bool(b) => Ok(Coerced::Converted(Value::String(b.to_string()))),
        other => Err(other),
    }
}

fn coerce_integer(value: Value) -> Result<Coerced, Value> {
    match value {
        Value::Number(ref n) if n.is_i64() || n.is_u64() => Ok(Coerced::Unchanged(value)),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(Coerced::Converted(Value::from(f as i64))),
            None => Err(Value::Number(n)),
        },
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Coerced::Converted(Value::from(i))),
            Err(_) => Err(Value::String(s)),
        },
        Value::Bool(b) => Ok(Coerced::Converted(Value::from(i64::from(b)))),
        other => Err(other),
    }
}

/// Composite parameters are serialized to a JSON string in place; this is
/// the wire format the service expects for payload-style bulk parameters.
/// A proper composite had the right kind all along, so no warning.
fn coerce_composite(value: Value) -> Result<Coerced, Value> {
    match value {
        Value::Array(_) | Value::Object(_) => match serde_json::to_string(&value) {
            Ok(json) => Ok(Coerced::Unchanged(Value::String(json))),
            Err(_) => Err(value),
        },
        other => Err(other),
    }
}
