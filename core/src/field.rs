//! Field-level coercion and introspection.
//!
//! [`FieldSchema`] is the narrow capability the binder, validator and help
//! renderer rely on. [`ValueSchema`] is the built-in implementation; callers
//! with their own validation layer can implement the trait instead.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{Value, ValueSchema, ValueType};

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9]+[0-9]*|0)(\.\d+)?$").expect("static regex must compile"));

/// Why a single field failed validation.
///
/// The `Display` impl gives a full message; [`code`](FailureKind::code) gives
/// the short stable identifier used by [`format_failures`](crate::format_failures).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// No value was supplied and the field has neither a default nor is optional.
    #[error("required")]
    Required,
    /// The raw token could not be coerced to the declared primitive.
    #[error("expected {expected}, received {received:?}")]
    InvalidType { expected: String, received: String },
    /// The raw token is not one of the declared choices.
    #[error("expected one of [{}], received {received:?}", .allowed.join(", "))]
    InvalidChoice {
        allowed: Vec<String>,
        received: String,
    },
    /// The raw token does not match the declared pattern.
    #[error("{received:?} does not match {pattern}")]
    PatternMismatch { pattern: String, received: String },
}

impl FailureKind {
    /// Short machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType { .. } => "invalid_type",
            Self::InvalidChoice { .. } => "invalid_enum_value",
            Self::PatternMismatch { .. } => "invalid_string",
        }
    }
}

/// Per-field validation and introspection capability.
///
/// Everything the core needs to know about a field schema goes through
/// these methods; no other representation detail is assumed.
pub trait FieldSchema {
    /// Parses and transforms a raw token.
    fn coerce(&self, raw: &str) -> Result<Value, FailureKind>;

    /// Value used when the field is not supplied.
    fn default_value(&self) -> Option<Value>;

    fn has_default(&self) -> bool {
        self.default_value().is_some()
    }

    /// Whether the field may be absent without a default.
    fn is_optional(&self) -> bool;

    /// Description for help output (possibly empty).
    fn description(&self) -> &str;

    /// Type label for help output, e.g. `number` or `enum: [a] [b]`.
    fn type_label(&self) -> String;
}

impl FieldSchema for ValueSchema {
    fn coerce(&self, raw: &str) -> Result<Value, FailureKind> {
        coerce_value(&self.value_type, raw)
    }

    fn default_value(&self) -> Option<Value> {
        match (&self.value_type, &self.default) {
            (ValueType::Number, Some(Value::Integer(i))) => Some(Value::Number(*i as f64)),
            (_, default) => default.clone(),
        }
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn type_label(&self) -> String {
        self.value_type.label()
    }
}

fn coerce_value(value_type: &ValueType, raw: &str) -> Result<Value, FailureKind> {
    let invalid = || FailureKind::InvalidType {
        expected: value_type.label(),
        received: raw.to_string(),
    };

    match value_type {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Number => {
            if !NUMBER_RE.is_match(raw) {
                return Err(invalid());
            }
            raw.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number)
                .ok_or_else(invalid)
        }
        ValueType::Integer => raw.parse::<i64>().map(Value::Integer).map_err(|_| invalid()),
        ValueType::Boolean => match raw {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(invalid()),
        },
        ValueType::Choice(allowed) => {
            if allowed.iter().any(|v| v == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(FailureKind::InvalidChoice {
                    allowed: allowed.clone(),
                    received: raw.to_string(),
                })
            }
        }
        ValueType::Pattern(pattern) => {
            // An uncompilable pattern is rejected by `validate_schema`; if one
            // slips through, nothing can match it.
            match pattern.regex() {
                Some(re) if re.is_match(raw) => Ok(Value::String(raw.to_string())),
                _ => Err(FailureKind::PatternMismatch {
                    pattern: pattern.to_string(),
                    received: raw.to_string(),
                }),
            }
        }
    }
}
