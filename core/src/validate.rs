//! Schema validation.
//!
//! Validates structural invariants of a [`CliSchema`] before it is used for
//! parsing: option and flag names must be disjoint, aliases must point one
//! level deep at a declared name, and declared defaults and patterns must
//! make sense for their type.
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! let schema: CliSchema = CliSchema::new()
//!     .flag("shortable", FlagSchema::new())
//!     .alias("s", "shortable");
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: alias to a name that does not exist
//! let bad: CliSchema = CliSchema::new().alias("s", "missing");
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use regex::Regex;
use thiserror::Error;

use crate::types::{CliSchema, ValueSchema, ValueType};

/// Schema validation errors.
///
/// Each variant describes a specific structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option or flag has an empty or whitespace-only name.
    #[error("option and flag names cannot be empty")]
    EmptyName,
    /// The same name is declared both as an option and as a flag.
    #[error("name declared as both option and flag: {0}")]
    NameConflict(String),
    /// An alias points at a name that is neither an option nor a flag.
    #[error("alias '{alias}' points to unknown name '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
    /// An alias points at another alias.
    #[error("alias '{alias}' points to alias '{target}' (aliases resolve one level only)")]
    AliasChain { alias: String, target: String },
    /// An alias key is itself a canonical option or flag name.
    #[error("alias '{0}' shadows a declared option or flag")]
    AliasShadowsName(String),
    /// A choice type lists no values.
    #[error("{0}: choice type has no values")]
    EmptyChoice(String),
    /// A pattern type does not compile.
    #[error("{field}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
    /// A default value does not fit the declared type.
    #[error("{field}: default does not match type {expected}")]
    DefaultTypeMismatch { field: String, expected: String },
    /// A positional is optional but has no default to fill its slot.
    #[error("args[{0}]: positional arguments cannot be optional without a default")]
    OptionalPositional(usize),
}

/// Validates a schema.
///
/// Runs [`validate_names`] and then checks each field: empty choices, bad
/// patterns, mistyped defaults, and optional positionals. All problems are
/// returned, names and aliases first, then options, then positionals.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema: CliSchema = CliSchema::new()
///     .option("dry", ValueSchema::string())
///     .flag("dry", FlagSchema::new());
/// let errors = validate_schema(&schema);
/// assert_eq!(errors, vec![SchemaError::NameConflict("dry".into())]);
/// ```
pub fn validate_schema(schema: &CliSchema<ValueSchema>) -> Vec<SchemaError> {
    let mut errors = validate_names(schema);

    for (name, field) in &schema.options {
        errors.extend(validate_field(&format!("--{name}"), field));
    }

    for (index, field) in schema.args.iter().enumerate() {
        errors.extend(validate_field(&format!("args[{index}]"), field));
        if field.optional && field.default.is_none() {
            errors.push(SchemaError::OptionalPositional(index));
        }
    }

    errors
}

/// Validates names and aliases only.
///
/// This part does not look inside field schemas, so it applies to a schema
/// built on any [`FieldSchema`](crate::FieldSchema) implementation.
pub fn validate_names<F>(schema: &CliSchema<F>) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if schema
        .options
        .keys()
        .chain(schema.flags.keys())
        .any(|name| name.trim().is_empty())
    {
        errors.push(SchemaError::EmptyName);
    }

    for name in schema.options.keys() {
        if schema.flags.contains_key(name) {
            errors.push(SchemaError::NameConflict(name.clone()));
        }
    }

    for (alias, target) in &schema.alias {
        if schema.is_option(alias) || schema.is_flag(alias) {
            errors.push(SchemaError::AliasShadowsName(alias.clone()));
            continue;
        }
        if schema.alias.contains_key(target) {
            errors.push(SchemaError::AliasChain {
                alias: alias.clone(),
                target: target.clone(),
            });
            continue;
        }
        if !schema.is_option(target) && !schema.is_flag(target) {
            errors.push(SchemaError::UnknownAliasTarget {
                alias: alias.clone(),
                target: target.clone(),
            });
        }
    }

    errors
}

fn validate_field(label: &str, field: &ValueSchema) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    match &field.value_type {
        ValueType::Choice(values) if values.is_empty() => {
            errors.push(SchemaError::EmptyChoice(label.to_string()));
        }
        ValueType::Pattern(pattern) if pattern.regex().is_none() => {
            if let Err(err) = Regex::new(pattern.as_str()) {
                errors.push(SchemaError::InvalidPattern {
                    field: label.to_string(),
                    pattern: pattern.to_string(),
                    reason: err.to_string(),
                });
            }
        }
        _ => {}
    }

    if let Some(default) = &field.default {
        if !field.value_type.accepts(default) {
            errors.push(SchemaError::DefaultTypeMismatch {
                field: label.to_string(),
                expected: field.value_type.label(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlagSchema;

    #[test]
    fn test_validate_schema_accepts_valid_schema() {
        let schema: CliSchema = CliSchema::new()
            .option("name", ValueSchema::string())
            .option("env", ValueSchema::choice(["a", "b"]).with_default("a"))
            .flag("dry", FlagSchema::new())
            .arg(ValueSchema::pattern(r"^\d+$"))
            .alias("d", "dry");

        assert!(validate_schema(&schema).is_empty());
        assert!(validate_schema(&schema.normalized()).is_empty());
    }

    #[test]
    fn test_validate_schema_rejects_alias_problems() {
        let schema: CliSchema = CliSchema::new()
            .flag("shortable", FlagSchema::new())
            .alias("s", "shortable")
            .alias("x", "s")
            .alias("y", "nope")
            .alias("shortable", "shortable");

        let errors = validate_schema(&schema);
        assert_eq!(
            errors,
            vec![
                SchemaError::AliasChain {
                    alias: "x".to_string(),
                    target: "s".to_string(),
                },
                SchemaError::UnknownAliasTarget {
                    alias: "y".to_string(),
                    target: "nope".to_string(),
                },
                SchemaError::AliasShadowsName("shortable".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_schema_rejects_bad_fields() {
        let schema: CliSchema = CliSchema::new()
            .option("env", ValueSchema::new(ValueType::Choice(Vec::new())))
            .option("id", ValueSchema::pattern("(unclosed"))
            .option("age", ValueSchema::number().with_default("old"))
            .arg(ValueSchema::string().optional());

        let errors = validate_schema(&schema);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], SchemaError::EmptyChoice("--env".to_string()));
        assert!(matches!(&errors[1], SchemaError::InvalidPattern { field, .. } if field == "--id"));
        assert_eq!(
            errors[2],
            SchemaError::DefaultTypeMismatch {
                field: "--age".to_string(),
                expected: "number".to_string(),
            }
        );
        assert_eq!(errors[3], SchemaError::OptionalPositional(0));
    }

    #[test]
    fn test_validate_schema_rejects_empty_name() {
        let schema: CliSchema = CliSchema::new().flag(" ", FlagSchema::new());
        assert_eq!(validate_schema(&schema), vec![SchemaError::EmptyName]);
    }
}
