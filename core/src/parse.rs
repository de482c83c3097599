//! End-to-end parse pipeline.
//!
//! `normalize -> check schema -> bind -> validate`. Each stage has its own
//! error family, and [`ParseError`] keeps them apart so callers can tell a
//! broken schema, malformed argv, and invalid values from one another.

use thiserror::Error;
use tracing::debug;

use crate::bind::{BindError, bind};
use crate::coerce::{FieldFailure, ParsedArgs, validate_record};
use crate::field::FieldSchema;
use crate::types::CliSchema;
use crate::validate::{SchemaError, validate_names, validate_schema};

/// Error returned by [`parse`] and [`parse_with`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The schema itself violates a structural invariant.
    #[error("invalid schema: {}", join_errors(.0))]
    Schema(Vec<SchemaError>),
    /// argv could not be bound onto the schema.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// One or more fields failed coercion or are missing.
    #[error("{} argument(s) failed validation", .0.len())]
    Validation(Vec<FieldFailure>),
}

impl ParseError {
    /// Field failures, empty unless this is [`ParseError::Validation`].
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            Self::Validation(failures) => failures,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses `argv` (program name excluded) against `schema`.
///
/// The schema is normalized first (see [`CliSchema::normalized`]), so the
/// result always carries a `help` flag unless the schema declares its own.
///
/// # Errors
///
/// - [`ParseError::Schema`] if [`validate_schema`] reports problems.
/// - [`ParseError::Bind`] for malformed argv (see [`bind`]).
/// - [`ParseError::Validation`] with every failing field.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema: CliSchema = CliSchema::new()
///     .option("name", ValueSchema::string())
///     .option("age", ValueSchema::number().with_default(1))
///     .flag("dry", FlagSchema::new())
///     .arg(ValueSchema::string())
///     .arg(ValueSchema::number());
///
/// let parsed = parse(&schema, &["--name", "mizchi", "--dry", "xxx", "1"]).unwrap();
/// assert_eq!(parsed.option("name"), Some(&Value::from("mizchi")));
/// assert_eq!(parsed.option("age"), Some(&Value::Number(1.0)));
/// assert!(parsed.flag("dry"));
/// assert_eq!(parsed.args, vec![Value::from("xxx"), Value::Number(1.0)]);
///
/// let err = parse(&schema, &["--name=mizchi", "xxx", "1", "2"]).unwrap_err();
/// assert!(matches!(err, ParseError::Bind(BindError::ExcessPositional { .. })));
/// ```
pub fn parse<S: AsRef<str>>(schema: &CliSchema, argv: &[S]) -> Result<ParsedArgs, ParseError> {
    let schema = schema.normalized();
    let errors = validate_schema(&schema);
    if !errors.is_empty() {
        return Err(ParseError::Schema(errors));
    }
    run_pipeline(&schema, argv)
}

/// Parses with a custom [`FieldSchema`] implementation.
///
/// Only names and aliases are checked up front; field-level checks are the
/// field schema's own business.
pub fn parse_with<F, S>(schema: &CliSchema<F>, argv: &[S]) -> Result<ParsedArgs, ParseError>
where
    F: FieldSchema + Clone,
    S: AsRef<str>,
{
    let schema = schema.normalized();
    let errors = validate_names(&schema);
    if !errors.is_empty() {
        return Err(ParseError::Schema(errors));
    }
    run_pipeline(&schema, argv)
}

fn run_pipeline<F, S>(schema: &CliSchema<F>, argv: &[S]) -> Result<ParsedArgs, ParseError>
where
    F: FieldSchema,
    S: AsRef<str>,
{
    let record = bind(schema, argv)?;
    match validate_record(schema, &record) {
        Ok(parsed) => {
            debug!(
                options = parsed.options.len(),
                args = parsed.args.len(),
                "arguments parsed"
            );
            Ok(parsed)
        }
        Err(failures) => {
            debug!(failures = failures.len(), "argument validation failed");
            Err(ParseError::Validation(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::FieldPath;
    use crate::field::FailureKind;
    use crate::types::{FlagSchema, Value, ValueSchema};

    #[test]
    fn test_parse_includes_help_flag() {
        let schema: CliSchema = CliSchema::new().flag("dry", FlagSchema::new());
        let parsed = parse(&schema, &["-h"]).unwrap();
        assert!(parsed.flag("help"));
        assert!(!parsed.flag("dry"));

        let parsed = parse(&schema, &[] as &[&str]).unwrap();
        assert_eq!(parsed.flags.get("help"), Some(&false));
    }

    #[test]
    fn test_parse_keeps_help_alias_declared_by_caller() {
        let schema: CliSchema = CliSchema::new()
            .flag("usage", FlagSchema::new())
            .alias("help", "usage");
        assert!(validate_schema(&schema).is_empty());

        let parsed = parse(&schema, &["--help"]).unwrap();
        assert!(parsed.flag("usage"));
        assert!(!parsed.flags.contains_key("help"));
    }

    #[test]
    fn test_parse_rejects_invalid_schema() {
        let schema: CliSchema = CliSchema::new().alias("x", "missing");
        let err = parse(&schema, &["-x"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Schema(vec![SchemaError::UnknownAliasTarget {
                alias: "x".to_string(),
                target: "missing".to_string(),
            }])
        );
        assert!(err.failures().is_empty());
    }

    #[test]
    fn test_parse_validation_failures() {
        let schema: CliSchema = CliSchema::new()
            .option("name", ValueSchema::string())
            .option("age", ValueSchema::number());
        let err = parse(&schema, &["--age", "x"]).unwrap_err();
        assert_eq!(err.to_string(), "2 argument(s) failed validation");
        let paths: Vec<&FieldPath> = err.failures().iter().map(|f| &f.path).collect();
        assert_eq!(
            paths,
            vec![&FieldPath::Option("name".into()), &FieldPath::Option("age".into())]
        );
    }

    #[test]
    fn test_parse_sequence_error_is_bind_error() {
        let schema: CliSchema = CliSchema::new()
            .option("name", ValueSchema::string())
            .flag("dry", FlagSchema::new());
        let err = parse(&schema, &["--name", "--dry"]).unwrap_err();
        assert!(matches!(err, ParseError::Bind(BindError::Sequence { .. })));
    }

    #[derive(Debug, Clone)]
    struct Upper;

    impl FieldSchema for Upper {
        fn coerce(&self, raw: &str) -> Result<Value, FailureKind> {
            if raw.chars().all(|c| c.is_ascii_uppercase()) {
                Ok(Value::from(raw))
            } else {
                Err(FailureKind::InvalidType {
                    expected: "uppercase".into(),
                    received: raw.into(),
                })
            }
        }

        fn default_value(&self) -> Option<Value> {
            None
        }

        fn is_optional(&self) -> bool {
            false
        }

        fn description(&self) -> &str {
            ""
        }

        fn type_label(&self) -> String {
            "uppercase".into()
        }
    }

    #[test]
    fn test_parse_with_custom_field_schema() {
        let schema = CliSchema::new().option("code", Upper).arg(Upper);

        let parsed = parse_with(&schema, &["--code", "AB", "CD"]).unwrap();
        assert_eq!(parsed.option("code"), Some(&Value::from("AB")));
        assert_eq!(parsed.arg(0), Some(&Value::from("CD")));

        let err = parse_with(&schema, &["--code=ab", "CD"]).unwrap_err();
        assert_eq!(err.failures()[0].kind.code(), "invalid_type");
    }
}
