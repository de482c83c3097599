//! Validation and coercion of a bound record into typed values.
//!
//! Every field is checked in one pass and every failure is collected, so a
//! caller can report all problems at once. Failures come out in declaration
//! order: options, then positionals by index. Flags cannot fail.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::bind::BoundArgs;
use crate::field::{FailureKind, FieldSchema};
use crate::types::{CliSchema, Value};

/// Location of a field within the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Option(String),
    Arg(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(name) => write!(f, "--{name}"),
            Self::Arg(index) => write!(f, "args[{index}]"),
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub path: FieldPath,
    pub kind: FailureKind,
}

impl FieldFailure {
    pub fn new(path: FieldPath, kind: FailureKind) -> Self {
        Self { path, kind }
    }
}

/// Fully typed parse result.
///
/// Options that are optional, absent and without a default do not appear in
/// `options`. Every declared flag appears in `flags`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArgs {
    pub options: IndexMap<String, Value>,
    pub flags: IndexMap<String, bool>,
    pub args: Vec<Value>,
}

impl ParsedArgs {
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Value of flag `name`; undeclared flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

/// Coerces `record` against `schema`, applying defaults.
///
/// - A present value is passed through [`FieldSchema::coerce`].
/// - A missing value takes the field's default; without one it is
///   [`FailureKind::Required`] unless the option is optional.
/// - A flag is `true` when present, otherwise its declared default.
/// - Every positional slot must be filled, by argv or by a default.
///
/// # Errors
///
/// Returns every [`FieldFailure`] found, in declaration order.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema: CliSchema = CliSchema::new()
///     .option("name", ValueSchema::string())
///     .option("age", ValueSchema::number().with_default(1));
///
/// let parsed = validate_record(&schema, &bind(&schema, &["--name", "mizchi"]).unwrap()).unwrap();
/// assert_eq!(parsed.option("age"), Some(&Value::Number(1.0)));
///
/// let failures = validate_record(&schema, &BoundArgs::default()).unwrap_err();
/// assert_eq!(failures[0].path, FieldPath::Option("name".into()));
/// assert_eq!(failures[0].kind, FailureKind::Required);
/// ```
pub fn validate_record<F: FieldSchema>(
    schema: &CliSchema<F>,
    record: &BoundArgs,
) -> Result<ParsedArgs, Vec<FieldFailure>> {
    let mut parsed = ParsedArgs::default();
    let mut failures = Vec::new();

    for (name, field) in &schema.options {
        let path = || FieldPath::Option(name.clone());
        match record.options.get(name) {
            Some(raw) => match field.coerce(raw) {
                Ok(value) => {
                    parsed.options.insert(name.clone(), value);
                }
                Err(kind) => failures.push(FieldFailure::new(path(), kind)),
            },
            None => {
                if let Some(value) = field.default_value() {
                    parsed.options.insert(name.clone(), value);
                } else if !field.is_optional() {
                    failures.push(FieldFailure::new(path(), FailureKind::Required));
                }
            }
        }
    }

    for (name, flag) in &schema.flags {
        let value = record.flags.get(name).copied().unwrap_or(flag.default);
        parsed.flags.insert(name.clone(), value);
    }

    for (index, field) in schema.args.iter().enumerate() {
        let path = FieldPath::Arg(index);
        let value = match record.args.get(index) {
            Some(raw) => field.coerce(raw),
            None => field.default_value().ok_or(FailureKind::Required),
        };
        match value {
            Ok(value) => parsed.args.push(value),
            Err(kind) => failures.push(FieldFailure::new(path, kind)),
        }
    }

    if failures.is_empty() {
        Ok(parsed)
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::bind;
    use crate::types::{FlagSchema, ValueSchema};

    fn schema() -> CliSchema {
        CliSchema::new()
            .option("name", ValueSchema::string())
            .option("env", ValueSchema::choice(["a", "b"]).optional())
            .option("age", ValueSchema::number().with_default(1))
            .flag("dry", FlagSchema::new())
            .flag("color", FlagSchema::new().with_default(true))
            .arg(ValueSchema::string())
            .arg(ValueSchema::pattern(r"^\d+$"))
    }

    fn record(argv: &[&str]) -> BoundArgs {
        bind(&schema(), argv).unwrap()
    }

    #[test]
    fn test_validate_applies_defaults() {
        let parsed = validate_record(&schema(), &record(&["--name=x", "a", "1"])).unwrap();

        assert_eq!(parsed.option("age"), Some(&Value::Number(1.0)));
        assert_eq!(parsed.option("env"), None);
        assert!(!parsed.flag("dry"));
        assert!(parsed.flag("color"));
        assert_eq!(parsed.args, vec![Value::from("a"), Value::from("1")]);
    }

    #[test]
    fn test_validate_collects_all_failures_in_declaration_order() {
        let failures =
            validate_record(&schema(), &record(&["--env", "c", "--age=old", "a", "x"])).unwrap_err();

        let paths: Vec<String> = failures.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["--name", "--env", "--age", "args[1]"]);

        let codes: Vec<&str> = failures.iter().map(|f| f.kind.code()).collect();
        assert_eq!(
            codes,
            vec!["required", "invalid_enum_value", "invalid_type", "invalid_string"]
        );
    }

    #[test]
    fn test_validate_missing_positionals() {
        let failures = validate_record(&schema(), &record(&["--name=x"])).unwrap_err();
        assert_eq!(
            failures,
            vec![
                FieldFailure::new(FieldPath::Arg(0), FailureKind::Required),
                FieldFailure::new(FieldPath::Arg(1), FailureKind::Required),
            ]
        );
    }

    #[test]
    fn test_validate_positional_default_fills_slot() {
        let schema: CliSchema = CliSchema::new()
            .arg(ValueSchema::string())
            .arg(ValueSchema::integer().with_default(8080));
        let parsed = validate_record(&schema, &bind(&schema, &["host"]).unwrap()).unwrap();
        assert_eq!(parsed.args, vec![Value::from("host"), Value::Integer(8080)]);
    }

    #[test]
    fn test_validate_flag_presence_is_true() {
        let parsed =
            validate_record(&schema(), &record(&["--name=x", "--dry", "a", "1"])).unwrap();
        assert!(parsed.flag("dry"));
        assert_eq!(parsed.flags.keys().collect::<Vec<_>>(), vec!["dry", "color"]);
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::Option("name".into()).to_string(), "--name");
        assert_eq!(FieldPath::Arg(3).to_string(), "args[3]");
    }
}
