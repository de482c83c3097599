//! Schema type definitions for declarative argument parsing.
//!
//! This module defines the data model a caller hands to [`parse`](crate::parse):
//! named options that take a value, boolean flags, an ordered list of
//! positional arguments, and an alias table. The types are designed for
//! serialization with [`serde`] so a schema can be written as JSON or YAML.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical name of the implicitly injected help flag.
pub const HELP_FLAG: &str = "help";

/// Alias implicitly mapped to [`HELP_FLAG`].
pub const HELP_ALIAS: &str = "h";

/// Regular expression source, compiled once when the pattern is created.
///
/// Serialized as the plain source string. A source that does not compile is
/// kept as written and reported by [`validate_schema`](crate::validate_schema).
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Pattern {
    source: String,
    compiled: Option<Regex>,
}

impl Pattern {
    pub fn new(source: &str) -> Self {
        Self::from(source.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled expression, `None` if the source is invalid.
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        let compiled = Regex::new(&source).ok();
        Self { source, compiled }
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.source, f)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Primitive kind of an option or positional value.
///
/// Every raw token is a string; the value type decides how it is coerced.
///
/// # Examples
///
/// ```
/// use argschema_core::ValueType;
///
/// let vt = ValueType::default();
/// assert_eq!(vt, ValueType::String);
///
/// let env = ValueType::Choice(vec!["a".into(), "b".into()]);
/// assert_eq!(env.label(), "enum: [a] [b]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Any string, taken verbatim (the default).
    #[default]
    String,
    /// Unsigned decimal such as `1`, `0.5` or `34`.
    Number,
    /// Signed 64-bit integer.
    Integer,
    /// Literal `true` or `false`.
    Boolean,
    /// One of a fixed set of strings.
    Choice(Vec<String>),
    /// A string that must match the given regular expression.
    Pattern(Pattern),
}

impl ValueType {
    /// Human-readable type label used in help output.
    pub fn label(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Choice(values) => {
                let listed: Vec<String> = values.iter().map(|v| format!("[{v}]")).collect();
                format!("enum: {}", listed.join(" "))
            }
            Self::Pattern(pattern) => format!("regex({pattern})"),
        }
    }

    /// Whether `value` is an acceptable default for this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Number, Value::Number(_) | Value::Integer(_)) => true,
            (Self::Integer, Value::Integer(_)) => true,
            (Self::Boolean, Value::Boolean(_)) => true,
            (Self::Choice(values), Value::String(s)) => values.iter().any(|v| v == s),
            (Self::Pattern(_), Value::String(_)) => true,
            _ => false,
        }
    }
}

/// A coerced, typed value.
///
/// Serialized untagged, so `{"age": 1}` and `{"name": "mizchi"}` round-trip
/// as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Schema for a single value slot: an option or a positional argument.
///
/// Use the constructors ([`string`](ValueSchema::string),
/// [`number`](ValueSchema::number), ...) and chain builder methods such as
/// [`with_default`](ValueSchema::with_default) and
/// [`with_description`](ValueSchema::with_description).
///
/// # Examples
///
/// ```
/// use argschema_core::{Value, ValueSchema, ValueType};
///
/// let age = ValueSchema::number()
///     .with_default(1)
///     .with_description("your age");
/// assert_eq!(age.value_type, ValueType::Number);
/// assert_eq!(age.default, Some(Value::Integer(1)));
///
/// let nick = ValueSchema::string().optional();
/// assert!(nick.optional);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValueSchema {
    /// Primitive kind the raw token is coerced to.
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Whether the slot may be left empty without a default.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Value used when the slot is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Description shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValueSchema {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn number() -> Self {
        Self::new(ValueType::Number)
    }

    pub fn integer() -> Self {
        Self::new(ValueType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(ValueType::Boolean)
    }

    /// Creates a schema accepting one of `values`.
    pub fn choice<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ValueType::Choice(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Creates a schema for strings matching `pattern`.
    pub fn pattern(pattern: &str) -> Self {
        Self::new(ValueType::Pattern(Pattern::new(pattern)))
    }

    /// Marks the slot as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the value used when the slot is not supplied.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// Schema for a boolean flag.
///
/// Presence on the command line means `true`; absence yields `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlagSchema {
    /// Value when the flag is absent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
    /// Description shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlagSchema {
    /// Creates a flag defaulting to `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value used when the flag is absent.
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// Complete argument contract for a command.
///
/// This is the primary type in the crate. Options, flags and aliases are
/// kept in declaration order; positional arguments are bound by index.
///
/// The type parameter is the field schema used for options and positionals.
/// It defaults to [`ValueSchema`]; any type implementing
/// [`FieldSchema`](crate::FieldSchema) can stand in for it.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = CliSchema::new()
///     .option("name", ValueSchema::string().with_description("input your name"))
///     .option("age", ValueSchema::number().with_default(1))
///     .flag("dry", FlagSchema::new())
///     .arg(ValueSchema::string())
///     .alias("n", "name");
///
/// assert!(schema.is_option("name"));
/// assert!(schema.is_flag("dry"));
/// assert_eq!(schema.args.len(), 1);
/// assert_eq!(schema.alias_for("name"), Some("n"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "F: Serialize",
    deserialize = "F: Deserialize<'de>"
))]
pub struct CliSchema<F = ValueSchema> {
    /// Value-taking options keyed by canonical name.
    #[serde(default)]
    pub options: IndexMap<String, F>,
    /// Boolean flags keyed by canonical name.
    #[serde(default)]
    pub flags: IndexMap<String, FlagSchema>,
    /// Positional arguments in order.
    #[serde(default)]
    pub args: Vec<F>,
    /// Alternate name to canonical option/flag name.
    #[serde(default)]
    pub alias: IndexMap<String, String>,
}

impl<F> Default for CliSchema<F> {
    fn default() -> Self {
        Self {
            options: IndexMap::new(),
            flags: IndexMap::new(),
            args: Vec::new(),
            alias: IndexMap::new(),
        }
    }
}

impl<F> CliSchema<F> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a value-taking option.
    pub fn option(mut self, name: &str, schema: F) -> Self {
        self.options.insert(name.to_string(), schema);
        self
    }

    /// Declares a boolean flag.
    pub fn flag(mut self, name: &str, schema: FlagSchema) -> Self {
        self.flags.insert(name.to_string(), schema);
        self
    }

    /// Appends a positional argument.
    pub fn arg(mut self, schema: F) -> Self {
        self.args.push(schema);
        self
    }

    /// Maps `alias` to the canonical option or flag `target`.
    pub fn alias(mut self, alias: &str, target: &str) -> Self {
        self.alias.insert(alias.to_string(), target.to_string());
        self
    }

    pub fn is_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn is_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Returns the first alias that maps to `canonical`, if any.
    pub fn alias_for(&self, canonical: &str) -> Option<&str> {
        self.alias
            .iter()
            .find(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
    }
}

impl<F: Clone> CliSchema<F> {
    /// Returns a copy with the reserved `help` flag and `h` alias filled in.
    ///
    /// The flag is only added when no option, flag or alias is already named
    /// `help`, and the alias only when `h` is unused. The receiver is left
    /// untouched, so normalizing the same schema repeatedly is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{CliSchema, ValueSchema, HELP_FLAG};
    ///
    /// let schema: CliSchema = CliSchema::new().option("name", ValueSchema::string());
    /// let normalized = schema.normalized();
    ///
    /// assert!(normalized.is_flag(HELP_FLAG));
    /// assert_eq!(normalized.alias.get("h").map(String::as_str), Some("help"));
    /// assert!(!schema.is_flag(HELP_FLAG));
    /// assert_eq!(normalized.normalized(), normalized);
    /// ```
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        let help_declared = out.is_option(HELP_FLAG)
            || out.is_flag(HELP_FLAG)
            || out.alias.contains_key(HELP_FLAG);
        if !help_declared {
            out.flags.insert(
                HELP_FLAG.to_string(),
                FlagSchema::new().with_description("Show help information"),
            );
        }
        if !out.alias.contains_key(HELP_ALIAS)
            && !out.is_option(HELP_ALIAS)
            && !out.is_flag(HELP_ALIAS)
            && out.is_flag(HELP_FLAG)
        {
            out.alias
                .insert(HELP_ALIAS.to_string(), HELP_FLAG.to_string());
        }
        out
    }
}
