//! Declarative command-line argument parsing.
//!
//! A caller describes a command's contract once as a [`CliSchema`] and this
//! crate turns a raw argument list into typed values:
//!
//! - [`CliSchema`]: options (take a value), flags (boolean), ordered
//!   positional arguments, and an alias table.
//! - [`bind`]: tokenizes argv and maps tokens onto schema slots, producing an
//!   untyped [`BoundArgs`] record.
//! - [`validate_record`]: coerces the record through each field's
//!   [`FieldSchema`], applying defaults and collecting every failure.
//! - [`parse`]: the whole pipeline in one call.
//! - [`render_help`] and [`format_failures`]: text for humans.
//!
//! The crate never prints or exits; that is left to the caller (see the
//! `argschema-cli` crate).
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! let schema = CliSchema::new()
//!     .option("name", ValueSchema::string().with_description("input your name"))
//!     .option("age", ValueSchema::number().with_default(1))
//!     .flag("shortable", FlagSchema::new())
//!     .arg(ValueSchema::string())
//!     .alias("s", "shortable");
//!
//! let parsed = parse(&schema, &["--name", "mizchi", "-s", "xxx"]).unwrap();
//! assert_eq!(parsed.option("name").and_then(Value::as_str), Some("mizchi"));
//! assert!(parsed.flag("shortable"));
//!
//! match parse(&schema, &["xxx"]) {
//!     Err(ParseError::Validation(failures)) => {
//!         assert_eq!(format_failures(&failures), vec!["--name: required"]);
//!     }
//!     other => panic!("expected validation failure, got {other:?}"),
//! }
//! ```

mod alias;
mod bind;
mod coerce;
mod field;
mod help;
mod parse;
mod report;
mod types;
mod validate;

pub use alias::resolve_alias;
pub use bind::{BindError, BoundArgs, bind};
pub use coerce::{FieldFailure, FieldPath, ParsedArgs, validate_record};
pub use field::{FailureKind, FieldSchema};
pub use help::{render_help, render_help_with_prefix, usage_line};
pub use parse::{ParseError, parse, parse_with};
pub use report::{format_failures, format_failures_verbose};
pub use types::*;
pub use validate::{SchemaError, validate_names, validate_schema};
