//! Process-facing side of argschema.
//!
//! [`argschema_core`] never prints or exits. This crate does both: the
//! [`Runner`] turns a parse outcome into help text, error lines and exit
//! codes, [`output`] renders typed results, and [`schema_file`] loads a
//! schema from JSON or YAML for the `argschema` binary.

pub mod output;
pub mod runner;
pub mod schema_file;

pub use output::{OutputFormat, format_parsed};
pub use runner::{RunOptions, RunOutcome, Runner};
pub use schema_file::{SchemaFile, load_schema_file};
