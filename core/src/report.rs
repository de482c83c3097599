//! Display formatting for validation failures.

use crate::coerce::FieldFailure;
use crate::field::FailureKind;

/// Formats failures as display lines, one per failure, in input order.
///
/// Options render as `--<name>: <code>`, positionals as
/// `args[<index>]: <code>`.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let failures = vec![
///     FieldFailure::new(FieldPath::Option("name".into()), FailureKind::Required),
///     FieldFailure::new(FieldPath::Arg(1), FailureKind::Required),
/// ];
/// assert_eq!(format_failures(&failures), vec!["--name: required", "args[1]: required"]);
/// ```
pub fn format_failures(failures: &[FieldFailure]) -> Vec<String> {
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.path, failure.kind.code()))
        .collect()
}

/// Like [`format_failures`], with the full failure message appended.
///
/// Produces lines such as `--age: invalid_type (expected number, received "old")`.
pub fn format_failures_verbose(failures: &[FieldFailure]) -> Vec<String> {
    failures
        .iter()
        .map(|failure| match &failure.kind {
            FailureKind::Required => format!("{}: required", failure.path),
            kind => format!("{}: {} ({kind})", failure.path, kind.code()),
        })
        .collect()
}
