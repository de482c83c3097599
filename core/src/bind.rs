//! Tokenizing and binding raw argv onto schema slots.
//!
//! Binding is a single left-to-right scan with one token of lookahead state
//! (an option waiting for its value). It produces an untyped [`BoundArgs`]
//! record; coercion and defaults are applied later by
//! [`validate_record`](crate::validate_record).
//!
//! Binding is lenient about names: unknown options and flags are dropped
//! without error. It is strict about shape: a value that looks like a long
//! option, or more positionals than declared, aborts the parse.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::alias::resolve_alias;
use crate::types::CliSchema;

/// Untyped result of binding argv onto a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    /// Flags that appeared on the command line (always `true`).
    pub flags: IndexMap<String, bool>,
    /// Raw option values keyed by canonical name; the last occurrence wins.
    pub options: IndexMap<String, String>,
    /// Positional tokens in encounter order.
    pub args: Vec<String>,
}

impl BoundArgs {
    /// Whether flag `name` was set on the command line.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

/// Malformed argv that cannot be bound at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// An option expecting a value was followed by a long-option token.
    #[error("invalid sequence: option '--{option}' expects a value but got '{token}' (use --{option}=VALUE)")]
    Sequence { option: String, token: String },
    /// More positional tokens than the schema declares.
    #[error("unexpected positional argument '{token}' at index {index}")]
    ExcessPositional { token: String, index: usize },
}

/// Binds `argv` (program name excluded) onto `schema`.
///
/// - `--name value` / `-n value`: binds the next token as the option value.
/// - `--name=value`: binds immediately, never waits for the next token.
/// - `--flag`: sets the flag.
/// - anything without a leading dash fills the next positional slot.
///
/// The dash count is not significant (`-x` and `--x` are the same key).
/// An option at the very end with no value is left unbound, so it surfaces
/// later as a missing field rather than as a binding error.
///
/// # Errors
///
/// Returns [`BindError::Sequence`] when a pending option's value starts with
/// `--`, and [`BindError::ExcessPositional`] when a positional token has no
/// declared slot.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema: CliSchema = CliSchema::new()
///     .option("name", ValueSchema::string())
///     .flag("dry", FlagSchema::new())
///     .arg(ValueSchema::string());
///
/// let bound = bind(&schema, &["--name", "mizchi", "--dry", "xxx"]).unwrap();
/// assert_eq!(bound.options["name"], "mizchi");
/// assert!(bound.flag("dry"));
/// assert_eq!(bound.args, vec!["xxx"]);
///
/// let err = bind(&schema, &["a", "b"]).unwrap_err();
/// assert!(matches!(err, BindError::ExcessPositional { index: 1, .. }));
/// ```
pub fn bind<F, S>(schema: &CliSchema<F>, argv: &[S]) -> Result<BoundArgs, BindError>
where
    S: AsRef<str>,
{
    let mut bound = BoundArgs::default();
    let mut pending: Option<&str> = None;

    for token in argv {
        let token = token.as_ref();
        trace!(token, pending = ?pending, "bind token");

        if let Some(option) = pending.take() {
            if token.starts_with("--") {
                return Err(BindError::Sequence {
                    option: option.to_string(),
                    token: token.to_string(),
                });
            }
            bound.options.insert(option.to_string(), token.to_string());
            continue;
        }

        if let Some(raw_key) = strip_dashes(token) {
            if let Some((key, value)) = raw_key.split_once('=') {
                let key = resolve_alias(key, &schema.alias);
                if schema.is_option(key) {
                    bound.options.insert(key.to_string(), value.to_string());
                } else {
                    debug!(token, "ignoring unknown option");
                }
                continue;
            }

            let key = resolve_alias(raw_key, &schema.alias);
            if schema.is_flag(key) {
                bound.flags.insert(key.to_string(), true);
            } else if let Some((name, _)) = schema.options.get_key_value(key) {
                pending = Some(name.as_str());
            } else {
                debug!(token, "ignoring unknown flag");
            }
            continue;
        }

        let index = bound.args.len();
        if index >= schema.args.len() {
            return Err(BindError::ExcessPositional {
                token: token.to_string(),
                index,
            });
        }
        bound.args.push(token.to_string());
    }

    if let Some(option) = pending {
        debug!(option, "option at end of input has no value; leaving it unbound");
    }

    Ok(bound)
}

/// Strips the leading dash run, returning `None` for tokens without one.
fn strip_dashes(token: &str) -> Option<&str> {
    let stripped = token.trim_start_matches('-');
    (stripped.len() != token.len()).then_some(stripped)
}
