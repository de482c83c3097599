//! Help short-circuit, failure reporting and exit codes.

use argschema_core::{
    CliSchema, HELP_FLAG, ParseError, ParsedArgs, bind, format_failures, render_help, usage_line,
    validate_record, validate_schema,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Exit status for every failed run.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Program name used in the usage line when none is configured.
pub const DEFAULT_PROGRAM: &str = "command";

/// Header printed above the per-field failure lines.
pub const FAILURE_HEADER: &str = "error: invalid arguments";

/// Behaviour switches for a [`Runner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// `--help` / `-h` prints help instead of returning a result.
    pub help: bool,
    /// An empty argv prints help and exits 0.
    pub help_with_no_args: bool,
    /// Name shown in the usage line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            help: true,
            help_with_no_args: false,
            program: None,
        }
    }
}

/// What a run should do, decided without side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Parsed(ParsedArgs),
    Help(String),
    Failed { lines: Vec<String>, exit_code: i32 },
}

#[derive(Debug, Clone)]
pub struct Runner {
    schema: CliSchema,
    options: RunOptions,
}

impl Runner {
    pub fn new(schema: CliSchema) -> Self {
        Self::with_options(schema, RunOptions::default())
    }

    pub fn with_options(schema: CliSchema, options: RunOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &CliSchema {
        &self.schema
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Usage line followed by the rendered sections of the normalized schema.
    pub fn help_text(&self) -> String {
        let program = self.options.program.as_deref().unwrap_or(DEFAULT_PROGRAM);
        let schema = self.schema.normalized();
        format!("{}\n\n{}", usage_line(&schema, program), render_help(&schema))
    }

    /// Decides the outcome for `argv` (program name excluded).
    ///
    /// A bound `--help` wins over validation failures, so `cmd -h` works
    /// even when required options are missing.
    pub fn evaluate<S: AsRef<str>>(&self, argv: &[S]) -> RunOutcome {
        if self.options.help_with_no_args && argv.is_empty() {
            debug!("empty argv, printing help");
            return RunOutcome::Help(self.help_text());
        }

        let schema = self.schema.normalized();
        let errors = validate_schema(&schema);
        if !errors.is_empty() {
            return fatal(&ParseError::Schema(errors));
        }

        let record = match bind(&schema, argv) {
            Ok(record) => record,
            Err(err) => return fatal(&ParseError::from(err)),
        };

        if self.options.help && record.flag(HELP_FLAG) {
            debug!("help flag bound, printing help");
            return RunOutcome::Help(self.help_text());
        }

        match validate_record(&schema, &record) {
            Ok(parsed) => RunOutcome::Parsed(parsed),
            Err(failures) => {
                debug!(failures = failures.len(), "argument validation failed");
                let mut lines = vec![FAILURE_HEADER.to_string()];
                lines.extend(
                    format_failures(&failures)
                        .into_iter()
                        .map(|line| format!("  {line}")),
                );
                RunOutcome::Failed {
                    lines,
                    exit_code: FAILURE_EXIT_CODE,
                }
            }
        }
    }

    /// Like [`Runner::evaluate`], but prints help to stdout and exits 0, or
    /// prints failures to stderr and exits non-zero.
    pub fn run<S: AsRef<str>>(&self, argv: &[S]) -> ParsedArgs {
        match self.evaluate(argv) {
            RunOutcome::Parsed(parsed) => parsed,
            RunOutcome::Help(text) => {
                print!("{text}");
                std::process::exit(0);
            }
            RunOutcome::Failed { lines, exit_code } => {
                for line in lines {
                    eprintln!("{line}");
                }
                std::process::exit(exit_code);
            }
        }
    }
}

fn fatal(err: &ParseError) -> RunOutcome {
    RunOutcome::Failed {
        lines: vec![format!("error: {err}")],
        exit_code: FAILURE_EXIT_CODE,
    }
}
