//! Help text rendering.
//!
//! Renders a schema into three aligned sections (`OPTIONS:`, `FLAGS:`,
//! `ARGS:`). Everything shown about a field comes from [`FieldSchema`], so a
//! custom field schema renders the same way as [`ValueSchema`](crate::ValueSchema).

use crate::field::FieldSchema;
use crate::types::CliSchema;

/// Renders help text for `schema`.
///
/// Pass a [normalized](CliSchema::normalized) schema to include the
/// built-in `--help` flag.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema: CliSchema = CliSchema::new()
///     .option("age", ValueSchema::number().with_default(1).with_description("your age"))
///     .flag("shortable", FlagSchema::new().with_description("shortable example"))
///     .arg(ValueSchema::string().with_description("first name"))
///     .alias("s", "shortable");
///
/// let text = render_help(&schema);
/// assert!(text.contains("--age <number>"));
/// assert!(text.contains("your age [default: 1]"));
/// assert!(text.contains("--shortable, -s"));
/// assert!(text.contains("0 <string>"));
/// ```
pub fn render_help<F: FieldSchema>(schema: &CliSchema<F>) -> String {
    render_help_with_prefix(schema, "")
}

/// Same as [`render_help`], with every line prefixed by `prefix`.
pub fn render_help_with_prefix<F: FieldSchema>(schema: &CliSchema<F>, prefix: &str) -> String {
    let mut out = String::new();

    let options: Vec<(String, String)> = schema
        .options
        .iter()
        .map(|(name, field)| {
            let left = format!(
                "{} <{}>",
                display_names(schema, name),
                field.type_label()
            );
            (left, describe(field))
        })
        .collect();
    push_section(&mut out, prefix, "OPTIONS:", &options);

    let flags: Vec<(String, String)> = schema
        .flags
        .iter()
        .map(|(name, flag)| {
            let mut help = flag.description.clone().unwrap_or_default();
            if flag.default {
                annotate(&mut help, "[default: true]");
            }
            (display_names(schema, name), help)
        })
        .collect();
    push_section(&mut out, prefix, "FLAGS:", &flags);

    let args: Vec<(String, String)> = schema
        .args
        .iter()
        .enumerate()
        .map(|(index, field)| (format!("{index} <{}>", field.type_label()), describe(field)))
        .collect();
    push_section(&mut out, prefix, "ARGS:", &args);

    out
}

/// One-line usage summary, e.g. `Usage: greet [OPTIONS] <ARG0> <ARG1>`.
pub fn usage_line<F>(schema: &CliSchema<F>, program: &str) -> String {
    let mut out = format!("Usage: {program}");
    if !schema.options.is_empty() || !schema.flags.is_empty() {
        out.push_str(" [OPTIONS]");
    }
    for index in 0..schema.args.len() {
        out.push_str(&format!(" <ARG{index}>"));
    }
    out
}

fn display_names<F>(schema: &CliSchema<F>, name: &str) -> String {
    match schema.alias_for(name) {
        Some(alias) if alias.chars().count() == 1 => format!("--{name}, -{alias}"),
        Some(alias) => format!("--{name}, --{alias}"),
        None => format!("--{name}"),
    }
}

fn describe<F: FieldSchema>(field: &F) -> String {
    let mut help = field.description().trim().to_string();
    if let Some(default) = field.default_value() {
        annotate(&mut help, &format!("[default: {default}]"));
    } else if field.is_optional() {
        annotate(&mut help, "(optional)");
    }
    help
}

fn annotate(help: &mut String, note: &str) {
    if !help.is_empty() {
        help.push(' ');
    }
    help.push_str(note);
}

fn push_section(out: &mut String, prefix: &str, title: &str, rows: &[(String, String)]) {
    out.push_str(&format!("{prefix}{title}\n"));
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("{prefix}  {left}\n"));
        } else {
            out.push_str(&format!("{prefix}  {left:width$}  {help}\n"));
        }
    }
}
