//! Output formatting for parsed arguments.

use argschema_core::ParsedArgs;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a parse result in the requested output format.
pub fn format_parsed(parsed: &ParsedArgs, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(parsed)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(parsed).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(parsed_to_table(parsed)),
    }
}

fn parsed_to_table(parsed: &ParsedArgs) -> String {
    let mut rows: Vec<(String, String)> = Vec::new();
    for (name, value) in &parsed.options {
        rows.push((format!("--{name}"), value.to_string()));
    }
    for (name, set) in &parsed.flags {
        rows.push((format!("--{name}"), set.to_string()));
    }
    for (index, value) in parsed.args.iter().enumerate() {
        rows.push((format!("args[{index}]"), value.to_string()));
    }

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(4);
    let mut out = String::new();
    for (name, value) in rows {
        out.push_str(&format!("{name:width$}  {value}\n"));
    }
    out
}
