//! Schema files for the `argschema` binary.

use std::fs;
use std::path::Path;

use argschema_core::CliSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runner::RunOptions;

/// On-disk form: the schema plus optional run options.
///
/// ```yaml
/// schema:
///   options:
///     name: { type: string }
///   args:
///     - type: string
/// run:
///   help_with_no_args: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    pub schema: CliSchema,
    #[serde(default)]
    pub run: RunOptions,
}

/// Loads a schema file, picking the decoder from the extension.
///
/// `.yaml` and `.yml` are read as YAML, everything else as JSON.
pub fn load_schema_file(path: &Path) -> Result<SchemaFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {e}", path.display()))?;

    let file: SchemaFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&raw)
            .map_err(|e| format!("failed to parse YAML '{}': {e}", path.display()))?,
        _ => serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse JSON '{}': {e}", path.display()))?,
    };

    debug!(
        path = %path.display(),
        options = file.schema.options.len(),
        flags = file.schema.flags.len(),
        args = file.schema.args.len(),
        "loaded schema file"
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argschema_core::ValueType;
    use std::path::PathBuf;

    /// Temp directory removed on drop, even when an assertion fails.
    struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("argschema_schema_file_{name}_{}", std::process::id()));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).expect("failed to create temp dir");
            Self { path }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.path.join(name);
            fs::write(&path, contents).expect("failed to write temp file");
            path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn test_load_json_without_run_section() {
        let dir = TempDir::new("plain");
        let path = dir.write(
            "plain.json",
            r#"{"schema": {"options": {"name": {"type": "string"}}, "args": [{"type": "number"}]}}"#,
        );
        let file = load_schema_file(&path).unwrap();

        assert!(file.schema.is_option("name"));
        assert_eq!(file.schema.args[0].value_type, ValueType::Number);
        assert_eq!(file.run, RunOptions::default());
    }

    #[test]
    fn test_load_yaml_with_run_section() {
        let dir = TempDir::new("run");
        let path = dir.write(
            "run.yml",
            "schema:\n  flags:\n    dry: {}\nrun:\n  help_with_no_args: true\n  program: greet\n",
        );
        let file = load_schema_file(&path).unwrap();

        assert!(file.schema.is_flag("dry"));
        assert!(file.run.help);
        assert!(file.run.help_with_no_args);
        assert_eq!(file.run.program.as_deref(), Some("greet"));
    }

    #[test]
    fn test_load_reports_errors() {
        let dir = TempDir::new("errors");
        let err = load_schema_file(&dir.path.join("missing.json")).unwrap_err();
        assert!(err.starts_with("failed to read"));

        let path = dir.write("broken.json", "{ not json");
        let err = load_schema_file(&path).unwrap_err();
        assert!(err.starts_with("failed to parse JSON"));
    }

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let dir = TempDir::new("cleanup");
        let path = dir.write("schema.json", "{}");
        let root = dir.path.clone();
        assert!(path.exists());

        drop(dir);
        assert!(!root.exists());
    }
}
