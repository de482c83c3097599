use std::path::PathBuf;

use argschema_cli::{OutputFormat, Runner, format_parsed, load_schema_file};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(version)]
#[command(about = "Parse an argument list against a declarative schema file")]
struct Cli {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Output format for the parsed result.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
    /// Print help when no arguments follow `--`.
    #[arg(long)]
    help_with_no_args: bool,
    /// Program name shown in the usage line (default: schema file stem).
    #[arg(long)]
    program: Option<String>,
    /// Arguments to parse, given after `--`.
    #[arg(last = true)]
    argv: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let file = load_schema_file(&cli.schema)?;

    let mut options = file.run;
    options.help_with_no_args |= cli.help_with_no_args;
    options.program = cli.program.or(options.program).or_else(|| {
        cli.schema
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    });
    debug!(?options, argv = cli.argv.len(), "running schema");

    let runner = Runner::with_options(file.schema, options);
    let parsed = runner.run(cli.argv.as_slice());

    let output = format_parsed(&parsed, cli.format)?;
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
