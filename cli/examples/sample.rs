//! cargo run -p argschema-cli --example sample -- --name mizchi --env a --age 34 --dry xxx 1

use argschema_cli::Runner;
use argschema_core::{CliSchema, FlagSchema, ValueSchema};

fn main() {
    let schema = CliSchema::new()
        .option("name", ValueSchema::string().with_description("input your name"))
        .option("env", ValueSchema::choice(["a", "b"]).with_description("env"))
        .option("age", ValueSchema::number().with_default(1).with_description("xxx"))
        .flag("dry", FlagSchema::new())
        .flag("shortable", FlagSchema::new().with_description("shortable example"))
        .arg(ValueSchema::string().with_description("input your first name"))
        .arg(ValueSchema::pattern(r"^\d+$"))
        .alias("s", "shortable");

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = Runner::new(schema).run(argv.as_slice());

    let name = parsed.option("name").and_then(|v| v.as_str()).unwrap_or_default();
    let age = parsed.option("age").and_then(|v| v.as_f64()).unwrap_or_default();
    let count: u64 = parsed
        .arg(1)
        .and_then(|v| v.as_str())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    println!("Parsed Input {parsed:#?}");
    println!("{name} is {age}, dry run: {}, count: {count}", parsed.flag("dry"));
}
