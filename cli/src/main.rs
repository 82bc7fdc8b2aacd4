use std::io::IsTerminal;
use std::path::PathBuf;

use capella_schema_core::{Element, ModelQuery};
use capella_schema_export::diagnostics::TracingSink;
use capella_schema_export::export_package;
use capella_schema_export::output::{Indent, OutputTarget, render_json, write_output};
use capella_schema_model::Model;
use clap::Parser;
use tracing::{Level, debug};

#[derive(Debug, Parser)]
#[command(name = "capella2json")]
#[command(about = "Export a Capella data package as a JSON schema document")]
#[command(version)]
struct Cli {
    /// Path to the model document (.json, .yaml or .yml).
    #[arg(short, long)]
    model: PathBuf,
    /// ID or name of the DataPkg to export.
    #[arg(short, long = "package", value_name = "ID_OR_NAME")]
    package: Option<String>,
    /// List all data packages found in the model.
    #[arg(short, long)]
    list: bool,
    /// Output file, or `-` for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,
    /// Pretty-print the JSON output, indenting by INT spaces per level (-1 for a single line).
    #[arg(
        long,
        value_name = "INT",
        default_value_t = 2,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(-1..)
    )]
    indent: i64,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let model = Model::load(&cli.model)
        .map_err(|err| format!("Failed to load model '{}': {err}", cli.model.display()))?;

    if cli.list {
        print!("{}", render_package_list(&model));
        return Ok(());
    }

    let Some(reference) = cli.package.as_deref() else {
        return Err("--package is required (use --list to find a package)".to_string());
    };

    let mut sink = TracingSink::default();
    let package = export_package(&model, reference, &mut sink).map_err(|e| e.to_string())?;
    let raw =
        render_json(&package, Indent::from_width(cli.indent)).map_err(|e| e.to_string())?;

    let target = OutputTarget::from_arg(&cli.output);
    write_output(&target, &raw).map_err(|err| format!("Failed to write output: {err}"))?;

    debug!(
        package = %package.name,
        warnings = sink.emitted(),
        "export finished"
    );
    Ok(())
}

fn render_package_list(model: &dyn ModelQuery) -> String {
    let mut out = String::from("The following data packages were found in the model:\n");
    for package in model.data_packages() {
        out.push_str(&format!("  {}\n", package.short_repr()));
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_indent_accepts_minus_one() {
        let cli = Cli::try_parse_from(["capella2json", "-m", "m.yaml", "--indent", "-1"]).unwrap();
        assert_eq!(Indent::from_width(cli.indent), Indent::Compact);
    }

    #[test]
    fn test_indent_rejects_below_minus_one() {
        let result = Cli::try_parse_from(["capella2json", "-m", "m.yaml", "--indent", "-2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["capella2json", "--model", "m.yaml"]).unwrap();

        assert_eq!(cli.indent, 2);
        assert_eq!(cli.output, "-");
        assert!(cli.package.is_none());
        assert!(!cli.list);
    }

    #[test]
    fn test_render_package_list() {
        let model = Model::from_yaml_str(
            r#"
name: M
uuid: m-0
packages:
  - uuid: pkg-1
    name: Data
    packages:
      - {uuid: pkg-2, name: Nested}
"#,
        )
        .unwrap();

        assert_eq!(
            render_package_list(&model),
            "The following data packages were found in the model:\n  \
             <DataPkg \"Data\" (pkg-1)>\n  <DataPkg \"Nested\" (pkg-2)>\n"
        );
    }
}
