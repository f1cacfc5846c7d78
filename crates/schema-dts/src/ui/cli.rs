use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "schema-dts")]
#[command(author, version, about = "JSON Schema and OpenAPI to TypeScript declaration generator")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate TypeScript declarations from a JSON Schema or OpenAPI document
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateCommand {
  /// Path to the JSON or YAML input document
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the generated declarations will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Root declaration name (bare schemas) or root namespace name (API documents)
  #[arg(long, value_name = "NAME")]
  pub base_name: Option<String>,

  /// Brand the named declaration (repeatable)
  #[arg(long = "brand", value_name = "NAME", conflicts_with_all = ["brand_all", "brand_schemas"])]
  pub brands: Vec<String>,

  /// Brand every named schema
  #[arg(long, default_value_t = false, conflicts_with = "brand_schemas")]
  pub brand_all: bool,

  /// Brand the schemas declared by the document
  #[arg(long, default_value_t = false)]
  pub brand_schemas: bool,

  /// Emit enum declarations for string enums with at least two members
  #[arg(long, default_value_t = false)]
  pub real_enums: bool,

  /// Keep only responses with this status code (repeatable)
  #[arg(long = "status", value_name = "CODE")]
  pub statuses: Vec<String>,

  /// Generate every declared schema, including unreferenced ones
  #[arg(long, default_value_t = false)]
  pub all_schemas: bool,

  /// Keep operation input member names as written in the document
  #[arg(long, default_value_t = false)]
  pub no_camelize_inputs: bool,

  /// Length below which fixed-size arrays become tuples
  #[arg(long, value_name = "N", default_value_t = 5)]
  pub tuple_limit: usize,

  /// Use `export namespace` instead of `declare namespace` at the top level
  #[arg(long, default_value_t = false)]
  pub export_namespaces: bool,

  /// Fail on unsupported schemas instead of falling back to `unknown`
  #[arg(long, default_value_t = false)]
  pub strict: bool,

  /// Fail on operations without an operationId instead of deriving one
  #[arg(long, default_value_t = false)]
  pub require_clean_api: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined under `paths` and `webhooks`
  Operations {
    /// Path to the JSON or YAML OpenAPI document
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_generate_flags() {
    let cli = Cli::parse_from([
      "schema-dts",
      "generate",
      "-i",
      "api.yaml",
      "-o",
      "api.d.ts",
      "--brand",
      "UserId",
      "--brand",
      "OrderId",
      "--status",
      "200",
      "--tuple-limit",
      "3",
      "--no-camelize-inputs",
    ]);

    let Commands::Generate(command) = cli.command else {
      panic!("expected generate command");
    };
    assert_eq!(command.input, PathBuf::from("api.yaml"));
    assert_eq!(command.brands, vec!["UserId", "OrderId"]);
    assert_eq!(command.statuses, vec!["200"]);
    assert_eq!(command.tuple_limit, 3);
    assert!(command.no_camelize_inputs);
    assert!(!command.strict);
  }

  #[test]
  fn test_brand_flags_conflict() {
    let result = Cli::try_parse_from([
      "schema-dts",
      "generate",
      "-i",
      "a.json",
      "-o",
      "a.d.ts",
      "--brand-all",
      "--brand-schemas",
    ]);
    assert!(result.is_err());
  }
}
