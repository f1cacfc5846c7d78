use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use serde_json::Value;

use crate::{
  generator::{
    error::TranslationError,
    metrics::GenerationStats,
    options::{BrandPolicy, DocumentKind, GeneratorOptions},
    orchestrator::Orchestrator,
  },
  ui::{Colors, Role, cli::GenerateCommand},
  utils::document::DocumentLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
  pub options: GeneratorOptions,
}

impl GenerateConfig {
  async fn load_document(&self) -> anyhow::Result<Value> {
    DocumentLoader::open(&self.input).await?.parse()
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      base_name,
      brands,
      brand_all,
      brand_schemas,
      real_enums,
      statuses,
      all_schemas,
      no_camelize_inputs,
      tuple_limit,
      export_namespaces,
      strict,
      require_clean_api,
      verbose,
      quiet,
    } = command;

    let brands = if !brands.is_empty() {
      BrandPolicy::Names(brands)
    } else if brand_all {
      BrandPolicy::All
    } else if brand_schemas {
      BrandPolicy::Schemas
    } else {
      BrandPolicy::None
    };

    let options = GeneratorOptions::builder()
      .maybe_base_name(base_name)
      .brands(brands)
      .generate_real_enums(real_enums)
      .filter_statuses(statuses)
      .generate_unused_schemas(all_schemas)
      .camelize_inputs(!no_camelize_inputs)
      .tuple_from_fixed_array_length(tuple_limit)
      .export_namespaces(export_namespaces)
      .strict(strict)
      .require_clean_api(require_clean_api)
      .build();

    Self {
      input,
      output,
      verbose,
      quiet,
      options,
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.paint(Role::Timestamp)));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.paint(Role::Label)),
        value.with(self.colors.paint(Role::Value))
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading document from: {}", self.config.input.display())
        .with(self.colors.paint(Role::Primary))
        .to_string(),
    );
  }

  fn log_generating(&self, kind: DocumentKind) {
    let message = match kind {
      DocumentKind::Api => "Generating TypeScript declarations for API document...",
      DocumentKind::Schema => "Generating TypeScript declarations for schema...",
    };
    self.info(&message.with(self.colors.paint(Role::Primary)).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Declarations generated:", stats.declarations_generated.to_string());
    if stats.enums_generated > 0 {
      self.stat("", format!("{} enums", stats.enums_generated));
    }
    self.stat("", format!("{} interface members", stats.interface_members_generated));
    self.stat("", format!("{} statements", stats.statements_generated));
    if stats.operations_converted > 0 {
      self.stat("Operations converted:", stats.operations_converted.to_string());
    }
    self.stat("References expanded:", stats.references_expanded.to_string());
    self.stat("Fixed-point passes:", stats.fixed_point_passes.to_string());
    if self.config.verbose {
      for (pass, expanded) in stats.expansions_per_pass.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Pass {}", pass + 1).with(self.colors.paint(Role::Accent)),
          format!("{expanded} references").with(self.colors.paint(Role::Value))
        );
      }
    }
    if stats.placeholders_remaining > 0 && self.config.verbose {
      self.stat("Placeholders:", stats.placeholders_remaining.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.paint(Role::Accent)),
        warning.to_string().with(self.colors.paint(Role::Primary))
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.paint(Role::Primary))
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.paint(Role::Timestamp)),
        "Successfully generated TypeScript declarations".with(self.colors.paint(Role::Success))
      );
    }
  }
}

fn translation_failure(error: TranslationError) -> anyhow::Error {
  anyhow::anyhow!("[{}] {error}", error.code())
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;

  let orchestrator = Orchestrator::new(document, config.options.clone());
  logger.log_generating(orchestrator.kind());

  let source_path = config.input.display().to_string();
  let (code, stats) = orchestrator
    .generate_with_header(&source_path)
    .map_err(translation_failure)?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(code).await?;

  logger.log_success();
  Ok(())
}
