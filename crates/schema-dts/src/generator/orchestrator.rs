//! Orchestration of the schema to TypeScript declaration pipeline.
//!
//! The [`Orchestrator`] detects the document kind, walks or translates the document,
//! runs the fixed-point expansion, assembles the namespace tree and prints it.
//!
//! ## Usage
//!
//! ```no_run
//! # fn example(document: serde_json::Value) -> anyhow::Result<()> {
//! let orchestrator = Orchestrator::new(document, GeneratorOptions::default());
//! let (code, stats) = orchestrator.generate_with_header("petstore.json")?;
//!
//! println!("Generated {} declarations", stats.declarations_generated);
//! std::fs::write("petstore.d.ts", code)?;
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::{
  generator::{
    converter::{TranslationContext, root_schema_to_fragments},
    error::TranslationResult,
    fragments::FragmentSet,
    metrics::GenerationStats,
    names::RefNameResolver,
    namespace_tree::NamespaceNode,
    options::{DocumentKind, GeneratorOptions},
    printer::TypeScriptPrinter,
    walker::{
      DocumentWalker, OperationEntry, declared_schema_names, list_operations, normalize_document,
      seed_declared_schemas,
    },
  },
  naming::identifiers::build_identifier,
  utils::SchemaExt,
};

pub struct Orchestrator {
  document: Value,
  options: GeneratorOptions,
  kind: DocumentKind,
}

/// Descriptive fields of the input document, used for the generated file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
  pub kind: DocumentKind,
  pub title: Option<String>,
  pub version: Option<String>,
  pub description: Option<String>,
}

impl Orchestrator {
  pub fn new(document: Value, options: GeneratorOptions) -> Self {
    let kind = DocumentKind::detect(&document);
    Self {
      document,
      options,
      kind,
    }
  }

  pub fn kind(&self) -> DocumentKind {
    self.kind
  }

  /// API documents describe themselves under `info`; bare schemas carry `title` and
  /// `description` at the root.
  pub fn metadata(&self) -> DocumentMetadata {
    let source = match self.kind {
      DocumentKind::Api => self.document.keyword("info").unwrap_or(&Value::Null),
      DocumentKind::Schema => &self.document,
    };
    let text = |name: &str| source.keyword(name).and_then(Value::as_str).map(ToString::to_string);

    DocumentMetadata {
      kind: self.kind,
      title: text("title"),
      version: text("version"),
      description: text("description"),
    }
  }

  pub fn operations(&self) -> Vec<OperationEntry> {
    list_operations(&self.document)
  }

  /// Every fragment of the document, after the fixed point is reached.
  pub(crate) fn fragments(&self) -> TranslationResult<(FragmentSet, GenerationStats)> {
    let base_name = build_identifier(&self.options.base_name_for(self.kind));
    let document = match self.kind {
      DocumentKind::Api => normalize_document(self.document.clone()),
      DocumentKind::Schema => self.document.clone(),
    };

    let names = RefNameResolver::new(base_name.as_str());
    let schema_names = declared_schema_names(&document, self.kind);
    let ctx = TranslationContext::new(&document, &self.options, &names, &schema_names);
    let walker = DocumentWalker::new(ctx.clone(), &base_name);

    let initial = match self.kind {
      DocumentKind::Api => walker.document_to_fragments()?,
      DocumentKind::Schema => {
        let mut set = root_schema_to_fragments(&ctx, &base_name)?;
        if self.options.generate_unused_schemas {
          set.extend(seed_declared_schemas(&document, DocumentKind::Schema));
        }
        set
      }
    };

    let mut stats = GenerationStats::default();
    let set = walker.expand_fixed_point(initial, &mut stats)?;

    stats.record_fragments(&set.fragments);
    stats.record_operations(set.operations.len());
    stats.record_warnings(set.warnings.iter().cloned());
    Ok((set, stats))
  }

  pub(crate) fn namespace_tree(&self) -> TranslationResult<(NamespaceNode, GenerationStats)> {
    let (set, stats) = self.fragments()?;
    Ok((NamespaceNode::build(&set.fragments), stats))
  }

  /// Generates the declarations without a file header.
  ///
  /// # Errors
  ///
  /// Returns the first [`TranslationError`](crate::generator::error::TranslationError)
  /// met; nothing is generated in that case.
  pub fn generate(&self) -> TranslationResult<(String, GenerationStats)> {
    let (tree, stats) = self.namespace_tree()?;
    let code = TypeScriptPrinter::new(self.options.export_namespaces).print(&tree);
    Ok((code, stats))
  }

  /// Generates the declarations behind an auto-generated banner naming the source.
  ///
  /// # Errors
  ///
  /// Returns the same errors as [`Orchestrator::generate`].
  pub fn generate_with_header(&self, source_path: &str) -> TranslationResult<(String, GenerationStats)> {
    let (code, stats) = self.generate()?;
    let metadata = self.metadata();

    let mut header = vec![
      "// AUTO-GENERATED CODE - DO NOT EDIT!".to_string(),
      "//".to_string(),
    ];
    if let Some(title) = &metadata.title {
      header.push(format!("// {title}"));
    }
    header.push(format!("// Source: {source_path}"));
    if let Some(version) = &metadata.version {
      header.push(format!("// Version: {version}"));
    }
    header.push("// Generated by `schema-dts`".to_string());
    if let Some(description) = &metadata.description {
      header.push("//".to_string());
      header.extend(description.lines().map(|line| format!("// {line}").trim_end().to_string()));
    }

    Ok((format!("{}\n\n{code}", header.join("\n")), stats))
  }
}
