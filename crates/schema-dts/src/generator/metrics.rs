use strum::Display;

use crate::generator::fragments::{DeclarationPayload, Fragment};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub declarations_generated: usize,
  pub enums_generated: usize,
  pub statements_generated: usize,
  pub interface_members_generated: usize,
  pub operations_converted: usize,
  pub fixed_point_passes: usize,
  pub references_expanded: usize,
  /// References expanded by each fixed-point pass, in pass order.
  pub expansions_per_pass: Vec<usize>,
  pub placeholders_remaining: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_fragment(&mut self, fragment: &Fragment) {
    match fragment {
      Fragment::Statement(_) => self.statements_generated += 1,
      Fragment::DeclarationMember(member) => {
        self.declarations_generated += 1;
        if matches!(member.payload, DeclarationPayload::Enum(_)) {
          self.enums_generated += 1;
        }
      }
      Fragment::InterfaceMember(_) => self.interface_members_generated += 1,
      Fragment::Assumed(_) => self.placeholders_remaining += 1,
    }
  }

  pub fn record_fragments(&mut self, fragments: &[Fragment]) {
    for fragment in fragments {
      self.record_fragment(fragment);
    }
  }

  pub fn record_operations(&mut self, count: usize) {
    self.operations_converted += count;
  }

  pub fn record_pass(&mut self, expanded: usize) {
    self.fixed_point_passes += 1;
    self.references_expanded += expanded;
    self.expansions_per_pass.push(expanded);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Unsupported schema at '{reference}' was translated to unknown")]
  SchemaDegraded { reference: String },
  #[strum(to_string = "Unsupported enum at '{reference}' was translated to unknown")]
  EnumDegraded { reference: String },
  #[strum(to_string = "Operation '{method} {path}' has no operationId, using '{operation_id}'")]
  OperationIdSynthesized {
    method: String,
    path: String,
    operation_id: String,
  },
  #[strum(to_string = "[{operation_id}] response '{status}' skipped by the status filter")]
  ResponseFiltered { operation_id: String, status: String },
}

impl GenerationWarning {
  /// Warnings that change the shape of the output rather than only its precision.
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::ResponseFiltered { .. })
  }
}
