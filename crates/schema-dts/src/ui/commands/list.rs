use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{options::GeneratorOptions, orchestrator::Orchestrator, walker::OperationEntry},
  ui::{Colors, Role, term_width},
  utils::document::DocumentLoader,
};

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = DocumentLoader::open(input).await?.parse()?;
  let mut operations = Orchestrator::new(document, GeneratorOptions::default()).operations();
  operations.sort_by(|a, b| a.operation_id.cmp(&b.operation_id));

  println!("{}", operations_table(&operations, colors));

  Ok(())
}

fn operations_table(operations: &[OperationEntry], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("OPERATION ID").fg(colors.cell(Role::Label)));
  row.add_cell(Cell::new("METHOD").fg(colors.cell(Role::Label)));
  row.add_cell(Cell::new("PATH").fg(colors.cell(Role::Label)));
  table.set_header(row);

  for operation in operations {
    let mut id = Cell::new(&operation.operation_id).fg(colors.cell(Role::Value));
    // Derived ids are shown without emphasis.
    if !operation.synthesized {
      id = id.add_attribute(Attribute::Bold);
    }

    let mut row = Row::new();
    row.add_cell(id);
    row.add_cell(
      Cell::new(&operation.method)
        .fg(colors.cell(Role::Accent))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(colors.cell(Role::Primary)));
    table.add_row(row);
  }

  table
}
