use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};

use crate::{
  generator::{
    GeneratorConfig,
    orchestrator::{Orchestrator, ResourceSummary},
  },
  ui::{Colors, colors::Role, term_width},
  utils::spec::SpecLoader,
};

pub async fn list_resources(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;
  let resources = Orchestrator::new(spec, GeneratorConfig::default()).resources()?;

  println!("{}", resource_table(&resources, colors, term_width()));
  Ok(())
}

fn resource_table(resources: &[ResourceSummary], colors: &Colors, width: u16) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(width);

  let mut header = Row::new();
  for title in ["GROUP", "VERSION", "KIND", "CLIENT", "METHODS"] {
    header.add_cell(Cell::new(title).fg(colors.cell(Role::Label)));
  }
  table.set_header(header);

  for resource in resources {
    let group = if resource.group.is_empty() {
      "core"
    } else {
      resource.group.as_str()
    };

    let mut row = Row::new();
    row.add_cell(Cell::new(group).fg(colors.cell(Role::Info)));
    row.add_cell(Cell::new(&resource.version).fg(colors.cell(Role::Info)));
    row.add_cell(
      Cell::new(&resource.kind)
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&resource.client).fg(colors.cell(Role::Primary)));
    row.add_cell(Cell::new(resource.methods.join(", ")).fg(colors.cell(Role::Accent)));
    table.add_row(row);
  }

  table
}
