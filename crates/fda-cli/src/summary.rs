use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use fda_core::PipelineError;
use fda_model::SourceTable;

use crate::types::RunReport;

pub fn print_summary(report: &RunReport) {
    let summary = &report.summary;
    println!("Dataset: {}", summary.dataset);
    println!("Source: {}", report.source);
    match &report.output_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: none ({} destination)", report.destination),
    }
    println!(
        "Contracts: {}, {} ({} mode, evaluated {})",
        summary.silver_contract,
        summary.gold_contract,
        summary.validation_mode.as_str(),
        summary.evaluation_date
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Layer"), header_cell("Table"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, rows) in &summary.counts.bronze {
        table.add_row(vec![dim_cell("bronze"), Cell::new(name), Cell::new(rows)]);
    }
    table.add_row(vec![
        Cell::new("silver"),
        Cell::new("silver_products"),
        Cell::new(summary.counts.silver).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("gold"),
        Cell::new("gold_products"),
        Cell::new(summary.counts.gold).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("quarantine"),
        count_cell(summary.counts.quarantined, Color::Red),
    ]);
    println!("{table}");

    let anomalies = &summary.anomalies;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Anomaly"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("historic approval dates", anomalies.historic_dates),
        ("unresolved approval dates", anomalies.unresolved_approval_dates),
        ("unparseable dates", anomalies.unparseable_dates),
        ("unknown application types", anomalies.unknown_application_types),
        ("duplicate product keys", anomalies.duplicate_product_keys),
        ("withdrawn silver records", anomalies.withdrawn_silver_records),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, Color::Yellow)]);
    }
    for auxiliary in SourceTable::ALL.into_iter().filter(|table| table.is_auxiliary()) {
        table.add_row(vec![
            Cell::new(format!("join gaps: {auxiliary}")),
            count_cell(anomalies.join_gap_count(auxiliary), Color::Yellow),
        ]);
    }
    println!("{table}");
}

/// Failed-run report: error kind, table and natural key when known.
pub fn print_failure(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(pipeline) = error.downcast_ref::<PipelineError>() {
        eprintln!("  kind: {}", pipeline.kind());
        if let Some(table) = pipeline.table() {
            eprintln!("  table: {table}");
        }
        if let Some(key) = pipeline.natural_key() {
            eprintln!("  natural key: {key}");
        }
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
