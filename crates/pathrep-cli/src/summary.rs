use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pathrep_cli::run::RunResult;
use pathrep_model::{CategoryCountRow, TestCountRow};

pub fn print_summary(result: &RunResult) {
    if !result.written.is_empty() {
        println!("Output: {}", result.output_dir.display());
    }
    if result.tables.dropped > 0 {
        println!("Dropped rows (missing fields): {}", result.tables.dropped);
    }
    println!();
    println!("Test Name Counts:");
    println!("{}", test_counts_table(&result.tables.test_counts));
    println!();
    println!("Category Counts:");
    println!("{}", category_counts_table(&result.tables.category_counts));
}

fn test_counts_table(rows: &[TestCountRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Test Name"),
        header_cell("IPD"),
        header_cell("OPD"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        if row.is_grand_total() {
            table.add_row(vec![
                total_cell(&row.test_name),
                total_cell(row.inpatient),
                total_cell(row.outpatient),
                total_cell(row.total),
            ]);
        } else {
            table.add_row(vec![
                Cell::new(&row.test_name),
                Cell::new(row.inpatient),
                Cell::new(row.outpatient),
                Cell::new(row.total),
            ]);
        }
    }
    table
}

fn category_counts_table(rows: &[CategoryCountRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        if row.is_grand_total() {
            table.add_row(vec![total_cell(&row.category), total_cell(row.count)]);
        } else {
            table.add_row(vec![Cell::new(&row.category), Cell::new(row.count)]);
        }
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn total_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value)
        .fg(Color::Yellow)
        .add_attribute(Attribute::Bold)
}
