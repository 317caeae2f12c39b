use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ctm_cli::types::{MatchRunResult, PatientSummary};

pub fn print_summary(result: &MatchRunResult) {
    println!("Data: {}", result.data_dir.display());
    if let Some(path) = &result.reports.csv {
        println!("CSV report: {}", path.display());
    }
    if let Some(path) = &result.reports.json {
        println!("JSON report: {}", path.display());
    }
    if result.reports.csv.is_none() && result.reports.json.is_none() {
        println!("Reports: not written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Age"),
        header_cell("Sex"),
        header_cell("Conditions"),
        header_cell("Matches"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_conditions = 0usize;
    for summary in &result.patients {
        total_conditions += summary.condition_count;
        table.add_row(vec![
            Cell::new(summary.patient_id.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.age),
            sex_cell(&summary.sex),
            Cell::new(summary.condition_count),
            count_cell(summary.match_count, Color::Green),
            status_cell(summary),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_conditions).add_attribute(Attribute::Bold),
        count_cell(Some(result.total_matches()), Color::Green).add_attribute(Attribute::Bold),
        failed_total_cell(result.failures.len()),
    ]);
    println!("{table}");

    if !result.failures.is_empty() {
        eprintln!("Failed patients:");
        for failure in &result.failures {
            eprintln!("- {}: {}", failure.patient_id, failure.message);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn sex_cell(sex: &str) -> Cell {
    if sex.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(sex)
    }
}

fn status_cell(summary: &PatientSummary) -> Cell {
    match summary.match_count {
        Some(_) => Cell::new("ok").fg(Color::Green),
        None => Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn failed_total_cell(failed: usize) -> Cell {
    if failed == 0 {
        dim_cell("all ok")
    } else {
        Cell::new(format!("{failed} failed"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
