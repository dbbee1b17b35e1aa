use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dpp_map::MappingSummary;
use dpp_validate::{Issue, Severity};

use dpp_cli::types::{GenerateResult, MapResult, ValidateResult};

pub fn print_map_summary(result: &MapResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Header"),
        header_cell("Path"),
        header_cell("Score"),
        header_cell("Tier"),
        header_cell("Column Type"),
    ]);
    apply_mapping_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for column in &result.columns {
        if column.path.is_empty() {
            table.add_row(vec![
                Cell::new(&column.header),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(column.column_type.to_string()),
            ]);
            continue;
        }
        let score_cell = if column.score.is_match() {
            Cell::new(format!("{:.2}", column.score.score))
        } else {
            dim_cell("-")
        };
        let tier_cell = match column.score.tier {
            Some(tier) => Cell::new(tier.label()).fg(Color::Green),
            None => Cell::new("manual").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&column.header),
            Cell::new(&column.path)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            score_cell,
            tier_cell,
            Cell::new(column.column_type.to_string()),
        ]);
    }
    println!("{table}");
    print_mapping_counts(&result.summary);
    if let Some(path) = &result.output {
        println!("Mapping: {}", path.display());
    }
}

pub fn print_validate_summary(result: &ValidateResult) {
    print_mapping_counts(&result.summary);
    print_issue_table(&result.issues);
    if result.issues.is_empty() {
        println!("No issues found.");
    }
}

pub fn print_generate_summary(result: &GenerateResult) {
    print_issue_table(&result.issues);
    if result.blocked {
        eprintln!("Records were not generated because validation found errors.");
        return;
    }
    if let Some(path) = &result.output {
        println!("Records: {} written to {}", result.records.len(), path.display());
    }
}

fn print_mapping_counts(summary: &MappingSummary) {
    println!(
        "Mapped {} of {} headers ({} unmapped); required fields mapped: {} of {}",
        summary.mapped,
        summary.total_headers,
        summary.unmapped,
        summary.required_mapped,
        summary.required_total
    );
}

fn print_issue_table(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    // Errors first; check order is kept within a severity.
    ordered.sort_by_key(|issue| issue.severity());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Path"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity()),
            Cell::new(issue.path()),
            issue.header().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(issue.message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn apply_mapping_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
