use colored::*;
use fair_draw::draw::Severity;
use fair_draw::model::Table;

pub fn print_status(severity: Severity, message: &str) {
    let line = match severity {
        Severity::Success => format!("✅ {}", message).bright_green(),
        Severity::Warning => format!("⚠️  {}", message).bright_yellow(),
        Severity::Error => format!("❌ {}", message).bright_red(),
    };
    println!("{}", line);
}

/// Print a table with left-aligned columns.
pub fn print_table(table: &Table) {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    println!("     {}", format_row(&table.headers).bright_white().bold());
    println!("     {}", "-".repeat(rule_width));
    for (i, row) in table.rows.iter().enumerate() {
        println!("{}  {}", format!("{:>3}", i + 1).dimmed(), format_row(row));
    }
}
