//! Text rendering of result sets for the shell

use minisql::{
    ResultSet,
    sql::{
        schema::Table,
        types::{Row, Value},
    },
};

/// Renders a statement result: `OK` for statements without rows
pub fn render(result: &ResultSet) -> String {
    match result {
        ResultSet::Scan { columns, rows } => format_rows(columns, rows),
        _ => "OK".to_string(),
    }
}

fn cell(value: &Value) -> String {
    if value.is_null() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Formats rows as an aligned text table with a row-count footer
pub fn format_rows(columns: &[String], rows: &[Row]) -> String {
    if rows.is_empty() {
        return "(0 rows)".to_string();
    }

    let mut widths = columns
        .iter()
        .map(|c| c.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell(value).chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(
        columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{:<w$}", cell(v), w = w))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    lines.push(format!("({} rows)", rows.len()));
    lines.join("\n")
}

/// One-line schema summary, e.g. `users (id INT, name TEXT)`
pub fn describe_table(table: &Table) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.column_type))
        .collect::<Vec<_>>();
    format!("{} ({})", table.name, columns.join(", "))
}
