//! Terminal and JSON rendering of command results.

use comfy_table::{presets, CellAlignment, Table};
use serde::Serialize;

use crate::app::GlobalOptions;

/// The result of one subcommand.
pub trait Report: Serialize {
    /// Print the human-readable form to stdout.
    fn render(&self);
}

/// Print `report` as pretty JSON under `--json`, otherwise render it.
pub fn emit(report: &impl Report, opts: &GlobalOptions) -> anyhow::Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        report.render();
    }
    Ok(())
}

/// One line of a listing printed by [`print_rows`].
pub trait TableRow {
    /// Column headers, in cell order
    const HEADERS: &'static [&'static str];

    /// Indices of columns holding masks, printed right-aligned
    const MASK_COLUMNS: &'static [usize] = &[];

    /// Cell texts, in header order
    fn cells(&self) -> Vec<String>;
}

/// Print `title` followed by `rows` as an indented table.
pub fn print_rows<R: TableRow>(title: &str, rows: &[R]) {
    println!("{title}");
    for line in table_lines(rows) {
        println!("{line}");
    }
}

/// Lines of the table for `rows`, each indented by two spaces.
fn table_lines<R: TableRow>(rows: &[R]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  none".to_string()];
    }

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(R::HEADERS.to_vec());
    for row in rows {
        table.add_row(row.cells());
    }
    for (index, column) in table.column_iter_mut().enumerate() {
        if R::MASK_COLUMNS.contains(&index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        column.set_padding((0, 2));
    }

    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| format!("  {line}"))
        .collect()
}
