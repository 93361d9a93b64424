//! Plain-text rendering of a navigation view

use std::fmt::Write;

use orgdrill::{HierarchyRow, NavView};

/// Render the breadcrumb, the selectable children, and the exact-match table.
///
/// Ancestors are numbered `a1..` from the root, children `1..`.
pub fn render_view(view: &NavView<'_>, headers: &[String]) -> String {
    let mut out = String::new();

    if view.ancestors.is_empty() {
        out.push_str("Path: (top level)\n");
    } else {
        let labels: Vec<&str> = view.ancestors.iter().map(|b| b.label.as_str()).collect();
        let _ = writeln!(out, "Path: {}", labels.join(" > "));
        for (i, button) in view.ancestors.iter().enumerate() {
            let _ = writeln!(out, "  a{}  {}", i + 1, button.label);
        }
    }

    if view.children.is_empty() {
        out.push_str("No deeper levels\n");
    } else {
        out.push_str(if view.ancestors.is_empty() {
            "Roots:\n"
        } else {
            "Children:\n"
        });
        for (i, button) in view.children.iter().enumerate() {
            let _ = writeln!(out, "  {}  {}", i + 1, button.label);
        }
    }

    if let Some(current) = &view.current {
        let _ = writeln!(out, "\nData for {} (exact level only):", current);
        out.push_str(&render_rows(headers, &view.exact_rows));
    }

    out
}

/// Render rows as an aligned table with a header line
pub fn render_rows(headers: &[String], rows: &[&HierarchyRow]) -> String {
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.cells().iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell, width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
