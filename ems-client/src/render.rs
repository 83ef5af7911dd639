//! Text rendering of the employee list.
//!
//! Rendering is a pure projection: it takes the rows the view-model decided
//! to show and never reads any other state.

use std::fmt::Write as _;
use std::str::FromStr;

use shared::Employee;

use crate::error::ClientError;

/// Text shown when there is nothing to list
pub const EMPTY_STATE: &str = "No employees found";

/// What the list area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<'a> {
    /// Empty state (no rows, no match, or loading failed)
    Empty,
    /// Rows in display order
    Rows(Vec<&'a Employee>),
}

impl<'a> ListView<'a> {
    pub fn from_rows(rows: Vec<&'a Employee>) -> Self {
        if rows.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[&'a Employee] {
        match self {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }
}

/// Card or table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    #[default]
    Cards,
    Table,
}

impl FromStr for RenderStyle {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cards" | "card" => Ok(RenderStyle::Cards),
            "table" => Ok(RenderStyle::Table),
            other => Err(ClientError::Config(format!("unknown render style: {other}"))),
        }
    }
}

/// One card line: `First Last — email`
pub fn card_line(employee: &Employee) -> String {
    format!("{} — {}", employee.full_name(), employee.email)
}

/// Delete confirmation details: `First Last (email)`
pub fn delete_details(employee: &Employee) -> String {
    format!("{} ({})", employee.full_name(), employee.email)
}

/// Render the list in the given style. Output ends with a newline.
pub fn render(view: &ListView<'_>, style: RenderStyle) -> String {
    let rows = match view {
        ListView::Empty => return format!("{EMPTY_STATE}\n"),
        ListView::Rows(rows) => rows,
    };
    match style {
        RenderStyle::Cards => render_cards(rows),
        RenderStyle::Table => render_table(rows),
    }
}

fn render_cards(rows: &[&Employee]) -> String {
    let mut out = String::new();
    for employee in rows {
        out.push_str(&card_line(employee));
        out.push('\n');
    }
    out
}

fn render_table(rows: &[&Employee]) -> String {
    const HEADERS: [&str; 4] = ["ID", "First Name", "Last Name", "Email"];

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.first_name.clone(),
                e.last_name.clone(),
                e.email.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", table_row(&HEADERS, &widths));
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    let _ = writeln!(out, "{separator}");
    for row in &cells {
        let row = [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()];
        let _ = writeln!(out, "{}", table_row(&row, &widths));
    }
    out
}

fn table_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}
