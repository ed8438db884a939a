//! Tibble-style text rendering
//!
//! ```text
//! # A tibble: 3 x 3
//!     key val_x val_y
//!   <int> <chr> <chr>
//! 1     1 x1    y1
//! 2     2 x2    y2
//! 3     2 x3    y2
//! ```
//!
//! Numeric columns are right-aligned, everything else left-aligned.
//! Tables longer than the row limit show only the first rows and a footer.

use std::fmt;

use super::table::Table;

/// Row limit used by `Display for Table`
pub const DEFAULT_PRINT_ROWS: usize = 10;

/// Renders a table with a row limit
pub struct TableDisplay<'a> {
    table: &'a Table,
    max_rows: usize,
}

impl Table {
    /// Returns a renderer showing at most `max_rows` rows
    pub fn display(&self, max_rows: usize) -> TableDisplay<'_> {
        TableDisplay {
            table: self,
            max_rows,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(DEFAULT_PRINT_ROWS).fmt(f)
    }
}

struct RenderedColumn {
    header: String,
    type_label: String,
    cells: Vec<String>,
    width: usize,
    right_align: bool,
}

impl TableDisplay<'_> {
    fn render_columns(&self, shown: usize) -> Vec<RenderedColumn> {
        self.table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let ty = self.table.column_type(idx);
                let type_label = format!("<{}>", ty.abbreviation());
                let cells: Vec<String> = self.table.rows()[..shown]
                    .iter()
                    .map(|r| r[idx].to_string())
                    .collect();

                let width = cells
                    .iter()
                    .map(|c| c.chars().count())
                    .chain([name.chars().count(), type_label.chars().count()])
                    .max()
                    .unwrap_or(0);

                RenderedColumn {
                    header: name.clone(),
                    type_label,
                    cells,
                    width,
                    right_align: ty.is_numeric(),
                }
            })
            .collect()
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let len = text.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, gutter: &str, cells: &[String]) -> fmt::Result {
    let mut line = String::from(gutter);
    for cell in cells {
        line.push(' ');
        line.push_str(cell);
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for TableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.table.num_rows();
        let shown = total.min(self.max_rows);

        writeln!(
            f,
            "# A tibble: {} x {}",
            total,
            self.table.num_columns()
        )?;

        if self.table.num_columns() == 0 {
            return Ok(());
        }

        let columns = self.render_columns(shown);
        let gutter_width = shown.to_string().len();
        let blank_gutter = " ".repeat(gutter_width);

        let headers: Vec<String> = columns
            .iter()
            .map(|c| pad(&c.header, c.width, c.right_align))
            .collect();
        write_line(f, &blank_gutter, &headers)?;

        let types: Vec<String> = columns
            .iter()
            .map(|c| pad(&c.type_label, c.width, c.right_align))
            .collect();
        write_line(f, &blank_gutter, &types)?;

        for row in 0..shown {
            let gutter = pad(&(row + 1).to_string(), gutter_width, true);
            let cells: Vec<String> = columns
                .iter()
                .map(|c| pad(&c.cells[row], c.width, c.right_align))
                .collect();
            write_line(f, &gutter, &cells)?;
        }

        if total > shown {
            writeln!(f, "# ... with {} more rows", total - shown)?;
        }

        Ok(())
    }
}
