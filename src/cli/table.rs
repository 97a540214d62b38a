//! # ASCII Table Formatter
//!
//! Renders rows of pre-formatted string cells as an ASCII table with
//! `+`, `-` and `|` borders. Column widths are the maximum of the header
//! and every cell in the column, capped; purely numeric cells are
//! right-aligned, everything else left-aligned.

const MAX_COLUMN_WIDTH: usize = 50;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len().max(1)).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len()).min(MAX_COLUMN_WIDTH);
                }
            }
        }

        Self {
            headers,
            widths,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, &self.headers, false);
        self.write_separator(&mut output);
        for row in &self.rows {
            self.write_row(&mut output, row, true);
        }
        self.write_separator(&mut output);

        output
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, cells: &[String], align_numbers: bool) {
        output.push('|');
        for (i, width) in self.widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let cell = truncate(cell, *width);
            let padding = width.saturating_sub(cell.len());

            output.push(' ');
            if align_numbers && is_numeric(&cell) {
                for _ in 0..padding {
                    output.push(' ');
                }
                output.push_str(&cell);
            } else {
                output.push_str(&cell);
                for _ in 0..padding {
                    output.push(' ');
                }
            }
            output.push(' ');
            output.push('|');
        }
        output.push('\n');
    }
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.len() <= width {
        cell.to_string()
    } else if width > 3 {
        format!("{}...", &cell[..width - 3])
    } else {
        cell[..width].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_table() {
        let formatter = TableFormatter::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec!["1".to_string(), "alice".to_string()],
                vec!["12".to_string(), "bo".to_string()],
            ],
        );

        let rendered = formatter.render();
        let expected = "\
+----+-------+
| id | name  |
+----+-------+
|  1 | alice |
| 12 | bo    |
+----+-------+
";
        assert_eq!(rendered, expected);
        assert_eq!(formatter.row_count(), 2);
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(80);
        let formatter = TableFormatter::new(vec!["col".to_string()], vec![vec![long]]);
        let rendered = formatter.render();
        assert!(rendered.contains("..."));
        assert!(!rendered.contains(&"x".repeat(51)));
    }
}
