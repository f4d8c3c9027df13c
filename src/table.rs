//! Fixed-width table output for schema, plan, and series listings.

use std::fmt::Write as _;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), 1])
                .max()
                .unwrap_or(1)
        })
        .collect();

    let mut output = String::new();
    write_row(&mut output, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(3))).collect();
    write_row(&mut output, &rule, &widths);
    for row in rows {
        write_row(&mut output, row, &widths);
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn write_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(|c| sanitize(c)).unwrap_or_default();
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(&cell);
        line.extend(std::iter::repeat_n(' ', pad));
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

fn sanitize(cell: &str) -> String {
    cell.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_and_trims_trailing_space() {
        let headers = vec!["name".to_string(), "type".to_string()];
        let rows = vec![
            vec!["Region".to_string(), "categorical".to_string()],
            vec!["Sales".to_string(), "numerical".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "name    type");
        assert!(lines[1].starts_with("------  "));
        assert_eq!(lines[2], "Region  categorical");
        assert!(rendered.lines().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn control_characters_are_flattened() {
        let headers = vec!["v".to_string()];
        let rows = vec![vec!["a\tb".to_string()]];
        assert!(render_table(&headers, &rows).contains("a b"));
    }
}
