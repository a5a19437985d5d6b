use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";

/// Narrowest the trailing column gets squeezed to before lines are allowed to
/// run past the terminal width.
const MIN_TAIL_WIDTH: usize = 16;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// Indented `label  value` lines with the values lined up.
pub fn field_rows(entries: &[(&str, String)]) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(label, value)| format!("{INDENT}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header plus one line per row. Only a left-aligned last column
/// wraps: customer lists break between entries and continue on lines whose
/// other cells are blank.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    let Some(last) = columns.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut widths = natural_widths(columns, rows);
    let wraps_tail = columns[last].align == Align::Left;
    if wraps_tail {
        let leading = INDENT.len()
            + widths[..last]
                .iter()
                .map(|width| width + COLUMN_GAP.len())
                .sum::<usize>();
        let room = cmp::max(max_width.saturating_sub(leading), MIN_TAIL_WIDTH);
        widths[last] = cmp::min(widths[last], room);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_line(columns, &widths, &header)];

    for row in rows {
        let tail = row.get(last).map(String::as_str).unwrap_or("");
        let pieces = if wraps_tail {
            wrap_list(tail, widths[last])
        } else {
            vec![tail.to_string()]
        };

        for (index, piece) in pieces.into_iter().enumerate() {
            let mut cells = if index == 0 {
                row.iter().take(last).cloned().collect::<Vec<String>>()
            } else {
                Vec::new()
            };
            cells.resize(last, String::new());
            cells.push(piece);
            output.push(format_line(columns, &widths, &cells));
        }
    }

    output
}

fn natural_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(column.name.chars().count(), cmp::max)
        })
        .collect()
}

fn format_line(columns: &[Column<'_>], widths: &[usize], cells: &[String]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, width), value)| match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        })
        .collect::<Vec<String>>();

    format!("{INDENT}{}", pieces.join(COLUMN_GAP))
        .trim_end()
        .to_string()
}

/// Packs `", "`-separated entries into lines of at most `width` characters.
/// An entry longer than `width` keeps a line of its own rather than being cut.
fn wrap_list(value: &str, width: usize) -> Vec<String> {
    if value.chars().count() <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for entry in value.split(", ") {
        if current.is_empty() {
            current.push_str(entry);
            continue;
        }
        // +3 leaves room for the separator and the comma closing a full line.
        if current.chars().count() + entry.chars().count() + 3 <= width {
            current.push_str(", ");
            current.push_str(entry);
        } else {
            current.push(',');
            lines.push(std::mem::take(&mut current));
            current.push_str(entry);
        }
    }
    lines.push(current);
    lines
}
