use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::AuthorStats;
use console::measure_text_width;
use std::io::Write;

const HEADER: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Writes ranked stats to `out` in the requested encoding.
pub fn write_report<W: Write>(
    out: &mut W,
    stats: &[AuthorStats],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Tabular => write_tabular(out, stats)?,
        OutputFormat::Csv => write_csv(out, stats)?,
        OutputFormat::Json => write_json(out, stats)?,
        OutputFormat::JsonLines => write_json_lines(out, stats)?,
    }
    out.flush()?;
    Ok(())
}

fn row(stats: &AuthorStats) -> [String; 4] {
    [
        stats.name.clone(),
        stats.lines.to_string(),
        stats.commits.to_string(),
        stats.files.to_string(),
    ]
}

/// Tabs and line breaks would split a row, so control characters in a name print as spaces.
fn tabular_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Every column but the last is padded to its widest cell plus one space.
fn write_tabular<W: Write>(out: &mut W, stats: &[AuthorStats]) -> Result<()> {
    let header = HEADER.map(String::from);
    let rows: Vec<[String; 4]> = std::iter::once(header)
        .chain(stats.iter().map(|s| {
            let mut cells = row(s);
            cells[0] = tabular_name(&cells[0]);
            cells
        }))
        .collect();

    let mut widths = [0usize; 3];
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(measure_text_width(cell) + 1);
        }
    }

    for cells in &rows {
        let mut line = String::new();
        for (width, cell) in widths.iter().zip(cells.iter()) {
            line.push_str(cell);
            let pad = width - measure_text_width(cell);
            line.extend(std::iter::repeat(' ').take(pad));
        }
        line.push_str(&cells[3]);
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, stats: &[AuthorStats]) -> Result<()> {
    writeln!(out, "{}", HEADER.join(","))?;
    for s in stats {
        let fields = row(s);
        let encoded: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        writeln!(out, "{}", encoded.join(","))?;
    }
    Ok(())
}

fn csv_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.starts_with([' ', '\t'])
        || field == r"\.";
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_json<W: Write>(out: &mut W, stats: &[AuthorStats]) -> Result<()> {
    serde_json::to_writer(&mut *out, stats)?;
    writeln!(out)?;
    Ok(())
}

fn write_json_lines<W: Write>(out: &mut W, stats: &[AuthorStats]) -> Result<()> {
    for s in stats {
        serde_json::to_writer(&mut *out, s)?;
        writeln!(out)?;
    }
    Ok(())
}
