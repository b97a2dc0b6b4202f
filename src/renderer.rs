// src/renderer.rs

use crate::cli::{Format, Order};
use crate::error::Result;
use crate::model::AuthorStat;
use std::cmp::{Ordering, Reverse};
use std::io::Write;

const HEADER: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Sorts descending by the chosen key, then by the remaining counters,
/// then by name.
pub fn sort(stats: &mut [AuthorStat], order: Order) {
    stats.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &AuthorStat, b: &AuthorStat, order: Order) -> Ordering {
    let key = |s: &AuthorStat| match order {
        Order::Lines => Reverse((s.lines, s.commits, s.files)),
        Order::Commits => Reverse((s.commits, s.lines, s.files)),
        Order::Files => Reverse((s.files, s.lines, s.commits)),
    };
    key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
}

pub fn render<W: Write>(out: &mut W, stats: &[AuthorStat], format: Format) -> Result<()> {
    match format {
        Format::Tabular => render_tabular(out, stats)?,
        Format::Csv => render_csv(out, stats)?,
        Format::Json => {
            serde_json::to_writer(&mut *out, stats)?;
            writeln!(out)?;
        }
        Format::JsonLines => {
            for stat in stats {
                serde_json::to_writer(&mut *out, stat)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn rows(stats: &[AuthorStat]) -> impl Iterator<Item = [String; 4]> + '_ {
    stats.iter().map(|stat| {
        [
            stat.name.clone(),
            stat.lines.to_string(),
            stat.commits.to_string(),
            stat.files.to_string(),
        ]
    })
}

/// Left-aligned columns, every column except the last padded to its widest
/// cell plus one space.
fn render_tabular<W: Write>(out: &mut W, stats: &[AuthorStat]) -> std::io::Result<()> {
    let header = HEADER.map(String::from);
    let table: Vec<[String; 4]> = std::iter::once(header).chain(rows(stats)).collect();

    let mut widths = [0usize; 3];
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for [name, lines, commits, files] in &table {
        writeln!(
            out,
            "{name:<w0$} {lines:<w1$} {commits:<w2$} {files}",
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )?;
    }
    Ok(())
}

fn render_csv<W: Write>(out: &mut W, stats: &[AuthorStat]) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER.join(","))?;
    for row in rows(stats) {
        let fields: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    Ok(())
}

fn csv_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.starts_with(char::is_whitespace);
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
