//! Report output: leveled CSV, console summary and JSON tree dump.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::harvest::category::parse_category;
use crate::harvest::hierarchy::CategoryTree;
use crate::model::CategoryRecord;

pub const CSV_HEADER: [&str; 5] = [
    "Category ID",
    "Category Name",
    "Parent Category",
    "Top Category",
    "Full Path",
];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses every path and sorts the records by cleaned full path.
pub fn build_records<'a, I>(categories: I) -> Vec<CategoryRecord>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut records: Vec<CategoryRecord> =
        categories.into_iter().map(|c| parse_category(c)).collect();
    // Two raw paths can clean to the same full path; the id keeps order stable.
    records.sort_by(|a, b| {
        a.full_path
            .cmp(&b.full_path)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    records
}

/* ---------------- CSV ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            w.write_all(b",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// Writes the header and one row per record.
pub fn write_csv<W: Write>(w: &mut W, records: &[CategoryRecord]) -> io::Result<()> {
    write_row(w, &CSV_HEADER)?;
    for record in records {
        write_row(w, &record.to_row())?;
    }
    Ok(())
}

/* ---------------- Summary ---------------- */

/// Tree-style listing of sorted records.
///
/// A new group starts whenever the parent differs from the previous record's.
pub fn render_summary(records: &[CategoryRecord]) -> String {
    let mut out = String::from("\nCategory Structure:\n");
    let mut current_parent: Option<&str> = None;
    for record in records {
        if current_parent != Some(record.parent_category.as_str()) {
            current_parent = Some(record.parent_category.as_str());
            let _ = writeln!(
                out,
                "\n{} > {}",
                record.top_category, record.parent_category
            );
        }
        let _ = writeln!(out, "  - {}", record.category_name);
    }
    out
}

/* ---------------- Files ---------------- */

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes the leveled CSV report and prints the grouped summary.
///
/// Returns the number of records written. The file handle is released on
/// every path out of this function, including write errors.
pub fn save_categories(
    categories: &BTreeSet<String>,
    output_path: &Path,
) -> Result<usize, ReportError> {
    let records = build_records(categories);

    ensure_parent(output_path)?;
    let mut out = BufWriter::new(File::create(output_path)?);
    write_csv(&mut out, &records)?;
    out.flush()?;
    drop(out);

    info!(
        records = records.len(),
        path = %output_path.display(),
        "Wrote category report"
    );

    println!(
        "\nSaved {} categories to {}",
        categories.len(),
        output_path.display()
    );
    print!("{}", render_summary(&records));

    Ok(records.len())
}

/// Dumps the category hierarchy as pretty JSON.
pub fn save_tree_json(tree: &CategoryTree, output_path: &Path) -> Result<(), ReportError> {
    ensure_parent(output_path)?;
    let mut out = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut out, &tree.to_view())?;
    out.write_all(b"\n")?;
    out.flush()?;

    info!(
        nodes = tree.len(),
        path = %output_path.display(),
        "Wrote category tree"
    );
    Ok(())
}
