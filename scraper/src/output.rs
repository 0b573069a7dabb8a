use crate::index::StoreRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Column set shared by the CSV and TSV outputs.
const INDEX_COLUMNS: [&str; 4] = ["Code", "Name", "Color", "ImageUrl"];

/// Default targets for the generated Arduino snippet.
pub const SNIPPET_PATHS: [&str; 2] = [
    "arduino/RFID_Bambu_lab_reader/generated/materials_snippet.h",
    "arduino/RFID_Bambu_lab_reader_OLED/generated/materials_snippet.h",
];

pub fn write_json(path: &Path, records: &[StoreRecord]) -> Result<()> {
    create_parent_dirs(path)?;

    let json =
        serde_json::to_string_pretty(records).context("Failed to serialize store index")?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_csv(path: &Path, records: &[StoreRecord]) -> Result<()> {
    write_delimited(path, records, ',')
}

pub fn write_tsv(path: &Path, records: &[StoreRecord]) -> Result<()> {
    write_delimited(path, records, '\t')
}

fn write_delimited(path: &Path, records: &[StoreRecord], delimiter: char) -> Result<()> {
    create_parent_dirs(path)?;

    let sep = delimiter.to_string();
    let mut out = String::new();
    out.push_str(&INDEX_COLUMNS.join(&sep));
    out.push('\n');

    for record in records {
        let row = [
            code_cell(record),
            record.name.clone(),
            record.color.clone(),
            record.image_url.clone().unwrap_or_default(),
        ];
        let escaped: Vec<String> = row
            .iter()
            .map(|field| escape_field(field, delimiter))
            .collect();
        out.push_str(&escaped.join(&sep));
        out.push('\n');
    }

    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))
}

/// Spreadsheet-friendly code cell: a HYPERLINK formula when the product
/// URL is known, the bare code otherwise.
fn code_cell(record: &StoreRecord) -> String {
    match record.product_url.is_empty() {
        true => record.code.clone(),
        false => format!(
            "=HYPERLINK(\"{}\";\"{}\")",
            record.product_url, record.code
        ),
    }
}

/// Minimal quoting: only fields containing the delimiter, a quote or a
/// line break get wrapped, with inner quotes doubled.
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders the C array rows consumed by the RFID reader sketches.
///
/// Rows are sorted by code then color so regenerating the snippet yields
/// readable diffs. The materialId column is not scraped and stays blank.
pub fn render_snippet(records: &[StoreRecord]) -> String {
    let mut sorted: Vec<&StoreRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.color.cmp(&b.color)));

    let mut lines = vec![
        "// Generated by scrape_store (store scrape).".to_string(),
        "// materialId not scraped; left blank. variantId comes from store feed when present."
            .to_string(),
    ];

    for record in sorted {
        let variant = record
            .variant_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        lines.push(format!(
            "    {{\"\", \"{}\", \"{}\", \"{}\", \"{}\"}},",
            escape_c(&variant),
            escape_c(&record.code),
            escape_c(&record.name),
            escape_c(&record.color),
        ));
    }

    lines.join("\n") + "\n"
}

pub fn write_snippet(path: &Path, records: &[StoreRecord]) -> Result<()> {
    create_parent_dirs(path)?;

    fs::write(path, render_snippet(records))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Keeps ASCII only to avoid surprises in the sketch sources.
fn escape_c(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii)
        .collect::<String>()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
