use anyhow::{anyhow, Context, Result};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

use super::Table;
use crate::error::PipelineError;

/// Source format, detected from the file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.xlsx` workbook; the first sheet is read.
    Spreadsheet,
    /// `.csv`, comma-separated, first row is the header.
    DelimitedText,
}

impl FileKind {
    /// Detect from the trailing extension, case-insensitively. Anything
    /// other than `.xlsx` or `.csv` is unsupported.
    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Ok(FileKind::Spreadsheet),
            Some("csv") => Ok(FileKind::DelimitedText),
            _ => Err(PipelineError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Parse raw file bytes into a [`Table`]. The first row (CSV) or the first
/// row of the first sheet (xlsx) becomes the header; column order is
/// preserved from the source.
pub fn load_table(bytes: &[u8], kind: FileKind, name: &str) -> Result<Table, PipelineError> {
    let loaded = match kind {
        FileKind::DelimitedText => load_csv(bytes),
        FileKind::Spreadsheet => load_xlsx(bytes),
    };
    loaded.map_err(|e| PipelineError::Parse {
        name: name.to_string(),
        reason: format!("{e:#}"),
    })
}

fn load_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.context("reading CSV record")?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

fn load_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("opening xlsx workbook")?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading sheet {sheet_name:?}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => return Err(anyhow!("sheet {sheet_name:?} is empty")),
    };

    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row.iter().map(cell_text).collect());
    }
    Ok(table)
}

/// Render a cell to text. Everything downstream (validation, link
/// generation, the written workbook) works on strings.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kind_from_suffix() {
        assert_eq!(
            FileKind::from_name("places.csv").unwrap(),
            FileKind::DelimitedText
        );
        assert_eq!(
            FileKind::from_name("places.XLSX").unwrap(),
            FileKind::Spreadsheet
        );
        assert!(matches!(
            FileKind::from_name("data.txt"),
            Err(PipelineError::UnsupportedFormat(name)) if name == "data.txt"
        ));
        assert!(matches!(
            FileKind::from_name("no_extension"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn loads_csv_preserving_column_order() {
        let csv = b"Location Name,Notes\nEiffel Tower,visit\nLouvre,\n";
        let table = load_table(csv, FileKind::DelimitedText, "places.csv").unwrap();
        assert_eq!(table.headers(), &["Location Name", "Notes"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows()[0], vec!["Eiffel Tower", "visit"]);
        assert_eq!(table.rows()[1], vec!["Louvre", ""]);
    }

    #[test]
    fn ragged_csv_is_a_parse_error() {
        let csv = b"Location Name,Notes\nEiffel Tower\n";
        let err = load_table(csv, FileKind::DelimitedText, "places.csv").unwrap_err();
        assert!(matches!(err, PipelineError::Parse { name, .. } if name == "places.csv"));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error_for_xlsx() {
        let err = load_table(b"not a zip archive", FileKind::Spreadsheet, "p.xlsx").unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
    }

    #[test]
    fn reads_back_a_written_workbook() {
        let mut table = Table::new(vec!["Location Name".into(), "Notes".into()]);
        table.push_row(vec!["Eiffel Tower".into(), "visit".into()]);
        table.push_row(vec!["Louvre".into(), "".into()]);

        let bytes = crate::table::write::table_to_xlsx(&table).unwrap();
        let reloaded = load_table(&bytes, FileKind::Spreadsheet, "out.xlsx").unwrap();
        assert_eq!(reloaded, table);
    }
}
