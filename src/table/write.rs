use std::io::Cursor;

use super::Table;
use crate::store::StoreError;

/// Serialize a table as an xlsx workbook: header row first, then one row
/// per table row, column order untouched.
pub fn table_to_xlsx(table: &Table) -> Result<Vec<u8>, StoreError> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| StoreError::Serialize("new workbook has no default sheet".into()))?;

    for (col, header) in table.headers().iter().enumerate() {
        sheet
            .get_cell_mut(((col + 1) as u32, 1u32))
            .set_value(header.as_str());
    }
    for (r, row) in table.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet
                .get_cell_mut(((c + 1) as u32, (r + 2) as u32))
                .set_value(cell.as_str());
        }
    }

    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)
        .map_err(|e| StoreError::Serialize(e.to_string()))?;
    Ok(buf.into_inner())
}

/// `report.csv` → `report_with_links`. The base is everything before the
/// first dot.
pub fn output_name(source: &str) -> String {
    let base = source.split('.').next().unwrap_or(source);
    format!("{base}_with_links.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_strips_the_extension() {
        assert_eq!(output_name("places.csv"), "places_with_links.xlsx");
        assert_eq!(output_name("places.xlsx"), "places_with_links.xlsx");
        assert_eq!(output_name("noext"), "noext_with_links.xlsx");
    }

    #[test]
    fn workbook_bytes_look_like_a_zip_archive() {
        let mut table = Table::new(vec!["Location Name".into()]);
        table.push_row(vec!["Eiffel Tower".into()]);

        let bytes = table_to_xlsx(&table).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
