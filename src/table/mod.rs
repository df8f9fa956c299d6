pub mod load;
pub mod write;

pub use load::{load_table, FileKind};

/// Column name the source table must carry before links can be generated.
/// Matched byte-for-byte; no trimming, no case folding.
pub const LOCATION_COLUMN: &str = "Location Name";

/// Column appended by the transform step.
pub const LINK_COLUMN: &str = "Google Maps Link";

/// In-memory row/column representation of a spreadsheet or delimited-text
/// file. Column order is preserved from the source; every cell is carried
/// as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Rows are expected to match the header width; loaders guarantee this.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Exact-match header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Append `values` as the last column. `values` must carry one entry
    /// per existing row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(vec!["Location Name".into(), "Notes".into()]);
        t.push_row(vec!["Eiffel Tower".into(), "visit".into()]);
        t.push_row(vec!["Louvre".into(), "".into()]);
        t
    }

    #[test]
    fn column_lookup_is_exact() {
        let t = sample();
        assert_eq!(t.column_index("Location Name"), Some(0));
        assert_eq!(t.column_index("location name"), None);
        assert_eq!(t.column_index("Location Name "), None);
    }

    #[test]
    fn push_column_appends_last_and_keeps_order() {
        let mut t = sample();
        t.push_column("Link", vec!["a".into(), "b".into()]);
        assert_eq!(t.headers(), &["Location Name", "Notes", "Link"]);
        assert_eq!(t.rows()[0], vec!["Eiffel Tower", "visit", "a"]);
        assert_eq!(t.rows()[1], vec!["Louvre", "", "b"]);
    }

    #[test]
    fn head_clamps_to_row_count() {
        let t = sample();
        assert_eq!(t.head(1).len(), 1);
        assert_eq!(t.head(10).len(), 2);
    }
}
