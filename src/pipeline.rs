use tracing::info;

use crate::error::PipelineError;
use crate::links::maps_search_url;
use crate::store::{RemoteFile, RemoteStore, XLSX_MIME};
use crate::table::{
    load_table,
    write::{output_name, table_to_xlsx},
    FileKind, Table, LINK_COLUMN, LOCATION_COLUMN,
};

/// Result of one successful pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Identifier of the uploaded file.
    pub file_id: String,
    /// Name the augmented spreadsheet was stored under.
    pub file_name: String,
    /// The augmented table, kept for previewing.
    pub table: Table,
}

impl PipelineOutcome {
    /// First `n` rows of the transformed table.
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        self.table.head(n)
    }
}

/// One user session against a single remote folder. Owns the store handle
/// and a memoized folder listing; the listing is fetched once and reused
/// until [`Session::invalidate_listing`] is called.
pub struct Session<S> {
    store: S,
    folder: String,
    listing: Option<Vec<RemoteFile>>,
}

impl<S: RemoteStore> Session<S> {
    pub fn new(store: S, folder: impl Into<String>) -> Self {
        Self {
            store,
            folder: folder.into(),
            listing: None,
        }
    }

    /// Candidate files in the folder, fetched on first use.
    pub async fn files(&mut self) -> Result<&[RemoteFile], PipelineError> {
        if self.listing.is_none() {
            let files = self
                .store
                .list(&self.folder)
                .await
                .map_err(PipelineError::Store)?;
            info!(count = files.len(), "listed candidate files");
            self.listing = Some(files);
        }
        Ok(self.listing.as_deref().unwrap_or_default())
    }

    /// Display names of the candidate files, in listing order.
    pub async fn file_names(&mut self) -> Result<Vec<String>, PipelineError> {
        Ok(self.files().await?.iter().map(|f| f.name.clone()).collect())
    }

    /// Drop the cached listing so the next call re-fetches.
    pub fn invalidate_listing(&mut self) {
        self.listing = None;
    }

    /// Run the whole pipeline for the file with the given display name:
    /// download, parse, append the link column, and upload the result as
    /// `<base>_with_links.xlsx` into the same folder.
    pub async fn run(&mut self, selection: &str) -> Result<PipelineOutcome, PipelineError> {
        let file = self
            .files()
            .await?
            .iter()
            .find(|f| f.name == selection)
            .cloned()
            .ok_or_else(|| PipelineError::UnknownSelection(selection.to_string()))?;

        // Unsupported suffixes are rejected before touching the store again.
        let kind = FileKind::from_name(&file.name)?;

        let bytes = self
            .store
            .get(&file.id)
            .await
            .map_err(PipelineError::Store)?;
        info!(name = %file.name, bytes = bytes.len(), "downloaded source file");

        let table = load_table(&bytes, kind, &file.name)?;
        let table = append_links(table)?;
        info!(rows = table.num_rows(), "generated links");

        let file_name = output_name(&file.name);
        let xlsx = table_to_xlsx(&table).map_err(PipelineError::Upload)?;
        let file_id = self
            .store
            .put(xlsx, &file_name, XLSX_MIME, &self.folder)
            .await
            .map_err(PipelineError::Upload)?;
        info!(id = %file_id, name = %file_name, "uploaded augmented spreadsheet");

        Ok(PipelineOutcome {
            file_id,
            file_name,
            table,
        })
    }
}

/// Append the link column as the last column. The table must already carry
/// the required location column; nothing is mutated when it is missing.
fn append_links(mut table: Table) -> Result<Table, PipelineError> {
    let idx = table
        .column_index(LOCATION_COLUMN)
        .ok_or_else(|| PipelineError::MissingColumn(LOCATION_COLUMN.to_string()))?;

    let links: Vec<String> = table
        .rows()
        .iter()
        .map(|row| maps_search_url(row.get(idx).map(String::as_str).unwrap_or("")))
        .collect();
    table.push_column(LINK_COLUMN, links);
    Ok(table)
}
