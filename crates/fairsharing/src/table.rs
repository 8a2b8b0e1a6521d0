use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::MetadataRecord;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub const HEADER: [&str; 6] = [
    "",
    "URL",
    "title",
    "scope and data types",
    "terminology artifacts",
    "license",
];

/// Write records as a tab-delimited table, one row per record in input order.
/// The first column is the row index.
pub fn write_table(records: &[MetadataRecord], path: &Path) -> Result<(), TableError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    w.write_record(HEADER)?;

    for (i, rec) in records.iter().enumerate() {
        w.write_record([
            i.to_string(),
            rec.source.clone(),
            rec.title.clone(),
            rec.scope_and_data_types_string(),
            rec.terminology_artifacts_string(),
            rec.license_string(),
        ])?;
    }
    w.flush()?;

    info!(path=%path.display(), rows=records.len(), "tabulated results");
    Ok(())
}
