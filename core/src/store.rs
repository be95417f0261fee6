//! Flat-file persistence layer.
//!
//! RULE: Only store.rs talks to the dataset file format.
//! The generator and the dashboard hand records to store functions;
//! they never touch CSV readers or writers directly.

use crate::{
    error::{SalesError, SalesResult},
    record::{CsvRow, SalesRecord},
};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Write records with a header row to any sink.
pub fn write_records<'a, W, I>(sink: W, records: I) -> SalesResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(sink);
    let mut written = 0usize;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Write records to `path`, replacing any existing file wholesale.
pub fn write_records_to_path<'a, I>(path: &Path, records: I) -> SalesResult<usize>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let file = File::create(path)?;
    let written = write_records(file, records)?;
    log::debug!("wrote {written} rows to {}", path.display());
    Ok(written)
}

/// Render records as CSV text, for download-style exports.
pub fn records_to_csv_string<'a, I>(records: I) -> SalesResult<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| anyhow::anyhow!("CSV output was not UTF-8: {e}").into())
}

pub fn read_records<R: Read>(source: R) -> SalesResult<Vec<SalesRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let records = reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(SalesRecord::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Read the dataset file. An absent file is `MissingDataset`,
/// not a generic I/O error.
pub fn read_records_from_path(path: &Path) -> SalesResult<Vec<SalesRecord>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SalesError::MissingDataset {
                path: path.display().to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    read_records(file)
}
