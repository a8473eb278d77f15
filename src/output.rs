use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::record::{ScoreRecord, COLUMNS};
use crate::Result;

/// Writes the header and one row per record, in the order given.
/// Absent scores become empty fields.
pub fn write_csv<W: Write>(out: W, records: &[ScoreRecord]) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the records to it.
pub fn write_records(path: impl AsRef<Path>, records: &[ScoreRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), records)
}
