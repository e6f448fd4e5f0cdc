//! Parquet export of the annotated county table

use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;
use crate::error::util::create_file;
use crate::utils::logging::log_output_written;

/// Write a record batch to a single Parquet file
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = create_file(path, "Parquet export")?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_output_written(&format!("{} rows", batch.num_rows()), path);
    Ok(())
}
