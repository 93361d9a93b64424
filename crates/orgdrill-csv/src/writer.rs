//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use orgdrill_core::HierarchyRow;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write rows to a CSV file
    pub fn write_rows_file<P: AsRef<Path>>(
        headers: &[String],
        rows: &[&HierarchyRow],
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_rows(headers, rows, file, options)
    }

    /// Write rows to a writer, header first when enabled
    pub fn write_rows<W: Write>(
        headers: &[String],
        rows: &[&HierarchyRow],
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(headers)?;
        }

        for row in rows {
            csv_writer.write_record(row.cells())?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
