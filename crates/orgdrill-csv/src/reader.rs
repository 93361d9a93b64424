//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use orgdrill_core::{CellRef, HierarchyOptions, HierarchyTable};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a hierarchy table
    pub fn read_table_file<P: AsRef<Path>>(
        path: P,
        options: &CsvReadOptions,
        hierarchy: &HierarchyOptions,
    ) -> CsvResult<HierarchyTable> {
        let file = File::open(path)?;
        Self::read_table(file, options, hierarchy)
    }

    /// Read CSV from a reader into a hierarchy table.
    ///
    /// Without a header row, columns are named `A`, `B`, ... so the path
    /// column can still be addressed by name.
    pub fn read_table<R: Read>(
        reader: R,
        options: &CsvReadOptions,
        hierarchy: &HierarchyOptions,
    ) -> CsvResult<HierarchyTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(reader);

        let mut headers: Vec<String> = if options.has_header {
            csv_reader.headers()?.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if !options.has_header {
            let width = records.iter().map(Vec::len).max().unwrap_or(0);
            headers = (0..width)
                .map(|col| {
                    u16::try_from(col)
                        .map(CellRef::column_to_letters)
                        .map_err(|_| CsvError::TooManyColumns(width))
                })
                .collect::<CsvResult<_>>()?;
        }

        Ok(HierarchyTable::from_records(headers, records, hierarchy)?)
    }
}
