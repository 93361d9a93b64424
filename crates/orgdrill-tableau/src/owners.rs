//! Workbook owner export

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use ahash::AHashMap;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::error::Result;
use crate::model::Workbook;
use crate::rest::RestClient;

/// Column order of the exported CSV
pub const OWNER_COLUMNS: [&str; 5] = [
    "workbook_name",
    "size",
    "created_at",
    "owner_id",
    "owner_name",
];

/// One workbook with its resolved owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookOwnerRecord {
    pub workbook_name: String,
    pub size: Option<u64>,
    /// RFC 3339, second precision, `Z` suffix; empty when unknown
    pub created_at: String,
    pub owner_id: String,
    pub owner_name: String,
}

impl WorkbookOwnerRecord {
    /// Build a record from a workbook and its owner's name
    pub fn new(workbook: &Workbook, owner_name: &str) -> Self {
        Self {
            workbook_name: workbook.name.clone(),
            size: workbook.size,
            created_at: workbook
                .created_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
            owner_id: workbook.owner_id().unwrap_or_default().to_string(),
            owner_name: owner_name.to_string(),
        }
    }

    fn fields(&self) -> [String; 5] {
        [
            self.workbook_name.clone(),
            self.size.map(|s| s.to_string()).unwrap_or_default(),
            self.created_at.clone(),
            self.owner_id.clone(),
            self.owner_name.clone(),
        ]
    }
}

/// List every workbook on the signed-in site and resolve each owner's name.
///
/// Each owner is looked up once. Workbooks without an owner get an empty name.
pub fn collect_workbook_owners(client: &RestClient) -> Result<Vec<WorkbookOwnerRecord>> {
    let workbooks = client.all_workbooks()?;
    tracing::info!("Found {} workbooks", workbooks.len());

    let mut owner_names: AHashMap<String, String> = AHashMap::new();
    let mut records = Vec::with_capacity(workbooks.len());

    for workbook in &workbooks {
        let owner_name = match workbook.owner_id() {
            Some(owner_id) => match owner_names.get(owner_id) {
                Some(name) => name.clone(),
                None => {
                    let user = client.user_by_id(owner_id)?;
                    tracing::debug!("Resolved owner {} to {}", owner_id, user.name);
                    owner_names.insert(owner_id.to_string(), user.name.clone());
                    user.name
                }
            },
            None => {
                tracing::warn!("Workbook {} has no owner", workbook.name);
                String::new()
            }
        };
        records.push(WorkbookOwnerRecord::new(workbook, &owner_name));
    }

    Ok(records)
}

/// Write the records as CSV with a header row
pub fn write_owners_csv<W: Write>(records: &[WorkbookOwnerRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    if records.is_empty() {
        csv_writer.write_record(OWNER_COLUMNS)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the records to a CSV file
pub fn write_owners_csv_file<P: AsRef<Path>>(
    records: &[WorkbookOwnerRecord],
    path: P,
) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_owners_csv(records, std::io::BufWriter::new(file))?;
    tracing::info!("Saved {} records to {}", records.len(), path.as_ref().display());
    Ok(())
}

/// Render the records as an aligned text table with a row index column
pub fn format_owner_table(records: &[WorkbookOwnerRecord]) -> String {
    let rows: Vec<[String; 5]> = records.iter().map(WorkbookOwnerRecord::fields).collect();

    let index_width = records.len().saturating_sub(1).to_string().len();
    let mut widths = OWNER_COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (name, width) in OWNER_COLUMNS.iter().zip(widths) {
        let _ = write!(out, "  {:<width$}", name);
    }
    out.push('\n');

    for (i, row) in rows.iter().enumerate() {
        let _ = write!(out, "{:>index_width$}", i);
        for (cell, width) in row.iter().zip(widths) {
            let _ = write!(out, "  {:<width$}", cell);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceRef;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn workbook(name: &str, owner: Option<&str>) -> Workbook {
        Workbook {
            id: format!("id-{}", name),
            name: name.to_string(),
            size: Some(2),
            created_at: Some(Utc.with_ymd_and_hms(2023, 1, 5, 9, 30, 0).unwrap()),
            owner: owner.map(|id| ResourceRef {
                id: id.to_string(),
                name: None,
            }),
            project: None,
        }
    }

    #[test]
    fn test_record_from_workbook() {
        let record = WorkbookOwnerRecord::new(&workbook("Sales", Some("u1")), "alice");
        assert_eq!(record.created_at, "2023-01-05T09:30:00Z");
        assert_eq!(record.owner_id, "u1");
        assert_eq!(record.owner_name, "alice");

        let orphan = WorkbookOwnerRecord::new(&workbook("Orphan", None), "");
        assert_eq!(orphan.owner_id, "");
    }

    #[test]
    fn test_write_csv() {
        let records = vec![
            WorkbookOwnerRecord::new(&workbook("Sales", Some("u1")), "alice"),
            WorkbookOwnerRecord {
                size: None,
                created_at: String::new(),
                ..WorkbookOwnerRecord::new(&workbook("Ops, East", Some("u2")), "bob")
            },
        ];
        let mut out = Vec::new();
        write_owners_csv(&records, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "workbook_name,size,created_at,owner_id,owner_name\n\
             Sales,2,2023-01-05T09:30:00Z,u1,alice\n\
             \"Ops, East\",,,u2,bob\n"
        );
    }

    #[test]
    fn test_write_csv_empty_keeps_header() {
        let mut out = Vec::new();
        write_owners_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "workbook_name,size,created_at,owner_id,owner_name\n"
        );
    }

    #[test]
    fn test_format_table() {
        let records = vec![WorkbookOwnerRecord::new(
            &workbook("Sales", Some("u1")),
            "alice",
        )];
        let table = format_owner_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   workbook_name  size"));
        assert!(lines[1].starts_with("0  Sales"));
        assert!(lines[1].trim_end().ends_with("u1        alice"));
    }
}
