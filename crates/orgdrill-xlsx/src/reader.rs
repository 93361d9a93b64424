//! XLSX reader

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use orgdrill_core::{CellRef, HierarchyOptions, HierarchyTable};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// - `_x000d_` = CR
/// - `_x000a_` = LF
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut saw_x = false;
        let mut decoded = None;

        if chars.peek() == Some(&'x') {
            chars.next();
            saw_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
            }
        }

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                // Not an escape, keep what was consumed
                result.push('_');
                if saw_x {
                    result.push('x');
                }
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// Options for reading an XLSX workbook
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Sheet to read by name; the first sheet when `None`
    pub sheet: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a hierarchy table from a file path
    pub fn read_table_file<P: AsRef<Path>>(
        path: P,
        options: &XlsxReadOptions,
        hierarchy: &HierarchyOptions,
    ) -> XlsxResult<HierarchyTable> {
        let file = File::open(path)?;
        Self::read_table(file, options, hierarchy)
    }

    /// Read a hierarchy table from a reader.
    ///
    /// The first non-empty row of the sheet is the header.
    pub fn read_table<R: Read + Seek>(
        reader: R,
        options: &XlsxReadOptions,
        hierarchy: &HierarchyOptions,
    ) -> XlsxResult<HierarchyTable> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let (name, r_id) = match &options.sheet {
            Some(wanted) => sheets
                .iter()
                .find(|(name, _)| name == wanted)
                .ok_or_else(|| XlsxError::SheetNotFound(wanted.clone()))?,
            None => sheets
                .first()
                .ok_or_else(|| XlsxError::InvalidFormat("Workbook has no sheets".into()))?,
        };
        let sheet_path = sheet_paths
            .get(r_id)
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet for relationship {}", r_id)))?;

        tracing::debug!("Reading sheet '{}' from {}", name, sheet_path);
        let grid = Self::read_worksheet(&mut archive, sheet_path, &shared_strings)?;
        let (headers, records) = Self::grid_to_records(grid);

        Ok(HierarchyTable::from_records(headers, records, hierarchy)?)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs carry reading hints, not cell text
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds, in workbook order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    let name = attr_value(&e, b"name");
                    let r_id = attr_value(&e, b"r:id");
                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet paths keyed by relationship id
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the cells of one worksheet as text, keyed by row then column
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<BTreeMap<u32, BTreeMap<u16, String>>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut grid: BTreeMap<u32, BTreeMap<u16, String>> = BTreeMap::new();

        // Position tracking for files that omit `r` attributes
        let mut next_row: u32 = 0;
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;
        let mut cell_pos = CellRef::new(0, 0);
        let mut cell_type: Option<String> = None;
        let mut value = String::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Self::row_position(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        in_cell = true;
                        value.clear();
                        cell_type = attr_value(&e, b"t");
                        cell_pos = Self::cell_position(&e, current_row, next_col)?;
                        next_col = cell_pos.col.saturating_add(1);
                    }
                    b"v" if in_cell => in_value = true,
                    b"is" if in_cell => in_inline_str = true,
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Self::row_position(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        // Styled but empty cell still advances the column
                        let pos = Self::cell_position(&e, current_row, next_col)?;
                        next_col = pos.col.saturating_add(1);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some(text) =
                            Self::cell_text(cell_type.as_deref(), &value, shared_strings)?
                        {
                            grid.entry(cell_pos.row)
                                .or_default()
                                .insert(cell_pos.col, text);
                        }
                        in_cell = false;
                        in_value = false;
                        in_inline_str = false;
                        in_inline_text = false;
                        in_phonetic = false;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    value.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(grid)
    }

    fn row_position(e: &BytesStart, fallback: u32) -> u32 {
        attr_value(e, b"r")
            .and_then(|r| r.parse::<u32>().ok())
            .map(|r| r.saturating_sub(1)) // 1-based to 0-based
            .unwrap_or(fallback)
    }

    fn cell_position(e: &BytesStart, row: u32, next_col: u16) -> XlsxResult<CellRef> {
        match attr_value(e, b"r") {
            Some(r) => CellRef::parse(&r).map_err(|err| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", r, err))
            }),
            None => Ok(CellRef::new(row, next_col)),
        }
    }

    /// Text shown for a cell, `None` for an empty cell
    fn cell_text(
        cell_type: Option<&str>,
        value: &str,
        shared_strings: &[String],
    ) -> XlsxResult<Option<String>> {
        if value.is_empty() {
            return Ok(None);
        }

        let text = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                shared_strings
                    .get(idx)
                    .cloned()
                    .ok_or_else(|| {
                        XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                    })?
            }

            // Boolean
            Some("b") => {
                if value == "1" || value.eq_ignore_ascii_case("true") {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }

            // Inline string or formula string result
            Some("inlineStr") | Some("str") => decode_excel_escapes(value),

            // Numbers, errors and anything unknown keep their stored text
            _ => value.to_string(),
        };

        Ok(Some(text))
    }

    /// Split a sparse grid into a header row and dense records.
    ///
    /// Blank header cells are named after their column letter.
    fn grid_to_records(
        grid: BTreeMap<u32, BTreeMap<u16, String>>,
    ) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rows = grid
            .into_values()
            .filter(|cells| cells.values().any(|v| !v.is_empty()));

        let header_cells = match rows.next() {
            Some(cells) => cells,
            None => return (Vec::new(), Vec::new()),
        };

        let headers: Vec<String> = match header_cells.keys().next_back() {
            Some(&last) => (0..=last)
                .map(|col| match header_cells.get(&col) {
                    Some(name) if !name.is_empty() => name.clone(),
                    _ => CellRef::column_to_letters(col),
                })
                .collect(),
            None => Vec::new(),
        };
        let width = headers.len();

        let records = rows
            .map(|cells| {
                let row_width = cells
                    .keys()
                    .next_back()
                    .map_or(0, |c| *c as usize + 1)
                    .max(width);
                let mut record = vec![String::new(); row_width];
                for (col, text) in cells {
                    record[col as usize] = text;
                }
                record
            })
            .collect();

        (headers, records)
    }
}

/// Unescaped value of an attribute by its full (prefixed) name
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}
