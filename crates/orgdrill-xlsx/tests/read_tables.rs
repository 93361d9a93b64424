//! Read hierarchy tables from in-memory XLSX packages

use std::io::{Cursor, Write};

use orgdrill_core::{ActivePath, HierarchyOptions, Navigator};
use orgdrill_xlsx::{XlsxError, XlsxReadOptions, XlsxReader};
use pretty_assertions::assert_eq;

const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

/// Build a minimal workbook. Each sheet is `(name, sheetData inner xml)`.
fn build_xlsx(sheets: &[(&str, &str)], shared_strings: &[&str]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

        let mut sheet_entries = String::new();
        let mut rel_entries = String::new();
        for (i, (name, _)) in sheets.iter().enumerate() {
            sheet_entries.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                name,
                i + 1,
                i + 1
            ));
            rel_entries.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
                sheet_entries
            )
            .as_bytes(),
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rel_entries
            )
            .as_bytes(),
        )
        .unwrap();

        if !shared_strings.is_empty() {
            let items: String = shared_strings
                .iter()
                .map(|s| {
                    // Rich text runs are written as given
                    if s.starts_with('<') {
                        format!("<si>{}</si>", s)
                    } else {
                        format!("<si><t>{}</t></si>", s)
                    }
                })
                .collect();
            zip.start_file("xl/sharedStrings.xml", options).unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</sst>"#,
                    items
                )
                .as_bytes(),
            )
            .unwrap();
        }

        for (i, (_, data)) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                    data
                )
                .as_bytes(),
            )
            .unwrap();
        }

        zip.finish().unwrap();
    }
    buf
}

const DISNEY_SHEET: &str = concat!(
    r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
    r#"<row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2" t="s"><v>3</v></c></row>"#,
    r#"<row r="3"><c r="A3" t="inlineStr"><is><t>Sulley</t></is></c><c r="B3" t="str"><v>DIS/MI/MC</v></c></row>"#,
    r#"<row r="4"><c r="A4" t="s"><v>4</v></c><c r="B4" t="s"><v>5</v></c><c r="C4"><v>7</v></c></row>"#,
);

const DISNEY_STRINGS: &[&str] = &[
    "Character_Name",
    "Org_String_Abbrev",
    "Mickey Mouse",
    "DIS/MMF/MC",
    "Simba",
    "DIS/TLK/MC",
];

#[test]
fn test_read_first_sheet() {
    let bytes = build_xlsx(&[("HR", DISNEY_SHEET)], DISNEY_STRINGS);
    let table = XlsxReader::read_table(
        Cursor::new(bytes),
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap();

    assert_eq!(table.headers(), &["Character_Name", "Org_String_Abbrev"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows()[1].cells(), &["Sulley", "DIS/MI/MC"]);
    assert_eq!(table.rows()[2].cells(), &["Simba", "DIS/TLK/MC", "7"]);

    let nav = Navigator::new(&table);
    let path = ActivePath::from_labels(["DIS"]);
    assert_eq!(nav.compute_children(&path), vec!["MI", "MMF", "TLK"]);
}

#[test]
fn test_read_named_sheet_with_escapes() {
    let other = concat!(
        r#"<row r="2"><c r="B2" t="inlineStr"><is><t>Org_String_Abbrev</t></is></c></row>"#,
        r#"<row r="3"><c r="B3" t="inlineStr"><is><t>DIS/A_x005f_B</t></is></c></row>"#,
    );
    let bytes = build_xlsx(&[("HR", DISNEY_SHEET), ("Other", other)], DISNEY_STRINGS);

    let options = XlsxReadOptions {
        sheet: Some("Other".into()),
    };
    let table =
        XlsxReader::read_table(Cursor::new(bytes), &options, &HierarchyOptions::default())
            .unwrap();

    assert_eq!(table.headers(), &["A", "Org_String_Abbrev"]);
    assert_eq!(table.rows()[0].level(1), Some("A_B"));
}

#[test]
fn test_cells_without_references() {
    let data = concat!(
        r#"<row><c t="inlineStr"><is><t>Org_String_Abbrev</t></is></c><c t="inlineStr"><is><t>Name</t></is></c></row>"#,
        r#"<row><c t="inlineStr"><is><t>DIS/MMF</t></is></c><c/><c t="b"><v>0</v></c></row>"#,
    );
    let bytes = build_xlsx(&[("Sheet1", data)], &[]);
    let table = XlsxReader::read_table(
        Cursor::new(bytes),
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap();

    assert_eq!(table.rows()[0].cells(), &["DIS/MMF", "", "FALSE"]);
}

#[test]
fn test_inline_string_skips_phonetic_runs() {
    let data = concat!(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Org_String_Abbrev</t></is></c></row>"#,
        r#"<row r="2"><c r="A2" t="inlineStr"><is><r><t>DIS</t></r><rPh sb="0" eb="1"><t>PH</t></rPh></is></c></row>"#,
        r#"<row r="3"><c r="A3" t="inlineStr"><is><r><t>DIS/</t></r><rPh sb="0" eb="3"><t>PH</t></rPh><r><t>MI</t></r></is></c></row>"#,
    );
    let bytes = build_xlsx(&[("Sheet1", data)], &[]);
    let table = XlsxReader::read_table(
        Cursor::new(bytes),
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap();

    assert_eq!(table.roots(), vec!["DIS"]);
    assert_eq!(table.rows()[1].cells(), &["DIS/MI"]);
}

#[test]
fn test_shared_string_skips_phonetic_runs() {
    let strings = &[
        "Org_String_Abbrev",
        r#"<r><t>DIS/MI</t></r><rPh sb="0" eb="3"><t>ディス</t></rPh><phoneticPr fontId="1"/>"#,
    ];
    let data = concat!(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#,
        r#"<row r="2"><c r="A2" t="s"><v>1</v></c></row>"#,
    );
    let bytes = build_xlsx(&[("Sheet1", data)], strings);
    let table = XlsxReader::read_table(
        Cursor::new(bytes),
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap();

    assert_eq!(table.rows()[0].cells(), &["DIS/MI"]);
    let nav = Navigator::new(&table);
    let path = ActivePath::from_labels(["DIS"]);
    assert_eq!(nav.compute_children(&path), vec!["MI"]);
}

#[test]
fn test_missing_sheet() {
    let bytes = build_xlsx(&[("HR", DISNEY_SHEET)], DISNEY_STRINGS);
    let options = XlsxReadOptions {
        sheet: Some("Payroll".into()),
    };
    let err = XlsxReader::read_table(Cursor::new(bytes), &options, &HierarchyOptions::default())
        .unwrap_err();
    assert!(matches!(err, XlsxError::SheetNotFound(name) if name == "Payroll"));
}

#[test]
fn test_not_a_workbook() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();
    }
    let err = XlsxReader::read_table(
        Cursor::new(buf),
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, XlsxError::InvalidFormat(_)));
}

#[test]
fn test_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Disney_HR.xlsx");
    std::fs::write(&path, build_xlsx(&[("HR", DISNEY_SHEET)], DISNEY_STRINGS)).unwrap();

    let table = XlsxReader::read_table_file(
        &path,
        &XlsxReadOptions::default(),
        &HierarchyOptions::default(),
    )
    .unwrap();
    assert_eq!(table.roots(), vec!["DIS"]);
}
