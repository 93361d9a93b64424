//! Open tables by extension and export the exact rows of a node

use orgdrill::prelude::*;
use pretty_assertions::assert_eq;

const ORG_CSV: &str = "\
Character_Name,Org_String_Abbrev
Mickey Mouse,DIS/MMF/MC
Sulley,DIS/MI/MC
Simba,DIS/TLK/MC
";

#[test]
fn test_open_csv_and_drill_down() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("org.CSV");
    std::fs::write(&input, ORG_CSV).unwrap();

    let table = HierarchyTable::open(&input, &LoadOptions::default()).unwrap();
    let nav = Navigator::new(&table);
    let mut path = ActivePath::new();

    nav.apply(&mut path, &NavAction::SelectRoot("DIS".into()))
        .unwrap();
    nav.apply(&mut path, &NavAction::SelectChild("MMF".into()))
        .unwrap();
    nav.apply(&mut path, &NavAction::SelectChild("MC".into()))
        .unwrap();

    let view = nav.view(&path);
    assert_eq!(view.current.as_deref(), Some("MC"));
    assert_eq!(view.exact_rows.len(), 1);

    let output = dir.path().join("exact.tsv");
    table.export_rows(&view.exact_rows, &output).unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Character_Name\tOrg_String_Abbrev\nMickey Mouse\tDIS/MMF/MC\n"
    );
}

#[test]
fn test_open_tsv_with_custom_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("org.tsv");
    std::fs::write(&input, "Who\tPath\nNala\tDIS>TLK\n").unwrap();

    let options = LoadOptions {
        hierarchy: HierarchyOptions {
            path_column: "Path".into(),
            delimiter: '>',
        },
        ..Default::default()
    };
    let table = HierarchyTable::open(&input, &options).unwrap();
    assert_eq!(table.rows()[0].level(1), Some("TLK"));
}

#[test]
fn test_open_tsv_keeps_csv_options() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("org.tsv");
    std::fs::write(&input, "Nala\t DIS/TLK \n").unwrap();

    let options = LoadOptions {
        hierarchy: HierarchyOptions {
            path_column: "B".into(),
            ..Default::default()
        },
        csv: orgdrill::CsvReadOptions {
            has_header: false,
            trim: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let table = HierarchyTable::open(&input, &options).unwrap();
    assert_eq!(table.headers(), &["A", "B"]);
    assert_eq!(table.rows()[0].cells(), &["Nala", "DIS/TLK"]);
}

#[test]
fn test_open_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("org.csv");
    std::fs::write(&input, "Name,Path\nNala,DIS\n").unwrap();

    let err = HierarchyTable::open(&input, &LoadOptions::default()).unwrap_err();
    assert_eq!(err, Error::MissingColumn("Org_String_Abbrev".into()));
}

#[test]
fn test_unsupported_formats() {
    assert!(HierarchyTable::open("org.ods", &LoadOptions::default()).is_err());

    let table = HierarchyTable::from_records(
        vec!["Org_String_Abbrev".into()],
        vec![],
        &HierarchyOptions::default(),
    )
    .unwrap();
    assert!(table.export_rows(&[], "out.json").is_err());
}
