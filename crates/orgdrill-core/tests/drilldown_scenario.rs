//! End-to-end walk through a small organization table

use orgdrill_core::{ActivePath, Error, HierarchyOptions, HierarchyTable, Navigator};
use pretty_assertions::assert_eq;

fn disney() -> HierarchyTable {
    HierarchyTable::from_records(
        vec!["Character_Name".into(), "Org_String_Abbrev".into()],
        vec![
            vec!["Mickey Mouse".into(), "DIS/MMF/MC".into()],
            vec!["Sulley".into(), "DIS/MI/MC".into()],
            vec!["Simba".into(), "DIS/TLK/MC".into()],
        ],
        &HierarchyOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_drill_down_to_exact_row() {
    let table = disney();
    let nav = Navigator::new(&table);
    let mut path = ActivePath::new();

    nav.select_root(&mut path, "DIS").unwrap();
    assert_eq!(nav.compute_children(&path), vec!["MI", "MMF", "TLK"]);
    assert!(nav.compute_exact_matches(&path).is_empty());

    nav.select_child(&mut path, "MMF").unwrap();
    assert_eq!(path.labels(), &["DIS", "MMF"]);
    assert_eq!(nav.compute_children(&path), vec!["MC"]);
    assert!(nav.compute_exact_matches(&path).is_empty());

    nav.select_child(&mut path, "MC").unwrap();
    assert_eq!(path.labels(), &["DIS", "MMF", "MC"]);
    assert!(nav.compute_children(&path).is_empty());

    let exact = nav.compute_exact_matches(&path);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].cells(), &["Mickey Mouse", "DIS/MMF/MC"]);
}

#[test]
fn test_breadcrumb_jump_back() {
    let table = disney();
    let nav = Navigator::new(&table);
    let mut path = ActivePath::new();

    nav.select_root(&mut path, "DIS").unwrap();
    nav.select_child(&mut path, "TLK").unwrap();
    nav.select_child(&mut path, "MC").unwrap();

    nav.select_ancestor(&mut path, 0).unwrap();
    assert_eq!(path.labels(), &["DIS"]);
    assert_eq!(nav.compute_children(&path), vec!["MI", "MMF", "TLK"]);
}

#[test]
fn test_reload_leaves_stale_path_empty() {
    let before = disney();
    let mut path = ActivePath::new();
    {
        let nav = Navigator::new(&before);
        nav.select_root(&mut path, "DIS").unwrap();
        nav.select_child(&mut path, "TLK").unwrap();
    }

    let after = HierarchyTable::from_records(
        vec!["Character_Name".into(), "Org_String_Abbrev".into()],
        vec![vec!["Mickey Mouse".into(), "DIS/MMF/MC".into()]],
        &HierarchyOptions::default(),
    )
    .unwrap();
    let nav = Navigator::new(&after);

    assert!(nav.compute_children(&path).is_empty());
    assert!(nav.compute_exact_matches(&path).is_empty());
    assert!(matches!(
        nav.select_child(&mut path, "MC"),
        Err(Error::UnknownLabel { level: 3, .. })
    ));
    assert_eq!(path.labels(), &["DIS", "TLK"]);

    // Only an explicit reset abandons the path
    nav.reset(&mut path);
    assert_eq!(nav.compute_children(&path), vec!["DIS"]);
}

#[test]
fn test_table_is_shareable_across_sessions() {
    let table = std::sync::Arc::new(disney());

    let handles: Vec<_> = ["MI", "TLK"]
        .into_iter()
        .map(|child| {
            let table = table.clone();
            std::thread::spawn(move || {
                let nav = Navigator::new(&table);
                let mut path = ActivePath::new();
                nav.select_root(&mut path, "DIS").unwrap();
                nav.select_child(&mut path, child).unwrap();
                path
            })
        })
        .collect();

    let paths: Vec<ActivePath> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(paths[0].labels(), &["DIS", "MI"]);
    assert_eq!(paths[1].labels(), &["DIS", "TLK"]);
}
