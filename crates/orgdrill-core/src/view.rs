//! Render model for one navigation step

use crate::hierarchy::HierarchyRow;
use crate::navigator::{NavAction, NodeView};
use crate::path::ActivePath;

/// Where a button sits in the rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    /// Breadcrumb entry for a selected level
    Ancestor,
    /// Selectable label one level below the current node
    Child,
}

impl ButtonRole {
    fn key_prefix(self) -> &'static str {
        match self {
            ButtonRole::Ancestor => "ancestor",
            ButtonRole::Child => "child",
        }
    }
}

/// A clickable label and the action a click performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    /// Stable widget key, unique within one view
    pub key: String,
    pub role: ButtonRole,
    pub action: NavAction,
}

impl NavButton {
    /// Key format: `{role}_L{depth}_{labels joined by '_'}`, where `parent`
    /// is the path above the button and `label` the button's own label.
    fn new(role: ButtonRole, parent: &[String], label: &str, action: NavAction) -> Self {
        let mut parts: Vec<&str> = parent.iter().map(String::as_str).collect();
        parts.push(label);
        let key = format!("{}_L{}_{}", role.key_prefix(), parent.len(), parts.join("_"));
        Self {
            label: label.to_string(),
            key,
            role,
            action,
        }
    }
}

/// Everything one render cycle shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView<'t> {
    /// One button per selected level, root first
    pub ancestors: Vec<NavButton>,
    /// Root labels when nothing is selected, otherwise children of the current node
    pub children: Vec<NavButton>,
    /// Deepest selected label
    pub current: Option<String>,
    /// Exact-match rows of the current node; empty when nothing is selected
    pub exact_rows: Vec<&'t HierarchyRow>,
}

impl<'t> NavView<'t> {
    pub(crate) fn build(path: &ActivePath, node: NodeView<'t>) -> Self {
        let labels = path.labels();

        let ancestors = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                NavButton::new(
                    ButtonRole::Ancestor,
                    &labels[..i],
                    label,
                    NavAction::SelectAncestor(i),
                )
            })
            .collect();

        let children = node
            .children
            .iter()
            .map(|child| {
                let action = if path.is_empty() {
                    NavAction::SelectRoot(child.to_string())
                } else {
                    NavAction::SelectChild(child.to_string())
                };
                NavButton::new(ButtonRole::Child, labels, child, action)
            })
            .collect();

        let exact_rows = if path.is_empty() {
            Vec::new()
        } else {
            node.exact_rows
        };

        Self {
            ancestors,
            children,
            current: path.current().map(str::to_string),
            exact_rows,
        }
    }

    /// Find the button with a given key
    pub fn button(&self, key: &str) -> Option<&NavButton> {
        self.ancestors
            .iter()
            .chain(self.children.iter())
            .find(|b| b.key == key)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ActivePath, HierarchyOptions, HierarchyTable, NavAction, Navigator};
    use pretty_assertions::assert_eq;

    fn table() -> HierarchyTable {
        HierarchyTable::from_records(
            vec!["Character_Name".into(), "Org_String_Abbrev".into()],
            vec![
                vec!["Mickey Mouse".into(), "DIS/MMF/MC".into()],
                vec!["Sulley".into(), "DIS/MI/MC".into()],
                vec!["Studio".into(), "DIS/MI".into()],
            ],
            &HierarchyOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_path_shows_roots_only() {
        let t = table();
        let view = Navigator::new(&t).view(&ActivePath::new());

        assert!(view.ancestors.is_empty());
        assert!(view.exact_rows.is_empty());
        assert_eq!(view.current, None);
        assert_eq!(view.children.len(), 1);
        assert_eq!(view.children[0].key, "child_L0_DIS");
        assert_eq!(view.children[0].action, NavAction::SelectRoot("DIS".into()));
    }

    #[test]
    fn test_keys_and_actions() {
        let t = table();
        let view = Navigator::new(&t).view(&ActivePath::from_labels(["DIS", "MI"]));

        let keys: Vec<&str> = view.ancestors.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["ancestor_L0_DIS", "ancestor_L1_DIS_MI"]);
        assert_eq!(view.ancestors[1].action, NavAction::SelectAncestor(1));

        assert_eq!(view.children.len(), 1);
        assert_eq!(view.children[0].key, "child_L2_DIS_MI_MC");
        assert_eq!(view.children[0].action, NavAction::SelectChild("MC".into()));

        assert_eq!(view.current.as_deref(), Some("MI"));
        assert_eq!(view.exact_rows.len(), 1);
        assert_eq!(view.exact_rows[0].cells()[0], "Studio");

        assert!(view.button("child_L2_DIS_MI_MC").is_some());
        assert!(view.button("child_L0_DIS").is_none());
    }
}
