use std::collections::HashSet;

use log::debug;

use crate::model::{Edge, GraphModel, NodeId, ROOT_ID};

/// Whether [`VisibilityEngine::toggle_children`] revealed or hid nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Direct children were shown, one level only.
    Expanded,
    /// The whole descendant subtree was hidden.
    Collapsed,
}

/// Set of hidden node ids and the whole-set operations that change it.
///
/// Visibility is a flag per id. A visible node may have hidden ancestors:
/// nothing here infers visibility from the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct VisibilityEngine {
    hidden: HashSet<NodeId>,
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden(&self) -> &HashSet<NodeId> {
        &self.hidden
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    /// Visible nodes in model order.
    pub fn visible_nodes(&self, model: &GraphModel) -> Vec<NodeId> {
        model
            .nodes()
            .filter(|n| !self.is_hidden(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Edges whose both endpoints are visible.
    pub fn visible_edges<'m>(&self, model: &'m GraphModel) -> Vec<&'m Edge> {
        model
            .edges()
            .filter(|e| !self.is_hidden(&e.source) && !self.is_hidden(&e.target))
            .collect()
    }

    /// Shows every node.
    pub fn expand_all(&mut self) {
        self.hidden.clear();
        debug!("expand all");
    }

    /// Hides every node except the root.
    pub fn collapse_all(&mut self, model: &GraphModel) {
        self.hidden = model.nodes().map(|n| n.id.clone()).collect();
        self.hidden.remove(ROOT_ID);
        debug!("collapse all: {} hidden", self.hidden.len());
    }

    /// Flips the children of `id`, keyed on the state of its first direct child.
    ///
    /// A hidden first child shows every direct child and nothing deeper. A
    /// visible first child hides the entire descendant subtree. Returns `None`
    /// when `id` has no children.
    pub fn toggle_children(&mut self, model: &GraphModel, id: &str) -> Option<Toggle> {
        let children = model.children_of(id);
        let first = children.first()?;

        if self.is_hidden(first) {
            for child in children {
                self.hidden.remove(child);
            }
            debug!("expanded {} children of `{id}`", children.len());
            Some(Toggle::Expanded)
        } else {
            let descendants = model.descendants(id);
            debug!("collapsed {} descendants of `{id}`", descendants.len());
            self.hidden.extend(descendants);
            Some(Toggle::Collapsed)
        }
    }

    /// Restricts visibility to the hierarchy closure of `selected`, itself included.
    ///
    /// No-op returning `false` when nothing is selected.
    pub fn drill_down(&mut self, model: &GraphModel, selected: Option<&str>) -> bool {
        let Some(selected) = selected else {
            return false;
        };

        let keep: HashSet<NodeId> = model.subtree(selected).into_iter().collect();
        self.hidden = model
            .nodes()
            .filter(|n| !keep.contains(&n.id))
            .map(|n| n.id.clone())
            .collect();
        debug!("drill down into `{selected}`: {} visible", keep.len());
        true
    }

    /// Restores full visibility. Same as [`Self::expand_all`].
    pub fn drill_up(&mut self) {
        self.expand_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::sample_model;

    fn hidden_sorted(v: &VisibilityEngine) -> Vec<&str> {
        let mut out: Vec<&str> = v.hidden().iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_expand_all_clears() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        v.collapse_all(&m);
        v.expand_all();
        assert!(v.hidden().is_empty());
        assert_eq!(v.visible_nodes(&m), ["root", "A", "B", "A1"]);
    }

    #[test]
    fn test_collapse_all_keeps_root() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        v.collapse_all(&m);
        assert_eq!(hidden_sorted(&v), ["A", "A1", "B"]);
        assert!(!v.is_hidden("root"));
        assert_eq!(v.visible_nodes(&m), ["root"]);
        assert!(v.visible_edges(&m).is_empty());
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        assert_eq!(v.toggle_children(&m, "B"), None);
        assert_eq!(v.toggle_children(&m, "missing"), None);
        assert!(v.hidden().is_empty());
    }

    #[test]
    fn test_toggle_collapse_recurses_expand_does_not() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();

        assert_eq!(v.toggle_children(&m, "root"), Some(Toggle::Collapsed));
        assert_eq!(hidden_sorted(&v), ["A", "A1", "B"]);

        assert_eq!(v.toggle_children(&m, "root"), Some(Toggle::Expanded));
        assert_eq!(hidden_sorted(&v), ["A1"]);
        assert_eq!(v.visible_nodes(&m), ["root", "A", "B"]);

        assert_eq!(v.toggle_children(&m, "A"), Some(Toggle::Expanded));
        assert!(v.hidden().is_empty());

        assert_eq!(v.toggle_children(&m, "A"), Some(Toggle::Collapsed));
        assert_eq!(hidden_sorted(&v), ["A1"]);
    }

    #[test]
    fn test_toggle_twice_is_asymmetric() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        v.collapse_all(&m);

        // expand root, then open A so the whole tree is visible
        v.toggle_children(&m, "root");
        v.toggle_children(&m, "A");
        assert!(v.hidden().is_empty());

        // collapse + expand does not bring A1 back
        v.toggle_children(&m, "root");
        v.toggle_children(&m, "root");
        assert_eq!(hidden_sorted(&v), ["A1"]);
    }

    #[test]
    fn test_toggle_keys_on_first_child_only() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        v.collapse_all(&m);
        v.toggle_children(&m, "root");
        // A visible, B hidden by hand: first child decides, so this collapses
        v.hidden.insert("B".to_string());
        assert_eq!(v.toggle_children(&m, "root"), Some(Toggle::Collapsed));
        assert_eq!(hidden_sorted(&v), ["A", "A1", "B"]);
    }

    #[test]
    fn test_drill_down() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        assert!(v.drill_down(&m, Some("A")));
        assert_eq!(v.visible_nodes(&m), ["A", "A1"]);
        assert_eq!(hidden_sorted(&v), ["B", "root"]);
        assert_eq!(v.visible_edges(&m).len(), 1);
    }

    #[test]
    fn test_drill_down_without_selection() {
        let m = sample_model();
        let mut v = VisibilityEngine::new();
        v.collapse_all(&m);
        assert!(!v.drill_down(&m, None));
        assert_eq!(hidden_sorted(&v), ["A", "A1", "B"]);
    }

    #[test]
    fn test_drill_up_restores_everything() {
        let m = sample_model();
        for id in ["root", "A", "B", "A1"] {
            let mut v = VisibilityEngine::new();
            v.drill_down(&m, Some(id));
            v.drill_up();
            assert!(v.hidden().is_empty(), "drilled into {id}");
        }
    }
}
