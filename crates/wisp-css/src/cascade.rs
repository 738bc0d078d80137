//! Per-node declaration merge.
//!
//! [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! A node's cascaded declarations are the inherited subset of its parent's,
//! followed by every stylesheet's matches in stylesheet order. Lookups take
//! the last declaration for a property, so later stylesheets win and a
//! node's own declarations shadow inherited ones.

use wisp_dom::{DomTree, NodeId};

use crate::style::BoxStyle;
use crate::stylesheet::{Declaration, Stylesheet};

/// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// Properties that propagate from parent to child.
pub const INHERITED_PROPERTIES: &[&str] = &["color"];

/// The ordered declarations that apply to one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadedStyle {
    declarations: Vec<Declaration>,
}

impl CascadedStyle {
    /// Wrap an already-ordered declaration list.
    #[must_use]
    pub const fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    /// The winning value for `property`, if any declaration sets it.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property.eq_ignore_ascii_case(property))
            .map(|d| d.value.as_str())
    }

    /// All declarations, lowest precedence first.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// The subset handed down to children.
    #[must_use]
    pub fn inherited(&self) -> Vec<Declaration> {
        self.declarations
            .iter()
            .filter(|d| INHERITED_PROPERTIES.contains(&d.property.as_str()))
            .cloned()
            .collect()
    }

    /// Typed view of the box-relevant properties.
    #[must_use]
    pub fn box_style(&self) -> BoxStyle {
        BoxStyle::from_declarations(&self.declarations)
    }
}

/// Cascade the declarations for `node` given its parent's cascaded style.
///
/// Pass `CascadedStyle::default()` as `parent` for the root.
#[must_use]
pub fn cascade(
    stylesheets: &[Box<dyn Stylesheet>],
    tree: &DomTree,
    node: NodeId,
    parent: &CascadedStyle,
) -> CascadedStyle {
    let mut declarations = parent.inherited();
    for sheet in stylesheets {
        declarations.extend(sheet.matching_declarations(tree, node));
    }
    CascadedStyle::new(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_declaration_wins() {
        let style = CascadedStyle::new(vec![
            Declaration::new("color", "red"),
            Declaration::new("width", "10px"),
            Declaration::new("color", "blue"),
        ]);
        assert_eq!(style.get("COLOR"), Some("blue"));
        assert_eq!(style.get("height"), None);
    }

    #[test]
    fn test_only_whitelisted_properties_inherit() {
        let style = CascadedStyle::new(vec![
            Declaration::new("color", "red"),
            Declaration::new("margin", "4px"),
        ]);
        assert_eq!(style.inherited(), vec![Declaration::new("color", "red")]);
    }
}
