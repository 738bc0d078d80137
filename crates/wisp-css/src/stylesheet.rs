//! The stylesheet collaborator interface.
//!
//! The layout engine never parses CSS text itself. It asks each stylesheet
//! for the declarations that apply to a node, in cascade order, and merges
//! the answers. Two implementations ship with the crate: [`RuleSheet`] for
//! selector rules and [`StyleAttributeSheet`] for inline `style` attributes.

use serde::{Deserialize, Serialize};
use wisp_common::warning::warn_once;
use wisp_dom::{DomTree, NodeId};

use crate::selector::SelectorList;

/// A single `property: value` pair.
///
/// Serialized as a two-element array so rule sheets stay compact in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Declaration {
    /// Property name, lowercased.
    pub property: String,
    /// Raw value text.
    pub value: String,
}

impl Declaration {
    /// Create a declaration, normalising the property name.
    #[must_use]
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.trim().to_ascii_lowercase(),
            value: value.trim().to_string(),
        }
    }
}

impl From<(String, String)> for Declaration {
    fn from((property, value): (String, String)) -> Self {
        Self::new(&property, &value)
    }
}

impl From<Declaration> for (String, String) {
    fn from(declaration: Declaration) -> Self {
        (declaration.property, declaration.value)
    }
}

/// Source of declarations for DOM nodes.
///
/// Implementations return the declarations matching `node` ordered from
/// lowest to highest precedence. When several stylesheets are consulted,
/// later stylesheets take precedence over earlier ones.
pub trait Stylesheet {
    /// Declarations applying to `node`, lowest precedence first.
    fn matching_declarations(&self, tree: &DomTree, node: NodeId) -> Vec<Declaration>;
}

/// One selector rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleRule {
    /// The selectors this rule applies to.
    pub selectors: SelectorList,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// An ordered list of selector rules.
///
/// Matching rules are stably sorted by specificity, so among rules of equal
/// specificity the later one wins.
///
/// ```
/// use wisp_css::RuleSheet;
///
/// let sheet = RuleSheet::new()
///     .rule("p", &[("margin", "4px")])
///     .rule(".wide", &[("width", "100%")]);
/// assert_eq!(sheet.rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleSheet {
    /// Rules in source order.
    pub rules: Vec<StyleRule>,
}

impl RuleSheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule append. A selector that fails to parse is reported
    /// and the rule is skipped.
    #[must_use]
    pub fn rule(mut self, selectors: &str, declarations: &[(&str, &str)]) -> Self {
        match SelectorList::parse(selectors) {
            Ok(selectors) => self.rules.push(StyleRule {
                selectors,
                declarations: declarations
                    .iter()
                    .map(|(property, value)| Declaration::new(property, value))
                    .collect(),
            }),
            Err(err) => {
                let _ = warn_once("CSS", &format!("skipping rule: {err}"));
            }
        }
        self
    }
}

impl Stylesheet for RuleSheet {
    fn matching_declarations(&self, tree: &DomTree, node: NodeId) -> Vec<Declaration> {
        let Some(element) = tree.as_element(node) else {
            return Vec::new();
        };

        let mut matched: Vec<_> = self
            .rules
            .iter()
            .filter_map(|rule| rule.selectors.matches(element).map(|spec| (spec, rule)))
            .collect();
        // sort_by_key is stable: source order breaks ties
        matched.sort_by_key(|(spec, _)| *spec);

        matched
            .into_iter()
            .flat_map(|(_, rule)| rule.declarations.iter().cloned())
            .collect()
    }
}

/// Declarations from each element's `style` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleAttributeSheet;

impl Stylesheet for StyleAttributeSheet {
    fn matching_declarations(&self, tree: &DomTree, node: NodeId) -> Vec<Declaration> {
        tree.as_element(node)
            .and_then(|element| element.attr("style"))
            .map(parse_declaration_block)
            .unwrap_or_default()
    }
}

/// Parse `prop: value; prop: value` text. Entries without a colon or with an
/// empty name are skipped.
#[must_use]
pub fn parse_declaration_block(text: &str) -> Vec<Declaration> {
    text.split(';')
        .filter_map(|entry| {
            let (property, value) = entry.split_once(':')?;
            if property.trim().is_empty() {
                return None;
            }
            Some(Declaration::new(property, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration_block() {
        let declarations = parse_declaration_block(" Width: 10px;color:red;; junk ; :x");
        assert_eq!(
            declarations,
            vec![Declaration::new("width", "10px"), Declaration::new("color", "red")]
        );
    }

    #[test]
    fn test_declaration_json_shape() {
        let declaration: Declaration = serde_json::from_str(r#"["MARGIN", " 0 auto "]"#).unwrap();
        assert_eq!(declaration, Declaration::new("margin", "0 auto"));
    }
}
