//! Simple selector parsing and matching.
//!
//! Supports compound selectors built from a type selector (or `*`), `#id`,
//! and any number of `.class` components, and comma-separated lists of them.
//! Combinators, attribute selectors, and pseudo-classes are rejected.

use std::fmt;

use serde::Deserialize;
use wisp_dom::ElementData;

use crate::error::SelectorError;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// "Specificities are compared by comparing the three components in order."
///
/// Components are (ids, classes, types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A single compound selector such as `div.note#intro`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Lowercased type selector, if any.
    pub tag: Option<String>,
    /// ID selector, if any.
    pub id: Option<String>,
    /// Class selectors; all must be present on the element.
    pub classes: Vec<String>,
    /// Whether the selector was written with `*`.
    pub universal: bool,
}

impl CompoundSelector {
    /// Parse one compound selector.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] for empty input, missing names after `.` or
    /// `#`, or any character outside the supported grammar.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Self::default();
        let mut chars = text.chars().peekable();

        if chars.peek() == Some(&'*') {
            let _ = chars.next();
            selector.universal = true;
        } else {
            let tag = take_name(&mut chars);
            if !tag.is_empty() {
                selector.tag = Some(tag.to_ascii_lowercase());
            }
        }

        while let Some(c) = chars.next() {
            match c {
                '.' | '#' => {
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName {
                            selector: text.to_string(),
                            sigil: c,
                        });
                    }
                    if c == '.' {
                        selector.classes.push(name);
                    } else {
                        selector.id = Some(name);
                    }
                }
                found => {
                    return Err(SelectorError::Unsupported {
                        selector: text.to_string(),
                        found,
                    });
                }
            }
        }

        Ok(selector)
    }

    /// Specificity of this compound selector. `*` contributes nothing.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        Specificity(
            u32::from(self.id.is_some()),
            self.classes.len() as u32,
            u32::from(self.tag.is_some()),
        )
    }

    /// Whether every component matches the element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != element.tag_name) {
            return false;
        }
        if self
            .id
            .as_deref()
            .is_some_and(|id| element.id() != Some(id))
        {
            return false;
        }
        let classes: Vec<&str> = element.classes().collect();
        self.classes.iter().all(|c| classes.contains(&c.as_str()))
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.universal {
            write!(f, "*")?;
        }
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// A comma-separated list of compound selectors.
///
/// Deserializes from a plain selector string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SelectorList(Vec<CompoundSelector>);

impl SelectorList {
    /// Parse a selector list such as `h1, .title`.
    ///
    /// # Errors
    ///
    /// Fails if any entry of the list fails to parse.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        text.split(',')
            .map(CompoundSelector::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The selectors in source order.
    #[must_use]
    pub fn selectors(&self) -> &[CompoundSelector] {
        &self.0
    }

    /// The highest specificity among the entries that match, or `None` if
    /// nothing matches.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> Option<Specificity> {
        self.0
            .iter()
            .filter(|selector| selector.matches(element))
            .map(CompoundSelector::specificity)
            .max()
    }
}

impl TryFrom<String> for SelectorList {
    type Error = SelectorError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            let _ = chars.next();
        } else {
            break;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let selector = CompoundSelector::parse("DIV.note.wide#intro").unwrap();
        assert_eq!(selector.tag.as_deref(), Some("div"));
        assert_eq!(selector.id.as_deref(), Some("intro"));
        assert_eq!(selector.classes, vec!["note", "wide"]);
        assert_eq!(selector.specificity(), Specificity(1, 2, 1));
        assert_eq!(selector.to_string(), "div#intro.note.wide");
    }

    #[test]
    fn test_rejects_combinators() {
        assert_eq!(
            CompoundSelector::parse("div p"),
            Err(SelectorError::Unsupported {
                selector: "div p".to_string(),
                found: ' ',
            })
        );
        assert!(matches!(
            CompoundSelector::parse("a."),
            Err(SelectorError::MissingName { sigil: '.', .. })
        ));
        assert_eq!(SelectorList::parse("p,"), Err(SelectorError::Empty));
    }

    #[test]
    fn test_list_matches_highest_specificity() {
        let list = SelectorList::parse("p, .lead, *").unwrap();
        let element = ElementData::new("p").with_attr("class", "lead big");
        assert_eq!(list.matches(&element), Some(Specificity(0, 1, 0)));
        assert_eq!(
            SelectorList::parse("span").unwrap().matches(&element),
            None
        );
    }
}
