use thiserror::Error;

/// Precondition failures at the layout entry point.
///
/// Everything past the entry point degrades gracefully with a warning; these
/// are the only conditions that abort a layout pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The tree has no root node at all.
    #[error("document tree has no root node")]
    MissingDocument,
    /// The root node exists but is not a Document node.
    #[error("root node is not a document")]
    NotADocument,
}

/// Selector text the simple selector engine cannot represent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector (or one entry of a selector list) is empty.
    #[error("empty selector")]
    Empty,
    /// A character outside the supported compound-selector grammar.
    #[error("unsupported character {found:?} in selector {selector:?}")]
    Unsupported {
        /// The full selector text.
        selector: String,
        /// The offending character.
        found: char,
    },
    /// A `.` or `#` with no name after it.
    #[error("missing name after {sigil:?} in selector {selector:?}")]
    MissingName {
        /// The full selector text.
        selector: String,
        /// The `.` or `#` that was not followed by a name.
        sigil: char,
    },
}
