use serde::Serialize;
use strum_macros::{Display, EnumString};

/// How a box participates in layout.
///
/// `inline` is accepted as a synonym for `inline-block`; the engine has no
/// separate inline formatting for non-atomic inline boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DisplayMode {
    /// No usable value; falls back to the node's default.
    #[strum(to_string = "undefined")]
    Undefined,
    /// Stacks vertically and fills the container width.
    #[strum(to_string = "block")]
    Block,
    /// Flows horizontally within line boxes.
    #[strum(to_string = "inline-block", serialize = "inline")]
    InlineBlock,
    /// Row and column layout.
    #[strum(to_string = "table")]
    Table,
    /// Generates no box.
    #[strum(to_string = "none")]
    None,
}

impl DisplayMode {
    /// Parse a `display` declaration value. Unrecognised values become
    /// [`DisplayMode::Undefined`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value.trim().parse().unwrap_or(Self::Undefined)
    }

    /// Block-level boxes force a line break before and after themselves.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(self, Self::Block | Self::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_values() {
        assert_eq!(DisplayMode::parse("block"), DisplayMode::Block);
        assert_eq!(DisplayMode::parse("Inline"), DisplayMode::InlineBlock);
        assert_eq!(DisplayMode::parse("inline-block"), DisplayMode::InlineBlock);
        assert_eq!(DisplayMode::parse("none"), DisplayMode::None);
        assert_eq!(DisplayMode::parse("flex"), DisplayMode::Undefined);
    }

    #[test]
    fn test_display_to_string() {
        assert_eq!(DisplayMode::InlineBlock.to_string(), "inline-block");
    }
}
