//! Intrinsic sizes of replaced content and form controls.
//!
//! [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
//!
//! Text runs, images, and form controls have a natural size that does not
//! come from their children. Layout uses it in place of `auto` width and as
//! the default content height.

use std::collections::HashMap;

use serde::Serialize;
use strum_macros::{Display, EnumString};
use wisp_dom::{DomTree, ElementData, NodeId};

use crate::config::LayoutConfig;

use super::box_model::Size;
use super::inline::TextMeasurer;
use super::layout_box::{BoxNode, LayoutContext};

/// Image size lookup supplied by the embedder.
///
/// Returns `None` when the image is unknown or not yet loaded.
pub trait ImageSizes {
    /// Natural size of the image at `url`.
    fn image_size(&self, url: &str) -> Option<Size>;
}

impl<F> ImageSizes for F
where
    F: Fn(&str) -> Option<Size>,
{
    fn image_size(&self, url: &str) -> Option<Size> {
        self(url)
    }
}

/// An image source that knows no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSizes for NoImages {
    fn image_size(&self, _url: &str) -> Option<Size> {
        None
    }
}

/// A fixed URL to size table.
#[derive(Debug, Clone, Default)]
pub struct ImageTable(pub HashMap<String, Size>);

impl ImageSizes for ImageTable {
    fn image_size(&self, url: &str) -> Option<Size> {
        self.0.get(url).copied()
    }
}

/// The `type` attribute values of `<input>` that are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InputType {
    /// Single-line text field. Also the missing-attribute default.
    Text,
    /// Submit button.
    Submit,
    /// Not rendered.
    Hidden,
}

impl InputType {
    /// The input type of `element`. A missing `type` is [`InputType::Text`];
    /// an unrecognised one is `None`.
    #[must_use]
    pub fn of(element: &ElementData) -> Option<Self> {
        element
            .attr("type")
            .map_or(Some(Self::Text), |value| value.trim().parse().ok())
    }
}

/// One entry of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value. Defaults to the label.
    pub value: String,
    /// Displayed text.
    pub label: String,
    /// Whether the option carries the `selected` attribute.
    pub selected: bool,
}

/// Options of the select element `select`, from direct `<option>` children
/// and options nested one level inside `<optgroup>`. Options with a blank
/// label are skipped.
#[must_use]
pub fn select_options(tree: &DomTree, select: NodeId) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for &child in tree.children(select) {
        match tree.as_element(child) {
            Some(element) if element.is("option") => push_option(tree, child, &mut options),
            Some(element) if element.is("optgroup") => {
                for &grandchild in tree.children(child) {
                    if tree.as_element(grandchild).is_some_and(|e| e.is("option")) {
                        push_option(tree, grandchild, &mut options);
                    }
                }
            }
            _ => {}
        }
    }
    options
}

fn push_option(tree: &DomTree, option: NodeId, options: &mut Vec<SelectOption>) {
    let label = tree.text_content(option);
    if label.is_empty() {
        return;
    }
    let element = tree.as_element(option);
    options.push(SelectOption {
        value: element
            .and_then(|e| e.attr("value"))
            .map_or_else(|| label.clone(), str::to_string),
        selected: element.is_some_and(|e| e.attr("selected").is_some()),
        label,
    });
}

/// Width of the widest option label plus the drop-down arrow.
#[must_use]
pub fn select_min_width(
    options: &[SelectOption],
    measurer: &dyn TextMeasurer,
    config: &LayoutConfig,
) -> i32 {
    options
        .iter()
        .map(|o| measurer.measure_text(&o.label, config.base_font_size).width)
        .max()
        .unwrap_or(0)
        + config.select_arrow_width
}

/// The natural size of `node`, if it has one.
pub(crate) fn intrinsic_size(ctx: &LayoutContext<'_>, node: &BoxNode) -> Option<Size> {
    let config = ctx.config;
    let id = match node {
        BoxNode::TextRun { text, .. } => {
            return Some(ctx.measurer.measure_text(text, config.base_font_size));
        }
        BoxNode::AnonymousCell => return None,
        BoxNode::Node(id) => *id,
    };
    let element = ctx.tree.as_element(id)?;
    let line_height = ctx.measurer.measure_text("x", config.base_font_size).height;

    match element.tag_name.as_str() {
        "img" => {
            let attr_px = |name| {
                element
                    .attr(name)
                    .and_then(|v| v.trim().trim_end_matches("px").parse::<f32>().ok())
                    .map(|px| config.scale_px(px))
            };
            let natural = || element.attr("src").and_then(|src| ctx.images.image_size(src));
            let width = attr_px("width").or_else(|| natural().map(|s| s.width))?;
            let height = attr_px("height").or_else(|| natural().map(|s| s.height))?;
            Some(Size::new(width, height))
        }
        "input" => match InputType::of(element)? {
            InputType::Text => {
                let chars = element
                    .attr("size")
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(config.text_field_size);
                let width = ctx
                    .measurer
                    .measure_text(&"x".repeat(chars), config.base_font_size)
                    .width;
                Some(Size::new(width, line_height))
            }
            InputType::Submit => {
                let label = element.attr("value").unwrap_or("Submit");
                Some(ctx.measurer.measure_text(label, config.base_font_size))
            }
            InputType::Hidden => None,
        },
        "select" => {
            let options = select_options(ctx.tree, id);
            Some(Size::new(
                select_min_width(&options, ctx.measurer, config),
                line_height,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type() {
        let input = ElementData::new("input");
        assert_eq!(InputType::of(&input), Some(InputType::Text));
        let input = input.with_attr("type", "SUBMIT");
        assert_eq!(InputType::of(&input), Some(InputType::Submit));
        let input = ElementData::new("input").with_attr("type", "checkbox");
        assert_eq!(InputType::of(&input), None);
    }

    #[test]
    fn test_select_options() {
        let mut tree = DomTree::new();
        let select = tree.append_element(tree.root(), ElementData::new("select"));
        let a = tree.append_element(select, ElementData::new("option").with_attr("value", "a"));
        let _ = tree.append_text(a, "Apple");
        let _ = tree.append_element(select, ElementData::new("option"));
        let group = tree.append_element(select, ElementData::new("optgroup"));
        let b = tree.append_element(group, ElementData::new("option").with_attr("selected", ""));
        let _ = tree.append_text(b, " Banana ");

        let options = select_options(&tree, select);
        assert_eq!(
            options,
            vec![
                SelectOption {
                    value: "a".to_string(),
                    label: "Apple".to_string(),
                    selected: false,
                },
                SelectOption {
                    value: "Banana".to_string(),
                    label: "Banana".to_string(),
                    selected: true,
                },
            ]
        );

        let measure = |text: &str, _: i32| Size::new(10 * text.len() as i32, 10);
        assert_eq!(
            select_min_width(&options, &measure, &LayoutConfig::default()),
            60 + 16
        );
    }
}
