//! The element generator.
//!
//! Lays a document out, then walks the box tree in pre-order and emits one
//! [`Element`] per text line, control, image, and form. The cascade is
//! applied again during the walk so inherited `color` follows the box tree.

use std::collections::BTreeMap;

use tracing::debug;
use wisp_common::warning::{clear_warnings, warn_once};
use wisp_css::{
    BoxNode, CascadedStyle, ColorValue, ImageSizes, InputType, LayoutBox, LayoutConfig,
    LayoutContext, Rect, Size, Stylesheet, TextMeasurer, cascade, layout_document,
    select_min_width, select_options,
};
use wisp_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::element::{Element, ElementId, ElementKind, ImageId, LinkId};
use crate::error::{GenerateError, next_id};
use crate::images::{ImageRegistry, ImageRequest};

/// Tags handled without a warning. Anything else is laid out as usual but
/// reported once.
const SUPPORTED_TAGS: &[&str] = &[
    "html", "body", "div", "p", "span", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "a",
    "b", "i", "u", "em", "strong", "font", "center", "code", "small", "label", "pre",
    "blockquote", "ul", "ol", "li", "section", "article", "header", "footer", "nav", "main",
    "table", "thead", "tbody", "tfoot", "tr", "td", "th", "form", "input", "button", "select",
    "img",
];

/// Cleanup owed after a node's children have been visited.
enum AfterVisit {
    Nothing,
    PopForm,
    PopLink,
}

/// Mutable state of one generation pass.
#[derive(Debug, Default)]
struct GenerationState {
    elements: Vec<Element>,
    last_element_id: u32,
    last_link_id: u32,
    open_forms: Vec<ElementId>,
    open_links: Vec<LinkId>,
    links: BTreeMap<LinkId, String>,
    images: ImageRegistry,
    overflow: Size,
    layout_root: Option<LayoutBox>,
}

/// Produces the element list for a document.
///
/// A generator owns its stylesheets, viewport, and configuration, and keeps
/// the results of the most recent pass. It is not re-entrant: one pass at a
/// time per instance.
///
/// ```
/// use wisp_browser::Generator;
/// use wisp_css::{ApproximateFontMetrics, LayoutConfig, NoImages, Rect};
/// use wisp_dom::DomTree;
///
/// let mut tree = DomTree::new();
/// let _ = tree.append_text(tree.root(), "hello");
///
/// let mut generator = Generator::new(Vec::new(), Rect::new(0, 0, 320, 240), LayoutConfig::default());
/// let elements = generator
///     .generate_layout(&tree, &ApproximateFontMetrics, &NoImages)
///     .unwrap();
/// assert_eq!(elements.len(), 1);
/// ```
pub struct Generator {
    stylesheets: Vec<Box<dyn Stylesheet>>,
    viewport: Rect,
    config: LayoutConfig,
    state: GenerationState,
}

impl Generator {
    /// Create a generator. `stylesheets` are in increasing precedence.
    #[must_use]
    pub fn new(stylesheets: Vec<Box<dyn Stylesheet>>, viewport: Rect, config: LayoutConfig) -> Self {
        Self {
            stylesheets,
            viewport,
            config,
            state: GenerationState::default(),
        }
    }

    /// Discard the results of the previous pass and restart all counters.
    ///
    /// Also forgets which warnings were reported, so each pass reports its
    /// own input problems once.
    pub fn reset(&mut self) {
        self.state = GenerationState::default();
        clear_warnings();
    }

    /// Lay out `tree` and generate its elements.
    ///
    /// Resets first, so repeated calls on the same input produce identical
    /// output with identifiers starting at 1.
    ///
    /// # Errors
    ///
    /// Fails when the tree has no document root or an identifier counter
    /// overflows. The generator is left reset on failure.
    pub fn generate_layout(
        &mut self,
        tree: &DomTree,
        measurer: &dyn TextMeasurer,
        images: &dyn ImageSizes,
    ) -> Result<&[Element], GenerateError> {
        self.reset();

        let root = layout_document(
            tree,
            &self.stylesheets,
            self.viewport,
            measurer,
            images,
            &self.config,
        )?;

        let outer = root.dimensions.margin_rect();
        self.state.overflow = Size::new(
            outer.width - self.viewport.width,
            outer.height - self.viewport.height,
        );

        let ctx = LayoutContext {
            tree,
            stylesheets: &self.stylesheets,
            measurer,
            images,
            config: &self.config,
        };
        if let Err(err) = self.state.visit(&ctx, &root, &CascadedStyle::default()) {
            self.state = GenerationState::default();
            return Err(err);
        }
        self.state.layout_root = Some(root);

        debug!(
            elements = self.state.elements.len(),
            links = self.state.links.len(),
            images = self.state.images.requests().len(),
            overflow_width = self.state.overflow.width,
            overflow_height = self.state.overflow.height,
            "generation complete"
        );
        Ok(&self.state.elements)
    }

    /// Elements of the last pass, in pre-order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.state.elements
    }

    /// How far the laid-out page exceeds the viewport. Negative when it is
    /// smaller.
    #[must_use]
    pub const fn overflow(&self) -> Size {
        self.state.overflow
    }

    /// The box tree of the last pass.
    #[must_use]
    pub const fn layout_root(&self) -> Option<&LayoutBox> {
        self.state.layout_root.as_ref()
    }

    /// Link identifiers and their `href`s.
    #[must_use]
    pub const fn links(&self) -> &BTreeMap<LinkId, String> {
        &self.state.links
    }

    /// Distinct image URLs referenced by the last pass.
    #[must_use]
    pub fn image_requests(&self) -> &[ImageRequest] {
        self.state.images.requests()
    }

    /// The viewport the generator lays out into.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Change the viewport for subsequent passes.
    pub const fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }
}

impl GenerationState {
    fn visit(
        &mut self,
        ctx: &LayoutContext<'_>,
        layout_box: &LayoutBox,
        parent_style: &CascadedStyle,
    ) -> Result<(), GenerateError> {
        let id = match &layout_box.node {
            BoxNode::AnonymousCell => return Ok(()),
            BoxNode::TextRun { node, text } => {
                let style = cascade(ctx.stylesheets, ctx.tree, *node, parent_style);
                self.emit_label(text, &style, layout_box);
                return Ok(());
            }
            BoxNode::Node(id) => *id,
        };

        let style = cascade(ctx.stylesheets, ctx.tree, id, parent_style);
        let after = match ctx.tree.get(id).map(|n| &n.node_type) {
            Some(NodeType::Document) => AfterVisit::Nothing,
            Some(NodeType::Element(element)) => {
                match self.visit_element(ctx, id, element, layout_box)? {
                    Some(after) => after,
                    None => return Ok(()),
                }
            }
            Some(NodeType::Text(_) | NodeType::Comment(_)) | None => return Ok(()),
        };

        for child in &layout_box.children {
            self.visit(ctx, child, &style)?;
        }

        match after {
            AfterVisit::Nothing => {}
            AfterVisit::PopForm => {
                let _ = self.open_forms.pop();
            }
            AfterVisit::PopLink => {
                let _ = self.open_links.pop();
            }
        }
        Ok(())
    }

    /// Emit whatever `element` generates. Returns `None` when its children
    /// are part of the control and must not be visited.
    fn visit_element(
        &mut self,
        ctx: &LayoutContext<'_>,
        id: NodeId,
        element: &ElementData,
        layout_box: &LayoutBox,
    ) -> Result<Option<AfterVisit>, GenerateError> {
        match element.tag_name.as_str() {
            "button" => {
                let text = ctx.tree.text_content(id);
                self.emit_button(text, layout_box)?;
                Ok(None)
            }
            "input" => {
                self.visit_input(element, layout_box)?;
                Ok(None)
            }
            "img" => {
                self.visit_image(ctx, element, layout_box)?;
                Ok(None)
            }
            "select" => {
                let options = select_options(ctx.tree, id);
                let selected_index = options.iter().position(|o| o.selected).unwrap_or(0);
                let min_width = select_min_width(&options, ctx.measurer, ctx.config);
                let kind = ElementKind::Select {
                    name: element.attr("name").unwrap_or_default().to_string(),
                    options,
                    selected_index,
                    min_width,
                    form: self.open_forms.last().copied(),
                };
                let _ = self.emit_with_id(kind, layout_box)?;
                Ok(None)
            }
            "form" => {
                let kind = ElementKind::Form {
                    method: element
                        .attr("method")
                        .unwrap_or("get")
                        .trim()
                        .to_ascii_lowercase(),
                    target: element.attr("action").unwrap_or_default().to_string(),
                };
                let form_id = self.emit_with_id(kind, layout_box)?;
                self.open_forms.push(form_id);
                Ok(Some(AfterVisit::PopForm))
            }
            "a" => match element.attr("href") {
                Some(href) => {
                    let link = LinkId(next_id(&mut self.last_link_id, "link")?);
                    let _ = self.links.insert(link, href.to_string());
                    self.open_links.push(link);
                    Ok(Some(AfterVisit::PopLink))
                }
                None => Ok(Some(AfterVisit::Nothing)),
            },
            tag => {
                if !SUPPORTED_TAGS.contains(&tag) {
                    let _ = warn_once("Generator", &format!("unsupported tag <{tag}>"));
                }
                Ok(Some(AfterVisit::Nothing))
            }
        }
    }

    fn visit_input(
        &mut self,
        element: &ElementData,
        layout_box: &LayoutBox,
    ) -> Result<(), GenerateError> {
        match InputType::of(element) {
            Some(InputType::Text) => {
                let kind = ElementKind::TextField {
                    name: element.attr("name").unwrap_or_default().to_string(),
                    buffer: element.attr("value").unwrap_or_default().to_string(),
                    form: self.open_forms.last().copied(),
                };
                let _ = self.emit_with_id(kind, layout_box)?;
            }
            Some(InputType::Submit) => {
                let text = element.attr("value").unwrap_or("Submit").to_string();
                self.emit_button(text, layout_box)?;
            }
            Some(InputType::Hidden) => {}
            None => {
                let _ = warn_once(
                    "Generator",
                    &format!(
                        "unsupported input type: {}",
                        element.attr("type").unwrap_or_default()
                    ),
                );
            }
        }
        Ok(())
    }

    fn visit_image(
        &mut self,
        ctx: &LayoutContext<'_>,
        element: &ElementData,
        layout_box: &LayoutBox,
    ) -> Result<(), GenerateError> {
        let url = element.attr("src").unwrap_or_default();
        let sized = (element.attr("width").is_some() && element.attr("height").is_some())
            || ctx.images.image_size(url).is_some();
        let image_id: ImageId = self.images.request(url, sized)?;
        self.emit(
            None,
            ElementKind::Image {
                url: url.to_string(),
                image_id,
            },
            layout_box,
        );
        Ok(())
    }

    fn emit_label(&mut self, text: &str, style: &CascadedStyle, layout_box: &LayoutBox) {
        let link = self.open_links.last().copied();
        let color = style.box_style().color.unwrap_or(if link.is_some() {
            ColorValue::BLUE
        } else {
            ColorValue::WHITE
        });
        self.emit(
            None,
            ElementKind::Label {
                text: text.to_string(),
                color,
                link,
            },
            layout_box,
        );
    }

    fn emit_button(&mut self, text: String, layout_box: &LayoutBox) -> Result<(), GenerateError> {
        let kind = ElementKind::Button {
            text,
            form: self.open_forms.last().copied(),
        };
        let _ = self.emit_with_id(kind, layout_box)?;
        Ok(())
    }

    fn emit_with_id(
        &mut self,
        kind: ElementKind,
        layout_box: &LayoutBox,
    ) -> Result<ElementId, GenerateError> {
        let id = ElementId(next_id(&mut self.last_element_id, "element")?);
        self.emit(Some(id), kind, layout_box);
        Ok(id)
    }

    fn emit(&mut self, id: Option<ElementId>, kind: ElementKind, layout_box: &LayoutBox) {
        self.elements
            .push(Element::new(id, kind, layout_box.dimensions));
    }
}
