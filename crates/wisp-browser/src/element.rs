//! The flat element list handed to rendering and input handling.

use serde::Serialize;
use wisp_css::{ColorValue, Dimensions, SelectOption};

/// Identifier of a focusable or form element. Issued from 1 per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// Identifier of a hyperlink. Issued from 1 per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(pub u32);

/// Identifier of a distinct image URL. Issued from 1 per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageId(pub u32);

/// What an element is, with its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// One line of text.
    Label {
        /// The text.
        text: String,
        /// Resolved text color.
        color: ColorValue,
        /// The link this text belongs to.
        link: Option<LinkId>,
    },
    /// A push button or submit input.
    Button {
        /// Caption.
        text: String,
        /// The innermost enclosing form.
        form: Option<ElementId>,
    },
    /// An image.
    Image {
        /// Source URL.
        url: String,
        /// Entry in the image request registry.
        image_id: ImageId,
    },
    /// A single-line text input.
    TextField {
        /// Submitted field name.
        name: String,
        /// Editable contents, seeded from the `value` attribute.
        buffer: String,
        /// The innermost enclosing form.
        form: Option<ElementId>,
    },
    /// A drop-down list.
    Select {
        /// Submitted field name.
        name: String,
        /// Options in document order.
        options: Vec<SelectOption>,
        /// Index of the selected option.
        selected_index: usize,
        /// Width needed by the widest option.
        min_width: i32,
        /// The innermost enclosing form.
        form: Option<ElementId>,
    },
    /// A form; controls refer to it by ID.
    Form {
        /// Lowercased submission method.
        method: String,
        /// Submission URL.
        target: String,
    },
}

/// A generated element with a snapshot of its box geometry.
///
/// The geometry is copied when the element is created. It can be moved with
/// [`Element::offset`] but is otherwise fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Set for buttons, text fields, selects, and forms.
    pub id: Option<ElementId>,
    /// Kind and payload.
    #[serde(flatten)]
    pub kind: ElementKind,
    dimensions: Dimensions,
}

impl Element {
    /// Create an element with a geometry snapshot.
    #[must_use]
    pub const fn new(id: Option<ElementId>, kind: ElementKind, dimensions: Dimensions) -> Self {
        Self {
            id,
            kind,
            dimensions,
        }
    }

    /// The cached geometry.
    #[must_use]
    pub const fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Translate the cached geometry, e.g. when the page scrolls.
    pub const fn offset(&mut self, dx: i32, dy: i32) {
        self.dimensions.offset(dx, dy);
    }

    /// The form this element submits with, if any.
    #[must_use]
    pub const fn form(&self) -> Option<ElementId> {
        match &self.kind {
            ElementKind::Button { form, .. }
            | ElementKind::TextField { form, .. }
            | ElementKind::Select { form, .. } => *form,
            ElementKind::Label { .. } | ElementKind::Image { .. } | ElementKind::Form { .. } => {
                None
            }
        }
    }
}
