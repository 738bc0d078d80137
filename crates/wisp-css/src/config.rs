use serde::{Deserialize, Serialize};

/// Largest magnitude a single resolved length may take.
///
/// Box sums add a handful of lengths together, so each one is kept well
/// inside `i32` range.
pub const MAX_LENGTH: i32 = i32::MAX / 8;

/// Round a length in layout units and clamp it to `±MAX_LENGTH`.
#[must_use]
pub fn clamp_length(value: f32) -> i32 {
    (value.round() as i32).clamp(-MAX_LENGTH, MAX_LENGTH)
}

/// Engine tunables.
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font size in pixels passed to the text measurer, and the `em` base.
    pub base_font_size: i32,
    /// Multiplier applied to raw pixel values from CSS.
    pub box_scale: f32,
    /// Words processed per text-breaking call; later words are dropped.
    pub max_words_per_break: usize,
    /// Spacing between table cells and around the table edge, before scaling.
    pub cell_spacing: i32,
    /// Character count for text inputs without a `size` attribute.
    pub text_field_size: usize,
    /// Width added to a select's widest option label.
    pub select_arrow_width: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_font_size: 16,
            box_scale: 1.0,
            max_words_per_break: 50,
            cell_spacing: 2,
            text_field_size: 20,
            select_arrow_width: 16,
        }
    }
}

impl LayoutConfig {
    /// Scale a raw CSS pixel value by [`Self::box_scale`], clamped to
    /// [`MAX_LENGTH`].
    #[must_use]
    pub fn scale_px(&self, px: f32) -> i32 {
        clamp_length(px * self.box_scale)
    }

    /// Table cell spacing in layout units.
    #[must_use]
    pub fn scaled_cell_spacing(&self) -> i32 {
        self.scale_px(self.cell_spacing as f32)
    }
}
