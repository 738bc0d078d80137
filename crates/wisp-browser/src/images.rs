//! Registry of image URLs referenced by the document.
//!
//! Each distinct URL gets one [`ImageId`]. An entry stays pending until some
//! `<img>` for that URL has a known size, either from its attributes or from
//! the embedder's image size lookup.

use serde::Serialize;

use crate::element::ImageId;
use crate::error::{GenerateError, next_id};

/// One distinct image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    /// Identifier shared by every `<img>` with this URL.
    pub image_id: ImageId,
    /// Source URL.
    pub url: String,
    /// True while no size is known; the embedder should fetch it.
    pub pending: bool,
}

/// Deduplicating image request list.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    requests: Vec<ImageRequest>,
    last_id: u32,
}

impl ImageRegistry {
    /// Look up or add `url`, returning its identifier.
    ///
    /// # Errors
    ///
    /// Fails when the image identifier counter overflows.
    pub fn request(&mut self, url: &str, sized: bool) -> Result<ImageId, GenerateError> {
        if let Some(existing) = self.requests.iter_mut().find(|r| r.url == url) {
            existing.pending &= !sized;
            return Ok(existing.image_id);
        }
        let image_id = ImageId(next_id(&mut self.last_id, "image")?);
        self.requests.push(ImageRequest {
            image_id,
            url: url.to_string(),
            pending: !sized,
        });
        Ok(image_id)
    }

    /// All requests in first-seen order.
    #[must_use]
    pub fn requests(&self) -> &[ImageRequest] {
        &self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_url_shares_id() {
        let mut registry = ImageRegistry::default();
        assert_eq!(registry.request("a.png", false), Ok(ImageId(1)));
        assert_eq!(registry.request("b.png", true), Ok(ImageId(2)));
        assert_eq!(registry.request("a.png", true), Ok(ImageId(1)));
        assert_eq!(registry.requests().len(), 2);
        assert!(!registry.requests()[0].pending);
    }
}
