//! Asset boundary.
//!
//! Loading is owned by the host. The engine only consumes handles that are already
//! decoded and ready to draw, looked up by logical id.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::coords::Rect;
use crate::error::ConfigError;

/// Loaded, ready-to-draw image.
///
/// Cheap to clone. `id` is whatever the host's canvas backend needs to find the
/// decoded pixels; the engine only compares and forwards it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    id: Arc<str>,
    width: u32,
    height: u32,
}

impl ImageHandle {
    pub fn new(id: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self { id: id.into(), width, height }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Region covering the whole image.
    #[inline]
    pub fn full_region(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.id, self.width, self.height)
    }
}

/// Logical image id → loaded handle, filled by the host's loader.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, ImageHandle>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loaded image under its own id, replacing any previous handle.
    pub fn insert(&mut self, handle: ImageHandle) {
        self.images.insert(handle.id().to_owned(), handle);
    }

    pub fn get(&self, id: &str) -> Result<ImageHandle, ConfigError> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownImage { id: id.to_owned() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Named source regions within one image (sprite-sheet symbols).
#[derive(Debug, Clone)]
pub struct Atlas {
    image: ImageHandle,
    regions: HashMap<String, Rect>,
}

impl Atlas {
    pub fn new(image: ImageHandle) -> Self {
        Self { image, regions: HashMap::new() }
    }

    pub fn with_region(mut self, name: impl Into<String>, region: Rect) -> Self {
        self.insert(name, region);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, region: Rect) {
        self.regions.insert(name.into(), region);
    }

    #[inline]
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn region(&self, name: &str) -> Result<Rect, ConfigError> {
        self.regions
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownRegion { name: name.to_owned() })
    }
}
