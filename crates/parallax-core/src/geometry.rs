//! Viewport geometry: the provider seam and the per-sample snapshot

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Element box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Box starting at `top` spanning `height` rows/pixels
    pub fn from_height(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Box relative to the top of the viewport
    #[inline]
    pub fn relative_to(&self, scroll_y: f64) -> BoundingBox {
        BoundingBox {
            top: self.top - scroll_y,
            bottom: self.bottom - scroll_y,
        }
    }
}

/// Source of live scroll and layout state
///
/// Implemented by whatever hosts the page; the engine never reads ambient
/// globals, which keeps every computation testable against a fake.
pub trait ViewportProvider {
    fn current_scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn document_height(&self) -> f64;
    /// Document-space box of a mounted element, `None` while unmounted
    fn bounding_box_of(&self, element_id: &str) -> Option<BoundingBox>;
}

/// One read of viewport, document and element dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub element_top: f64,
    pub element_bottom: f64,
    pub element_height: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub scroll_y: f64,
}

impl GeometrySnapshot {
    /// Build a snapshot from raw numbers, replacing non-finite reads with 0
    pub fn new(element: BoundingBox, viewport_height: f64, document_height: f64, scroll_y: f64) -> Self {
        let top = finite_or_zero(element.top);
        let bottom = finite_or_zero(element.bottom);
        Self {
            element_top: top,
            element_bottom: bottom,
            element_height: (bottom - top).max(0.0),
            viewport_height: finite_or_zero(viewport_height).max(0.0),
            document_height: finite_or_zero(document_height).max(0.0),
            scroll_y: finite_or_zero(scroll_y).max(0.0),
        }
    }

    /// Capture geometry for a single element
    ///
    /// Returns `None` when the element is not mounted.
    pub fn capture<P: ViewportProvider + ?Sized>(provider: &P, element_id: &str) -> Option<Self> {
        let element = provider.bounding_box_of(element_id)?;
        Some(Self::new(
            element,
            provider.viewport_height(),
            provider.document_height(),
            provider.current_scroll_y(),
        ))
    }

    /// Capture geometry where the element is the whole document
    pub fn capture_page<P: ViewportProvider + ?Sized>(provider: &P) -> Self {
        let document_height = provider.document_height();
        Self::new(
            BoundingBox::new(0.0, document_height),
            provider.viewport_height(),
            document_height,
            provider.current_scroll_y(),
        )
    }

    /// Element box relative to the viewport top
    pub fn element_rect(&self) -> BoundingBox {
        BoundingBox::new(self.element_top, self.element_bottom).relative_to(self.scroll_y)
    }
}

#[inline]
fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// In-memory viewport with fixed layout
///
/// Used by one-shot commands and tests; also a convenient host for
/// pre-computed layouts.
#[derive(Debug, Clone, Default)]
pub struct StaticViewport {
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    elements: HashMap<String, BoundingBox>,
}

impl StaticViewport {
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height,
            document_height,
            elements: HashMap::new(),
        }
    }

    pub fn with_element(mut self, id: impl Into<String>, bbox: BoundingBox) -> Self {
        self.elements.insert(id.into(), bbox);
        self
    }

    pub fn with_scroll(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }
}

impl ViewportProvider for StaticViewport {
    fn current_scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn bounding_box_of(&self, element_id: &str) -> Option<BoundingBox> {
        self.elements.get(element_id).copied()
    }
}
