//! View transform - conversions between client, offset and page space.
//!
//! - **client**: viewport pixels as delivered by pointer events
//! - **offset**: client pixels relative to the canvas container's top-left
//! - **page**: logical design-surface units, independent of pan and zoom
//!
//! Page origin is drawn at the container centre shifted by `translate`, then
//! scaled by `scale`. A `Transform` is a value: every change produces a new
//! one so readers always see a consistent snapshot.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SCALE, SCALE_EPSILON, ZOOM_STEPS};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub scale: f64,
    /// Last measured bounding box of the canvas container (client space)
    pub client_rect: Rect,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::ZERO,
            scale: DEFAULT_SCALE,
            client_rect: Rect::default(),
        }
    }
}

/// The part of a transform that survives closing the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedTransform {
    pub translate: Point,
    pub scale: f64,
}

impl Transform {
    pub fn new(translate: Point, scale: f64, client_rect: Rect) -> Self {
        Self {
            translate,
            scale,
            client_rect,
        }
    }

    /// Rejects scales a transform can never hold.
    pub fn validate_scale(scale: f64) -> CanvasResult<f64> {
        if scale.is_finite() && scale > 0.0 {
            Ok(scale)
        } else {
            Err(CanvasError::InvalidScale(scale))
        }
    }

    #[inline]
    fn origin(&self) -> Point {
        Point::new(
            self.translate.x + self.client_rect.width / 2.0,
            self.translate.y + self.client_rect.height / 2.0,
        )
    }

    // ------------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------------

    #[inline]
    pub fn client_to_offset_point(&self, p: Point) -> Point {
        p.sub(self.client_rect.top_left())
    }

    #[inline]
    pub fn offset_to_client_point(&self, p: Point) -> Point {
        p.add(self.client_rect.top_left())
    }

    #[inline]
    pub fn offset_to_page_point(&self, p: Point) -> Point {
        p.sub(self.origin()).scale(1.0 / self.scale)
    }

    #[inline]
    pub fn page_to_offset_point(&self, p: Point) -> Point {
        p.scale(self.scale).add(self.origin())
    }

    #[inline]
    pub fn client_to_page_point(&self, p: Point) -> Point {
        self.offset_to_page_point(self.client_to_offset_point(p))
    }

    #[inline]
    pub fn page_to_client_point(&self, p: Point) -> Point {
        self.offset_to_client_point(self.page_to_offset_point(p))
    }

    // ------------------------------------------------------------------------
    // Rects
    // ------------------------------------------------------------------------

    pub fn client_to_offset_rect(&self, r: Rect) -> Rect {
        let p = self.client_to_offset_point(r.top_left());
        Rect::new(p.x, p.y, r.width, r.height)
    }

    pub fn offset_to_page_rect(&self, r: Rect) -> Rect {
        let p = self.offset_to_page_point(r.top_left());
        Rect::new(p.x, p.y, r.width / self.scale, r.height / self.scale)
    }

    pub fn page_to_offset_rect(&self, r: Rect) -> Rect {
        let p = self.page_to_offset_point(r.top_left());
        Rect::new(p.x, p.y, r.width * self.scale, r.height * self.scale)
    }

    pub fn client_to_page_rect(&self, r: Rect) -> Rect {
        self.offset_to_page_rect(self.client_to_offset_rect(r))
    }

    pub fn page_to_client_rect(&self, r: Rect) -> Rect {
        let p = self.page_to_client_point(r.top_left());
        Rect::new(p.x, p.y, r.width * self.scale, r.height * self.scale)
    }

    // ------------------------------------------------------------------------
    // Derived transforms
    // ------------------------------------------------------------------------

    /// Same view panned by `delta` offset pixels.
    pub fn translated(&self, delta: Point) -> Transform {
        Transform {
            translate: self.translate.add(delta),
            ..*self
        }
    }

    pub fn with_client_rect(&self, client_rect: Rect) -> Transform {
        Transform {
            client_rect,
            ..*self
        }
    }

    /// Zoom to `new_scale` keeping the page point under `client_point` fixed.
    pub fn zoomed_at(&self, client_point: Point, new_scale: f64) -> Transform {
        let offset = self.client_to_offset_point(client_point);
        let x = offset.x - self.client_rect.width / 2.0;
        let y = offset.y - self.client_rect.height / 2.0;
        let ratio = new_scale / self.scale;
        Transform {
            translate: Point::new(
                x - (x - self.translate.x) * ratio,
                y - (y - self.translate.y) * ratio,
            ),
            scale: new_scale,
            client_rect: self.client_rect,
        }
    }

    /// Next zoom step above the current scale, or the largest step.
    pub fn next_scale(&self, steps: &[f64]) -> f64 {
        let steps = if steps.is_empty() { ZOOM_STEPS } else { steps };
        steps
            .iter()
            .copied()
            .find(|step| *step > self.scale + SCALE_EPSILON)
            .unwrap_or(steps[steps.len() - 1])
    }

    /// Next zoom step below the current scale, or the smallest step.
    pub fn previous_scale(&self, steps: &[f64]) -> f64 {
        let steps = if steps.is_empty() { ZOOM_STEPS } else { steps };
        steps
            .iter()
            .rev()
            .copied()
            .find(|step| *step < self.scale - SCALE_EPSILON)
            .unwrap_or(steps[0])
    }

    pub fn persisted(&self) -> PersistedTransform {
        PersistedTransform {
            translate: self.translate,
            scale: self.scale,
        }
    }

    /// Applies a persisted pan/zoom, keeping the measured client rect.
    pub fn restored(&self, persisted: &PersistedTransform) -> CanvasResult<Transform> {
        let scale = Self::validate_scale(persisted.scale)?;
        Ok(Transform {
            translate: persisted.translate,
            scale,
            client_rect: self.client_rect,
        })
    }
}
