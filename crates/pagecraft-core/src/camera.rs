//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default zoom, in percent.
pub const DEFAULT_ZOOM: f64 = 100.0;
/// Smallest allowed zoom, in percent.
pub const MIN_ZOOM: f64 = 25.0;
/// Largest allowed zoom, in percent.
pub const MAX_ZOOM: f64 = 400.0;

/// Convert a pointer position to canvas coordinates.
///
/// `origin` is the on-screen position of the canvas viewport, `pan` the
/// current pan offset and `scale` the zoom factor (1.0 = 100%).
pub fn screen_to_canvas(screen: Point, origin: Point, pan: Vec2, scale: f64) -> Point {
    Point::new(
        (screen.x - origin.x - pan.x) / scale,
        (screen.y - origin.y - pan.y) / scale,
    )
}

/// Camera manages the view transform for the canvas.
///
/// Zoom is kept in percent, the unit the editor displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub pan: Vec2,
    /// Current zoom in percent.
    zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom in percent.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom in percent, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Zoom as a multiplier (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    /// Canvas-to-screen transform for a viewport whose top-left is at `origin`.
    pub fn transform(&self, origin: Point) -> Affine {
        Affine::translate(origin.to_vec2() + self.pan) * Affine::scale(self.scale())
    }

    /// Screen-to-canvas transform for a viewport whose top-left is at `origin`.
    pub fn inverse_transform(&self, origin: Point) -> Affine {
        self.transform(origin).inverse()
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point, origin: Point) -> Point {
        screen_to_canvas(screen_point, origin, self.pan, self.scale())
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point, origin: Point) -> Point {
        self.transform(origin) * canvas_point
    }
}
