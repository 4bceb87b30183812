//! Resize handles and the resize algorithm.

use crate::element::{Geometry, MIN_ELEMENT_SIZE};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft
        )
    }

    /// Handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight
        )
    }

    /// Handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight
        )
    }

    /// Handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight
        )
    }

    /// Position of this handle on the given geometry, in canvas coordinates.
    pub fn position(self, geometry: &Geometry) -> Point {
        let r = geometry.rect();
        let x = if self.moves_left() {
            r.x0
        } else if self.moves_right() {
            r.x1
        } else {
            r.center().x
        };
        let y = if self.moves_top() {
            r.y0
        } else if self.moves_bottom() {
            r.y1
        } else {
            r.center().y
        };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => "nwse-resize",
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => "nesw-resize",
            ResizeHandle::Top | ResizeHandle::Bottom => "ns-resize",
            ResizeHandle::Left | ResizeHandle::Right => "ew-resize",
        }
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    /// Check if a canvas point hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// The eight handles for an element's geometry.
pub fn get_handles(geometry: &Geometry) -> Vec<Handle> {
    ResizeHandle::ALL
        .iter()
        .map(|&kind| Handle {
            position: kind.position(geometry),
            kind,
        })
        .collect()
}

/// Find which handle (if any) is hit at the given canvas point.
/// Corners win over edges when both are in range.
pub fn hit_test_handles(geometry: &Geometry, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    let handles = get_handles(geometry);
    let corners = handles.iter().step_by(2);
    let edges = handles.iter().skip(1).step_by(2);
    corners
        .chain(edges)
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Apply a resize drag to the geometry an element had when the drag started.
///
/// Right/bottom handles grow the size by the delta. Left/top handles shrink
/// it and shift the position by the same amount. Sizes never drop below
/// [`MIN_ELEMENT_SIZE`] and left/top edges stop at 0; in both cases the
/// opposite edge stays where it was.
pub fn resize_geometry(origin: Geometry, handle: ResizeHandle, delta: Vec2) -> Geometry {
    let (x, width) = resize_axis(
        origin.x,
        origin.width,
        delta.x,
        handle.moves_left(),
        handle.moves_right(),
    );
    let (y, height) = resize_axis(
        origin.y,
        origin.height,
        delta.y,
        handle.moves_top(),
        handle.moves_bottom(),
    );
    Geometry::new(x, y, width, height)
}

fn resize_axis(start: f64, size: f64, delta: f64, moves_start: bool, moves_end: bool) -> (f64, f64) {
    if moves_start {
        let end = start + size;
        let max_start = (end - MIN_ELEMENT_SIZE).max(0.0);
        let new_start = (start + delta).clamp(0.0, max_start);
        (new_start, (end - new_start).max(MIN_ELEMENT_SIZE))
    } else if moves_end {
        (start, (size + delta).max(MIN_ELEMENT_SIZE))
    } else {
        (start, size.max(MIN_ELEMENT_SIZE))
    }
}
