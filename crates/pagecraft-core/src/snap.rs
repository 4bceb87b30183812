//! Grid snapping and alignment guides.

use crate::element::ElementId;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default grid size in canvas units.
pub const GRID_SIZE: f64 = 20.0;

/// Distance under which two edges or centers count as aligned.
pub const ALIGNMENT_THRESHOLD: f64 = 5.0;

/// Round `value` to the nearest multiple of `grid_size`.
///
/// A non-positive grid size leaves the value untouched.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Grid configuration for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    /// Grid spacing in canvas units.
    pub size: f64,
    /// Whether the grid is drawn.
    pub visible: bool,
    /// Whether drag deltas snap to the grid.
    pub snap: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            visible: false,
            snap: true,
        }
    }
}

impl GridSettings {
    /// Snap a single value; identity when snapping is off.
    pub fn snap_value(&self, value: f64) -> f64 {
        if self.snap {
            snap_to_grid(value, self.size)
        } else {
            value
        }
    }

    /// Snap both components of a delta.
    pub fn snap_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(self.snap_value(delta.x), self.snap_value(delta.y))
    }
}

/// Direction of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideOrientation {
    /// A vertical line at a fixed x.
    Vertical,
    /// A horizontal line at a fixed y.
    Horizontal,
}

/// Which feature of the two elements lines up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideAnchor {
    /// Left or top edges.
    Start,
    /// Horizontal or vertical centers.
    Center,
    /// Right or bottom edges.
    End,
}

/// A transient, advisory line shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    pub anchor: GuideAnchor,
    /// Canvas x for vertical guides, canvas y for horizontal ones.
    pub position: f64,
    /// The element being moved.
    pub moving: ElementId,
    /// The element it lines up with.
    pub target: ElementId,
}

/// Compare every moving element against every static one and emit a guide
/// for each edge or center that lines up within `threshold`.
///
/// Guides sit on the static element's line. Moving elements are expected to
/// be passed at their post-move bounds.
pub fn compute_alignment_guides(
    moving: &[(ElementId, Rect)],
    stationary: &[(ElementId, Rect)],
    threshold: f64,
) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();

    for &(moving_id, m) in moving {
        for &(target_id, s) in stationary {
            if moving_id == target_id {
                continue;
            }

            let vertical = [
                (GuideAnchor::Start, m.x0, s.x0),
                (GuideAnchor::End, m.x1, s.x1),
                (GuideAnchor::Center, m.center().x, s.center().x),
            ];
            for (anchor, a, b) in vertical {
                if (a - b).abs() < threshold {
                    guides.push(AlignmentGuide {
                        orientation: GuideOrientation::Vertical,
                        anchor,
                        position: b,
                        moving: moving_id,
                        target: target_id,
                    });
                }
            }

            let horizontal = [
                (GuideAnchor::Start, m.y0, s.y0),
                (GuideAnchor::End, m.y1, s.y1),
                (GuideAnchor::Center, m.center().y, s.center().y),
            ];
            for (anchor, a, b) in horizontal {
                if (a - b).abs() < threshold {
                    guides.push(AlignmentGuide {
                        orientation: GuideOrientation::Horizontal,
                        anchor,
                        position: b,
                        moving: moving_id,
                        target: target_id,
                    });
                }
            }
        }
    }

    guides
}
