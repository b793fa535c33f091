//! Orientation-relative geometry.
//!
//! Every comparison made during assembly happens in the fragment's own reading
//! frame. The parallel axis runs in the reading direction, so a fragment that
//! is read earlier on a line has a smaller parallel start. The perpendicular
//! axis points toward the top of the text, so an earlier line has a larger
//! perpendicular center.
//!
//! Values are only comparable between fragments with the same orientation.

use super::fragment::{BoundingBox, Orientation};

/// A fragment's bounding box, projected onto its reading frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedGeometry {
    /// Where the fragment starts along the reading axis.
    pub parallel_start: f32,
    /// Where the fragment ends along the reading axis.
    pub parallel_end: f32,
    /// The bottom edge of the text, across the reading axis.
    pub perp_bottom: f32,
    /// The top edge of the text, across the reading axis.
    pub perp_top: f32,
    /// Extent along the reading axis.
    pub reading_width: f32,
    /// Extent across the reading axis.
    pub reading_height: f32,
}

impl NormalizedGeometry {
    /// Project `bbox` into the reading frame of `orientation`.
    pub fn new(bbox: &BoundingBox, orientation: Orientation) -> Self {
        let (left, bottom, right, top) = (bbox.left, bbox.bottom, bbox.right(), bbox.top());
        let (parallel_start, parallel_end, perp_bottom, perp_top) = match orientation {
            Orientation::Horizontal => (left, right, bottom, top),
            Orientation::Rotated90 => (bottom, top, -right, -left),
            Orientation::Rotated180 => (-right, -left, -top, -bottom),
            Orientation::Rotated270 => (-top, -bottom, left, right),
        };
        let (reading_width, reading_height) = match orientation {
            Orientation::Horizontal | Orientation::Rotated180 => (bbox.width, bbox.height),
            Orientation::Rotated90 | Orientation::Rotated270 => (bbox.height, bbox.width),
        };
        Self {
            parallel_start,
            parallel_end,
            perp_bottom,
            perp_top,
            reading_width,
            reading_height,
        }
    }

    /// The middle of the line this fragment sits on.
    pub fn line_center(&self) -> f32 {
        self.perp_bottom + self.reading_height / 2.0
    }

    /// How far our perpendicular range overlaps `other`'s. Negative when the
    /// ranges are disjoint.
    pub fn perp_overlap(&self, other: &Self) -> f32 {
        self.perp_top.min(other.perp_top) - self.perp_bottom.max(other.perp_bottom)
    }
}
