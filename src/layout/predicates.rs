//! Line grouping and word boundary decisions.
//!
//! Both predicates work on a [`Placed`] fragment, which carries the geometry
//! computed once up front. The public functions taking [`TextFragment`]s are
//! conveniences that compute it on the fly.

use super::{
    fragment::{Orientation, TextFragment},
    geometry::NormalizedGeometry,
    params::LayoutParams,
};

/// A fragment together with its precomputed reading-frame geometry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Placed<'a> {
    pub(crate) fragment: &'a TextFragment,
    pub(crate) geometry: NormalizedGeometry,
}

impl<'a> Placed<'a> {
    pub(crate) fn new(fragment: &'a TextFragment) -> Self {
        Self {
            fragment,
            geometry: fragment.geometry(),
        }
    }

    pub(crate) fn orientation(&self) -> Orientation {
        self.fragment.orientation
    }

    /// Estimated width of one character along the reading axis.
    fn char_width(&self) -> f32 {
        self.geometry.reading_width / self.fragment.char_count() as f32
    }
}

impl LayoutParams {
    /// Are `a` and `b` part of the same visual line?
    ///
    /// Fragments with different orientations never share a line.
    pub fn same_line(&self, a: &TextFragment, b: &TextFragment) -> bool {
        self.placed_same_line(&Placed::new(a), &Placed::new(b))
    }

    /// Does a space need to be inserted between `previous` and `current`?
    ///
    /// Both fragments must already be known to share a line, with `previous`
    /// read first.
    pub fn needs_space(&self, current: &TextFragment, previous: &TextFragment) -> bool {
        self.placed_needs_space(&Placed::new(current), &Placed::new(previous))
    }

    pub(crate) fn placed_same_line(&self, a: &Placed<'_>, b: &Placed<'_>) -> bool {
        if a.orientation() != b.orientation() {
            return false;
        }
        let overlap = a.geometry.perp_overlap(&b.geometry);
        let ratio_a = overlap / a.geometry.reading_height;
        let ratio_b = overlap / b.geometry.reading_height;
        // `f32::max` ignores a NaN operand, so a single degenerate height
        // does not hide the other ratio.
        ratio_a.max(ratio_b) > self.line_overlap
    }

    pub(crate) fn placed_needs_space(&self, current: &Placed<'_>, previous: &Placed<'_>) -> bool {
        let mut gap = current.geometry.parallel_start - previous.geometry.parallel_end;
        if gap < 0.0 {
            // Maybe they were handed to us in the wrong order.
            gap = previous.geometry.parallel_start - current.geometry.parallel_end;
            if gap < 0.0 {
                // Overlapping boxes, so the engine's own spacing wins.
                return false;
            }
        }
        let char_width = current.char_width().min(previous.char_width());
        gap > self.word_gap * char_width
    }
}

/// Are `a` and `b` on the same line, using the default [`LayoutParams`]?
pub fn same_line(a: &TextFragment, b: &TextFragment) -> bool {
    LayoutParams::default().same_line(a, b)
}

/// Does a space separate `previous` from `current`, using the default
/// [`LayoutParams`]?
pub fn needs_space(current: &TextFragment, previous: &TextFragment) -> bool {
    LayoutParams::default().needs_space(current, previous)
}
