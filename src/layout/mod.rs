//! Reading-order text assembly.
//!
//! OCR engines report text as a bag of fragments, each with a bounding box and
//! an orientation. This module groups those fragments into lines, orders them
//! the way a person would read them, and joins them with newlines and spaces.
//!
//! Four reading orientations are supported. Each fragment's box is first
//! projected into its own reading frame (see [`NormalizedGeometry`]), after
//! which the same rules apply to all of them:
//!
//! 1. Fragments are clustered by [`Orientation`].
//! 2. Two fragments share a line if they overlap across the reading axis by
//!    more than [`LayoutParams::line_overlap`] of either one's height.
//! 3. Lines are read from the top of the text down, and fragments within a
//!    line in the reading direction.
//! 4. A space separates fragments on a line when the gap between them is
//!    wider than [`LayoutParams::word_gap`] of a character, unless one of them
//!    already has a space at that end.
//!
//! Everything here is pure computation. Callers should drop fragments with
//! zero-sized boxes before assembling, since ratios computed from them are
//! meaningless.

mod assemble;
mod fragment;
mod geometry;
mod params;
mod predicates;

pub use self::{
    assemble::{TextAssembler, build_text},
    fragment::{BoundingBox, Orientation, PageTextMap, TextFragment},
    geometry::NormalizedGeometry,
    params::{DEFAULT_LINE_OVERLAP, DEFAULT_WORD_GAP, LayoutParams},
    predicates::{needs_space, same_line},
};
