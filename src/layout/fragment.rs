//! Positioned text fragments, as produced by an OCR engine.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use super::geometry::NormalizedGeometry;

/// How many quarter-turns the reading axis of a fragment is rotated
/// counter-clockwise relative to the unrotated page.
///
/// Serialized as the integer `0..=3`. The ordering of variants is used to
/// cluster fragments by orientation during assembly.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Orientation {
    /// Normal left-to-right text.
    #[default]
    Horizontal,
    /// Text reading bottom-to-top.
    Rotated90,
    /// Upside-down text.
    Rotated180,
    /// Text reading top-to-bottom.
    Rotated270,
}

impl Orientation {
    /// All orientations, in assembly order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Horizontal,
        Orientation::Rotated90,
        Orientation::Rotated180,
        Orientation::Rotated270,
    ];

    /// The rotation in degrees.
    pub fn degrees(self) -> u16 {
        u16::from(u8::from(self)) * 90
    }
}

impl TryFrom<u8> for Orientation {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Orientation::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| anyhow!("orientation must be 0, 1, 2 or 3, found {value}"))
    }
}

impl From<Orientation> for u8 {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => 0,
            Orientation::Rotated90 => 1,
            Orientation::Rotated180 => 2,
            Orientation::Rotated270 => 3,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// An axis-aligned rectangle in unrotated page coordinates, with the y axis
/// pointing up.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }

    /// Are all four fields finite?
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.bottom.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Does this box have zero (or negative) area? Ratios computed from such
    /// boxes are meaningless.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A span of recognized text with a location and an orientation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TextFragment {
    /// The recognized text, copied to the output verbatim.
    pub text: String,

    /// Where the text was found on the page.
    pub bbox: BoundingBox,

    /// Which way the text reads.
    #[serde(default)]
    pub orientation: Orientation,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, orientation: Orientation) -> Self {
        Self {
            text: text.into(),
            bbox,
            orientation,
        }
    }

    /// Create a new [`Orientation::Horizontal`] fragment from raw box
    /// coordinates.
    pub fn horizontal(
        text: impl Into<String>,
        left: f32,
        bottom: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self::new(
            text,
            BoundingBox::new(left, bottom, width, height),
            Orientation::Horizontal,
        )
    }

    /// Compute our orientation-relative geometry.
    pub fn geometry(&self) -> NormalizedGeometry {
        NormalizedGeometry::new(&self.bbox, self.orientation)
    }

    /// Number of characters used to estimate glyph width. Empty text counts as
    /// a single character so the estimate stays finite.
    pub(crate) fn char_count(&self) -> usize {
        self.text.chars().count().max(1)
    }
}

/// Fragments grouped by page number. Pages are visited in ascending order.
pub type PageTextMap = BTreeMap<u32, Vec<TextFragment>>;
