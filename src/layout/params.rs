//! Layout analysis parameters.

/// If two fragments overlap across the reading axis by more than this fraction
/// of either fragment's height, they are on the same line.
pub const DEFAULT_LINE_OVERLAP: f32 = 0.70;

/// If the gap between two fragments on the same line is larger than this
/// fraction of the average character width, a space separates them.
pub const DEFAULT_WORD_GAP: f32 = 0.10;

/// Parameters for line grouping and word splitting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Minimum perpendicular overlap for two fragments to share a line,
    /// relative to the height of either fragment. The comparison is strict.
    pub line_overlap: f32,

    /// Minimum gap between two fragments on a line for a space to be inserted,
    /// relative to the narrower average character width of the two. The
    /// comparison is strict.
    pub word_gap: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_overlap: DEFAULT_LINE_OVERLAP,
            word_gap: DEFAULT_WORD_GAP,
        }
    }
}
