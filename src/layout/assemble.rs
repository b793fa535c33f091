//! Turning positioned fragments into reading-order text.

use std::cmp::Ordering;

use super::{
    fragment::{PageTextMap, TextFragment},
    params::LayoutParams,
    predicates::Placed,
};

/// Assembles fragments into lines of text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextAssembler {
    params: LayoutParams,
}

impl TextAssembler {
    /// Create an assembler using `params`.
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Our layout parameters.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Build the text for all pages, in ascending page order. Each page's text
    /// ends with a newline.
    pub fn build_text(&self, pages: &PageTextMap) -> String {
        pages
            .values()
            .map(|fragments| self.build_page_text(fragments))
            .collect()
    }

    /// Build the text of a single page, including the trailing newline.
    pub fn build_page_text(&self, fragments: &[TextFragment]) -> String {
        let mut placed = fragments.iter().map(Placed::new).collect::<Vec<_>>();
        merge_sort_by(&mut placed, &mut |a: &Placed<'_>, b: &Placed<'_>| {
            self.reading_order(a, b)
        });

        let mut output = String::new();
        let mut last: Option<&Placed<'_>> = None;
        for current in &placed {
            if let Some(last) = last {
                if self.params.placed_same_line(current, last) {
                    if self.wants_space(current, last) {
                        output.push(' ');
                    }
                } else {
                    output.push('\n');
                }
            }
            output.push_str(&current.fragment.text);
            last = Some(current);
        }
        output.push('\n');
        output
    }

    /// Should we insert a space between `previous` and `current`? Never if
    /// either already carries one at the boundary.
    fn wants_space(&self, current: &Placed<'_>, previous: &Placed<'_>) -> bool {
        !previous.fragment.text.ends_with(' ')
            && !current.fragment.text.starts_with(' ')
            && self.params.placed_needs_space(current, previous)
    }

    /// Compare two fragments for reading order: orientation first, then lines
    /// from the top of the text down, then the reading direction within a
    /// line.
    ///
    /// The line test is pairwise, so this is not guaranteed to be a total
    /// order on skewed input.
    fn reading_order(&self, a: &Placed<'_>, b: &Placed<'_>) -> Ordering {
        a.orientation().cmp(&b.orientation()).then_with(|| {
            if self.params.placed_same_line(a, b) {
                a.geometry
                    .parallel_start
                    .total_cmp(&b.geometry.parallel_start)
            } else {
                b.geometry
                    .line_center()
                    .total_cmp(&a.geometry.line_center())
            }
        })
    }
}

/// Build the text for all pages using the default [`LayoutParams`].
pub fn build_text(pages: &PageTextMap) -> String {
    TextAssembler::default().build_text(pages)
}

/// Stable merge sort.
///
/// `slice::sort_by` may panic when `compare` is not a total order, which the
/// pairwise line test cannot promise. This sort tolerates any comparator and
/// matches a standard stable sort whenever the comparator is consistent.
fn merge_sort_by<T, F>(items: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, mid);
    while i < mid && j < items.len() {
        // Take from the right half only when strictly smaller, so equal
        // elements keep their input order.
        if compare(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}
