//! Input and output records for the command-line tool.

use schemars::{
    JsonSchema,
    r#gen::SchemaGenerator,
    schema::{InstanceType, NumberValidation, Schema, SchemaObject},
};
use serde::Deserializer;

use crate::{
    layout::{BoundingBox, Orientation, PageTextMap, TextAssembler, TextFragment},
    prelude::*,
};

/// A single positioned text fragment, as reported by an OCR engine.
///
/// Coordinates are in unrotated page space, with the y axis pointing up.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FragmentRecord {
    /// The page number, starting at 1.
    pub page: u32,

    /// The recognized text.
    pub text: String,

    /// Left edge of the bounding box.
    pub left: f32,

    /// Bottom edge of the bounding box.
    pub bottom: f32,

    /// Width of the bounding box.
    pub width: f32,

    /// Height of the bounding box.
    pub height: f32,

    /// Quarter-turns the reading direction is rotated counter-clockwise: 0, 1,
    /// 2 or 3. Defaults to 0 when missing, `null` or an empty CSV cell.
    #[serde(default, deserialize_with = "deserialize_orientation")]
    #[schemars(schema_with = "orientation_schema")]
    pub orientation: Orientation,
}

/// Read an optional orientation, so that an empty CSV cell means 0.
fn deserialize_orientation<'de, D>(deserializer: D) -> Result<Orientation, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        None => Ok(Orientation::default()),
        Some(value) => Orientation::try_from(value).map_err(serde::de::Error::custom),
    }
}

/// Orientations are integers from 0 to 3.
fn orientation_schema(_generator: &mut SchemaGenerator) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::Integer.into()),
        format: Some("uint8".to_owned()),
        number: Some(Box::new(NumberValidation {
            minimum: Some(0.0),
            maximum: Some(3.0),
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}

impl FragmentRecord {
    /// Split into a page number and a [`TextFragment`].
    pub fn into_page_fragment(self) -> (u32, TextFragment) {
        let bbox = BoundingBox::new(self.left, self.bottom, self.width, self.height);
        (
            self.page,
            TextFragment::new(self.text, bbox, self.orientation),
        )
    }
}

/// Group fragment records by page.
///
/// Fragments with empty bounding boxes are dropped with a warning, but their
/// page is kept. Non-finite coordinates and page 0 are errors.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn page_text_map(records: Vec<FragmentRecord>) -> Result<PageTextMap> {
    let mut pages = PageTextMap::new();
    let mut dropped = 0usize;
    for (idx, record) in records.into_iter().enumerate() {
        let record_no = idx + 1;
        if record.page == 0 {
            bail!("record {record_no}: page numbers start at 1");
        }
        let (page, fragment) = record.into_page_fragment();
        if !fragment.bbox.is_finite() {
            bail!(
                "record {record_no} (page {page}): bounding box must be finite, found {:?}",
                fragment.bbox
            );
        }
        let page_fragments = pages.entry(page).or_default();
        if fragment.bbox.is_degenerate() {
            warn!(
                record = record_no,
                page,
                text = %fragment.text,
                "Dropping fragment with an empty bounding box"
            );
            dropped += 1;
            continue;
        }
        page_fragments.push(fragment);
    }
    debug!(pages = pages.len(), dropped, "Grouped fragments by page");
    Ok(pages)
}

/// The assembled text of one page.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct PageText {
    /// The input file this page came from, if it was not read from standard
    /// input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// The page number.
    pub page: u32,

    /// The text of the page, ending with a newline.
    pub text: String,
}

impl PageText {
    /// Assemble each page in `pages`, in ascending page order.
    pub fn from_pages(
        assembler: &TextAssembler,
        pages: &PageTextMap,
        path: Option<&Path>,
    ) -> Vec<PageText> {
        pages
            .iter()
            .map(|(&page, fragments)| PageText {
                path: path.map(Path::to_owned),
                page,
                text: assembler.build_page_text(fragments),
            })
            .collect()
    }
}
