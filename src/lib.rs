//! Rebuild reading-order text from positioned OCR fragments.
//!
//! The interesting part lives in [`layout`], which is pure and has no I/O.
//! The other modules read fragment files, load layout parameters and drive
//! the command-line tool.

pub mod cmd;
pub mod config;
pub mod io;
pub mod layout;
pub mod prelude;
pub mod records;
mod toml_utils;

pub use layout::{
    BoundingBox, LayoutParams, Orientation, PageTextMap, TextAssembler, TextFragment,
    build_text,
};
