//! The `schema` subcommand.
//!
//! Prints JSON Schemas for our record formats, so that OCR pipelines feeding
//! `assemble` can validate their output before handing it over.

use clap::{Args, ValueEnum};
use schemars::{schema::RootSchema, schema_for};
use tokio::io::AsyncWriteExt as _;

use crate::{
    io::create_writer,
    prelude::*,
    records::{FragmentRecord, PageText},
};

/// The different schema types we support.
///
/// We parse these as PascalCase, because they represent type names.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[clap(rename_all = "PascalCase")]
pub enum SchemaType {
    /// One input fragment: a JSON array element, a JSONL line, or a CSV row.
    FragmentRecord,
    /// One line of `assemble --format jsonl` output.
    PageText,
}

impl SchemaType {
    /// The schema for this record type.
    pub fn schema(self) -> RootSchema {
        match self {
            SchemaType::FragmentRecord => schema_for!(FragmentRecord),
            SchemaType::PageText => schema_for!(PageText),
        }
    }
}

/// Schema command line arguments.
#[derive(Debug, Args)]
pub struct SchemaOpts {
    /// The schema type to generate.
    #[clap(value_enum, value_name = "TYPE")]
    pub schema_type: SchemaType,

    /// The output path to write the schema to.
    #[clap(short = 'o', long = "out")]
    pub output_path: Option<PathBuf>,
}

/// The `schema` subcommand.
#[instrument(level = "debug", skip_all)]
pub async fn cmd_schema(schema_opts: &SchemaOpts) -> Result<()> {
    let schema = schema_opts.schema_type.schema();

    let mut wtr = create_writer(schema_opts.output_path.as_deref()).await?;
    let schema_str =
        serde_json::to_string_pretty(&schema).context("failed to serialize schema")?;
    wtr.write_all(schema_str.as_bytes())
        .await
        .context("failed to write schema")?;
    wtr.write_all(b"\n")
        .await
        .context("failed to write schema")?;
    wtr.flush().await.context("failed to flush schema")?;
    Ok(())
}
