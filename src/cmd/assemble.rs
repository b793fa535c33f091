//! The `assemble` subcommand.

use clap::{Args, ValueEnum};
use futures::{StreamExt as _, stream};

use crate::{
    io::{read_fragment_records, write_jsonl, write_text},
    layout::TextAssembler,
    prelude::*,
    records::{PageText, page_text_map},
};

use super::LayoutOpts;

/// How to write assembled text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text. Each page ends with a newline.
    #[default]
    Text,
    /// One JSON object per page, with `path`, `page` and `text` fields.
    Jsonl,
}

/// Assemble command line arguments.
#[derive(Debug, Args)]
pub struct AssembleOpts {
    /// Fragment files (JSON, JSONL or CSV). Reads standard input if none are
    /// given.
    #[clap(value_name = "INPUT")]
    pub input_paths: Vec<PathBuf>,

    /// The output path to write to. Defaults to standard output.
    #[clap(short = 'o', long = "out")]
    pub output_path: Option<PathBuf>,

    /// The output format.
    #[clap(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Max number of input files to assemble at a time.
    #[clap(short = 'j', long = "jobs", default_value = "8")]
    pub job_count: usize,

    #[clap(flatten)]
    pub layout: LayoutOpts,
}

/// The `assemble` subcommand.
#[instrument(level = "debug", skip_all)]
pub async fn cmd_assemble(opts: &AssembleOpts) -> Result<()> {
    let params = opts.layout.to_layout_params().await?;
    debug!(?params, "Using layout parameters");
    let assembler = TextAssembler::new(params);

    let input_paths = if opts.input_paths.is_empty() {
        vec![None]
    } else {
        opts.input_paths.iter().cloned().map(Some).collect()
    };

    // Assemble all our inputs concurrently, but keep them in input order.
    let page_texts = stream::iter(input_paths)
        .map(|path| assemble_input(assembler, path))
        .buffered(opts.job_count.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    let output_path = opts.output_path.as_deref();
    match opts.format {
        OutputFormat::Text => {
            let text = page_texts
                .iter()
                .map(|page| page.text.as_str())
                .collect::<String>();
            write_text(output_path, &text).await
        }
        OutputFormat::Jsonl => write_jsonl(output_path, &page_texts).await,
    }
}

/// Read and assemble a single input.
#[instrument(level = "debug", skip_all, fields(path = ?path))]
async fn assemble_input(
    assembler: TextAssembler,
    path: Option<PathBuf>,
) -> Result<Vec<PageText>> {
    let description = match &path {
        Some(path) => format!("{:?}", path),
        None => "stdin".to_owned(),
    };
    let records = read_fragment_records(path.as_deref())
        .await
        .with_context(|| format!("failed to read fragments from {description}"))?;
    let pages = page_text_map(records)
        .with_context(|| format!("invalid fragments in {description}"))?;

    // Sorting is CPU-bound, so keep it off the async executor.
    let page_texts = tokio::task::spawn_blocking(move || {
        PageText::from_pages(&assembler, &pages, path.as_deref())
    })
    .await
    .context("assembly task failed")?;
    debug!(pages = page_texts.len(), "Assembled pages");
    Ok(page_texts)
}
