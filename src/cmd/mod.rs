//! Command-line entry points.

use clap::Args;

use crate::{config::load_layout_params, layout::LayoutParams, prelude::*};

pub mod assemble;
pub mod schema;

/// Options controlling how fragments are grouped into lines and words.
#[derive(Debug, Clone, Args)]
pub struct LayoutOpts {
    /// A TOML file with `line_overlap` and `word_gap` keys.
    #[clap(long = "params", value_name = "FILE")]
    params_path: Option<PathBuf>,

    /// Fragments overlapping by more than this fraction of their height share
    /// a line. Overrides `--params`.
    #[clap(long)]
    line_overlap: Option<f32>,

    /// Gaps wider than this fraction of a character get a space. Overrides
    /// `--params`.
    #[clap(long)]
    word_gap: Option<f32>,
}

impl LayoutOpts {
    /// Build our layout parameters, loading `--params` if present.
    pub async fn to_layout_params(&self) -> Result<LayoutParams> {
        let mut params = match &self.params_path {
            Some(path) => load_layout_params(path).await?,
            None => LayoutParams::default(),
        };
        if let Some(line_overlap) = self.line_overlap {
            params.line_overlap = check_ratio("--line-overlap", line_overlap)?;
        }
        if let Some(word_gap) = self.word_gap {
            params.word_gap = check_ratio("--word-gap", word_gap)?;
        }
        Ok(params)
    }
}

fn check_ratio(flag: &str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(anyhow!("{flag} must be a non-negative number, found {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(line_overlap: Option<f32>, word_gap: Option<f32>) -> LayoutOpts {
        LayoutOpts {
            params_path: None,
            line_overlap,
            word_gap,
        }
    }

    #[tokio::test]
    async fn test_defaults_without_flags() -> Result<()> {
        assert_eq!(opts(None, None).to_layout_params().await?, LayoutParams::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_flags_override_defaults() -> Result<()> {
        let params = opts(Some(0.5), None).to_layout_params().await?;
        assert_eq!(params.line_overlap, 0.5);
        assert_eq!(params.word_gap, LayoutParams::default().word_gap);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_flags_are_rejected() {
        assert!(opts(None, Some(-1.0)).to_layout_params().await.is_err());
        assert!(opts(Some(f32::NAN), None).to_layout_params().await.is_err());
    }
}
