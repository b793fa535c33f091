//! Layout parameter files.
//!
//! Parameters are stored as TOML:
//!
//! ```toml
//! line_overlap = 0.7
//! word_gap = 0.1
//! ```
//!
//! Both keys are optional and fall back to the defaults.

use toml_span::{DeserError, value::ValueInner};

use crate::{
    layout::LayoutParams,
    prelude::*,
    toml_utils::{
        custom_deser_error, deser_error_message, from_toml_str, take_non_negative_f32,
    },
};

impl<'de> toml_span::Deserialize<'de> for LayoutParams {
    fn deserialize(value: &mut toml_span::Value<'de>) -> Result<Self, DeserError> {
        let span = value.span;
        let ValueInner::Table(table) = value.take() else {
            return Err(custom_deser_error(span, "expected a table"));
        };
        let mut params = LayoutParams::default();
        for (key, mut value) in table {
            match key.name.as_ref() {
                "line_overlap" => params.line_overlap = take_non_negative_f32(&mut value)?,
                "word_gap" => params.word_gap = take_non_negative_f32(&mut value)?,
                other => {
                    return Err(custom_deser_error(
                        key.span,
                        format!("unknown layout parameter {other:?}"),
                    ));
                }
            }
        }
        Ok(params)
    }
}

/// Parse layout parameters from a TOML string.
pub fn parse_layout_params(toml_str: &str) -> Result<LayoutParams> {
    from_toml_str::<LayoutParams>(toml_str).map_err(|err| anyhow!(deser_error_message(&err)))
}

/// Load layout parameters from a TOML file.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_layout_params(path: &Path) -> Result<LayoutParams> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read layout parameters from {:?}", path))?;
    let params = parse_layout_params(&data).with_context(|| {
        format!("Failed to parse layout parameters from {:?}", path)
    })?;
    debug!(?params, "Loaded layout parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_params() {
        let params = parse_layout_params("line_overlap = 0.5\nword_gap = 0.25\n").unwrap();
        assert_eq!(
            params,
            LayoutParams {
                line_overlap: 0.5,
                word_gap: 0.25,
            }
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let params = parse_layout_params("word_gap = 1\n").unwrap();
        assert_eq!(params.line_overlap, LayoutParams::default().line_overlap);
        assert_eq!(params.word_gap, 1.0);
        assert_eq!(parse_layout_params("").unwrap(), LayoutParams::default());
    }

    #[test]
    fn test_bad_params_are_rejected() {
        assert!(parse_layout_params("line_overlap = -0.5\n").is_err());
        assert!(parse_layout_params("line_overlap = \"high\"\n").is_err());
        assert!(parse_layout_params("char_margin = 2.0\n").is_err());
        assert!(parse_layout_params("line_overlap = nan\n").is_err());
        assert!(parse_layout_params("word_gap = inf\n").is_err());
    }

    #[test]
    fn test_params_too_large_for_f32_are_rejected() {
        assert!(parse_layout_params("word_gap = 1e300\n").is_err());
        assert!(parse_layout_params("line_overlap = 1e39\n").is_err());
        assert!(parse_layout_params("word_gap = 3.0e38\n").is_ok());
    }
}
