//! Helper functions for [`toml_span`].

use std::borrow::Cow;

use toml_span::{DeserError, value::ValueInner};

/// Deserialize a TOML string into a value of the specified type.
pub fn from_toml_str<'de, T>(toml_str: &'de str) -> Result<T, DeserError>
where
    T: toml_span::Deserialize<'de>,
{
    let mut value = toml_span::de::parse(toml_str)?;
    T::deserialize(&mut value)
}

/// Create a custom [`DeserError`] with a span.
pub fn custom_deser_error(
    span: toml_span::Span,
    msg: impl Into<Cow<'static, str>>,
) -> DeserError {
    let err_kind = toml_span::ErrorKind::Custom(msg.into());
    let err = toml_span::Error::from((err_kind, span));
    DeserError::from(err)
}

/// Take a finite, non-negative number from a TOML value. Integers are
/// accepted as well as floats.
pub fn take_non_negative_f32(value: &mut toml_span::Value<'_>) -> Result<f32, DeserError> {
    let span = value.span;
    let number = match value.take() {
        ValueInner::Float(f) => f,
        ValueInner::Integer(i) => i as f64,
        _ => return Err(custom_deser_error(span, "expected a number")),
    };
    // Narrow first, so values too large for an `f32` become infinite and are
    // rejected below.
    let number = number as f32;
    if !number.is_finite() || number < 0.0 {
        return Err(custom_deser_error(
            span,
            format!("expected a finite, non-negative number, found {number}"),
        ));
    }
    Ok(number)
}

/// Flatten a [`DeserError`] into a single human-readable message.
pub fn deser_error_message(err: &DeserError) -> String {
    err.errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
