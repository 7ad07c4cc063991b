use crate::FmError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FmError::NonFinite { what, value: v })
    }
}

/// Parse a decimal number as written in a block field (`"2.5"`, `" 10 "`).
pub fn parse_real(text: &str, what: &'static str) -> Result<Real, FmError> {
    let value = text
        .trim()
        .parse::<Real>()
        .map_err(|_| FmError::InvalidNumber {
            what,
            text: text.to_string(),
        })?;
    ensure_finite(value, what)
}

/// Parse a non-negative integer as written in a block field.
///
/// Integral reals such as `"3.0"` are accepted, since Blockly number fields
/// are not typed.
pub fn parse_count(text: &str, what: &'static str) -> Result<u32, FmError> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return Ok(v);
    }
    let real = parse_real(trimmed, what)?;
    real_to_count(real, what)
}

/// Convert a real to a non-negative integer, rejecting fractions and negatives.
pub fn real_to_count(value: Real, what: &'static str) -> Result<u32, FmError> {
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as Real {
        return Err(FmError::InvalidNumber {
            what,
            text: value.to_string(),
        });
    }
    Ok(value as u32)
}
