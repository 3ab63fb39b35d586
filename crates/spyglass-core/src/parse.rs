//! Text conversion for editable inspector fields
//!
//! Positions are shown as `"x y z"`. Input is more lenient: components may be
//! separated by whitespace and/or commas and the whole value may be wrapped
//! in `()` or `[]`, so `"(1, 2.5, -3)"` and `"1 2.5 -3"` parse the same.

use crate::error::{Result, SpyglassError};
use crate::types::Vec3;

/// Format a position for display in an input field
pub fn format_vec3(v: Vec3) -> String {
    // `{}` on f32 is the shortest representation that round-trips exactly
    format!("{} {} {}", v.x, v.y, v.z)
}

/// Parse a position typed by the user
pub fn parse_vec3(text: &str) -> Result<Vec3> {
    let trimmed = text.trim();
    let inner = strip_brackets(trimmed);

    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return Err(SpyglassError::ParseError(format!(
            "expected 3 components, got {} in '{}'",
            parts.len(),
            trimmed
        )));
    }

    let mut out = [0.0f32; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = parse_component(part)?;
    }
    Ok(Vec3::from_array(out))
}

/// Parse a single scalar field such as a speed
pub fn parse_f32(field: &str, text: &str) -> Result<f32> {
    let trimmed = text.trim();
    trimmed
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SpyglassError::ParseError(format!("{field}: '{trimmed}' is not a number")))
}

fn strip_brackets(s: &str) -> &str {
    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some(rest) = s.strip_prefix(open).and_then(|r| r.strip_suffix(close)) {
            return rest;
        }
    }
    s
}

fn parse_component(part: &str) -> Result<f32> {
    match part.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SpyglassError::ParseError(format!(
            "'{part}' is not a finite number"
        ))),
    }
}
