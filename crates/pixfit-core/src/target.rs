//! Parsing of user-entered target sizes such as `100`, `250 KB` or `1.5MB`.
//!
//! Sizes are binary: 1 KB = 1024 bytes, 1 MB = 1024 * 1024 bytes.

use thiserror::Error;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Value a size dropdown uses to mean "read the free-text field instead".
pub const CUSTOM_SELECTION: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetSizeError {
    #[error("No target size given")]
    Empty,

    #[error("Invalid number in target size: {0:?}")]
    InvalidNumber(String),

    #[error("Unknown size unit {0:?} (expected B, KB or MB)")]
    UnknownUnit(String),

    #[error("Target size must be at least 1 byte")]
    TooSmall,
}

/// Parse a free-text target size into bytes.
///
/// A bare number is read as kilobytes. Units are case-insensitive and may be
/// separated from the number by whitespace. Fractional bytes round down.
pub fn parse_target_size(input: &str) -> Result<u64, TargetSizeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TargetSizeError::Empty);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| TargetSizeError::InvalidNumber(number.to_string()))?;

    let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "K" | "KB" => KIB,
        "M" | "MB" => MIB,
        "B" => 1.0,
        other => return Err(TargetSizeError::UnknownUnit(other.to_string())),
    };

    let bytes = (value * multiplier).floor();
    if !bytes.is_finite() || bytes < 1.0 {
        return Err(TargetSizeError::TooSmall);
    }
    Ok(bytes as u64)
}

/// Resolve a size dropdown selection to bytes.
///
/// Preset values are whole kilobytes (`"100"` is 100 KB). The
/// [`CUSTOM_SELECTION`] value defers to [`parse_target_size`] on `custom_input`.
pub fn target_from_selection(selection: &str, custom_input: &str) -> Result<u64, TargetSizeError> {
    let selection = selection.trim();
    if selection.eq_ignore_ascii_case(CUSTOM_SELECTION) {
        return parse_target_size(custom_input);
    }

    let kilobytes: u64 = selection
        .parse()
        .map_err(|_| TargetSizeError::InvalidNumber(selection.to_string()))?;
    match kilobytes.checked_mul(1024) {
        Some(0) => Err(TargetSizeError::TooSmall),
        Some(bytes) => Ok(bytes),
        None => Err(TargetSizeError::InvalidNumber(selection.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number_is_kilobytes() {
        assert_eq!(parse_target_size("100"), Ok(100 * 1024));
        assert_eq!(parse_target_size("  250 "), Ok(250 * 1024));
    }

    #[test]
    fn test_units() {
        assert_eq!(parse_target_size("100KB"), Ok(102_400));
        assert_eq!(parse_target_size("100 kb"), Ok(102_400));
        assert_eq!(parse_target_size("1.5MB"), Ok(1_572_864));
        assert_eq!(parse_target_size("2 m"), Ok(2 * 1024 * 1024));
        // `B` is plain bytes, not kilobytes
        assert_eq!(parse_target_size("500B"), Ok(500));
    }

    #[test]
    fn test_fractional_bytes_round_down() {
        // 0.3 KB = 307.2 bytes
        assert_eq!(parse_target_size("0.3"), Ok(307));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_target_size(""), Err(TargetSizeError::Empty));
        assert_eq!(parse_target_size("   "), Err(TargetSizeError::Empty));
        assert!(matches!(
            parse_target_size("MB"),
            Err(TargetSizeError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_target_size("1.2.3KB"),
            Err(TargetSizeError::InvalidNumber(_))
        ));
        // Unknown units are rejected instead of falling back to kilobytes
        assert_eq!(
            parse_target_size("5 GB"),
            Err(TargetSizeError::UnknownUnit("GB".to_string()))
        );
        assert_eq!(parse_target_size("0"), Err(TargetSizeError::TooSmall));
        assert_eq!(parse_target_size("0.5B"), Err(TargetSizeError::TooSmall));
        assert!(parse_target_size("-5KB").is_err());
    }

    #[test]
    fn test_selection_presets() {
        assert_eq!(target_from_selection("100", ""), Ok(102_400));
        assert_eq!(target_from_selection("500", "ignored"), Ok(512_000));
    }

    #[test]
    fn test_selection_custom() {
        assert_eq!(target_from_selection("custom", "1MB"), Ok(1_048_576));
        assert_eq!(target_from_selection("CUSTOM", ""), Err(TargetSizeError::Empty));
    }

    #[test]
    fn test_selection_invalid() {
        assert!(target_from_selection("0", "").is_err());
        assert!(target_from_selection("lots", "").is_err());
    }
}
