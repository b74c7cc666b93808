use crate::error::{LabError, Result};

/// Parses an order id from a path segment.
///
/// Order ids are positive integers that fit the `integer` column of the order
/// table.
pub fn parse_order_id(raw: &str) -> Result<i32> {
    parse_id(raw, "order")
}

/// Same rules as [`parse_order_id`] for any other integer key; `kind` only
/// shapes the error message.
pub fn parse_id(raw: &str, kind: &str) -> Result<i32> {
    let raw = raw.trim();
    let id: i32 = raw.parse().map_err(|_| {
        LabError::InvalidId(format!("'{}' is not an integer {} id", raw, kind))
    })?;

    if id <= 0 {
        return Err(LabError::InvalidId(format!(
            "{} id must be positive, got {}",
            kind, id
        )));
    }

    Ok(id)
}

/// Required text field: trimmed, non-empty, at most `max_chars` characters.
pub fn required_text(value: &str, field: &str, max_chars: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LabError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_chars {
        return Err(LabError::Validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(parse_order_id("1").unwrap(), 1);
        assert_eq!(parse_order_id("84577").unwrap(), 84577);
        assert_eq!(parse_order_id(" 42 ").unwrap(), 42);
        assert_eq!(parse_order_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn test_invalid_ids() {
        assert!(parse_order_id("").is_err());
        assert!(parse_order_id("0").is_err());
        assert!(parse_order_id("-5").is_err());
        assert!(parse_order_id("12a").is_err());
        assert!(parse_order_id("1.5").is_err());
        assert!(parse_order_id("2147483648").is_err()); // overflows integer column
    }

    #[test]
    fn test_error_names_the_kind() {
        let err = parse_id("x", "notification").unwrap_err();
        assert_eq!(err.to_string(), "Invalid id: 'x' is not an integer notification id");
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("  Results ready ", "title", 200).unwrap(), "Results ready");
        assert!(matches!(
            required_text("   ", "title", 200),
            Err(LabError::Validation(_))
        ));
        assert!(required_text("ñandú", "type", 5).is_ok());
        assert!(required_text("abcdef", "type", 5).is_err());
    }
}
