//! # Validation Module
//!
//! Input validation and coercion utilities for Beshob Invoice.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  Catalog / Settings authoring  (admin panel)                            │
//! │  ├── validate_product_name, validate_size_label                         │
//! │  ├── validate_catalog_price  (must be > 0)                              │
//! │  └── validate_fee            (must be ≥ 0)                              │
//! │           │                                                             │
//! │           └── Rejects with ValidationError, nothing changes             │
//! │                                                                         │
//! │  Invoice form fields  (order entry)                                     │
//! │  ├── parse_amount, parse_quantity   → invalid coerces to 0             │
//! │  └── sanitize_phone                 → non-digits stripped, truncated   │
//! │           │                                                             │
//! │           └── Never errors; is_phone_invalid only flags                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beshob_core::validation::{parse_amount, sanitize_phone};
//! use beshob_core::Money;
//!
//! assert_eq!(parse_amount("৳1,200"), Money::from_taka(1200));
//! assert_eq!(parse_amount("abc"), Money::zero());
//! assert_eq!(sanitize_phone("+88 017-1234-5678"), "88017123456");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PHONE_DIGITS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted by the catalog.
const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use beshob_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Pure Ghee").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a size label (for a product size or the settings vocabulary).
pub fn validate_size_label(label: &str) -> ValidationResult<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "size label".to_string(),
        });
    }

    Ok(())
}

/// Validates a price entered while authoring a catalog product.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Invoice lines accept a zero price; only catalog authoring is strict.
pub fn validate_catalog_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "size price".to_string(),
        });
    }

    Ok(())
}

/// Validates a default delivery fee.
///
/// ## Rules
/// - Must be non-negative (free delivery is allowed)
pub fn validate_fee(field: &str, fee: Money) -> ValidationResult<()> {
    if fee.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Phone Input
// =============================================================================

/// Strips every non-digit character and truncates to 11 digits.
///
/// ## User Workflow
/// ```text
/// User types: "017-1234-56789"
///      │
///      ▼
/// sanitize_phone ← THIS FUNCTION
///      │
///      ├── strip non-digits  → "017123456789"
///      └── keep first 11     → "01712345678"
/// ```
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// True when a phone number has been started but is not 11 digits long.
///
/// An empty phone is not flagged.
pub fn is_phone_invalid(phone: &str) -> bool {
    let len = phone.chars().count();
    len > 0 && len != MAX_PHONE_DIGITS
}

// =============================================================================
// Numeric Input
// =============================================================================

/// Parses a Taka amount typed into a form field.
///
/// ## Rules
/// - Surrounding whitespace, the `৳` sign and thousands commas are ignored
/// - Up to two decimal places are kept (poisha); further digits are dropped
/// - Trailing garbage after the number is ignored ("450tk" → ৳450)
/// - Empty, non-numeric or negative input becomes ৳0
///
/// Never fails.
pub fn parse_amount(input: &str) -> Money {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '৳' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.starts_with('-') {
        return Money::zero();
    }
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);

    let whole_digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &cleaned[whole_digits.len()..];
    let fraction_digits: String = match rest.strip_prefix('.') {
        Some(fraction) => fraction
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .take(2)
            .collect(),
        None => String::new(),
    };

    if whole_digits.is_empty() && fraction_digits.is_empty() {
        return Money::zero();
    }

    let Ok(taka) = digits_to_i64(&whole_digits) else {
        return Money::zero();
    };
    let poisha = match fraction_digits.len() {
        0 => 0,
        1 => digits_to_i64(&fraction_digits).unwrap_or(0) * 10,
        _ => digits_to_i64(&fraction_digits).unwrap_or(0),
    };

    match taka.checked_mul(100).and_then(|p| p.checked_add(poisha)) {
        Some(total) => Money::from_poisha(total),
        None => Money::zero(),
    }
}

/// Parses a quantity typed into a form field.
///
/// Leading digits are taken ("3 pcs" → 3). Empty, non-numeric or negative
/// input becomes 0; values past `u32::MAX` saturate. Never fails.
pub fn parse_quantity(input: &str) -> u32 {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return 0;
    }
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

fn digits_to_i64(digits: &str) -> Result<i64, std::num::ParseIntError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse::<i64>()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Organic Honey").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_size_label() {
        assert!(validate_size_label("500gm").is_ok());
        assert!(validate_size_label(" ").is_err());
    }

    #[test]
    fn test_validate_catalog_price() {
        assert!(validate_catalog_price(Money::from_taka(450)).is_ok());
        assert!(validate_catalog_price(Money::zero()).is_err());
        assert!(validate_catalog_price(Money::from_taka(-5)).is_err());
    }

    #[test]
    fn test_validate_fee() {
        assert!(validate_fee("inside fee", Money::zero()).is_ok());
        assert!(validate_fee("inside fee", Money::from_taka(60)).is_ok());
        assert!(validate_fee("inside fee", Money::from_taka(-1)).is_err());
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(sanitize_phone("01712345678"), "01712345678");
        assert_eq!(sanitize_phone("0171-234 5678"), "01712345678");
        assert_eq!(sanitize_phone("017123456789"), "01712345678");
        assert_eq!(sanitize_phone("phone"), "");
        assert_eq!(sanitize_phone("০১৭"), "");
    }

    #[test]
    fn test_is_phone_invalid() {
        assert!(!is_phone_invalid(""));
        assert!(!is_phone_invalid("01712345678"));
        assert!(is_phone_invalid("0171"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000"), Money::from_taka(1000));
        assert_eq!(parse_amount(" ৳1,200 "), Money::from_taka(1200));
        assert_eq!(parse_amount("12.5"), Money::from_poisha(1250));
        assert_eq!(parse_amount("12.345"), Money::from_poisha(1234));
        assert_eq!(parse_amount(".75"), Money::from_poisha(75));
        assert_eq!(parse_amount("450tk"), Money::from_taka(450));
    }

    #[test]
    fn test_parse_amount_coerces_to_zero() {
        assert_eq!(parse_amount(""), Money::zero());
        assert_eq!(parse_amount("abc"), Money::zero());
        assert_eq!(parse_amount("-50"), Money::zero());
        assert_eq!(parse_amount("99999999999999999999999"), Money::zero());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2"), 2);
        assert_eq!(parse_quantity(" 3 pcs"), 3);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("x"), 0);
        assert_eq!(parse_quantity("-4"), 0);
        assert_eq!(parse_quantity("99999999999"), u32::MAX);
    }
}
