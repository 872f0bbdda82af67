//! Input checks run before anything reaches the pricing engine or storage.

use crate::grades::{GemCategory, PurityGrade, QualityGrade};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("enter a valid weight in carats (got '{0}')")]
    InvalidWeight(String),
    #[error("enter a valid conversion rate to USD (got '{0}')")]
    InvalidRate(String),
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),
    #[error("unknown {kind} '{value}'")]
    UnknownChoice { kind: &'static str, value: String },
    #[error("not an image: {0}")]
    UnsupportedImage(String),
}

/// Parses a strictly positive decimal, accepting `,` as the decimal separator.
fn parse_positive(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

pub fn parse_weight(text: &str) -> Result<f64, ValidationError> {
    parse_positive(text).ok_or_else(|| ValidationError::InvalidWeight(text.to_string()))
}

pub fn parse_rate(text: &str) -> Result<f64, ValidationError> {
    parse_positive(text).ok_or_else(|| ValidationError::InvalidRate(text.to_string()))
}

pub fn check_rate(rate: f64) -> Result<f64, ValidationError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(ValidationError::InvalidRate(rate.to_string()))
    }
}

/// Currency codes end up as a field of a comma-separated line, so separators
/// are refused.
pub fn parse_currency(text: &str) -> Result<String, ValidationError> {
    let code = text.trim();
    if code.is_empty() || code.contains([',', '\n', '\r']) {
        return Err(ValidationError::InvalidCurrency(text.to_string()));
    }
    Ok(code.to_uppercase())
}

pub fn parse_quality(text: &str) -> Result<QualityGrade, ValidationError> {
    QualityGrade::from_code(text).ok_or_else(|| ValidationError::UnknownChoice {
        kind: "quality grade",
        value: text.to_string(),
    })
}

pub fn parse_purity(text: &str) -> Result<PurityGrade, ValidationError> {
    PurityGrade::from_code(text).ok_or_else(|| ValidationError::UnknownChoice {
        kind: "purity grade",
        value: text.to_string(),
    })
}

pub fn parse_category(text: &str) -> Result<GemCategory, ValidationError> {
    GemCategory::from_label(text).ok_or_else(|| ValidationError::UnknownChoice {
        kind: "category",
        value: text.to_string(),
    })
}

/// Sniffs the payload and returns its MIME type when it is an image.
pub fn check_image(bytes: &[u8]) -> Result<&'static str, ValidationError> {
    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.mime_type()),
        Some(kind) => Err(ValidationError::UnsupportedImage(kind.mime_type().to_string())),
        None => Err(ValidationError::UnsupportedImage("unrecognized data".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_accepts_comma_decimal() {
        assert_eq!(parse_weight("1,5"), Ok(1.5));
        assert_eq!(parse_weight(" 2.25 "), Ok(2.25));
    }

    #[test]
    fn weight_rejects_non_positive_and_garbage() {
        for bad in ["0", "-1", "", "abc", "NaN", "inf"] {
            assert!(
                matches!(parse_weight(bad), Err(ValidationError::InvalidWeight(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn rate_rules() {
        assert_eq!(parse_rate("3,75"), Ok(3.75));
        assert!(parse_rate("0").is_err());
        assert!(check_rate(-2.0).is_err());
        assert!(check_rate(f64::NAN).is_err());
        assert_eq!(check_rate(0.27), Ok(0.27));
    }

    #[test]
    fn currency_rules() {
        assert_eq!(parse_currency(" sar "), Ok("SAR".to_string()));
        assert!(parse_currency("").is_err());
        assert!(parse_currency("US,D").is_err());
    }

    #[test]
    fn grade_and_category_choices() {
        assert_eq!(parse_quality("b"), Ok(QualityGrade::B));
        assert_eq!(parse_purity("If"), Ok(PurityGrade::IF));
        assert_eq!(parse_category("ruby"), Ok(GemCategory::Ruby));
        assert!(matches!(
            parse_purity("FL"),
            Err(ValidationError::UnknownChoice { kind: "purity grade", .. })
        ));
    }

    #[test]
    fn image_sniffing() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(check_image(&png), Ok("image/png"));
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0];
        assert_eq!(check_image(&jpeg), Ok("image/jpeg"));
        assert!(check_image(b"plain text").is_err());
        assert!(check_image(b"%PDF-1.7 rest").is_err());
    }
}
