//! Deterministic price estimate from category, weight and grades.

use crate::grades::{GemCategory, PurityGrade, QualityGrade};
use crate::models::PriceEstimate;

/// Larger stones are rarer. Tiers include their lower bound.
pub fn weight_multiplier(weight_carat: f64) -> f64 {
    if weight_carat >= 5.0 {
        1.35
    } else if weight_carat >= 2.0 {
        1.18
    } else if weight_carat >= 1.0 {
        1.05
    } else {
        1.0
    }
}

/// `currency_to_usd` is the USD value of one unit of `currency`; a
/// non-positive rate leaves the figures in USD. The currency code is passed
/// through unchecked.
pub fn estimate(
    category: GemCategory,
    weight_carat: f64,
    quality: QualityGrade,
    purity: PurityGrade,
    currency: &str,
    currency_to_usd: f64,
) -> PriceEstimate {
    // f64::max also maps NaN to 0.
    let w = weight_carat.max(0.0);
    let base = category.base_usd_per_carat();

    let usd_per_carat = base * quality.multiplier() * purity.multiplier() * weight_multiplier(w);
    let total_usd = usd_per_carat * w;

    let (amount, per_carat) = if currency_to_usd > 0.0 {
        (total_usd / currency_to_usd, usd_per_carat / currency_to_usd)
    } else {
        (total_usd, usd_per_carat)
    };

    PriceEstimate {
        currency: currency.to_string(),
        amount,
        per_carat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn ruby_two_carats_grade_a_vvs() {
        let e = estimate(
            GemCategory::Ruby,
            2.0,
            QualityGrade::A,
            PurityGrade::VVS,
            "USD",
            1.0,
        );
        let per_carat = 4200.0 * 1.15 * 1.15 * 1.18;
        assert!(close(e.per_carat, per_carat));
        assert!(close(e.amount, per_carat * 2.0));
        assert!((e.per_carat - 6554.31).abs() < 0.01);
        assert!((e.amount - 13108.62).abs() < 0.01);
        assert_eq!(e.currency, "USD");
    }

    #[test]
    fn tier_boundaries() {
        let cases = [
            (0.99, 1.0),
            (1.0, 1.05),
            (1.99, 1.05),
            (2.0, 1.18),
            (4.99, 1.18),
            (5.0, 1.35),
        ];
        for (w, m) in cases {
            assert_eq!(weight_multiplier(w), m, "weight {w}");
        }
        let mut last = 0.0;
        for (w, _) in cases {
            let m = weight_multiplier(w);
            assert!(m >= last);
            last = m;
        }
    }

    #[test]
    fn non_positive_rate_is_not_applied() {
        let args = (GemCategory::Emerald, 1.5, QualityGrade::B, PurityGrade::VS);
        let zero = estimate(args.0, args.1, args.2, args.3, "EUR", 0.0);
        let negative = estimate(args.0, args.1, args.2, args.3, "EUR", -1.0);
        let usd = estimate(args.0, args.1, args.2, args.3, "EUR", 1.0);
        assert_eq!(zero.amount, negative.amount);
        assert_eq!(zero.amount, usd.amount);
        assert_eq!(zero.per_carat, negative.per_carat);
    }

    #[test]
    fn rate_divides_usd_figures() {
        // 1 SAR = 0.2666 USD
        let usd = estimate(GemCategory::Topaz, 3.0, QualityGrade::C, PurityGrade::SI, "USD", 1.0);
        let sar = estimate(GemCategory::Topaz, 3.0, QualityGrade::C, PurityGrade::SI, "SAR", 0.2666);
        assert!(close(sar.amount, usd.amount / 0.2666));
        assert!(close(sar.per_carat, usd.per_carat / 0.2666));
        assert_eq!(sar.currency, "SAR");
    }

    #[test]
    fn negative_weight_is_clamped() {
        let e = estimate(GemCategory::Diamond, -3.0, QualityGrade::A, PurityGrade::IF, "USD", 1.0);
        assert_eq!(e.amount, 0.0);
        assert!(close(e.per_carat, 6500.0 * 1.15 * 1.25));
    }

    #[test]
    fn unknown_category_uses_fallback_price() {
        let e = estimate(GemCategory::Unknown, 1.0, QualityGrade::B, PurityGrade::VS, "USD", 1.0);
        assert!(close(e.per_carat, 250.0 * 1.05 * 1.05));
    }
}
