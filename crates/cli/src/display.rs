use chrono::{Local, TimeZone};
use gemstone_core::session::Analysis;
use gemstone_core::{HistoryEntry, PriceEstimate};

pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Top labels as `• text (NN%)`, followed by the inferred category.
pub fn analysis_lines(analysis: &Analysis, top: usize) -> Vec<String> {
    let mut lines: Vec<String> = analysis
        .predictions
        .top(top)
        .iter()
        .map(|p| format!("• {} ({}%)", p.text, (p.confidence * 100.0) as u32))
        .collect();
    if lines.is_empty() {
        lines.push("No labels detected.".to_string());
    }
    lines.push(format!("Category: {}", analysis.category));
    lines
}

pub fn estimate_lines(estimate: &PriceEstimate) -> Vec<String> {
    vec![
        format!("{} {}", format_money(estimate.amount), estimate.currency),
        format!(
            "Per carat: {} {}",
            format_money(estimate.per_carat),
            estimate.currency
        ),
    ]
}

pub fn history_line(entry: &HistoryEntry) -> String {
    let when = Local
        .timestamp_millis_opt(entry.timestamp_millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| entry.timestamp_millis.to_string());
    format!(
        "{when}  {}  {} ct  quality {}  purity {}  {} {} ({} {} per carat)",
        entry.category_label,
        entry.weight_carat,
        entry.quality,
        entry.purity,
        format_money(entry.estimated_value),
        entry.currency,
        format_money(entry.per_carat),
        entry.currency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemstone_core::{GemCategory, LabelPrediction, RankedPredictions};

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(13108.619999), "13108.62");
        assert_eq!(format_money(0.0), "0.00");
    }

    #[test]
    fn analysis_shows_top_labels_and_category() {
        let analysis = Analysis {
            predictions: RankedPredictions::rank(vec![
                LabelPrediction {
                    text: "Jewellery".into(),
                    confidence: 0.87,
                },
                LabelPrediction {
                    text: "Ring".into(),
                    confidence: 0.5,
                },
            ]),
            category: GemCategory::Diamond,
        };
        let lines = analysis_lines(&analysis, 1);
        assert_eq!(lines, vec!["• Jewellery (87%)", "Category: Diamond"]);
    }

    #[test]
    fn empty_analysis_says_so() {
        let lines = analysis_lines(&Analysis::default(), 5);
        assert_eq!(lines[0], "No labels detected.");
        assert_eq!(lines[1], "Category: Unknown");
    }
}
