//! Keyword heuristics mapping generic classifier labels to a gemstone category.

use crate::grades::GemCategory;
use crate::models::RankedPredictions;

/// Checked in order; the first group with a keyword present wins. A generic
/// labeler rarely names the stone, so jewellery terms count as Diamond and
/// shadow any later group.
const KEYWORD_GROUPS: &[(&[&str], GemCategory)] = &[
    (&["diamond", "gem", "jewelry", "jewellery"], GemCategory::Diamond),
    (&["ruby"], GemCategory::Ruby),
    (&["sapphire"], GemCategory::Sapphire),
    (&["emerald"], GemCategory::Emerald),
    (&["amethyst"], GemCategory::Amethyst),
    (&["opal"], GemCategory::Opal),
    (&["topaz"], GemCategory::Topaz),
];

pub fn infer(predictions: &RankedPredictions) -> GemCategory {
    let haystack = predictions
        .as_slice()
        .iter()
        .map(|p| p.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(GemCategory::Unknown)
}
