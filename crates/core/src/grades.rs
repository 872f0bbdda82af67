//! Grade tables: gemstone categories, quality and purity grades, and the
//! per-carat base prices they feed into the pricing engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GemCategory {
    Diamond,
    Ruby,
    Sapphire,
    Emerald,
    Amethyst,
    Opal,
    Topaz,
    #[default]
    Unknown,
}

impl GemCategory {
    pub const ALL: [GemCategory; 8] = [
        GemCategory::Diamond,
        GemCategory::Ruby,
        GemCategory::Sapphire,
        GemCategory::Emerald,
        GemCategory::Amethyst,
        GemCategory::Opal,
        GemCategory::Topaz,
        GemCategory::Unknown,
    ];

    /// Display label, also the text written to the history log.
    pub fn label(self) -> &'static str {
        match self {
            GemCategory::Diamond => "Diamond",
            GemCategory::Ruby => "Ruby",
            GemCategory::Sapphire => "Sapphire",
            GemCategory::Emerald => "Emerald",
            GemCategory::Amethyst => "Amethyst",
            GemCategory::Opal => "Opal",
            GemCategory::Topaz => "Topaz",
            GemCategory::Unknown => "Unknown",
        }
    }

    /// Arabic display label. Older history logs carry these.
    pub fn label_ar(self) -> &'static str {
        match self {
            GemCategory::Diamond => "ألماس",
            GemCategory::Ruby => "ياقوت",
            GemCategory::Sapphire => "ياقوت أزرق",
            GemCategory::Emerald => "زمرد",
            GemCategory::Amethyst => "جمشت",
            GemCategory::Opal => "أوبال",
            GemCategory::Topaz => "توباز",
            GemCategory::Unknown => "غير محدد",
        }
    }

    /// Resolves either display label, case-insensitively for the English one.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label) || c.label_ar() == label)
    }

    pub fn base_usd_per_carat(self) -> f64 {
        BASE_USD_PER_CARAT
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, usd)| *usd)
            .unwrap_or(UNKNOWN_BASE_USD_PER_CARAT)
    }
}

impl std::fmt::Display for GemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const UNKNOWN_BASE_USD_PER_CARAT: f64 = 250.0;

// Reference values, not market quotes.
const BASE_USD_PER_CARAT: &[(GemCategory, f64)] = &[
    (GemCategory::Diamond, 6500.0),
    (GemCategory::Ruby, 4200.0),
    (GemCategory::Sapphire, 2800.0),
    (GemCategory::Emerald, 3000.0),
    (GemCategory::Amethyst, 120.0),
    (GemCategory::Opal, 350.0),
    (GemCategory::Topaz, 200.0),
    (GemCategory::Unknown, UNKNOWN_BASE_USD_PER_CARAT),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub const ALL: [QualityGrade; 3] = [QualityGrade::A, QualityGrade::B, QualityGrade::C];

    pub fn code(self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            QualityGrade::A => 1.15,
            QualityGrade::B => 1.00,
            QualityGrade::C => 0.85,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurityGrade {
    IF,
    VVS,
    VS,
    SI,
    I1,
}

impl PurityGrade {
    pub const ALL: [PurityGrade; 5] = [
        PurityGrade::IF,
        PurityGrade::VVS,
        PurityGrade::VS,
        PurityGrade::SI,
        PurityGrade::I1,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PurityGrade::IF => "IF",
            PurityGrade::VVS => "VVS",
            PurityGrade::VS => "VS",
            PurityGrade::SI => "SI",
            PurityGrade::I1 => "I1",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            PurityGrade::IF => 1.25,
            PurityGrade::VVS => 1.15,
            PurityGrade::VS => 1.05,
            PurityGrade::SI => 0.92,
            PurityGrade::I1 => 0.80,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(code))
    }
}
