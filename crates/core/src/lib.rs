//! Core library: label classification, category inference, pricing and the
//! valuation history log.

pub mod classifier;
pub mod config;
pub mod error;
pub mod grades;
pub mod history;
pub mod inference;
pub mod models;
pub mod pipeline;
pub mod prefs;
pub mod pricing;
pub mod session;
pub mod validate;

pub use error::ValuationError;
pub use grades::{GemCategory, PurityGrade, QualityGrade};
pub use models::{HistoryEntry, LabelPrediction, PriceEstimate, RankedPredictions};
