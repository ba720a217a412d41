//! Symptom triage: canned answers, prompt rendering and the provider
//! fallback chain behind `POST /api/analyze-symptoms`.

pub mod canned;
pub mod chain;
pub mod chat_completions;
pub mod dispatcher;
pub mod gemini;
pub mod prompt;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use canned::*;
pub use chain::*;
pub use chat_completions::*;
pub use dispatcher::*;
pub use gemini::*;
pub use prompt::*;
pub use provider::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{require, ValidationError};

/// User-facing message returned when no provider produced an analysis.
pub const UNAVAILABLE_MESSAGE: &str =
    "AI system temporarily unavailable. Please try again in a few moments.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// Every configured provider failed. Details are logged, never surfaced.
    #[error("AI system temporarily unavailable. Please try again in a few moments.")]
    AllProvidersUnavailable,
}

/// The five body-area categories a patient can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomCategory {
    #[serde(rename = "Head & Neurological")]
    HeadNeurological,
    #[serde(rename = "Chest & Respiratory")]
    ChestRespiratory,
    #[serde(rename = "Abdominal")]
    Abdominal,
    #[serde(rename = "Musculoskeletal")]
    Musculoskeletal,
    #[serde(rename = "Skin")]
    Skin,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 5] = [
        Self::HeadNeurological,
        Self::ChestRespiratory,
        Self::Abdominal,
        Self::Musculoskeletal,
        Self::Skin,
    ];

    /// Label as shown to patients and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HeadNeurological => "Head & Neurological",
            Self::ChestRespiratory => "Chest & Respiratory",
            Self::Abdominal => "Abdominal",
            Self::Musculoskeletal => "Musculoskeletal",
            Self::Skin => "Skin",
        }
    }
}

impl std::fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of an analysis request after JSON decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub category: SymptomCategory,
    pub symptoms: String,
}

impl AnalysisRequest {
    /// Reject blank symptom text. Category validity is enforced by decoding.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Symptoms", &self.symptoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip_through_serde() {
        for category in SymptomCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: SymptomCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result: Result<AnalysisRequest, _> =
            serde_json::from_str(r#"{"category":"Dental","symptoms":"toothache"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn blank_symptoms_fail_validation() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"category":"Skin","symptoms":"   "}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unified_error_message_is_fixed() {
        assert_eq!(
            TriageError::AllProvidersUnavailable.to_string(),
            UNAVAILABLE_MESSAGE
        );
    }
}
