use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::triage::SymptomCategory;

/// A stored symptom analysis, kept so patients can revisit past answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub id: Id,
    pub user_id: Id,
    pub category: SymptomCategory,
    pub symptoms: String,
    pub analysis: String,
    pub date: DateTime<Utc>,
}

/// Insert payload produced by the handler after the dispatcher answered.
#[derive(Debug, Clone)]
pub struct NewAiAnalysis {
    pub user_id: Id,
    pub category: SymptomCategory,
    pub symptoms: String,
    pub analysis: String,
}

impl NewAiAnalysis {
    pub(crate) fn into_analysis(self, id: Id, date: DateTime<Utc>) -> AiAnalysis {
        AiAnalysis {
            id,
            user_id: self.user_id,
            category: self.category,
            symptoms: self.symptoms,
            analysis: self.analysis,
            date,
        }
    }
}
