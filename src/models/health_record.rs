use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{require, Id, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: Id,
    pub user_id: Id,
    pub diagnosis: String,
    pub doctor: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthRecord {
    pub diagnosis: String,
    pub doctor: String,
    pub date: NaiveDate,
}

impl NewHealthRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Diagnosis", &self.diagnosis)?;
        require("Doctor", &self.doctor)
    }

    pub(crate) fn into_record(self, id: Id, user_id: Id) -> HealthRecord {
        HealthRecord {
            id,
            user_id,
            diagnosis: self.diagnosis.trim().to_string(),
            doctor: self.doctor.trim().to_string(),
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_diagnosis_is_rejected() {
        let record = NewHealthRecord {
            diagnosis: "".into(),
            doctor: "Dr. Lin".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        };
        assert_eq!(
            record.validate(),
            Err(ValidationError("Diagnosis is required".into()))
        );
    }

    #[test]
    fn into_record_trims_text() {
        let record = NewHealthRecord {
            diagnosis: "  Seasonal allergic rhinitis ".into(),
            doctor: "Dr. Lin".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        }
        .into_record(3, 1);
        assert_eq!(record.diagnosis, "Seasonal allergic rhinitis");
        assert_eq!(record.id, 3);
        assert_eq!(record.user_id, 1);
    }
}
