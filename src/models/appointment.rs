use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{require, Id, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Id,
    pub user_id: Id,
    pub doctor_name: String,
    pub clinic_name: String,
    pub date: NaiveDate,
    /// Wall-clock time as entered, `HH:MM`.
    pub time: String,
}

/// Booking payload. The owner comes from the authenticated session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub doctor_name: String,
    pub clinic_name: String,
    pub date: NaiveDate,
    pub time: String,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Doctor name", &self.doctor_name)?;
        require("Clinic name", &self.clinic_name)?;
        if NaiveTime::parse_from_str(self.time.trim(), "%H:%M").is_err() {
            return Err(ValidationError(
                "Invalid time format (expected HH:MM)".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_appointment(self, id: Id, user_id: Id) -> Appointment {
        Appointment {
            id,
            user_id,
            doctor_name: self.doctor_name.trim().to_string(),
            clinic_name: self.clinic_name.trim().to_string(),
            date: self.date,
            time: self.time.trim().to_string(),
        }
    }
}
