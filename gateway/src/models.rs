//! Backend resource DTOs.
//!
//! DESIGN
//! ======
//! These types mirror the REST payloads. The backend owns every record; the
//! client only holds transient copies for display and edit forms. `grade` and
//! `roll_number` arrive as numbers or strings depending on the endpoint, so
//! both are normalized to strings on the way in.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::Date;

use crate::dates;

pub type DriveId = i64;
pub type StudentId = i64;

/// A scheduled vaccination event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drive {
    pub id: DriveId,
    pub name: String,
    /// ISO date, possibly with a time suffix.
    pub date: String,
    /// Free-form grade range such as `5-10` or `5,6,7`.
    #[serde(default, deserialize_with = "deserialize_string_from_scalar")]
    pub target_grades: String,
}

impl Drive {
    #[must_use]
    pub fn calendar_date(&self) -> Option<Date> {
        dates::parse_iso_date(&self.date)
    }

    /// Edit-form values for this drive (date trimmed to the day).
    #[must_use]
    pub fn to_input(&self) -> DriveInput {
        DriveInput {
            name: self.name.clone(),
            date: self.date.split('T').next().unwrap_or_default().to_owned(),
            target_grades: self.target_grades.clone(),
        }
    }
}

/// Create/update body for a drive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub name: String,
    pub date: String,
    pub target_grades: String,
}

/// A student in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub grade: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub roll_number: String,
    #[serde(default)]
    pub vaccination_status: bool,
    #[serde(default)]
    pub vaccinated_in: Option<DriveId>,
}

/// Create/update body for a student. The drive link is written separately
/// as a [`VaccinationRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StudentInput {
    pub name: String,
    pub grade: String,
    pub roll_number: String,
    pub vaccination_status: bool,
}

/// Validated student form: the student body plus the drive they were
/// vaccinated in, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentSubmission {
    pub student: StudentInput,
    pub vaccinated_in: Option<DriveId>,
}

/// Link between a student and the drive that vaccinated them. Unique per pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "student")]
    pub student_id: StudentId,
    #[serde(rename = "drive")]
    pub drive_id: DriveId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_name: Option<String>,
}

/// Vaccinated / not-vaccinated counts for one grade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeTally {
    #[serde(default)]
    pub vaccinated: u32,
    #[serde(default)]
    pub not_vaccinated: u32,
}

impl GradeTally {
    #[must_use]
    pub fn total(self) -> u32 {
        self.vaccinated.saturating_add(self.not_vaccinated)
    }
}

/// Body of `GET /reports/dashboard/metrics/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub students_vaccinated: u32,
    /// Keyed by grade label. Map order is not display order; see
    /// [`crate::metrics::grade_breakdown`].
    #[serde(default)]
    pub vaccination_trend: BTreeMap<String, GradeTally>,
}

impl DashboardMetrics {
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.total_students.saturating_sub(self.students_vaccinated)
    }
}

/// Body of `POST /auth/register/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn deserialize_string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}
