use crate::eligibility::Stream;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOTICE_SUBJECT: &str = "New Student Registration on EduPathfinder";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration form as submitted. Passwords are validated and then dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, alias = "confirmPassword")]
    pub confirm_password: Option<String>,
    #[serde(default, alias = "agreeToTerms")]
    pub agree_to_terms: Option<bool>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "pucStream")]
    pub stream: Stream,
    #[serde(default, alias = "pucPercentage")]
    pub percentage: f64,
    #[serde(default, alias = "preferredDegree")]
    pub preferred_degree: Option<String>,
    #[serde(default, alias = "preferredLocation")]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub stream: Stream,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub registered_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl StudentRecord {
    pub fn from_request(
        id: StudentId,
        request: RegistrationRequest,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: non_blank(request.phone),
            stream: request.stream,
            percentage: request.percentage,
            preferred_degree: non_blank(request.preferred_degree),
            preferred_location: non_blank(request.preferred_location),
            notes: non_blank(request.notes),
            registered_at,
        }
    }
}

/// Message sent to the admissions inbox for every registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationNotice {
    pub recipient: String,
    pub subject: String,
    pub message: String,
}

impl RegistrationNotice {
    pub fn for_student(recipient: &str, record: &StudentRecord) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: NOTICE_SUBJECT.to_string(),
            message: format!(
                "A new student has registered:\nName: {}\nEmail: {}",
                record.name, record.email
            ),
        }
    }
}
