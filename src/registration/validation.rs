use super::domain::RegistrationRequest;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|error| error.field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields().join(", ");
        write!(f, "registration form has errors in: {fields}")
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate(request: &RegistrationRequest) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "name is required",
        });
    }
    if !email_pattern().is_match(&request.email) {
        errors.push(FieldError {
            field: "email",
            message: "a valid email address is required",
        });
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError {
            field: "password",
            message: "password must be at least 6 characters",
        });
    }
    if let Some(confirmation) = &request.confirm_password {
        if confirmation != &request.password {
            errors.push(FieldError {
                field: "confirm_password",
                message: "passwords do not match",
            });
        }
    }
    if request.agree_to_terms == Some(false) {
        errors.push(FieldError {
            field: "agree_to_terms",
            message: "terms must be accepted",
        });
    }
    if !(0.0..=100.0).contains(&request.percentage) {
        errors.push(FieldError {
            field: "percentage",
            message: "percentage must be between 0 and 100",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
