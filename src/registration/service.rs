use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{RegistrationNotice, RegistrationRequest, StudentId, StudentRecord};
use super::repository::{RegistrationNotifier, RepositoryError, StudentRepository};
use super::validation::{validate, ValidationErrors};
use crate::config::NotificationConfig;

const REGISTERED_MESSAGE: &str =
    "Thank you for registering. We will contact you with more information about your educational options.";
const RECEIVED_MESSAGE: &str = "Your information has been received. We'll contact you soon.";

static STUDENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_student_id() -> StudentId {
    let id = STUDENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    StudentId(format!("stu-{id:06}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Stored, notified, or both.
    Registered,
    /// Neither step succeeded; the submission is still acknowledged.
    Received,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    pub outcome: RegistrationOutcome,
    pub stored: bool,
    pub notified: bool,
    pub message: &'static str,
}

/// Validates, stores and announces student registrations.
pub struct RegistrationService {
    repository: Arc<dyn StudentRepository>,
    notifier: Arc<dyn RegistrationNotifier>,
    recipient: String,
    max_attempts: u8,
}

impl RegistrationService {
    pub fn new(
        repository: Arc<dyn StudentRepository>,
        notifier: Arc<dyn RegistrationNotifier>,
        config: &NotificationConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            recipient: config.recipient.clone(),
            max_attempts: config.max_attempts.max(1),
        }
    }

    pub fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        validate(&request)?;

        let record = StudentRecord::from_request(next_student_id(), request, Utc::now());
        let notice = RegistrationNotice::for_student(&self.recipient, &record);
        let student_id = record.id.clone();

        let stored = match self.repository.insert(record) {
            Ok(stored) => {
                info!(student = %stored.id, "student registration stored");
                true
            }
            Err(err) => {
                warn!(student = %student_id, error = %err, "failed to store registration, continuing with notice");
                false
            }
        };

        let notified = self.send_notice(&notice);

        let outcome = if stored || notified {
            RegistrationOutcome::Registered
        } else {
            RegistrationOutcome::Received
        };

        Ok(RegistrationReceipt {
            student_id: stored.then_some(student_id),
            outcome,
            stored,
            notified,
            message: match outcome {
                RegistrationOutcome::Registered => REGISTERED_MESSAGE,
                RegistrationOutcome::Received => RECEIVED_MESSAGE,
            },
        })
    }

    pub fn get(&self, id: &StudentId) -> Result<Option<StudentRecord>, RegistrationError> {
        Ok(self.repository.fetch(id)?)
    }

    pub fn registered_count(&self) -> Result<usize, RegistrationError> {
        Ok(self.repository.count()?)
    }

    fn send_notice(&self, notice: &RegistrationNotice) -> bool {
        for attempt in 1..=self.max_attempts {
            match self.notifier.notify(notice) {
                Ok(()) => return true,
                Err(err) => {
                    warn!(attempt, max_attempts = self.max_attempts, error = %err, "registration notice failed")
                }
            }
        }
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
