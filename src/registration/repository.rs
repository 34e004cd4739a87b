use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use super::domain::{RegistrationNotice, StudentId, StudentRecord};

/// Storage abstraction so the service can be exercised with failing adapters.
pub trait StudentRepository: Send + Sync {
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RepositoryError>;
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("a student with email {0} is already registered")]
    Conflict(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the admissions inbox (e-mail, chat webhook, log).
pub trait RegistrationNotifier: Send + Sync {
    fn notify(&self, notice: &RegistrationNotice) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Registrations keyed by id; emails are unique case-insensitively.
#[derive(Default, Clone)]
pub struct InMemoryStudentRepository {
    records: Arc<Mutex<HashMap<StudentId, StudentRecord>>>,
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

impl StudentRepository for InMemoryStudentRepository {
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned())?;
        let duplicate = guard
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&record.email));
        if duplicate {
            return Err(RepositoryError::Conflict(record.email));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned())?;
        Ok(guard.get(id).cloned())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned())?;
        Ok(guard.len())
    }
}

/// Writes each notice to the log. Used when no outbound transport is configured.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl RegistrationNotifier for TracingNotifier {
    fn notify(&self, notice: &RegistrationNotice) -> Result<(), NotifyError> {
        info!(
            recipient = %notice.recipient,
            subject = %notice.subject,
            message = %notice.message,
            "registration notice"
        );
        Ok(())
    }
}

/// Keeps every delivered notice so callers can inspect them.
#[derive(Default, Clone)]
pub struct InMemoryNotifier {
    notices: Arc<Mutex<Vec<RegistrationNotice>>>,
}

impl RegistrationNotifier for InMemoryNotifier {
    fn notify(&self, notice: &RegistrationNotice) -> Result<(), NotifyError> {
        let mut guard = self
            .notices
            .lock()
            .map_err(|_| NotifyError::Transport("notice mutex poisoned".to_string()))?;
        guard.push(notice.clone());
        Ok(())
    }
}

impl InMemoryNotifier {
    pub fn notices(&self) -> Vec<RegistrationNotice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
