//! Student registration intake.

mod domain;
mod repository;
mod service;
mod validation;

pub use domain::{RegistrationNotice, RegistrationRequest, StudentId, StudentRecord, NOTICE_SUBJECT};
pub use repository::{
    InMemoryNotifier, InMemoryStudentRepository, NotifyError, RegistrationNotifier,
    RepositoryError, StudentRepository, TracingNotifier,
};
pub use service::{
    RegistrationError, RegistrationOutcome, RegistrationReceipt, RegistrationService,
};
pub use validation::{validate, FieldError, ValidationErrors};
