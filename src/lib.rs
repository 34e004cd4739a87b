pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod registration;
pub mod telemetry;

mod cli;
mod commands;
mod server;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
