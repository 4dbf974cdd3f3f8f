use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("backend responded with status {status}{}", detail_suffix(.detail))]
    Backend { status: u16, detail: Option<String> },
    #[error("{0}")]
    Validation(String),
    #[error("No ticket selected.")]
    NoSelection,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Message shown in the alert region. Backend failures surface the
    /// body's `detail` when present; `fallback` names the operation for
    /// the generic status-coded message ("Request failed", "Delete failed").
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Backend { status, detail } => detail
                .clone()
                .unwrap_or_else(|| format!("{fallback} with status {status}")),
            other => other.to_string(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

pub type AppResult<T> = Result<T, AppError>;
