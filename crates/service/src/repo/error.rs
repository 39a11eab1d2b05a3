//! Store-error classification.
//!
//! Every repository failure is mapped onto a two-valued [`ErrorKind`] and logged
//! once, at the point it is classified, with the calling site attached.

use std::fmt::{self, Display};
use std::panic::Location;

use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "record not found";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => f.write_str("not_found"),
            ErrorKind::Internal => f.write_str("internal"),
        }
    }
}

/// Where and on what a failed operation ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub caller: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct RepoError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: ErrorContext,
}

impl RepoError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Internal, message: message.into(), context: ErrorContext::default() }
    }

    pub fn not_found() -> Self {
        Self { kind: ErrorKind::NotFound, message: NOT_FOUND_MESSAGE.to_string(), context: ErrorContext::default() }
    }

    pub fn is_not_found(&self) -> bool { self.kind == ErrorKind::NotFound }

    pub fn status_code(&self) -> u16 { self.kind.status_code() }
}

/// Row-missing conditions reported by the store.
pub fn is_record_not_found(err: &DbErr) -> bool {
    matches!(err, DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated)
}

/// Classify a store error raised by `op` while working on `key = value`.
///
/// Missing rows become [`ErrorKind::NotFound`] with a generic message; everything
/// else is [`ErrorKind::Internal`] and keeps the underlying error text.
#[track_caller]
pub fn classify(op: &str, err: DbErr, key: &str, value: &dyn Display) -> RepoError {
    let caller = Location::caller();
    let context = ErrorContext {
        caller: format!("{}:{}", caller.file(), caller.line()),
        key: key.to_string(),
        value: value.to_string(),
    };

    if is_record_not_found(&err) {
        error!(caller = %context.caller, op, key, value = %context.value, error = %err, "error_404: {} - Repository", op);
        return RepoError { kind: ErrorKind::NotFound, message: NOT_FOUND_MESSAGE.to_string(), context };
    }

    let message = match err {
        DbErr::Custom(msg) => msg,
        other => other.to_string(),
    };
    error!(caller = %context.caller, op, key, value = %context.value, error = %message, "error_500: {} - Repository", op);
    RepoError { kind: ErrorKind::Internal, message, context }
}
