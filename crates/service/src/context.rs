//! Request-scoped cancellation and deadlines.
//!
//! A [`Ctx`] is derived per inbound call. Children inherit the parent's
//! cancellation and can only tighten its deadline, never extend it.

use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

pub const DEADLINE_EXCEEDED: &str = "context deadline exceeded";
pub const CANCELED: &str = "context canceled";

#[derive(Clone, Debug)]
pub struct Ctx {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for Ctx {
    fn default() -> Self { Self::background() }
}

impl Ctx {
    /// Root context: never cancelled unless [`Ctx::cancel`] is called, no deadline.
    pub fn background() -> Self {
        Self { token: CancellationToken::new(), deadline: None }
    }

    /// Child that is cancelled with the parent, or when the returned guard drops.
    pub fn with_cancel(&self) -> (Ctx, DropGuard) {
        let child = self.token.child_token();
        let guard = child.clone().drop_guard();
        (Ctx { token: child, deadline: self.deadline }, guard)
    }

    /// Child bounded by `min(parent deadline, now + timeout)`.
    /// Keep the guard alive for as long as the child is in use; dropping it releases the child.
    pub fn with_timeout(&self, timeout: Duration) -> (Ctx, DropGuard) {
        let (mut child, guard) = self.with_cancel();
        if let Some(candidate) = Instant::now().checked_add(timeout) {
            child.deadline = Some(match self.deadline {
                Some(parent) if parent < candidate => parent,
                _ => candidate,
            });
        }
        (child, guard)
    }

    pub fn deadline(&self) -> Option<Instant> { self.deadline }

    pub fn cancel(&self) { self.token.cancel() }

    pub fn is_cancelled(&self) -> bool { self.token.is_cancelled() }

    /// Why this context is done, if it is.
    pub fn err(&self) -> Option<&'static str> {
        if self.token.is_cancelled() {
            return Some(CANCELED);
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => Some(DEADLINE_EXCEEDED),
            _ => None,
        }
    }

    /// Drive a store call, aborting it when the context is cancelled or its deadline passes.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, DbErr>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        if let Some(reason) = self.err() {
            return Err(DbErr::Custom(reason.to_string()));
        }
        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DbErr::Custom(CANCELED.to_string())),
            _ = expired => Err(DbErr::Custom(DEADLINE_EXCEEDED.to_string())),
            res = fut => res,
        }
    }
}
