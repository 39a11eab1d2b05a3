//! Data-access layer.
//!
//! [`Repository`] wraps a store handle (a pooled connection or an open
//! transaction) and bounds every call with a request-derived deadline. Entity
//! operations live in the per-entity submodules; all of them classify failures
//! through [`error::classify`].

use std::any::Any;
use std::backtrace::Backtrace;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio_util::sync::DropGuard;
use tracing::{debug, error, warn};

use crate::context::Ctx;
use crate::pagination::PaginationConfig;

pub mod error;
mod ops;

mod block;
mod parking_lot;
mod parking_slot;
mod user;
mod vehicle;

pub use error::{classify, ErrorContext, ErrorKind, RepoError};

/// Timeouts and paging bounds shared by a repository and every transaction it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoConfig {
    pub query_timeout: Duration,
    pub extended_query_timeout: Duration,
    pub pagination: PaginationConfig,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(60),
            extended_query_timeout: Duration::from_secs(120),
            pagination: PaginationConfig::default(),
        }
    }
}

impl From<&configs::QueryConfig> for RepoConfig {
    fn from(q: &configs::QueryConfig) -> Self {
        Self {
            query_timeout: Duration::from_secs(q.default_timeout_secs),
            extended_query_timeout: Duration::from_secs(q.extended_timeout_secs),
            pagination: PaginationConfig::from(q),
        }
    }
}

pub struct Repository<C> {
    conn: C,
    config: Arc<RepoConfig>,
    in_transaction: bool,
}

/// Repository over the connection pool.
pub type Repo = Repository<DatabaseConnection>;
/// Repository bound to one open transaction; handed to units of work.
pub type TxRepo = Repository<DatabaseTransaction>;

/// A store handle bound to a deadline-carrying context.
pub struct ScopedConn<'a, C> {
    conn: &'a C,
    ctx: Ctx,
}

impl<'a, C: ConnectionTrait> ScopedConn<'a, C> {
    pub fn conn(&self) -> &'a C { self.conn }

    pub fn ctx(&self) -> &Ctx { &self.ctx }

    /// Run a store call under this scope's cancellation and deadline.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, DbErr>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        self.ctx.run(fut).await
    }
}

impl Repo {
    pub fn new(conn: DatabaseConnection, config: RepoConfig) -> Self {
        Self { conn, config: Arc::new(config), in_transaction: false }
    }

    /// Run `f` inside one transaction bounded by the default query timeout.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err` or panics.
    /// A panic is contained and reported as an [`ErrorKind::Internal`] error.
    pub async fn transaction<T, F>(&self, ctx: &Ctx, f: F) -> Result<T, RepoError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c TxRepo, &'c Ctx) -> BoxFuture<'c, Result<T, RepoError>> + Send,
    {
        self.run_in_transaction(ctx, self.config.query_timeout, f).await
    }

    /// Same as [`Repo::transaction`] with the extended timeout, for bulk work.
    pub async fn transaction_extended<T, F>(&self, ctx: &Ctx, f: F) -> Result<T, RepoError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c TxRepo, &'c Ctx) -> BoxFuture<'c, Result<T, RepoError>> + Send,
    {
        self.run_in_transaction(ctx, self.config.extended_query_timeout, f).await
    }

    async fn run_in_transaction<T, F>(&self, ctx: &Ctx, timeout: Duration, f: F) -> Result<T, RepoError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c TxRepo, &'c Ctx) -> BoxFuture<'c, Result<T, RepoError>> + Send,
    {
        let (scoped, _release) = self.scoped(ctx, timeout);
        let txn = scoped
            .run(scoped.conn().begin())
            .await
            .map_err(|e| classify("Transaction.Begin", e, "timeout_secs", &timeout.as_secs()))?;

        let tx = Repository { conn: txn, config: Arc::clone(&self.config), in_transaction: true };
        // f is called inside the guarded future so a panic before its first await is contained too
        let outcome = AssertUnwindSafe(async { f(&tx, scoped.ctx()).await }).catch_unwind().await;
        let Repository { conn: txn, .. } = tx;

        match outcome {
            Ok(Ok(value)) => {
                scoped
                    .run(txn.commit())
                    .await
                    .map_err(|e| classify("Transaction.Commit", e, "timeout_secs", &timeout.as_secs()))?;
                debug!("transaction committed");
                Ok(value)
            }
            Ok(Err(err)) => {
                error!(kind = %err.kind, error = %err, caller = %err.context.caller, "transaction failed, rolling back");
                self.rollback(txn).await;
                Err(err)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                {
                    let trace = Backtrace::force_capture();
                    error!(panic = %message, backtrace = %trace, "panic inside transaction, rolling back");
                }
                self.rollback(txn).await;
                Err(RepoError::internal(format!("transaction panicked: {message}")))
            }
        }
    }

    /// Rollback must still happen when the request context is already done,
    /// so it is bounded by its own timer instead of the scoped context.
    async fn rollback(&self, txn: DatabaseTransaction) {
        match tokio::time::timeout(self.config.query_timeout, txn.rollback()).await {
            Ok(Ok(())) => debug!("transaction rolled back"),
            Ok(Err(e)) => warn!(error = %e, "transaction rollback failed"),
            Err(_) => warn!(timeout_secs = self.config.query_timeout.as_secs(), "transaction rollback timed out"),
        }
    }
}

impl<C: ConnectionTrait> Repository<C> {
    pub fn config(&self) -> &RepoConfig { &self.config }

    pub fn conn(&self) -> &C { &self.conn }

    pub fn in_transaction(&self) -> bool { self.in_transaction }

    /// Scoped handle bounded by the default query timeout.
    /// The guard releases the derived context; hold it until the last store call returns.
    pub fn with_timeout(&self, ctx: &Ctx) -> (ScopedConn<'_, C>, DropGuard) {
        self.scoped(ctx, self.config.query_timeout)
    }

    /// Scoped handle bounded by the extended query timeout.
    pub fn with_extended_timeout(&self, ctx: &Ctx) -> (ScopedConn<'_, C>, DropGuard) {
        self.scoped(ctx, self.config.extended_query_timeout)
    }

    fn scoped(&self, ctx: &Ctx, timeout: Duration) -> (ScopedConn<'_, C>, DropGuard) {
        let (ctx, guard) = ctx.with_timeout(timeout);
        (ScopedConn { conn: &self.conn, ctx }, guard)
    }

    /// Handle for one repository call. Inside a transaction the unit of work's
    /// context already carries the transaction deadline, so no new one is derived.
    pub(crate) fn scope(&self, ctx: &Ctx) -> (ScopedConn<'_, C>, Option<DropGuard>) {
        if self.in_transaction {
            return (ScopedConn { conn: &self.conn, ctx: ctx.clone() }, None);
        }
        let (scoped, guard) = self.with_timeout(ctx);
        (scoped, Some(guard))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests;
