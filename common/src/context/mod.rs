//! Cancellation and deadline handle for storage operations
//!
//! Every repository operation receives a [`Context`]. A context is done once
//! its cancellation token fires or its deadline passes; operations started on a
//! done context fail with [`Error::Cancelled`] without touching storage.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Operation context carrying a cancellation token and an optional deadline
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context cancelled together with `parent`
    ///
    /// Cancelling the returned context does not cancel `parent`.
    pub fn from_parent(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    /// Limit the context to `timeout` from now
    ///
    /// An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Limit the context to an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Cancel this context and every context derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Fail with [`Error::Cancelled`] if the context is already done
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(Error::Cancelled("context canceled".to_string()));
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Error::Cancelled("context deadline exceeded".to_string()));
        }
        Ok(())
    }

    /// Drive `operation` to completion unless the context finishes first
    ///
    /// The operation is not polled at all when the context is already done.
    /// When the context fires mid-flight the operation future is dropped, which
    /// aborts whatever I/O it was waiting on.
    pub async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Error::Cancelled("context canceled".to_string())),
            _ = deadline => Err(Error::Cancelled("context deadline exceeded".to_string())),
            result = operation => result,
        }
    }
}
