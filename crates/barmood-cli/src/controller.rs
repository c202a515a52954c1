//! Single-run controller: explicit in-progress state plus cancellation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("an analysis is already running")]
    AlreadyRunning,

    #[error("analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

#[derive(Default)]
struct Inner {
    running: AtomicBool,
    cancel: Mutex<Option<CancellationToken>>,
}

impl Inner {
    fn set_token(&self, token: Option<CancellationToken>) {
        *self.cancel.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

/// Resets the controller to idle when the run task ends, even by panic.
struct RunningGuard(Arc<Inner>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.set_token(None);
        self.0.running.store(false, Ordering::SeqCst);
    }
}

/// Allows at most one run at a time and lets the caller cancel it.
#[derive(Clone, Default)]
pub struct RunController {
    inner: Arc<Inner>,
}

/// Handle to a started run.
pub struct RunHandle<T> {
    task: JoinHandle<T>,
}

impl<T> RunHandle<T> {
    /// Waits for the run task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Join`] if the task panicked.
    pub async fn join(self) -> Result<T, ControllerError> {
        Ok(self.task.await?)
    }
}

impl RunController {
    #[must_use]
    pub fn state(&self) -> RunState {
        if self.inner.running.load(Ordering::SeqCst) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Spawns the run built by `make_run` on the tokio runtime.
    ///
    /// `make_run` receives the run's cancellation token.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::AlreadyRunning`] while another run is in
    /// progress; `make_run` is not called in that case.
    pub fn start<F, Fut, T>(&self, make_run: F) -> Result<RunHandle<T>, ControllerError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self
            .inner
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ControllerError::AlreadyRunning);
        }

        let token = CancellationToken::new();
        self.inner.set_token(Some(token.clone()));
        let guard = RunningGuard(Arc::clone(&self.inner));
        let run = make_run(token);

        let task = tokio::spawn(async move {
            let _guard = guard;
            run.await
        });
        Ok(RunHandle { task })
    }

    /// Cancels the run in progress. Returns `false` when idle.
    pub fn cancel(&self) -> bool {
        let token = self
            .inner
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => {
                tracing::info!("cancelling analysis run");
                token.cancel();
                true
            }
            None => false,
        }
    }
}
