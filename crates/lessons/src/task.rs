use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unable to spawn thread for task {name:?}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("task {0:?} panicked")]
    Panicked(String),
}

/// One unit of work running on its own named thread.
///
/// Dropping a task without joining it still waits for the thread to finish.
pub struct Task<T> {
    name: String,
    done: Receiver<()>,
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn<F>(name: impl Into<String>, work: F) -> Result<Self, TaskError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let name = name.into();
        let (done_tx, done) = channel::bounded(1);

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let result = work();
                // The task may have been dropped without waiting.
                let _ = done_tx.send(());
                result
            })
            .map_err(|source| TaskError::Spawn {
                name: name.clone(),
                source,
            })?;

        tracing::debug!(task = %name, "spawned");

        Ok(Self {
            name,
            done,
            handle: Some(handle),
        })
    }
}

impl<T> Task<T> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits up to `timeout` for the work to finish. Returns true once it has
    /// finished, either normally or by panicking.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    /// Blocks until the work finishes and returns its result.
    pub fn join(mut self) -> Result<T, TaskError> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| TaskError::Panicked(self.name.clone()))?;

        match handle.join() {
            Ok(value) => {
                tracing::debug!(task = %self.name, "joined");
                Ok(value)
            }
            Err(_) => {
                tracing::error!(task = %self.name, "panicked");
                Err(TaskError::Panicked(std::mem::take(&mut self.name)))
            }
        }
    }
}

impl<T> Drop for Task<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!(task = %self.name, "panicked");
            }
        }
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
