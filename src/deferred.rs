//! Deferred value carriers.
//!
//! Two shapes of "value available later": [`EagerTask`] for producers that
//! are already running on the executor, and [`DeferredValue`] for producers
//! that start only when first polled. Both resolve to an erased value or a
//! [`ConvertError`], and both stop producing when dropped before completion.

use std::future::Future;

use futures::future::BoxFuture;
use tokio_util::task::AbortOnDropHandle;

use crate::error::{ConvertError, Result};
use crate::value::AnyValue;

/// A deferred value whose producer is already running.
///
/// [`EagerTask::spawn`] starts the producer immediately on the tokio
/// executor. Dropping the task (directly, or by dropping a flow that wraps
/// it) before completion aborts the producer.
pub struct EagerTask {
    handle: AbortOnDropHandle<Result<AnyValue>>,
}

impl EagerTask {
    /// Spawn `future` now and return a handle to its eventual result.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<AnyValue>> + Send + 'static,
    {
        Self {
            handle: AbortOnDropHandle::new(tokio::spawn(future)),
        }
    }

    /// Wait for the running producer to finish.
    ///
    /// An aborted task surfaces as [`ConvertError::TaskCancelled`], a
    /// panicked one as [`ConvertError::TaskPanicked`]; the producer's own
    /// error is passed through untouched.
    pub async fn join(self) -> Result<AnyValue> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(ConvertError::TaskCancelled),
            Err(join_err) => Err(ConvertError::TaskPanicked(join_err.to_string())),
        }
    }
}

/// A deferred value that starts producing only when first polled.
///
/// Nothing runs at construction time. Dropping an unresolved stage simply
/// never runs it.
pub struct DeferredValue {
    future: BoxFuture<'static, Result<AnyValue>>,
}

impl DeferredValue {
    /// Wrap `future` as a lazy completion stage.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<AnyValue>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// A stage that is already complete.
    pub fn ready(value: AnyValue) -> Self {
        Self::new(async move { Ok(value) })
    }

    /// Drive the stage to completion.
    pub async fn resolve(self) -> Result<AnyValue> {
        self.future.await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::value::any_value;

    #[tokio::test]
    async fn eager_task_runs_without_being_joined() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let task = EagerTask::spawn(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(any_value(1u8))
        });

        // The producer is eager: give the executor a chance to run it
        // before the handle is awaited.
        tokio::task::yield_now().await;
        assert!(ran.load(Ordering::SeqCst));
        assert!(task.join().await.is_ok());
    }

    #[tokio::test]
    async fn dropping_eager_task_aborts_the_producer() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let task = EagerTask::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(any_value(1u8))
        });

        drop(task);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn ready_stage_resolves_to_its_value() {
        let stage = DeferredValue::ready(any_value(9u16));
        let value = stage.resolve().await.expect("stage resolves");
        assert_eq!(*value.downcast::<u16>().expect("u16 payload"), 9);
    }

    #[tokio::test]
    async fn deferred_value_does_not_run_until_resolved() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let stage = DeferredValue::new(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(any_value(2u8))
        });

        tokio::task::yield_now().await;
        assert!(!ran.load(Ordering::SeqCst));

        let value = stage.resolve().await.expect("stage resolves");
        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(*value.downcast::<u8>().expect("u8 payload"), 2);
    }
}
