//! Single-emission lazy flows.
//!
//! A [`ValueFlow`] is cold: constructing one does no work, and the first
//! poll drives it to its single emission. `Some(value)` carries a present
//! value; `None` is the literal absence produced for the null sentinel.

use std::future::Future;
use std::pin::Pin;

use futures::Stream;
use futures_util::StreamExt;

use crate::error::Result;
use crate::value::AnyValue;

/// A cold stream that emits exactly one item (or one error) and terminates.
pub type ValueFlow = Pin<Box<dyn Stream<Item = Result<Option<AnyValue>>> + Send>>;

static_assertions::assert_impl_all!(ValueFlow: Send);

/// Flow that emits `value` on first poll, without suspending.
pub fn once(value: AnyValue) -> ValueFlow {
    Box::pin(async_stream::stream! {
        yield Ok(Some(value));
    })
}

/// Flow that emits a literal absence on first poll, without suspending.
pub fn absent() -> ValueFlow {
    Box::pin(async_stream::stream! {
        yield Ok(None);
    })
}

/// Flow that suspends on `future` once activated, then emits its value.
///
/// The future is not polled until a consumer polls the flow; its failure
/// becomes the flow's failure, unchanged.
pub fn from_future<F>(future: F) -> ValueFlow
where
    F: Future<Output = Result<AnyValue>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        match future.await {
            Ok(value) => yield Ok(Some(value)),
            Err(e) => yield Err(e),
        }
    })
}

/// Drain a flow into its emitted items.
///
/// Fails with the flow's error if any item fails; items emitted before the
/// failure are discarded.
pub async fn collect(mut flow: ValueFlow) -> Result<Vec<Option<AnyValue>>> {
    let mut items = Vec::new();
    while let Some(item) = flow.next().await {
        items.push(item?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use futures_util::{FutureExt, StreamExt};

    use super::*;
    use crate::error::ConvertError;
    use crate::value::any_value;

    #[tokio::test]
    async fn once_emits_synchronously() {
        let mut flow = once(any_value("hi".to_string()));
        let item = flow
            .next()
            .now_or_never()
            .expect("first poll must complete without suspending")
            .expect("one item")
            .expect("no error");
        let value = item.expect("present value");
        assert_eq!(*value.downcast::<String>().expect("string payload"), "hi");
        assert!(flow.next().await.is_none());
    }

    #[tokio::test]
    async fn absent_emits_none_synchronously() {
        let mut flow = absent();
        let item = flow
            .next()
            .now_or_never()
            .expect("first poll must complete without suspending")
            .expect("one item")
            .expect("no error");
        assert!(item.is_none());
        assert!(flow.next().await.is_none());
    }

    #[tokio::test]
    async fn from_future_forwards_the_error() {
        let flow = from_future(async { Err(ConvertError::DeferredFailed("boom".into())) });
        let err = collect(flow).await.expect_err("flow must fail");
        assert!(matches!(err, ConvertError::DeferredFailed(msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn from_future_is_lazy() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let flow = from_future(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(any_value(1u8))
        });

        tokio::task::yield_now().await;
        assert!(!ran.load(Ordering::SeqCst));

        let items = collect(flow).await.expect("flow completes");
        assert_eq!(items.len(), 1);
        assert!(ran.load(Ordering::SeqCst));
    }
}
