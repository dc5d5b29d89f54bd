//! Caller-driven cancellation of an in-flight operation.

use std::future::Future;

use futures::future::{abortable, AbortHandle};

use crate::error::{Error, Result};

/// Wrap an adapter operation so the caller can abort it.
///
/// Aborting before the response arrives resolves the future to
/// `Error::Cancelled`; extraction never starts on a cancelled call.
pub fn cancellable<T, F>(op: F) -> (impl Future<Output = Result<T>>, AbortHandle)
where
    F: Future<Output = Result<T>>,
{
    let (fut, handle) = abortable(op);
    let fut = async move {
        match fut.await {
            Ok(res) => res,
            Err(_aborted) => {
                tracing::debug!("operation aborted by caller");
                Err(Error::Cancelled)
            }
        }
    };
    (fut, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn abort_before_completion_is_cancelled() {
        let (fut, handle) = cancellable(async {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok::<_, Error>(1)
        });
        handle.abort();
        assert!(matches!(fut.await, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn untouched_operation_completes() {
        let (fut, _handle) = cancellable(async { Ok::<_, Error>(7) });
        assert_eq!(fut.await.unwrap(), 7);
    }
}
