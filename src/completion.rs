//! Completion adapters for async operations.
//!
//! Every operation in this crate is written once, as a future resolving to
//! `Result<T, ClientError>`. Awaiting it is the deferred mode. Callers that
//! prefer a completion callback wrap the same future with
//! [`Completion::deliver`] or [`resolve`]; the callback then receives the
//! outcome exactly once and nothing is returned.

use std::future::Future;

use crate::error::ClientError;

/// Boxed completion callback receiving the operation's outcome.
pub type Callback<T> = Box<dyn FnOnce(Result<T, ClientError>) + Send + 'static>;

/// Callback adapter for any operation future.
pub trait Completion<T>: Future<Output = Result<T, ClientError>> + Sized {
    /// Drive the operation and hand its outcome to `callback`.
    fn deliver<F>(self, callback: F) -> impl Future<Output = ()>
    where
        F: FnOnce(Result<T, ClientError>),
    {
        async move { callback(self.await) }
    }
}

impl<T, Fut> Completion<T> for Fut where Fut: Future<Output = Result<T, ClientError>> {}

/// Drive `operation` and settle it through exactly one channel.
///
/// With a callback the outcome goes to the callback and `None` is returned;
/// without one the outcome is returned as `Some`.
pub async fn resolve<T, Fut>(operation: Fut, callback: Option<Callback<T>>) -> Option<Result<T, ClientError>>
where
    Fut: Future<Output = Result<T, ClientError>>,
{
    let outcome = operation.await;
    match callback {
        Some(callback) => {
            callback(outcome);
            None
        }
        None => Some(outcome),
    }
}

#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;
