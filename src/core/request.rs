//! Tri-state wrapper around a single asynchronous backend call.
//!
//! Overlapping triggers are neither serialized nor cancelled:
//! whichever call settles last determines the observed `data` and `error`.

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::prelude::*;

pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";

/// User-visible failure notifications.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify_error(&self, message: &str) {
        (**self).notify_error(message);
    }
}

/// Failure that may carry a human-readable message from the backend.
pub trait FailureMessage {
    fn failure_message(&self) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

pub struct Request<F, T, N> {
    operation: F,
    notifier: N,
    state: Mutex<RequestState<T>>,
}

impl<F, T, N> Request<F, T, N> {
    pub fn new(operation: F, notifier: N) -> Self {
        Self { operation, notifier, state: Mutex::new(RequestState::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, RequestState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.lock().data.is_some()
    }
}

impl<F, T: Clone, N: Notifier> Request<F, T, N> {
    /// Invoke the operation with `args`.
    ///
    /// A failure is notified exactly once, recorded, and handed back to the caller.
    /// Previously fetched data survives failures.
    pub async fn trigger<A, Fut, E>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: FailureMessage,
    {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = (self.operation)(args).await;

        let mut state = self.lock();
        state.loading = false;
        match &result {
            Ok(data) => {
                state.data = Some(data.clone());
            }
            Err(failure) => {
                let message = failure.failure_message().unwrap_or(FALLBACK_MESSAGE).to_owned();
                debug!(%message, "request failed");
                self.notifier.notify_error(&message);
                state.error = Some(message);
            }
        }
        result
    }
}
