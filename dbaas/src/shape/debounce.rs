//! Trailing-window call debouncing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Collapse repeated calls within a trailing window into a single deferred
/// invocation carrying the arguments of the last call.
///
/// Each [`call`](Debounce::call) aborts the previously scheduled invocation
/// and starts a fresh window. Must be used within a tokio runtime.
///
/// # Examples
/// ```no_run
/// # use std::time::Duration;
/// # use dbaas::shape::Debounce;
/// # async fn example() {
/// let search = Debounce::new(Duration::from_millis(300), |term: String| {
///     println!("searching for {term}");
/// });
/// search.call("d".to_string());
/// search.call("db".to_string());  // only this one fires, 300ms later
/// # }
/// ```
pub struct Debounce<T> {
    window: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<T: Send + 'static> Debounce<T> {
    /// Wrap `callback` so calls collapse within `window`.
    pub fn new(window: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            callback: Arc::new(callback),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule an invocation with `value`, cancelling any pending one.
    pub fn call(&self, value: T) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let callback = self.callback.clone();
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            callback(value);
        }));
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn collapses_rapid_calls_into_the_last_one() {
        let count = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(String::new()));

        let debounced = {
            let count = count.clone();
            let last = last.clone();
            Debounce::new(Duration::from_millis(50), move |value: String| {
                count.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = value;
            })
        };

        debounced.call("one".to_string());
        debounced.call("two".to_string());
        debounced.call("three".to_string());

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(last.lock().unwrap().as_str(), "three");
    }

    #[tokio::test]
    async fn each_call_resets_the_window() {
        let count = Arc::new(AtomicUsize::new(0));

        let debounced = {
            let count = count.clone();
            Debounce::new(Duration::from_millis(60), move |_: ()| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        // Keep poking inside the window: nothing may fire yet.
        for _ in 0..4 {
            debounced.call(());
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
