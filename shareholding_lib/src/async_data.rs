//! Loading/error/data state around an async fetch operation.
//!
//! [`AsyncData`] runs a fetcher whenever its dependencies change (or on
//! [`AsyncData::refetch`]) and publishes the outcome through a watch channel.
//! Each dispatch takes a fresh generation number; a result is committed only
//! if its generation is still current, so a slow response from a superseded
//! request can never overwrite a newer one. Superseded requests are not
//! aborted, their results are just dropped.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

/// Message stored when a fetch fails without a usable message (including panics).
pub const FALLBACK_ERROR_MESSAGE: &str = "エラーが発生しました";

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;
type Fetcher<D, T> = Arc<dyn Fn(D) -> BoxFuture<T> + Send + Sync>;

/// Options controlling automatic dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsyncOptions {
    /// When false nothing is fetched, not even on `refetch`. Defaults to true.
    pub enabled: bool,
}

impl Default for AsyncOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AsyncOptions {
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Coarse lifecycle of an [`AsyncState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    /// Never fetched.
    Idle,
    Loading,
    Success,
    Failure,
}

/// Snapshot of an [`AsyncData`].
///
/// `data` and `error` are never both set: a failure clears data from any
/// earlier success.
#[derive(Debug)]
pub struct AsyncState<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> Clone for AsyncState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> AsyncState<T> {
    pub fn status(&self) -> FetchStatus {
        if self.loading {
            FetchStatus::Loading
        } else if self.error.is_some() {
            FetchStatus::Failure
        } else if self.data.is_some() {
            FetchStatus::Success
        } else {
            FetchStatus::Idle
        }
    }
}

struct Control<D> {
    deps: D,
    enabled: bool,
}

struct Inner<D, T> {
    fetcher: Fetcher<D, T>,
    control: Mutex<Control<D>>,
    state: watch::Sender<AsyncState<T>>,
}

impl<D, T> Inner<D, T>
where
    D: Clone + PartialEq + Send + 'static,
    T: Send + Sync + 'static,
{
    fn lock_control(&self) -> std::sync::MutexGuard<'_, Control<D>> {
        self.control.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Starts a new generation and spawns the fetch for it.
    fn dispatch(self: &Arc<Self>, deps: D) {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.loading = true;
            s.error = None;
        });
        tracing::debug!(generation, "dispatching fetch");

        let fetcher = Arc::clone(&self.fetcher);
        let owner = Arc::downgrade(self);
        tokio::spawn(async move {
            // The fetch runs in its own task so a panic surfaces as a JoinError.
            let outcome = match tokio::spawn(async move { fetcher(deps).await }).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(generation, "fetch task failed: {}", e);
                    Err(FALLBACK_ERROR_MESSAGE.to_string())
                }
            };
            match owner.upgrade() {
                Some(inner) => inner.commit(generation, outcome),
                None => tracing::debug!(generation, "owner dropped, discarding result"),
            }
        });
    }

    fn commit(&self, generation: u64, outcome: Result<T, String>) {
        let committed = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            match outcome {
                Ok(value) => {
                    s.data = Some(Arc::new(value));
                    s.error = None;
                }
                Err(message) => {
                    s.data = None;
                    s.error = Some(message);
                }
            }
            s.loading = false;
            true
        });
        if !committed {
            tracing::debug!(generation, "discarding superseded result");
        }
    }

    /// Invalidates whatever is in flight without starting anything new.
    fn supersede(&self) {
        self.state.send_if_modified(|s| {
            s.generation += 1;
            let was_loading = s.loading;
            s.loading = false;
            was_loading
        });
    }

    /// Applies `f` to the dependencies and enabled flag, dispatching if the
    /// view just became enabled or its dependencies changed while enabled.
    fn reconfigure(self: &Arc<Self>, f: impl FnOnce(&mut D, &mut bool)) {
        let mut control = self.lock_control();
        let previous_deps = control.deps.clone();
        let was_enabled = control.enabled;
        {
            let Control { deps, enabled } = &mut *control;
            f(deps, enabled);
        }
        if !control.enabled {
            if was_enabled {
                self.supersede();
            }
            return;
        }
        if !was_enabled || control.deps != previous_deps {
            self.dispatch(control.deps.clone());
        }
    }

    fn refetch(self: &Arc<Self>) {
        let control = self.lock_control();
        if control.enabled {
            self.dispatch(control.deps.clone());
        }
    }
}

/// Async data source with dependency tracking and stale-result suppression.
///
/// `D` is the dependency value handed to the fetcher on every dispatch;
/// use `()` for a fetch without inputs. Must be created inside a Tokio runtime.
pub struct AsyncData<D, T> {
    inner: Arc<Inner<D, T>>,
}

impl<D, T> AsyncData<D, T>
where
    D: Clone + PartialEq + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Creates the data source and, if enabled, dispatches the first fetch.
    ///
    /// Fetcher errors are stored as their `Display` text.
    pub fn new<F, Fut, E>(deps: D, options: AsyncOptions, fetcher: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fetcher: Fetcher<D, T> = Arc::new(move |deps: D| -> BoxFuture<T> {
            let fut = fetcher(deps);
            Box::pin(async move { fut.await.map_err(|e| error_message(&e)) })
        });
        let (state, _rx) = watch::channel(AsyncState::default());
        let inner = Arc::new(Inner {
            fetcher,
            control: Mutex::new(Control {
                deps: deps.clone(),
                enabled: options.enabled,
            }),
            state,
        });
        if options.enabled {
            inner.dispatch(deps);
        }
        Self { inner }
    }

    /// Current snapshot.
    pub fn state(&self) -> AsyncState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T>> {
        self.inner.state.subscribe()
    }

    /// Waits until no fetch is in flight and returns that state.
    pub async fn settled(&self) -> AsyncState<T> {
        let mut rx = self.inner.state.subscribe();
        if let Ok(state) = rx.wait_for(|s| !s.loading).await {
            return state.clone();
        }
        self.state()
    }

    /// Forces a new fetch with the current dependencies. Ignored while disabled.
    pub fn refetch(&self) {
        self.inner.refetch();
    }

    pub fn deps(&self) -> D {
        self.inner.lock_control().deps.clone()
    }

    /// Replaces the dependencies; fetches if they differ from the current ones.
    pub fn set_deps(&self, deps: D) {
        self.inner.reconfigure(|d, _| *d = deps);
    }

    /// Edits the dependencies in place; fetches if the result differs.
    pub fn update_deps(&self, f: impl FnOnce(&mut D)) {
        self.inner.reconfigure(|d, _| f(d));
    }

    /// Enabling fetches immediately; disabling discards any in-flight result.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.reconfigure(|_, e| *e = enabled);
    }

    /// Sets dependencies and the enabled flag in one step, dispatching at most once.
    pub fn configure(&self, deps: D, enabled: bool) {
        self.inner.reconfigure(|d, e| {
            *d = deps;
            *e = enabled;
        });
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock_control().enabled
    }

    /// A weak handle for background tasks that should not keep this alive.
    pub fn handle(&self) -> AsyncDataHandle<D, T> {
        AsyncDataHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<D, T> Drop for AsyncData<D, T> {
    fn drop(&mut self) {
        // Anything still in flight must not commit after teardown.
        self.inner.state.send_if_modified(|s| {
            s.generation += 1;
            false
        });
    }
}

/// Non-owning handle to an [`AsyncData`]. Operations return `false` once the
/// owner has been dropped.
pub struct AsyncDataHandle<D, T> {
    inner: Weak<Inner<D, T>>,
}

impl<D, T> Clone for AsyncDataHandle<D, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<D, T> AsyncDataHandle<D, T>
where
    D: Clone + PartialEq + Send + 'static,
    T: Send + Sync + 'static,
{
    pub fn update_deps(&self, f: impl FnOnce(&mut D)) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.reconfigure(|d, _| f(d));
                true
            }
            None => false,
        }
    }

    pub fn refetch(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                inner.refetch();
                true
            }
            None => false,
        }
    }
}

fn error_message(err: &impl Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
