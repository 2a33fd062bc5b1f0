//! # Slotbook Runtime
//!
//! Runtime implementation for the Slotbook architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Action Broadcast**: Streams feedback actions to observers
//!
//! ## Concurrency Model
//!
//! The reducer always runs while the store holds the write lock on state.
//! Concurrent `send()` calls therefore serialize at the reducer, and a
//! check-then-mutate step inside a reducer (such as validating remaining
//! slots before decrementing them) is atomic with respect to every other
//! action. Effects run afterwards in spawned tasks and may interleave
//! freely; they communicate back only by dispatching actions.
//!
//! ## Example
//!
//! ```ignore
//! use slotbook_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects to settle
//! let handle = store.send(Action::DoSomething).await?;
//! handle.wait().await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use futures::future::BoxFuture;
use slotbook_core::{effect::Effect, reducer::Reducer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for waiting on the effects started by a single `send()`
///
/// `send()` returns after the reducer has run and effect execution has been
/// started, not after it finished. The handle resolves once every effect
/// from that send, including cascaded feedback actions and their effects,
/// has completed.
#[derive(Debug)]
pub struct EffectHandle {
    done: watch::Receiver<bool>,
}

impl EffectHandle {
    /// Wait for all effects from the originating send to complete
    pub async fn wait(mut self) {
        while !*self.done.borrow() {
            if self.done.changed().await.is_err() {
                // Sender dropped; the effect task is gone either way
                break;
            }
        }
    }

    /// Wait for effect completion with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the effects are still running when
    /// the timeout expires.
    pub async fn wait_with_timeout(self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// Executes effect trees and feeds resulting actions back into the reducer.
///
/// Owns clones of the store internals so effect execution can outlive the
/// `send()` call that started it.
struct EffectRunner<S, A, E, R> {
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> EffectRunner<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Run a batch of effects, in parallel, to completion
    async fn run_all(&self, effects: Vec<Effect<A>>) {
        futures::future::join_all(effects.into_iter().map(|effect| self.execute(effect))).await;
    }

    /// Execute a single effect tree
    ///
    /// Boxed because `Parallel`/`Sequential` and the dispatch feedback loop
    /// recurse.
    fn execute<'a>(&'a self, effect: Effect<A>) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.dispatch(*action).await;
                },
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        self.dispatch(action).await;
                    }
                },
                Effect::Parallel(effects) => {
                    futures::future::join_all(
                        effects.into_iter().map(|effect| self.execute(effect)),
                    )
                    .await;
                },
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.execute(effect).await;
                    }
                },
            }
        })
    }

    /// Feed an effect-produced action back through the reducer
    ///
    /// The action is broadcast to observers after the reducer applied it,
    /// so an observer that reads state on receipt sees the post-apply view.
    async fn dispatch(&self, action: A) {
        let effects = {
            let mut state = self.state.write().await;
            self.reducer
                .reduce(&mut state, action.clone(), &self.environment)
        };
        if self.action_broadcast.receiver_count() > 0 {
            let _ = self.action_broadcast.send(action);
        }
        self.run_all(effects.into_vec()).await;
    }
}

/// The Store runtime
///
/// Owns feature state, runs the reducer under a write lock, and executes
/// the returned effects in spawned tasks. Feedback actions produced by
/// effects re-enter the reducer and are broadcast to observers.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Action broadcast channel for observing actions produced by effects.
    ///
    /// Only feedback actions are broadcast, not the initial action passed
    /// to `send()`. This enables request-response patterns via
    /// [`Store::send_and_wait_for`].
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Action broadcast capacity defaults to 16; increase with
    /// [`Store::with_broadcast_capacity`] if observers frequently lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new Store with custom action broadcast capacity
    ///
    /// Use this constructor when many concurrent requests wait on feedback
    /// actions at once (e.g., the booking stress tests).
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Read a view of the current state
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Send an action to the store
    ///
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// Returns after starting effect execution, not completion; use the
    /// returned [`EffectHandle`] to wait for the effects to settle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("processing action");

        let effects = {
            let mut state = self.state.write().await;
            tracing::trace!("acquired write lock on state");
            self.reducer
                .reduce(&mut state, action, &self.environment)
        };
        tracing::trace!(effects = effects.len(), "reducer completed");

        let runner = EffectRunner {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            action_broadcast: self.action_broadcast.clone(),
        };

        let (done_tx, done_rx) = watch::channel(false);
        let pending = Arc::clone(&self.pending_effects);
        pending.fetch_add(1, Ordering::AcqRel);

        tokio::spawn(async move {
            runner.run_all(effects.into_vec()).await;
            pending.fetch_sub(1, Ordering::AcqRel);
            let _ = done_tx.send(true);
        });

        Ok(EffectHandle { done: done_rx })
    }

    /// Send an action and wait for a matching feedback action
    ///
    /// Designed for request-response flows: subscribe to the action
    /// broadcast *before* sending (avoiding the race where the feedback
    /// arrives first), send the action, then wait for the first broadcast
    /// action matching the predicate. Use correlation ids in the predicate
    /// to distinguish concurrent requests.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: no matching action within the timeout
    /// - [`StoreError::ChannelClosed`]: broadcast channel closed
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        // Subscribe BEFORE sending to avoid missing the feedback action
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Slow consumer; if the terminal action was dropped
                        // the timeout catches it
                        tracing::warn!(skipped, "action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to all feedback actions from this store
    ///
    /// Only actions produced by effects are broadcast, not initial actions
    /// passed to `send()`.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Number of sends whose effects have not yet settled
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effects to complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
    /// before all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("initiating graceful shutdown");
        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("all effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending, "shutdown timeout");
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
