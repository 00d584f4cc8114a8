//! Async-lifecycle primitive behind every chart panel.
//!
//! A [`FetchUnit`] wraps one zero-argument producer and models exactly one
//! in-flight or completed request: `Loading` → `Ready(data)` |
//! `Failed(reason)`. The producer runs on a worker thread and reports back
//! over a channel; the owning event loop calls [`FetchUnit::poll`] each
//! tick (or [`FetchUnit::wait`] from synchronous code) to apply completed
//! work.
//!
//! Re-entry into `Loading` happens on [`FetchUnit::refetch`] or when the
//! dependency key passed to [`FetchUnit::sync_deps`] changes. Each request
//! carries a generation number; only the most recently started request may
//! update state, so a superseded request resolving late is discarded rather
//! than clobbering newer data. Discarding is cooperative: the stale worker
//! is left to finish, its result is simply ignored.
//!
//! No retry is automatic and no timeout is imposed; the only recovery path
//! from a failure is an explicit `refetch`. Callers needing a deadline wrap
//! their producer.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Result;
use thiserror::Error;

/// Why a request ended in `Failed`.
///
/// The upstream API signals "no data" by resolving with `None` rather than
/// by erroring; both kinds share the `Failed` state but stay distinct here
/// so callers can branch without parsing message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The producer resolved successfully but had nothing to return.
    #[error("no data available")]
    NoData,
    /// The producer returned an error (transport, server, decoding).
    #[error("{0}")]
    Request(String),
}

/// Lifecycle of one data request. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Initial state, re-entered on refetch or dependency change.
    Loading,
    /// The latest request resolved with data.
    Ready(T),
    /// The latest request resolved without usable data.
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Opaque dependency key compared by value.
///
/// Callers hash whatever inputs their producer closes over (limits, toggle
/// positions) and pass the key to [`FetchUnit::sync_deps`]; the unit
/// refetches exactly once per observed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepKey(u64);

impl DepKey {
    pub fn of<K: Hash + ?Sized>(value: &K) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        DepKey(hasher.finish())
    }
}

type Producer<T> = Arc<dyn Fn() -> Result<Option<T>> + Send + Sync>;

struct Completion<T> {
    generation: u64,
    outcome: Result<Option<T>>,
}

/// One owned fetch lifecycle; see the module docs for the state machine.
pub struct FetchUnit<T> {
    producer: Producer<T>,
    state: FetchState<T>,
    deps: Option<DepKey>,
    generation: u64,
    in_flight: bool,
    discarded: u64,
    tx: Sender<Completion<T>>,
    rx: Receiver<Completion<T>>,
}

impl<T: Send + 'static> FetchUnit<T> {
    /// Create the unit and start its first request immediately.
    pub fn new(producer: impl Fn() -> Result<Option<T>> + Send + Sync + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut unit = Self {
            producer: Arc::new(producer),
            state: FetchState::Loading,
            deps: None,
            generation: 0,
            in_flight: false,
            discarded: 0,
            tx,
            rx,
        };
        unit.spawn_fetch();
        unit
    }

    /// Like [`FetchUnit::new`], recording the initial dependency key so the
    /// first `sync_deps` call with the same key does not refetch.
    pub fn with_deps(
        producer: impl Fn() -> Result<Option<T>> + Send + Sync + 'static,
        key: DepKey,
    ) -> Self {
        let mut unit = Self::new(producer);
        unit.deps = Some(key);
        unit
    }

    fn spawn_fetch(&mut self) {
        self.generation += 1;
        self.in_flight = true;
        self.state = FetchState::Loading;

        let producer = Arc::clone(&self.producer);
        let tx = self.tx.clone();
        let generation = self.generation;
        thread::spawn(move || {
            let outcome = producer();
            // The unit may already have been dropped; nothing to do then.
            let _ = tx.send(Completion {
                generation,
                outcome,
            });
        });
    }

    /// Start a new request with the same producer, superseding any request
    /// still in flight.
    pub fn refetch(&mut self) {
        self.spawn_fetch();
    }

    /// Compare `key` against the last observed dependency key; on change,
    /// store it and trigger exactly one refetch.
    pub fn sync_deps(&mut self, key: DepKey) {
        if self.deps != Some(key) {
            self.deps = Some(key);
            self.spawn_fetch();
        }
    }

    fn apply(&mut self, completion: Completion<T>) {
        if completion.generation != self.generation {
            self.discarded += 1;
            log::debug!(
                "discarding stale fetch completion (generation {}, current {})",
                completion.generation,
                self.generation
            );
            return;
        }
        self.in_flight = false;
        self.state = match completion.outcome {
            Ok(Some(data)) => FetchState::Ready(data),
            Ok(None) => FetchState::Failed(FetchError::NoData),
            Err(err) => {
                let mut message = err.to_string();
                if message.trim().is_empty() {
                    message = "failed to load data".to_string();
                }
                FetchState::Failed(FetchError::Request(message))
            }
        };
    }

    /// Drain completed requests without blocking and return the state.
    ///
    /// Only the completion matching the latest started request is applied;
    /// anything older is counted in [`FetchUnit::stale_discarded`].
    pub fn poll(&mut self) -> &FetchState<T> {
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }
        &self.state
    }

    /// Block until the current request resolves, then return the state.
    /// Returns immediately when nothing is in flight. Intended for
    /// synchronous callers such as the CLI.
    pub fn wait(&mut self) -> &FetchState<T> {
        while self.in_flight {
            match self.rx.recv() {
                Ok(completion) => self.apply(completion),
                // Unreachable while the unit holds its own sender, but a
                // disconnect must not spin.
                Err(_) => break,
            }
        }
        &self.state
    }

    /// Current state without draining completions.
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// How many superseded completions have been ignored so far.
    pub fn stale_discarded(&self) -> u64 {
        self.discarded
    }
}
