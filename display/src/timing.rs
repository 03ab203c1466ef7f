//! Debounce and throttle wrappers with explicitly owned timer state.
//!
//! Both wrappers are generic over a [`Scheduler`] so the same code runs on
//! browser timers in production and on a virtual clock in tests. They are
//! single-threaded (`Rc`-based), matching the browser event loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Deferred execution of a one-shot task.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);
}

struct DebounceState<A, S: Scheduler> {
    callback: Box<dyn Fn(A)>,
    wait: Duration,
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
}

/// Delays a callback until `wait` has passed without another call.
///
/// Only the last call inside a quiet window fires, with that call's arguments.
pub struct Debounce<A, S: Scheduler> {
    state: Rc<DebounceState<A, S>>,
}

impl<A, S: Scheduler> Clone for Debounce<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<A: 'static, S: Scheduler + 'static> Debounce<A, S> {
    pub fn new(scheduler: S, wait: Duration, callback: impl Fn(A) + 'static) -> Self {
        Self {
            state: Rc::new(DebounceState {
                callback: Box::new(callback),
                wait,
                scheduler,
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn call(&self, args: A) {
        self.cancel();

        let state = Rc::clone(&self.state);
        let handle = self.state.scheduler.schedule(
            self.state.wait,
            Box::new(move || {
                state.pending.replace(None);
                (state.callback)(args);
            }),
        );
        self.state.pending.replace(Some(handle));
    }

    /// Drop the pending call, if any, without running it.
    pub fn cancel(&self) {
        let pending = self.state.pending.replace(None);
        if let Some(handle) = pending {
            self.state.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending.borrow().is_some()
    }
}

struct ThrottleState<A, S> {
    callback: Box<dyn Fn(A)>,
    limit: Duration,
    scheduler: S,
    cooling_down: Cell<bool>,
}

/// Runs a callback at most once per `limit` window.
///
/// The first call of a window fires immediately; later calls in the same
/// window are dropped, not queued.
pub struct Throttle<A, S> {
    state: Rc<ThrottleState<A, S>>,
}

impl<A, S> Clone for Throttle<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<A: 'static, S: Scheduler + 'static> Throttle<A, S> {
    pub fn new(scheduler: S, limit: Duration, callback: impl Fn(A) + 'static) -> Self {
        Self {
            state: Rc::new(ThrottleState {
                callback: Box::new(callback),
                limit,
                scheduler,
                cooling_down: Cell::new(false),
            }),
        }
    }

    /// Returns whether the callback ran for this call.
    pub fn call(&self, args: A) -> bool {
        if self.state.cooling_down.get() {
            return false;
        }

        (self.state.callback)(args);
        self.state.cooling_down.set(true);

        let state = Rc::clone(&self.state);
        let _cooldown = self.state.scheduler.schedule(
            self.state.limit,
            Box::new(move || state.cooling_down.set(false)),
        );
        true
    }
}
