// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Multi-observer layer over the single-shot future
//!
//! A [`SharedFuture`] wraps the result of a [`Future`](crate::Future) in a
//! reference-counted slot so that any number of independent observers can be
//! registered, before or after the result arrives. Each observer receives a
//! clone of the resolved trial. This is what allows a memoized computation,
//! such as a stream node backed by an input read, to be inspected by several
//! consumers while its side effect runs at most once.

use crate::fault::Trial;
use crate::future::{pair, Future, Observer};
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::mem::replace;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// State shared between all clones of a shared future
enum Slot<T> {
    /// The result has not arrived; observers are waiting for it.
    Pending(Vec<Observer<T>>),
    /// The result is available for all present and future observers.
    Ready(Trial<T>),
}

/// Shareable future that may have any number of observers
///
/// Unlike [`Future`], whose observer-registering methods consume it, the
/// methods of `SharedFuture` take `&self` and may be called repeatedly; each
/// call registers an independent observer. Clones of a `SharedFuture` refer
/// to the same underlying slot, and equality compares slot identity.
#[must_use = "futures do nothing unless observed"]
pub struct SharedFuture<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T: Clone + 'static> SharedFuture<T> {
    /// Creates a shared future resolving with the result of `future`.
    pub fn new(future: Future<T>) -> Self {
        let slot = Rc::new(RefCell::new(Slot::Pending(Vec::new())));
        let slot2 = Rc::clone(&slot);
        future.then(move |trial| {
            let previous = replace(&mut *slot2.borrow_mut(), Slot::Ready(trial.clone()));
            let Slot::Pending(observers) = previous else {
                unreachable!("shared future resolved twice")
            };
            // The borrow is released; observers may register further
            // observers on this same shared future.
            for observer in observers {
                match observer {
                    Observer::Callback(callback) => callback(trial.clone()),
                    Observer::Waker(waker) => waker.wake(),
                }
            }
        });
        SharedFuture { slot }
    }

    /// Creates a shared future that is already resolved with the given value.
    pub fn ready(value: T) -> Self {
        SharedFuture {
            slot: Rc::new(RefCell::new(Slot::Ready(Ok(value)))),
        }
    }

    /// Registers an observer to receive a clone of the result.
    ///
    /// The observer is invoked exactly once: immediately if the result is
    /// already available, or when it arrives.
    pub fn then<F>(&self, f: F)
    where
        F: FnOnce(Trial<T>) + 'static,
    {
        let mut slot = self.slot.borrow_mut();
        match &mut *slot {
            Slot::Pending(observers) => observers.push(Observer::Callback(Box::new(f))),
            Slot::Ready(trial) => {
                let trial = trial.clone();
                drop(slot);
                f(trial)
            }
        }
    }

    /// Applies a function to a clone of the success value, producing a new
    /// single-shot future. Faults pass through untouched.
    pub fn map<R, F>(&self, f: F) -> Future<R>
    where
        R: 'static,
        F: FnOnce(T) -> R + 'static,
    {
        let (promise, future) = pair();
        self.then(move |trial| match trial {
            Ok(value) => promise.set(f(value)),
            Err(fault) => promise.fail(fault),
        });
        future
    }

    /// Applies a fallible function to a clone of the success value.
    pub fn try_map<R, F>(&self, f: F) -> Future<R>
    where
        R: 'static,
        F: FnOnce(T) -> Trial<R> + 'static,
    {
        let (promise, future) = pair();
        self.then(move |trial| match trial.and_then(f) {
            Ok(value) => promise.set(value),
            Err(fault) => promise.fail(fault),
        });
        future
    }

    /// Returns a clone of the result if it has already arrived.
    #[must_use]
    pub fn get(&self) -> Option<Trial<T>> {
        match &*self.slot.borrow() {
            Slot::Pending(_) => None,
            Slot::Ready(trial) => Some(trial.clone()),
        }
    }
}

impl<T> Clone for SharedFuture<T> {
    fn clone(&self) -> Self {
        SharedFuture {
            slot: Rc::clone(&self.slot),
        }
    }
}

/// Compares by identity of the underlying slot.
impl<T> PartialEq for SharedFuture<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> Eq for SharedFuture<T> {}

impl<T: Clone + 'static> std::future::Future for SharedFuture<T> {
    type Output = Trial<T>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Trial<T>> {
        let mut slot = self.slot.borrow_mut();
        match &mut *slot {
            Slot::Pending(observers) => {
                observers.push(Observer::Waker(context.waker().clone()));
                Poll::Pending
            }
            Slot::Ready(trial) => Poll::Ready(trial.clone()),
        }
    }
}

impl<T> Debug for SharedFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.slot.borrow() {
            Slot::Pending(observers) => format!("Pending(observers = {})", observers.len()),
            Slot::Ready(_) => "Ready".to_string(),
        };
        f.debug_struct("SharedFuture").field("state", &state).finish()
    }
}
