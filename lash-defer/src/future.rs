// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Single-delivery promise/future pair
//!
//! See the [crate documentation](crate) for an overview of the delivery
//! model. The types in this module are single-shot: a [`Promise`] can be
//! satisfied at most once, and a [`Future`] can have at most one observer,
//! which consumes the future when it is registered.

use crate::fault::{BrokenPromise, Fault, Trial};
use crate::shared_future::SharedFuture;
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::mem::replace;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Party waiting for the result of a delay cell
pub(crate) enum Observer<T> {
    /// Continuation to be invoked with the result
    Callback(Box<dyn FnOnce(Trial<T>)>),
    /// Task to be woken up when the result arrives
    Waker(Waker),
}

/// State shared between a promise and its future
///
/// The cell starts `Pending` and moves to either `Observed` (the consuming
/// side registered first) or `Ready` (the producing side delivered first).
/// Once the result has met its observer, the cell is `Spent`.
enum Delay<T> {
    Pending,
    Observed(Observer<T>),
    Ready(Trial<T>),
    Spent,
}

impl<T> Delay<T> {
    fn name(&self) -> &'static str {
        match self {
            Delay::Pending => "Pending",
            Delay::Observed(_) => "Observed",
            Delay::Ready(_) => "Ready",
            Delay::Spent => "Spent",
        }
    }
}

type DelayCell<T> = Rc<RefCell<Delay<T>>>;

/// Producing half of a delay cell
///
/// A `Promise` is satisfied exactly once, with [`set`](Self::set) or
/// [`fail`](Self::fail). Satisfying the promise runs the continuation
/// registered on the corresponding [`Future`], if any, synchronously on the
/// current call stack. Dropping an unsatisfied promise delivers a
/// [`BrokenPromise`] fault instead.
#[must_use = "a dropped promise breaks its future"]
pub struct Promise<T> {
    cell: DelayCell<T>,
    satisfied: bool,
}

/// Consuming half of a delay cell
///
/// A `Future` represents a value (or [`Fault`]) that may not have been
/// produced yet. Registering a continuation with [`then`](Self::then) or one
/// of the adapters built on it consumes the future; use
/// [`shared`](Self::shared) to allow multiple observers.
///
/// `Future` also implements [`std::future::Future`], so it can be awaited
/// on a standard single-threaded executor.
#[must_use = "futures do nothing unless observed"]
pub struct Future<T> {
    cell: DelayCell<T>,
}

/// Creates a new linked promise/future pair.
#[must_use]
pub fn pair<T>() -> (Promise<T>, Future<T>) {
    let cell = Rc::new(RefCell::new(Delay::Pending));
    let promise = Promise {
        cell: Rc::clone(&cell),
        satisfied: false,
    };
    let future = Future { cell };
    (promise, future)
}

impl<T: 'static> Promise<T> {
    /// Satisfies the promise with a successfully produced value.
    ///
    /// If a continuation has been registered on the corresponding future, it
    /// is invoked before this method returns.
    ///
    /// # Panics
    ///
    /// If the promise has already been satisfied.
    pub fn set(mut self, value: T) {
        self.satisfied = true;
        self.complete(Ok(value));
    }

    /// Satisfies the promise with a fault.
    ///
    /// # Panics
    ///
    /// If the promise has already been satisfied.
    pub fn fail(mut self, fault: Fault) {
        self.satisfied = true;
        self.complete(Err(fault));
    }

    fn complete(&self, trial: Trial<T>) {
        let previous = replace(&mut *self.cell.borrow_mut(), Delay::Spent);
        match previous {
            Delay::Pending => *self.cell.borrow_mut() = Delay::Ready(trial),
            // The borrow must be released before the callback runs: the
            // callback may chain another future off the same cell's result.
            Delay::Observed(Observer::Callback(callback)) => callback(trial),
            Delay::Observed(Observer::Waker(waker)) => {
                *self.cell.borrow_mut() = Delay::Ready(trial);
                waker.wake();
            }
            Delay::Ready(_) | Delay::Spent => panic!("promise satisfied twice"),
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if !self.satisfied {
            let previous = replace(&mut *self.cell.borrow_mut(), Delay::Spent);
            match previous {
                Delay::Pending => {
                    *self.cell.borrow_mut() = Delay::Ready(Err(Fault::new(BrokenPromise)))
                }
                Delay::Observed(Observer::Callback(callback)) => {
                    callback(Err(Fault::new(BrokenPromise)))
                }
                Delay::Observed(Observer::Waker(waker)) => {
                    *self.cell.borrow_mut() = Delay::Ready(Err(Fault::new(BrokenPromise)));
                    waker.wake();
                }
                Delay::Ready(_) | Delay::Spent => unreachable!(),
            }
        }
    }
}

impl<T: 'static> Future<T> {
    /// Creates a future that is already resolved with the given value.
    pub fn ready(value: T) -> Future<T> {
        Future::of(Ok(value))
    }

    /// Creates a future that is already resolved with the given fault.
    pub fn failed(fault: Fault) -> Future<T> {
        Future::of(Err(fault))
    }

    /// Creates a future that is already resolved with the given trial.
    pub fn of(trial: Trial<T>) -> Future<T> {
        Future {
            cell: Rc::new(RefCell::new(Delay::Ready(trial))),
        }
    }

    /// Registers a continuation to receive the result of this future.
    ///
    /// The continuation is invoked exactly once: immediately if the result
    /// is already available, or synchronously from [`Promise::set`] (or
    /// [`Promise::fail`]) otherwise. This method consumes the future.
    pub fn then<F>(self, f: F)
    where
        F: FnOnce(Trial<T>) + 'static,
    {
        let previous = replace(&mut *self.cell.borrow_mut(), Delay::Spent);
        match previous {
            // A waker left behind by an earlier poll is superseded.
            Delay::Pending | Delay::Observed(Observer::Waker(_)) => {
                *self.cell.borrow_mut() = Delay::Observed(Observer::Callback(Box::new(f)))
            }
            Delay::Ready(trial) => f(trial),
            Delay::Observed(Observer::Callback(_)) | Delay::Spent => {
                unreachable!("future observed twice")
            }
        }
    }

    /// Applies a function to the success value, passing faults through.
    pub fn map<R, F>(self, f: F) -> Future<R>
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

    /// Applies a fallible function to the success value.
    ///
    /// An `Err` returned from `f` becomes the fault of the produced future,
    /// superseding the original success value. Faults of `self` pass through
    /// untouched.
    pub fn try_map<R, F>(self, f: F) -> Future<R>
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

    /// Applies a function to the fault, passing success values through.
    ///
    /// The function supplies a replacement success value for the produced
    /// future.
    pub fn recover<F>(self, f: F) -> Future<T>
    where
        F: FnOnce(Fault) -> T + 'static,
    {
        let (promise, future) = pair();
        self.then(move |trial| match trial {
            Ok(value) => promise.set(value),
            Err(fault) => promise.set(f(fault)),
        });
        future
    }

    /// Applies a fallible function to the fault.
    ///
    /// Like [`recover`](Self::recover), but the function may itself fail, in
    /// which case its fault is delivered instead of the original one.
    pub fn try_recover<F>(self, f: F) -> Future<T>
    where
        F: FnOnce(Fault) -> Trial<T> + 'static,
    {
        let (promise, future) = pair();
        self.then(move |trial| match trial.or_else(f) {
            Ok(value) => promise.set(value),
            Err(fault) => promise.fail(fault),
        });
        future
    }

    /// Chains a function that itself returns a future.
    ///
    /// The produced future resolves with the result of the future returned
    /// by `f`. Faults of `self` pass through without invoking `f`.
    pub fn and_then<R, F>(self, f: F) -> Future<R>
    where
        R: 'static,
        F: FnOnce(T) -> Future<R> + 'static,
    {
        let (promise, future) = pair();
        self.then(move |trial| match trial {
            Ok(value) => f(value).forward(promise),
            Err(fault) => promise.fail(fault),
        });
        future
    }

    /// Wires the eventual result of this future into another promise.
    pub fn forward(self, promise: Promise<T>) {
        self.then(move |trial| match trial {
            Ok(value) => promise.set(value),
            Err(fault) => promise.fail(fault),
        });
    }

    /// Converts this future into one that can have multiple observers.
    pub fn shared(self) -> SharedFuture<T>
    where
        T: Clone,
    {
        SharedFuture::new(self)
    }
}

impl<T: 'static> Future<Future<T>> {
    /// Collapses a future of a future into a single future.
    pub fn flatten(self) -> Future<T> {
        self.and_then(|inner| inner)
    }
}

impl<T: 'static> std::future::Future for Future<T> {
    type Output = Trial<T>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Trial<T>> {
        let previous = replace(&mut *self.cell.borrow_mut(), Delay::Spent);
        match previous {
            Delay::Ready(trial) => Poll::Ready(trial),
            Delay::Pending | Delay::Observed(Observer::Waker(_)) => {
                *self.cell.borrow_mut() = Delay::Observed(Observer::Waker(context.waker().clone()));
                Poll::Pending
            }
            Delay::Observed(Observer::Callback(_)) | Delay::Spent => {
                panic!("future polled after being observed")
            }
        }
    }
}

impl<T> Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.cell.borrow().name())
            .field("satisfied", &self.satisfied)
            .finish()
    }
}

impl<T> Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("state", &self.cell.borrow().name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn continuation_registered_before_delivery() {
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        let (promise, future) = pair();
        future.then(move |trial: Trial<i32>| delivered2.set(Some(trial.unwrap())));

        assert_eq!(delivered.get(), None);
        promise.set(42);
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    fn continuation_registered_after_delivery() {
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        let (promise, future) = pair();
        promise.set(42);
        future.then(move |trial: Trial<i32>| delivered2.set(Some(trial.unwrap())));
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    #[should_panic(expected = "promise satisfied twice")]
    fn promise_satisfied_twice() {
        let (promise, future) = pair();
        let cell = Rc::clone(&promise.cell);
        promise.set(1);
        drop(future);

        let fake = Promise {
            cell,
            satisfied: false,
        };
        fake.set(2);
    }

    #[test]
    fn broken_promise_delivers_fault() {
        let delivered = Rc::new(Cell::new(false));
        let delivered2 = Rc::clone(&delivered);
        let (promise, future) = pair::<i32>();
        future.then(move |trial| {
            let fault = trial.unwrap_err();
            assert!(fault.downcast_ref::<BrokenPromise>().is_some());
            delivered2.set(true);
        });
        drop(promise);
        assert!(delivered.get());
    }

    #[test]
    fn map_success() {
        let (promise, future) = pair();
        let mapped = future.map(|n: i32| n + 1);
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        mapped.then(move |trial| delivered2.set(Some(trial.unwrap())));
        promise.set(41);
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    fn map_is_not_invoked_on_fault() {
        let (promise, future) = pair::<i32>();
        let mapped = future.map(|_| unreachable!("map invoked on fault"));
        let delivered = Rc::new(Cell::new(false));
        let delivered2 = Rc::clone(&delivered);
        mapped.then(move |trial: Trial<i32>| {
            assert!(trial.is_err());
            delivered2.set(true);
        });
        promise.fail(Fault::new(BrokenPromise));
        assert!(delivered.get());
    }

    #[test]
    fn try_map_fault_supersedes_value() {
        let (promise, future) = pair();
        let mapped = future.try_map(|_: i32| Err::<i32, _>(Fault::new(BrokenPromise)));
        let delivered = Rc::new(Cell::new(false));
        let delivered2 = Rc::clone(&delivered);
        mapped.then(move |trial| {
            assert!(trial.is_err());
            delivered2.set(true);
        });
        promise.set(1);
        assert!(delivered.get());
    }

    #[test]
    fn recover_is_not_invoked_on_success() {
        let (promise, future) = pair();
        let recovered = future.recover(|_| unreachable!("recover invoked on success"));
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        recovered.then(move |trial| delivered2.set(Some(trial.unwrap())));
        promise.set(7);
        assert_eq!(delivered.get(), Some(7));
    }

    #[test]
    fn recover_supplies_replacement_value() {
        let (promise, future) = pair::<i32>();
        let recovered = future.recover(|_| 13);
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        recovered.then(move |trial| delivered2.set(Some(trial.unwrap())));
        promise.fail(Fault::new(BrokenPromise));
        assert_eq!(delivered.get(), Some(13));
    }

    #[test]
    fn and_then_chains_into_pending_future() {
        let (first_promise, first) = pair();
        let (second_promise, second) = pair();
        let chained = first.and_then(move |n: i32| second.map(move |m: i32| n + m));
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        chained.then(move |trial| delivered2.set(Some(trial.unwrap())));

        first_promise.set(40);
        assert_eq!(delivered.get(), None);
        second_promise.set(2);
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    fn flatten_collapses_nesting() {
        let nested = Future::ready(Future::ready(42));
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        nested.flatten().then(move |trial| delivered2.set(Some(trial.unwrap())));
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    fn forward_relays_the_result() {
        let (promise, future) = pair();
        let (destination, relayed) = pair();
        future.forward(destination);
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        relayed.then(move |trial| delivered2.set(Some(trial.unwrap())));
        promise.set(42);
        assert_eq!(delivered.get(), Some(42));
    }

    #[test]
    fn ready_future_resolves_immediately() {
        let delivered = Rc::new(Cell::new(None));
        let delivered2 = Rc::clone(&delivered);
        Future::ready(42).then(move |trial| delivered2.set(Some(trial.unwrap())));
        assert_eq!(delivered.get(), Some(42));
    }
}
