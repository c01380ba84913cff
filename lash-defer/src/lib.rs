// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! `lash-defer` is a deferred-value communication library for single-threaded
//! contexts. It provides a [`Promise`]/[`Future`] pair for once-only delivery
//! of a value between a producer and a consumer, and a [`SharedFuture`] that
//! allows any number of independent observers of one computed value.
//!
//! There is no event loop in this crate. A future completes the instant its
//! promise is satisfied, and a registered continuation runs synchronously on
//! whatever call stack invoked [`Promise::set`]. Suspension is purely
//! representational: a computation "suspends" by returning a future that its
//! caller must eventually resolve.
//!
//! ```
//! use lash_defer::pair;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let (promise, future) = pair();
//! let sum = future.map(|n: i32| n + 2);
//!
//! let result = Rc::new(Cell::new(0));
//! let observer = Rc::clone(&result);
//! sum.then(move |trial| observer.set(trial.unwrap()));
//!
//! // The continuation fires synchronously inside `set`.
//! promise.set(40);
//! assert_eq!(result.get(), 42);
//! ```
//!
//! Failures travel through the same channel as [`Fault`] values, which
//! propagate through [`map`](Future::map)/[`and_then`](Future::and_then)
//! chains untouched until a [`recover`](Future::recover) or a final observer
//! intercepts them. Dropping a promise without satisfying it delivers a
//! [`BrokenPromise`] fault.
//!
//! This crate is free of locks and atomics; its types are intentionally not
//! `Send`. Both future types also implement [`std::future::Future`], so they
//! can be awaited on a single-threaded executor such as
//! `futures_executor::block_on`.

mod fault;
mod future;
mod shared_future;

pub use fault::{BrokenPromise, Fault, Trial};
pub use future::{pair, Future, Promise};
pub use shared_future::SharedFuture;
