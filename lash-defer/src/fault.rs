// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Cloneable, type-erased error values carried by failed futures

use std::error::Error;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Result of a deferred computation: either the produced value or the fault
/// that prevented it.
pub type Trial<T> = Result<T, Fault>;

/// Type-erased error delivered through the failure channel of a future
///
/// A `Fault` wraps an arbitrary error in a reference-counted cell so that it
/// can be cloned into every observer of a [`SharedFuture`]. Faults are
/// reserved for genuine faults in the producing side; recoverable conditions
/// should be modeled in the success value instead.
///
/// [`SharedFuture`]: crate::SharedFuture
#[derive(Clone, Debug)]
pub struct Fault {
    inner: Rc<dyn Error>,
}

impl Fault {
    /// Wraps an error in a new `Fault`.
    #[must_use]
    pub fn new<E: Error + 'static>(error: E) -> Self {
        Fault {
            inner: Rc::new(error),
        }
    }

    /// Returns a reference to the wrapped error.
    #[must_use]
    pub fn get(&self) -> &(dyn Error + 'static) {
        &*self.inner
    }

    /// Returns a reference to the wrapped error if it is of type `E`.
    #[must_use]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref()
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Error delivered when a [`Promise`](crate::Promise) is dropped before
/// being satisfied
///
/// A broken promise is a programming error on the producing side, not a
/// recoverable condition. It is delivered as a [`Fault`] so that the
/// consuming side observes the error instead of waiting forever.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BrokenPromise;

impl Display for BrokenPromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "promise dropped before being satisfied".fmt(f)
    }
}

impl Error for BrokenPromise {}
