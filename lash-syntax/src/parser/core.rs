// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Fundamentals for implementing the parser
//!
//! This module defines the common types that every combinator is built from.
//! A parser is any function from a [`State`] to a [`ParseFuture`]; the
//! [`Parser`] trait is an alias for that shape. Parsers take their state by
//! value and never mutate the caller's copy, so a failed alternative leaves
//! the state it was applied to untouched for the next alternative.

use crate::parser::report::Report;
use crate::source::Origin;
use crate::stream::Stream;
use lash_defer::Future;
use std::rc::Rc;

/// Future of a parse step's result
pub type ParseFuture<T> = Future<ParseResult<T>>;

/// Function shape shared by all parsers
///
/// Blanket-implemented for every `Fn(State) -> ParseFuture<T>` that is
/// cloneable, so closures composed from other parsers qualify automatically.
pub trait Parser<T>: Fn(State) -> ParseFuture<T> + Clone + 'static {}

impl<T, F> Parser<T> for F where F: Fn(State) -> ParseFuture<T> + Clone + 'static {}

/// Type-erased parser, for heterogeneous lists of alternatives
pub type DynParser<T> = Rc<dyn Fn(State) -> ParseFuture<T>>;

/// Parse-wide ambient data threaded through every [`State`]
///
/// The context is immutable from a combinator's point of view: a combinator
/// that needs a different context returns a new state carrying a
/// reconstructed context, never mutating the shared one in place.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Context {
    // TODO Locale, pending here-documents and aliases will live here.
    origin: Rc<Origin>,
}

impl Context {
    /// Creates a context for source code of the given origin.
    #[must_use]
    pub fn new(origin: Origin) -> Context {
        Context {
            origin: Rc::new(origin),
        }
    }

    /// Returns the origin of the source code being parsed.
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns a copy of this context with another origin.
    #[must_use]
    pub fn with_origin(&self, origin: Origin) -> Context {
        Context::new(origin)
    }
}

/// A parser's current position: the unconsumed input and the ambient context
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    /// Stream of the input that has not been consumed yet
    pub rest: Stream,
    /// Ambient parse-wide data
    pub context: Context,
}

impl State {
    /// Creates a state at the beginning of the given stream, with a default
    /// context.
    #[must_use]
    pub fn new(rest: Stream) -> State {
        State {
            rest,
            context: Context::default(),
        }
    }
}

/// One successful parse step: the recognized value and the state after it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product<T> {
    /// Value the parser recognized
    pub value: T,
    /// State after consuming the value
    pub state: State,
}

/// Outcome of applying a parser to a state
///
/// An absent product is an ordinary control-flow outcome, used by
/// alternation and repetition to backtrack or stop; it is not necessarily
/// fatal to the whole grammar. Reports accumulate regardless of success.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseResult<T> {
    /// The recognized value and resulting state, if the parser succeeded
    pub product: Option<Product<T>>,
    /// Diagnostics accumulated while parsing
    pub reports: Vec<Report>,
}

impl<T> ParseResult<T> {
    /// Creates a successful result with no reports.
    #[must_use]
    pub fn success(value: T, state: State) -> ParseResult<T> {
        ParseResult {
            product: Some(Product { value, state }),
            reports: Vec::new(),
        }
    }

    /// Creates a failed result with no reports.
    #[must_use]
    pub fn failure() -> ParseResult<T> {
        ParseResult {
            product: None,
            reports: Vec::new(),
        }
    }

    /// Whether this result has a product.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.product.is_some()
    }

    /// Applies a function to the value, keeping the state and reports.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ParseResult<U>
    where
        F: FnOnce(T) -> U,
    {
        self.map_product(|product| Product {
            value: f(product.value),
            state: product.state,
        })
    }

    /// Applies a function to the whole product, keeping the reports.
    #[must_use]
    pub fn map_product<U, F>(self, f: F) -> ParseResult<U>
    where
        F: FnOnce(Product<T>) -> Product<U>,
    {
        ParseResult {
            product: self.product.map(f),
            reports: self.reports,
        }
    }
}

/// Sentinel value recognized by the end-of-input parser
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Eof;
