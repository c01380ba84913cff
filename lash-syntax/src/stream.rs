// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Lazy, memoized, shareable sequence of fragment positions
//!
//! A [`Stream`] stands in for reading source code on demand. Each node of
//! the stream, when first examined, runs a producer that yields a
//! [`StreamValue`]: the [position](FragmentPosition) of one character (or
//! the null position at the end of all input) and the stream of what
//! follows. The result is memoized in a [`SharedFuture`], so however many
//! consumers examine the node, and in whatever order relative to its
//! resolution, the producer runs at most once and every consumer observes
//! the same value. This is what lets backtracking parsers re-inspect input
//! without re-triggering the underlying read.
//!
//! Constructing a stream does no work; only [`Stream::next`] forces a node.

use crate::source::FragmentPosition;
use lash_defer::{Future, SharedFuture};
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::mem::replace;
use std::rc::Rc;

/// One resolved element of a stream
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamValue {
    /// Position of the character this element stands for
    ///
    /// The null position denotes the end of all input; in that case `next`
    /// yields the null position again.
    pub position: FragmentPosition,

    /// Stream of what follows this element
    pub next: Stream,
}

/// State of a stream node
enum Node {
    /// The node has not been examined; the producer has not run.
    Deferred(Box<dyn FnOnce() -> Future<StreamValue>>),
    /// The node has been examined; the memoized result.
    Forced(SharedFuture<StreamValue>),
}

/// Lazily evaluated, shareable stream of fragment positions
///
/// Clones of a `Stream` share the same node, and equality compares node
/// identity. See the [module documentation](self) for the evaluation model.
#[derive(Clone)]
pub struct Stream {
    node: Rc<RefCell<Node>>,
}

impl Stream {
    /// Creates a stream node backed by an arbitrary producer.
    ///
    /// The producer runs at most once, on the first call to
    /// [`next`](Self::next).
    #[must_use]
    pub fn from_fn<F>(producer: F) -> Stream
    where
        F: FnOnce() -> Future<StreamValue> + 'static,
    {
        Stream {
            node: Rc::new(RefCell::new(Node::Deferred(Box::new(producer)))),
        }
    }

    /// Creates the canonical end-of-input stream.
    ///
    /// Its sole value is the null position followed by another empty stream.
    #[must_use]
    pub fn empty() -> Stream {
        Stream::from_fn(|| {
            Future::ready(StreamValue {
                position: FragmentPosition::null(),
                next: Stream::empty(),
            })
        })
    }

    /// Creates a stream that yields `position` and every following character
    /// of its fragment chain, then continues into `tail`.
    ///
    /// A null `position` produces the end-of-input value immediately; `tail`
    /// is not consulted.
    #[must_use]
    pub fn of(position: FragmentPosition, tail: Stream) -> Stream {
        Stream::from_fn(move || Future::ready(chain_value(position, tail)))
    }

    /// Forces this node and returns its memoized value.
    pub fn next(&self) -> SharedFuture<StreamValue> {
        let mut node = self.node.borrow_mut();
        if let Node::Forced(shared) = &*node {
            return shared.clone();
        }

        let (promise, future) = lash_defer::pair();
        let shared = future.shared();
        let previous = replace(&mut *node, Node::Forced(shared.clone()));
        let Node::Deferred(producer) = previous else {
            unreachable!()
        };
        // The borrow must be released before the producer runs: it may
        // resolve synchronously and its observers may examine this stream.
        drop(node);
        producer().forward(promise);
        shared
    }
}

/// Computes the stream value for a position within a fragment chain.
pub(crate) fn chain_value(position: FragmentPosition, tail: Stream) -> StreamValue {
    if position.is_null() {
        return StreamValue {
            position,
            next: Stream::empty(),
        };
    }

    let mut successor = position.clone();
    successor.advance();
    let next = if successor.is_null() {
        tail
    } else {
        Stream::of(successor, tail)
    };
    StreamValue { position, next }
}

/// Compares by identity of the underlying node.
impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Stream {}

impl Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.node.borrow() {
            Node::Deferred(_) => "Deferred",
            Node::Forced(_) => "Forced",
        };
        f.debug_struct("Stream").field("node", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Fragment;
    use std::cell::Cell;

    /// Collects every character a stream yields, by repeated forcing.
    fn drain(stream: &Stream) -> String {
        let mut text = String::new();
        let mut stream = stream.clone();
        loop {
            let value = stream.next().get().expect("stream value should be ready");
            let value = value.expect("stream should not fail");
            match value.position.current() {
                Some(c) => text.push(c),
                None => return text,
            }
            stream = value.next;
        }
    }

    #[test]
    fn empty_stream_yields_the_null_position() {
        let value = Stream::empty().next().get().unwrap().unwrap();
        assert!(value.position.is_null());
        let again = value.next.next().get().unwrap().unwrap();
        assert!(again.position.is_null());
    }

    #[test]
    fn stream_of_walks_the_fragment_chain_then_the_tail() {
        let tail_fragment = Fragment::terminal("cd");
        let tail = Stream::of(
            FragmentPosition::start_of(tail_fragment),
            Stream::empty(),
        );
        let fragment = Fragment::terminal("ab");
        let stream = Stream::of(FragmentPosition::start_of(fragment), tail);
        assert_eq!(drain(&stream), "abcd");
    }

    #[test]
    fn stream_of_null_position_is_end_of_input() {
        let fragment = Fragment::terminal("unreached");
        let tail = Stream::of(FragmentPosition::start_of(fragment), Stream::empty());
        let stream = Stream::of(FragmentPosition::null(), tail);
        let value = stream.next().get().unwrap().unwrap();
        assert!(value.position.is_null());
    }

    #[test]
    fn stream_positions_match_walking_one_master_position() {
        let second = Fragment::terminal("two\n");
        let first = Fragment::new("one\n", FragmentPosition::start_of(Rc::clone(&second)));
        let master = FragmentPosition::start_of(Rc::clone(&first));
        let stream = Stream::of(master.clone(), Stream::empty());

        let expected: String = master.collect();
        assert_eq!(drain(&stream), expected);
    }

    #[test]
    fn producer_runs_at_most_once() {
        let runs = Rc::new(Cell::new(0));
        let runs2 = Rc::clone(&runs);
        let stream = Stream::from_fn(move || {
            runs2.set(runs2.get() + 1);
            Future::ready(StreamValue {
                position: FragmentPosition::null(),
                next: Stream::empty(),
            })
        });

        let first = stream.next();
        let second = stream.next();
        assert_eq!(runs.get(), 1);
        assert_eq!(first, second);
        assert_eq!(first.get().unwrap().unwrap(), second.get().unwrap().unwrap());
    }

    #[test]
    fn pending_node_resolves_for_all_observers_when_produced() {
        let (promise, future) = lash_defer::pair();
        let stream = Stream::from_fn(move || future);

        let first = stream.next();
        let second = stream.next();
        assert!(first.get().is_none());
        assert!(second.get().is_none());

        promise.set(StreamValue {
            position: FragmentPosition::null(),
            next: Stream::empty(),
        });
        assert!(first.get().unwrap().unwrap().position.is_null());
        assert!(second.get().unwrap().unwrap().position.is_null());
    }
}
