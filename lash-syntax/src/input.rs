// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Methods about passing [source](crate::source) code to the parser
//!
//! An [`Input`] supplies source code line by line. The [`input_stream`]
//! function turns an input into a [`Stream`], wrapping each line in one
//! [`Fragment`]: the parser then pulls exactly as many lines as the syntax
//! it is recognizing requires, and never pre-reads.
//!
//! An input decides for itself when to block for actual I/O. A synchronous
//! input such as [`Memory`] returns already-resolved futures; an interactive
//! input may return a pending future and satisfy the underlying promise when
//! a line arrives, at which point every parse step waiting on it resumes.

use crate::source::{Fragment, FragmentPosition};
use crate::stream::{chain_value, Stream, StreamValue};
use lash_defer::Future;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Line-oriented source code reader
///
/// An implementor provides the parser with source code, one line per call.
/// A returned line is terminated by a newline unless the end of input is
/// reached, in which case the remaining characters are returned without a
/// trailing newline. If there are no more characters at all, the returned
/// line is empty, which signals the end of input.
///
/// Read errors are delivered as [faults](lash_defer::Fault) of the returned
/// future and are considered unrecoverable: once a fault is delivered, the
/// input should not be asked for more lines.
#[must_use = "inputs should be used by a parser"]
pub trait Input {
    /// Reads the next line of the source code.
    fn next_line(&mut self) -> Future<String>;
}

/// Input that reads from a string in memory
///
/// All lines resolve synchronously.
#[derive(Clone, Debug)]
pub struct Memory {
    lines: VecDeque<String>,
}

impl Memory {
    /// Creates a new `Memory` that reads the given string.
    pub fn new(code: &str) -> Memory {
        let lines = code.split_inclusive('\n').map(ToOwned::to_owned).collect();
        Memory { lines }
    }
}

impl From<&str> for Memory {
    fn from(code: &str) -> Memory {
        Memory::new(code)
    }
}

impl Input for Memory {
    fn next_line(&mut self) -> Future<String> {
        Future::ready(self.lines.pop_front().unwrap_or_default())
    }
}

/// Builds an on-demand stream over the lines of an input.
///
/// Each forced node reads at most one line. A non-empty line becomes a
/// [`Fragment`] whose characters the stream yields before asking the input
/// for another line; an empty line terminates the stream with the null
/// position.
pub fn input_stream<I: Input + 'static>(input: I) -> Stream {
    read_node(Rc::new(RefCell::new(input)))
}

fn read_node<I: Input + 'static>(input: Rc<RefCell<I>>) -> Stream {
    Stream::from_fn(move || {
        let line = input.borrow_mut().next_line();
        line.map(move |line| {
            if line.is_empty() {
                StreamValue {
                    position: FragmentPosition::null(),
                    next: Stream::empty(),
                }
            } else {
                let fragment = Fragment::terminal(line);
                let position = FragmentPosition::start_of(fragment);
                chain_value(position, read_node(input))
            }
        })
    })
}
