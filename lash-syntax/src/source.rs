// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Source code fragments that are passed to the parser
//!
//! Source code reaches the parser as a chain of immutable [`Fragment`]s, each
//! holding a chunk of text (usually one line) and a [`FragmentPosition`]
//! pointing at what logically follows it. A `FragmentPosition` acts as a
//! forward iterator over the characters of a chain; it is the unit of
//! position information attached to diagnostics.
//!
//! Fragments are reference-counted and never mutated after construction, so
//! any number of positions and [streams](crate::stream) may share them.

pub mod pretty;

use std::fmt;
use std::rc::Rc;

/// Origin of source code
///
/// This value describes where the parsed source code came from, for use in
/// diagnostic messages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Origin {
    /// Source code of unknown origin
    ///
    /// Normally you should not use this value, but it may be useful for
    /// quick debugging.
    #[default]
    Unknown,

    /// Standard input
    Stdin,

    /// Command string specified on the command line
    CommandString,

    /// File read as a script
    File {
        /// Path to the file
        name: String,
    },
}

impl Origin {
    /// Returns a label that describes the origin.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Origin::Unknown => "<?>",
            Origin::Stdin => "<stdin>",
            Origin::CommandString => "<command_string>",
            Origin::File { name } => name,
        }
    }
}

/// Immutable chunk of source text
///
/// A fragment holds a string and a position pointing at what follows the
/// string in the logical character sequence. The string is non-empty, except
/// possibly for the very first fragment of a chain.
#[derive(Debug, Eq, PartialEq)]
pub struct Fragment {
    /// Content of this fragment, usually one line terminated by a newline
    pub value: String,

    /// What follows this fragment's content
    pub rest: FragmentPosition,
}

impl Fragment {
    /// Creates a new reference-counted fragment.
    #[must_use]
    pub fn new<S: Into<String>>(value: S, rest: FragmentPosition) -> Rc<Fragment> {
        Rc::new(Fragment {
            value: value.into(),
            rest,
        })
    }

    /// Creates a fragment that is not followed by anything.
    #[must_use]
    pub fn terminal<S: Into<String>>(value: S) -> Rc<Fragment> {
        Fragment::new(value, FragmentPosition::null())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }
}

/// Position of a character in a fragment chain
///
/// A position pairs a shared, nullable reference to a fragment with an index
/// into the fragment's value, counted in Unicode scalar values. The null
/// position (no fragment) denotes the end of all input.
///
/// Positions are normalized: a non-null position always denotes an existing
/// character. Advancing past the last character of a fragment follows the
/// fragment's `rest` until a character or the null position is reached.
/// Consequently, iterating a position yields every remaining character of the
/// chain:
///
/// ```
/// # use lash_syntax::source::{Fragment, FragmentPosition};
/// let second = Fragment::terminal("cd\n");
/// let first = Fragment::new("ab", FragmentPosition::start_of(second));
/// let position = FragmentPosition::start_of(first);
/// let text: String = position.collect();
/// assert_eq!(text, "abcd\n");
/// ```
///
/// Equality compares fragment identity (not content) and index.
#[derive(Clone, Debug, Default)]
pub struct FragmentPosition {
    head: Option<Rc<Fragment>>,
    index: usize,
}

impl FragmentPosition {
    /// Returns the null position denoting the end of all input.
    #[must_use]
    pub fn null() -> FragmentPosition {
        FragmentPosition::default()
    }

    /// Returns the normalized position of the first character of a fragment.
    ///
    /// If the fragment is empty, the result is its `rest`, normalized.
    #[must_use]
    pub fn start_of(fragment: Rc<Fragment>) -> FragmentPosition {
        normalize(Some(fragment), 0)
    }

    /// Whether this position is the null position.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the fragment this position points into, if any.
    #[must_use]
    pub fn head(&self) -> Option<&Rc<Fragment>> {
        self.head.as_ref()
    }

    /// Returns the character index in the head fragment's value.
    ///
    /// The index counts Unicode scalar values, not bytes. The null position
    /// has index 0.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the character at this position, or `None` for the null
    /// position.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        let head = self.head.as_ref()?;
        head.value.chars().nth(self.index)
    }

    /// Moves this position to the next character of the chain.
    ///
    /// Advancing the null position is a no-op.
    pub fn advance(&mut self) {
        if let Some(head) = self.head.take() {
            *self = normalize(Some(head), self.index + 1);
        }
    }
}

/// Canonicalizes an end-of-fragment index by following `rest` links.
fn normalize(mut head: Option<Rc<Fragment>>, mut index: usize) -> FragmentPosition {
    loop {
        match head {
            None => return FragmentPosition::null(),
            Some(fragment) => {
                if index < fragment.char_count() {
                    return FragmentPosition {
                        head: Some(fragment),
                        index,
                    };
                }
                let rest = fragment.rest.clone();
                head = rest.head;
                index = rest.index;
            }
        }
    }
}

impl Iterator for FragmentPosition {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.current()?;
        self.advance();
        Some(c)
    }
}

impl PartialEq for FragmentPosition {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && match (&self.head, &other.head) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl Eq for FragmentPosition {}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label().fmt(f)
    }
}
