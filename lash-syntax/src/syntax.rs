// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Shell command language syntax
//!
//! This module defines the data types for constructing abstract syntax trees
//! of the shell language, assembled bottom-up: [`Word`]s make a
//! [`SimpleCommand`], commands make a [`Pipeline`], pipelines make an
//! [`AndOrList`], and and-or lists make a [`Sequence`].
//!
//! The grammar recognized by the [parser](crate::parser) is deliberately
//! narrow for now: raw words only, one command per pipeline, one pipeline
//! per and-or list, one and-or list per sequence. The types nevertheless
//! model the richer shapes so that extending the grammar does not change the
//! tree structure; enums are non-exhaustive for the same reason.
//!
//! All types implement [`Display`](fmt::Display), producing source code that
//! would parse into the same tree.

use itertools::Itertools as _;
use std::fmt;

/// Element of a [`Word`]
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum WordComponent {
    /// Unquoted literal string
    Raw(String),
    // TODO Quoted strings, parameter expansions, command substitutions
}

/// Token that may eventually be subjected to expansions
///
/// A word is an ordered sequence of [components](WordComponent).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Word {
    /// Components that constitute the word
    pub components: Vec<WordComponent>,
}

impl Word {
    /// Whether this word has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Command that runs a single utility
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SimpleCommand {
    /// Words of the command: the utility name followed by its arguments
    pub words: Vec<Word>,
    // TODO Assignments and redirections
}

impl SimpleCommand {
    /// Whether this simple command has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Element of a pipeline
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// Simple command
    Simple(SimpleCommand),
    // TODO Compound commands and function definitions
}

/// How a pipeline's exit status is derived from its last command
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExitStatusMode {
    /// The exit status of the last command is used as is.
    #[default]
    Straight,
    /// The exit status of the last command is logically negated (`!`).
    Negated,
}

/// Commands separated by `|`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    /// Commands of this pipeline
    ///
    /// A valid pipeline has at least one command.
    pub commands: Vec<Command>,
    /// How the pipeline's exit status is derived
    pub exit_status_mode: ExitStatusMode,
}

/// Condition that decides whether the next pipeline of an [`AndOrList`] runs
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AndOr {
    /// `&&`: run if the previous pipeline succeeded
    AndThen,
    /// `||`: run if the previous pipeline failed
    OrElse,
}

/// Whether a list is waited for by the invoking shell
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Synchronicity {
    /// The shell waits for the list to finish.
    #[default]
    Sequential,
    /// The list runs in the background (`&`).
    Asynchronous,
}

/// Pipelines separated by `&&` or `||`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AndOrList {
    /// First pipeline of the list
    pub first: Pipeline,
    /// Remaining pipelines, each with the condition for running it
    pub rest: Vec<(AndOr, Pipeline)>,
    /// Whether the invoking shell waits for this list
    pub synchronicity: Synchronicity,
}

/// And-or lists separated by `;` or `&`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sequence {
    /// And-or lists of this sequence, in order of appearance
    pub and_or_lists: Vec<AndOrList>,
}

impl fmt::Display for WordComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordComponent::Raw(value) => value.fmt(f),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.iter().format(""))
    }
}

impl fmt::Display for SimpleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.iter().format(" "))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Simple(command) => command.fmt(f),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exit_status_mode == ExitStatusMode::Negated {
            f.write_str("! ")?;
        }
        write!(f, "{}", self.commands.iter().format(" | "))
    }
}

impl fmt::Display for AndOr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AndOr::AndThen => f.write_str("&&"),
            AndOr::OrElse => f.write_str("||"),
        }
    }
}

impl fmt::Display for AndOrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.first.fmt(f)?;
        for (condition, pipeline) in &self.rest {
            write!(f, " {condition} {pipeline}")?;
        }
        if self.synchronicity == Synchronicity::Asynchronous {
            f.write_str(" &")?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.and_or_lists.iter().format("; "))
    }
}
