// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Diagnostics produced while parsing
//!
//! A [`Report`] ties a [`ReportKind`] to the [position](FragmentPosition) the
//! problem was detected at. Reports travel inside
//! [`ParseResult`](crate::parser::ParseResult)s: combinators collect the
//! reports of the parsers they apply, so the reports of a failed parse
//! survive into whatever result the caller finally observes.
//!
//! For presenting a report to the user, convert it to a
//! [`Message`](crate::source::pretty::Message) and format it with the
//! `annotate-snippets` support in [`crate::source::pretty`].

use crate::source::pretty::{Annotation, AnnotationType, MessageBase};
use crate::source::FragmentPosition;
use std::borrow::Cow;
use thiserror::Error;

/// Severity of a [`Report`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    /// Informational outcome that is not a problem
    Result,
    /// Problem that prevents the input from being parsed
    Error,
    /// Suspicious input that parses nonetheless
    Warning,
    /// Supplementary information attached to another report
    Note,
}

/// Types of problems a [`Report`] can describe
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ReportKind {
    /// A command was expected, but the input begins with something that
    /// cannot start one.
    #[error("empty command")]
    EmptyCommand,
}

/// Diagnostic message with a source position
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    /// Severity of this report
    pub category: Category,
    /// What this report is about
    pub kind: ReportKind,
    /// Position the problem was detected at
    pub position: FragmentPosition,
    /// Supplementary reports elaborating on this one
    pub subreports: Vec<Report>,
}

impl Report {
    /// Creates an error-category report with no subreports.
    #[must_use]
    pub fn error(kind: ReportKind, position: FragmentPosition) -> Report {
        Report {
            category: Category::Error,
            kind,
            position,
            subreports: Vec::new(),
        }
    }
}

impl From<Category> for AnnotationType {
    fn from(category: Category) -> AnnotationType {
        match category {
            Category::Result => AnnotationType::Info,
            Category::Error => AnnotationType::Error,
            Category::Warning => AnnotationType::Warning,
            Category::Note => AnnotationType::Note,
        }
    }
}

impl MessageBase for Report {
    fn message_type(&self) -> AnnotationType {
        self.category.into()
    }

    fn message_title(&self) -> Cow<str> {
        self.kind.to_string().into()
    }

    fn main_annotation(&self) -> Annotation<'_> {
        Annotation::new(
            self.category.into(),
            self.kind.to_string().into(),
            &self.position,
        )
    }

    fn additional_annotations<'a, T: Extend<Annotation<'a>>>(&'a self, results: &mut T) {
        results.extend(self.subreports.iter().map(Report::main_annotation));
    }
}
