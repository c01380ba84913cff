// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Pretty-printing diagnostic messages containing references to source code
//!
//! This module defines data types for constructing intermediate data
//! structures for printing diagnostic messages referencing source code
//! fragments. When you have a [`Report`](crate::parser::Report), you can
//! convert it to a [`Message`]. Then, you can in turn convert it into
//! `annotate_snippets::Message`, for example, and finally format a printable
//! diagnostic message string.
//!
//! When the `lash_syntax` crate is built with the `annotate-snippets` feature
//! enabled, it supports conversion from `Message` to
//! `annotate_snippets::Message`. If you would like to use another formatter
//! instead, you can provide your own conversion for yourself.
//!
//! ```
//! # use lash_syntax::parser::{Report, ReportKind};
//! # use lash_syntax::source::FragmentPosition;
//! # use lash_syntax::source::pretty::Message;
//! let report = Report::error(ReportKind::EmptyCommand, FragmentPosition::null());
//! let message = Message::from(&report);
//! // The lines below require the `annotate-snippets` feature.
//! # #[cfg(feature = "annotate-snippets")]
//! # {
//! let message = annotate_snippets::Message::from(&message);
//! eprint!("{}", annotate_snippets::Renderer::plain().render(message));
//! # }
//! ```
//!
//! You can also implement conversion from your custom error object to a
//! [`Message`]: either directly implement `From<YourError>` for `Message`, or
//! implement [`MessageBase`] for `YourError` thereby deriving
//! `From<&YourError>` for `Message`.

use super::{FragmentPosition, Origin};
use std::borrow::Cow;

/// Type of annotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnnotationType {
    Error,
    Warning,
    Info,
    Note,
    Help,
}

/// Source code fragment annotated with a label
///
/// Annotations are part of an entire [`Message`].
#[derive(Clone, Debug)]
pub struct Annotation<'a> {
    /// Type of annotation
    pub r#type: AnnotationType,
    /// String that describes the annotated part of the source code
    pub label: Cow<'a, str>,
    /// Position of the annotated character in the source code
    pub position: &'a FragmentPosition,
    /// Content of the fragment containing the annotated character
    ///
    /// This is the value of the position's head fragment, or an empty string
    /// for the null position.
    pub line: Cow<'a, str>,
    /// Origin of the annotated source code, if known
    pub origin: Option<&'a Origin>,
}

impl<'a> Annotation<'a> {
    /// Creates a new annotation with no origin.
    pub fn new(r#type: AnnotationType, label: Cow<'a, str>, position: &'a FragmentPosition) -> Self {
        let line = match position.head() {
            Some(fragment) => Cow::Borrowed(fragment.value.as_str()),
            None => Cow::Borrowed(""),
        };
        Annotation {
            r#type,
            label,
            position,
            line,
            origin: None,
        }
    }
}

/// Additional text without associated source code
#[derive(Clone, Debug)]
pub struct Footer<'a> {
    /// Type of this footer
    pub r#type: AnnotationType,
    /// Text of this footer
    pub label: Cow<'a, str>,
}

/// Entire diagnostic message
#[derive(Clone, Debug)]
pub struct Message<'a> {
    /// Type of this message
    pub r#type: AnnotationType,
    /// String that communicates the most important information in this message
    pub title: Cow<'a, str>,
    /// References to source code fragments annotated with additional information
    pub annotations: Vec<Annotation<'a>>,
    /// Additional text without associated source code
    pub footers: Vec<Footer<'a>>,
}

/// Helper for constructing a [`Message`]
///
/// Thanks to the blanket implementation `impl<'a, T: MessageBase> From<&'a T>
/// for Message<'a>`, implementors of this trait can be converted to a message
/// for free.
pub trait MessageBase {
    /// Returns the type of the entire message.
    ///
    /// The default implementation returns `AnnotationType::Error`.
    fn message_type(&self) -> AnnotationType {
        AnnotationType::Error
    }

    /// Returns the main caption of the message.
    fn message_title(&self) -> Cow<str>;

    /// Returns an annotation to be the first in the message.
    fn main_annotation(&self) -> Annotation<'_>;

    /// Adds additional annotations to the given container.
    ///
    /// The default implementation does nothing.
    fn additional_annotations<'a, T: Extend<Annotation<'a>>>(&'a self, results: &mut T) {
        let _ = results;
    }

    /// Returns footers that are included in the message.
    fn footers(&self) -> Vec<Footer> {
        Vec::new()
    }
}

/// Constructs a message based on the message base.
impl<'a, T: MessageBase> From<&'a T> for Message<'a> {
    fn from(base: &'a T) -> Self {
        let mut annotations = vec![base.main_annotation()];
        base.additional_annotations(&mut annotations);

        Message {
            r#type: base.message_type(),
            title: base.message_title(),
            annotations,
            footers: base.footers(),
        }
    }
}

#[cfg(feature = "annotate-snippets")]
mod annotate_snippets_support {
    use super::*;
    use std::ops::Range;
    use std::rc::Rc;

    /// Converts `lash_syntax::source::pretty::AnnotationType` into
    /// `annotate_snippets::Level`.
    ///
    /// This implementation is only available when the `lash_syntax` crate is
    /// built with the `annotate-snippets` feature enabled.
    impl From<AnnotationType> for annotate_snippets::Level {
        fn from(r#type: AnnotationType) -> Self {
            use AnnotationType::*;
            match r#type {
                Error => Self::Error,
                Warning => Self::Warning,
                Info => Self::Info,
                Note => Self::Note,
                Help => Self::Help,
            }
        }
    }

    /// Computes the byte range of the character at the given character index.
    ///
    /// Past-the-end indices map to the empty range at the end of the line.
    fn byte_range(line: &str, char_index: usize) -> Range<usize> {
        match line.char_indices().nth(char_index) {
            Some((start, c)) => start..start + c.len_utf8(),
            None => line.len()..line.len(),
        }
    }

    /// Whether two annotations point into the same fragment.
    fn same_fragment(a: &Annotation, b: &Annotation) -> bool {
        match (a.position.head(), b.position.head()) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Converts `lash_syntax::source::pretty::Message` into
    /// `annotate_snippets::Message`.
    ///
    /// This implementation is only available when the `lash_syntax` crate is
    /// built with the `annotate-snippets` feature enabled.
    impl<'a> From<&'a Message<'a>> for annotate_snippets::Message<'a> {
        fn from(message: &'a Message<'a>) -> Self {
            // Annotations into the same fragment are merged into one snippet.
            let mut snippets: Vec<(
                &Annotation,
                annotate_snippets::Snippet,
                Vec<annotate_snippets::Annotation>,
            )> = Vec::new();
            for annotation in &message.annotations {
                let range = byte_range(&annotation.line, annotation.position.index());
                let level = annotate_snippets::Level::from(annotation.r#type);
                let as_annotation = level.span(range).label(&annotation.label);
                if let Some((_, _, annotations)) = snippets
                    .iter_mut()
                    .find(|&&mut (first, _, _)| same_fragment(first, annotation))
                {
                    annotations.push(as_annotation);
                } else {
                    let mut snippet = annotate_snippets::Snippet::source(&annotation.line)
                        .line_start(1)
                        .fold(true);
                    if let Some(origin) = annotation.origin {
                        snippet = snippet.origin(origin.label());
                    }
                    snippets.push((annotation, snippet, vec![as_annotation]));
                }
            }

            annotate_snippets::Level::from(message.r#type)
                .title(&message.title)
                .snippets(
                    snippets
                        .into_iter()
                        .map(|(_, snippet, annotations)| snippet.annotations(annotations)),
                )
                .footers(message.footers.iter().map(|footer| {
                    let level = annotate_snippets::Level::from(footer.r#type);
                    level.title(&footer.label)
                }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Fragment;

    #[test]
    fn annotation_borrows_the_head_fragment_value() {
        let fragment = Fragment::terminal("echo\n");
        let position = FragmentPosition::start_of(fragment);
        let annotation = Annotation::new(AnnotationType::Error, "here".into(), &position);
        assert_eq!(annotation.line, "echo\n");
        assert_eq!(annotation.origin, None);
    }

    #[test]
    fn annotation_at_the_null_position_has_an_empty_line() {
        let position = FragmentPosition::null();
        let annotation = Annotation::new(AnnotationType::Note, "end".into(), &position);
        assert_eq!(annotation.line, "");
    }

    #[cfg(feature = "annotate-snippets")]
    #[test]
    fn rendering_a_message_includes_title_and_label() {
        let fragment = Fragment::terminal(";\n");
        let position = FragmentPosition::start_of(fragment);
        let mut annotation =
            Annotation::new(AnnotationType::Error, "unexpected token".into(), &position);
        annotation.origin = Some(&Origin::Stdin);
        let message = Message {
            r#type: AnnotationType::Error,
            title: "cannot parse command".into(),
            annotations: vec![annotation],
            footers: vec![],
        };
        let message = annotate_snippets::Message::from(&message);
        let rendered = annotate_snippets::Renderer::plain()
            .render(message)
            .to_string();
        assert!(rendered.contains("cannot parse command"), "{rendered}");
        assert!(rendered.contains("unexpected token"), "{rendered}");
        assert!(rendered.contains("<stdin>"), "{rendered}");
    }
}
