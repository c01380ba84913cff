// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsing simple commands

use crate::parser::combinator::{join, map_value, repeat};
use crate::parser::core::{ParseFuture, ParseResult, Product, State};
use crate::parser::report::{Report, ReportKind};
use crate::parser::trivia::skip_whitespaces;
use crate::parser::word::parse_word;
use crate::syntax::{SimpleCommand, Word};
use lash_defer::Future;

/// Parses one token of a simple command: a word and the whitespace after it.
///
/// Fails without consuming if no word starts at the current position.
/// Currently the only token form is a [`Word`].
fn parse_token(state: State) -> ParseFuture<Word> {
    let parser = map_value(join(parse_word, skip_whitespaces()), |(word, ())| word);
    parser(state).map(|result| match result.product {
        Some(product) if !product.value.is_empty() => ParseResult {
            product: Some(product),
            reports: result.reports,
        },
        _ => ParseResult {
            product: None,
            reports: result.reports,
        },
    })
}

/// Parses a simple command: one or more tokens.
///
/// Tokens are consumed until one fails to parse, each with its trailing
/// whitespace. A command with no tokens at all is an error: the parser
/// fails, attaching an "empty command" report at the current position.
pub fn parse_simple_command(state: State) -> ParseFuture<SimpleCommand> {
    repeat(parse_token, Vec::new())(state).and_then(|result| {
        let Some(Product { value: words, state }) = result.product else {
            unreachable!("repeat always succeeds")
        };
        if words.is_empty() {
            let mut reports = result.reports;
            state.rest.next().map(move |value| {
                reports.push(Report::error(ReportKind::EmptyCommand, value.position));
                ParseResult {
                    product: None,
                    reports,
                }
            })
        } else {
            Future::ready(ParseResult {
                product: Some(Product {
                    value: SimpleCommand { words },
                    state,
                }),
                reports: result.reports,
            })
        }
    })
}
