// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Functions that combine parsers into larger parsers
//!
//! Combinators compose [`Parser`]s without forcing any input themselves;
//! laziness and memoization are entirely the business of the underlying
//! [stream](crate::stream). Failure of a sub-parser is ordinary data here:
//! [`choice`] and [`option`] turn it into backtracking, [`repeat`] turns it
//! into termination, and [`join`] propagates it.
//!
//! Reports accumulate in application order. A combinator that discards a
//! sub-parser's product still forwards the reports of the result it settles
//! on, so diagnostics survive backtracking.

use crate::parser::core::{DynParser, ParseFuture, ParseResult, Parser, Product, State};
use crate::parser::report::Report;
use lash_defer::Future;
use std::rc::Rc;

/// Returns a parser that applies a function to another parser's value.
pub fn map_value<T, U, P, F>(parser: P, f: F) -> impl Parser<U>
where
    P: Parser<T>,
    F: Fn(T) -> U + Clone + 'static,
    T: 'static,
    U: 'static,
{
    move |state: State| {
        let f = f.clone();
        parser(state).map(move |result| result.map(f))
    }
}

/// Returns a parser that applies a function to another parser's product.
///
/// Unlike [`map_value`], the function also sees and may replace the
/// resulting state.
pub fn map_product<T, U, P, F>(parser: P, f: F) -> impl Parser<U>
where
    P: Parser<T>,
    F: Fn(Product<T>) -> Product<U> + Clone + 'static,
    T: 'static,
    U: 'static,
{
    move |state: State| {
        let f = f.clone();
        parser(state).map(move |result| result.map_product(f))
    }
}

/// Returns a parser that tries two parsers on the same state in turn.
///
/// The second parser runs only if the first fails, on the very state the
/// first was applied to. The result is that of whichever parser ran last,
/// reports included; a failed first attempt contributes nothing to it.
pub fn choice<T, P, Q>(first: P, second: Q) -> impl Parser<T>
where
    P: Parser<T>,
    Q: Parser<T>,
    T: 'static,
{
    move |state: State| {
        let second = second.clone();
        let saved = state.clone();
        first(state).and_then(move |result| {
            if result.is_success() {
                Future::ready(result)
            } else {
                second(saved)
            }
        })
    }
}

/// Returns a parser that tries any number of parsers on the same state in
/// turn.
///
/// Like [`choice`], but for a runtime collection of alternatives. The result
/// is that of the first succeeding alternative, or of the last alternative
/// if all fail. An empty collection always fails without reports.
pub fn choose<T: 'static>(alternatives: Vec<DynParser<T>>) -> impl Parser<T> {
    let alternatives = Rc::new(alternatives);
    move |state: State| choose_step(Rc::clone(&alternatives), 0, state)
}

fn choose_step<T: 'static>(
    alternatives: Rc<Vec<DynParser<T>>>,
    index: usize,
    state: State,
) -> ParseFuture<T> {
    let Some(parser) = alternatives.get(index) else {
        return Future::ready(ParseResult::failure());
    };
    let future = parser(state.clone());
    future.and_then(move |result| {
        if result.is_success() || index + 1 == alternatives.len() {
            Future::ready(result)
        } else {
            choose_step(alternatives, index + 1, state)
        }
    })
}

/// Returns a parser that applies two parsers in sequence.
///
/// The second parser runs on the state the first leaves behind; the values
/// are paired. If either parser fails the whole parser fails, keeping the
/// reports of the parsers that ran.
pub fn join<T, U, P, Q>(first: P, second: Q) -> impl Parser<(T, U)>
where
    P: Parser<T>,
    Q: Parser<U>,
    T: 'static,
    U: 'static,
{
    move |state: State| {
        let second = second.clone();
        first(state).and_then(move |first_result| match first_result.product {
            None => Future::ready(ParseResult {
                product: None,
                reports: first_result.reports,
            }),
            Some(Product { value, state }) => {
                let mut reports = first_result.reports;
                second(state).map(move |mut second_result| {
                    reports.append(&mut second_result.reports);
                    ParseResult {
                        product: second_result.product.map(|product| Product {
                            value: (value, product.value),
                            state: product.state,
                        }),
                        reports,
                    }
                })
            }
        })
    }
}

/// Returns a parser that applies three parsers in sequence.
pub fn join3<T, U, V, P, Q, R>(first: P, second: Q, third: R) -> impl Parser<(T, U, V)>
where
    P: Parser<T>,
    Q: Parser<U>,
    R: Parser<V>,
    T: 'static,
    U: 'static,
    V: 'static,
{
    map_value(join(join(first, second), third), |((t, u), v)| (t, u, v))
}

/// Returns a parser that applies another parser as many times as it
/// succeeds.
///
/// Each value is folded into a clone of the seed with [`Extend`]. The
/// parser never fails: when a round fails, the parser succeeds with the
/// values collected so far and the state before the failing round. Reports
/// of successful rounds accumulate; the failing round's reports are
/// dropped along with its partial progress.
///
/// The inner parser must consume input when it succeeds, or the repetition
/// would never terminate.
pub fn repeat<T, C, P>(parser: P, seed: C) -> impl Parser<C>
where
    P: Parser<T>,
    C: Extend<T> + Clone + 'static,
    T: 'static,
{
    move |state: State| repeat_step(parser.clone(), state, seed.clone(), Vec::new())
}

fn repeat_step<T, C, P>(
    parser: P,
    state: State,
    mut accumulated: C,
    mut reports: Vec<Report>,
) -> ParseFuture<C>
where
    P: Parser<T>,
    C: Extend<T> + Clone + 'static,
    T: 'static,
{
    let future = parser(state.clone());
    future.and_then(move |mut result| match result.product {
        Some(product) => {
            accumulated.extend(std::iter::once(product.value));
            reports.append(&mut result.reports);
            repeat_step(parser, product.state, accumulated, reports)
        }
        None => Future::ready(ParseResult {
            product: Some(Product {
                value: accumulated,
                state,
            }),
            reports,
        }),
    })
}

/// Returns a parser that applies another parser as many times as it
/// succeeds, requiring at least one success.
///
/// If the very first application fails, the whole parser fails with that
/// application's reports. Otherwise this behaves like [`repeat`] with an
/// empty `Vec` seed.
pub fn one_or_more<T, P>(parser: P) -> impl Parser<Vec<T>>
where
    P: Parser<T>,
    T: Clone + 'static,
{
    move |state: State| {
        let parser = parser.clone();
        let future = parser(state);
        future.and_then(move |first| match first.product {
            Some(product) => repeat_step(parser, product.state, vec![product.value], first.reports),
            None => Future::ready(ParseResult {
                product: None,
                reports: first.reports,
            }),
        })
    }
}

/// Returns a parser that turns another parser's failure into success with
/// `None`.
///
/// On failure the original state is returned, so no input is consumed. The
/// attempt's reports are forwarded either way.
pub fn option<T, P>(parser: P) -> impl Parser<Option<T>>
where
    P: Parser<T>,
    T: 'static,
{
    move |state: State| {
        let saved = state.clone();
        parser(state).map(move |result| ParseResult {
            product: Some(match result.product {
                Some(product) => Product {
                    value: Some(product.value),
                    state: product.state,
                },
                None => Product {
                    value: None,
                    state: saved,
                },
            }),
            reports: result.reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{input_stream, Memory};
    use crate::parser::char::{accept_char, parse_char, test_char};
    use crate::parser::report::ReportKind;
    use crate::source::FragmentPosition;
    use futures_util::FutureExt as _;

    fn state_of(code: &str) -> State {
        State::new(input_stream(Memory::new(code)))
    }

    fn apply<T: 'static>(parser: impl Parser<T>, state: State) -> ParseResult<T> {
        parser(state).now_or_never().unwrap().unwrap()
    }

    /// Parser that fails and leaves one report behind.
    fn failing() -> impl Parser<char> {
        |_state: State| {
            Future::ready(ParseResult {
                product: None,
                reports: vec![Report::error(
                    ReportKind::EmptyCommand,
                    FragmentPosition::null(),
                )],
            })
        }
    }

    #[test]
    fn choice_returns_the_first_success() {
        let parser = choice(parse_char('a'), parse_char('b'));
        let result = apply(parser, state_of("a"));
        assert_eq!(result.product.unwrap().value, 'a');
    }

    #[test]
    fn choice_backtracks_to_the_same_state() {
        let parser = choice(parse_char('a'), parse_char('b'));
        let result = apply(parser, state_of("b"));
        assert_eq!(result.product.unwrap().value, 'b');
    }

    #[test]
    fn choice_forwards_the_reports_of_the_parser_that_ran_last() {
        let parser = choice(failing(), parse_char('b'));
        let result = apply(parser, state_of("b"));
        assert_eq!(result.product.unwrap().value, 'b');
        assert_eq!(result.reports, []);

        let parser = choice(parse_char('a'), failing());
        let result = apply(parser, state_of("b"));
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }

    #[test]
    fn choose_tries_alternatives_in_order() {
        let alternatives: Vec<DynParser<char>> = vec![
            Rc::new(parse_char('a')),
            Rc::new(parse_char('b')),
            Rc::new(parse_char('c')),
        ];
        let parser = choose(alternatives);
        assert_eq!(apply(parser.clone(), state_of("b")).product.unwrap().value, 'b');
        assert_eq!(apply(parser.clone(), state_of("c")).product.unwrap().value, 'c');
        assert!(apply(parser, state_of("x")).product.is_none());
    }

    #[test]
    fn choose_with_no_alternatives_fails() {
        let parser = choose(Vec::<DynParser<char>>::new());
        let result = apply(parser, state_of("a"));
        assert!(result.product.is_none());
        assert_eq!(result.reports, []);
    }

    #[test]
    fn join_pairs_values_in_order() {
        let parser = join(parse_char('a'), parse_char('b'));
        let result = apply(parser, state_of("ab"));
        assert_eq!(result.product.unwrap().value, ('a', 'b'));
    }

    #[test]
    fn join_fails_when_either_part_fails() {
        let parser = join(parse_char('a'), parse_char('b'));
        assert!(apply(parser.clone(), state_of("xb")).product.is_none());
        assert!(apply(parser, state_of("ax")).product.is_none());
    }

    #[test]
    fn join_short_circuits_without_invoking_the_second() {
        let invoked = Rc::new(std::cell::Cell::new(false));
        let invoked2 = Rc::clone(&invoked);
        let second = move |state: State| {
            invoked2.set(true);
            accept_char()(state)
        };
        let parser = join(parse_char('a'), second);
        let result = apply(parser, state_of("x"));
        assert!(result.product.is_none());
        assert!(!invoked.get());
    }

    #[test]
    fn join_keeps_reports_of_parsers_that_ran() {
        let parser = join(parse_char('a'), failing());
        let result = apply(parser, state_of("ab"));
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }

    #[test]
    fn join3_triples_values_in_order() {
        let parser = join3(parse_char('a'), parse_char('b'), parse_char('c'));
        let result = apply(parser, state_of("abc"));
        assert_eq!(result.product.unwrap().value, ('a', 'b', 'c'));
    }

    #[test]
    fn repeat_collects_into_the_seed() {
        let parser = repeat(test_char(|c| c.is_ascii_digit()), String::from("#"));
        let result = apply(parser, state_of("42x"));
        let product = result.product.unwrap();
        assert_eq!(product.value, "#42");

        // The state stops at the first rejected character.
        let result = apply(accept_char(), product.state);
        assert_eq!(result.product.unwrap().value, 'x');
    }

    #[test]
    fn repeat_returns_the_seed_unchanged_on_empty_input() {
        let parser = repeat(accept_char(), String::from("#"));
        let result = apply(parser, state_of(""));
        assert_eq!(result.product.unwrap().value, "#");
        assert_eq!(result.reports, []);
    }

    #[test]
    fn repeat_is_reusable_thanks_to_memoization() {
        let state = state_of("ab");
        let parser = repeat(accept_char(), Vec::new());
        let first = apply(parser.clone(), state.clone());
        let second = apply(parser, state);
        assert_eq!(first.product.unwrap().value, vec!['a', 'b']);
        assert_eq!(second.product.unwrap().value, vec!['a', 'b']);
    }

    #[test]
    fn one_or_more_requires_one_success() {
        let parser = one_or_more(test_char(|c| c.is_ascii_digit()));
        let result = apply(parser.clone(), state_of("42"));
        assert_eq!(result.product.unwrap().value, vec!['4', '2']);

        let result = apply(parser, state_of("x"));
        assert!(result.product.is_none());
    }

    #[test]
    fn one_or_more_forwards_the_first_failure_reports() {
        let parser = one_or_more(failing());
        let result = apply(parser, state_of("x"));
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }

    #[test]
    fn option_wraps_success_and_failure() {
        let parser = option(parse_char('a'));
        let result = apply(parser.clone(), state_of("a"));
        assert_eq!(result.product.unwrap().value, Some('a'));

        let state = state_of("b");
        let result = apply(parser, state.clone());
        let product = result.product.unwrap();
        assert_eq!(product.value, None);
        assert_eq!(product.state, state, "failure must not consume input");
    }

    #[test]
    fn option_forwards_reports_on_failure() {
        let parser = option(failing());
        let result = apply(parser, state_of("x"));
        assert_eq!(result.product.unwrap().value, None);
        assert_eq!(result.reports.len(), 1);
    }

    #[test]
    fn map_value_transforms_the_value_only() {
        let parser = map_value(parse_char('a'), |c| c.to_ascii_uppercase());
        let result = apply(parser, state_of("ab"));
        let product = result.product.unwrap();
        assert_eq!(product.value, 'A');

        let result = apply(accept_char(), product.state);
        assert_eq!(result.product.unwrap().value, 'b');
    }
}
