// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsing and-or lists and sequences

use crate::parser::combinator::map_value;
use crate::parser::core::{ParseFuture, State};
use crate::parser::pipeline::parse_pipeline;
use crate::syntax::{AndOrList, Sequence, Synchronicity};

/// Parses an and-or list.
///
/// Currently an and-or list is a single sequential pipeline; failure and
/// reports of the inner parser pass through unchanged.
// TODO `&&`- and `||`-connected pipelines and the trailing `&`
pub fn parse_and_or_list(state: State) -> ParseFuture<AndOrList> {
    map_value(parse_pipeline, |pipeline| AndOrList {
        first: pipeline,
        rest: Vec::new(),
        synchronicity: Synchronicity::Sequential,
    })(state)
}

/// Parses a sequence.
///
/// Currently a sequence is a single and-or list; failure and reports of the
/// inner parser pass through unchanged.
// TODO `;`- and `&`-separated and-or lists
pub fn parse_sequence(state: State) -> ParseFuture<Sequence> {
    map_value(parse_and_or_list, |list| Sequence {
        and_or_lists: vec![list],
    })(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{input_stream, Memory};
    use futures_util::FutureExt as _;

    #[test]
    fn and_or_list_of_one_pipeline() {
        let state = State::new(input_stream(Memory::new("make all\n")));
        let result = parse_and_or_list(state).now_or_never().unwrap().unwrap();
        let list = result.product.unwrap().value;
        assert_eq!(list.rest, []);
        assert_eq!(list.synchronicity, Synchronicity::Sequential);
        assert_eq!(list.to_string(), "make all");
    }

    #[test]
    fn sequence_of_one_and_or_list() {
        let state = State::new(input_stream(Memory::new("make all\n")));
        let result = parse_sequence(state).now_or_never().unwrap().unwrap();
        let sequence = result.product.unwrap().value;
        assert_eq!(sequence.to_string(), "make all");
    }

    #[test]
    fn failure_passes_through() {
        let state = State::new(input_stream(Memory::new("&")));
        let result = parse_sequence(state).now_or_never().unwrap().unwrap();
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }
}
