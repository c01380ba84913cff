// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsing pipelines

use crate::parser::combinator::map_value;
use crate::parser::command::parse_command;
use crate::parser::core::{ParseFuture, State};
use crate::syntax::{ExitStatusMode, Pipeline};

/// Parses a pipeline.
///
/// Currently a pipeline is a single command with a straight exit status;
/// failure and reports of the inner parser pass through unchanged.
// TODO `|`-connected commands and the `!` reserved word
pub fn parse_pipeline(state: State) -> ParseFuture<Pipeline> {
    map_value(parse_command, |command| Pipeline {
        commands: vec![command],
        exit_status_mode: ExitStatusMode::Straight,
    })(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{input_stream, Memory};
    use futures_util::FutureExt as _;

    #[test]
    fn pipeline_of_one_command() {
        let state = State::new(input_stream(Memory::new("cat file\n")));
        let result = parse_pipeline(state).now_or_never().unwrap().unwrap();
        let pipeline = result.product.unwrap().value;
        assert_eq!(pipeline.commands.len(), 1);
        assert_eq!(pipeline.exit_status_mode, ExitStatusMode::Straight);
        assert_eq!(pipeline.to_string(), "cat file");
    }

    #[test]
    fn failure_passes_through() {
        let state = State::new(input_stream(Memory::new("")));
        let result = parse_pipeline(state).now_or_never().unwrap().unwrap();
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }
}
