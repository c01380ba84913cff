// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsing commands

use crate::parser::combinator::map_value;
use crate::parser::core::{ParseFuture, State};
use crate::parser::simple_command::parse_simple_command;
use crate::syntax::Command;

/// Parses a command.
///
/// Currently the only command form is a simple command; failure and reports
/// of the inner parser pass through unchanged.
// TODO Compound commands and function definitions
pub fn parse_command(state: State) -> ParseFuture<Command> {
    map_value(parse_simple_command, Command::Simple)(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{input_stream, Memory};
    use futures_util::FutureExt as _;

    #[test]
    fn simple_command_becomes_a_command() {
        let state = State::new(input_stream(Memory::new("echo ok\n")));
        let result = parse_command(state).now_or_never().unwrap().unwrap();
        let Command::Simple(command) = result.product.unwrap().value;
        assert_eq!(command.to_string(), "echo ok");
    }

    #[test]
    fn failure_passes_through() {
        let state = State::new(input_stream(Memory::new(";")));
        let result = parse_command(state).now_or_never().unwrap().unwrap();
        assert!(result.product.is_none());
        assert_eq!(result.reports.len(), 1);
    }
}
