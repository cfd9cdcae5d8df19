//! Error types for match setup, rules, protocol and sessions.
//!
//! Only `ConfigError` is fatal. Everything else is reported to the
//! offending seat and play continues.

use thiserror::Error;

use crate::core::Side;

/// Bad initial layout or match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration cannot produce a playable match.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration { reason: reason.into() }
    }
}

/// A move rejected by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The mover is not the side whose turn it is.
    #[error("it is not {player}'s turn")]
    OutOfTurn { player: Side },

    /// The move is well formed but not allowed in this position.
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },

    /// The move text could not be parsed.
    #[error("malformed move {input:?}, expected \"row,count\"")]
    MalformedMove { input: String },

    /// Moves can only be processed by the authoritative session.
    #[error("moves can only be processed by the authority")]
    NotAuthority,
}

/// State text that could not be decoded. The receiver keeps its prior state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse state {input:?}: {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// An inbound protocol line that could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// First field is not `@ERROR`, `@MESSAGE` or `@GAME`.
    #[error("unrecognized command in {line:?}")]
    UnknownCommand { line: String },

    /// `@GAME` with a subcommand outside the grammar.
    #[error("unrecognized game command {subcommand:?}")]
    UnknownGameCommand { subcommand: String },

    /// A command is missing a required field.
    #[error("{command} is missing its payload")]
    MissingField { command: &'static str },

    /// The payload does not fit the command.
    #[error("{command} has an invalid payload {payload:?}")]
    InvalidPayload { command: &'static str, payload: String },
}

/// A strategy was asked for a move it cannot produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The position has no legal move or is otherwise unplayable.
    #[error("invalid state for move selection: {reason}")]
    InvalidState { reason: String },

    /// The strategy is not attached to a match.
    #[error("strategy is not attached to a game")]
    Detached,
}

impl StrategyError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StrategyError::InvalidState { reason: reason.into() }
    }
}

/// Failure reading from a human input source.
#[derive(Debug, Error)]
pub enum InputError {
    /// The source reached end of input.
    #[error("input closed")]
    Closed,

    #[error("input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// The operation is not meaningful for this session variant.
    #[error("{operation} is not supported by this session")]
    Unsupported { operation: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = MoveError::MalformedMove { input: "abc".into() };
        assert_eq!(err.to_string(), "malformed move \"abc\", expected \"row,count\"");

        let err = MoveError::OutOfTurn { player: Side::Away };
        assert_eq!(err.to_string(), "it is not Away's turn");

        let err = ConfigError::invalid("no rows");
        assert_eq!(err.to_string(), "invalid configuration: no rows");
    }

    #[test]
    fn test_session_error_wraps_sources() {
        let err: SessionError = StrategyError::Detached.into();
        assert!(matches!(err, SessionError::Strategy(StrategyError::Detached)));

        let err: SessionError = InputError::Closed.into();
        assert_eq!(err.to_string(), "input closed");
    }
}
