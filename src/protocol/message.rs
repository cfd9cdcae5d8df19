//! Typed protocol messages and their line encoding.
//!
//! ```text
//! @ERROR:<text>
//! @MESSAGE:<text>
//! @GAME:START
//! @GAME:STATE:<serialized-state>
//! @GAME:MOVE:<row>,<count>
//! @GAME:ERROR:<text>
//! @GAME:MESSAGE:<text>
//! @GAME:RESULT:<H|A|T>
//! ```
//!
//! Lines split on `:` into at most five fields. The command is matched
//! case-insensitively, game subcommands exactly. Text payloads keep any
//! colons of their own.

use std::fmt;

use crate::core::Winner;
use crate::error::ProtocolError;

/// Field separator.
pub const DELIMITER: char = ':';

/// Maximum number of fields a line is split into.
pub const MAX_FIELDS: usize = 5;

/// A top-level protocol message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Error(String),
    Message(String),
    Game(GameMessage),
}

/// Payload of an `@GAME` message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameMessage {
    Start,
    State(String),
    Move(String),
    Error(String),
    Message(String),
    Result(Winner),
}

impl GameMessage {
    /// Subcommand keyword, e.g. `MOVE`.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            GameMessage::Start => "START",
            GameMessage::State(_) => "STATE",
            GameMessage::Move(_) => "MOVE",
            GameMessage::Error(_) => "ERROR",
            GameMessage::Message(_) => "MESSAGE",
            GameMessage::Result(_) => "RESULT",
        }
    }
}

/// Everything after the first `from` fields, rejoined.
fn payload(fields: &[&str], from: usize) -> Option<String> {
    (fields.len() > from).then(|| fields[from..].join(":"))
}

impl Message {
    /// Parse one protocol line.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let fields: Vec<&str> = line.splitn(MAX_FIELDS, DELIMITER).collect();
        let command = fields[0].to_ascii_uppercase();

        match command.as_str() {
            "@ERROR" => payload(&fields, 1)
                .map(Message::Error)
                .ok_or(ProtocolError::MissingField { command: "@ERROR" }),
            "@MESSAGE" => payload(&fields, 1)
                .map(Message::Message)
                .ok_or(ProtocolError::MissingField { command: "@MESSAGE" }),
            "@GAME" => Self::parse_game(&fields).map(Message::Game),
            _ => Err(ProtocolError::UnknownCommand {
                line: line.to_string(),
            }),
        }
    }

    fn parse_game(fields: &[&str]) -> Result<GameMessage, ProtocolError> {
        let subcommand = fields
            .get(1)
            .ok_or(ProtocolError::MissingField { command: "@GAME" })?;

        let required = |command: &'static str| {
            payload(fields, 2).ok_or(ProtocolError::MissingField { command })
        };

        match *subcommand {
            "START" => Ok(GameMessage::Start),
            "STATE" => required("@GAME:STATE").map(GameMessage::State),
            "MOVE" => required("@GAME:MOVE").map(GameMessage::Move),
            "ERROR" => required("@GAME:ERROR").map(GameMessage::Error),
            "MESSAGE" => required("@GAME:MESSAGE").map(GameMessage::Message),
            "RESULT" => {
                let text = required("@GAME:RESULT")?;
                let mut chars = text.chars();
                match (chars.next().and_then(Winner::from_result_letter), chars.next()) {
                    (Some(winner), None) => Ok(GameMessage::Result(winner)),
                    _ => Err(ProtocolError::InvalidPayload {
                        command: "@GAME:RESULT",
                        payload: text,
                    }),
                }
            }
            other => Err(ProtocolError::UnknownGameCommand {
                subcommand: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Error(text) => write!(f, "@ERROR:{text}"),
            Message::Message(text) => write!(f, "@MESSAGE:{text}"),
            Message::Game(game) => {
                write!(f, "@GAME:{}", game.keyword())?;
                match game {
                    GameMessage::Start => Ok(()),
                    GameMessage::State(text)
                    | GameMessage::Move(text)
                    | GameMessage::Error(text)
                    | GameMessage::Message(text) => write!(f, ":{text}"),
                    // Anomalous outcomes have no letter and encode an empty payload
                    GameMessage::Result(winner) => match winner.result_letter() {
                        Some(letter) => write!(f, ":{letter}"),
                        None => f.write_str(":"),
                    },
                }
            }
        }
    }
}
