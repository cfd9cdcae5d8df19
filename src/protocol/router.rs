//! Dispatch of inbound protocol lines to the authority.

use thiserror::Error;
use tracing::debug;

use super::message::{GameMessage, Message};
use crate::core::Side;
use crate::driver::Console;
use crate::error::{MoveError, ProtocolError};
use crate::session::GameSession;

/// What a routed line did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Routed {
    /// A move was accepted by the authority.
    Applied { side: Side, ack: String },
    /// Text was shown on the console.
    Displayed,
    /// A subcommand with no role when both mirrors run in-process.
    Ignored { keyword: &'static str },
}

/// Why a routed line had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Routes lines from a player to the authority and the console.
///
/// Only `@GAME:MOVE` touches game state. `@ERROR`, `@MESSAGE` and their
/// `@GAME` forms are displayed, errors prefixed once with `ERROR:` or
/// `GAME ERROR:`. `START`, `STATE` and `RESULT` belong to a
/// client/server deployment and are logged and ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProtocolRouter;

impl ProtocolRouter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse `line`, sent by `from`, and act on it.
    pub fn route<S>(
        &self,
        line: &str,
        from: Side,
        authority: &mut S,
        console: &mut dyn Console,
    ) -> Result<Routed, RouteError>
    where
        S: GameSession + ?Sized,
    {
        match Message::parse(line)? {
            Message::Error(text) => {
                console.display(&format!("ERROR: {text}"));
                Ok(Routed::Displayed)
            }
            Message::Message(text) => {
                console.display(&text);
                Ok(Routed::Displayed)
            }
            Message::Game(GameMessage::Move(mv)) => {
                let ack = authority.process_move(from, &mv)?;
                console.display(&format!("{ack}{}", from.tag()));
                Ok(Routed::Applied { side: from, ack })
            }
            Message::Game(GameMessage::Error(text)) => {
                console.display(&format!("GAME ERROR: {text}"));
                Ok(Routed::Displayed)
            }
            Message::Game(GameMessage::Message(text)) => {
                console.display(&text);
                Ok(Routed::Displayed)
            }
            Message::Game(game) => {
                debug!(%from, keyword = game.keyword(), "ignoring game command in offline match");
                Ok(Routed::Ignored {
                    keyword: game.keyword(),
                })
            }
        }
    }
}
