//! Wiring a configured Nim match into a turn loop.

use tracing::info;

use super::game::{NimGameBuilder, NimRules};
use super::strategy::NimStrategy;
use crate::core::{Controller, GameRng, MatchConfig, Side, SideMap};
use crate::driver::{Console, TurnLoop};
use crate::error::ConfigError;
use crate::session::{AuthoritySession, Driver, MoveSource, PlayerSession};
use crate::strategy::RandomStrategy;

/// Build a ready-to-run match from `config`.
///
/// Each automated seat gets its own RNG forked from the match seed, so a
/// seeded match replays exactly. `human_input` is called once per human
/// seat.
pub fn new_match<C, F>(
    config: &MatchConfig,
    console: C,
    mut human_input: F,
) -> Result<TurnLoop<NimRules, C>, ConfigError>
where
    C: Console,
    F: FnMut(Side) -> Box<dyn MoveSource>,
{
    config.validate()?;
    let (rules, state) = NimGameBuilder::new().rows(&config.rows).build()?;

    let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!(
        seed = rng.seed(),
        rows = ?config.rows,
        home = %config.home,
        away = %config.away,
        "setting up match"
    );

    let controllers = config.controllers();
    let players = SideMap::new(|side| {
        let driver: Driver<NimRules> = match controllers[side] {
            Controller::Ai => Driver::Ai(Box::new(NimStrategy::new(rng.fork()))),
            Controller::Random => Driver::Ai(Box::new(RandomStrategy::new(rng.fork()))),
            Controller::Human => Driver::Human(human_input(side)),
        };
        PlayerSession::new(rules, side, state.clone(), driver)
    });

    Ok(TurnLoop::new(AuthoritySession::new(rules, state), players, console))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Winner;
    use crate::driver::CapturedConsole;
    use crate::session::ScriptedInput;

    fn no_humans(_: Side) -> Box<dyn MoveSource> {
        Box::new(ScriptedInput::new(Vec::<String>::new()))
    }

    #[test]
    fn test_seeded_matches_replay() {
        let config = MatchConfig::default()
            .with_controller(Side::Away, Controller::Random)
            .with_seed(11);

        let first = new_match(&config, CapturedConsole::new(), no_humans).unwrap().run();
        let second = new_match(&config, CapturedConsole::new(), no_humans).unwrap().run();

        assert_eq!(first.winner, second.winner);
        assert_eq!(first.history, second.history);
    }

    #[test]
    fn test_bad_layout_is_rejected_before_play() {
        let config = MatchConfig::default().with_rows(vec![3, -1]);
        let err = new_match(&config, CapturedConsole::new(), no_humans).err();
        assert!(matches!(err, Some(ConfigError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_human_seats_use_the_provided_source() {
        let config = MatchConfig::default()
            .with_rows(vec![2])
            .with_controller(Side::Home, Controller::Human);

        let mut asked = Vec::new();
        let mut turn_loop = new_match(&config, CapturedConsole::new(), |side| {
            asked.push(side);
            Box::new(ScriptedInput::new(["0,2"])) as Box<dyn MoveSource>
        })
        .unwrap();

        assert_eq!(asked, [Side::Home]);
        assert!(turn_loop.player(Side::Home).is_human());
        assert!(!turn_loop.player(Side::Away).is_human());
        assert_eq!(turn_loop.run().winner, Winner::Home);
    }
}
