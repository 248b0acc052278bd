//! Scripted input strings replayed by the command-line adapter.
//!
//! Two forms are accepted. `n<digits>s<moves>` starts a new cave from the
//! seed spelled by the digits, while a bare move string replays against the
//! seed given on the command line. Either form may end in `:q`, after which
//! nothing is read. Letters are case-insensitive.

use cavern_core::Direction;
use cavern_system_session::Intent;
use thiserror::Error;

/// Parsed script ready for replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    /// Seed spelled out by a `n<digits>s` prefix.
    pub(crate) seed: Option<u64>,
    /// Intents in input order.
    pub(crate) intents: Vec<Intent>,
    /// Whether the script ended with `:q`.
    pub(crate) quit: bool,
}

/// Reasons a script string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// Loading a saved cave is not available.
    #[error("loading saved caves is not supported")]
    LoadUnsupported,
    /// A `n` prefix was not followed by any digit.
    #[error("expected seed digits after 'n'")]
    MissingSeed,
    /// The seed digits overflow a 64-bit seed.
    #[error("seed '{0}' does not fit in 64 bits")]
    SeedOutOfRange(String),
    /// The seed digits were not closed by `s`.
    #[error("expected 's' after seed digits at offset {0}")]
    MissingSeedTerminator(usize),
    /// A character is neither a move nor a switch.
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedCharacter {
        /// Byte offset of the character.
        offset: usize,
        /// Offending character.
        found: char,
    },
}

impl Script {
    /// Parses a script string.
    pub(crate) fn parse(input: &str) -> Result<Self, ScriptError> {
        let trimmed = input.trim_end_matches(['\r', '\n']);
        let mut chars = trimmed.char_indices().peekable();
        let mut script = Self::default();

        match chars.peek().map(|(_, c)| c.to_ascii_lowercase()) {
            Some('l') => return Err(ScriptError::LoadUnsupported),
            Some('n') => {
                let _ = chars.next();
                let mut digits = String::new();
                while let Some((_, c)) = chars.peek().copied().filter(|(_, c)| c.is_ascii_digit())
                {
                    digits.push(c);
                    let _ = chars.next();
                }
                if digits.is_empty() {
                    return Err(ScriptError::MissingSeed);
                }
                let seed = digits
                    .parse::<u64>()
                    .map_err(|_| ScriptError::SeedOutOfRange(digits.clone()))?;
                match chars.next() {
                    Some((_, c)) if c.eq_ignore_ascii_case(&'s') => {}
                    Some((offset, _)) => return Err(ScriptError::MissingSeedTerminator(offset)),
                    None => return Err(ScriptError::MissingSeedTerminator(trimmed.len())),
                }
                script.seed = Some(seed);
            }
            _ => {}
        }

        while let Some((offset, c)) = chars.next() {
            let intent = match c.to_ascii_lowercase() {
                'w' => Intent::Move(Direction::Up),
                'a' => Intent::Move(Direction::Left),
                's' => Intent::Move(Direction::Down),
                'd' => Intent::Move(Direction::Right),
                ' ' => Intent::SwitchProjection,
                ':' if chars
                    .peek()
                    .is_some_and(|(_, next)| next.eq_ignore_ascii_case(&'q')) =>
                {
                    script.quit = true;
                    break;
                }
                _ => return Err(ScriptError::UnexpectedCharacter { offset, found: c }),
            };
            script.intents.push(intent);
        }

        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_prefix_sets_seed() {
        let script = Script::parse("n123sswd").expect("script parses");
        assert_eq!(script.seed, Some(123));
        assert_eq!(
            script.intents,
            vec![
                Intent::Move(Direction::Down),
                Intent::Move(Direction::Up),
                Intent::Move(Direction::Right),
            ]
        );
        assert!(!script.quit);
    }

    #[test]
    fn quit_suffix_stops_reading() {
        let with_quit = Script::parse("N7SDD:q").expect("script parses");
        let without = Script::parse("n7sdd").expect("script parses");
        assert_eq!(with_quit.intents, without.intents);
        assert!(with_quit.quit);
    }

    #[test]
    fn raw_moves_and_switches() {
        let script = Script::parse("wa d").expect("script parses");
        assert_eq!(script.seed, None);
        assert_eq!(
            script.intents,
            vec![
                Intent::Move(Direction::Up),
                Intent::Move(Direction::Left),
                Intent::SwitchProjection,
                Intent::Move(Direction::Right),
            ]
        );
    }

    #[test]
    fn malformed_scripts_are_rejected() {
        assert_eq!(Script::parse("lwww"), Err(ScriptError::LoadUnsupported));
        assert_eq!(Script::parse("nsdd"), Err(ScriptError::MissingSeed));
        assert_eq!(
            Script::parse("n12x"),
            Err(ScriptError::MissingSeedTerminator(3))
        );
        assert_eq!(
            Script::parse("n99999999999999999999s"),
            Err(ScriptError::SeedOutOfRange("99999999999999999999".to_owned()))
        );
        assert_eq!(
            Script::parse("wwx"),
            Err(ScriptError::UnexpectedCharacter {
                offset: 2,
                found: 'x'
            })
        );
    }
}
