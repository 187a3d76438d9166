//! Parser for scripted heading changes, one symbol per tick.

use gridsnake_core::Direction;
use thiserror::Error;

/// Symbol that keeps the current heading for a tick.
const KEEP_HEADING: char = '.';

/// Errors raised while parsing a heading script.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The script contained a symbol other than `U`, `D`, `L`, `R` or `.`.
    #[error("unexpected symbol '{symbol}' at tick {tick}; expected one of U, D, L, R, .")]
    UnknownSymbol {
        /// Zero-based tick the symbol belongs to.
        tick: usize,
        /// Offending symbol.
        symbol: char,
    },
}

/// Parses a script such as `"RR.D..L"` into per-tick heading requests.
///
/// Whitespace is ignored so long scripts may be wrapped.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Option<Direction>>, ScriptError> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace())
        .enumerate()
        .map(|(tick, symbol)| match symbol.to_ascii_uppercase() {
            'U' => Ok(Some(Direction::Up)),
            'D' => Ok(Some(Direction::Down)),
            'L' => Ok(Some(Direction::Left)),
            'R' => Ok(Some(Direction::Right)),
            KEEP_HEADING => Ok(None),
            _ => Err(ScriptError::UnknownSymbol { tick, symbol }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headings_and_gaps() {
        assert_eq!(
            parse_script("r.d L"),
            Ok(vec![
                Some(Direction::Right),
                None,
                Some(Direction::Down),
                Some(Direction::Left),
            ])
        );
    }

    #[test]
    fn reports_tick_of_unknown_symbol() {
        assert_eq!(
            parse_script("UU x"),
            Err(ScriptError::UnknownSymbol {
                tick: 2,
                symbol: 'x'
            })
        );
    }
}
