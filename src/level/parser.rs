//! Plain-text level format.
//!
//! Tokens are separated by whitespace and/or commas:
//!
//! ```text
//! width height
//! fixed_count
//! x y KIND orientation      (fixed_count times)
//! x y                       (four start cells)
//! STRAIGHT TSHAPE CORNER GOAL
//! ICE FIRE DOUBLEMOVE BACKTRACK
//! ```

use crate::core::{Coord, GameError};
use crate::tiles::FloorKind;

use super::definition::{EffectCounts, FixedTileSpec, FloorCounts, LevelDefinition};

/// Start cells listed in every level file.
pub const LEVEL_FILE_STARTS: usize = 4;

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: Box::new(
                text.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|token| !token.is_empty()),
            ),
        }
    }

    fn word(&mut self, what: &str) -> Result<&'a str, GameError> {
        self.inner
            .next()
            .ok_or_else(|| GameError::InvalidLevel(format!("unexpected end of level data, expected {what}")))
    }

    fn number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, GameError> {
        let token = self.word(what)?;
        token
            .parse()
            .map_err(|_| GameError::InvalidLevel(format!("expected {what}, found {token:?}")))
    }

    fn coord(&mut self, what: &str) -> Result<Coord, GameError> {
        Ok(Coord::new(self.number(what)?, self.number(what)?))
    }
}

impl LevelDefinition {
    /// Parse and validate a level in the text format.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let mut tokens = Tokens::new(text);

        let width = tokens.number("board width")?;
        let height = tokens.number("board height")?;

        let fixed_count: usize = tokens.number("fixed tile count")?;
        let mut fixed_tiles = Vec::with_capacity(fixed_count);
        for _ in 0..fixed_count {
            let coord = tokens.coord("fixed tile coordinate")?;
            let kind: FloorKind = tokens.word("fixed tile kind")?.parse()?;
            let orientation = tokens.number("fixed tile orientation")?;
            fixed_tiles.push(FixedTileSpec {
                coord,
                kind,
                orientation,
            });
        }

        let starts = (0..LEVEL_FILE_STARTS)
            .map(|_| tokens.coord("start coordinate"))
            .collect::<Result<Vec<_>, _>>()?;

        let floor_counts = FloorCounts {
            straight: tokens.number("STRAIGHT count")?,
            tshape: tokens.number("TSHAPE count")?,
            corner: tokens.number("CORNER count")?,
            goal: tokens.number("GOAL count")?,
        };
        let effect_counts = EffectCounts {
            ice: tokens.number("ICE count")?,
            fire: tokens.number("FIRE count")?,
            double_move: tokens.number("DOUBLEMOVE count")?,
            backtrack: tokens.number("BACKTRACK count")?,
        };

        if let Ok(extra) = tokens.word("") {
            return Err(GameError::InvalidLevel(format!("unexpected trailing token {extra:?}")));
        }

        let level = LevelDefinition {
            width,
            height,
            fixed_tiles,
            starts,
            floor_counts,
            effect_counts,
        };
        level.validate()?;
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
5,5
2
2,2,GOAL,0
0,4,CORNER,3
0,0 4,0 4,4 1,4
10 6 8 0
2 3 1 2
";

    #[test]
    fn test_parse_sample() {
        let level = LevelDefinition::parse(SAMPLE).unwrap();

        assert_eq!((level.width, level.height), (5, 5));
        assert_eq!(
            level.fixed_tiles[1],
            FixedTileSpec {
                coord: Coord::new(0, 4),
                kind: FloorKind::Corner,
                orientation: 3
            }
        );
        assert_eq!(level.starts[3], Coord::new(1, 4));
        assert_eq!(level.floor_counts.tshape, 6);
        assert_eq!(level.floor_counts.total(), 24);
        assert_eq!(level.effect_counts.fire, 3);
        assert_eq!(level.effect_counts.backtrack, 2);
    }

    #[test]
    fn test_parse_reports_truncation() {
        let err = LevelDefinition::parse("5 5 0 0 0").unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidLevel("unexpected end of level data, expected start coordinate".into())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LevelDefinition::parse("five 5").is_err());
        assert!(LevelDefinition::parse("2 2 1 0 0 CROSS 0").is_err());
        let with_tail = format!("{SAMPLE} 9");
        assert!(LevelDefinition::parse(&with_tail).is_err());
    }

    #[test]
    fn test_parse_validates() {
        // 24 loose floor tiles but only 23 open cells once two are fixed: fine.
        // Drop to 23 and there is no reserve left.
        let short = SAMPLE.replace("10 6 8 0", "10 6 7 0");
        assert!(matches!(
            LevelDefinition::parse(&short),
            Err(GameError::InvalidLevel(_))
        ));
    }
}
