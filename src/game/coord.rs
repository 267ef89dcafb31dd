//! Grid coordinates and relative displacements.
//!
//! Cells are addressed by `(row, column)`, both in `[0, 7]`. Row 0 is black's
//! back rank, row 7 is white's.
use std::num::IntErrorKind;

use thiserror::Error;

use crate::parsing::PartialFromStr;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Coordinate ({row}, {col}) is outside of the 8x8 grid")]
    OutOfRange { row: i64, col: i64 },
    #[error("Malformed coordinate, expected `row,col`")]
    Malformed,
}

/// Position of a cell on the grid.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    row: u8,
    col: u8,
}
impl Coord {
    /// Instantiates a coordinate, checking that it lies on the grid.
    #[inline]
    pub fn new(row: impl Into<i64>, col: impl Into<i64>) -> Result<Self, CoordinateError> {
        let (row, col) = (row.into(), col.into());
        if (0..GRID_SIZE as i64).contains(&row) && (0..GRID_SIZE as i64).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(CoordinateError::OutOfRange { row, col })
        }
    }

    /// Returns the row of the coordinate.
    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Returns the column of the coordinate.
    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Translates this coordinate by a given delta.
    ///
    /// Returns `None` if the translation would go out of the grid.
    #[inline]
    pub fn translate(self, delta: Delta) -> Option<Self> {
        Self::new(
            self.row as i64 + delta.rows as i64,
            self.col as i64 + delta.cols as i64,
        )
        .ok()
    }

    /// The displacement leading from this coordinate to `target`.
    #[inline]
    pub const fn delta_to(self, target: Self) -> Delta {
        Delta::new(
            target.row as i8 - self.row as i8,
            target.col as i8 - self.col as i8,
        )
    }

    /// An iterator over all coordinates, row by row starting from row 0.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE as u8)
            .flat_map(|row| (0..GRID_SIZE as u8).map(move |col| Self { row, col }))
    }
}
impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
impl PartialFromStr for Coord {
    type Err = CoordinateError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (row, rest) = parse_int(s)?;
        let rest = rest
            .trim_start()
            .strip_prefix(',')
            .ok_or(CoordinateError::Malformed)?;
        let (col, rest) = parse_int(rest)?;
        Ok((Self::new(row, col)?, rest))
    }
}
impl std::str::FromStr for Coord {
    type Err = CoordinateError;

    /// Parses a `row,col` pair. Whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (coord, rest) if rest.trim().is_empty() => Ok(coord),
            _ => Err(CoordinateError::Malformed),
        }
    }
}

/// Reads a leading, optionally signed, integer.
///
/// Values too large for an `i64` saturate, so they are reported as out of
/// range rather than malformed.
fn parse_int(s: &str) -> Result<(i64, &str), CoordinateError> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(|c: char| c == '-' || c == '+'));
    let end = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + sign_len);
    let value = match s[..end].parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return Err(CoordinateError::Malformed),
        },
    };
    Ok((value, &s[end..]))
}

/// Relative displacement between two cells, as `(Δrow, Δcol)`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub rows: i8,
    pub cols: i8,
}
impl Delta {
    #[inline]
    pub const fn new(rows: i8, cols: i8) -> Self {
        Self { rows, cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_coordinates() {
        assert!(Coord::new(0, 0).is_ok());
        assert!(Coord::new(7, 7).is_ok());
        assert_eq!(
            Coord::new(8, 0),
            Err(CoordinateError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            Coord::new(3, -1),
            Err(CoordinateError::OutOfRange { row: 3, col: -1 })
        );
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!("5,0".parse(), Coord::new(5, 0));
        assert_eq!(" 2 , 3 ".parse(), Coord::new(2, 3));
        assert_eq!(
            "9,1".parse::<Coord>(),
            Err(CoordinateError::OutOfRange { row: 9, col: 1 })
        );
        assert_eq!("3;4".parse::<Coord>(), Err(CoordinateError::Malformed));
        assert_eq!("a,4".parse::<Coord>(), Err(CoordinateError::Malformed));
        assert_eq!("3,4,5".parse::<Coord>(), Err(CoordinateError::Malformed));
    }

    #[test]
    fn oversized_numbers_are_out_of_range() {
        assert_eq!(
            "99999999999999999999,0".parse::<Coord>(),
            Err(CoordinateError::OutOfRange {
                row: i64::MAX,
                col: 0
            })
        );
        assert_eq!(
            "0,-99999999999999999999".parse::<Coord>(),
            Err(CoordinateError::OutOfRange {
                row: 0,
                col: i64::MIN
            })
        );
        assert_eq!("-,0".parse::<Coord>(), Err(CoordinateError::Malformed));
    }

    #[test]
    fn partial_parse_leaves_suffix() {
        let (coord, rest) = Coord::partial_from_str("1,2 rest").unwrap();
        assert_eq!(Ok(coord), Coord::new(1, 2));
        assert_eq!(rest, " rest");
    }

    #[test]
    fn translate_stays_on_grid() {
        let corner = Coord::new(0, 0).unwrap();
        assert_eq!(corner.translate(Delta::new(-1, 0)), None);
        assert_eq!(corner.translate(Delta::new(2, 1)), Coord::new(2, 1).ok());
    }

    #[test]
    fn delta_between_coordinates() {
        let from = Coord::new(7, 1).unwrap();
        let to = Coord::new(5, 0).unwrap();
        assert_eq!(from.delta_to(to), Delta::new(-2, -1));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let coord = Coord::new(4, 6).unwrap();
        assert_eq!(coord.to_string(), "4,6");
        assert_eq!(coord.to_string().parse(), Ok(coord));
    }

    #[test]
    fn iteration_covers_grid() {
        assert_eq!(Coord::iter().count(), 64);
        assert_eq!(Coord::iter().next(), Coord::new(0, 0).ok());
    }
}
