//! Sides for each player and their pieces.

use thiserror::Error;

/// Side enumeration.
///
/// White starts on the bottom of the grid (row 7) and moves its pawns towards
/// decreasing rows, black starts on row 0 and moves towards increasing rows.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    White = 0,
    Black = 1,
}
impl Side {
    /// Returns the opposing side.
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Checks if the side variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Side::White)
    }

    /// Checks if the side variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Side::Black)
    }

    /// Direction in which pawns of this side advance, as a row offset.
    #[inline]
    pub const fn forward(&self) -> i8 {
        if self.is_white() {
            -1
        } else {
            1
        }
    }
}
impl From<bool> for Side {
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}
impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_white() { "white" } else { "black" })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Error)]
#[error("Invalid side name, expected `white` or `black`")]
pub struct SideParseError;

impl std::str::FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => Err(SideParseError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_flips_side() {
        assert_eq!(Side::White.inverse(), Side::Black);
        assert_eq!(Side::Black.inverse(), Side::White);
    }

    #[test]
    fn pawns_advance_towards_opponent() {
        assert_eq!(Side::White.forward(), -1);
        assert_eq!(Side::Black.forward(), 1);
    }

    #[test]
    fn parse_side_names() {
        assert_eq!("white".parse(), Ok(Side::White));
        assert_eq!("B".parse(), Ok(Side::Black));
        assert_eq!("red".parse::<Side>(), Err(SideParseError));
    }
}
