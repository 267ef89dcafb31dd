//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use super::side::Side;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Complete set of information for identifying a piece.
///
/// This is also the descriptor recorded in the captured list.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}
impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Checks if this piece is a king.
    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Single character symbol, uppercase for white and lowercase for black.
    #[inline]
    pub const fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.side as usize * NUM_PIECES + self.kind as usize]
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
#[error("Invalid piece symbol")]
pub struct PieceParseError;

impl FromStr for Piece {
    type Err = PieceParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(PieceParseError);
        };
        let kind = PieceKind::from_symbol(symbol).ok_or(PieceParseError)?;
        Ok(Self {
            kind,
            side: symbol.is_lowercase().into(),
        })
    }
}

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King. Usually
/// with supplementary information about the side of the piece, in the form of
/// the [`Piece`] type.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds.
    pub const PIECE_KINDS: [Self; NUM_PIECES] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::PIECE_KINDS.into_iter()
    }

    /// Parses a piece kind from its symbol, ignoring case.
    ///
    /// `h` (horse) is accepted as an alias for knights.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' | 'h' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        })
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_SYMBOLS[NUM_PIECES + *self as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_follow_side_case() {
        assert_eq!(Piece::new(PieceKind::Knight, Side::White).to_string(), "N");
        assert_eq!(Piece::new(PieceKind::Queen, Side::Black).to_string(), "q");
        assert_eq!(PieceKind::King.to_string(), "k");
    }

    #[test]
    fn parse_piece() {
        assert_eq!(
            "R".parse(),
            Ok(Piece::new(PieceKind::Rook, Side::White))
        );
        assert_eq!(
            "p".parse(),
            Ok(Piece::new(PieceKind::Pawn, Side::Black))
        );
    }

    #[test]
    fn parse_horse_alias() {
        assert_eq!(
            "h".parse(),
            Ok(Piece::new(PieceKind::Knight, Side::Black))
        );
    }

    #[test]
    fn parse_invalid_piece() {
        assert_eq!("x".parse::<Piece>(), Err(PieceParseError));
        assert_eq!("".parse::<Piece>(), Err(PieceParseError));
        assert_eq!("kk".parse::<Piece>(), Err(PieceParseError));
    }

    #[test]
    fn only_kings_are_kings() {
        for kind in PieceKind::iter() {
            assert_eq!(
                Piece::new(kind, Side::White).is_king(),
                kind == PieceKind::King
            );
        }
    }
}
