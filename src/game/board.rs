//! The 8x8 grid of cell contents.
//!
//! Placements can be read and written in a compact format akin to the piece
//! section of a FEN string: rows separated by `/`, starting from row 0,
//! digits standing for runs of empty cells. The initial layout reads
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.

use thiserror::Error;

use super::{
    coord::{Coord, GRID_SIZE},
    piece::{Piece, PieceKind},
    side::Side,
};

/// Content of every cell, `None` being an empty cell.
pub type Grid = [[Option<Piece>; GRID_SIZE]; GRID_SIZE];

const BACK_RANK: [PieceKind; GRID_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
/// Placement parsing errors.
pub enum PlacementError {
    #[error("Unexpected character at index {index}: {val}")]
    UnexpectedToken { index: usize, val: char },
    #[error("Row {row} only defines {count} cells out of 8")]
    IncompleteRow { row: usize, count: usize },
    #[error("Row {0} defines too many cells")]
    TooManyCells(usize),
    #[error("Placement defines {0} rows out of 8")]
    WrongRowCount(usize),
    #[error("Placement holds {count} {side} kings instead of 1")]
    KingCount { side: Side, count: usize },
}

/// Owned grid of pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: Grid,
}
impl Default for Board {
    /// A board with no pieces.
    fn default() -> Self {
        Self {
            cells: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }
}
impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed starting layout: black on rows 0 and 1, white on rows 6 and 7.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(kind, Side::Black));
            board.cells[1][col] = Some(Piece::new(PieceKind::Pawn, Side::Black));
            board.cells[6][col] = Some(Piece::new(PieceKind::Pawn, Side::White));
            board.cells[7][col] = Some(Piece::new(kind, Side::White));
        }
        board
    }

    /// Builds a board from a placement string.
    /// # Errors
    /// This function returns an error if the placement is badly formatted or
    /// does not describe exactly 8 rows of 8 cells.
    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        placement.parse()
    }

    /// Returns the placement string describing this board.
    pub fn placement(&self) -> String {
        let mut placement = String::new();
        for (row, cells) in self.cells.iter().enumerate() {
            if row != 0 {
                placement.push('/');
            }
            let mut empties = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empties != 0 {
                            placement.push_str(&empties.to_string());
                            empties = 0;
                        }
                        placement.push(piece.symbol());
                    }
                    None => empties += 1,
                }
            }
            if empties != 0 {
                placement.push_str(&empties.to_string());
            }
        }
        placement
    }

    /// Returns the piece on a given cell if any.
    #[inline]
    pub fn piece_on(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.row()][coord.col()]
    }

    /// Checks if a given cell is empty.
    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.piece_on(coord).is_none()
    }

    /// A copy of the whole grid.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.cells
    }

    /// Iterator over all occupied cells and their piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::iter().filter_map(|coord| self.piece_on(coord).map(|piece| (coord, piece)))
    }

    /// Number of kings a side has on the board.
    pub fn king_count(&self, side: Side) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.is_king() && piece.side == side)
            .count()
    }

    /// Checks that each side has exactly one king, as a game must start with.
    /// # Errors
    /// Reports the first side, white first, whose king count is wrong.
    pub fn check_kings(&self) -> Result<(), PlacementError> {
        for side in [Side::White, Side::Black] {
            let count = self.king_count(side);
            if count != 1 {
                return Err(PlacementError::KingCount { side, count });
            }
        }
        Ok(())
    }

    /// Moves the content of `origin` onto `target`, leaving `origin` empty.
    ///
    /// Returns whatever stood on `target` before the relocation.
    pub(crate) fn relocate(&mut self, origin: Coord, target: Coord) -> Option<Piece> {
        let moving = self.cells[origin.row()][origin.col()].take();
        std::mem::replace(&mut self.cells[target.row()][target.col()], moving)
    }
}
impl std::str::FromStr for Board {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::empty();
        let (mut row, mut col) = (0, 0);

        for (index, val) in s.trim().char_indices() {
            match val {
                '/' => {
                    if col != GRID_SIZE {
                        return Err(PlacementError::IncompleteRow { row, count: col });
                    }
                    row += 1;
                    col = 0;
                    if row == GRID_SIZE {
                        return Err(PlacementError::WrongRowCount(row + 1));
                    }
                }
                '1'..='8' => {
                    col += val as usize - '0' as usize;
                    if col > GRID_SIZE {
                        return Err(PlacementError::TooManyCells(row));
                    }
                }
                _ => {
                    let kind = PieceKind::from_symbol(val)
                        .ok_or(PlacementError::UnexpectedToken { index, val })?;
                    if col == GRID_SIZE {
                        return Err(PlacementError::TooManyCells(row));
                    }
                    board.cells[row][col] = Some(Piece::new(kind, val.is_lowercase().into()));
                    col += 1;
                }
            }
        }

        if row != GRID_SIZE - 1 {
            return Err(PlacementError::WrongRowCount(row + 1));
        }
        if col != GRID_SIZE {
            return Err(PlacementError::IncompleteRow { row, count: col });
        }
        Ok(board)
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{row}")?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn coord(row: i32, col: i32) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn initial_layout() {
        let board = Board::initial();
        assert_eq!(
            board.piece_on(coord(0, 4)),
            Some(Piece::new(PieceKind::King, Side::Black))
        );
        assert_eq!(
            board.piece_on(coord(7, 3)),
            Some(Piece::new(PieceKind::Queen, Side::White))
        );
        assert_eq!(
            board.piece_on(coord(6, 5)),
            Some(Piece::new(PieceKind::Pawn, Side::White))
        );
        for row in 2..6 {
            for col in 0..8 {
                assert!(board.is_empty(coord(row, col)));
            }
        }
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_count(Side::White), 1);
        assert_eq!(board.king_count(Side::Black), 1);
    }

    #[test]
    fn initial_placement_string() {
        assert_eq!(Board::initial().placement(), INITIAL);
        assert_eq!(Board::from_placement(INITIAL), Ok(Board::initial()));
        assert_eq!(Board::empty().placement(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn placement_with_gaps() {
        let board = Board::from_placement("4k3/8/8/3h4/8/8/8/4K3").unwrap();
        assert_eq!(
            board.piece_on(coord(3, 3)),
            Some(Piece::new(PieceKind::Knight, Side::Black))
        );
        assert_eq!(board.placement(), "4k3/8/8/3n4/8/8/8/4K3");
    }

    #[test]
    fn invalid_placements() {
        assert_eq!(
            Board::from_placement("8/8/8"),
            Err(PlacementError::WrongRowCount(3))
        );
        assert_eq!(
            Board::from_placement("7/8/8/8/8/8/8/8"),
            Err(PlacementError::IncompleteRow { row: 0, count: 7 })
        );
        assert_eq!(
            Board::from_placement("9/8/8/8/8/8/8/8"),
            Err(PlacementError::UnexpectedToken { index: 0, val: '9' })
        );
        assert_eq!(
            Board::from_placement("8p/8/8/8/8/8/8/8"),
            Err(PlacementError::TooManyCells(0))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/8/8"),
            Err(PlacementError::WrongRowCount(9))
        );
    }

    #[test]
    fn king_counts_are_checked() {
        assert_eq!(Board::initial().check_kings(), Ok(()));
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/KK6").unwrap().check_kings(),
            Err(PlacementError::KingCount {
                side: Side::White,
                count: 2
            })
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/4K3").unwrap().check_kings(),
            Err(PlacementError::KingCount {
                side: Side::Black,
                count: 0
            })
        );
        assert_eq!(
            Board::empty().check_kings().map_err(|e| e.to_string()),
            Err("Placement holds 0 white kings instead of 1".to_string())
        );
    }

    #[test]
    fn relocate_empties_origin() {
        let mut board = Board::initial();
        let displaced = board.relocate(coord(7, 1), coord(5, 0));
        assert_eq!(displaced, None);
        assert!(board.is_empty(coord(7, 1)));
        assert_eq!(
            board.piece_on(coord(5, 0)),
            Some(Piece::new(PieceKind::Knight, Side::White))
        );
    }

    #[test]
    fn relocate_returns_displaced_piece() {
        let mut board = Board::initial();
        let displaced = board.relocate(coord(7, 0), coord(0, 0));
        assert_eq!(displaced, Some(Piece::new(PieceKind::Rook, Side::Black)));
        assert_eq!(
            board.piece_on(coord(0, 0)),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
    }

    #[test]
    fn display_grid() {
        let rendered = Board::initial().to_string();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "0 r n b q k b n r");
        assert_eq!(lines[4], "3 . . . . . . . .");
        assert_eq!(lines[8], "7 R N B Q K B N R");
    }
}
