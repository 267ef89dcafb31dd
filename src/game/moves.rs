//! # Move table
//! Static mapping from piece kind to the relative displacements it may perform.
//!
//! Every displacement is a single step: there is no sliding along rays, so a
//! rook on `(4,4)` reaches `(3,4)` but never `(2,4)`. Pawns are the only
//! side-dependent entry, their table entry is expressed for black (increasing
//! rows) and mirrored for white.

use super::{
    coord::{Coord, Delta},
    piece::{Piece, PieceKind},
};

/// Targets reachable by a single piece, at most 8 for any kind.
pub type TargetList = heapless::Vec<Coord, 8>;

const PAWN_DELTAS: [Delta; 1] = [Delta::new(1, 0)];

const ORTHOGONAL_DELTAS: [Delta; 4] = [
    Delta::new(1, 0),
    Delta::new(-1, 0),
    Delta::new(0, 1),
    Delta::new(0, -1),
];

const DIAGONAL_DELTAS: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

const KNIGHT_DELTAS: [Delta; 8] = [
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(-2, 1),
    Delta::new(-2, -1),
    Delta::new(1, 2),
    Delta::new(1, -2),
    Delta::new(-1, 2),
    Delta::new(-1, -2),
];

const ROYAL_DELTAS: [Delta; 8] = [
    Delta::new(1, 0),
    Delta::new(-1, 0),
    Delta::new(0, 1),
    Delta::new(0, -1),
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

/// Candidate displacements for a piece kind.
///
/// The pawn entry is not adjusted for side, see [`deltas_for`].
pub fn moves_for(kind: PieceKind) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => &PAWN_DELTAS,
        PieceKind::Rook => &ORTHOGONAL_DELTAS,
        PieceKind::Knight => &KNIGHT_DELTAS,
        PieceKind::Bishop => &DIAGONAL_DELTAS,
        PieceKind::Queen | PieceKind::King => &ROYAL_DELTAS,
    }
}

/// Displacements for a concrete piece, with the pawn entry oriented towards
/// the opponent.
pub fn deltas_for(piece: Piece) -> impl Iterator<Item = Delta> {
    let is_pawn = piece.kind == PieceKind::Pawn;
    moves_for(piece.kind).iter().map(move |&delta| {
        if is_pawn {
            Delta::new(delta.rows * piece.side.forward(), delta.cols)
        } else {
            delta
        }
    })
}

/// All on-grid cells a piece standing on `origin` may step to, regardless of
/// their content.
pub fn reachable_from(piece: Piece, origin: Coord) -> TargetList {
    let mut targets = TargetList::new();
    for target in deltas_for(piece).filter_map(|delta| origin.translate(delta)) {
        // Tables never hold more than 8 deltas.
        let _ = targets.push(target);
    }
    targets
}

/// Checks that `target` is exactly one table step away from `origin`.
pub fn is_legal_vector(piece: Piece, origin: Coord, target: Coord) -> bool {
    let delta = origin.delta_to(target);
    deltas_for(piece).any(|d| d == delta)
}
