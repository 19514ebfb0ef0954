use crate::bitboard::attacks;
use crate::types::{Move, MoveList, Piece, PieceKind};

use super::super::Position;

pub fn generate_knights(pos: &Position, moves: &mut MoveList) {
    let piece = Piece::of_color(PieceKind::Knight, pos.side);
    let own = pos.color_occupancy(pos.side);
    for from in pos.bb_piece[piece.index()].iter() {
        let targets = attacks::knight_attacks(from) & !own;
        for to in targets.iter() {
            let captured = pos.piece_at(to);
            moves.push(Move {
                from,
                to,
                captured,
                promotion: Piece::None,
                flag: crate::types::MoveFlag::None,
            });
        }
    }
}

pub fn generate_kings(pos: &Position, moves: &mut MoveList) {
    let piece = Piece::of_color(PieceKind::King, pos.side);
    let own = pos.color_occupancy(pos.side);
    for from in pos.bb_piece[piece.index()].iter() {
        let targets = attacks::king_attacks(from) & !own;
        for to in targets.iter() {
            let captured = pos.piece_at(to);
            moves.push(Move {
                from,
                to,
                captured,
                promotion: Piece::None,
                flag: crate::types::MoveFlag::None,
            });
        }
    }
}
