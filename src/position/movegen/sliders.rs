use crate::bitboard::attacks;
use crate::types::{Move, MoveFlag, MoveList, Piece, PieceKind};

use super::super::Position;

fn generate_for(pos: &Position, kind: PieceKind, moves: &mut MoveList) {
    let piece = Piece::of_color(kind, pos.side);
    let own = pos.color_occupancy(pos.side);
    let occ = pos.occupancy();
    for from in pos.bb_piece[piece.index()].iter() {
        let attack_bb = match kind {
            PieceKind::Bishop => attacks::bishop_attacks(from, occ),
            PieceKind::Rook => attacks::rook_attacks(from, occ),
            PieceKind::Queen => attacks::queen_attacks(from, occ),
            _ => unreachable!("sliders module only generates B/R/Q"),
        };
        let targets = attack_bb & !own;
        for to in targets.iter() {
            let captured = pos.piece_at(to);
            moves.push(Move {
                from,
                to,
                captured,
                promotion: Piece::None,
                flag: MoveFlag::None,
            });
        }
    }
}

pub fn generate(pos: &Position, moves: &mut MoveList) {
    generate_for(pos, PieceKind::Bishop, moves);
    generate_for(pos, PieceKind::Rook, moves);
    generate_for(pos, PieceKind::Queen, moves);
}
