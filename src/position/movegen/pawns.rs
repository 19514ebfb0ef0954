use crate::types::{Color, Move, MoveFlag, MoveList, Piece, PieceKind, Square};

use super::super::Position;

fn push_promotions(
    moves: &mut MoveList,
    from: Square,
    to: Square,
    captured: Piece,
    color: Color,
) {
    for kind in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        moves.push(Move {
            from,
            to,
            captured,
            promotion: Piece::of_color(kind, color),
            flag: MoveFlag::None,
        });
    }
}

pub fn generate(pos: &Position, moves: &mut MoveList) {
    let color = pos.side;
    let pawn_piece = Piece::of_color(PieceKind::Pawn, color);
    let pawns = pos.bb_piece[pawn_piece.index()];
    let empty = !pos.occupancy();
    let enemy = pos.color_occupancy(color.other());

    let (push_shift, promo_rank, start_rank, double_rank): (i32, u8, u8, u8) = match color {
        Color::White => (8, 7, 1, 3),
        _ => (-8, 0, 6, 4),
    };

    for from in pawns.iter() {
        let single_to_idx = from.0 as i32 + push_shift;
        if !(0..64).contains(&single_to_idx) {
            continue;
        }
        let single_to = Square::from_index(single_to_idx as u8);
        if empty.test(single_to) {
            if single_to.rank() == promo_rank {
                push_promotions(moves, from, single_to, Piece::None, color);
            } else {
                moves.push(Move::quiet(from, single_to));
                if from.rank() == start_rank {
                    let double_to = Square::new(from.file(), double_rank);
                    if empty.test(double_to) {
                        moves.push(Move {
                            from,
                            to: double_to,
                            captured: Piece::None,
                            promotion: Piece::None,
                            flag: MoveFlag::PawnDoubleStep,
                        });
                    }
                }
            }
        }

        for df in [-1i32, 1] {
            let cap_file = from.file() as i32 + df;
            if !(0..8).contains(&cap_file) {
                continue;
            }
            let cap_idx = from.0 as i32 + push_shift + df;
            if !(0..64).contains(&cap_idx) {
                continue;
            }
            let cap_to = Square::from_index(cap_idx as u8);
            if cap_to.file() as i32 != cap_file {
                continue;
            }
            if enemy.test(cap_to) {
                let captured = pos.piece_at(cap_to);
                if cap_to.rank() == promo_rank {
                    push_promotions(moves, from, cap_to, captured, color);
                } else {
                    moves.push(Move {
                        from,
                        to: cap_to,
                        captured,
                        promotion: Piece::None,
                        flag: MoveFlag::None,
                    });
                }
            } else if !pos.ep.is_none() && cap_to == pos.ep {
                let captured_sq = Square::new(pos.ep.file(), from.rank());
                let captured = pos.piece_at(captured_sq);
                moves.push(Move {
                    from,
                    to: cap_to,
                    captured,
                    promotion: Piece::None,
                    flag: MoveFlag::EnPassant,
                });
            }
        }
    }
}
