use crate::types::Color;

use super::movegen::generate_legal_moves;
use super::Position;

impl Position {
    pub fn is_over(&self) -> bool {
        self.fifty > 100
            || self.repetition_count() >= 2
            || self.is_draw_by_material()
            || generate_legal_moves(self).is_empty()
    }

    /// No pawns, no major pieces, and neither side has ≥2 minors or a
    /// knight+bishop — insufficient material to force checkmate.
    pub fn is_draw_by_material(&self) -> bool {
        use crate::types::Piece;

        let any_pawns = !self.bb_piece[Piece::WP.index()].is_empty()
            || !self.bb_piece[Piece::BP.index()].is_empty();
        if any_pawns {
            return false;
        }
        let any_majors = !self.bb_piece[Piece::WR.index()].is_empty()
            || !self.bb_piece[Piece::BR.index()].is_empty()
            || !self.bb_piece[Piece::WQ.index()].is_empty()
            || !self.bb_piece[Piece::BQ.index()].is_empty();
        if any_majors {
            return false;
        }
        for color in [Color::White, Color::Black] {
            let minors = match color {
                Color::White => {
                    self.bb_piece[Piece::WN.index()].popcount()
                        + self.bb_piece[Piece::WB.index()].popcount()
                }
                _ => {
                    self.bb_piece[Piece::BN.index()].popcount()
                        + self.bb_piece[Piece::BB.index()].popcount()
                }
            };
            if minors >= 2 {
                return false;
            }
        }
        true
    }

    /// `None` if the game is not over; the winning side if checkmated;
    /// `Color::Both` for any draw.
    pub fn winner(&self) -> Option<Color> {
        if !self.is_over() {
            return None;
        }
        if generate_legal_moves(self).is_empty() && self.in_check(self.side) {
            return Some(self.side.other());
        }
        Some(Color::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_move_boundary() {
        let mut pos = Position::startpos();
        pos.fifty = 100;
        assert!(!pos.is_over());
        pos.fifty = 101;
        assert!(pos.is_over());
    }

    #[test]
    fn repetition_draw_after_two_round_trips() {
        let mut pos = Position::startpos();
        let moves = ["g1f3", "b8c6", "f3g1", "c6b8"];
        for _ in 0..2 {
            for mv_str in moves {
                let mv = super::super::fen::parse_move_string(&pos, mv_str)
                    .unwrap_or_else(|| panic!("{mv_str} should be legal"));
                pos.make_move(mv);
            }
        }
        assert!(pos.is_over());
        assert_eq!(pos.winner(), Some(crate::types::Color::Both));
    }

    #[test]
    fn k_vs_k_is_draw_by_material() {
        let pos = crate::position::fen::parse("8/8/8/4k3/8/8/8/4K3 w - -").unwrap();
        assert!(pos.is_draw_by_material());
    }
}
