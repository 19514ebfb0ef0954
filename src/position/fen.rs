use std::str::FromStr;

use crate::error::{ChessError, Result};
use crate::types::{CastleRights, Color, Piece, Square};

use super::Position;

pub fn parse(fen: &str) -> Result<Position> {
    let mut fields = fen.split_whitespace();

    let placement = fields
        .next()
        .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
    let side_field = fields.next().unwrap_or("w");
    let castle_field = fields.next().unwrap_or("-");
    let ep_field = fields.next().unwrap_or("-");
    let halfmove_field = fields.next().unwrap_or("0");
    let fullmove_field = fields.next().unwrap_or("1");

    let mut pos = Position::empty();

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(fen.to_string()));
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                if file >= 8 {
                    return Err(ChessError::InvalidFen(fen.to_string()));
                }
                pos.place(Square::new(file, rank), piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(ChessError::InvalidFen(fen.to_string()));
        }
    }

    pos.side = match side_field {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(ChessError::InvalidFen(fen.to_string())),
    };

    let mut castle = CastleRights::NONE;
    if castle_field != "-" {
        for c in castle_field.chars() {
            match c {
                'K' => castle.set(CastleRights::WK),
                'Q' => castle.set(CastleRights::WQ),
                'k' => castle.set(CastleRights::BK),
                'q' => castle.set(CastleRights::BQ),
                _ => return Err(ChessError::InvalidFen(fen.to_string())),
            }
        }
    }
    pos.castle = castle;

    pos.ep = if ep_field == "-" {
        Square::NONE
    } else {
        Square::from_str(ep_field).map_err(|_| ChessError::InvalidFen(fen.to_string()))?
    };

    pos.fifty = halfmove_field
        .parse()
        .map_err(|_| ChessError::InvalidFen(fen.to_string()))?;
    let fullmove: u32 = fullmove_field
        .parse()
        .map_err(|_| ChessError::InvalidFen(fen.to_string()))?;
    pos.total_moves = fullmove.saturating_sub(1) * 2 + if pos.side == Color::Black { 1 } else { 0 };

    pos.hash = pos.recompute_hash();

    if pos.king_sq[Color::White.index()].is_none() || pos.king_sq[Color::Black.index()].is_none()
    {
        return Err(ChessError::InvalidFen(fen.to_string()));
    }

    Ok(pos)
}

pub fn to_fen(pos: &Position) -> String {
    let mut s = String::new();
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0u32;
        for file in 0..8u8 {
            let piece = pos.piece_at(Square::new(file, rank));
            if matches!(piece, Piece::None) {
                empty_run += 1;
            } else {
                if empty_run > 0 {
                    s.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                s.push(piece.to_char());
            }
        }
        if empty_run > 0 {
            s.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            s.push('/');
        }
    }
    s.push(' ');
    s.push(if pos.side == Color::White { 'w' } else { 'b' });
    s.push(' ');
    if pos.castle == CastleRights::NONE {
        s.push('-');
    } else {
        if pos.castle.has(CastleRights::WK) {
            s.push('K');
        }
        if pos.castle.has(CastleRights::WQ) {
            s.push('Q');
        }
        if pos.castle.has(CastleRights::BK) {
            s.push('k');
        }
        if pos.castle.has(CastleRights::BQ) {
            s.push('q');
        }
    }
    s.push(' ');
    s.push_str(&pos.ep.to_string());
    s.push(' ');
    s.push_str(&pos.fifty.to_string());
    s.push(' ');
    s.push_str(&(pos.total_moves / 2 + 1).to_string());
    s
}

/// Parses a UCI long-algebraic move string (`e2e4`, `e7e8q`) against this
/// position's legal moves; returns `None` if it does not match any of them.
pub fn parse_move_string(pos: &Position, s: &str) -> Option<crate::types::Move> {
    if s.len() < 4 {
        return None;
    }
    let from = Square::from_str(&s[0..2]).ok()?;
    let to = Square::from_str(&s[2..4]).ok()?;
    let promo_char = s.chars().nth(4);
    let promo_piece = match promo_char {
        None => Piece::None,
        Some(c) => {
            let base = Piece::from_char(c.to_ascii_lowercase())?;
            Piece::of_color(
                match base {
                    Piece::WN | Piece::BN => crate::types::PieceKind::Knight,
                    Piece::WB | Piece::BB => crate::types::PieceKind::Bishop,
                    Piece::WR | Piece::BR => crate::types::PieceKind::Rook,
                    Piece::WQ | Piece::BQ => crate::types::PieceKind::Queen,
                    _ => return None,
                },
                pos.side,
            )
        }
    };

    let legal = super::movegen::generate_legal_moves(pos);
    let found = legal.iter().find_map(|mv| {
        if mv.from == from && mv.to == to && mv.promotion == promo_piece {
            Some(*mv)
        } else {
            None
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let pos = Position::startpos();
        assert_eq!(to_fen(&pos), super::super::STARTPOS_FEN);
    }

    #[test]
    fn tolerates_missing_move_counters() {
        let pos = parse("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(pos.fifty, 0);
    }
}
