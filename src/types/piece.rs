use super::Color;
use std::fmt;

/// A piece identity, including a sentinel `None` used as the 13th Zobrist
/// piece slot (encoding the en-passant square) and as an empty-square marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Piece {
    WP = 0,
    WN = 1,
    WB = 2,
    WR = 3,
    WQ = 4,
    WK = 5,
    BP = 6,
    BN = 7,
    BB = 8,
    BR = 9,
    BQ = 10,
    BK = 11,
    None = 12,
}

pub const NUM_PIECES: usize = 12;

impl Piece {
    pub const ALL: [Piece; 12] = [
        Piece::WP,
        Piece::WN,
        Piece::WB,
        Piece::WR,
        Piece::WQ,
        Piece::WK,
        Piece::BP,
        Piece::BN,
        Piece::BB,
        Piece::BR,
        Piece::BQ,
        Piece::BK,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: usize) -> Piece {
        match i {
            0 => Piece::WP,
            1 => Piece::WN,
            2 => Piece::WB,
            3 => Piece::WR,
            4 => Piece::WQ,
            5 => Piece::WK,
            6 => Piece::BP,
            7 => Piece::BN,
            8 => Piece::BB,
            9 => Piece::BR,
            10 => Piece::BQ,
            11 => Piece::BK,
            _ => Piece::None,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Piece::WP | Piece::WN | Piece::WB | Piece::WR | Piece::WQ | Piece::WK => Color::White,
            Piece::BP | Piece::BN | Piece::BB | Piece::BR | Piece::BQ | Piece::BK => Color::Black,
            Piece::None => Color::Both,
        }
    }

    #[inline]
    pub const fn of_color(kind: PieceKind, color: Color) -> Piece {
        match (kind, color) {
            (PieceKind::Pawn, Color::White) => Piece::WP,
            (PieceKind::Knight, Color::White) => Piece::WN,
            (PieceKind::Bishop, Color::White) => Piece::WB,
            (PieceKind::Rook, Color::White) => Piece::WR,
            (PieceKind::Queen, Color::White) => Piece::WQ,
            (PieceKind::King, Color::White) => Piece::WK,
            (PieceKind::Pawn, _) => Piece::BP,
            (PieceKind::Knight, _) => Piece::BN,
            (PieceKind::Bishop, _) => Piece::BB,
            (PieceKind::Rook, _) => Piece::BR,
            (PieceKind::Queen, _) => Piece::BQ,
            (PieceKind::King, _) => Piece::BK,
        }
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(self, Piece::WP | Piece::BP)
    }

    #[inline]
    pub const fn is_knight(self) -> bool {
        matches!(self, Piece::WN | Piece::BN)
    }

    #[inline]
    pub const fn is_bishop(self) -> bool {
        matches!(self, Piece::WB | Piece::BB)
    }

    #[inline]
    pub const fn is_rook(self) -> bool {
        matches!(self, Piece::WR | Piece::BR)
    }

    #[inline]
    pub const fn is_queen(self) -> bool {
        matches!(self, Piece::WQ | Piece::BQ)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::WK | Piece::BK)
    }

    #[inline]
    pub const fn is_major(self) -> bool {
        self.is_rook() || self.is_queen()
    }

    #[inline]
    pub const fn is_minor(self) -> bool {
        self.is_knight() || self.is_bishop()
    }

    pub const fn from_char(c: char) -> Option<Piece> {
        Some(match c {
            'P' => Piece::WP,
            'N' => Piece::WN,
            'B' => Piece::WB,
            'R' => Piece::WR,
            'Q' => Piece::WQ,
            'K' => Piece::WK,
            'p' => Piece::BP,
            'n' => Piece::BN,
            'b' => Piece::BB,
            'r' => Piece::BR,
            'q' => Piece::BQ,
            'k' => Piece::BK,
            _ => return None,
        })
    }

    pub const fn to_char(self) -> char {
        match self {
            Piece::WP => 'P',
            Piece::WN => 'N',
            Piece::WB => 'B',
            Piece::WR => 'R',
            Piece::WQ => 'Q',
            Piece::WK => 'K',
            Piece::BP => 'p',
            Piece::BN => 'n',
            Piece::BB => 'b',
            Piece::BR => 'r',
            Piece::BQ => 'q',
            Piece::BK => 'k',
            Piece::None => '.',
        }
    }

    /// Lowercase promotion-suffix letter, as used in UCI move strings.
    pub const fn promo_char(self) -> Option<char> {
        match self {
            Piece::WN | Piece::BN => Some('n'),
            Piece::WB | Piece::BB => Some('b'),
            Piece::WR | Piece::BR => Some('r'),
            Piece::WQ | Piece::BQ => Some('q'),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Piece kind without color, used to build a `Piece` for a given side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_round_trip() {
        for p in Piece::ALL {
            let c = p.to_char();
            assert_eq!(Piece::from_char(c), Some(p));
        }
    }

    #[test]
    fn color_of_piece() {
        assert_eq!(Piece::WQ.color(), Color::White);
        assert_eq!(Piece::BK.color(), Color::Black);
        assert_eq!(Piece::None.color(), Color::Both);
    }
}
