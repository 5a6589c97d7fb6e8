// This file is part of the gambit library.
// Copyright (C) 2026 the gambit developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use bitflags::bitflags;

use crate::{
    color::Color,
    role::Role,
    square::{File, Square},
};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The FEN letter of the piece, uppercase for White.
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub fn king_from(self, color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

bitflags! {
    /// The four independent castling availability flags.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1 << 0;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    /// The single flag for a color and side.
    pub fn single(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Removes both flags of a color, for when its king moves.
    pub fn discard_color(&mut self, color: Color) {
        self.remove(color.fold(
            CastlingRights::WHITE_KING_SIDE | CastlingRights::WHITE_QUEEN_SIDE,
            CastlingRights::BLACK_KING_SIDE | CastlingRights::BLACK_QUEEN_SIDE,
        ));
    }

    /// Removes the flag guarded by a rook home square, for when a rook moves
    /// away or is captured there. Squares other than the four corners are
    /// ignored.
    pub fn discard_rook(&mut self, square: Square) {
        if square == Square::A1 {
            self.remove(CastlingRights::WHITE_QUEEN_SIDE);
        } else if square == Square::H1 {
            self.remove(CastlingRights::WHITE_KING_SIDE);
        } else if square == Square::A8 {
            self.remove(CastlingRights::BLACK_QUEEN_SIDE);
        } else if square == Square::H8 {
            self.remove(CastlingRights::BLACK_KING_SIDE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_roundtrip() {
        assert_eq!(Piece::from_char('K'), Some(Color::White.king()));
        assert_eq!(Piece::from_char('p'), Some(Color::Black.pawn()));
        assert_eq!(Piece::from_char('x'), None);
        for role in Role::ALL {
            for color in Color::ALL {
                let piece = role.of(color);
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
    }

    #[test]
    fn test_discard_rook() {
        let mut rights = CastlingRights::all();
        rights.discard_rook(Square::H1);
        assert!(!rights.contains(CastlingRights::WHITE_KING_SIDE));
        assert!(rights.contains(CastlingRights::WHITE_QUEEN_SIDE));
        rights.discard_rook(Square::E4);
        assert_eq!(
            rights,
            CastlingRights::WHITE_QUEEN_SIDE
                | CastlingRights::BLACK_KING_SIDE
                | CastlingRights::BLACK_QUEEN_SIDE
        );
    }

    #[test]
    fn test_discard_color() {
        let mut rights = CastlingRights::all();
        rights.discard_color(Color::Black);
        assert_eq!(
            rights,
            CastlingRights::WHITE_KING_SIDE | CastlingRights::WHITE_QUEEN_SIDE
        );
    }
}
