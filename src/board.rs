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

use std::fmt;

use crate::{
    color::Color,
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Piece positions on a board.
///
/// Squares are indexed from `a1 = 0` to `h8 = 63`, file first within each
/// rank.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// An empty board.
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// The starting position of standard chess.
    pub fn new() -> Board {
        let mut board = Board::empty();
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for (file, role) in File::ALL.into_iter().zip(BACKRANK) {
            board.set_piece_at(Square::from_coords(file, Rank::First), role.of(Color::White));
            board.set_piece_at(Square::from_coords(file, Rank::Second), Color::White.pawn());
            board.set_piece_at(Square::from_coords(file, Rank::Seventh), Color::Black.pawn());
            board.set_piece_at(Square::from_coords(file, Rank::Eighth), role.of(Color::Black));
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// The square of the king of a color, if any.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// All occupied squares and their pieces, in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// Parses the board part of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_board_fen(board_fen: &str) -> Option<Board> {
        let mut board = Board::empty();
        let mut ranks = board_fen.split('/');
        for rank in Rank::ALL.into_iter().rev() {
            let mut file = 0u32;
            for ch in ranks.next()?.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip < 1 || skip > 8 {
                        return None;
                    }
                    file += skip;
                } else {
                    let piece = Piece::from_char(ch)?;
                    let sq = Square::from_coords(File::ALL.get(file as usize).copied()?, rank);
                    board.set_piece_at(sq, piece);
                    file += 1;
                }
                if file > 8 {
                    return None;
                }
            }
            if file != 8 {
                return None;
            }
        }
        if ranks.next().is_some() {
            return None;
        }
        Some(board)
    }

    /// The board part of the FEN.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > Rank::First {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                match self.piece_at(sq) {
                    Some(piece) => write!(f, "{} ", piece.char())?,
                    None => f.write_str(". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
