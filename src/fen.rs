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

//! Parse and write Forsyth-Edwards Notation.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    color::Color,
    position::{Position, PositionError},
    square::Square,
    types::CastlingRights,
};

/// Error when parsing a malformed FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    /// Not exactly six whitespace separated fields.
    InvalidFieldCount,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidFieldCount => "invalid number of fen fields",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid en passant part in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove counter in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A well formed but not necessarily legal FEN record.
///
/// Parsing checks the syntax only. Use [`Fen::into_position()`] to also
/// check that the described position is reachable.
#[allow(missing_docs)]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    pub ep_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmoves: u32,
}

/// The FEN of the starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Fen {
    pub fn from_position(pos: &Position) -> Fen {
        Fen {
            board: pos.board().clone(),
            turn: pos.turn(),
            castling: pos.castling(),
            ep_square: pos.ep_square(),
            halfmove_clock: pos.halfmove_clock(),
            fullmoves: pos.fullmoves(),
        }
    }

    pub fn into_position(self) -> Result<Position, PositionError> {
        Position::from_setup(
            self.board,
            self.turn,
            self.castling,
            self.ep_square,
            self.halfmove_clock,
            self.fullmoves,
        )
    }
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::from_position(&Position::default())
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Fen, ParseFenError> {
        let mut fields = s.split_whitespace();
        let mut next = || fields.next().ok_or(ParseFenError::InvalidFieldCount);

        let board =
            Board::from_board_fen(next()?).ok_or(ParseFenError::InvalidBoard)?;

        let turn = match next()? {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let castling = parse_castling(next()?)?;

        let ep_square = match next()? {
            "-" => None,
            field => Some(
                field
                    .parse::<Square>()
                    .map_err(|_| ParseFenError::InvalidEpSquare)?,
            ),
        };

        let halfmove_clock = btoi::btou(next()?.as_bytes())
            .map_err(|_| ParseFenError::InvalidHalfmoveClock)?;

        let fullmoves =
            btoi::btou(next()?.as_bytes()).map_err(|_| ParseFenError::InvalidFullmoves)?;

        if fields.next().is_some() {
            return Err(ParseFenError::InvalidFieldCount);
        }

        Ok(Fen {
            board,
            turn,
            castling,
            ep_square,
            halfmove_clock,
            fullmoves,
        })
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, ParseFenError> {
    if field == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut castling = CastlingRights::empty();
    for ch in field.chars() {
        let flag = match ch {
            'K' => CastlingRights::WHITE_KING_SIDE,
            'Q' => CastlingRights::WHITE_QUEEN_SIDE,
            'k' => CastlingRights::BLACK_KING_SIDE,
            'q' => CastlingRights::BLACK_QUEEN_SIDE,
            _ => return Err(ParseFenError::InvalidCastling),
        };
        if castling.contains(flag) {
            return Err(ParseFenError::InvalidCastling);
        }
        castling.insert(flag);
    }
    Ok(castling)
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.board.board_fen(), self.turn.char())?;

        if self.castling.is_empty() {
            f.write_str("-")?;
        } else {
            for (flag, ch) in [
                (CastlingRights::WHITE_KING_SIDE, 'K'),
                (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
                (CastlingRights::BLACK_KING_SIDE, 'k'),
                (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
            ] {
                if self.castling.contains(flag) {
                    write!(f, "{ch}")?;
                }
            }
        }

        match self.ep_square {
            Some(ep) => write!(f, " {ep}")?,
            None => f.write_str(" -")?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    #[test]
    fn test_starting_fen_roundtrip() {
        let fen: Fen = STARTING_FEN.parse().expect("starting fen is valid");
        assert_eq!(fen, Fen::default());
        assert_eq!(fen.to_string(), STARTING_FEN);
        assert_eq!(fen.into_position().expect("legal"), Position::default());
    }

    #[test]
    fn test_fen_roundtrip() {
        for fen in [
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2",
            "7k/5Q2/6K1/8/8/8/8/8 b - - 12 64",
            "4k3/8/8/8/8/8/8/4K2R w K - 99 50",
        ] {
            let parsed: Fen = fen.parse().expect("valid fen");
            assert_eq!(parsed.to_string(), fen);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -".parse::<Fen>(),
            Err(ParseFenError::InvalidFieldCount)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidEpSquare)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1".parse::<Fen>(),
            Err(ParseFenError::InvalidHalfmoveClock)
        );
    }

    #[test]
    fn test_parse_board() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().expect("valid fen");
        assert_eq!(fen.board.piece_at(Square::H1), Some(Color::White.rook()));
        assert_eq!(
            fen.board.piece_at(Square::E8),
            Some(Piece {
                color: Color::Black,
                role: crate::Role::King
            })
        );
        assert_eq!(fen.castling, CastlingRights::WHITE_KING_SIDE);
    }
}
