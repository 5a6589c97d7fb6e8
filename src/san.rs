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

//! Read and write Standard Algebraic Notation.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    m::Move,
    position::Position,
    role::Role,
    square::{File, Rank, Square},
    types::CastlingSide,
};

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl Error for ParseSanError {}

/// Error when resolving move text against a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveTextError {
    /// The text does not match any move of the side to play.
    Unknown,
    /// The text matches more than one legal move.
    Ambiguous,
    /// The text names a real piece move that would leave the mover's own
    /// king attacked.
    Illegal,
}

impl fmt::Display for MoveTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveTextError::Unknown => "text does not match a legal move",
            MoveTextError::Ambiguous => "text matches multiple legal moves",
            MoveTextError::Illegal => "move would leave the king attacked",
        })
    }
}

impl Error for MoveTextError {}

/// A move in Standard Algebraic Notation, which can be resolved against a
/// position or produced from a [`Move`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Parses a move in SAN, ignoring any `+` or `#` suffix.
    pub fn from_ascii(mut san: &[u8]) -> Result<San, ParseSanError> {
        if san.ends_with(b"#") || san.ends_with(b"+") {
            san = &san[..san.len() - 1];
        }

        if san == b"O-O" || san == b"0-0" {
            return Ok(San::Castle(CastlingSide::KingSide));
        }
        if san == b"O-O-O" || san == b"0-0-0" {
            return Ok(San::Castle(CastlingSide::QueenSide));
        }

        let (role, mut rest) = match san.split_first() {
            Some((&ch, tail)) if matches!(ch, b'N' | b'B' | b'R' | b'Q' | b'K') => (
                Role::from_char(char::from(ch)).ok_or(ParseSanError)?,
                tail,
            ),
            _ => (Role::Pawn, san),
        };

        let promotion = match rest {
            [head @ .., b'=', promo] => {
                rest = head;
                Some(Role::from_char(char::from(*promo)).ok_or(ParseSanError)?)
            }
            _ => None,
        };
        if promotion.is_some() && role != Role::Pawn {
            return Err(ParseSanError);
        }

        let to = match rest {
            [head @ .., file, rank] => {
                rest = head;
                Square::from_coords(
                    File::from_char(char::from(*file)).ok_or(ParseSanError)?,
                    Rank::from_char(char::from(*rank)).ok_or(ParseSanError)?,
                )
            }
            _ => return Err(ParseSanError),
        };

        let capture = match rest {
            [head @ .., b'x'] => {
                rest = head;
                true
            }
            _ => false,
        };

        let (file, rank) = match rest {
            [] => (None, None),
            [file] if File::from_char(char::from(*file)).is_some() => {
                (File::from_char(char::from(*file)), None)
            }
            [rank] if Rank::from_char(char::from(*rank)).is_some() => {
                (None, Rank::from_char(char::from(*rank)))
            }
            [file, rank] => (
                Some(File::from_char(char::from(*file)).ok_or(ParseSanError)?),
                Some(Rank::from_char(char::from(*rank)).ok_or(ParseSanError)?),
            ),
            _ => return Err(ParseSanError),
        };

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// Resolves the SAN against the legal moves of a position.
    pub fn to_move(&self, pos: &Position) -> Result<Move, MoveTextError> {
        let mut matched = None;
        for candidate in pos.legal_moves() {
            if !self.matches(pos, &candidate) {
                continue;
            }
            if matched.is_some() {
                return Err(MoveTextError::Ambiguous);
            }
            matched = Some(candidate);
        }
        matched.ok_or(MoveTextError::Unknown)
    }

    fn matches(&self, pos: &Position, m: &Move) -> bool {
        match *self {
            San::Castle(side) => m.castling_side() == Some(side),
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                let piece = pos
                    .board()
                    .piece_at(m.from)
                    .expect("legal move from occupied square");
                piece.role == role
                    && m.to == to
                    && m.promotion == promotion
                    && m.is_capture() == capture
                    && file.map_or(true, |file| m.from.file() == file)
                    && rank.map_or(true, |rank| m.from.rank() == rank)
            }
        }
    }

    /// Writes a legal move of a position in SAN, with just enough
    /// disambiguation.
    pub fn from_move(pos: &Position, m: &Move) -> San {
        if let Some(side) = m.castling_side() {
            return San::Castle(side);
        }

        let role = pos
            .board()
            .piece_at(m.from)
            .expect("legal move from occupied square")
            .role;

        let (file, rank) = if role == Role::Pawn {
            (m.is_capture().then(|| m.from.file()), None)
        } else {
            let mut rivals = pos.legal_moves();
            rivals.retain(|rival| {
                rival.to == m.to
                    && rival.from != m.from
                    && pos
                        .board()
                        .piece_at(rival.from)
                        .is_some_and(|piece| piece.role == role)
            });
            if rivals.is_empty() {
                (None, None)
            } else if rivals.iter().all(|rival| rival.from.file() != m.from.file()) {
                (Some(m.from.file()), None)
            } else if rivals.iter().all(|rival| rival.from.rank() != m.from.rank()) {
                (None, Some(m.from.rank()))
            } else {
                (Some(m.from.file()), Some(m.from.rank()))
            }
        };

        San::Normal {
            role,
            file,
            rank,
            capture: m.is_capture(),
            to: m.to,
            promotion: m.promotion,
        }
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<San, ParseSanError> {
        San::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.char())?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
        }
    }
}

/// Resolves player move text against a position, accepting SAN and falling
/// back to coordinate notation like `e2e4`, `e2-e4` or `a7a8=Q`.
///
/// Text that matches more than one legal move, such as a coordinate pair
/// whose promotion piece is left out, is rejected as ambiguous rather than
/// silently resolved.
pub fn parse_move_text(pos: &Position, text: &str) -> Result<Move, MoveTextError> {
    if let Ok(san) = San::from_ascii(text.as_bytes()) {
        match san.to_move(pos) {
            Ok(m) => return Ok(m),
            Err(MoveTextError::Unknown) => (),
            Err(err) => return Err(err),
        }
    }
    parse_coordinates(pos, text)
}

fn parse_coordinates(pos: &Position, text: &str) -> Result<Move, MoveTextError> {
    let mut bytes = text.as_bytes();
    if bytes.ends_with(b"#") || bytes.ends_with(b"+") {
        bytes = &bytes[..bytes.len() - 1];
    }

    if bytes.len() < 4 {
        return Err(MoveTextError::Unknown);
    }
    let from = Square::from_ascii(&bytes[..2]).map_err(|_| MoveTextError::Unknown)?;
    let mut rest = &bytes[2..];
    if let [b'-' | b'x', tail @ ..] = rest {
        rest = tail;
    }
    if rest.len() < 2 {
        return Err(MoveTextError::Unknown);
    }
    let to = Square::from_ascii(&rest[..2]).map_err(|_| MoveTextError::Unknown)?;
    rest = &rest[2..];
    if let [b'=', tail @ ..] = rest {
        rest = tail;
    }
    let promotion = match rest {
        [] => None,
        [promo] => Some(Role::from_char(char::from(*promo)).ok_or(MoveTextError::Unknown)?),
        _ => return Err(MoveTextError::Unknown),
    };

    let mut matched = None;
    for candidate in pos.legal_moves() {
        if candidate.from != from
            || candidate.to != to
            || (promotion.is_some() && candidate.promotion != promotion)
        {
            continue;
        }
        if matched.is_some() {
            return Err(MoveTextError::Ambiguous);
        }
        matched = Some(candidate);
    }
    match matched {
        Some(m) => Ok(m),
        // Distinguish a real piece move that only fails the king-safety
        // filter from text matching nothing at all.
        None => {
            let mut pseudo = crate::m::MoveList::new();
            pos.pseudo_legal_moves(&mut pseudo);
            if pseudo.iter().any(|m| m.from == from && m.to == to) {
                Err(MoveTextError::Illegal)
            } else {
                Err(MoveTextError::Unknown)
            }
        }
    }
}

/// Writes a legal move in SAN with a `+` or `#` suffix when it gives check
/// or mate.
pub fn notation(pos: &Position, m: &Move) -> String {
    let san = San::from_move(pos, m);
    let after = pos.play_unchecked(m);
    if after.is_checkmate() {
        format!("{san}#")
    } else if after.is_check() {
        format!("{san}+")
    } else {
        san.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn setup(fen: &str) -> Position {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    #[test]
    fn test_parse_san_forms() {
        assert_eq!(
            "e4".parse::<San>().expect("valid"),
            San::Normal {
                role: Role::Pawn,
                file: None,
                rank: None,
                capture: false,
                to: Square::E4,
                promotion: None,
            }
        );
        assert_eq!(
            "Nbd2".parse::<San>().expect("valid"),
            San::Normal {
                role: Role::Knight,
                file: Some(File::B),
                rank: None,
                capture: false,
                to: Square::D2,
                promotion: None,
            }
        );
        assert_eq!(
            "exd8=Q#".parse::<San>().expect("valid"),
            San::Normal {
                role: Role::Pawn,
                file: Some(File::E),
                rank: None,
                capture: true,
                to: Square::D8,
                promotion: Some(Role::Queen),
            }
        );
        assert_eq!(
            "0-0".parse::<San>().expect("valid"),
            San::Castle(CastlingSide::KingSide)
        );
        assert!("".parse::<San>().is_err());
        assert!("e9".parse::<San>().is_err());
        assert!("Qe4=N".parse::<San>().is_err());
    }

    #[test]
    fn test_resolve_simple() {
        let pos = Position::default();
        let m = parse_move_text(&pos, "e4").expect("e4 is legal");
        assert_eq!((m.from, m.to), (Square::E2, Square::E4));
        assert_eq!(
            parse_move_text(&pos, "e5"),
            Err(MoveTextError::Unknown)
        );
        assert_eq!(
            parse_move_text(&pos, "Ke2"),
            Err(MoveTextError::Unknown)
        );
    }

    #[test]
    fn test_resolve_coordinates() {
        let pos = Position::default();
        for text in ["e2e4", "e2-e4", "e2e4+"] {
            let m = parse_move_text(&pos, text).expect("coordinate form accepted");
            assert_eq!((m.from, m.to), (Square::E2, Square::E4));
        }
        assert_eq!(parse_move_text(&pos, "e2"), Err(MoveTextError::Unknown));
        assert_eq!(parse_move_text(&pos, "e4e5"), Err(MoveTextError::Unknown));
    }

    #[test]
    fn test_ambiguous_knights() {
        let pos = setup("k7/8/8/8/8/8/8/N1N1K3 w - - 0 1");
        assert_eq!(
            parse_move_text(&pos, "Nb3"),
            Err(MoveTextError::Ambiguous)
        );
        let m = parse_move_text(&pos, "Nab3").expect("disambiguated");
        assert_eq!(m.from, Square::A1);
    }

    #[test]
    fn test_ambiguous_promotion() {
        let pos = setup("8/P7/8/8/8/8/k1K5/8 w - - 0 1");
        // A coordinate pair without the promotion piece matches all four.
        assert_eq!(
            parse_move_text(&pos, "a7a8"),
            Err(MoveTextError::Ambiguous)
        );
        let m = parse_move_text(&pos, "a7a8=Q").expect("explicit promotion");
        assert_eq!(m.promotion, Some(Role::Queen));
        let m = parse_move_text(&pos, "a8=N").expect("san promotion");
        assert_eq!(m.promotion, Some(Role::Knight));
    }

    #[test]
    fn test_pinned_piece_is_illegal_not_unknown() {
        // The knight on d2 is pinned against the king by the rook on d8.
        let pos = setup("3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1");
        assert_eq!(
            parse_move_text(&pos, "d2f3"),
            Err(MoveTextError::Illegal)
        );
        // A square the knight cannot reach at all stays unknown.
        assert_eq!(
            parse_move_text(&pos, "d2d4"),
            Err(MoveTextError::Unknown)
        );
    }

    #[test]
    fn test_notation_disambiguates() {
        let pos = setup("k7/8/8/8/8/8/8/N1N1K3 w - - 0 1");
        let m = parse_move_text(&pos, "Nab3").expect("legal");
        assert_eq!(notation(&pos, &m), "Nab3");
    }

    #[test]
    fn test_notation_suffixes() {
        let pos = setup("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
        let m = parse_move_text(&pos, "Qxf7").expect("legal");
        assert_eq!(notation(&pos, &m), "Qxf7#");

        // With the kings in touch-move distance the new queen covers every
        // flight square, so the promotion is mate.
        let pos = setup("8/P7/8/8/8/8/k1K5/8 w - - 0 1");
        let m = parse_move_text(&pos, "a8=Q").expect("legal");
        assert_eq!(notation(&pos, &m), "a8=Q#");

        // Further apart it is just check, Kb4 escapes.
        let pos = setup("8/P7/8/8/8/k7/8/K7 w - - 0 1");
        let m = parse_move_text(&pos, "a8=Q").expect("legal");
        assert_eq!(notation(&pos, &m), "a8=Q+");
    }

    #[test]
    fn test_roundtrip_through_san() {
        let pos = setup("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        for m in pos.legal_moves() {
            let san = San::from_move(&pos, &m);
            assert_eq!(san.to_move(&pos), Ok(m), "failed on {san}");
        }
    }
}
