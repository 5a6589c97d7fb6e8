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

use std::{error::Error, fmt};

use crate::{
    attacks::{self, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS},
    board::Board,
    color::Color,
    m::{Move, MoveKind, MoveList},
    role::Role,
    square::{File, Rank, Square},
    types::{CastlingRights, CastlingSide},
};

/// Error when constructing a [`Position`] from an illegal setup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// A side has no king.
    NoKing { color: Color },
    /// A side has more than one king.
    TooManyKings,
    /// A pawn stands on the first or eighth rank.
    PawnsOnBackrank,
    /// A castling flag is set without the king and rook on their home
    /// squares.
    InvalidCastlingRights,
    /// The en passant square does not match a double pawn push that could
    /// just have been played.
    InvalidEpSquare,
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NoKing { color } => write!(f, "missing {color} king"),
            PositionError::TooManyKings => f.write_str("too many kings"),
            PositionError::PawnsOnBackrank => f.write_str("pawns on backrank"),
            PositionError::InvalidCastlingRights => f.write_str("invalid castling rights"),
            PositionError::InvalidEpSquare => f.write_str("invalid en passant square"),
            PositionError::OppositeCheck => f.write_str("opposite check"),
        }
    }
}

impl Error for PositionError {}

/// Error when trying to play an illegal move.
#[derive(Clone, Debug)]
pub struct PlayError;

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal move in this position")
    }
}

impl Error for PlayError {}

/// The result of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// A legal chess position with game state.
///
/// Positions are immutable. [`Position::play()`] validates a move and
/// returns the successor position, leaving `self` untouched.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Position {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmoves: u32,
}

impl Default for Position {
    fn default() -> Position {
        Position {
            board: Board::new(),
            turn: Color::White,
            castling: CastlingRights::all(),
            ep_square: None,
            halfmove_clock: 0,
            fullmoves: 1,
        }
    }
}

impl Position {
    /// Sets up an arbitrary position, checking that it is reachable by the
    /// rules (one king per side, no pawns on the backrank, consistent
    /// castling and en passant state, side not to move not in check).
    pub fn from_setup(
        board: Board,
        turn: Color,
        castling: CastlingRights,
        ep_square: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Result<Position, PositionError> {
        for color in Color::ALL {
            let kings = board
                .pieces()
                .filter(|(_, piece)| *piece == color.king())
                .count();
            if kings == 0 {
                return Err(PositionError::NoKing { color });
            } else if kings > 1 {
                return Err(PositionError::TooManyKings);
            }
        }

        if board.pieces().any(|(sq, piece)| {
            piece.role == Role::Pawn && (sq.rank() == Rank::First || sq.rank() == Rank::Eighth)
        }) {
            return Err(PositionError::PawnsOnBackrank);
        }

        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if castling.contains(CastlingRights::single(color, side))
                    && (board.piece_at(side.king_from(color)) != Some(color.king())
                        || board.piece_at(side.rook_from(color)) != Some(color.rook()))
                {
                    return Err(PositionError::InvalidCastlingRights);
                }
            }
        }

        if let Some(ep) = ep_square {
            let expected_rank = turn.fold(Rank::Sixth, Rank::Third);
            let pawn_sq = Square::from_coords(ep.file(), turn.fold(Rank::Fifth, Rank::Fourth));
            let origin_sq = Square::from_coords(ep.file(), turn.fold(Rank::Seventh, Rank::Second));
            if ep.rank() != expected_rank
                || board.piece_at(ep).is_some()
                || board.piece_at(pawn_sq) != Some((!turn).pawn())
                || board.piece_at(origin_sq).is_some()
            {
                return Err(PositionError::InvalidEpSquare);
            }
        }

        let pos = Position {
            board,
            turn,
            castling,
            ep_square,
            halfmove_clock,
            fullmoves,
        };

        if pos.king_attacked(!turn) {
            return Err(PositionError::OppositeCheck);
        }

        Ok(pos)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// Generates all legal moves, sorted by origin square and then by
    /// destination square, so that the order is stable across runs.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.pseudo_legal_moves(&mut moves);
        moves.retain(|m| self.is_safe(m));
        moves.sort_by_key(|m| (m.from, m.to));
        moves
    }

    /// Validates and plays a move, returning the successor position.
    pub fn play(&self, m: &Move) -> Result<Position, PlayError> {
        if self.legal_moves().contains(m) {
            Ok(self.play_unchecked(m))
        } else {
            Err(PlayError)
        }
    }

    /// Plays a move without checking legality. The move must come from
    /// [`Position::legal_moves()`] of this position.
    pub fn play_unchecked(&self, m: &Move) -> Position {
        let mut pos = self.clone();
        pos.do_move(m);
        pos
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.king_attacked(self.turn)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Tests if the halfmove clock has reached fifty moves by both sides
    /// without a capture or pawn move.
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Tests if a color has insufficient winning material: a bare king, or
    /// a king with a single knight or bishop.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let mut minors = 0;
        for (_, piece) in self.board.pieces().filter(|(_, piece)| piece.color == color) {
            match piece.role {
                Role::Pawn | Role::Rook | Role::Queen => return false,
                Role::Knight | Role::Bishop => minors += 1,
                Role::King => (),
            }
        }
        minors <= 1
    }

    pub fn is_insufficient_material(&self) -> bool {
        Color::ALL
            .into_iter()
            .all(|color| self.has_insufficient_material(color))
    }

    /// Tests for any of the supported draw conditions: stalemate, the
    /// fifty-move rule or insufficient material on both sides.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_fifty_moves() || self.is_insufficient_material()
    }

    /// The outcome if the game is over, `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            Some(Outcome::Decisive { winner: !self.turn })
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn king_attacked(&self, color: Color) -> bool {
        self.board
            .king_of(color)
            .is_some_and(|king| attacks::square_attacked(&self.board, king, !color))
    }

    /// Tests if a pseudo-legal move leaves the mover's own king attacked.
    fn is_safe(&self, m: &Move) -> bool {
        !self.play_unchecked(m).king_attacked(self.turn)
    }

    fn do_move(&mut self, m: &Move) {
        let color = self.turn;
        let piece = self
            .board
            .remove_piece_at(m.from)
            .expect("move from occupied square");

        let captured = if m.kind == MoveKind::EnPassant {
            self.board
                .remove_piece_at(Square::from_coords(m.to.file(), m.from.rank()))
        } else {
            self.board.remove_piece_at(m.to)
        };

        match m.promotion {
            Some(role) => self.board.set_piece_at(m.to, role.of(color)),
            None => self.board.set_piece_at(m.to, piece),
        }

        if let Some(side) = m.castling_side() {
            self.board.remove_piece_at(side.rook_from(color));
            self.board.set_piece_at(side.rook_to(color), color.rook());
        }

        self.ep_square = if m.kind == MoveKind::DoublePush {
            m.from.offset(0, color.fold(1, -1))
        } else {
            None
        };

        if piece.role == Role::King {
            self.castling.discard_color(color);
        }
        self.castling.discard_rook(m.from);
        self.castling.discard_rook(m.to);

        if piece.role == Role::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if color.is_black() {
            self.fullmoves += 1;
        }
        self.turn = !color;
    }

    pub(crate) fn pseudo_legal_moves(&self, moves: &mut MoveList) {
        for (from, piece) in self.board.pieces() {
            if piece.color != self.turn {
                continue;
            }
            match piece.role {
                Role::Pawn => self.gen_pawn_moves(from, moves),
                Role::Knight => self.gen_step_moves(from, &KNIGHT_DELTAS, moves),
                Role::Bishop => self.gen_slider_moves(from, &BISHOP_DELTAS, moves),
                Role::Rook => self.gen_slider_moves(from, &ROOK_DELTAS, moves),
                Role::Queen => {
                    self.gen_slider_moves(from, &BISHOP_DELTAS, moves);
                    self.gen_slider_moves(from, &ROOK_DELTAS, moves);
                }
                Role::King => {
                    self.gen_step_moves(from, &KING_DELTAS, moves);
                    self.gen_castling_moves(moves);
                }
            }
        }
    }

    fn gen_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.turn;
        let dr = color.fold(1, -1);
        let promotion_rank = color.fold(Rank::Eighth, Rank::First);

        if let Some(to) = from.offset(0, dr) {
            if self.board.piece_at(to).is_none() {
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to);
                } else {
                    moves.push(Move {
                        from,
                        to,
                        promotion: None,
                        kind: MoveKind::Normal,
                    });
                    if from.rank() == color.fold(Rank::Second, Rank::Seventh) {
                        if let Some(to) = from.offset(0, 2 * dr) {
                            if self.board.piece_at(to).is_none() {
                                moves.push(Move {
                                    from,
                                    to,
                                    promotion: None,
                                    kind: MoveKind::DoublePush,
                                });
                            }
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(to) = from.offset(df, dr) {
                if self
                    .board
                    .piece_at(to)
                    .is_some_and(|target| target.color != color)
                {
                    if to.rank() == promotion_rank {
                        push_promotions(moves, from, to);
                    } else {
                        moves.push(Move {
                            from,
                            to,
                            promotion: None,
                            kind: MoveKind::Capture,
                        });
                    }
                } else if Some(to) == self.ep_square {
                    moves.push(Move {
                        from,
                        to,
                        promotion: None,
                        kind: MoveKind::EnPassant,
                    });
                }
            }
        }
    }

    fn gen_step_moves(&self, from: Square, deltas: &[(i32, i32)], moves: &mut MoveList) {
        for &(df, dr) in deltas {
            if let Some(to) = from.offset(df, dr) {
                match self.board.piece_at(to) {
                    None => moves.push(Move {
                        from,
                        to,
                        promotion: None,
                        kind: MoveKind::Normal,
                    }),
                    Some(target) if target.color != self.turn => moves.push(Move {
                        from,
                        to,
                        promotion: None,
                        kind: MoveKind::Capture,
                    }),
                    Some(_) => (),
                }
            }
        }
    }

    fn gen_slider_moves(&self, from: Square, deltas: &[(i32, i32)], moves: &mut MoveList) {
        for &(df, dr) in deltas {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                match self.board.piece_at(to) {
                    None => {
                        moves.push(Move {
                            from,
                            to,
                            promotion: None,
                            kind: MoveKind::Normal,
                        });
                        current = to;
                    }
                    Some(target) => {
                        if target.color != self.turn {
                            moves.push(Move {
                                from,
                                to,
                                promotion: None,
                                kind: MoveKind::Capture,
                            });
                        }
                        break;
                    }
                }
            }
        }
    }

    fn gen_castling_moves(&self, moves: &mut MoveList) {
        let color = self.turn;
        for side in CastlingSide::ALL {
            if !self.castling.contains(CastlingRights::single(color, side)) {
                continue;
            }

            let king_from = side.king_from(color);
            if self.board.piece_at(king_from) != Some(color.king())
                || self.board.piece_at(side.rook_from(color)) != Some(color.rook())
            {
                continue;
            }

            let backrank = color.backrank();
            let between: &[File] = match side {
                CastlingSide::KingSide => &[File::F, File::G],
                CastlingSide::QueenSide => &[File::D, File::C, File::B],
            };
            if between
                .iter()
                .any(|&file| self.board.piece_at(Square::from_coords(file, backrank)).is_some())
            {
                continue;
            }

            // The king may not castle out of, through or into check.
            let path: &[File] = match side {
                CastlingSide::KingSide => &[File::E, File::F, File::G],
                CastlingSide::QueenSide => &[File::E, File::D, File::C],
            };
            if path.iter().any(|&file| {
                attacks::square_attacked(&self.board, Square::from_coords(file, backrank), !color)
            }) {
                continue;
            }

            moves.push(Move {
                from: king_from,
                to: side.king_to(color),
                promotion: None,
                kind: match side {
                    CastlingSide::KingSide => MoveKind::CastleKingSide,
                    CastlingSide::QueenSide => MoveKind::CastleQueenSide,
                },
            });
        }
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square) {
    for role in [Role::Queen, Role::Rook, Role::Bishop, Role::Knight] {
        moves.push(Move {
            from,
            to,
            promotion: Some(role),
            kind: MoveKind::Promotion,
        });
    }
}
