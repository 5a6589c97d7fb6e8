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

use arrayvec::ArrayVec;

use crate::{role::Role, square::Square, types::CastlingSide};

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is higher than the maximum number of legal moves in any
/// reachable position.
pub type MoveList = ArrayVec<Move, 512>;

/// How a [`Move`] affects the board beyond moving one piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveKind {
    /// A plain move to an empty square.
    Normal,
    /// A move that takes the piece on the destination square.
    Capture,
    /// A two-square pawn advance from its starting rank.
    DoublePush,
    /// A pawn capture of the pawn that just made a double push.
    EnPassant,
    /// O-O. Also moves the rook from the H-file.
    CastleKingSide,
    /// O-O-O. Also moves the rook from the A-file.
    CastleQueenSide,
    /// A pawn reaching the last rank, possibly capturing.
    Promotion,
}

/// A move, with enough detail to apply it without recomputing legality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
    pub kind: MoveKind,
}

impl Move {
    /// Checks if the move takes an opposing piece, including capturing
    /// promotions and en passant.
    pub fn is_capture(&self) -> bool {
        match self.kind {
            MoveKind::Capture | MoveKind::EnPassant => true,
            MoveKind::Promotion => self.from.file() != self.to.file(),
            _ => false,
        }
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    pub fn is_castle(&self) -> bool {
        self.castling_side().is_some()
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::CastleKingSide => Some(CastlingSide::KingSide),
            MoveKind::CastleQueenSide => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }
}

/// The move in coordinate notation, like `e2e4` or `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}
