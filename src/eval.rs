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

//! Static position evaluation.

use crate::{color::Color, position::Position, role::Role, square::Square};

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

const CENTER_BONUS: f64 = 0.2;
const MOBILITY_BONUS: f64 = 0.1;

/// The conventional material value of a piece type, with the king at zero.
pub fn piece_value(role: Role) -> f64 {
    match role {
        Role::Pawn => 1.0,
        Role::Knight | Role::Bishop => 3.0,
        Role::Rook => 5.0,
        Role::Queen => 9.0,
        Role::King => 0.0,
    }
}

fn sign(color: Color) -> f64 {
    color.fold(1.0, -1.0)
}

/// Scores a position from White's point of view. Positive values favor
/// White, negative values favor Black.
///
/// The score is the material balance, plus a bonus for pieces on the four
/// center squares, plus a mobility bonus for the side to move proportional
/// to its number of legal moves.
pub fn evaluate(pos: &Position) -> f64 {
    let mut score = 0.0;

    for (sq, piece) in pos.board().pieces() {
        score += sign(piece.color) * piece_value(piece.role);
        if CENTER.contains(&sq) {
            score += sign(piece.color) * CENTER_BONUS;
        }
    }

    score + sign(pos.turn()) * MOBILITY_BONUS * pos.legal_moves().len() as f64
}
