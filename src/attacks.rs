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

//! Attack detection on the piece grid.

use crate::{board::Board, color::Color, role::Role, square::Square};

pub(crate) const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_DELTAS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const BISHOP_DELTAS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const ROOK_DELTAS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Tests if `by` has a piece attacking `sq`, regardless of whose turn it is
/// and of pins.
pub fn square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    for (df, dr) in KNIGHT_DELTAS {
        if let Some(from) = sq.offset(df, dr) {
            if board.piece_at(from) == Some(Role::Knight.of(by)) {
                return true;
            }
        }
    }

    for (df, dr) in KING_DELTAS {
        if let Some(from) = sq.offset(df, dr) {
            if board.piece_at(from) == Some(by.king()) {
                return true;
            }
        }
    }

    // A pawn of `by` attacks sq from one rank towards its own side.
    let dr = by.fold(-1, 1);
    for df in [-1, 1] {
        if let Some(from) = sq.offset(df, dr) {
            if board.piece_at(from) == Some(by.pawn()) {
                return true;
            }
        }
    }

    slider_attack(board, sq, by, &BISHOP_DELTAS, Role::Bishop)
        || slider_attack(board, sq, by, &ROOK_DELTAS, Role::Rook)
}

fn slider_attack(
    board: &Board,
    sq: Square,
    by: Color,
    deltas: &[(i32, i32)],
    role: Role,
) -> bool {
    for &(df, dr) in deltas {
        let mut current = sq;
        while let Some(from) = current.offset(df, dr) {
            if let Some(piece) = board.piece_at(from) {
                if piece.color == by && (piece.role == role || piece.role == Role::Queen) {
                    return true;
                }
                break;
            }
            current = from;
        }
    }
    false
}
