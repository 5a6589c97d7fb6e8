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

//! Fixed-depth alpha-beta search.

use crate::{eval, m::Move, position::Position};

/// The default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 3;

/// Base score for delivering checkmate, far outside the range of any
/// static evaluation. Remaining depth is added on top so that a faster
/// mate scores higher.
const MATE_SCORE: f64 = 1000.0;

/// Picks the best move for the side to move by alpha-beta search at a
/// fixed depth, or `None` if the game is over.
///
/// White picks the move maximizing the [evaluation](eval::evaluate), Black
/// the move minimizing it. Among equally good moves the first in the
/// stable move ordering wins, so the choice is deterministic. A depth of
/// zero is raised to one ply.
pub fn best_move(pos: &Position, depth: u32) -> Option<Move> {
    let depth = depth.max(1);
    let maximizing = pos.turn().is_white();

    let mut alpha = f64::NEG_INFINITY;
    let mut beta = f64::INFINITY;
    let mut best: Option<(Move, f64)> = None;

    for m in pos.legal_moves() {
        let value = alpha_beta(&pos.play_unchecked(&m), depth - 1, alpha, beta);
        let better = match best {
            None => true,
            Some((_, score)) => {
                if maximizing {
                    value > score
                } else {
                    value < score
                }
            }
        };
        if better {
            best = Some((m, value));
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }
    }

    best.map(|(m, _)| m)
}

/// The alpha-beta value of a position at a fixed depth, from White's point
/// of view.
pub fn score(pos: &Position, depth: u32) -> f64 {
    alpha_beta(pos, depth.max(1), f64::NEG_INFINITY, f64::INFINITY)
}

// Only no-move nodes are terminal here. Lines that cross the fifty-move
// threshold or run out of mating material keep their static score; the
// session layer ends those games via `Status::of`.
fn alpha_beta(pos: &Position, depth: u32, mut alpha: f64, mut beta: f64) -> f64 {
    let moves = pos.legal_moves();

    if moves.is_empty() {
        return if pos.is_check() {
            // Checkmate against the side to move.
            pos.turn().fold(-1.0, 1.0) * (MATE_SCORE + f64::from(depth))
        } else {
            0.0
        };
    }

    if depth == 0 {
        return eval::evaluate(pos);
    }

    if pos.turn().is_white() {
        let mut best = f64::NEG_INFINITY;
        for m in &moves {
            best = best.max(alpha_beta(&pos.play_unchecked(m), depth - 1, alpha, beta));
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for m in &moves {
            best = best.min(alpha_beta(&pos.play_unchecked(m), depth - 1, alpha, beta));
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;
    use crate::{eval::evaluate, fen::Fen, san};

    fn setup(fen: &str) -> Position {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    /// Plain minimax without pruning, as an oracle for the pruned search.
    fn minimax(pos: &Position, depth: u32) -> f64 {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return if pos.is_check() {
                pos.turn().fold(-1.0, 1.0) * (MATE_SCORE + f64::from(depth))
            } else {
                0.0
            };
        }
        if depth == 0 {
            return evaluate(pos);
        }
        let children = moves.iter().map(|m| minimax(&pos.play_unchecked(m), depth - 1));
        if pos.turn().is_white() {
            children.fold(f64::NEG_INFINITY, f64::max)
        } else {
            children.fold(f64::INFINITY, f64::min)
        }
    }

    fn minimax_best(pos: &Position, depth: u32) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for m in pos.legal_moves() {
            let value = minimax(&pos.play_unchecked(&m), depth - 1);
            let better = best.map_or(true, |(_, score)| {
                if pos.turn().is_white() {
                    value > score
                } else {
                    value < score
                }
            });
            if better {
                best = Some((m, value));
            }
        }
        best.map(|(m, _)| m)
    }

    #[test]
    fn test_finds_mate_in_one() {
        let pos = setup("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
        for depth in 1..=3 {
            let m = best_move(&pos, depth).expect("game is not over");
            assert_eq!(san::notation(&pos, &m), "Qxf7#", "depth {depth}");
        }
    }

    #[test]
    fn test_black_minimizes() {
        // Black to move can win the undefended white queen.
        let pos = setup("4k3/8/8/3q4/8/8/3Q4/4K3 b - - 0 1");
        let m = best_move(&pos, 1).expect("game is not over");
        assert_eq!(m.to, crate::Square::D2);
    }

    #[test]
    fn test_depth_one_is_argmax() {
        let pos = setup("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let chosen = best_move(&pos, 1).expect("game is not over");

        let mut expected: Option<(Move, f64)> = None;
        for m in pos.legal_moves() {
            let value = evaluate(&pos.play_unchecked(&m));
            if expected.map_or(true, |(_, score)| value > score) {
                expected = Some((m, value));
            }
        }
        assert_eq!(Some(chosen), expected.map(|(m, _)| m));
    }

    #[test]
    fn test_no_move_when_game_over() {
        assert_eq!(best_move(&setup("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), 3), None);
    }

    #[test]
    fn test_depth_zero_clamped() {
        let pos = Position::default();
        assert_eq!(best_move(&pos, 0), best_move(&pos, 1));
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut checked = 0;
        while checked < 20 {
            // Random playout to reach a midgame position.
            let mut pos = Position::default();
            for _ in 0..rng.random_range(4..30) {
                let moves = pos.legal_moves();
                if moves.is_empty() || pos.is_draw() {
                    break;
                }
                let m = moves[rng.random_range(0..moves.len())];
                pos = pos.play_unchecked(&m);
            }
            if pos.legal_moves().is_empty() {
                continue;
            }

            assert_eq!(score(&pos, 2), minimax(&pos, 2), "fen {}", Fen::from_position(&pos));
            assert_eq!(
                best_move(&pos, 2),
                minimax_best(&pos, 2),
                "fen {}",
                Fen::from_position(&pos)
            );
            checked += 1;
        }
    }
}
