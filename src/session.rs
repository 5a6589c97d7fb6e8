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

//! Game sessions pairing a human player against the engine.

use std::{fmt, time::Instant};

use rand::Rng;

use crate::{color::Color, fen::Fen, m::Move, position::Position};

/// An opaque, URL-safe session identifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(String);

impl SessionId {
    const LEN: usize = 16;

    /// Generates a fresh random identifier from URL-safe alphanumeric
    /// characters.
    pub fn random() -> SessionId {
        SessionId(
            rand::rng()
                .sample_iter(rand::distr::Alphanumeric)
                .take(SessionId::LEN)
                .map(char::from)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> SessionId {
        SessionId(s.to_owned())
    }
}

/// Whether a game is still in progress and how it ended otherwise.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Active,
    Checkmate,
    Stalemate,
    Draw,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Active
    }

    pub(crate) fn of(pos: &Position) -> Status {
        if pos.is_checkmate() {
            Status::Checkmate
        } else if pos.is_stalemate() {
            Status::Stalemate
        } else if pos.is_draw() {
            Status::Draw
        } else {
            Status::Active
        }
    }
}

/// A single game between a human player and the engine.
///
/// The human's color is assigned by coin flip at creation. Sessions are
/// value types. Stores hand out copies, so mutating a session has no
/// effect until it is committed back through the store.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: SessionId,
    position: Position,
    last_move: Option<(Move, String)>,
    player_color: Color,
    status: Status,
    created_at: Instant,
    updated_at: Instant,
}

impl GameSession {
    pub(crate) fn new() -> GameSession {
        let now = Instant::now();
        GameSession {
            id: SessionId::random(),
            position: Position::default(),
            last_move: None,
            player_color: Color::from_white(rand::rng().random::<bool>()),
            status: Status::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The most recent move and its notation, if any move has been played.
    #[inline]
    pub fn last_move(&self) -> Option<&(Move, String)> {
        self.last_move.as_ref()
    }

    /// The color the human plays. The engine plays the other side.
    #[inline]
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }

    /// The FEN of the current position.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position).to_string()
    }

    /// Tests if it is the human player's turn in an ongoing game.
    pub fn is_player_turn(&self) -> bool {
        self.status == Status::Active && self.position.turn() == self.player_color
    }

    /// Advances the game by one applied move, storing its notation and
    /// deriving the new status. `next` must be the result of playing `m`
    /// on the current position. This is the mutation store updates drive
    /// sessions through.
    pub fn record_move(&mut self, m: Move, notation: String, next: Position) {
        self.status = Status::of(&next);
        self.position = next;
        self.last_move = Some((m, notation));
    }

    pub(crate) fn touch(&mut self, now: Instant) {
        self.updated_at = now;
    }

    #[cfg(test)]
    pub(crate) fn with_position(mut self, pos: Position) -> GameSession {
        self.status = Status::of(&pos);
        self.position = pos;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new();
        assert_eq!(session.id().as_str().len(), 16);
        assert!(session
            .id()
            .as_str()
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric()));
        assert_eq!(session.status(), Status::Active);
        assert_eq!(session.position(), &Position::default());
        assert!(session.last_move().is_none());
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = GameSession::new();
        let b = GameSession::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_status_follows_position() {
        let mate: Position = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position");
        let m = crate::san::parse_move_text(&mate, "Qxf7#").expect("legal");
        let notation = crate::san::notation(&mate, &m);
        let next = mate.play_unchecked(&m);

        let mut session = GameSession::new();
        session.record_move(m, notation, next);
        assert_eq!(session.status(), Status::Checkmate);
        assert!(session.status().is_terminal());
        assert_eq!(session.last_move().map(|(_, san)| san.as_str()), Some("Qxf7#"));
    }
}
