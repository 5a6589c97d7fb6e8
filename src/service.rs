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

//! The operations an adapter layer (a web frontend, a bot, a CLI) drives
//! games through.

use std::fmt;

use crate::{
    san::{self, MoveTextError},
    search,
    session::{GameSession, SessionId},
    store::{MemoryStore, SessionStore, StoreError},
};

/// Error returned to the adapter layer. All variants are recoverable by
/// reprompting the user or starting a new session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The move text matches no legal-move grammar or no legal move.
    #[error("unknown move")]
    UnknownMove,
    /// The move text matches more than one legal move.
    #[error("ambiguous move")]
    AmbiguousMove,
    /// A well formed move that is not legal in the current position.
    #[error("illegal move")]
    IllegalMove,
    /// The game already ended and accepts no further moves.
    #[error("game is over")]
    GameOver,
}

impl From<MoveTextError> for ServiceError {
    fn from(err: MoveTextError) -> ServiceError {
        match err {
            MoveTextError::Unknown => ServiceError::UnknownMove,
            MoveTextError::Ambiguous => ServiceError::AmbiguousMove,
            MoveTextError::Illegal => ServiceError::IllegalMove,
        }
    }
}

/// Runs games of a human player against the engine on top of a
/// [`SessionStore`].
pub struct GameService<S = MemoryStore> {
    store: S,
    depth: u32,
}

impl<S> fmt::Debug for GameService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl GameService<MemoryStore> {
    pub fn new() -> GameService<MemoryStore> {
        GameService::with_store(MemoryStore::new())
    }
}

impl Default for GameService<MemoryStore> {
    fn default() -> GameService<MemoryStore> {
        GameService::new()
    }
}

impl<S: SessionStore> GameService<S> {
    pub fn with_store(store: S) -> GameService<S> {
        GameService {
            store,
            depth: search::DEFAULT_DEPTH,
        }
    }

    /// Sets the search depth used for engine replies.
    pub fn with_depth(mut self, depth: u32) -> GameService<S> {
        self.depth = depth;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a new game with a coin-flip color assignment for the player.
    pub fn create_session(&self) -> GameSession {
        let session = self.store.create();
        tracing::info!(session = %session.id(), "new game");
        session
    }

    pub fn get_session(&self, id: &SessionId) -> Result<GameSession, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Applies the player's move text to a session and returns the updated
    /// session together with the SAN of the move actually played.
    ///
    /// On any failure the stored session is left unchanged.
    pub fn apply_player_move(
        &self,
        id: &SessionId,
        text: &str,
    ) -> Result<(GameSession, String), ServiceError> {
        let result = self.store.update(id, |session| {
            if session.status().is_terminal() {
                return Err(ServiceError::GameOver);
            }
            let pos = session.position();
            let m = san::parse_move_text(pos, text)?;
            let notation = san::notation(pos, &m);
            let next = pos.play(&m).map_err(|_| ServiceError::IllegalMove)?;
            session.record_move(m, notation.clone(), next);
            Ok((session.clone(), notation))
        });

        if let Ok((session, notation)) = &result {
            tracing::info!(session = %session.id(), %notation, "player moved");
        }
        result
    }

    /// Has the engine answer with its best move at the configured depth.
    /// Returns `None` if the game is already over.
    pub fn compute_reply(
        &self,
        id: &SessionId,
    ) -> Result<Option<(GameSession, String)>, ServiceError> {
        let result = self.store.update(id, |session| {
            if session.status().is_terminal() {
                return Ok(None);
            }
            let pos = session.position();
            let m = search::best_move(pos, self.depth)
                .expect("active session has legal moves");
            let notation = san::notation(pos, &m);
            let next = pos.play_unchecked(&m);
            session.record_move(m, notation.clone(), next);
            Ok(Some((session.clone(), notation)))
        });

        if let Ok(Some((session, notation))) = &result {
            tracing::info!(session = %session.id(), %notation, "engine replied");
        }
        result
    }

    /// The first `limit` legal moves of a session in SAN, in the stable
    /// move ordering. Useful for hint displays.
    pub fn list_legal_moves(
        &self,
        id: &SessionId,
        limit: usize,
    ) -> Result<Vec<String>, ServiceError> {
        let session = self.store.get(id)?;
        let pos = session.position();
        Ok(pos
            .legal_moves()
            .iter()
            .take(limit)
            .map(|m| san::notation(pos, m))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        fen::Fen,
        position::Position,
        session::Status,
    };

    fn setup(fen: &str) -> Position {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    /// A store seeded with a session in a chosen position, for driving the
    /// service into specific game states.
    fn seeded(pos: Position) -> (GameService, SessionId) {
        let service = GameService::new().with_depth(1);
        let session = service.create_session();
        let id = session.id().clone();
        service
            .store()
            .update::<_, ServiceError, _>(&id, |session| {
                *session = session.clone().with_position(pos.clone());
                Ok(())
            })
            .expect("session exists");
        (service, id)
    }

    #[test]
    fn test_full_exchange() {
        let service = GameService::new().with_depth(1);
        let session = service.create_session();
        let id = session.id().clone();

        let (after_player, notation) =
            service.apply_player_move(&id, "e4").expect("e4 is legal");
        assert_eq!(notation, "e4");
        assert_eq!(after_player.position().turn(), Color::Black);
        assert_eq!(
            after_player.last_move().map(|(_, san)| san.as_str()),
            Some("e4")
        );

        let (after_engine, _) = service
            .compute_reply(&id)
            .expect("session exists")
            .expect("game is not over");
        assert_eq!(after_engine.position().turn(), Color::White);
        assert_eq!(after_engine.position().fullmoves(), 2);

        // The store saw both updates.
        assert_eq!(
            service.get_session(&id).expect("session exists").fen(),
            after_engine.fen()
        );
    }

    #[test]
    fn test_failed_move_leaves_session_unchanged() {
        let service = GameService::new();
        let session = service.create_session();
        let id = session.id().clone();

        assert_eq!(
            service.apply_player_move(&id, "Qh5").map(|_| ()),
            Err(ServiceError::UnknownMove)
        );
        assert_eq!(
            service.apply_player_move(&id, "???").map(|_| ()),
            Err(ServiceError::UnknownMove)
        );

        let found = service.get_session(&id).expect("session exists");
        assert_eq!(found.position(), &Position::default());
        assert!(found.last_move().is_none());
    }

    #[test]
    fn test_ambiguous_move() {
        let (service, id) = seeded(setup("k7/8/8/8/8/8/8/N1N1K3 w - - 0 1"));
        assert_eq!(
            service.apply_player_move(&id, "Nb3").map(|_| ()),
            Err(ServiceError::AmbiguousMove)
        );
        assert!(service.apply_player_move(&id, "Nab3").is_ok());
    }

    #[test]
    fn test_illegal_move() {
        let (service, id) = seeded(setup("3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1"));
        assert_eq!(
            service.apply_player_move(&id, "d2f3").map(|_| ()),
            Err(ServiceError::IllegalMove)
        );
        let found = service.get_session(&id).expect("session exists");
        assert!(found.last_move().is_none());
    }

    #[test]
    fn test_game_over() {
        let (service, id) = seeded(setup("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"));
        assert_eq!(
            service.get_session(&id).expect("session exists").status(),
            Status::Stalemate
        );
        assert_eq!(
            service.apply_player_move(&id, "Kh7").map(|_| ()),
            Err(ServiceError::GameOver)
        );
        assert!(service.compute_reply(&id).expect("session exists").is_none());
    }

    #[test]
    fn test_unknown_session() {
        let service = GameService::new();
        assert_eq!(
            service.get_session(&SessionId::from("missing")).map(|_| ()),
            Err(ServiceError::Store(StoreError::NotFound))
        );
        assert_eq!(
            service
                .apply_player_move(&SessionId::from("missing"), "e4")
                .map(|_| ()),
            Err(ServiceError::Store(StoreError::NotFound))
        );
    }

    #[test]
    fn test_engine_finishes_with_mate() {
        let (service, id) = seeded(setup(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        ));
        let (session, notation) = service
            .compute_reply(&id)
            .expect("session exists")
            .expect("game is not over");
        assert_eq!(notation, "Qxf7#");
        assert_eq!(session.status(), Status::Checkmate);
        // Once over, no further replies.
        assert!(service.compute_reply(&id).expect("session exists").is_none());
    }

    #[test]
    fn test_list_legal_moves() {
        let service = GameService::new();
        let id = service.create_session().id().clone();
        let all = service.list_legal_moves(&id, usize::MAX).expect("session exists");
        assert_eq!(all.len(), 20);
        assert!(all.contains(&"e4".to_owned()));
        assert!(all.contains(&"Nf3".to_owned()));

        let short = service.list_legal_moves(&id, 5).expect("session exists");
        assert_eq!(short, all[..5]);
    }
}
