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

//! Chess rules, a bounded-depth engine and concurrent game sessions.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use gambit::Position;
//!
//! let pos = Position::default();
//! assert_eq!(pos.legal_moves().len(), 20);
//! assert!(!pos.is_check());
//! ```
//!
//! Play moves, parse and write FEN:
//!
//! ```
//! use gambit::{Fen, san};
//!
//! let pos = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
//!     .parse::<Fen>()?
//!     .into_position()?;
//!
//! let m = san::parse_move_text(&pos, "Bb5")?;
//! let next = pos.play(&m)?;
//! assert_eq!(
//!     Fen::from_position(&next).to_string(),
//!     "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Run a game against the engine:
//!
//! ```
//! use gambit::{GameService, Status};
//!
//! let service = GameService::new().with_depth(2);
//! let session = service.create_session();
//!
//! let (session, notation) = service.apply_player_move(session.id(), "e4")?;
//! assert_eq!(notation, "e4");
//!
//! if session.status() == Status::Active {
//!     let reply = service.compute_reply(session.id())?;
//!     assert!(reply.is_some());
//! }
//! # Ok::<_, gambit::ServiceError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: Implements [`serde::Serialize`](https://docs.rs/serde) and
//!   `serde::Deserialize` for basic types.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod attacks;
mod board;
mod color;
mod eval;
mod m;
mod perft;
mod position;
mod role;
mod search;
mod service;
mod session;
mod square;
mod store;
mod types;

pub mod fen;
pub mod san;

pub use crate::{
    attacks::square_attacked,
    board::Board,
    color::{Color, ParseColorError},
    eval::{evaluate, piece_value},
    fen::{Fen, ParseFenError, STARTING_FEN},
    m::{Move, MoveKind, MoveList},
    perft::perft,
    position::{Outcome, PlayError, Position, PositionError},
    role::Role,
    san::{MoveTextError, ParseSanError, San},
    search::{best_move, score, DEFAULT_DEPTH},
    service::{GameService, ServiceError},
    session::{GameSession, SessionId, Status},
    square::{File, ParseSquareError, Rank, Square},
    store::{MemoryStore, SessionStore, StoreError, DEFAULT_TTL},
    types::{CastlingRights, CastlingSide, Piece},
};
