/* lib.rs
 *
 * Copyright 2026 arachne contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

//! Spider Solitaire game-state and move-legality engine.
//!
//! The `game` module is the pure rules layer: deck construction, dealing,
//! run detection, drop legality, and completed-sequence retirement. The
//! `engine` module wraps it in a session controller with a move counter,
//! an elapsed-time clock, and snapshot-based undo. Presentation concerns
//! (rendering, drag input, timers, dialogs) live in host applications that
//! call into the session and read its state.

pub mod engine;
pub mod game;

pub use engine::commands::{EngineCommand, EngineCommandResult};
pub use engine::session::{DealOutcome, GameSession, MoveOutcome, SessionState};
pub use game::{Card, CardId, SpiderGame, Suit, SuitMode};
