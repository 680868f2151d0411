//! Text round-trip for a whole session. The host decides where the string
//! lives (settings key, state file, clipboard); this crate does no I/O.

use std::collections::HashMap;

use crate::engine::session::GameSession;
use crate::game::SpiderGame;

/// Encode the live session, or `None` while no game is active.
pub fn encode_persisted_session(session: &GameSession) -> Option<String> {
    let game = session.game()?;
    Some(format!(
        "v=1\nseed={}\nmoves={}\nelapsed={}\ngame={}",
        session.seed(),
        session.move_count(),
        session.elapsed_seconds(),
        game.encode_for_session(),
    ))
}

/// Decode a persisted session. Malformed or truncated payloads, unknown
/// versions, and card-conservation violations all yield `None`.
pub fn decode_persisted_session(raw: &str) -> Option<GameSession> {
    let mut fields = HashMap::<&str, &str>::new();
    for line in raw.lines() {
        let (key, value) = line.split_once('=')?;
        fields.insert(key.trim(), value.trim());
    }

    if *fields.get("v")? != "1" {
        return None;
    }
    let seed = fields.get("seed")?.parse::<u64>().ok()?;
    let move_count = fields.get("moves")?.parse::<u32>().ok()?;
    let elapsed_seconds = fields.get("elapsed")?.parse::<u32>().ok()?;
    let game = SpiderGame::decode_from_session(fields.get("game")?)?;

    Some(GameSession::restore_persisted(
        game,
        seed,
        move_count,
        elapsed_seconds,
    ))
}
