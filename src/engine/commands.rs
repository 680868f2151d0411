use crate::engine::session::{DealOutcome, GameSession, MoveOutcome};
use crate::game::SuitMode;

/// Uniform command surface for hosts that funnel every user gesture through
/// one entry point (menu actions, keyboard shortcuts, replay scripts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    NewGame {
        suit_mode: SuitMode,
        seed: Option<u64>,
    },
    MoveRun {
        src: usize,
        start: usize,
        dst: usize,
    },
    DealFromStock,
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCommandResult {
    pub changed: bool,
    pub completed_sequence: bool,
    pub won: bool,
}

impl EngineCommandResult {
    pub const fn unchanged() -> Self {
        Self {
            changed: false,
            completed_sequence: false,
            won: false,
        }
    }

    pub const fn changed() -> Self {
        Self {
            changed: true,
            completed_sequence: false,
            won: false,
        }
    }

    pub const fn from_move(outcome: MoveOutcome) -> Self {
        Self {
            changed: outcome.success,
            completed_sequence: outcome.completed_sequence,
            won: outcome.won,
        }
    }

    pub const fn from_deal(outcome: DealOutcome) -> Self {
        Self {
            changed: outcome.success,
            completed_sequence: false,
            won: outcome.won,
        }
    }
}

pub fn execute_command(session: &mut GameSession, command: EngineCommand) -> EngineCommandResult {
    match command {
        EngineCommand::NewGame { suit_mode, seed } => {
            match seed {
                Some(seed) => session.new_game_with_seed(suit_mode, seed),
                None => session.new_game(suit_mode),
            }
            EngineCommandResult::changed()
        }
        EngineCommand::MoveRun { src, start, dst } => {
            EngineCommandResult::from_move(session.apply_move(src, start, dst))
        }
        EngineCommand::DealFromStock => EngineCommandResult::from_deal(session.deal_from_stock()),
        EngineCommand::Undo => {
            if session.undo() {
                EngineCommandResult::changed()
            } else {
                EngineCommandResult::unchanged()
            }
        }
    }
}
