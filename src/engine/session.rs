use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::game::{can_stack_tableau, Card, SpiderGame, SuitMode, PILE_COUNT};

/// Session lifecycle. `Won` is terminal until the next `new_game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Playing,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub success: bool,
    pub completed_sequence: bool,
    pub won: bool,
}

impl MoveOutcome {
    pub const fn rejected() -> Self {
        Self {
            success: false,
            completed_sequence: false,
            won: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealOutcome {
    pub success: bool,
    pub won: bool,
}

impl DealOutcome {
    pub const fn rejected() -> Self {
        Self {
            success: false,
            won: false,
        }
    }
}

/// Deep, independent copy of everything a mutating action can change.
/// Card values are `Copy`, so cloning the game never aliases live piles.
#[derive(Debug, Clone)]
struct Snapshot {
    game: SpiderGame,
    move_count: u32,
    elapsed: Duration,
}

/// Controller owning one game aggregate. All mutation goes through the four
/// operations below; hosts get read-only views. Illegal requests are silent
/// no-ops that leave state, the undo log, and the move counter untouched,
/// even when the caller skipped the query predicates.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    game: Option<SpiderGame>,
    seed: u64,
    move_count: u32,
    elapsed_base: Duration,
    resumed_at: Option<Instant>,
    history: Vec<Snapshot>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match &self.game {
            None => SessionState::Idle,
            Some(game) if game.is_won() => SessionState::Won,
            Some(_) => SessionState::Playing,
        }
    }

    pub fn new_game(&mut self, suit_mode: SuitMode) {
        let seed = rand::thread_rng().gen();
        self.new_game_with_seed(suit_mode, seed);
    }

    pub fn new_game_with_seed(&mut self, suit_mode: SuitMode, seed: u64) {
        info!("new game mode={} seed={seed}", suit_mode.id());
        self.game = Some(SpiderGame::new_with_seed(seed, suit_mode));
        self.seed = seed;
        self.move_count = 0;
        self.history.clear();
        self.elapsed_base = Duration::ZERO;
        self.resumed_at = Some(Instant::now());
    }

    /// Move the run starting at (`src`, `start`) onto pile `dst`. Validates
    /// run shape and drop legality before snapshotting, so the undo log only
    /// ever records states that actually changed.
    pub fn apply_move(&mut self, src: usize, start: usize, dst: usize) -> MoveOutcome {
        if self.state() != SessionState::Playing {
            return MoveOutcome::rejected();
        }
        let elapsed = self.elapsed();
        let move_count = self.move_count;
        let Some(game) = self.game.as_mut() else {
            return MoveOutcome::rejected();
        };
        if !game.can_move_run(src, start, dst) {
            debug!("rejected move src={src} start={start} dst={dst}");
            return MoveOutcome::rejected();
        }

        let snapshot = Snapshot {
            game: game.clone(),
            move_count,
            elapsed,
        };
        let runs_before = game.completed_runs();
        let moved = game.move_run(src, start, dst);
        debug_assert!(moved, "validated move must apply");
        let completed_sequence = game.completed_runs() > runs_before;
        let won = game.is_won();

        self.history.push(snapshot);
        self.move_count += 1;
        if won {
            self.freeze_clock();
            info!("game won after {} moves", self.move_count);
        }
        MoveOutcome {
            success: true,
            completed_sequence,
            won,
        }
    }

    /// Deal one face-up card onto every pile. Rejected while any pile is
    /// empty or fewer than ten cards remain, and outside `Playing`.
    pub fn deal_from_stock(&mut self) -> DealOutcome {
        if self.state() != SessionState::Playing {
            return DealOutcome::rejected();
        }
        let elapsed = self.elapsed();
        let move_count = self.move_count;
        let Some(game) = self.game.as_mut() else {
            return DealOutcome::rejected();
        };
        if !game.can_deal_from_stock() {
            debug!("rejected deal stock_len={}", game.stock_len());
            return DealOutcome::rejected();
        }

        let snapshot = Snapshot {
            game: game.clone(),
            move_count,
            elapsed,
        };
        let dealt = game.deal_from_stock();
        debug_assert!(dealt, "validated deal must apply");
        let won = game.is_won();

        self.history.push(snapshot);
        self.move_count += 1;
        if won {
            self.freeze_clock();
            info!("game won after {} moves", self.move_count);
        }
        DealOutcome { success: true, won }
    }

    /// Restore the state captured before the last mutating action, including
    /// move count and the elapsed clock. No redo: undone states are gone.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.game = Some(snapshot.game);
        self.move_count = snapshot.move_count;
        self.elapsed_base = snapshot.elapsed;
        self.resumed_at = Some(Instant::now());
        true
    }

    pub fn undo_available(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_deal_allowed(&self) -> bool {
        self.state() == SessionState::Playing
            && self
                .game
                .as_ref()
                .is_some_and(SpiderGame::can_deal_from_stock)
    }

    pub fn can_stack_on(&self, card: Card, top: Option<&Card>) -> bool {
        can_stack_tableau(top, card)
    }

    pub fn movable_run(&self, col: usize, start: usize) -> Option<&[Card]> {
        self.game.as_ref()?.movable_run(col, start)
    }

    pub fn game(&self) -> Option<&SpiderGame> {
        self.game.as_ref()
    }

    pub fn tableau(&self) -> Option<&[Vec<Card>; PILE_COUNT]> {
        self.game.as_ref().map(SpiderGame::tableau)
    }

    pub fn stock_len(&self) -> usize {
        self.game.as_ref().map_or(0, SpiderGame::stock_len)
    }

    pub fn completed_count(&self) -> usize {
        self.game.as_ref().map_or(0, SpiderGame::completed_runs)
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn suit_mode(&self) -> Option<SuitMode> {
        self.game.as_ref().map(SpiderGame::suit_mode)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> Duration {
        let running = self
            .resumed_at
            .map(|at| at.elapsed())
            .unwrap_or(Duration::ZERO);
        self.elapsed_base + running
    }

    pub fn elapsed_seconds(&self) -> u32 {
        u32::try_from(self.elapsed().as_secs()).unwrap_or(u32::MAX)
    }

    /// Rebuild a session from persisted parts. Used by the session codec;
    /// the undo log does not survive persistence.
    pub(crate) fn restore_persisted(
        game: SpiderGame,
        seed: u64,
        move_count: u32,
        elapsed_seconds: u32,
    ) -> Self {
        let won = game.is_won();
        Self {
            game: Some(game),
            seed,
            move_count,
            elapsed_base: Duration::from_secs(u64::from(elapsed_seconds)),
            resumed_at: if won { None } else { Some(Instant::now()) },
            history: Vec::new(),
        }
    }

    fn freeze_clock(&mut self) {
        self.elapsed_base = self.elapsed();
        self.resumed_at = None;
    }
}

#[cfg(test)]
impl GameSession {
    pub(crate) fn debug_with_game(game: SpiderGame) -> Self {
        Self {
            game: Some(game),
            seed: 0,
            move_count: 0,
            elapsed_base: Duration::ZERO,
            resumed_at: Some(Instant::now()),
            history: Vec::new(),
        }
    }
}
