//! The memory game state machine.
//!
//! `GameEngine` owns the deck, the pending selection, the comparison lock,
//! the clock and every deferred task. It is the only thing that mutates
//! them. All operations take the current time; scheduled work due by then
//! fires first, so operations always see up-to-date state.
//!
//! ## Transitions
//!
//! ```text
//! NotStarted --start_game--> InProgress
//! InProgress --all cards revealed--> Won
//! InProgress --reset_game--> NotStarted (after reset delay)
//! Won        --reset_game--> NotStarted (after reset delay)
//! ```
//!
//! ## Example
//!
//! ```
//! use memory_match::cards::CardKind;
//! use memory_match::core::{GameConfig, Millis};
//! use memory_match::game::{GameEngine, GameStatus};
//!
//! let kinds = vec![CardKind::new(1, "cat", "cat.png"), CardKind::new(2, "dog", "dog.png")];
//! let mut engine = GameEngine::new(kinds, GameConfig::new().with_seed(42)).unwrap();
//!
//! assert_eq!(engine.status(), GameStatus::NotStarted);
//! engine.start_game(Millis::new(0)).unwrap();
//! assert_eq!(engine.status(), GameStatus::InProgress);
//! ```

use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::clock::GameClock;
use super::scheduler::{Scheduler, Task, TaskHandle};
use super::status::{ClickOutcome, EngineEvent, GameError, GameStatus, IgnoreReason};
use crate::cards::{validate_kinds, Card, CardId, CardKind, Deck, DeckError};
use crate::core::{GameConfig, GameRng, Millis};

/// Cards flipped and awaiting resolution (0, 1 or 2).
pub type SelectedCards = SmallVec<[CardId; 2]>;

/// Read-only view of the table, cheap to clone.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub cards: Deck,
    pub status: GameStatus,
    pub elapsed_seconds: u64,
    pub is_comparing: bool,
    /// The start control is enabled only before the game starts.
    pub can_start: bool,
    /// The reset control is enabled only once the game is over.
    pub can_reset: bool,
}

/// The game engine.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    kinds: Vec<CardKind>,
    rng: GameRng,

    deck: Deck,
    /// Incremented on every deal, so deferred work can tell decks apart.
    deal: u64,
    selected: SelectedCards,
    is_comparing: bool,
    game_over: bool,
    pending_resets: u32,

    clock: GameClock,
    scheduler: Scheduler,
    now: Millis,
    events: Vec<EngineEvent>,
}

impl GameEngine {
    /// Validate `kinds` and deal the first deck.
    ///
    /// The kinds are kept so every reset can deal again.
    pub fn new(kinds: Vec<CardKind>, config: GameConfig) -> Result<Self, DeckError> {
        validate_kinds(&kinds, config.min_kinds)?;

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let deck = Deck::deal(&kinds, &mut rng);

        debug!(kinds = kinds.len(), cards = deck.len(), seed = rng.seed(), "dealt new deck");

        Ok(Self {
            config,
            kinds,
            rng,
            deck,
            deal: 0,
            selected: SelectedCards::new(),
            is_comparing: false,
            game_over: false,
            pending_resets: 0,
            clock: GameClock::new(),
            scheduler: Scheduler::new(),
            now: Millis::ZERO,
            events: Vec::new(),
        })
    }

    // === Queries ===

    /// Derived status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::Won
        } else if self.clock.start_time().is_none() {
            GameStatus::NotStarted
        } else {
            GameStatus::InProgress
        }
    }

    /// The cards on the table.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Look up a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Cards awaiting resolution.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    /// Is a mismatched pair waiting to be flipped back?
    #[must_use]
    pub fn is_comparing(&self) -> bool {
        self.is_comparing
    }

    /// Has the win been recorded?
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Is a reset between its two phases?
    #[must_use]
    pub fn is_reset_pending(&self) -> bool {
        self.pending_resets > 0
    }

    /// When the game started.
    #[must_use]
    pub fn start_time(&self) -> Option<Millis> {
        self.clock.start_time()
    }

    /// Whole seconds counted so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed_seconds()
    }

    /// Is the clock ticking?
    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Latest time the engine has seen.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Due time of the next deferred task.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Number of deferred tasks not yet fired.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Number of queued clock ticks (never more than one).
    #[must_use]
    pub fn pending_ticks(&self) -> usize {
        self.scheduler.count_where(|t| *t == Task::ClockTick)
    }

    /// Kinds the deck is dealt from.
    #[must_use]
    pub fn kinds(&self) -> &[CardKind] {
        &self.kinds
    }

    /// Seed of the dealing RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let status = self.status();
        GameSnapshot {
            cards: self.deck.clone(),
            status,
            elapsed_seconds: self.clock.elapsed_seconds(),
            is_comparing: self.is_comparing,
            can_start: status == GameStatus::NotStarted && !self.is_reset_pending(),
            can_reset: status.is_over(),
        }
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // === Operations ===

    /// Start the game and its clock.
    pub fn start_game(&mut self, now: Millis) -> Result<(), GameError> {
        self.advance_to(now);

        if self.is_reset_pending() {
            return Err(GameError::ResetPending);
        }
        if !self.clock.start(self.now, self.config.tick_interval, &mut self.scheduler) {
            return Err(GameError::AlreadyStarted);
        }

        info!(at = %self.now, cards = self.deck.len(), "game started");
        self.events.push(EngineEvent::Started);
        Ok(())
    }

    /// Stop the clock. Idempotent.
    pub fn stop_timer(&mut self) {
        if self.clock.is_running() {
            debug!(elapsed_seconds = self.clock.elapsed_seconds(), "clock stopped");
        }
        self.clock.stop(&mut self.scheduler);
    }

    /// Reveal a card and resolve a pair if it is the second one.
    pub fn handle_card_click(&mut self, id: CardId, now: Millis) -> ClickOutcome {
        self.advance_to(now);

        if let Some(reason) = self.click_blocker(id) {
            debug!(card = %id, ?reason, "click ignored");
            return ClickOutcome::Ignored(reason);
        }

        self.deck.set_hidden(id, false);
        self.selected.push(id);

        let outcome = if self.selected.len() == 1 {
            ClickOutcome::Revealed(id)
        } else {
            let (first, second) = (self.selected[0], id);
            self.is_comparing = true;
            if self.labels_match(first, second) {
                self.selected.clear();
                self.is_comparing = false;
                debug!(%first, %second, "pair matched");
                ClickOutcome::Matched(first, second)
            } else {
                let due = self.now.after(self.config.flip_back_delay);
                self.scheduler.schedule(
                    due,
                    Task::FlipBack {
                        pair: [first, second],
                        deal: self.deal,
                    },
                );
                debug!(%first, %second, %due, "pair mismatched");
                ClickOutcome::Mismatched(first, second)
            }
        };

        self.after_mutation();
        outcome
    }

    /// Flip every card, then deal a fresh deck after the reset delay.
    ///
    /// Stops the clock immediately.
    pub fn reset_game(&mut self, now: Millis) {
        self.advance_to(now);

        self.deck.flip_all();
        self.stop_timer();
        self.pending_resets += 1;

        let due = self.now.after(self.config.reset_delay);
        self.scheduler.schedule(due, Task::FinishReset);

        info!(%due, "reset started");
        self.events.push(EngineEvent::ResetStarted);
        self.after_mutation();
    }

    /// Fire every deferred task due at or before `now`.
    ///
    /// Time never moves backwards: an earlier `now` is ignored.
    pub fn advance_to(&mut self, now: Millis) {
        self.now = self.now.max(now);

        while let Some((handle, task)) = self.scheduler.pop_due(self.now) {
            self.fire(handle, task);
        }
    }

    // === Internals ===

    fn click_blocker(&self, id: CardId) -> Option<IgnoreReason> {
        if self.is_reset_pending() {
            return Some(IgnoreReason::ResetPending);
        }
        match self.status() {
            GameStatus::NotStarted => return Some(IgnoreReason::NotStarted),
            GameStatus::Won => return Some(IgnoreReason::GameOver),
            GameStatus::InProgress => {}
        }
        if self.is_comparing {
            return Some(IgnoreReason::Comparing);
        }
        match self.deck.get(id) {
            None => Some(IgnoreReason::UnknownCard),
            Some(card) if card.is_revealed() => Some(IgnoreReason::AlreadyRevealed),
            Some(_) => None,
        }
    }

    fn labels_match(&self, first: CardId, second: CardId) -> bool {
        match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        }
    }

    fn fire(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::ClockTick => {
                if self.clock.on_tick(handle, self.config.tick_interval, &mut self.scheduler) {
                    self.events.push(EngineEvent::Tick {
                        elapsed_seconds: self.clock.elapsed_seconds(),
                    });
                }
            }
            Task::FlipBack { pair, deal } => self.flip_back(pair, deal),
            Task::FinishReset => self.finish_reset(),
        }
    }

    fn flip_back(&mut self, pair: [CardId; 2], deal: u64) {
        let still_pending = deal == self.deal && self.is_comparing && self.selected.as_slice() == &pair[..];
        if !still_pending {
            debug!(first = %pair[0], second = %pair[1], "stale flip-back ignored");
            return;
        }

        for id in pair {
            self.deck.set_hidden(id, true);
        }
        self.selected.clear();
        self.is_comparing = false;

        debug!(first = %pair[0], second = %pair[1], "mismatched pair hidden");
        self.events.push(EngineEvent::FlippedBack { pair });
        self.after_mutation();
    }

    fn finish_reset(&mut self) {
        self.pending_resets = self.pending_resets.saturating_sub(1);

        self.deck = Deck::deal(&self.kinds, &mut self.rng);
        self.deal += 1;
        self.selected.clear();
        self.is_comparing = false;
        self.game_over = false;
        self.clock.clear(&mut self.scheduler);

        info!(deal = self.deal, cards = self.deck.len(), "fresh deck dealt");
        self.events.push(EngineEvent::ResetDealt);
        self.after_mutation();
    }

    /// Post-mutation hook: record the win once every card is face-up.
    fn after_mutation(&mut self) {
        if self.game_over || self.is_reset_pending() || self.clock.start_time().is_none() {
            return;
        }
        if !self.deck.all_revealed() {
            return;
        }

        self.game_over = true;
        self.stop_timer();

        let elapsed_seconds = self.clock.elapsed_seconds();
        info!(elapsed_seconds, "all pairs matched");
        self.events.push(EngineEvent::Won { elapsed_seconds });
    }
}
