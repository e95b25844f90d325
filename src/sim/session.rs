//! Session state machine and per-tick orchestration
//!
//! One `Session` owns the entire simulation: star arena, fleet board,
//! history, player command state and the gameplay RNG. The per-tick order
//! is fixed and nothing in it suspends or yields, so rendering always
//! observes a consistent snapshot between ticks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::core::config::{GameConfig, SessionRules, GAME_OVER_RETURN_DELAY_S, STAR_COUNT};
use crate::core::error::Result;
use crate::core::types::{Faction, FACTION_COUNT};
use crate::harness::{Button, Game, InputEvent, Key};
use crate::sim::ai;
use crate::sim::command::{max_bases, PlayerCommand};
use crate::sim::events::SimEvent;
use crate::sim::fleet::FleetBoard;
use crate::sim::history::PowerHistory;
use crate::sim::starfield::StarField;

/// Top-level session state: MENU -> PLAYING -> {VICTORY | DEFEAT} -> MENU
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Tier and faction selection; no star field exists yet
    Menu,
    Playing,
    /// Terminal; falls back to the menu after the countdown or on input.
    /// The simulation keeps running underneath so the losing player can
    /// watch the AI mop up.
    GameOver { victory: bool, countdown: f32 },
}

pub struct Session {
    pub config: GameConfig,
    state: SessionState,
    rules: SessionRules,
    rng: ChaCha8Rng,
    seed: u64,

    pub field: StarField,
    pub fleets: FleetBoard,
    pub history: PowerHistory,
    pub command: PlayerCommand,

    /// Owned-star counts refreshed at the top of every tick; the win/loss
    /// check at the end of the tick reads these, so a capture is observed
    /// on the following tick.
    stars_per_faction: [u32; FACTION_COUNT],
    player_bases: u32,
    pub history_visible: bool,

    input_queue: Vec<InputEvent>,
    events: Vec<SimEvent>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            config,
            state: SessionState::Menu,
            rules: SessionRules::for_config(&config),
            fleets: FleetBoard::new(&mut rng),
            rng,
            seed,
            field: StarField::empty(),
            history: PowerHistory::default(),
            command: PlayerCommand::new(),
            stars_per_faction: [0; FACTION_COUNT],
            player_bases: 0,
            history_visible: true,
            input_queue: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn player(&self) -> Faction {
        self.config.player_faction
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn stars_per_faction(&self) -> &[u32; FACTION_COUNT] {
        &self.stars_per_faction
    }

    pub fn player_bases(&self) -> u32 {
        self.player_bases
    }

    /// Current starbase cap for the player
    pub fn max_bases(&self) -> u32 {
        max_bases(self.stars_per_faction[self.player().idx()])
    }

    /// Visual events accumulated since the last drain, for the renderer
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Menu-only tier selection; ignored once a game is running
    pub fn set_difficulty(&mut self, difficulty: crate::core::config::Difficulty) {
        if self.state == SessionState::Menu {
            self.config.difficulty = difficulty;
        }
    }

    pub fn set_speed(&mut self, speed: crate::core::config::SpeedTier) {
        if self.state == SessionState::Menu {
            self.config.speed = speed;
        }
    }

    pub fn set_player_faction(&mut self, faction: Faction) {
        if self.state == SessionState::Menu && faction.idx() < FACTION_COUNT {
            self.config.player_faction = faction;
        }
    }

    /// Leave the menu: derive session rules from the configured tiers,
    /// generate a fresh star field and home assignments, reset fleets,
    /// history and selection. Previous session state is discarded.
    pub fn start_game(&mut self) -> Result<()> {
        self.rules = SessionRules::for_config(&self.config);
        self.field = StarField::generate(&self.rules, &mut self.rng)?;
        self.fleets = FleetBoard::new(&mut self.rng);
        self.history = PowerHistory::default();
        self.command = PlayerCommand::new();
        self.events.clear();
        self.history_visible = true;
        self.state = SessionState::Playing;
        info!(
            seed = self.seed,
            difficulty = ?self.config.difficulty,
            speed = ?self.config.speed,
            player = self.player().0,
            "session started"
        );
        Ok(())
    }

    /// One fixed simulation step. Order is fixed: input sampling, hover
    /// and bookkeeping, history sampling, fleet movement, star production,
    /// AI decisions, then the win/loss check.
    pub fn update(&mut self, step_s: f32) {
        let inputs: Vec<InputEvent> = self.input_queue.drain(..).collect();
        for event in inputs {
            self.apply_input(event);
        }

        self.command.update_hover(&self.field);
        self.refresh_counts();

        if self.state == SessionState::Menu {
            return;
        }

        let player = self.player();
        self.history.tick(step_s, &self.stars_per_faction);
        self.fleets.tick(&mut self.field.stars, step_s, &mut self.events);
        self.field.tick(step_s, &self.rules, &mut self.fleets, player);
        ai::tick(&mut self.field, &mut self.fleets, player, &self.rules, step_s);

        match self.state {
            SessionState::Playing => self.check_game_end(),
            SessionState::GameOver { victory, countdown } => {
                let countdown = countdown - step_s;
                if countdown <= 0.0 {
                    debug!("game over lingered out, returning to menu");
                    self.state = SessionState::Menu;
                } else {
                    self.state = SessionState::GameOver { victory, countdown };
                }
            }
            SessionState::Menu => {}
        }
    }

    /// Queue an input event; it is sampled at the start of the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    fn apply_input(&mut self, event: InputEvent) {
        match self.state {
            // Menu interaction (tier buttons) is the front end's concern;
            // it calls the setters and start_game directly.
            SessionState::Menu => {}
            SessionState::Playing => match event {
                InputEvent::PointerMoved { pos } => self.command.pointer_moved(pos),
                InputEvent::PointerDragged { pos } => self.command.pointer_dragged(pos),
                InputEvent::Pressed(Button::Primary) => {
                    let player = self.player();
                    self.command
                        .primary_pressed(&mut self.field, &mut self.fleets, player);
                }
                InputEvent::Pressed(Button::Secondary) => self.command.cycle_move_fraction(),
                InputEvent::Released(Button::Primary) => {
                    let player = self.player();
                    self.command.primary_released(&mut self.field, player);
                }
                InputEvent::Released(Button::Secondary) => {}
                InputEvent::Key(Key::ToggleCollection) => {
                    self.command.toggle_collection_point(&mut self.field);
                }
                InputEvent::Key(Key::BuildStarbase) => {
                    let player = self.player();
                    let bases = self.player_bases;
                    self.command.request_starbase(&mut self.field, player, bases);
                }
                InputEvent::Key(Key::ToggleHistory) => {
                    self.history_visible = !self.history_visible;
                }
            },
            SessionState::GameOver { .. } => {
                if matches!(event, InputEvent::Pressed(_) | InputEvent::Key(_)) {
                    self.state = SessionState::Menu;
                }
            }
        }
    }

    fn refresh_counts(&mut self) {
        self.stars_per_faction = self.field.count_by_faction();
        let player = self.player();
        self.player_bases = self
            .field
            .stars
            .iter()
            .filter(|s| s.owner == crate::core::types::Owner::Faction(player) && s.starbase.is_some())
            .count() as u32;
    }

    /// Terminal-state check, run only while PLAYING so each transition
    /// fires exactly once
    fn check_game_end(&mut self) {
        let player_stars = self.stars_per_faction[self.player().idx()];
        if player_stars == STAR_COUNT as u32 {
            info!("every star under player control, victory");
            self.events.push(SimEvent::GameEnded { victory: true });
            self.state = SessionState::GameOver {
                victory: true,
                countdown: GAME_OVER_RETURN_DELAY_S,
            };
        } else if player_stars == 0 {
            info!("player lost every star, defeat");
            // The player is out: ground every fleet still in flight
            self.fleets.disband(self.player());
            self.events.push(SimEvent::GameEnded { victory: false });
            self.state = SessionState::GameOver {
                victory: false,
                countdown: GAME_OVER_RETURN_DELAY_S,
            };
        }
    }
}

impl Game for Session {
    fn input(&mut self, event: InputEvent) {
        self.push_input(event);
    }

    fn update(&mut self, step_s: f32, _frame_s: f32, _elapsed_s: f32) {
        Session::update(self, step_s);
    }
}
