//! Fixed-timestep game-loop interface
//!
//! The windowed front end owns the real loop (and the clock); this module
//! only fixes the contract: `update` runs zero or more times per rendered
//! frame at a fixed step, `render` runs once strictly afterward, and input
//! arrives asynchronously but is only sampled at the start of the next
//! update tick. `run_headless` drives the same contract without a window,
//! for the simulation binary and integration tests.

use glam::Vec2;

/// Fixed simulation step, 60 updates per second
pub const FIXED_STEP_S: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Toggle the hovered star as a collection point
    ToggleCollection,
    /// Start starbase construction at the hovered star
    BuildStarbase,
    /// Show or hide the balance-of-power graph
    ToggleHistory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { pos: Vec2 },
    /// Pointer moved while the primary button was held
    PointerDragged { pos: Vec2 },
    Pressed(Button),
    Released(Button),
    Key(Key),
}

/// Contract between a game and the loop harness
pub trait Game {
    /// Called once before the first update
    fn setup(&mut self) {}

    /// Input delivered by the harness; implementations queue it and
    /// sample the queue at the start of their next update
    fn input(&mut self, event: InputEvent);

    /// One fixed-size simulation step
    fn update(&mut self, step_s: f32, frame_s: f32, elapsed_s: f32);

    /// Called once per frame after all due updates
    fn render(&mut self, frame_s: f32, elapsed_s: f32) {
        let _ = (frame_s, elapsed_s);
    }
}

/// Drive a game for `frames` frames of `frame_s` seconds each, with the
/// accumulator loop a windowed harness would use ("Fix Your Timestep").
pub fn run_headless<G: Game>(game: &mut G, frames: u32, frame_s: f32) {
    game.setup();
    let mut accumulator = 0.0f32;
    let mut elapsed = 0.0f32;
    for _ in 0..frames {
        elapsed += frame_s;
        accumulator += frame_s;
        while accumulator >= FIXED_STEP_S {
            game.update(FIXED_STEP_S, frame_s, elapsed);
            accumulator -= FIXED_STEP_S;
        }
        game.render(frame_s, elapsed);
    }
}
