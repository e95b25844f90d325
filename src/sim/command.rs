//! Player command translation
//!
//! Turns sampled pointer and key input into selection state and dispatch
//! or construction orders. All mutation of fleet state goes through
//! [`FleetBoard::dispatch`], so player orders obey the same slot policy
//! as AI and auto-dispatch orders.

use glam::Vec2;
use serde::Serialize;
use tracing::debug;

use crate::core::config::{MIN_DRAG_DISTANCE, PICK_RADIUS, STARS_PER_BASE};
use crate::core::types::{Faction, Owner, StarId};
use crate::sim::fleet::FleetBoard;
use crate::sim::starfield::StarField;

/// How many ships each selected star contributes to a move order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MoveFraction {
    #[default]
    All,
    Half,
    One,
}

impl MoveFraction {
    pub fn cycle(self) -> Self {
        match self {
            MoveFraction::All => MoveFraction::Half,
            MoveFraction::Half => MoveFraction::One,
            MoveFraction::One => MoveFraction::All,
        }
    }

    /// Ships to move out of `available` (Half rounds up)
    pub fn apply(self, available: u32) -> u32 {
        match self {
            MoveFraction::All => available,
            MoveFraction::Half => available.div_ceil(2),
            MoveFraction::One => 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerCommand {
    pub pointer: Vec2,
    /// Nearest star within the pick radius of the pointer
    pub hovered: Option<StarId>,
    pub move_fraction: MoveFraction,
    /// Anchor of an in-progress box selection
    drag_start: Option<Vec2>,
}

impl PlayerCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the hovered star from the current pointer position
    pub fn update_hover(&mut self, field: &StarField) {
        self.hovered = field
            .stars
            .iter()
            .enumerate()
            .map(|(i, star)| (i, star.pos.distance(self.pointer)))
            .filter(|&(_, dist)| dist < PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| StarId(i));
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Pointer moved with the primary button held; the first such event
    /// anchors the selection box
    pub fn pointer_dragged(&mut self, pos: Vec2) {
        if self.drag_start.is_none() {
            self.drag_start = Some(pos);
        }
        self.pointer = pos;
    }

    /// Active selection rectangle, if a drag is in progress
    pub fn drag_rect(&self) -> Option<(Vec2, Vec2)> {
        self.drag_start
            .map(|start| (start.min(self.pointer), start.max(self.pointer)))
    }

    /// Primary click: with a selection, order ships from every selected
    /// owned star toward the clicked star; without one, select the clicked
    /// player star. Clicking empty space clears the selection.
    pub fn primary_pressed(
        &mut self,
        field: &mut StarField,
        fleets: &mut FleetBoard,
        player: Faction,
    ) {
        let Some(target) = self.hovered else {
            field.deselect_all();
            return;
        };

        let mut any_selected = false;
        for s in 0..field.stars.len() {
            if s == target.0 || !field.stars[s].selected {
                continue;
            }
            any_selected = true;
            if field.stars[s].owner == Owner::Faction(player) && field.stars[s].ships > 0 {
                let ships = self.move_fraction.apply(field.stars[s].ships);
                fleets.dispatch(&mut field.stars, StarId(s), target, ships, player);
            }
            field.stars[s].selected = false;
        }

        if self.move_fraction == MoveFraction::All {
            field.deselect_all();
        }

        if !any_selected && field.stars[target.0].owner == Owner::Faction(player) {
            field.stars[target.0].selected = true;
        }
    }

    /// Primary release: complete a box selection if the drag covered at
    /// least the minimum distance. Short drags are clicks and change
    /// nothing here.
    pub fn primary_released(&mut self, field: &mut StarField, player: Faction) {
        let Some(start) = self.drag_start.take() else {
            return;
        };
        if start.distance(self.pointer) < MIN_DRAG_DISTANCE {
            return;
        }

        let min = start.min(self.pointer);
        let max = start.max(self.pointer);
        for star in &mut field.stars {
            star.selected = star.owner == Owner::Faction(player)
                && star.pos.x > min.x
                && star.pos.x < max.x
                && star.pos.y > min.y
                && star.pos.y < max.y;
        }
    }

    pub fn cycle_move_fraction(&mut self) {
        self.move_fraction = self.move_fraction.cycle();
    }

    /// Toggle the collection-point flag on the hovered star
    pub fn toggle_collection_point(&self, field: &mut StarField) {
        if let Some(StarId(s)) = self.hovered {
            field.stars[s].collection_point = !field.stars[s].collection_point;
        }
    }

    /// Start starbase construction on the hovered player star, if the
    /// base cap allows another. Construction restarts the star's
    /// production cycle from zero.
    pub fn request_starbase(&self, field: &mut StarField, player: Faction, player_bases: u32) {
        let Some(StarId(s)) = self.hovered else {
            return;
        };
        let max_bases = max_bases(field.count_by_faction()[player.idx()]);
        let star = &mut field.stars[s];
        if star.owner != Owner::Faction(player) || player_bases >= max_bases {
            return;
        }
        debug!(star = s, "starbase construction started");
        star.starbase = Some(0.0);
        star.production = 0.0;
    }
}

/// Starbase cap: one per STARS_PER_BASE owned stars, plus one for free
pub fn max_bases(owned_stars: u32) -> u32 {
    owned_stars / STARS_PER_BASE + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::starfield::Star;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn star_at(x: f32, y: f32, owner: Owner) -> Star {
        Star {
            pos: Vec2::new(x, y),
            owner,
            ships: 0,
            infrastructure: 0.0,
            production: 0.0,
            starbase: None,
            collection_point: false,
            selected: false,
            ai_timer: 0.0,
            orbit: 0.0,
            render_seed: 0,
        }
    }

    fn field() -> StarField {
        let player = Owner::Faction(Faction(0));
        let mut field = StarField::empty();
        field.stars = vec![
            star_at(100.0, 100.0, player),
            star_at(200.0, 100.0, player),
            star_at(300.0, 100.0, Owner::Neutral),
            star_at(150.0, 300.0, Owner::Faction(Faction(1))),
        ];
        field
    }

    fn fleets() -> FleetBoard {
        FleetBoard::new(&mut ChaCha8Rng::seed_from_u64(0))
    }

    #[test]
    fn move_fraction_cycles_and_rounds_half_up() {
        assert_eq!(MoveFraction::All.cycle(), MoveFraction::Half);
        assert_eq!(MoveFraction::Half.cycle(), MoveFraction::One);
        assert_eq!(MoveFraction::One.cycle(), MoveFraction::All);

        assert_eq!(MoveFraction::All.apply(7), 7);
        assert_eq!(MoveFraction::Half.apply(7), 4);
        assert_eq!(MoveFraction::Half.apply(8), 4);
        assert_eq!(MoveFraction::One.apply(7), 1);
    }

    #[test]
    fn hover_picks_the_nearest_star_within_radius() {
        let mut command = PlayerCommand::new();
        let field = field();

        command.pointer_moved(Vec2::new(104.0, 100.0));
        command.update_hover(&field);
        assert_eq!(command.hovered, Some(StarId(0)));

        command.pointer_moved(Vec2::new(500.0, 500.0));
        command.update_hover(&field);
        assert_eq!(command.hovered, None);
    }

    #[test]
    fn click_with_no_selection_selects_a_player_star() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        let mut fleets = fleets();

        command.pointer_moved(Vec2::new(100.0, 100.0));
        command.update_hover(&field);
        command.primary_pressed(&mut field, &mut fleets, Faction(0));
        assert!(field.stars[0].selected);

        // Clicking a foreign star with nothing selected does nothing
        field.deselect_all();
        command.pointer_moved(Vec2::new(150.0, 300.0));
        command.update_hover(&field);
        command.primary_pressed(&mut field, &mut fleets, Faction(0));
        assert!(field.stars.iter().all(|s| !s.selected));
    }

    #[test]
    fn click_with_selection_dispatches_and_clears() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        let mut fleets = fleets();
        field.stars[0].selected = true;
        field.stars[0].ships = 10;

        command.pointer_moved(Vec2::new(300.0, 100.0));
        command.update_hover(&field);
        command.primary_pressed(&mut field, &mut fleets, Faction(0));

        assert_eq!(field.stars[0].ships, 0);
        let fleet = fleets.active(Faction(0)).next().unwrap();
        assert_eq!(fleet.ships, 10);
        assert_eq!(fleet.dest, StarId(2));
        assert!(!field.stars[0].selected);
        // The clicked star is not auto-selected after a move order
        assert!(!field.stars[2].selected);
    }

    #[test]
    fn half_fraction_moves_ceiling_of_half() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        let mut fleets = fleets();
        field.stars[0].selected = true;
        field.stars[0].ships = 9;
        command.cycle_move_fraction(); // All -> Half

        command.pointer_moved(Vec2::new(300.0, 100.0));
        command.update_hover(&field);
        command.primary_pressed(&mut field, &mut fleets, Faction(0));

        assert_eq!(field.stars[0].ships, 4);
        assert_eq!(fleets.active(Faction(0)).next().unwrap().ships, 5);
        // Half mode keeps other selections; the dispatching star clears its own
        assert!(!field.stars[0].selected);
    }

    #[test]
    fn drag_below_threshold_is_not_a_selection() {
        let mut command = PlayerCommand::new();
        let mut field = field();

        command.pointer_dragged(Vec2::new(95.0, 95.0));
        command.pointer_dragged(Vec2::new(105.0, 105.0));
        command.primary_released(&mut field, Faction(0));
        assert!(field.stars.iter().all(|s| !s.selected));
    }

    #[test]
    fn drag_selects_only_player_stars_in_the_rectangle() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        field.stars[2].selected = true; // replaced by the new selection

        command.pointer_dragged(Vec2::new(50.0, 50.0));
        command.pointer_dragged(Vec2::new(250.0, 350.0));
        command.primary_released(&mut field, Faction(0));

        assert!(field.stars[0].selected);
        assert!(field.stars[1].selected);
        assert!(!field.stars[2].selected); // outside
        assert!(!field.stars[3].selected); // inside but enemy-owned
    }

    #[test]
    fn starbase_requests_respect_the_cap() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        command.pointer_moved(Vec2::new(100.0, 100.0));
        command.update_hover(&field);

        // 2 owned stars support floor(2/5) + 1 = 1 base
        assert_eq!(max_bases(2), 1);
        command.request_starbase(&mut field, Faction(0), 0);
        assert_eq!(field.stars[0].starbase, Some(0.0));

        command.pointer_moved(Vec2::new(200.0, 100.0));
        command.update_hover(&field);
        command.request_starbase(&mut field, Faction(0), 1);
        assert_eq!(field.stars[1].starbase, None);
    }

    #[test]
    fn collection_point_toggles_on_hover() {
        let mut command = PlayerCommand::new();
        let mut field = field();
        command.pointer_moved(Vec2::new(200.0, 100.0));
        command.update_hover(&field);

        command.toggle_collection_point(&mut field);
        assert!(field.stars[1].collection_point);
        command.toggle_collection_point(&mut field);
        assert!(!field.stars[1].collection_point);
    }
}
