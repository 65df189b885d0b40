//! Session orchestration: the title/game/transition/end state machine.
//!
//! `CatGame` owns the level list and all session state and is driven by
//! one `step` call per fixed simulation step — it never touches the
//! window, GPU or input devices, so the whole state machine runs headless
//! in tests. The main loop feeds it sampled input and renders whatever
//! state it left behind.
//!
//! Level changes always go through a timed transition: the outgoing level
//! fades to black (`tint_alpha` 255 -> 0), the pending index is committed
//! once the timer expires, and the incoming level fades back in
//! (0 -> 255). The tint is purely cosmetic and never affects simulation.

use cjq_core::animation::Animation;
use glam::Vec2;

use crate::cat::{self, CatInput, CatOutcome};
use crate::level::{grid_anchor, CatLevel};

pub const TRANSITION_TIME_MS: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    TitleScreen,
    EndScreen,
    Game,
    Transition,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            Self::TitleScreen => "title",
            Self::EndScreen => "end",
            Self::Game => "game",
            Self::Transition => "transition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The player dismissed the end screen; the process should exit.
    ExitApp,
}

pub struct CatGame {
    pub state: GameState,
    pub level_at: usize,
    /// Pending level during a transition. `None` means "past the last
    /// level" — committing it shows the end screen.
    pub level_next: Option<usize>,
    pub levels: Vec<CatLevel>,
    pub dbg_draw: bool,
    /// Global fade alpha, 0..=255. Applied to every draw call.
    pub tint_alpha: f32,
    pub transition_elapsed: f32,
    pub transition_time: f32,
}

impl CatGame {
    /// Validates every level against the animation table up front; after
    /// this, animation lookups during play index without checks.
    pub fn new(levels: Vec<CatLevel>, animations: &[Animation]) -> Result<Self, String> {
        if levels.is_empty() {
            return Err("CatGame needs at least one level".to_string());
        }
        for level in &levels {
            level.validate(animations)?;
        }

        let mut game = Self {
            state: GameState::TitleScreen,
            level_at: 0,
            level_next: None,
            levels,
            dbg_draw: false,
            tint_alpha: 255.0,
            transition_elapsed: 0.0,
            transition_time: TRANSITION_TIME_MS,
        };
        game.set_level(Some(0));
        game.state = GameState::TitleScreen;
        Ok(game)
    }

    pub fn level(&self) -> &CatLevel {
        &self.levels[self.level_at]
    }

    /// Queue a transition. An index one past the last level becomes the
    /// end-screen sentinel; anything else wraps into range.
    pub fn set_transition(&mut self, to_level: usize) {
        if to_level == self.levels.len() {
            self.level_next = None;
        } else {
            self.level_next = Some(to_level % self.levels.len());
        }
        self.transition_elapsed = 0.0;
        self.state = GameState::Transition;
        log::info!("Transition -> {:?}", self.level_next);
    }

    pub fn set_transition_to_next(&mut self) {
        self.set_transition(self.level_at + 1);
    }

    /// Commit a level as active, or show the end screen for the sentinel.
    /// Activation resets the cat to the spawn cell, zeroes its velocity
    /// and runs one zero-dt integration pass so the derived rectangles are
    /// fresh before the first drawn frame.
    pub fn set_level(&mut self, to_level: Option<usize>) {
        match to_level {
            None => {
                self.state = GameState::EndScreen;
                log::info!("End screen");
            }
            Some(to) => {
                assert!(to < self.levels.len());

                self.level_at = to;
                let level = &mut self.levels[to];
                let cat = &mut level.entities[level.cat];
                cat.anchor = grid_anchor(0.5, 1.0);
                cat.velocity = Vec2::ZERO;

                self.integrate(0.0);
                log::info!("Level {} ({})", self.level_at, self.level().name);
            }
        }
    }

    /// Kinematic integration pass over the active level.
    pub fn integrate(&mut self, dt: f32) {
        let level = &mut self.levels[self.level_at];
        for ent in &mut level.entities {
            ent.integrate(dt);
        }
    }

    fn advance_frames(&mut self, animations: &[Animation]) {
        let level = &mut self.levels[self.level_at];
        for ent in &mut level.entities {
            ent.advance_frame(animations);
        }
    }

    /// One fixed simulation step.
    pub fn step(&mut self, dt: f32, input: CatInput, animations: &[Animation]) -> StepOutcome {
        match self.state {
            GameState::TitleScreen => {
                if input.jump_pressed {
                    self.state = GameState::Game;
                    log::info!("Game started");
                }
            }

            GameState::EndScreen => {
                if input.jump_pressed {
                    return StepOutcome::ExitApp;
                }
            }

            GameState::Game => {
                // fade in
                if self.transition_elapsed < self.transition_time {
                    self.tint_alpha = self.transition_elapsed / self.transition_time * 255.0;
                    self.transition_elapsed += dt;
                } else {
                    self.tint_alpha = 255.0;
                }

                match cat::update(&mut self.levels[self.level_at], input, dt) {
                    CatOutcome::Exit => {
                        self.set_transition_to_next();
                    }
                    CatOutcome::FellOut => {
                        let to = if self.level_at > 0 { self.level_at - 1 } else { 0 };
                        self.set_transition(to);
                    }
                    CatOutcome::Continue => {
                        self.integrate(dt);
                        self.advance_frames(animations);
                    }
                }
            }

            GameState::Transition => {
                if self.transition_elapsed >= self.transition_time {
                    self.state = GameState::Game;
                    self.transition_elapsed = 0.0;
                    self.set_level(self.level_next);
                } else {
                    self.transition_elapsed += dt;
                    self.tint_alpha = ((self.transition_time - self.transition_elapsed)
                        / self.transition_time
                        * 255.0)
                        .max(0.0);
                }
            }
        }

        StepOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SPRITE_SCALE;
    use crate::level;
    use cjq_core::animation::{Animation, EntityKind, TextureId};
    use cjq_core::time::FIXED_DT_MS;

    fn test_animations() -> Vec<Animation> {
        let mut animations = Vec::new();
        for i in 0..4 {
            animations.push(
                Animation::from_sheet(EntityKind::Cat, TextureId(i), 96, 32, 100.0).unwrap(),
            );
        }
        animations
            .push(Animation::from_sheet(EntityKind::Portal, TextureId(4), 64, 32, 100.0).unwrap());
        animations.push(
            Animation::from_sheet(EntityKind::Trapdoor, TextureId(5), 32, 32, 100.0).unwrap(),
        );
        animations
    }

    fn new_game(animations: &[Animation]) -> CatGame {
        CatGame::new(level::load_all(animations), animations).expect("levels validate")
    }

    const JUMP: CatInput = CatInput {
        move_left: false,
        move_right: false,
        jump_pressed: true,
    };

    #[test]
    fn starts_on_title_with_fresh_level_zero() {
        let animations = test_animations();
        let game = new_game(&animations);
        assert_eq!(game.state, GameState::TitleScreen);
        assert_eq!(game.level_at, 0);

        // Activation already ran a zero-dt pass: derived rects are fresh.
        let cat = game.level().cat();
        assert_eq!(cat.anchor, grid_anchor(0.5, 1.0));
        assert_eq!(cat.coll_rect.origin(), cat.anchor + cat.coll_offset);
    }

    #[test]
    fn title_advances_to_game_on_jump_press() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.state, GameState::TitleScreen);
        game.step(FIXED_DT_MS, JUMP, &animations);
        assert_eq!(game.state, GameState::Game);
    }

    #[test]
    fn expired_transition_commits_pending_level() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        game.set_transition(1);
        game.transition_elapsed = game.transition_time;

        game.step(FIXED_DT_MS, CatInput::default(), &animations);

        assert_eq!(game.state, GameState::Game);
        assert_eq!(game.level_at, 1);
        assert_eq!(game.transition_elapsed, 0.0);
        // Cat reset to the spawn cell.
        assert_eq!(game.level().cat().anchor, grid_anchor(0.5, 1.0));
    }

    #[test]
    fn expired_transition_with_sentinel_ends_the_game() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        let past_last = game.levels.len();
        game.set_transition(past_last);
        assert_eq!(game.level_next, None);
        game.transition_elapsed = game.transition_time;

        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.state, GameState::EndScreen);

        let outcome = game.step(FIXED_DT_MS, JUMP, &animations);
        assert_eq!(outcome, StepOutcome::ExitApp);
    }

    #[test]
    fn fall_out_retreats_one_level_clamped_at_zero() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        game.set_transition(2);
        game.transition_elapsed = game.transition_time;
        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.level_at, 2);

        // Drop the cat below the kill line.
        {
            let level = &mut game.levels[2];
            let cat_idx = level.cat;
            level.entities[cat_idx].anchor.y = 2057.0;
        }
        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.state, GameState::Transition);
        assert_eq!(game.level_next, Some(1));

        // From level 0 a fall-out goes back to level 0.
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        {
            let level = &mut game.levels[0];
            let cat_idx = level.cat;
            level.entities[cat_idx].anchor.y = 2057.0;
        }
        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.level_next, Some(0));
    }

    #[test]
    fn fade_in_ramps_alpha_up_then_saturates() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        game.transition_elapsed = 0.0;

        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.tint_alpha, 0.0);

        let mut last = -1.0;
        for _ in 0..30 {
            game.step(FIXED_DT_MS, CatInput::default(), &animations);
            assert!(game.tint_alpha >= last);
            last = game.tint_alpha;
        }
        assert_eq!(game.tint_alpha, 255.0);
    }

    #[test]
    fn fade_out_ramps_alpha_down_during_transition() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        game.set_transition_to_next();
        assert_eq!(game.level_next, Some(1));

        let mut last = 256.0;
        while game.state == GameState::Transition {
            game.step(FIXED_DT_MS, CatInput::default(), &animations);
            assert!(game.tint_alpha <= last);
            assert!(game.tint_alpha >= 0.0);
            last = game.tint_alpha;
        }
        assert_eq!(game.state, GameState::Game);
        assert_eq!(game.level_at, 1);
    }

    #[test]
    fn portal_contact_during_play_queues_the_next_level() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;

        // Teleport the cat onto level 0's portal trigger.
        {
            let level = &mut game.levels[0];
            let portal_coll = level.entities[level.portal].coll_rect;
            let cat_idx = level.cat;
            let cat = &mut level.entities[cat_idx];
            cat.anchor = glam::Vec2::new(portal_coll.x, portal_coll.y + 40.0);
            cat.integrate(0.0);
        }

        game.step(FIXED_DT_MS, CatInput::default(), &animations);
        assert_eq!(game.state, GameState::Transition);
        assert_eq!(game.level_next, Some(1));
    }

    #[test]
    fn game_step_runs_gravity_and_integration() {
        let animations = test_animations();
        let mut game = new_game(&animations);
        game.state = GameState::Game;
        let spawn_y = game.level().cat().anchor.y;

        game.step(FIXED_DT_MS, CatInput::default(), &animations);

        let cat = game.level().cat();
        assert!(cat.velocity.y > 0.0, "airborne cat accelerates downward");
        assert!(cat.anchor.y > spawn_y, "integration moved the cat");
        assert_eq!(cat.coll_rect.origin(), cat.anchor + cat.coll_offset);
    }

    #[test]
    fn spawn_cell_matches_grid_anchor_half_one() {
        assert_eq!(
            grid_anchor(0.5, 1.0),
            glam::Vec2::new(16.0 * SPRITE_SCALE, 32.0 * SPRITE_SCALE)
        );
    }
}
