//! The cat controller: input, physics and the 4-state animation machine.
//!
//! One call per fixed step. The exact order of operations is load-bearing:
//!
//!   1. fall-out check (below the kill line nothing else runs)
//!   2. horizontal intent — velocity snaps, no acceleration or friction
//!   3. collision pass over the level entities in array order; only the
//!      first platform hit resolves, walls and the portal are always
//!      evaluated, and a portal hit aborts the whole tick
//!   4. gravity (per tick, unbounded) or jump (only from a platform)
//!   5. animation state selection
//!
//! Anchor snaps applied here leave the collider rectangles stale until the
//! next integration pass; every test within the tick reads the collider as
//! it was when the tick began.

use cjq_core::animation::EntityKind;
use glam::Vec2;

use crate::collision::{collide_platform, collide_portal, collide_wall};
use crate::entity::{CatState, SPRITE_SCALE};
use crate::level::CatLevel;

pub const CAT_RUN_SPEED: f32 = 0.15 * SPRITE_SCALE;
pub const CAT_JUMP_SPEED: f32 = 0.29 * SPRITE_SCALE;
pub const CAT_FALL_ACCEL: f32 = 0.014 * SPRITE_SCALE;

/// Below this y the cat has left the level.
pub const FALL_OUT_Y: f32 = 2056.0;

/// Landing on a platform leaves the paws 1 unit inside the strip.
const PLATFORM_SNAP_INSET: f32 = 1.0;
/// Jumping nudges the anchor up so the same tick cannot re-land.
const JUMP_NUDGE: f32 = 2.0;
// The wall snap constants differ per side on purpose; the sprites are not
// horizontally symmetric and these keep the visual gap equal.
const WALL_LEFT_SNAP: f32 = 2.0;
const WALL_RIGHT_SNAP: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct CatInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Edge-triggered: true only on the tick the key went down.
    pub jump_pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatOutcome {
    Continue,
    /// The cat reached the portal.
    Exit,
    /// The cat fell out of the level.
    FellOut,
}

pub fn update(level: &mut CatLevel, input: CatInput, dt: f32) -> CatOutcome {
    let mut cat = level.entities[level.cat];

    if cat.anchor.y > FALL_OUT_Y {
        return CatOutcome::FellOut;
    }

    if input.move_right && !input.move_left {
        cat.facing_right = true;
        cat.velocity.x = CAT_RUN_SPEED;
    } else if input.move_left && !input.move_right {
        cat.facing_right = false;
        cat.velocity.x = -CAT_RUN_SPEED;
    } else {
        cat.velocity.x = 0.0;
    }

    let mut did_collide = false;
    for i in 0..level.entities.len() {
        let ent = level.entities[i];
        match ent.kind {
            // Only the first platform hit resolves this tick.
            EntityKind::Platform if !did_collide => {
                did_collide = collide_platform(cat.coll_rect, dt * cat.velocity.y, ent.coll_rect);
                if did_collide {
                    cat.velocity.y = 0.0;
                    cat.anchor.y = ent.anchor.y + PLATFORM_SNAP_INSET;
                }
            }
            EntityKind::WallLeft => {
                if collide_wall(cat.coll_rect, dt * cat.velocity.x, ent.kind, ent.coll_rect) {
                    cat.velocity.x = 0.0;
                    cat.anchor.x = ent.anchor.x + cat.coll_rect.w / 2.0 - WALL_LEFT_SNAP;
                }
            }
            EntityKind::WallRight => {
                if collide_wall(cat.coll_rect, dt * cat.velocity.x, ent.kind, ent.coll_rect) {
                    cat.velocity.x = 0.0;
                    cat.anchor.x = ent.anchor.x - cat.coll_rect.w / 2.0 - WALL_RIGHT_SNAP;
                }
            }
            EntityKind::Portal => {
                let delta = Vec2::new(dt * cat.velocity.x, dt * cat.velocity.y);
                if collide_portal(cat.coll_rect, delta, ent.coll_rect) {
                    level.entities[level.cat] = cat;
                    return CatOutcome::Exit;
                }
            }
            _ => {}
        }
    }

    if !did_collide {
        cat.velocity.y += CAT_FALL_ACCEL;
    } else if input.jump_pressed {
        // can only jump from a platform
        cat.velocity.y = -CAT_JUMP_SPEED;
        cat.anchor.y += -JUMP_NUDGE;
    }

    let set_state = if did_collide {
        if cat.velocity.x != 0.0 {
            CatState::Run
        } else {
            CatState::Idle
        }
    } else if cat.velocity.y <= 0.0 {
        CatState::Jump
    } else {
        CatState::Fall
    };

    if set_state != cat.state {
        cat.set_cat_state(set_state);
    } else if let Some(anim) = cat.anim.as_mut() {
        anim.elapsed_ms += dt;
    }

    level.entities[level.cat] = cat;
    CatOutcome::Continue
}
