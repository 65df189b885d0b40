//! Hand-authored level layouts on a fixed column grid.
//!
//! The play space is a single 896-unit-wide column fenced by two tall
//! walls; platforms snap to a 128-unit grid (fractional grid coordinates
//! are allowed). Every level carries the same default trio — cat, portal
//! (exit), trapdoor (entry) — referenced by index into the entity array,
//! plus its platforms. Construction is pure given the animation table:
//! loading the same level twice yields structurally identical arrays.

use cjq_core::animation::{Animation, EntityKind};
use glam::Vec2;

use crate::entity::{CatState, Entity, SPRITE_SCALE};

pub const COL_WIDTH: f32 = 896.0;
pub const GRID_W: f32 = 32.0 * SPRITE_SCALE;
pub const GRID_H: f32 = 32.0 * SPRITE_SCALE;
/// COL_WIDTH / GRID_W
pub const GRID_COLS: f32 = 7.0;

/// Entity cap per level; authoring-time invariant enforced by `validate`.
pub const MAX_LEVEL_ENTITIES: usize = 64;

pub fn grid_anchor(x: f32, y: f32) -> Vec2 {
    Vec2::new(x * GRID_W, y * GRID_H)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatLevel {
    pub name: &'static str,
    pub entities: Vec<Entity>,
    /// Indices of the distinguished entities within `entities`. Stable for
    /// the level's lifetime — the array is append-only after construction.
    pub cat: usize,
    pub portal: usize,
    pub trapdoor: usize,
}

impl CatLevel {
    /// A level pre-populated with the default trio and the column walls.
    fn with_defaults(name: &'static str, animations: &[Animation]) -> Self {
        let frame_sz = animations
            .iter()
            .find(|a| a.kind == EntityKind::Cat)
            .map(|a| a.frame_sz)
            .unwrap_or(0);

        let mut entities = Vec::new();
        entities.push(Entity::cat(frame_sz, animations));
        entities.push(Entity::portal(frame_sz, animations));
        entities.push(Entity::trapdoor(frame_sz, animations));
        entities.push(Entity::wall(Vec2::new(0.0, -1024.0), 4056.0, true));
        entities.push(Entity::wall(Vec2::new(COL_WIDTH, -1024.0), 4056.0, false));

        Self {
            name,
            entities,
            cat: 0,
            portal: 1,
            trapdoor: 2,
        }
    }

    fn add_platform(&mut self, grid_x: f32, grid_y: f32, width: f32) {
        self.entities
            .push(Entity::platform(grid_anchor(grid_x, grid_y), width));
    }

    fn place_portal(&mut self, grid_x: f32, grid_y: f32) {
        let anchor = grid_anchor(grid_x, grid_y);
        let portal = &mut self.entities[self.portal];
        portal.anchor = anchor;
        portal.integrate(0.0);
    }

    fn place_trapdoor(&mut self, grid_x: f32, grid_y: f32) {
        let anchor = grid_anchor(grid_x, grid_y);
        let trapdoor = &mut self.entities[self.trapdoor];
        trapdoor.anchor = anchor;
        trapdoor.integrate(0.0);
    }

    pub fn cat(&self) -> &Entity {
        &self.entities[self.cat]
    }

    /// Load-time invariant checks. Everything here is an authoring error,
    /// not a runtime condition: once a level set validates, animation
    /// lookups index the shared table without further checks.
    pub fn validate(&self, animations: &[Animation]) -> Result<(), String> {
        if self.entities.len() > MAX_LEVEL_ENTITIES {
            return Err(format!(
                "Level '{}' invalid: {} entities exceeds the cap of {}",
                self.name,
                self.entities.len(),
                MAX_LEVEL_ENTITIES
            ));
        }

        for (idx, expected) in [
            (self.cat, EntityKind::Cat),
            (self.portal, EntityKind::Portal),
            (self.trapdoor, EntityKind::Trapdoor),
        ] {
            let Some(ent) = self.entities.get(idx) else {
                return Err(format!(
                    "Level '{}' invalid: {:?} index {} out of range",
                    self.name, expected, idx
                ));
            };
            if ent.kind != expected {
                return Err(format!(
                    "Level '{}' invalid: entity {} is {:?}, expected {:?}",
                    self.name, idx, ent.kind, expected
                ));
            }
            match ent.anim {
                None => {
                    return Err(format!(
                        "Level '{}' invalid: {:?} has no animation sheet in the table",
                        self.name, expected
                    ));
                }
                Some(anim) if expected == EntityKind::Cat && anim.count != CatState::COUNT => {
                    return Err(format!(
                        "Level '{}' invalid: cat needs {} animation sheets, table has {}",
                        self.name,
                        CatState::COUNT,
                        anim.count
                    ));
                }
                Some(_) => {}
            }
        }

        for (i, ent) in self.entities.iter().enumerate() {
            let Some(anim) = ent.anim else {
                continue;
            };
            if anim.count == 0 || anim.base + anim.count > animations.len() {
                return Err(format!(
                    "Level '{}' invalid: entity {} animation run {}..{} out of table bounds ({})",
                    self.name,
                    i,
                    anim.base,
                    anim.base + anim.count,
                    animations.len()
                ));
            }
            if anim.index >= anim.count {
                return Err(format!(
                    "Level '{}' invalid: entity {} animation index {} out of its run of {}",
                    self.name, i, anim.index, anim.count
                ));
            }
            for ani in &animations[anim.base..anim.base + anim.count] {
                if ani.kind != ent.kind {
                    return Err(format!(
                        "Level '{}' invalid: entity {} ({:?}) bound to a {:?} sheet",
                        self.name, i, ent.kind, ani.kind
                    ));
                }
            }
        }

        Ok(())
    }
}

pub fn level00(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("landing", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(GRID_COLS - 1.0, 2.0);

    level.add_platform(0.0, 3.0, GRID_COLS * GRID_W);
    level
}

pub fn level01(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("gap", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(GRID_COLS - 1.0, 2.0);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(4.5, 3.0, GRID_W * 2.5);
    level
}

pub fn level02(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("two floors", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(GRID_COLS - 1.0, 5.0);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(4.5, 3.0, GRID_W * 2.5);
    level.add_platform(0.0, 6.0, GRID_W * 2.5);
    level.add_platform(4.5, 6.0, GRID_W * 2.5);
    level
}

pub fn level03(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("backtrack", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(0.0, 4.0);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(0.0, 5.0, GRID_W * 2.5);
    level.add_platform(4.5, 2.0, GRID_W * 2.5);
    level.add_platform(4.0, 6.5, GRID_W * 0.75);
    level
}

pub fn level04(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("switchback", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(2.0, 5.0);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(4.5, 4.5, GRID_W * 2.5);
    level.add_platform(1.5, 6.0, GRID_W * 2.0);
    level
}

pub fn level05(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("ledges", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(3.0, 5.5);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(3.0, 4.0, GRID_W * 0.75);
    level.add_platform(5.5, 5.0, GRID_W * 0.75);
    level.add_platform(3.0, 6.5, GRID_W * 0.75);
    level
}

pub fn level06(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("chimney", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(5.5, 2.0);

    // Inner wall forces a descent under it before climbing back up right.
    level
        .entities
        .push(Entity::wall(grid_anchor(3.5, 1.0), GRID_H * 3.5, false));

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(4.5, 3.0, GRID_W * 2.5);
    level.add_platform(0.0, 5.5, GRID_W * 3.0);
    level.add_platform(3.5, 5.5, GRID_W * 3.0);
    level.add_platform(5.5, 4.25, GRID_W * 1.5);
    level
}

pub fn level07(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("descent", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(0.5, 8.0);

    level.add_platform(0.0, 3.0, GRID_W * 1.5);
    level.add_platform(3.0, 4.5, GRID_W * 1.5);
    level.add_platform(0.0, 6.0, GRID_W * 1.5);
    level.add_platform(3.0, 7.5, GRID_W * 1.5);
    level.add_platform(0.0, 9.0, GRID_W * 2.0);
    level
}

pub fn level08(animations: &[Animation]) -> CatLevel {
    let mut level = CatLevel::with_defaults("summit", animations);
    level.place_trapdoor(0.0, 0.0);
    level.place_portal(2.75, 0.75);

    level.add_platform(0.0, 3.0, GRID_W * 2.5);
    level.add_platform(4.5, 3.0, GRID_W * 2.5);
    level.add_platform(2.25, 1.75, GRID_W * 1.5);
    level
}

/// Every level, in play order.
pub fn load_all(animations: &[Animation]) -> Vec<CatLevel> {
    vec![
        level00(animations),
        level01(animations),
        level02(animations),
        level03(animations),
        level04(animations),
        level05(animations),
        level06(animations),
        level07(animations),
        level08(animations),
    ]
}
