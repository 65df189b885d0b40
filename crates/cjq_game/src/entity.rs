//! The entity model: one structural layout for every actor in a level.
//!
//! All variants (platforms, walls, portal, trapdoor, cat) share the same
//! kinematic and animation fields, dispatched on `EntityKind`; only the cat
//! has controller logic (see `cat`). The `anchor` is the authoritative world
//! position — `coll_rect` and `ani_rect` are derived from it once per
//! `integrate` call and must never be written directly.
//!
//! Animation state lives in an optional `SpriteAnim` binding into the shared
//! animation table: `base` is the first table index owned by this entity's
//! kind, `count` how many follow it, `index` the active one (for the cat
//! this is the state ordinal). Bindings are validated against the table at
//! game construction, so runtime lookups index without checks.

use cjq_core::animation::{Animation, EntityKind, Frame};
use cjq_core::geom::Rect;
use glam::Vec2;

/// All sprite art is authored at quarter size and drawn scaled up.
pub const SPRITE_SCALE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl CatState {
    /// One animation sheet per state, bound in this ordinal order.
    pub const COUNT: usize = 4;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAnim {
    pub base: usize,
    pub count: usize,
    pub index: usize,
    pub frame_idx: usize,
    pub elapsed_ms: f32,
}

impl SpriteAnim {
    /// Bind to the contiguous run of animations of `kind` in the shared
    /// table. Returns `None` when the table has no sheet for this kind.
    pub fn bind(kind: EntityKind, animations: &[Animation]) -> Option<Self> {
        let base = animations.iter().position(|a| a.kind == kind)?;
        let count = animations[base..]
            .iter()
            .take_while(|a| a.kind == kind)
            .count();
        Some(Self {
            base,
            count,
            index: 0,
            frame_idx: 0,
            elapsed_ms: 0.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub facing_right: bool,
    pub state: CatState,

    // kinematics
    pub anchor: Vec2,
    pub velocity: Vec2,
    pub coll_rect: Rect,
    pub coll_offset: Vec2,

    // animation
    pub ani_rect: Rect,
    pub ani_offset: Vec2,
    pub anim: Option<SpriteAnim>,
}

impl Entity {
    fn bare(kind: EntityKind) -> Self {
        Self {
            kind,
            facing_right: false,
            state: CatState::Idle,
            anchor: Vec2::ZERO,
            velocity: Vec2::ZERO,
            coll_rect: Rect::default(),
            coll_offset: Vec2::ZERO,
            ani_rect: Rect::default(),
            ani_offset: Vec2::ZERO,
            anim: None,
        }
    }

    pub fn platform(position: Vec2, width: f32) -> Self {
        let mut platform = Self::bare(EntityKind::Platform);
        platform.anchor = position;
        platform.coll_rect = Rect::new(0.0, 0.0, width, 2.0);
        platform.ani_rect = Rect::new(0.0, 0.0, width, 50.0);
        platform.refresh_rects();
        platform
    }

    pub fn wall(position: Vec2, height: f32, is_left: bool) -> Self {
        let kind = if is_left {
            EntityKind::WallLeft
        } else {
            EntityKind::WallRight
        };
        let mut wall = Self::bare(kind);
        wall.anchor = position;
        wall.coll_rect = Rect::new(0.0, 0.0, 2.0, height);
        wall.ani_rect = Rect::new(0.0, 0.0, 2.0, 50.0);
        wall.refresh_rects();
        wall
    }

    pub fn cat(frame_sz: u32, animations: &[Animation]) -> Self {
        let size = frame_sz as f32 * SPRITE_SCALE;
        let mut cat = Self::bare(EntityKind::Cat);
        cat.facing_right = true;
        cat.ani_offset = Vec2::new(-15.0 * SPRITE_SCALE, -29.0 * SPRITE_SCALE + 2.0);
        cat.ani_rect = Rect::new(0.0, 0.0, size, size);
        cat.coll_offset = Vec2::new(-4.0 * SPRITE_SCALE, -18.0 * SPRITE_SCALE);
        cat.coll_rect = Rect::new(0.0, 0.0, 10.0 * SPRITE_SCALE, 18.0 * SPRITE_SCALE);
        cat.anim = SpriteAnim::bind(EntityKind::Cat, animations);
        cat.refresh_rects();
        cat
    }

    pub fn portal(frame_sz: u32, animations: &[Animation]) -> Self {
        let size = frame_sz as f32 * SPRITE_SCALE;
        let mut portal = Self::bare(EntityKind::Portal);
        portal.coll_offset = Vec2::new(-2.0 + 0.5 * size, -4.0 + size);
        portal.coll_rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        portal.ani_rect = Rect::new(0.0, 0.0, size, size);
        portal.anim = SpriteAnim::bind(EntityKind::Portal, animations);
        portal.refresh_rects();
        portal
    }

    pub fn trapdoor(frame_sz: u32, animations: &[Animation]) -> Self {
        let size = frame_sz as f32 * SPRITE_SCALE;
        let mut trapdoor = Self::bare(EntityKind::Trapdoor);
        trapdoor.ani_rect = Rect::new(0.0, 0.0, size, size);
        trapdoor.anim = SpriteAnim::bind(EntityKind::Trapdoor, animations);
        trapdoor.refresh_rects();
        trapdoor
    }

    /// Explicit Euler step: advance the anchor by `velocity * dt` (ms), then
    /// refresh the derived rectangles. No bounds checks, no other side
    /// effects — replaying identical dt sequences is bit-identical.
    pub fn integrate(&mut self, dt: f32) {
        self.anchor.x += dt * self.velocity.x;
        self.anchor.y += dt * self.velocity.y;
        self.refresh_rects();
    }

    fn refresh_rects(&mut self) {
        self.ani_rect.set_origin(self.anchor + self.ani_offset);
        self.coll_rect.set_origin(self.anchor + self.coll_offset);
    }

    /// Switch the cat's animation state, restarting its clip from frame 0.
    /// Callers check for an actual state change first — re-setting the same
    /// state by value is their no-op, not ours.
    pub fn set_cat_state(&mut self, state: CatState) {
        self.state = state;
        if let Some(anim) = self.anim.as_mut() {
            anim.index = state as usize;
            anim.frame_idx = 0;
            anim.elapsed_ms = 0.0;
        }
    }

    /// Advance the bound animation by one frame if the accumulated elapsed
    /// time exceeds the current frame's duration. Duration 0 freezes the
    /// frame. The remainder is discarded on advance (elapsed resets to 0).
    pub fn advance_frame(&mut self, animations: &[Animation]) {
        let Some(anim) = self.anim.as_mut() else {
            return;
        };
        let ani = &animations[anim.base + anim.index];
        let frame = &ani.frames[anim.frame_idx];
        if frame.duration_ms == 0.0 {
            return;
        }
        if anim.elapsed_ms > frame.duration_ms {
            anim.elapsed_ms = 0.0;
            anim.frame_idx = (anim.frame_idx + 1) % ani.frame_cnt;
        }
    }

    /// Pure frame query: the current frame of the bound animation, mirrored
    /// when the entity faces left. `None` for entities without animation.
    pub fn current_frame(&self, animations: &[Animation]) -> Option<Frame> {
        let anim = self.anim.as_ref()?;
        let frame = animations[anim.base + anim.index].frames[anim.frame_idx];
        if self.facing_right {
            Some(frame)
        } else {
            Some(frame.mirrored())
        }
    }
}
