//! Axis-aware swept collision tests between the cat and level geometry.
//!
//! Instead of a general move-and-slide, each obstacle kind gets a test
//! specialized to the one direction it can block:
//!
//!  - **Platforms** are one-way floors: only downward motion collides. The
//!    swept rectangle spans the full fall distance appended *below* the
//!    current collider, so a fast fall cannot tunnel through within one
//!    tick. At rest (`delta_y == 0`) an exact overlap counts — this is what
//!    keeps a landed cat landed.
//!  - **Walls** block exactly one horizontal direction (a left wall blocks
//!    motion to the left, a right wall motion to the right). An existing
//!    interpenetration always counts; otherwise a swept strip covering the
//!    tick's horizontal travel is tested, and only when moving toward the
//!    blocking side.
//!  - **The portal** is a trigger, not a solid: the collider's projected
//!    next origin (a point) or a current overlap both fire it.
//!
//! All tests read the collider rectangles as they were at the start of the
//! tick; anchor snaps applied by the controller do not refresh them until
//! the next integration pass.

use cjq_core::animation::EntityKind;
use cjq_core::geom::Rect;
use glam::Vec2;

/// One-way platform test along the vertical motion delta.
pub fn collide_platform(cat_coll: Rect, delta_y: f32, platform: Rect) -> bool {
    if delta_y > 0.0 {
        let swept = Rect::new(cat_coll.x, cat_coll.y + cat_coll.h, cat_coll.w, delta_y);
        swept.overlaps(&platform)
    } else if delta_y < 0.0 {
        false
    } else {
        cat_coll.overlaps(&platform)
    }
}

/// Directional wall test. `wall_kind` must be `WallLeft` or `WallRight`;
/// any other kind never collides.
pub fn collide_wall(cat_coll: Rect, delta_x: f32, wall_kind: EntityKind, wall: Rect) -> bool {
    if cat_coll.overlaps(&wall) {
        return true;
    }
    if wall_kind == EntityKind::WallLeft && delta_x < 0.0 {
        let swept = Rect::new(cat_coll.x + delta_x, cat_coll.y, -delta_x, cat_coll.h);
        return swept.overlaps(&wall);
    }
    if wall_kind == EntityKind::WallRight && delta_x > 0.0 {
        let swept = Rect::new(cat_coll.x + cat_coll.w, cat_coll.y, delta_x, cat_coll.h);
        return swept.overlaps(&wall);
    }
    false
}

/// Portal trigger test: projected collider origin or current overlap.
pub fn collide_portal(cat_coll: Rect, delta: Vec2, portal: Rect) -> bool {
    let next = Vec2::new(cat_coll.x + delta.x, cat_coll.y + delta.y);
    portal.contains(next) || cat_coll.overlaps(&portal)
}
