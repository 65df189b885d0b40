//! Sprite-sheet animation model.
//!
//! A sheet is a horizontal strip of N equal square frames (frame size =
//! sheet height). Sheets are sliced once at startup into an `Animation`,
//! and the resulting table is shared by every level: entities reference
//! animations by index, textures by `TextureId`. All timing is in
//! milliseconds, matching the simulation's dt units.
//!
//! Frame advancement is deliberately split from frame lookup: the entity
//! layer owns an explicit advance step, and `Frame` values returned to the
//! renderer are plain data (a possibly-mirrored source rectangle plus the
//! owning texture id).

use serde::Deserialize;

use crate::geom::Rect;

/// Upper bound on frames per sheet. Authoring-time invariant.
pub const MAX_ANIMATION_FRAMES: usize = 16;

/// Index into the session texture table. Simulation data never holds GPU
/// handles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Which kind of actor an entity (and its animation sheets) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Platform,
    WallLeft,
    WallRight,
    Portal,
    Trapdoor,
    Cat,
}

/// One frame of an animation: a sub-rectangle of the owning sheet texture.
///
/// A negative `source.w` encodes horizontal mirroring around the frame's
/// own left edge; the renderer folds it into swapped UVs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub source: Rect,
    /// Display duration in ms. 0 = hold this frame indefinitely.
    pub duration_ms: f32,
    pub texture: TextureId,
}

impl Frame {
    /// Horizontally mirrored copy. Involutive: mirroring twice restores
    /// the original source rectangle.
    pub fn mirrored(mut self) -> Self {
        self.source.w = -self.source.w;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub kind: EntityKind,
    pub texture: TextureId,
    pub frame_cnt: usize,
    /// Square frame size in pixels (= sheet height).
    pub frame_sz: u32,
    pub frames: Vec<Frame>,
}

impl Animation {
    /// Slice a horizontal strip sheet into frames. The sheet width must be
    /// an exact multiple of its height.
    pub fn from_sheet(
        kind: EntityKind,
        texture: TextureId,
        sheet_w: u32,
        sheet_h: u32,
        frame_duration_ms: f32,
    ) -> Result<Self, String> {
        if sheet_h == 0 {
            return Err("Sheet slicing failed: sheet height is 0".to_string());
        }
        if sheet_w % sheet_h != 0 {
            return Err(format!(
                "Sheet slicing failed: width {} is not a multiple of height {}",
                sheet_w, sheet_h
            ));
        }
        let frame_cnt = (sheet_w / sheet_h) as usize;
        if frame_cnt > MAX_ANIMATION_FRAMES {
            return Err(format!(
                "Sheet slicing failed: {} frames exceeds the cap of {}",
                frame_cnt, MAX_ANIMATION_FRAMES
            ));
        }

        let size = sheet_h as f32;
        let frames = (0..frame_cnt)
            .map(|i| Frame {
                source: Rect::new(size * i as f32, 0.0, size, size),
                duration_ms: frame_duration_ms,
                texture,
            })
            .collect();

        Ok(Self {
            kind,
            texture,
            frame_cnt,
            frame_sz: sheet_h,
            frames,
        })
    }
}
