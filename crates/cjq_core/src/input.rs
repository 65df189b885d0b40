//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the
//!   key is physically down. Used for continuous actions like movement.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only during the
//!   frame the transition happened. Cleared by `end_frame()`, which the main
//!   loop calls only after at least one fixed simulation step has consumed
//!   them. This prevents a jump press from being silently lost on a frame
//!   that has zero simulation steps.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Enter,
    Tab,
    Escape,
    F3,
    F10,
    W,
    A,
    D,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(input.is_just_pressed(Key::Space));
    }

    #[test]
    fn key_down_repeat_does_not_double_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        // OS key repeat delivers another down event while still held;
        // it must not re-arm the edge trigger.
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Left);
        assert!(!input.is_just_released(Key::Left));
        assert!(!input.is_held(Key::Left));
    }

    #[test]
    fn end_frame_clears_transients_keeps_held() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Space);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Left));
        assert!(!input.is_just_pressed(Key::Space));
        assert!(input.is_held(Key::Left));
        assert!(input.is_held(Key::Space));
    }

    #[test]
    fn multiple_keys_are_independent() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Right);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_just_released(Key::Left));
        assert!(input.is_held(Key::Right));
        assert!(!input.is_just_released(Key::Right));
    }
}
