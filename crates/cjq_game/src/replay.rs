//! Test-only input replays: JSON-described controller sequences used to
//! pin down simulation determinism. Replaying the same sequence from the
//! same starting state must reproduce bit-identical results.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cat::CatInput;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt_ms: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_left: bool,
    #[serde(default)]
    pub move_right: bool,
    #[serde(default)]
    pub jump_pressed: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<CatInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(CatInput {
                    move_left: frame.move_left,
                    move_right: frame.move_right,
                    jump_pressed: frame.jump_pressed,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt_ms <= 0.0 {
        return Err("Replay validation failed: fixed_dt_ms must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1000.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cat;
    use crate::game::{CatGame, GameState};
    use crate::level;
    use cjq_core::animation::{Animation, EntityKind, TextureId};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "cjq_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

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

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "move_right": true, "repeat": 3 },
                { "jump_pressed": true, "repeat": 1 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(replay.fixed_dt_ms, 1000.0 / 60.0);
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].move_right);
        assert!(expanded[3].jump_pressed);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty frames should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn controller_replay_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 30 },
                { "move_right": true, "repeat": 60 },
                { "move_right": true, "jump_pressed": true, "repeat": 1 },
                { "move_right": true, "repeat": 90 },
                { "move_left": true, "repeat": 45 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let inputs = replay.expanded_inputs();
        let animations = test_animations();

        let run = |inputs: &[crate::cat::CatInput]| {
            let mut level = level::level00(&animations);
            for &input in inputs {
                cat::update(&mut level, input, replay.fixed_dt_ms);
                let cat_idx = level.cat;
                level.entities[cat_idx].integrate(replay.fixed_dt_ms);
            }
            level.entities[level.cat]
        };

        let cat_a = run(&inputs);
        let cat_b = run(&inputs);

        // Bit-identical, not merely close: same inputs, same floats.
        assert_eq!(cat_a, cat_b);
    }

    #[test]
    fn full_game_replay_is_deterministic() {
        let animations = test_animations();
        let replay = ReplaySequence {
            fixed_dt_ms: 1000.0 / 60.0,
            frames: vec![
                ReplayFrame {
                    move_left: false,
                    move_right: false,
                    jump_pressed: true,
                    repeat: 1,
                },
                ReplayFrame {
                    move_left: false,
                    move_right: true,
                    jump_pressed: false,
                    repeat: 240,
                },
                ReplayFrame {
                    move_left: true,
                    move_right: false,
                    jump_pressed: false,
                    repeat: 60,
                },
            ],
        };
        let inputs = replay.expanded_inputs();

        let run = || {
            let mut game =
                CatGame::new(level::load_all(&animations), &animations).expect("levels validate");
            for &input in &inputs {
                game.step(replay.fixed_dt_ms, input, &animations);
            }
            game
        };

        let game_a = run();
        let game_b = run();

        assert_eq!(game_a.state, game_b.state);
        assert_eq!(game_a.level_at, game_b.level_at);
        assert_eq!(game_a.tint_alpha, game_b.tint_alpha);
        assert_eq!(
            game_a.levels[game_a.level_at], game_b.levels[game_b.level_at]
        );
        // The replay actually played: the game left the title screen.
        assert_ne!(game_a.state, GameState::TitleScreen);
    }
}
