//! Sound effects
//!
//! Loads one sound per cue at startup. Files that fail to load are remembered
//! as missing and their cues are logged instead of played, so the game runs
//! the same with or without an `assets/` folder.

use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};

/// Every sound cue the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    AttackMelee,
    AttackRanged,
    HitEnemy,
    PlayerHurt,
    EnemyDeath,
    Pickup,
}

impl Sfx {
    pub const ALL: [Sfx; 6] = [
        Sfx::AttackMelee,
        Sfx::AttackRanged,
        Sfx::HitEnemy,
        Sfx::PlayerHurt,
        Sfx::EnemyDeath,
        Sfx::Pickup,
    ];

    /// File name under the asset directory
    pub fn file_name(self) -> &'static str {
        match self {
            Sfx::AttackMelee => "sfx_whoosh.wav",
            Sfx::AttackRanged => "sfx_splat.wav",
            Sfx::HitEnemy => "sfx_hit.wav",
            Sfx::PlayerHurt => "sfx_oof.wav",
            Sfx::EnemyDeath => "sfx_explosion.wav",
            Sfx::Pickup => "sfx_pickup.wav",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Loaded sound bank
pub struct AudioSystem {
    sounds: [Option<Sound>; Sfx::ALL.len()],
    volume: f32,
}

impl AudioSystem {
    /// A bank with nothing loaded (every cue falls back to a log line)
    pub fn silent() -> Self {
        Self {
            sounds: Default::default(),
            volume: 1.0,
        }
    }

    /// Try to load every cue from `asset_dir`
    pub async fn load(asset_dir: &str, volume: f32) -> Self {
        let mut audio = Self::silent();
        audio.volume = volume.clamp(0.0, 1.0);

        for sfx in Sfx::ALL {
            let path = format!("{}/{}", asset_dir, sfx.file_name());
            match load_sound(&path).await {
                Ok(sound) => {
                    log::info!("loaded sfx {}", path);
                    audio.sounds[sfx.index()] = Some(sound);
                }
                Err(e) => {
                    log::debug!("sfx {} unavailable: {}", path, e);
                }
            }
        }
        audio
    }

    pub fn play(&self, sfx: Sfx) {
        match &self.sounds[sfx.index()] {
            Some(sound) => play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.volume,
                },
            ),
            None => log::debug!("play sfx {:?} (file missing)", sfx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<_> = Sfx::ALL.iter().map(|s| s.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Sfx::ALL.len());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, sfx) in Sfx::ALL.iter().enumerate() {
            assert_eq!(sfx.index(), i);
        }
    }
}
