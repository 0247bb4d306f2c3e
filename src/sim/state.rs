//! Game state and core simulation types
//!
//! Everything one frame reads or writes lives in [`GameState`]; there is no
//! global state. Presentation side effects leave the simulation as
//! [`GameEvent`]s.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::inertia::{SpringTiltFilter, TiltFilter};
use super::projectile::{ProjectileId, ProjectileManager};
use super::score::Score;
use super::target::Target;
use crate::tuning::Tuning;

/// The two sound cues the gallery plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Blaster shot
    Fire,
    /// Target hit, played at the target
    Score,
}

/// Why a projectile left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RemovalReason {
    Expired,
    Hit { target: u32 },
}

/// Side effects for the rendering/XR layer, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GameEvent {
    ProjectileSpawned {
        id: ProjectileId,
        position: Vec3,
        orientation: Quat,
    },
    ProjectileRemoved {
        id: ProjectileId,
        reason: RemovalReason,
    },
    Haptic {
        intensity: f32,
        duration_ms: f32,
    },
    Sound {
        cue: SoundCue,
        position: Vec3,
    },
    TargetHidden {
        target: u32,
        position: Vec3,
    },
    TargetShown {
        target: u32,
        position: Vec3,
    },
    ScoreChanged {
        text: String,
    },
}

/// Shot accounting for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub shots_fired: u32,
    pub hits: u32,
    /// Projectiles spent on a target that was already going down
    pub absorbed: u32,
}

impl SessionStats {
    /// Scoring hits per shot, 0 before the first shot
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.hits as f32 / self.shots_fired as f32
        }
    }
}

/// Complete simulation context, passed to every [`super::tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible respawn placement
    pub seed: u64,
    pub tuning: Tuning,
    /// Blaster tilt (low-pass)
    pub blaster: TiltFilter,
    /// Liquid sphere tilt (spring)
    pub liquid: SpringTiltFilter,
    pub projectiles: ProjectileManager,
    /// Targets in insertion order; index doubles as target id
    pub targets: Vec<Target>,
    pub score: Score,
    pub stats: SessionStats,
    /// When off, tilt accessors report rest while the filters keep tracking
    pub motion_effects: bool,
    /// Simulation clock (seconds)
    pub time: f64,
    pub frame: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            blaster: TiltFilter::new(tuning.blaster),
            liquid: SpringTiltFilter::new(tuning.liquid),
            projectiles: ProjectileManager::new(tuning.projectile),
            tuning,
            targets: Vec::new(),
            score: Score::new(),
            stats: SessionStats::default(),
            motion_effects: true,
            time: 0.0,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Place a target; returns its id
    pub fn add_target(&mut self, position: Vec3) -> u32 {
        let id = self.targets.len() as u32;
        self.targets.push(Target::new(id, position));
        id
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        self.targets.get(id as usize)
    }

    /// Mark the projectile visual as loaded (or unloaded)
    pub fn set_assets_ready(&mut self, ready: bool) {
        self.projectiles.set_template_ready(ready);
    }

    pub fn blaster_tilt(&self) -> Vec3 {
        if self.motion_effects {
            self.blaster.tilt()
        } else {
            Vec3::ZERO
        }
    }

    pub fn liquid_tilt(&self) -> Vec3 {
        if self.motion_effects {
            self.liquid.tilt()
        } else {
            Vec3::ZERO
        }
    }

    pub fn score_text(&self) -> String {
        self.score.render()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_keep_insertion_ids() {
        let mut state = GameState::new(1);
        assert_eq!(state.add_target(Vec3::new(0.0, 1.0, -6.0)), 0);
        assert_eq!(state.add_target(Vec3::new(2.0, 1.0, -8.0)), 1);
        assert_eq!(state.target(1).unwrap().position.x, 2.0);
        assert!(state.target(2).is_none());
    }

    #[test]
    fn test_accuracy() {
        let stats = SessionStats::default();
        assert_eq!(stats.accuracy(), 0.0);
        let stats = SessionStats {
            shots_fired: 4,
            hits: 3,
            absorbed: 0,
        };
        assert_eq!(stats.accuracy(), 0.75);
    }

    #[test]
    fn test_motion_effects_off_reports_rest() {
        let mut state = GameState::new(1);
        state.blaster.update(Vec3::ZERO, 1.0 / 60.0);
        state.blaster.update(Vec3::new(0.05, 0.0, 0.0), 1.0 / 60.0);
        assert_ne!(state.blaster_tilt(), Vec3::ZERO);

        state.motion_effects = false;
        assert_eq!(state.blaster_tilt(), Vec3::ZERO);
        assert_ne!(state.blaster.tilt(), Vec3::ZERO);
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::ProjectileRemoved {
            id: ProjectileId {
                index: 3,
                generation: 1,
            },
            reason: RemovalReason::Hit { target: 2 },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "projectile_removed");
        assert_eq!(json["reason"]["kind"], "hit");
        assert_eq!(json["reason"]["target"], 2);
        assert_eq!(json["id"]["index"], 3);
    }
}
