//! Per-frame simulation update
//!
//! Stages run in a fixed order because later ones read what earlier ones
//! wrote in the same frame:
//! 1. inertia tilt
//! 2. fire input
//! 3. projectile aging and movement
//! 4. collisions and score
//! 5. target respawn cycle

use glam::{Quat, Vec3};

use super::state::{GameEvent, GameState, RemovalReason, SoundCue};
use super::target::TargetTransition;

/// World pose of a tracked device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub delta: f32,
    /// Seconds since the session started, as the render loop counts it.
    /// Informational only: `tick` advances its own clock (`GameState::time`)
    /// from `delta`, so respawn timing never depends on the host clock.
    pub elapsed: f64,
    /// Trigger went down this frame (edge, not level)
    pub trigger_pressed: bool,
    /// Blaster-holding controller, if tracked this frame
    pub controller: Option<Pose>,
    /// Head position, used as the tilt reference when no controller is tracked
    pub head: Vec3,
}

impl FrameInput {
    /// Position the inertia filters sample this frame
    pub fn reference_position(&self) -> Vec3 {
        self.controller.map(|c| c.position).unwrap_or(self.head)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    let dt = input.delta.max(0.0);
    state.frame += 1;
    state.time += dt as f64;

    update_inertia(state, input, dt);
    handle_fire(state, input);
    step_projectiles(state, dt);
    resolve_collisions(state);
    advance_targets(state, dt);
}

fn update_inertia(state: &mut GameState, input: &FrameInput, dt: f32) {
    let reference = input.reference_position();
    state.blaster.update(reference, dt);
    state.liquid.update(reference, dt);
}

fn handle_fire(state: &mut GameState, input: &FrameInput) {
    if !input.trigger_pressed {
        return;
    }
    let Some(muzzle) = input.controller else {
        return;
    };
    let Some(id) = state.projectiles.spawn(muzzle.position, muzzle.orientation) else {
        return;
    };

    state.stats.shots_fired += 1;
    state.push_event(GameEvent::ProjectileSpawned {
        id,
        position: muzzle.position,
        orientation: muzzle.orientation,
    });
    let haptic = state.tuning.haptic;
    state.push_event(GameEvent::Haptic {
        intensity: haptic.intensity,
        duration_ms: haptic.duration_ms,
    });
    state.push_event(GameEvent::Sound {
        cue: SoundCue::Fire,
        position: muzzle.position,
    });
}

fn step_projectiles(state: &mut GameState, dt: f32) {
    for id in state.projectiles.step(dt) {
        state.push_event(GameEvent::ProjectileRemoved {
            id,
            reason: RemovalReason::Expired,
        });
    }
}

fn resolve_collisions(state: &mut GameState) {
    let hits = state.projectiles.resolve_hits(&state.targets);

    for hit in hits {
        let target = &mut state.targets[hit.target];
        let target_id = target.id;
        let target_pos = target.position;
        let counted = target.hit();

        state.push_event(GameEvent::ProjectileRemoved {
            id: hit.projectile,
            reason: RemovalReason::Hit { target: target_id },
        });

        if !counted {
            state.stats.absorbed += 1;
            log::debug!("Target {} already going down, hit absorbed", target_id);
            continue;
        }

        state.score.add(state.tuning.score_per_hit);
        state.stats.hits += 1;
        log::debug!("Target {} hit, score {}", target_id, state.score.value());

        state.push_event(GameEvent::Sound {
            cue: SoundCue::Score,
            position: target_pos,
        });
        let text = state.score.render();
        state.push_event(GameEvent::ScoreChanged { text });
    }
}

fn advance_targets(state: &mut GameState, dt: f32) {
    let tuning = state.tuning.respawn;
    let mut transitions = Vec::new();

    for target in &mut state.targets {
        if let Some(transition) = target.advance(dt, &tuning, &mut state.rng) {
            transitions.push((transition, target.id, target.position));
        }
    }

    for (transition, target, position) in transitions {
        match transition {
            TargetTransition::Hidden => {
                state.push_event(GameEvent::TargetHidden { target, position })
            }
            TargetTransition::Shown => state.push_event(GameEvent::TargetShown { target, position }),
            TargetTransition::Settled => {}
        }
    }
}
