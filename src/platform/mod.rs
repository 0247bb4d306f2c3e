//! Platform abstraction layer
//!
//! The simulation never touches the scene graph, audio or XR devices
//! directly. After each frame the host drains the `GameEvent`s and hands them
//! to [`dispatch`] together with its [`Presenter`].

use glam::{Quat, Vec3};

use crate::settings::Settings;
use crate::sim::{GameEvent, ProjectileId, SoundCue};

/// Rumble motor on an input device
pub trait HapticActuator {
    /// Capability query; checked before every pulse
    fn supports_haptics(&self) -> bool;
    fn pulse(&mut self, intensity: f32, duration_ms: f32);
}

/// Rendering/XR side of the gallery
pub trait Presenter {
    /// Clone the projectile template into the scene
    fn spawn_projectile(&mut self, id: ProjectileId, position: Vec3, orientation: Quat);
    /// Detach a projectile visual
    fn remove_projectile(&mut self, id: ProjectileId);
    fn play_cue(&mut self, cue: SoundCue, position: Vec3);
    fn set_target_visible(&mut self, target: u32, visible: bool, position: Vec3);
    fn set_score_text(&mut self, text: &str);
    /// Actuator of the blaster-holding controller, if any
    fn haptics(&mut self) -> Option<&mut dyn HapticActuator>;
}

/// Apply one frame's events to the presentation layer
pub fn dispatch<P: Presenter + ?Sized>(events: &[GameEvent], presenter: &mut P, settings: &Settings) {
    for event in events {
        match event {
            GameEvent::ProjectileSpawned {
                id,
                position,
                orientation,
            } => presenter.spawn_projectile(*id, *position, *orientation),
            GameEvent::ProjectileRemoved { id, .. } => presenter.remove_projectile(*id),
            GameEvent::Haptic {
                intensity,
                duration_ms,
            } => {
                let Some(intensity) = settings.effective_haptic_intensity(*intensity) else {
                    continue;
                };
                match presenter.haptics() {
                    Some(actuator) if actuator.supports_haptics() => {
                        actuator.pulse(intensity, *duration_ms)
                    }
                    _ => log::trace!("No haptic actuator, pulse skipped"),
                }
            }
            GameEvent::Sound { cue, position } => presenter.play_cue(*cue, *position),
            GameEvent::TargetHidden { target, position } => {
                presenter.set_target_visible(*target, false, *position)
            }
            GameEvent::TargetShown { target, position } => {
                presenter.set_target_visible(*target, true, *position)
            }
            GameEvent::ScoreChanged { text } => presenter.set_score_text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, GameState, Pose, tick};

    #[derive(Default)]
    struct Rumble {
        supported: bool,
        pulses: Vec<(f32, f32)>,
    }

    impl HapticActuator for Rumble {
        fn supports_haptics(&self) -> bool {
            self.supported
        }

        fn pulse(&mut self, intensity: f32, duration_ms: f32) {
            self.pulses.push((intensity, duration_ms));
        }
    }

    #[derive(Default)]
    struct Scene {
        projectiles: Vec<ProjectileId>,
        cues: Vec<SoundCue>,
        score_text: String,
        rumble: Option<Rumble>,
    }

    impl Presenter for Scene {
        fn spawn_projectile(&mut self, id: ProjectileId, _: Vec3, _: Quat) {
            self.projectiles.push(id);
        }

        fn remove_projectile(&mut self, id: ProjectileId) {
            self.projectiles.retain(|p| *p != id);
        }

        fn play_cue(&mut self, cue: SoundCue, _: Vec3) {
            self.cues.push(cue);
        }

        fn set_target_visible(&mut self, _: u32, _: bool, _: Vec3) {}

        fn set_score_text(&mut self, text: &str) {
            self.score_text = text.to_string();
        }

        fn haptics(&mut self) -> Option<&mut dyn HapticActuator> {
            self.rumble.as_mut().map(|r| r as &mut dyn HapticActuator)
        }
    }

    fn fire_once() -> Vec<GameEvent> {
        let mut state = GameState::new(3);
        state.set_assets_ready(true);
        let input = FrameInput {
            delta: 1.0 / 60.0,
            trigger_pressed: true,
            controller: Some(Pose::default()),
            ..Default::default()
        };
        tick(&mut state, &input);
        state.drain_events()
    }

    #[test]
    fn test_pulse_when_supported() {
        let mut scene = Scene {
            rumble: Some(Rumble {
                supported: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        dispatch(&fire_once(), &mut scene, &Settings::default());

        assert_eq!(scene.projectiles.len(), 1);
        assert_eq!(scene.cues, vec![SoundCue::Fire]);
        let pulses = &scene.rumble.as_ref().unwrap().pulses;
        assert_eq!(pulses.len(), 1);
        assert!(pulses[0].0 > 0.0);
    }

    #[test]
    fn test_unsupported_actuator_is_not_pulsed() {
        let mut scene = Scene {
            rumble: Some(Rumble::default()),
            ..Default::default()
        };
        dispatch(&fire_once(), &mut scene, &Settings::default());
        assert!(scene.rumble.as_ref().unwrap().pulses.is_empty());

        // No actuator at all is fine too
        let mut scene = Scene::default();
        dispatch(&fire_once(), &mut scene, &Settings::default());
        assert_eq!(scene.cues, vec![SoundCue::Fire]);
    }

    #[test]
    fn test_haptics_disabled_in_settings() {
        let mut scene = Scene {
            rumble: Some(Rumble {
                supported: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let settings = Settings {
            haptics: false,
            ..Default::default()
        };
        dispatch(&fire_once(), &mut scene, &settings);
        assert!(scene.rumble.as_ref().unwrap().pulses.is_empty());
    }

    #[test]
    fn test_score_text_forwarded() {
        let mut scene = Scene::default();
        let events = vec![GameEvent::ScoreChanged {
            text: "0020".to_string(),
        }];
        dispatch(&events, &mut scene, &Settings::default());
        assert_eq!(scene.score_text, "0020");
    }
}
