//! Browser entry points
//!
//! The WebXR page owns the scene graph. Each animation frame it calls
//! [`Gallery::frame`] with the XR input snapshot, applies the returned events
//! to its scene and reads back the tilt and target transforms.

use glam::{Quat, Vec3};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::platform::{HapticActuator, Presenter, dispatch};
use crate::settings::Settings;
use crate::sim::{FrameInput, GameState, Pose, ProjectileId, SoundCue, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Blaster Gallery starting...");
}

/// `GamepadHapticActuator` handed over from JS
struct JsActuator(JsValue);

impl HapticActuator for JsActuator {
    fn supports_haptics(&self) -> bool {
        if self.0.is_undefined() || self.0.is_null() {
            return false;
        }
        Reflect::get(&self.0, &"pulse".into())
            .map(|f| f.is_function())
            .unwrap_or(false)
    }

    fn pulse(&mut self, intensity: f32, duration_ms: f32) {
        let Ok(func) = Reflect::get(&self.0, &"pulse".into()) else {
            return;
        };
        let func: Function = func.unchecked_into();
        // Returns a promise we have no use for
        let _ = func.call2(&self.0, &intensity.into(), &duration_ms.into());
    }
}

/// One gallery session
#[wasm_bindgen]
pub struct Gallery {
    state: GameState,
    settings: Settings,
    audio: AudioManager,
    user_muted: bool,
    page_hidden: bool,
}

#[wasm_bindgen]
impl Gallery {
    /// New session with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Gallery {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New session with JSON tuning overrides; malformed JSON uses defaults
    pub fn with_tuning_json(seed: u64, json: &str) -> Gallery {
        Self::with_tuning(seed, Tuning::from_json_or_default(json))
    }

    /// Place a target; returns its id
    pub fn add_target(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.state.add_target(Vec3::new(x, y, z))
    }

    /// Called once the projectile model has loaded
    pub fn set_assets_ready(&mut self, ready: bool) {
        self.state.set_assets_ready(ready);
    }

    /// Run one frame. Controller pose is ignored when `has_controller` is
    /// false. Returns the frame's events as a JSON array.
    #[allow(clippy::too_many_arguments)]
    pub fn frame(
        &mut self,
        delta: f32,
        elapsed: f64,
        trigger_pressed: bool,
        has_controller: bool,
        controller_position: &[f32],
        controller_orientation: &[f32],
        head_position: &[f32],
        actuator: JsValue,
    ) -> String {
        let controller = has_controller.then(|| {
            Pose::new(
                vec3_from(controller_position),
                quat_from(controller_orientation),
            )
        });
        let input = FrameInput {
            delta,
            elapsed,
            trigger_pressed,
            controller,
            head: vec3_from(head_position),
        };

        tick(&mut self.state, &input);
        let events = self.state.drain_events();
        let mut presenter = WebPresenter {
            audio: &self.audio,
            actuator: JsActuator(actuator),
        };
        dispatch(&events, &mut presenter, &self.settings);

        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to encode frame events: {}", e);
            "[]".to_string()
        })
    }

    /// Blaster tilt as `[x, y, z]` radians
    pub fn blaster_tilt(&self) -> Vec<f32> {
        self.state.blaster_tilt().to_array().to_vec()
    }

    /// Liquid tilt as `[x, y, z]` radians
    pub fn liquid_tilt(&self) -> Vec<f32> {
        self.state.liquid_tilt().to_array().to_vec()
    }

    /// Target position and uniform scale as `[x, y, z, scale]`
    pub fn target_transform(&self, id: u32) -> Vec<f32> {
        match self.state.target(id) {
            Some(t) => vec![t.position.x, t.position.y, t.position.z, t.scale.x],
            None => Vec::new(),
        }
    }

    pub fn target_visible(&self, id: u32) -> bool {
        self.state.target(id).is_some_and(|t| t.visible)
    }

    pub fn score_text(&self) -> String {
        self.state.score_text()
    }

    pub fn accuracy(&self) -> f32 {
        self.state.stats.accuracy()
    }

    /// Must be called from a user gesture before the first cue can play
    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.user_muted = muted;
        self.apply_mute();
    }

    /// Forward `visibilitychange`; honors the mute-on-blur setting
    pub fn on_visibility(&mut self, hidden: bool) {
        self.page_hidden = hidden;
        self.apply_mute();
    }

    pub fn set_mute_on_blur(&mut self, enabled: bool) {
        self.settings.mute_on_blur = enabled;
        self.settings.save();
        self.apply_mute();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.state.motion_effects = self.settings.motion_effects();
        self.settings.save();
    }

    pub fn set_haptics(&mut self, enabled: bool) {
        self.settings.haptics = enabled;
        self.settings.save();
    }
}

impl Gallery {
    fn with_tuning(seed: u64, tuning: Tuning) -> Gallery {
        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());

        let mut state = GameState::with_tuning(seed, tuning);
        state.motion_effects = settings.motion_effects();
        log::info!("Gallery session created with seed: {}", seed);

        Gallery {
            state,
            settings,
            audio,
            user_muted: false,
            page_hidden: false,
        }
    }

    fn apply_mute(&mut self) {
        let muted = self.settings.audio_muted(self.user_muted, self.page_hidden);
        self.audio.set_muted(muted);
    }
}

/// Plays cues and rumble; visuals are applied by JS from the event JSON
struct WebPresenter<'a> {
    audio: &'a AudioManager,
    actuator: JsActuator,
}

impl Presenter for WebPresenter<'_> {
    fn spawn_projectile(&mut self, _id: ProjectileId, _position: Vec3, _orientation: Quat) {}

    fn remove_projectile(&mut self, _id: ProjectileId) {}

    fn play_cue(&mut self, cue: SoundCue, _position: Vec3) {
        self.audio.play(cue);
    }

    fn set_target_visible(&mut self, _target: u32, _visible: bool, _position: Vec3) {}

    fn set_score_text(&mut self, _text: &str) {}

    fn haptics(&mut self) -> Option<&mut dyn HapticActuator> {
        Some(&mut self.actuator)
    }
}

fn vec3_from(v: &[f32]) -> Vec3 {
    match v {
        [x, y, z, ..] => Vec3::new(*x, *y, *z),
        _ => Vec3::ZERO,
    }
}

fn quat_from(q: &[f32]) -> Quat {
    match q {
        [x, y, z, w, ..] => {
            let q = Quat::from_xyzw(*x, *y, *z, *w);
            if q.length_squared() > 0.0 {
                q.normalize()
            } else {
                Quat::IDENTITY
            }
        }
        _ => Quat::IDENTITY,
    }
}
