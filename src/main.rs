//! Blaster Gallery entry point
//!
//! The web build is driven from JS through `Gallery` (see `web.rs`). Natively
//! this runs a scripted headless session and logs what the scene would show.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::{Quat, Vec3};

    use blaster_gallery::consts::FORWARD;
    use blaster_gallery::platform::{HapticActuator, Presenter, dispatch};
    use blaster_gallery::sim::{FrameInput, GameState, Pose, ProjectileId, SoundCue, tick};
    use blaster_gallery::{Settings, Tuning};

    /// Quest-class refresh rate
    const FRAME_DT: f32 = 1.0 / 72.0;
    const SESSION_SECONDS: f32 = 12.0;
    const FIRE_INTERVAL_FRAMES: u64 = 54;

    struct LogRumble;

    impl HapticActuator for LogRumble {
        fn supports_haptics(&self) -> bool {
            true
        }

        fn pulse(&mut self, intensity: f32, duration_ms: f32) {
            log::trace!("rumble {:.2} for {}ms", intensity, duration_ms);
        }
    }

    /// Stands in for the scene graph
    struct LogPresenter {
        rumble: LogRumble,
        live_visuals: usize,
    }

    impl Presenter for LogPresenter {
        fn spawn_projectile(&mut self, id: ProjectileId, position: Vec3, _orientation: Quat) {
            self.live_visuals += 1;
            log::debug!("spawn projectile {:?} at {:?}", id, position);
        }

        fn remove_projectile(&mut self, id: ProjectileId) {
            self.live_visuals = self.live_visuals.saturating_sub(1);
            log::debug!("remove projectile {:?}", id);
        }

        fn play_cue(&mut self, cue: SoundCue, position: Vec3) {
            log::debug!("cue {:?} at {:?}", cue, position);
        }

        fn set_target_visible(&mut self, target: u32, visible: bool, position: Vec3) {
            log::info!("target {} visible={} at {:?}", target, visible, position);
        }

        fn set_score_text(&mut self, text: &str) {
            log::info!("score: {}", text);
        }

        fn haptics(&mut self) -> Option<&mut dyn HapticActuator> {
            Some(&mut self.rumble)
        }
    }

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(12345);
        let tuning = match std::env::var("GALLERY_TUNING") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Tuning::from_json_or_default(&json),
                Err(e) => {
                    log::warn!("Cannot read tuning file {}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(_) => Tuning::default(),
        };
        let settings = Settings::load();

        let mut state = GameState::with_tuning(seed, tuning);
        state.motion_effects = settings.motion_effects();
        state.set_assets_ready(true);
        for position in [
            Vec3::new(-2.0, 1.5, -6.0),
            Vec3::new(0.0, 2.0, -8.0),
            Vec3::new(2.5, 1.2, -7.0),
        ] {
            state.add_target(position);
        }
        log::info!("Headless session, seed {}", seed);

        let mut presenter = LogPresenter {
            rumble: LogRumble,
            live_visuals: 0,
        };
        let head = Vec3::new(0.0, 1.6, 0.0);
        let frames = (SESSION_SECONDS / FRAME_DT) as u64;

        for frame in 0..frames {
            // Hand sways side to side and aims at targets in turn
            let t = frame as f32 * FRAME_DT;
            let hand = Vec3::new(0.25 + 0.15 * (t * 2.0).sin(), 1.3, -0.3);
            let aim_at = state.targets[(frame / FIRE_INTERVAL_FRAMES) as usize % state.targets.len()]
                .position;
            let orientation = Quat::from_rotation_arc(FORWARD, (aim_at - hand).normalize_or(FORWARD));

            let input = FrameInput {
                delta: FRAME_DT,
                elapsed: state.time + FRAME_DT as f64,
                trigger_pressed: frame % FIRE_INTERVAL_FRAMES == 0,
                controller: Some(Pose::new(hand, orientation)),
                head,
            };
            tick(&mut state, &input);
            let events = state.drain_events();
            dispatch(&events, &mut presenter, &settings);
        }

        let stats = state.stats;
        log::info!(
            "Session over: score {} ({} shots, {} hits, {:.0}% accuracy), blaster tilt {:?}",
            state.score_text(),
            stats.shots_fired,
            stats.hits,
            stats.accuracy() * 100.0,
            state.blaster_tilt()
        );
        println!("Final score: {}", state.score_text());
        println!("Projectile visuals still live: {}", presenter.live_visuals);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
