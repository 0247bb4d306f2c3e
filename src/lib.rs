//! Blaster Gallery - A WebXR shooting gallery
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (inertia tilt, projectiles, targets, score)
//! - `platform`: Presentation seam toward the scene graph and XR input
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Player preferences

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Blaster muzzle direction in local space (scene graph looks down -Z)
    pub const FORWARD: Vec3 = Vec3::NEG_Z;

    /// Projectile speed (m/s)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectile lifespan (seconds)
    pub const PROJECTILE_TTL: f32 = 2.0;
    /// Distance below which a projectile hits a target (m)
    pub const HIT_RADIUS: f32 = 1.0;

    /// Target shrink animation (seconds)
    pub const SHRINK_DURATION: f32 = 0.3;
    /// Delay between hiding and regrowing a target (seconds)
    pub const RESPAWN_DELAY: f32 = 1.0;
    /// Target grow animation (seconds)
    pub const GROW_DURATION: f32 = 0.3;
    /// Respawn placement bounds
    pub const RESPAWN_X_RANGE: (f32, f32) = (-5.0, 5.0);
    pub const RESPAWN_Z_RANGE: (f32, f32) = (-10.0, -5.0);

    /// Points per confirmed hit
    pub const SCORE_PER_HIT: i64 = 10;
    /// Largest value the score text can show
    pub const SCORE_DISPLAY_MAX: i64 = 9999;
    /// Width of the zero-padded score text
    pub const SCORE_DIGITS: usize = 4;

    /// Frame time floor for velocity estimation
    pub const VELOCITY_EPSILON: f32 = 0.001;

    /// Blaster tilt (low-pass)
    pub const BLASTER_SENSITIVITY: f32 = 0.1;
    pub const BLASTER_DAMPING: f32 = 8.0;
    pub const BLASTER_MAX_TILT: f32 = 0.3;

    /// Liquid tilt (spring-damper, underdamped so it sloshes)
    pub const LIQUID_SENSITIVITY: f32 = 0.15;
    pub const LIQUID_SPRING: f32 = 60.0;
    pub const LIQUID_DAMPING: f32 = 6.0;
    pub const LIQUID_MAX_TILT: f32 = 0.5;

    /// Haptic pulse on fire
    pub const HAPTIC_INTENSITY: f32 = 0.6;
    pub const HAPTIC_DURATION_MS: f32 = 100.0;
}

/// Quadratic ease-out over normalized time `t` in [0, 1]
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quad_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        // Ease-out is ahead of linear in the middle
        assert!(ease_out_quad(0.5) > 0.5);
    }
}
