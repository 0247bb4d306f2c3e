//! Data-driven gameplay tuning
//!
//! Defaults come from [`crate::consts`]. A JSON document can override any
//! subset of fields; missing fields keep their defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Pick this axis' component out of a vector
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// How one tilt axis responds to motion: which velocity component drives it
/// and with what signed gain (negative gain makes the body lag behind motion)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDrive {
    pub source: Axis,
    pub gain: f32,
}

impl AxisDrive {
    pub const fn new(source: Axis, gain: f32) -> Self {
        Self { source, gain }
    }
}

/// Per-output-axis drives. `None` keeps that tilt axis at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltAxes {
    pub x: Option<AxisDrive>,
    pub y: Option<AxisDrive>,
    pub z: Option<AxisDrive>,
}

impl TiltAxes {
    /// Clamped target tilt for a given body velocity
    pub fn targets(&self, velocity: Vec3, sensitivity: f32, max_tilt: f32) -> Vec3 {
        let target = |drive: Option<AxisDrive>| match drive {
            Some(d) => (d.source.of(velocity) * d.gain * sensitivity).clamp(-max_tilt, max_tilt),
            None => 0.0,
        };
        Vec3::new(target(self.x), target(self.y), target(self.z))
    }
}

/// First-order (low-pass) tilt parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowPassTuning {
    pub sensitivity: f32,
    pub damping: f32,
    pub max_tilt: f32,
    pub axes: TiltAxes,
}

impl Default for LowPassTuning {
    fn default() -> Self {
        Self {
            sensitivity: BLASTER_SENSITIVITY,
            damping: BLASTER_DAMPING,
            max_tilt: BLASTER_MAX_TILT,
            axes: TiltAxes {
                x: Some(AxisDrive::new(Axis::Y, 0.5)),
                y: Some(AxisDrive::new(Axis::X, -0.8)),
                z: Some(AxisDrive::new(Axis::X, -1.0)),
            },
        }
    }
}

/// Second-order (spring-damper) tilt parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringTuning {
    pub sensitivity: f32,
    pub spring: f32,
    pub damping: f32,
    pub max_tilt: f32,
    pub axes: TiltAxes,
}

impl Default for SpringTuning {
    fn default() -> Self {
        Self {
            sensitivity: LIQUID_SENSITIVITY,
            spring: LIQUID_SPRING,
            damping: LIQUID_DAMPING,
            max_tilt: LIQUID_MAX_TILT,
            axes: TiltAxes {
                x: None,
                y: Some(AxisDrive::new(Axis::Z, 0.8)),
                z: Some(AxisDrive::new(Axis::X, -1.0)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub ttl: f32,
    pub hit_radius: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            ttl: PROJECTILE_TTL,
            hit_radius: HIT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnTuning {
    pub shrink_duration: f32,
    pub delay: f32,
    pub grow_duration: f32,
    pub x_range: (f32, f32),
    pub z_range: (f32, f32),
}

impl Default for RespawnTuning {
    fn default() -> Self {
        Self {
            shrink_duration: SHRINK_DURATION,
            delay: RESPAWN_DELAY,
            grow_duration: GROW_DURATION,
            x_range: RESPAWN_X_RANGE,
            z_range: RESPAWN_Z_RANGE,
        }
    }
}

/// Controller rumble on fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticTuning {
    /// Pulse strength (0.0 - 1.0), before the player's settings scale it
    pub intensity: f32,
    pub duration_ms: f32,
}

impl Default for HapticTuning {
    fn default() -> Self {
        Self {
            intensity: HAPTIC_INTENSITY,
            duration_ms: HAPTIC_DURATION_MS,
        }
    }
}

/// All gameplay tuning in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Blaster tilt
    pub blaster: LowPassTuning,
    /// Liquid sphere tilt
    pub liquid: SpringTuning,
    pub projectile: ProjectileTuning,
    pub respawn: RespawnTuning,
    pub haptic: HapticTuning,
    pub score_per_hit: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            blaster: LowPassTuning::default(),
            liquid: SpringTuning::default(),
            projectile: ProjectileTuning::default(),
            respawn: RespawnTuning::default(),
            haptic: HapticTuning::default(),
            score_per_hit: SCORE_PER_HIT,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning overrides: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
        assert_eq!(tuning.score_per_hit, SCORE_PER_HIT);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "projectile": { "speed": 20.0 } }"#).unwrap();
        assert_eq!(tuning.projectile.speed, 20.0);
        assert_eq!(tuning.projectile.ttl, PROJECTILE_TTL);
        assert_eq!(tuning.blaster, LowPassTuning::default());
    }

    #[test]
    fn test_axis_override() {
        let json = r#"{ "liquid": { "axes": { "z": { "source": "y", "gain": 0.5 } } } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.liquid.axes.z, Some(AxisDrive::new(Axis::Y, 0.5)));
        assert_eq!(tuning.liquid.axes.x, None);
    }

    #[test]
    fn test_haptic_override() {
        let tuning = Tuning::from_json(r#"{ "haptic": { "intensity": 0.25 } }"#).unwrap();
        assert_eq!(tuning.haptic.intensity, 0.25);
        assert_eq!(tuning.haptic.duration_ms, HAPTIC_DURATION_MS);
    }

    #[test]
    fn test_malformed_falls_back() {
        let tuning = Tuning::from_json_or_default("not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_targets_clamped_and_signed() {
        let axes = TiltAxes {
            z: Some(AxisDrive::new(Axis::X, -1.0)),
            ..Default::default()
        };
        let t = axes.targets(Vec3::new(100.0, 0.0, 0.0), 0.1, 0.3);
        assert_eq!(t.z, -0.3);
        assert_eq!(t.x, 0.0);
        let t = axes.targets(Vec3::new(1.0, 0.0, 0.0), 0.1, 0.3);
        assert!((t.z + 0.1).abs() < 1e-6);
    }
}
