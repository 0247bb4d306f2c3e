//! Targets and their respawn cycle
//!
//! A hit target shrinks away, hides, jumps to a new spot and grows back:
//! `Active -> Shrinking -> Hidden -> Growing -> Active`.
//! All timing runs on simulation time.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ease_out_quad;
use crate::tuning::RespawnTuning;

/// Slack for phase timers built from summed frame deltas
const TIME_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetPhase {
    /// Full size, can be hit
    Active,
    /// Scaling down after a hit; still visible
    Shrinking { elapsed: f32 },
    /// Invisible, waiting to regrow
    Hidden { remaining: f32 },
    /// Scaling back up at the new position
    Growing { elapsed: f32 },
}

/// Phase changes the presentation layer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTransition {
    /// Shrink finished; target is now invisible and relocated
    Hidden,
    /// Delay elapsed; target is visible again and starts growing
    Shown,
    /// Grow finished; target is hittable again
    Settled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub position: Vec3,
    pub visible: bool,
    pub scale: Vec3,
    pub phase: TargetPhase,
}

impl Target {
    pub fn new(id: u32, position: Vec3) -> Self {
        Self {
            id,
            position,
            visible: true,
            scale: Vec3::ONE,
            phase: TargetPhase::Active,
        }
    }

    /// Visible targets take part in collision, including while shrinking
    pub fn is_collidable(&self) -> bool {
        self.visible
    }

    /// Register a hit. Returns `true` if the hit counts.
    ///
    /// Only an `Active` target reacts. A hit on a target that is already
    /// shrinking is absorbed: the projectile is spent but nothing restarts.
    pub fn hit(&mut self) -> bool {
        if self.phase != TargetPhase::Active {
            return false;
        }
        self.phase = TargetPhase::Shrinking { elapsed: 0.0 };
        true
    }

    /// Advance the respawn cycle by `dt`. At most one transition per call.
    pub fn advance<R: Rng>(
        &mut self,
        dt: f32,
        tuning: &RespawnTuning,
        rng: &mut R,
    ) -> Option<TargetTransition> {
        let dt = dt.max(0.0);
        match self.phase {
            TargetPhase::Active => None,
            TargetPhase::Shrinking { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + TIME_EPSILON >= tuning.shrink_duration {
                    self.scale = Vec3::ZERO;
                    self.visible = false;
                    self.relocate(tuning, rng);
                    self.phase = TargetPhase::Hidden {
                        remaining: tuning.delay,
                    };
                    Some(TargetTransition::Hidden)
                } else {
                    let t = elapsed / tuning.shrink_duration;
                    self.scale = Vec3::splat(1.0 - ease_out_quad(t));
                    self.phase = TargetPhase::Shrinking { elapsed };
                    None
                }
            }
            TargetPhase::Hidden { remaining } => {
                let remaining = remaining - dt;
                if remaining <= TIME_EPSILON {
                    self.visible = true;
                    self.scale = Vec3::ZERO;
                    self.phase = TargetPhase::Growing { elapsed: 0.0 };
                    Some(TargetTransition::Shown)
                } else {
                    self.phase = TargetPhase::Hidden { remaining };
                    None
                }
            }
            TargetPhase::Growing { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + TIME_EPSILON >= tuning.grow_duration {
                    self.scale = Vec3::ONE;
                    self.phase = TargetPhase::Active;
                    Some(TargetTransition::Settled)
                } else {
                    let t = elapsed / tuning.grow_duration;
                    self.scale = Vec3::splat(ease_out_quad(t));
                    self.phase = TargetPhase::Growing { elapsed };
                    None
                }
            }
        }
    }

    /// Jump to a random spot in the respawn area, keeping the height
    fn relocate<R: Rng>(&mut self, tuning: &RespawnTuning, rng: &mut R) {
        self.position.x = sample_span(rng, tuning.x_range);
        self.position.z = sample_span(rng, tuning.z_range);
    }
}

fn sample_span<R: Rng>(rng: &mut R, (a, b): (f32, f32)) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn run_until<R: Rng>(
        target: &mut Target,
        tuning: &RespawnTuning,
        rng: &mut R,
        want: TargetTransition,
    ) -> (u32, Vec<TargetTransition>) {
        let mut seen = Vec::new();
        for frame in 1..=600 {
            if let Some(t) = target.advance(DT, tuning, rng) {
                seen.push(t);
                if t == want {
                    return (frame, seen);
                }
            }
        }
        panic!("never reached {:?}", want);
    }

    #[test]
    fn test_full_respawn_cycle() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut target = Target::new(0, Vec3::new(0.0, 1.5, -7.0));

        assert!(target.hit());
        assert!(target.visible, "stays visible while shrinking");

        let (frames, seen) = run_until(&mut target, &tuning, &mut rng, TargetTransition::Hidden);
        assert_eq!(seen, vec![TargetTransition::Hidden]);
        assert!(frames as f32 * DT <= tuning.shrink_duration + 1e-3);
        assert!(!target.visible);
        assert_eq!(target.scale, Vec3::ZERO);

        let (frames, _) = run_until(&mut target, &tuning, &mut rng, TargetTransition::Shown);
        assert!((frames as f32 * DT - tuning.delay).abs() <= DT);
        assert!(target.visible);
        assert!(matches!(target.phase, TargetPhase::Growing { .. }));

        run_until(&mut target, &tuning, &mut rng, TargetTransition::Settled);
        assert_eq!(target.phase, TargetPhase::Active);
        assert_eq!(target.scale, Vec3::ONE);
    }

    #[test]
    fn test_relocation_stays_in_bounds() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(42);

        for _ in 0..50 {
            let mut target = Target::new(0, Vec3::new(0.0, 2.0, -6.0));
            target.hit();
            run_until(&mut target, &tuning, &mut rng, TargetTransition::Hidden);
            let p = target.position;
            assert!((-5.0..=5.0).contains(&p.x));
            assert!((-10.0..=-5.0).contains(&p.z));
            assert_eq!(p.y, 2.0);
        }
    }

    #[test]
    fn test_scale_shrinks_monotonically() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut target = Target::new(0, Vec3::ZERO);
        target.hit();

        let mut last = 1.0;
        while matches!(target.phase, TargetPhase::Shrinking { .. }) {
            target.advance(DT, &tuning, &mut rng);
            assert!(target.scale.x <= last);
            last = target.scale.x;
        }
    }

    #[test]
    fn test_second_hit_is_absorbed() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut target = Target::new(0, Vec3::ZERO);

        assert!(target.hit());
        target.advance(DT, &tuning, &mut rng);
        let phase = target.phase;

        assert!(target.is_collidable());
        assert!(!target.hit());
        assert_eq!(target.phase, phase, "absorbed hit must not restart the shrink");
    }

    #[test]
    fn test_hit_while_growing_is_absorbed() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut target = Target::new(0, Vec3::ZERO);

        target.hit();
        run_until(&mut target, &tuning, &mut rng, TargetTransition::Shown);
        target.advance(DT, &tuning, &mut rng);
        let phase = target.phase;
        assert!(matches!(phase, TargetPhase::Growing { .. }));

        assert!(target.is_collidable());
        assert!(!target.hit());
        assert_eq!(target.phase, phase);
        assert!(target.scale.x < 1.0);
    }

    #[test]
    fn test_active_target_is_idle() {
        let tuning = RespawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut target = Target::new(0, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(target.advance(1.0, &tuning, &mut rng), None);
        assert_eq!(target.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(target.scale, Vec3::ONE);
    }
}
