//! Projectile lifecycle
//!
//! Projectiles live in a generational arena: slots are reused through a
//! free-list, and each id carries the slot generation so a stale id can never
//! address a newer projectile.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::target::Target;
use crate::consts::FORWARD;
use crate::tuning::ProjectileTuning;

/// Stable handle to a live projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileId {
    pub index: u32,
    pub generation: u32,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds left before expiry
    pub time_to_live: f32,
}

/// A projectile that reached a target this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: ProjectileId,
    /// Index into the target list
    pub target: usize,
    pub position: Vec3,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    projectile: Option<Projectile>,
}

/// Owns every live projectile
#[derive(Debug, Clone)]
pub struct ProjectileManager {
    pub tuning: ProjectileTuning,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    /// Whether the visual template is loaded; spawning is skipped until it is
    template_ready: bool,
}

impl ProjectileManager {
    pub fn new(tuning: ProjectileTuning) -> Self {
        Self {
            tuning,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            template_ready: false,
        }
    }

    pub fn set_template_ready(&mut self, ready: bool) {
        self.template_ready = ready;
    }

    pub fn template_ready(&self) -> bool {
        self.template_ready
    }

    /// Fire a projectile from a muzzle pose.
    ///
    /// Returns `None` without side effects while the template is missing.
    pub fn spawn(&mut self, origin: Vec3, orientation: Quat) -> Option<ProjectileId> {
        if !self.template_ready {
            log::debug!("Projectile template not loaded, skipping spawn");
            return None;
        }

        let velocity = (orientation * FORWARD) * self.tuning.speed;
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    projectile: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = ProjectileId {
            index,
            generation: slot.generation,
        };
        slot.projectile = Some(Projectile {
            id,
            position: origin,
            velocity,
            time_to_live: self.tuning.ttl,
        });
        self.live += 1;
        Some(id)
    }

    /// Remove a projectile; stale or unknown ids return `None`
    pub fn remove(&mut self, id: ProjectileId) -> Option<Projectile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let projectile = slot.projectile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(projectile)
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.projectile.as_ref()
    }

    pub fn get_mut(&mut self, id: ProjectileId) -> Option<&mut Projectile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.projectile.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter_map(|s| s.projectile.as_ref())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Age and move every projectile.
    ///
    /// Expiry is checked before movement: a projectile whose lifetime runs out
    /// this frame is removed where it stands and never reaches collision.
    /// Returns the ids removed by expiry.
    pub fn step(&mut self, dt: f32) -> Vec<ProjectileId> {
        let mut expired = Vec::new();

        for slot in &mut self.slots {
            let Some(projectile) = slot.projectile.as_mut() else {
                continue;
            };
            projectile.time_to_live -= dt;
            if projectile.time_to_live < 0.0 {
                expired.push(projectile.id);
                continue;
            }
            projectile.position += projectile.velocity * dt;
        }

        for &id in &expired {
            self.remove(id);
        }
        expired
    }

    /// Test every projectile against the visible targets.
    ///
    /// Targets are tried in list order and the first one within the hit radius
    /// consumes the projectile, so a projectile scores at most once per frame.
    pub fn resolve_hits(&mut self, targets: &[Target]) -> Vec<Hit> {
        let radius = self.tuning.hit_radius;
        let mut hits = Vec::new();

        for projectile in self.iter() {
            let found = targets
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_collidable())
                .find(|(_, t)| t.position.distance(projectile.position) < radius);

            if let Some((target, _)) = found {
                hits.push(Hit {
                    projectile: projectile.id,
                    target,
                    position: projectile.position,
                });
            }
        }

        for hit in &hits {
            self.remove(hit.projectile);
        }
        hits
    }
}
