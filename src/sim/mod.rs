//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `tick` per rendered frame, stages in fixed order
//! - Seeded RNG only
//! - Stable iteration order (projectile slots, targets by insertion)
//! - Side effects leave as `GameEvent`s

pub mod inertia;
pub mod projectile;
pub mod score;
pub mod state;
pub mod target;
pub mod tick;

pub use inertia::{SpringTiltFilter, TiltFilter, VelocityTracker};
pub use projectile::{Hit, Projectile, ProjectileId, ProjectileManager};
pub use score::Score;
pub use state::{GameEvent, GameState, RemovalReason, SessionStats, SoundCue};
pub use target::{Target, TargetPhase, TargetTransition};
pub use tick::{FrameInput, Pose, tick};
