//! Deterministic simulation module
//!
//! All particle and collision logic lives here. For a given seed the
//! simulation is fully deterministic:
//! - Fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order for particles and segments)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod segments;
pub mod state;
pub mod tick;

pub use collision::{boundary_normal, reflect, segment_normal};
pub use geometry::{Orientation, Tolerance, on_segment, orientation, segments_intersect};
pub use segments::{RANDOM_BATCH_POINTS, Segment, SegmentStore};
pub use state::{Bounds, Particle, Simulation, Snapshot, TickOrder};
pub use tick::{SimCommand, StepParams, step_particle, tick};
