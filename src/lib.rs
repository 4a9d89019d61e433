//! Segment Bounce - point particles reflecting inside a 2D arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry predicates, reflection, tick loop)
//! - `settings`: JSON-backed simulation configuration
//! - `error`: Error types shared by both

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::SimConfig;
pub use sim::{Bounds, Particle, Simulation, Snapshot};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Default arena spans [-100, 100] on both axes
    pub const ARENA_HALF_EXTENT: f64 = 100.0;
    /// World units per tick
    pub const DEFAULT_SPEED: f64 = 0.1;
    /// Heading of the seed particle (45°, first quadrant)
    pub const SEED_ANGLE: f64 = std::f64::consts::FRAC_PI_4;
}

/// Convert a screen pixel position to world coordinates
///
/// Screen y grows downward, world y grows upward.
#[inline]
pub fn screen_to_world(px: f64, py: f64, width: f64, height: f64, bounds: &Bounds) -> DVec2 {
    let x = (px / width) * bounds.width() + bounds.x_min;
    let y = ((height - py) / height) * bounds.height() + bounds.y_min;
    DVec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_world_corners() {
        let bounds = Bounds::default();
        assert_eq!(
            screen_to_world(0.0, 0.0, 800.0, 800.0, &bounds),
            DVec2::new(-100.0, 100.0)
        );
        assert_eq!(
            screen_to_world(800.0, 800.0, 800.0, 800.0, &bounds),
            DVec2::new(100.0, -100.0)
        );
        assert_eq!(
            screen_to_world(400.0, 400.0, 800.0, 800.0, &bounds),
            DVec2::ZERO
        );
    }
}
