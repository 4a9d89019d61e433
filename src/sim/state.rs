//! Simulation state and core types
//!
//! `Simulation` owns every piece of mutable state: the particle list, the
//! segment store and the RNG. Collaborators talk to it through its methods and
//! read it through [`Snapshot`].

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Tolerance;
use super::segments::{Segment, SegmentStore};
use super::tick::{SimCommand, tick};
use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::settings::SimConfig;

/// Axis-aligned arena rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Build bounds, rejecting zero or negative area
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> SimResult<Self> {
        let bounds = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Requires finite edges, positive extents and a width/height that fit in f64
    pub fn validate(&self) -> SimResult<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.width().is_finite()
            && self.height().is_finite();
        // Comparisons written so NaN fails too
        if !finite || !(self.x_min < self.x_max) || !(self.y_min < self.y_max) {
            return Err(SimError::InvalidBounds {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether `p` is strictly inside (no wall contact)
    pub fn contains(&self, p: DVec2) -> bool {
        p.x > self.x_min && p.x < self.x_max && p.y > self.y_min && p.y < self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: -ARENA_HALF_EXTENT,
            x_max: ARENA_HALF_EXTENT,
            y_min: -ARENA_HALF_EXTENT,
            y_max: ARENA_HALF_EXTENT,
        }
    }
}

/// Order of movement and collision resolution within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOrder {
    /// Move, reflect off walls, then test segments from the new position
    #[default]
    AdvanceThenCollide,
    /// Test segments from the pre-move position, move, then reflect off walls
    CollideThenAdvance,
}

/// A moving point particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    /// Nominally unit length; renormalized at the start of every tick
    pub direction: DVec2,
}

impl Particle {
    pub fn new(position: DVec2, direction: DVec2) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// The particle every fresh or reset simulation starts with
    pub fn seed() -> Self {
        Self::new(DVec2::ZERO, DVec2::from_angle(SEED_ANGLE))
    }

    /// A particle at `position` heading in a uniformly random direction
    pub fn random<R: Rng>(position: DVec2, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        Self::new(position, DVec2::from_angle(angle))
    }
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub particles: Vec<Particle>,
    /// Flat endpoint list, including a trailing unpaired point
    pub segment_points: Vec<DVec2>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) particles: Vec<Particle>,
    pub(crate) segments: SegmentStore,
    pub(crate) rng: Pcg32,
    pub(crate) pending: Vec<SimCommand>,
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Create a simulation seeded with the default particle
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!(
            "Simulation created: bounds={:?} speed={} order={:?} seed={}",
            config.bounds,
            config.speed,
            config.tick_order,
            seed
        );

        Ok(Self {
            config,
            particles: vec![Particle::seed()],
            segments: SegmentStore::new(),
            rng: Pcg32::seed_from_u64(seed),
            pending: Vec::new(),
            time_ticks: 0,
        })
    }

    /// Replace the arena bounds
    pub fn configure_bounds(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> SimResult<()> {
        let bounds = Bounds::new(x_min, x_max, y_min, y_max).inspect_err(|e| {
            log::warn!("Rejected bounds: {}", e);
        })?;
        log::info!("Bounds set to {:?}", bounds);
        self.config.bounds = bounds;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f64) -> SimResult<()> {
        if !(speed > 0.0) || !speed.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "speed must be positive and finite, got {}",
                speed
            )));
        }
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_tick_order(&mut self, order: TickOrder) {
        log::info!("Tick order set to {:?}", order);
        self.config.tick_order = order;
    }

    /// Change the collinearity epsilon used by the intersection test
    pub fn set_tolerance(&mut self, tolerance: Tolerance) -> SimResult<()> {
        let epsilon = tolerance.collinear_epsilon;
        if !(epsilon >= 0.0) || !epsilon.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "collinear_epsilon must be non-negative and finite, got {}",
                epsilon
            )));
        }
        self.config.collinear_epsilon = epsilon;
        Ok(())
    }

    /// Advance every particle by one step
    pub fn tick(&mut self) {
        tick(self);
    }

    /// Queue an event to be applied at the start of the next tick
    pub fn push_command(&mut self, command: SimCommand) {
        self.pending.push(command);
    }

    pub fn spawn_particle(&mut self, position: DVec2, direction: DVec2) {
        self.particles.push(Particle::new(position, direction));
    }

    pub fn spawn_random_particle(&mut self, position: DVec2) {
        let particle = Particle::random(position, &mut self.rng);
        self.particles.push(particle);
    }

    /// Spawn a randomly aimed particle at the origin
    pub fn spawn_random_at_origin(&mut self) {
        self.spawn_random_particle(DVec2::ZERO);
    }

    pub fn add_segment_point(&mut self, point: DVec2) {
        self.segments.add_point(point);
    }

    /// Add four random segments if no segment points exist yet
    pub fn generate_random_segments(&mut self) -> bool {
        self.segments
            .generate_random(&self.config.bounds, &mut self.rng)
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }

    /// Drop all particles and segments, then reseed the default particle
    pub fn reset(&mut self) {
        self.particles.clear();
        self.segments.clear();
        self.particles.push(Particle::seed());
        self.time_ticks = 0;
        log::info!("Simulation reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            particles: self.particles.clone(),
            segment_points: self.segments.points().to_vec(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segments.segments()
    }

    pub fn segment_store(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
