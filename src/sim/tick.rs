//! Fixed-step simulation tick
//!
//! Advances every particle one step and resolves wall and segment contacts.
//! Particle updates only read the segment store, so each particle is resolved
//! independently against the same segment list.

use glam::DVec2;

use super::collision::{boundary_normal, reflect, segment_normal};
use super::geometry::{Tolerance, segments_intersect};
use super::segments::SegmentStore;
use super::state::{Bounds, Particle, Simulation, TickOrder};

/// Input events, applied at the start of the next tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    SpawnParticle { position: DVec2, direction: DVec2 },
    SpawnRandomParticle { position: DVec2 },
    AddSegmentPoint(DVec2),
    GenerateRandomSegments,
    ClearSegments,
    Reset,
}

/// Per-tick parameters shared by every particle
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub speed: f64,
    pub tolerance: Tolerance,
    pub order: TickOrder,
}

/// Advance the simulation by one tick
pub fn tick(sim: &mut Simulation) {
    apply_pending(sim);

    let params = StepParams {
        speed: sim.config.speed,
        tolerance: sim.config.tolerance(),
        order: sim.config.tick_order,
    };
    let bounds = sim.config.bounds;

    for particle in sim.particles.iter_mut() {
        step_particle(particle, &sim.segments, &bounds, params);
    }

    sim.time_ticks += 1;
}

fn apply_pending(sim: &mut Simulation) {
    if sim.pending.is_empty() {
        return;
    }

    let commands = std::mem::take(&mut sim.pending);
    for command in commands {
        match command {
            SimCommand::SpawnParticle {
                position,
                direction,
            } => sim.spawn_particle(position, direction),
            SimCommand::SpawnRandomParticle { position } => sim.spawn_random_particle(position),
            SimCommand::AddSegmentPoint(point) => sim.add_segment_point(point),
            SimCommand::GenerateRandomSegments => {
                sim.generate_random_segments();
            }
            SimCommand::ClearSegments => sim.clear_segments(),
            SimCommand::Reset => sim.reset(),
        }
    }
}

/// Advance one particle and resolve its contacts
pub fn step_particle(
    particle: &mut Particle,
    segments: &SegmentStore,
    bounds: &Bounds,
    params: StepParams,
) {
    particle.direction = particle.direction.normalize_or_zero();

    match params.order {
        TickOrder::AdvanceThenCollide => {
            advance(particle, params.speed);
            bounce_off_walls(particle, bounds);
            bounce_off_segments(particle, segments, params);
        }
        TickOrder::CollideThenAdvance => {
            bounce_off_segments(particle, segments, params);
            advance(particle, params.speed);
            bounce_off_walls(particle, bounds);
        }
    }
}

#[inline]
fn advance(particle: &mut Particle, speed: f64) {
    particle.position += particle.direction * speed;
}

/// Reflect off the wall the particle has reached. Position is never clamped.
fn bounce_off_walls(particle: &mut Particle, bounds: &Bounds) {
    let normal = boundary_normal(particle.position, bounds);
    if normal != DVec2::ZERO {
        particle.direction = reflect(particle.direction, normal);
        log::trace!(
            "Wall contact at ({:.3}, {:.3})",
            particle.position.x,
            particle.position.y
        );
    }
}

/// Test the projected motion against every segment, reflecting on each hit.
/// Hits compound: later segments see the already reflected direction.
fn bounce_off_segments(particle: &mut Particle, segments: &SegmentStore, params: StepParams) {
    for segment in segments.segments() {
        let projected = particle.position + particle.direction * params.speed;
        if !segments_intersect(
            particle.position,
            projected,
            segment.start,
            segment.end,
            params.tolerance,
        ) {
            continue;
        }

        match segment_normal(&segment) {
            Ok(normal) => {
                particle.direction = reflect(particle.direction, normal);
                log::debug!(
                    "Segment collision at ({:.3}, {:.3}), new direction ({:.3}, {:.3})",
                    particle.position.x,
                    particle.position.y,
                    particle.direction.x,
                    particle.direction.y
                );
            }
            Err(e) => log::warn!("Skipping reflection: {}", e),
        }
    }
}
