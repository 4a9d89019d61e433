//! Collision segment storage
//!
//! Points are stored flat: index `2k` starts segment `k` and `2k + 1` ends it.
//! A trailing unpaired point is kept (it is the first half of a segment the
//! user is still placing) but never yields a segment.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Bounds;

/// Number of points appended by a random batch (four segments)
pub const RANDOM_BATCH_POINTS: usize = 8;

/// A collision segment, copied out of the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Flat list of segment endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentStore {
    points: Vec<DVec2>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append one endpoint
    pub fn add_point(&mut self, point: DVec2) {
        self.points.push(point);
    }

    /// Append a batch of random segments inside `bounds`
    ///
    /// Only acts on an empty store; returns whether points were added.
    pub fn generate_random<R: Rng>(&mut self, bounds: &Bounds, rng: &mut R) -> bool {
        if !self.points.is_empty() {
            return false;
        }

        for _ in 0..RANDOM_BATCH_POINTS {
            let x = rng.random_range(bounds.x_min..bounds.x_max);
            let y = rng.random_range(bounds.y_min..bounds.y_max);
            self.points.push(DVec2::new(x, y));
        }
        log::info!("Generated {} random segments", RANDOM_BATCH_POINTS / 2);
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// All stored points, including a trailing unpaired one
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Complete segments in insertion order
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Whether the last point is waiting for its partner
    pub fn has_pending_point(&self) -> bool {
        self.points.len() % 2 == 1
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
