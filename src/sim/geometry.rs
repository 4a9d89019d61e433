//! Orientation and segment-intersection predicates
//!
//! The classic three-point orientation test drives everything here. Collinearity
//! is decided by comparing the cross product against an epsilon; the default of
//! zero keeps the exact floating-point comparison, which is brittle near
//! collinear configurations but reproduces recorded trajectories.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Rotational sense of three ordered points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Numeric tolerance for the collinearity test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// `|cross| <= collinear_epsilon` counts as collinear
    pub collinear_epsilon: f64,
}

impl Tolerance {
    /// Exact comparison against zero
    pub const EXACT: Self = Self {
        collinear_epsilon: 0.0,
    };

    pub fn new(collinear_epsilon: f64) -> Self {
        Self {
            collinear_epsilon: collinear_epsilon.abs(),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Orientation of `r` relative to the directed line `p -> q`
///
/// Sign of `(q - p) × (r - q)`: positive is counter-clockwise.
#[inline]
pub fn orientation(p: DVec2, q: DVec2, r: DVec2, tol: Tolerance) -> Orientation {
    let cross = (q - p).perp_dot(r - q);
    if cross.abs() <= tol.collinear_epsilon {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Whether `q` lies in the axis-aligned box spanned by `p` and `r`
///
/// Only meaningful when the three points are already known to be collinear.
#[inline]
pub fn on_segment(p: DVec2, q: DVec2, r: DVec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1 q1` intersects segment `p2 q2`
///
/// Touching at an endpoint counts as an intersection.
pub fn segments_intersect(p1: DVec2, q1: DVec2, p2: DVec2, q2: DVec2, tol: Tolerance) -> bool {
    let o1 = orientation(p1, q1, p2, tol);
    let o2 = orientation(p1, q1, q2, tol);
    let o3 = orientation(p2, q2, p1, tol);
    let o4 = orientation(p2, q2, q1, tol);

    // General case: each segment straddles the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear special cases
    if o1 == Orientation::Collinear && on_segment(p1, p2, q1) {
        return true;
    }
    if o2 == Orientation::Collinear && on_segment(p1, q2, q1) {
        return true;
    }
    if o3 == Orientation::Collinear && on_segment(p2, p1, q2) {
        return true;
    }
    if o4 == Orientation::Collinear && on_segment(p2, q1, q2) {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXACT: Tolerance = Tolerance::EXACT;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn test_orientation_basic() {
        assert_eq!(
            orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), EXACT),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, -1.0), EXACT),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), EXACT),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_epsilon_widens_collinear() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);
        let c = p(2.0, 1e-9);
        assert_ne!(orientation(a, b, c, EXACT), Orientation::Collinear);
        assert_eq!(orientation(a, b, c, Tolerance::new(1e-6)), Orientation::Collinear);
    }

    #[test]
    fn test_on_segment_bounding_box() {
        assert!(on_segment(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)));
        assert!(on_segment(p(2.0, 2.0), p(2.0, 2.0), p(0.0, 0.0)));
        assert!(!on_segment(p(0.0, 0.0), p(3.0, 3.0), p(2.0, 2.0)));
    }

    #[test]
    fn test_crossing_segments() {
        assert!(segments_intersect(
            p(-1.0, 0.0),
            p(1.0, 0.0),
            p(0.0, -5.0),
            p(0.0, 5.0),
            EXACT
        ));
    }

    #[test]
    fn test_parallel_segments_miss() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
            p(1.0, 1.0),
            EXACT
        ));
    }

    #[test]
    fn test_endpoint_touch_counts() {
        // T-junction: endpoint of the first lies on the second
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, -1.0),
            p(1.0, 1.0),
            EXACT
        ));
        // Shared endpoint
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(1.0, 1.0),
            p(2.0, 0.0),
            EXACT
        ));
    }

    #[test]
    fn test_collinear_overlap_and_gap() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(1.0, 0.0),
            p(3.0, 0.0),
            EXACT
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 0.0),
            EXACT
        ));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -100.0f64..100.0
    }

    fn point() -> impl Strategy<Value = DVec2> {
        (coord(), coord()).prop_map(|(x, y)| DVec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_orientation_reverses(a in point(), b in point(), c in point()) {
            let forward = orientation(a, b, c, EXACT);
            let backward = orientation(c, b, a, EXACT);
            match forward {
                Orientation::Collinear => prop_assert_eq!(backward, Orientation::Collinear),
                Orientation::Clockwise => prop_assert_eq!(backward, Orientation::CounterClockwise),
                Orientation::CounterClockwise => prop_assert_eq!(backward, Orientation::Clockwise),
            }
        }

        #[test]
        fn prop_intersection_symmetric(a in point(), b in point(), c in point(), d in point()) {
            prop_assert_eq!(
                segments_intersect(a, b, c, d, EXACT),
                segments_intersect(c, d, a, b, EXACT)
            );
        }

        #[test]
        fn prop_shared_endpoint_intersects(a in point(), b in point(), c in point()) {
            prop_assert!(segments_intersect(a, b, b, c, EXACT));
        }
    }
}
