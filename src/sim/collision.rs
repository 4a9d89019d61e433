//! Collision normals and reflection response
//!
//! Segment normals are resolved against the coordinate origin rather than the
//! approaching particle. That works for segments scattered around an
//! origin-centered arena; since reflection is symmetric in the sign of the
//! normal, the choice never changes the bounced direction.

use glam::DVec2;

use super::segments::Segment;
use super::state::Bounds;
use crate::error::{SimError, SimResult};

/// Unit normal of a segment
///
/// Rotates the segment vector by 90° (`{-dy, dx}`) and flips it if it faces
/// away from the vector running from the segment midpoint to the origin.
pub fn segment_normal(segment: &Segment) -> SimResult<DVec2> {
    let degenerate = || SimError::DegenerateSegment {
        x: segment.start.x,
        y: segment.start.y,
    };
    if segment.is_degenerate() {
        return Err(degenerate());
    }

    // Length can still underflow to zero for subnormal extents
    let delta = segment.end - segment.start;
    let normal = DVec2::new(-delta.y, delta.x)
        .try_normalize()
        .ok_or_else(degenerate)?;
    let to_origin = -segment.midpoint();
    if normal.dot(to_origin) < 0.0 {
        Ok(-normal)
    } else {
        Ok(normal)
    }
}

/// Inward unit normal of the arena wall touched by `pos`
///
/// Walls are checked left, right, bottom, top; the first match wins, so a
/// corner resolves to a single axis. Returns `DVec2::ZERO` when `pos` is
/// strictly inside the bounds.
pub fn boundary_normal(pos: DVec2, bounds: &Bounds) -> DVec2 {
    if pos.x <= bounds.x_min {
        DVec2::X
    } else if pos.x >= bounds.x_max {
        DVec2::NEG_X
    } else if pos.y <= bounds.y_min {
        DVec2::Y
    } else if pos.y >= bounds.y_max {
        DVec2::NEG_Y
    } else {
        DVec2::ZERO
    }
}

/// Reflect a direction off a surface
///
/// Standard reflection: d' = d - 2(d·n)n. `normal` must be unit length; the
/// result is not renormalized.
#[inline]
pub fn reflect(direction: DVec2, normal: DVec2) -> DVec2 {
    direction - 2.0 * direction.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment {
            start: DVec2::new(ax, ay),
            end: DVec2::new(bx, by),
        }
    }

    #[test]
    fn test_segment_normal_is_unit_and_perpendicular() {
        let s = seg(10.0, 10.0, 13.0, 14.0);
        let n = segment_normal(&s).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.dot(s.end - s.start).abs() < 1e-12);
    }

    #[test]
    fn test_segment_normal_faces_origin_side() {
        // Horizontal segment above the origin
        let n = segment_normal(&seg(-5.0, 10.0, 5.0, 10.0)).unwrap();
        assert!((n - DVec2::NEG_Y).length() < 1e-12);

        // Same segment, reversed endpoints, same normal
        let n = segment_normal(&seg(5.0, 10.0, -5.0, 10.0)).unwrap();
        assert!((n - DVec2::NEG_Y).length() < 1e-12);
    }

    #[test]
    fn test_segment_through_origin_keeps_rotation() {
        let n = segment_normal(&seg(0.0, -5.0, 0.0, 5.0)).unwrap();
        assert!((n - DVec2::NEG_X).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment_rejected() {
        let err = segment_normal(&seg(3.0, 4.0, 3.0, 4.0)).unwrap_err();
        assert!(matches!(err, SimError::DegenerateSegment { .. }));
    }

    #[test]
    fn test_subnormal_segment_rejected() {
        let s = seg(0.0, 0.0, 0.0, 1e-310);
        assert!(!s.is_degenerate());
        let err = segment_normal(&s).unwrap_err();
        assert!(matches!(err, SimError::DegenerateSegment { .. }));
    }

    #[test]
    fn test_boundary_normal_walls() {
        let b = Bounds::new(-10.0, 10.0, -10.0, 10.0).unwrap();
        assert_eq!(boundary_normal(DVec2::new(-10.0, 0.0), &b), DVec2::X);
        assert_eq!(boundary_normal(DVec2::new(10.95, 0.0), &b), DVec2::NEG_X);
        assert_eq!(boundary_normal(DVec2::new(0.0, -11.0), &b), DVec2::Y);
        assert_eq!(boundary_normal(DVec2::new(0.0, 10.0), &b), DVec2::NEG_Y);
        assert_eq!(boundary_normal(DVec2::new(9.99, 9.99), &b), DVec2::ZERO);
    }

    #[test]
    fn test_boundary_corner_picks_x_axis() {
        let b = Bounds::new(-10.0, 10.0, -10.0, 10.0).unwrap();
        assert_eq!(boundary_normal(DVec2::new(11.0, 11.0), &b), DVec2::NEG_X);
        assert_eq!(boundary_normal(DVec2::new(-11.0, -11.0), &b), DVec2::X);
    }

    #[test]
    fn test_reflect_off_wall() {
        let reflected = reflect(DVec2::new(1.0, 0.0), DVec2::NEG_X);
        assert!((reflected - DVec2::new(-1.0, 0.0)).length() < 1e-12);

        let reflected = reflect(DVec2::new(1.0, 1.0).normalize(), DVec2::NEG_Y);
        assert!((reflected - DVec2::new(1.0, -1.0).normalize()).length() < 1e-12);
    }

    #[test]
    fn test_reflect_ignores_normal_sign() {
        let d = DVec2::new(0.6, 0.8);
        let n = DVec2::new(1.0, 2.0).normalize();
        assert!((reflect(d, n) - reflect(d, -n)).length() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_reflect_is_involution(a in 0.0f64..std::f64::consts::TAU, b in 0.0f64..std::f64::consts::TAU) {
            let dir = DVec2::from_angle(a);
            let normal = DVec2::from_angle(b);
            let twice = reflect(reflect(dir, normal), normal);
            prop_assert!((twice - dir).length() < 1e-9);
        }

        #[test]
        fn prop_reflect_preserves_length(a in 0.0f64..std::f64::consts::TAU, b in 0.0f64..std::f64::consts::TAU) {
            let dir = DVec2::from_angle(a);
            let normal = DVec2::from_angle(b);
            prop_assert!((reflect(dir, normal).length() - 1.0).abs() < 1e-9);
        }
    }
}
