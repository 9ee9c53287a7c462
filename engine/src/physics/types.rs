//! Physics math types and heading helpers
//!
//! Vectors come from glam. The car lives on the XZ ground plane; a heading
//! of 0 faces -Z and positive headings turn right (toward +X).

use std::f32::consts::{PI, TAU};

pub use glam::Vec3;

/// Unit forward vector for a yaw heading.
#[inline]
pub fn forward_vector(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, -heading.cos())
}

/// Unit right vector for a yaw heading (forward rotated a quarter turn clockwise).
#[inline]
pub fn right_vector(heading: f32) -> Vec3 {
    Vec3::new(heading.cos(), 0.0, heading.sin())
}

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Angle between a velocity and the heading's forward vector, in [0, PI].
///
/// Zero-length velocities report 0 rather than NaN.
pub fn slip_angle(velocity: Vec3, heading: f32) -> f32 {
    if velocity.length_squared() < 1e-8 {
        return 0.0;
    }
    velocity
        .normalize()
        .dot(forward_vector(heading))
        .clamp(-1.0, 1.0)
        .acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_right_are_perpendicular() {
        for heading in [0.0, 0.7, -2.3, 10.0] {
            let forward = forward_vector(heading);
            let right = right_vector(heading);
            assert!(forward.dot(right).abs() < 1e-5);
            assert!((forward.length() - 1.0).abs() < 1e-5);
            assert!((right.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_heading_zero_faces_negative_z() {
        assert!((forward_vector(0.0) - Vec3::NEG_Z).length() < 1e-6);
        assert!((right_vector(0.0) - Vec3::X).length() < 1e-6);
        // A quarter turn right faces +X
        assert!((forward_vector(PI / 2.0) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((normalize_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_slip_angle() {
        assert_eq!(slip_angle(Vec3::ZERO, 0.0), 0.0);
        assert!(slip_angle(Vec3::NEG_Z * 5.0, 0.0).abs() < 1e-3);
        assert!((slip_angle(Vec3::X, 0.0) - PI / 2.0).abs() < 1e-5);
        assert!((slip_angle(Vec3::Z, 0.0) - PI).abs() < 1e-3);
    }
}
