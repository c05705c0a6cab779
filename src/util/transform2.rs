//! 2x2 transform helpers for 2D rendering.

use glam::{Mat2, Vec2};

/// Counter-clockwise rotation by the given angle in radians.
#[must_use]
pub fn rotation(radians: f32) -> Mat2 {
    Mat2::from_angle(radians)
}

/// Non-uniform scale along the two axes.
#[must_use]
pub fn scale(x: f32, y: f32) -> Mat2 {
    Mat2::from_diagonal(Vec2::new(x, y))
}

/// Convert degrees to radians.
#[must_use]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_zero_is_identity() {
        assert_eq!(rotation(0.0), Mat2::IDENTITY);
    }

    #[test]
    fn rotation_quarter_turn_maps_x_to_y() {
        let m = rotation(std::f32::consts::FRAC_PI_2);
        let mapped = m * Vec2::X;
        assert!((mapped.x - 0.0).abs() < 1e-6);
        assert!((mapped.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scale_is_diagonal() {
        let m = scale(2.0, 3.0);
        assert_eq!(m * Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn radians_from_degrees() {
        assert!((radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(radians(0.0), 0.0);
    }

    #[test]
    fn rotation_then_scale_composes() {
        // Column-vector convention: the rightmost factor applies first.
        let m = rotation(std::f32::consts::PI) * scale(2.0, 2.0);
        let mapped = m * Vec2::X;
        assert!((mapped.x + 2.0).abs() < 1e-5);
        assert!(mapped.y.abs() < 1e-5);
    }
}
