//! Numeric constants and precision rules shared across DrillKit.

/// Output coordinate resolution of the target machine class (mm).
pub const MM_RESOLUTION: f64 = 0.1;

/// Minimum magnitude for a direction vector to be considered non-zero.
pub const VECTOR_EPSILON: f64 = 1e-4;

/// Component tolerance when comparing a normalized vector against an axis.
pub const AXIS_TOLERANCE: f64 = 0.1;

/// Diameter tolerance for tool matching (mm).
pub const DIAMETER_TOLERANCE: f64 = 0.1;

/// Allowed coordinate drift after a full 360 degree rotation cycle (mm).
pub const ROTATION_TOLERANCE: f64 = 0.05;

/// Workpieces taller than this are rotated 90 degrees to fit the machine (mm).
pub const AUTO_ROTATION_HEIGHT_LIMIT: f64 = 800.0;

/// Round a coordinate or dimension to the machine resolution (0.1 mm).
pub fn round_mm(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_mm() {
        assert_eq!(round_mm(13.04), 13.0);
        assert_eq!(round_mm(13.06), 13.1);
        assert_eq!(round_mm(-9.55), -9.6);
        assert_eq!(round_mm(0.0), 0.0);
    }
}
