//! Normalisation and rounding helpers used by the outbound view and charts.

use crate::criteria::{Criterion, CRITERIA_COUNT};
use crate::vector::FeatureVector;

/// Divide every value by its criterion's fixed radar max, giving roughly
/// [0, 1] per axis. Values outside the declared domain are not clamped.
pub fn radar_normalise(vector: &FeatureVector) -> [f64; CRITERIA_COUNT] {
    let mut out = [0.0; CRITERIA_COUNT];
    for (criterion, value) in vector.entries() {
        out[criterion.index()] = value / criterion.radar_max();
    }
    out
}

/// Absolute difference between two values on the radar scale of `criterion`.
pub fn normalised_gap(criterion: Criterion, a: f64, b: f64) -> f64 {
    (a - b).abs() / criterion.radar_max()
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_normalise() {
        let v = FeatureVector::new([42.0, 250.0, 3.0, 1.0, 0.6, 0.3, 0.9]);
        let n = radar_normalise(&v);
        assert!((n[0] - 1.0).abs() < 1e-12);
        assert!((n[1] - 0.5).abs() < 1e-12);
        assert!((n[2] - 0.1).abs() < 1e-12);
        assert_eq!(&n[3..], &[1.0, 0.6, 0.3, 0.9]);
    }

    #[test]
    fn test_normalised_gap() {
        assert!((normalised_gap(Criterion::PlateletCount, 55.0, 45.0) - 0.02).abs() < 1e-12);
        assert!((normalised_gap(Criterion::Pain, 0.3, 0.9) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(136.6289, 2), 136.63);
        assert_eq!(round_to(87.25, 1), 87.3);
        assert_eq!(round_to(0.04, 1), 0.0);
        assert_eq!(round_to(100.0, 1), 100.0);
    }
}
